//! Cutting Plan
//!
//! The [`Planner`] runs the course packer once per course, sharing one board
//! pool across the whole wall so that offcuts from lower courses become stock
//! for the courses above them.

use thiserror::Error;
use tracing::{info, info_span, warn};

use crate::{
    config::{ConfigError, CuttingSettings, WallConfig},
    courses::{Course, CoursePacker},
    cuts::{CutError, CutResolver},
    lengths::Length,
    pool::InventoryPool,
    tally::InstalledTally,
};

/// Errors that abort a planning run.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The configuration was rejected before allocation began.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A cut could not be made.
    #[error(transparent)]
    Allocation(Box<AllocationFailure>),
}

/// Diagnostic state captured when a cut cannot be made.
#[derive(Debug, Clone, Error)]
#[error("course {}: {source}", .course + 1)]
pub struct AllocationFailure {
    /// Zero-based index of the course being packed
    pub course: usize,

    /// The error raised by the cut resolver
    pub source: CutError,

    /// Courses completed before the failure
    pub completed: Vec<Course>,

    /// Cuts already made in the failing course
    pub partial: Course,

    /// Pool contents at the moment of failure
    pub pool: InventoryPool,
}

/// The outcome of a successful planning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuttingPlan {
    courses: Vec<Course>,
    stock: InventoryPool,
    leftover: InventoryPool,
    installed: InstalledTally,
}

impl CuttingPlan {
    /// Courses from the bottom of the wall up.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// The pool as configured, before any cuts.
    pub fn stock(&self) -> &InventoryPool {
        &self.stock
    }

    /// Boards and offcuts left after the last course.
    pub fn leftover(&self) -> &InventoryPool {
        &self.leftover
    }

    /// Every piece installed on the wall.
    pub fn installed(&self) -> &InstalledTally {
        &self.installed
    }

    /// Total number of cuts across all courses.
    pub fn cut_count(&self) -> usize {
        self.courses.iter().map(Course::len).sum()
    }
}

/// Runs the greedy allocation for a whole wall.
#[derive(Debug, Clone)]
pub struct Planner<'a> {
    spans: &'a [Length],
    stock: InventoryPool,
    settings: CuttingSettings,
    course_count: usize,
}

impl<'a> Planner<'a> {
    /// Validate `config` and prepare a run.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid, including
    /// spans that do not add up to the wall width.
    pub fn new(config: &'a WallConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Planner {
            spans: &config.spans,
            stock: config.stock(),
            settings: config.cutting,
            course_count: config.course_count()?,
        })
    }

    /// Override the number of courses computed from the wall height.
    #[must_use]
    pub fn with_courses(mut self, course_count: usize) -> Self {
        self.course_count = course_count;
        self
    }

    /// Number of courses this planner will pack.
    pub fn course_count(&self) -> usize {
        self.course_count
    }

    /// Pack every course.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Allocation`] with the state at the point of
    /// failure if any cut cannot be made. There is no partial result.
    pub fn run(&self) -> Result<CuttingPlan, PlanError> {
        let mut pool = self.stock.clone();
        let mut installed = InstalledTally::default();
        let mut courses = Vec::with_capacity(self.course_count);
        let packer = CoursePacker::new(self.spans);

        for index in 0..self.course_count {
            let _span = info_span!("course", index).entered();

            let mut course = Course::new();

            let packed = {
                let mut resolver = CutResolver::new(&mut pool, &mut installed, self.settings);
                packer.pack_into(&mut resolver, &mut course)
            };

            if let Err(source) = packed {
                warn!(error = %source, cuts = course.len(), "allocation failed");

                return Err(PlanError::Allocation(Box::new(AllocationFailure {
                    course: index,
                    source,
                    completed: courses,
                    partial: course,
                    pool,
                })));
            }

            info!(
                cuts = course.len(),
                pool_boards = pool.board_count(),
                "course packed"
            );

            courses.push(course);
        }

        info!(
            courses = courses.len(),
            leftover = %pool.total_length(),
            installed = %installed.total_length(),
            "plan complete"
        );

        Ok(CuttingPlan {
            courses,
            stock: self.stock.clone(),
            leftover: pool,
            installed,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::pool::PoolError;

    use super::*;

    const SMALL_WALL: &str = r"
wall: { width: 10, height: 9.5, board_width: 4.75 }
spans: [3, 3, 4]
inventory:
  - { length: 10, count: 1 }
  - { length: 6, count: 1 }
cutting: { kerf: 0.25, minimum_cut: 2, tolerance: 0.5 }
";

    #[test]
    fn new_rejects_span_mismatch() -> TestResult {
        let mut config = WallConfig::from_yaml_str(SMALL_WALL)?;
        config.wall.width = Length::from(12);

        assert!(matches!(
            Planner::new(&config),
            Err(ConfigError::SpanMismatch { .. })
        ));

        Ok(())
    }

    #[test]
    fn single_course_plan() -> TestResult {
        let config = WallConfig::from_yaml_str(SMALL_WALL)?;

        let plan = Planner::new(&config)?.with_courses(1).run()?;

        assert_eq!(plan.courses().len(), 1);
        assert_eq!(plan.cut_count(), 2);
        assert_eq!(plan.stock(), &config.stock());
        assert_eq!(plan.leftover().count("3.75".parse()?), 1);
        assert_eq!(plan.leftover().count("1.75".parse()?), 1);
        assert_eq!(plan.installed().piece_count(), 2);

        Ok(())
    }

    #[test]
    fn course_count_comes_from_wall_height() -> TestResult {
        let config = WallConfig::from_yaml_str(SMALL_WALL)?;

        let planner = Planner::new(&config)?;

        assert_eq!(planner.course_count(), 2);

        Ok(())
    }

    #[test]
    fn second_course_fails_with_context() -> TestResult {
        let config = WallConfig::from_yaml_str(SMALL_WALL)?;

        let result = Planner::new(&config)?.run();

        let failure = match result {
            Err(PlanError::Allocation(failure)) => failure,
            other => panic!("expected an allocation failure, got {other:?}"),
        };

        // Only the first course's offcuts (3.75" and 1.75") remain. The first
        // 3" piece comes from the 3.75" offcut, the second has nothing left.
        assert_eq!(failure.course, 1);
        assert_eq!(failure.completed.len(), 1);
        assert_eq!(failure.partial.len(), 1);
        assert_eq!(failure.pool.count("0.5".parse()?), 1);
        assert_eq!(
            failure.source,
            CutError::Pool(PoolError::OutOfStock {
                target: "3".parse()?
            })
        );
        assert_eq!(failure.pool.board_count(), 2);

        Ok(())
    }

    #[test]
    fn zero_courses_leaves_stock_untouched() -> TestResult {
        let config = WallConfig::from_yaml_str(SMALL_WALL)?;

        let plan = Planner::new(&config)?.with_courses(0).run()?;

        assert!(plan.courses().is_empty());
        assert_eq!(plan.leftover(), plan.stock());
        assert!(plan.installed().is_empty());

        Ok(())
    }
}
