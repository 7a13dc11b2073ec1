//! Report
//!
//! Plain-text rendering of a cutting plan: the starting stock, an elevation
//! of the wall showing where each joint lands, the cut list per course, and
//! what is left over.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    config::WallConfig,
    courses::Course,
    cuts::Cut,
    lengths::Length,
    plan::{AllocationFailure, CuttingPlan},
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The output could not be written.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Writes plans and failures for a wall configuration.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    config: &'a WallConfig,
}

impl<'a> Report<'a> {
    /// Create a report for plans built from `config`.
    pub fn new(config: &'a WallConfig) -> Self {
        Report { config }
    }

    /// Write the full plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_plan(
        &self,
        plan: &CuttingPlan,
        mut out: impl io::Write,
    ) -> Result<(), ReportError> {
        self.write_summary(&mut out, plan.courses().len())?;

        write_lengths(&mut out, "Stock", plan.stock().iter())?;

        self.write_elevation(&mut out, plan.courses())?;
        write_cut_list(&mut out, plan.courses())?;

        write_lengths(&mut out, "Left Over", plan.leftover().iter())?;

        let minimum = self.config.cutting.minimum_cut;
        let unusable = plan.leftover().count_shorter_than(minimum);

        if unusable > 0 {
            writeln!(
                out,
                "  {unusable} offcut(s) shorter than the {minimum}\" minimum cut\n"
            )?;
        }

        write_lengths(&mut out, "On Wall", plan.installed().iter())?;

        Ok(())
    }

    /// Write the state captured when a cut could not be made.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_failure(
        &self,
        failure: &AllocationFailure,
        mut out: impl io::Write,
    ) -> Result<(), ReportError> {
        writeln!(
            out,
            "Failed on course {}: {}\n",
            failure.course + 1,
            failure.source
        )?;

        let mut courses = failure.completed.clone();

        if !failure.partial.is_empty() {
            courses.push(failure.partial.clone());
        }

        if !courses.is_empty() {
            self.write_elevation(&mut out, &courses)?;
            write_cut_list(&mut out, &courses)?;
        }

        write_lengths(&mut out, "Pool", failure.pool.iter())?;

        Ok(())
    }

    fn write_summary(&self, out: &mut impl io::Write, courses: usize) -> Result<(), ReportError> {
        let spans: Vec<String> = self.config.spans.iter().map(Length::to_string).collect();
        let cutting = &self.config.cutting;

        writeln!(out, "Course Count: {courses}")?;
        writeln!(out, "Spans: [{}]", spans.join(", "))?;
        writeln!(
            out,
            "Kerf: {}\"  Minimum Cut: {}\"  Tolerance: {}\"\n",
            cutting.kerf, cutting.minimum_cut, cutting.tolerance
        )?;

        Ok(())
    }

    /// One line per course, top course first, with `|` at every joint, then
    /// the studs marked with `.` along the bottom.
    fn write_elevation(
        &self,
        out: &mut impl io::Write,
        courses: &[Course],
    ) -> Result<(), ReportError> {
        let width = self.config.span_total();

        writeln!(out, "Courses:")?;

        for (index, course) in courses.iter().enumerate().rev() {
            let joints = course.iter().map(Cut::length);

            writeln!(out, "{:>2} {}", index + 1, ruler(joints, width, '|'))?;
        }

        let studs = self.config.spans.iter().copied();

        writeln!(out, "{:>2} {}\n", 0, ruler(studs, width, '.'))?;

        Ok(())
    }
}

fn write_cut_list(out: &mut impl io::Write, courses: &[Course]) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["Course", "Pieces", "Cuts (length / board)"]);

    for (index, course) in courses.iter().enumerate() {
        let cuts: Vec<String> = course.iter().map(Cut::to_string).collect();

        builder.push_record([
            format!("{}", index + 1),
            format!("{}", course.len()),
            cuts.join("  "),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(0..2), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}\n")?;

    Ok(())
}

fn write_lengths(
    out: &mut impl io::Write,
    label: &str,
    lengths: impl Iterator<Item = (Length, u32)>,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();
    let mut total = Length::ZERO;

    builder.push_record(["Length", "Count", ""]);

    for (length, count) in lengths {
        total += length * count;

        builder.push_record([
            format!("{length:.2}\""),
            format!("{count}"),
            bar(length),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(0..2), Alignment::right());

    writeln!(out, "{label} ({:.0}\"):", total.round_dp(0))?;
    writeln!(out, "{table}\n")?;

    Ok(())
}

/// One `#` per whole unit of length.
fn bar(length: Length) -> String {
    "#".repeat(length.whole_units().unwrap_or(0))
}

/// Draw `mark` at the start of the line and after each segment.
///
/// Positions are taken from running totals so rounding never drifts.
fn ruler(segments: impl Iterator<Item = Length>, total: Length, mark: char) -> String {
    let width = total.whole_units().unwrap_or(0);
    let mut line = vec![' '; width + 1];
    let mut position = Length::ZERO;

    if let Some(first) = line.first_mut() {
        *first = mark;
    }

    for segment in segments {
        position += segment;

        if let Some(cell) = position.whole_units().and_then(|column| line.get_mut(column)) {
            *cell = mark;
        }
    }

    line.into_iter().collect()
}
