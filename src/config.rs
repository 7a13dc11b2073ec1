//! Wall Configuration
//!
//! Wall dimensions, stud spans, board inventory and saw settings, loaded from
//! YAML files such as `fixtures/walls/default.yml`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{lengths::Length, pool::InventoryPool};

/// Directory that [`WallConfig::from_fixture`] reads from.
pub const FIXTURE_DIR: &str = "./fixtures/walls";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a configuration file
    #[error("Failed to read wall configuration {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,

        /// Underlying IO error
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// The spans do not add up to the wall width.
    #[error("your spans ({spans}) don't match the wall ({wall})")]
    SpanMismatch {
        /// Sum of the configured spans
        spans: Length,

        /// Configured wall width
        wall: Length,
    },

    /// A dimension that must be positive is zero or negative.
    #[error("{field} must be greater than zero, got {value}")]
    NonPositive {
        /// Name of the offending field
        field: &'static str,

        /// The configured value
        value: Length,
    },

    /// A saw setting is negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeSetting {
        /// Name of the offending setting
        field: &'static str,

        /// The configured value
        value: Length,
    },

    /// No spans were configured.
    #[error("at least one span is required")]
    EmptySpans,

    /// No boards were configured.
    #[error("the inventory has no boards")]
    EmptyInventory,

    /// An inventory entry has a zero count.
    #[error("inventory entry for {0}\" boards has a count of zero")]
    ZeroStock(Length),

    /// The course count does not fit in a `usize`.
    #[error("wall height {height} / board width {board_width} gives an unusable course count")]
    CourseCount {
        /// Configured wall height
        height: Length,

        /// Configured board width
        board_width: Length,
    },
}

/// Outer dimensions of the wall and the boards covering it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WallDimensions {
    /// Width of the wall; every course covers exactly this much.
    pub width: Length,

    /// Height of the wall.
    pub height: Length,

    /// Face width of one board, i.e. the height of one course.
    pub board_width: Length,
}

/// One line of the board inventory.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StockEntry {
    /// Nominal board length
    pub length: Length,

    /// Number of boards of this length
    pub count: u32,
}

/// Saw and stock-selection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CuttingSettings {
    /// Material lost to the saw blade on every cut.
    pub kerf: Length,

    /// Shortest piece that may be cut.
    pub minimum_cut: Length,

    /// Slack a board must have beyond the cut length to be chosen.
    pub tolerance: Length,
}

impl Default for CuttingSettings {
    fn default() -> Self {
        CuttingSettings {
            kerf: Length::new(Decimal::new(75, 2)),
            minimum_cut: Length::from(5),
            tolerance: Length::new(Decimal::new(5, 1)),
        }
    }
}

impl CuttingSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("cutting.kerf", self.kerf)?;
        non_negative("cutting.tolerance", self.tolerance)?;
        positive("cutting.minimum_cut", self.minimum_cut)
    }
}

/// Complete configuration for one planning run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WallConfig {
    /// Wall and board dimensions
    pub wall: WallDimensions,

    /// Stud spans, left to right, repeated on every course
    pub spans: Vec<Length>,

    /// Available boards
    pub inventory: Vec<StockEntry>,

    /// Saw settings
    #[serde(default)]
    pub cutting: CuttingSettings,
}

impl WallConfig {
    /// Parse a configuration from a YAML string.
    ///
    /// The result is not validated; see [`WallConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the document is malformed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml_str(&contents)
    }

    /// Load a named configuration from the fixtures directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture cannot be read or parsed.
    pub fn from_fixture(name: &str) -> Result<Self, ConfigError> {
        Self::load(Path::new(FIXTURE_DIR).join(format!("{name}.yml")))
    }

    /// Check the configuration before any allocation starts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SpanMismatch`] if the spans do not add up to the
    /// wall width, or another [`ConfigError`] for any out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("wall.width", self.wall.width)?;
        positive("wall.height", self.wall.height)?;
        positive("wall.board_width", self.wall.board_width)?;

        if self.spans.is_empty() {
            return Err(ConfigError::EmptySpans);
        }

        for span in &self.spans {
            positive("spans", *span)?;
        }

        if self.inventory.is_empty() {
            return Err(ConfigError::EmptyInventory);
        }

        for entry in &self.inventory {
            positive("inventory.length", entry.length)?;

            if entry.count == 0 {
                return Err(ConfigError::ZeroStock(entry.length));
            }
        }

        self.cutting.validate()?;

        let spans = self.span_total();

        if spans != self.wall.width {
            return Err(ConfigError::SpanMismatch {
                spans,
                wall: self.wall.width,
            });
        }

        Ok(())
    }

    /// Sum of all spans.
    pub fn span_total(&self) -> Length {
        self.spans.iter().sum()
    }

    /// Number of whole courses that fit in the wall height.
    ///
    /// # Errors
    ///
    /// Returns an error if the board width is not positive or the quotient
    /// cannot be represented.
    pub fn course_count(&self) -> Result<usize, ConfigError> {
        let height = self.wall.height;
        let board_width = self.wall.board_width;

        positive("wall.board_width", board_width)?;

        height
            .value()
            .checked_div(board_width.value())
            .and_then(|courses| courses.floor().to_usize())
            .ok_or(ConfigError::CourseCount {
                height,
                board_width,
            })
    }

    /// Build the starting board pool from the inventory.
    pub fn stock(&self) -> InventoryPool {
        InventoryPool::from_stock(
            self.inventory
                .iter()
                .map(|entry| (entry.length, entry.count)),
        )
    }
}

fn positive(field: &'static str, value: Length) -> Result<(), ConfigError> {
    if value.is_positive() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: Length) -> Result<(), ConfigError> {
    if value < Length::ZERO {
        Err(ConfigError::NegativeSetting { field, value })
    } else {
        Ok(())
    }
}
