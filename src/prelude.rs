//! Wallboards prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    config::{ConfigError, CuttingSettings, StockEntry, WallConfig, WallDimensions},
    courses::{Course, CoursePacker},
    cuts::{Cut, CutError, CutResolver},
    lengths::Length,
    plan::{AllocationFailure, CuttingPlan, PlanError, Planner},
    pool::{InventoryPool, PoolError},
    report::{Report, ReportError},
    tally::InstalledTally,
};
