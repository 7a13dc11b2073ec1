//! Wallboards
//!
//! Wallboards plans how to cut a stock of boards into courses for a wall. Each
//! course must cover the full wall width with joints that land on the studs,
//! and every offcut goes back into the pool as stock for later courses.

pub mod config;
pub mod courses;
pub mod cuts;
pub mod lengths;
pub mod plan;
pub mod pool;
pub mod prelude;
pub mod report;
pub mod tally;
