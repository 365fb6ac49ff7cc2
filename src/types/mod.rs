//! Shared data structures for shaker performance analysis
//!
//! This module defines the types flowing through the reporting pipeline:
//! - `ShakerRecord`: one row of the performance dataset, plus the
//!   field-name lookup enums used by filters and aggregates
//! - `CostConfig` / `CostBreakdown` / `GroupComparison`: inputs and
//!   outputs of the cost estimation engine

mod cost;
mod record;

pub use cost::*;
pub use record::*;
