//! Cost estimation engine
//!
//! The analytical core of the service: filter a record set, aggregate the
//! cost-driving volumes, run the cost model, and compare two groups.
//! Every function here is pure and synchronous — same inputs, same
//! outputs, no I/O — so results can be recomputed on every filter or
//! config change and cached freely by callers.
//!
//! Pipeline: `filter` → `GroupAggregates::from_records` → `compute_cost`,
//! with `compare` driving the whole chain once per group.

pub mod aggregate;
pub mod comparator;
pub mod cost_model;
pub mod filter;
pub mod summary;

pub use aggregate::{mean, sum, GroupAggregates};
pub use comparator::compare;
pub use cost_model::{compute_cost, validate_config};
pub use filter::{filter, Predicate};
pub use summary::{distinct_values, group_totals, GroupTotal, SummaryMetrics};

use thiserror::Error;

/// Errors surfaced by the analysis engine.
///
/// None of these are retried (the operations are deterministic) and none
/// are fatal — only the current computation fails, prior results remain
/// valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A mean was requested over zero non-null values. Surfaced instead
    /// of NaN so the caller can tell "no data" apart from "zero value".
    #[error("no records with a value for '{field}'")]
    EmptyInput { field: String },

    /// A cost configuration value fails validation; rejected before any
    /// arithmetic runs.
    #[error("invalid cost configuration: {0}")]
    InvalidConfiguration(String),

    /// A filter or aggregate referenced a field that is not part of the
    /// record schema.
    #[error("unknown record field '{0}'")]
    MissingField(String),
}
