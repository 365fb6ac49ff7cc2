//! Flowline IQ: Shaker Performance Reporting
//!
//! Analysis backend for flowline shaker performance data and the
//! Derrick vs Non-Derrick cost comparison dashboard.
//!
//! ## Architecture
//!
//! - **Dataset**: one-time CSV load into an immutable record set
//! - **Cost Engine**: pure filter → aggregate → cost model → comparator
//!   pipeline, recomputed per request
//! - **API**: axum JSON surface consumed by the dashboard front-end

pub mod api;
pub mod config;
pub mod cost_engine;
pub mod dataset;
pub mod types;

// Re-export the engine surface
pub use cost_engine::{
    compare, compute_cost, distinct_values, filter, group_totals, mean, sum, validate_config,
    AnalysisError, GroupAggregates, GroupTotal, Predicate, SummaryMetrics,
};

// Re-export core types
pub use types::{
    CostBreakdown, CostConfig, CostDelta, GroupComparison, NumericField, ShakerRecord, TextField,
};

// Re-export dataset loading
pub use dataset::{Dataset, DatasetError, DatasetInfo};

// Re-export configuration
pub use config::AppConfig;
