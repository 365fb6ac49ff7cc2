//! API route definitions
//!
//! Organizes endpoints for the flowline shaker dashboard:
//! - /api/v1/dataset - loaded dataset metadata
//! - /api/v1/filters - dropdown options for every filterable field
//! - /api/v1/summary - headline metrics for a filtered subset
//! - /api/v1/charts/group-totals - per-category sums for comparison charts
//! - /api/v1/cost - cost breakdown for one filtered, configured group
//! - /api/v1/compare - two-group cost comparison with deltas

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{self, DashboardState};

/// Create all API routes for the dashboard
pub fn api_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/dataset", get(handlers::get_dataset_info))
        .route("/filters", get(handlers::get_filter_options))
        .route("/summary", get(handlers::get_summary))
        .route("/charts/group-totals", get(handlers::get_group_totals))
        .route("/cost", post(handlers::post_cost))
        .route("/compare", post(handlers::post_compare))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

/// Legacy health endpoint at root level
pub fn legacy_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
