//! API request handlers
//!
//! Translates UI selections into engine predicates and engine results
//! into response DTOs. The engine itself stays ignorant of HTTP: every
//! handler is filter → aggregate → cost model over the shared immutable
//! dataset, with engine errors mapped onto the error envelope.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::cost_engine::{
    self, compare, compute_cost, distinct_values, filter, group_totals, GroupAggregates,
    Predicate, SummaryMetrics,
};
use crate::dataset::Dataset;
use crate::types::{CostConfig, ShakerRecord};

/// Shared state for all handlers: the record set loaded at startup and
/// the calculator defaults from the config file.
#[derive(Clone)]
pub struct DashboardState {
    pub dataset: Arc<Dataset>,
    pub cost_defaults: CostConfig,
}

// ============================================================================
// Filter Translation
// ============================================================================

/// Filter selections as they arrive from the dashboard. Single-select
/// fields use the "All" wildcard for "no constraint"; ranges are open on
/// absent bounds; `shaker_models` is the multi-select variant.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub shaker: Option<String>,
    pub operator: Option<String>,
    pub contractor: Option<String>,
    pub well: Option<String>,
    pub shaker_models: Option<Vec<String>>,
    pub search: Option<String>,
    pub min_depth: Option<f64>,
    pub max_depth: Option<f64>,
    pub min_mud_weight: Option<f64>,
    pub max_mud_weight: Option<f64>,
    pub completed_after: Option<NaiveDate>,
    pub completed_before: Option<NaiveDate>,
}

impl FilterSpec {
    /// Translate selections into predicates. "All" and absent selections
    /// contribute nothing.
    pub fn to_predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        let singles = [
            ("shaker_model", &self.shaker),
            ("operator", &self.operator),
            ("contractor", &self.contractor),
            ("well_name", &self.well),
        ];
        for (field, selection) in singles {
            if let Some(value) = selection {
                predicates.extend(Predicate::equals_unless_all(field, value));
            }
        }

        if let Some(models) = &self.shaker_models {
            predicates.push(Predicate::OneOf {
                field: "shaker_model".to_string(),
                values: models.clone(),
            });
        }

        if let Some(needle) = &self.search {
            if !needle.trim().is_empty() {
                predicates.push(Predicate::Search {
                    needle: needle.clone(),
                });
            }
        }

        predicates.extend(Predicate::range(
            "measured_depth",
            self.min_depth,
            self.max_depth,
        ));
        predicates.extend(Predicate::range(
            "average_mud_weight",
            self.min_mud_weight,
            self.max_mud_weight,
        ));

        if self.completed_after.is_some() || self.completed_before.is_some() {
            predicates.push(Predicate::DateRange {
                start: self.completed_after,
                end: self.completed_before,
            });
        }

        predicates
    }
}

/// Scalar subset of [`FilterSpec`] accepted as GET query parameters.
/// (Multi-select lists only travel in POST bodies.)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SummaryQuery {
    pub shaker: Option<String>,
    pub operator: Option<String>,
    pub contractor: Option<String>,
    pub well: Option<String>,
    pub search: Option<String>,
    pub min_depth: Option<f64>,
    pub max_depth: Option<f64>,
    pub min_mud_weight: Option<f64>,
    pub max_mud_weight: Option<f64>,
    pub completed_after: Option<NaiveDate>,
    pub completed_before: Option<NaiveDate>,
}

impl From<SummaryQuery> for FilterSpec {
    fn from(q: SummaryQuery) -> Self {
        FilterSpec {
            shaker: q.shaker,
            operator: q.operator,
            contractor: q.contractor,
            well: q.well,
            shaker_models: None,
            search: q.search,
            min_depth: q.min_depth,
            max_depth: q.max_depth,
            min_mud_weight: q.min_mud_weight,
            max_mud_weight: q.max_mud_weight,
            completed_after: q.completed_after,
            completed_before: q.completed_before,
        }
    }
}

fn apply_filters<'a>(
    records: &'a [ShakerRecord],
    spec: &FilterSpec,
) -> Result<Vec<&'a ShakerRecord>, cost_engine::AnalysisError> {
    filter(records, &spec.to_predicates())
}

// ============================================================================
// Health & Dataset
// ============================================================================

/// GET /health
///
/// Liveness probe; also reports how many records are being served.
pub async fn health_check(State(state): State<DashboardState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "records": state.dataset.records().len(),
    }))
}

/// GET /api/v1/dataset
pub async fn get_dataset_info(State(state): State<DashboardState>) -> Response {
    ApiResponse::ok(state.dataset.info.clone())
}

// ============================================================================
// Filter Options
// ============================================================================

/// Dropdown options for every filterable field.
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub shaker_models: Vec<String>,
    pub operators: Vec<String>,
    pub contractors: Vec<String>,
    pub wells: Vec<String>,
}

/// GET /api/v1/filters
pub async fn get_filter_options(State(state): State<DashboardState>) -> Response {
    let refs: Vec<&ShakerRecord> = state.dataset.records().iter().collect();
    // The field names are compile-time constants; lookup cannot fail.
    let options = FilterOptions {
        shaker_models: distinct_values(&refs, "shaker_model").unwrap_or_default(),
        operators: distinct_values(&refs, "operator").unwrap_or_default(),
        contractors: distinct_values(&refs, "contractor").unwrap_or_default(),
        wells: distinct_values(&refs, "well_name").unwrap_or_default(),
    };
    ApiResponse::ok(options)
}

// ============================================================================
// Summary & Charts
// ============================================================================

/// GET /api/v1/summary?shaker=...&operator=...
///
/// Headline metrics for a filtered subset. `All` means no constraint.
pub async fn get_summary(
    State(state): State<DashboardState>,
    Query(query): Query<SummaryQuery>,
) -> Response {
    let spec = FilterSpec::from(query);
    match apply_filters(state.dataset.records(), &spec) {
        Ok(subset) => ApiResponse::ok(SummaryMetrics::from_records(&subset)),
        Err(e) => ApiErrorResponse::from_analysis(&e),
    }
}

/// Query parameters for the chart table endpoint.
#[derive(Debug, Deserialize)]
pub struct GroupTotalsQuery {
    /// Text field to group by (e.g. `shaker_model`)
    pub key: String,
    /// Numeric field to sum per group (e.g. `total_dilution`)
    pub value: String,
}

/// GET /api/v1/charts/group-totals?key=shaker_model&value=total_dilution
pub async fn get_group_totals(
    State(state): State<DashboardState>,
    Query(query): Query<GroupTotalsQuery>,
) -> Response {
    let refs: Vec<&ShakerRecord> = state.dataset.records().iter().collect();
    match group_totals(&refs, &query.key, &query.value) {
        Ok(table) => ApiResponse::ok(table),
        Err(e) => ApiErrorResponse::from_analysis(&e),
    }
}

// ============================================================================
// Cost Estimation
// ============================================================================

/// One group of a cost request: which records, priced how. A missing
/// config uses the `[cost_defaults]` from the service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CostRequest {
    pub filters: FilterSpec,
    pub config: Option<CostConfig>,
}

/// Cost result for one group.
#[derive(Debug, Serialize)]
pub struct CostResponse {
    pub record_count: usize,
    pub aggregates: GroupAggregates,
    pub breakdown: crate::types::CostBreakdown,
}

/// POST /api/v1/cost
pub async fn post_cost(
    State(state): State<DashboardState>,
    Json(request): Json<CostRequest>,
) -> Response {
    let config = request.config.unwrap_or_else(|| state.cost_defaults.clone());
    let subset = match apply_filters(state.dataset.records(), &request.filters) {
        Ok(subset) => subset,
        Err(e) => return ApiErrorResponse::from_analysis(&e),
    };
    let aggregates = GroupAggregates::from_records(&subset);
    match compute_cost(&aggregates, &config) {
        Ok(breakdown) => ApiResponse::ok(CostResponse {
            record_count: subset.len(),
            aggregates,
            breakdown,
        }),
        Err(e) => ApiErrorResponse::from_analysis(&e),
    }
}

// ============================================================================
// Group Comparison
// ============================================================================

/// POST /api/v1/compare body: two independently filtered and configured
/// groups ("Derrick" vs "Non-Derrick" is just what the dashboard labels
/// them).
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub group_a: CostRequest,
    pub group_b: CostRequest,
}

/// Comparison result with per-group record counts for the UI.
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub group_a_records: usize,
    pub group_b_records: usize,
    #[serde(flatten)]
    pub comparison: crate::types::GroupComparison,
}

/// POST /api/v1/compare
pub async fn post_compare(
    State(state): State<DashboardState>,
    Json(request): Json<CompareRequest>,
) -> Response {
    let records = state.dataset.records();

    let subset_a = match apply_filters(records, &request.group_a.filters) {
        Ok(subset) => subset,
        Err(e) => return ApiErrorResponse::from_analysis(&e),
    };
    let subset_b = match apply_filters(records, &request.group_b.filters) {
        Ok(subset) => subset,
        Err(e) => return ApiErrorResponse::from_analysis(&e),
    };

    let config_a = request
        .group_a
        .config
        .unwrap_or_else(|| state.cost_defaults.clone());
    let config_b = request
        .group_b
        .config
        .unwrap_or_else(|| state.cost_defaults.clone());

    match compare(&subset_a, &config_a, &subset_b, &config_b) {
        Ok(comparison) => ApiResponse::ok(CompareResponse {
            group_a_records: subset_a.len(),
            group_b_records: subset_b.len(),
            comparison,
        }),
        Err(e) => ApiErrorResponse::from_analysis(&e),
    }
}
