//! API Regression Tests
//!
//! In-process tests that build the Axum app via `create_app()` and
//! exercise the /api/v1/* endpoints using `tower::ServiceExt::oneshot()`.
//! No binary spawn, no network port — runs in CI without `#[ignore]`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use flowline_iq::api::{create_app, DashboardState};
use flowline_iq::{CostConfig, Dataset, ShakerRecord};

fn create_test_state() -> DashboardState {
    let records = vec![
        ShakerRecord {
            well_name: Some("Eagle-1H".to_string()),
            operator: Some("Apex Energy".to_string()),
            contractor: Some("Summit Drilling".to_string()),
            shaker_model: Some("Derrick Hyperpool".to_string()),
            total_dilution: Some(600.0),
            haul_off: Some(120.0),
            interval_length: Some(3_000.0),
            measured_depth: Some(11_000.0),
            ..Default::default()
        },
        ShakerRecord {
            well_name: Some("Eagle-2H".to_string()),
            operator: Some("Apex Energy".to_string()),
            contractor: Some("Summit Drilling".to_string()),
            shaker_model: Some("Derrick Hyperpool".to_string()),
            total_dilution: Some(400.0),
            haul_off: Some(80.0),
            interval_length: Some(2_000.0),
            measured_depth: Some(9_500.0),
            ..Default::default()
        },
        ShakerRecord {
            well_name: Some("Falcon-3".to_string()),
            operator: Some("Basin Operating".to_string()),
            contractor: Some("Ridgeline Rigs".to_string()),
            shaker_model: Some("Brandt King Cobra".to_string()),
            total_dilution: Some(900.0),
            haul_off: Some(150.0),
            interval_length: Some(2_500.0),
            measured_depth: Some(8_000.0),
            ..Default::default()
        },
    ];
    DashboardState {
        dataset: Arc::new(Dataset::from_records(records)),
        cost_defaults: CostConfig::default(),
    }
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let app = create_app(create_test_state());
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let v = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, v)
}

async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let app = create_app(create_test_state());
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let v = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, v)
}

#[tokio::test]
async fn get_endpoints_return_200() {
    for endpoint in [
        "/health",
        "/api/v1/health",
        "/api/v1/dataset",
        "/api/v1/filters",
        "/api/v1/summary",
        "/api/v1/charts/group-totals?key=shaker_model&value=total_dilution",
    ] {
        let (status, _) = get_json(endpoint).await;
        assert_eq!(status, StatusCode::OK, "GET {endpoint} returned {status}");
    }
}

#[tokio::test]
async fn summary_honours_the_all_wildcard() {
    let (status, v) = get_json("/api/v1/summary?shaker=All&operator=All").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["record_count"], 3);
    assert_eq!(v["data"]["total_dilution"], 1_900.0);
    assert_eq!(v["data"]["interval_length"], 7_500.0);
}

#[tokio::test]
async fn summary_filters_by_selection() {
    let (status, v) = get_json("/api/v1/summary?shaker=Derrick%20Hyperpool").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["record_count"], 2);
    assert_eq!(v["data"]["total_dilution"], 1_000.0);
}

#[tokio::test]
async fn filters_lists_distinct_options() {
    let (status, v) = get_json("/api/v1/filters").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["shaker_models"].as_array().unwrap().len(), 2);
    assert_eq!(v["data"]["operators"].as_array().unwrap().len(), 2);
    assert_eq!(v["data"]["wells"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn group_totals_builds_the_chart_table() {
    let (status, v) =
        get_json("/api/v1/charts/group-totals?key=shaker_model&value=haul_off").await;
    assert_eq!(status, StatusCode::OK);
    let table = v["data"].as_array().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table[0]["label"], "Derrick Hyperpool");
    assert_eq!(table[0]["total"], 200.0);
    assert_eq!(table[1]["total"], 150.0);
}

#[tokio::test]
async fn cost_endpoint_uses_defaults_when_config_omitted() {
    let (status, v) = post_json(
        "/api/v1/cost",
        serde_json::json!({
            "filters": { "shaker": "Derrick Hyperpool" }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["record_count"], 2);
    assert_eq!(v["data"]["aggregates"]["total_dilution"], 1_000.0);
    // Defaults: 100*1000 + 20*200 + 500 + 100000*3/7 + 1000 + 500
    let total = v["data"]["breakdown"]["total_cost"].as_f64().unwrap();
    assert!((total - 148_857.142857).abs() < 1e-6);
}

#[tokio::test]
async fn cost_endpoint_rejects_zero_shaker_life() {
    let (status, v) = post_json(
        "/api/v1/cost",
        serde_json::json!({
            "filters": {},
            "config": { "shaker_life_years": 0.0 }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(v["error"]["code"], "INVALID_CONFIGURATION");
}

#[tokio::test]
async fn unknown_filter_field_is_a_bad_request() {
    // A search predicate is fine, but an unknown chart field fails fast.
    let (status, v) = get_json("/api/v1/charts/group-totals?key=rig_name&value=haul_off").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn compare_identical_groups_is_zero_delta() {
    let (status, v) = post_json(
        "/api/v1/compare",
        serde_json::json!({
            "group_a": { "filters": { "shaker": "Derrick Hyperpool" } },
            "group_b": { "filters": { "shaker": "Derrick Hyperpool" } }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["delta"]["total_cost"], 0.0);
    assert_eq!(v["data"]["delta"]["cost_per_foot"], 0.0);
}

#[tokio::test]
async fn compare_derrick_vs_non_derrick_with_per_group_configs() {
    let (status, v) = post_json(
        "/api/v1/compare",
        serde_json::json!({
            "group_a": {
                "filters": { "shaker": "Derrick Hyperpool" }
            },
            "group_b": {
                "filters": { "shaker": "Brandt King Cobra" },
                "config": { "dilution_rate": 150.0 }
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["group_a_records"], 2);
    assert_eq!(v["data"]["group_b_records"], 1);

    let a_total = v["data"]["group_a"]["total_cost"].as_f64().unwrap();
    let b_total = v["data"]["group_b"]["total_cost"].as_f64().unwrap();
    let delta = v["data"]["delta"]["total_cost"].as_f64().unwrap();
    assert!((delta - (b_total - a_total)).abs() < 1e-9);
}

#[tokio::test]
async fn compare_with_empty_group_prices_fixed_costs() {
    let (status, v) = post_json(
        "/api/v1/compare",
        serde_json::json!({
            "group_a": { "filters": {} },
            "group_b": { "filters": { "shaker_models": [] } }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["group_b_records"], 0);
    let fixed = 500.0 + 100_000.0 * 3.0 / 7.0 + 1000.0 + 500.0;
    let b_total = v["data"]["group_b"]["total_cost"].as_f64().unwrap();
    assert!((b_total - fixed).abs() < 1e-9);
    assert_eq!(v["data"]["group_b"]["cost_per_foot"], 0.0);
}
