//! Summary tables for the dashboard
//!
//! The headline metric tiles, the filter dropdown options, and the
//! per-category totals behind the comparison charts. The core hands back
//! plain tables; building chart objects and formatting currency is the
//! front-end's job.

use serde::{Deserialize, Serialize};

use super::{mean, AnalysisError, GroupAggregates};
use crate::types::{NumericField, ShakerRecord, TextField};

/// Headline numbers for a filtered subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub record_count: usize,
    pub haul_off: f64,
    pub total_dilution: f64,
    pub interval_length: f64,
    /// Mean mud weight across records that report one; absent when none
    /// do (a selection with no data shows a blank tile, not 0 ppg).
    pub average_mud_weight: Option<f64>,
}

impl SummaryMetrics {
    pub fn from_records(records: &[&ShakerRecord]) -> Self {
        let aggregates = GroupAggregates::from_records(records);
        Self {
            record_count: records.len(),
            haul_off: aggregates.haul_off,
            total_dilution: aggregates.total_dilution,
            interval_length: aggregates.interval_length,
            average_mud_weight: mean(records, "average_mud_weight").ok(),
        }
    }
}

/// One row of a per-category chart table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub label: String,
    pub total: f64,
}

/// Non-null unique values of a text field, in first-seen order. Feeds the
/// filter dropdowns.
pub fn distinct_values(
    records: &[&ShakerRecord],
    field: &str,
) -> Result<Vec<String>, AnalysisError> {
    let field = TextField::from_name(field)
        .ok_or_else(|| AnalysisError::MissingField(field.to_string()))?;

    let mut seen: Vec<String> = Vec::new();
    for record in records {
        if let Some(value) = record.text(field) {
            if !seen.iter().any(|s| s == value) {
                seen.push(value.to_string());
            }
        }
    }
    Ok(seen)
}

/// Sum a numeric field per category of a text field, categories in
/// first-seen order. Records with a null key are excluded; null values
/// contribute nothing to their category's total.
pub fn group_totals(
    records: &[&ShakerRecord],
    key_field: &str,
    value_field: &str,
) -> Result<Vec<GroupTotal>, AnalysisError> {
    let key = TextField::from_name(key_field)
        .ok_or_else(|| AnalysisError::MissingField(key_field.to_string()))?;
    let value = NumericField::from_name(value_field)
        .ok_or_else(|| AnalysisError::MissingField(value_field.to_string()))?;

    let mut totals: Vec<GroupTotal> = Vec::new();
    for record in records {
        let Some(label) = record.text(key) else {
            continue;
        };
        let contribution = record.numeric(value).unwrap_or(0.0);
        match totals.iter_mut().find(|t| t.label == label) {
            Some(entry) => entry.total += contribution,
            None => totals.push(GroupTotal {
                label: label.to_string(),
                total: contribution,
            }),
        }
    }
    Ok(totals)
}
