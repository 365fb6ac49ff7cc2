//! Column aggregation over record subsets
//!
//! Sums and means exclude null values entirely: a missing cell
//! contributes neither to the numerator nor to the count. The sum of an
//! empty selection is 0 (so fixed costs still price correctly), but the
//! mean of an empty selection is an error — returning 0 or NaN would make
//! "no data" indistinguishable from "zero value" in the UI.

use serde::{Deserialize, Serialize};

use super::AnalysisError;
use crate::types::{NumericField, ShakerRecord};

/// Sum of a numeric field over a subset, by schema field name.
pub fn sum(records: &[&ShakerRecord], field: &str) -> Result<f64, AnalysisError> {
    let field = NumericField::from_name(field)
        .ok_or_else(|| AnalysisError::MissingField(field.to_string()))?;
    Ok(sum_typed(records, field))
}

/// Mean of a numeric field over a subset, by schema field name.
///
/// Fails with [`AnalysisError::EmptyInput`] when no record carries a
/// value for the field.
pub fn mean(records: &[&ShakerRecord], field: &str) -> Result<f64, AnalysisError> {
    let name = field;
    let field = NumericField::from_name(field)
        .ok_or_else(|| AnalysisError::MissingField(field.to_string()))?;

    let mut total = 0.0;
    let mut count = 0usize;
    for record in records {
        if let Some(value) = record.numeric(field) {
            total += value;
            count += 1;
        }
    }
    if count == 0 {
        return Err(AnalysisError::EmptyInput {
            field: name.to_string(),
        });
    }
    Ok(total / count as f64)
}

fn sum_typed(records: &[&ShakerRecord], field: NumericField) -> f64 {
    records.iter().filter_map(|r| r.numeric(field)).sum()
}

/// The three cost-driving sums the cost model consumes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupAggregates {
    /// Sum of dilution volume (bbl)
    pub total_dilution: f64,
    /// Sum of haul-off volume (bbl)
    pub haul_off: f64,
    /// Sum of footage drilled (ft)
    pub interval_length: f64,
}

impl GroupAggregates {
    /// Aggregate a filtered subset. An empty subset yields all-zero sums,
    /// which the cost model prices as fixed costs only.
    pub fn from_records(records: &[&ShakerRecord]) -> Self {
        Self {
            total_dilution: sum_typed(records, NumericField::TotalDilution),
            haul_off: sum_typed(records, NumericField::HaulOff),
            interval_length: sum_typed(records, NumericField::IntervalLength),
        }
    }
}
