//! Record filtering
//!
//! Predicates compose by logical AND over a record slice. Filtering is
//! read-only and order-preserving: the output is a subset of the input
//! references in their original order, so the same subset can be
//! aggregated and displayed without re-sorting.
//!
//! Null semantics: a predicate on a field the record has no value for
//! excludes that record. The UI's "All" wildcard never reaches a
//! predicate — [`Predicate::equals_unless_all`] translates it to
//! "no predicate" so a real category literally named "All" cannot be
//! confused with the wildcard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::AnalysisError;
use crate::types::{NumericField, ShakerRecord, TextField};

/// Wildcard sentinel used by single-select dropdowns.
pub const ALL_SENTINEL: &str = "All";

/// One filter condition. A filter request is a list of these, combined
/// with AND.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Exact match on a text field.
    Equals { field: String, value: String },
    /// Membership in a set of allowed values. An empty set matches
    /// nothing.
    OneOf { field: String, values: Vec<String> },
    /// Half-open numeric range `[min, max)`.
    Range { field: String, min: f64, max: f64 },
    /// Completion date within the half-open range `[start, end)`.
    /// Open bounds are unconstrained.
    DateRange {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    /// Case-insensitive substring match across all fields.
    Search { needle: String },
}

impl Predicate {
    /// Build an equality predicate, unless the selection is the "All"
    /// wildcard — then no predicate applies at all.
    pub fn equals_unless_all(field: &str, value: &str) -> Option<Self> {
        if value == ALL_SENTINEL {
            None
        } else {
            Some(Predicate::Equals {
                field: field.to_string(),
                value: value.to_string(),
            })
        }
    }

    /// Numeric range from optional bounds; `None` when both bounds are
    /// absent (nothing to constrain).
    pub fn range(field: &str, min: Option<f64>, max: Option<f64>) -> Option<Self> {
        if min.is_none() && max.is_none() {
            return None;
        }
        Some(Predicate::Range {
            field: field.to_string(),
            min: min.unwrap_or(f64::NEG_INFINITY),
            max: max.unwrap_or(f64::INFINITY),
        })
    }

    /// Does this predicate accept the record? Unknown field names are a
    /// schema error, not an empty result.
    fn matches(&self, record: &ShakerRecord) -> Result<bool, AnalysisError> {
        match self {
            Predicate::Equals { field, value } => {
                let field = resolve_text(field)?;
                Ok(record.text(field) == Some(value.as_str()))
            }
            Predicate::OneOf { field, values } => {
                let field = resolve_text(field)?;
                Ok(match record.text(field) {
                    Some(actual) => values.iter().any(|v| v == actual),
                    None => false,
                })
            }
            Predicate::Range { field, min, max } => {
                let field = resolve_numeric(field)?;
                Ok(match record.numeric(field) {
                    Some(value) => value >= *min && value < *max,
                    None => false,
                })
            }
            Predicate::DateRange { start, end } => Ok(match record.completion_date {
                Some(date) => {
                    start.map_or(true, |s| date >= s) && end.map_or(true, |e| date < e)
                }
                None => false,
            }),
            Predicate::Search { needle } => {
                let needle = needle.to_lowercase();
                Ok(record.search_haystack().contains(&needle))
            }
        }
    }
}

fn resolve_text(name: &str) -> Result<TextField, AnalysisError> {
    TextField::from_name(name).ok_or_else(|| AnalysisError::MissingField(name.to_string()))
}

fn resolve_numeric(name: &str) -> Result<NumericField, AnalysisError> {
    NumericField::from_name(name).ok_or_else(|| AnalysisError::MissingField(name.to_string()))
}

/// Apply every predicate to every record, keeping records that satisfy
/// all of them. An empty predicate list returns the full input.
pub fn filter<'a>(
    records: &'a [ShakerRecord],
    predicates: &[Predicate],
) -> Result<Vec<&'a ShakerRecord>, AnalysisError> {
    let mut subset = Vec::with_capacity(records.len());
    for record in records {
        let mut keep = true;
        for predicate in predicates {
            if !predicate.matches(record)? {
                keep = false;
                break;
            }
        }
        if keep {
            subset.push(record);
        }
    }
    Ok(subset)
}
