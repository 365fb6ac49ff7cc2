//! Shaker performance record schema
//!
//! One `ShakerRecord` is one row of the performance dataset: which well,
//! who drilled it, which flowline shaker ran on it, and the measured
//! volumes/footage for the interval. Every field is nullable — the field
//! exports this data comes from routinely have gaps, and a gap must stay
//! a gap (never silently become zero) so the aggregation layer can
//! exclude it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of flowline shaker performance data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShakerRecord {
    /// Well identifier
    pub well_name: Option<String>,
    /// Operating company
    pub operator: Option<String>,
    /// Drilling contractor
    pub contractor: Option<String>,
    /// Flowline shaker model (e.g. "Derrick Hyperpool", "Brandt King Cobra")
    pub shaker_model: Option<String>,
    /// Total dilution volume over the interval (bbl)
    pub total_dilution: Option<f64>,
    /// Haul-off waste volume over the interval (bbl)
    pub haul_off: Option<f64>,
    /// Footage drilled over the interval (ft)
    pub interval_length: Option<f64>,
    /// Average mud weight over the interval (ppg)
    pub average_mud_weight: Option<f64>,
    /// Measured depth at end of interval (ft)
    pub measured_depth: Option<f64>,
    /// Date the well was completed
    pub completion_date: Option<NaiveDate>,
}

/// Text-valued record fields, addressable by name from filters and the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    WellName,
    Operator,
    Contractor,
    ShakerModel,
}

impl TextField {
    /// All text fields, in schema order.
    pub const ALL: [TextField; 4] = [
        TextField::WellName,
        TextField::Operator,
        TextField::Contractor,
        TextField::ShakerModel,
    ];

    /// Look up a text field by its schema name. Unknown names return `None`;
    /// the analysis layer turns that into a hard error rather than silently
    /// matching nothing.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "well_name" => Some(TextField::WellName),
            "operator" => Some(TextField::Operator),
            "contractor" => Some(TextField::Contractor),
            "shaker_model" => Some(TextField::ShakerModel),
            _ => None,
        }
    }

    /// Schema name of this field.
    pub fn name(self) -> &'static str {
        match self {
            TextField::WellName => "well_name",
            TextField::Operator => "operator",
            TextField::Contractor => "contractor",
            TextField::ShakerModel => "shaker_model",
        }
    }
}

/// Numeric record fields, addressable by name from filters and aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    TotalDilution,
    HaulOff,
    IntervalLength,
    AverageMudWeight,
    MeasuredDepth,
}

impl NumericField {
    /// All numeric fields, in schema order.
    pub const ALL: [NumericField; 5] = [
        NumericField::TotalDilution,
        NumericField::HaulOff,
        NumericField::IntervalLength,
        NumericField::AverageMudWeight,
        NumericField::MeasuredDepth,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "total_dilution" => Some(NumericField::TotalDilution),
            "haul_off" => Some(NumericField::HaulOff),
            "interval_length" => Some(NumericField::IntervalLength),
            "average_mud_weight" => Some(NumericField::AverageMudWeight),
            "measured_depth" => Some(NumericField::MeasuredDepth),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NumericField::TotalDilution => "total_dilution",
            NumericField::HaulOff => "haul_off",
            NumericField::IntervalLength => "interval_length",
            NumericField::AverageMudWeight => "average_mud_weight",
            NumericField::MeasuredDepth => "measured_depth",
        }
    }
}

impl ShakerRecord {
    /// Value of a text field; `None` when the cell was empty in the source.
    pub fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::WellName => self.well_name.as_deref(),
            TextField::Operator => self.operator.as_deref(),
            TextField::Contractor => self.contractor.as_deref(),
            TextField::ShakerModel => self.shaker_model.as_deref(),
        }
    }

    /// Value of a numeric field; `None` when the cell was empty or unparseable.
    pub fn numeric(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::TotalDilution => self.total_dilution,
            NumericField::HaulOff => self.haul_off,
            NumericField::IntervalLength => self.interval_length,
            NumericField::AverageMudWeight => self.average_mud_weight,
            NumericField::MeasuredDepth => self.measured_depth,
        }
    }

    /// Lowercased concatenation of every present field, for free-text search.
    pub fn search_haystack(&self) -> String {
        let mut haystack = String::new();
        for field in TextField::ALL {
            if let Some(value) = self.text(field) {
                haystack.push_str(&value.to_lowercase());
                haystack.push(' ');
            }
        }
        for field in NumericField::ALL {
            if let Some(value) = self.numeric(field) {
                haystack.push_str(&value.to_string());
                haystack.push(' ');
            }
        }
        if let Some(date) = self.completion_date {
            haystack.push_str(&date.to_string());
        }
        haystack
    }
}
