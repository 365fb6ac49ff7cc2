//! Shaker performance dataset loader
//!
//! Parses the flowline shaker performance export (CSV) into
//! [`ShakerRecord`]s. Two header conventions are accepted and
//! auto-detected case-insensitively:
//!
//! **Descriptive names:** `well_name`, `operator`, `contractor`,
//! `shaker_model`, `total_dilution`, `haul_off`, `interval_length`,
//! `average_mud_weight`, `measured_depth`, `completion_date`.
//!
//! **Legacy export names:** `Well_Name`, `Operator`, `Contractor`,
//! `flowline_Shakers`, `Total_Dil`, `Haul_OFF`, `IntLength`, `Avg_MW`,
//! `MD`, `Completion_Date`.
//!
//! Empty or unparseable cells load as null, never as zero — the
//! aggregation layer relies on that distinction. The dataset is loaded
//! once at startup and immutable afterwards.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::types::ShakerRecord;

/// Errors raised while loading the dataset. All are fatal to startup —
/// a service with no records has nothing to report on.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("empty file: {0}")]
    EmptyFile(String),
    #[error("missing required columns: {0}")]
    MissingColumns(String),
    #[error("no usable records in {path} ({errors} errors, {skipped} skipped)")]
    NoRecords {
        path: String,
        errors: usize,
        skipped: usize,
    },
}

// ============================================================================
// CSV Quote-Aware Parsing
// ============================================================================

/// Split a CSV line respecting quoted fields (handles commas inside quotes).
/// Returns owned strings because quoted fields need unquoting.
fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    // Check for escaped quote ("")
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.clone());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

// ============================================================================
// Column Mapping
// ============================================================================

/// Maps CSV column names to indices, handling both header conventions.
#[derive(Debug, Clone, Default)]
struct ColumnMap {
    well_name: Option<usize>,
    operator: Option<usize>,
    contractor: Option<usize>,
    shaker_model: Option<usize>,
    total_dilution: Option<usize>,
    haul_off: Option<usize>,
    interval_length: Option<usize>,
    average_mud_weight: Option<usize>,
    measured_depth: Option<usize>,
    completion_date: Option<usize>,
}

impl ColumnMap {
    /// Build the column map from the CSV header row.
    fn from_header(header: &str) -> Self {
        let mut map = Self::default();
        for (idx, col) in csv_split(header).iter().enumerate() {
            let col = col.trim().to_lowercase();
            match col.as_str() {
                "well_name" | "well name" | "well" => map.well_name = Some(idx),
                "operator" => map.operator = Some(idx),
                "contractor" | "drilling contractor" => map.contractor = Some(idx),
                "shaker_model" | "flowline_shakers" | "flowline shakers" | "shaker" => {
                    map.shaker_model = Some(idx)
                }
                "total_dilution" | "total_dil" | "total dilution" => {
                    map.total_dilution = Some(idx)
                }
                "haul_off" | "haul off" => map.haul_off = Some(idx),
                "interval_length" | "intlength" | "interval length" => {
                    map.interval_length = Some(idx)
                }
                "average_mud_weight" | "avg_mw" | "avg mud weight" | "mud_weight" => {
                    map.average_mud_weight = Some(idx)
                }
                "measured_depth" | "md" | "depth" => map.measured_depth = Some(idx),
                "completion_date" | "completion date" | "date_completed" => {
                    map.completion_date = Some(idx)
                }
                _ => {}
            }
        }
        map
    }

    /// The cost engine cannot run without the shaker model and the three
    /// cost-driving measurements.
    fn validate(&self) -> Result<(), DatasetError> {
        let mut missing = Vec::new();
        if self.shaker_model.is_none() {
            missing.push("shaker_model");
        }
        if self.total_dilution.is_none() {
            missing.push("total_dilution");
        }
        if self.haul_off.is_none() {
            missing.push("haul_off");
        }
        if self.interval_length.is_none() {
            missing.push("interval_length");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DatasetError::MissingColumns(missing.join(", ")))
        }
    }

    /// Report which columns were found.
    fn summary(&self) -> String {
        let mut found: Vec<&str> = Vec::new();
        let mut missing: Vec<&str> = Vec::new();

        macro_rules! check_col {
            ($name:expr, $field:expr) => {
                if $field.is_some() { found.push($name); } else { missing.push($name); }
            };
        }

        check_col!("well_name", self.well_name);
        check_col!("operator", self.operator);
        check_col!("contractor", self.contractor);
        check_col!("shaker_model", self.shaker_model);
        check_col!("total_dilution", self.total_dilution);
        check_col!("haul_off", self.haul_off);
        check_col!("interval_length", self.interval_length);
        check_col!("average_mud_weight", self.average_mud_weight);
        check_col!("measured_depth", self.measured_depth);
        check_col!("completion_date", self.completion_date);

        format!(
            "Found {}/{} columns. Present: [{}]. Missing: [{}]",
            found.len(),
            found.len() + missing.len(),
            found.join(", "),
            missing.join(", "),
        )
    }
}

// ============================================================================
// Cell Parsing
// ============================================================================

fn text_cell(fields: &[String], idx: Option<usize>) -> Option<String> {
    let value = fields.get(idx?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Numeric cell; empty and unparseable cells are null, not zero.
/// Thousands separators (e.g. "12,500" arriving quoted) are tolerated.
fn numeric_cell(fields: &[String], idx: Option<usize>) -> Option<f64> {
    let value = fields.get(idx?)?.trim().replace(',', "");
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Completion dates appear as ISO (`2024-03-15`) or US (`03/15/2024`).
fn date_cell(fields: &[String], idx: Option<usize>) -> Option<NaiveDate> {
    let value = fields.get(idx?)?.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%m/%d/%Y"))
        .ok()
}

fn parse_row(line: &str, map: &ColumnMap) -> Option<ShakerRecord> {
    let fields = csv_split(line);
    let record = ShakerRecord {
        well_name: text_cell(&fields, map.well_name),
        operator: text_cell(&fields, map.operator),
        contractor: text_cell(&fields, map.contractor),
        shaker_model: text_cell(&fields, map.shaker_model),
        total_dilution: numeric_cell(&fields, map.total_dilution),
        haul_off: numeric_cell(&fields, map.haul_off),
        interval_length: numeric_cell(&fields, map.interval_length),
        average_mud_weight: numeric_cell(&fields, map.average_mud_weight),
        measured_depth: numeric_cell(&fields, map.measured_depth),
        completion_date: date_cell(&fields, map.completion_date),
    };
    // A row with nothing in any mapped column carries no information.
    if record == ShakerRecord::default() {
        None
    } else {
        Some(record)
    }
}

// ============================================================================
// Dataset
// ============================================================================

/// Metadata about a loaded dataset, reported by the API.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    /// Source file path
    pub source_path: String,
    /// Number of records loaded
    pub record_count: usize,
    /// Number of rows skipped (entirely empty)
    pub skipped_rows: usize,
    /// Number of unreadable lines
    pub error_rows: usize,
    /// Columns found in the header
    pub columns_found: String,
}

/// The immutable record set the whole service computes over.
#[derive(Debug)]
pub struct Dataset {
    records: Vec<ShakerRecord>,
    pub info: DatasetInfo,
}

impl Dataset {
    /// Load a performance CSV.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let file = File::open(path).map_err(|e| DatasetError::Open {
            path: path_str.clone(),
            source: e,
        })?;

        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let header_line = lines
            .next()
            .ok_or_else(|| DatasetError::EmptyFile(path_str.clone()))?
            .map_err(|e| DatasetError::Open {
                path: path_str.clone(),
                source: e,
            })?;

        let col_map = ColumnMap::from_header(&header_line);
        col_map.validate()?;

        let columns_summary = col_map.summary();
        tracing::info!(file = %path_str, "{}", columns_summary);

        let mut records = Vec::new();
        let mut skipped = 0usize;
        let mut errors = 0usize;
        let mut line_num = 1usize;

        for line_result in lines {
            line_num += 1;

            let line = match line_result {
                Ok(l) => l,
                Err(e) => {
                    if errors < 10 {
                        tracing::warn!(line = line_num, error = %e, "Error reading line");
                    }
                    errors += 1;
                    continue;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            match parse_row(&line, &col_map) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        if records.is_empty() {
            return Err(DatasetError::NoRecords {
                path: path_str,
                errors,
                skipped,
            });
        }

        let info = DatasetInfo {
            source_path: path_str,
            record_count: records.len(),
            skipped_rows: skipped,
            error_rows: errors,
            columns_found: columns_summary,
        };

        tracing::info!(
            file = %info.source_path,
            records = info.record_count,
            skipped = info.skipped_rows,
            errors = info.error_rows,
            "Shaker performance dataset loaded"
        );

        Ok(Self { records, info })
    }

    /// Build a dataset from already-parsed records (test fixtures and
    /// alternative loaders).
    pub fn from_records(records: Vec<ShakerRecord>) -> Self {
        let info = DatasetInfo {
            source_path: "<memory>".to_string(),
            record_count: records.len(),
            skipped_rows: 0,
            error_rows: 0,
            columns_found: String::new(),
        };
        Self { records, info }
    }

    /// All records, in file order.
    pub fn records(&self) -> &[ShakerRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_split_plain() {
        assert_eq!(csv_split("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_csv_split_quoted_comma() {
        assert_eq!(
            csv_split(r#"Well 1,"Smith, Jones & Co",Derrick"#),
            vec!["Well 1", "Smith, Jones & Co", "Derrick"]
        );
    }

    #[test]
    fn test_csv_split_escaped_quote() {
        assert_eq!(csv_split(r#""say ""hi""",x"#), vec![r#"say "hi""#, "x"]);
    }

    #[test]
    fn test_column_map_descriptive_headers() {
        let map = ColumnMap::from_header(
            "well_name,operator,contractor,shaker_model,total_dilution,haul_off,interval_length",
        );
        assert_eq!(map.well_name, Some(0));
        assert_eq!(map.shaker_model, Some(3));
        assert_eq!(map.interval_length, Some(6));
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_column_map_legacy_headers() {
        let map = ColumnMap::from_header(
            "Well_Name,Operator,Contractor,flowline_Shakers,Total_Dil,Haul_OFF,IntLength,Avg_MW,MD,Completion_Date",
        );
        assert_eq!(map.shaker_model, Some(3));
        assert_eq!(map.total_dilution, Some(4));
        assert_eq!(map.haul_off, Some(5));
        assert_eq!(map.average_mud_weight, Some(7));
        assert_eq!(map.measured_depth, Some(8));
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_column_map_missing_required_columns() {
        let map = ColumnMap::from_header("well_name,operator");
        let err = map.validate().unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumns(_)));
        assert!(err.to_string().contains("shaker_model"));
    }

    #[test]
    fn test_parse_row_empty_cells_become_null() {
        let map = ColumnMap::from_header("well_name,shaker_model,total_dilution,haul_off,interval_length");
        let record = parse_row("Well-1,Hyperpool,,50,", &map).unwrap();
        assert_eq!(record.total_dilution, None);
        assert_eq!(record.haul_off, Some(50.0));
        assert_eq!(record.interval_length, None);
    }

    #[test]
    fn test_parse_row_unparseable_numeric_is_null() {
        let map = ColumnMap::from_header("shaker_model,total_dilution");
        let record = parse_row("Hyperpool,n/a", &map).unwrap();
        assert_eq!(record.total_dilution, None);
    }

    #[test]
    fn test_parse_row_blank_row_is_skipped() {
        let map = ColumnMap::from_header("shaker_model,total_dilution");
        assert!(parse_row(",", &map).is_none());
    }

    #[test]
    fn test_date_cell_both_formats() {
        let map = ColumnMap::from_header("shaker_model,completion_date");
        let iso = parse_row("Hyperpool,2024-03-15", &map).unwrap();
        let us = parse_row("Hyperpool,03/15/2024", &map).unwrap();
        assert_eq!(iso.completion_date, us.completion_date);
        assert!(iso.completion_date.is_some());
    }
}
