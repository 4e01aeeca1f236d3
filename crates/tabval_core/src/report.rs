//! Report types for validation results.
//!
//! The report shape is part of the public contract: kebab-case field names
//! (`error-count`, `row-number`, …) are what downstream pipelines parse.
//! A report is a pure snapshot: composed once per run, never mutated after.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The final result of one validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Run duration in seconds, rounded to milliseconds
    pub time: f64,

    /// True when no table produced any error
    pub valid: bool,

    /// Total number of errors across all tables
    #[serde(rename = "error-count")]
    pub error_count: usize,

    /// Number of tables actually attempted
    #[serde(rename = "table-count")]
    pub table_count: usize,

    /// Per-table reports, in source declaration order
    pub tables: Vec<TableReport>,

    /// Advisory warnings (limit breaches, unparsable descriptors); these
    /// never affect `valid`
    pub warnings: Vec<String>,
}

impl Report {
    /// Composes the final report from per-table reports and warnings.
    pub fn compose(tables: Vec<TableReport>, warnings: Vec<String>, time: f64) -> Self {
        Self {
            time,
            valid: tables.iter().all(|table| table.valid),
            error_count: tables.iter().map(|table| table.errors.len()).sum(),
            table_count: tables.len(),
            tables,
            warnings,
        }
    }
}

/// The validation result for a single table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableReport {
    /// Table inspection duration in seconds
    pub time: f64,

    /// True when the table produced no errors
    pub valid: bool,

    /// Number of errors collected (after limit truncation)
    #[serde(rename = "error-count")]
    pub error_count: usize,

    /// Last physical row number read, counting the header row; 0 when the
    /// table was empty or could not be opened
    #[serde(rename = "row-count")]
    pub row_count: usize,

    /// Source label (file path or `inline`)
    pub source: String,

    /// Header row values; `None` when the source has no header row
    pub headers: Option<Vec<String>>,

    /// Resolved scheme, e.g. `file` or `inline`
    pub scheme: String,

    /// Resolved format, e.g. `csv` or `inline`
    pub format: String,

    /// Character encoding used to read the source
    pub encoding: String,

    /// Schema identifier when a schema was applied (`table-schema`)
    pub schema: Option<String>,

    /// Ordered validation errors
    pub errors: Vec<ValidationError>,
}

impl TableReport {
    /// Assembles a table report, deriving `valid` and `error-count`.
    pub fn assemble(
        source: impl Into<String>,
        errors: Vec<ValidationError>,
        row_count: usize,
        time: f64,
    ) -> Self {
        Self {
            time,
            valid: errors.is_empty(),
            error_count: errors.len(),
            row_count,
            source: source.into(),
            headers: None,
            scheme: String::new(),
            format: String::new(),
            encoding: String::new(),
            schema: None,
            errors,
        }
    }
}

/// Rounds a duration to whole milliseconds, expressed in seconds.
pub fn round_time(elapsed: std::time::Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(errors: Vec<ValidationError>) -> TableReport {
        TableReport::assemble("inline", errors, 3, 0.0)
    }

    #[test]
    fn test_compose_aggregates_counts() {
        let report = Report::compose(
            vec![
                table(vec![]),
                table(vec![ValidationError::new("blank-row", "Row 3 is blank")]),
            ],
            vec!["a warning".to_string()],
            0.001,
        );

        assert!(!report.valid);
        assert_eq!(report.table_count, 2);
        assert_eq!(report.error_count, 1);
        assert!(report.tables[0].valid);
        assert!(!report.tables[1].valid);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_compose_empty_is_valid() {
        let report = Report::compose(vec![], vec![], 0.0);
        assert!(report.valid);
        assert_eq!(report.error_count, 0);
    }

    #[test]
    fn test_report_serializes_contract_names() {
        let report = Report::compose(vec![table(vec![])], vec![], 0.0);
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("table-count").is_some());
        assert!(json.get("error-count").is_some());
        assert!(json["tables"][0].get("row-count").is_some());
        assert_eq!(json["tables"][0]["headers"], serde_json::Value::Null);
    }

    #[test]
    fn test_round_time() {
        let duration = std::time::Duration::from_micros(1_234_567);
        assert_eq!(round_time(duration), 1.235);
    }
}
