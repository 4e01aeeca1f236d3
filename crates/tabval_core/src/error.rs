//! Error types for validation runs.
//!
//! Validation findings are data: a [`ValidationError`] is a record in the
//! report, not a Rust error. Only configuration problems (an unknown check
//! identifier, conflicting selections, a non-positive limit) are surfaced
//! as a hard [`ConfigError`] before any table is processed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single validation finding attached to a table report.
///
/// `row_number` and `column_number` are 1-based; both are `None` for
/// table-level findings such as an unreadable source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error code, e.g. `blank-header`, `extra-value`, `foreign-key`
    pub code: String,

    /// Human-readable description
    pub message: String,

    /// 1-based row number, counting the header row; `None` for table-level
    /// and header-level findings
    #[serde(rename = "row-number")]
    pub row_number: Option<usize>,

    /// 1-based column number; `None` for whole-row findings
    #[serde(rename = "column-number")]
    pub column_number: Option<usize>,

    /// Identifier of the check that emitted this error
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub check: String,
}

impl ValidationError {
    /// Creates a table-level error with no row or column position.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            row_number: None,
            column_number: None,
            check: String::new(),
        }
    }

    /// Attaches a row number.
    pub fn with_row_number(mut self, row_number: usize) -> Self {
        self.row_number = Some(row_number);
        self
    }

    /// Attaches a column number.
    pub fn with_column_number(mut self, column_number: usize) -> Self {
        self.column_number = Some(column_number);
        self
    }

    /// Attaches the originating check identifier.
    pub fn with_check(mut self, check: impl Into<String>) -> Self {
        self.check = check.into();
        self
    }
}

/// Hard configuration failures, raised before any table is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A requested check identifier is not registered
    #[error("check \"{0}\" is not registered")]
    UnknownCheck(String),

    /// `checks` and `skip_checks` were both supplied
    #[error("\"checks\" and \"skip_checks\" are mutually exclusive")]
    ConflictingSelection,

    /// A limit was configured as zero
    #[error("limit \"{0}\" must be a positive integer")]
    InvalidLimit(&'static str),
}
