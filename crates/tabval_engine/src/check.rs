//! The check contract.
//!
//! A check is a unit of validation logic with a declared type and context,
//! advertised as data so the inspector's grouping and ordering stays static.
//! Checks may keep state across invocations within one table session; every
//! session gets fresh instances.

use tabval_core::{RawRow, ValidationError};

use crate::cell::Cell;

/// The group a check belongs to, which fixes its execution order:
/// structure checks run first, then schema checks, then custom checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckType {
    /// Structural well-formedness of the table itself
    Structure,
    /// Conformance to the declared schema
    Schema,
    /// Third-party registered checks
    Custom,
}

impl CheckType {
    /// Group ordering rank.
    pub fn rank(&self) -> usize {
        match self {
            CheckType::Structure => 0,
            CheckType::Schema => 1,
            CheckType::Custom => 2,
        }
    }

    /// The group name accepted by check selection.
    pub fn group(&self) -> &'static str {
        match self {
            CheckType::Structure => "structure",
            CheckType::Schema => "schema",
            CheckType::Custom => "custom",
        }
    }
}

/// Whether a check runs against the header or against each data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckContext {
    /// Runs once per table against the header cells
    Head,
    /// Runs once per data row
    Body,
}

/// A pluggable validation unit.
///
/// Implement `check_headers` for head-context checks and `check_row` for
/// body-context checks; the defaults report nothing. Checks may mutate the
/// cell list: removing a cell marks it handled, so later checks skip it.
/// Errors returned without a row number are reported as table-level for the
/// head phase; body checks stamp their own row numbers.
pub trait Check {
    /// Inspects the header cells, with a bounded sample of data rows for
    /// inference-dependent checks.
    fn check_headers(&mut self, cells: &mut Vec<Cell>, sample: &[RawRow]) -> Vec<ValidationError> {
        let _ = (cells, sample);
        Vec::new()
    }

    /// Inspects one data row.
    fn check_row(&mut self, row_number: usize, cells: &mut Vec<Cell>) -> Vec<ValidationError> {
        let _ = (row_number, cells);
        Vec::new()
    }
}
