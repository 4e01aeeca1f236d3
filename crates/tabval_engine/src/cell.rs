//! The cell model shared by all checks.
//!
//! Head cells are built by zipping the header row against the schema fields;
//! body cells by zipping the header columns against each row's values. Both
//! zips are "longest": a column can exist with a header and no field, a
//! field and no header, or a value and neither.

use tabval_core::Field;

/// The header slot of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderSlot {
    /// The column lies beyond the header row entirely
    Missing,
    /// The header row covers the column but carries no usable name
    /// (a blank header cell, or a source without a header row)
    Blank,
    /// A named header
    Name(String),
}

impl HeaderSlot {
    /// True unless the column lies beyond the header row.
    pub fn exists(&self) -> bool {
        !matches!(self, HeaderSlot::Missing)
    }

    /// The header name, if there is one.
    pub fn name(&self) -> Option<&str> {
        match self {
            HeaderSlot::Name(name) => Some(name),
            _ => None,
        }
    }
}

/// A single cell: one column of the header row or of a data row.
///
/// `column_number` is 1-based and stable even when a row is shorter or
/// longer than the header; a missing value is `None` with a column number
/// beyond the row's physical length.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// 1-based column number
    pub column_number: usize,

    /// The column's header slot
    pub header: HeaderSlot,

    /// The schema field resolved for this column, if any
    pub field: Option<Field>,

    /// The raw value; `None` for head cells, null cells, and columns beyond
    /// the row's physical length
    pub value: Option<String>,
}

impl Cell {
    /// True when the cell has no value or only whitespace.
    pub fn is_blank(&self) -> bool {
        match &self.value {
            Some(value) => value.trim().is_empty(),
            None => true,
        }
    }
}
