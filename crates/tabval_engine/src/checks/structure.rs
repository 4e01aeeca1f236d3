//! Built-in structure checks.
//!
//! These validate the physical shape of the table: headers present and
//! distinct, rows neither blank nor duplicated, values matching the header
//! width. They run before schema checks and remove the cells they handle.

use std::collections::HashMap;

use tabval_core::{RawRow, ValidationError};

use crate::cell::{Cell, HeaderSlot};
use crate::check::Check;

/// Reports columns whose header carries no name.
pub struct BlankHeader;

impl Check for BlankHeader {
    fn check_headers(&mut self, cells: &mut Vec<Cell>, _sample: &[RawRow]) -> Vec<ValidationError> {
        cells
            .iter()
            .filter(|cell| cell.header == HeaderSlot::Blank)
            .map(|cell| {
                ValidationError::new(
                    "blank-header",
                    format!("Header in column {} is blank", cell.column_number),
                )
                .with_column_number(cell.column_number)
            })
            .collect()
    }
}

/// Reports named headers that repeat an earlier column's name.
pub struct DuplicateHeader;

impl Check for DuplicateHeader {
    fn check_headers(&mut self, cells: &mut Vec<Cell>, _sample: &[RawRow]) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for cell in cells.iter() {
            let Some(name) = cell.header.name() else {
                continue;
            };
            match seen.get(name) {
                Some(first) => errors.push(
                    ValidationError::new(
                        "duplicate-header",
                        format!(
                            "Header in column {} duplicates header in column {}",
                            cell.column_number, first
                        ),
                    )
                    .with_column_number(cell.column_number),
                ),
                None => {
                    seen.insert(name, cell.column_number);
                }
            }
        }
        errors
    }
}

/// Reports rows where every value is blank, and clears them.
pub struct BlankRow;

impl Check for BlankRow {
    fn check_row(&mut self, row_number: usize, cells: &mut Vec<Cell>) -> Vec<ValidationError> {
        if !cells.iter().all(Cell::is_blank) {
            return Vec::new();
        }
        cells.clear();
        vec![
            ValidationError::new("blank-row", format!("Row {} is completely blank", row_number))
                .with_row_number(row_number),
        ]
    }
}

/// Reports rows identical to an earlier row, and clears them.
pub struct DuplicateRow {
    seen: HashMap<String, usize>,
}

impl DuplicateRow {
    pub fn new() -> Self {
        Self {
            seen: HashMap::new(),
        }
    }

    fn row_key(cells: &[Cell]) -> String {
        let mut key = String::new();
        for cell in cells {
            match &cell.value {
                Some(value) => key.push_str(value),
                None => key.push('\u{0}'),
            }
            key.push('\u{1f}');
        }
        key
    }
}

impl Check for DuplicateRow {
    fn check_row(&mut self, row_number: usize, cells: &mut Vec<Cell>) -> Vec<ValidationError> {
        let key = Self::row_key(cells);
        match self.seen.get(&key) {
            Some(first) => {
                cells.clear();
                vec![
                    ValidationError::new(
                        "duplicate-row",
                        format!("Row {} duplicates row {}", row_number, first),
                    )
                    .with_row_number(row_number),
                ]
            }
            None => {
                self.seen.insert(key, row_number);
                Vec::new()
            }
        }
    }
}

/// Reports values in columns beyond the header, and removes those cells.
pub struct ExtraValue;

impl Check for ExtraValue {
    fn check_row(&mut self, row_number: usize, cells: &mut Vec<Cell>) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        cells.retain(|cell| {
            let extra =
                cell.value.is_some() && !cell.header.exists() && cell.field.is_none();
            if extra {
                errors.push(
                    ValidationError::new(
                        "extra-value",
                        format!(
                            "Row {} has an extra value in column {}",
                            row_number, cell.column_number
                        ),
                    )
                    .with_row_number(row_number)
                    .with_column_number(cell.column_number),
                );
            }
            !extra
        });
        errors
    }
}

/// Reports header columns with no value in the row, and removes those cells.
pub struct MissingValue;

impl Check for MissingValue {
    fn check_row(&mut self, row_number: usize, cells: &mut Vec<Cell>) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        cells.retain(|cell| {
            let missing =
                cell.value.is_none() && (cell.header.exists() || cell.field.is_some());
            if missing {
                errors.push(
                    ValidationError::new(
                        "missing-value",
                        format!(
                            "Row {} has a missing value in column {}",
                            row_number, cell.column_number
                        ),
                    )
                    .with_row_number(row_number)
                    .with_column_number(cell.column_number),
                );
            }
            !missing
        });
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head_cell(column_number: usize, header: HeaderSlot) -> Cell {
        Cell {
            column_number,
            header,
            field: None,
            value: None,
        }
    }

    fn body_cell(column_number: usize, header: HeaderSlot, value: Option<&str>) -> Cell {
        Cell {
            column_number,
            header,
            field: None,
            value: value.map(String::from),
        }
    }

    #[test]
    fn test_blank_header() {
        let mut cells = vec![
            head_cell(1, HeaderSlot::Name("id".to_string())),
            head_cell(2, HeaderSlot::Blank),
            head_cell(3, HeaderSlot::Missing),
        ];

        let errors = BlankHeader.check_headers(&mut cells, &[]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].column_number, Some(2));
        assert_eq!(errors[0].row_number, None);
    }

    #[test]
    fn test_duplicate_header_ignores_blank_headers() {
        let mut cells = vec![
            head_cell(1, HeaderSlot::Name("id".to_string())),
            head_cell(2, HeaderSlot::Blank),
            head_cell(3, HeaderSlot::Name("id".to_string())),
            head_cell(4, HeaderSlot::Blank),
        ];

        let errors = DuplicateHeader.check_headers(&mut cells, &[]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].column_number, Some(3));
        assert!(errors[0].message.contains("column 1"));
    }

    #[test]
    fn test_blank_row_clears_cells() {
        let mut cells = vec![
            body_cell(1, HeaderSlot::Name("a".to_string()), Some("")),
            body_cell(2, HeaderSlot::Name("b".to_string()), None),
        ];

        let errors = BlankRow.check_row(3, &mut cells);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].row_number, Some(3));
        assert_eq!(errors[0].column_number, None);
        assert!(cells.is_empty());
    }

    #[test]
    fn test_duplicate_row_tracks_state_across_rows() {
        let mut check = DuplicateRow::new();

        let mut row2 = vec![body_cell(1, HeaderSlot::Blank, Some("a"))];
        assert!(check.check_row(2, &mut row2).is_empty());

        let mut row3 = vec![body_cell(1, HeaderSlot::Blank, Some("a"))];
        let errors = check.check_row(3, &mut row3);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].row_number, Some(3));
        assert!(errors[0].message.contains("row 2"));
        assert!(row3.is_empty());

        let mut row4 = vec![body_cell(1, HeaderSlot::Blank, Some("b"))];
        assert!(check.check_row(4, &mut row4).is_empty());
    }

    #[test]
    fn test_extra_value_removes_extra_cells() {
        let mut cells = vec![
            body_cell(1, HeaderSlot::Name("field".to_string()), Some("value")),
            body_cell(2, HeaderSlot::Missing, Some("value")),
        ];

        let errors = ExtraValue.check_row(2, &mut cells);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].column_number, Some(2));
        assert_eq!(cells.len(), 1);
    }

    #[test]
    fn test_missing_value_per_missing_position() {
        let mut cells = vec![
            body_cell(1, HeaderSlot::Name("a".to_string()), Some("1")),
            body_cell(2, HeaderSlot::Name("b".to_string()), None),
            body_cell(3, HeaderSlot::Name("c".to_string()), None),
        ];

        let errors = MissingValue.check_row(2, &mut cells);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].column_number, Some(2));
        assert_eq!(errors[1].column_number, Some(3));
        assert_eq!(cells.len(), 1);
    }

    #[test]
    fn test_empty_value_is_not_missing() {
        let mut cells = vec![body_cell(1, HeaderSlot::Name("a".to_string()), Some(""))];
        assert!(MissingValue.check_row(2, &mut cells).is_empty());
        assert_eq!(cells.len(), 1);
    }
}
