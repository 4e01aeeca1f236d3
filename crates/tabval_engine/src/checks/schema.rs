//! Built-in schema checks.
//!
//! These compare the table against its declared schema: the header set, cell
//! types, and field constraints. They only run when the table has a schema
//! (declared or inferred).

use std::cmp::Ordering;
use std::collections::HashMap;

use regex::Regex;
use tabval_core::{RawRow, Schema, ValidationError};

use crate::cell::Cell;
use crate::check::Check;

/// Reports header columns with no corresponding schema field.
pub struct ExtraHeader;

impl Check for ExtraHeader {
    fn check_headers(&mut self, cells: &mut Vec<Cell>, _sample: &[RawRow]) -> Vec<ValidationError> {
        cells
            .iter()
            .filter(|cell| cell.header.name().is_some() && cell.field.is_none())
            .map(|cell| {
                ValidationError::new(
                    "extra-header",
                    format!(
                        "Header \"{}\" in column {} has no field in the schema",
                        cell.header.name().unwrap_or_default(),
                        cell.column_number
                    ),
                )
                .with_column_number(cell.column_number)
            })
            .collect()
    }
}

/// Reports schema fields with no corresponding header column.
pub struct MissingHeader;

impl Check for MissingHeader {
    fn check_headers(&mut self, cells: &mut Vec<Cell>, _sample: &[RawRow]) -> Vec<ValidationError> {
        cells
            .iter()
            .filter(|cell| cell.field.is_some() && !cell.header.exists())
            .map(|cell| {
                ValidationError::new(
                    "missing-header",
                    format!(
                        "Field \"{}\" in column {} has no header",
                        cell.field.as_ref().map(|f| f.name.as_str()).unwrap_or_default(),
                        cell.column_number
                    ),
                )
                .with_column_number(cell.column_number)
            })
            .collect()
    }
}

/// Reports columns whose header differs from the field name at the same
/// position, and detaches the mismatched field.
pub struct NonMatchingHeader;

impl Check for NonMatchingHeader {
    fn check_headers(&mut self, cells: &mut Vec<Cell>, _sample: &[RawRow]) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for cell in cells.iter_mut() {
            let Some(header) = cell.header.name() else {
                continue;
            };
            let Some(field) = &cell.field else {
                continue;
            };
            if field.name != header {
                errors.push(
                    ValidationError::new(
                        "non-matching-header",
                        format!(
                            "Header \"{}\" in column {} doesn't match field name \"{}\"",
                            header, cell.column_number, field.name
                        ),
                    )
                    .with_column_number(cell.column_number),
                );
                // The declared field doesn't describe this column.
                cell.field = None;
            }
        }
        errors
    }
}

/// Reports values that can't be cast to their field's declared type, and
/// removes those cells so constraint checks skip them.
pub struct TypeOrFormat;

impl Check for TypeOrFormat {
    fn check_row(&mut self, row_number: usize, cells: &mut Vec<Cell>) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        cells.retain(|cell| {
            let (Some(field), Some(value)) = (&cell.field, &cell.value) else {
                return true;
            };
            if value.is_empty() {
                return true;
            }
            match field.cast_value(value) {
                Ok(_) => true,
                Err(e) => {
                    errors.push(
                        ValidationError::new(
                            "type-or-format-error",
                            format!("Row {} column {}: {}", row_number, cell.column_number, e),
                        )
                        .with_row_number(row_number)
                        .with_column_number(cell.column_number),
                    );
                    false
                }
            }
        });
        errors
    }
}

/// Reports empty values in required fields.
pub struct RequiredConstraint;

impl Check for RequiredConstraint {
    fn check_row(&mut self, row_number: usize, cells: &mut Vec<Cell>) -> Vec<ValidationError> {
        cells
            .iter()
            .filter(|cell| {
                cell.field
                    .as_ref()
                    .is_some_and(|field| field.constraints.required)
                    && cell.is_blank()
            })
            .map(|cell| {
                ValidationError::new(
                    "required-constraint",
                    format!(
                        "Column {} is a required field, but row {} has no value",
                        cell.column_number, row_number
                    ),
                )
                .with_row_number(row_number)
                .with_column_number(cell.column_number)
            })
            .collect()
    }
}

/// Reports values that don't match their field's regex pattern.
pub struct PatternConstraint {
    cache: HashMap<String, Option<Regex>>,
}

impl PatternConstraint {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    fn compiled(&mut self, pattern: &str) -> Option<&Regex> {
        self.cache
            .entry(pattern.to_string())
            .or_insert_with(|| Regex::new(pattern).ok())
            .as_ref()
    }
}

impl Check for PatternConstraint {
    fn check_row(&mut self, row_number: usize, cells: &mut Vec<Cell>) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for cell in cells.iter() {
            let Some(field) = &cell.field else { continue };
            let Some(pattern) = &field.constraints.pattern else {
                continue;
            };
            let Some(value) = cell.value.as_deref().filter(|v| !v.is_empty()) else {
                continue;
            };
            let column_number = cell.column_number;
            match self.compiled(pattern) {
                Some(regex) if regex.is_match(value) => {}
                Some(_) => errors.push(
                    ValidationError::new(
                        "pattern-constraint",
                        format!(
                            "Row {} column {}: value \"{}\" doesn't match pattern \"{}\"",
                            row_number, column_number, value, pattern
                        ),
                    )
                    .with_row_number(row_number)
                    .with_column_number(column_number),
                ),
                None => errors.push(
                    ValidationError::new(
                        "pattern-constraint",
                        format!(
                            "Row {} column {}: pattern \"{}\" is not a valid regex",
                            row_number, column_number, pattern
                        ),
                    )
                    .with_row_number(row_number)
                    .with_column_number(column_number),
                ),
            }
        }
        errors
    }
}

/// Reports duplicated values in unique fields and duplicated primary key
/// tuples.
pub struct UniqueConstraint {
    primary_key: Vec<String>,
    seen_values: HashMap<usize, HashMap<String, usize>>,
    seen_keys: HashMap<Vec<String>, usize>,
}

impl UniqueConstraint {
    pub fn new(schema: Option<&Schema>) -> Self {
        Self {
            primary_key: schema.map(|s| s.primary_key.clone()).unwrap_or_default(),
            seen_values: HashMap::new(),
            seen_keys: HashMap::new(),
        }
    }
}

impl Check for UniqueConstraint {
    fn check_row(&mut self, row_number: usize, cells: &mut Vec<Cell>) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for cell in cells.iter() {
            let Some(field) = &cell.field else { continue };
            if !field.constraints.unique {
                continue;
            }
            let Some(value) = cell.value.as_deref().filter(|v| !v.is_empty()) else {
                continue;
            };
            let seen = self.seen_values.entry(cell.column_number).or_default();
            match seen.get(value) {
                Some(first) => errors.push(
                    ValidationError::new(
                        "unique-constraint",
                        format!(
                            "Row {} column {}: value \"{}\" duplicates row {}",
                            row_number, cell.column_number, value, first
                        ),
                    )
                    .with_row_number(row_number)
                    .with_column_number(cell.column_number),
                ),
                None => {
                    seen.insert(value.to_string(), row_number);
                }
            }
        }

        if !self.primary_key.is_empty() {
            let mut key = Vec::with_capacity(self.primary_key.len());
            let mut first_column = None;
            for name in &self.primary_key {
                let Some(cell) = cells
                    .iter()
                    .find(|cell| cell.field.as_ref().is_some_and(|f| &f.name == name))
                else {
                    // A key column is absent from this row; nothing to compare.
                    first_column = None;
                    break;
                };
                first_column.get_or_insert(cell.column_number);
                key.push(cell.value.clone().unwrap_or_default());
            }
            if let Some(column_number) = first_column {
                match self.seen_keys.get(&key) {
                    Some(first) => errors.push(
                        ValidationError::new(
                            "unique-constraint",
                            format!(
                                "Row {} duplicates the primary key ({}) of row {}",
                                row_number,
                                key.join(", "),
                                first
                            ),
                        )
                        .with_row_number(row_number)
                        .with_column_number(column_number),
                    ),
                    None => {
                        self.seen_keys.insert(key, row_number);
                    }
                }
            }
        }

        errors
    }
}

/// Reports values outside their field's enumerated set.
pub struct EnumerableConstraint;

impl Check for EnumerableConstraint {
    fn check_row(&mut self, row_number: usize, cells: &mut Vec<Cell>) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for cell in cells.iter() {
            let Some(field) = &cell.field else { continue };
            let Some(allowed) = &field.constraints.enum_values else {
                continue;
            };
            let Some(value) = cell.value.as_deref().filter(|v| !v.is_empty()) else {
                continue;
            };
            if !allowed.iter().any(|option| option == value) {
                errors.push(
                    ValidationError::new(
                        "enumerable-constraint",
                        format!(
                            "Row {} column {}: value \"{}\" is not in the enumeration [{}]",
                            row_number,
                            cell.column_number,
                            value,
                            allowed.join(", ")
                        ),
                    )
                    .with_row_number(row_number)
                    .with_column_number(cell.column_number),
                );
            }
        }
        errors
    }
}

/// Reports values below their field's minimum.
pub struct MinimumConstraint;

impl Check for MinimumConstraint {
    fn check_row(&mut self, row_number: usize, cells: &mut Vec<Cell>) -> Vec<ValidationError> {
        bound_errors(row_number, cells, Bound::Minimum)
    }
}

/// Reports values above their field's maximum.
pub struct MaximumConstraint;

impl Check for MaximumConstraint {
    fn check_row(&mut self, row_number: usize, cells: &mut Vec<Cell>) -> Vec<ValidationError> {
        bound_errors(row_number, cells, Bound::Maximum)
    }
}

#[derive(Clone, Copy)]
enum Bound {
    Minimum,
    Maximum,
}

fn bound_errors(row_number: usize, cells: &[Cell], bound: Bound) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for cell in cells {
        let Some(field) = &cell.field else { continue };
        let limit = match bound {
            Bound::Minimum => &field.constraints.minimum,
            Bound::Maximum => &field.constraints.maximum,
        };
        let Some(limit) = limit else { continue };
        let Some(value) = cell.value.as_deref().filter(|v| !v.is_empty()) else {
            continue;
        };
        // Uncastable values are the cast check's finding, and an uncastable
        // bound is a schema problem; both are skipped here.
        let (Ok(cast_value), Ok(cast_limit)) = (field.cast_value(value), field.cast_value(limit))
        else {
            continue;
        };
        let violated = match (bound, cast_value.compare(&cast_limit)) {
            (Bound::Minimum, Some(Ordering::Less)) => true,
            (Bound::Maximum, Some(Ordering::Greater)) => true,
            _ => false,
        };
        if violated {
            let (code, relation) = match bound {
                Bound::Minimum => ("minimum-constraint", "less than the minimum"),
                Bound::Maximum => ("maximum-constraint", "greater than the maximum"),
            };
            errors.push(
                ValidationError::new(
                    code,
                    format!(
                        "Row {} column {}: value \"{}\" is {} \"{}\"",
                        row_number, cell.column_number, value, relation, limit
                    ),
                )
                .with_row_number(row_number)
                .with_column_number(cell.column_number),
            );
        }
    }
    errors
}
