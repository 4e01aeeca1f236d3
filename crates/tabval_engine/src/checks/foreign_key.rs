//! The foreign key check.

use std::sync::Arc;

use tabval_core::{ForeignKey, ValidationError};

use crate::cell::Cell;
use crate::check::Check;
use crate::registry::CheckSetup;
use crate::relations::{ForeignKeyResolver, ReferenceState};

/// Validates each row's foreign key tuples against the referenced
/// resource's index.
///
/// A row whose key tuple is absent yields one `foreign-key` error naming the
/// reference resource; if the reference resource itself cannot serve lookups
/// (unreadable, or structurally broken), every dependent row yields one
/// error carrying the reference's failure message instead.
pub struct ForeignKeyCheck {
    resource_name: String,
    foreign_keys: Vec<ForeignKey>,
    resolver: Option<Arc<ForeignKeyResolver>>,
}

impl ForeignKeyCheck {
    pub fn new(setup: &CheckSetup<'_>) -> Self {
        Self {
            resource_name: setup.resource_name.to_string(),
            foreign_keys: setup
                .schema
                .map(|schema| schema.foreign_keys.clone())
                .unwrap_or_default(),
            resolver: setup.relations.cloned(),
        }
    }
}

impl Check for ForeignKeyCheck {
    fn check_row(&mut self, row_number: usize, cells: &mut Vec<Cell>) -> Vec<ValidationError> {
        let Some(resolver) = &self.resolver else {
            return Vec::new();
        };
        let mut errors = Vec::new();

        for foreign_key in &self.foreign_keys {
            let mut key = Vec::with_capacity(foreign_key.fields.len());
            let mut first_column = None;
            for name in &foreign_key.fields {
                let Some(cell) = cells
                    .iter()
                    .find(|cell| cell.field.as_ref().is_some_and(|f| &f.name == name))
                else {
                    first_column = None;
                    break;
                };
                first_column.get_or_insert(cell.column_number);
                key.push(cell.value.clone().unwrap_or_default());
            }
            let Some(column_number) = first_column else {
                continue;
            };

            let target = if foreign_key.reference.resource.is_empty() {
                self.resource_name.as_str()
            } else {
                foreign_key.reference.resource.as_str()
            };

            match &*resolver.lookup(target, &foreign_key.reference.fields) {
                ReferenceState::Invalid(message) => errors.push(
                    ValidationError::new(
                        "foreign-key",
                        format!(
                            "Foreign key violation caused by invalid reference table: [{}] {}",
                            target, message
                        ),
                    )
                    .with_row_number(row_number)
                    .with_column_number(column_number),
                ),
                ReferenceState::Index(index) => {
                    if !index.contains(&key) {
                        errors.push(
                            ValidationError::new(
                                "foreign-key",
                                format!(
                                    "Foreign key violation: values ({}) not found in the reference table \"{}\" fields ({})",
                                    key.join(", "),
                                    target,
                                    foreign_key.reference.fields.join(", ")
                                ),
                            )
                            .with_row_number(row_number)
                            .with_column_number(column_number),
                        );
                    }
                }
            }
        }

        errors
    }
}
