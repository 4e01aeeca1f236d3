//! Builder pattern for creating schemas.
//!
//! This module provides ergonomic builders for constructing schemas and
//! their fields with a fluent API.

use crate::schema::{Constraints, Field, FieldType, ForeignKey, Reference, Schema};

/// Builder for creating a [`Schema`].
///
/// # Example
///
/// ```rust
/// use tabval_core::{SchemaBuilder, FieldBuilder, FieldType};
///
/// let schema = SchemaBuilder::new()
///     .field(FieldBuilder::new("id", FieldType::String).required().build())
///     .field(FieldBuilder::new("age", FieldType::Integer).build())
///     .primary_key(["id"])
///     .build();
/// assert_eq!(schema.fields.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<Field>,
    primary_key: Vec<String>,
    foreign_keys: Vec<ForeignKey>,
}

impl SchemaBuilder {
    /// Creates a new schema builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field to the schema.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the primary key field names.
    pub fn primary_key<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a foreign key constraint.
    pub fn foreign_key<I, S, J, T>(mut self, fields: I, resource: &str, reference_fields: J) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        J: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.foreign_keys.push(ForeignKey {
            fields: fields.into_iter().map(Into::into).collect(),
            reference: Reference {
                resource: resource.to_string(),
                fields: reference_fields.into_iter().map(Into::into).collect(),
            },
        });
        self
    }

    /// Builds the schema.
    pub fn build(self) -> Schema {
        Schema {
            fields: self.fields,
            primary_key: self.primary_key,
            foreign_keys: self.foreign_keys,
        }
    }
}

/// Builder for creating a [`Field`].
#[derive(Debug)]
pub struct FieldBuilder {
    name: String,
    field_type: FieldType,
    constraints: Constraints,
}

impl FieldBuilder {
    /// Creates a new field builder with the given name and type.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            constraints: Constraints::default(),
        }
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    /// Marks the field's values as unique.
    pub fn unique(mut self) -> Self {
        self.constraints.unique = true;
        self
    }

    /// Sets a regex pattern constraint.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.constraints.pattern = Some(pattern.into());
        self
    }

    /// Sets the inclusive minimum constraint.
    pub fn minimum(mut self, minimum: impl Into<String>) -> Self {
        self.constraints.minimum = Some(minimum.into());
        self
    }

    /// Sets the inclusive maximum constraint.
    pub fn maximum(mut self, maximum: impl Into<String>) -> Self {
        self.constraints.maximum = Some(maximum.into());
        self
    }

    /// Restricts values to an enumerated set.
    pub fn enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the field.
    pub fn build(self) -> Field {
        Field {
            name: self.name,
            field_type: self.field_type,
            constraints: self.constraints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_builder() {
        let schema = SchemaBuilder::new()
            .field(FieldBuilder::new("id", FieldType::String).unique().build())
            .field(
                FieldBuilder::new("age", FieldType::Integer)
                    .minimum("0")
                    .maximum("120")
                    .build(),
            )
            .primary_key(["id"])
            .foreign_key(["id"], "people", ["person_id"])
            .build();

        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.primary_key, vec!["id"]);
        assert_eq!(schema.foreign_keys.len(), 1);
        assert!(schema.fields[0].constraints.unique);
        assert_eq!(schema.fields[1].constraints.minimum.as_deref(), Some("0"));
    }

    #[test]
    fn test_field_builder_constraints() {
        let field = FieldBuilder::new("status", FieldType::String)
            .required()
            .pattern("^[a-z]+$")
            .enum_values(["active", "inactive"])
            .build();

        assert!(field.constraints.required);
        assert_eq!(field.constraints.pattern.as_deref(), Some("^[a-z]+$"));
        assert_eq!(
            field.constraints.enum_values,
            Some(vec!["active".to_string(), "inactive".to_string()])
        );
    }
}
