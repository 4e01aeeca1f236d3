//! Table schema types and structures.
//!
//! This module contains the core types for describing a table schema, including
//! typed field declarations, field constraints, a primary key and foreign keys.

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};

use crate::cast::{CastError, CastValue, cast};

/// A table schema: an ordered sequence of fields plus key constraints.
///
/// Field order is significant: fields are matched to table columns by
/// position unless the caller asks for name-based ordering.
///
/// # Example
///
/// ```rust
/// use tabval_core::{Schema, Field, FieldType};
///
/// let schema = Schema {
///     fields: vec![
///         Field::new("id", FieldType::Integer),
///         Field::new("name", FieldType::String),
///     ],
///     primary_key: vec!["id".to_string()],
///     foreign_keys: vec![],
/// };
/// assert!(schema.issues().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Schema {
    /// Ordered field declarations
    pub fields: Vec<Field>,

    /// Field names forming the primary key (accepts a single name or a list)
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "string_or_list"
    )]
    pub primary_key: Vec<String>,

    /// Foreign key constraints tying local fields to another resource
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKey>,
}

impl Schema {
    /// Creates a schema from fields only, with no key constraints.
    pub fn from_fields(fields: Vec<Field>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Checks the schema definition itself for problems.
    ///
    /// Returns one human-readable message per problem found: duplicate field
    /// names, unknown field types, and primary/foreign key entries naming
    /// fields that do not exist. A non-empty result is reported as a
    /// `schema-error` on the table; it never aborts a validation run.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                issues.push(format!("Duplicate field name \"{}\"", field.name));
            }
            if let FieldType::Other(name) = &field.field_type {
                issues.push(format!(
                    "Field \"{}\" has an unknown type \"{}\"",
                    field.name, name
                ));
            }
        }

        for name in &self.primary_key {
            if self.field(name).is_none() {
                issues.push(format!(
                    "Primary key references a missing field \"{}\"",
                    name
                ));
            }
        }

        for foreign_key in &self.foreign_keys {
            for name in &foreign_key.fields {
                if self.field(name).is_none() {
                    issues.push(format!(
                        "Foreign key references a missing local field \"{}\"",
                        name
                    ));
                }
            }
        }

        issues
    }

    /// Returns true if the schema declares at least one foreign key.
    pub fn has_foreign_keys(&self) -> bool {
        !self.foreign_keys.is_empty()
    }
}

/// A single field declaration in a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name
    pub name: String,

    /// Declared field type
    #[serde(rename = "type", default)]
    pub field_type: FieldType,

    /// Validation constraints on the field's values
    #[serde(default, skip_serializing_if = "Constraints::is_empty")]
    pub constraints: Constraints,
}

impl Field {
    /// Creates a field with the given name and type and no constraints.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            constraints: Constraints::default(),
        }
    }

    /// Casts a raw cell value according to this field's declared type.
    pub fn cast_value(&self, raw: &str) -> Result<CastValue, CastError> {
        cast(&self.field_type, raw)
    }
}

/// Declared value types for schema fields.
///
/// Unknown type names are preserved rather than rejected at parse time;
/// they surface later as a `schema-error` on the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Accepts any value, no casting applied
    #[default]
    Any,
    /// Text value
    String,
    /// 64-bit signed integer
    Integer,
    /// Floating point number
    Number,
    /// `true` / `false`
    Boolean,
    /// Calendar date (`YYYY-MM-DD`)
    Date,
    /// Date and time (`YYYY-MM-DDTHH:MM:SS`)
    Datetime,
    /// Four-digit year
    Year,
    /// Any other declared type name
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Any => write!(f, "any"),
            FieldType::String => write!(f, "string"),
            FieldType::Integer => write!(f, "integer"),
            FieldType::Number => write!(f, "number"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Date => write!(f, "date"),
            FieldType::Datetime => write!(f, "datetime"),
            FieldType::Year => write!(f, "year"),
            FieldType::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Validation constraints that can be applied to a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints {
    /// The field must have a non-empty value in every row
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    /// The field's values must be unique across the table
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unique: bool,

    /// Values must match this regular expression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Minimum value (inclusive), compared after casting
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_scalar"
    )]
    pub minimum: Option<String>,

    /// Maximum value (inclusive), compared after casting
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_scalar"
    )]
    pub maximum: Option<String>,

    /// Values must be one of the enumerated options
    #[serde(
        rename = "enum",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_scalar_list"
    )]
    pub enum_values: Option<Vec<String>>,
}

impl Constraints {
    /// Returns true if no constraint is set.
    pub fn is_empty(&self) -> bool {
        !self.required
            && !self.unique
            && self.pattern.is_none()
            && self.minimum.is_none()
            && self.maximum.is_none()
            && self.enum_values.is_none()
    }
}

/// A foreign key constraint.
///
/// Ties the values of one or more local fields to existing values in a
/// reference resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Local field names (accepts a single name or a list)
    #[serde(deserialize_with = "string_or_list")]
    pub fields: Vec<String>,

    /// The referenced resource and fields
    pub reference: Reference,
}

/// The target of a foreign key constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// Name of the referenced resource; empty means the resource itself
    #[serde(default)]
    pub resource: String,

    /// Referenced field names (accepts a single name or a list)
    #[serde(deserialize_with = "string_or_list")]
    pub fields: Vec<String>,
}

/// Scalar helper for descriptor values that may be strings or numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::String(s) => s,
            Scalar::Integer(i) => i.to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Boolean(b) => b.to_string(),
        }
    }
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::One(s) => vec![s],
        StringOrList::Many(list) => list,
    })
}

fn opt_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let scalar = Option::<Scalar>::deserialize(deserializer)?;
    Ok(scalar.map(Scalar::into_string))
}

fn opt_scalar_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let scalars = Option::<Vec<Scalar>>::deserialize(deserializer)
        .map_err(|e| D::Error::custom(format!("enum constraint must be a list: {}", e)))?;
    Ok(scalars.map(|list| list.into_iter().map(Scalar::into_string).collect()))
}
