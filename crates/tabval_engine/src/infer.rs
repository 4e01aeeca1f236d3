//! Schema and field inference from sampled data.

use tabval_core::{Field, FieldType, RawRow, Schema, cast};

const CANDIDATES: [FieldType; 5] = [
    FieldType::Integer,
    FieldType::Number,
    FieldType::Boolean,
    FieldType::Date,
    FieldType::Datetime,
];

/// Infers a field type from a column's sampled values.
///
/// Picks the first candidate type every non-empty value casts to, falling
/// back to `string`. Columns with no values stay `any`.
pub fn infer_field_type<'a, I>(values: I) -> FieldType
where
    I: IntoIterator<Item = &'a str>,
{
    let values: Vec<&str> = values
        .into_iter()
        .filter(|value| !value.trim().is_empty())
        .collect();
    if values.is_empty() {
        return FieldType::Any;
    }
    for candidate in CANDIDATES {
        if values
            .iter()
            .all(|value| cast(&candidate, value).is_ok())
        {
            return candidate;
        }
    }
    FieldType::String
}

/// Derives a schema from the header row and a bounded sample of data rows.
///
/// Columns are named by their header, or `field{N}` when the header is blank
/// or absent.
pub fn infer_schema(headers: Option<&[String]>, sample: &[RawRow]) -> Schema {
    let width = headers
        .map(|headers| headers.len())
        .or_else(|| sample.first().map(|row| row.len()))
        .unwrap_or(0);

    let fields = (0..width)
        .map(|index| {
            let name = headers
                .and_then(|headers| headers.get(index))
                .filter(|header| !header.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| format!("field{}", index + 1));
            let field_type = infer_field_type(
                sample
                    .iter()
                    .filter_map(|row| row.get(index))
                    .filter_map(|value| value.as_deref()),
            );
            Field::new(name, field_type)
        })
        .collect();

    Schema::from_fields(fields)
}
