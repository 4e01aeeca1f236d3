//! Cell value casting.
//!
//! Raw cell values arrive as strings; this module casts them into typed
//! values according to a field's declared type. Cast failures are data
//! (`CastError`), not panics; the engine turns them into per-cell errors.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::schema::FieldType;

/// Errors that can occur when casting a raw value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastError {
    /// The value does not conform to the declared type
    #[error("value \"{value}\" can't be cast as type \"{field_type}\"")]
    Mismatch {
        /// The raw value
        value: String,
        /// The declared type name
        field_type: String,
    },

    /// The declared type itself is not supported
    #[error("type \"{0}\" is not supported")]
    UnknownType(String),
}

impl CastError {
    fn mismatch(value: &str, field_type: &FieldType) -> Self {
        Self::Mismatch {
            value: value.to_string(),
            field_type: field_type.to_string(),
        }
    }
}

/// A successfully cast cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CastValue {
    /// Text value (also produced by `any`)
    String(String),
    /// 64-bit signed integer
    Integer(i64),
    /// Floating point number
    Number(f64),
    /// Boolean
    Boolean(bool),
    /// Calendar date
    Date(NaiveDate),
    /// Date and time
    Datetime(NaiveDateTime),
    /// Four-digit year
    Year(i32),
}

impl CastValue {
    /// Compares two cast values of compatible types.
    ///
    /// Integers and numbers compare numerically across variants; all other
    /// comparisons require the same variant. Returns `None` for incompatible
    /// pairs so constraint checks can skip them.
    pub fn compare(&self, other: &CastValue) -> Option<Ordering> {
        match (self, other) {
            (CastValue::String(a), CastValue::String(b)) => Some(a.cmp(b)),
            (CastValue::Integer(a), CastValue::Integer(b)) => Some(a.cmp(b)),
            (CastValue::Integer(a), CastValue::Number(b)) => (*a as f64).partial_cmp(b),
            (CastValue::Number(a), CastValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (CastValue::Number(a), CastValue::Number(b)) => a.partial_cmp(b),
            (CastValue::Boolean(a), CastValue::Boolean(b)) => Some(a.cmp(b)),
            (CastValue::Date(a), CastValue::Date(b)) => Some(a.cmp(b)),
            (CastValue::Datetime(a), CastValue::Datetime(b)) => Some(a.cmp(b)),
            (CastValue::Year(a), CastValue::Year(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Casts a raw string value according to a declared field type.
pub fn cast(field_type: &FieldType, raw: &str) -> Result<CastValue, CastError> {
    let trimmed = raw.trim();
    match field_type {
        FieldType::Any | FieldType::String => Ok(CastValue::String(raw.to_string())),
        FieldType::Integer => trimmed
            .parse::<i64>()
            .map(CastValue::Integer)
            .map_err(|_| CastError::mismatch(raw, field_type)),
        FieldType::Number => trimmed
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(CastValue::Number)
            .ok_or_else(|| CastError::mismatch(raw, field_type)),
        FieldType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "true" => Ok(CastValue::Boolean(true)),
            "false" => Ok(CastValue::Boolean(false)),
            _ => Err(CastError::mismatch(raw, field_type)),
        },
        FieldType::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(CastValue::Date)
            .map_err(|_| CastError::mismatch(raw, field_type)),
        FieldType::Datetime => NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S"))
            .map(CastValue::Datetime)
            .map_err(|_| CastError::mismatch(raw, field_type)),
        FieldType::Year => trimmed
            .parse::<i32>()
            .ok()
            .filter(|y| (0..=9999).contains(y))
            .map(CastValue::Year)
            .ok_or_else(|| CastError::mismatch(raw, field_type)),
        FieldType::Other(name) => Err(CastError::UnknownType(name.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_integer() {
        assert_eq!(
            cast(&FieldType::Integer, "42").unwrap(),
            CastValue::Integer(42)
        );
        assert!(cast(&FieldType::Integer, "abc").is_err());
        assert!(cast(&FieldType::Integer, "1.5").is_err());
    }

    #[test]
    fn test_cast_number() {
        assert_eq!(
            cast(&FieldType::Number, "1.5").unwrap(),
            CastValue::Number(1.5)
        );
        assert_eq!(
            cast(&FieldType::Number, "42").unwrap(),
            CastValue::Number(42.0)
        );
        assert!(cast(&FieldType::Number, "NaN").is_err());
        assert!(cast(&FieldType::Number, "abc").is_err());
    }

    #[test]
    fn test_cast_boolean() {
        assert_eq!(
            cast(&FieldType::Boolean, "true").unwrap(),
            CastValue::Boolean(true)
        );
        assert_eq!(
            cast(&FieldType::Boolean, "FALSE").unwrap(),
            CastValue::Boolean(false)
        );
        assert!(cast(&FieldType::Boolean, "1").is_err());
    }

    #[test]
    fn test_cast_date_and_datetime() {
        assert!(cast(&FieldType::Date, "2024-02-29").is_ok());
        assert!(cast(&FieldType::Date, "2023-02-29").is_err());
        assert!(cast(&FieldType::Datetime, "2024-01-01T12:30:00").is_ok());
        assert!(cast(&FieldType::Datetime, "2024-01-01 12:30:00").is_ok());
        assert!(cast(&FieldType::Datetime, "noon").is_err());
    }

    #[test]
    fn test_cast_year() {
        assert_eq!(cast(&FieldType::Year, "1994").unwrap(), CastValue::Year(1994));
        assert!(cast(&FieldType::Year, "12345").is_err());
    }

    #[test]
    fn test_cast_any_passes_through() {
        assert_eq!(
            cast(&FieldType::Any, " raw ").unwrap(),
            CastValue::String(" raw ".to_string())
        );
    }

    #[test]
    fn test_cast_unknown_type() {
        let err = cast(&FieldType::Other("bad".to_string()), "x").unwrap_err();
        assert_eq!(err, CastError::UnknownType("bad".to_string()));
    }

    #[test]
    fn test_compare_numeric_cross_variants() {
        let a = CastValue::Integer(2);
        let b = CastValue::Number(2.5);
        assert_eq!(a.compare(&b), Some(Ordering::Less));
        assert_eq!(
            CastValue::String("a".into()).compare(&CastValue::Integer(1)),
            None
        );
    }
}
