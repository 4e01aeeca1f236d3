//! Built-in checks.

pub mod foreign_key;
pub mod schema;
pub mod structure;

pub use foreign_key::ForeignKeyCheck;
pub use schema::{
    EnumerableConstraint, ExtraHeader, MaximumConstraint, MinimumConstraint, MissingHeader,
    NonMatchingHeader, PatternConstraint, RequiredConstraint, TypeOrFormat, UniqueConstraint,
};
pub use structure::{BlankHeader, BlankRow, DuplicateHeader, DuplicateRow, ExtraValue, MissingValue};
