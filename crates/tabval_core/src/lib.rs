//! # tabval core
//!
//! Core data structures and types for the tabval validation engine.
//!
//! This crate provides the fundamental building blocks for validating tabular
//! data: the schema and constraint model, cell value casting, the source and
//! resource model, run configuration, and the report contract.
//!
//! ## Key Concepts
//!
//! - **Source**: the full input to one validation run, either a single table
//!   or a multi-resource data package
//! - **Schema**: typed field declarations with constraints, a primary key,
//!   and foreign keys
//! - **Report**: the structured, immutable result of a run, per table and
//!   aggregate
//!
//! ## Example
//!
//! ```rust
//! use tabval_core::{Resource, Source, SchemaBuilder, FieldBuilder, FieldType};
//!
//! let schema = SchemaBuilder::new()
//!     .field(FieldBuilder::new("id", FieldType::Integer).required().build())
//!     .primary_key(["id"])
//!     .build();
//!
//! let rows = vec![
//!     vec![Some("id".to_string())],
//!     vec![Some("1".to_string())],
//! ];
//! let source = Source::table(Resource::inline("records", rows).with_schema(schema));
//! assert_eq!(source.resources().len(), 1);
//! ```

pub mod builder;
pub mod cast;
pub mod error;
pub mod options;
pub mod report;
pub mod schema;
pub mod source;

pub use builder::*;
pub use cast::*;
pub use error::*;
pub use options::*;
pub use report::*;
pub use schema::*;
pub use source::*;
