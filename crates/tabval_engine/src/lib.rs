//! # tabval engine
//!
//! The validation inspection engine: given one or more resources (with
//! optional declared schemas), it drives a pluggable set of checks across
//! header and body rows, enforces table/row/error limits with early
//! termination, resolves cross-table foreign key constraints, and aggregates
//! everything into a deterministic report.
//!
//! No failure of a single resource aborts the run: open and iteration
//! errors become table-level report errors, and the report is always
//! returned for any input past configuration validation.
//!
//! ## Example
//!
//! ```rust
//! use tabval_core::{Resource, Source, ValidateOptions};
//! use tabval_engine::validate;
//!
//! let rows = vec![
//!     vec![Some("field".to_string())],
//!     vec![Some("value".to_string()), Some("value".to_string())],
//! ];
//! let source = Source::table(Resource::inline("records", rows));
//! let report = validate(&source, ValidateOptions::default()).unwrap();
//!
//! assert!(!report.valid);
//! assert_eq!(report.tables[0].errors[0].code, "extra-value");
//! ```
//!
//! Third-party checks register into a [`CheckRegistry`] under the same
//! contract as built-ins and run through [`Inspector::with_registry`].

pub mod cell;
pub mod check;
pub mod checks;
pub mod infer;
pub mod inspector;
pub mod limits;
pub mod registry;
pub mod relations;
pub mod session;

pub use cell::{Cell, HeaderSlot};
pub use check::{Check, CheckContext, CheckType};
pub use inspector::{Inspector, validate};
pub use limits::LimitTracker;
pub use registry::{CheckInstance, CheckRegistry, CheckSetup, SelectedCheck};
pub use relations::{ForeignKeyResolver, ReferenceState};
pub use session::TableSession;
