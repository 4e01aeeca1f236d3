//! The inspector: orchestrates validation across all resources of a source.

use std::sync::Arc;
use std::time::Instant;

use tabval_core::{ConfigError, Report, Resource, Source, ValidateOptions, round_time};
use tracing::{debug, info};

use crate::limits::LimitTracker;
use crate::registry::{CheckRegistry, SelectedCheck};
use crate::relations::ForeignKeyResolver;
use crate::session::TableSession;

/// Drives one validation run: resolves check selections, applies the table
/// limit, builds the foreign key resolver, and streams every resource
/// through its table session.
///
/// Resources are processed sequentially in declaration order, which makes
/// error and warning ordering fully deterministic for identical inputs.
///
/// # Example
///
/// ```rust
/// use tabval_core::{Resource, Source, ValidateOptions};
/// use tabval_engine::Inspector;
///
/// let rows = vec![
///     vec![Some("id".to_string())],
///     vec![Some("1".to_string())],
/// ];
/// let source = Source::table(Resource::inline("records", rows));
/// let inspector = Inspector::new(ValidateOptions::default()).unwrap();
/// let report = inspector.inspect(&source).unwrap();
/// assert!(report.valid);
/// ```
pub struct Inspector {
    registry: CheckRegistry,
    options: ValidateOptions,
}

impl Inspector {
    /// Creates an inspector over the built-in checks.
    pub fn new(options: ValidateOptions) -> Result<Self, ConfigError> {
        Self::with_registry(CheckRegistry::builtin(), options)
    }

    /// Creates an inspector over a caller-extended registry.
    pub fn with_registry(
        registry: CheckRegistry,
        options: ValidateOptions,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        // Fail fast on unknown identifiers in the run-level selection.
        registry.select(options.checks.as_deref(), &options.skip_checks)?;
        Ok(Self { registry, options })
    }

    /// Validates every resource of the source and returns the report.
    ///
    /// Only configuration problems fail; any table-level failure is captured
    /// in the report and the run continues.
    pub fn inspect(&self, source: &Source) -> Result<Report, ConfigError> {
        let start = Instant::now();

        // Resolve every per-resource selection up front, so configuration
        // failures surface before any table is processed.
        let selections = source
            .resources()
            .iter()
            .map(|resource| self.selection_for(resource))
            .collect::<Result<Vec<_>, _>>()?;

        let mut limits = LimitTracker::new(&self.options);
        let allowed = limits.apply_table_limit(source.resources().len());

        // The resolver sees every declared resource, including ones the
        // table limit excludes from validation.
        let relations = Arc::new(ForeignKeyResolver::new(source.resources(), &self.options));

        let mut tables = Vec::with_capacity(allowed);
        for (resource, selection) in source.resources().iter().zip(&selections).take(allowed) {
            let session = TableSession::new(resource, &self.options, selection, &relations);
            tables.push(session.run(&mut limits));
        }

        let report = Report::compose(tables, limits.into_warnings(), round_time(start.elapsed()));
        info!(
            tables = report.table_count,
            errors = report.error_count,
            valid = report.valid,
            "validation finished"
        );
        Ok(report)
    }

    fn selection_for(&self, resource: &Resource) -> Result<Vec<SelectedCheck<'_>>, ConfigError> {
        let overridden = resource.checks.is_some() || resource.skip_checks.is_some();
        let (checks, skip_checks): (Option<&[String]>, &[String]) = if overridden {
            (
                resource.checks.as_deref(),
                resource.skip_checks.as_deref().unwrap_or(&[]),
            )
        } else {
            (self.options.checks.as_deref(), &self.options.skip_checks)
        };
        if checks.is_some() && !skip_checks.is_empty() {
            return Err(ConfigError::ConflictingSelection);
        }
        debug!(resource = %resource.name, ?checks, ?skip_checks, "resolving check selection");
        self.registry.select(checks, skip_checks)
    }
}

/// Validates a source with the built-in checks.
///
/// The single synchronous entry point: always returns a full report for any
/// input past configuration validation.
pub fn validate(source: &Source, options: ValidateOptions) -> Result<Report, ConfigError> {
    Inspector::new(options)?.inspect(source)
}
