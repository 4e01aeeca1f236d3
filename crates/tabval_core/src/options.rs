//! Run configuration.

use crate::error::ConfigError;

/// Default number of rows read ahead for sampling and inference.
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// Configuration for one validation run.
///
/// Limits are unbounded unless set; `checks` and `skip_checks` are mutually
/// exclusive.
///
/// # Example
///
/// ```rust
/// use tabval_core::ValidateOptions;
///
/// let options = ValidateOptions::new()
///     .with_row_limit(1000)
///     .with_infer_schema(true);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Restrict validation to exactly these check identifiers or groups
    pub checks: Option<Vec<String>>,

    /// Exclude these check identifiers or groups
    pub skip_checks: Vec<String>,

    /// Maximum number of tables to open
    pub table_limit: Option<usize>,

    /// Per-table ceiling on physical row numbers read
    pub row_limit: Option<usize>,

    /// Per-table ceiling on collected errors
    pub error_limit: Option<usize>,

    /// Derive a schema from sampled data when none is supplied
    pub infer_schema: bool,

    /// Tolerate a schema covering only a subset of the header
    pub infer_fields: bool,

    /// Match schema fields to header columns by name before checking
    pub order_fields: bool,

    /// 1-based header row for resources without an explicit dialect;
    /// `None` means sources have no header row
    pub header_row: Option<usize>,

    /// Rows read ahead for inference and header-hook sampling
    pub sample_size: usize,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            checks: None,
            skip_checks: Vec::new(),
            table_limit: None,
            row_limit: None,
            error_limit: None,
            infer_schema: false,
            infer_fields: false,
            order_fields: false,
            header_row: Some(1),
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl ValidateOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts validation to exactly the given checks.
    pub fn with_checks<I, S>(mut self, checks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.checks = Some(checks.into_iter().map(Into::into).collect());
        self
    }

    /// Excludes the given checks.
    pub fn with_skip_checks<I, S>(mut self, skip_checks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_checks = skip_checks.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the table limit.
    pub fn with_table_limit(mut self, limit: usize) -> Self {
        self.table_limit = Some(limit);
        self
    }

    /// Sets the row limit.
    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = Some(limit);
        self
    }

    /// Sets the error limit.
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = Some(limit);
        self
    }

    /// Enables or disables schema inference.
    pub fn with_infer_schema(mut self, infer_schema: bool) -> Self {
        self.infer_schema = infer_schema;
        self
    }

    /// Enables or disables field inference for partial schemas.
    pub fn with_infer_fields(mut self, infer_fields: bool) -> Self {
        self.infer_fields = infer_fields;
        self
    }

    /// Enables or disables name-based field ordering.
    pub fn with_order_fields(mut self, order_fields: bool) -> Self {
        self.order_fields = order_fields;
        self
    }

    /// Sets the header row; `None` marks sources as headerless.
    pub fn with_header_row(mut self, header_row: Option<usize>) -> Self {
        self.header_row = header_row;
        self
    }

    /// Sets the sampling size.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.checks.is_some() && !self.skip_checks.is_empty() {
            return Err(ConfigError::ConflictingSelection);
        }
        if self.table_limit == Some(0) {
            return Err(ConfigError::InvalidLimit("table_limit"));
        }
        if self.row_limit == Some(0) {
            return Err(ConfigError::InvalidLimit("row_limit"));
        }
        if self.error_limit == Some(0) {
            return Err(ConfigError::InvalidLimit("error_limit"));
        }
        Ok(())
    }
}
