//! Source and resource model.
//!
//! A [`Source`] is the full input to one validation run: a single table or a
//! multi-resource package. Each [`Resource`] pairs its data (inline rows or a
//! file path) with an optional schema, a dialect, and an optional
//! per-resource check selection.

use std::path::{Path, PathBuf};

use crate::schema::Schema;

/// One raw row of cell values. `None` marks a null cell.
pub type RawRow = Vec<Option<String>>;

/// Where a resource's rows come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData {
    /// Rows supplied directly in memory
    Inline(Vec<RawRow>),
    /// A file on disk
    Path(PathBuf),
}

/// Physical reading options for a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialect {
    /// 1-based physical row holding the header; `None` means the source has
    /// no header row
    pub header_row: Option<usize>,

    /// Field delimiter for delimited formats
    pub delimiter: u8,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            header_row: Some(1),
            delimiter: b',',
        }
    }
}

impl Dialect {
    /// A dialect for sources without a header row.
    pub fn headerless() -> Self {
        Self {
            header_row: None,
            ..Self::default()
        }
    }
}

/// One tabular resource under validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Resource name, used by foreign keys to reference this resource
    pub name: String,

    /// The resource's row data
    pub data: SourceData,

    /// Declared schema, if any
    pub schema: Option<Schema>,

    /// Reading options; `None` falls back to the run configuration
    pub dialect: Option<Dialect>,

    /// Declared character encoding hint; `None` means UTF-8
    pub encoding: Option<String>,

    /// Per-resource check selection, overriding the run configuration
    pub checks: Option<Vec<String>>,

    /// Per-resource check exclusion, overriding the run configuration
    pub skip_checks: Option<Vec<String>>,
}

impl Resource {
    /// Creates a resource backed by a file.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resource".to_string());
        Self {
            name,
            data: SourceData::Path(path),
            schema: None,
            dialect: None,
            encoding: None,
            checks: None,
            skip_checks: None,
        }
    }

    /// Creates a resource from inline rows.
    pub fn inline(name: impl Into<String>, rows: Vec<RawRow>) -> Self {
        Self {
            name: name.into(),
            data: SourceData::Inline(rows),
            schema: None,
            dialect: None,
            encoding: None,
            checks: None,
            skip_checks: None,
        }
    }

    /// Sets the schema.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Sets the dialect.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Sets the declared character encoding.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Restricts this resource to exactly the given checks.
    pub fn with_checks<I, S>(mut self, checks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.checks = Some(checks.into_iter().map(Into::into).collect());
        self
    }

    /// Excludes the given checks for this resource.
    pub fn with_skip_checks<I, S>(mut self, skip_checks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_checks = Some(skip_checks.into_iter().map(Into::into).collect());
        self
    }

    /// Label used in reports and limit warnings.
    pub fn label(&self) -> String {
        match &self.data {
            SourceData::Inline(_) => "inline".to_string(),
            SourceData::Path(path) => path.to_string_lossy().into_owned(),
        }
    }
}

/// The full input to one validation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    resources: Vec<Resource>,
}

impl Source {
    /// A source holding a single table.
    pub fn table(resource: Resource) -> Self {
        Self {
            resources: vec![resource],
        }
    }

    /// A source holding a package of resources.
    pub fn package(resources: Vec<Resource>) -> Self {
        Self { resources }
    }

    /// The resources in declaration order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }
}

impl From<Resource> for Source {
    fn from(resource: Resource) -> Self {
        Self::table(resource)
    }
}
