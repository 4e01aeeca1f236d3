//! Parser for data package descriptors (JSON/YAML/TOML formats).
//!
//! This module provides functionality to parse data-package-style
//! descriptors into the strongly-typed [`Descriptor`] structure and resolve
//! them into validatable [`Source`]s, plus the `init_datapackage`
//! convenience for bootstrapping a descriptor from existing files.
//!
//! # Example
//!
//! ```rust
//! use tabval_parser::parse_json;
//!
//! let json = r#"
//! {
//!     "resources": [
//!         {
//!             "name": "people",
//!             "data": [["id", "name"], ["p1", "Tom"]],
//!             "schema": {"fields": [{"name": "id"}, {"name": "name"}]}
//!         }
//!     ]
//! }
//! "#;
//!
//! let descriptor = parse_json(json).expect("Failed to parse descriptor");
//! assert_eq!(descriptor.resources.len(), 1);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabval_core::{Dialect, RawRow, Resource, Schema, Source};
use thiserror::Error;

/// Errors that can occur during descriptor parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// A resource declares neither a path nor inline data
    #[error("Resource \"{0}\" has no path and no inline data")]
    EmptyResource(String),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported descriptor file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

impl DescriptorFormat {
    /// Human-readable format name, used in report warnings.
    pub fn name(&self) -> &'static str {
        match self {
            DescriptorFormat::Json => "JSON",
            DescriptorFormat::Yaml => "YAML",
            DescriptorFormat::Toml => "TOML",
        }
    }
}

/// A parsed data package descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Package name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Declared resources, in order
    #[serde(default)]
    pub resources: Vec<ResourceDescriptor>,
}

/// One resource entry of a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Resource name, referenced by foreign keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Path to the resource file, relative to the descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Inline row data (header row included unless the dialect says
    /// otherwise)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Vec<Value>>>,

    /// Schema, inline or as a file reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,

    /// CSV dialect options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<DialectDescriptor>,

    /// Declared character encoding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,

    /// Restrict this resource to exactly these checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<String>>,

    /// Exclude these checks for this resource
    #[serde(
        default,
        rename = "skipChecks",
        skip_serializing_if = "Option::is_none"
    )]
    pub skip_checks: Option<Vec<String>>,
}

/// A schema given inline or as a path to a schema file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaRef {
    /// Path to a JSON or YAML schema file
    Path(String),
    /// Inline schema object
    Inline(Schema),
}

/// Descriptor-level dialect options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialectDescriptor {
    /// Whether the source has a header row
    #[serde(default = "default_true")]
    pub header: bool,

    /// Field delimiter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
}

fn default_true() -> bool {
    true
}

impl DialectDescriptor {
    fn to_dialect(&self) -> Dialect {
        Dialect {
            header_row: if self.header { Some(1) } else { None },
            delimiter: self
                .delimiter
                .as_ref()
                .and_then(|d| d.bytes().next())
                .unwrap_or(b','),
        }
    }
}

/// Parse a descriptor from a JSON string.
pub fn parse_json(content: &str) -> Result<Descriptor> {
    let descriptor: Descriptor = serde_json::from_str(content)?;
    Ok(descriptor)
}

/// Parse a descriptor from a YAML string.
pub fn parse_yaml(content: &str) -> Result<Descriptor> {
    let descriptor: Descriptor = serde_yaml_ng::from_str(content)?;
    Ok(descriptor)
}

/// Parse a descriptor from a TOML string.
pub fn parse_toml(content: &str) -> Result<Descriptor> {
    let descriptor: Descriptor =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(descriptor)
}

/// Detect the descriptor format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.json` → [`DescriptorFormat::Json`]
/// * `.yaml`, `.yml` → [`DescriptorFormat::Yaml`]
/// * `.toml` → [`DescriptorFormat::Toml`]
///
/// # Errors
///
/// Returns [`ParserError::InvalidExtension`] if the file has no extension.
/// Returns [`ParserError::UnsupportedFormat`] if the extension is not
/// recognized.
pub fn detect_format(path: &Path) -> Result<DescriptorFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "json" => Ok(DescriptorFormat::Json),
        "yaml" | "yml" => Ok(DescriptorFormat::Yaml),
        "toml" => Ok(DescriptorFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a descriptor from a file with automatic format detection.
pub fn parse_file(path: &Path) -> Result<Descriptor> {
    let content = std::fs::read_to_string(path)?;
    let format = detect_format(path)?;

    match format {
        DescriptorFormat::Json => parse_json(&content),
        DescriptorFormat::Yaml => parse_yaml(&content),
        DescriptorFormat::Toml => parse_toml(&content),
    }
}

/// Parse a standalone schema file (JSON or YAML).
pub fn parse_schema_file(path: &Path) -> Result<Schema> {
    let content = std::fs::read_to_string(path)?;
    match detect_format(path)? {
        DescriptorFormat::Json => Ok(serde_json::from_str(&content)?),
        DescriptorFormat::Yaml => Ok(serde_yaml_ng::from_str(&content)?),
        DescriptorFormat::Toml => {
            toml::from_str(&content).map_err(|e| ParserError::TomlError(e.to_string()))
        }
    }
}

impl Descriptor {
    /// Resolves the descriptor into a validatable source.
    ///
    /// Relative resource and schema paths are resolved against `base_dir`
    /// (normally the descriptor file's directory).
    pub fn into_source(self, base_dir: &Path) -> Result<Source> {
        let mut resources = Vec::new();

        for (index, entry) in self.resources.into_iter().enumerate() {
            let mut resource = match (&entry.path, entry.data) {
                (Some(path), _) => Resource::from_path(base_dir.join(path)),
                (None, Some(data)) => {
                    let rows: Vec<RawRow> =
                        data.iter().map(|row| row.iter().map(value_to_cell).collect()).collect();
                    Resource::inline(format!("resource{}", index + 1), rows)
                }
                (None, None) => {
                    return Err(ParserError::EmptyResource(
                        entry.name.unwrap_or_else(|| format!("resource{}", index + 1)),
                    ));
                }
            };

            if let Some(name) = entry.name {
                resource.name = name;
            }
            resource.schema = match entry.schema {
                Some(SchemaRef::Inline(schema)) => Some(schema),
                Some(SchemaRef::Path(path)) => Some(parse_schema_file(&base_dir.join(path))?),
                None => None,
            };
            resource.dialect = entry.dialect.as_ref().map(DialectDescriptor::to_dialect);
            resource.encoding = entry.encoding;
            resource.checks = entry.checks;
            resource.skip_checks = entry.skip_checks;

            resources.push(resource);
        }

        Ok(Source::package(resources))
    }
}

fn value_to_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Builds a descriptor enumerating the given resource files.
///
/// A thin convenience for bootstrapping a data package: one resource per
/// path, named after the file stem.
pub fn init_datapackage<I, P>(resource_paths: I) -> Descriptor
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let resources = resource_paths
        .into_iter()
        .map(|path| {
            let path = path.as_ref();
            ResourceDescriptor {
                name: path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned()),
                path: Some(path.to_string_lossy().into_owned()),
                ..ResourceDescriptor::default()
            }
        })
        .collect();

    Descriptor {
        name: Some("datapackage".to_string()),
        resources,
    }
}
