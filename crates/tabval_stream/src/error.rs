//! Error types for stream opening and iteration.

use thiserror::Error;

/// What went wrong while resolving a resource into a row stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenErrorKind {
    /// The source location could not be resolved
    Scheme,
    /// The source format is not supported
    Format,
    /// The source bytes do not match the expected encoding
    Encoding,
    /// The source could not be read as rows
    Source,
    /// An underlying I/O failure
    Io,
}

impl OpenErrorKind {
    /// The report error code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            OpenErrorKind::Scheme => "scheme-error",
            OpenErrorKind::Format => "format-error",
            OpenErrorKind::Encoding => "encoding-error",
            OpenErrorKind::Source => "source-error",
            OpenErrorKind::Io => "io-error",
        }
    }
}

/// Failure to open a resource as a row stream.
///
/// Never fatal for the run: the inspector records it as a single table-level
/// error and moves on to the next resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct OpenError {
    /// Failure classification, mapping onto a report error code
    pub kind: OpenErrorKind,
    /// Human-readable description
    pub message: String,
}

impl OpenError {
    /// Creates a scheme resolution error.
    pub fn scheme(message: impl Into<String>) -> Self {
        Self {
            kind: OpenErrorKind::Scheme,
            message: message.into(),
        }
    }

    /// Creates an unsupported format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self {
            kind: OpenErrorKind::Format,
            message: message.into(),
        }
    }

    /// Creates an encoding error.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self {
            kind: OpenErrorKind::Encoding,
            message: message.into(),
        }
    }

    /// Creates a generic source error.
    pub fn source(message: impl Into<String>) -> Self {
        Self {
            kind: OpenErrorKind::Source,
            message: message.into(),
        }
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: OpenErrorKind::Io,
            message: message.into(),
        }
    }
}

/// Failure while iterating rows from an already-open stream.
///
/// The inspector converts it into a single `source-error` for the table and
/// stops streaming that table; sibling tables still proceed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StreamError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        assert_eq!(OpenErrorKind::Scheme.code(), "scheme-error");
        assert_eq!(OpenErrorKind::Format.code(), "format-error");
        assert_eq!(OpenErrorKind::Encoding.code(), "encoding-error");
        assert_eq!(OpenErrorKind::Source.code(), "source-error");
        assert_eq!(OpenErrorKind::Io.code(), "io-error");
    }

    #[test]
    fn test_open_error_display() {
        let error = OpenError::scheme("Path \"invalid\" does not exist");
        assert_eq!(error.to_string(), "Path \"invalid\" does not exist");
        assert_eq!(error.kind, OpenErrorKind::Scheme);
    }
}
