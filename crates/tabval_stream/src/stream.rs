//! The row stream contract and the opening entry point.

use tabval_core::{Dialect, RawRow, Resource, SourceData};

use crate::csv::CsvStream;
use crate::error::{OpenError, StreamError};
use crate::inline::InlineStream;

/// A finite, non-restartable stream of raw rows for one resource.
///
/// The stream owns its underlying reader; once `next_row` returns `None`
/// or an error, the stream is exhausted.
pub trait RowStream: std::fmt::Debug {
    /// Resolved scheme, e.g. `file` or `inline`.
    fn scheme(&self) -> &'static str;

    /// Resolved format, e.g. `csv` or `inline`.
    fn format(&self) -> &'static str;

    /// Character encoding used to decode the source.
    fn encoding(&self) -> &'static str;

    /// Header row values, if the source has a header row.
    fn headers(&self) -> Option<&[String]>;

    /// Bounded read-ahead of data rows, available before iteration starts.
    ///
    /// Sampled rows are replayed by `next_row`; sampling never consumes
    /// data.
    fn sample(&self) -> &[RawRow];

    /// Yields the next data row with its 1-based physical row number
    /// (counting the header row). Returns `None` once exhausted.
    fn next_row(&mut self) -> Option<Result<(usize, RawRow), StreamError>>;
}

/// Opens a resource into a row stream.
///
/// `dialect` is the effective dialect for the resource (the resource's own,
/// or one derived from the run configuration); `sample_size` bounds the
/// read-ahead.
pub fn open(
    resource: &Resource,
    dialect: &Dialect,
    sample_size: usize,
) -> Result<Box<dyn RowStream>, OpenError> {
    if let Some(encoding) = &resource.encoding {
        if !encoding.eq_ignore_ascii_case("utf-8") && !encoding.eq_ignore_ascii_case("utf8") {
            return Err(OpenError::encoding(format!(
                "Encoding \"{}\" is not supported",
                encoding
            )));
        }
    }

    match &resource.data {
        SourceData::Inline(rows) => Ok(Box::new(InlineStream::new(rows, dialect, sample_size))),
        SourceData::Path(path) => {
            Ok(Box::new(CsvStream::open(path, dialect, sample_size)?))
        }
    }
}

/// The scheme a resource would resolve to, for reporting open failures.
pub fn scheme_of(resource: &Resource) -> &'static str {
    match &resource.data {
        SourceData::Inline(_) => "inline",
        SourceData::Path(_) => "file",
    }
}

/// The format a resource would resolve to, for reporting open failures.
pub fn format_of(resource: &Resource) -> String {
    match &resource.data {
        SourceData::Inline(_) => "inline".to_string(),
        SourceData::Path(path) => path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default(),
    }
}
