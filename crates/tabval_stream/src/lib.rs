//! # tabval stream
//!
//! Resolves a [`Resource`](tabval_core::Resource) into a row-producing
//! stream: inline data or a CSV file on disk.
//!
//! Opening reads the header row (per the dialect) and a bounded read-ahead
//! sample; iteration replays the sample before continuing with live reads,
//! so sampling never consumes data. Failures are classified by kind
//! (scheme, format, encoding, source, io), mapping 1:1 onto the table-level
//! report error codes.
//!
//! ## Example
//!
//! ```rust
//! use tabval_core::{Dialect, Resource};
//! use tabval_stream::open;
//!
//! let rows = vec![
//!     vec![Some("id".to_string())],
//!     vec![Some("1".to_string())],
//! ];
//! let resource = Resource::inline("records", rows);
//! let mut stream = open(&resource, &Dialect::default(), 100).unwrap();
//!
//! assert_eq!(stream.headers(), Some(&["id".to_string()][..]));
//! let (row_number, row) = stream.next_row().unwrap().unwrap();
//! assert_eq!((row_number, row[0].as_deref()), (2, Some("1")));
//! ```

mod csv;
mod error;
mod inline;
mod stream;

pub use crate::csv::CsvStream;
pub use crate::error::{OpenError, OpenErrorKind, StreamError};
pub use crate::inline::InlineStream;
pub use crate::stream::{RowStream, format_of, open, scheme_of};

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tabval_core::{Dialect, Resource};
    use tempfile::TempDir;

    use super::*;

    fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn test_open_csv_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "valid.csv", b"id,name\n1,english\n2,chinese\n");

        let resource = Resource::from_path(&path);
        let mut stream = open(&resource, &Dialect::default(), 100).unwrap();

        assert_eq!(stream.scheme(), "file");
        assert_eq!(stream.format(), "csv");
        assert_eq!(stream.encoding(), "utf-8");
        assert_eq!(
            stream.headers(),
            Some(&["id".to_string(), "name".to_string()][..])
        );

        let (row_number, row) = stream.next_row().unwrap().unwrap();
        assert_eq!(row_number, 2);
        assert_eq!(row[1].as_deref(), Some("english"));
        assert_eq!(stream.next_row().unwrap().unwrap().0, 3);
        assert!(stream.next_row().is_none());
    }

    #[test]
    fn test_sample_replays_through_iteration() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "data.csv", b"h\n1\n2\n3\n");

        let resource = Resource::from_path(&path);
        let mut stream = open(&resource, &Dialect::default(), 2).unwrap();

        assert_eq!(stream.sample().len(), 2);
        let numbers: Vec<usize> = std::iter::from_fn(|| stream.next_row())
            .map(|row| row.unwrap().0)
            .collect();
        assert_eq!(numbers, vec![2, 3, 4]);
    }

    #[test]
    fn test_ragged_rows_are_not_a_read_failure() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "ragged.csv", b"a,b\n1\n1,2,3\n");

        let resource = Resource::from_path(&path);
        let mut stream = open(&resource, &Dialect::default(), 100).unwrap();

        assert_eq!(stream.next_row().unwrap().unwrap().1.len(), 1);
        assert_eq!(stream.next_row().unwrap().unwrap().1.len(), 3);
    }

    #[test]
    fn test_missing_file_is_scheme_error() {
        let resource = Resource::from_path("no/such/file.csv");
        let error = open(&resource, &Dialect::default(), 100).unwrap_err();
        assert_eq!(error.kind, OpenErrorKind::Scheme);
    }

    #[test]
    fn test_unsupported_extension_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "table.xlsx", b"whatever");

        let resource = Resource::from_path(&path);
        let error = open(&resource, &Dialect::default(), 100).unwrap_err();
        assert_eq!(error.kind, OpenErrorKind::Format);
        assert!(error.message.contains("xlsx"));
    }

    #[test]
    fn test_invalid_utf8_in_sample_is_encoding_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "latin1.csv", b"id,name\n1,caf\xe9\n");

        let resource = Resource::from_path(&path);
        let error = open(&resource, &Dialect::default(), 100).unwrap_err();
        assert_eq!(error.kind, OpenErrorKind::Encoding);
    }

    #[test]
    fn test_invalid_utf8_past_sample_is_stream_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "late.csv", b"h\nok\nbad \xe9 row\n");

        let resource = Resource::from_path(&path);
        let mut stream = open(&resource, &Dialect::default(), 1).unwrap();

        assert!(stream.next_row().unwrap().is_ok());
        assert!(stream.next_row().unwrap().is_err());
        assert!(stream.next_row().is_none());
    }

    #[test]
    fn test_declared_non_utf8_encoding_is_rejected() {
        let resource = Resource::inline("data", vec![]).with_encoding("latin-1");
        let error = open(&resource, &Dialect::default(), 100).unwrap_err();
        assert_eq!(error.kind, OpenErrorKind::Encoding);
    }

    #[test]
    fn test_headerless_dialect() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "plain.csv", b"a,b\nc,d\n");

        let resource = Resource::from_path(&path);
        let mut stream = open(&resource, &Dialect::headerless(), 100).unwrap();

        assert_eq!(stream.headers(), None);
        assert_eq!(stream.next_row().unwrap().unwrap().0, 1);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "semi.csv", b"a;b\n1;2\n");

        let resource = Resource::from_path(&path);
        let dialect = Dialect {
            delimiter: b';',
            ..Dialect::default()
        };
        let mut stream = open(&resource, &dialect, 100).unwrap();

        assert_eq!(
            stream.headers(),
            Some(&["a".to_string(), "b".to_string()][..])
        );
        assert_eq!(stream.next_row().unwrap().unwrap().1.len(), 2);
    }

    #[test]
    fn test_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.csv", b"");

        let resource = Resource::from_path(&path);
        let mut stream = open(&resource, &Dialect::default(), 100).unwrap();

        assert_eq!(stream.headers(), None);
        assert!(stream.sample().is_empty());
        assert!(stream.next_row().is_none());
    }
}
