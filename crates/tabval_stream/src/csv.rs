//! Row stream over CSV files.

use std::fs::File;
use std::path::Path;

use ::csv::{Error as CsvError, ErrorKind, ReaderBuilder, StringRecord, StringRecordsIntoIter};
use tabval_core::{Dialect, RawRow};
use tracing::debug;

use crate::error::{OpenError, StreamError};
use crate::stream::RowStream;

/// A stream over a CSV file on disk.
///
/// Records are read with flexible lengths; ragged rows are a validation
/// finding, not a read failure. All input is decoded as UTF-8; bytes that
/// are not valid UTF-8 surface as an encoding error during the open-time
/// sample read, or as a stream error later in the body.
pub struct CsvStream {
    headers: Option<Vec<String>>,
    sample: Vec<RawRow>,
    /// Physical row number preceding the first sample row
    sample_base: usize,
    sample_cursor: usize,
    records: StringRecordsIntoIter<File>,
    row_number: usize,
    done: bool,
}

impl std::fmt::Debug for CsvStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvStream")
            .field("headers", &self.headers)
            .field("sample", &self.sample)
            .field("sample_base", &self.sample_base)
            .field("sample_cursor", &self.sample_cursor)
            .field("row_number", &self.row_number)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl CsvStream {
    /// Opens a CSV file and reads the header plus a bounded sample.
    pub fn open(path: &Path, dialect: &Dialect, sample_size: usize) -> Result<Self, OpenError> {
        if !path.exists() {
            return Err(OpenError::scheme(format!(
                "Path \"{}\" does not exist",
                path.display()
            )));
        }

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if extension != "csv" {
            return Err(OpenError::format(format!(
                "Format \"{}\" is not supported",
                extension
            )));
        }

        let file = File::open(path)
            .map_err(|e| OpenError::io(format!("Can't open \"{}\": {}", path.display(), e)))?;

        debug!(path = %path.display(), delimiter = %(dialect.delimiter as char), "opening csv source");

        let mut records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(dialect.delimiter)
            .from_reader(file)
            .into_records();

        let mut headers = None;
        let mut row_number = 0;
        if let Some(header_row) = dialect.header_row {
            loop {
                match records.next() {
                    Some(Ok(record)) => {
                        row_number += 1;
                        if row_number == header_row {
                            headers =
                                Some(record.iter().map(|value| value.to_string()).collect());
                            break;
                        }
                    }
                    Some(Err(e)) => return Err(classify_open_error(e)),
                    None => break,
                }
            }
        }

        let sample_base = row_number;
        let mut sample = Vec::new();
        while sample.len() < sample_size {
            match records.next() {
                Some(Ok(record)) => {
                    row_number += 1;
                    sample.push(record_to_row(&record));
                }
                Some(Err(e)) => return Err(classify_open_error(e)),
                None => break,
            }
        }

        Ok(Self {
            headers,
            sample,
            sample_base,
            sample_cursor: 0,
            records,
            row_number,
            done: false,
        })
    }
}

fn record_to_row(record: &StringRecord) -> RawRow {
    record.iter().map(|value| Some(value.to_string())).collect()
}

fn classify_open_error(error: CsvError) -> OpenError {
    match error.kind() {
        ErrorKind::Utf8 { .. } => OpenError::encoding(error.to_string()),
        ErrorKind::Io(_) => OpenError::io(error.to_string()),
        _ => OpenError::source(error.to_string()),
    }
}

impl RowStream for CsvStream {
    fn scheme(&self) -> &'static str {
        "file"
    }

    fn format(&self) -> &'static str {
        "csv"
    }

    fn encoding(&self) -> &'static str {
        "utf-8"
    }

    fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    fn sample(&self) -> &[RawRow] {
        &self.sample
    }

    fn next_row(&mut self) -> Option<Result<(usize, RawRow), StreamError>> {
        // Replay the open-time sample before reading live records.
        if self.sample_cursor < self.sample.len() {
            let row = self.sample[self.sample_cursor].clone();
            self.sample_cursor += 1;
            return Some(Ok((self.sample_base + self.sample_cursor, row)));
        }
        if self.done {
            return None;
        }
        match self.records.next() {
            Some(Ok(record)) => {
                self.row_number += 1;
                Some(Ok((self.row_number, record_to_row(&record))))
            }
            Some(Err(e)) => {
                self.done = true;
                Some(Err(StreamError(e.to_string())))
            }
            None => None,
        }
    }
}
