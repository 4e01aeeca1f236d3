//! Row stream over inline data.

use std::collections::VecDeque;

use tabval_core::{Dialect, RawRow};

use crate::error::StreamError;
use crate::stream::RowStream;

/// A stream over rows supplied directly in memory.
///
/// The header row (if any) is taken from the dialect's header row position;
/// physical row numbers count every row of the original data, header
/// included.
#[derive(Debug)]
pub struct InlineStream {
    headers: Option<Vec<String>>,
    sample: Vec<RawRow>,
    rows: VecDeque<(usize, RawRow)>,
}

impl InlineStream {
    /// Prepares an inline stream, splitting off the header row and buffering
    /// the read-ahead sample.
    pub fn new(rows: &[RawRow], dialect: &Dialect, sample_size: usize) -> Self {
        let mut headers = None;
        let mut data = VecDeque::new();

        for (index, row) in rows.iter().enumerate() {
            let row_number = index + 1;
            match dialect.header_row {
                Some(header_row) if row_number < header_row => continue,
                Some(header_row) if row_number == header_row => {
                    headers = Some(
                        row.iter()
                            .map(|value| value.clone().unwrap_or_default())
                            .collect(),
                    );
                }
                _ => data.push_back((row_number, row.clone())),
            }
        }

        let sample = data
            .iter()
            .take(sample_size)
            .map(|(_, row)| row.clone())
            .collect();

        Self {
            headers,
            sample,
            rows: data,
        }
    }
}

impl RowStream for InlineStream {
    fn scheme(&self) -> &'static str {
        "inline"
    }

    fn format(&self) -> &'static str {
        "inline"
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
        self.rows.pop_front().map(Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<RawRow> {
        data.iter()
            .map(|row| row.iter().map(|value| Some(value.to_string())).collect())
            .collect()
    }

    #[test]
    fn test_header_and_rows() {
        let data = rows(&[&["id", "name"], &["1", "english"], &["2", "中国人"]]);
        let mut stream = InlineStream::new(&data, &Dialect::default(), 100);

        assert_eq!(stream.headers(), Some(&["id".to_string(), "name".to_string()][..]));
        assert_eq!(stream.sample().len(), 2);

        let (row_number, row) = stream.next_row().unwrap().unwrap();
        assert_eq!(row_number, 2);
        assert_eq!(row[0].as_deref(), Some("1"));
        assert_eq!(stream.next_row().unwrap().unwrap().0, 3);
        assert!(stream.next_row().is_none());
    }

    #[test]
    fn test_headerless_rows_start_at_one() {
        let data = rows(&[&["a", "b"], &["c", "d"]]);
        let mut stream = InlineStream::new(&data, &Dialect::headerless(), 100);

        assert_eq!(stream.headers(), None);
        assert_eq!(stream.next_row().unwrap().unwrap().0, 1);
        assert_eq!(stream.next_row().unwrap().unwrap().0, 2);
    }

    #[test]
    fn test_sample_is_bounded() {
        let data = rows(&[&["h"], &["1"], &["2"], &["3"]]);
        let mut stream = InlineStream::new(&data, &Dialect::default(), 1);

        assert_eq!(stream.sample().len(), 1);
        // Sampling never consumes rows: all three remain iterable.
        let mut count = 0;
        while stream.next_row().is_some() {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn test_null_cells_pass_through() {
        let data = vec![
            vec![Some("name".to_string())],
            vec![None],
        ];
        let mut stream = InlineStream::new(&data, &Dialect::default(), 100);

        let (_, row) = stream.next_row().unwrap().unwrap();
        assert_eq!(row[0], None);
    }
}
