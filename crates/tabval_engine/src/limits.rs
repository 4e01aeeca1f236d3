//! Limit tracking and warning accumulation.
//!
//! Every limit breach appends exactly one warning naming the limit and its
//! configured value. Limits truncate processing; they never invalidate
//! already-collected errors. The tracker is exclusively owned by the
//! inspector for the duration of one run, which keeps warning order
//! deterministic: the table limit is applied before any table is processed,
//! so its warning always precedes row and error limit warnings.

use tabval_core::{ValidateOptions, ValidationError};
use tracing::debug;

/// Tracks configured ceilings and accumulates breach warnings.
pub struct LimitTracker {
    table_limit: Option<usize>,
    row_limit: Option<usize>,
    error_limit: Option<usize>,
    warnings: Vec<String>,
}

impl LimitTracker {
    /// Creates a tracker from the run configuration.
    pub fn new(options: &ValidateOptions) -> Self {
        Self {
            table_limit: options.table_limit,
            row_limit: options.row_limit,
            error_limit: options.error_limit,
            warnings: Vec::new(),
        }
    }

    /// Applies the table limit to the number of declared resources,
    /// returning how many may be opened.
    pub fn apply_table_limit(&mut self, table_count: usize) -> usize {
        match self.table_limit {
            Some(limit) if table_count > limit => {
                debug!(limit, table_count, "table limit reached");
                self.warnings.push(format!(
                    "Dataset inspection has reached {} table(s) limit",
                    limit
                ));
                limit
            }
            _ => table_count,
        }
    }

    /// Checks the row limit after a row has been processed; warns and
    /// returns true when streaming of this table must stop.
    pub fn row_limit_reached(&mut self, source: &str, row_number: usize) -> bool {
        match self.row_limit {
            Some(limit) if row_number >= limit => {
                self.warnings.push(format!(
                    "Table \"{}\" inspection has reached {} row(s) limit",
                    source, limit
                ));
                true
            }
            _ => false,
        }
    }

    /// Checks the error limit after a header pass or a row; warns and
    /// returns true when streaming of this table must stop.
    pub fn error_limit_reached(&mut self, source: &str, error_count: usize) -> bool {
        match self.error_limit {
            Some(limit) if error_count >= limit => {
                self.warnings.push(format!(
                    "Table \"{}\" inspection has reached {} error(s) limit",
                    source, limit
                ));
                true
            }
            _ => false,
        }
    }

    /// Truncates a table's error list to the configured error limit.
    pub fn truncate_errors(&self, errors: &mut Vec<ValidationError>) {
        if let Some(limit) = self.error_limit {
            errors.truncate(limit);
        }
    }

    /// The accumulated warnings, in emission order.
    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_by_default() {
        let mut tracker = LimitTracker::new(&ValidateOptions::default());
        assert_eq!(tracker.apply_table_limit(100), 100);
        assert!(!tracker.row_limit_reached("inline", 1_000_000));
        assert!(!tracker.error_limit_reached("inline", 1_000_000));
        assert!(tracker.into_warnings().is_empty());
    }

    #[test]
    fn test_table_limit_truncates_and_warns_once() {
        let options = ValidateOptions::new().with_table_limit(1);
        let mut tracker = LimitTracker::new(&options);

        assert_eq!(tracker.apply_table_limit(2), 1);
        let warnings = tracker.into_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("1 table(s) limit"));
    }

    #[test]
    fn test_row_limit_counts_physical_rows() {
        let options = ValidateOptions::new().with_row_limit(2);
        let mut tracker = LimitTracker::new(&options);

        assert!(!tracker.row_limit_reached("data.csv", 1));
        assert!(tracker.row_limit_reached("data.csv", 2));
        let warnings = tracker.into_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("\"data.csv\""));
        assert!(warnings[0].contains("2 row(s) limit"));
    }

    #[test]
    fn test_error_limit_truncates_errors() {
        let options = ValidateOptions::new().with_error_limit(1);
        let mut tracker = LimitTracker::new(&options);

        assert!(tracker.error_limit_reached("inline", 2));
        let mut errors = vec![
            ValidationError::new("blank-row", "one"),
            ValidationError::new("blank-row", "two"),
        ];
        tracker.truncate_errors(&mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_each_breach_warns_separately() {
        let options = ValidateOptions::new().with_row_limit(1);
        let mut tracker = LimitTracker::new(&options);

        assert!(tracker.row_limit_reached("a.csv", 2));
        assert!(tracker.row_limit_reached("b.csv", 2));
        assert_eq!(tracker.into_warnings().len(), 2);
    }
}
