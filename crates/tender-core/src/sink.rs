//! Row sinks: the persistence side of the pipeline.
//!
//! Before insertion, error markers are dropped and each row is narrowed to
//! the sink's accepted columns. Rows are inserted one at a time; the first
//! failure stops the run and is reported alongside the rows already written.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::tender::{BatchEntry, OutputRow};

/// Outcome of a sink run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SinkReport {
    pub inserted: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Destination for projected rows.
pub trait RowSink {
    /// Persist one row.
    fn insert(&mut self, row: &OutputRow) -> Result<()>;

    /// Prepare and insert a batch, stopping at the first failed row.
    fn insert_all(&mut self, entries: &[BatchEntry], accepted_columns: &[String]) -> SinkReport {
        let rows = prepare_rows(entries, accepted_columns);
        let mut report = SinkReport::default();

        for row in &rows {
            if let Err(e) = self.insert(row) {
                warn!("Row {} rejected: {}", report.inserted + 1, e);
                report.error = Some(e.to_string());
                break;
            }
            report.inserted += 1;
        }

        debug!("Inserted {} of {} rows", report.inserted, rows.len());
        report
    }
}

/// Drop error markers and narrow every row to `accepted_columns`.
pub fn prepare_rows(entries: &[BatchEntry], accepted_columns: &[String]) -> Vec<OutputRow> {
    entries
        .iter()
        .filter_map(BatchEntry::as_row)
        .map(|row| {
            let mut row = row.clone();
            row.retain_columns(accepted_columns);
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TenderError;
    use crate::models::tender::ErrorMarker;
    use pretty_assertions::assert_eq;

    /// Collects rows, failing on a configured row index.
    #[derive(Default)]
    struct VecSink {
        rows: Vec<OutputRow>,
        fail_at: Option<usize>,
    }

    impl RowSink for VecSink {
        fn insert(&mut self, row: &OutputRow) -> Result<()> {
            if self.fail_at == Some(self.rows.len()) {
                return Err(TenderError::Sink("duplicate key".to_string()));
            }
            self.rows.push(row.clone());
            Ok(())
        }
    }

    fn entries() -> Vec<BatchEntry> {
        vec![
            BatchEntry::Row([("po_number", "1"), ("debug", "x")].into_iter().collect()),
            BatchEntry::Error(ErrorMarker::pdf_not_found()),
            BatchEntry::Row([("po_number", "2"), ("debug", "y")].into_iter().collect()),
        ]
    }

    #[test]
    fn test_prepare_rows_filters_markers_and_columns() {
        let rows = prepare_rows(&entries(), &["po_number".to_string()]);

        assert_eq!(
            rows,
            vec![
                [("po_number", "1")].into_iter().collect::<OutputRow>(),
                [("po_number", "2")].into_iter().collect::<OutputRow>(),
            ]
        );
    }

    #[test]
    fn test_insert_all() {
        let mut sink = VecSink::default();
        let report = sink.insert_all(&entries(), &["po_number".to_string()]);

        assert_eq!(report, SinkReport { inserted: 2, error: None });
        assert_eq!(sink.rows.len(), 2);
    }

    #[test]
    fn test_partial_success() {
        let mut sink = VecSink {
            fail_at: Some(1),
            ..Default::default()
        };
        let report = sink.insert_all(&entries(), &["po_number".to_string()]);

        assert_eq!(report.inserted, 1);
        assert_eq!(report.error.as_deref(), Some("sink error: duplicate key"));
    }
}
