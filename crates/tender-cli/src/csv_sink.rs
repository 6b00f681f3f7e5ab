//! CSV row sink.

use std::io::Write;

use tender_core::{OutputRow, RowSink, TenderError};

/// Writes rows as CSV with a fixed header.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    columns: Vec<String>,
    header_written: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W, columns: Vec<String>) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            columns,
            header_written: false,
        }
    }

    fn write_header(&mut self) -> tender_core::Result<()> {
        if !self.header_written {
            self.writer
                .write_record(&self.columns)
                .map_err(|e| TenderError::Sink(e.to_string()))?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Flush and return the underlying writer; an empty batch still gets a header.
    pub fn finish(mut self) -> anyhow::Result<W> {
        self.write_header()?;
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn insert(&mut self, row: &OutputRow) -> tender_core::Result<()> {
        self.write_header()?;
        let record: Vec<&str> = self
            .columns
            .iter()
            .map(|c| row.get(c).unwrap_or(""))
            .collect();
        self.writer
            .write_record(&record)
            .map_err(|e| TenderError::Sink(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tender_core::{BatchEntry, ErrorMarker};

    #[test]
    fn test_csv_sink_writes_header_and_rows() {
        let columns = vec!["po_number".to_string(), "weight".to_string()];
        let mut sink = CsvSink::new(Vec::new(), columns.clone());

        let entries = vec![
            BatchEntry::Row(
                [("po_number", "45001"), ("weight", "38,400"), ("temp", "DRY")]
                    .into_iter()
                    .collect(),
            ),
            BatchEntry::Error(ErrorMarker::pdf_not_found()),
        ];
        let report = sink.insert_all(&entries, &columns);
        assert_eq!(report.inserted, 1);

        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        assert_eq!(out, "po_number,weight\n45001,\"38,400\"\n");
    }

    #[test]
    fn test_empty_batch_has_header() {
        let sink = CsvSink::new(Vec::new(), vec!["a".to_string()]);
        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        assert_eq!(out, "a\n");
    }
}
