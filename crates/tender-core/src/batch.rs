//! Document and directory processing.
//!
//! Targets are processed one at a time, in order: a directory expands to its
//! `.pdf` files sorted by name, a missing file becomes an error marker, and
//! every document's rows are appended to one flat list.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::config::TenderConfig;
use crate::models::tender::{BatchEntry, ErrorMarker};
use crate::pdf::{PdfTextSource, TextSource};
use crate::projection::RowProjector;
use crate::tender::{ParsedTender, PepsiTenderParser, TenderParser};

/// Sequential tender processor over a text source.
pub struct BatchProcessor<S: TextSource> {
    source: S,
    parser: PepsiTenderParser,
    projector: RowProjector,
}

impl BatchProcessor<PdfTextSource> {
    /// Processor reading PDFs from disk.
    pub fn from_config(config: &TenderConfig) -> Result<Self> {
        let source = PdfTextSource::new().with_min_text_length(config.pdf.min_text_length);
        Self::new(source, config)
    }
}

impl<S: TextSource> BatchProcessor<S> {
    pub fn new(source: S, config: &TenderConfig) -> Result<Self> {
        Ok(Self {
            source,
            parser: PepsiTenderParser::new(),
            projector: RowProjector::new(&config.output)?,
        })
    }

    /// Process a single document or every PDF in a directory.
    pub fn process(&self, path: &Path) -> Result<Vec<BatchEntry>> {
        let mut entries = Vec::new();
        for document in expand_target(path)? {
            entries.extend(self.process_document(&document)?);
        }
        info!("Processed {} into {} entries", path.display(), entries.len());
        Ok(entries)
    }

    /// Process several targets, concatenating their entries in order.
    pub fn process_targets(&self, targets: &[PathBuf]) -> Result<Vec<BatchEntry>> {
        let mut entries = Vec::new();
        for target in targets {
            entries.extend(self.process(target)?);
        }
        Ok(entries)
    }

    /// Parse one document without projecting it.
    pub fn parse_document(&self, path: &Path) -> Result<Option<ParsedTender>> {
        if !path.is_file() {
            warn!("PDF not found: {}", path.display());
            return Ok(None);
        }

        let text = self.source.extract_text(path)?;
        let parsed = self.parser.parse(&text, &file_name(path));
        for warning in &parsed.warnings {
            warn!("{}: {}", path.display(), warning);
        }
        Ok(Some(parsed))
    }

    /// Rows of one document, or a single error marker when it is missing.
    pub fn process_document(&self, path: &Path) -> Result<Vec<BatchEntry>> {
        let Some(parsed) = self.parse_document(path)? else {
            return Ok(vec![BatchEntry::Error(ErrorMarker::pdf_not_found())]);
        };

        Ok(parsed
            .line_items
            .iter()
            .map(|item| BatchEntry::Row(self.projector.project(&parsed.header, item)))
            .collect())
    }
}

/// Expand a target into the documents it names.
pub fn expand_target(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        list_pdfs(path)
    } else {
        Ok(vec![path.to_path_buf()])
    }
}

/// Files in `dir` with a case-insensitive `.pdf` extension, sorted by name.
pub fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    debug!("Found {} PDFs in {}", pdfs.len(), dir.display());
    Ok(pdfs)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tender::rules::patterns::COLUMN_BANNER;
    use pretty_assertions::assert_eq;

    /// Reads files as plain text, standing in for PDF text extraction.
    struct PlainTextSource;

    impl TextSource for PlainTextSource {
        fn extract_text(&self, path: &Path) -> Result<String> {
            Ok(fs::read_to_string(path)?)
        }
    }

    fn tender(load: &str, rows: &[&str]) -> String {
        format!("Load Number: {}\n{}\n{}\n", load, COLUMN_BANNER, rows.join("\n"))
    }

    fn processor() -> BatchProcessor<PlainTextSource> {
        BatchProcessor::new(PlainTextSource, &TenderConfig::default()).unwrap()
    }

    #[test]
    fn test_directory_with_missing_target() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.pdf"),
            tender("100", &["81234567 PU-998 4500123456 1,200 24 38,400 1,950", "81234568 PU-998 4500123457 5 1 90 8"]),
        )
        .unwrap();

        let targets = vec![dir.path().to_path_buf(), dir.path().join("ghost.pdf")];
        let entries = processor().process_targets(&targets).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].as_row().unwrap().get("po_number"), Some("4500123456"));
        assert_eq!(entries[1].as_row().unwrap().get("po_number"), Some("4500123457"));
        assert_eq!(entries[2], BatchEntry::Error(ErrorMarker::pdf_not_found()));
        assert_eq!(entries.iter().filter(|e| e.is_error()).count(), 1);
    }

    #[test]
    fn test_directory_order_and_extension_filter() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.PDF"), tender("2", &["81234567 PU-998 4500000002 1 1 1 1"])).unwrap();
        fs::write(dir.path().join("a.pdf"), tender("1", &["81234567 PU-998 4500000001 1 1 1 1"])).unwrap();
        fs::write(dir.path().join("notes.txt"), tender("3", &["81234567 PU-998 4500000003 1 1 1 1"])).unwrap();

        let entries = processor().process(dir.path()).unwrap();
        let refs: Vec<_> = entries
            .iter()
            .map(|e| e.as_row().unwrap().get("invoice_ref").unwrap().to_string())
            .collect();
        let files: Vec<_> = entries
            .iter()
            .map(|e| e.as_row().unwrap().get("filename").unwrap().to_string())
            .collect();

        assert_eq!(refs, vec!["1", "2"]);
        assert_eq!(files, vec!["a.pdf", "b.PDF"]);
    }

    #[test]
    fn test_single_missing_file() {
        let entries = processor().process(Path::new("/definitely/not/here.pdf")).unwrap();
        assert_eq!(entries, vec![BatchEntry::Error(ErrorMarker::pdf_not_found())]);
    }

    #[test]
    fn test_document_without_table_yields_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("header_only.pdf");
        fs::write(&path, "Load Number: 5\nPICKUP\n1/2/24\n").unwrap();

        let proc = processor();
        assert!(proc.process(&path).unwrap().is_empty());

        let parsed = proc.parse_document(&path).unwrap().unwrap();
        assert_eq!(parsed.header.pickup_date, "1/2/24");
        assert_eq!(parsed.header.filename, "header_only.pdf");
    }

    #[test]
    fn test_header_copied_into_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.pdf");
        fs::write(
            &path,
            tender("777", &["81234567 PU-998 4500000001 1 1 1 1", "81234568 PU-998 4500000002 2 2 2 2"]),
        )
        .unwrap();

        let entries = processor().process(&path).unwrap();
        for entry in &entries {
            let row = entry.as_row().unwrap();
            assert_eq!(row.get("invoice_ref"), Some("777"));
            assert_eq!(row.get("vendor_name"), Some("Pepsi Co Tender"));
            assert_eq!(row.len(), 15);
        }
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(processor().process(dir.path()).unwrap().is_empty());
    }
}
