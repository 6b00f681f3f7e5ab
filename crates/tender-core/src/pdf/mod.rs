//! PDF text extraction module.

mod extractor;

pub use extractor::{PdfExtractor, PdfTextSource};

use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text page by page.
    fn extract_pages(&self) -> Result<Vec<String>>;

    /// Extract the whole document as one text, pages joined by newlines.
    fn extract_text(&self) -> Result<String> {
        Ok(join_pages(&self.extract_pages()?))
    }
}

/// Anything that can turn a document on disk into its raw text.
pub trait TextSource {
    fn extract_text(&self, path: &Path) -> crate::Result<String>;
}

/// Flatten page texts: every non-empty page is followed by a newline.
pub fn join_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages.iter().filter(|p| !p.is_empty()) {
        text.push_str(page);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_skips_empty() {
        let pages = vec!["one".to_string(), String::new(), "two".to_string()];
        assert_eq!(join_pages(&pages), "one\ntwo\n");
    }

    #[test]
    fn test_join_no_pages() {
        assert_eq!(join_pages(&[]), "");
    }
}
