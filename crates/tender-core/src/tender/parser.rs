//! PepsiCo tender parser combining header extraction and line-item tokenizing.

use tracing::{debug, info};

use crate::models::tender::{HeaderFields, LineItemRecord};

use super::header::HeaderExtractor;
use super::line_items::LineItemTokenizer;

/// Result of parsing one tender document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTender {
    /// Document-level fields.
    pub header: HeaderFields,
    /// Line items in source order.
    pub line_items: Vec<LineItemRecord>,
    /// Extraction warnings (empty header fields, no line items).
    pub warnings: Vec<String>,
}

impl ParsedTender {
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

/// Trait for tender parsing.
///
/// Parsing is best-effort and never fails: unmatched fields are empty and
/// unmatched lines are skipped.
pub trait TenderParser {
    /// Parse a tender from its full text.
    fn parse(&self, text: &str, filename: &str) -> ParsedTender;
}

/// Parser for PepsiCo freight tenders.
pub struct PepsiTenderParser {
    header: HeaderExtractor,
    tokenizer: LineItemTokenizer,
}

impl PepsiTenderParser {
    pub fn new() -> Self {
        Self {
            header: HeaderExtractor::new(),
            tokenizer: LineItemTokenizer::new(),
        }
    }
}

impl Default for PepsiTenderParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TenderParser for PepsiTenderParser {
    fn parse(&self, text: &str, filename: &str) -> ParsedTender {
        info!("Parsing tender {} from {} characters of text", filename, text.len());

        let header = self.header.extract(text, filename);
        let line_items = self.tokenizer.tokenize(text);

        let mut warnings: Vec<String> = header
            .missing_fields()
            .into_iter()
            .map(|f| format!("Could not extract {}", f))
            .collect();
        if line_items.is_empty() {
            warnings.push("Could not extract line items".to_string());
        }

        debug!(
            "Parsed {} line items from {} with {} warnings",
            line_items.len(),
            filename,
            warnings.len()
        );

        ParsedTender {
            header,
            line_items,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tender::rules::patterns::COLUMN_BANNER;

    fn sample() -> String {
        format!(
            "Load Number: 9001234\nPICKUP\n4/1/24\n{}\n\
             81234567 PU-998 4500123456 1,200 24 38,400 1,950\n\
             81234568 PU-998 4500123457 OTH 10 1 200 30\n",
            COLUMN_BANNER
        )
    }

    #[test]
    fn test_parse_basic_tender() {
        let parsed = PepsiTenderParser::new().parse(&sample(), "t.pdf");

        assert_eq!(parsed.header.invoice_ref, "9001234");
        assert_eq!(parsed.line_items.len(), 2);
        assert_eq!(parsed.line_items[1].po_number, "4500123457");
        assert!(parsed.warnings.iter().any(|w| w == "Could not extract delivery_date"));
        assert!(!parsed.warnings.iter().any(|w| w == "Could not extract line items"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = PepsiTenderParser::new();
        let text = sample();

        let first = parser.parse(&text, "t.pdf");
        let second = parser.parse(&text, "t.pdf");
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_line_items_is_not_an_error() {
        let parsed = PepsiTenderParser::new().parse("Load Number: 1", "t.pdf");

        assert!(parsed.is_empty());
        assert_eq!(parsed.header.invoice_ref, "1");
        assert!(parsed.warnings.iter().any(|w| w == "Could not extract line items"));
    }
}
