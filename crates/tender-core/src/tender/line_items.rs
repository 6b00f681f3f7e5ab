//! Line-item table tokenizer.

use tracing::debug;

use super::rules::patterns::{CASES_ORDER_BOUNDARY, COLUMN_BANNER, LINE_ITEM_ROW};
use super::rules::segment_after;
use crate::models::tender::LineItemRecord;

/// Parses the tabular block that follows the column banner.
pub struct LineItemTokenizer;

impl LineItemTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse every line item of a document, in source order.
    ///
    /// Without a column banner there is no table: the result is empty.
    pub fn tokenize(&self, text: &str) -> Vec<LineItemRecord> {
        let Some(table) = segment_after(text, COLUMN_BANNER) else {
            debug!("column banner not found, no line items");
            return Vec::new();
        };

        let items: Vec<LineItemRecord> = table.lines().filter_map(|l| self.parse_line(l)).collect();
        debug!("tokenized {} line items", items.len());
        items
    }

    /// Parse one table line; anything not shaped like a row yields `None`.
    pub fn parse_line(&self, line: &str) -> Option<LineItemRecord> {
        let caps = LINE_ITEM_ROW.captures(line.trim())?;

        // Group 2 (secondary code) and group 4 (3-letter code) are not exported.
        Some(LineItemRecord {
            order_number: caps[1].to_string(),
            po_number: caps[3].to_string(),
            cases: caps[5].to_string(),
            pallets: caps[6].to_string(),
            weight: caps[7].to_string(),
            cubes: caps[8].to_string(),
        })
    }
}

impl Default for LineItemTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a fused `cases` + order number token such as `120A1234567`.
///
/// The leading digit/comma run is the case count and the rest the order
/// number. Without such a boundary, a token longer than nine characters is
/// split nine characters from the end.
pub fn split_cases_and_order(value: &str) -> (String, String) {
    if let Some(caps) = CASES_ORDER_BOUNDARY.captures(value) {
        let cases = &caps[1];
        let order = value.replace(cases, "");
        return (cases.trim().to_string(), order.trim().to_string());
    }

    let count = value.chars().count();
    if count > 9 {
        let split = value
            .char_indices()
            .nth(count - 9)
            .map(|(i, _)| i)
            .unwrap_or(0);
        let (cases, order) = value.split_at(split);
        return (cases.trim().to_string(), order.trim().to_string());
    }

    (String::new(), String::new())
}
