//! Temperature / class annotation.
//!
//! The annotation has no label of its own, so it is recovered in stages:
//! an OMS/OTHERS block running up to a page footer takes priority over the
//! text between the secondary marker and "Pallets"; the footer pattern is
//! then re-applied to the chosen value, and anything from the first
//! table-shaped line onwards is cut off.

use tracing::trace;

use super::patterns::{TEMP_BLOCK, TEMP_FOOTER_BLOCK, TEMP_TRUNCATE};
use super::{FieldExtractor, PatternRule, Scope, first_match};

/// Temperature annotation extractor.
pub struct TempExtractor;

impl TempExtractor {
    pub fn new() -> Self {
        Self
    }

    fn rules() -> [PatternRule; 2] {
        [
            PatternRule::new("temp_footer_block", Scope::Full, &TEMP_FOOTER_BLOCK),
            PatternRule::new("temp_banner_block", Scope::Full, &TEMP_BLOCK),
        ]
    }
}

impl Default for TempExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TempExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let mut temp = first_match(&Self::rules(), text)
            .map(|m| m.value.trim().to_string())
            .unwrap_or_default();

        // Nested footer blocks
        let nested = TEMP_FOOTER_BLOCK
            .captures(&temp)
            .map(|caps| caps[1].trim().to_string());
        if let Some(inner) = nested {
            temp = inner;
        }

        let temp = truncate_at_table_row(&temp);
        if temp.is_empty() {
            None
        } else {
            trace!(len = temp.len(), "temp extracted");
            Some(temp.to_string())
        }
    }
}

/// Cut `value` at the first line shaped like a line-item row and right-trim.
pub fn truncate_at_table_row(value: &str) -> &str {
    let kept = match TEMP_TRUNCATE.find(value) {
        Some(m) => &value[..m.start()],
        None => value,
    };
    kept.trim_end()
}

/// Extract the temperature annotation.
pub fn extract_temp(text: &str) -> Option<String> {
    TempExtractor::new().extract(text)
}
