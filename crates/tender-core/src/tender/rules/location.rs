//! Location id extraction.
//!
//! Tenders print `Location ID:` twice: the first is the sender's code, the
//! second the ship-to location. Only the second is used.

use super::FieldExtractor;
use super::patterns::LOCATION_ID;

/// Location id extractor.
pub struct LocationIdExtractor;

impl LocationIdExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocationIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LocationIdExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let second = self.extract_all(text).into_iter().nth(1)?;
        let stripped = second.trim_start_matches('0');
        if stripped.is_empty() {
            None
        } else {
            Some(stripped.to_string())
        }
    }

    /// Every `Location ID:` value in document order, as printed.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        LOCATION_ID
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

/// Extract the ship-to location id.
pub fn extract_location_id(text: &str) -> Option<String> {
    LocationIdExtractor::new().extract(text)
}
