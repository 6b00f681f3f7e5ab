//! Load number extraction.

use super::patterns::LOAD_NUMBER;
use super::{FieldExtractor, PatternRule, Scope, first_match};

/// Load number extractor; the load number becomes the row's invoice reference.
pub struct LoadNumberExtractor;

impl LoadNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoadNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LoadNumberExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let rules = [PatternRule::new("load_number", Scope::Full, &LOAD_NUMBER)];
        first_match(&rules, text)
            .map(|m| m.value.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Extract the load number.
pub fn extract_load_number(text: &str) -> Option<String> {
    LoadNumberExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_of_line_trimmed() {
        let text = "Tender\nLoad Number:   4412398  \nCarrier: ACME";
        assert_eq!(extract_load_number(text), Some("4412398".to_string()));
    }

    #[test]
    fn test_value_does_not_cross_lines() {
        assert_eq!(extract_load_number("Load Number:\n4412398"), None);
    }

    #[test]
    fn test_missing_label() {
        assert_eq!(extract_load_number("Load #: 4412398"), None);
    }
}
