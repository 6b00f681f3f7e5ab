//! Pickup and delivery date extraction.
//!
//! Dates are kept verbatim (`M/D/YY`); no calendar parsing is attempted.

use super::patterns::{DELIVERY_DATE, PICKUP_DATE, PICKUP_DATE_LOOSE};
use super::{FieldExtractor, PatternRule, Scope, first_match};

/// Which stop date to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopEvent {
    Pickup,
    Delivery,
}

/// Date field extractor for one stop event.
pub struct DateExtractor {
    event: StopEvent,
}

impl DateExtractor {
    pub fn new(event: StopEvent) -> Self {
        Self { event }
    }

    pub fn pickup() -> Self {
        Self::new(StopEvent::Pickup)
    }

    pub fn delivery() -> Self {
        Self::new(StopEvent::Delivery)
    }

    /// Whole document first, then the section after the secondary marker,
    /// where some layouts print the stop dates.
    fn rules(&self) -> [PatternRule; 2] {
        match self.event {
            StopEvent::Pickup => [
                PatternRule::new("pickup_date", Scope::Full, &PICKUP_DATE),
                PatternRule::new(
                    "pickup_date_secondary",
                    Scope::AfterSecondaryMarker,
                    &PICKUP_DATE_LOOSE,
                ),
            ],
            StopEvent::Delivery => [
                PatternRule::new("delivery_date", Scope::Full, &DELIVERY_DATE),
                PatternRule::new(
                    "delivery_date_secondary",
                    Scope::AfterSecondaryMarker,
                    &DELIVERY_DATE,
                ),
            ],
        }
    }
}

impl FieldExtractor for DateExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(&self.rules(), text).map(|m| m.value)
    }
}

/// Extract the pickup date.
pub fn extract_pickup_date(text: &str) -> Option<String> {
    DateExtractor::pickup().extract(text)
}

/// Extract the delivery date.
pub fn extract_delivery_date(text: &str) -> Option<String> {
    DateExtractor::delivery().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tender::rules::patterns::SECONDARY_MARKER;

    #[test]
    fn test_extract_stop_dates() {
        let text = "Load Number: 77\nPICKUP\n3/14/24\nDELIVERY\n3/16/24\n";

        assert_eq!(extract_pickup_date(text), Some("3/14/24".to_string()));
        assert_eq!(extract_delivery_date(text), Some("3/16/24".to_string()));
    }

    #[test]
    fn test_label_must_end_its_line() {
        assert_eq!(extract_pickup_date("PICKUP 3/14/24"), None);
        assert_eq!(extract_delivery_date("DELIVERY\n2024-03-16"), None);
    }

    #[test]
    fn test_dates_kept_verbatim() {
        assert_eq!(extract_pickup_date("PICKUP\n03/04/24"), Some("03/04/24".to_string()));
    }

    #[test]
    fn test_pickup_secondary_section_accepts_long_day() {
        // Three-digit day only passes the loose secondary-section rule.
        let text = format!("{}\nPICKUP\n1/123/24", SECONDARY_MARKER);
        assert_eq!(extract_pickup_date(&text), Some("1/123/24".to_string()));
    }

    #[test]
    fn test_missing_dates() {
        assert_eq!(extract_pickup_date(""), None);
        assert_eq!(extract_delivery_date("PICKUP\n3/14/24"), None);
    }
}
