//! Stop code assignment for known facilities.
//!
//! This is a lookup, not an address parser: a stop code is assigned only
//! when a facility's exact address block appears in the document.

use regex::Regex;

use super::FieldExtractor;
use super::patterns::{MILTON_DC_ADDRESS, MILTON_STOP_ID};

/// A facility whose address block maps to a fixed stop code.
pub struct KnownStop {
    pub stop_id: &'static str,
    pub address: &'static Regex,
}

/// Stop id extractor over a table of known facilities.
pub struct StopIdExtractor {
    stops: Vec<KnownStop>,
}

impl StopIdExtractor {
    pub fn new() -> Self {
        Self {
            stops: vec![KnownStop {
                stop_id: MILTON_STOP_ID,
                address: &MILTON_DC_ADDRESS,
            }],
        }
    }
}

impl Default for StopIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for StopIdExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.stops
            .iter()
            .find(|stop| stop.address.is_match(text))
            .map(|stop| stop.stop_id.to_string())
    }
}

/// Extract the stop id.
pub fn extract_stop_id(text: &str) -> Option<String> {
    StopIdExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milton_block_assigns_stop() {
        let text = "Location Name: DC Milton ON DWD\nAddress: 1890 READING COURT\nAppointment Info\nMILTON, ON L9T2X8\nARRIVE";
        assert_eq!(extract_stop_id(text), Some("21200Y".to_string()));
    }

    #[test]
    fn test_match_ignores_case() {
        let text = "DC MILTON ON DWD Address: 1890 reading court Appointment info milton, on l9t2x8";
        assert_eq!(extract_stop_id(text), Some("21200Y".to_string()));
    }

    #[test]
    fn test_other_facility_has_no_stop() {
        let text = "DC Toronto ON DWD\nAddress: 1 FRONT ST\nAppointment Info\nTORONTO, ON M5J2L3";
        assert_eq!(extract_stop_id(text), None);
    }
}
