//! Common regex patterns and markers for PepsiCo tender extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Column banner printed above the line-item table.
pub const COLUMN_BANNER: &str = "PU Number Item Desc. PepsiCo Order# SAP Order# D Number PO Number Apt ID Pieces Pallets Weight Volume";

/// Compound header some layouts print before the stop section.
pub const SECONDARY_MARKER: &str = "Item Desc.PU Number D Number Apt IDSAP Order#";

/// Vendor label written into every row.
pub const VENDOR_NAME: &str = "Pepsi Co Tender";

/// Stop code of the Milton, ON distribution center.
pub const MILTON_STOP_ID: &str = "21200Y";

/// Labels embedded in captured address blocks.
pub const ADDRESS_LABELS: [&str; 2] = ["Address: ", "Appointment Info\n"];

/// Seven-column line-item shape, shared by the tokenizer and the temp cleanup.
const ROW_SHAPE: &str = r"(?:[0-9A-Z-]{5,})\s+(?:[0-9A-Z-]{3,})\s+(?:[0-9A-Z\-]+)\s+([0-9A-Z,]+)\s+([0-9,]+)\s+([0-9,]+)\s+([0-9,]+)";

/// Four bare numeric columns (a row whose identifiers wrapped onto another line).
const NUMERIC_TAIL: &str = r"([0-9,]+)\s+([0-9,]+)\s+([0-9,]+)\s+([0-9,]+)";

lazy_static! {
    // Location ids: first occurrence is the sender, second the ship-to
    pub static ref LOCATION_ID: Regex = Regex::new(
        r"Location ID:\s*(\d+)"
    ).unwrap();

    // Stop dates, label on its own line
    pub static ref PICKUP_DATE: Regex = Regex::new(
        r"PICKUP\n(\d{1,2}/\d{1,2}/\d{2})"
    ).unwrap();

    pub static ref PICKUP_DATE_LOOSE: Regex = Regex::new(
        r"PICKUP\n(\d{1,}/\d{1,}/\d{2})"
    ).unwrap();

    pub static ref DELIVERY_DATE: Regex = Regex::new(
        r"DELIVERY\n(\d{1,2}/\d{1,2}/\d{2})"
    ).unwrap();

    // Load number: rest of the line
    pub static ref LOAD_NUMBER: Regex = Regex::new(
        r"Load Number:(.*)"
    ).unwrap();

    // Stop address block, ARRIVE closes it
    pub static ref LOCATION_NAME: Regex = Regex::new(
        r"(?s)Location Name:\s+(.*)ARRIVE"
    ).unwrap();

    // Temperature annotation between the secondary marker and "Pallets"
    pub static ref TEMP_BLOCK: Regex = Regex::new(
        r"(?s)Item Desc\.PU Number D Number Apt IDSAP Order#(.*)Pallets"
    ).unwrap();

    // OMS / OTHERS annotation running up to a page footer
    pub static ref TEMP_FOOTER_BLOCK: Regex = Regex::new(
        r"(?s)(OMS.*|OTHERS.*)\s+.*Page\s\d+ of \d+"
    ).unwrap();

    // First line that looks like table data, through end of text
    pub static ref TEMP_TRUNCATE: Regex = Regex::new(
        &format!(r"(?m)^(?:{}|{})[\s\S]*$", ROW_SHAPE, NUMERIC_TAIL)
    ).unwrap();

    // Line item: order, secondary code, PO, optional 3-letter code, cases, pallets, weight, cubes
    pub static ref LINE_ITEM_ROW: Regex = Regex::new(
        r"^([0-9A-Z-]{5,})\s+([0-9A-Z-]{3,})\s+([0-9A-Z\-]+)\s+(?:([A-Z]{3})\s+)?([0-9A-Z,]+)\s+([0-9,]+)\s+([0-9,]+)\s+([0-9,]+)$"
    ).unwrap();

    // Known facility address blocks
    pub static ref MILTON_DC_ADDRESS: Regex = Regex::new(
        r"(?i)DC Milton ON DWD\s+Address:\s+1890 READING COURT\s+Appointment Info\s+MILTON, ON L9T2X8"
    ).unwrap();

    // Leading count fused to a trailing code, e.g. "120A12345678"
    pub static ref CASES_ORDER_BOUNDARY: Regex = Regex::new(
        r"([0-9,]+)[A-Z]"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_row_with_optional_code() {
        let caps = LINE_ITEM_ROW
            .captures("81234567 PU-998 4500123456 DRY 1,200 24 38,400 1,950")
            .unwrap();
        assert_eq!(&caps[1], "81234567");
        assert_eq!(caps.get(4).map(|m| m.as_str()), Some("DRY"));
        assert_eq!(&caps[5], "1,200");
    }

    #[test]
    fn test_line_item_row_without_optional_code() {
        let caps = LINE_ITEM_ROW
            .captures("81234567 PU-998 4500123456 1,200 24 38,400 1,950")
            .unwrap();
        assert!(caps.get(4).is_none());
        assert_eq!(&caps[8], "1,950");
    }

    #[test]
    fn test_temp_truncate_matches_numeric_tail() {
        assert!(TEMP_TRUNCATE.is_match("DRY VAN\n10 2 1,000 50"));
        assert!(!TEMP_TRUNCATE.is_match("DRY VAN\nKEEP FROZEN"));
    }

    #[test]
    fn test_milton_address_case_insensitive() {
        let text = "dc milton on dwd\nAddress: 1890 Reading Court\nAppointment Info\nMilton, ON L9T2X8";
        assert!(MILTON_DC_ADDRESS.is_match(text));
    }
}
