//! Document header extraction.

use tracing::debug;

use super::rules::{
    AddressExtractor, DateExtractor, FieldExtractor, LoadNumberExtractor, LocationIdExtractor,
    StopIdExtractor, TempExtractor, VENDOR_NAME,
};
use crate::models::tender::HeaderFields;

/// Extracts the document-level fields shared by every line item.
pub struct HeaderExtractor {
    pickup: DateExtractor,
    delivery: DateExtractor,
    load_number: LoadNumberExtractor,
    ship_to: AddressExtractor,
    ship_from: AddressExtractor,
    temp: TempExtractor,
    location: LocationIdExtractor,
    stop: StopIdExtractor,
}

impl HeaderExtractor {
    pub fn new() -> Self {
        Self {
            pickup: DateExtractor::pickup(),
            delivery: DateExtractor::delivery(),
            load_number: LoadNumberExtractor::new(),
            ship_to: AddressExtractor::ship_to(),
            ship_from: AddressExtractor::ship_from(),
            temp: TempExtractor::new(),
            location: LocationIdExtractor::new(),
            stop: StopIdExtractor::new(),
        }
    }

    /// Extract header fields from the full document text.
    ///
    /// `filename` is carried through as the source document name.
    pub fn extract(&self, text: &str, filename: &str) -> HeaderFields {
        let header = HeaderFields {
            vendor_name: VENDOR_NAME.to_string(),
            pickup_date: self.pickup.extract(text).unwrap_or_default(),
            delivery_date: self.delivery.extract(text).unwrap_or_default(),
            invoice_ref: self.load_number.extract(text).unwrap_or_default(),
            ship_to: self.ship_to.extract(text).unwrap_or_default(),
            ship_from: self.ship_from.extract(text).unwrap_or_default(),
            temp: self.temp.extract(text).unwrap_or_default(),
            location_id: self.location.extract(text).unwrap_or_default(),
            stop_id: self.stop.extract(text).unwrap_or_default(),
            filename: filename.to_string(),
        };

        debug!(
            "Extracted header for {}: load={:?} pickup={:?} delivery={:?}",
            filename, header.invoice_ref, header.pickup_date, header.delivery_date
        );

        header
    }
}

impl Default for HeaderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tender::rules::patterns::COLUMN_BANNER;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_text_degrades_to_blanks() {
        let header = HeaderExtractor::new().extract("", "empty.pdf");

        assert_eq!(
            header,
            HeaderFields {
                vendor_name: "Pepsi Co Tender".to_string(),
                filename: "empty.pdf".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_extracts_all_fields() {
        let text = format!(
            "Load Number: 9001234\n\
             Location ID: 00077\n\
             Location Name: FRITO PLANT\nAddress: 5 MILL RD\nARRIVE\n\
             PICKUP\n4/1/24\n\
             {banner}\n\
             81234567 PU-998 4500123456 1,200 24 38,400 1,950\n\
             Location ID: 0002120\n\
             Location Name: DC Milton ON DWD\nAddress: 1890 READING COURT\nAppointment Info\nMILTON, ON L9T2X8\nARRIVE\n\
             DELIVERY\n4/3/24\n\
             OMS DRY 45F\nPage 1 of 1\n",
            banner = COLUMN_BANNER
        );

        let header = HeaderExtractor::new().extract(&text, "tender.pdf");

        assert_eq!(header.invoice_ref, "9001234");
        assert_eq!(header.location_id, "2120");
        assert_eq!(header.pickup_date, "4/1/24");
        assert_eq!(header.delivery_date, "4/3/24");
        assert_eq!(header.ship_from, "FRITO PLANT\n5 MILL RD");
        assert_eq!(header.ship_to, "DC Milton ON DWD\n1890 READING COURT\nMILTON, ON L9T2X8");
        assert_eq!(header.stop_id, "21200Y");
        assert_eq!(header.temp, "OMS DRY 45F");
        assert_eq!(header.filename, "tender.pdf");
    }
}
