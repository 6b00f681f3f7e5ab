//! Ship-to and ship-from address blocks.
//!
//! Both are `Location Name: ... ARRIVE` blocks. The shipper's sits in the
//! header region before the column banner; the consignee's follows the
//! line-item table.

use super::patterns::{ADDRESS_LABELS, LOCATION_NAME};
use super::{FieldExtractor, PatternRule, Scope, first_match};

/// Which side of the shipment the address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressSide {
    ShipTo,
    ShipFrom,
}

/// Address block extractor.
pub struct AddressExtractor {
    side: AddressSide,
}

impl AddressExtractor {
    pub fn new(side: AddressSide) -> Self {
        Self { side }
    }

    pub fn ship_to() -> Self {
        Self::new(AddressSide::ShipTo)
    }

    pub fn ship_from() -> Self {
        Self::new(AddressSide::ShipFrom)
    }

    fn rule(&self) -> PatternRule {
        match self.side {
            AddressSide::ShipTo => PatternRule::new("ship_to", Scope::AfterBanner, &LOCATION_NAME),
            AddressSide::ShipFrom => {
                PatternRule::new("ship_from", Scope::BeforeBanner, &LOCATION_NAME)
            }
        }
    }
}

impl FieldExtractor for AddressExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(&[self.rule()], text)
            .map(|m| clean_address(&m.value))
            .filter(|v| !v.is_empty())
    }
}

/// Strip embedded field labels and surrounding whitespace from an address block.
pub fn clean_address(raw: &str) -> String {
    ADDRESS_LABELS
        .iter()
        .fold(raw.to_string(), |acc, label| acc.replace(label, ""))
        .trim()
        .to_string()
}
