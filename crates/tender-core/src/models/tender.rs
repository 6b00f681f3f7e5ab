//! Tender document data models: header fields, line items, and output rows.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Semantic name of every value a tender row can carry.
///
/// Extraction binds values to these names; the slot layout later decides
/// where (and whether) each one lands in the positional array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    VendorName,
    PickupDate,
    DeliveryDate,
    PoNumber,
    Cases,
    Pallets,
    Weight,
    Cubes,
    ShipTo,
    Temp,
    InvoiceRef,
    OrderNumber,
    LocationId,
    StopId,
    Filename,
    ShipFrom,
}

impl Field {
    /// All fields, in default slot order.
    pub const ALL: [Field; 16] = [
        Field::VendorName,
        Field::PickupDate,
        Field::DeliveryDate,
        Field::PoNumber,
        Field::Cases,
        Field::Pallets,
        Field::Weight,
        Field::Cubes,
        Field::ShipTo,
        Field::Temp,
        Field::InvoiceRef,
        Field::OrderNumber,
        Field::LocationId,
        Field::StopId,
        Field::Filename,
        Field::ShipFrom,
    ];

    /// Stable snake_case name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Field::VendorName => "vendor_name",
            Field::PickupDate => "pickup_date",
            Field::DeliveryDate => "delivery_date",
            Field::PoNumber => "po_number",
            Field::Cases => "cases",
            Field::Pallets => "pallets",
            Field::Weight => "weight",
            Field::Cubes => "cubes",
            Field::ShipTo => "ship_to",
            Field::Temp => "temp",
            Field::InvoiceRef => "invoice_ref",
            Field::OrderNumber => "order_number",
            Field::LocationId => "location_id",
            Field::StopId => "stop_id",
            Field::Filename => "filename",
            Field::ShipFrom => "ship_from",
        }
    }

    /// Parse a field from its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Whether the value comes from the document header rather than a line item.
    pub fn is_header(&self) -> bool {
        !matches!(
            self,
            Field::PoNumber
                | Field::Cases
                | Field::Pallets
                | Field::Weight
                | Field::Cubes
                | Field::OrderNumber
        )
    }

    /// Resolve this field's value for one line item of a document.
    pub fn value<'a>(&self, header: &'a HeaderFields, item: &'a LineItemRecord) -> &'a str {
        match self {
            Field::VendorName => &header.vendor_name,
            Field::PickupDate => &header.pickup_date,
            Field::DeliveryDate => &header.delivery_date,
            Field::ShipTo => &header.ship_to,
            Field::ShipFrom => &header.ship_from,
            Field::Temp => &header.temp,
            Field::InvoiceRef => &header.invoice_ref,
            Field::LocationId => &header.location_id,
            Field::StopId => &header.stop_id,
            Field::Filename => &header.filename,
            Field::PoNumber => &item.po_number,
            Field::Cases => &item.cases,
            Field::Pallets => &item.pallets,
            Field::Weight => &item.weight,
            Field::Cubes => &item.cubes,
            Field::OrderNumber => &item.order_number,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Document-level fields shared by every line item of one tender.
///
/// Missing values are empty strings; extraction never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderFields {
    /// Constant vendor label for this tender type.
    pub vendor_name: String,

    /// Pickup date, verbatim `M/D/YY`.
    pub pickup_date: String,

    /// Delivery date, verbatim `M/D/YY`.
    pub delivery_date: String,

    /// Load number.
    pub invoice_ref: String,

    /// Consignee address block.
    pub ship_to: String,

    /// Shipper address block.
    pub ship_from: String,

    /// Temperature / class annotation.
    pub temp: String,

    /// Ship-to location id, leading zeros stripped.
    pub location_id: String,

    /// Stop code for known facilities.
    pub stop_id: String,

    /// Source document name.
    pub filename: String,
}

impl HeaderFields {
    /// Names of header fields that came back empty.
    pub fn missing_fields(&self) -> Vec<Field> {
        let empty = LineItemRecord::default();
        Field::ALL
            .iter()
            .copied()
            .filter(|f| f.is_header() && f.value(self, &empty).is_empty())
            .collect()
    }
}

/// One row of the shipment's line-item table.
///
/// Numeric columns are kept as printed, thousands separators included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRecord {
    pub po_number: String,
    pub order_number: String,
    pub cases: String,
    pub pallets: String,
    pub weight: String,
    pub cubes: String,
}

/// A projected output row: configured column name to value, in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRow {
    columns: Vec<(String, String)>,
}

impl OutputRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column. A repeated name keeps its first position and takes the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.columns.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Drop every column whose name is not in `accepted`.
    pub fn retain_columns(&mut self, accepted: &[String]) {
        self.columns.retain(|(n, _)| accepted.iter().any(|a| a == n));
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OutputRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = OutputRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl Serialize for OutputRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Placeholder emitted for a target that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMarker {
    pub error: String,
}

impl ErrorMarker {
    pub fn pdf_not_found() -> Self {
        Self {
            error: "PDF not found".to_string(),
        }
    }
}

/// One entry of a batch result: a projected row or an error marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Row(OutputRow),
    Error(ErrorMarker),
}

impl BatchEntry {
    pub fn as_row(&self) -> Option<&OutputRow> {
        match self {
            BatchEntry::Row(row) => Some(row),
            BatchEntry::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, BatchEntry::Error(_))
    }
}
