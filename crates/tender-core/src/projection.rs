//! Row projection: semantic fields -> positional slots -> named output columns.
//!
//! Extraction binds values to [`Field`] names. A [`SlotLayout`] places each
//! field in a 1-based slot of a fixed-size array, and the configured format
//! reads slots back out under output column names. Slots no column refers
//! to are dropped.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Result, TenderError};
use crate::models::config::OutputConfig;
use crate::models::tender::{Field, HeaderFields, LineItemRecord, OutputRow};

/// Field to 1-based slot binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLayout {
    slots: BTreeMap<Field, usize>,
}

impl Default for SlotLayout {
    /// Slots 1..=16 in [`Field::ALL`] order; `ShipFrom` takes the extra slot 16.
    fn default() -> Self {
        Self {
            slots: Field::ALL
                .iter()
                .enumerate()
                .map(|(i, f)| (*f, i + 1))
                .collect(),
        }
    }
}

impl SlotLayout {
    /// Move `field` to `slot`.
    pub fn with_slot(mut self, field: Field, slot: usize) -> Self {
        self.slots.insert(field, slot);
        self
    }

    pub fn slot(&self, field: Field) -> Option<usize> {
        self.slots.get(&field).copied()
    }

    /// Reject zero slots and fields sharing a slot.
    pub fn validate(&self) -> Result<()> {
        let mut seen: BTreeMap<usize, Field> = BTreeMap::new();
        for (field, slot) in &self.slots {
            if *slot == 0 {
                return Err(TenderError::Config(format!("slot for {} must be at least 1", field)));
            }
            if let Some(other) = seen.insert(*slot, *field) {
                return Err(TenderError::Config(format!(
                    "{} and {} are both bound to slot {}",
                    other, field, slot
                )));
            }
        }
        Ok(())
    }
}

/// A configured output column.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnBinding {
    position: usize,
    name: String,
}

/// Projects header + line item pairs into output rows.
#[derive(Debug, Clone)]
pub struct RowProjector {
    column_count: usize,
    columns: Vec<ColumnBinding>,
    layout: SlotLayout,
}

impl RowProjector {
    /// Build and validate a projector from output configuration.
    pub fn new(config: &OutputConfig) -> Result<Self> {
        let mut layout = SlotLayout::default();
        for (field, slot) in config.slot_overrides()? {
            layout = layout.with_slot(field, slot);
        }
        Self::with_layout(config, layout)
    }

    /// Build a projector with an explicit slot layout.
    pub fn with_layout(config: &OutputConfig, layout: SlotLayout) -> Result<Self> {
        if config.column_count == 0 {
            return Err(TenderError::Config("columnCount must be at least 1".to_string()));
        }
        layout.validate()?;

        let mut columns = Vec::with_capacity(config.format.len());
        for descriptor in &config.format {
            // Descriptors without a slot (or slot 0) are not projected.
            let Some(position) = descriptor.id.filter(|id| *id > 0) else {
                continue;
            };
            if descriptor.sql_column_name.is_empty() {
                return Err(TenderError::Config(format!(
                    "column for slot {} has no sql_column_name",
                    position
                )));
            }
            if position > config.column_count {
                return Err(TenderError::Config(format!(
                    "column {} refers to slot {} but columnCount is {}",
                    descriptor.sql_column_name, position, config.column_count
                )));
            }
            columns.push(ColumnBinding {
                position,
                name: descriptor.sql_column_name.clone(),
            });
        }

        debug!(
            "Row projector: {} slots, {} output columns",
            config.column_count,
            columns.len()
        );

        Ok(Self {
            column_count: config.column_count,
            columns,
            layout,
        })
    }

    /// Output column names in configured order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Fill the positional slot array for one line item.
    ///
    /// Fields whose slot lies beyond `columnCount` are not placed.
    pub fn slot_array(&self, header: &HeaderFields, item: &LineItemRecord) -> Vec<String> {
        let mut slots = vec![String::new(); self.column_count];
        for field in Field::ALL {
            if let Some(slot) = self.layout.slot(field).filter(|s| *s <= self.column_count) {
                slots[slot - 1] = field.value(header, item).to_string();
            }
        }
        slots
    }

    /// Read configured columns out of a slot array.
    pub fn project_slots(&self, slots: &[String]) -> OutputRow {
        let mut row = OutputRow::new();
        for column in &self.columns {
            let value = slots.get(column.position - 1).cloned().unwrap_or_default();
            row.insert(column.name.clone(), value);
        }
        row
    }

    /// Merge one header and line item into an output row.
    pub fn project(&self, header: &HeaderFields, item: &LineItemRecord) -> OutputRow {
        self.project_slots(&self.slot_array(header, item))
    }
}
