//! Configuration structures for the tender pipeline.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, TenderError};
use crate::models::tender::Field;

/// Keys of the bare `{columnCount, format}` schema accepted at the top level.
const OUTPUT_KEYS: [&str; 3] = ["columnCount", "format", "slots"];

/// Main configuration for the tender pipeline.
///
/// Files may also be written in the bare output-schema shape
/// (`{"columnCount": N, "format": [...]}`); those keys are read as `output`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TenderConfig {
    /// Output row schema.
    pub output: OutputConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Row sink configuration.
    pub sink: SinkConfig,
}

/// Output row schema: positional slot array size and its named projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputConfig {
    /// Size of the positional slot array.
    pub column_count: usize,

    /// Ordered column descriptors; only those with an `id` are projected.
    pub format: Vec<FieldDescriptor>,

    /// Slot overrides by field name (e.g. `"ship_from": 16`).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub slots: BTreeMap<String, usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let format = Field::ALL
            .iter()
            .filter(|f| **f != Field::ShipFrom)
            .enumerate()
            .map(|(i, f)| FieldDescriptor::new(i + 1, f.name()))
            .collect();

        Self {
            column_count: 15,
            format,
            slots: BTreeMap::new(),
        }
    }
}

impl OutputConfig {
    /// Parse the `slots` overrides into semantic fields.
    pub fn slot_overrides(&self) -> Result<Vec<(Field, usize)>> {
        self.slots
            .iter()
            .map(|(name, slot)| {
                Field::from_name(name)
                    .map(|f| (f, *slot))
                    .ok_or_else(|| TenderError::Config(format!("unknown field in slots: {}", name)))
            })
            .collect()
    }
}

/// One output column: a 1-based slot position and its output name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// 1-based slot position; descriptors without one are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<usize>,

    /// Output key the slot value is written under.
    #[serde(default)]
    pub sql_column_name: String,
}

impl FieldDescriptor {
    pub fn new(id: usize, sql_column_name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            sql_column_name: sql_column_name.into(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Warn when a PDF yields fewer text characters than this.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 50 }
    }
}

/// Row sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Column names the sink accepts; any other key is dropped before insert.
    pub accepted_columns: Vec<String>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            accepted_columns: OutputConfig::default()
                .format
                .into_iter()
                .map(|d| d.sql_column_name)
                .collect(),
        }
    }
}

impl TenderConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    ///
    /// Unknown top-level keys are rejected rather than silently ignored.
    pub fn from_json(content: &str) -> Result<Self> {
        let mut value: Value = serde_json::from_str(content)?;

        if let Some(root) = value.as_object_mut() {
            let bare: Vec<&str> = OUTPUT_KEYS
                .iter()
                .copied()
                .filter(|k| root.contains_key(*k))
                .collect();

            if !bare.is_empty() {
                if root.contains_key("output") {
                    return Err(TenderError::Config(format!(
                        "{} given both at the top level and under output",
                        bare.join(", ")
                    )));
                }
                let mut output = Map::new();
                for key in bare {
                    if let Some(v) = root.remove(key) {
                        output.insert(key.to_string(), v);
                    }
                }
                root.insert("output".to_string(), Value::Object(output));
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
