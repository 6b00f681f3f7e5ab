//! Job envelope: capability dispatch and JSON responses.
//!
//! Every failure is converted into an `error` response carrying the
//! capability name; nothing propagates past this boundary.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::batch::BatchProcessor;
use crate::error::{Result, TenderError};
use crate::models::config::TenderConfig;
use crate::models::tender::BatchEntry;
use crate::pdf::TextSource;

/// Capability name served by this crate.
pub const CAPABILITY_NAME: &str = "la_pepsi_tenders_pdf_parser";

/// A job descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CapabilityRequest {
    #[serde(default)]
    pub capability: Option<String>,

    #[serde(default)]
    pub args: CapabilityArgs,
}

/// Arguments of a tender parsing job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CapabilityArgs {
    /// A document or directory path.
    #[serde(default)]
    pub pdf_path: Option<String>,
}

/// Response envelope: `result` on success, `error` otherwise.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CapabilityResponse {
    Success {
        result: Vec<BatchEntry>,
        capability: String,
    },
    Failure {
        error: String,
        capability: Option<String>,
    },
}

impl CapabilityResponse {
    pub fn failure(error: impl Into<String>, capability: Option<&str>) -> Self {
        CapabilityResponse::Failure {
            error: error.into(),
            capability: capability.map(str::to_string),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CapabilityResponse::Success { .. })
    }
}

/// Run the tender parsing capability for `pdf_path`.
pub fn run_capability<S: TextSource>(
    pdf_path: Option<&str>,
    source: S,
    config: &TenderConfig,
) -> CapabilityResponse {
    match parse_path(pdf_path, source, config) {
        Ok(result) => CapabilityResponse::Success {
            result,
            capability: CAPABILITY_NAME.to_string(),
        },
        Err(e) => {
            error!("{} failed: {}", CAPABILITY_NAME, e);
            CapabilityResponse::failure(e.to_string(), Some(CAPABILITY_NAME))
        }
    }
}

fn parse_path<S: TextSource>(
    pdf_path: Option<&str>,
    source: S,
    config: &TenderConfig,
) -> Result<Vec<BatchEntry>> {
    let pdf_path = pdf_path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| TenderError::MissingArgument("pdf_path".to_string()))?;

    BatchProcessor::new(source, config)?.process(Path::new(pdf_path))
}

/// Dispatch a parsed request by capability name.
pub fn dispatch<S: TextSource>(
    request: &CapabilityRequest,
    source: S,
    config: &TenderConfig,
) -> CapabilityResponse {
    match request.capability.as_deref() {
        Some(CAPABILITY_NAME) => run_capability(request.args.pdf_path.as_deref(), source, config),
        other => CapabilityResponse::failure(
            format!("Unknown capability: {}", other.unwrap_or("null")),
            other,
        ),
    }
}

/// Decode a JSON job descriptor and dispatch it.
///
/// Malformed input yields an error response for capability `"unknown"`.
pub fn dispatch_json<S: TextSource>(
    input: &str,
    source: S,
    config: &TenderConfig,
) -> CapabilityResponse {
    match serde_json::from_str::<CapabilityRequest>(input) {
        Ok(request) => dispatch(&request, source, config),
        Err(e) => CapabilityResponse::failure(format!("Error: {}", e), Some("unknown")),
    }
}
