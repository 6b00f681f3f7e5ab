//! Dispatch command - answer a JSON job descriptor.
//!
//! Reads `{"capability": ..., "args": {"pdf_path": ...}}` and prints the
//! response envelope as JSON on stdout.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use tender_core::capability::{self, CapabilityResponse};
use tender_core::{PdfTextSource, TenderConfig};

/// Arguments for the dispatch command.
#[derive(Args)]
pub struct DispatchArgs {
    /// Read the job descriptor from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,
}

pub async fn run(args: DispatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let response = match respond(&args, config_path) {
        Ok(response) => response,
        Err(e) => CapabilityResponse::failure(format!("Error: {}", e), Some("unknown")),
    };

    println!("{}", serde_json::to_string_pretty(&response)?);

    // Envelope failures that never reached the capability exit non-zero
    if let CapabilityResponse::Failure { capability, .. } = &response {
        if capability.as_deref() == Some("unknown") {
            std::process::exit(1);
        }
    }

    Ok(())
}

fn respond(args: &DispatchArgs, config_path: Option<&str>) -> anyhow::Result<CapabilityResponse> {
    let input = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    debug!("Read {} bytes of job descriptor", input.len());

    let config: TenderConfig = super::load_config(config_path)?;
    let source = PdfTextSource::new().with_min_text_length(config.pdf.min_text_length);

    Ok(capability::dispatch_json(&input, source, &config))
}
