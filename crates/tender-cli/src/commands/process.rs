//! Process command - extract rows from a tender PDF or a directory of them.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use tender_core::{BatchEntry, BatchProcessor, RowSink, TenderConfig};

use crate::csv_sink::CsvSink;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF file or directory
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of rows
    Json,
    /// CSV with the sink's accepted columns
    Csv,
    /// Plain text listing
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    info!("Processing {}", args.input.display());

    let processor = BatchProcessor::from_config(&config)?;
    let entries = processor.process(&args.input)?;

    let output = format_entries(&entries, args.format, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} rows written to {}",
            style("✓").green(),
            entries.iter().filter(|e| !e.is_error()).count(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render batch entries in the requested format.
pub fn format_entries(
    entries: &[BatchEntry],
    format: OutputFormat,
    config: &TenderConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(entries)?)),
        OutputFormat::Csv => format_csv(entries, config),
        OutputFormat::Text => Ok(format_text(entries)),
    }
}

fn format_csv(entries: &[BatchEntry], config: &TenderConfig) -> anyhow::Result<String> {
    let accepted = &config.sink.accepted_columns;
    let mut sink = CsvSink::new(Vec::new(), accepted.clone());

    let report = sink.insert_all(entries, accepted);
    if let Some(error) = report.error {
        anyhow::bail!("CSV output failed after {} rows: {}", report.inserted, error);
    }

    Ok(String::from_utf8(sink.finish()?)?)
}

fn format_text(entries: &[BatchEntry]) -> String {
    let mut output = String::new();

    for (i, entry) in entries.iter().enumerate() {
        match entry {
            BatchEntry::Row(row) => {
                output.push_str(&format!("Row {}:\n", i + 1));
                for (name, value) in row.iter() {
                    // Address blocks span lines
                    output.push_str(&format!("  {}: {}\n", name, value.replace('\n', " / ")));
                }
            }
            BatchEntry::Error(marker) => {
                output.push_str(&format!("Row {}: error: {}\n", i + 1, marker.error));
            }
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tender_core::ErrorMarker;

    fn entries() -> Vec<BatchEntry> {
        vec![
            BatchEntry::Row(
                [("po_number", "45001"), ("ship_to", "DC\nMILTON")]
                    .into_iter()
                    .collect(),
            ),
            BatchEntry::Error(ErrorMarker::pdf_not_found()),
        ]
    }

    #[test]
    fn test_format_text() {
        let text = format_text(&entries());
        assert!(text.contains("  ship_to: DC / MILTON\n"));
        assert!(text.contains("Row 2: error: PDF not found"));
    }

    #[test]
    fn test_format_json_keeps_markers() {
        let json = format_entries(&entries(), OutputFormat::Json, &TenderConfig::default()).unwrap();
        assert!(json.contains("\"error\": \"PDF not found\""));
    }

    #[test]
    fn test_format_csv_drops_markers() {
        let csv = format_entries(&entries(), OutputFormat::Csv, &TenderConfig::default()).unwrap();
        assert!(csv.starts_with("vendor_name,pickup_date"));
        assert!(!csv.contains("PDF not found"));

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][3], "45001");
        assert_eq!(&records[0][8], "DC\nMILTON");
    }
}
