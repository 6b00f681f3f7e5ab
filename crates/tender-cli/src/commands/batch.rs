//! Batch processing command for multiple tender files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use tender_core::BatchProcessor;

use super::process::{OutputFormat, format_entries};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching tender PDFs
    #[arg(required = true)]
    input: String,

    /// Output directory (default: print rows to stdout)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for the combined rows
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a per-file summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue when a file cannot be read
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    rows: usize,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // One document at a time, in glob order
    let processor = BatchProcessor::from_config(&config)?;
    let mut entries = Vec::new();
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = processor.process_document(&path);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(file_entries) => {
                results.push(FileResult {
                    path: path.clone(),
                    rows: file_entries.iter().filter(|e| !e.is_error()).count(),
                    error: None,
                    processing_time_ms,
                });
                entries.extend(file_entries);
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path: path.clone(),
                        rows: 0,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let output = format_entries(&entries, args.format, &config)?;
    match &args.output_dir {
        Some(output_dir) => {
            let output_path = output_dir.join(format!("rows.{}", args.format.extension()));
            fs::write(&output_path, output)?;
            debug!("Wrote rows to {}", output_path.display());
        }
        None => print!("{}", output),
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let total_rows: usize = results.iter().map(|r| r.rows).sum();

    eprintln!();
    eprintln!(
        "{} Processed {} files into {} rows in {:?}",
        style("✓").green(),
        results.len(),
        total_rows,
        start.elapsed()
    );

    if !failed.is_empty() {
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["filename", "status", "rows", "processing_time_ms", "error"])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let status = if result.error.is_some() { "error" } else { "success" };

        wtr.write_record([
            filename,
            status,
            &result.rows.to_string(),
            &result.processing_time_ms.to_string(),
            result.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
