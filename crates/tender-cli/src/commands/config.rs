//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use tender_core::{RowProjector, TenderConfig};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "output.columnCount")
        key: String,
    },

    /// Check that a configuration file describes a valid output schema
    Check {
        /// Configuration file (default: --config, then the standard location)
        path: Option<PathBuf>,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let explicit = config_path.map(PathBuf::from);
    match args.command {
        ConfigCommand::Show => show_config(explicit),
        ConfigCommand::Init(init_args) => init_config(init_args, explicit),
        ConfigCommand::Get { key } => get_config(&key, explicit),
        ConfigCommand::Check { path } => check_config(path.or(explicit)),
        ConfigCommand::Path => show_path(explicit),
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tender")
        .join("config.json")
}

/// Load a named file, which must exist, or the standard location if present.
fn load(explicit: Option<&Path>) -> anyhow::Result<TenderConfig> {
    match explicit {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Ok(TenderConfig::from_file(path)?)
        }
        None => {
            let path = default_config_path();
            if path.exists() {
                Ok(TenderConfig::from_file(&path)?)
            } else {
                Ok(TenderConfig::default())
            }
        }
    }
}

fn show_config(explicit: Option<PathBuf>) -> anyhow::Result<()> {
    if explicit.is_none() && !default_config_path().exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let config = load(explicit.as_deref())?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, explicit: Option<PathBuf>) -> anyhow::Result<()> {
    let output_path = args
        .output
        .or(explicit)
        .unwrap_or_else(default_config_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    TenderConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(key: &str, explicit: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load(explicit.as_deref())?;
    let json = serde_json::to_value(&config)?;

    println!("{}", serde_json::to_string_pretty(lookup(&json, key)?)?);

    Ok(())
}

/// Follow a dotted key path; numeric segments index into arrays.
fn lookup<'a>(json: &'a serde_json::Value, key: &str) -> anyhow::Result<&'a serde_json::Value> {
    let mut current = json;
    for part in key.split('.') {
        let next = match part.parse::<usize>() {
            Ok(index) if current.is_array() => current.get(index),
            _ => current.get(part),
        };
        current = next.ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    }
    Ok(current)
}

fn check_config(path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load(path.as_deref())?;
    let projector = RowProjector::new(&config.output)?;

    let unaccepted: Vec<&str> = projector
        .column_names()
        .filter(|c| !config.sink.accepted_columns.iter().any(|a| a == c))
        .collect();

    println!(
        "{} {} slots, {} output columns",
        style("✓").green(),
        config.output.column_count,
        projector.column_names().count()
    );
    if !unaccepted.is_empty() {
        println!(
            "{} Dropped by the sink: {}",
            style("!").yellow(),
            unaccepted.join(", ")
        );
    }

    Ok(())
}

fn show_path(explicit: Option<PathBuf>) -> anyhow::Result<()> {
    let config_path = explicit.unwrap_or_else(default_config_path);

    println!("Configuration file: {}", config_path.display());

    if config_path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'tender config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_nested_keys() {
        let json = serde_json::to_value(TenderConfig::default()).unwrap();

        assert_eq!(lookup(&json, "output.columnCount").unwrap(), &serde_json::json!(15));
        assert_eq!(
            lookup(&json, "output.format.0.sql_column_name").unwrap(),
            &serde_json::json!("vendor_name")
        );
        assert!(lookup(&json, "output.nope").is_err());
    }

    #[test]
    fn test_named_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");

        assert!(load(Some(missing.as_path())).is_err());
        assert!(check_config(Some(missing)).is_err());
    }

    #[test]
    fn test_named_config_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"columnCount": 3, "format": [{"id": 1, "sql_column_name": "a"}]}"#)
            .unwrap();

        let config = load(Some(path.as_path())).unwrap();
        assert_eq!(config.output.column_count, 3);
        assert!(check_config(Some(path)).is_ok());
    }
}
