//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod dispatch;
pub mod process;

use std::path::Path;

use tender_core::TenderConfig;

/// Load the configuration file if one was given, defaults otherwise.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TenderConfig> {
    let config = match config_path {
        Some(path) => TenderConfig::from_file(Path::new(path))?,
        None => TenderConfig::default(),
    };
    Ok(config)
}
