//! CLI subcommands.

pub mod batch;
pub mod calc;
pub mod config;
pub mod gstin;
pub mod profit;
pub mod words;

use std::path::Path;

use tracing::debug;

use gstr_core::models::config::GstrConfig;

/// Load the configuration from an explicit path, the default location, or
/// built-in defaults, in that order.
pub fn load_config(path: Option<&str>) -> anyhow::Result<GstrConfig> {
    if let Some(path) = path {
        debug!("Loading config from {}", path);
        return Ok(GstrConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(GstrConfig::from_file(&default_path)?)
    } else {
        Ok(GstrConfig::default())
    }
}
