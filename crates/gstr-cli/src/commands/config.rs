//! Config command - inspect and edit the JSON configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;
use tracing::info;

use gstr_core::models::config::GstrConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value by dotted key (e.g. "tax.seller_jurisdiction")
    Get { key: String },

    /// Change one value by dotted key; the result must still be a valid config
    Set { key: String, value: String },

    /// Show where the configuration file lives
    Path,
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => {
            println!("{}", serde_json::to_string_pretty(&load_or_default(&path)?)?);
        }
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            write_config(&path, &GstrConfig::default())?;
            println!(
                "{} Created configuration file at {}",
                style("✓").green(),
                path.display()
            );
        }
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(load_or_default(&path)?)?;
            let value = lookup(&json, &key)
                .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        ConfigCommand::Set { key, value } => {
            let updated = assign(load_or_default(&path)?, &key, &value)?;
            write_config(&path, &updated)?;
            println!("{} Set {} = {}", style("✓").green(), key, value);
        }
        ConfigCommand::Path => {
            println!("Configuration file: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
                println!("Run 'gstr config init' to create it.");
            }
        }
    }

    Ok(())
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gstr")
        .join("config.json")
}

fn load_or_default(path: &Path) -> anyhow::Result<GstrConfig> {
    if path.exists() {
        Ok(GstrConfig::from_file(path)?)
    } else {
        info!("No config file at {}, using defaults", path.display());
        Ok(GstrConfig::default())
    }
}

fn write_config(path: &Path, config: &GstrConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |current, part| current.get(part))
}

/// Set a dotted key and re-validate. String fields take the raw text;
/// other fields take it as JSON.
fn assign(config: GstrConfig, key: &str, raw: &str) -> anyhow::Result<GstrConfig> {
    let mut json = serde_json::to_value(&config)?;
    let (parent_key, leaf) = match key.rsplit_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, key),
    };

    let mut parent = &mut json;
    if let Some(parent_key) = parent_key {
        for part in parent_key.split('.') {
            parent = parent
                .get_mut(part)
                .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
        }
    }

    let object = parent
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path: {}", key))?;
    let current = object
        .get(leaf)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    let value = match (current, serde_json::from_str::<Value>(raw)) {
        (Value::String(_), Ok(Value::String(s))) => Value::String(s),
        (Value::String(_), _) | (_, Err(_)) => Value::String(raw.to_string()),
        (_, Ok(parsed)) => parsed,
    };
    object.insert(leaf.to_string(), value);

    let updated: GstrConfig = serde_json::from_value(json)?;
    updated.tax_policy()?;
    Ok(updated)
}
