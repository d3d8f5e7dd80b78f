//! Handler functions for config CLI commands.
//!
//! Also provides the TOML dotted-key helpers used by `config get`.

use std::path::PathBuf;

use sprintsheet_core::config::PROJECT_NAME;
use sprintsheet_core::{Config, Error, Result};

use crate::cli::ConfigAction;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => {
            println!("{}", cmd_config_get(config_path, &key)?);
            Ok(())
        }
        ConfigAction::Init { file, force } => {
            let path = cmd_config_init(file.as_deref().or(config_path), force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
        ConfigAction::Show => {
            print!("{}", cmd_config_show(config_path)?);
            Ok(())
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    match Config::resolver().config_file(config_path) {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(file does not exist, run `{PROJECT_NAME} config init` to create it)");
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Look up a configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = Config::load_unvalidated(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Write a default configuration file, returning its path.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => Config::resolver()
            .default_config_file()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Config::default().to_toml_string()?)?;
    Ok(path)
}

/// Effective configuration (file plus environment) as TOML.
pub fn cmd_config_show(config_path: Option<&str>) -> Result<String> {
    Config::load_unvalidated(config_path)?.to_toml_string()
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    let mut current = value;
    for part in key.split('.') {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
