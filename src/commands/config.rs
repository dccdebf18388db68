//! Configuration commands.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print one value
//! - `config set`: Set a configuration value

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::{CONFIG_KEYS, Config};
use crate::error::Result;

/// Show current configuration
pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;

    let mut values = serde_json::Map::new();
    let mut text = format!("{}\n", "Configuration:".cyan().bold());
    for key in CONFIG_KEYS {
        let value = config.get(key)?;
        let shown = if value.is_empty() {
            "(not set)".dimmed().to_string()
        } else {
            value.clone()
        };
        text.push_str(&format!("  {}: {}\n", key.cyan(), shown));
        values.insert(key.to_string(), json!(value));
    }
    let path = Config::config_path();
    text.push_str(&format!("\n{} {}", "Config file:".dimmed(), path.display()));
    values.insert("config_file".to_string(), json!(path.to_string_lossy()));

    CommandOutput::new(serde_json::Value::Object(values))
        .with_text(text)
        .print(output_json)
}

/// Print one configuration value
pub fn cmd_config_get(key: &str, output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let value = config.get(key)?;

    CommandOutput::new(json!({ "key": key, "value": value }))
        .with_text(value)
        .print(output_json)
}

/// Set a configuration value and save it
pub fn cmd_config_set(key: &str, value: &str, output_json: bool) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    let stored = config.get(key)?;

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": stored,
    }))
    .with_text(format!("Set {} = {}", key.cyan(), stored))
    .print(output_json)
}
