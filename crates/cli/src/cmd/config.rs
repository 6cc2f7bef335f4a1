//! Configuration management command
//!
//! Provides CLI interface to view and edit the fieldcheck configuration.

use crate::system_config::{self, SystemConfig};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

/// Every key accepted by `get` and `set`
pub const KEYS: &[&str] = &[
    "controller.delay_ms",
    "controller.abort_in_flight",
    "controller.markers.available",
    "controller.markers.taken",
    "controller.markers.unknown_message",
    "controller.markers.failure_message",
    "remote.base_url",
    "remote.timeout_ms",
];

/// List all configuration values
pub async fn run_list() -> Result<()> {
    let config = system_config::load()?;
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    println!("{}", "Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    println!("{}", "[controller]".yellow());
    println!(
        "  {} = {} {}",
        "delay_ms".cyan(),
        config.controller.delay_ms,
        format!("({:?})", config.controller.delay()).dimmed()
    );
    println!(
        "  {} = {}",
        "abort_in_flight".cyan(),
        config.controller.abort_in_flight
    );

    println!("\n{}", "[controller.markers]".yellow());
    let markers = &config.controller.markers;
    println!("  {} = {:?}", "available".cyan(), markers.available);
    println!("  {} = {:?}", "taken".cyan(), markers.taken);
    println!("  {} = {:?}", "unknown_message".cyan(), markers.unknown_message);
    println!("  {} = {:?}", "failure_message".cyan(), markers.failure_message);

    println!("\n{}", "[remote]".yellow());
    println!("  {} = {}", "base_url".cyan(), config.remote.base_url);
    println!(
        "  {} = {}",
        "timeout_ms".cyan(),
        match config.remote.timeout_ms {
            Some(ms) => ms.to_string(),
            None => "(none)".dimmed().to_string(),
        }
    );

    println!("\n{}", "Valid Ranges:".bold());
    println!("  delay_ms: 0-60,000");
    println!("  timeout_ms: 1 or more, \"none\" to disable");
    println!("  markers: non-empty, neither containing the other");

    Ok(())
}

/// Get a single configuration value
pub async fn run_get(key: &str) -> Result<()> {
    let config = system_config::load()?;
    println!("{}", get_value(&config, key)?);
    Ok(())
}

/// Set a configuration value
pub async fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = system_config::load()?;

    set_value(&mut config, key, value)?;

    // Validate before saving
    config.validate().context("Invalid configuration value")?;

    system_config::save(&config)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Show the config file path and optionally create it
pub async fn run_path(create: bool) -> Result<()> {
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    if create && !config_path.exists() {
        system_config::init_if_missing()?;
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else if config_path.exists() {
        println!("{}", config_path.display());
    } else {
        println!("{}", config_path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    println!("{}", system_config::example_config());
    Ok(())
}

fn get_value(config: &SystemConfig, key: &str) -> Result<String> {
    let markers = &config.controller.markers;

    let value = match key {
        "controller.delay_ms" => config.controller.delay_ms.to_string(),
        "controller.abort_in_flight" => config.controller.abort_in_flight.to_string(),
        "controller.markers.available" => markers.available.clone(),
        "controller.markers.taken" => markers.taken.clone(),
        "controller.markers.unknown_message" => markers.unknown_message.clone(),
        "controller.markers.failure_message" => markers.failure_message.clone(),
        "remote.base_url" => config.remote.base_url.clone(),
        "remote.timeout_ms" => config
            .remote
            .timeout_ms
            .map_or_else(|| "none".to_string(), |ms| ms.to_string()),
        _ => anyhow::bail!("Unknown config key: {}. Valid keys: {}", key, KEYS.join(", ")),
    };

    Ok(value)
}

fn set_value(config: &mut SystemConfig, key: &str, value: &str) -> Result<()> {
    let markers = &mut config.controller.markers;

    match key {
        "controller.delay_ms" => {
            config.controller.delay_ms = value
                .parse()
                .context("Invalid value: must be a non-negative integer")?;
        }
        "controller.abort_in_flight" => {
            config.controller.abort_in_flight = value
                .parse()
                .context("Invalid value: must be 'true' or 'false'")?;
        }
        "controller.markers.available" => markers.available = value.to_string(),
        "controller.markers.taken" => markers.taken = value.to_string(),
        "controller.markers.unknown_message" => markers.unknown_message = value.to_string(),
        "controller.markers.failure_message" => markers.failure_message = value.to_string(),
        "remote.base_url" => config.remote.base_url = value.to_string(),
        "remote.timeout_ms" => {
            config.remote.timeout_ms = if value == "none" {
                None
            } else {
                Some(
                    value
                        .parse()
                        .context("Invalid value: must be a positive integer or 'none'")?,
                )
            };
        }
        _ => anyhow::bail!("Unknown config key: {}. Valid keys: {}", key, KEYS.join(", ")),
    }

    Ok(())
}
