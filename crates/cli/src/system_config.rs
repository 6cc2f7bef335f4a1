//! System configuration file
//!
//! Lives at `<config dir>/fieldcheck/config.toml`, or wherever
//! `FIELDCHECK_CONFIG` points. A missing file means defaults.

use anyhow::{Context, Result};
use check_core::ControllerConfig;
use remote::RemoteConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "FIELDCHECK_CONFIG";

/// Everything the CLI reads from the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub controller: ControllerConfig,
    pub remote: RemoteConfig,
}

impl SystemConfig {
    pub fn validate(&self) -> Result<()> {
        self.controller.validate()?;

        if self.remote.base_url.trim().is_empty() {
            anyhow::bail!("remote.base_url must not be empty");
        }
        if self.remote.timeout_ms == Some(0) {
            anyhow::bail!("remote.timeout_ms must be positive (remove it to disable the timeout)");
        }

        Ok(())
    }
}

/// Path of the config file
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("fieldcheck").join("config.toml"))
}

/// Load configuration, falling back to defaults when no file exists
pub fn load() -> Result<SystemConfig> {
    let Some(path) = config_file_path() else {
        return Ok(SystemConfig::default());
    };
    if !path.exists() {
        return Ok(SystemConfig::default());
    }

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: SystemConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    Ok(config)
}

/// Write configuration to the config file
pub fn save(config: &SystemConfig) -> Result<()> {
    let path = config_file_path().context("Could not determine config file path")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(&path, text)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;

    Ok(())
}

/// Create the config file with defaults if it does not exist yet
pub fn init_if_missing() -> Result<PathBuf> {
    let path = config_file_path().context("Could not determine config file path")?;
    if !path.exists() {
        save(&SystemConfig::default())?;
    }
    Ok(path)
}

/// Annotated example configuration
pub fn example_config() -> String {
    let defaults = SystemConfig::default();
    let markers = &defaults.controller.markers;

    format!(
        r#"# fieldcheck configuration

[controller]
# Quiet period after the last keystroke before a check is sent (0-60000)
delay_ms = {delay_ms}
# Abort a dispatched check as soon as its value is superseded
abort_in_flight = {abort}

[controller.markers]
# Reply substring meaning "free to use"
available = "{available}"
# Reply substring meaning "already taken"
taken = "{taken}"
# Shown when a reply matches neither marker and is empty
unknown_message = "{unknown}"
# Shown when a failed check carries no message
failure_message = "{failure}"

[remote]
base_url = "{base_url}"
# Per-request timeout; without it a hung backend keeps the field loading
# timeout_ms = 5000
"#,
        delay_ms = defaults.controller.delay_ms,
        abort = defaults.controller.abort_in_flight,
        available = markers.available,
        taken = markers.taken,
        unknown = markers.unknown_message,
        failure = markers.failure_message,
        base_url = defaults.remote.base_url,
    )
}
