//! System configuration for liftsync
//!
//! Stored as TOML, by default at `<config dir>/liftsync/config.toml`.
//! Every key is optional; missing keys take their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Every key `get`/`set` accept
pub const KEYS: [&str; 5] = [
    "server.base_url",
    "server.timeout_secs",
    "debounce.window_ms",
    "logging.level",
    "logging.file",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SystemConfig {
    pub server: ServerConfig,
    pub debounce: DebounceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server the update endpoints live on
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Quiet period after the last edit of a field
    pub window_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self { window_ms: 500 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    pub level: String,
    /// Write logs to this file instead of stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl SystemConfig {
    /// Check every value against its valid range
    pub fn validate(&self) -> Result<()> {
        let url = &self.server.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("server.base_url must start with http:// or https:// (got '{}')", url);
        }
        if !(1..=300).contains(&self.server.timeout_secs) {
            anyhow::bail!(
                "server.timeout_secs must be between 1 and 300 (got {})",
                self.server.timeout_secs
            );
        }
        if !(10..=10_000).contains(&self.debounce.window_ms) {
            anyhow::bail!(
                "debounce.window_ms must be between 10 and 10000 (got {})",
                self.debounce.window_ms
            );
        }
        if !VALID_LEVELS.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "logging.level must be one of {} (got '{}')",
                VALID_LEVELS.join(", "),
                self.logging.level
            );
        }
        Ok(())
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.debounce.window_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs)
    }

    /// Read one key as a string
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "server.base_url" => self.server.base_url.clone(),
            "server.timeout_secs" => self.server.timeout_secs.to_string(),
            "debounce.window_ms" => self.debounce.window_ms.to_string(),
            "logging.level" => self.logging.level.clone(),
            "logging.file" => self
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            _ => anyhow::bail!(
                "Unknown config key: {}. Use 'liftsync config list' to see available keys.",
                key
            ),
        };
        Ok(value)
    }

    /// Set one key from a string, validating the result
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "server.base_url" => self.server.base_url = value.to_string(),
            "server.timeout_secs" => {
                self.server.timeout_secs = value
                    .parse()
                    .context("Invalid value: must be a positive integer")?;
            }
            "debounce.window_ms" => {
                self.debounce.window_ms = value
                    .parse()
                    .context("Invalid value: must be a positive integer")?;
            }
            "logging.level" => self.logging.level = value.to_lowercase(),
            "logging.file" => {
                self.logging.file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => anyhow::bail!(
                "Unknown config key: {}. Use 'liftsync config list' to see available keys.",
                key
            ),
        }

        self.validate().context("Invalid configuration value")
    }
}

/// Default config file location
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("liftsync").join("config.toml"))
}

/// Load config from `path`; a missing file yields the defaults
pub fn load(path: &Path) -> Result<SystemConfig> {
    if !path.exists() {
        return Ok(SystemConfig::default());
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: SystemConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}

/// Write config to `path`, creating parent directories
pub fn save(path: &Path, config: &SystemConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(())
}

/// Write the defaults to `path` unless a file already exists
pub fn init_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save(path, &SystemConfig::default())?;
    Ok(true)
}

/// Commented example file
pub fn example_config() -> &'static str {
    r#"# liftsync configuration

[server]
# Server hosting the /update_curr_workout_* endpoints
base_url = "http://127.0.0.1:5000"
# Request timeout in seconds (1-300)
timeout_secs = 30

[debounce]
# Quiet period after the last edit of a field, in milliseconds (10-10000)
window_ms = 500

[logging]
# trace, debug, info, warn or error; RUST_LOG overrides this
level = "info"
# Uncomment to log to a file instead of stderr
# file = "/tmp/liftsync.log"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = SystemConfig::default();
        config.validate().unwrap();
        assert_eq!(config.window(), Duration::from_millis(500));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_example_parses_to_defaults() {
        let config: SystemConfig = toml::from_str(example_config()).unwrap();
        assert_eq!(config, SystemConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[debounce]\nwindow_ms = 250\n")?;

        let config = load(&path)?;
        assert_eq!(config.debounce.window_ms, 250);
        assert_eq!(config.server, ServerConfig::default());
        Ok(())
    }

    #[test]
    fn test_missing_file_is_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = load(&temp_dir.path().join("absent.toml"))?;
        assert_eq!(config, SystemConfig::default());
        Ok(())
    }

    #[test]
    fn test_invalid_file_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[debounce]\nwindow_ms = 5\n")?;
        assert!(load(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_get_set_roundtrip() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("config.toml");

        assert!(init_if_missing(&path)?);
        assert!(!init_if_missing(&path)?);

        let mut config = load(&path)?;
        config.set("server.base_url", "http://gym.local:8080")?;
        config.set("logging.level", "DEBUG")?;
        save(&path, &config)?;

        let reloaded = load(&path)?;
        assert_eq!(reloaded.get("server.base_url")?, "http://gym.local:8080");
        assert_eq!(reloaded.get("logging.level")?, "debug");
        assert_eq!(reloaded.get("logging.file")?, "");
        for key in KEYS {
            reloaded.get(key)?;
        }
        Ok(())
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = SystemConfig::default();
        assert!(config.set("debounce.window_ms", "fast").is_err());
        assert!(config.set("server.timeout_secs", "0").is_err());
        assert!(config.set("server.base_url", "gym.local").is_err());
        assert!(config.set("logging.level", "loud").is_err());
        assert!(config.set("gc.retain_count", "10").is_err());
    }
}
