//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/issuelens/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/issuelens/` (~/.config/issuelens/)
//! - Data: `$XDG_DATA_HOME/issuelens/` (~/.local/share/issuelens/)
//! - State/Logs: `$XDG_STATE_HOME/issuelens/` (~/.local/state/issuelens/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Analysis configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Export source configuration
    #[serde(default)]
    pub source: SourceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analysis configuration
#[derive(Debug, Deserialize, Default)]
pub struct AnalysisConfig {
    /// Restrict the time-to-close aggregation to issues carrying this label.
    /// Read once at analyzer construction; other views are unaffected.
    pub label: Option<String>,
}

/// Export source configuration
#[derive(Debug, Deserialize, Default)]
pub struct SourceConfig {
    /// Directory scanned for tracker export files when no --input is given.
    /// Defaults to the XDG data directory.
    pub exports_dir: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/issuelens/config.toml` (~/.config/issuelens/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("issuelens").join("config.toml")
    }

    /// Returns the default directory scanned for tracker exports
    ///
    /// `$XDG_DATA_HOME/issuelens/` (~/.local/share/issuelens/), unless
    /// overridden by `[source] exports_dir`.
    pub fn exports_dir(&self) -> PathBuf {
        self.source
            .exports_dir
            .clone()
            .unwrap_or_else(|| xdg_data_home().join("issuelens"))
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/issuelens/` (~/.local/state/issuelens/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("issuelens")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/issuelens/issuelens.log` (~/.local/state/issuelens/issuelens.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("issuelens.log")
    }

    /// Ensure XDG base directory environment variables are set.
    ///
    /// This is mainly for CLI binaries that want explicit, stable path behavior
    /// before invoking other components that read these env vars.
    pub fn ensure_xdg_env() {
        let home = home_dir();

        if std::env::var("XDG_DATA_HOME").is_err() {
            std::env::set_var("XDG_DATA_HOME", home.join(".local/share"));
        }

        if std::env::var("XDG_STATE_HOME").is_err() {
            std::env::set_var("XDG_STATE_HOME", home.join(".local/state"));
        }

        if std::env::var("XDG_CONFIG_HOME").is_err() {
            std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analysis.label.is_none());
        assert!(config.source.exports_dir.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.max_files, 5);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analysis]
label = "ui"

[source]
exports_dir = "/srv/tracker/exports"

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.analysis.label.as_deref(), Some("ui"));
        assert_eq!(
            config.exports_dir(),
            PathBuf::from("/srv/tracker/exports")
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_label_filter_absent_by_default() {
        let config: Config = toml::from_str("[logging]\nlevel = \"warn\"\n").unwrap();
        assert!(config.analysis.label.is_none());
    }
}
