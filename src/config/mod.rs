//! Configuration loading with precedence handling.
//!
//! Precedence, lowest to highest: built-in defaults, TOML config file,
//! environment variables, CLI flags. A missing config file is not an
//! error; a present-but-broken one is.

use crate::state::RenderMode;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read a config file that exists.
    #[error("failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML.
    #[error("invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A render mode name that is not one of the four known modes.
    #[error("unknown render mode {name:?} (expected millis, hex, plain or source)")]
    UnknownRenderMode {
        /// The rejected name.
        name: String,
    },

    /// A numeric value that cannot be used.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// The config field concerned.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; unset fields fall back to the defaults.
/// Corresponds to `~/.config/busmon/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Stream poll interval in milliseconds.
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,

    /// Auto-scroll enabled at startup.
    #[serde(default)]
    pub auto_scroll: Option<bool>,

    /// Capture render mode at startup ("millis", "hex", "plain", "source").
    #[serde(default)]
    pub render_mode: Option<String>,

    /// Path the tracing output is written to.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Path the notepad buffer is saved to.
    #[serde(default)]
    pub notepad_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Stream poll interval in milliseconds.
    pub poll_interval_ms: u64,
    /// Auto-scroll enabled at startup.
    pub auto_scroll: bool,
    /// Capture render mode at startup.
    pub render_mode: RenderMode,
    /// Path the tracing output is written to.
    pub log_file_path: PathBuf,
    /// Path the notepad buffer is saved to.
    pub notepad_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            // The sniffer timer rate the monitor was tuned for.
            poll_interval_ms: 50,
            auto_scroll: true,
            render_mode: RenderMode::Plain,
            log_file_path: default_log_path(),
            notepad_path: PathBuf::from("busmon-notepad.txt"),
        }
    }
}

/// Resolve the default log file path.
///
/// `~/.local/state/busmon/busmon.log` on Unix-like systems, the platform
/// equivalent elsewhere, falling back to the current directory when no
/// state directory can be determined.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("busmon").join("busmon.log")
    } else {
        PathBuf::from("busmon.log")
    }
}

/// Resolve the default config file path, `~/.config/busmon/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("busmon").join("config.toml"))
}

/// Load a config file from a specific path.
///
/// Returns `Ok(None)` when the file doesn't exist.
///
/// # Errors
///
/// Returns an error only when the file exists but cannot be read or
/// parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with path precedence.
///
/// Highest to lowest: explicit path argument (CLI `--config`), the
/// `BUSMON_CONFIG` environment variable, the default path.
///
/// # Errors
///
/// Only when a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("BUSMON_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge a loaded config file into the defaults.
///
/// # Errors
///
/// [`ConfigError::UnknownRenderMode`] for a render mode name that is not
/// one of the four modes, [`ConfigError::InvalidValue`] for a zero poll
/// interval.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let render_mode = match config.render_mode {
        Some(name) => {
            RenderMode::from_name(&name).ok_or(ConfigError::UnknownRenderMode { name })?
        }
        None => defaults.render_mode,
    };

    let poll_interval_ms = config.poll_interval_ms.unwrap_or(defaults.poll_interval_ms);
    if poll_interval_ms == 0 {
        return Err(ConfigError::InvalidValue {
            field: "poll_interval_ms",
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(ResolvedConfig {
        poll_interval_ms,
        auto_scroll: config.auto_scroll.unwrap_or(defaults.auto_scroll),
        render_mode,
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        notepad_path: config.notepad_path.unwrap_or(defaults.notepad_path),
    })
}

/// Apply environment variable overrides.
///
/// `BUSMON_POLL_MS` overrides the poll interval; an unparsable value is
/// ignored rather than fatal.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(value) = std::env::var("BUSMON_POLL_MS") {
        if let Ok(ms) = value.parse::<u64>() {
            if ms > 0 {
                config.poll_interval_ms = ms;
            }
        }
    }

    config
}

/// Apply CLI argument overrides (highest precedence).
///
/// # Errors
///
/// [`ConfigError::UnknownRenderMode`] when `--render-mode` names an
/// unknown mode (clap normally rejects this first).
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    poll_ms: Option<u64>,
    render_mode: Option<String>,
    notepad: Option<PathBuf>,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(ms) = poll_ms {
        config.poll_interval_ms = ms.max(1);
    }

    if let Some(name) = render_mode {
        config.render_mode =
            RenderMode::from_name(&name).ok_or(ConfigError::UnknownRenderMode { name })?;
    }

    if let Some(path) = notepad {
        config.notepad_path = path;
    }

    Ok(config)
}
