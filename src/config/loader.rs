//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::style::StyleName;
use crate::tracker::{TrackerOptions, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PEEKLOG_CONFIG";
/// Environment variable overriding the verbosity threshold.
pub const VERBOSITY_ENV: &str = "PEEKLOG_VERBOSITY";
/// Environment variable overriding the decoration style.
pub const STYLE_ENV: &str = "PEEKLOG_STYLE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/peeklog/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Verbosity threshold; negative silences everything.
    #[serde(default)]
    pub verbosity: Option<i32>,

    /// Deepest tracked nesting level.
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Decoration style (`minimal` or `renaissance`).
    #[serde(default)]
    pub style: Option<StyleName>,

    /// Accumulate per-header timing history.
    #[serde(default)]
    pub history: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Verbosity threshold.
    pub verbosity: i32,
    /// Maximum nesting depth.
    pub max_depth: usize,
    /// Decoration style.
    pub style: StyleName,
    /// Timing history enabled.
    pub history: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            style: StyleName::Minimal,
            history: false,
            log_file_path: default_log_path(),
        }
    }
}

impl From<&ResolvedConfig> for TrackerOptions {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            verbosity: config.verbosity,
            max_depth: config.max_depth,
            style: config.style,
            history: config.history,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/peeklog/peeklog.log` on Linux, or the platform equivalent.
/// Falls back to the current directory when no state directory exists (macOS, Windows).
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("peeklog").join("peeklog.log")
    } else {
        PathBuf::from("peeklog.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
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

/// Resolve default config file path.
///
/// Returns `~/.config/peeklog/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("peeklog").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PEEKLOG_CONFIG` environment variable
/// 3. Default path `~/.config/peeklog/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// A `max_depth` outside `1..=MAX_DEPTH_LIMIT` is clamped into that range.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        verbosity: config.verbosity.unwrap_or(defaults.verbosity),
        max_depth: config
            .max_depth
            .map_or(defaults.max_depth, clamp_max_depth),
        style: config.style.unwrap_or(defaults.style),
        history: config.history.unwrap_or(defaults.history),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

fn clamp_max_depth(max_depth: usize) -> usize {
    let clamped = max_depth.clamp(1, MAX_DEPTH_LIMIT);
    if clamped != max_depth {
        tracing::warn!(
            max_depth,
            limit = MAX_DEPTH_LIMIT,
            "config max_depth out of range; using {clamped}"
        );
    }
    clamped
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PEEKLOG_VERBOSITY`: integer threshold
/// - `PEEKLOG_STYLE`: style name
///
/// Values that fail to parse are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(VERBOSITY_ENV) {
        match raw.trim().parse::<i32>() {
            Ok(verbosity) => config.verbosity = verbosity,
            Err(err) => tracing::warn!(value = %raw, %err, "ignoring {VERBOSITY_ENV}"),
        }
    }

    if let Ok(raw) = std::env::var(STYLE_ENV) {
        match raw.parse::<StyleName>() {
            Ok(style) => config.style = style,
            Err(err) => tracing::warn!(%err, "ignoring {STYLE_ENV}"),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    verbosity_override: Option<i32>,
    style_override: Option<StyleName>,
    max_depth_override: Option<usize>,
    history_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(verbosity) = verbosity_override {
        config.verbosity = verbosity;
    }

    if let Some(style) = style_override {
        config.style = style;
    }

    if let Some(max_depth) = max_depth_override {
        config.max_depth = max_depth;
    }

    if let Some(history) = history_override {
        config.history = history;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

#[cfg(test)]
mod log_path_tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_peeklog_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("peeklog.log"),
            "Default log path should end with 'peeklog.log', got: {:?}",
            path
        );
    }

    #[test]
    fn config_file_log_path_overrides_default() {
        let custom_path = PathBuf::from("/custom/path/to/app.log");
        let config_file = ConfigFile {
            log_file_path: Some(custom_path.clone()),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file));
        assert_eq!(
            resolved.log_file_path, custom_path,
            "Config file log_file_path should override default"
        );
    }

    #[test]
    fn missing_config_file_log_path_uses_default() {
        let resolved = merge_config(Some(ConfigFile::default()));
        assert_eq!(
            resolved.log_file_path,
            default_log_path(),
            "Missing log_file_path in config should use default"
        );
    }
}
