//! Configuration structures.
//!
//! Configuration is loaded from an optional JSON file, then overridden by
//! `TOOLHUB_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::errors::{Error, Result};

/// Global toolhub configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Storage backend configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Recent/favorite tracking configuration.
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// Link dispatch configuration.
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl Config {
    /// Load configuration from a JSON file, then apply environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_json::from_str(&raw)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `TOOLHUB_*` environment variable overrides in place.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(backend) = lookup("TOOLHUB_STORAGE_BACKEND") {
            self.storage.backend = match backend.to_ascii_lowercase().as_str() {
                "memory" => StorageBackend::Memory,
                "file" => StorageBackend::File,
                other => {
                    return Err(Error::validation(format!(
                        "unknown storage backend: {}",
                        other
                    )))
                }
            };
        }
        if let Some(path) = lookup("TOOLHUB_STORAGE_PATH") {
            self.storage.path = PathBuf::from(path);
        }
        if let Some(level) = lookup("TOOLHUB_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(limit) = lookup("TOOLHUB_RECENT_LIMIT") {
            self.tracking.recent_limit = limit.parse().map_err(|_| {
                Error::validation(format!("TOOLHUB_RECENT_LIMIT is not a number: {}", limit))
            })?;
        }
        if let Some(locale) = lookup("TOOLHUB_LOCALE") {
            self.tracking.locale = match locale.to_ascii_lowercase().as_str() {
                "en" | "english" => Locale::English,
                "zh" | "chinese" => Locale::Chinese,
                other => return Err(Error::validation(format!("unknown locale: {}", other))),
            };
        }
        if let Some(origin) = lookup("TOOLHUB_ORIGIN") {
            self.dispatch.origin = origin;
        }
        Ok(())
    }
}

/// Which key-value backend persists the tool collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Directory holding one `<key>.json` file per key (file backend only).
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: PathBuf::from(".toolhub"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Label language for relative times and user notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    English,
    Chinese,
}

/// Recent/favorite tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Maximum entries kept in the recent collection.
    pub recent_limit: usize,

    pub locale: Locale,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            recent_limit: 10,
            locale: Locale::English,
        }
    }
}

/// Link dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Browsing context name used when the caller gives none.
    pub default_target: String,

    /// Path prefix identifying in-app hot tool views.
    pub hot_tool_prefix: String,

    /// Origin prepended to root-relative URLs on the open retry.
    pub origin: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            default_target: "_blank".to_string(),
            hot_tool_prefix: "/hot-tools/".to_string(),
            origin: "http://localhost:5173".to_string(),
        }
    }
}
