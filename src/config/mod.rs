//! User-level configuration loaded from `~/.almoner/config.toml`.
//!
//! The file is optional; a missing file, or any missing section or
//! field, falls back to its default. Each section bridges into the
//! subsystem it configures, so callers go TOML -> [`AppConfig`] ->
//! subsystem config without re-reading anything.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::CacheConfig;
use crate::logging::{parse_rotation, LogConfig};
use crate::mail::MailComposer;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid freshness window `{value}`: {source}")]
    Freshness {
        value: String,
        source: humantime::DurationError,
    },
}

fn default_freshness() -> String {
    "5m".to_string()
}

const fn default_max_entries() -> u64 {
    256
}

fn default_from_address() -> String {
    "no-reply@localhost".to_string()
}

fn default_org_name() -> String {
    "Charity Fund".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

/// Result cache settings (`[cache]` section).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CacheSection {
    /// Freshness window in humantime form, e.g. `"5m"` or `"90s"`.
    #[serde(default = "default_freshness")]
    pub freshness: String,
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            freshness: default_freshness(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheSection {
    /// Bridge into the cache's own config type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Freshness`] when the window does not parse
    /// as a duration.
    pub fn cache_config(&self) -> Result<CacheConfig, ConfigError> {
        let freshness =
            humantime::parse_duration(&self.freshness).map_err(|source| ConfigError::Freshness {
                value: self.freshness.clone(),
                source,
            })?;
        Ok(CacheConfig {
            freshness,
            max_entries: self.max_entries,
        })
    }
}

/// Sender identity stamped onto outgoing mail (`[mail]` section).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MailSection {
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Organization name shown in template headers and subjects.
    #[serde(default = "default_org_name")]
    pub org_name: String,
}

impl Default for MailSection {
    fn default() -> Self {
        Self {
            from_address: default_from_address(),
            org_name: default_org_name(),
        }
    }
}

impl MailSection {
    #[must_use]
    pub fn composer(&self) -> MailComposer {
        MailComposer::new(self.from_address.clone(), self.org_name.clone())
    }
}

/// Logging settings (`[log]` section).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// Default level when `RUST_LOG` is not set: trace, debug, info, warn
    /// or error.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON-formatted lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
    /// Rotation period: daily, hourly, or never.
    #[serde(default = "default_rotation")]
    pub rotation: String,
    /// Log directory override; defaults to `~/.almoner/logs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            rotation: default_rotation(),
            dir: None,
        }
    }
}

impl LogSection {
    /// Bridge into the logging stack's config. Unrecognized levels fall
    /// back to `info`.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        let mut config = LogConfig::default();
        if let Some(dir) = &self.dir {
            config.log_dir.clone_from(dir);
        }
        config.log_level = self.level.parse().unwrap_or(tracing::Level::INFO);
        config.json_format = self.json;
        config.rotation = parse_rotation(&self.rotation);
        config
    }
}

/// Top-level configuration, deserialized from `~/.almoner/config.toml`.
///
/// All sections are optional at the TOML level; missing sections resolve
/// to their `Default` values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub mail: MailSection,
    #[serde(default)]
    pub log: LogSection,
}

/// Resolve the canonical path for the config file (`~/.almoner/config.toml`).
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".almoner").join("config.toml"))
}

/// Load the configuration from `~/.almoner/config.toml`.
///
/// Returns `Ok(AppConfig::default())` if the file does not exist so
/// callers never need to handle the absent-file case specially.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("could not determine home directory; using default config");
        return Ok(AppConfig::default());
    };
    load_config_from(&path)
}

/// Load the configuration from an explicit path, an absent file meaning
/// defaults. Split out from [`load_config`] so tests can point it at a
/// temp directory.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        debug!("config not found at {}; using defaults", path.display());
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    debug!("loaded config from {}", path.display());
    Ok(config)
}
