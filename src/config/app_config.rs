use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::errors::{GhKeyError, Result};
use crate::core::models::host::{normalize_hostname, DEFAULT_HOSTNAME};

/// Top-level ghkey configuration read from `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Host used when `--hostname` / `GH_HOST` is not given.
    pub default_host: Option<String>,
    #[serde(default)]
    pub hosts: HashMap<String, HostEntry>,
}

impl AppConfig {
    /// Default location: `<config_dir>/ghkey/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ghkey").join("config.toml"))
    }

    /// Load the configuration from `path`.
    ///
    /// A missing file yields the defaults. API URL overrides are validated
    /// so a typo fails here instead of at request time.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| GhKeyError::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", path.display()),
        })?;

        for (name, entry) in &config.hosts {
            if let Some(url) = &entry.api_url {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(GhKeyError::InvalidConfig {
                        detail: format!(
                            "api_url for host '{name}' must start with http:// or https://, got '{url}'"
                        ),
                    });
                }
            }
        }

        Ok(config)
    }

    /// Pick the target host: explicit choice, then `default_host`, then github.com.
    pub fn resolve_hostname(&self, explicit: Option<&str>) -> String {
        let host = explicit
            .or(self.default_host.as_deref())
            .unwrap_or(DEFAULT_HOSTNAME);
        normalize_hostname(host)
    }

    /// Settings for `hostname`, matched after normalization.
    pub fn host(&self, hostname: &str) -> Option<&HostEntry> {
        let wanted = normalize_hostname(hostname);
        self.hosts
            .iter()
            .find(|(name, _)| normalize_hostname(name) == wanted)
            .map(|(_, entry)| entry)
    }
}

/// A `[hosts."<name>"]` entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostEntry {
    pub token: Option<String>,
    /// Replaces the REST API base URL derived from the hostname.
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl HostEntry {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
