//! CLI configuration with TOML file support.

use govtally_tally::PowerMode;
use govtally_types::Network;
use govtally_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Endpoints and defaults for the `govtally` commands.
///
/// Loaded from a TOML file via [`StatsConfig::from_toml_file`]; CLI flags
/// override individual fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default = "default_network")]
    pub network: Network,

    /// Base URL of the node's REST sidecar.
    #[serde(default = "default_sidecar_url")]
    pub sidecar_url: String,

    /// Indexer base URL. Defaults to the network's public indexer host.
    #[serde(default)]
    pub indexer_url: Option<String>,

    #[serde(default)]
    pub indexer_api_key: Option<String>,

    /// Base URL of the governance API (vote lists, counts, tips).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub power_mode: PowerMode,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_network() -> Network {
    Network::Polkadot
}

fn default_sidecar_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_api_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl StatsConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn indexer_url(&self) -> String {
        self.indexer_url
            .clone()
            .unwrap_or_else(|| self.network.indexer_url())
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            sidecar_url: default_sidecar_url(),
            indexer_url: None,
            indexer_api_key: None,
            api_url: default_api_url(),
            power_mode: PowerMode::default(),
            timeout_secs: default_timeout_secs(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = StatsConfig::default();
        let toml_str = config.to_toml_string().expect("serializable");
        let parsed = StatsConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = StatsConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.network, Network::Polkadot);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.power_mode, PowerMode::Exact);
        assert_eq!(config.log_format, LogFormat::Human);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            network = "picasso"
            power_mode = "display_rounded"
            log_format = "json"
            indexer_api_key = "secret"
        "#;
        let config = StatsConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.network, Network::Picasso);
        assert_eq!(config.power_mode, PowerMode::DisplayRounded);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.indexer_api_key.as_deref(), Some("secret"));
        assert_eq!(config.indexer_url(), "https://picasso.api.subscan.io");
    }

    #[test]
    fn unknown_network_is_rejected() {
        let result = StatsConfig::from_toml_str(r#"network = "ethereum""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "sidecar_url = \"http://node:8080\"").unwrap();
        writeln!(file, "timeout_secs = 3").unwrap();

        let config = StatsConfig::from_toml_file(file.path()).expect("should load");
        assert_eq!(config.sidecar_url, "http://node:8080");
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn missing_file_returns_read_error() {
        let result = StatsConfig::from_toml_file(Path::new("/nonexistent/govtally.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
