//! Wallet service configuration with TOML file support.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// Configuration for the wallet service.
///
/// Can be loaded from a TOML file via [`WalletConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so
/// an empty file is a valid configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Directory holding the hand-off files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Settlement slot path. Defaults to `<data_dir>/dag_txn.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_file: Option<PathBuf>,

    /// Quota spend-log path. Defaults to `<data_dir>/token_spends.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_log_file: Option<PathBuf>,

    /// Daily token allowance per user.
    #[serde(default = "default_daily_quota")]
    pub daily_quota: u64,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./aureus_data")
}

fn default_daily_quota() -> u64 {
    aureus_quota::DAILY_QUOTA
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl WalletConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, WalletError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WalletError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, WalletError> {
        toml::from_str(s).map_err(|e| WalletError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("WalletConfig is always serializable to TOML")
    }

    /// Resolved settlement slot path.
    pub fn bridge_path(&self) -> PathBuf {
        self.bridge_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("dag_txn.json"))
    }

    /// Resolved quota spend-log path.
    pub fn quota_log_path(&self) -> PathBuf {
        self.quota_log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("token_spends.json"))
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            bridge_file: None,
            quota_log_file: None,
            daily_quota: default_daily_quota(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}
