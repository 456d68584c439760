//! Configuration management

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_REPORT_INTERVAL_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_URL,
};
use crate::types::IdeType;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Collector base URL used when the settings store has no override.
    pub server_url: String,
    pub report_interval_seconds: u64,
    pub request_timeout_seconds: u64,
    /// Location of the persisted settings file. `None` means the per-user
    /// default under the home directory.
    pub settings_path: Option<PathBuf>,
    /// Keep the API key in the OS keychain instead of the settings file.
    pub use_keychain: bool,
    pub ide_type: IdeType,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Config {
    /// Reporting cadence, never shorter than one second.
    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_seconds.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            report_interval_seconds: DEFAULT_REPORT_INTERVAL_SECS,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
            settings_path: None,
            use_keychain: false,
            ide_type: IdeType::VsCode,
            log_filter: "info".to_string(),
        }
    }
}
