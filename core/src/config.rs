use std::path::PathBuf;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.timezonedb.com/v2.1";
pub const DEFAULT_STORE_PATH: &str = "timezone_data.db";
pub const DEFAULT_ERROR_LOG: &str = "error.log";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing API credential (set --key, TZDB_API_KEY or `credential` in the config file)")]
    MissingCredential,
    #[error("base URL must not be empty")]
    EmptyBaseUrl,
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Resolved settings handed to every component at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub credential: String,
    pub store_path: PathBuf,
    pub base_url: String,
    /// Side-channel log file that receives API failures.
    pub error_log: PathBuf,
    /// Minimum spacing between outbound calls; 0 disables pacing.
    pub min_request_interval_ms: u64,
    /// Also append skipped fetch failures to the store's error relation.
    pub audit_errors_in_store: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            credential: String::new(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            base_url: DEFAULT_BASE_URL.to_string(),
            error_log: PathBuf::from(DEFAULT_ERROR_LOG),
            min_request_interval_ms: 0,
            audit_errors_in_store: false,
        }
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.credential.trim().is_empty() {
            return Err(ConfigError::MissingCredential);
        }
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        Url::parse(base).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}
