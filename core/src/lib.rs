//! Core types and shared contracts for the timezone sync job.

pub mod config;
pub mod pacer;
pub mod source;

pub use config::{ConfigError, SyncConfig};
pub use source::{list_zones, zone_detail, Endpoint, FetchError, ZoneSource};

use serde::{Deserialize, Serialize};

pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Natural key of a zone: the provider's zone name plus its country code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneKey {
    pub zone_name: String,
    pub country_code: String,
}

impl ZoneKey {
    pub fn new(zone_name: impl Into<String>, country_code: impl Into<String>) -> Self {
        ZoneKey { zone_name: zone_name.into(), country_code: country_code.into() }
    }
}

impl std::fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.zone_name, self.country_code)
    }
}

/// Enrichment record returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDetail {
    pub zone_name: String,
    pub country_name: String,
    pub country_code: String,
}

impl ZoneDetail {
    pub fn key(&self) -> ZoneKey {
        ZoneKey::new(self.zone_name.clone(), self.country_code.clone())
    }
}
