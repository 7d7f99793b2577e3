//! Remote Data Source contract.
//!
//! A [`ZoneSource`] answers one question: given an endpoint and its query
//! parameters, return the parsed response body or a [`FetchError`]. Every
//! error here is scoped to a single call; callers skip the affected item and
//! carry on.

use crate::{ZoneDetail, ZoneKey};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ListTimeZone,
    GetTimeZone,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::ListTimeZone => "list-time-zone",
            Endpoint::GetTimeZone => "get-time-zone",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Error accessing API - {status} ({endpoint})")]
    Status { endpoint: Endpoint, status: u16 },
    #[error("{endpoint} reported failure: {message}")]
    Api { endpoint: Endpoint, message: String },
    #[error("request to {endpoint} failed: {reason}")]
    Transport { endpoint: Endpoint, reason: String },
    #[error("unexpected {endpoint} response: {reason}")]
    Decode { endpoint: Endpoint, reason: String },
    #[error("{endpoint} returned no data")]
    Empty { endpoint: Endpoint },
}

impl FetchError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            FetchError::Status { endpoint, .. }
            | FetchError::Api { endpoint, .. }
            | FetchError::Transport { endpoint, .. }
            | FetchError::Decode { endpoint, .. }
            | FetchError::Empty { endpoint } => *endpoint,
        }
    }
}

pub trait ZoneSource {
    fn fetch(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<Value, FetchError>;
}

impl<S: ZoneSource + ?Sized> ZoneSource for &S {
    fn fetch(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<Value, FetchError> {
        (**self).fetch(endpoint, params)
    }
}

/// Reject bodies that are empty or carry the provider's `"status": "FAILED"` marker.
pub fn check_body(endpoint: Endpoint, body: Value) -> Result<Value, FetchError> {
    if body.is_null() {
        return Err(FetchError::Empty { endpoint });
    }
    if body.get("status").and_then(Value::as_str) == Some("FAILED") {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no message")
            .to_string();
        return Err(FetchError::Api { endpoint, message });
    }
    Ok(body)
}

#[derive(Deserialize)]
struct ZoneList {
    zones: Vec<ZoneKey>,
}

/// Fetch the provider's full zone list.
pub fn list_zones<S: ZoneSource + ?Sized>(source: &S) -> Result<Vec<ZoneKey>, FetchError> {
    let endpoint = Endpoint::ListTimeZone;
    let body = check_body(endpoint, source.fetch(endpoint, &[])?)?;
    let list: ZoneList = serde_json::from_value(body)
        .map_err(|e| FetchError::Decode { endpoint, reason: e.to_string() })?;
    Ok(list.zones)
}

/// Fetch detail for one zone/country pair.
pub fn zone_detail<S: ZoneSource + ?Sized>(source: &S, key: &ZoneKey) -> Result<ZoneDetail, FetchError> {
    let endpoint = Endpoint::GetTimeZone;
    let params = [
        ("by", "zone"),
        ("zone", key.zone_name.as_str()),
        ("country", key.country_code.as_str()),
    ];
    let body = check_body(endpoint, source.fetch(endpoint, &params)?)?;
    serde_json::from_value(body).map_err(|e| FetchError::Decode { endpoint, reason: e.to_string() })
}
