//! TimezoneDB HTTP client behind the [`ZoneSource`] contract.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tokio::runtime::Runtime;
use tracing::debug;
use tzsync_core::pacer::Pacer;
use tzsync_core::source::check_body;
use tzsync_core::{Endpoint, FetchError, SyncConfig, ZoneSource};
use url::Url;

pub struct HttpZoneSource {
    client: Client,
    rt: Runtime,
    base_url: String,
    credential: String,
    pacer: Pacer,
}

impl HttpZoneSource {
    pub fn new(config: &SyncConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tzsync/", env!("CARGO_PKG_VERSION")))
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .build()
            .context("building HTTP client")?;
        Self::with_client(config, client)
    }

    pub fn with_client(config: &SyncConfig, client: Client) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("starting HTTP runtime")?;
        Ok(HttpZoneSource {
            client,
            rt,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            credential: config.credential.clone(),
            pacer: Pacer::from_millis(config.min_request_interval_ms),
        })
    }

    /// Full request URL with the credential and JSON format injected.
    pub fn endpoint_url(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<Url, FetchError> {
        let raw = format!("{}/{}", self.base_url, endpoint.path());
        let mut url = Url::parse(&raw)
            .map_err(|e| FetchError::Transport { endpoint, reason: format!("bad url {raw}: {e}") })?;
        {
            let mut q = url.query_pairs_mut();
            for (k, v) in params {
                q.append_pair(k, v);
            }
            q.append_pair("key", &self.credential);
            q.append_pair("format", "json");
        }
        Ok(url)
    }

    async fn get(&self, endpoint: Endpoint, url: Url) -> Result<Value, FetchError> {
        self.pacer.acquire().await;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport { endpoint, reason: e.to_string() })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { endpoint, status: status.as_u16() });
        }
        let body: Value = resp
            .json()
            .await
            .map_err(|e| FetchError::Decode { endpoint, reason: e.to_string() })?;
        check_body(endpoint, body)
    }
}

impl ZoneSource for HttpZoneSource {
    fn fetch(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<Value, FetchError> {
        let result = self
            .endpoint_url(endpoint, params)
            .and_then(|url| self.rt.block_on(self.get(endpoint, url)));
        match &result {
            Ok(_) => debug!(%endpoint, "fetched"),
            Err(e) => debug!(%endpoint, "fetch failed: {e}"),
        }
        result
    }
}
