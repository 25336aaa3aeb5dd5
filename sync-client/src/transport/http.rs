//! HTTP transport over the REST resource.
//!
//! One request per call, one JSON body per response. No retries, no caching.

use super::{ClientError, Transport};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use sync_types::{Entity, EntityId, FetchError, Page, PageNumber};

/// Base URL of the public character API.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Configuration for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// API root; resource paths are appended to it.
    pub base_url: String,
    /// Maximum time to establish a connection.
    pub connect_timeout: Duration,
}

impl HttpConfig {
    /// Create a configuration for the given API root.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Transport that issues `GET` requests with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from configuration.
    pub fn new(config: HttpConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidConfig(format!(
                "base url must start with http:// or https://, got {:?}",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("pagesync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// The API root requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn page_url(&self, page: PageNumber) -> String {
        format!("{}/character?page={}", self.base_url, page)
    }

    fn entity_url(&self, id: EntityId) -> String {
        format!("{}/character/{}", self.base_url, id)
    }

    async fn get_json<D: DeserializeOwned>(&self, url: &str) -> Result<D, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("GET {} -> {}", url, status);
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(e.to_string()))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_page(&self, page: PageNumber) -> Result<Page<Entity>, FetchError> {
        self.get_json(&self.page_url(page)).await
    }

    async fn fetch_entity(&self, id: EntityId) -> Result<Entity, FetchError> {
        self.get_json(&self.entity_url(id)).await
    }
}
