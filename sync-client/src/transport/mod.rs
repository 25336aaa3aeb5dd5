//! Transport abstraction for pagesync.
//!
//! This module provides a pluggable transport layer that abstracts how pages
//! and entities are fetched (HTTP against the REST resource, mock for
//! testing).
//!
//! # Design
//!
//! The transport trait is async and request-oriented:
//! - `fetch_page()` returns one page envelope
//! - `fetch_entity()` returns one entity
//!
//! Both resolve with parsed data on a 2xx answer and fail with a
//! [`FetchError`] otherwise. Transports do not retry and do not cache.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::with_catalog(826, 20);
//! let page = transport.fetch_page(PageNumber::FIRST).await?;
//! let rick = transport.fetch_entity(EntityId::new(1)).await?;
//! ```

mod http;
mod mock;

pub use http::{HttpConfig, HttpTransport, DEFAULT_BASE_URL};
pub use mock::{sample_entity, MockGate, MockTransport};

use async_trait::async_trait;
use sync_types::{Entity, EntityId, FetchError, Page, PageNumber};
use thiserror::Error;

/// Errors raised while setting up a transport.
///
/// Failures of individual fetches are reported as [`FetchError`] instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configuration cannot be used.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The HTTP client could not be built.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Transport trait for fetching the paginated resource.
///
/// Implementations handle the underlying request mechanism
/// (HTTP, mock, etc).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch one page of the collection.
    async fn fetch_page(&self, page: PageNumber) -> Result<Page<Entity>, FetchError>;

    /// Fetch a single entity by id.
    async fn fetch_entity(&self, id: EntityId) -> Result<Entity, FetchError>;
}

