//! # sync-client
//!
//! Client library for pagesync.
//!
//! This is the main library that applications use to present a paginated
//! REST resource as an infinitely scrolling list.
//!
//! ## Features
//!
//! - **Observable store**: [`ListSyncStore`] owns list and selection state and
//!   publishes snapshots through `tokio::sync::watch`
//! - **Reset-safe pagination**: responses that were in flight during a reset
//!   are discarded instead of resurrecting old data
//! - **Transport Abstraction**: Pluggable transport layer (HTTP, mock)
//! - **Pure State Machine**: Uses sync-core for side-effect-free logic
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sync_client::{HttpConfig, HttpTransport, ListSyncStore, ScrollController};
//!
//! let transport = HttpTransport::new(HttpConfig::default())?;
//! let store = Arc::new(ListSyncStore::new(transport));
//! let mut controller = ScrollController::new(Arc::clone(&store));
//!
//! controller.load_initial().await?;
//! controller.on_approaching_end().await?;
//! println!("{} items", store.list().len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod controller;
pub mod store;
pub mod transport;

pub use controller::{ScrollConfig, ScrollController, ScrollUpdate};
pub use store::{EntityOutcome, ListSyncStore, PageOutcome, StoreConfig, DEFAULT_REQUEST_TIMEOUT};
pub use transport::{
    sample_entity, ClientError, HttpConfig, HttpTransport, MockGate, MockTransport, Transport,
    DEFAULT_BASE_URL,
};
