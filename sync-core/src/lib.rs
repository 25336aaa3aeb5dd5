//! # sync-core
//!
//! Pure logic for pagesync (no I/O, instant tests).
//!
//! This crate implements the list and selection state machines plus the
//! scroll arithmetic that drives them, without any network I/O.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. This enables:
//! - Instant unit tests (no mocks, no async)
//! - Deterministic behavior (same input → same output)
//! - Easy reasoning about ordering hazards such as a page response arriving
//!   after a reset
//!
//! The actual fetching is performed by `sync-client`, which interprets the
//! actions produced by these state machines.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod scroll;
pub mod selection;
pub mod state;
pub mod view;

pub use collection::{CollectionState, Generation, ListEvent, PageTicket};
pub use scroll::{
    show_scroll_to_top, EndReachedTracker, ScrollMetrics, END_REACHED_THRESHOLD,
    SCROLL_TO_TOP_THRESHOLD,
};
pub use selection::{EntityEvent, EntityTicket, SelectionState};
pub use state::{Action, StoreEvent};
pub use view::{EntityView, ListStatus, ListView};

#[cfg(test)]
pub(crate) mod testing;
