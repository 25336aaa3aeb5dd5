//! Actions and notifications shared by the pagesync state machines.
//!
//! The state machines in [`crate::collection`] and [`crate::selection`] never
//! perform I/O. Each transition returns a list of [`Action`]s; the store in
//! sync-client interprets them by calling the transport and by reporting
//! [`StoreEvent`]s to the application.

use sync_types::{EntityId, FetchError, PageNumber};

use crate::collection::{Generation, PageTicket};
use crate::selection::EntityTicket;

/// Actions to be executed by the sync-client store.
///
/// These are instructions, not side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetch one page of the collection.
    ///
    /// The ticket must be handed back with the result so stale responses can
    /// be recognised.
    FetchPage {
        /// Identifies this request.
        ticket: PageTicket,
    },
    /// Fetch a single entity.
    FetchEntity {
        /// Identifies this request.
        ticket: EntityTicket,
    },
    /// Report something that happened to the application.
    EmitEvent(StoreEvent),
}

/// Events reported to the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A page response was merged into the collection.
    PageApplied {
        /// The page that was applied.
        page: PageNumber,
        /// Entities added to the collection.
        added: usize,
        /// Entities skipped because their id was already present.
        skipped: usize,
        /// Whether the server advertises another page.
        has_more: bool,
    },
    /// A page fetch failed; the collection is unchanged.
    PageFailed {
        /// The page that failed.
        page: PageNumber,
        /// Why it failed.
        error: FetchError,
    },
    /// A page request was dropped because another page is still loading.
    RequestSuppressed {
        /// The page that was asked for.
        requested: PageNumber,
        /// The page already in flight.
        in_flight: PageNumber,
    },
    /// A page response arrived for a request that no longer matters
    /// (issued before a reset) and was ignored.
    StalePageDiscarded {
        /// The page the response belonged to.
        page: PageNumber,
        /// Generation the request was issued in.
        generation: Generation,
    },
    /// The collection was reset.
    Reset {
        /// The generation now in effect.
        generation: Generation,
    },
    /// A single-entity fetch succeeded and replaced the selection.
    EntityLoaded {
        /// The loaded entity.
        id: EntityId,
    },
    /// A single-entity fetch failed; any previous selection is kept.
    EntityFailed {
        /// The requested entity.
        id: EntityId,
        /// Why it failed.
        error: FetchError,
    },
    /// A single-entity response arrived after a newer request superseded it.
    StaleEntityDiscarded {
        /// The entity the response belonged to.
        id: EntityId,
    },
}
