//! Paginated collection state machine.
//!
//! This module owns the accumulated list of entities and the rules for
//! merging page responses into it:
//! - page 1 replaces the list, later pages append to it
//! - entities already present (same id) are skipped on append
//! - `current_page` only advances when a response is applied
//! - at most one page fetch is in flight at a time
//!
//! Every request is tagged with a [`PageTicket`] carrying the page number and
//! the [`Generation`] it was issued in. A reset bumps the generation, so a
//! response that was in flight during the reset no longer matches and is
//! discarded instead of resurrecting pre-reset data.

use std::collections::HashSet;
use std::fmt;

use sync_types::{Entity, EntityId, FetchError, Page, PageNumber};

use crate::state::{Action, StoreEvent};
use crate::view::{ListStatus, ListView};

/// Reset epoch of a collection. Incremented by every reset.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// Get the numeric value of this Generation.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The generation after this one.
    pub fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Debug for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generation({})", self.0)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageTicket {
    /// The requested page.
    pub page: PageNumber,
    /// Generation the request was issued in.
    pub generation: Generation,
}

/// Inputs to the collection state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// A consumer asked for a page.
    PageRequested {
        /// The page to fetch.
        page: PageNumber,
    },
    /// The transport returned a page.
    PageLoaded {
        /// Ticket from the matching [`Action::FetchPage`].
        ticket: PageTicket,
        /// The page envelope.
        response: Page<Entity>,
    },
    /// The transport failed to return a page.
    PageFailed {
        /// Ticket from the matching [`Action::FetchPage`].
        ticket: PageTicket,
        /// Why it failed.
        error: FetchError,
    },
    /// A consumer asked to start over (pull-to-refresh).
    ResetRequested,
    /// A consumer dismissed the current error.
    ErrorCleared,
}

/// Accumulated state of the paginated collection.
#[derive(Debug, Clone)]
pub struct CollectionState {
    items: Vec<Entity>,
    seen: HashSet<EntityId>,
    loading: bool,
    error: Option<FetchError>,
    has_more: bool,
    current_page: Option<PageNumber>,
    total_count: Option<u64>,
    generation: Generation,
    in_flight: Option<PageTicket>,
    failed_page: Option<PageNumber>,
}

impl CollectionState {
    /// Create an empty collection with no page loaded.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            loading: false,
            error: None,
            has_more: true,
            current_page: None,
            total_count: None,
            generation: Generation::default(),
            in_flight: None,
            failed_page: None,
        }
    }

    /// Process an event and return the actions to execute.
    ///
    /// No side effects beyond `self`. The caller (sync-client) is
    /// responsible for executing the returned actions.
    pub fn on_event(&mut self, event: ListEvent) -> Vec<Action> {
        match event {
            ListEvent::PageRequested { page } => {
                if let Some(in_flight) = self.in_flight {
                    return vec![Action::EmitEvent(StoreEvent::RequestSuppressed {
                        requested: page,
                        in_flight: in_flight.page,
                    })];
                }
                let ticket = PageTicket {
                    page,
                    generation: self.generation,
                };
                self.in_flight = Some(ticket);
                self.loading = true;
                self.error = None;
                vec![Action::FetchPage { ticket }]
            }

            ListEvent::PageLoaded { ticket, response } => {
                if !self.is_current(ticket) {
                    return vec![stale(ticket)];
                }
                self.finish_request();
                self.failed_page = None;

                let has_more = response.info.has_next();
                self.total_count = Some(response.info.count);
                let (added, skipped) = self.merge(ticket.page, response.results);
                self.current_page = Some(ticket.page);
                self.has_more = has_more;

                vec![Action::EmitEvent(StoreEvent::PageApplied {
                    page: ticket.page,
                    added,
                    skipped,
                    has_more,
                })]
            }

            ListEvent::PageFailed { ticket, error } => {
                if !self.is_current(ticket) {
                    return vec![stale(ticket)];
                }
                self.finish_request();
                self.failed_page = Some(ticket.page);
                self.error = Some(error.clone());
                vec![Action::EmitEvent(StoreEvent::PageFailed {
                    page: ticket.page,
                    error,
                })]
            }

            ListEvent::ResetRequested => {
                self.items.clear();
                self.seen.clear();
                self.current_page = None;
                self.has_more = true;
                self.error = None;
                self.total_count = None;
                self.failed_page = None;
                // The outstanding request, if any, now belongs to a dead
                // generation and will be discarded when it completes.
                self.in_flight = None;
                self.loading = false;
                self.generation = self.generation.next();
                vec![Action::EmitEvent(StoreEvent::Reset {
                    generation: self.generation,
                })]
            }

            ListEvent::ErrorCleared => {
                self.error = None;
                vec![]
            }
        }
    }

    /// Accumulated entities in arrival order.
    pub fn items(&self) -> &[Entity] {
        &self.items
    }

    /// Whether a page fetch of the current generation is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last fetch error, if not yet cleared.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Whether the last applied page advertised a next page.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// The last successfully applied page; `None` before any page loads.
    pub fn current_page(&self) -> Option<PageNumber> {
        self.current_page
    }

    /// Total item count reported by the server with the last page.
    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// The current reset generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The request currently in flight, if any.
    pub fn in_flight(&self) -> Option<PageTicket> {
        self.in_flight
    }

    /// The page that continues the collection.
    pub fn next_page(&self) -> PageNumber {
        self.current_page
            .map(|page| page.next())
            .unwrap_or(PageNumber::FIRST)
    }

    /// The page a retry should re-issue: the one that failed, otherwise the
    /// continuation of what is loaded.
    pub fn retry_page(&self) -> PageNumber {
        self.failed_page.unwrap_or_else(|| self.next_page())
    }

    /// Derived presentation status.
    pub fn status(&self) -> ListStatus {
        ListStatus::derive(
            self.loading,
            self.error.is_some(),
            self.items.is_empty(),
            self.current_page.is_some(),
            self.has_more,
        )
    }

    /// Read-only projection for observers.
    pub fn view(&self) -> ListView {
        ListView {
            items: self.items.clone(),
            loading: self.loading,
            error: self.error.clone(),
            has_more: self.has_more,
            current_page: self.current_page,
            total_count: self.total_count,
        }
    }

    fn is_current(&self, ticket: PageTicket) -> bool {
        self.in_flight == Some(ticket)
    }

    fn finish_request(&mut self) {
        self.in_flight = None;
        self.loading = false;
    }

    /// Merge page results. Page 1 replaces; later pages append.
    /// Returns `(added, skipped)`.
    fn merge(&mut self, page: PageNumber, results: Vec<Entity>) -> (usize, usize) {
        if page.is_first() {
            self.items.clear();
            self.seen.clear();
        }

        let mut added = 0;
        let mut skipped = 0;
        for entity in results {
            if self.seen.insert(entity.id) {
                self.items.push(entity);
                added += 1;
            } else {
                skipped += 1;
            }
        }
        (added, skipped)
    }
}

impl Default for CollectionState {
    fn default() -> Self {
        Self::new()
    }
}

fn stale(ticket: PageTicket) -> Action {
    Action::EmitEvent(StoreEvent::StalePageDiscarded {
        page: ticket.page,
        generation: ticket.generation,
    })
}
