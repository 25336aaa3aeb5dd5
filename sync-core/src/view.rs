//! Read-only projections published to observers.

use sync_types::{Entity, FetchError, PageNumber};

/// Snapshot of the paginated collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    /// Accumulated entities in arrival order.
    pub items: Vec<Entity>,
    /// Whether a page fetch is in flight.
    pub loading: bool,
    /// The last fetch error, if any.
    pub error: Option<FetchError>,
    /// Whether another page can be requested.
    pub has_more: bool,
    /// Last applied page; `None` before any page loads.
    pub current_page: Option<PageNumber>,
    /// Total item count reported by the server.
    pub total_count: Option<u64>,
}

impl ListView {
    /// Number of accumulated items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are loaded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The error as display text.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    /// The page an end-of-list trigger should request, or `None` when
    /// nothing more is available or a fetch is already running.
    pub fn next_request(&self) -> Option<PageNumber> {
        if !self.has_more || self.loading {
            return None;
        }
        Some(
            self.current_page
                .map(|page| page.next())
                .unwrap_or(PageNumber::FIRST),
        )
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
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            has_more: true,
            current_page: None,
            total_count: None,
        }
    }
}

/// What a list consumer should show around the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    /// Nothing requested yet.
    NotLoaded,
    /// First page loading with no rows to show (also shown as refreshing).
    InitialLoading,
    /// Rows shown, next page loading below them.
    LoadingMore,
    /// Last fetch failed; offer a retry.
    Failed,
    /// Loaded, but the collection is empty.
    Empty,
    /// Rows shown and more pages are available.
    Idle,
    /// Rows shown and the server has no further pages.
    Exhausted,
}

impl ListStatus {
    /// Derive the status from the projection's raw fields.
    pub fn derive(
        loading: bool,
        has_error: bool,
        is_empty: bool,
        loaded: bool,
        has_more: bool,
    ) -> Self {
        if loading {
            if is_empty {
                ListStatus::InitialLoading
            } else {
                ListStatus::LoadingMore
            }
        } else if has_error {
            ListStatus::Failed
        } else if !loaded {
            ListStatus::NotLoaded
        } else if is_empty {
            ListStatus::Empty
        } else if has_more {
            ListStatus::Idle
        } else {
            ListStatus::Exhausted
        }
    }
}

/// Snapshot of the single-entity selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityView {
    /// The selected entity, possibly stale while a new fetch runs.
    pub selected: Option<Entity>,
    /// Whether an entity fetch is in flight.
    pub loading: bool,
    /// The last entity fetch error, if any.
    pub error: Option<FetchError>,
}

impl EntityView {
    /// The error as display text.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}
