//! Scroll-driven consumer of the list store.
//!
//! [`ScrollController`] turns scroll observations into store commands:
//! approaching the end requests the next page, pull-to-refresh resets and
//! reloads page 1, and the offset decides whether a "scroll to top" control
//! is shown.

use std::sync::Arc;

use sync_core::{
    show_scroll_to_top, EndReachedTracker, ScrollMetrics, END_REACHED_THRESHOLD,
    SCROLL_TO_TOP_THRESHOLD,
};
use sync_types::{FetchError, PageNumber};

use crate::store::{ListSyncStore, PageOutcome};
use crate::transport::Transport;

/// Thresholds used by [`ScrollController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    /// Offset beyond which the scroll-to-top control shows.
    pub scroll_to_top_threshold: f64,
    /// Viewports of content left below the viewport that count as "near
    /// the end".
    pub end_reached_threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scroll_to_top_threshold: SCROLL_TO_TOP_THRESHOLD,
            end_reached_threshold: END_REACHED_THRESHOLD,
        }
    }
}

/// What the host UI should do after a scroll observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollUpdate {
    /// Whether the scroll-to-top control is visible.
    pub show_scroll_to_top: bool,
    /// Whether this observation entered the end zone.
    pub end_reached: bool,
}

/// Drives a [`ListSyncStore`] from scroll events.
pub struct ScrollController<T: Transport> {
    store: Arc<ListSyncStore<T>>,
    config: ScrollConfig,
    end_tracker: EndReachedTracker,
}

impl<T: Transport> ScrollController<T> {
    /// Create a controller with default thresholds.
    pub fn new(store: Arc<ListSyncStore<T>>) -> Self {
        Self::with_config(store, ScrollConfig::default())
    }

    /// Create a controller with explicit thresholds.
    pub fn with_config(store: Arc<ListSyncStore<T>>, config: ScrollConfig) -> Self {
        Self {
            store,
            end_tracker: EndReachedTracker::new(config.end_reached_threshold),
            config,
        }
    }

    /// The store this controller drives.
    pub fn store(&self) -> &Arc<ListSyncStore<T>> {
        &self.store
    }

    /// The configured thresholds.
    pub fn config(&self) -> ScrollConfig {
        self.config
    }

    /// First mount: load page 1.
    pub async fn load_initial(&self) -> Result<PageOutcome, FetchError> {
        self.store.request_page(PageNumber::FIRST).await
    }

    /// Request the next page if more are available and nothing is loading.
    ///
    /// Returns `Ok(None)` when no request was made.
    pub async fn on_approaching_end(&self) -> Result<Option<PageOutcome>, FetchError> {
        match self.store.list().next_request() {
            Some(page) => self.store.request_page(page).await.map(Some),
            None => Ok(None),
        }
    }

    /// Discard everything and reload page 1.
    pub async fn on_pull_to_refresh(&mut self) -> Result<PageOutcome, FetchError> {
        self.end_tracker.rearm();
        self.store.reset();
        self.store.request_page(PageNumber::FIRST).await
    }

    /// Whether the scroll-to-top control shows at this offset.
    pub fn on_scroll_offset_changed(&self, offset_y: f64) -> bool {
        show_scroll_to_top(offset_y, self.config.scroll_to_top_threshold)
    }

    /// Feed one full scroll observation.
    ///
    /// Entering the end zone requests the next page; the trigger fires once
    /// per content length.
    pub async fn on_scroll(
        &mut self,
        metrics: ScrollMetrics,
    ) -> Result<(ScrollUpdate, Option<PageOutcome>), FetchError> {
        let update = ScrollUpdate {
            show_scroll_to_top: self.on_scroll_offset_changed(metrics.offset_y),
            end_reached: self.end_tracker.observe(metrics),
        };
        let outcome = if update.end_reached {
            self.on_approaching_end().await?
        } else {
            None
        };
        Ok((update, outcome))
    }
}
