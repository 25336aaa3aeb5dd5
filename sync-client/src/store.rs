//! ListSyncStore - the observable state container for pagesync.
//!
//! This module provides [`ListSyncStore`], which owns the paginated
//! collection and the single-entity selection and is the only place they
//! change.
//!
//! # Architecture
//!
//! The store uses the pure state machines from sync-core for all merge and
//! ordering rules and interprets their actions to perform the actual I/O via
//! the Transport trait.
//!
//! ```text
//! ScrollController → ListSyncStore → Transport → Network
//!                         ↓
//!                sync-core (pure state machines)
//!                         ↓
//!                 watch::Receiver<ListView>
//! ```
//!
//! State is locked only for the synchronous transitions, never across a
//! transport await. Every command therefore suspends at exactly one
//! round-trip, and [`ListSyncStore::reset`] can take effect while a page is
//! still in flight.
//!
//! # Example
//!
//! ```ignore
//! use sync_client::{ListSyncStore, MockTransport};
//!
//! let store = ListSyncStore::new(MockTransport::with_catalog(826, 20));
//! let mut updates = store.subscribe_list();
//!
//! store.request_page(PageNumber::FIRST).await?;
//! assert_eq!(updates.borrow_and_update().len(), 20);
//! ```

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use sync_core::{
    Action, CollectionState, EntityEvent, EntityTicket, EntityView, ListEvent, ListView,
    PageTicket, SelectionState, StoreEvent,
};
use sync_types::{Entity, EntityId, FetchError, PageNumber};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::transport::Transport;

/// Default deadline for one transport call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`ListSyncStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Deadline for one transport call; `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl StoreConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Wait for the transport indefinitely.
    pub fn without_timeout(mut self) -> Self {
        self.request_timeout = None;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

/// Result of a page request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page was merged into the collection.
    Applied {
        /// The applied page.
        page: PageNumber,
        /// Entities added.
        added: usize,
        /// Entities skipped as duplicates.
        skipped: usize,
        /// Whether another page is available.
        has_more: bool,
    },
    /// Another page was still loading; nothing was fetched.
    Suppressed {
        /// The page in flight.
        in_flight: PageNumber,
    },
    /// The response arrived after a reset and was dropped.
    Discarded,
}

/// Result of an entity request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityOutcome {
    /// The entity replaced the selection.
    Loaded(Box<Entity>),
    /// A newer request or direct selection superseded this one.
    Discarded,
}

/// The observable list store.
///
/// Share it with `Arc` between the scroll controller and any observers.
pub struct ListSyncStore<T: Transport> {
    transport: T,
    config: StoreConfig,
    collection: Mutex<CollectionState>,
    selection: Mutex<SelectionState>,
    list_tx: watch::Sender<ListView>,
    entity_tx: watch::Sender<EntityView>,
}

impl<T: Transport> ListSyncStore<T> {
    /// Create a store with the default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, StoreConfig::default())
    }

    /// Create a store with explicit configuration.
    pub fn with_config(transport: T, config: StoreConfig) -> Self {
        let collection = CollectionState::new();
        let selection = SelectionState::new();
        let (list_tx, _) = watch::channel(collection.view());
        let (entity_tx, _) = watch::channel(selection.view());
        Self {
            transport,
            config,
            collection: Mutex::new(collection),
            selection: Mutex::new(selection),
            list_tx,
            entity_tx,
        }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ===========================================
    // Collection commands
    // ===========================================

    /// Fetch `page` and merge it into the collection.
    ///
    /// `loading` is published before the transport is awaited. Page 1
    /// replaces the collection; later pages append. On failure the
    /// collection is untouched apart from `loading` and `error`, and the
    /// error is returned.
    pub async fn request_page(&self, page: PageNumber) -> Result<PageOutcome, FetchError> {
        let ticket = match self.begin_page(page) {
            Ok(ticket) => ticket,
            Err(in_flight) => return Ok(PageOutcome::Suppressed { in_flight }),
        };

        let result = self.with_deadline(self.transport.fetch_page(page)).await;
        self.finish_page(ticket, result)
    }

    /// Like [`request_page`](Self::request_page), but runs the fetch on a
    /// spawned task.
    ///
    /// The loading transition has already been applied when this returns.
    pub fn spawn_page(
        self: &Arc<Self>,
        page: PageNumber,
    ) -> JoinHandle<Result<PageOutcome, FetchError>>
    where
        T: 'static,
    {
        let started = self.begin_page(page);
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let ticket = match started {
                Ok(ticket) => ticket,
                Err(in_flight) => return Ok(PageOutcome::Suppressed { in_flight }),
            };
            let result = store.with_deadline(store.transport.fetch_page(page)).await;
            store.finish_page(ticket, result)
        })
    }

    /// Clear the collection and bump its generation.
    ///
    /// Does not fetch. A page still in flight is discarded when it arrives.
    pub fn reset(&self) {
        self.update_list(ListEvent::ResetRequested);
    }

    /// Re-issue the page that last failed, or continue from the last loaded
    /// page when nothing failed.
    pub async fn retry(&self) -> Result<PageOutcome, FetchError> {
        let page = self.collection().retry_page();
        tracing::debug!("retrying page {}", page);
        self.request_page(page).await
    }

    /// Dismiss the collection error.
    pub fn clear_error(&self) {
        self.update_list(ListEvent::ErrorCleared);
    }

    // ===========================================
    // Selection commands
    // ===========================================

    /// Fetch one entity and make it the selection.
    ///
    /// A failure keeps the previous selection and is returned.
    pub async fn request_entity(&self, id: EntityId) -> Result<EntityOutcome, FetchError> {
        let Some(ticket) = self.begin_entity(id) else {
            return Ok(EntityOutcome::Discarded);
        };
        let result = self.with_deadline(self.transport.fetch_entity(id)).await;
        self.finish_entity(ticket, result)
    }

    /// Like [`request_entity`](Self::request_entity), but runs the fetch on a
    /// spawned task.
    pub fn spawn_entity(
        self: &Arc<Self>,
        id: EntityId,
    ) -> JoinHandle<Result<EntityOutcome, FetchError>>
    where
        T: 'static,
    {
        let started = self.begin_entity(id);
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let Some(ticket) = started else {
                return Ok(EntityOutcome::Discarded);
            };
            let result = store.with_deadline(store.transport.fetch_entity(id)).await;
            store.finish_entity(ticket, result)
        })
    }

    /// Set the selection directly, cancelling any pending entity fetch.
    pub fn select(&self, entity: Option<Entity>) {
        self.update_selection(EntityEvent::Selected(entity));
    }

    /// Dismiss the selection error.
    pub fn clear_entity_error(&self) {
        self.update_selection(EntityEvent::ErrorCleared);
    }

    // ===========================================
    // Projections
    // ===========================================

    /// Current snapshot of the collection.
    pub fn list(&self) -> ListView {
        self.list_tx.borrow().clone()
    }

    /// Current snapshot of the selection.
    pub fn entity(&self) -> EntityView {
        self.entity_tx.borrow().clone()
    }

    /// Observe every collection change.
    pub fn subscribe_list(&self) -> watch::Receiver<ListView> {
        self.list_tx.subscribe()
    }

    /// Observe every selection change.
    pub fn subscribe_entity(&self) -> watch::Receiver<EntityView> {
        self.entity_tx.subscribe()
    }

    // ===========================================
    // Internals
    // ===========================================

    fn collection(&self) -> MutexGuard<'_, CollectionState> {
        self.collection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn selection(&self) -> MutexGuard<'_, SelectionState> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply one collection event, publish the new view, log what happened.
    fn update_list(&self, event: ListEvent) -> Vec<Action> {
        let actions = {
            let mut state = self.collection();
            let actions = state.on_event(event);
            self.list_tx.send_replace(state.view());
            actions
        };
        for action in &actions {
            if let Action::EmitEvent(event) = action {
                log_event(event);
            }
        }
        actions
    }

    fn update_selection(&self, event: EntityEvent) -> Vec<Action> {
        let actions = {
            let mut state = self.selection();
            let actions = state.on_event(event);
            self.entity_tx.send_replace(state.view());
            actions
        };
        for action in &actions {
            if let Action::EmitEvent(event) = action {
                log_event(event);
            }
        }
        actions
    }

    /// Start a page request. `Err` carries the page already in flight.
    fn begin_page(&self, page: PageNumber) -> Result<PageTicket, PageNumber> {
        let actions = self.update_list(ListEvent::PageRequested { page });
        let mut suppressed_by = page;
        for action in actions {
            match action {
                Action::FetchPage { ticket } => {
                    tracing::debug!("fetching page {} (generation {})", page, ticket.generation);
                    return Ok(ticket);
                }
                Action::EmitEvent(StoreEvent::RequestSuppressed { in_flight, .. }) => {
                    suppressed_by = in_flight;
                }
                _ => {}
            }
        }
        Err(suppressed_by)
    }

    fn finish_page(
        &self,
        ticket: PageTicket,
        result: Result<sync_types::Page<Entity>, FetchError>,
    ) -> Result<PageOutcome, FetchError> {
        let event = match result {
            Ok(response) => ListEvent::PageLoaded { ticket, response },
            Err(error) => ListEvent::PageFailed { ticket, error },
        };

        let mut outcome = Ok(PageOutcome::Discarded);
        for action in self.update_list(event) {
            match action {
                Action::EmitEvent(StoreEvent::PageApplied {
                    page,
                    added,
                    skipped,
                    has_more,
                }) => {
                    outcome = Ok(PageOutcome::Applied {
                        page,
                        added,
                        skipped,
                        has_more,
                    });
                }
                Action::EmitEvent(StoreEvent::PageFailed { error, .. }) => {
                    outcome = Err(error);
                }
                _ => {}
            }
        }
        outcome
    }

    /// Start an entity request. `None` when the selection issued no fetch.
    fn begin_entity(&self, id: EntityId) -> Option<EntityTicket> {
        let actions = self.update_selection(EntityEvent::EntityRequested { id });
        actions.into_iter().find_map(|action| match action {
            Action::FetchEntity { ticket } => {
                tracing::debug!("fetching entity {} (request {})", id, ticket.seq);
                Some(ticket)
            }
            _ => None,
        })
    }

    fn finish_entity(
        &self,
        ticket: EntityTicket,
        result: Result<Entity, FetchError>,
    ) -> Result<EntityOutcome, FetchError> {
        let (event, mut fetched) = match result {
            Ok(entity) => {
                let fetched = Box::new(entity.clone());
                (EntityEvent::EntityLoaded { ticket, entity }, Some(fetched))
            }
            Err(error) => (EntityEvent::EntityFailed { ticket, error }, None),
        };

        let mut outcome = Ok(EntityOutcome::Discarded);
        for action in self.update_selection(event) {
            match action {
                Action::EmitEvent(StoreEvent::EntityLoaded { .. }) => {
                    if let Some(entity) = fetched.take() {
                        outcome = Ok(EntityOutcome::Loaded(entity));
                    }
                }
                Action::EmitEvent(StoreEvent::EntityFailed { error, .. }) => {
                    outcome = Err(error);
                }
                _ => {}
            }
        }
        outcome
    }

    /// Await a transport call, bounded by the configured deadline.
    async fn with_deadline<R>(
        &self,
        call: impl Future<Output = Result<R, FetchError>>,
    ) -> Result<R, FetchError> {
        match self.config.request_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::timeout(limit)),
            },
            None => call.await,
        }
    }
}

impl<T: Transport + std::fmt::Debug> std::fmt::Debug for ListSyncStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListSyncStore")
            .field("transport", &self.transport)
            .field("config", &self.config)
            .field("list", &*self.list_tx.borrow())
            .finish()
    }
}

fn log_event(event: &StoreEvent) {
    match event {
        StoreEvent::PageApplied {
            page,
            added,
            skipped,
            has_more,
        } => {
            tracing::debug!(
                "applied page {}: {} added, {} skipped, has_more={}",
                page,
                added,
                skipped,
                has_more
            );
        }
        StoreEvent::PageFailed { page, error } => {
            tracing::warn!("page {} failed: {}", page, error);
        }
        StoreEvent::RequestSuppressed {
            requested,
            in_flight,
        } => {
            tracing::debug!(
                "page {} not requested, page {} still in flight",
                requested,
                in_flight
            );
        }
        StoreEvent::StalePageDiscarded { page, generation } => {
            tracing::debug!(
                "discarding page {} from generation {}",
                page,
                generation
            );
        }
        StoreEvent::Reset { generation } => {
            tracing::info!("collection reset (generation {})", generation);
        }
        StoreEvent::EntityLoaded { id } => {
            tracing::debug!("loaded entity {}", id);
        }
        StoreEvent::EntityFailed { id, error } => {
            tracing::warn!("entity {} failed: {}", id, error);
        }
        StoreEvent::StaleEntityDiscarded { id } => {
            tracing::debug!("discarding superseded response for entity {}", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{sample_entity, MockTransport};
    use sync_core::ListStatus;
    use sync_types::{Page, PageInfo};

    fn p(n: u32) -> PageNumber {
        PageNumber::new(n).unwrap()
    }

    /// A page holding ids `first..=last`, advertising a next page when asked.
    fn page_of(first: u64, last: u64, has_next: bool) -> Page<Entity> {
        Page::new(
            PageInfo {
                count: last - first + 1,
                pages: 1,
                next: has_next.then(|| "https://example.test/api/character?page=2".to_string()),
                prev: None,
            },
            (first..=last).map(sample_entity).collect(),
        )
    }

    fn ids(view: &ListView) -> Vec<u64> {
        view.items.iter().map(|e| e.id.value()).collect()
    }

    // ===========================================
    // Page merge tests
    // ===========================================

    #[tokio::test]
    async fn scenario_load_append_reset_reload() {
        let transport = MockTransport::new();
        transport.queue_page(p(1), page_of(1, 20, true));
        transport.queue_page(p(2), page_of(21, 40, false));
        transport.queue_page(p(1), page_of(1, 20, true));
        transport.queue_entity(sample_entity(1));
        let store = ListSyncStore::new(transport);

        store.request_page(p(1)).await.unwrap();
        assert!(store.list().has_more);
        store.request_page(p(2)).await.unwrap();
        let view = store.list();
        assert_eq!(view.len(), 40);
        assert_eq!(view.current_page, Some(p(2)));
        assert!(!view.has_more);

        store.reset();
        let view = store.list();
        assert!(view.is_empty());
        assert_eq!(view.current_page, None);
        assert!(view.has_more);
        assert!(view.error.is_none());

        store.request_page(p(1)).await.unwrap();
        let view = store.list();
        assert_eq!(view.len(), 20);
        assert_eq!(view.items[0].name, "Rick Sanchez");
        assert_eq!(view.current_page, Some(p(1)));

        store.request_entity(EntityId::new(1)).await.unwrap();
        let selected = store.entity().selected.unwrap();
        assert_eq!(selected.name, "Rick Sanchez");
        assert_eq!(store.list().len(), 20);
    }

    #[tokio::test]
    async fn first_page_replaces_and_later_pages_append() {
        let transport = MockTransport::new();
        transport.queue_page(p(1), page_of(1, 3, true));
        transport.queue_page(p(2), page_of(4, 6, false));
        transport.queue_page(p(1), page_of(7, 8, true));
        let store = ListSyncStore::new(transport);

        store.request_page(p(1)).await.unwrap();
        let outcome = store.request_page(p(2)).await.unwrap();
        assert_eq!(
            outcome,
            PageOutcome::Applied {
                page: p(2),
                added: 3,
                skipped: 0,
                has_more: false,
            }
        );
        assert_eq!(ids(&store.list()), vec![1, 2, 3, 4, 5, 6]);
        assert!(!store.list().has_more);

        store.request_page(p(1)).await.unwrap();
        assert_eq!(ids(&store.list()), vec![7, 8]);
        assert!(store.list().has_more);
    }

    #[tokio::test]
    async fn duplicate_ids_are_skipped_on_append() {
        let transport = MockTransport::new();
        transport.queue_page(p(1), page_of(1, 3, true));
        transport.queue_page(p(2), page_of(3, 5, false));
        let store = ListSyncStore::new(transport);

        store.request_page(p(1)).await.unwrap();
        let outcome = store.request_page(p(2)).await.unwrap();
        assert!(matches!(
            outcome,
            PageOutcome::Applied {
                added: 2,
                skipped: 1,
                ..
            }
        ));
        assert_eq!(ids(&store.list()), vec![1, 2, 3, 4, 5]);
    }

    // ===========================================
    // Failure tests
    // ===========================================

    #[tokio::test]
    async fn failure_keeps_items_and_page() {
        let transport = MockTransport::new();
        transport.queue_page(p(1), page_of(1, 20, true));
        transport.queue_page_error(p(2), FetchError::HttpStatus { status: 500 });
        let store = ListSyncStore::new(transport);

        store.request_page(p(1)).await.unwrap();
        let err = store.request_page(p(2)).await.unwrap_err();
        assert_eq!(err, FetchError::HttpStatus { status: 500 });

        let view = store.list();
        assert_eq!(view.len(), 20);
        assert_eq!(view.current_page, Some(p(1)));
        assert!(!view.loading);
        assert_eq!(view.error_message().as_deref(), Some("HTTP error! status: 500"));
        assert_eq!(view.status(), ListStatus::Failed);
    }

    #[tokio::test]
    async fn retry_reissues_failed_page() {
        let transport = MockTransport::new();
        transport.queue_page(p(1), page_of(1, 2, true));
        transport.queue_page_error(p(2), FetchError::transport("Network error"));
        transport.queue_page(p(2), page_of(3, 4, false));
        let store = ListSyncStore::new(transport.clone());

        store.request_page(p(1)).await.unwrap();
        assert!(store.request_page(p(2)).await.is_err());

        store.retry().await.unwrap();
        assert_eq!(transport.page_requests(), vec![p(1), p(2), p(2)]);
        assert_eq!(ids(&store.list()), vec![1, 2, 3, 4]);
        assert!(store.list().error.is_none());
    }

    #[tokio::test]
    async fn retry_from_empty_requests_first_page() {
        let transport = MockTransport::with_catalog(3, 20);
        let store = ListSyncStore::new(transport.clone());
        store.retry().await.unwrap();
        assert_eq!(transport.page_requests(), vec![p(1)]);
    }

    #[tokio::test]
    async fn clear_error_keeps_everything_else() {
        let transport = MockTransport::new();
        transport.queue_page_error(p(1), FetchError::transport("offline"));
        let store = ListSyncStore::new(transport);

        let _ = store.request_page(p(1)).await;
        assert!(store.list().error.is_some());
        store.clear_error();
        let view = store.list();
        assert!(view.error.is_none());
        assert_eq!(view.status(), ListStatus::NotLoaded);
    }

    #[tokio::test]
    async fn slow_transport_times_out() {
        let transport = MockTransport::with_catalog(40, 20);
        let _gate = transport.hold_page(p(1));
        let store = ListSyncStore::with_config(
            transport,
            StoreConfig::new().with_timeout(Duration::from_millis(20)),
        );

        let err = store.request_page(p(1)).await.unwrap_err();
        assert_eq!(err, FetchError::timeout(Duration::from_millis(20)));
        assert!(!store.list().loading);
        assert!(store.list().is_empty());
    }

    // ===========================================
    // Ordering tests
    // ===========================================

    #[tokio::test]
    async fn response_in_flight_during_reset_is_discarded() {
        let transport = MockTransport::new();
        transport.queue_page(p(1), page_of(1, 20, true));
        transport.queue_page(p(2), page_of(21, 40, true));
        let gate = transport.hold_page(p(2));
        let store = Arc::new(ListSyncStore::new(transport));

        store.request_page(p(1)).await.unwrap();
        let pending = store.spawn_page(p(2));
        assert!(store.list().loading);

        store.reset();
        gate.release();

        assert_eq!(pending.await.unwrap(), Ok(PageOutcome::Discarded));
        let view = store.list();
        assert!(view.is_empty());
        assert_eq!(view.current_page, None);
        assert!(!view.loading);
    }

    #[tokio::test]
    async fn refresh_while_loading_wins() {
        let transport = MockTransport::new();
        transport.queue_page(p(2), page_of(21, 40, true));
        transport.queue_page(p(1), page_of(1, 20, true));
        let gate = transport.hold_page(p(2));
        let store = Arc::new(ListSyncStore::new(transport));

        let stale = store.spawn_page(p(2));
        store.reset();
        store.request_page(p(1)).await.unwrap();
        gate.release();

        assert_eq!(stale.await.unwrap(), Ok(PageOutcome::Discarded));
        assert_eq!(ids(&store.list())[0], 1);
        assert_eq!(store.list().current_page, Some(p(1)));
    }

    #[tokio::test]
    async fn overlapping_request_is_suppressed() {
        let transport = MockTransport::with_catalog(100, 20);
        let gate = transport.hold_page(p(1));
        let store = Arc::new(ListSyncStore::new(transport.clone()));

        let first = store.spawn_page(p(1));
        let second = store.request_page(p(2)).await.unwrap();
        assert_eq!(second, PageOutcome::Suppressed { in_flight: p(1) });

        gate.release();
        first.await.unwrap().unwrap();
        assert_eq!(transport.page_requests(), vec![p(1)]);
        assert_eq!(store.list().len(), 20);
    }

    #[tokio::test]
    async fn subscribers_see_loading_then_result() {
        let transport = MockTransport::with_catalog(40, 20);
        let gate = transport.hold_page(p(1));
        let store = Arc::new(ListSyncStore::new(transport));
        let mut updates = store.subscribe_list();
        assert_eq!(updates.borrow_and_update().status(), ListStatus::NotLoaded);

        let pending = store.spawn_page(p(1));
        assert!(updates.has_changed().unwrap());
        assert_eq!(
            updates.borrow_and_update().status(),
            ListStatus::InitialLoading
        );

        gate.release();
        pending.await.unwrap().unwrap();
        updates.changed().await.unwrap();
        let view = updates.borrow_and_update().clone();
        assert_eq!(view.len(), 20);
        assert_eq!(view.total_count, Some(40));
        assert_eq!(view.status(), ListStatus::Idle);
    }

    // ===========================================
    // Selection tests
    // ===========================================

    #[tokio::test]
    async fn entity_lookup_is_independent_of_list() {
        let transport = MockTransport::with_catalog(40, 20);
        let store = ListSyncStore::new(transport);
        store.request_page(p(1)).await.unwrap();

        let outcome = store.request_entity(EntityId::new(1)).await.unwrap();
        assert_eq!(
            outcome,
            EntityOutcome::Loaded(Box::new(sample_entity(1)))
        );
        assert_eq!(store.entity().selected.unwrap().name, "Rick Sanchez");
        assert_eq!(store.list().len(), 20);
    }

    #[tokio::test]
    async fn entity_failure_keeps_selection() {
        let transport = MockTransport::with_catalog(40, 20);
        let store = ListSyncStore::new(transport);

        store.request_entity(EntityId::new(2)).await.unwrap();
        let err = store.request_entity(EntityId::new(999)).await.unwrap_err();
        assert!(err.is_not_found());

        let view = store.entity();
        assert_eq!(view.selected.as_ref().unwrap().name, "Morty Smith");
        assert!(!view.loading);
        assert_eq!(view.error_message().as_deref(), Some("HTTP error! status: 404"));

        store.clear_entity_error();
        assert!(store.entity().error.is_none());
    }

    #[tokio::test]
    async fn newer_entity_request_supersedes_older() {
        let transport = MockTransport::with_catalog(40, 20);
        let gate = transport.hold_entity(EntityId::new(1));
        let store = Arc::new(ListSyncStore::new(transport));

        let older = store.spawn_entity(EntityId::new(1));
        store.request_entity(EntityId::new(3)).await.unwrap();
        gate.release();

        assert_eq!(older.await.unwrap(), Ok(EntityOutcome::Discarded));
        assert_eq!(store.entity().selected.unwrap().name, "Summer Smith");
    }

    #[tokio::test]
    async fn loaded_outcome_is_the_fetched_entity() {
        let transport = MockTransport::new();
        let mut evil = sample_entity(7);
        evil.name = "Evil Morty".into();
        transport.queue_entity(evil.clone());
        let gate = transport.hold_entity(EntityId::new(7));
        let store = Arc::new(ListSyncStore::new(transport));

        let pending = store.spawn_entity(EntityId::new(7));
        gate.release();
        let outcome = pending.await.unwrap().unwrap();
        store.select(Some(sample_entity(1)));

        assert_eq!(outcome, EntityOutcome::Loaded(Box::new(evil)));
        assert_eq!(store.entity().selected.unwrap().name, "Rick Sanchez");
    }

    #[tokio::test]
    async fn select_sets_entity_directly() {
        let store = ListSyncStore::new(MockTransport::new());
        store.select(Some(sample_entity(5)));
        assert_eq!(store.entity().selected.unwrap().name, "Jerry Smith");
        assert!(store.transport().entity_requests().is_empty());

        store.select(None);
        assert!(store.entity().selected.is_none());
    }

    #[test]
    fn default_config_has_timeout() {
        assert_eq!(
            StoreConfig::default().request_timeout,
            Some(DEFAULT_REQUEST_TIMEOUT)
        );
        assert_eq!(StoreConfig::new().without_timeout().request_timeout, None);
    }
}
