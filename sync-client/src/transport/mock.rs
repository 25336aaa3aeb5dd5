//! Mock transport for testing.
//!
//! Allows queueing responses, forcing failures, holding a response until the
//! test releases it, and capturing the requests that were made.

use super::Transport;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use sync_types::{Entity, EntityId, FetchError, Gender, LocationRef, Page, PageInfo, PageNumber, Status};
use tokio::sync::Notify;

const MOCK_BASE_URL: &str = "https://mock.pagesync.invalid/api";

/// Names of the first few entities served by [`sample_entity`].
const SAMPLE_NAMES: [&str; 5] = [
    "Rick Sanchez",
    "Morty Smith",
    "Summer Smith",
    "Beth Smith",
    "Jerry Smith",
];

/// Build a plausible entity for demos and tests.
///
/// Ids 1-5 carry the names of the upstream API's first five entities.
pub fn sample_entity(id: u64) -> Entity {
    let name = usize::try_from(id)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| SAMPLE_NAMES.get(i))
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Character {}", id));
    let status = match id % 3 {
        0 => Status::Unknown,
        1 => Status::Alive,
        _ => Status::Dead,
    };
    let gender = match id % 4 {
        0 => Gender::Unknown,
        1 => Gender::Male,
        2 => Gender::Female,
        _ => Gender::Genderless,
    };
    Entity {
        id: EntityId::new(id),
        name,
        status,
        species: "Human".into(),
        kind: String::new(),
        gender,
        origin: LocationRef {
            name: "Earth (C-137)".into(),
            url: format!("{}/location/1", MOCK_BASE_URL),
        },
        location: LocationRef {
            name: "Citadel of Ricks".into(),
            url: format!("{}/location/3", MOCK_BASE_URL),
        },
        image: format!("{}/character/avatar/{}.jpeg", MOCK_BASE_URL, id),
        episode: vec![format!("{}/episode/1", MOCK_BASE_URL)],
        url: format!("{}/character/{}", MOCK_BASE_URL, id),
        created: "2017-11-04T18:48:46.250Z".into(),
    }
}

/// A synthetic collection served when nothing is queued.
#[derive(Debug, Clone, Copy)]
struct Catalog {
    total: u64,
    page_size: u32,
}

impl Catalog {
    fn pages(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        u32::try_from(self.total.div_ceil(size)).unwrap_or(u32::MAX)
    }

    fn page(&self, page: PageNumber) -> Result<Page<Entity>, FetchError> {
        let pages = self.pages();
        if page.value() > pages {
            return Err(FetchError::HttpStatus { status: 404 });
        }
        let size = u64::from(self.page_size.max(1));
        let first = u64::from(page.value() - 1) * size + 1;
        let last = (first + size - 1).min(self.total);
        let link = |n: u32| format!("{}/character?page={}", MOCK_BASE_URL, n);
        Ok(Page::new(
            PageInfo {
                count: self.total,
                pages,
                next: (page.value() < pages).then(|| link(page.value() + 1)),
                prev: (page.value() > 1).then(|| link(page.value() - 1)),
            },
            (first..=last).map(sample_entity).collect(),
        ))
    }

    fn entity(&self, id: EntityId) -> Result<Entity, FetchError> {
        if (1..=self.total).contains(&id.value()) {
            Ok(sample_entity(id.value()))
        } else {
            Err(FetchError::HttpStatus { status: 404 })
        }
    }
}

/// Handle that releases a held response.
#[derive(Debug, Clone)]
pub struct MockGate {
    notify: Arc<Notify>,
}

impl MockGate {
    /// Let the held request complete.
    pub fn release(&self) {
        self.notify.notify_one();
    }
}

/// Mock transport for testing.
///
/// Resolution order for a request: a forced failure, then a queued response
/// for that page/entity, then the synthetic catalog, otherwise a transport
/// error.
#[derive(Debug, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    pages: HashMap<PageNumber, VecDeque<Result<Page<Entity>, FetchError>>>,
    entities: HashMap<EntityId, VecDeque<Result<Entity, FetchError>>>,
    catalog: Option<Catalog>,
    page_holds: HashMap<PageNumber, Arc<Notify>>,
    entity_holds: HashMap<EntityId, Arc<Notify>>,
    page_requests: Vec<PageNumber>,
    entity_requests: Vec<EntityId>,
    fail_next: Option<FetchError>,
}

impl MockTransport {
    /// Create a new mock transport with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that serves a synthetic collection of `total` entities
    /// split into pages of `page_size`.
    pub fn with_catalog(total: u64, page_size: u32) -> Self {
        let transport = Self::new();
        transport.inner().catalog = Some(Catalog { total, page_size });
        transport
    }

    fn inner(&self) -> MutexGuard<'_, MockTransportInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a page to be returned for the next request of `page`.
    pub fn queue_page(&self, page: PageNumber, response: Page<Entity>) {
        self.inner()
            .pages
            .entry(page)
            .or_default()
            .push_back(Ok(response));
    }

    /// Queue a failure for the next request of `page`.
    pub fn queue_page_error(&self, page: PageNumber, error: FetchError) {
        self.inner()
            .pages
            .entry(page)
            .or_default()
            .push_back(Err(error));
    }

    /// Queue an entity to be returned for the next request of its id.
    pub fn queue_entity(&self, entity: Entity) {
        self.inner()
            .entities
            .entry(entity.id)
            .or_default()
            .push_back(Ok(entity));
    }

    /// Queue a failure for the next request of `id`.
    pub fn queue_entity_error(&self, id: EntityId, error: FetchError) {
        self.inner()
            .entities
            .entry(id)
            .or_default()
            .push_back(Err(error));
    }

    /// Cause the next request of any kind to fail with the given error.
    pub fn fail_next(&self, error: FetchError) {
        self.inner().fail_next = Some(error);
    }

    /// Hold the next request for `page` until the returned gate is released.
    pub fn hold_page(&self, page: PageNumber) -> MockGate {
        let notify = Arc::new(Notify::new());
        self.inner().page_holds.insert(page, Arc::clone(&notify));
        MockGate { notify }
    }

    /// Hold the next request for `id` until the returned gate is released.
    pub fn hold_entity(&self, id: EntityId) -> MockGate {
        let notify = Arc::new(Notify::new());
        self.inner().entity_holds.insert(id, Arc::clone(&notify));
        MockGate { notify }
    }

    /// Pages requested so far, in request order.
    pub fn page_requests(&self) -> Vec<PageNumber> {
        self.inner().page_requests.clone()
    }

    /// Entities requested so far, in request order.
    pub fn entity_requests(&self) -> Vec<EntityId> {
        self.inner().entity_requests.clone()
    }

    /// Clear all state (queues, holds, recorded requests, catalog).
    pub fn reset(&self) {
        *self.inner() = MockTransportInner::default();
    }
}

impl Clone for MockTransport {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn fetch_page(&self, page: PageNumber) -> Result<Page<Entity>, FetchError> {
        let hold = {
            let mut inner = self.inner();
            inner.page_requests.push(page);
            inner.page_holds.remove(&page)
        };
        if let Some(notify) = hold {
            notify.notified().await;
        }

        let mut inner = self.inner();
        if let Some(error) = inner.fail_next.take() {
            return Err(error);
        }
        if let Some(response) = inner.pages.get_mut(&page).and_then(VecDeque::pop_front) {
            return response;
        }
        match inner.catalog {
            Some(catalog) => catalog.page(page),
            None => Err(FetchError::transport(format!(
                "no mock response queued for page {}",
                page
            ))),
        }
    }

    async fn fetch_entity(&self, id: EntityId) -> Result<Entity, FetchError> {
        let hold = {
            let mut inner = self.inner();
            inner.entity_requests.push(id);
            inner.entity_holds.remove(&id)
        };
        if let Some(notify) = hold {
            notify.notified().await;
        }

        let mut inner = self.inner();
        if let Some(error) = inner.fail_next.take() {
            return Err(error);
        }
        if let Some(response) = inner.entities.get_mut(&id).and_then(VecDeque::pop_front) {
            return response;
        }
        match inner.catalog {
            Some(catalog) => catalog.entity(id),
            None => Err(FetchError::transport(format!(
                "no mock response queued for entity {}",
                id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn p(n: u32) -> PageNumber {
        PageNumber::new(n).unwrap()
    }

    // ===========================================
    // Queued Response Tests
    // ===========================================

    #[tokio::test]
    async fn returns_queued_pages_in_order() {
        let transport = MockTransport::new();
        let first = Catalog {
            total: 2,
            page_size: 2,
        }
        .page(p(1))
        .unwrap();
        transport.queue_page(p(1), first.clone());
        transport.queue_page_error(p(1), FetchError::HttpStatus { status: 500 });

        assert_eq!(transport.fetch_page(p(1)).await.unwrap(), first);
        assert_eq!(
            transport.fetch_page(p(1)).await.unwrap_err(),
            FetchError::HttpStatus { status: 500 }
        );
    }

    #[tokio::test]
    async fn empty_mock_reports_transport_error() {
        let transport = MockTransport::new();
        let err = transport.fetch_page(p(1)).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));

        let err = transport.fetch_entity(EntityId::new(1)).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[tokio::test]
    async fn queued_entity_and_error() {
        let transport = MockTransport::new();
        transport.queue_entity(sample_entity(1));
        transport.queue_entity_error(EntityId::new(999), FetchError::HttpStatus { status: 404 });

        let rick = transport.fetch_entity(EntityId::new(1)).await.unwrap();
        assert_eq!(rick.name, "Rick Sanchez");
        let err = transport.fetch_entity(EntityId::new(999)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn forced_failure_applies_once() {
        let transport = MockTransport::with_catalog(40, 20);
        transport.fail_next(FetchError::transport("Network error"));

        let err = transport.fetch_page(p(1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Network error");
        assert!(transport.fetch_page(p(1)).await.is_ok());
    }

    // ===========================================
    // Catalog Tests
    // ===========================================

    #[tokio::test]
    async fn catalog_pages_cover_collection() {
        let transport = MockTransport::with_catalog(45, 20);

        let page1 = transport.fetch_page(p(1)).await.unwrap();
        assert_eq!(page1.len(), 20);
        assert_eq!(page1.info.count, 45);
        assert_eq!(page1.info.pages, 3);
        assert!(page1.info.next.as_deref().unwrap().ends_with("?page=2"));
        assert!(page1.info.prev.is_none());

        let page3 = transport.fetch_page(p(3)).await.unwrap();
        assert_eq!(page3.len(), 5);
        assert_eq!(page3.results[0].id, EntityId::new(41));
        assert!(!page3.info.has_next());
        assert!(page3.info.prev.as_deref().unwrap().ends_with("?page=2"));

        let err = transport.fetch_page(p(4)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn catalog_entities() {
        let transport = MockTransport::with_catalog(10, 5);
        let morty = transport.fetch_entity(EntityId::new(2)).await.unwrap();
        assert_eq!(morty.name, "Morty Smith");
        let err = transport.fetch_entity(EntityId::new(11)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn sample_entity_names() {
        assert_eq!(sample_entity(1).name, "Rick Sanchez");
        assert_eq!(sample_entity(5).name, "Jerry Smith");
        assert_eq!(sample_entity(6).name, "Character 6");
        assert_eq!(sample_entity(0).name, "Character 0");
    }

    // ===========================================
    // Hold and Recording Tests
    // ===========================================

    #[tokio::test]
    async fn held_request_waits_for_release() {
        let transport = MockTransport::with_catalog(40, 20);
        let gate = transport.hold_page(p(2));

        let clone = transport.clone();
        let pending = tokio::spawn(async move { clone.fetch_page(p(2)).await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!pending.is_finished());

        gate.release();
        let page = pending.await.unwrap().unwrap();
        assert_eq!(page.results[0].id, EntityId::new(21));
    }

    #[tokio::test]
    async fn release_before_request_does_not_block() {
        let transport = MockTransport::with_catalog(40, 20);
        let gate = transport.hold_entity(EntityId::new(3));
        gate.release();

        let entity = transport.fetch_entity(EntityId::new(3)).await.unwrap();
        assert_eq!(entity.name, "Summer Smith");
    }

    #[tokio::test]
    async fn records_requests() {
        let transport = MockTransport::with_catalog(100, 20);
        transport.fetch_page(p(1)).await.unwrap();
        transport.fetch_page(p(2)).await.unwrap();
        transport.fetch_entity(EntityId::new(7)).await.unwrap();

        assert_eq!(transport.page_requests(), vec![p(1), p(2)]);
        assert_eq!(transport.entity_requests(), vec![EntityId::new(7)]);
    }

    #[tokio::test]
    async fn clone_shares_state_and_reset_clears() {
        let transport = MockTransport::with_catalog(10, 5);
        let clone = transport.clone();
        clone.fetch_page(p(1)).await.unwrap();
        assert_eq!(transport.page_requests().len(), 1);

        transport.reset();
        assert!(clone.page_requests().is_empty());
        assert!(clone.fetch_page(p(1)).await.is_err());
    }
}
