//! Test fixtures shared by the state machine tests.

use sync_types::{Entity, EntityId, Gender, LocationRef, Page, PageInfo, Status};

pub(crate) fn entity(id: u64) -> Entity {
    Entity {
        id: EntityId::new(id),
        name: format!("Entity {}", id),
        status: Status::Alive,
        species: "Human".into(),
        kind: String::new(),
        gender: Gender::Unknown,
        origin: LocationRef::default(),
        location: LocationRef::default(),
        image: format!("https://example.test/avatar/{}.jpeg", id),
        episode: vec![],
        url: format!("https://example.test/character/{}", id),
        created: "2017-11-04T18:48:46.250Z".into(),
    }
}

pub(crate) fn named(id: u64, name: &str) -> Entity {
    Entity {
        name: name.into(),
        ..entity(id)
    }
}

pub(crate) fn page(ids: impl IntoIterator<Item = u64>, has_next: bool) -> Page<Entity> {
    let results: Vec<Entity> = ids.into_iter().map(entity).collect();
    Page::new(
        PageInfo {
            count: results.len() as u64,
            pages: 1,
            next: has_next.then(|| "https://example.test/character?page=2".to_string()),
            prev: None,
        },
        results,
    )
}

pub(crate) fn page_range(ids: std::ops::RangeInclusive<u64>, has_next: bool) -> Page<Entity> {
    page(ids, has_next)
}
