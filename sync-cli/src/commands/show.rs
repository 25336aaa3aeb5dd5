//! Fetch and print a single character.

use anyhow::{Context, Result};
use sync_client::{EntityOutcome, HttpTransport, ListSyncStore, MockTransport, Transport};
use sync_types::{Entity, EntityId};

use super::list::{MOCK_PAGE_SIZE, MOCK_TOTAL};
use crate::config::Config;

/// Run the show command.
pub async fn run(config: &Config, id: EntityId, use_mock: bool) -> Result<()> {
    let entity = if use_mock {
        run_with(MockTransport::with_catalog(MOCK_TOTAL, MOCK_PAGE_SIZE), config, id).await?
    } else {
        let transport =
            HttpTransport::new(config.http_config()).context("Failed to create HTTP transport")?;
        run_with(transport, config, id).await?
    };

    print_entity(&entity);
    Ok(())
}

/// Fetch one entity through the store.
pub async fn run_with<T: Transport>(transport: T, config: &Config, id: EntityId) -> Result<Entity> {
    let store = ListSyncStore::with_config(transport, config.store_config());
    match store
        .request_entity(id)
        .await
        .with_context(|| format!("Failed to load character {}", id))?
    {
        EntityOutcome::Loaded(entity) => Ok(*entity),
        EntityOutcome::Discarded => anyhow::bail!("Request for character {} was superseded", id),
    }
}

fn print_entity(entity: &Entity) {
    println!("{} (#{})", entity.name, entity.id.value());
    println!("  Status:   {}", entity.status);
    println!("  Species:  {}", entity.species);
    if !entity.kind.is_empty() {
        println!("  Type:     {}", entity.kind);
    }
    println!("  Gender:   {}", entity.gender);
    println!("  Origin:   {}", entity.origin.name);
    println!("  Location: {}", entity.location.name);
    println!("  Episodes: {}", entity.episode.len());
    println!("  Image:    {}", entity.image);
}
