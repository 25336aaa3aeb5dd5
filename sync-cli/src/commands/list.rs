//! Load the collection page by page and print it.

use anyhow::{Context, Result};
use std::sync::Arc;
use sync_client::{HttpTransport, ListSyncStore, MockTransport, PageOutcome, ScrollController, Transport};
use sync_core::ListView;

use crate::config::Config;

/// Size of the collection served in `--mock` mode.
pub const MOCK_TOTAL: u64 = 826;
/// Page size served in `--mock` mode.
pub const MOCK_PAGE_SIZE: u32 = 20;

/// Run the list command.
pub async fn run(config: &Config, pages: u32, use_mock: bool) -> Result<()> {
    let view = if use_mock {
        run_with(MockTransport::with_catalog(MOCK_TOTAL, MOCK_PAGE_SIZE), config, pages).await?
    } else {
        let transport =
            HttpTransport::new(config.http_config()).context("Failed to create HTTP transport")?;
        run_with(transport, config, pages).await?
    };

    print_view(&view);
    Ok(())
}

/// Load up to `pages` pages through the scroll controller.
///
/// Stops early when the server reports no further pages.
pub async fn run_with<T: Transport>(transport: T, config: &Config, pages: u32) -> Result<ListView> {
    let store = Arc::new(ListSyncStore::with_config(transport, config.store_config()));
    let controller = ScrollController::with_config(Arc::clone(&store), config.scroll_config());

    controller
        .load_initial()
        .await
        .context("Failed to load page 1")?;

    while loaded_pages(&store.list()) < pages {
        let next = loaded_pages(&store.list()) + 1;
        match controller
            .on_approaching_end()
            .await
            .with_context(|| format!("Failed to load page {}", next))?
        {
            Some(PageOutcome::Applied { .. }) => {}
            Some(outcome) => {
                tracing::warn!("page {} not applied: {:?}", next, outcome);
                break;
            }
            None => break,
        }
    }

    Ok(store.list())
}

fn loaded_pages(view: &ListView) -> u32 {
    view.current_page.map(|page| page.value()).unwrap_or(0)
}

fn print_view(view: &ListView) {
    if view.is_empty() {
        println!("No characters.");
        return;
    }

    for entity in &view.items {
        println!(
            "{:>5}  {:<32}  {:<8}  {}",
            entity.id.value(),
            entity.name,
            entity.status,
            entity.species
        );
    }

    println!();
    match view.total_count {
        Some(total) => println!("Showing {} of {} characters.", view.len(), total),
        None => println!("Showing {} characters.", view.len()),
    }
    if view.has_more {
        println!("More pages available (use --pages to load more).");
    }
}
