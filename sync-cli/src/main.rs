//! # pagesync
//!
//! CLI for browsing a paginated REST resource with pagesync.
//!
//! ## Commands
//!
//! - `list`: Load the collection page by page and print it
//! - `show`: Fetch and print a single character
//! - `config`: Print the effective configuration
//!
//! ## Example
//!
//! ```bash
//! # First three pages from the public API
//! pagesync list --pages 3
//!
//! # One character
//! pagesync show 1
//!
//! # Offline, against a synthetic collection
//! pagesync --mock list
//!
//! # Debug logging of every request
//! RUST_LOG=debug pagesync list
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sync_types::EntityId;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::Config;

/// CLI for browsing a paginated REST resource with pagesync.
#[derive(Parser, Debug)]
#[command(name = "pagesync")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API root, overriding the configuration file
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Use a synthetic in-memory collection instead of the network
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the collection page by page and print it
    List {
        /// Number of pages to load
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },

    /// Fetch and print a single character
    Show {
        /// Character id
        id: u64,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_base_url(cli.base_url);

    match cli.command {
        Commands::List { pages } => {
            commands::list::run(&config, pages, cli.mock).await?;
        }
        Commands::Show { id } => {
            commands::show::run(&config, EntityId::new(id), cli.mock).await?;
        }
        Commands::Config => {
            commands::config::run(&config)?;
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: warn).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pagesync", "list", "--pages", "3", "--mock"]).unwrap();
        assert!(cli.mock);
        assert!(matches!(cli.command, Commands::List { pages: 3 }));
    }

    #[test]
    fn rejects_zero_pages() {
        assert!(Cli::try_parse_from(["pagesync", "list", "--pages", "0"]).is_err());
    }
}
