//! La Fleur CLI - Catalog tools for static generation and content checks.
//!
//! # Usage
//!
//! ```bash
//! # Print every product slug the site would serve
//! la-fleur slugs
//!
//! # Render every product detail page to disk
//! la-fleur prerender --out dist
//!
//! # List published and draft products (requires SANITY_READ_TOKEN)
//! la-fleur check
//! ```
//!
//! # Commands
//!
//! - `slugs` - Enumerate product slugs (store first, then the built-in catalog)
//! - `prerender` - Write `<out>/products/<slug>/index.html` for each slug
//! - `check` - Read-only audit of published vs draft products
//!
//! All commands read the same environment as the storefront binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use la_fleur_storefront::config::StorefrontConfig;
use la_fleur_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "la-fleur")]
#[command(author, version, about = "La Fleur catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every product slug, one per line
    Slugs,
    /// Render product detail pages to static HTML
    Prerender {
        /// Output directory
        #[arg(short, long, default_value = "dist")]
        out: PathBuf,
    },
    /// Audit published and draft products in the content store
    Check,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "la_fleur_cli=info,la_fleur_storefront=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;

    match cli.command {
        Commands::Slugs => {
            let state = AppState::new(config)?;
            commands::slugs::print(&state).await;
        }
        Commands::Prerender { out } => {
            let state = AppState::new(config)?;
            let written = commands::prerender::run(&state, &out).await?;
            tracing::info!(pages = written, out = %out.display(), "Prerender complete");
        }
        Commands::Check => {
            let report = commands::check::run(&config).await?;
            commands::check::print(&report);
        }
    }
    Ok(())
}
