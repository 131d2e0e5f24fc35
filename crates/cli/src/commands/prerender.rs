//! Static rendering of product detail pages.
//!
//! # Usage
//!
//! ```bash
//! la-fleur prerender --out dist
//! ```
//!
//! Writes `dist/products/<slug>/index.html` for every enumerated slug. Pages
//! are rendered with the same templates and fallback policy as the live site.

use std::path::{Path, PathBuf};

use askama::Template;
use la_fleur_core::Slug;
use la_fleur_storefront::routes::products::ProductShowTemplate;
use la_fleur_storefront::state::AppState;
use thiserror::Error;

/// Errors that can occur while prerendering.
#[derive(Debug, Error)]
pub enum PrerenderError {
    /// A page could not be written.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A template failed to render.
    #[error("Template error for {slug}: {source}")]
    Template {
        slug: String,
        source: askama::Error,
    },
}

/// Output file for a product page.
#[must_use]
pub fn page_path(out: &Path, slug: &Slug) -> PathBuf {
    out.join("products").join(slug.as_str()).join("index.html")
}

/// Render every product page under `out`, returning how many were written.
///
/// Slugs whose product cannot be loaded are skipped with a warning.
///
/// # Errors
///
/// Returns an error if a template fails to render or a file cannot be written.
pub async fn run(state: &AppState, out: &Path) -> Result<usize, PrerenderError> {
    let slugs = state.catalog().enumerate_slugs().await;
    let mut written = 0;

    for slug in &slugs {
        let Some(page) = ProductShowTemplate::load(state, slug.as_str()).await else {
            tracing::warn!(slug = %slug, "No product for enumerated slug, skipping");
            continue;
        };

        let html = page.render().map_err(|source| PrerenderError::Template {
            slug: slug.to_string(),
            source,
        })?;

        let path = page_path(out, slug);
        write_page(&path, &html).await?;
        tracing::debug!(path = %path.display(), "Wrote page");
        written += 1;
    }

    Ok(written)
}

async fn write_page(path: &Path, html: &str) -> Result<(), PrerenderError> {
    let io_error = |source| PrerenderError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await.map_err(io_error)?;
    }
    tokio::fs::write(path, html).await.map_err(io_error)
}
