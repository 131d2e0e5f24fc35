//! XML sitemap.

use askama::Template;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use la_fleur_core::Slug;
use tracing::instrument;
use url::Url;

use crate::error::Result;
use crate::state::AppState;

/// Pages that exist regardless of catalog contents, relative to the site root.
const STATIC_PATHS: &[&str] = &["", "products", "table-styling"];

/// Sitemap document template.
#[derive(Template)]
#[template(path = "sitemap.xml")]
pub struct SitemapTemplate {
    pub urls: Vec<String>,
}

/// Absolute page URLs: the static pages, then one per product slug.
///
/// Paths are resolved under `base`, so a site mounted at `/shop` lists
/// `/shop/products/...`. A base without a trailing slash is treated as a
/// directory.
///
/// # Errors
///
/// Returns an error if a path cannot be joined onto `base`.
pub fn sitemap_urls(base: &Url, slugs: &[Slug]) -> std::result::Result<Vec<String>, url::ParseError> {
    let mut root = base.clone();
    if !root.path().ends_with('/') {
        let path = format!("{}/", root.path());
        root.set_path(&path);
    }

    STATIC_PATHS
        .iter()
        .map(|path| (*path).to_string())
        .chain(slugs.iter().map(|slug| format!("products/{slug}")))
        .map(|path| root.join(&path).map(String::from))
        .collect()
}

/// Serve `/sitemap.xml`.
#[instrument(skip(state))]
pub async fn sitemap(State(state): State<AppState>) -> Result<Response> {
    let slugs = state.catalog().enumerate_slugs().await;
    let urls = sitemap_urls(&state.config().base_url, &slugs)?;
    tracing::debug!(count = urls.len(), "Rendering sitemap");

    let body = SitemapTemplate { urls }.render()?;
    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        body,
    )
        .into_response())
}
