//! Slug enumeration for static generation.

use la_fleur_storefront::state::AppState;

/// Print each slug on its own line.
///
/// Falls back to the built-in catalog like the site does, so the list is
/// never empty.
#[allow(clippy::print_stdout)]
pub async fn print(state: &AppState) {
    let slugs = state.catalog().enumerate_slugs().await;
    tracing::info!(count = slugs.len(), "Enumerated slugs");
    for slug in slugs {
        println!("{slug}");
    }
}
