//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check
//!
//! # Products
//! GET  /products               - Product listing (?category=&sort=)
//! GET  /products/{slug}        - Product detail
//!
//! # Pages
//! GET  /table-styling          - Table styling services
//! GET  /sitemap.xml            - Sitemap
//!
//! Anything else renders the 404 page.
//! ```

pub mod home;
pub mod not_found;
pub mod products;
pub mod sitemap;
pub mod table_styling;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Services
        .route("/table-styling", get(table_styling::show))
        // Search engines
        .route("/sitemap.xml", get(sitemap::sitemap))
        .fallback(not_found::fallback)
}
