//! Integration tests for La Fleur.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process router tests (no network)
//! cargo test -p la-fleur-integration-tests
//!
//! # Live content store tests (reads SANITY_* from the environment)
//! cargo test -p la-fleur-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_pages` - Every route against the built-in catalog
//! - `live_sanity` - Catalog reads against a real Sanity project

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use la_fleur_storefront::config::{SentryConfig, ShopConfig, StorefrontConfig};
use la_fleur_storefront::state::AppState;
use tower::ServiceExt;

/// Base URL used by every test configuration.
pub const TEST_BASE_URL: &str = "https://lafleur.example/";

/// Configuration with no content store and the default shop settings.
#[must_use]
pub fn unconfigured_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: url::Url::parse(TEST_BASE_URL).unwrap(),
        sanity: None,
        shop: ShopConfig {
            phone: Some("+1 (555) 010-2030".to_string()),
            whatsapp: Some("15550102030".to_string()),
            instagram_url: Some("https://instagram.com/lafleur".to_string()),
            email: Some("hello@lafleur.example".to_string()),
            ..ShopConfig::default()
        },
        sentry: SentryConfig::default(),
    }
}

/// Router serving the built-in catalog.
#[must_use]
pub fn unconfigured_app() -> Router {
    la_fleur_storefront::app(AppState::new(unconfigured_config()).unwrap())
}

/// A response reduced to what the tests look at.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> TestResponse {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}
