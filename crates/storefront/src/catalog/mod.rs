//! Catalog retrieval with an explicit fallback policy.
//!
//! Every read goes to the content store first. When the store is not
//! configured, the query fails, or nothing usable comes back, the built-in
//! catalog answers instead. Store errors stop here: callers always get a
//! product list (or `None` for an unknown slug), never an error.
//!
//! Fallback is all or nothing; store data and built-in data are never mixed
//! in one answer.

pub mod fallback;

use la_fleur_core::{HomeContent, Product, Slug, TableStylingContent};
use serde_json::Value;
use tracing::instrument;

use crate::sanity::documents::{
    SiteSettingsDocument, TableStylingDocument, decode_product, decode_products, decode_singleton,
    decode_slugs,
};
use crate::sanity::{ContentSource, Query, ReadMode, SanityClient, SanityError, queries};

/// Bestsellers shown on the home page.
pub const DEFAULT_FEATURED_LIMIT: usize = 8;

/// Why a read was answered without store data.
#[derive(Debug)]
pub enum FallbackReason {
    /// No project configured.
    Unconfigured,
    /// The query failed or timed out, or the body was unusable.
    Failed(SanityError),
    /// The store answered, but with nothing usable.
    Empty,
}

/// Result of one store read.
#[derive(Debug)]
pub enum StoreOutcome<T> {
    Fetched(T),
    Fallback(FallbackReason),
}

impl<T> StoreOutcome<T> {
    /// The fetched value, or `fallback()` after logging why it was needed.
    pub fn or_fallback(self, query: &str, fallback: impl FnOnce() -> T) -> T {
        match self {
            Self::Fetched(value) => value,
            Self::Fallback(reason) => {
                match &reason {
                    FallbackReason::Unconfigured => {
                        tracing::debug!(query, "Content store not configured, using fallback");
                    }
                    FallbackReason::Failed(error) => {
                        tracing::error!(query, error = %error, "Content store query failed, using fallback");
                    }
                    FallbackReason::Empty => {
                        tracing::info!(query, "Content store returned nothing, using fallback");
                    }
                }
                fallback()
            }
        }
    }
}

/// Product catalog backed by a content source.
#[derive(Debug, Clone)]
pub struct Catalog<S = SanityClient> {
    source: Option<S>,
    fallback: Vec<Product>,
}

impl<S: ContentSource> Catalog<S> {
    /// Catalog over `source` with the built-in fallback products.
    ///
    /// `None` means the store is not configured; every read falls back.
    #[must_use]
    pub fn new(source: Option<S>) -> Self {
        Self::with_fallback(source, fallback::products())
    }

    /// Catalog with a specific fallback product list.
    #[must_use]
    pub const fn with_fallback(source: Option<S>, fallback: Vec<Product>) -> Self {
        Self { source, fallback }
    }

    /// Whether a content store is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.source.is_some()
    }

    /// The built-in products.
    #[must_use]
    pub fn fallback_products(&self) -> &[Product] {
        &self.fallback
    }

    /// The underlying content source, if configured.
    #[must_use]
    pub const fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    async fn from_store<T>(
        &self,
        query: &Query,
        mode: ReadMode,
        decode: fn(Value) -> Result<T, SanityError>,
        is_empty: fn(&T) -> bool,
    ) -> StoreOutcome<T> {
        let Some(source) = &self.source else {
            return StoreOutcome::Fallback(FallbackReason::Unconfigured);
        };

        match source.query(query, mode).await.and_then(decode) {
            Ok(value) if is_empty(&value) => StoreOutcome::Fallback(FallbackReason::Empty),
            Ok(value) => StoreOutcome::Fetched(value),
            Err(error) => StoreOutcome::Fallback(FallbackReason::Failed(error)),
        }
    }

    async fn store_products(&self) -> StoreOutcome<Vec<Product>> {
        let query = Query::new("all_products", queries::ALL_PRODUCTS);
        self.from_store(&query, ReadMode::Fresh, decode_products, Vec::is_empty)
            .await
    }

    async fn store_featured(&self, limit: usize) -> StoreOutcome<Vec<Product>> {
        let query = Query::new("featured_products", queries::featured_products(limit));
        match self
            .from_store(&query, ReadMode::Fresh, decode_products, Vec::is_empty)
            .await
        {
            StoreOutcome::Fetched(products) => {
                let featured = featured_only(products, limit);
                if featured.is_empty() {
                    StoreOutcome::Fallback(FallbackReason::Empty)
                } else {
                    StoreOutcome::Fetched(featured)
                }
            }
            fallback @ StoreOutcome::Fallback(_) => fallback,
        }
    }

    async fn store_product(&self, slug: &Slug) -> StoreOutcome<Option<Product>> {
        let query =
            Query::new("product_by_slug", queries::PRODUCT_BY_SLUG).param("slug", slug.as_str());
        self.from_store(&query, ReadMode::Cached, decode_product, Option::is_none)
            .await
    }

    async fn store_slugs(&self) -> StoreOutcome<Vec<Slug>> {
        let query = Query::new("product_slugs", queries::PRODUCT_SLUGS);
        self.from_store(&query, ReadMode::Cached, decode_slugs, Vec::is_empty)
            .await
    }

    /// Every product, newest first.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Vec<Product> {
        self.store_products()
            .await
            .or_fallback("all_products", || self.fallback.clone())
    }

    /// Up to `limit` featured products.
    #[instrument(skip(self))]
    pub async fn fetch_featured(&self, limit: usize) -> Vec<Product> {
        if limit == 0 {
            return Vec::new();
        }
        self.store_featured(limit)
            .await
            .or_fallback("featured_products", || {
                featured_only(self.fallback.clone(), limit)
            })
    }

    /// The first product with this slug, from the store or else the built-in
    /// catalog. `None` when neither has it.
    #[instrument(skip(self))]
    pub async fn fetch_by_slug(&self, slug: &str) -> Option<Product> {
        let Ok(slug) = Slug::parse(slug) else {
            tracing::debug!("Not a valid slug, no product can match");
            return None;
        };

        self.store_product(&slug)
            .await
            .or_fallback("product_by_slug", || {
                self.fallback.iter().find(|p| p.slug == slug).cloned()
            })
    }

    /// Every product slug. Falls back to the built-in slugs, so this is
    /// never empty.
    #[instrument(skip(self))]
    pub async fn enumerate_slugs(&self) -> Vec<Slug> {
        self.store_slugs().await.or_fallback("product_slugs", || {
            self.fallback.iter().map(|p| p.slug.clone()).collect()
        })
    }

    /// Home page media. Missing or failed reads give empty carousels.
    #[instrument(skip(self))]
    pub async fn fetch_home_content(&self) -> HomeContent {
        let query = Query::new("site_settings", queries::SITE_SETTINGS);
        self.from_store(
            &query,
            ReadMode::Cached,
            decode_singleton::<SiteSettingsDocument, HomeContent>,
            Option::is_none,
        )
        .await
        .or_fallback("site_settings", || None)
        .unwrap_or_default()
    }

    /// Table styling page content. Missing or failed reads give empty
    /// content, which the page fills with its own copy.
    #[instrument(skip(self))]
    pub async fn fetch_table_styling(&self) -> TableStylingContent {
        let query = Query::new("table_styling", queries::TABLE_STYLING);
        self.from_store(
            &query,
            ReadMode::Fresh,
            decode_singleton::<TableStylingDocument, TableStylingContent>,
            Option::is_none,
        )
        .await
        .or_fallback("table_styling", || None)
        .unwrap_or_default()
    }
}

fn featured_only(products: Vec<Product>, limit: usize) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| p.featured)
        .take(limit)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Mutex;

    use la_fleur_core::{Category, Price, ProductId, apply_selectors};
    use serde_json::json;

    use super::*;

    /// Content source answering from canned responses keyed by query name.
    #[derive(Default)]
    struct Stub {
        responses: Vec<(&'static str, Value)>,
        fail: bool,
        calls: Mutex<Vec<(&'static str, ReadMode)>>,
    }

    impl Stub {
        fn with(name: &'static str, value: Value) -> Self {
            Self {
                responses: vec![(name, value)],
                ..Self::default()
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn modes(&self) -> Vec<(&'static str, ReadMode)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ContentSource for Stub {
        async fn query(&self, query: &Query, mode: ReadMode) -> Result<Value, SanityError> {
            self.calls.lock().unwrap().push((query.name(), mode));
            if self.fail {
                return Err(SanityError::Status {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            Ok(self
                .responses
                .iter()
                .find(|(name, _)| *name == query.name())
                .map_or(Value::Null, |(_, value)| value.clone()))
        }
    }

    fn doc(slug: &str, price: u32, category: &str, featured: bool) -> Value {
        json!({
            "_id": format!("id-{slug}"),
            "title": slug,
            "slug": { "current": slug },
            "price": price,
            "category": category,
            "inStock": true,
            "featured": featured,
        })
    }

    fn product(slug: &str, price: u32, category: &str, featured: bool) -> Product {
        Product {
            id: ProductId::new(format!("fallback-{slug}")),
            slug: Slug::parse(slug).unwrap(),
            title: slug.to_string(),
            price: Price::from_units(price),
            short_description: None,
            description: Vec::new(),
            category: Some(Category::new(category)),
            in_stock: true,
            featured,
            tags: Vec::new(),
            images: Vec::new(),
            videos: Vec::new(),
        }
    }

    fn slugs(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.slug.as_str()).collect()
    }

    #[tokio::test]
    async fn test_unconfigured_returns_fallback_in_order() {
        let catalog = Catalog::<Stub>::new(None);
        assert!(!catalog.is_configured());
        assert_eq!(catalog.fetch_all().await, fallback::products());
    }

    #[tokio::test]
    async fn test_empty_store_returns_fallback() {
        let catalog = Catalog::new(Some(Stub::with("all_products", json!([]))));
        assert_eq!(catalog.fetch_all().await, fallback::products());
    }

    #[tokio::test]
    async fn test_null_result_returns_fallback() {
        let catalog = Catalog::new(Some(Stub::default()));
        assert_eq!(catalog.fetch_all().await, fallback::products());
    }

    #[tokio::test]
    async fn test_failed_store_returns_fallback() {
        let catalog = Catalog::new(Some(Stub::failing()));
        assert_eq!(catalog.fetch_all().await, fallback::products());
        assert!(matches!(
            catalog.store_products().await,
            StoreOutcome::Fallback(FallbackReason::Failed(SanityError::Status { status: 503, .. }))
        ));
    }

    #[tokio::test]
    async fn test_all_invalid_documents_count_as_empty() {
        let catalog = Catalog::new(Some(Stub::with(
            "all_products",
            json!([{ "_id": "x", "title": "No slug", "price": 10 }]),
        )));
        assert!(matches!(
            catalog.store_products().await,
            StoreOutcome::Fallback(FallbackReason::Empty)
        ));
        assert_eq!(catalog.fetch_all().await, fallback::products());
    }

    #[tokio::test]
    async fn test_store_products_are_not_mixed_with_fallback() {
        let catalog = Catalog::new(Some(Stub::with(
            "all_products",
            json!([doc("newest", 40, "bouquets", false), doc("older", 60, "baskets", true)]),
        )));
        let products = catalog.fetch_all().await;
        assert_eq!(slugs(&products), vec!["newest", "older"]);
        assert_eq!(catalog.stub_modes(), vec![("all_products", ReadMode::Fresh)]);
    }

    #[tokio::test]
    async fn test_featured_is_limited_and_featured_only() {
        let docs: Vec<Value> = (0..12)
            .map(|i| doc(&format!("p{i}"), 10 + i, "bouquets", i % 4 != 3))
            .collect();
        let catalog = Catalog::new(Some(Stub::with("featured_products", json!(docs))));

        let featured = catalog.fetch_featured(DEFAULT_FEATURED_LIMIT).await;
        assert!(featured.len() <= DEFAULT_FEATURED_LIMIT);
        assert!(!featured.is_empty());
        assert!(featured.iter().all(|p| p.featured));
    }

    #[tokio::test]
    async fn test_featured_fallback_is_filtered_and_truncated() {
        let catalog = Catalog::<Stub>::new(None);
        let featured = catalog.fetch_featured(2).await;
        assert_eq!(featured.len(), 2);
        assert!(featured.iter().all(|p| p.featured));

        let all = catalog.fetch_featured(DEFAULT_FEATURED_LIMIT).await;
        assert!(all.len() <= DEFAULT_FEATURED_LIMIT);
        assert!(all.iter().all(|p| p.featured));
    }

    #[tokio::test]
    async fn test_featured_zero_limit() {
        let catalog = Catalog::<Stub>::new(None);
        assert!(catalog.fetch_featured(0).await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_by_slug_nonexistent() {
        let catalog = Catalog::<Stub>::new(None);
        assert!(catalog.fetch_by_slug("nonexistent-slug").await.is_none());

        let configured = Catalog::new(Some(Stub::default()));
        assert!(configured.fetch_by_slug("nonexistent-slug").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_by_slug_from_store() {
        let catalog = Catalog::new(Some(Stub::with(
            "product_by_slug",
            doc("store-only", 55, "bouquets", false),
        )));
        let product = catalog.fetch_by_slug("store-only").await.unwrap();
        assert_eq!(product.price, Price::from_units(55));
        assert_eq!(catalog.stub_modes(), vec![("product_by_slug", ReadMode::Cached)]);
    }

    #[tokio::test]
    async fn test_fetch_by_slug_probes_fallback() {
        let catalog = Catalog::new(Some(Stub::failing()));
        let product = catalog.fetch_by_slug("garden-bliss-bouquet").await.unwrap();
        assert_eq!(product.title, "Garden Bliss Bouquet");

        let missing = Catalog::new(Some(Stub::default()));
        assert!(missing.fetch_by_slug("rose-petal-romance").await.is_some());
    }

    #[tokio::test]
    async fn test_fetch_by_invalid_slug_skips_store() {
        let catalog = Catalog::new(Some(Stub::default()));
        assert!(catalog.fetch_by_slug("../etc/passwd").await.is_none());
        assert!(catalog.stub_modes().is_empty());
    }

    #[tokio::test]
    async fn test_enumerate_slugs_never_empty() {
        let unconfigured = Catalog::<Stub>::new(None);
        let slugs = unconfigured.enumerate_slugs().await;
        assert_eq!(slugs.len(), fallback::products().len());

        let empty = Catalog::new(Some(Stub::with("product_slugs", json!([]))));
        assert_eq!(empty.enumerate_slugs().await, slugs);

        let store = Catalog::new(Some(Stub::with(
            "product_slugs",
            json!([{ "slug": "a" }, { "slug": "b" }]),
        )));
        let store_slugs = store.enumerate_slugs().await;
        assert_eq!(
            store_slugs.iter().map(Slug::as_str).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }

    #[tokio::test]
    async fn test_home_content_defaults() {
        let catalog = Catalog::new(Some(Stub::failing()));
        assert_eq!(catalog.fetch_home_content().await, HomeContent::default());

        let configured = Catalog::new(Some(Stub::with(
            "site_settings",
            json!({
                "aboutImages": [{ "asset": { "_ref": "image-a-10x10-jpg" } }],
                "servicesImages": null
            }),
        )));
        let content = configured.fetch_home_content().await;
        assert_eq!(content.about_images.len(), 1);
        assert!(content.services_images.is_empty());
    }

    #[tokio::test]
    async fn test_table_styling_failure_is_empty() {
        let catalog = Catalog::new(Some(Stub::failing()));
        let content = catalog.fetch_table_styling().await;
        assert!(content.has_no_copy());
        assert!(!content.has_media());
        assert_eq!(catalog.stub_modes(), vec![("table_styling", ReadMode::Fresh)]);
    }

    #[tokio::test]
    async fn test_end_to_end_with_custom_fallback() {
        let catalog = Catalog::<Stub>::with_fallback(
            None,
            vec![
                product("a", 50, "bouquets", true),
                product("b", 30, "flowers-in-a-box", false),
            ],
        );
        let all = catalog.fetch_all().await;

        let bouquets = apply_selectors(all.clone(), Some("bouquets"), Some(""));
        assert_eq!(slugs(&bouquets), vec!["a"]);

        let by_price = apply_selectors(all.clone(), Some(""), Some("price-asc"));
        assert_eq!(slugs(&by_price), vec!["b", "a"]);

        let best = apply_selectors(all, Some("bestsellers"), Some(""));
        assert_eq!(slugs(&best), vec!["a"]);
    }

    impl Catalog<Stub> {
        fn stub_modes(&self) -> Vec<(&'static str, ReadMode)> {
            self.source.as_ref().map(Stub::modes).unwrap_or_default()
        }
    }
}
