//! Category filtering and price sorting for product listings.
//!
//! Both selectors come straight from the listing page's query string, so
//! every input is accepted: an unknown category selects nothing and an
//! unknown sort keeps the upstream (newest-first) order.

use crate::types::{Product, normalize_category};

/// Selector value that filters to featured products instead of a category.
pub const BESTSELLERS: &str = "bestsellers";

/// Sort selector for ascending price.
pub const PRICE_ASC: &str = "price-asc";

/// Sort selector for descending price.
pub const PRICE_DESC: &str = "price-desc";

/// Which products a category selector keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Empty or absent selector: keep everything.
    All,
    /// The special `bestsellers` selector: keep featured products.
    Bestsellers,
    /// Keep products whose normalized category equals this key.
    Category(String),
}

impl CategoryFilter {
    /// Interpret a raw `category` query value.
    #[must_use]
    pub fn parse(selector: Option<&str>) -> Self {
        let normalized = selector.map(normalize_category).unwrap_or_default();
        if normalized.is_empty() {
            Self::All
        } else if normalized == BESTSELLERS {
            Self::Bestsellers
        } else {
            Self::Category(normalized)
        }
    }

    /// Whether `product` passes this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Bestsellers => product.featured,
            Self::Category(key) => product
                .category
                .as_ref()
                .is_some_and(|category| category.normalized() == *key),
        }
    }

    /// Keep the products that pass, preserving order.
    #[must_use]
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        match self {
            Self::All => products,
            _ => products.into_iter().filter(|p| self.matches(p)).collect(),
        }
    }
}

/// Listing order selected by the `sort` query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Keep the order the catalog returned (newest first).
    #[default]
    Upstream,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    /// Interpret a raw `sort` query value; anything unrecognized keeps
    /// upstream order.
    #[must_use]
    pub fn parse(selector: Option<&str>) -> Self {
        match selector.map(str::trim) {
            Some(PRICE_ASC) => Self::PriceAsc,
            Some(PRICE_DESC) => Self::PriceDesc,
            _ => Self::Upstream,
        }
    }

    /// The query value that selects this order, if any.
    #[must_use]
    pub const fn as_selector(&self) -> Option<&'static str> {
        match self {
            Self::Upstream => None,
            Self::PriceAsc => Some(PRICE_ASC),
            Self::PriceDesc => Some(PRICE_DESC),
        }
    }

    /// Sort in place. `slice::sort_by` is stable, so equal prices keep their
    /// relative input order in both directions.
    pub fn apply(self, products: &mut [Product]) {
        match self {
            Self::Upstream => {}
            Self::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        }
    }
}

/// Filter by category, then sort by price.
#[must_use]
pub fn apply_selectors(
    products: Vec<Product>,
    category: Option<&str>,
    sort: Option<&str>,
) -> Vec<Product> {
    let mut selected = CategoryFilter::parse(category).apply(products);
    SortOrder::parse(sort).apply(&mut selected);
    selected
}
