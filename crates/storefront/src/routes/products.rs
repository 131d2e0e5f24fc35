//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use la_fleur_core::{CategoryFilter, Product, SortOrder, apply_selectors, listing};
use serde::Deserialize;
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::filters;
use crate::routes::not_found::not_found_page;
use crate::sanity::image::ImageParams;
use crate::state::AppState;
use crate::views::{
    BlockView, ImageView, LinkView, ProductCardView, SiteView, VideoView, category_pills,
    listing_href, rich_text,
};

const COVER_IMAGE: ImageParams = ImageParams::cover(800, 900);
const THUMBNAIL_IMAGE: ImageParams = ImageParams::cover(200, 200);
const MAX_THUMBNAILS: usize = 5;

const GUARANTEES: &[&str] = &[
    "3-Day Freshness Guarantee",
    "Same-Day Delivery",
    "Gift Packaging Included",
];

/// Listing selectors from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub sort: Option<String>,
}

// =============================================================================
// Listing
// =============================================================================

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub site: SiteView,
    pub heading: String,
    pub category_pills: Vec<LinkView>,
    pub sort_pills: Vec<LinkView>,
    pub products: Vec<ProductCardView>,
}

/// Heading for the listing: the active pill's label, "All" for a category
/// that is not in the vocabulary, "All Products" with no selector.
fn listing_heading(pills: &[LinkView], filter: &CategoryFilter) -> String {
    if *filter == CategoryFilter::All {
        return "All Products".to_string();
    }
    pills
        .iter()
        .find(|pill| pill.active)
        .map_or_else(|| "All".to_string(), |pill| pill.label.clone())
}

fn sort_pills(category: Option<&str>, sort: SortOrder) -> Vec<LinkView> {
    [
        (listing::PRICE_ASC, "Price: Low to High", SortOrder::PriceAsc),
        (listing::PRICE_DESC, "Price: High to Low", SortOrder::PriceDesc),
    ]
    .into_iter()
    .map(|(selector, label, order)| {
        LinkView::new(label, listing_href(category, Some(selector)), sort == order)
    })
    .collect()
}

/// Display product listing page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let category = query.category.as_deref();
    let sort = SortOrder::parse(query.sort.as_deref());
    let filter = CategoryFilter::parse(category);

    let products = state.catalog().fetch_all().await;
    let selected = apply_selectors(products, category, query.sort.as_deref());
    tracing::debug!(count = selected.len(), "Listing products");

    let category_pills = category_pills(&state, category, sort);

    ProductsIndexTemplate {
        site: SiteView::new(&state),
        heading: listing_heading(&category_pills, &filter),
        sort_pills: sort_pills(category.filter(|c| !c.trim().is_empty()), sort),
        category_pills,
        products: ProductCardView::list(&state, &selected),
    }
}

// =============================================================================
// Detail
// =============================================================================

/// Product detail display data.
#[derive(Clone)]
pub struct ProductView {
    pub title: String,
    pub price: String,
    pub short_description: Option<String>,
    pub category_label: Option<String>,
    pub category_href: Option<String>,
    pub cover: Option<ImageView>,
    pub thumbnails: Vec<ImageView>,
    pub videos: Vec<VideoView>,
    pub featured: bool,
    pub in_stock: bool,
    pub tags: Vec<String>,
    pub description: Vec<BlockView>,
}

impl ProductView {
    fn new(state: &AppState, product: &Product) -> Self {
        let thumbnails = if product.images.len() > 1 {
            product
                .images
                .iter()
                .take(MAX_THUMBNAILS)
                .enumerate()
                .filter_map(|(i, img)| {
                    let alt = format!("{} {}", product.title, i + 1);
                    ImageView::resolve(state, img, THUMBNAIL_IMAGE, alt)
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            title: product.title.clone(),
            price: state.config().shop.currency.format(product.price),
            short_description: product.short_description.clone(),
            category_label: product.category.as_ref().map(|c| c.label()),
            category_href: product
                .category
                .as_ref()
                .map(|c| listing_href(Some(c.as_str()), None)),
            cover: product
                .cover_image()
                .and_then(|img| ImageView::resolve(state, img, COVER_IMAGE, &product.title)),
            thumbnails,
            videos: product
                .videos
                .iter()
                .filter_map(|v| VideoView::resolve(state, v))
                .collect(),
            featured: product.featured,
            in_stock: product.in_stock,
            tags: product.tags.clone(),
            description: rich_text(&product.description),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub site: SiteView,
    pub product: ProductView,
    pub guarantees: &'static [&'static str],
}

impl ProductShowTemplate {
    /// Load the page for `slug`; `None` when no product has that slug.
    pub async fn load(state: &AppState, slug: &str) -> Option<Self> {
        let product = state.catalog().fetch_by_slug(slug).await?;
        Some(Self {
            site: SiteView::new(state),
            product: ProductView::new(state, &product),
            guarantees: GUARANTEES,
        })
    }
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match ProductShowTemplate::load(&state, &slug).await {
        Some(page) => {
            add_breadcrumb("navigation", "Viewed product page", Some(&[("slug", slug.as_str())]));
            page.into_response()
        }
        None => {
            tracing::info!(slug = %slug, "Product not found");
            not_found_page(&state)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pills() -> Vec<LinkView> {
        vec![
            LinkView::new("All", "/products", false),
            LinkView::new("Bestsellers", "/products?category=bestsellers", false),
            LinkView::new("Flowers in a Box", "/products?category=flowers-in-a-box", true),
        ]
    }

    #[test]
    fn test_heading_uses_active_label() {
        let filter = CategoryFilter::parse(Some("flowers in a box"));
        assert_eq!(listing_heading(&pills(), &filter), "Flowers in a Box");
    }

    #[test]
    fn test_heading_without_selector() {
        assert_eq!(listing_heading(&pills(), &CategoryFilter::All), "All Products");
    }

    #[test]
    fn test_heading_for_unknown_category() {
        let mut pills = pills();
        for pill in &mut pills {
            pill.active = false;
        }
        let filter = CategoryFilter::parse(Some("unknown-xyz"));
        assert_eq!(listing_heading(&pills, &filter), "All");
    }

    #[test]
    fn test_sort_pills_keep_category() {
        let pills = sort_pills(Some("bouquets"), SortOrder::PriceDesc);
        assert_eq!(pills.len(), 2);
        assert_eq!(
            pills.first().map(|p| p.href.as_str()),
            Some("/products?category=bouquets&sort=price-asc")
        );
        assert!(pills.last().is_some_and(|p| p.active));
    }
}
