//! Display data shared by several templates.
//!
//! Route modules keep their page-specific views; anything rendered on more
//! than one page (product cards, the site chrome, rich text) lives here.

use la_fleur_core::{
    Block, BlockStyle, CategoryFilter, ImageRef, Product, SortOrder, VideoRef,
};
use url::form_urlencoded;

use crate::sanity::image::ImageParams;
use crate::state::AppState;

/// Card image size on listing grids.
const CARD_IMAGE: ImageParams = ImageParams::cover(600, 700);

// =============================================================================
// Site Chrome
// =============================================================================

/// A navigation link, optionally marked as the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub label: String,
    pub href: String,
    pub active: bool,
}

impl LinkView {
    #[must_use]
    pub fn new(label: impl Into<String>, href: impl Into<String>, active: bool) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            active,
        }
    }
}

/// Header and footer data rendered by `base.html`.
#[derive(Debug, Clone)]
pub struct SiteView {
    pub phone: Option<String>,
    pub whatsapp_url: Option<String>,
    pub instagram_url: Option<String>,
    pub email: Option<String>,
    /// Shop links for the footer, one per configured category.
    pub shop_links: Vec<LinkView>,
}

impl SiteView {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        let shop = &state.config().shop;
        Self {
            phone: shop.phone.clone(),
            whatsapp_url: shop.whatsapp.as_ref().map(|n| format!("https://wa.me/{n}")),
            instagram_url: shop.instagram_url.clone(),
            email: shop.email.clone(),
            shop_links: shop
                .categories
                .iter()
                .map(|c| LinkView::new(&c.label, listing_href(Some(&c.value), None), false))
                .collect(),
        }
    }
}

// =============================================================================
// Listing Links
// =============================================================================

/// Link to the listing with the given selectors. Spaces are encoded as `%20`.
#[must_use]
pub fn listing_href(category: Option<&str>, sort: Option<&str>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(category) = category.filter(|c| !c.is_empty()) {
        query.append_pair("category", category);
    }
    if let Some(sort) = sort.filter(|s| !s.is_empty()) {
        query.append_pair("sort", sort);
    }
    let query = query.finish().replace('+', "%20");

    if query.is_empty() {
        "/products".to_string()
    } else {
        format!("/products?{query}")
    }
}

/// Category pills: "All", "Bestsellers", then the configured vocabulary.
///
/// Each link keeps the current sort.
#[must_use]
pub fn category_pills(state: &AppState, category: Option<&str>, sort: SortOrder) -> Vec<LinkView> {
    let filter = CategoryFilter::parse(category);
    let sort = sort.as_selector();

    let mut pills = vec![
        LinkView::new("All", listing_href(None, sort), filter == CategoryFilter::All),
        LinkView::new(
            "Bestsellers",
            listing_href(Some(la_fleur_core::listing::BESTSELLERS), sort),
            filter == CategoryFilter::Bestsellers,
        ),
    ];
    pills.extend(state.config().shop.categories.iter().map(|option| {
        let active = category.is_some_and(|c| option.is_selected_by(c));
        LinkView::new(&option.label, listing_href(Some(&option.value), sort), active)
    }));
    pills
}

// =============================================================================
// Products and Media
// =============================================================================

/// Image display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

impl ImageView {
    /// Resolve an image; `None` renders the placeholder.
    #[must_use]
    pub fn resolve(
        state: &AppState,
        image: &ImageRef,
        params: ImageParams,
        alt: impl Into<String>,
    ) -> Option<Self> {
        Some(Self {
            url: state.image_url(image, params)?,
            alt: alt.into(),
        })
    }
}

/// Video display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoView {
    pub url: String,
    pub caption: Option<String>,
}

impl VideoView {
    #[must_use]
    pub fn resolve(state: &AppState, video: &VideoRef) -> Option<Self> {
        Some(Self {
            url: state.file_url(video)?,
            caption: video.caption.clone(),
        })
    }
}

/// Product card shown on the listing and home pages.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub href: String,
    pub title: String,
    pub price: String,
    pub short_description: Option<String>,
    pub category_label: Option<String>,
    pub image: Option<ImageView>,
    pub featured: bool,
    pub in_stock: bool,
}

impl ProductCardView {
    #[must_use]
    pub fn new(state: &AppState, product: &Product) -> Self {
        Self {
            href: format!("/products/{}", product.slug),
            title: product.title.clone(),
            price: state.config().shop.currency.format(product.price),
            short_description: product.short_description.clone(),
            category_label: product.category.as_ref().map(|c| c.label()),
            image: product
                .cover_image()
                .and_then(|img| ImageView::resolve(state, img, CARD_IMAGE, &product.title)),
            featured: product.featured,
            in_stock: product.in_stock,
        }
    }

    /// Cards for a list of products, in order.
    #[must_use]
    pub fn list(state: &AppState, products: &[Product]) -> Vec<Self> {
        products.iter().map(|p| Self::new(state, p)).collect()
    }
}

// =============================================================================
// Rich Text
// =============================================================================

/// A run of text with its decorations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanView {
    pub text: String,
    pub strong: bool,
    pub em: bool,
}

/// A rendered block; `tag` is one of `h1`, `h2`, `h3`, `p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockView {
    pub tag: &'static str,
    pub spans: Vec<SpanView>,
}

/// Convert authored blocks for rendering, dropping blocks with no text.
#[must_use]
pub fn rich_text(blocks: &[Block]) -> Vec<BlockView> {
    blocks
        .iter()
        .filter(|block| !block.plain_text().trim().is_empty())
        .map(|block| BlockView {
            tag: match block.style {
                BlockStyle::H1 => "h1",
                BlockStyle::H2 => "h2",
                BlockStyle::H3 => "h3",
                BlockStyle::Normal => "p",
            },
            spans: block
                .children
                .iter()
                .map(|span| SpanView {
                    text: span.text.clone(),
                    strong: span.is_strong(),
                    em: span.is_em(),
                })
                .collect(),
        })
        .collect()
}
