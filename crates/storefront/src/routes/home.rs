//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::catalog::DEFAULT_FEATURED_LIMIT;
use crate::filters;
use crate::sanity::image::ImageParams;
use crate::state::AppState;
use crate::views::{ImageView, LinkView, ProductCardView, SiteView, listing_href};

/// Carousel photo size for the about and services sections.
const CAROUSEL_IMAGE: ImageParams = ImageParams::cover(800, 1000);

// =============================================================================
// Static Section Content
// =============================================================================

/// A titled paragraph in one of the marketing sections.
#[derive(Clone)]
pub struct Feature {
    pub title: &'static str,
    pub text: &'static str,
}

/// A customer review for display on the homepage.
#[derive(Clone)]
pub struct ReviewView {
    pub name: &'static str,
    pub text: &'static str,
    pub when: &'static str,
}

impl ReviewView {
    /// First letter of the reviewer's name, for the avatar.
    #[must_use]
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

const TRUST_BADGES: &[&str] = &[
    "Same-day delivery",
    "3-day freshness guarantee",
    "Premium Dutch flowers",
];

const DELIVERY: &[Feature] = &[
    Feature {
        title: "Delivery Within 1 Hour",
        text: "If flowers are in stock and you are within our delivery zone.",
    },
    Feature {
        title: "Fresh Flowers",
        text: "Sourced from the Netherlands, Ecuador, Kenya, Colombia and more.",
    },
    Feature {
        title: "Order by Phone",
        text: "Call us to order or customise your bouquet.",
    },
];

const WHY_US: &[Feature] = &[
    Feature {
        title: "3-Day Freshness Guarantee",
        text: "Only the freshest flowers leave the studio. If your bouquet wilts within 3 days \
               and the care instructions were followed, we replace it free of charge.",
    },
    Feature {
        title: "Exceptional Service",
        text: "From choosing the perfect bouquet to a delivery that arrives on time, we are \
               with you every step of the way.",
    },
    Feature {
        title: "Thoughtful Packaging",
        text: "Each bouquet travels in an aqua pack inside a protective box, with flower food, \
               care instructions and a complimentary card.",
    },
];

const PACKAGING: &[&str] = &[
    "Signature ribbon & paper wrapping",
    "Aqua box to keep blooms hydrated",
    "Craft bag for easy carrying",
    "Flower food & care instructions",
    "Complimentary note card",
];

const REVIEWS: &[ReviewView] = &[
    ReviewView {
        name: "Natalie M.",
        text: "Absolutely stunning experience! The flowers were incredibly fresh and beautifully \
               arranged. Everything felt premium.",
        when: "a week ago",
    },
    ReviewView {
        name: "Alicia B.",
        text: "They created a masterpiece for same-day delivery, and their customer service was \
               above and beyond. I'm a very happy customer!",
        when: "a month ago",
    },
    ReviewView {
        name: "Maria R.",
        text: "My favourite flower shop! Their bouquets are always elegant and fresh, and \
               deliveries are right on time. I order only from them now!",
        when: "2 months ago",
    },
];

// =============================================================================
// Template
// =============================================================================

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub site: SiteView,
    pub trust_badges: &'static [&'static str],
    /// "All" followed by the configured categories.
    pub category_links: Vec<LinkView>,
    /// Featured products, at most eight.
    pub bestsellers: Vec<ProductCardView>,
    pub delivery: &'static [Feature],
    pub why_us: &'static [Feature],
    pub about_images: Vec<ImageView>,
    pub services_images: Vec<ImageView>,
    pub packaging: &'static [&'static str],
    pub reviews: &'static [ReviewView],
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog();
    let (featured, content) = tokio::join!(
        catalog.fetch_featured(DEFAULT_FEATURED_LIMIT),
        catalog.fetch_home_content(),
    );

    let carousel = |images: &[la_fleur_core::ImageRef], alt: &str| -> Vec<ImageView> {
        images
            .iter()
            .filter_map(|img| ImageView::resolve(&state, img, CAROUSEL_IMAGE, alt))
            .collect()
    };

    let mut category_links = vec![LinkView::new("All", "/products", false)];
    category_links.extend(
        state
            .config()
            .shop
            .categories
            .iter()
            .map(|c| LinkView::new(&c.label, listing_href(Some(&c.value), None), false)),
    );

    HomeTemplate {
        site: SiteView::new(&state),
        trust_badges: TRUST_BADGES,
        category_links,
        bestsellers: ProductCardView::list(&state, &featured),
        delivery: DELIVERY,
        why_us: WHY_US,
        about_images: carousel(&content.about_images, "About La Fleur"),
        services_images: carousel(&content.services_images, "Our services"),
        packaging: PACKAGING,
        reviews: REVIEWS,
    }
}
