//! Table styling services page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use la_fleur_core::{SortOrder, TableStylingContent};
use tracing::instrument;

use crate::filters;
use crate::sanity::image::ImageParams;
use crate::state::AppState;
use crate::views::{BlockView, ImageView, LinkView, SiteView, VideoView, category_pills, rich_text};

const GALLERY_IMAGE: ImageParams = ImageParams::cover(900, 1125);
const GALLERY_THUMBNAIL: ImageParams = ImageParams::cover(160, 160);

/// Shown when the studio has no intro or body copy.
const FALLBACK_COPY: &[&str] = &[
    "We create elegant floral table styling designed to transform your celebration into a \
     refined visual experience.",
    "Share your vision with us, or allow us to develop a bespoke floral concept tailored to \
     your event, theme, and venue. From intimate dinners to sophisticated gatherings, every \
     detail is carefully curated to reflect your style.",
    "Each project is individually designed, and pricing is provided upon request. Contact us \
     to discuss your event and receive a personalised proposal.",
];

/// A gallery photo with its thumbnail.
#[derive(Debug, Clone)]
pub struct GalleryImage {
    pub full: ImageView,
    pub thumbnail: Option<ImageView>,
}

/// Table styling page template.
#[derive(Template, WebTemplate)]
#[template(path = "table_styling.html")]
pub struct TableStylingTemplate {
    pub site: SiteView,
    pub nav_pills: Vec<LinkView>,
    pub intro: Option<String>,
    pub body: Vec<BlockView>,
    /// Built-in paragraphs, non-empty only when the studio has no copy.
    pub fallback_copy: &'static [&'static str],
    pub images: Vec<GalleryImage>,
    pub videos: Vec<VideoView>,
}

impl TableStylingTemplate {
    fn new(state: &AppState, content: &TableStylingContent) -> Self {
        let mut nav_pills = category_pills(state, None, SortOrder::Upstream);
        for pill in &mut nav_pills {
            pill.active = false;
        }
        nav_pills.push(LinkView::new("Table Styling", "/table-styling", true));

        let images = content
            .images
            .iter()
            .enumerate()
            .filter_map(|(i, img)| {
                let alt = format!("Table styling {}", i + 1);
                Some(GalleryImage {
                    thumbnail: ImageView::resolve(state, img, GALLERY_THUMBNAIL, alt.as_str()),
                    full: ImageView::resolve(state, img, GALLERY_IMAGE, alt)?,
                })
            })
            .collect();

        Self {
            site: SiteView::new(state),
            nav_pills,
            intro: content
                .intro
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            body: rich_text(&content.body),
            fallback_copy: if content.has_no_copy() {
                FALLBACK_COPY
            } else {
                &[]
            },
            images,
            videos: content
                .videos
                .iter()
                .filter_map(|v| VideoView::resolve(state, v))
                .collect(),
        }
    }

    /// Whether the gallery has anything to show.
    #[must_use]
    pub fn has_media(&self) -> bool {
        !self.images.is_empty() || !self.videos.is_empty()
    }
}

/// Display the table styling page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let content = state.catalog().fetch_table_styling().await;
    TableStylingTemplate::new(&state, &content)
}
