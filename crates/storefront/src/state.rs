//! Application state shared across handlers.

use std::sync::Arc;

use la_fleur_core::{ImageRef, VideoRef};

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::sanity::image::{ImageParams, ImageUrlBuilder};
use crate::sanity::{SanityClient, SanityError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and holds the one content
/// store client for the process, wrapped in the catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    images: Option<ImageUrlBuilder>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Without a Sanity project the catalog serves built-in products for the
    /// life of the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: StorefrontConfig) -> Result<Self, SanityError> {
        let (client, images) = match &config.sanity {
            Some(sanity) => (
                Some(SanityClient::new(sanity)?),
                Some(ImageUrlBuilder::new(&sanity.project_id, &sanity.dataset)),
            ),
            None => {
                tracing::warn!("SANITY_PROJECT_ID is not set; serving the built-in catalog");
                (None, None)
            }
        };

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::new(client),
                images,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// CDN URL for an image, or `None` if it cannot be resolved.
    #[must_use]
    pub fn image_url(&self, image: &ImageRef, params: ImageParams) -> Option<String> {
        self.inner.images.as_ref()?.image_url(image, params)
    }

    /// CDN URL for a video file, or `None` if it cannot be resolved.
    #[must_use]
    pub fn file_url(&self, video: &VideoRef) -> Option<String> {
        self.inner.images.as_ref()?.file_url(video)
    }
}
