//! Singleton page-content documents.

use serde::{Deserialize, Serialize};

use super::{Block, ImageRef, VideoRef};

/// Home page media managed in the studio's site settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HomeContent {
    /// Photos for the "About" carousel.
    pub about_images: Vec<ImageRef>,
    /// Photos for the "Services" carousel.
    pub services_images: Vec<ImageRef>,
}

/// Copy and media for the table styling services page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableStylingContent {
    pub intro: Option<String>,
    pub body: Vec<Block>,
    pub images: Vec<ImageRef>,
    pub videos: Vec<VideoRef>,
}

impl TableStylingContent {
    /// Whether the studio has supplied no copy at all.
    #[must_use]
    pub fn has_no_copy(&self) -> bool {
        self.intro.as_deref().is_none_or(|s| s.trim().is_empty()) && self.body.is_empty()
    }

    /// Whether there is anything for the media gallery.
    #[must_use]
    pub fn has_media(&self) -> bool {
        !self.images.is_empty() || !self.videos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_copy_or_media() {
        let content = TableStylingContent::default();
        assert!(content.has_no_copy());
        assert!(!content.has_media());
    }

    #[test]
    fn test_intro_counts_as_copy() {
        let content = TableStylingContent {
            intro: Some("Elegant floral table styling.".to_string()),
            ..Default::default()
        };
        assert!(!content.has_no_copy());
    }

    #[test]
    fn test_blank_intro_is_no_copy() {
        let content = TableStylingContent {
            intro: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(content.has_no_copy());
    }
}
