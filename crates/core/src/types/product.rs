//! The product entity and its media and rich-text parts.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Category, Price, Slug};

/// Opaque, stable identifier assigned by the content store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wrap a store identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifies an unpublished draft revision.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.0.starts_with("drafts.")
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Focal point of an image, as fractions of its width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Fractions trimmed from each edge of an image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Crop {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// A reference to an image asset, with optional editorial crop and hotspot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Asset reference, e.g. `image-<id>-<width>x<height>-<format>`.
    pub asset_ref: String,
    pub hotspot: Option<Hotspot>,
    pub crop: Option<Crop>,
}

impl ImageRef {
    /// Reference an asset without crop or hotspot.
    #[must_use]
    pub fn new(asset_ref: impl Into<String>) -> Self {
        Self {
            asset_ref: asset_ref.into(),
            hotspot: None,
            crop: None,
        }
    }
}

/// A reference to a video file asset with an optional caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef {
    /// File asset reference, e.g. `file-<id>-<extension>`.
    pub asset_ref: String,
    pub caption: Option<String>,
}

/// Text style of a rich-text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlockStyle {
    H1,
    H2,
    H3,
    #[default]
    Normal,
}

impl BlockStyle {
    /// Parse an authored style name; unknown styles render as paragraphs.
    #[must_use]
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("h1") => Self::H1,
            Some("h2") => Self::H2,
            Some("h3") => Self::H3,
            _ => Self::Normal,
        }
    }
}

/// A run of text inside a block with its decorator marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    #[serde(default)]
    pub marks: Vec<String>,
}

impl Span {
    /// Plain, unmarked text.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_strong(&self) -> bool {
        self.marks.iter().any(|m| m == "strong")
    }

    #[must_use]
    pub fn is_em(&self) -> bool {
        self.marks.iter().any(|m| m == "em")
    }
}

/// One block of authored rich text (a heading or a paragraph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub style: BlockStyle,
    pub children: Vec<Span>,
}

impl Block {
    /// A normal paragraph holding a single unmarked span.
    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            style: BlockStyle::Normal,
            children: vec![Span::plain(text)],
        }
    }

    /// The concatenated text of every span.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A product offered by the shop.
///
/// Products are authored and owned by the content store; nothing in this
/// workspace mutates one after it has been validated at ingress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub slug: Slug,
    pub title: String,
    pub price: Price,
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Vec<Block>,
    pub category: Option<Category>,
    pub in_stock: bool,
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    pub videos: Vec<VideoRef>,
}

impl Product {
    /// The cover image (first in display order), if any.
    #[must_use]
    pub fn cover_image(&self) -> Option<&ImageRef> {
        self.images.first()
    }
}
