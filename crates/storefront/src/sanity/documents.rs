//! Ingress validation for content store documents.
//!
//! Query results are loosely typed JSON: any projected field may be missing
//! or `null`. Documents are deserialized into permissive shapes here and then
//! converted into the strict core types. A document that fails validation is
//! logged and skipped; it never reaches the catalog.

use la_fleur_core::{
    Block, BlockStyle, Category, Crop, HomeContent, Hotspot, ImageRef, Price, PriceError,
    Product, ProductId, Slug, SlugError, Span, TableStylingContent, VideoRef,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::SanityError;

/// Reasons a product document is rejected at ingress.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// A required field is absent or empty.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The slug is not URL-safe.
    #[error("invalid slug: {0}")]
    InvalidSlug(#[from] SlugError),

    /// The price is negative or not a number.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),
}

// =============================================================================
// Raw Document Shapes
// =============================================================================

/// `{ "_ref": "..." }` asset pointer.
#[derive(Debug, Deserialize)]
pub struct AssetPointer {
    #[serde(rename = "_ref")]
    pub reference: Option<String>,
}

/// `{ "current": "..." }` slug object.
#[derive(Debug, Deserialize)]
pub struct SlugField {
    pub current: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImageDocument {
    pub asset: Option<AssetPointer>,
    pub hotspot: Option<Hotspot>,
    pub crop: Option<Crop>,
}

#[derive(Debug, Deserialize)]
pub struct VideoDocument {
    pub asset: Option<AssetPointer>,
    pub caption: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SpanDocument {
    pub text: Option<String>,
    pub marks: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct BlockDocument {
    #[serde(rename = "_type")]
    pub kind: Option<String>,
    pub style: Option<String>,
    pub children: Option<Vec<SpanDocument>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<SlugField>,
    pub price: Option<f64>,
    pub short_description: Option<String>,
    pub description: Option<Vec<BlockDocument>>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
    pub tags: Option<Vec<Option<String>>>,
    pub images: Option<Vec<ImageDocument>>,
    pub videos: Option<Vec<VideoDocument>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsDocument {
    pub about_images: Option<Vec<ImageDocument>>,
    pub services_images: Option<Vec<ImageDocument>>,
}

#[derive(Debug, Deserialize)]
pub struct TableStylingDocument {
    pub intro: Option<String>,
    pub body: Option<Vec<BlockDocument>>,
    pub images: Option<Vec<ImageDocument>>,
    pub videos: Option<Vec<VideoDocument>>,
}

#[derive(Debug, Deserialize)]
struct SlugEntry {
    slug: Option<String>,
}

/// One row of the product audit listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
}

impl AuditEntry {
    /// Whether this row is an unpublished draft.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        ProductId::new(self.id.as_str()).is_draft()
    }
}

// =============================================================================
// Conversions
// =============================================================================

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn convert_images(images: Option<Vec<ImageDocument>>) -> Vec<ImageRef> {
    images
        .unwrap_or_default()
        .into_iter()
        .filter_map(|image| {
            let asset_ref = image.asset.and_then(|a| a.reference)?;
            Some(ImageRef {
                asset_ref,
                hotspot: image.hotspot,
                crop: image.crop,
            })
        })
        .collect()
}

fn convert_videos(videos: Option<Vec<VideoDocument>>) -> Vec<VideoRef> {
    videos
        .unwrap_or_default()
        .into_iter()
        .filter_map(|video| {
            let asset_ref = video.asset.and_then(|a| a.reference)?;
            Some(VideoRef {
                asset_ref,
                caption: non_empty(video.caption),
            })
        })
        .collect()
}

fn convert_blocks(blocks: Option<Vec<BlockDocument>>) -> Vec<Block> {
    blocks
        .unwrap_or_default()
        .into_iter()
        .filter(|block| block.kind.as_deref() == Some("block"))
        .map(|block| Block {
            style: BlockStyle::from_name(block.style.as_deref()),
            children: block
                .children
                .unwrap_or_default()
                .into_iter()
                .map(|span| Span {
                    text: span.text.unwrap_or_default(),
                    marks: span.marks.unwrap_or_default(),
                })
                .collect(),
        })
        .collect()
}

impl TryFrom<ProductDocument> for Product {
    type Error = DocumentError;

    fn try_from(doc: ProductDocument) -> Result<Self, Self::Error> {
        let id = non_empty(doc.id).ok_or(DocumentError::MissingField("_id"))?;
        let title = non_empty(doc.title).ok_or(DocumentError::MissingField("title"))?;
        let slug = doc
            .slug
            .and_then(|s| s.current)
            .ok_or(DocumentError::MissingField("slug"))?;
        let price = doc.price.ok_or(DocumentError::MissingField("price"))?;

        Ok(Self {
            id: ProductId::new(id),
            slug: Slug::parse(&slug)?,
            title,
            price: Price::from_f64(price)?,
            short_description: non_empty(doc.short_description),
            description: convert_blocks(doc.description),
            category: non_empty(doc.category).map(Category::new),
            in_stock: doc.in_stock.unwrap_or(true),
            featured: doc.featured.unwrap_or(false),
            tags: doc
                .tags
                .unwrap_or_default()
                .into_iter()
                .filter_map(non_empty)
                .collect(),
            images: convert_images(doc.images),
            videos: convert_videos(doc.videos),
        })
    }
}

impl From<SiteSettingsDocument> for HomeContent {
    fn from(doc: SiteSettingsDocument) -> Self {
        Self {
            about_images: convert_images(doc.about_images),
            services_images: convert_images(doc.services_images),
        }
    }
}

impl From<TableStylingDocument> for TableStylingContent {
    fn from(doc: TableStylingDocument) -> Self {
        Self {
            intro: non_empty(doc.intro),
            body: convert_blocks(doc.body),
            images: convert_images(doc.images),
            videos: convert_videos(doc.videos),
        }
    }
}

// =============================================================================
// Result Decoding
// =============================================================================

/// Split a query result into its documents. `null` is an empty result.
fn result_rows(value: Value) -> Result<Vec<Value>, SanityError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(rows) => Ok(rows),
        other => Err(SanityError::Shape(format!(
            "expected an array of documents, got {}",
            json_kind(&other)
        ))),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate a single product document, logging why it was skipped.
fn validate_product(row: Value) -> Option<Product> {
    let id = row.get("_id").and_then(Value::as_str).map(str::to_owned);
    let doc = match serde_json::from_value::<ProductDocument>(row) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(document_id = ?id, error = %e, "Skipping malformed product document");
            return None;
        }
    };
    match Product::try_from(doc) {
        Ok(product) => Some(product),
        Err(e) => {
            tracing::warn!(document_id = ?id, error = %e, "Skipping invalid product document");
            None
        }
    }
}

/// Decode a list of product documents, dropping any that fail validation.
///
/// # Errors
///
/// Returns `SanityError::Shape` if the result is neither an array nor `null`.
pub fn decode_products(value: Value) -> Result<Vec<Product>, SanityError> {
    Ok(result_rows(value)?
        .into_iter()
        .filter_map(validate_product)
        .collect())
}

/// Decode a single product document (`[0]` query).
///
/// `null` and invalid documents both decode to `None`.
///
/// # Errors
///
/// Returns `SanityError::Shape` if the result is neither an object nor `null`.
pub fn decode_product(value: Value) -> Result<Option<Product>, SanityError> {
    match value {
        Value::Null => Ok(None),
        row @ Value::Object(_) => Ok(validate_product(row)),
        other => Err(SanityError::Shape(format!(
            "expected a product document, got {}",
            json_kind(&other)
        ))),
    }
}

/// Decode slug rows, dropping missing and invalid slugs.
///
/// # Errors
///
/// Returns `SanityError::Shape` if the result is neither an array nor `null`.
pub fn decode_slugs(value: Value) -> Result<Vec<Slug>, SanityError> {
    Ok(result_rows(value)?
        .into_iter()
        .filter_map(|row| serde_json::from_value::<SlugEntry>(row).ok()?.slug)
        .filter_map(|slug| match Slug::parse(&slug) {
            Ok(slug) => Some(slug),
            Err(e) => {
                tracing::warn!(slug = %slug, error = %e, "Skipping invalid slug");
                None
            }
        })
        .collect())
}

/// Decode a singleton document. `null` (no document yet) yields `None`.
///
/// # Errors
///
/// Returns `SanityError::Parse` if the document does not match its shape.
pub fn decode_singleton<D, T>(value: Value) -> Result<Option<T>, SanityError>
where
    D: DeserializeOwned,
    T: From<D>,
{
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(T::from(serde_json::from_value::<D>(value)?)))
}

/// Decode audit rows.
///
/// # Errors
///
/// Returns an error if the result is not an array of audit rows.
pub fn decode_audit(value: Value) -> Result<Vec<AuditEntry>, SanityError> {
    result_rows(value)?
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(SanityError::from))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    fn garden_bliss() -> Value {
        json!({
            "_id": "abc123",
            "title": "Garden Bliss Bouquet",
            "slug": { "_type": "slug", "current": "garden-bliss-bouquet" },
            "price": 125,
            "shortDescription": "A lush mix of peonies, garden roses, and eucalyptus",
            "description": [
                {
                    "_type": "block",
                    "_key": "desc1",
                    "style": "normal",
                    "children": [
                        { "_type": "span", "_key": "s1", "text": "A stunning bouquet.", "marks": [] },
                        { "_type": "span", "_key": "s2", "text": " Hand-tied.", "marks": ["em"] }
                    ],
                    "markDefs": []
                },
                { "_type": "image", "asset": { "_ref": "image-x-1x1-jpg" } }
            ],
            "category": "bouquets",
            "inStock": null,
            "featured": true,
            "tags": ["peonies", null, "roses"],
            "images": [
                {
                    "asset": { "_ref": "image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg", "_type": "reference" },
                    "hotspot": { "_type": "sanity.imageHotspot", "x": 0.5, "y": 0.4, "width": 0.3, "height": 0.3 },
                    "crop": null
                },
                { "asset": null }
            ],
            "videos": null
        })
    }

    #[test]
    fn test_product_conversion() {
        let product = decode_product(garden_bliss()).unwrap().unwrap();
        assert_eq!(product.id.as_str(), "abc123");
        assert_eq!(product.slug.as_str(), "garden-bliss-bouquet");
        assert_eq!(product.price, Price::from_units(125));
        assert!(product.in_stock, "null inStock defaults to true");
        assert!(product.featured);
        assert_eq!(product.tags, vec!["peonies", "roses"]);
        assert_eq!(product.images.len(), 1);
        assert!(product.images[0].hotspot.is_some());
        assert!(product.videos.is_empty());
        assert_eq!(product.description.len(), 1, "non-text blocks are dropped");
        assert_eq!(product.description[0].plain_text(), "A stunning bouquet. Hand-tied.");
        assert!(product.description[0].children[1].is_em());
    }

    #[test]
    fn test_featured_defaults_to_false() {
        let mut doc = garden_bliss();
        doc["featured"] = Value::Null;
        let product = decode_product(doc).unwrap().unwrap();
        assert!(!product.featured);
    }

    #[test]
    fn test_missing_required_fields_rejected() {
        for field in ["_id", "title", "slug", "price"] {
            let mut doc = garden_bliss();
            doc.as_object_mut().unwrap().remove(field);
            let parsed: ProductDocument = serde_json::from_value(doc).unwrap();
            assert_eq!(
                Product::try_from(parsed),
                Err(DocumentError::MissingField(field))
            );
        }
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut doc = garden_bliss();
        doc["price"] = json!(-10);
        let parsed: ProductDocument = serde_json::from_value(doc).unwrap();
        assert!(matches!(
            Product::try_from(parsed),
            Err(DocumentError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_invalid_documents_are_skipped() {
        let mut bad_slug = garden_bliss();
        bad_slug["slug"] = json!({ "current": "Not A Slug" });
        let mut wrong_type = garden_bliss();
        wrong_type["price"] = json!("free");

        let products = decode_products(json!([bad_slug, garden_bliss(), wrong_type])).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].slug.as_str(), "garden-bliss-bouquet");
    }

    #[test]
    fn test_mixed_case_and_long_slugs_are_kept() {
        let mut mixed_case = garden_bliss();
        mixed_case["slug"] = json!({ "current": "Rose-Box" });
        let mut long = garden_bliss();
        long["slug"] = json!({ "current": "a".repeat(120) });

        let products = decode_products(json!([mixed_case, long, garden_bliss()])).unwrap();
        let slugs: Vec<&str> = products.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs.len(), 3);
        assert_eq!(slugs[0], "Rose-Box");
        assert_eq!(slugs[1].len(), 120);

        let slugs = decode_slugs(json!([{ "slug": "Rose-Box" }])).unwrap();
        assert_eq!(slugs[0].as_str(), "Rose-Box");
    }

    #[test]
    fn test_null_result_is_empty() {
        assert!(decode_products(Value::Null).unwrap().is_empty());
        assert!(decode_product(Value::Null).unwrap().is_none());
        assert!(decode_slugs(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_unexpected_shape_is_error() {
        assert!(matches!(
            decode_products(json!({ "oops": true })),
            Err(SanityError::Shape(_))
        ));
        assert!(matches!(decode_product(json!(3)), Err(SanityError::Shape(_))));
    }

    #[test]
    fn test_decode_slugs() {
        let slugs = decode_slugs(json!([
            { "slug": "rose-petal-romance" },
            { "slug": null },
            { "slug": "Bad Slug" },
            { "slug": "wildflower-meadow" }
        ]))
        .unwrap();
        let slugs: Vec<&str> = slugs.iter().map(Slug::as_str).collect();
        assert_eq!(slugs, vec!["rose-petal-romance", "wildflower-meadow"]);
    }

    #[test]
    fn test_decode_table_styling() {
        let content: TableStylingContent = decode_singleton::<TableStylingDocument, _>(json!({
            "intro": "  ",
            "body": [{ "_type": "block", "style": "h2", "children": [{ "text": "Events" }] }],
            "images": [],
            "videos": [
                { "asset": { "_ref": "file-abc-mp4" }, "caption": "Dinner" },
                { "asset": null, "caption": "orphan" }
            ]
        }))
        .unwrap()
        .unwrap();

        assert!(content.intro.is_none());
        assert_eq!(content.body[0].style, BlockStyle::H2);
        assert_eq!(content.videos.len(), 1);
        assert_eq!(content.videos[0].caption.as_deref(), Some("Dinner"));
    }

    #[test]
    fn test_decode_missing_singleton() {
        let content =
            decode_singleton::<SiteSettingsDocument, HomeContent>(Value::Null).unwrap();
        assert!(content.is_none());
    }

    #[test]
    fn test_audit_entries() {
        let entries = decode_audit(json!([
            { "_id": "drafts.abc", "title": "Draft", "slug": null, "category": null, "inStock": true, "featured": false },
            { "_id": "abc", "title": "Live", "slug": "live", "category": "bouquets", "inStock": true, "featured": true }
        ]))
        .unwrap();
        assert!(entries[0].is_draft());
        assert!(!entries[1].is_draft());
    }
}
