//! Core types for La Fleur.
//!
//! This module provides type-safe wrappers for the catalog's domain concepts.

pub mod category;
pub mod content;
pub mod price;
pub mod product;
pub mod slug;

pub use category::{Category, CategoryOption, normalize_category};
pub use content::{HomeContent, TableStylingContent};
pub use price::{CurrencyCode, Price, PriceError};
pub use product::{Block, BlockStyle, Crop, Hotspot, ImageRef, Product, ProductId, Span, VideoRef};
pub use slug::{Slug, SlugError};
