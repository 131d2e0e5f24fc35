//! La Fleur Core - Shared catalog types library.
//!
//! This crate provides the types used across all La Fleur components:
//! - `storefront` - Public-facing catalog site
//! - `cli` - Command-line tools for slug enumeration, prerendering and audits
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Documents fetched from the CMS are validated into these types at
//! the storefront boundary before anything else sees them.
//!
//! # Modules
//!
//! - [`types`] - Products, prices, slugs, categories and page content
//! - [`listing`] - Category filtering and price sorting for product listings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod listing;
pub mod types;

pub use listing::{CategoryFilter, SortOrder, apply_selectors};
pub use types::*;
