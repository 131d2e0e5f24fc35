//! GROQ queries against the content store.
//!
//! Query text never contains request input: values such as slugs are bound
//! as `$name` parameters and sent next to the query.

/// All products, newest first.
pub const ALL_PRODUCTS: &str = r#"
  *[_type == "product"] | order(_createdAt desc) {
    _id,
    title,
    slug,
    price,
    shortDescription,
    category,
    inStock,
    featured,
    tags,
    images[] {
      asset,
      hotspot,
      crop
    },
    videos[] {
      asset,
      caption
    }
  }
"#;

/// First product whose slug matches `$slug`, with its long description.
pub const PRODUCT_BY_SLUG: &str = r#"
  *[_type == "product" && slug.current == $slug][0] {
    _id,
    title,
    slug,
    price,
    description,
    shortDescription,
    category,
    inStock,
    featured,
    tags,
    images[] {
      asset,
      hotspot,
      crop
    },
    videos[] {
      asset,
      caption
    }
  }
"#;

/// Every product slug, for static generation and the sitemap.
pub const PRODUCT_SLUGS: &str = r#"
  *[_type == "product" && defined(slug.current)] {
    "slug": slug.current
  }
"#;

/// The site settings singleton (home page carousels).
pub const SITE_SETTINGS: &str = r#"
  *[_type == "siteSettings"][0] {
    aboutImages[] {
      asset,
      hotspot,
      crop
    },
    servicesImages[] {
      asset,
      hotspot,
      crop
    }
  }
"#;

/// The table styling singleton.
pub const TABLE_STYLING: &str = r#"
  *[_type == "tableStyling"][0] {
    intro,
    body,
    images[] {
      asset,
      hotspot,
      crop
    },
    videos[] {
      asset,
      caption
    }
  }
"#;

/// Published and draft products for the audit command.
pub const PRODUCT_AUDIT: &str = r#"
  *[_type == "product"] | order(_createdAt desc) {
    _id,
    title,
    "slug": slug.current,
    category,
    inStock,
    featured
  }
"#;

/// Cheap query used by the readiness probe.
pub const PRODUCT_COUNT: &str = r#"count(*[_type == "product"])"#;

/// Featured products, newest first, at most `limit`.
///
/// `limit` is a number chosen by the caller, not request input, so it is
/// written into the slice directly.
#[must_use]
pub fn featured_products(limit: usize) -> String {
    format!(
        r#"
  *[_type == "product" && featured == true] | order(_createdAt desc) [0...{limit}] {{
    _id,
    title,
    slug,
    price,
    shortDescription,
    category,
    inStock,
    featured,
    tags,
    images[] {{
      asset,
      hotspot,
      crop
    }}
  }}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_query_slices_limit() {
        let query = featured_products(8);
        assert!(query.contains("[0...8]"));
        assert!(query.contains("featured == true"));
    }

    #[test]
    fn test_slug_query_uses_parameter() {
        assert!(PRODUCT_BY_SLUG.contains("slug.current == $slug"));
    }
}
