//! Product categories.
//!
//! Categories are free-form strings authored in the CMS. Two spellings are
//! the same category when they agree after [`normalize_category`]:
//! `"flowers-in-a-box"`, `"Flowers In A Box"` and `" flowers in a box "` all
//! name one category.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Normalize a category or selector for comparison.
///
/// Trims surrounding whitespace, lowercases, and replaces every hyphen with a
/// space.
#[must_use]
pub fn normalize_category(value: &str) -> String {
    value.trim().to_lowercase().replace('-', " ")
}

/// A product category as authored in the content store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Wrap an authored category value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The value exactly as authored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The normalized comparison key.
    #[must_use]
    pub fn normalized(&self) -> String {
        normalize_category(&self.0)
    }

    /// Whether this category matches a selector, ignoring case and treating
    /// hyphens and spaces as the same separator.
    #[must_use]
    pub fn matches(&self, selector: &str) -> bool {
        self.normalized() == normalize_category(selector)
    }

    /// Human-readable label: separators become spaces and each word is
    /// capitalized (`"flower-boxes"` → `"Flower Boxes"`).
    #[must_use]
    pub fn label(&self) -> String {
        self.normalized()
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the configured category vocabulary shown as listing pills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    /// Selector value placed in the `category` query parameter.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl CategoryOption {
    /// Create a vocabulary entry.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Whether this option is the one selected by `selector`.
    #[must_use]
    pub fn is_selected_by(&self, selector: &str) -> bool {
        normalize_category(&self.value) == normalize_category(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category("Flowers-In-A-Box"), "flowers in a box");
        assert_eq!(normalize_category("  bouquets "), "bouquets");
        assert_eq!(normalize_category(""), "");
    }

    #[test]
    fn test_matches_ignores_case_and_separator() {
        let category = Category::new("flowers-in-a-box");
        assert!(category.matches("flowers in a box"));
        assert!(category.matches("Flowers-In-A-Box"));
        assert!(!category.matches("flowers"));
    }

    #[test]
    fn test_label() {
        assert_eq!(Category::new("flower-boxes").label(), "Flower Boxes");
        assert_eq!(Category::new("gifts-balloons").label(), "Gifts Balloons");
        assert_eq!(Category::new("bouquets").label(), "Bouquets");
    }

    #[test]
    fn test_option_selection() {
        let option = CategoryOption::new("flowers-in-a-box", "Flowers in a Box");
        assert!(option.is_selected_by("flowers in a box"));
        assert!(!option.is_selected_by("bouquets"));
    }
}
