//! URL slug type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character that is not URL-safe.
    #[error("slug contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A human-authored, URL-safe product identifier used for routing.
///
/// ## Constraints
///
/// - Length: 1-512 characters
/// - Characters: unreserved URL characters (ASCII letters, digits, `-`, `_`,
///   `.` and `~`)
///
/// Comparison is case-sensitive, matching the store's `slug.current == $slug`.
///
/// Slugs are unique per intent, not enforced unique by the content store;
/// lookups treat the first match as authoritative.
///
/// ## Examples
///
/// ```
/// use la_fleur_core::Slug;
///
/// assert!(Slug::parse("garden-bliss-bouquet").is_ok());
/// assert!(Slug::parse("").is_err());
/// assert!(Slug::parse("Rose-Box").is_ok());
/// assert!(Slug::parse("Garden Bliss").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 512;

    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than
    /// [`Self::MAX_LENGTH`] bytes, or contains anything other than unreserved
    /// URL characters.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s.chars().find(|c| !is_slug_char(*c)) {
            return Err(SlugError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

const fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Slug {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_slugs() {
        assert!(Slug::parse("garden-bliss-bouquet").is_ok());
        assert!(Slug::parse("cote-dazur-flower-box").is_ok());
        assert!(Slug::parse("box_2024.v2~a").is_ok());
        assert!(Slug::parse("a").is_ok());
        assert!(Slug::parse("Rose-Box").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Slug::parse(""), Err(SlugError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(Slug::MAX_LENGTH + 1);
        assert!(matches!(Slug::parse(&long), Err(SlugError::TooLong { .. })));
        assert!(Slug::parse(&"a".repeat(120)).is_ok());
    }

    #[test]
    fn test_parse_rejects_unsafe_characters() {
        assert_eq!(
            Slug::parse("rose petal"),
            Err(SlugError::InvalidCharacter(' '))
        );
        assert_eq!(
            Slug::parse("../etc"),
            Err(SlugError::InvalidCharacter('/'))
        );
        assert!(Slug::parse("côte").is_err());
    }

    #[test]
    fn test_compare_with_str() {
        let slug = Slug::parse("wildflower-meadow").unwrap();
        assert!(slug == *"wildflower-meadow");
        assert_eq!(slug.to_string(), "wildflower-meadow");
        assert!(Slug::parse("Rose-Box").unwrap() != *"rose-box");
    }

    #[test]
    fn test_serde_validates() {
        let slug: Slug = serde_json::from_str("\"rose-petal-romance\"").unwrap();
        assert_eq!(slug.as_str(), "rose-petal-romance");
        assert!(serde_json::from_str::<Slug>("\"Not A Slug\"").is_err());
    }
}
