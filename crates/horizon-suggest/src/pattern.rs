//! Translation of raw input text into normalized queries.

use std::fmt;

/// The wildcard metacharacter of LIKE-style patterns.
///
/// Matches any run of characters, including an empty one.
pub const LIKE_WILDCARD: char = '%';

/// Query text after the escape policy has been applied.
///
/// Two recomputations with equal normalized queries are redundant; the
/// engine compares these, not the raw text.
///
/// A `%` only acts as a wildcard when the query was built with
/// escape-as-like on. Otherwise it is a literal character the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedQuery {
    text: String,
    like: bool,
}

impl NormalizedQuery {
    /// A query matched literally, with no wildcards.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            like: false,
        }
    }

    /// The normalized text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// An empty query means "no filtering".
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the query holds [`LIKE_WILDCARD`] tokens to expand.
    ///
    /// Always `false` for literal queries, even if they contain `%`.
    pub fn has_wildcards(&self) -> bool {
        self.like && self.text.contains(LIKE_WILDCARD)
    }
}

impl fmt::Display for NormalizedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for NormalizedQuery {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Builds [`NormalizedQuery`] values from raw input.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternBuilder;

impl PatternBuilder {
    /// Normalize `query`.
    ///
    /// With `escape_as_like`, every space becomes [`LIKE_WILDCARD`], turning
    /// `"a b"` into `"a%b"`: "contains `a`, later followed by `b`". Without it
    /// the text passes through unchanged. Any input is accepted.
    pub fn build(query: &str, escape_as_like: bool) -> NormalizedQuery {
        NormalizedQuery {
            text: Self::escape_item_text(query, escape_as_like),
            like: escape_as_like,
        }
    }

    /// Apply the same escape policy to text projected from an item.
    ///
    /// Keeps a selected item's text comparable with the normalized query.
    pub fn escape_item_text(text: &str, escape_as_like: bool) -> String {
        if escape_as_like {
            text.replace(' ', "%")
        } else {
            text.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_as_like() {
        assert_eq!(PatternBuilder::build("a b", true).as_str(), "a%b");
        assert_eq!(PatternBuilder::build("a b", false).as_str(), "a b");
    }

    #[test]
    fn test_every_space_replaced() {
        let query = PatternBuilder::build(" red  apple ", true);
        assert_eq!(query.as_str(), "%red%%apple%");
        assert!(query.has_wildcards());
    }

    #[test]
    fn test_empty_query() {
        assert!(PatternBuilder::build("", true).is_empty());
        assert!(PatternBuilder::build("", false).is_empty());
        assert!(!PatternBuilder::build(" ", true).is_empty());
    }

    #[test]
    fn test_percent_is_literal_without_escape() {
        let query = PatternBuilder::build("100%", false);
        assert_eq!(query.as_str(), "100%");
        assert!(!query.has_wildcards());
        assert!(PatternBuilder::build("100%", true).has_wildcards());
        assert_ne!(query, PatternBuilder::build("100%", true));
    }

    #[test]
    fn test_other_whitespace_untouched() {
        assert_eq!(PatternBuilder::build("a\tb", true).as_str(), "a\tb");
    }
}
