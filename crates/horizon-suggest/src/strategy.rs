//! Pluggable match strategies.
//!
//! A [`MatchStrategy`] decides whether one item's text matches a normalized
//! query. The engine only ever sees `Arc<dyn MatchStrategy>`, so alternate
//! strategies (fuzzy, prefix-only, ...) plug in through
//! [`SuggestSettings`](crate::SuggestSettings) without touching the engine.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::pattern::{LIKE_WILDCARD, NormalizedQuery};

// ============================================================================
// Case Sensitivity
// ============================================================================

/// Controls how matching handles letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    /// Case-sensitive matching (e.g., "App" won't match "apple").
    CaseSensitive,
    /// Case-insensitive matching (e.g., "App" will match "apple").
    #[default]
    CaseInsensitive,
}

impl CaseSensitivity {
    fn fold<'a>(self, text: &'a str) -> Cow<'a, str> {
        match self {
            Self::CaseSensitive => Cow::Borrowed(text),
            Self::CaseInsensitive => Cow::Owned(text.to_lowercase()),
        }
    }
}

// ============================================================================
// Match Strategy Trait
// ============================================================================

/// Decides whether an item's text matches a query.
///
/// Implementations must be pure and total. An empty query matches every
/// item; empty item text (a failed projection) never matches a non-empty
/// query. Only [`NormalizedQuery::has_wildcards`] queries may treat `%` as
/// a wildcard.
pub trait MatchStrategy: Send + Sync + fmt::Debug {
    /// Short name used in configuration and logs.
    fn name(&self) -> &'static str;

    /// Whether `item_text` matches `query`.
    fn matches(&self, query: &NormalizedQuery, item_text: &str) -> bool;
}

/// Look up a built-in strategy by its configuration name.
pub fn strategy_by_name(
    name: &str,
    case_sensitivity: CaseSensitivity,
) -> Option<Arc<dyn MatchStrategy>> {
    match name {
        "substring" => Some(Arc::new(SubstringMatch::new(case_sensitivity))),
        "like" => Some(Arc::new(LikeMatch::new(case_sensitivity))),
        "prefix" => Some(Arc::new(PrefixMatch::new(case_sensitivity))),
        _ => None,
    }
}

/// LIKE-style matching: `%` matches any run of characters.
///
/// The pattern is unanchored, so `"ap%ot"` matches any text containing `ap`
/// followed later by `ot`.
pub fn like_matches(pattern: &str, text: &str, case_sensitivity: CaseSensitivity) -> bool {
    like_scan(pattern, text, case_sensitivity, false)
}

/// LIKE-style matching anchored at the start of `text`.
///
/// `"gr%sm"` matches text starting with `gr` that later contains `sm`.
pub fn like_prefix_matches(pattern: &str, text: &str, case_sensitivity: CaseSensitivity) -> bool {
    like_scan(pattern, text, case_sensitivity, true)
}

fn like_scan(pattern: &str, text: &str, case_sensitivity: CaseSensitivity, anchored: bool) -> bool {
    if pattern.is_empty() {
        return true;
    }
    if text.is_empty() {
        return false;
    }

    let pattern = case_sensitivity.fold(pattern);
    let text = case_sensitivity.fold(text);

    let mut rest: &str = &text;
    for (index, token) in pattern.split(LIKE_WILDCARD).enumerate() {
        if token.is_empty() {
            continue;
        }
        if anchored && index == 0 {
            // The first token precedes any wildcard and must open the text.
            match rest.strip_prefix(token) {
                Some(tail) => rest = tail,
                None => return false,
            }
            continue;
        }
        match rest.find(token) {
            Some(pos) => rest = &rest[pos + token.len()..],
            None => return false,
        }
    }
    true
}

// ============================================================================
// Built-in Strategies
// ============================================================================

/// Substring containment, switching to LIKE matching for queries built in
/// escape-as-like mode that hold wildcards.
///
/// This is the default strategy. A `%` in a literal query is matched as
/// itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatch {
    case_sensitivity: CaseSensitivity,
}

impl SubstringMatch {
    /// Create a substring strategy.
    pub fn new(case_sensitivity: CaseSensitivity) -> Self {
        Self { case_sensitivity }
    }
}

impl MatchStrategy for SubstringMatch {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn matches(&self, query: &NormalizedQuery, item_text: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        if query.has_wildcards() {
            return like_matches(query.as_str(), item_text, self.case_sensitivity);
        }
        self.case_sensitivity
            .fold(item_text)
            .contains(&*self.case_sensitivity.fold(query.as_str()))
    }
}

/// Pure LIKE-pattern matching.
///
/// Choosing this strategy opts into wildcards: `%` is expanded whether or
/// not the query was built in escape-as-like mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct LikeMatch {
    case_sensitivity: CaseSensitivity,
}

impl LikeMatch {
    /// Create a LIKE strategy.
    pub fn new(case_sensitivity: CaseSensitivity) -> Self {
        Self { case_sensitivity }
    }
}

impl MatchStrategy for LikeMatch {
    fn name(&self) -> &'static str {
        "like"
    }

    fn matches(&self, query: &NormalizedQuery, item_text: &str) -> bool {
        like_matches(query.as_str(), item_text, self.case_sensitivity)
    }
}

/// Prefix matching.
///
/// Wildcard queries match LIKE-style anchored at the start, so the
/// escaped `"gr sm"` finds "Granny Smith".
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixMatch {
    case_sensitivity: CaseSensitivity,
}

impl PrefixMatch {
    /// Create a prefix strategy.
    pub fn new(case_sensitivity: CaseSensitivity) -> Self {
        Self { case_sensitivity }
    }
}

impl MatchStrategy for PrefixMatch {
    fn name(&self) -> &'static str {
        "prefix"
    }

    fn matches(&self, query: &NormalizedQuery, item_text: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        if query.has_wildcards() {
            return like_prefix_matches(query.as_str(), item_text, self.case_sensitivity);
        }
        self.case_sensitivity
            .fold(item_text)
            .starts_with(&*self.case_sensitivity.fold(query.as_str()))
    }
}
