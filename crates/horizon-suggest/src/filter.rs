//! Item projection and filter composition.

use std::fmt::Display;
use std::sync::Arc;

use horizon_suggest_core::logging::targets;

use crate::pattern::{NormalizedQuery, PatternBuilder};
use crate::strategy::MatchStrategy;

/// A pure predicate over candidate items.
pub type Filter<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Extracts the text an item is matched by.
///
/// Returning `None` signals a failed projection; the item is then treated as
/// having empty text.
pub trait TextProjector<T>: Send + Sync {
    /// The item's text, or `None` if it cannot be determined.
    fn text_of(&self, item: &T) -> Option<String>;
}

impl<T, F> TextProjector<T> for F
where
    F: Fn(&T) -> Option<String> + Send + Sync,
{
    fn text_of(&self, item: &T) -> Option<String> {
        self(item)
    }
}

/// A projector using the item's `Display` implementation.
pub fn display_projector<T: Display>() -> impl TextProjector<T> {
    |item: &T| Some(item.to_string())
}

/// Project an item to its match text. Never fails.
///
/// A failed projection yields an empty string. With `escape_as_like` the
/// text gets the same escaping as the query.
pub fn text_from_item<T>(projector: &dyn TextProjector<T>, item: &T, escape_as_like: bool) -> String {
    match projector.text_of(item) {
        Some(text) if !text.is_empty() => PatternBuilder::escape_item_text(&text, escape_as_like),
        Some(_) => String::new(),
        None => {
            tracing::trace!(target: targets::ENGINE, "item projection failed, using empty text");
            String::new()
        }
    }
}

/// Build the predicate matching items against `query` with `strategy`.
pub fn query_filter<T: 'static>(
    strategy: Arc<dyn MatchStrategy>,
    query: &NormalizedQuery,
    projector: Arc<dyn TextProjector<T>>,
    escape_as_like: bool,
) -> Filter<T> {
    let query = query.clone();
    Arc::new(move |item: &T| {
        let text = text_from_item(projector.as_ref(), item, escape_as_like);
        if text.is_empty() && !query.is_empty() {
            return false;
        }
        strategy.matches(&query, &text)
    })
}

/// AND an optional base filter with a query filter.
///
/// The base filter is evaluated first.
pub fn compose<T: 'static>(base: Option<Filter<T>>, filter: Filter<T>) -> Filter<T> {
    match base {
        Some(base) => Arc::new(move |item: &T| base(item) && filter(item)),
        None => filter,
    }
}
