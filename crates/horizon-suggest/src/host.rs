//! The host widget contract.
//!
//! The engine never owns a widget. It reads the current text, caret, selection
//! and items through [`SuggestHost`] and pushes its decisions back through the
//! same trait: the filter to apply, whether the dropdown is open, and where
//! the caret goes.

use std::ops::{Deref, DerefMut};

use crate::filter::Filter;

/// A caret position plus selection length in the host's text input.
///
/// Offsets and lengths are in bytes of the host text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextSelection {
    /// Start of the selection.
    pub offset: usize,
    /// Number of selected bytes; zero for a plain caret.
    pub length: usize,
}

impl TextSelection {
    /// Create a selection.
    pub const fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// A plain caret with nothing selected.
    pub const fn caret(offset: usize) -> Self {
        Self { offset, length: 0 }
    }

    /// End of the selected range.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Whether nothing is selected.
    pub fn is_collapsed(&self) -> bool {
        self.length == 0
    }

    /// Deselect, leaving the caret at the end of the former selection.
    pub fn collapsed_to_end(&self) -> Self {
        Self::caret(self.end())
    }
}

/// A widget that can display suggestions.
///
/// All methods are called on the thread that owns the widget.
pub trait SuggestHost {
    /// Candidate item type.
    type Item: 'static;

    /// Current text of the input.
    fn text(&self) -> String;

    /// Current caret and selection in the input.
    fn caret(&self) -> TextSelection;

    /// The selected item, if any.
    fn selected_item(&self) -> Option<&Self::Item>;

    /// The items source. Iterated lazily and never cached across
    /// recomputations, so it may change between calls.
    fn items(&self) -> impl Iterator<Item = &Self::Item> + '_;

    /// The externally owned base filter, re-read on every recomputation.
    fn base_filter(&self) -> Option<Filter<Self::Item>>;

    /// Replace the input text.
    fn set_text(&mut self, text: &str);

    /// Move the caret and selection.
    fn select(&mut self, selection: TextSelection);

    /// Clear the selected item.
    ///
    /// Hosts are allowed to disturb the text or caret while doing so;
    /// the engine restores both with a [`CaretGuard`].
    fn clear_selected_item(&mut self);

    /// Apply a filter to the visible list. `None` shows every item.
    fn set_filter(&mut self, filter: Option<Filter<Self::Item>>);

    /// Open or close the dropdown.
    fn set_dropdown_open(&mut self, open: bool);

    /// Whether the dropdown is open.
    fn is_dropdown_open(&self) -> bool;
}

/// Restores the host's text and caret when dropped.
///
/// Mutations made through the guard (it dereferences to the host) may
/// reset the input; whatever happens inside the scope, including a panic,
/// the text and selection captured at construction are put back.
///
/// ```
/// use horizon_suggest::{CaretGuard, ListHost, SuggestHost, TextSelection};
///
/// let mut host = ListHost::new(vec!["Apple", "Apricot"]);
/// host.type_text("Ap");
/// host.select(TextSelection::new(0, 2));
/// {
///     let mut guard = CaretGuard::new(&mut host);
///     guard.set_text("");
/// }
/// assert_eq!(host.text(), "Ap");
/// assert_eq!(host.caret(), TextSelection::new(0, 2));
/// ```
pub struct CaretGuard<'a, H: SuggestHost> {
    host: &'a mut H,
    text: String,
    selection: TextSelection,
}

impl<'a, H: SuggestHost> CaretGuard<'a, H> {
    /// Capture the host's text and caret.
    pub fn new(host: &'a mut H) -> Self {
        let text = host.text();
        let selection = host.caret();
        Self {
            host,
            text,
            selection,
        }
    }

    /// The captured caret.
    pub fn saved_selection(&self) -> TextSelection {
        self.selection
    }
}

impl<H: SuggestHost> Deref for CaretGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: SuggestHost> DerefMut for CaretGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: SuggestHost> Drop for CaretGuard<'_, H> {
    fn drop(&mut self) {
        if self.host.text() != self.text {
            self.host.set_text(&self.text);
        }
        self.host.select(self.selection);
    }
}
