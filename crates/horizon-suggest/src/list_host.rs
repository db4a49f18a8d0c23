//! An in-memory [`SuggestHost`].
//!
//! `ListHost` behaves like an editable combo box without any rendering: a
//! `Vec` of items, a text buffer with a caret, a selected index, the applied
//! filter and a dropdown flag. Clearing the selected item empties the text,
//! the way editable combo boxes do, so it also exercises caret restoration.

use std::fmt;

use crate::filter::Filter;
use crate::host::{SuggestHost, TextSelection};

/// A list-backed suggestion host.
pub struct ListHost<T> {
    items: Vec<T>,
    text: String,
    selection: TextSelection,
    selected: Option<usize>,
    filter: Option<Filter<T>>,
    base_filter: Option<Filter<T>>,
    dropdown_open: bool,
}

impl<T: 'static> ListHost<T> {
    /// Create a host over `items` with empty text.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            text: String::new(),
            selection: TextSelection::default(),
            selected: None,
            filter: None,
            base_filter: None,
            dropdown_open: false,
        }
    }

    /// Set the base filter, builder style.
    pub fn with_base_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.base_filter = Some(std::sync::Arc::new(filter));
        self
    }

    /// Replace or remove the base filter.
    pub fn set_base_filter(&mut self, filter: Option<Filter<T>>) {
        self.base_filter = filter;
    }

    /// Simulate typing: replace the text and put the caret at its end.
    pub fn type_text(&mut self, text: &str) {
        self.text = text.to_owned();
        self.selection = TextSelection::caret(self.text.len());
    }

    /// Select the item at `index`, or clear the selection.
    ///
    /// Out-of-range indices clear the selection.
    pub fn set_selected_index(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.items.len());
    }

    /// Index of the selected item.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The items source.
    pub fn items_slice(&self) -> &[T] {
        &self.items
    }

    /// Mutable access to the items source.
    ///
    /// Clears the selection, since indices may no longer be valid.
    pub fn items_mut(&mut self) -> &mut Vec<T> {
        self.selected = None;
        &mut self.items
    }

    /// The filter currently applied to the visible list.
    pub fn applied_filter(&self) -> Option<&Filter<T>> {
        self.filter.as_ref()
    }

    /// Items passing the applied filter, in source order.
    pub fn visible_items(&self) -> Vec<&T> {
        match &self.filter {
            Some(filter) => self.items.iter().filter(|item| filter(*item)).collect(),
            None => self.items.iter().collect(),
        }
    }
}

impl<T: 'static> SuggestHost for ListHost<T> {
    type Item = T;

    fn text(&self) -> String {
        self.text.clone()
    }

    fn caret(&self) -> TextSelection {
        self.selection
    }

    fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|index| self.items.get(index))
    }

    fn items(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }

    fn base_filter(&self) -> Option<Filter<T>> {
        self.base_filter.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
        let len = self.text.len();
        if self.selection.end() > len {
            self.selection = TextSelection::caret(len);
        }
    }

    fn select(&mut self, selection: TextSelection) {
        let len = self.text.len();
        let offset = selection.offset.min(len);
        let length = selection.length.min(len - offset);
        self.selection = TextSelection::new(offset, length);
    }

    fn clear_selected_item(&mut self) {
        if self.selected.take().is_some() {
            self.text.clear();
            self.selection = TextSelection::default();
        }
    }

    fn set_filter(&mut self, filter: Option<Filter<T>>) {
        self.filter = filter;
    }

    fn set_dropdown_open(&mut self, open: bool) {
        self.dropdown_open = open;
    }

    fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }
}

impl<T> fmt::Debug for ListHost<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListHost")
            .field("items", &self.items.len())
            .field("text", &self.text)
            .field("selection", &self.selection)
            .field("selected", &self.selected)
            .field("filtered", &self.filter.is_some())
            .field("dropdown_open", &self.dropdown_open)
            .finish()
    }
}
