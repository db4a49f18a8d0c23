//! The suggestion engine state machine.
//!
//! [`SuggestionEngine`] turns text changes into filter and dropdown decisions
//! for a [`SuggestHost`]. Each change advances a revision and goes through a
//! [`DebounceScheduler`]; only the recomputation whose revision is still
//! current when it fires touches the host.
//!
//! # States
//!
//! - [`SuggestState::Idle`]: no query filter active.
//! - [`SuggestState::Filtering`]: the dropdown shows a query-narrowed list.
//! - [`SuggestState::Selected`]: the selected item's text equals the query.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use horizon_suggest::{
//!     ListHost, SuggestHost, SuggestSettings, SuggestionEngine, Transition, display_projector,
//! };
//!
//! let settings = SuggestSettings::new()
//!     .with_delay(Duration::ZERO)
//!     .with_max_suggestion_count(5);
//! let mut engine = SuggestionEngine::new(display_projector::<&str>(), settings);
//! let mut host = ListHost::new(vec!["Apple", "Banana", "Apricot"]);
//!
//! host.type_text("Ap");
//! assert_eq!(engine.on_text_changed(&mut host), Some(Transition::Filtering { count: 2 }));
//! assert!(host.is_dropdown_open());
//! assert_eq!(host.visible_items(), vec![&"Apple", &"Apricot"]);
//! ```

use std::fmt;
use std::sync::Arc;

use horizon_suggest_core::logging::targets;
use horizon_suggest_core::{
    DebounceScheduler, Debouncer, PerfSpan, Revision, RevisionCounter, Schedule, Signal,
    ThreadAffinity,
};

use crate::counter::{count_up_to, within_bound};
use crate::filter::{Filter, TextProjector, compose, query_filter, text_from_item};
use crate::host::{CaretGuard, SuggestHost};
use crate::pattern::{NormalizedQuery, PatternBuilder};
use crate::settings::SuggestSettings;

// ============================================================================
// State & Transition
// ============================================================================

/// Engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SuggestState {
    /// No query filter is active. The dropdown is closed or shows every item.
    #[default]
    Idle,
    /// The dropdown is open with a query-narrowed list.
    Filtering,
    /// The selected item's text equals the current query.
    Selected,
}

/// What a recomputation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The normalized query equals the previous one; nothing was touched.
    Unchanged,
    /// The query is empty: dropdown closed, selection cleared, base filter only.
    Cleared,
    /// The text matches the selected item.
    Selected {
        /// Whether the filter was reset to the base filter.
        filter_reset: bool,
    },
    /// The filter was applied and the dropdown opened.
    Filtering {
        /// Number of matching items.
        count: usize,
    },
    /// Too many items matched; nothing was applied and the dropdown was left
    /// as it was.
    Suppressed {
        /// A value above the configured maximum. Not the exact match count.
        count: usize,
    },
    /// The dropdown was opened on request without counting matches.
    Opened,
}

// ============================================================================
// Engine
// ============================================================================

/// Debounced, bounded incremental suggestion filtering.
///
/// The engine is owned by the host's UI thread. All entry points take the
/// host by `&mut` and debug-assert they run on the thread that created the
/// engine.
pub struct SuggestionEngine<T, S = Debouncer<Revision>> {
    settings: SuggestSettings,
    projector: Arc<dyn TextProjector<T>>,
    scheduler: S,
    revisions: RevisionCounter,
    previous_query: Option<NormalizedQuery>,
    state: SuggestState,
    affinity: ThreadAffinity,

    /// Emitted with the new state whenever the state changes.
    pub state_changed: Signal<SuggestState>,
    /// Emitted with the match count when a recomputation opens the dropdown.
    pub suggestions_shown: Signal<usize>,
    /// Emitted with the sentinel count when the dropdown is suppressed.
    pub suggestions_suppressed: Signal<usize>,
}

impl<T: 'static> SuggestionEngine<T> {
    /// Create an engine driven by a polled [`Debouncer`].
    pub fn new(projector: impl TextProjector<T> + 'static, settings: SuggestSettings) -> Self {
        Self::with_scheduler(projector, settings, Debouncer::new())
    }
}

impl<T: 'static, S: DebounceScheduler<Revision>> SuggestionEngine<T, S> {
    /// Create an engine with a custom debounce scheduler.
    pub fn with_scheduler(
        projector: impl TextProjector<T> + 'static,
        settings: SuggestSettings,
        scheduler: S,
    ) -> Self {
        Self {
            settings,
            projector: Arc::new(projector),
            scheduler,
            revisions: RevisionCounter::new(),
            previous_query: None,
            state: SuggestState::Idle,
            affinity: ThreadAffinity::current(),
            state_changed: Signal::new(),
            suggestions_shown: Signal::new(),
            suggestions_suppressed: Signal::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The settings snapshot.
    pub fn settings(&self) -> &SuggestSettings {
        &self.settings
    }

    /// Replace the settings snapshot. Takes effect at the next recomputation.
    pub fn set_settings(&mut self, settings: SuggestSettings) {
        self.affinity.debug_assert_same_thread();
        self.settings = settings;
    }

    /// The live revision.
    pub fn revision(&self) -> Revision {
        self.revisions.current()
    }

    /// The current state.
    pub fn state(&self) -> SuggestState {
        self.state
    }

    /// The last normalized query a recomputation saw.
    pub fn previous_query(&self) -> Option<&NormalizedQuery> {
        self.previous_query.as_ref()
    }

    /// Whether a recomputation is waiting for its debounce delay.
    pub fn is_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// The debounce scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the debounce scheduler, e.g. to block on a
    /// threaded scheduler and hand the fired revision to
    /// [`run_fired`](Self::run_fired).
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Handle a change of the host's text.
    ///
    /// Advances the revision and schedules a recomputation after the
    /// configured delay, replacing any pending one. With a zero delay the
    /// recomputation runs before this returns and its transition is returned.
    pub fn on_text_changed<H>(&mut self, host: &mut H) -> Option<Transition>
    where
        H: SuggestHost<Item = T>,
    {
        self.affinity.debug_assert_same_thread();

        let revision = self.revisions.advance();
        match self.scheduler.schedule(self.settings.delay(), revision) {
            Schedule::RunNow(revision) => self.run_fired(revision, host),
            Schedule::Deferred => {
                tracing::trace!(
                    target: targets::ENGINE,
                    %revision,
                    delay_ms = self.settings.delay().as_millis() as u64,
                    "recomputation deferred"
                );
                None
            }
        }
    }

    /// Run the recomputation whose debounce delay has elapsed, if any.
    ///
    /// Call from the host event loop.
    pub fn poll<H>(&mut self, host: &mut H) -> Option<Transition>
    where
        H: SuggestHost<Item = T>,
    {
        self.affinity.debug_assert_same_thread();
        let revision = self.scheduler.take_fired()?;
        self.run_fired(revision, host)
    }

    /// Run a fired recomputation captured at `revision`.
    ///
    /// Returns `None` without touching the host if a newer text change has
    /// happened since.
    pub fn run_fired<H>(&mut self, revision: Revision, host: &mut H) -> Option<Transition>
    where
        H: SuggestHost<Item = T>,
    {
        self.affinity.debug_assert_same_thread();

        if !self.revisions.is_current(revision) {
            tracing::trace!(
                target: targets::ENGINE,
                %revision,
                current = %self.revisions.current(),
                "discarding stale recomputation"
            );
            return None;
        }
        Some(self.update_suggestion_list(host))
    }

    /// Cancel the pending recomputation. Returns `true` if one was pending.
    pub fn cancel_pending(&mut self) -> bool {
        self.affinity.debug_assert_same_thread();
        self.scheduler.cancel()
    }

    // =========================================================================
    // Recomputation
    // =========================================================================

    /// Recompute suggestions for the host's current text.
    #[tracing::instrument(
        target = "horizon_suggest::engine",
        level = "debug",
        skip_all,
        fields(revision = %self.revisions.current())
    )]
    pub fn update_suggestion_list<H>(&mut self, host: &mut H) -> Transition
    where
        H: SuggestHost<Item = T>,
    {
        self.affinity.debug_assert_same_thread();

        let escape = self.settings.escape_as_like();
        let query = PatternBuilder::build(&host.text(), escape);

        if self.previous_query.as_ref() == Some(&query) {
            tracing::trace!(target: targets::ENGINE, %query, "query unchanged");
            return Transition::Unchanged;
        }
        self.previous_query = Some(query.clone());

        let base = host.base_filter();

        if query.is_empty() {
            host.set_dropdown_open(false);
            host.clear_selected_item();
            host.set_filter(base);
            self.set_state(SuggestState::Idle);
            tracing::debug!(target: targets::ENGINE, "query cleared");
            return Transition::Cleared;
        }

        let selection_matches = host
            .selected_item()
            .is_some_and(|item| text_from_item(self.projector.as_ref(), item, escape) == query.as_str());
        if selection_matches {
            let filter_reset = self.settings.reset_after_select();
            if filter_reset {
                host.set_filter(base);
            }
            self.set_state(SuggestState::Selected);
            tracing::debug!(target: targets::ENGINE, %query, filter_reset, "selection recognized");
            return Transition::Selected { filter_reset };
        }

        {
            let mut guard = CaretGuard::new(host);
            guard.clear_selected_item();
        }

        let filter = self.build_filter(&query, base);
        let max = self.settings.max_suggestion_count();
        let count = {
            let _perf = PerfSpan::new("count_up_to");
            count_up_to(host.items(), |item| filter(item), max)
        };

        if within_bound(count, max) {
            show_filtered(host, filter);
            self.set_state(SuggestState::Filtering);
            tracing::debug!(target: targets::ENGINE, %query, count, "showing suggestions");
            self.suggestions_shown.emit(count);
            Transition::Filtering { count }
        } else {
            if self.state == SuggestState::Selected {
                self.set_state(SuggestState::Idle);
            }
            tracing::debug!(target: targets::ENGINE, %query, count, max, "too many suggestions");
            self.suggestions_suppressed.emit(count);
            Transition::Suppressed { count }
        }
    }

    /// Apply the filter for the current text and open the dropdown,
    /// whatever the number of matches.
    ///
    /// This is the explicit "show suggestions" request (Ctrl+Space in a
    /// typical host). It does not touch the debounce state.
    pub fn open_dropdown<H>(&mut self, host: &mut H) -> Transition
    where
        H: SuggestHost<Item = T>,
    {
        self.affinity.debug_assert_same_thread();

        let query = PatternBuilder::build(&host.text(), self.settings.escape_as_like());
        let filter = self.build_filter(&query, host.base_filter());
        show_filtered(host, filter);

        self.set_state(if query.is_empty() {
            SuggestState::Idle
        } else {
            SuggestState::Filtering
        });
        tracing::debug!(target: targets::ENGINE, %query, "dropdown opened on request");
        Transition::Opened
    }

    /// The base filter ANDed with the query filter for the host's current text.
    pub fn composed_filter<H>(&self, host: &H) -> Filter<T>
    where
        H: SuggestHost<Item = T>,
    {
        let query = PatternBuilder::build(&host.text(), self.settings.escape_as_like());
        self.build_filter(&query, host.base_filter())
    }

    fn build_filter(&self, query: &NormalizedQuery, base: Option<Filter<T>>) -> Filter<T> {
        let filter = query_filter(
            Arc::clone(self.settings.strategy()),
            query,
            Arc::clone(&self.projector),
            self.settings.escape_as_like(),
        );
        compose(base, filter)
    }

    fn set_state(&mut self, state: SuggestState) {
        if self.state == state {
            return;
        }
        tracing::debug!(target: targets::ENGINE, from = ?self.state, to = ?state, "state changed");
        self.state = state;
        self.state_changed.emit(state);
    }
}

/// Apply `filter` without disturbing the caret, open the dropdown and
/// deselect the text.
fn show_filtered<H: SuggestHost>(host: &mut H, filter: Filter<H::Item>) {
    {
        let mut guard = CaretGuard::new(host);
        guard.set_filter(Some(filter));
    }
    host.set_dropdown_open(true);
    let caret = host.caret();
    host.select(caret.collapsed_to_end());
}

impl<T, S> fmt::Debug for SuggestionEngine<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestionEngine")
            .field("settings", &self.settings)
            .field("revision", &self.revisions.current())
            .field("previous_query", &self.previous_query)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
