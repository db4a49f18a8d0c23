//! Debounced, bounded incremental suggestion filtering.
//!
//! Horizon Suggest drives the dropdown of an autocompleting text input. As
//! the user types, [`SuggestionEngine`] coalesces keystrokes with a debounce
//! scheduler, builds a filter from the text, counts matches up to a maximum
//! and decides whether to open the dropdown. The widget itself stays outside
//! the crate, behind the [`SuggestHost`] trait.
//!
//! # Crate Structure
//!
//! - [`pattern`]: Raw text to [`NormalizedQuery`] (space-to-wildcard escaping)
//! - [`strategy`]: Pluggable [`MatchStrategy`] implementations
//! - [`counter`]: Early-exit match counting
//! - [`filter`]: Item projection and base/query filter composition
//! - [`settings`]: [`SuggestSettings`] and TOML loading
//! - [`host`]: The [`SuggestHost`] contract and [`CaretGuard`]
//! - [`engine`]: The [`SuggestionEngine`] state machine
//!
//! Debounce scheduling, revisions and signals come from
//! [`horizon_suggest_core`] and are re-exported here.
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//! use horizon_suggest::prelude::*;
//!
//! let settings = SuggestSettings::new()
//!     .with_delay(Duration::ZERO)
//!     .with_max_suggestion_count(1);
//! let mut engine = SuggestionEngine::new(display_projector::<&str>(), settings);
//! let mut host = ListHost::new(vec!["Apple", "Banana", "Apricot"]);
//!
//! // Every item contains an "a": too many to show.
//! host.type_text("a");
//! let transition = engine.on_text_changed(&mut host);
//! assert!(matches!(transition, Some(Transition::Suppressed { .. })));
//! assert!(!host.is_dropdown_open());
//! ```

pub mod counter;
pub mod engine;
mod error;
pub mod filter;
pub mod host;
mod list_host;
pub mod pattern;
pub mod settings;
pub mod strategy;

pub use counter::{count_up_to, within_bound};
pub use engine::{SuggestState, SuggestionEngine, Transition};
pub use error::{Result, SettingsError};
pub use filter::{Filter, TextProjector, compose, display_projector, query_filter, text_from_item};
pub use host::{CaretGuard, SuggestHost, TextSelection};
pub use list_host::ListHost;
pub use pattern::{LIKE_WILDCARD, NormalizedQuery, PatternBuilder};
pub use settings::SuggestSettings;
pub use strategy::{CaseSensitivity, LikeMatch, MatchStrategy, PrefixMatch, SubstringMatch};

pub use horizon_suggest_core::{
    DebounceScheduler, Debouncer, ManualClock, Revision, Schedule, SchedulerError, SystemClock,
    ThreadedDebouncer,
};

/// Commonly used types.
pub mod prelude {
    pub use crate::engine::{SuggestState, SuggestionEngine, Transition};
    pub use crate::filter::{Filter, TextProjector, display_projector};
    pub use crate::host::{SuggestHost, TextSelection};
    pub use crate::list_host::ListHost;
    pub use crate::settings::SuggestSettings;
    pub use crate::strategy::MatchStrategy;
    pub use horizon_suggest_core::{DebounceScheduler, Debouncer, ThreadedDebouncer};
}

static_assertions::assert_impl_all!(SuggestSettings: Send, Sync);
static_assertions::assert_impl_all!(Filter<String>: Send, Sync);
static_assertions::assert_impl_all!(NormalizedQuery: Send, Sync);
