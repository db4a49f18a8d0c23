//! Suggestion settings.
//!
//! [`SuggestSettings`] is an immutable snapshot owned by the host. The engine
//! reads it at every recomputation and never mutates it.
//!
//! Settings can also be loaded from TOML:
//!
//! ```
//! use std::time::Duration;
//! use horizon_suggest::SuggestSettings;
//!
//! let settings = SuggestSettings::from_toml_str(r#"
//! delay_ms = 150
//! max_suggestion_count = 20
//! escape_as_like = true
//! strategy = "like"
//! "#)?;
//!
//! assert_eq!(settings.delay(), Duration::from_millis(150));
//! assert_eq!(settings.max_suggestion_count(), 20);
//! assert_eq!(settings.strategy().name(), "like");
//! # Ok::<(), horizon_suggest::SettingsError>(())
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use horizon_suggest_core::logging::targets;
use serde::Deserialize;

use crate::error::{Result, SettingsError};
use crate::strategy::{CaseSensitivity, MatchStrategy, SubstringMatch, strategy_by_name};

/// Default debounce delay.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// Default maximum number of suggestions before the dropdown is suppressed.
pub const DEFAULT_MAX_SUGGESTION_COUNT: usize = 100;

/// Immutable configuration read by the engine at each recomputation.
#[derive(Clone)]
pub struct SuggestSettings {
    delay: Duration,
    max_suggestion_count: usize,
    escape_as_like: bool,
    reset_after_select: bool,
    strategy: Arc<dyn MatchStrategy>,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            max_suggestion_count: DEFAULT_MAX_SUGGESTION_COUNT,
            escape_as_like: false,
            reset_after_select: true,
            strategy: Arc::new(SubstringMatch::default()),
        }
    }
}

impl SuggestSettings {
    /// Create settings with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Debounce window. Zero means recompute synchronously.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Suppress the dropdown when more items than this match.
    pub fn max_suggestion_count(&self) -> usize {
        self.max_suggestion_count
    }

    /// Whether spaces in the query become LIKE wildcards.
    pub fn escape_as_like(&self) -> bool {
        self.escape_as_like
    }

    /// Whether the filter resets to the base filter once a selection
    /// matches the displayed text.
    pub fn reset_after_select(&self) -> bool {
        self.reset_after_select
    }

    /// The match strategy.
    pub fn strategy(&self) -> &Arc<dyn MatchStrategy> {
        &self.strategy
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Set the debounce delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the maximum suggestion count.
    pub fn with_max_suggestion_count(mut self, count: usize) -> Self {
        self.max_suggestion_count = count;
        self
    }

    /// Enable or disable space-to-wildcard translation.
    pub fn with_escape_as_like(mut self, escape: bool) -> Self {
        self.escape_as_like = escape;
        self
    }

    /// Enable or disable resetting the filter after a selection.
    pub fn with_reset_after_select(mut self, reset: bool) -> Self {
        self.reset_after_select = reset;
        self
    }

    /// Set the match strategy.
    pub fn with_strategy(mut self, strategy: impl MatchStrategy + 'static) -> Self {
        self.strategy = Arc::new(strategy);
        self
    }

    /// Set an already shared match strategy.
    pub fn with_shared_strategy(mut self, strategy: Arc<dyn MatchStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Parse settings from a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: SettingsFile = toml::from_str(source)?;
        file.into_settings()
    }

    /// Read settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|err| SettingsError::io(path, err))?;
        Self::from_toml_str(&source)
    }
}

impl fmt::Debug for SuggestSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestSettings")
            .field("delay", &self.delay)
            .field("max_suggestion_count", &self.max_suggestion_count)
            .field("escape_as_like", &self.escape_as_like)
            .field("reset_after_select", &self.reset_after_select)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

/// On-disk settings schema.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    /// Signed, like `max_suggestion_count`, so that negative values can be
    /// clamped instead of rejected.
    delay_ms: i64,
    max_suggestion_count: i64,
    escape_as_like: bool,
    reset_suggestion_list_after_select: bool,
    strategy: String,
    case_sensitive: bool,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY.as_millis() as i64,
            max_suggestion_count: DEFAULT_MAX_SUGGESTION_COUNT as i64,
            escape_as_like: false,
            reset_suggestion_list_after_select: true,
            strategy: "substring".to_string(),
            case_sensitive: false,
        }
    }
}

impl SettingsFile {
    fn into_settings(self) -> Result<SuggestSettings> {
        let case_sensitivity = if self.case_sensitive {
            CaseSensitivity::CaseSensitive
        } else {
            CaseSensitivity::CaseInsensitive
        };
        let strategy = strategy_by_name(&self.strategy, case_sensitivity)
            .ok_or_else(|| SettingsError::unknown_strategy(&self.strategy))?;

        Ok(SuggestSettings {
            delay: clamp_delay(self.delay_ms),
            max_suggestion_count: clamp_max_count(self.max_suggestion_count),
            escape_as_like: self.escape_as_like,
            reset_after_select: self.reset_suggestion_list_after_select,
            strategy,
        })
    }
}

/// A negative delay behaves like zero: recompute synchronously.
fn clamp_delay(configured_ms: i64) -> Duration {
    if configured_ms < 0 {
        tracing::warn!(
            target: targets::SETTINGS,
            configured_ms,
            "negative delay_ms, using 0"
        );
        return Duration::ZERO;
    }
    Duration::from_millis(configured_ms.unsigned_abs())
}

/// Non-positive maxima mean zero tolerance: the dropdown only opens when
/// nothing matches.
fn clamp_max_count(configured: i64) -> usize {
    if configured < 0 {
        tracing::warn!(
            target: targets::SETTINGS,
            configured,
            "negative max_suggestion_count, using 0"
        );
        return 0;
    }
    usize::try_from(configured).unwrap_or(usize::MAX)
}
