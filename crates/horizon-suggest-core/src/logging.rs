//! Logging facilities for Horizon Suggest.
//!
//! Horizon Suggest uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_suggest=debug,horizon_suggest_core=trace")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core runtime target.
    pub const CORE: &str = "horizon_suggest_core";
    /// Debounce scheduling target.
    pub const DEBOUNCE: &str = "horizon_suggest_core::debounce";
    /// Signal emission target.
    pub const SIGNAL: &str = "horizon_suggest_core::signal";
    /// Suggestion engine target.
    pub const ENGINE: &str = "horizon_suggest::engine";
    /// Settings loading target.
    pub const SETTINGS: &str = "horizon_suggest::settings";
}

/// A performance tracing span.
///
/// Active until dropped; use around work whose duration matters, such as a
/// bounded scan over a large items source.
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_suggest::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }

    #[test]
    fn test_targets_are_namespaced() {
        assert!(targets::DEBOUNCE.starts_with(targets::CORE));
        assert!(targets::SIGNAL.starts_with(targets::CORE));
    }
}
