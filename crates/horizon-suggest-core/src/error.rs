//! Error types for the Horizon Suggest runtime.

/// The main error type for Horizon Suggest runtime operations.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    /// Debounce scheduling error.
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),
}

/// Debounce scheduler errors.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// The background timer thread could not be started.
    #[error("Failed to spawn timer thread '{name}': {source}")]
    Spawn {
        /// Name requested for the timer thread.
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The background timer thread has exited and can no longer arm timers.
    #[error("Timer thread is no longer running")]
    TimerThreadGone,
}

impl SchedulerError {
    /// Create a spawn error.
    pub fn spawn(name: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            name: name.into(),
            source,
        }
    }
}

/// A specialized Result type for Horizon Suggest runtime operations.
pub type Result<T> = std::result::Result<T, SuggestError>;
