//! Core runtime for Horizon Suggest.
//!
//! This crate provides the foundational pieces the suggestion engine is built on:
//!
//! - **Revisions**: Monotonic tokens for discarding stale completions
//! - **Debounce Scheduling**: Single-slot, cancellable delayed jobs, either
//!   polled from the host event loop or driven by a timer thread
//! - **Clocks**: System and manual time sources
//! - **Signal/Slot System**: Change notification for hosts
//! - **Thread Affinity**: Debug checks that UI-owned state stays on its thread
//!
//! # Debounce Example
//!
//! ```
//! use std::time::Duration;
//! use horizon_suggest_core::{DebounceScheduler, Debouncer, ManualClock, RevisionCounter};
//!
//! let clock = ManualClock::new();
//! let mut debouncer = Debouncer::with_clock(clock.clone());
//! let mut revisions = RevisionCounter::new();
//!
//! // Three keystrokes in quick succession.
//! for _ in 0..3 {
//!     let revision = revisions.advance();
//!     let _ = debouncer.schedule(Duration::from_millis(300), revision);
//! }
//!
//! clock.advance(Duration::from_millis(300));
//! let fired = debouncer.take_fired().unwrap();
//! assert!(revisions.is_current(fired));
//! ```

mod clock;
mod debounce;
mod error;
pub mod logging;
mod revision;
pub mod signal;
pub mod thread_check;
mod threaded;

pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::{DebounceScheduler, Debouncer, Schedule};
pub use error::{Result, SchedulerError, SuggestError};
pub use logging::PerfSpan;
pub use revision::{Revision, RevisionCounter};
pub use signal::{ConnectionId, Signal};
pub use thread_check::ThreadAffinity;
pub use threaded::{ThreadedDebouncer, Waker};

static_assertions::assert_impl_all!(Signal<usize>: Send, Sync);
static_assertions::assert_impl_all!(ManualClock: Send, Sync);
static_assertions::assert_impl_all!(ThreadedDebouncer<Revision>: Send);
