//! Debounce scheduling for coalescing rapid-fire events.
//!
//! A debounce scheduler holds at most one pending job. Scheduling a new job
//! replaces the pending one, so of a burst of events only the last survives
//! the delay window. Jobs are plain values (typically a [`Revision`] or a
//! boxed closure); the scheduler never runs them itself. The owning thread
//! collects a fired job with [`DebounceScheduler::take_fired`] and runs it
//! there, which keeps jobs on the thread that owns the state they touch.
//!
//! Two implementations are provided:
//!
//! - [`Debouncer`]: polled from the host event loop, like any other timer.
//! - [`ThreadedDebouncer`](crate::ThreadedDebouncer): a background timer
//!   thread wakes the host when the delay elapses.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use horizon_suggest_core::{DebounceScheduler, Debouncer, ManualClock, Schedule};
//!
//! let clock = ManualClock::new();
//! let mut debouncer = Debouncer::with_clock(clock.clone());
//!
//! for text in ["a", "ap", "app"] {
//!     let scheduled = debouncer.schedule(Duration::from_millis(300), text);
//!     assert!(matches!(scheduled, Schedule::Deferred));
//! }
//!
//! clock.advance(Duration::from_millis(300));
//! assert_eq!(debouncer.take_fired(), Some("app"));
//! assert_eq!(debouncer.take_fired(), None);
//! ```
//!
//! [`Revision`]: crate::Revision

use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};

/// The outcome of scheduling a job.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a job returned as RunNow must be run by the caller"]
pub enum Schedule<J> {
    /// The delay was zero; the caller must run the job immediately.
    RunNow(J),
    /// The job is pending and will be returned by `take_fired` once due.
    Deferred,
}

impl<J> Schedule<J> {
    /// Extract the job if it must run immediately.
    pub fn into_immediate(self) -> Option<J> {
        match self {
            Self::RunNow(job) => Some(job),
            Self::Deferred => None,
        }
    }
}

/// A single-slot, cancellable delayed job holder.
pub trait DebounceScheduler<J> {
    /// Schedule `job` to fire after `delay`, replacing any pending job.
    ///
    /// A zero delay involves no timer: the pending job (if any) is cancelled
    /// and `job` is handed straight back as [`Schedule::RunNow`].
    fn schedule(&mut self, delay: Duration, job: J) -> Schedule<J>;

    /// Drop the pending job, if any. A cancelled job is never returned.
    ///
    /// Returns `true` if a job was pending.
    fn cancel(&mut self) -> bool;

    /// Whether a job is waiting for its delay to elapse.
    fn is_pending(&self) -> bool;

    /// Take the pending job if its delay has elapsed.
    fn take_fired(&mut self) -> Option<J>;
}

/// Internal pending job data.
#[derive(Debug)]
struct PendingJob<J> {
    /// When the job becomes due.
    due: Instant,
    /// The job itself.
    job: J,
}

/// A debouncer driven by polling from the owning event loop.
///
/// The host loop sleeps for at most [`time_until_due`](Self::time_until_due)
/// and then calls [`take_fired`](DebounceScheduler::take_fired).
#[derive(Debug)]
pub struct Debouncer<J, C = SystemClock> {
    clock: C,
    pending: Option<PendingJob<J>>,
}

impl<J> Debouncer<J, SystemClock> {
    /// Create a debouncer using the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<J> Default for Debouncer<J, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<J, C: Clock> Debouncer<J, C> {
    /// Create a debouncer using the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            pending: None,
        }
    }

    /// Get the duration until the pending job is due, if any.
    ///
    /// Returns `Duration::ZERO` if the job is already due.
    pub fn time_until_due(&self) -> Option<Duration> {
        self.pending.as_ref().map(|pending| {
            pending
                .due
                .saturating_duration_since(self.clock.now())
        })
    }

    /// The clock this debouncer reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<J, C: Clock> DebounceScheduler<J> for Debouncer<J, C> {
    fn schedule(&mut self, delay: Duration, job: J) -> Schedule<J> {
        if delay.is_zero() {
            if self.pending.take().is_some() {
                tracing::trace!(target: "horizon_suggest_core::debounce", "pending job superseded by immediate run");
            }
            return Schedule::RunNow(job);
        }

        let due = self.clock.now() + delay;
        if self.pending.replace(PendingJob { due, job }).is_some() {
            tracing::trace!(target: "horizon_suggest_core::debounce", ?delay, "pending job replaced");
        } else {
            tracing::trace!(target: "horizon_suggest_core::debounce", ?delay, "job scheduled");
        }
        Schedule::Deferred
    }

    fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn take_fired(&mut self) -> Option<J> {
        let due = self.pending.as_ref()?.due;
        if due > self.clock.now() {
            return None;
        }

        tracing::trace!(target: "horizon_suggest_core::debounce", "debounced job fired");
        self.pending.take().map(|pending| pending.job)
    }
}
