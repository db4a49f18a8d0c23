//! Thread affinity checks for single-threaded engine state.
//!
//! Suggestion state is owned by the host's UI thread and is never locked.
//! [`ThreadAffinity`] records the thread an object was created on so entry
//! points can assert they are still being driven from it.
//!
//! ```
//! use horizon_suggest_core::ThreadAffinity;
//!
//! struct Engine {
//!     affinity: ThreadAffinity,
//!     value: std::cell::Cell<i32>,
//! }
//!
//! impl Engine {
//!     fn set_value(&self, v: i32) {
//!         // In debug builds, panic if called from wrong thread
//!         self.affinity.debug_assert_same_thread();
//!         self.value.set(v);
//!     }
//! }
//!
//! let engine = Engine { affinity: ThreadAffinity::current(), value: Default::default() };
//! engine.set_value(3);
//! ```

use std::thread::ThreadId;

/// Thread affinity tracker.
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Create a new thread affinity tracker for the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Get the thread ID this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Assert that we are on the same thread as the affinity.
    ///
    /// # Panics
    ///
    /// Panics with a descriptive message if called from a different thread.
    pub fn assert_same_thread_with_msg(&self, msg: &str) {
        if !self.is_same_thread() {
            self.panic_wrong_thread(msg);
        }
    }

    /// Debug-only assertion that we are on the same thread.
    ///
    /// This is a no-op in release builds.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread_with_msg("suggestion state accessed from wrong thread");
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self, msg: &str) -> ! {
        let current = std::thread::current();
        let current_name = current.name().unwrap_or("<unnamed>");
        let current_id = current.id();

        panic!(
            "\n\
            ══════════════════════════════════════════════════════════════════════\n\
            THREAD AFFINITY VIOLATION\n\
            ══════════════════════════════════════════════════════════════════════\n\
            \n\
            {msg}\n\
            \n\
            Owner thread: {:?}\n\
            Current thread: \"{current_name}\" (ID: {current_id:?})\n\
            \n\
            Suggestion state belongs to the UI thread that created it. Timer\n\
            threads must hand work back to that thread instead of touching\n\
            the engine directly (see ThreadedDebouncer::take_fired).\n\
            \n\
            ══════════════════════════════════════════════════════════════════════",
            self.thread_id
        )
    }
}
