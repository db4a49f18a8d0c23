//! Revision tokens for discarding stale asynchronous completions.
//!
//! Every text change advances a [`RevisionCounter`]. Work scheduled for later
//! captures the [`Revision`] that was current when it was scheduled, and is
//! only honored if that revision is still current when it fires.

/// A monotonically increasing token identifying one change request.
///
/// Revisions wrap on overflow, so only equality is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Revision(u64);

impl Revision {
    /// The revision before any change has been recorded.
    pub const INITIAL: Revision = Revision(0);

    /// Get the raw u64 value of this revision.
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// The revision following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Owner of the live revision.
///
/// Not shared between threads; the owning thread compares captured revisions
/// against [`current`](Self::current) after any suspension point.
#[derive(Debug, Default)]
pub struct RevisionCounter {
    current: Revision,
}

impl RevisionCounter {
    /// Create a counter at [`Revision::INITIAL`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next revision and return it.
    pub fn advance(&mut self) -> Revision {
        self.current = self.current.next();
        self.current
    }

    /// The live revision.
    pub fn current(&self) -> Revision {
        self.current
    }

    /// Whether `revision` is still the live revision.
    pub fn is_current(&self, revision: Revision) -> bool {
        self.current == revision
    }
}
