//! Bounded match counting.
//!
//! Deciding whether to show a dropdown only needs to know whether the number
//! of matches is at most the configured maximum, so the scan stops as soon as
//! the maximum is exceeded instead of walking the whole items source.

/// Count the items matching `predicate`, stopping once the count exceeds `max`.
///
/// The result is exact when it is `<= max`. Otherwise the scan stopped early
/// and `max + 1` is returned as a sentinel meaning "more than `max`".
/// Items after the one that pushed the count over `max` are never visited.
pub fn count_up_to<I, F>(items: I, mut predicate: F, max: usize) -> usize
where
    I: IntoIterator,
    F: FnMut(I::Item) -> bool,
{
    let mut count = 0usize;
    for item in items {
        if predicate(item) {
            count += 1;
            if count > max {
                return count;
            }
        }
    }
    count
}

/// Whether a count returned by [`count_up_to`] is within `max`.
///
/// Counts are unsigned, so the lower bound (`0 <= count`) holds by
/// construction; only the upper bound is checked.
#[inline]
pub fn within_bound(count: usize, max: usize) -> bool {
    count <= max
}
