//! Integration tests for debounce scheduling and revision checks.

use horizon_suggest_core::{
    DebounceScheduler, Debouncer, ManualClock, Revision, RevisionCounter, Schedule, Signal,
    ThreadedDebouncer,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const DELAY: Duration = Duration::from_millis(300);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Drives a scheduler the way the suggestion engine does: advance the
/// revision, schedule it, and honor a fired revision only if still current.
struct Driver<S> {
    scheduler: S,
    revisions: RevisionCounter,
    runs: Vec<Revision>,
}

impl<S: DebounceScheduler<Revision>> Driver<S> {
    fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            revisions: RevisionCounter::new(),
            runs: Vec::new(),
        }
    }

    fn change(&mut self, delay: Duration) {
        let revision = self.revisions.advance();
        if let Schedule::RunNow(revision) = self.scheduler.schedule(delay, revision) {
            self.run(revision);
        }
    }

    fn poll(&mut self) {
        if let Some(revision) = self.scheduler.take_fired() {
            self.run(revision);
        }
    }

    fn run(&mut self, revision: Revision) {
        if self.revisions.is_current(revision) {
            self.runs.push(revision);
        }
    }
}

#[test]
fn burst_yields_single_run_with_last_revision() {
    init_tracing();
    let clock = ManualClock::new();
    let mut driver = Driver::new(Debouncer::with_clock(clock.clone()));

    for _ in 0..10 {
        driver.change(DELAY);
        clock.advance(Duration::from_millis(50));
        driver.poll();
    }
    assert!(driver.runs.is_empty());

    clock.advance(DELAY);
    driver.poll();
    driver.poll();

    assert_eq!(driver.runs, vec![driver.revisions.current()]);
}

#[test]
fn zero_delay_runs_synchronously() {
    let mut driver = Driver::new(Debouncer::<Revision>::new());

    driver.change(Duration::ZERO);
    driver.change(Duration::ZERO);

    assert_eq!(driver.runs.len(), 2);
    assert!(!driver.scheduler.is_pending());
}

#[test]
fn immediate_run_supersedes_pending() {
    let clock = ManualClock::new();
    let mut driver = Driver::new(Debouncer::with_clock(clock.clone()));

    driver.change(DELAY);
    driver.change(Duration::ZERO);
    clock.advance(DELAY * 2);
    driver.poll();

    assert_eq!(driver.runs.len(), 1);
}

#[test]
fn quiet_periods_each_produce_a_run() {
    let clock = ManualClock::new();
    let mut driver = Driver::new(Debouncer::with_clock(clock.clone()));

    for _ in 0..3 {
        driver.change(DELAY);
        driver.change(DELAY);
        clock.advance(DELAY);
        driver.poll();
    }

    assert_eq!(driver.runs.len(), 3);
}

#[test]
fn threaded_burst_yields_single_run() {
    init_tracing();
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&wakes);
    let scheduler = ThreadedDebouncer::with_waker(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();
    let mut driver = Driver::new(scheduler);

    for _ in 0..5 {
        driver.change(Duration::from_millis(40));
    }

    let fired = driver.scheduler.wait_fired(Duration::from_secs(5));
    assert_eq!(fired, Some(driver.revisions.current()));
    if let Some(revision) = fired {
        driver.run(revision);
    }
    assert_eq!(driver.runs.len(), 1);
    assert_eq!(driver.scheduler.take_fired(), None);

    drop(driver);
    assert!(wakes.load(Ordering::SeqCst) >= 1);
}

#[test]
fn signal_reports_runs() {
    let signal: Signal<Revision> = Signal::new();
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let id = signal.connect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(signal.connection_count(), 1);

    let mut revisions = RevisionCounter::new();
    signal.emit(revisions.advance());
    assert!(signal.disconnect(id));
    signal.emit(revisions.advance());

    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(signal.connection_count(), 0);
}
