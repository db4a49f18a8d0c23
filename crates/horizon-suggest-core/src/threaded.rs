//! Debouncer backed by a background timer thread.
//!
//! The timer thread only tracks deadlines. When a deadline passes it sends the
//! generation of the armed slot back over a channel and calls the optional
//! waker so the host event loop can wake up. The job itself stays on the
//! owning thread: [`take_fired`](DebounceScheduler::take_fired) drains the
//! channel there and hands the job out only if the fired generation still
//! matches the pending slot. A job that was replaced or cancelled before its
//! fire was drained is therefore never returned.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, unbounded};

use crate::debounce::{DebounceScheduler, Schedule};
use crate::error::SchedulerError;

/// Callback invoked from the timer thread when a job becomes due.
pub type Waker = Arc<dyn Fn() + Send + Sync + 'static>;

/// Default name for the timer thread.
const DEFAULT_THREAD_NAME: &str = "horizon-suggest-timer";

/// Commands sent to the timer thread.
#[derive(Debug)]
enum TimerCommand {
    /// Arm (or re-arm) the single timer.
    Arm { generation: u64, deadline: Instant },
    /// Disarm the timer.
    Disarm,
    /// Exit the timer loop.
    Shutdown,
}

/// A debouncer whose delay is measured by a dedicated timer thread.
pub struct ThreadedDebouncer<J> {
    commands: Sender<TimerCommand>,
    fired: Receiver<u64>,
    /// Generation of the most recent schedule or cancel.
    generation: u64,
    pending: Option<(u64, J)>,
    thread: Option<JoinHandle<()>>,
}

impl<J> ThreadedDebouncer<J> {
    /// Start a timer thread with no waker.
    pub fn new() -> Result<Self, SchedulerError> {
        Self::spawn(DEFAULT_THREAD_NAME, None)
    }

    /// Start a timer thread that calls `waker` whenever a job becomes due.
    pub fn with_waker<W>(waker: W) -> Result<Self, SchedulerError>
    where
        W: Fn() + Send + Sync + 'static,
    {
        Self::spawn(DEFAULT_THREAD_NAME, Some(Arc::new(waker)))
    }

    /// Start a named timer thread.
    pub fn spawn(name: &str, waker: Option<Waker>) -> Result<Self, SchedulerError> {
        let (command_tx, command_rx) = unbounded();
        let (fired_tx, fired_rx) = unbounded();

        let thread = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || timer_loop(command_rx, fired_tx, waker))
            .map_err(|err| SchedulerError::spawn(name, err))?;

        tracing::debug!(target: "horizon_suggest_core::debounce", name, "timer thread started");

        Ok(Self {
            commands: command_tx,
            fired: fired_rx,
            generation: 0,
            pending: None,
            thread: Some(thread),
        })
    }

    /// Schedule `job`, reporting a dead timer thread instead of recovering.
    ///
    /// On error the job is dropped and nothing is pending.
    pub fn try_schedule(&mut self, delay: Duration, job: J) -> Result<Schedule<J>, SchedulerError> {
        self.arm(delay, job).map_err(|(err, _job)| err)
    }

    fn arm(&mut self, delay: Duration, job: J) -> Result<Schedule<J>, (SchedulerError, J)> {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;

        if delay.is_zero() {
            // Nothing to time; a dead timer thread is irrelevant here.
            let _ = self.send(TimerCommand::Disarm);
            return Ok(Schedule::RunNow(job));
        }

        let generation = self.generation;
        let deadline = Instant::now() + delay;
        if let Err(err) = self.send(TimerCommand::Arm {
            generation,
            deadline,
        }) {
            return Err((err, job));
        }
        self.pending = Some((generation, job));
        Ok(Schedule::Deferred)
    }

    /// Block for up to `timeout` waiting for the pending job to fire.
    ///
    /// Must be called from the owning thread, like `take_fired`.
    pub fn wait_fired(&mut self, timeout: Duration) -> Option<J> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(job) = self.take_fired() {
                return Some(job);
            }
            self.pending.as_ref()?;

            match self.fired.recv_deadline(deadline) {
                Ok(generation) => {
                    if let Some(job) = self.accept(generation) {
                        return Some(job);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None;
                }
            }
        }
    }

    fn send(&self, command: TimerCommand) -> Result<(), SchedulerError> {
        self.commands
            .send(command)
            .map_err(|_| SchedulerError::TimerThreadGone)
    }

    fn accept(&mut self, generation: u64) -> Option<J> {
        match self.pending.take() {
            Some((pending, job)) if pending == generation => {
                tracing::trace!(target: "horizon_suggest_core::debounce", generation, "debounced job fired");
                Some(job)
            }
            other => {
                tracing::trace!(target: "horizon_suggest_core::debounce", generation, "discarding stale timer fire");
                self.pending = other;
                None
            }
        }
    }
}

impl<J> DebounceScheduler<J> for ThreadedDebouncer<J> {
    fn schedule(&mut self, delay: Duration, job: J) -> Schedule<J> {
        // Losing an update is worse than skipping the delay.
        match self.arm(delay, job) {
            Ok(schedule) => schedule,
            Err((err, job)) => {
                tracing::error!(target: "horizon_suggest_core::debounce", %err, "timer unavailable, running job immediately");
                Schedule::RunNow(job)
            }
        }
    }

    fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        let was_pending = self.pending.take().is_some();
        if was_pending && self.send(TimerCommand::Disarm).is_err() {
            tracing::debug!(target: "horizon_suggest_core::debounce", "timer thread gone during cancel");
        }
        was_pending
    }

    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn take_fired(&mut self) -> Option<J> {
        loop {
            match self.fired.try_recv() {
                Ok(generation) => {
                    if let Some(job) = self.accept(generation) {
                        return Some(job);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }
}

impl<J> Drop for ThreadedDebouncer<J> {
    fn drop(&mut self) {
        let _ = self.commands.send(TimerCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!(target: "horizon_suggest_core::debounce", "timer thread panicked");
            }
        }
    }
}

impl<J> std::fmt::Debug for ThreadedDebouncer<J> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadedDebouncer")
            .field("generation", &self.generation)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

/// The timer thread: waits for the armed deadline or the next command.
fn timer_loop(commands: Receiver<TimerCommand>, fired: Sender<u64>, waker: Option<Waker>) {
    let mut armed: Option<(u64, Instant)> = None;

    loop {
        let command = match armed {
            Some((generation, deadline)) => match commands.recv_deadline(deadline) {
                Ok(command) => command,
                Err(RecvTimeoutError::Timeout) => {
                    armed = None;
                    if fired.send(generation).is_err() {
                        break;
                    }
                    if let Some(waker) = &waker {
                        waker();
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match commands.recv() {
                Ok(command) => command,
                Err(_) => break,
            },
        };

        match command {
            TimerCommand::Arm {
                generation,
                deadline,
            } => armed = Some((generation, deadline)),
            TimerCommand::Disarm => armed = None,
            TimerCommand::Shutdown => break,
        }
    }

    tracing::debug!(target: "horizon_suggest_core::debounce", "timer thread exiting");
}
