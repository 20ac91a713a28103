//! Repeating-timer capability for carousel autoplay.
//!
//! A [`Scheduler`] arms repeating timers; each armed [`Timer`] is an owned
//! handle with a typed, consuming [`Timer::cancel`]. Dropping a handle
//! cancels it as well, so a timer can never outlive its owner.
//!
//! Ticks are delivered as [`TimerId`]s rather than callbacks. The owner
//! compares the id against the handle it holds and ignores anything else,
//! which makes a tick that was already queued when its timer was cancelled
//! harmless.
//!
//! Two implementations:
//!
//! | Scheduler | Clock | Delivery |
//! |-----------|-------|----------|
//! | [`ThreadScheduler`] | wall clock | worker thread sends into an `mpsc` channel |
//! | [`ManualScheduler`] | virtual | [`ManualScheduler::advance`] returns due ticks |

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Shortest period a scheduler will arm. Guards against busy loops.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Identity of one armed timer. Never reused within a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Owned handle to an armed repeating timer.
pub trait Timer {
    fn id(&self) -> TimerId;

    /// Stop the timer. Once this returns, no further tick is produced.
    fn cancel(self);
}

/// Something that can arm repeating timers.
pub trait Scheduler {
    type Timer: Timer;

    /// Arm a timer that ticks every `period`, first tick one period from now.
    fn start_repeating(&mut self, period: Duration) -> Self::Timer;
}

// ============================================================================
// Wall-clock scheduler
// ============================================================================

/// Scheduler backed by one worker thread per armed timer.
///
/// Ticks are sent into the event channel the scheduler was built with, so
/// they interleave with every other event the host consumes from it.
#[derive(Debug)]
pub struct ThreadScheduler<E> {
    events: Sender<E>,
    next_id: u64,
}

impl<E> ThreadScheduler<E> {
    pub fn new(events: Sender<E>) -> Self {
        Self { events, next_id: 0 }
    }
}

impl<E: From<TimerId> + Send + 'static> Scheduler for ThreadScheduler<E> {
    type Timer = ThreadTimer;

    fn start_repeating(&mut self, period: Duration) -> ThreadTimer {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let period = period.max(MIN_PERIOD);

        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let events = self.events.clone();
        let worker = thread::spawn(move || {
            loop {
                match cancel_rx.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => {
                        if events.send(E::from(id)).is_err() {
                            break;
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        ThreadTimer {
            id,
            cancel: Some(cancel_tx),
            worker: Some(worker),
        }
    }
}

/// Handle to a timer armed by [`ThreadScheduler`].
#[derive(Debug)]
pub struct ThreadTimer {
    id: TimerId,
    cancel: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl ThreadTimer {
    fn shutdown(&mut self) {
        // Closing the channel wakes the worker out of recv_timeout.
        drop(self.cancel.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!(timer = self.id.0, "timer worker panicked");
            }
        }
    }
}

impl Timer for ThreadTimer {
    fn id(&self) -> TimerId {
        self.id
    }

    fn cancel(mut self) {
        self.shutdown();
    }
}

impl Drop for ThreadTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ============================================================================
// Virtual-clock scheduler
// ============================================================================

#[derive(Debug)]
struct ManualEntry {
    id: TimerId,
    period: Duration,
    next_due: Duration,
}

#[derive(Debug, Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    timers: Vec<ManualEntry>,
}

/// Scheduler driven by an explicit virtual clock.
///
/// Clones share the same clock, so a host can hand one clone to a carousel
/// and keep another to move time forward.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of timers currently armed.
    pub fn active_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Earliest pending deadline across all armed timers.
    pub fn next_due(&self) -> Option<Duration> {
        self.state.borrow().timers.iter().map(|t| t.next_due).min()
    }

    /// Move the clock forward by `by` and return every tick that became due,
    /// in chronological order. Ties keep arming order.
    pub fn advance(&self, by: Duration) -> Vec<TimerId> {
        let mut state = self.state.borrow_mut();
        let target = state.now + by;
        let mut fired = Vec::new();
        while let Some(entry) = state
            .timers
            .iter_mut()
            .filter(|t| t.next_due <= target)
            .min_by_key(|t| t.next_due)
        {
            fired.push(entry.id);
            entry.next_due += entry.period;
        }
        state.now = target;
        fired
    }
}

impl Scheduler for ManualScheduler {
    type Timer = ManualTimer;

    fn start_repeating(&mut self, period: Duration) -> ManualTimer {
        let mut state = self.state.borrow_mut();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let period = period.max(MIN_PERIOD);
        let next_due = state.now + period;
        state.timers.push(ManualEntry {
            id,
            period,
            next_due,
        });
        ManualTimer {
            id,
            state: Rc::clone(&self.state),
        }
    }
}

/// Handle to a timer armed by [`ManualScheduler`].
#[derive(Debug)]
pub struct ManualTimer {
    id: TimerId,
    state: Rc<RefCell<ManualState>>,
}

impl Timer for ManualTimer {
    fn id(&self) -> TimerId {
        self.id
    }

    fn cancel(self) {
        drop(self);
    }
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.state.borrow_mut().timers.retain(|t| t.id != self.id);
    }
}
