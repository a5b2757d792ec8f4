use std::{cell::RefCell, rc::Rc, sync::atomic::AtomicU64};

use crate::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    /// A token that does not correspond to any timer.
    pub const INVALID: TimerToken = TimerToken(0);

    /// Create a new token.
    pub fn next() -> TimerToken {
        static TIMER_COUNTER: AtomicU64 = AtomicU64::new(1);
        TimerToken(TIMER_COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed))
    }

    /// Get the raw value for a token.
    pub const fn into_raw(self) -> u64 {
        self.0
    }
}

/// Source of time and deferred execution for the resize throttle.
///
/// Everything runs on one thread: a scheduled action is invoked by the host's
/// event loop once its deadline has passed, never concurrently with other work.
pub trait Scheduler {
    fn now(&self) -> Instant;

    /// Runs `action` once, `delay` after now.
    fn exec_after(&self, delay: Duration, action: Box<dyn FnOnce()>) -> TimerToken;
}

struct Timer {
    token: TimerToken,
    deadline: Instant,
    action: Box<dyn FnOnce()>,
}

struct ManualState {
    now: Instant,
    timers: Vec<Timer>,
}

/// A [`Scheduler`] whose clock only moves when told to.
///
/// Native hosts drive it from their event loop and tests use it to step through
/// time deterministically.
#[derive(Clone)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            state: Rc::new(RefCell::new(ManualState {
                now,
                timers: Vec::new(),
            })),
        }
    }

    /// Moves the clock forward by `by`, running every timer that comes due, in
    /// deadline order. Each action observes the clock at its own deadline.
    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().now + by;
        while let Some(timer) = self.pop_due(target) {
            tracing::trace!(token = timer.token.into_raw(), "timer fired");
            (timer.action)();
        }
        self.state.borrow_mut().now = target;
    }

    /// Runs timers already due at the current time.
    pub fn run_due(&self) {
        self.advance(Duration::ZERO);
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state
            .borrow()
            .timers
            .iter()
            .map(|timer| timer.deadline)
            .min()
    }

    fn pop_due(&self, target: Instant) -> Option<Timer> {
        let mut state = self.state.borrow_mut();
        let index = state
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline <= target)
            .min_by_key(|(_, timer)| (timer.deadline, timer.token))
            .map(|(index, _)| index)?;
        let timer = state.timers.remove(index);
        state.now = state.now.max(timer.deadline);
        Some(timer)
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Instant {
        self.state.borrow().now
    }

    fn exec_after(&self, delay: Duration, action: Box<dyn FnOnce()>) -> TimerToken {
        let token = TimerToken::next();
        let mut state = self.state.borrow_mut();
        let deadline = state.now + delay;
        state.timers.push(Timer {
            token,
            deadline,
            action,
        });
        token
    }
}
