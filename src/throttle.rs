use std::{
    cell::Cell,
    rc::{Rc, Weak},
};

use crate::{
    time::{Duration, Instant},
    timer::{Scheduler, TimerToken},
};

/// Rate limits an action to one invocation per `wait` window.
///
/// The first call after a quiet period runs the action immediately. Further calls
/// inside the window are coalesced into a single trailing invocation once the
/// window has elapsed, and that invocation opens a new window. A steady stream of
/// calls therefore runs the action once per window, and a burst inside one window
/// runs it at most twice.
#[derive(Clone)]
pub struct Throttle {
    inner: Rc<ThrottleInner>,
}

struct ThrottleInner {
    wait: Duration,
    scheduler: Rc<dyn Scheduler>,
    action: Box<dyn Fn()>,
    last_invoke: Cell<Option<Instant>>,
    trailing: Cell<bool>,
    timer: Cell<Option<TimerToken>>,
}

impl Throttle {
    pub fn new(wait: Duration, scheduler: Rc<dyn Scheduler>, action: impl Fn() + 'static) -> Self {
        Self {
            inner: Rc::new(ThrottleInner {
                wait,
                scheduler,
                action: Box::new(action),
                last_invoke: Cell::new(None),
                trailing: Cell::new(false),
                timer: Cell::new(None),
            }),
        }
    }

    pub fn wait(&self) -> Duration {
        self.inner.wait
    }

    /// Whether a trailing invocation is waiting for the window to close.
    pub fn is_pending(&self) -> bool {
        self.inner.trailing.get()
    }

    pub fn call(&self) {
        ThrottleInner::call(&self.inner);
    }
}

impl ThrottleInner {
    fn call(this: &Rc<Self>) {
        let now = this.scheduler.now();
        let remaining = this.remaining(now);

        if this.timer.get().is_none() && remaining.is_zero() {
            this.invoke(now);
            return;
        }

        this.trailing.set(true);
        if this.timer.get().is_none() {
            Self::schedule(this, remaining);
        }
    }

    /// Time left in the current window.
    fn remaining(&self, now: Instant) -> Duration {
        match self.last_invoke.get() {
            Some(last) => (last + self.wait).saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }

    fn schedule(this: &Rc<Self>, after: Duration) {
        let weak: Weak<Self> = Rc::downgrade(this);
        let token = this.scheduler.exec_after(
            after,
            Box::new(move || {
                if let Some(this) = weak.upgrade() {
                    Self::fire(&this);
                }
            }),
        );
        this.timer.set(Some(token));
    }

    fn fire(this: &Rc<Self>) {
        this.timer.set(None);
        if this.trailing.replace(false) {
            let now = this.scheduler.now();
            this.invoke(now);
        }
    }

    fn invoke(&self, now: Instant) {
        self.last_invoke.set(Some(now));
        (self.action)();
    }
}
