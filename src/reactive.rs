//! A small fine-grained reactive core: signals, and effects that rerun when the
//! signals they read change.
//!
//! Reads through [`SignalGet::get`] or [`SignalWith::with`] inside a running
//! effect subscribe that effect to the signal. Writing a signal reruns every
//! subscribed effect synchronously, before [`SignalUpdate::set`] returns, so an
//! observer never sees a value that is only partly propagated.
//!
//! Writes made inside [`batch`] are applied at once and the affected effects run
//! a single time when the batch ends.
//!
//! All state is per thread and signals are `!Send`.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

thread_local! {
    static CURRENT_EFFECT: RefCell<Option<Rc<EffectState>>> = const { RefCell::new(None) };
    static BATCHING: Cell<bool> = const { Cell::new(false) };
    static PENDING_EFFECTS: RefCell<SmallVec<[Rc<EffectState>; 10]>> =
        RefCell::new(SmallVec::new());
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct EffectId(u64);

impl EffectId {
    fn next() -> EffectId {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        EffectId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct SignalId(u64);

impl SignalId {
    fn next() -> SignalId {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        SignalId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

type Subscribers = Rc<RefCell<FxHashMap<EffectId, Rc<EffectState>>>>;

struct EffectState {
    id: EffectId,
    run: Box<dyn Fn()>,
    /// Subscriber sets of every signal read during the last run.
    sources: RefCell<SmallVec<[Subscribers; 4]>>,
    disposed: Cell<bool>,
}

impl EffectState {
    /// Unsubscribes from every source so the next run can re-track.
    fn clean_up(&self) {
        for source in self.sources.take() {
            source.borrow_mut().remove(&self.id);
        }
    }
}

fn run_effect(effect: &Rc<EffectState>) {
    if effect.disposed.get() {
        return;
    }
    effect.clean_up();

    let prev = CURRENT_EFFECT.with(|current| current.replace(Some(effect.clone())));
    (effect.run)();
    CURRENT_EFFECT.with(|current| *current.borrow_mut() = prev);
}

/// Create an Effect that runs the given function whenever the Signals it read
/// in its last run change.
///
/// The function runs once immediately. It receives the value it returned on the
/// previous run, `None` the first time.
pub fn create_effect<T>(f: impl Fn(Option<T>) -> T + 'static) -> Effect
where
    T: 'static,
{
    let value = RefCell::new(None::<T>);
    let run = move || {
        let prev = value.borrow_mut().take();
        let next = f(prev);
        *value.borrow_mut() = Some(next);
    };
    let state = Rc::new(EffectState {
        id: EffectId::next(),
        run: Box::new(run),
        sources: RefCell::new(SmallVec::new()),
        disposed: Cell::new(false),
    });
    run_effect(&state);
    Effect { state }
}

/// Runs `f` with effect runs deferred until it returns.
///
/// Every effect subscribed to a signal written inside `f` runs once afterwards,
/// seeing all of the writes together. Nested batches join the outermost one.
pub fn batch<T>(f: impl FnOnce() -> T) -> T {
    if BATCHING.with(|batching| batching.replace(true)) {
        return f();
    }

    struct EndBatch;

    impl Drop for EndBatch {
        fn drop(&mut self) {
            BATCHING.with(|batching| batching.set(false));
        }
    }

    let result = {
        let _end = EndBatch;
        f()
    };

    let pending = PENDING_EFFECTS.with(|pending| pending.take());
    for effect in pending {
        run_effect(&effect);
    }
    result
}

/// Runs `f` without subscribing the current effect to anything it reads.
pub fn untrack<T>(f: impl FnOnce() -> T) -> T {
    let prev = CURRENT_EFFECT.with(|current| current.borrow_mut().take());
    let result = f();
    CURRENT_EFFECT.with(|current| *current.borrow_mut() = prev);
    result
}

/// Handle to a running effect.
#[derive(Clone)]
pub struct Effect {
    state: Rc<EffectState>,
}

impl Effect {
    /// Stops the effect from ever running again and releases its subscriptions.
    pub fn dispose(&self) {
        self.state.disposed.set(true);
        self.state.clean_up();
    }

    pub fn is_disposed(&self) -> bool {
        self.state.disposed.get()
    }
}

struct SignalState<T> {
    id: SignalId,
    value: RefCell<T>,
    subscribers: Subscribers,
}

impl<T> SignalState<T> {
    fn track(&self) {
        CURRENT_EFFECT.with(|current| {
            if let Some(effect) = current.borrow().as_ref() {
                let added = self
                    .subscribers
                    .borrow_mut()
                    .insert(effect.id, effect.clone())
                    .is_none();
                if added {
                    effect.sources.borrow_mut().push(self.subscribers.clone());
                }
            }
        });
    }

    fn notify(&self) {
        let subscribers: SmallVec<[Rc<EffectState>; 4]> =
            self.subscribers.borrow().values().cloned().collect();

        if BATCHING.with(|batching| batching.get()) {
            PENDING_EFFECTS.with(|pending| {
                let mut pending = pending.borrow_mut();
                for effect in subscribers {
                    if !pending.iter().any(|queued| queued.id == effect.id) {
                        pending.push(effect);
                    }
                }
            });
            return;
        }

        for effect in subscribers {
            run_effect(&effect);
        }
    }
}

/// A signal that can be read and written.
pub struct RwSignal<T> {
    state: Rc<SignalState<T>>,
}

impl<T> Clone for RwSignal<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> RwSignal<T> {
    pub fn new(value: T) -> Self {
        Self {
            state: Rc::new(SignalState {
                id: SignalId::next(),
                value: RefCell::new(value),
                subscribers: Rc::new(RefCell::new(FxHashMap::default())),
            }),
        }
    }

    /// A getter only handle to the same signal.
    pub fn read_only(&self) -> ReadSignal<T> {
        ReadSignal {
            state: self.state.clone(),
        }
    }
}

impl<T> PartialEq for RwSignal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.state.id == other.state.id
    }
}

impl<T> Eq for RwSignal<T> {}

impl<T> fmt::Debug for RwSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("RwSignal");
        s.field("id", &self.state.id);
        s.finish()
    }
}

/// A getter only Signal.
pub struct ReadSignal<T> {
    state: Rc<SignalState<T>>,
}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> PartialEq for ReadSignal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.state.id == other.state.id
    }
}

impl<T> Eq for ReadSignal<T> {}

impl<T> fmt::Debug for ReadSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ReadSignal");
        s.field("id", &self.state.id);
        s.finish()
    }
}

pub trait SignalWith<T> {
    /// Applies `f` to the current value and subscribes the running effect.
    ///
    /// Writing to the same signal from inside `f` panics.
    fn with<O>(&self, f: impl FnOnce(&T) -> O) -> O;

    /// Applies `f` to the current value without subscribing.
    fn with_untracked<O>(&self, f: impl FnOnce(&T) -> O) -> O;

    /// Only subscribes the running effect.
    fn track(&self);
}

pub trait SignalGet<T: Clone>: SignalWith<T> {
    fn get(&self) -> T {
        self.with(T::clone)
    }

    fn get_untracked(&self) -> T {
        self.with_untracked(T::clone)
    }
}

pub trait SignalUpdate<T> {
    /// Replaces the value and reruns subscribed effects.
    fn set(&self, new_value: T);

    fn update(&self, f: impl FnOnce(&mut T));
}

macro_rules! impl_signal_read {
    ($signal:ident) => {
        impl<T> SignalWith<T> for $signal<T> {
            fn with<O>(&self, f: impl FnOnce(&T) -> O) -> O {
                self.state.track();
                f(&self.state.value.borrow())
            }

            fn with_untracked<O>(&self, f: impl FnOnce(&T) -> O) -> O {
                f(&self.state.value.borrow())
            }

            fn track(&self) {
                self.state.track();
            }
        }

        impl<T: Clone> SignalGet<T> for $signal<T> {}
    };
}

impl_signal_read!(RwSignal);
impl_signal_read!(ReadSignal);

impl<T> SignalUpdate<T> for RwSignal<T> {
    fn set(&self, new_value: T) {
        *self.state.value.borrow_mut() = new_value;
        self.state.notify();
    }

    fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.state.value.borrow_mut());
        self.state.notify();
    }
}
