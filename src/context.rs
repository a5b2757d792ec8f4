use std::{
    any::{Any, TypeId},
    cell::RefCell,
    rc::Rc,
};

use rustc_hash::FxHashMap;

use crate::{
    display::Display,
    error::{BreakpointError, Result},
    options::{BreakpointOptions, PartialOptions},
    reactive::{ReadSignal, SignalWith},
    state::BreakpointState,
    timer::Scheduler,
    viewport::Viewport,
};

thread_local! {
    static CURRENT: RefCell<Vec<AppContext>> = const { RefCell::new(Vec::new()) };
}

/// Values shared across one application, keyed by their type.
///
/// Cloning an `AppContext` yields another handle to the same store.
#[derive(Clone, Default)]
pub struct AppContext {
    contexts: Rc<RefCell<FxHashMap<TypeId, Box<dyn Any>>>>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value`, replacing any earlier value of the same type.
    pub fn provide<T>(&self, value: T)
    where
        T: Clone + 'static,
    {
        self.contexts
            .borrow_mut()
            .insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Retrieves a clone of the stored value of type `T`.
    pub fn inject<T>(&self) -> Option<T>
    where
        T: Clone + 'static,
    {
        self.contexts
            .borrow()
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.contexts.borrow().contains_key(&TypeId::of::<T>())
    }

    /// The innermost context entered on this thread.
    pub fn current() -> Option<AppContext> {
        CURRENT.with(|current| current.borrow().last().cloned())
    }

    /// Runs `f` with this context as [`AppContext::current`].
    pub fn enter<R>(&self, f: impl FnOnce() -> R) -> R {
        struct Exit;

        impl Drop for Exit {
            fn drop(&mut self) {
                CURRENT.with(|current| current.borrow_mut().pop());
            }
        }

        CURRENT.with(|current| current.borrow_mut().push(self.clone()));
        let _exit = Exit;
        f()
    }

    /// The display installed in this context.
    pub fn display(&self) -> Result<Display> {
        self.inject::<Display>()
            .ok_or(BreakpointError::MissingDisplay)
    }

    /// The breakpoint state of the display installed in this context.
    pub fn breakpoints(&self) -> Result<ReadSignal<BreakpointState>> {
        self.display().map(|display| display.state())
    }
}

/// Creates a [`Display`] and publishes it in `app`.
///
/// `options` are merged over the defaults and validated. Each context holds at
/// most one display; installing again fails with
/// [`BreakpointError::AlreadyInstalled`] and leaves the first one in place.
pub fn install(
    app: &AppContext,
    viewport: Rc<dyn Viewport>,
    scheduler: Rc<dyn Scheduler>,
    options: Option<PartialOptions>,
) -> Result<Display> {
    if app.contains::<Display>() {
        return Err(BreakpointError::AlreadyInstalled);
    }
    let options = BreakpointOptions::resolve(options)?;
    let installed = Display::new(viewport, scheduler, options);
    app.provide(installed.clone());

    let tier = installed.state().with_untracked(|state| state.name);
    tracing::debug!(
        delay_ms = options.delay.as_millis() as u64,
        breakpoint = tier.as_str(),
        "breakpoint display installed"
    );
    Ok(installed)
}

/// The breakpoint state of the current application.
///
/// Fails with [`BreakpointError::MissingDisplay`] unless called inside
/// [`AppContext::enter`] on a context where [`install`] succeeded.
pub fn use_breakpoint() -> Result<ReadSignal<BreakpointState>> {
    AppContext::current()
        .ok_or(BreakpointError::MissingDisplay)?
        .breakpoints()
}
