use std::rc::Rc;

use crate::{
    breakpoint::Breakpoint,
    options::BreakpointOptions,
    reactive::{batch, create_effect, ReadSignal, RwSignal, SignalGet, SignalUpdate, SignalWith},
    state::BreakpointState,
    throttle::Throttle,
    timer::Scheduler,
    viewport::Viewport,
};

/// Tracks the viewport size and keeps a [`BreakpointState`] in sync with it.
///
/// A throttled resize listener writes the sampled `width` and `height` into two
/// signals, and an effect rebuilds the whole state record from them each time
/// either one changes. Neither the listener nor the effect is ever removed.
#[derive(Clone)]
pub struct Display {
    width: RwSignal<f64>,
    height: RwSignal<f64>,
    state: RwSignal<BreakpointState>,
    options: BreakpointOptions,
    throttle: Throttle,
}

impl Display {
    /// Builds a display over `viewport`.
    ///
    /// `options` are used as given. Use [`BreakpointOptions::resolve`] or
    /// [`install`](crate::install) to merge and validate caller configuration;
    /// unordered thresholds passed here are not rejected and misclassify widths.
    pub fn new(
        viewport: Rc<dyn Viewport>,
        scheduler: Rc<dyn Scheduler>,
        options: BreakpointOptions,
    ) -> Self {
        let width = RwSignal::new(viewport.width());
        let height = RwSignal::new(viewport.height());
        let state = RwSignal::new(BreakpointState::default());

        let thresholds = options.thresholds;
        create_effect({
            let (width, height, state) = (width.clone(), height.clone(), state.clone());
            move |prev: Option<Breakpoint>| {
                let next = BreakpointState::compute(width.get(), height.get(), &thresholds);
                if prev != Some(next.name) {
                    tracing::debug!(
                        breakpoint = next.name.as_str(),
                        width = next.width,
                        "breakpoint changed"
                    );
                }
                state.set(next);
                next.name
            }
        });

        let throttle = Throttle::new(options.delay, scheduler, {
            let viewport = viewport.clone();
            let (width, height) = (width.clone(), height.clone());
            move || sample(viewport.as_ref(), &width, &height)
        });

        viewport.add_resize_listener(Box::new({
            let throttle = throttle.clone();
            move || throttle.call()
        }));

        Self {
            width,
            height,
            state,
            options,
            throttle,
        }
    }

    /// The reactive state record. Reading it inside an effect subscribes that
    /// effect to breakpoint changes.
    pub fn state(&self) -> ReadSignal<BreakpointState> {
        self.state.read_only()
    }

    /// The current state, tracked.
    pub fn get(&self) -> BreakpointState {
        self.state.get()
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.state.with(|state| state.name)
    }

    pub fn width(&self) -> ReadSignal<f64> {
        self.width.read_only()
    }

    pub fn height(&self) -> ReadSignal<f64> {
        self.height.read_only()
    }

    pub fn options(&self) -> &BreakpointOptions {
        &self.options
    }

    /// Feeds a resize event through the throttle, for hosts that do not dispatch
    /// them via [`Viewport::add_resize_listener`].
    pub fn on_resize(&self) {
        self.throttle.call();
    }
}

fn sample(viewport: &dyn Viewport, width: &RwSignal<f64>, height: &RwSignal<f64>) {
    let (w, h) = (viewport.width(), viewport.height());
    tracing::trace!(width = w, height = h, "viewport sampled");

    // Both writes land before the derivation effect reruns, so a state record
    // never pairs the new height with the old width.
    batch(|| {
        if height.get_untracked() != h {
            height.set(h);
        }
        if width.get_untracked() != w {
            width.set(w);
        }
    });
}

impl std::fmt::Debug for Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Display")
            .field("state", &self.state.get_untracked())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
