//! Browser backed [`Viewport`] and [`Scheduler`].

use wasm_bindgen::{closure::Closure, JsCast};

use crate::{
    time::{Duration, Instant},
    timer::{Scheduler, TimerToken},
    viewport::Viewport,
};

/// Reads sizes from `document.documentElement` and `window`.
#[derive(Clone)]
pub struct WebViewport {
    window: web_sys::Window,
}

impl WebViewport {
    /// `None` outside a browser window, e.g. in a worker.
    pub fn new() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }

    fn root(&self) -> Option<web_sys::Element> {
        self.window.document()?.document_element()
    }

    fn inner(value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> f64 {
        value.ok().and_then(|value| value.as_f64()).unwrap_or(0.0)
    }
}

impl Viewport for WebViewport {
    fn client_width(&self) -> f64 {
        self.root().map_or(0.0, |root| root.client_width() as f64)
    }

    fn client_height(&self) -> f64 {
        self.root().map_or(0.0, |root| root.client_height() as f64)
    }

    fn inner_width(&self) -> f64 {
        Self::inner(self.window.inner_width())
    }

    fn inner_height(&self) -> f64 {
        Self::inner(self.window.inner_height())
    }

    fn add_resize_listener(&self, listener: Box<dyn Fn()>) {
        let closure = Closure::wrap(listener);
        let options = web_sys::AddEventListenerOptions::new();
        options.set_passive(true);
        if let Err(err) = self
            .window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "resize",
                closure.as_ref().unchecked_ref(),
                &options,
            )
        {
            tracing::warn!(?err, "failed to register resize listener");
        }
        // Lives as long as the page.
        closure.forget();
    }
}

/// Schedules throttle timers with `setTimeout`.
#[derive(Clone)]
pub struct WebScheduler {
    window: web_sys::Window,
}

impl WebScheduler {
    pub fn new() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }
}

impl Scheduler for WebScheduler {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn exec_after(&self, delay: Duration, action: Box<dyn FnOnce()>) -> TimerToken {
        let token = TimerToken::next();
        let callback = Closure::once_into_js(action);
        let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                timeout,
            )
        {
            tracing::warn!(?err, "failed to schedule timer");
        }
        token
    }
}
