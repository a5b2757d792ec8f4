use std::{cell::RefCell, rc::Rc};

/// The host environment a [`Display`](crate::Display) samples.
///
/// On the web this is the document root element (`client*`) and the window
/// (`inner*`), which can disagree because of scrollbars or mobile browser chrome.
pub trait Viewport {
    fn client_width(&self) -> f64;
    fn client_height(&self) -> f64;
    fn inner_width(&self) -> f64;
    fn inner_height(&self) -> f64;

    /// Registers `listener` to run on every resize of the viewport. Listeners are
    /// never removed.
    fn add_resize_listener(&self, listener: Box<dyn Fn()>);

    /// The larger of the client and inner widths.
    fn width(&self) -> f64 {
        self.client_width().max(self.inner_width())
    }

    /// The larger of the client and inner heights.
    fn height(&self) -> f64 {
        self.client_height().max(self.inner_height())
    }
}

#[derive(Default)]
struct HeadlessState {
    client: (f64, f64),
    inner: (f64, f64),
    listeners: Vec<Rc<dyn Fn()>>,
}

/// An in-memory [`Viewport`] for native hosts and tests.
///
/// The host reports window sizes through [`resize`](Self::resize), which also
/// dispatches the resize event.
#[derive(Clone, Default)]
pub struct HeadlessViewport {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(HeadlessState {
                client: (width, height),
                inner: (width, height),
                listeners: Vec::new(),
            })),
        }
    }

    /// Sets both client and inner sizes and dispatches a resize event.
    pub fn resize(&self, width: f64, height: f64) {
        {
            let mut state = self.state.borrow_mut();
            state.client = (width, height);
            state.inner = (width, height);
        }
        self.dispatch_resize();
    }

    /// Sets the document root size only. Does not dispatch.
    pub fn set_client_size(&self, width: f64, height: f64) {
        self.state.borrow_mut().client = (width, height);
    }

    /// Sets the window size only. Does not dispatch.
    pub fn set_inner_size(&self, width: f64, height: f64) {
        self.state.borrow_mut().inner = (width, height);
    }

    pub fn dispatch_resize(&self) {
        // Listeners may read the viewport, so release the borrow first.
        let listeners = self.state.borrow().listeners.clone();
        for listener in listeners {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

impl Viewport for HeadlessViewport {
    fn client_width(&self) -> f64 {
        self.state.borrow().client.0
    }

    fn client_height(&self) -> f64 {
        self.state.borrow().client.1
    }

    fn inner_width(&self) -> f64 {
        self.state.borrow().inner.0
    }

    fn inner_height(&self) -> f64 {
        self.state.borrow().inner.1
    }

    fn add_resize_listener(&self, listener: Box<dyn Fn()>) {
        self.state.borrow_mut().listeners.push(Rc::from(listener));
    }
}
