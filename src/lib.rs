//! # Floem Breakpoints
//! Reactive viewport breakpoints. A [`Display`] watches the size of a [`Viewport`]
//! and keeps a [`BreakpointState`] up to date. The state holds a named tier
//! (`xs` through `3xl`) and the cumulative flags layouts usually branch on, such as
//! `md_and_up` or `sm_and_down`.
//!
//! ## Example
//! ```rust
//! use std::rc::Rc;
//!
//! use floem_breakpoints::{
//!     install, use_breakpoint, AppContext, Breakpoint, HeadlessViewport, ManualScheduler,
//!     SignalGet,
//! };
//!
//! let app = AppContext::new();
//! let viewport = HeadlessViewport::new(800.0, 600.0);
//! let scheduler = ManualScheduler::new();
//! install(&app, Rc::new(viewport.clone()), Rc::new(scheduler.clone()), None).unwrap();
//!
//! app.enter(|| {
//!     let state = use_breakpoint().unwrap();
//!     assert_eq!(state.get().name, Breakpoint::Md);
//!
//!     viewport.resize(1920.0, 1080.0);
//!     assert_eq!(state.get().name, Breakpoint::Xxxl);
//!     assert!(state.get().lg_and_up);
//! });
//! ```
//!
//! ## Tiers
//!
//! Six thresholds split widths into seven tiers. With the default
//! [`Thresholds`] these are:
//!
//! | tier  | width         |
//! |-------|---------------|
//! | `xs`  | < 576         |
//! | `sm`  | 576 – 767     |
//! | `md`  | 768 – 991     |
//! | `lg`  | 992 – 1199    |
//! | `xl`  | 1200 – 1439   |
//! | `2xl` | 1440 – 1903   |
//! | `3xl` | ≥ 1904        |
//!
//! ## Resize handling
//!
//! Resize events go through a [`Throttle`]. The first event runs at once, and
//! events inside the next `delay` (150ms by default) collapse into one trailing
//! update. Time and timers come from a [`Scheduler`]: [`ManualScheduler`] for native
//! hosts and tests, or `WebScheduler` with the `web` feature on wasm32.

pub mod breakpoint;
pub mod context;
pub mod display;
pub mod error;
pub mod options;
pub mod reactive;
pub mod responsive;
pub mod state;
pub mod throttle;
pub mod time;
pub mod timer;
pub mod viewport;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use breakpoint::Breakpoint;
pub use context::{install, use_breakpoint, AppContext};
pub use display::Display;
pub use error::{BreakpointError, Result};
pub use options::{BreakpointOptions, PartialOptions, Thresholds, DEFAULT_DELAY};
pub use reactive::{
    batch, create_effect, untrack, Effect, ReadSignal, RwSignal, SignalGet, SignalUpdate,
    SignalWith,
};
pub use responsive::{range, TierFlags, TierSet};
pub use state::BreakpointState;
pub use throttle::Throttle;
pub use timer::{ManualScheduler, Scheduler, TimerToken};
pub use viewport::{HeadlessViewport, Viewport};
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::{WebScheduler, WebViewport};
