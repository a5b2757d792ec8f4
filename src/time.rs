//! Platform-agnostic time types.
//!
//! `std::time` on native targets, `web_time` on wasm32 where `std::time::Instant`
//! panics.

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
pub use web_time::{Duration, Instant};
