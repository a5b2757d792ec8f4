use crate::breakpoint::Breakpoint;

/// Errors produced while configuring, installing or looking up the breakpoint
/// display.
#[derive(Debug, thiserror::Error)]
pub enum BreakpointError {
    /// No display has been installed in the current application context.
    #[error("Could not find display injection")]
    MissingDisplay,
    #[error("a display is already installed in this application context")]
    AlreadyInstalled,
    #[error("threshold `{tier}` must be a finite, non-negative width, got {value}")]
    InvalidThreshold { tier: Breakpoint, value: f64 },
    /// Thresholds must be strictly increasing from `sm` to `3xl`.
    #[error("threshold `{upper}` ({upper_px}px) must be greater than `{lower}` ({lower_px}px)")]
    UnorderedThresholds {
        lower: Breakpoint,
        lower_px: f64,
        upper: Breakpoint,
        upper_px: f64,
    },
    #[cfg(feature = "serde")]
    #[error("invalid breakpoint options: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T, E = BreakpointError> = std::result::Result<T, E>;
