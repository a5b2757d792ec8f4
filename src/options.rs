use crate::{
    breakpoint::Breakpoint,
    error::{BreakpointError, Result},
    time::Duration,
};

/// Throttle window applied to resize events when none is configured.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(150);

/// Lower edges, in pixels, of every tier above `xs`.
///
/// The values are expected to be strictly increasing. [`Thresholds::validate`]
/// checks this; nothing else does, and an unordered table simply classifies
/// widths into the first tier whose upper edge they fall below.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    pub sm: f64,
    pub md: f64,
    pub lg: f64,
    pub xl: f64,
    #[cfg_attr(feature = "serde", serde(rename = "2xl"))]
    pub xxl: f64,
    #[cfg_attr(feature = "serde", serde(rename = "3xl"))]
    pub xxxl: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            sm: 576.0,
            md: 768.0,
            lg: 992.0,
            xl: 1200.0,
            xxl: 1440.0,
            xxxl: 1904.0,
        }
    }
}

impl Thresholds {
    /// The lower edge of `tier`. `xs` has none.
    pub fn get(&self, tier: Breakpoint) -> Option<f64> {
        match tier {
            Breakpoint::Xs => None,
            Breakpoint::Sm => Some(self.sm),
            Breakpoint::Md => Some(self.md),
            Breakpoint::Lg => Some(self.lg),
            Breakpoint::Xl => Some(self.xl),
            Breakpoint::Xxl => Some(self.xxl),
            Breakpoint::Xxxl => Some(self.xxxl),
        }
    }

    /// Sets the lower edge of `tier`, returning the previous value.
    ///
    /// `xs` has no threshold, so setting it changes nothing and returns `None`.
    pub fn set(&mut self, tier: Breakpoint, value: f64) -> Option<f64> {
        let slot = match tier {
            Breakpoint::Xs => return None,
            Breakpoint::Sm => &mut self.sm,
            Breakpoint::Md => &mut self.md,
            Breakpoint::Lg => &mut self.lg,
            Breakpoint::Xl => &mut self.xl,
            Breakpoint::Xxl => &mut self.xxl,
            Breakpoint::Xxxl => &mut self.xxxl,
        };
        Some(std::mem::replace(slot, value))
    }

    /// Checks that every threshold is a finite, non-negative width and that they
    /// strictly increase from `sm` to `3xl`.
    pub fn validate(&self) -> Result<()> {
        let mut previous: Option<(Breakpoint, f64)> = None;
        for tier in Breakpoint::ALL {
            let Some(value) = self.get(tier) else {
                continue;
            };
            if !value.is_finite() || value < 0.0 {
                return Err(BreakpointError::InvalidThreshold { tier, value });
            }
            if let Some((lower, lower_px)) = previous
                && value <= lower_px
            {
                return Err(BreakpointError::UnorderedThresholds {
                    lower,
                    lower_px,
                    upper: tier,
                    upper_px: value,
                });
            }
            previous = Some((tier, value));
        }
        Ok(())
    }
}

/// Effective configuration of a [`Display`](crate::Display).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakpointOptions {
    /// Throttle window for resize handling, serialized as milliseconds.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub delay: Duration,
    pub thresholds: Thresholds,
}

impl Default for BreakpointOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            thresholds: Thresholds::default(),
        }
    }
}

impl BreakpointOptions {
    /// Overlays every field present in `partial` onto `self`.
    ///
    /// The merge is shallow: a supplied `thresholds` table replaces all six
    /// thresholds at once.
    pub fn merge(mut self, partial: PartialOptions) -> Self {
        if let Some(delay) = partial.delay {
            self.delay = delay;
        }
        if let Some(thresholds) = partial.thresholds {
            self.thresholds = thresholds;
        }
        self
    }

    /// Merges `partial` over the defaults and validates the result.
    pub fn resolve(partial: Option<PartialOptions>) -> Result<Self> {
        let options = Self::default().merge(partial.unwrap_or_default());
        options.thresholds.validate()?;
        Ok(options)
    }
}

/// Caller supplied configuration. Missing fields fall back to the defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartialOptions {
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "millis::option", skip_serializing_if = "Option::is_none")
    )]
    pub delay: Option<Duration>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub thresholds: Option<Thresholds>,
}

impl PartialOptions {
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    /// Parses options from JSON such as `{"delay": 300, "thresholds": {...}}`.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(feature = "serde")]
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::time::Duration;

    pub fn serialize<S: Serializer>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(delay.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};

        use crate::time::Duration;

        pub fn serialize<S: Serializer>(
            delay: &Option<Duration>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match delay {
                Some(delay) => serializer.serialize_some(&(delay.as_millis() as u64)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Duration>, D::Error> {
            Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
        }
    }
}
