use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::options::Thresholds;

/// A named range of viewport widths.
///
/// Tiers are ordered from narrowest to widest, so `Breakpoint::Md < Breakpoint::Xl`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Breakpoint {
    #[default]
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    #[strum(serialize = "2xl")]
    #[cfg_attr(feature = "serde", serde(rename = "2xl"))]
    Xxl,
    #[strum(serialize = "3xl")]
    #[cfg_attr(feature = "serde", serde(rename = "3xl"))]
    Xxxl,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 7] = [
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::Xxl,
        Breakpoint::Xxxl,
    ];

    /// Classifies `width` into exactly one tier.
    ///
    /// Each threshold is the inclusive lower edge of its tier, so a width equal to
    /// `thresholds.sm` is `Sm`, not `Xs`. A NaN width compares false against every
    /// threshold and ends up in `Xxxl`.
    pub fn classify(width: f64, thresholds: &Thresholds) -> Breakpoint {
        if width < thresholds.sm {
            Breakpoint::Xs
        } else if width < thresholds.md {
            Breakpoint::Sm
        } else if width < thresholds.lg {
            Breakpoint::Md
        } else if width < thresholds.xl {
            Breakpoint::Lg
        } else if width < thresholds.xxl {
            Breakpoint::Xl
        } else if width < thresholds.xxxl {
            Breakpoint::Xxl
        } else {
            Breakpoint::Xxxl
        }
    }

    /// The label used in configuration and serialized state, `"xs"` through `"3xl"`.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Inclusive lower edge of this tier, `None` for `Xs`.
    pub fn lower_bound(self, thresholds: &Thresholds) -> Option<f64> {
        thresholds.get(self)
    }

    /// Exclusive upper edge of this tier, `None` for `Xxxl`.
    pub fn upper_bound(self, thresholds: &Thresholds) -> Option<f64> {
        self.next().and_then(|next| thresholds.get(next))
    }

    pub fn next(self) -> Option<Breakpoint> {
        Breakpoint::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(self) -> Option<Breakpoint> {
        self.index()
            .checked_sub(1)
            .and_then(|i| Breakpoint::ALL.get(i).copied())
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
