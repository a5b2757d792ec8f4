use std::ops::{BitOr, Bound, RangeBounds};

use bitflags::bitflags;

use crate::{breakpoint::Breakpoint, state::BreakpointState};

bitflags! {
  #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
  #[must_use]
  pub struct TierFlags: u8 {
    const XS = 1;
    const SM = 2;
    const MD = 4;
    const LG = 8;
    const XL = 16;
    const XXL = 32;
    const XXXL = 64;
  }
}

impl From<Breakpoint> for TierFlags {
    fn from(tier: Breakpoint) -> Self {
        TierFlags::from_bits_truncate(1 << tier.index())
    }
}

/// Builds the set of every tier covered by `range`.
///
/// ```rust
/// # use floem_breakpoints::{range, Breakpoint, TierSet};
/// let md_and_up = range(Breakpoint::Md..);
/// assert!(md_and_up.contains(Breakpoint::Xxxl));
/// assert!(!md_and_up.contains(Breakpoint::Sm));
/// assert_eq!(range(..Breakpoint::Sm), TierSet::XS);
/// ```
pub fn range<R: RangeBounds<Breakpoint>>(range: R) -> TierSet {
    let start = match range.start_bound() {
        Bound::Included(tier) => tier.index(),
        Bound::Excluded(tier) => tier.index() + 1,
        Bound::Unbounded => Breakpoint::Xs.index(),
    };
    // One past the last included tier.
    let end = match range.end_bound() {
        Bound::Included(tier) => tier.index() + 1,
        Bound::Excluded(tier) => tier.index(),
        Bound::Unbounded => Breakpoint::Xxxl.index() + 1,
    };
    if start >= end {
        return TierSet::EMPTY;
    }

    // All bits below `end` minus all bits below `start`.
    let mask = ((1u16 << end) - 1) & !((1u16 << start) - 1);
    TierSet {
        flags: TierFlags::from_bits_truncate(mask as u8),
    }
}

/// A set of breakpoint tiers, used to express conditions like "md through xl".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TierSet {
    flags: TierFlags,
}

impl TierSet {
    pub const EMPTY: TierSet = TierSet::new(TierFlags::empty());
    pub const XS: TierSet = TierSet::new(TierFlags::XS);
    pub const SM: TierSet = TierSet::new(TierFlags::SM);
    pub const MD: TierSet = TierSet::new(TierFlags::MD);
    pub const LG: TierSet = TierSet::new(TierFlags::LG);
    pub const XL: TierSet = TierSet::new(TierFlags::XL);
    pub const XXL: TierSet = TierSet::new(TierFlags::XXL);
    pub const XXXL: TierSet = TierSet::new(TierFlags::XXXL);

    const fn new(flags: TierFlags) -> Self {
        Self { flags }
    }

    pub const fn not(set: TierSet) -> Self {
        let flags = TierFlags::all().difference(set.flags);
        Self { flags }
    }

    pub fn flags(&self) -> TierFlags {
        self.flags
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn contains(&self, tier: Breakpoint) -> bool {
        self.flags.contains(tier.into())
    }

    /// Whether the tier currently selected in `state` is in this set.
    pub fn matches(&self, state: &BreakpointState) -> bool {
        self.contains(state.name)
    }

    pub fn tiers(&self) -> Vec<Breakpoint> {
        Breakpoint::ALL
            .into_iter()
            .filter(|tier| self.contains(*tier))
            .collect()
    }
}

impl From<Breakpoint> for TierSet {
    fn from(tier: Breakpoint) -> Self {
        Self::new(tier.into())
    }
}

impl BitOr for TierSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::new(self.flags | rhs.flags)
    }
}
