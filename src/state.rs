use crate::{breakpoint::Breakpoint, options::Thresholds, responsive::range};

/// Snapshot of the viewport and the breakpoint it falls into.
///
/// Every field is derived from `width`, `height` and the threshold table by
/// [`BreakpointState::compute`]; the record is always replaced as a whole.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct BreakpointState {
    pub name: Breakpoint,
    pub width: f64,
    pub height: f64,

    pub xs: bool,
    pub sm: bool,
    pub md: bool,
    pub lg: bool,
    pub xl: bool,
    #[cfg_attr(feature = "serde", serde(rename = "2xl"))]
    pub xxl: bool,
    #[cfg_attr(feature = "serde", serde(rename = "3xl"))]
    pub xxxl: bool,

    pub sm_and_up: bool,
    pub md_and_up: bool,
    pub lg_and_up: bool,
    pub xl_and_up: bool,
    pub xxl_and_up: bool,
    pub xxxl_and_up: bool,

    pub sm_and_down: bool,
    pub md_and_down: bool,
    pub lg_and_down: bool,
    pub xl_and_down: bool,
    pub xxl_and_down: bool,
}

impl BreakpointState {
    pub fn compute(width: f64, height: f64, thresholds: &Thresholds) -> Self {
        let name = Breakpoint::classify(width, thresholds);
        let is = |tier: Breakpoint| name == tier;
        let and_up = |tier: Breakpoint| range(tier..).contains(name);
        let and_down = |tier: Breakpoint| range(..=tier).contains(name);

        Self {
            name,
            width,
            height,

            xs: is(Breakpoint::Xs),
            sm: is(Breakpoint::Sm),
            md: is(Breakpoint::Md),
            lg: is(Breakpoint::Lg),
            xl: is(Breakpoint::Xl),
            xxl: is(Breakpoint::Xxl),
            xxxl: is(Breakpoint::Xxxl),

            sm_and_up: and_up(Breakpoint::Sm),
            md_and_up: and_up(Breakpoint::Md),
            lg_and_up: and_up(Breakpoint::Lg),
            xl_and_up: and_up(Breakpoint::Xl),
            xxl_and_up: and_up(Breakpoint::Xxl),
            xxxl_and_up: and_up(Breakpoint::Xxxl),

            sm_and_down: and_down(Breakpoint::Sm),
            md_and_down: and_down(Breakpoint::Md),
            lg_and_down: and_down(Breakpoint::Lg),
            xl_and_down: and_down(Breakpoint::Xl),
            xxl_and_down: and_down(Breakpoint::Xxl),
        }
    }

    /// The exact-tier flag for `tier`.
    pub fn is(&self, tier: Breakpoint) -> bool {
        match tier {
            Breakpoint::Xs => self.xs,
            Breakpoint::Sm => self.sm,
            Breakpoint::Md => self.md,
            Breakpoint::Lg => self.lg,
            Breakpoint::Xl => self.xl,
            Breakpoint::Xxl => self.xxl,
            Breakpoint::Xxxl => self.xxxl,
        }
    }

    /// `<tier>AndUp`. Always true for `xs`.
    pub fn and_up(&self, tier: Breakpoint) -> bool {
        match tier {
            Breakpoint::Xs => true,
            Breakpoint::Sm => self.sm_and_up,
            Breakpoint::Md => self.md_and_up,
            Breakpoint::Lg => self.lg_and_up,
            Breakpoint::Xl => self.xl_and_up,
            Breakpoint::Xxl => self.xxl_and_up,
            Breakpoint::Xxxl => self.xxxl_and_up,
        }
    }

    /// `<tier>AndDown`. Always true for `3xl`, and the same as `xs` for `xs`.
    pub fn and_down(&self, tier: Breakpoint) -> bool {
        match tier {
            Breakpoint::Xs => self.xs,
            Breakpoint::Sm => self.sm_and_down,
            Breakpoint::Md => self.md_and_down,
            Breakpoint::Lg => self.lg_and_down,
            Breakpoint::Xl => self.xl_and_down,
            Breakpoint::Xxl => self.xxl_and_down,
            Breakpoint::Xxxl => true,
        }
    }
}
