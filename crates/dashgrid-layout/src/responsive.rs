#![forbid(unsafe_code)]

//! Breakpoint tiers and per-tier column counts.
//!
//! [`Breakpoints`] classifies a container width in pixels into a
//! [`Breakpoint`] tier. [`Responsive<T>`] maps tiers to values with
//! inheritance from smaller tiers: if no value is set for a tier, the value
//! from the next smaller tier is used. The engine uses `Responsive<u32>` to
//! look up the column count for a container width.
//!
//! # Usage
//!
//! ```ignore
//! use dashgrid_layout::{Breakpoint, Breakpoints, Responsive};
//!
//! let columns = Responsive::new(1)     // xs: 1
//!     .at(Breakpoint::Md, 6)           // md: 6
//!     .at(Breakpoint::Lg, 12);         // lg: 12
//!
//! let tier = Breakpoints::DEFAULT.classify(800);
//! assert_eq!(tier, Breakpoint::Md);
//! assert_eq!(columns.resolve(tier), &6);
//! // xxl inherits from lg.
//! assert_eq!(columns.resolve(Breakpoint::Xxl), &12);
//! ```
//!
//! # Invariants
//!
//! 1. `Xs` always has a value (set via `new()`) and its threshold is 0.
//! 2. Thresholds are strictly increasing from `Sm` to `Xxl`.
//! 3. `resolve()` never fails: it always returns a reference.
//! 4. Setting a value at a tier only affects that tier and tiers that
//!    inherit from it.

use std::collections::BTreeMap;
use std::fmt;

use dashgrid_core::{GridError, Result};
use serde::{Deserialize, Serialize};

const TIERS: usize = 6;

/// Container width tier, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xs = 0,
    Sm = 1,
    Md = 2,
    Lg = 3,
    Xl = 4,
    Xxl = 5,
}

impl Breakpoint {
    /// All tiers in ascending order.
    pub const ALL: [Breakpoint; TIERS] = [
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::Xxl,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "xxl",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimum container width (pixels) for each tier above `Xs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Breakpoint, u32>", into = "BTreeMap<Breakpoint, u32>")]
pub struct Breakpoints {
    min_widths: [u32; TIERS],
}

impl Breakpoints {
    /// 0 / 576 / 768 / 992 / 1200 / 1400.
    pub const DEFAULT: Self = Self {
        min_widths: [0, 576, 768, 992, 1200, 1400],
    };

    /// Build thresholds for `Sm..=Xxl`; they must be strictly increasing and
    /// non-zero.
    pub fn new(sm: u32, md: u32, lg: u32, xl: u32, xxl: u32) -> Result<Self> {
        let min_widths = [0, sm, md, lg, xl, xxl];
        if min_widths.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(GridError::invalid_parameters(format!(
                "breakpoint widths must be strictly increasing (got {sm}/{md}/{lg}/{xl}/{xxl})"
            )));
        }
        Ok(Self { min_widths })
    }

    /// Minimum width of a tier.
    #[must_use]
    pub const fn min_width(&self, bp: Breakpoint) -> u32 {
        self.min_widths[bp as usize]
    }

    /// Largest tier whose minimum width is at most `width`.
    #[must_use]
    pub fn classify(&self, width: u32) -> Breakpoint {
        Breakpoint::ALL
            .iter()
            .rev()
            .copied()
            .find(|&bp| width >= self.min_width(bp))
            .unwrap_or(Breakpoint::Xs)
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<BTreeMap<Breakpoint, u32>> for Breakpoints {
    type Error = GridError;

    /// Missing tiers keep their default threshold.
    fn try_from(map: BTreeMap<Breakpoint, u32>) -> Result<Self> {
        let width = |bp: Breakpoint| {
            map.get(&bp)
                .copied()
                .unwrap_or(Self::DEFAULT.min_width(bp))
        };
        if width(Breakpoint::Xs) != 0 {
            return Err(GridError::invalid_parameters(
                "the xs breakpoint must start at width 0",
            ));
        }
        Self::new(
            width(Breakpoint::Sm),
            width(Breakpoint::Md),
            width(Breakpoint::Lg),
            width(Breakpoint::Xl),
            width(Breakpoint::Xxl),
        )
    }
}

impl From<Breakpoints> for BTreeMap<Breakpoint, u32> {
    fn from(breakpoints: Breakpoints) -> Self {
        Breakpoint::ALL
            .iter()
            .map(|&bp| (bp, breakpoints.min_width(bp)))
            .collect()
    }
}

/// A breakpoint-aware value with inheritance from smaller tiers.
///
/// `Xs` always holds a value (the base); larger tiers hold optional
/// overrides. Resolution walks downward from the requested tier until an
/// override is found, falling back to the base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Responsive<T> {
    base: T,
    /// Overrides for `Sm..=Xxl`, indexed by tier ordinal minus one.
    overrides: [Option<T>; TIERS - 1],
}

impl<T: Clone> Responsive<T> {
    /// Create a responsive value with a base value for `Xs`.
    #[must_use]
    pub fn new(base: T) -> Self {
        Self {
            base,
            overrides: [None, None, None, None, None],
        }
    }

    /// Set the value for a specific tier (builder pattern).
    #[must_use]
    pub fn at(mut self, bp: Breakpoint, value: T) -> Self {
        self.set(bp, value);
        self
    }

    /// Set the value for a specific tier (mutating).
    pub fn set(&mut self, bp: Breakpoint, value: T) {
        match bp {
            Breakpoint::Xs => self.base = value,
            _ => self.overrides[bp as usize - 1] = Some(value),
        }
    }

    /// Resolve the value for a tier.
    #[must_use]
    pub fn resolve(&self, bp: Breakpoint) -> &T {
        self.overrides[..bp as usize]
            .iter()
            .rev()
            .find_map(Option::as_ref)
            .unwrap_or(&self.base)
    }

    /// The `Xs` value.
    #[must_use]
    pub fn base(&self) -> &T {
        &self.base
    }

    /// All explicitly set tiers and their values, smallest first.
    pub fn explicit_values(&self) -> impl Iterator<Item = (Breakpoint, &T)> {
        std::iter::once((Breakpoint::Xs, &self.base)).chain(
            Breakpoint::ALL[1..]
                .iter()
                .zip(self.overrides.iter())
                .filter_map(|(&bp, v)| v.as_ref().map(|val| (bp, val))),
        )
    }
}

impl Responsive<u32> {
    /// Column table from a base count and per-tier overrides.
    ///
    /// Every count must be at least 1.
    pub fn columns(
        base: u32,
        overrides: impl IntoIterator<Item = (Breakpoint, u32)>,
    ) -> Result<Self> {
        let mut table = Self::new(base);
        for (bp, columns) in overrides {
            table.set(bp, columns);
        }
        table.validate_columns()?;
        Ok(table)
    }

    /// Reject a zero column count at any tier.
    pub fn validate_columns(&self) -> Result<()> {
        match self.explicit_values().find(|&(_, &columns)| columns < 1) {
            Some((bp, _)) => Err(GridError::invalid_parameters(format!(
                "column count for breakpoint {bp} must be at least 1"
            ))),
            None => Ok(()),
        }
    }
}

impl<T: Clone + fmt::Display> fmt::Display for Responsive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Responsive(")?;
        let mut first = true;
        for (bp, val) in self.explicit_values() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{bp}={val}")?;
            first = false;
        }
        write!(f, ")")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_classify_widths() {
        let bps = Breakpoints::DEFAULT;
        assert_eq!(bps.classify(0), Breakpoint::Xs);
        assert_eq!(bps.classify(575), Breakpoint::Xs);
        assert_eq!(bps.classify(576), Breakpoint::Sm);
        assert_eq!(bps.classify(768), Breakpoint::Md);
        assert_eq!(bps.classify(991), Breakpoint::Md);
        assert_eq!(bps.classify(992), Breakpoint::Lg);
        assert_eq!(bps.classify(1200), Breakpoint::Xl);
        assert_eq!(bps.classify(1400), Breakpoint::Xxl);
        assert_eq!(bps.classify(u32::MAX), Breakpoint::Xxl);
    }

    #[test]
    fn thresholds_must_increase() {
        assert!(Breakpoints::new(500, 500, 900, 1000, 1100).is_err());
        assert!(Breakpoints::new(0, 600, 900, 1000, 1100).is_err());
        let custom = Breakpoints::new(400, 600, 900, 1000, 1100).unwrap();
        assert_eq!(custom.classify(650), Breakpoint::Md);
    }

    #[test]
    fn thresholds_from_partial_map() {
        let json = r#"{"sm": 500}"#;
        let bps: Breakpoints = serde_json::from_str(json).unwrap();
        assert_eq!(bps.min_width(Breakpoint::Sm), 500);
        assert_eq!(bps.min_width(Breakpoint::Md), 768);

        let bad = r#"{"xs": 10}"#;
        assert!(serde_json::from_str::<Breakpoints>(bad).is_err());
    }

    #[test]
    fn base_value_at_all_breakpoints() {
        let r = Responsive::new(42);
        for bp in Breakpoint::ALL {
            assert_eq!(r.resolve(bp), &42);
        }
    }

    #[test]
    fn override_inherits_upward() {
        let r = Responsive::new(1).at(Breakpoint::Md, 6).at(Breakpoint::Xl, 12);

        assert_eq!(r.resolve(Breakpoint::Xs), &1);
        assert_eq!(r.resolve(Breakpoint::Sm), &1);
        assert_eq!(r.resolve(Breakpoint::Md), &6);
        assert_eq!(r.resolve(Breakpoint::Lg), &6);
        assert_eq!(r.resolve(Breakpoint::Xl), &12);
        assert_eq!(r.resolve(Breakpoint::Xxl), &12);
    }

    #[test]
    fn explicit_values_in_tier_order() {
        let r = Responsive::new(0).at(Breakpoint::Xxl, 4).at(Breakpoint::Md, 2);
        let explicit: Vec<_> = r.explicit_values().collect();
        assert_eq!(
            explicit,
            vec![
                (Breakpoint::Xs, &0),
                (Breakpoint::Md, &2),
                (Breakpoint::Xxl, &4)
            ]
        );
    }

    #[test]
    fn column_table_rejects_zero() {
        assert!(Responsive::columns(12, [(Breakpoint::Sm, 0)]).is_err());
        let table = Responsive::columns(1, [(Breakpoint::Lg, 12)]).unwrap();
        assert_eq!(table.resolve(Breakpoint::Xxl), &12);
    }

    #[test]
    fn display_format() {
        let r = Responsive::new(1).at(Breakpoint::Md, 6);
        let s = r.to_string();
        assert!(s.contains("xs=1"));
        assert!(s.contains("md=6"));
    }
}
