//! Piecewise walk over a width→spacing table.
//!
//! Plotting wire width against the smallest budget it can occupy gives a
//! staircase: flat runs where the entry's spacing is saturated and the budget
//! grows only through width, and vertical jumps at each entry threshold where
//! the width is pinned just below the next bin. Every track and pitch query is
//! this same walk with different coefficients: a budget shared by `gaps`
//! spacings and `wires` equal-width wires.

use crate::rules::GridEntry;

/// How the width is chosen when the budget lands on a width-limited segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pin {
    /// A fixed number of grid units below the threshold.
    Below(i64),
    /// The widest value below the threshold that leaves a remainder the gaps
    /// share exactly.
    Divisible,
}

/// Which side of the staircase a result landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Limit {
    Spacing,
    Width,
}

/// A wire arrangement sharing a fixed budget: `total = gaps*spacing + wires*width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Budget {
    pub total: i64,
    pub gaps: i64,
    pub wires: i64,
    pub pin: Pin,
}

/// The outcome of a walk, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment {
    pub width: i64,
    pub spacing: i64,
    pub limit: Limit,
}

/// `n / d` rounded to the nearest integer, halves up. `d` is positive.
fn div_nearest(n: i64, d: i64) -> i64 {
    let (n, d) = (i128::from(n), i128::from(d));
    (2 * n + d).div_euclid(2 * d) as i64
}

impl Budget {
    /// Widest wires that fit when every gap is exactly `spacing`.
    ///
    /// `ceiling` is the next entry's threshold: rounding to the grid must not
    /// carry the width into a bin that demands more spacing.
    fn saturated(&self, spacing: i64, ceiling: Option<i64>) -> Segment {
        let mut width = div_nearest(self.total - self.gaps * spacing, self.wires);
        if let Some(ceiling) = ceiling {
            width = width.min(ceiling - 1);
        }
        Segment {
            width,
            spacing,
            limit: Limit::Spacing,
        }
    }

    /// Wires held just below `threshold`; the gaps take what remains.
    fn pinned(&self, threshold: i64) -> Segment {
        let width = match self.pin {
            Pin::Below(step) => threshold - step,
            Pin::Divisible => (1..=self.gaps)
                .map(|step| threshold - step)
                .find(|w| (self.total - self.wires * w).rem_euclid(self.gaps) == 0)
                .unwrap_or(threshold - 1),
        }
        .max(0);
        Segment {
            width,
            spacing: div_nearest(self.total - self.wires * width, self.gaps),
            limit: Limit::Width,
        }
    }

    /// Walk adjacent entry pairs in order; the last applicable pair wins.
    ///
    /// `entries` must be a validated, non-empty table.
    pub fn walk(&self, entries: &[GridEntry]) -> Segment {
        let ceiling = |i: usize| entries.get(i).map(|e| e.width_at_least);
        let mut segment = match entries.first() {
            Some(first) => self.saturated(first.min_spacing, ceiling(1)),
            None => self.saturated(0, None),
        };
        for (i, pair) in entries.windows(2).enumerate() {
            let (lo, hi) = (pair[0], pair[1]);
            if self.total >= self.gaps * hi.min_spacing + self.wires * hi.width_at_least {
                segment = self.saturated(hi.min_spacing, ceiling(i + 2));
            } else if self.total >= self.gaps * lo.min_spacing + self.wires * hi.width_at_least {
                segment = self.pinned(hi.width_at_least);
            }
        }
        segment
    }
}
