//! Spacing queries against a width→spacing table, in grid units.

use crate::piecewise::{Budget, Limit, Pin};
use crate::rules::GridEntry;

/// Minimum spacing for a wire of `width`, or 0 if `width` is below every threshold.
pub(crate) fn spacing_for_width(entries: &[GridEntry], width: i64) -> i64 {
    let mut spacing = 0;
    for e in entries {
        if width >= e.width_at_least {
            spacing = spacing.max(e.min_spacing);
        } else {
            // Sorted, so nothing further applies.
            break;
        }
    }
    spacing
}

/// Spacing forced on the widest wire that fits a center-to-center `pitch`.
///
/// A wire just under an entry's threshold keeps the previous bin's spacing,
/// so the pitch is checked against `W(N+1) + S(N)` before conceding the
/// larger spacing of bin `N+1`. In between, the width is held two grid units
/// below the threshold and the spacing absorbs the rest of the pitch.
///
/// `pitch` is floored onto the grid for the threshold checks, while the
/// absorbed remainder is taken from `snapped`, the pitch rounded to the
/// nearest grid point.
pub(crate) fn min_spacing_from_pitch(entries: &[GridEntry], pitch: i64, snapped: i64) -> i64 {
    let segment = Budget {
        total: pitch,
        gaps: 1,
        wires: 1,
        pin: Pin::Below(2),
    }
    .walk(entries);
    match segment.limit {
        Limit::Spacing => segment.spacing,
        Limit::Width => snapped - segment.width,
    }
}
