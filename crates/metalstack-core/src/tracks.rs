//! Wide-wire geometry for wires that consume a whole number of routing tracks.
//!
//! Patterns are named by the wires across the consumed tracks, outermost
//! first: `T` is a thin (min-width) route, `W` a wide wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StackupError};
use crate::piecewise::{Budget, Pin, Segment};
use crate::rules::GridEntry;

/// Neighbor arrangement assumed around the wide wire(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NeighborPattern {
    /// Thin, Wide, Thin.
    Twt,
    /// Thin, Wide, Wide (mirrored), Thin.
    Twwt,
    /// Wide, Wide, Wide.
    Www,
}

impl NeighborPattern {
    pub const ALL: [NeighborPattern; 3] = [
        NeighborPattern::Twt,
        NeighborPattern::Twwt,
        NeighborPattern::Www,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NeighborPattern::Twt => "twt",
            NeighborPattern::Twwt => "twwt",
            NeighborPattern::Www => "www",
        }
    }
}

impl FromStr for NeighborPattern {
    type Err = StackupError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| StackupError::InvalidNeighborPattern(s.to_string()))
    }
}

impl fmt::Display for NeighborPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.as_str().to_uppercase())
    }
}

impl TryFrom<String> for NeighborPattern {
    type Error = StackupError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<NeighborPattern> for String {
    fn from(p: NeighborPattern) -> Self {
        p.as_str().to_string()
    }
}

/// Width, spacing and start of a wide wire, in grid units.
///
/// `start` is the offset of the wide wire's edge from the center of the
/// thin route's track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrackGeometry {
    pub width: i64,
    pub spacing: i64,
    pub start: i64,
}

/// Layer constants the solvers need, in grid units.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TrackLayer<'a> {
    pub min_width: i64,
    pub pitch: i64,
    pub entries: &'a [GridEntry],
}

impl TrackLayer<'_> {
    pub fn solve(
        &self,
        pattern: NeighborPattern,
        tracks: u32,
        force_even: bool,
    ) -> Result<TrackGeometry> {
        let geometry = match pattern {
            NeighborPattern::Twt => self.twt(tracks)?,
            NeighborPattern::Twwt => self.twwt(tracks, force_even)?,
            NeighborPattern::Www => return Err(StackupError::NotImplemented(pattern)),
        };
        if geometry.width <= 0 {
            return Err(StackupError::InsufficientTracks { pattern, tracks });
        }
        Ok(geometry)
    }

    fn start(&self, spacing: i64) -> i64 {
        self.min_width / 2 + spacing
    }

    /// `lanes` pitches less the thin route's width.
    fn budget(&self, pattern: NeighborPattern, tracks: u32, lanes: i64) -> Result<i64> {
        lanes
            .checked_mul(self.pitch)
            .and_then(|b| b.checked_sub(self.min_width))
            .ok_or(StackupError::TrackBudgetOverflow { pattern, tracks })
    }

    /// One wide wire between two thin routes: two gaps share `s2w`.
    fn twt(&self, tracks: u32) -> Result<TrackGeometry> {
        let s2w = self.budget(NeighborPattern::Twt, tracks, i64::from(tracks) + 1)?;
        if s2w % 2 != 0 {
            return Err(StackupError::OddGridMultiple {
                quantity: "TWT track budget",
                units: s2w,
            });
        }
        let Segment {
            width,
            spacing,
            limit,
        } = Budget {
            total: s2w,
            gaps: 2,
            wires: 1,
            pin: Pin::Divisible,
        }
        .walk(self.entries);
        // Centered on a track, so the wire must split evenly about it.
        if width % 2 != 0 {
            return Err(StackupError::OddGridMultiple {
                quantity: "TWT wire width",
                units: width,
            });
        }
        log::debug!("TWT over {tracks} track(s): budget {s2w}, {limit:?}-limited, width {width}, spacing {spacing}");
        Ok(TrackGeometry {
            width,
            spacing,
            start: self.start(spacing),
        })
    }

    /// Two mirrored wide wires between thin routes: three gaps share `s3w2`.
    fn twwt(&self, tracks: u32, force_even: bool) -> Result<TrackGeometry> {
        let s3w2 = self.budget(NeighborPattern::Twwt, tracks, 2 * i64::from(tracks) + 1)?;
        let Segment {
            width,
            spacing,
            limit,
        } = Budget {
            total: s3w2,
            gaps: 3,
            wires: 2,
            pin: Pin::Below(1),
        }
        .walk(self.entries);
        log::debug!("TWWT over {tracks} track(s): budget {s3w2}, {limit:?}-limited, width {width}, spacing {spacing}");
        let mut geometry = TrackGeometry {
            width,
            spacing,
            start: self.start(spacing),
        };
        if force_even && geometry.width % 2 != 0 {
            log::trace!("forcing even TWWT width {}", geometry.width);
            geometry.width -= 1;
            geometry.start += 1;
        }
        Ok(geometry)
    }
}
