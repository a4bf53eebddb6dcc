use serde::{Deserialize, Serialize};

use crate::direction::RoutingDirection;
use crate::error::{Result, StackupError};
use crate::grid::GridUnit;
use crate::rules::{GridEntry, WidthSpacingTable};
use crate::spacing;
use crate::tracks::{NeighborPattern, TrackGeometry, TrackLayer};

/// Track dimensions of a metal layer, in layout length units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetalDims {
    /// Minimum wire width. Must be an even number of grid units.
    pub min_width: f64,
    /// Minimum cross-mask pitch (not same-mask pitch for multiply-patterned layers).
    pub pitch: f64,
    /// Offset of the first routing track from the origin.
    pub offset: f64,
}

/// Width, spacing and start offset of a wide wire, snapped to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthSpacingStart {
    pub width: f64,
    pub spacing: f64,
    /// Offset of the wide wire's edge from the thin route's track center.
    pub start: f64,
}

impl From<WidthSpacingStart> for (f64, f64, f64) {
    fn from(w: WidthSpacingStart) -> Self {
        (w.width, w.spacing, w.start)
    }
}

/// A metal layer and its power-strap width/spacing rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Metal {
    name: String,
    index: u32,
    direction: RoutingDirection,
    grid: GridUnit,
    min_width: i64,
    pitch: i64,
    offset: i64,
    table: WidthSpacingTable,
    rules: Vec<GridEntry>,
}

impl Metal {
    /// Build a metal layer, checking every length against `grid`.
    ///
    /// `index` orders the stackup: lower is closer to the substrate.
    pub fn new(
        name: &str,
        index: u32,
        direction: RoutingDirection,
        dims: MetalDims,
        table: WidthSpacingTable,
        grid: GridUnit,
    ) -> Result<Self> {
        let invalid = |message: String| StackupError::InvalidMetal {
            metal: name.to_string(),
            message,
        };
        let on_grid = |what: &str, value: f64| {
            grid.aligned_units(value).ok_or_else(|| {
                invalid(format!(
                    "{what} {value} is not a multiple of the {} grid",
                    grid.unit()
                ))
            })
        };

        let min_width = on_grid("min_width", dims.min_width)?;
        if min_width <= 0 {
            return Err(invalid(format!("min_width must be positive, got {}", dims.min_width)));
        }
        if min_width % 2 != 0 {
            return Err(invalid(format!(
                "min_width {} must be an even number of grid units",
                dims.min_width
            )));
        }
        let pitch = on_grid("pitch", dims.pitch)?;
        if pitch <= 0 {
            return Err(invalid(format!("pitch must be positive, got {}", dims.pitch)));
        }
        let offset = on_grid("offset", dims.offset)?;
        let rules = table.grid_entries(&grid).ok_or_else(|| {
            invalid(format!(
                "width/spacing rules are not multiples of the {} grid",
                grid.unit()
            ))
        })?;

        Ok(Self {
            name: name.to_string(),
            index,
            direction,
            grid,
            min_width,
            pitch,
            offset,
            table,
            rules,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn direction(&self) -> RoutingDirection {
        self.direction
    }

    pub fn grid(&self) -> GridUnit {
        self.grid
    }

    pub fn min_width(&self) -> f64 {
        self.grid.to_length(self.min_width)
    }

    pub fn pitch(&self) -> f64 {
        self.grid.to_length(self.pitch)
    }

    pub fn offset(&self) -> f64 {
        self.grid.to_length(self.offset)
    }

    pub fn dims(&self) -> MetalDims {
        MetalDims {
            min_width: self.min_width(),
            pitch: self.pitch(),
            offset: self.offset(),
        }
    }

    pub fn table(&self) -> &WidthSpacingTable {
        &self.table
    }

    /// Minimum spacing for a wire of `width`, or `0.0` below the smallest rule.
    pub fn get_spacing_for_width(&self, width: f64) -> f64 {
        let width = self.grid.floor_units(width);
        self.grid
            .to_length(spacing::spacing_for_width(&self.rules, width))
    }

    /// Spacing the rules force on the widest wire that fits `pitch`.
    pub fn min_spacing_from_pitch(&self, pitch: f64) -> f64 {
        let snapped = self.grid.to_units(pitch);
        let pitch = self.grid.floor_units(pitch);
        self.grid
            .to_length(spacing::min_spacing_from_pitch(&self.rules, pitch, snapped))
    }

    /// Widest wire(s) that consume `tracks` routing tracks under `pattern`.
    pub fn width_spacing_start(
        &self,
        pattern: NeighborPattern,
        tracks: u32,
        force_even: bool,
    ) -> Result<WidthSpacingStart> {
        let layer = TrackLayer {
            min_width: self.min_width,
            pitch: self.pitch,
            entries: &self.rules,
        };
        let TrackGeometry {
            width,
            spacing,
            start,
        } = layer.solve(pattern, tracks, force_even)?;
        Ok(WidthSpacingStart {
            width: self.grid.to_length(width),
            spacing: self.grid.to_length(spacing),
            start: self.grid.to_length(start),
        })
    }

    /// Thin, Wide, Thin: both neighbors of the wide wire are min-width routes.
    pub fn get_width_spacing_start_twt(&self, tracks: u32) -> Result<WidthSpacingStart> {
        self.width_spacing_start(NeighborPattern::Twt, tracks, false)
    }

    /// Thin, Wide, Wide, Thin: one neighbor is a min-width route, the other a
    /// mirrored wire of the same width.
    pub fn get_width_spacing_start_twwt(
        &self,
        tracks: u32,
        force_even: bool,
    ) -> Result<WidthSpacingStart> {
        self.width_spacing_start(NeighborPattern::Twwt, tracks, force_even)
    }

    /// Wide, Wide, Wide. Not supported yet.
    pub fn get_width_spacing_start_www(
        &self,
        tracks: u32,
        force_even: bool,
    ) -> Result<WidthSpacingStart> {
        self.width_spacing_start(NeighborPattern::Www, tracks, force_even)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::WidthSpacingEntry;

    fn table(pairs: &[(f64, f64)]) -> WidthSpacingTable {
        WidthSpacingTable::new(
            pairs
                .iter()
                .map(|&(w, s)| WidthSpacingEntry::new(w, s))
                .collect(),
        )
        .unwrap()
    }

    fn metal(min_width: f64, pitch: f64, pairs: &[(f64, f64)]) -> Metal {
        Metal::new(
            "M3",
            3,
            RoutingDirection::Vertical,
            MetalDims {
                min_width,
                pitch,
                offset: 0.0,
            },
            table(pairs),
            GridUnit::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_spacing_for_width() {
        let m = metal(0.1, 0.2, &[(0.5, 0.1), (2.0, 0.3), (1.0, 0.2)]);
        assert_eq!(m.get_spacing_for_width(0.0), 0.0);
        assert_eq!(m.get_spacing_for_width(0.4999), 0.0);
        assert_eq!(m.get_spacing_for_width(0.5), 0.1);
        assert_eq!(m.get_spacing_for_width(0.9999), 0.1);
        assert_eq!(m.get_spacing_for_width(1.0), 0.2);
        assert_eq!(m.get_spacing_for_width(0.1 + 0.2 + 0.7), 0.2);
        assert_eq!(m.get_spacing_for_width(25.0), 0.3);
    }

    #[test]
    fn test_spacing_for_width_monotonic() {
        let m = metal(0.1, 0.2, &[(0.0, 0.05), (0.3, 0.08), (0.9, 0.08), (1.5, 0.2)]);
        let mut prev = 0.0;
        for i in 0..2000 {
            let s = m.get_spacing_for_width(i as f64 * 0.001);
            assert!(s >= prev);
            prev = s;
        }
    }

    #[test]
    fn test_min_spacing_from_pitch() {
        let m = metal(0.1, 0.2, &[(0.0, 1.0), (4.0, 2.0), (7.0, 3.0)]);
        assert_eq!(m.min_spacing_from_pitch(4.999), 1.0);
        // Width held at 4 - 2 grid units, spacing takes the remainder.
        assert_eq!(m.min_spacing_from_pitch(5.0), 1.002);
        assert_eq!(m.min_spacing_from_pitch(6.0), 2.0);
        assert_eq!(m.min_spacing_from_pitch(8.999), 2.0);
        assert_eq!(m.min_spacing_from_pitch(9.0), 2.002);
        assert_eq!(m.min_spacing_from_pitch(10.0), 3.0);
    }

    #[test]
    fn test_min_spacing_from_off_grid_pitch() {
        let m = metal(0.1, 0.2, &[(0.0, 1.0), (4.0, 2.0), (7.0, 3.0)]);
        assert_eq!(m.min_spacing_from_pitch(5.0006), 1.003);
        assert_eq!(m.min_spacing_from_pitch(5.0004), 1.002);
        assert_eq!(m.min_spacing_from_pitch(4.9996), 1.0);
        assert_eq!(m.min_spacing_from_pitch(5.9996), 2.002);
    }

    #[test]
    fn test_twt_fills_budget() {
        let m = metal(0.1, 0.2, &[(0.0, 0.05)]);
        let r = m.get_width_spacing_start_twt(1).unwrap();
        let grid = m.grid();
        assert_eq!(grid.snap(r.width + 2.0 * r.spacing), 0.3);
        assert_eq!(grid.to_units(r.width) % 2, 0);
        assert_eq!((r.width, r.spacing, r.start), (0.2, 0.05, 0.1));
    }

    #[test]
    fn test_twwt_force_even() {
        let m = metal(0.1, 0.2, &[(0.0, 0.05)]);
        let loose = m.get_width_spacing_start_twwt(1, false).unwrap();
        assert_eq!(loose.width, 0.175);
        assert_eq!(loose.start, 0.1);

        let even = m.get_width_spacing_start_twwt(1, true).unwrap();
        assert_eq!(even.width, 0.174);
        assert_eq!(even.start, 0.101);
        assert_eq!(even.spacing, loose.spacing);
        let (w, s, st): (f64, f64, f64) = even.into();
        assert_eq!((w, s, st), (0.174, 0.05, 0.101));
    }

    #[test]
    fn test_twwt_snaps_uneven_splits() {
        // (0.5 - 3 * 0.051) / 2 = 0.1735
        let m = metal(0.1, 0.2, &[(0.0, 0.051)]);
        let r = m.get_width_spacing_start_twwt(1, false).unwrap();
        assert_eq!((r.width, r.spacing, r.start), (0.174, 0.051, 0.101));

        // Width pinned at 0.199, (0.52 - 2 * 0.199) / 3 = 0.04067
        let m = metal(0.04, 0.112, &[(0.0, 0.03), (0.2, 0.06)]);
        let r = m.get_width_spacing_start_twwt(2, false).unwrap();
        assert_eq!((r.width, r.spacing, r.start), (0.199, 0.041, 0.061));
    }

    #[test]
    fn test_www_not_implemented() {
        let m = metal(0.1, 0.2, &[(0.0, 0.05)]);
        assert_eq!(
            m.get_width_spacing_start_www(2, false),
            Err(StackupError::NotImplemented(NeighborPattern::Www))
        );
    }

    #[test]
    fn test_rejects_odd_min_width() {
        let err = Metal::new(
            "M1",
            1,
            RoutingDirection::Horizontal,
            MetalDims {
                min_width: 0.145,
                pitch: 0.29,
                offset: 0.0,
            },
            table(&[(0.0, 0.145)]),
            GridUnit::new(0.005).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, StackupError::InvalidMetal { ref metal, .. } if metal == "M1"));
    }

    #[test]
    fn test_rejects_off_grid_values() {
        let dims = MetalDims {
            min_width: 0.1,
            pitch: 0.2005,
            offset: 0.0,
        };
        let grid = GridUnit::default();
        let dir = RoutingDirection::Horizontal;
        assert!(Metal::new("M2", 2, dir, dims, table(&[(0.0, 0.05)]), grid).is_err());

        let dims = MetalDims { pitch: 0.2, ..dims };
        assert!(Metal::new("M2", 2, dir, dims, table(&[(0.0, 0.0505)]), grid).is_err());
        assert!(Metal::new("M2", 2, dir, dims, table(&[(0.0, 0.05)]), grid).is_ok());
    }

    #[test]
    fn test_dims_roundtrip() {
        let m = metal(0.1, 0.2, &[(0.0, 0.05)]);
        assert_eq!(
            m.dims(),
            MetalDims {
                min_width: 0.1,
                pitch: 0.2,
                offset: 0.0
            }
        );
    }
}
