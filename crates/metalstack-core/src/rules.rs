use serde::{Deserialize, Serialize};

use crate::error::{Result, StackupError};
use crate::grid::GridUnit;

/// One bin of a piecewise width→spacing rule.
///
/// Any wire at least `width_at_least` wide must keep `min_spacing` to its
/// neighbors. If a wire is wider than several entries, the worst case
/// (largest) spacing wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthSpacingEntry {
    pub width_at_least: f64,
    pub min_spacing: f64,
}

impl WidthSpacingEntry {
    pub fn new(width_at_least: f64, min_spacing: f64) -> Self {
        Self {
            width_at_least,
            min_spacing,
        }
    }
}

/// A rule table entry expressed in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GridEntry {
    pub width_at_least: i64,
    pub min_spacing: i64,
}

/// A validated width→spacing table: non-empty, sorted by `width_at_least`,
/// with non-decreasing `min_spacing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WidthSpacingEntry>", into = "Vec<WidthSpacingEntry>")]
pub struct WidthSpacingTable {
    entries: Vec<WidthSpacingEntry>,
}

impl WidthSpacingTable {
    /// Sort and validate a set of entries.
    pub fn new(mut entries: Vec<WidthSpacingEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(StackupError::InvalidRuleTable(
                "table has no entries".to_string(),
            ));
        }
        for e in &entries {
            if !e.width_at_least.is_finite() || e.width_at_least < 0.0 {
                return Err(StackupError::InvalidRuleTable(format!(
                    "width_at_least must be non-negative, got {}",
                    e.width_at_least
                )));
            }
            if !e.min_spacing.is_finite() || e.min_spacing <= 0.0 {
                return Err(StackupError::InvalidRuleTable(format!(
                    "min_spacing must be positive, got {}",
                    e.min_spacing
                )));
            }
        }
        entries.sort_by(|a, b| a.width_at_least.total_cmp(&b.width_at_least));

        for pair in entries.windows(2) {
            if pair[1].min_spacing < pair[0].min_spacing {
                return Err(StackupError::InvalidRuleTable(format!(
                    "min_spacing decreases from {} to {} at width {}",
                    pair[0].min_spacing, pair[1].min_spacing, pair[1].width_at_least
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[WidthSpacingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The table in grid units, or `None` if any value is off-grid.
    pub(crate) fn grid_entries(&self, grid: &GridUnit) -> Option<Vec<GridEntry>> {
        self.entries
            .iter()
            .map(|e| {
                Some(GridEntry {
                    width_at_least: grid.aligned_units(e.width_at_least)?,
                    min_spacing: grid.aligned_units(e.min_spacing)?,
                })
            })
            .collect()
    }
}

impl TryFrom<Vec<WidthSpacingEntry>> for WidthSpacingTable {
    type Error = StackupError;

    fn try_from(entries: Vec<WidthSpacingEntry>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<WidthSpacingTable> for Vec<WidthSpacingEntry> {
    fn from(table: WidthSpacingTable) -> Self {
        table.entries
    }
}
