use serde::{Deserialize, Serialize};

use metalstack_core::{
    GridUnit, Metal, MetalDims, RoutingDirection, Stackup, StackupError, WidthSpacingEntry,
    WidthSpacingTable,
};

/// A width/spacing bin as written in a technology file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthSpacingSetting {
    pub width_at_least: f64,
    pub min_spacing: f64,
}

impl From<WidthSpacingSetting> for WidthSpacingEntry {
    fn from(s: WidthSpacingSetting) -> Self {
        WidthSpacingEntry::new(s.width_at_least, s.min_spacing)
    }
}

/// A metal layer as written in a technology file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetalSetting {
    pub name: String,
    pub index: u32,
    /// Parsed when the metal is built, so a bad name is reported as
    /// [`StackupError::InvalidRoutingDirection`].
    pub direction: String,
    pub min_width: f64,
    pub pitch: f64,
    pub offset: f64,
    /// Spacing rules for an infinitely long wire of varying width, in any order.
    pub power_strap_widths_and_spacings: Vec<WidthSpacingSetting>,
}

impl MetalSetting {
    /// Validate against `grid` and build the core [`Metal`].
    pub fn build(&self, grid: GridUnit) -> Result<Metal, StackupError> {
        let table = WidthSpacingTable::new(
            self.power_strap_widths_and_spacings
                .iter()
                .map(|&s| s.into())
                .collect(),
        )?;
        let direction: RoutingDirection = self.direction.parse()?;
        Metal::new(
            &self.name,
            self.index,
            direction,
            MetalDims {
                min_width: self.min_width,
                pitch: self.pitch,
                offset: self.offset,
            },
            table,
            grid,
        )
    }
}

impl From<&Metal> for MetalSetting {
    fn from(m: &Metal) -> Self {
        Self {
            name: m.name().to_string(),
            index: m.index(),
            direction: m.direction().to_string(),
            min_width: m.min_width(),
            pitch: m.pitch(),
            offset: m.offset(),
            power_strap_widths_and_spacings: m
                .table()
                .entries()
                .iter()
                .map(|e| WidthSpacingSetting {
                    width_at_least: e.width_at_least,
                    min_spacing: e.min_spacing,
                })
                .collect(),
        }
    }
}

/// A stackup as written in a technology file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackupSetting {
    pub name: String,
    pub metals: Vec<MetalSetting>,
}

impl StackupSetting {
    pub fn build(&self, grid: GridUnit) -> Result<Stackup, StackupError> {
        let metals = self
            .metals
            .iter()
            .map(|m| m.build(grid))
            .collect::<Result<Vec<_>, _>>()?;
        Stackup::new(&self.name, metals)
    }
}

impl From<&Stackup> for StackupSetting {
    fn from(s: &Stackup) -> Self {
        Self {
            name: s.name().to_string(),
            metals: s.metals().iter().map(MetalSetting::from).collect(),
        }
    }
}
