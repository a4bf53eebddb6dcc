use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use metalstack_core::{GridUnit, Stackup, StackupError};

use crate::settings::StackupSetting;

// ── Errors ────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed technology file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Stackup(#[from] StackupError),

    #[error("Stackup '{0}' is not defined")]
    UnknownStackup(String),

    #[error("Technology '{0}' defines no stackups")]
    NoStackups(String),
}

fn default_grid_unit() -> GridUnit {
    GridUnit::default()
}

/// Technology description: the manufacturing grid and the stackups built on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechConfig {
    pub name: String,
    #[serde(default = "default_grid_unit")]
    pub grid_unit: GridUnit,
    #[serde(default)]
    pub stackups: Vec<StackupSetting>,
}

impl TechConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            grid_unit: GridUnit::default(),
            stackups: Vec::new(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading technology file {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        log::info!(
            "Technology {}: {} stackup(s) on a {} grid",
            config.name,
            config.stackups.len(),
            config.grid_unit.unit()
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn grid(&self) -> GridUnit {
        self.grid_unit
    }

    pub fn stackup_names(&self) -> Vec<&str> {
        self.stackups.iter().map(|s| s.name.as_str()).collect()
    }

    /// Build the stackup named `name`.
    pub fn stackup(&self, name: &str) -> Result<Stackup, ConfigError> {
        let setting = self
            .stackups
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ConfigError::UnknownStackup(name.to_string()))?;
        self.build(setting)
    }

    /// Build the first stackup in the file.
    pub fn default_stackup(&self) -> Result<Stackup, ConfigError> {
        let setting = self
            .stackups
            .first()
            .ok_or_else(|| ConfigError::NoStackups(self.name.clone()))?;
        self.build(setting)
    }

    pub fn build_stackups(&self) -> Result<Vec<Stackup>, ConfigError> {
        self.stackups.iter().map(|s| self.build(s)).collect()
    }

    fn build(&self, setting: &StackupSetting) -> Result<Stackup, ConfigError> {
        let stackup = setting.build(self.grid_unit)?;
        log::debug!(
            "Built stackup {} with {} metal(s)",
            stackup.name(),
            stackup.metal_count()
        );
        Ok(stackup)
    }
}
