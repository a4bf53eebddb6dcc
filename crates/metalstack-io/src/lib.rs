//! # Metalstack I/O
//!
//! Technology file loading. Reads the JSON description of a process grid and
//! its metal stackups and builds validated [`metalstack_core::Stackup`]s.

pub mod settings;
pub mod tech;

pub use settings::{MetalSetting, StackupSetting, WidthSpacingSetting};
pub use tech::{ConfigError, TechConfig};
