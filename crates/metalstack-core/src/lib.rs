//! # Metalstack Core
//!
//! Metal stackup model and the per-layer width/spacing rule engine.
//! Given a layer's piecewise width→spacing table, answers the minimum spacing
//! for a width, the spacing forced by a pitch, and the widest wires that
//! consume a number of routing tracks between thin or mirrored neighbors.
//!
//! All lengths are carried in manufacturing grid units internally, so every
//! returned width, spacing and start sits exactly on the grid.

pub mod direction;
pub mod error;
pub mod grid;
pub mod metal;
pub mod rules;
pub mod stackup;
pub mod tracks;

mod piecewise;
mod spacing;

pub use direction::RoutingDirection;
pub use error::{Result, StackupError};
pub use grid::{GridUnit, DEFAULT_GRID_UNIT};
pub use metal::{Metal, MetalDims, WidthSpacingStart};
pub use rules::{WidthSpacingEntry, WidthSpacingTable};
pub use stackup::Stackup;
pub use tracks::NeighborPattern;
