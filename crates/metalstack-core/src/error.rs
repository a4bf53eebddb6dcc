use thiserror::Error;

use crate::tracks::NeighborPattern;

/// Errors raised while building or querying a stackup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StackupError {
    #[error("Invalid manufacturing grid unit: {0}")]
    InvalidGrid(f64),

    #[error("Invalid width/spacing rule table: {0}")]
    InvalidRuleTable(String),

    #[error("Invalid routing direction: {0}")]
    InvalidRoutingDirection(String),

    #[error("Invalid neighbor pattern: {0}")]
    InvalidNeighborPattern(String),

    #[error("Invalid metal '{metal}': {message}")]
    InvalidMetal { metal: String, message: String },

    #[error("Metal named {metal} is defined more than once in stackup {stackup}")]
    DuplicateMetal { metal: String, stackup: String },

    #[error("Metal named {metal} is not defined in stackup {stackup}")]
    UnknownMetal { metal: String, stackup: String },

    #[error("Track pattern {0} is not implemented")]
    NotImplemented(NeighborPattern),

    #[error("Expected {quantity} to be an even number of grid units, got {units}")]
    OddGridMultiple { quantity: &'static str, units: i64 },

    #[error("{tracks} track(s) leave no room for a wide wire with the {pattern} pattern")]
    InsufficientTracks { pattern: NeighborPattern, tracks: u32 },

    #[error("{pattern} budget over {tracks} track(s) overflows the grid")]
    TrackBudgetOverflow { pattern: NeighborPattern, tracks: u32 },
}

pub type Result<T> = std::result::Result<T, StackupError>;
