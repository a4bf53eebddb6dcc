use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StackupError;

/// Preferred routing direction of a metal layer.
///
/// Serialized through the same string codec as [`FromStr`]/[`Display`](fmt::Display).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RoutingDirection {
    Vertical,
    Horizontal,
    /// Non-routing top-level redistribution metal (e.g. aluminum).
    Redistribution,
}

impl RoutingDirection {
    pub const ALL: [RoutingDirection; 3] = [
        RoutingDirection::Vertical,
        RoutingDirection::Horizontal,
        RoutingDirection::Redistribution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingDirection::Vertical => "vertical",
            RoutingDirection::Horizontal => "horizontal",
            RoutingDirection::Redistribution => "redistribution",
        }
    }

    /// The crossing direction. Redistribution layers have none and map to themselves.
    pub fn opposite(&self) -> RoutingDirection {
        match self {
            RoutingDirection::Vertical => RoutingDirection::Horizontal,
            RoutingDirection::Horizontal => RoutingDirection::Vertical,
            RoutingDirection::Redistribution => RoutingDirection::Redistribution,
        }
    }
}

impl FromStr for RoutingDirection {
    type Err = StackupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| StackupError::InvalidRoutingDirection(s.to_string()))
    }
}

impl fmt::Display for RoutingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl TryFrom<String> for RoutingDirection {
    type Error = StackupError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RoutingDirection> for String {
    fn from(d: RoutingDirection) -> Self {
        d.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_roundtrip() {
        for d in RoutingDirection::ALL {
            assert_eq!(d.to_string().parse::<RoutingDirection>(), Ok(d));
        }
    }

    #[test]
    fn test_opposite_is_involution() {
        for d in RoutingDirection::ALL {
            assert_eq!(d.opposite().opposite(), d);
        }
        assert_eq!(
            RoutingDirection::Vertical.opposite(),
            RoutingDirection::Horizontal
        );
        assert_eq!(
            RoutingDirection::Redistribution.opposite(),
            RoutingDirection::Redistribution
        );
    }

    #[test]
    fn test_no_partial_matches() {
        for s in ["", "vert", "Vertical", " horizontal", "redistribution2"] {
            assert_eq!(
                s.parse::<RoutingDirection>(),
                Err(StackupError::InvalidRoutingDirection(s.to_string()))
            );
        }
    }

    #[test]
    fn test_serde_names_match_codec() {
        let json = serde_json::to_string(&RoutingDirection::Redistribution).unwrap();
        assert_eq!(json, "\"redistribution\"");
        let err = serde_json::from_str::<RoutingDirection>("\"diagonal\"").unwrap_err();
        assert!(err.to_string().contains("Invalid routing direction: diagonal"));
        for d in RoutingDirection::ALL {
            let json = serde_json::to_string(&d).unwrap();
            assert_eq!(serde_json::from_str::<RoutingDirection>(&json).unwrap(), d);
        }
    }
}
