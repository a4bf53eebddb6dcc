use crate::direction::RoutingDirection;
use crate::error::{Result, StackupError};
use crate::metal::Metal;

/// A named, ordered collection of metal layers.
///
/// Vias are not modeled; a stackup is just its metals.
#[derive(Debug, Clone, PartialEq)]
pub struct Stackup {
    name: String,
    metals: Vec<Metal>,
}

impl Stackup {
    /// Metal names must be unique within a stackup.
    pub fn new(name: &str, metals: Vec<Metal>) -> Result<Self> {
        for (i, m) in metals.iter().enumerate() {
            if metals[..i].iter().any(|prev| prev.name() == m.name()) {
                return Err(StackupError::DuplicateMetal {
                    metal: m.name().to_string(),
                    stackup: name.to_string(),
                });
            }
        }
        Ok(Self {
            name: name.to_string(),
            metals,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_metal(&self, name: &str) -> Result<&Metal> {
        self.metals
            .iter()
            .find(|m| m.name() == name)
            .ok_or_else(|| StackupError::UnknownMetal {
                metal: name.to_string(),
                stackup: self.name.clone(),
            })
    }

    pub fn metals(&self) -> &[Metal] {
        &self.metals
    }

    pub fn metal_count(&self) -> usize {
        self.metals.len()
    }

    /// Metals whose preferred routing direction is `direction`.
    pub fn metals_in_direction(
        &self,
        direction: RoutingDirection,
    ) -> impl Iterator<Item = &Metal> {
        self.metals
            .iter()
            .filter(move |m| m.direction() == direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridUnit;
    use crate::metal::MetalDims;
    use crate::rules::{WidthSpacingEntry, WidthSpacingTable};
    use crate::tracks::NeighborPattern;

    fn metal(name: &str, index: u32, direction: RoutingDirection) -> Metal {
        Metal::new(
            name,
            index,
            direction,
            MetalDims {
                min_width: 0.1,
                pitch: 0.2,
                offset: 0.0,
            },
            WidthSpacingTable::new(vec![
                WidthSpacingEntry::new(0.0, 0.05),
                WidthSpacingEntry::new(0.4, 0.1),
            ])
            .unwrap(),
            GridUnit::default(),
        )
        .unwrap()
    }

    fn stackup() -> Stackup {
        Stackup::new(
            "test_stack",
            vec![
                metal("M1", 1, RoutingDirection::Vertical),
                metal("M2", 2, RoutingDirection::Horizontal),
                metal("M3", 3, RoutingDirection::Vertical),
                metal("AP", 4, RoutingDirection::Redistribution),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_get_metal() {
        let s = stackup();
        let m2 = s.get_metal("M2").unwrap();
        assert_eq!(m2.name(), "M2");
        assert_eq!(m2.index(), 2);
        assert_eq!(s.metal_count(), 4);
    }

    #[test]
    fn test_unknown_metal() {
        let s = stackup();
        assert_eq!(
            s.get_metal("M9"),
            Err(StackupError::UnknownMetal {
                metal: "M9".to_string(),
                stackup: "test_stack".to_string()
            })
        );
        assert!(s.get_metal("m1").is_err());
    }

    #[test]
    fn test_duplicate_metal() {
        let err = Stackup::new(
            "dup",
            vec![
                metal("M1", 1, RoutingDirection::Vertical),
                metal("M1", 2, RoutingDirection::Horizontal),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, StackupError::DuplicateMetal { .. }));
    }

    #[test]
    fn test_metals_in_direction() {
        let s = stackup();
        let names: Vec<&str> = s
            .metals_in_direction(RoutingDirection::Vertical)
            .map(|m| m.name())
            .collect();
        assert_eq!(names, vec!["M1", "M3"]);
    }

    #[test]
    fn test_concurrent_queries() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Stackup>();

        let s = stackup();
        let expected = s
            .get_metal("M3")
            .unwrap()
            .width_spacing_start(NeighborPattern::Twwt, 4, true)
            .unwrap();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        s.get_metal("M3")
                            .unwrap()
                            .width_spacing_start(NeighborPattern::Twwt, 4, true)
                            .unwrap()
                    })
                })
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }
}
