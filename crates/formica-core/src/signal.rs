//! Signal model: what one agent tells its neighbours.
//!
//! A signal is a sighting or a call to action anchored at a home-relative
//! coordinate. Signals travel between agents only in their encoded wire
//! form (see [`crate::codec`]); in memory they additionally carry an age
//! that drives eviction from the perception cache.

use crate::error::FormicaError;
use crate::geometry::RelativeCoordinate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest hop count the wire format can carry.
pub const MAX_HOP_COUNT: u8 = 3;

/// The message kind carried in the low four bits of a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignalKind {
    /// A bug was seen here.
    BugSpotted,
    /// An enemy unit was seen here.
    EnemySpotted,
    /// A bulk food pile worth harvesting.
    FoodPileSpotted,
    /// A carriable food item that needs more carriers.
    FoodItemNeedsCarriers,
    /// A food item threatened by enemies.
    FoodItemNeedsProtection,
    /// Rally point chosen by a coordinator.
    AttackPoint,
    /// Any other 4-bit value. Never originated, carried through unchanged.
    Unassigned(u8),
}

impl SignalKind {
    /// All kinds this crate originates, in wire order.
    pub const ASSIGNED: [SignalKind; 6] = [
        SignalKind::BugSpotted,
        SignalKind::EnemySpotted,
        SignalKind::FoodPileSpotted,
        SignalKind::FoodItemNeedsCarriers,
        SignalKind::FoodItemNeedsProtection,
        SignalKind::AttackPoint,
    ];

    /// Kind for a raw 4-bit value. Higher bits are ignored.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0xF {
            0 => SignalKind::BugSpotted,
            1 => SignalKind::EnemySpotted,
            2 => SignalKind::FoodPileSpotted,
            3 => SignalKind::FoodItemNeedsCarriers,
            4 => SignalKind::FoodItemNeedsProtection,
            5 => SignalKind::AttackPoint,
            other => SignalKind::Unassigned(other),
        }
    }

    /// Raw 4-bit wire value.
    pub fn bits(self) -> u8 {
        match self {
            SignalKind::BugSpotted => 0,
            SignalKind::EnemySpotted => 1,
            SignalKind::FoodPileSpotted => 2,
            SignalKind::FoodItemNeedsCarriers => 3,
            SignalKind::FoodItemNeedsProtection => 4,
            SignalKind::AttackPoint => 5,
            SignalKind::Unassigned(bits) => bits & 0xF,
        }
    }

    /// Sightings of moving hostiles. These go stale fastest.
    pub fn is_threat(self) -> bool {
        matches!(self, SignalKind::BugSpotted | SignalKind::EnemySpotted)
    }

    pub fn name(self) -> &'static str {
        match self {
            SignalKind::BugSpotted => "bug-spotted",
            SignalKind::EnemySpotted => "enemy-spotted",
            SignalKind::FoodPileSpotted => "food-pile-spotted",
            SignalKind::FoodItemNeedsCarriers => "food-item-needs-carriers",
            SignalKind::FoodItemNeedsProtection => "food-item-needs-protection",
            SignalKind::AttackPoint => "attack-point",
            SignalKind::Unassigned(_) => "unassigned",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Unassigned(bits) => write!(f, "unassigned({})", bits),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for SignalKind {
    type Err = FormicaError;

    /// Accepts the kebab-case names, a few short aliases, or a raw value
    /// in `0..=15`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let kind = match lowered.as_str() {
            "bug" | "bug-spotted" => SignalKind::BugSpotted,
            "enemy" | "enemy-spotted" => SignalKind::EnemySpotted,
            "pile" | "food-pile" | "food-pile-spotted" => SignalKind::FoodPileSpotted,
            "carriers" | "needs-carriers" | "food-item-needs-carriers" => {
                SignalKind::FoodItemNeedsCarriers
            }
            "protection" | "needs-protection" | "food-item-needs-protection" => {
                SignalKind::FoodItemNeedsProtection
            }
            "attack" | "attack-point" => SignalKind::AttackPoint,
            other => match other.parse::<u8>() {
                Ok(bits) if bits <= 0xF => SignalKind::from_bits(bits),
                _ => return Err(FormicaError::UnknownSignalKind(s.to_string())),
            },
        };
        Ok(kind)
    }
}

/// A sighting or request, as held in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub coordinates: RelativeCoordinate,
    /// How many times this signal has been re-broadcast.
    pub hop_count: u8,
    /// Ticks spent in the holder's cache. Not transmitted.
    #[serde(default)]
    pub age: u32,
}

impl Signal {
    /// A freshly originated signal.
    pub fn new(kind: SignalKind, coordinates: RelativeCoordinate) -> Self {
        Self {
            kind,
            coordinates,
            hop_count: 0,
            age: 0,
        }
    }

    pub fn with_hop_count(mut self, hop_count: u8) -> Self {
        self.hop_count = hop_count;
        self
    }

    /// The copy that goes back on the air: same content, one more hop,
    /// fresh age. Callers check the hop ceiling before relaying.
    pub fn relay(&self) -> Signal {
        Signal {
            kind: self.kind,
            coordinates: self.coordinates,
            hop_count: self.hop_count.saturating_add(1),
            age: 0,
        }
    }

    /// One tick passes.
    pub fn grow_older(&mut self) {
        self.age = self.age.saturating_add(1);
    }

    /// Same kind and within `radius` of each other.
    pub fn is_near(&self, other: &Signal, radius: u32) -> bool {
        self.kind == other.kind && self.coordinates.distance_to(&other.coordinates) < radius
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at ({}, {}) hops={}",
            self.kind, self.coordinates.x, self.coordinates.y, self.hop_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_bits_roundtrip_for_every_nibble() {
        for bits in 0u8..=15 {
            assert_eq!(SignalKind::from_bits(bits).bits(), bits);
        }
        assert_eq!(SignalKind::from_bits(0x12), SignalKind::FoodPileSpotted);
    }

    #[test]
    fn relay_increments_hops_and_resets_age() {
        let mut signal = Signal::new(SignalKind::FoodPileSpotted, RelativeCoordinate::new(3, 4));
        signal.age = 5;
        let relayed = signal.relay();
        assert_eq!(relayed.hop_count, 1);
        assert_eq!(relayed.age, 0);
        assert_eq!(relayed.coordinates, signal.coordinates);
        assert_eq!(relayed.relay().hop_count, 2);
    }

    #[test]
    fn parses_names_and_raw_values() {
        assert_eq!("bug".parse::<SignalKind>().unwrap(), SignalKind::BugSpotted);
        assert_eq!(
            "needs-protection".parse::<SignalKind>().unwrap(),
            SignalKind::FoodItemNeedsProtection
        );
        assert_eq!("12".parse::<SignalKind>().unwrap(), SignalKind::Unassigned(12));
        assert!("16".parse::<SignalKind>().is_err());
        assert!("honey".parse::<SignalKind>().is_err());
    }

    #[test]
    fn nearness_requires_same_kind() {
        let a = Signal::new(SignalKind::BugSpotted, RelativeCoordinate::new(0, 0));
        let b = Signal::new(SignalKind::BugSpotted, RelativeCoordinate::new(30, 0));
        let c = Signal::new(SignalKind::EnemySpotted, RelativeCoordinate::new(30, 0));
        assert!(a.is_near(&b, 50));
        assert!(!a.is_near(&b, 30));
        assert!(!a.is_near(&c, 50));
    }
}
