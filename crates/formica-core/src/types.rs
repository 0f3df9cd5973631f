//! Shared types at the boundary between an agent and its host.

use crate::codec;
use crate::error::FormicaError;
use crate::geometry::{Heading, Position};
use crate::signal::Signal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for an agent in the colony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub Uuid);

impl AgentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic ID (for tests and replays).
    pub fn from_seed(seed: u64) -> Self {
        Self(Uuid::from_u64_pair(seed, seed.rotate_left(32)))
    }

    /// A 64-bit digest of the ID, used to seed per-agent randomness.
    pub fn seed(&self) -> u64 {
        let (high, low) = self.0.as_u64_pair();
        high ^ low.rotate_left(17)
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host-assigned identity of a sightable entity. Two sightings with the
/// same ID are the same logical entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The current tick of the simulation.
pub type Tick = u64;

/// Behavioral policy, chosen once per agent lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Collects food and brings it home.
    Forager,
    /// Hunts hostiles and guards food.
    Fighter,
    /// Wanders and originates signals.
    Scout,
    /// Aggregates reports into rally points for fighters.
    Coordinator,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Forager, Role::Fighter, Role::Scout, Role::Coordinator];

    pub fn name(self) -> &'static str {
        match self {
            Role::Forager => "forager",
            Role::Fighter => "fighter",
            Role::Scout => "scout",
            Role::Coordinator => "coordinator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = FormicaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forager" | "gatherer" => Ok(Role::Forager),
            "fighter" | "hunter" => Ok(Role::Fighter),
            "scout" => Ok(Role::Scout),
            "coordinator" | "commander" => Ok(Role::Coordinator),
            _ => Err(FormicaError::UnknownRole(s.to_string())),
        }
    }
}

/// A bulk food source that many agents can harvest from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodPile {
    pub id: EntityId,
    pub position: Position,
    pub amount: u32,
}

/// A carriable food item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: EntityId,
    pub position: Position,
    pub amount: u32,
    /// The host's verdict on whether more carriers are required.
    pub needs_carriers: bool,
}

/// Kinds of hostile units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostileKind {
    /// Neutral predators roaming the map.
    Bug,
    /// Units of a rival colony.
    Enemy,
}

/// A hostile unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hostile {
    pub id: EntityId,
    pub kind: HostileKind,
    pub position: Position,
    pub vitality: u32,
    /// Whether it is hauling food (stolen from us or anyone else).
    #[serde(default)]
    pub carrying_food: bool,
}

/// One entity reported by the host's perception.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Sighting {
    FoodPile(FoodPile),
    FoodItem(FoodItem),
    Hostile(Hostile),
}

impl Sighting {
    pub fn id(&self) -> EntityId {
        match self {
            Sighting::FoodPile(p) => p.id,
            Sighting::FoodItem(i) => i.id,
            Sighting::Hostile(h) => h.id,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Sighting::FoodPile(p) => p.position,
            Sighting::FoodItem(i) => i.position,
            Sighting::Hostile(h) => h.position,
        }
    }
}

/// Where the host is currently moving the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Destination {
    #[default]
    None,
    Home,
    Entity(EntityId),
}

/// Read-only snapshot of the agent's own state, supplied with every call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentView {
    pub position: Position,
    /// Absolute home position; unknown until the host resolves it.
    pub home: Option<Position>,
    /// Total distance the agent can walk before it must be home.
    pub range: u32,
    /// Distance walked since last leaving home.
    pub walked: u32,
    pub vitality: u32,
    pub max_vitality: u32,
    pub view_range: u32,
    pub load: u32,
    pub max_load: u32,
    /// The food item being carried, if any.
    pub carrying: Option<FoodItem>,
    pub destination: Destination,
}

impl AgentView {
    /// Whether the agent has anything in its mandibles.
    pub fn is_loaded(&self) -> bool {
        self.carrying.is_some() || self.load > 0
    }

    pub fn is_heading_home(&self) -> bool {
        self.destination == Destination::Home
    }
}

/// A movement command for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Movement {
    /// Keep walking along the current heading.
    Forward,
    /// Turn to a bearing, then advance a distance.
    Heading(Heading),
    /// Route back to the home.
    Home,
    /// Route toward an entity.
    ToEntity { id: EntityId },
    /// Engage a hostile.
    Attack { id: EntityId },
}

/// A non-movement interaction with the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Interaction {
    PickUp { id: EntityId },
    Drop,
}

/// A mark to broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emission {
    pub signal: Signal,
    /// The encoded payload handed to the host.
    pub word: u32,
    /// Broadcast radius.
    pub range: u32,
}

impl Emission {
    pub fn new(signal: Signal, range: u32) -> Self {
        Self {
            signal,
            word: codec::encode(&signal),
            range,
        }
    }
}

/// Everything an agent asks of its host in response to one callback.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Decision {
    pub movement: Option<Movement>,
    pub emission: Option<Emission>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interactions: Vec<Interaction>,
}

impl Decision {
    /// Nothing to do.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(movement: Movement) -> Self {
        Self {
            movement: Some(movement),
            ..Self::default()
        }
    }

    pub fn is_idle(&self) -> bool {
        self.movement.is_none() && self.emission.is_none() && self.interactions.is_empty()
    }
}
