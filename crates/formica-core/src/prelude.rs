//! Formica Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use formica_core::prelude::*;
//! ```

pub use crate::types::{
    AgentId, EntityId, Tick,
    Role,
    FoodPile, FoodItem, Hostile, HostileKind, Sighting,
    AgentView, Destination,
    Decision, Movement, Interaction, Emission,
};

pub use crate::geometry::{Heading, PolarCoordinate, Position, RelativeCoordinate};

pub use crate::signal::{Signal, SignalKind};

pub use crate::codec;

pub use crate::config::AgentConfig;

// Re-export the Agent trait
pub use crate::agent::Agent;

// Re-export error types
pub use crate::error::{FormicaError, Result};
