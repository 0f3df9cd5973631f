//! # Formica Agents
//!
//! The decision engine of a colony member and the memory it decides from.
//!
//! A [`Colonist`](engine::Colonist) implements the host-facing
//! [`Agent`](formica_core::agent::Agent) trait for one of four roles:
//!
//! - **Forager**: collects food, calls for carriers when an item is too heavy
//! - **Fighter**: rallies to attack points, guards food, hunts hostiles
//! - **Scout**: wanders and announces what it has seen
//! - **Coordinator**: folds reports into rally points for fighters
//!
//! ```rust
//! use formica_agents::prelude::*;
//!
//! let mut colonist = Colonist::with_id(AgentId::from_seed(1), Role::Forager, AgentConfig::default());
//! let view = AgentView {
//!     home: Some(Position::new(0.0, 0.0)),
//!     range: 1000,
//!     vitality: 100,
//!     max_vitality: 100,
//!     ..AgentView::default()
//! };
//! let decision = colonist.on_tick(&view);
//! assert!(decision.is_idle());
//! ```

pub mod assignment;
pub mod cache;
pub mod coordinator;
pub mod engine;
pub mod prelude;
pub mod roles;
