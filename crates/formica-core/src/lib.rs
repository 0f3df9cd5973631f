//! # Formica Core
//!
//! Core types for the decision core of a colony agent. An agent lives in a
//! tick-driven simulation, perceives nearby entities and short-range marks,
//! and decides from its own memory where to move and what to broadcast.
//!
//! This crate holds everything that is shared between the agent logic and
//! the host that drives it:
//!
//! - **geometry**: home-relative coordinates, distances, bearings
//! - **signal**: the signal model (kind, coordinates, hop count, age)
//! - **codec**: the 32-bit mark wire format
//! - **types**: host-boundary snapshots, views and decisions
//! - **agent**: the inbound callback trait a host calls once per tick
//! - **config**: tuning parameters for all roles
//!
//! ## Quick Start
//!
//! ```rust
//! use formica_core::prelude::*;
//!
//! let signal = Signal::new(SignalKind::FoodPileSpotted, RelativeCoordinate::new(-120, 48));
//! let word = codec::encode(&signal);
//! assert_eq!(codec::decode(word), signal);
//! ```

pub mod agent;
pub mod codec;
pub mod config;
pub mod error;
pub mod geometry;
pub mod prelude;
pub mod signal;
pub mod types;
