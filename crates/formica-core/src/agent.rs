//! Agent: the inbound interface a host drives.
//!
//! The host calls the perception callbacks for everything it noticed during
//! a tick, then `on_tick` exactly once. Calls never overlap. Each callback
//! receives a fresh read-only [`AgentView`] and answers with a
//! [`Decision`] that the host executes.

use crate::types::*;

/// One colony member's decision core.
pub trait Agent {
    /// The agent's unique identity.
    fn id(&self) -> AgentId;

    /// The role chosen at birth.
    fn role(&self) -> Role;

    /// Run the per-tick pipeline: maintenance, safety check, target and
    /// signal selection. At most one movement and one emission.
    fn on_tick(&mut self, view: &AgentView) -> Decision;

    /// The host has nothing queued for the agent.
    fn on_idle(&mut self, view: &AgentView) -> Decision;

    /// An entity came into view.
    fn on_observed(&mut self, view: &AgentView, sighting: &Sighting) -> Decision;

    /// The agent arrived at the entity it was routed to.
    fn on_destination_reached(&mut self, view: &AgentView, sighting: &Sighting) -> Decision;

    /// A mark from another colony member was received.
    fn on_signal_received(&mut self, view: &AgentView, word: u32) -> Decision;

    /// A hostile is attacking the agent.
    fn on_attacked(&mut self, view: &AgentView, by: &Hostile) -> Decision;

    /// Ticks this agent has lived through.
    fn age(&self) -> Tick;
}
