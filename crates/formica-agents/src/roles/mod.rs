//! Role policies.
//!
//! Each role is a small struct holding whatever state the role needs across
//! ticks. The engine never talks to a role directly: [`RoleState`] is the
//! closed set of roles and dispatches every step of the pipeline with a
//! `match`.

pub mod coordinator;
pub mod fighter;
pub mod forager;
pub mod scout;

pub use coordinator::Coordinator;
pub use fighter::Fighter;
pub use forager::Forager;
pub use scout::Scout;

use crate::cache::PerceptionCache;
use crate::coordinator::AttackPoint;
use formica_core::config::AgentConfig;
use formica_core::geometry::{distance_between, Heading, Position, RelativeCoordinate};
use formica_core::signal::{Signal, SignalKind};
use formica_core::types::{
    AgentId, AgentView, Decision, EntityId, Hostile, HostileKind, Movement, Role, Sighting,
};

/// Everything a role may look at while deciding: the host's view of the
/// agent, the memorized home and the agent's memory.
#[derive(Debug, Clone, Copy)]
pub struct Situation<'a> {
    pub view: &'a AgentView,
    pub home: Position,
    pub config: &'a AgentConfig,
    pub cache: &'a PerceptionCache,
}

/// Why an agent gave up and turned home.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbortReason {
    /// The walk back would eat into the range reserve.
    Range { remaining: f64, distance_home: u32 },
    Vitality { vitality: u32 },
}

impl<'a> Situation<'a> {
    pub fn new(
        view: &'a AgentView,
        home: Position,
        config: &'a AgentConfig,
        cache: &'a PerceptionCache,
    ) -> Self {
        Self {
            view,
            home,
            config,
            cache,
        }
    }

    /// The agent's own coordinate.
    pub fn here(&self) -> RelativeCoordinate {
        self.locate(&self.view.position)
    }

    /// Home-relative coordinate of an absolute position.
    pub fn locate(&self, position: &Position) -> RelativeCoordinate {
        RelativeCoordinate::between(&self.home, position)
    }

    pub fn distance_to(&self, position: &Position) -> u32 {
        distance_between(&self.view.position, position)
    }

    pub fn distance_to_coordinate(&self, coordinate: &RelativeCoordinate) -> u32 {
        self.here().distance_to(coordinate)
    }

    pub fn distance_home(&self) -> u32 {
        distance_between(&self.view.position, &self.home)
    }

    pub fn view_range(&self) -> u32 {
        self.view.view_range
    }

    /// Whether an equivalent signal was received or already broadcast.
    pub fn is_known(&self, signal: &Signal) -> bool {
        self.cache.contains_signal(signal) || self.cache.was_announced(signal)
    }

    /// Range reserve or vitality exhausted.
    pub fn abort_reason(&self) -> Option<AbortReason> {
        let view = self.view;
        let safety = &self.config.safety;
        let range = f64::from(view.range);
        let remaining = range - f64::from(view.walked) - range * safety.abort_margin;
        let distance_home = self.distance_home();
        if remaining < f64::from(distance_home) {
            return Some(AbortReason::Range {
                remaining,
                distance_home,
            });
        }
        if f64::from(view.vitality) < f64::from(view.max_vitality) * safety.min_vitality_fraction {
            return Some(AbortReason::Vitality {
                vitality: view.vitality,
            });
        }
        None
    }

    /// The movement command that gets the agent to `target`.
    pub fn movement_toward(&self, target: &Target) -> Option<Movement> {
        match *target {
            Target::Food(id) => Some(Movement::ToEntity { id }),
            Target::Hostile { id, distance } if distance > self.view_range() => {
                Some(Movement::ToEntity { id })
            }
            Target::Hostile { id, .. } => Some(Movement::Attack { id }),
            Target::Coordinate(coordinate) => {
                Heading::toward(&self.here(), &coordinate).map(Movement::Heading)
            }
        }
    }
}

/// Where a role wants to go this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A food entity in memory.
    Food(EntityId),
    /// A hostile in memory, with its distance from the agent.
    Hostile { id: EntityId, distance: u32 },
    /// A reported location.
    Coordinate(RelativeCoordinate),
}

/// Pick between the nearest thing in sight and the nearest report of it.
///
/// The visible option wins when `d_visible < d_reported * factor`. A report
/// is only followed when it lies beyond view range; anything closer would
/// already be in sight.
pub(crate) fn choose_lead(
    situation: &Situation<'_>,
    visible: Option<(Target, u32)>,
    reported: Option<(RelativeCoordinate, u32)>,
    factor: f64,
) -> Option<Target> {
    match (visible, reported) {
        (Some((target, _)), None) => Some(target),
        (Some((target, d_visible)), Some((_, d_reported)))
            if f64::from(d_visible) < f64::from(d_reported) * factor =>
        {
            Some(target)
        }
        (_, Some((coordinate, d_reported))) if d_reported > situation.view_range() => {
            Some(Target::Coordinate(coordinate))
        }
        _ => None,
    }
}

/// The signal kind that reports a hostile of this kind.
pub fn spotted_kind(kind: HostileKind) -> SignalKind {
    match kind {
        HostileKind::Bug => SignalKind::BugSpotted,
        HostileKind::Enemy => SignalKind::EnemySpotted,
    }
}

/// The closed set of roles.
#[derive(Debug, Clone)]
pub enum RoleState {
    Forager(Forager),
    Fighter(Fighter),
    Scout(Scout),
    Coordinator(Coordinator),
}

impl RoleState {
    pub fn new(role: Role, id: AgentId, config: &AgentConfig) -> Self {
        match role {
            Role::Forager => RoleState::Forager(Forager),
            Role::Fighter => RoleState::Fighter(Fighter::default()),
            Role::Scout => RoleState::Scout(Scout::new(config.scout.seed ^ id.seed())),
            Role::Coordinator => RoleState::Coordinator(Coordinator::default()),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            RoleState::Forager(_) => Role::Forager,
            RoleState::Fighter(_) => Role::Fighter,
            RoleState::Scout(_) => Role::Scout,
            RoleState::Coordinator(_) => Role::Coordinator,
        }
    }

    /// The objective being pursued, if the role keeps one.
    pub fn objective(&self) -> Option<&AttackPoint> {
        match self {
            RoleState::Fighter(fighter) => fighter.objective(),
            RoleState::Coordinator(coordinator) => coordinator.objective(),
            RoleState::Forager(_) | RoleState::Scout(_) => None,
        }
    }

    /// One tick passes.
    pub fn grow_older(&mut self, config: &AgentConfig) {
        match self {
            RoleState::Fighter(fighter) => fighter.grow_older(&config.fighter),
            RoleState::Coordinator(coordinator) => coordinator.grow_older(),
            RoleState::Forager(_) | RoleState::Scout(_) => {}
        }
    }

    pub fn select_target(&mut self, situation: &Situation<'_>) -> Option<Target> {
        match self {
            RoleState::Forager(forager) => forager.select_target(situation),
            RoleState::Fighter(fighter) => fighter.select_target(situation),
            RoleState::Scout(_) => None,
            RoleState::Coordinator(coordinator) => coordinator.select_target(situation),
        }
    }

    /// A signal that takes precedence over everything else queued.
    pub fn announcement(&self) -> Option<Signal> {
        match self {
            RoleState::Coordinator(coordinator) => coordinator.announcement(),
            _ => None,
        }
    }

    /// A signal the role wants to originate, never one already known.
    pub fn originate(&mut self, situation: &Situation<'_>) -> Option<Signal> {
        match self {
            RoleState::Forager(forager) => forager.originate(situation),
            RoleState::Fighter(fighter) => fighter.originate(situation),
            RoleState::Scout(scout) => scout.originate(situation),
            RoleState::Coordinator(_) => None,
        }
    }

    /// Immediate reaction to a new sighting.
    pub fn on_observed(&self, view: &AgentView, sighting: &Sighting) -> Option<Movement> {
        match self {
            RoleState::Forager(forager) => forager.on_observed(view, sighting),
            _ => None,
        }
    }

    pub fn on_destination_reached(&self, view: &AgentView, sighting: &Sighting) -> Decision {
        match self {
            RoleState::Forager(forager) => forager.on_destination_reached(view, sighting),
            _ => Decision::idle(),
        }
    }

    pub fn on_attacked(&self, view: &AgentView, by: &Hostile) -> Decision {
        match self {
            RoleState::Forager(forager) => forager.on_attacked(view),
            RoleState::Fighter(fighter) => fighter.on_attacked(view, by),
            RoleState::Scout(_) => Decision::moving(Movement::Home),
            RoleState::Coordinator(_) => Decision::idle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formica_core::config::CacheConfig;

    fn view_at(x: f64, y: f64) -> AgentView {
        AgentView {
            position: Position::new(x, y),
            home: Some(Position::new(0.0, 0.0)),
            range: 1000,
            vitality: 100,
            max_vitality: 100,
            view_range: 60,
            ..AgentView::default()
        }
    }

    #[test]
    fn abort_when_reserve_runs_out() {
        let config = AgentConfig::default();
        let cache = PerceptionCache::new(&CacheConfig::default());
        let mut view = view_at(150.0, 0.0);
        view.walked = 850;
        let situation = Situation::new(&view, Position::default(), &config, &cache);
        assert!(matches!(
            situation.abort_reason(),
            Some(AbortReason::Range { distance_home: 150, .. })
        ));

        let mut view = view_at(100.0, 0.0);
        view.walked = 850;
        let situation = Situation::new(&view, Position::default(), &config, &cache);
        assert_eq!(situation.abort_reason(), None);
    }

    #[test]
    fn abort_when_badly_hurt() {
        let config = AgentConfig::default();
        let cache = PerceptionCache::new(&CacheConfig::default());
        let mut view = view_at(10.0, 0.0);
        view.vitality = 14;
        let situation = Situation::new(&view, Position::default(), &config, &cache);
        assert_eq!(
            situation.abort_reason(),
            Some(AbortReason::Vitality { vitality: 14 })
        );
    }

    #[test]
    fn close_hostiles_are_attacked_far_ones_approached() {
        let config = AgentConfig::default();
        let cache = PerceptionCache::new(&CacheConfig::default());
        let view = view_at(0.0, 0.0);
        let situation = Situation::new(&view, Position::default(), &config, &cache);

        let near = Target::Hostile { id: EntityId(1), distance: 30 };
        let far = Target::Hostile { id: EntityId(1), distance: 90 };
        assert_eq!(
            situation.movement_toward(&near),
            Some(Movement::Attack { id: EntityId(1) })
        );
        assert_eq!(
            situation.movement_toward(&far),
            Some(Movement::ToEntity { id: EntityId(1) })
        );
    }

    #[test]
    fn no_heading_to_where_we_stand() {
        let config = AgentConfig::default();
        let cache = PerceptionCache::new(&CacheConfig::default());
        let view = view_at(20.0, 20.0);
        let situation = Situation::new(&view, Position::default(), &config, &cache);
        let target = Target::Coordinate(RelativeCoordinate::new(20, 20));
        assert_eq!(situation.movement_toward(&target), None);
    }

    #[test]
    fn reports_inside_view_range_are_ignored() {
        let config = AgentConfig::default();
        let cache = PerceptionCache::new(&CacheConfig::default());
        let view = view_at(0.0, 0.0);
        let situation = Situation::new(&view, Position::default(), &config, &cache);
        let close = Some((RelativeCoordinate::new(30, 0), 30));
        let far = Some((RelativeCoordinate::new(90, 0), 90));

        assert_eq!(choose_lead(&situation, None, close, 1.0), None);
        assert_eq!(
            choose_lead(&situation, None, far, 1.0),
            Some(Target::Coordinate(RelativeCoordinate::new(90, 0)))
        );
    }

    #[test]
    fn visible_wins_within_pursuit_factor() {
        let config = AgentConfig::default();
        let cache = PerceptionCache::new(&CacheConfig::default());
        let view = view_at(0.0, 0.0);
        let situation = Situation::new(&view, Position::default(), &config, &cache);
        let seen = Some((Target::Hostile { id: EntityId(2), distance: 140 }, 140));
        let reported = Some((RelativeCoordinate::new(100, 0), 100));

        assert!(matches!(
            choose_lead(&situation, seen, reported, 1.75),
            Some(Target::Hostile { .. })
        ));
        assert_eq!(
            choose_lead(&situation, seen, reported, 1.0),
            Some(Target::Coordinate(RelativeCoordinate::new(100, 0)))
        );
    }
}
