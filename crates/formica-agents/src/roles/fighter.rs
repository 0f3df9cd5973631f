//! Fighter: rallies to attack points, guards food and hunts hostiles.

use super::{choose_lead, spotted_kind, Situation, Target};
use crate::coordinator::AttackPoint;
use formica_core::config::FighterConfig;
use formica_core::geometry::distance_between;
use formica_core::signal::{Signal, SignalKind};
use formica_core::types::{AgentView, Decision, Destination, Hostile, HostileKind, Movement};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct Fighter {
    objective: Option<AttackPoint>,
}

impl Fighter {
    pub fn objective(&self) -> Option<&AttackPoint> {
        self.objective.as_ref()
    }

    /// Age the objective and drop it once expired.
    pub fn grow_older(&mut self, config: &FighterConfig) {
        self.objective = self
            .objective
            .take()
            .map(|mut objective| {
                objective.grow_older();
                objective
            })
            .filter(|objective| objective.age <= config.objective_max_age);
    }

    pub fn select_target(&mut self, situation: &Situation<'_>) -> Option<Target> {
        if situation.view.is_heading_home() {
            return None;
        }
        let config = &situation.config.fighter;

        if self.objective.is_none() {
            self.objective = situation
                .cache
                .nearest_signal(SignalKind::AttackPoint, &situation.here())
                .map(|(signal, _)| AttackPoint::new(signal.coordinates));
            if let Some(objective) = &self.objective {
                debug!(coordinate = ?objective.coordinate, "fighter adopted attack point");
            }
        }
        if let Some(objective) = &self.objective {
            if situation.distance_to_coordinate(&objective.coordinate) > config.engagement_radius {
                return Some(Target::Coordinate(objective.coordinate));
            }
        }

        if let Some((signal, distance)) = situation
            .cache
            .nearest_signal(SignalKind::FoodItemNeedsProtection, &situation.here())
        {
            if distance > situation.view_range() {
                return Some(Target::Coordinate(signal.coordinates));
            }
        }

        self.hostile_target(situation, HostileKind::Enemy)
            .or_else(|| self.hostile_target(situation, HostileKind::Bug))
    }

    fn hostile_target(&self, situation: &Situation<'_>, kind: HostileKind) -> Option<Target> {
        let visible = situation
            .cache
            .hostiles(kind)
            .nearest(&situation.view.position, |hostile| hostile.vitality > 0)
            .map(|(hostile, distance)| {
                (
                    Target::Hostile {
                        id: hostile.id,
                        distance,
                    },
                    distance,
                )
            });
        let reported = situation
            .cache
            .nearest_signal(spotted_kind(kind), &situation.here())
            .map(|(signal, d)| (signal.coordinates, d));
        choose_lead(
            situation,
            visible,
            reported,
            situation.config.fighter.pursuit_multiplier,
        )
    }

    /// Report the hostile being chased.
    pub fn originate(&self, situation: &Situation<'_>) -> Option<Signal> {
        let Destination::Entity(id) = situation.view.destination else {
            return None;
        };
        let hostile = situation.cache.hostile(id)?;
        let signal = Signal::new(spotted_kind(hostile.kind), situation.locate(&hostile.position));
        (!situation.is_known(&signal)).then_some(signal)
    }

    /// Turn on the aggressor.
    pub fn on_attacked(&self, view: &AgentView, by: &Hostile) -> Decision {
        let distance = distance_between(&view.position, &by.position);
        let movement = if distance > view.view_range {
            Movement::ToEntity { id: by.id }
        } else {
            Movement::Attack { id: by.id }
        };
        Decision::moving(movement)
    }
}
