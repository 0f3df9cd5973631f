//! Coordinator: picks rally points and announces them to fighters.

use super::{Situation, Target};
use crate::coordinator::{select_objective, AttackPoint, Candidate};
use formica_core::signal::{Signal, SignalKind};
use formica_core::types::HostileKind;
use tracing::{debug, trace};

#[derive(Debug, Clone, Default)]
pub struct Coordinator {
    objective: Option<AttackPoint>,
}

impl Coordinator {
    pub fn objective(&self) -> Option<&AttackPoint> {
        self.objective.as_ref()
    }

    pub fn grow_older(&mut self) {
        if let Some(objective) = self.objective.as_mut() {
            objective.grow_older();
        }
    }

    /// Keep the current objective while it is fresh and not yet reached;
    /// otherwise choose a new one and head for it.
    pub fn select_target(&mut self, situation: &Situation<'_>) -> Option<Target> {
        if situation.view.is_heading_home() {
            return None;
        }
        let config = &situation.config.coordinator;
        let here = situation.here();

        if let Some(objective) = &self.objective {
            let expired = objective.age > config.objective_max_age;
            let reached = here.distance_to(&objective.coordinate) <= config.arrival_radius;
            if !expired && !reached {
                return None;
            }
        }

        let previous = self.objective.map(|objective| objective.coordinate);
        let candidates = candidates(situation);
        self.objective = select_objective(&candidates, &here, previous.as_ref(), config)
            .map(AttackPoint::new);
        match &self.objective {
            Some(objective) => {
                debug!(
                    coordinate = ?objective.coordinate,
                    candidates = candidates.len(),
                    "coordinator chose new objective"
                );
                Some(Target::Coordinate(objective.coordinate))
            }
            None => None,
        }
    }

    /// A freshly chosen objective goes out before anything else.
    pub fn announcement(&self) -> Option<Signal> {
        self.objective
            .filter(AttackPoint::is_fresh)
            .map(|objective| Signal::new(SignalKind::AttackPoint, objective.coordinate))
    }
}

/// Every hostile known to the coordinator, weighted by how urgent it is.
fn candidates(situation: &Situation<'_>) -> Vec<Candidate> {
    let cache = situation.cache;
    let config = &situation.config.coordinator;
    let here = situation.here();
    let mut candidates = Vec::new();

    candidates.extend(
        cache
            .hostiles(HostileKind::Enemy)
            .iter()
            .filter(|enemy| enemy.carrying_food)
            .map(|enemy| {
                Candidate::new(situation.locate(&enemy.position), config.enemy_carrying_weight)
            }),
    );
    candidates.extend(
        cache
            .hostiles(HostileKind::Bug)
            .iter()
            .map(|bug| Candidate::new(situation.locate(&bug.position), config.bug_weight)),
    );
    for (kind, weight) in [
        (SignalKind::EnemySpotted, config.enemy_signal_weight),
        (SignalKind::BugSpotted, config.bug_signal_weight),
        (SignalKind::FoodItemNeedsProtection, config.protection_signal_weight),
    ] {
        if let Some(signals) = cache.signals(kind) {
            candidates.extend(signals.iter().map(|s| Candidate::new(s.coordinates, weight)));
        }
    }

    trace!(?here, count = candidates.len(), "objective candidates");
    candidates
}
