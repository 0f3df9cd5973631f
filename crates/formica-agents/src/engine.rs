//! Colonist: the decision engine behind one colony member.
//!
//! Every role runs the same pipeline. Once per tick:
//!
//! 1. Memorize the home the first time the host supplies one; idle until then.
//! 2. Age the perception cache and any objective.
//! 3. Turn home when the range reserve or vitality runs out.
//! 4. Let the role pick a target.
//! 5. Pick at most one signal: a role announcement, then the oldest queued
//!    relay or sighting mark, then whatever the role wants to originate.
//!
//! Perception callbacks between ticks only feed memory and the outbox, with
//! a few role-specific reflexes.

use crate::cache::PerceptionCache;
use crate::coordinator::AttackPoint;
use crate::roles::{spotted_kind, AbortReason, RoleState, Situation};
use formica_core::agent::Agent;
use formica_core::codec;
use formica_core::config::AgentConfig;
use formica_core::geometry::{Position, RelativeCoordinate};
use formica_core::signal::{Signal, SignalKind};
use formica_core::types::*;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// One colony member.
#[derive(Debug, Clone)]
pub struct Colonist {
    id: AgentId,
    role: RoleState,
    config: AgentConfig,
    cache: PerceptionCache,
    home: Option<Position>,
    /// Relays and sighting marks waiting for a tick to go out.
    outbox: VecDeque<Signal>,
    age_ticks: Tick,
}

impl Colonist {
    pub fn new(role: Role, config: AgentConfig) -> Self {
        Self::with_id(AgentId::new(), role, config)
    }

    pub fn with_id(id: AgentId, role: Role, config: AgentConfig) -> Self {
        let cache = PerceptionCache::new(&config.cache);
        let role = RoleState::new(role, id, &config);
        Self {
            id,
            role,
            config,
            cache,
            home: None,
            outbox: VecDeque::new(),
            age_ticks: 0,
        }
    }

    pub fn cache(&self) -> &PerceptionCache {
        &self.cache
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The memorized home, once known.
    pub fn home(&self) -> Option<Position> {
        self.home
    }

    pub fn objective(&self) -> Option<&AttackPoint> {
        self.role.objective()
    }

    /// Signals queued for upcoming ticks, oldest first.
    pub fn pending_signals(&self) -> impl Iterator<Item = &Signal> + '_ {
        self.outbox.iter()
    }

    fn resolve_home(&mut self, view: &AgentView) -> Option<Position> {
        if self.home.is_none() {
            if let Some(home) = view.home {
                debug!(agent = %self.id, x = home.x, y = home.y, "home memorized");
                self.home = Some(home);
            }
        }
        self.home
    }

    /// Queue a signal unless an equivalent one was already heard, sent or
    /// queued. A signal only counts as sent once a tick broadcasts it.
    fn enqueue(&mut self, signal: Signal) {
        if self.cache.contains_signal(&signal) || self.cache.was_announced(&signal) {
            return;
        }
        let radius = self.config.cache.dedup_radius;
        if self
            .outbox
            .iter()
            .any(|queued| queued.is_near(&signal, radius))
        {
            return;
        }
        if self.outbox.len() >= self.config.signals.outbox_capacity {
            if let Some(dropped) = self.outbox.pop_front() {
                trace!(agent = %self.id, %dropped, "outbox full, dropped oldest");
            }
        }
        self.outbox.push_back(signal);
    }

    /// The mark a sighting deserves, if any.
    fn sighting_mark(&self, home: &Position, view: &AgentView, sighting: &Sighting) -> Option<Signal> {
        let kind = match sighting {
            Sighting::Hostile(hostile) => spotted_kind(hostile.kind),
            Sighting::FoodItem(item) if item.needs_carriers => SignalKind::FoodItemNeedsCarriers,
            Sighting::FoodPile(pile)
                if pile.amount > view.max_load.saturating_mul(self.config.forager.pile_mark_loads) =>
            {
                SignalKind::FoodPileSpotted
            }
            _ => return None,
        };
        let coordinates = RelativeCoordinate::between(home, &sighting.position());
        Some(Signal::new(kind, coordinates))
    }

    fn emission(&self, signal: Signal) -> Emission {
        Emission::new(signal, self.config.signals.ranges.range(signal.kind))
    }
}

impl Agent for Colonist {
    fn id(&self) -> AgentId {
        self.id
    }

    fn role(&self) -> Role {
        self.role.role()
    }

    fn on_tick(&mut self, view: &AgentView) -> Decision {
        self.age_ticks += 1;
        let Some(home) = self.resolve_home(view) else {
            trace!(agent = %self.id, "no home yet, idling");
            return Decision::idle();
        };

        self.cache.cleanup();
        self.role.grow_older(&self.config);

        let situation = Situation::new(view, home, &self.config, &self.cache);
        if let Some(reason) = situation.abort_reason() {
            match reason {
                AbortReason::Range {
                    remaining,
                    distance_home,
                } => {
                    debug!(agent = %self.id, remaining, distance_home, "range reserve exhausted");
                }
                AbortReason::Vitality { vitality } => {
                    debug!(agent = %self.id, vitality, "too weak to continue");
                }
            }
            return Decision::moving(Movement::Home);
        }

        let target = self.role.select_target(&situation);
        let movement = target.and_then(|t| situation.movement_toward(&t));
        trace!(agent = %self.id, role = %self.role.role(), ?target, ?movement, "target selected");

        let signal = match self.role.announcement() {
            Some(signal) => Some(signal),
            None => match self.outbox.pop_front() {
                Some(signal) => Some(signal),
                None => self.role.originate(&situation),
            },
        };

        if let Some(signal) = signal {
            self.cache.remember_announced(signal);
        }
        Decision {
            movement,
            emission: signal.map(|s| self.emission(s)),
            interactions: Vec::new(),
        }
    }

    fn on_idle(&mut self, _view: &AgentView) -> Decision {
        Decision::moving(Movement::Forward)
    }

    fn on_observed(&mut self, view: &AgentView, sighting: &Sighting) -> Decision {
        self.cache.add_sighting(sighting);
        if let Some(home) = self.home {
            if let Some(mark) = self.sighting_mark(&home, view, sighting) {
                self.enqueue(mark);
            }
        }
        match self.role.on_observed(view, sighting) {
            Some(movement) => Decision::moving(movement),
            None => Decision::idle(),
        }
    }

    fn on_destination_reached(&mut self, view: &AgentView, sighting: &Sighting) -> Decision {
        debug_assert!(
            !matches!(sighting, Sighting::Hostile(_)),
            "hosts only report arrival at food"
        );
        if matches!(sighting, Sighting::Hostile(_)) {
            return Decision::idle();
        }
        self.role.on_destination_reached(view, sighting)
    }

    fn on_signal_received(&mut self, _view: &AgentView, word: u32) -> Decision {
        if self.home.is_none() {
            trace!(agent = %self.id, word, "signal before home is known, ignored");
            return Decision::idle();
        }
        let signal = codec::decode(word);
        if signal.hop_count < self.config.signals.hop_ceiling && !self.cache.contains_signal(&signal)
        {
            debug!(agent = %self.id, %signal, "relaying");
            self.enqueue(signal.relay());
        }
        self.cache.add_signal(signal);
        Decision::idle()
    }

    fn on_attacked(&mut self, view: &AgentView, by: &Hostile) -> Decision {
        self.cache.add_sighting(&Sighting::Hostile(*by));
        debug!(agent = %self.id, attacker = %by.id, "under attack");
        self.role.on_attacked(view, by)
    }

    fn age(&self) -> Tick {
        self.age_ticks
    }
}
