//! Perception cache: an agent's working memory.
//!
//! Everything the agent knows about the world lives here: food and hostiles
//! it has seen itself, and signals it has received from others. Each
//! category is a separate collection with its own staleness rule, and the
//! whole cache is aged once per tick by [`PerceptionCache::cleanup`].
//!
//! No category ever holds the same logical entity twice. For directly
//! observed entities that means one entry per host ID. For signals it means
//! one entry per kind within the dedup radius, which keeps repeated
//! re-broadcasts from flooding memory.

use formica_core::config::{CacheConfig, SignalLifetimes};
use formica_core::geometry::{distance_between, Position, RelativeCoordinate};
use formica_core::signal::{Signal, SignalKind};
use formica_core::types::{EntityId, FoodItem, FoodPile, Hostile, HostileKind, Sighting};
use std::collections::BTreeMap;

/// A directly observed entity the cache can hold.
pub trait Remembered: Copy {
    fn id(&self) -> EntityId;
    fn position(&self) -> Position;
    /// Nothing left to collect or fight.
    fn is_depleted(&self) -> bool;
}

impl Remembered for FoodPile {
    fn id(&self) -> EntityId {
        self.id
    }
    fn position(&self) -> Position {
        self.position
    }
    fn is_depleted(&self) -> bool {
        self.amount == 0
    }
}

impl Remembered for FoodItem {
    fn id(&self) -> EntityId {
        self.id
    }
    fn position(&self) -> Position {
        self.position
    }
    fn is_depleted(&self) -> bool {
        self.amount == 0
    }
}

impl Remembered for Hostile {
    fn id(&self) -> EntityId {
        self.id
    }
    fn position(&self) -> Position {
        self.position
    }
    fn is_depleted(&self) -> bool {
        self.vitality == 0
    }
}

#[derive(Debug, Clone)]
struct Entry<T> {
    entity: T,
    /// Ticks since last sighting.
    age: u32,
}

/// Directly observed entities of one category.
#[derive(Debug, Clone)]
pub struct EntityCollection<T> {
    entries: Vec<Entry<T>>,
    max_age: u32,
}

impl<T: Remembered> EntityCollection<T> {
    /// Entities unseen for more than `max_age` ticks are forgotten.
    pub fn new(max_age: u32) -> Self {
        Self {
            entries: Vec::new(),
            max_age,
        }
    }

    /// Remember an entity. A re-sighting replaces the stored snapshot and
    /// resets its age. Returns whether the entity was new.
    pub fn add(&mut self, entity: T) -> bool {
        match self.entries.iter_mut().find(|e| e.entity.id() == entity.id()) {
            Some(entry) => {
                entry.entity = entity;
                entry.age = 0;
                false
            }
            None => {
                self.entries.push(Entry { entity, age: 0 });
                true
            }
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.iter().any(|e| e.entity.id() == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.entries.iter().map(|e| &e.entity).find(|e| e.id() == id)
    }

    /// Age every entry, then drop depleted and stale ones.
    pub fn cleanup(&mut self) {
        let max_age = self.max_age;
        for entry in &mut self.entries {
            entry.age = entry.age.saturating_add(1);
        }
        self.entries
            .retain(|e| !e.entity.is_depleted() && e.age <= max_age);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().map(|e| &e.entity)
    }

    /// Closest entity accepted by `filter`, with its distance. Ties go to
    /// the earlier entry.
    pub fn nearest<F>(&self, from: &Position, filter: F) -> Option<(&T, u32)>
    where
        F: Fn(&T) -> bool,
    {
        let mut best: Option<(&T, u32)> = None;
        for entity in self.iter().filter(|&e| filter(e)) {
            let distance = distance_between(from, &entity.position());
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((entity, distance));
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Signals of a single kind.
#[derive(Debug, Clone)]
pub struct SignalCollection {
    signals: Vec<Signal>,
    max_age: u32,
    dedup_radius: u32,
    dominance_radius: u32,
}

impl SignalCollection {
    pub fn new(max_age: u32, dedup_radius: u32, dominance_radius: u32) -> Self {
        Self {
            signals: Vec::new(),
            max_age,
            dedup_radius,
            dominance_radius,
        }
    }

    /// Insert unless an equivalent signal is already held. Returns whether
    /// the signal was inserted.
    pub fn add(&mut self, signal: Signal) -> bool {
        if self.contains(&signal) {
            return false;
        }
        self.signals.push(signal);
        true
    }

    /// Whether a same-kind signal at the same spot or within the dedup
    /// radius is held.
    pub fn contains(&self, signal: &Signal) -> bool {
        self.signals.iter().any(|held| {
            held.kind == signal.kind
                && (held.coordinates == signal.coordinates
                    || held.is_near(signal, self.dedup_radius))
        })
    }

    /// Age every signal, drop expired ones, then keep only the freshest
    /// signal of every cluster within the dominance radius. Among equally
    /// fresh signals the one inserted first survives.
    pub fn cleanup(&mut self) {
        for signal in &mut self.signals {
            signal.grow_older();
        }
        let max_age = self.max_age;
        self.signals.retain(|s| s.age <= max_age);

        let mut order: Vec<usize> = (0..self.signals.len()).collect();
        order.sort_by_key(|&i| (self.signals[i].age, i));

        let mut survivors: Vec<usize> = Vec::with_capacity(order.len());
        for i in order {
            let candidate = &self.signals[i];
            let dominated = survivors
                .iter()
                .any(|&j| self.signals[j].is_near(candidate, self.dominance_radius));
            if !dominated {
                survivors.push(i);
            }
        }
        survivors.sort_unstable();

        let mut index = 0;
        self.signals.retain(|_| {
            let keep = survivors.binary_search(&index).is_ok();
            index += 1;
            keep
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signal> + '_ {
        self.signals.iter()
    }

    /// Closest signal to `from`, with its distance. Ties go to the earlier
    /// entry.
    pub fn nearest(&self, from: &RelativeCoordinate) -> Option<(&Signal, u32)> {
        let mut best: Option<(&Signal, u32)> = None;
        for signal in &self.signals {
            let distance = from.distance_to(&signal.coordinates);
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((signal, distance));
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

/// Same-kind signal collections, created on first use.
#[derive(Debug, Clone)]
struct SignalMemory {
    by_kind: BTreeMap<SignalKind, SignalCollection>,
    lifetimes: SignalLifetimes,
    dedup_radius: u32,
    dominance_radius: u32,
}

impl SignalMemory {
    fn new(config: &CacheConfig) -> Self {
        Self {
            by_kind: BTreeMap::new(),
            lifetimes: config.signal_lifetimes.clone(),
            dedup_radius: config.dedup_radius,
            dominance_radius: config.dominance_radius,
        }
    }

    fn add(&mut self, signal: Signal) -> bool {
        let max_age = self.lifetimes.max_age(signal.kind);
        let (dedup, dominance) = (self.dedup_radius, self.dominance_radius);
        self.by_kind
            .entry(signal.kind)
            .or_insert_with(|| SignalCollection::new(max_age, dedup, dominance))
            .add(signal)
    }

    fn contains(&self, signal: &Signal) -> bool {
        self.by_kind
            .get(&signal.kind)
            .map_or(false, |c| c.contains(signal))
    }

    fn cleanup(&mut self) {
        for collection in self.by_kind.values_mut() {
            collection.cleanup();
        }
        self.by_kind.retain(|_, c| !c.is_empty());
    }

    fn len(&self) -> usize {
        self.by_kind.values().map(SignalCollection::len).sum()
    }
}

/// An agent's complete memory.
#[derive(Debug, Clone)]
pub struct PerceptionCache {
    food_piles: EntityCollection<FoodPile>,
    food_items: EntityCollection<FoodItem>,
    bugs: EntityCollection<Hostile>,
    enemies: EntityCollection<Hostile>,
    received: SignalMemory,
    /// What this agent broadcast itself. Only used to avoid repeating
    /// itself; never a source of targets.
    announced: SignalMemory,
}

impl PerceptionCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            food_piles: EntityCollection::new(config.food_max_age),
            food_items: EntityCollection::new(config.food_max_age),
            bugs: EntityCollection::new(config.hostile_max_age),
            enemies: EntityCollection::new(config.hostile_max_age),
            received: SignalMemory::new(config),
            announced: SignalMemory::new(config),
        }
    }

    /// Remember a sighted entity. Returns whether it was new.
    pub fn add_sighting(&mut self, sighting: &Sighting) -> bool {
        match sighting {
            Sighting::FoodPile(pile) => self.food_piles.add(*pile),
            Sighting::FoodItem(item) => self.food_items.add(*item),
            Sighting::Hostile(hostile) => match hostile.kind {
                HostileKind::Bug => self.bugs.add(*hostile),
                HostileKind::Enemy => self.enemies.add(*hostile),
            },
        }
    }

    /// Remember a received signal unless an equivalent one is held.
    pub fn add_signal(&mut self, signal: Signal) -> bool {
        self.received.add(signal)
    }

    /// Whether an equivalent received signal is held.
    pub fn contains_signal(&self, signal: &Signal) -> bool {
        self.received.contains(signal)
    }

    /// Note that this agent broadcast `signal`.
    pub fn remember_announced(&mut self, signal: Signal) {
        self.announced.add(signal);
    }

    /// Whether this agent recently broadcast an equivalent signal.
    pub fn was_announced(&self, signal: &Signal) -> bool {
        self.announced.contains(signal)
    }

    /// One tick passes for every category.
    pub fn cleanup(&mut self) {
        self.food_piles.cleanup();
        self.food_items.cleanup();
        self.bugs.cleanup();
        self.enemies.cleanup();
        self.received.cleanup();
        self.announced.cleanup();
    }

    pub fn food_piles(&self) -> &EntityCollection<FoodPile> {
        &self.food_piles
    }

    pub fn food_items(&self) -> &EntityCollection<FoodItem> {
        &self.food_items
    }

    pub fn hostiles(&self, kind: HostileKind) -> &EntityCollection<Hostile> {
        match kind {
            HostileKind::Bug => &self.bugs,
            HostileKind::Enemy => &self.enemies,
        }
    }

    /// A hostile of either kind by ID.
    pub fn hostile(&self, id: EntityId) -> Option<&Hostile> {
        self.enemies.get(id).or_else(|| self.bugs.get(id))
    }

    /// Received signals of one kind.
    pub fn signals(&self, kind: SignalKind) -> Option<&SignalCollection> {
        self.received.by_kind.get(&kind)
    }

    /// Closest received signal of one kind, with its distance.
    pub fn nearest_signal(
        &self,
        kind: SignalKind,
        from: &RelativeCoordinate,
    ) -> Option<(&Signal, u32)> {
        self.signals(kind).and_then(|c| c.nearest(from))
    }

    /// All received signals, grouped by kind in wire order.
    pub fn all_signals(&self) -> impl Iterator<Item = &Signal> + '_ {
        self.received.by_kind.values().flat_map(SignalCollection::iter)
    }

    pub fn signal_count(&self) -> usize {
        self.received.len()
    }

    pub fn entity_count(&self) -> usize {
        self.food_piles.len() + self.food_items.len() + self.bugs.len() + self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0 && self.signal_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(kind: SignalKind, x: i32, y: i32) -> Signal {
        Signal::new(kind, RelativeCoordinate::new(x, y))
    }

    fn bug(id: u64, x: f64, vitality: u32) -> Hostile {
        Hostile {
            id: EntityId(id),
            kind: HostileKind::Bug,
            position: Position::new(x, 0.0),
            vitality,
            carrying_food: false,
        }
    }

    #[test]
    fn nearby_same_kind_signal_is_a_duplicate() {
        let mut cache = PerceptionCache::new(&CacheConfig::default());
        let first = signal(SignalKind::FoodPileSpotted, 0, 0);
        let second = signal(SignalKind::FoodPileSpotted, 30, 0);

        assert!(cache.add_signal(first));
        assert!(cache.contains_signal(&second));
        assert!(!cache.add_signal(second));

        cache.cleanup();
        assert_eq!(cache.signal_count(), 1);
    }

    #[test]
    fn other_kinds_do_not_deduplicate() {
        let mut cache = PerceptionCache::new(&CacheConfig::default());
        assert!(cache.add_signal(signal(SignalKind::BugSpotted, 0, 0)));
        assert!(cache.add_signal(signal(SignalKind::EnemySpotted, 0, 0)));
        assert_eq!(cache.signal_count(), 2);
    }

    #[test]
    fn equal_age_cluster_keeps_first_inserted() {
        let mut collection = SignalCollection::new(6, 50, 70);
        let a = signal(SignalKind::FoodItemNeedsCarriers, 0, 0);
        let b = signal(SignalKind::FoodItemNeedsCarriers, 60, 0);
        assert!(collection.add(a));
        assert!(collection.add(b));

        collection.cleanup();
        let left: Vec<_> = collection.iter().map(|s| s.coordinates).collect();
        assert_eq!(left, vec![a.coordinates]);
    }

    #[test]
    fn fresher_signal_dominates_older_neighbour() {
        let mut collection = SignalCollection::new(6, 50, 70);
        let old = signal(SignalKind::FoodItemNeedsCarriers, 0, 0);
        collection.add(old);
        collection.cleanup();
        collection.cleanup();

        let fresh = signal(SignalKind::FoodItemNeedsCarriers, 65, 0);
        assert!(collection.add(fresh));
        collection.cleanup();

        let left: Vec<_> = collection.iter().map(|s| s.coordinates).collect();
        assert_eq!(left, vec![fresh.coordinates]);
    }

    #[test]
    fn distant_signals_both_survive() {
        let mut collection = SignalCollection::new(6, 50, 70);
        collection.add(signal(SignalKind::AttackPoint, 0, 0));
        collection.add(signal(SignalKind::AttackPoint, 200, 0));
        collection.cleanup();
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn hostile_signal_survives_one_cleanup() {
        let mut cache = PerceptionCache::new(&CacheConfig::default());
        cache.add_signal(signal(SignalKind::EnemySpotted, 10, 10));

        cache.cleanup();
        assert_eq!(cache.signal_count(), 1);
        cache.cleanup();
        assert_eq!(cache.signal_count(), 0);
    }

    #[test]
    fn food_pile_signal_survives_fifteen_cleanups() {
        let mut cache = PerceptionCache::new(&CacheConfig::default());
        cache.add_signal(signal(SignalKind::FoodPileSpotted, 10, 10));

        for _ in 0..15 {
            cache.cleanup();
        }
        assert_eq!(cache.signal_count(), 1);
        cache.cleanup();
        assert_eq!(cache.signal_count(), 0);
    }

    #[test]
    fn other_signals_survive_six_cleanups() {
        let mut cache = PerceptionCache::new(&CacheConfig::default());
        cache.add_signal(signal(SignalKind::FoodItemNeedsProtection, 0, 0));
        for _ in 0..6 {
            cache.cleanup();
        }
        assert_eq!(cache.signal_count(), 1);
        cache.cleanup();
        assert!(cache.is_empty());
    }

    #[test]
    fn resighting_refreshes_instead_of_duplicating() {
        let mut collection = EntityCollection::new(1);
        assert!(collection.add(bug(1, 10.0, 100)));
        collection.cleanup();
        assert!(!collection.add(bug(1, 20.0, 80)));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get(EntityId(1)).map(|b| b.vitality), Some(80));

        // Refreshed age: survives one more cleanup.
        collection.cleanup();
        assert!(collection.contains(EntityId(1)));
    }

    #[test]
    fn hostiles_expire_when_unseen_or_dead() {
        let mut collection = EntityCollection::new(1);
        collection.add(bug(1, 10.0, 100));
        collection.add(bug(2, 30.0, 0));
        collection.cleanup();
        assert!(collection.contains(EntityId(1)));
        assert!(!collection.contains(EntityId(2)));
        collection.cleanup();
        assert!(collection.is_empty());
    }

    #[test]
    fn empty_food_is_evicted() {
        let mut cache = PerceptionCache::new(&CacheConfig::default());
        let pile = FoodPile {
            id: EntityId(3),
            position: Position::new(5.0, 5.0),
            amount: 0,
        };
        cache.add_sighting(&Sighting::FoodPile(pile));
        assert_eq!(cache.entity_count(), 1);
        cache.cleanup();
        assert_eq!(cache.entity_count(), 0);
    }

    #[test]
    fn nearest_respects_filter() {
        let mut collection = EntityCollection::new(15);
        collection.add(bug(1, 10.0, 100));
        collection.add(bug(2, 40.0, 100));
        let origin = Position::new(0.0, 0.0);

        let (nearest, distance) = collection.nearest(&origin, |_| true).unwrap();
        assert_eq!((nearest.id, distance), (EntityId(1), 10));

        let (nearest, _) = collection.nearest(&origin, |b| b.id != EntityId(1)).unwrap();
        assert_eq!(nearest.id, EntityId(2));
    }

    #[test]
    fn announced_signals_are_not_received_signals() {
        let mut cache = PerceptionCache::new(&CacheConfig::default());
        let s = signal(SignalKind::FoodItemNeedsCarriers, 0, 0);
        cache.remember_announced(s);
        assert!(cache.was_announced(&s));
        assert!(!cache.contains_signal(&s));
        assert_eq!(cache.signal_count(), 0);
    }

    #[test]
    fn all_signals_are_grouped_in_wire_order() {
        let mut cache = PerceptionCache::new(&CacheConfig::default());
        cache.add_signal(signal(SignalKind::AttackPoint, 0, 300));
        cache.add_signal(signal(SignalKind::BugSpotted, 500, 0));
        cache.add_signal(signal(SignalKind::AttackPoint, -400, 0));
        cache.remember_announced(signal(SignalKind::FoodPileSpotted, 10, 10));

        let kinds: Vec<SignalKind> = cache.all_signals().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SignalKind::BugSpotted, SignalKind::AttackPoint, SignalKind::AttackPoint]
        );
        assert_eq!(cache.all_signals().count(), cache.signal_count());
    }
}
