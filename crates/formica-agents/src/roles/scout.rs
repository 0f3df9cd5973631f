//! Scout: wanders and tells the colony what it has seen.
//!
//! Every tick the scout visits its memory categories in random order and
//! announces a random entry from the first category that has anything new
//! to say. Sampling is seeded, so a replay with the same seed and agent ID
//! produces the same marks.

use super::Situation;
use formica_core::geometry::{distance_between, Position};
use formica_core::signal::{Signal, SignalKind};
use formica_core::types::HostileKind;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    EnemiesWithFood,
    Bugs,
    FoodPiles,
    FoodItems,
}

impl Category {
    const ALL: [Category; 4] = [
        Category::EnemiesWithFood,
        Category::Bugs,
        Category::FoodPiles,
        Category::FoodItems,
    ];
}

#[derive(Debug, Clone)]
pub struct Scout {
    rng: StdRng,
}

impl Scout {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn originate(&mut self, situation: &Situation<'_>) -> Option<Signal> {
        let mut categories = Category::ALL;
        categories.shuffle(&mut self.rng);
        for category in categories {
            let candidates: Vec<Signal> = candidates(situation, category)
                .into_iter()
                .filter(|signal| !situation.is_known(signal))
                .collect();
            if let Some(signal) = candidates.choose(&mut self.rng) {
                return Some(*signal);
            }
        }
        None
    }
}

fn candidates(situation: &Situation<'_>, category: Category) -> Vec<Signal> {
    let cache = situation.cache;
    let config = &situation.config.scout;
    let mark = |kind: SignalKind, position: &Position| Signal::new(kind, situation.locate(position));

    match category {
        Category::EnemiesWithFood => cache
            .hostiles(HostileKind::Enemy)
            .iter()
            .filter(|enemy| enemy.carrying_food)
            .map(|enemy| mark(SignalKind::EnemySpotted, &enemy.position))
            .collect(),
        Category::Bugs => cache
            .hostiles(HostileKind::Bug)
            .iter()
            .map(|bug| mark(SignalKind::BugSpotted, &bug.position))
            .collect(),
        Category::FoodPiles => cache
            .food_piles()
            .iter()
            .filter(|pile| pile.amount > config.pile_min_amount)
            .map(|pile| mark(SignalKind::FoodPileSpotted, &pile.position))
            .collect(),
        Category::FoodItems => {
            // Threatened items take precedence over undersupplied ones.
            let enemies = cache.hostiles(HostileKind::Enemy);
            let threats: Vec<Signal> = cache
                .food_items()
                .iter()
                .flat_map(move |item| {
                    enemies.iter().filter(move |enemy| {
                        distance_between(&enemy.position, &item.position) < config.protection_radius
                    })
                })
                .map(|enemy| mark(SignalKind::FoodItemNeedsProtection, &enemy.position))
                .collect();
            if threats.iter().any(|signal| !situation.is_known(signal)) {
                return threats;
            }
            cache
                .food_items()
                .iter()
                .filter(|item| item.needs_carriers)
                .map(|item| mark(SignalKind::FoodItemNeedsCarriers, &item.position))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PerceptionCache;
    use formica_core::config::AgentConfig;
    use formica_core::geometry::RelativeCoordinate;
    use formica_core::types::{AgentView, EntityId, FoodItem, FoodPile, Hostile, Sighting};

    fn view() -> AgentView {
        AgentView {
            home: Some(Position::default()),
            range: 1000,
            vitality: 100,
            max_vitality: 100,
            view_range: 60,
            ..AgentView::default()
        }
    }

    fn enemy(id: u64, x: f64, carrying_food: bool) -> Hostile {
        Hostile {
            id: EntityId(id),
            kind: HostileKind::Enemy,
            position: Position::new(x, 0.0),
            vitality: 50,
            carrying_food,
        }
    }

    #[test]
    fn empty_memory_says_nothing() {
        let config = AgentConfig::default();
        let cache = PerceptionCache::new(&config.cache);
        let view = view();
        let situation = Situation::new(&view, Position::default(), &config, &cache);
        assert_eq!(Scout::new(1).originate(&situation), None);
    }

    #[test]
    fn small_piles_and_idle_enemies_are_not_news() {
        let config = AgentConfig::default();
        let mut cache = PerceptionCache::new(&config.cache);
        cache.add_sighting(&Sighting::FoodPile(FoodPile {
            id: EntityId(1),
            position: Position::new(100.0, 0.0),
            amount: 250,
        }));
        cache.add_sighting(&Sighting::Hostile(enemy(2, 300.0, false)));
        let view = view();
        let situation = Situation::new(&view, Position::default(), &config, &cache);
        assert_eq!(Scout::new(1).originate(&situation), None);
    }

    #[test]
    fn enemy_next_to_food_calls_for_protection() {
        let config = AgentConfig::default();
        let mut cache = PerceptionCache::new(&config.cache);
        cache.add_sighting(&Sighting::FoodItem(FoodItem {
            id: EntityId(1),
            position: Position::new(100.0, 0.0),
            amount: 250,
            needs_carriers: true,
        }));
        cache.add_sighting(&Sighting::Hostile(enemy(2, 150.0, false)));
        let view = view();
        let situation = Situation::new(&view, Position::default(), &config, &cache);

        let signal = Scout::new(7).originate(&situation).unwrap();
        assert_eq!(signal.kind, SignalKind::FoodItemNeedsProtection);
        assert_eq!(signal.coordinates, RelativeCoordinate::new(150, 0));
    }

    #[test]
    fn same_seed_same_choice() {
        let config = AgentConfig::default();
        let mut cache = PerceptionCache::new(&config.cache);
        for id in 0..5 {
            cache.add_sighting(&Sighting::FoodPile(FoodPile {
                id: EntityId(id),
                position: Position::new(200.0 * id as f64, 0.0),
                amount: 1000,
            }));
        }
        let view = view();
        let situation = Situation::new(&view, Position::default(), &config, &cache);

        let first = Scout::new(42).originate(&situation);
        let second = Scout::new(42).originate(&situation);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn known_marks_are_skipped() {
        let config = AgentConfig::default();
        let mut cache = PerceptionCache::new(&config.cache);
        cache.add_sighting(&Sighting::FoodPile(FoodPile {
            id: EntityId(1),
            position: Position::new(100.0, 0.0),
            amount: 1000,
        }));
        cache.add_signal(Signal::new(
            SignalKind::FoodPileSpotted,
            RelativeCoordinate::new(110, 0),
        ));
        let view = view();
        let situation = Situation::new(&view, Position::default(), &config, &cache);
        assert_eq!(Scout::new(3).originate(&situation), None);
    }
}
