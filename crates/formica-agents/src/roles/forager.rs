//! Forager: finds food and hauls it home.

use super::{choose_lead, Situation, Target};
use formica_core::signal::{Signal, SignalKind};
use formica_core::types::{AgentView, Decision, Interaction, Movement, Sighting};

/// Stateless: everything a forager needs is in its view and memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct Forager;

impl Forager {
    pub fn select_target(&self, situation: &Situation<'_>) -> Option<Target> {
        let view = situation.view;
        // Waiting for help with an item too heavy to move alone.
        if view.carrying.map_or(false, |item| item.needs_carriers) {
            return None;
        }
        if view.is_heading_home() || view.is_loaded() {
            return None;
        }
        self.item_target(situation)
            .or_else(|| self.pile_target(situation))
    }

    fn item_target(&self, situation: &Situation<'_>) -> Option<Target> {
        let visible = situation
            .cache
            .food_items()
            .nearest(&situation.view.position, |item| {
                item.needs_carriers && item.amount > 0
            })
            .map(|(item, d)| (Target::Food(item.id), d));
        let reported = situation
            .cache
            .nearest_signal(SignalKind::FoodItemNeedsCarriers, &situation.here())
            .map(|(signal, d)| (signal.coordinates, d));
        choose_lead(situation, visible, reported, 1.0)
    }

    fn pile_target(&self, situation: &Situation<'_>) -> Option<Target> {
        let visible = situation
            .cache
            .food_piles()
            .nearest(&situation.view.position, |pile| pile.amount > 0)
            .map(|(pile, d)| (Target::Food(pile.id), d));
        let reported = situation
            .cache
            .nearest_signal(SignalKind::FoodPileSpotted, &situation.here())
            .map(|(signal, d)| (signal.coordinates, d));
        choose_lead(situation, visible, reported, 1.0)
    }

    /// Call for help with the item being carried.
    pub fn originate(&self, situation: &Situation<'_>) -> Option<Signal> {
        let item = situation.view.carrying.filter(|item| item.needs_carriers)?;
        let signal = Signal::new(
            SignalKind::FoodItemNeedsCarriers,
            situation.locate(&item.position),
        );
        (!situation.is_known(&signal)).then_some(signal)
    }

    /// A free forager drops what it was doing for an item that needs help.
    pub fn on_observed(&self, view: &AgentView, sighting: &Sighting) -> Option<Movement> {
        match sighting {
            Sighting::FoodItem(item)
                if item.needs_carriers && !view.is_loaded() && !view.is_heading_home() =>
            {
                Some(Movement::ToEntity { id: item.id })
            }
            _ => None,
        }
    }

    pub fn on_destination_reached(&self, _view: &AgentView, sighting: &Sighting) -> Decision {
        let id = match sighting {
            Sighting::FoodPile(pile) if pile.amount > 0 => pile.id,
            Sighting::FoodItem(item) if item.needs_carriers => item.id,
            _ => return Decision::idle(),
        };
        Decision {
            movement: Some(Movement::Home),
            emission: None,
            interactions: vec![Interaction::PickUp { id }],
        }
    }

    pub fn on_attacked(&self, view: &AgentView) -> Decision {
        let interactions = if view.is_loaded() {
            vec![Interaction::Drop]
        } else {
            Vec::new()
        };
        Decision {
            movement: Some(Movement::Home),
            emission: None,
            interactions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PerceptionCache;
    use formica_core::config::AgentConfig;
    use formica_core::geometry::{Position, RelativeCoordinate};
    use formica_core::types::{Destination, EntityId, FoodItem, FoodPile};

    fn view() -> AgentView {
        AgentView {
            home: Some(Position::default()),
            range: 1000,
            vitality: 100,
            max_vitality: 100,
            view_range: 25,
            max_load: 5,
            ..AgentView::default()
        }
    }

    fn item(id: u64, x: f64, needs_carriers: bool) -> FoodItem {
        FoodItem {
            id: EntityId(id),
            position: Position::new(x, 0.0),
            amount: 250,
            needs_carriers,
        }
    }

    #[test]
    fn closer_report_beats_visible_item() {
        let config = AgentConfig::default();
        let mut cache = PerceptionCache::new(&config.cache);
        cache.add_sighting(&Sighting::FoodItem(item(1, 40.0, true)));
        cache.add_signal(Signal::new(
            SignalKind::FoodItemNeedsCarriers,
            RelativeCoordinate::new(0, 30),
        ));
        let view = view();
        let situation = Situation::new(&view, Position::default(), &config, &cache);

        assert_eq!(
            Forager.select_target(&situation),
            Some(Target::Coordinate(RelativeCoordinate::new(0, 30)))
        );
    }

    #[test]
    fn items_come_before_piles() {
        let config = AgentConfig::default();
        let mut cache = PerceptionCache::new(&config.cache);
        cache.add_sighting(&Sighting::FoodPile(FoodPile {
            id: EntityId(9),
            position: Position::new(5.0, 0.0),
            amount: 100,
        }));
        cache.add_sighting(&Sighting::FoodItem(item(1, 80.0, true)));
        let view = view();
        let situation = Situation::new(&view, Position::default(), &config, &cache);

        assert_eq!(Forager.select_target(&situation), Some(Target::Food(EntityId(1))));
    }

    #[test]
    fn loaded_forager_has_no_target() {
        let config = AgentConfig::default();
        let mut cache = PerceptionCache::new(&config.cache);
        cache.add_sighting(&Sighting::FoodItem(item(1, 10.0, true)));
        let mut view = view();
        view.load = 5;
        let situation = Situation::new(&view, Position::default(), &config, &cache);
        assert_eq!(Forager.select_target(&situation), None);

        let mut view = self::view();
        view.destination = Destination::Home;
        let situation = Situation::new(&view, Position::default(), &config, &cache);
        assert_eq!(Forager.select_target(&situation), None);
    }

    #[test]
    fn undersupplied_item_is_announced_once() {
        let config = AgentConfig::default();
        let mut cache = PerceptionCache::new(&config.cache);
        let mut view = view();
        view.carrying = Some(item(4, 0.0, true));

        let situation = Situation::new(&view, Position::default(), &config, &cache);
        let signal = Forager.originate(&situation).unwrap();
        assert_eq!(signal.kind, SignalKind::FoodItemNeedsCarriers);

        cache.remember_announced(signal);
        let situation = Situation::new(&view, Position::default(), &config, &cache);
        assert_eq!(Forager.originate(&situation), None);
    }

    #[test]
    fn reaching_food_picks_it_up() {
        let decision = Forager.on_destination_reached(
            &view(),
            &Sighting::FoodItem(item(3, 0.0, true)),
        );
        assert_eq!(decision.movement, Some(Movement::Home));
        assert_eq!(decision.interactions, vec![Interaction::PickUp { id: EntityId(3) }]);

        let decision = Forager.on_destination_reached(
            &view(),
            &Sighting::FoodItem(item(3, 0.0, false)),
        );
        assert!(decision.is_idle());
    }

    #[test]
    fn attacked_forager_drops_load_and_flees() {
        let mut view = view();
        view.load = 2;
        let decision = Forager.on_attacked(&view);
        assert_eq!(decision.movement, Some(Movement::Home));
        assert_eq!(decision.interactions, vec![Interaction::Drop]);
    }
}
