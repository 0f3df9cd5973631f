//! Agent configuration: every tuning parameter of the decision core.
//!
//! All sections default field by field, so a configuration file only needs
//! to mention what it changes. Defaults are the values the colony was
//! tuned with.

use crate::error::{FormicaError, Result};
use crate::signal::{SignalKind, MAX_HOP_COUNT};
use crate::types::Role;
use serde::{Deserialize, Serialize};

/// Complete configuration for one agent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub signals: SignalConfig,
    #[serde(default)]
    pub safety: SafetyConfig,
    #[serde(default)]
    pub forager: ForagerConfig,
    #[serde(default)]
    pub fighter: FighterConfig,
    #[serde(default)]
    pub scout: ScoutConfig,
    #[serde(default)]
    pub coordinator: CoordinatorConfig,
    #[serde(default)]
    pub roles: RoleShares,
}

/// Perception cache retention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Same-kind signals closer than this are the same report.
    pub dedup_radius: u32,
    /// A fresher same-kind signal closer than this supersedes an older one.
    pub dominance_radius: u32,
    /// Ticks a directly observed food entity is remembered without being
    /// seen again.
    pub food_max_age: u32,
    /// Ticks a directly observed hostile is remembered without being seen
    /// again.
    pub hostile_max_age: u32,
    pub signal_lifetimes: SignalLifetimes,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dedup_radius: 50,
            dominance_radius: 70,
            food_max_age: 15,
            hostile_max_age: 1,
            signal_lifetimes: SignalLifetimes::default(),
        }
    }
}

/// Maximum age per signal kind. A signal is evicted once `age > max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalLifetimes {
    pub bug_spotted: u32,
    pub enemy_spotted: u32,
    pub food_pile_spotted: u32,
    pub food_item_needs_carriers: u32,
    pub food_item_needs_protection: u32,
    pub attack_point: u32,
    pub unassigned: u32,
}

impl SignalLifetimes {
    pub fn max_age(&self, kind: SignalKind) -> u32 {
        match kind {
            SignalKind::BugSpotted => self.bug_spotted,
            SignalKind::EnemySpotted => self.enemy_spotted,
            SignalKind::FoodPileSpotted => self.food_pile_spotted,
            SignalKind::FoodItemNeedsCarriers => self.food_item_needs_carriers,
            SignalKind::FoodItemNeedsProtection => self.food_item_needs_protection,
            SignalKind::AttackPoint => self.attack_point,
            SignalKind::Unassigned(_) => self.unassigned,
        }
    }
}

impl Default for SignalLifetimes {
    fn default() -> Self {
        Self {
            bug_spotted: 1,
            enemy_spotted: 1,
            food_pile_spotted: 15,
            food_item_needs_carriers: 6,
            food_item_needs_protection: 6,
            attack_point: 6,
            unassigned: 6,
        }
    }
}

/// Relaying and broadcast ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Received signals are relayed only while their hop count is below
    /// this.
    pub hop_ceiling: u8,
    /// Pending outbound signals kept between ticks; the oldest is dropped
    /// when full.
    pub outbox_capacity: usize,
    pub ranges: EmissionRanges,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            hop_ceiling: 2,
            outbox_capacity: 4,
            ranges: EmissionRanges::default(),
        }
    }
}

/// Broadcast radius per signal kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionRanges {
    pub threat: u32,
    pub food_pile: u32,
    pub needs_carriers: u32,
    pub needs_protection: u32,
    pub attack_point: u32,
    pub unassigned: u32,
}

impl EmissionRanges {
    pub fn range(&self, kind: SignalKind) -> u32 {
        match kind {
            SignalKind::BugSpotted | SignalKind::EnemySpotted => self.threat,
            SignalKind::FoodPileSpotted => self.food_pile,
            SignalKind::FoodItemNeedsCarriers => self.needs_carriers,
            SignalKind::FoodItemNeedsProtection => self.needs_protection,
            SignalKind::AttackPoint => self.attack_point,
            SignalKind::Unassigned(_) => self.unassigned,
        }
    }
}

impl Default for EmissionRanges {
    fn default() -> Self {
        Self {
            threat: 75,
            food_pile: 50,
            needs_carriers: 200,
            needs_protection: 250,
            attack_point: 250,
            unassigned: 50,
        }
    }
}

/// When to abandon everything and go home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Share of the total range held back as reserve.
    pub abort_margin: f64,
    /// Below this share of maximum vitality the agent retreats.
    pub min_vitality_fraction: f64,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            abort_margin: 0.02,
            min_vitality_fraction: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForagerConfig {
    /// A pile is announced only when it holds more than this many full
    /// loads.
    pub pile_mark_loads: u32,
}

impl Default for ForagerConfig {
    fn default() -> Self {
        Self { pile_mark_loads: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterConfig {
    /// A visible hostile beats a reported one unless the report is closer
    /// by more than this factor.
    pub pursuit_multiplier: f64,
    /// Within this distance of its objective the fighter engages locally.
    pub engagement_radius: u32,
    /// Ticks an adopted objective stays valid.
    pub objective_max_age: u32,
}

impl Default for FighterConfig {
    fn default() -> Self {
        Self {
            pursuit_multiplier: 1.75,
            engagement_radius: 100,
            objective_max_age: 55,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Smallest pile worth announcing.
    pub pile_min_amount: u32,
    /// An enemy this close to a food item puts the item under threat.
    pub protection_radius: u32,
    /// Mixed with the agent ID to seed random sampling.
    pub seed: u64,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            pile_min_amount: 250,
            protection_radius: 75,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    pub enemy_carrying_weight: u32,
    pub bug_weight: u32,
    pub enemy_signal_weight: u32,
    pub bug_signal_weight: u32,
    pub protection_signal_weight: u32,
    /// Candidates farther than the nearest one plus this are dropped.
    pub prune_slack: u32,
    /// Candidates closer than this reinforce each other.
    pub cluster_radius: u32,
    /// Ticks before an objective is replaced.
    pub objective_max_age: u32,
    /// Within this distance an objective counts as reached.
    pub arrival_radius: u32,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            enemy_carrying_weight: 5,
            bug_weight: 7,
            enemy_signal_weight: 2,
            bug_signal_weight: 4,
            protection_signal_weight: 10,
            prune_slack: 100,
            cluster_radius: 150,
            objective_max_age: 60,
            arrival_radius: 20,
        }
    }
}

/// Target share of each role in the colony.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleShares {
    pub forager: f64,
    pub fighter: f64,
    pub scout: f64,
    pub coordinator: f64,
}

impl RoleShares {
    pub fn share(&self, role: Role) -> f64 {
        match role {
            Role::Forager => self.forager,
            Role::Fighter => self.fighter,
            Role::Scout => self.scout,
            Role::Coordinator => self.coordinator,
        }
    }

    pub fn total(&self) -> f64 {
        Role::ALL.iter().map(|r| self.share(*r)).sum()
    }
}

impl Default for RoleShares {
    fn default() -> Self {
        Self {
            forager: 0.55,
            fighter: 0.3,
            scout: 0.1,
            coordinator: 0.05,
        }
    }
}

impl AgentConfig {
    /// Reject values the decision core cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.signals.hop_ceiling > MAX_HOP_COUNT {
            return Err(FormicaError::out_of_range(
                "signals.hop_ceiling",
                0.0,
                f64::from(MAX_HOP_COUNT),
                f64::from(self.signals.hop_ceiling),
            ));
        }
        if self.signals.outbox_capacity == 0 {
            return Err(FormicaError::invalid_config(
                "signals.outbox_capacity",
                "0",
                "at least one pending signal must fit",
            ));
        }
        check_fraction("safety.abort_margin", self.safety.abort_margin)?;
        check_fraction("safety.min_vitality_fraction", self.safety.min_vitality_fraction)?;
        if self.fighter.pursuit_multiplier.is_nan() || self.fighter.pursuit_multiplier <= 0.0 {
            return Err(FormicaError::invalid_config(
                "fighter.pursuit_multiplier",
                self.fighter.pursuit_multiplier.to_string(),
                "must be positive",
            ));
        }
        for role in Role::ALL {
            let share = self.roles.share(role);
            if share.is_nan() || share < 0.0 {
                return Err(FormicaError::invalid_config(
                    format!("roles.{}", role.name()),
                    share.to_string(),
                    "shares cannot be negative",
                ));
            }
        }
        let total = self.roles.total();
        if total.is_nan() || total <= 0.0 {
            return Err(FormicaError::invalid_config(
                "roles",
                total.to_string(),
                "at least one role needs a positive share",
            ));
        }
        Ok(())
    }
}

fn check_fraction(field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FormicaError::out_of_range(field, 0.0, 1.0, value))
    }
}
