//! Role assignment: deciding what a newborn colonist becomes.
//!
//! The host reports how many members of each role are alive; a
//! [`RolePolicy`] answers with the role for the next one.

use crate::engine::Colonist;
use formica_core::config::{AgentConfig, RoleShares};
use formica_core::types::{AgentId, Role};
use std::collections::BTreeMap;
use tracing::debug;

/// Living colony members per role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleCounts {
    counts: BTreeMap<Role, usize>,
}

impl RoleCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: Role) -> usize {
        self.counts.get(&role).copied().unwrap_or(0)
    }

    pub fn set(&mut self, role: Role, count: usize) {
        self.counts.insert(role, count);
    }

    /// One more member of `role`.
    pub fn record(&mut self, role: Role) {
        *self.counts.entry(role).or_insert(0) += 1;
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl FromIterator<Role> for RoleCounts {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut counts = RoleCounts::new();
        for role in iter {
            counts.record(role);
        }
        counts
    }
}

/// Chooses the role of the next colony member.
pub trait RolePolicy {
    fn choose(&mut self, counts: &RoleCounts) -> Role;
}

/// Keeps the colony close to a target mix: the role furthest below its
/// share is chosen next. Ties go to the role declared first.
#[derive(Debug, Clone, Default)]
pub struct QuotaRolePolicy {
    shares: RoleShares,
}

impl QuotaRolePolicy {
    pub fn new(shares: RoleShares) -> Self {
        Self { shares }
    }
}

impl RolePolicy for QuotaRolePolicy {
    fn choose(&mut self, counts: &RoleCounts) -> Role {
        let total_share = self.shares.total();
        let population = (counts.total() + 1) as f64;
        let mut best: Option<(Role, f64)> = None;
        for role in Role::ALL {
            let share = self.shares.share(role);
            if share.is_nan() || share <= 0.0 {
                continue;
            }
            let deficit = share / total_share * population - counts.get(role) as f64;
            if best.map_or(true, |(_, d)| deficit > d) {
                best = Some((role, deficit));
            }
        }
        best.map_or(Role::Forager, |(role, _)| role)
    }
}

/// Always the same role.
#[derive(Debug, Clone, Copy)]
pub struct FixedRolePolicy(pub Role);

impl RolePolicy for FixedRolePolicy {
    fn choose(&mut self, _counts: &RoleCounts) -> Role {
        self.0
    }
}

impl Colonist {
    /// Create a colony member with the role `policy` picks for it.
    pub fn assign<P>(id: AgentId, counts: &RoleCounts, policy: &mut P, config: AgentConfig) -> Self
    where
        P: RolePolicy + ?Sized,
    {
        let role = policy.choose(counts);
        debug!(agent = %id, %role, population = counts.total(), "role assigned");
        Colonist::with_id(id, role, config)
    }
}
