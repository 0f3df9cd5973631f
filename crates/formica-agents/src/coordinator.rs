//! Coordinator heuristic: fold scattered reports into one rally point.
//!
//! Every hostile the coordinator knows about, seen or reported, is a
//! weighted candidate. Candidates far behind the nearest one are pruned,
//! neighbours reinforce each other, and the result is biased away from the
//! objective the colony is already converging on. The best candidate wins.

use formica_core::config::CoordinatorConfig;
use formica_core::geometry::RelativeCoordinate;
use serde::{Deserialize, Serialize};

/// A rally point for fighters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackPoint {
    pub coordinate: RelativeCoordinate,
    /// Ticks since it was chosen or adopted.
    pub age: u32,
}

impl AttackPoint {
    pub fn new(coordinate: RelativeCoordinate) -> Self {
        Self { coordinate, age: 0 }
    }

    pub fn grow_older(&mut self) {
        self.age = self.age.saturating_add(1);
    }

    pub fn is_fresh(&self) -> bool {
        self.age == 0
    }
}

/// A point of interest with its base weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub coordinate: RelativeCoordinate,
    pub weight: u32,
}

impl Candidate {
    pub fn new(coordinate: RelativeCoordinate, weight: u32) -> Self {
        Self { coordinate, weight }
    }
}

/// Base weight plus the base weight of every other candidate closer than
/// `radius`. A single pass: reinforcement never compounds.
pub fn cluster_priorities(candidates: &[Candidate], radius: u32) -> Vec<u32> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let support: u32 = candidates
                .iter()
                .enumerate()
                .filter(|&(j, other)| {
                    j != i && candidate.coordinate.distance_to(&other.coordinate) < radius
                })
                .map(|(_, other)| other.weight)
                .sum();
            candidate.weight + support
        })
        .collect()
}

/// Choose the next objective as seen from `from`.
///
/// Returns `None` only when there are no candidates. Ties go to the
/// candidate listed first.
pub fn select_objective(
    candidates: &[Candidate],
    from: &RelativeCoordinate,
    current: Option<&RelativeCoordinate>,
    config: &CoordinatorConfig,
) -> Option<RelativeCoordinate> {
    let nearest = candidates
        .iter()
        .map(|c| from.distance_to(&c.coordinate))
        .min()?;
    let cutoff = nearest.saturating_add(config.prune_slack);
    let kept: Vec<Candidate> = candidates
        .iter()
        .copied()
        .filter(|c| from.distance_to(&c.coordinate) <= cutoff)
        .collect();

    let mut priorities: Vec<f64> = cluster_priorities(&kept, config.cluster_radius)
        .into_iter()
        .map(f64::from)
        .collect();

    // Points near the current objective are already covered.
    if let Some(current) = current {
        let distances: Vec<f64> = kept
            .iter()
            .map(|c| f64::from(c.coordinate.distance_to(current)))
            .collect();
        let max_d = distances.iter().copied().fold(0.0, f64::max);
        if max_d > 0.0 {
            for (priority, d) in priorities.iter_mut().zip(&distances) {
                *priority *= (max_d + d) / (2.0 * max_d);
            }
        }
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, &priority) in priorities.iter().enumerate() {
        if best.map_or(true, |(_, p)| priority > p) {
            best = Some((i, priority));
        }
    }
    best.map(|(i, _)| kept[i].coordinate)
}
