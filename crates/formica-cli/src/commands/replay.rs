//! Replay a scripted host session through one agent.
//!
//! A script is JSON: an optional role and agent seed, then one entry per
//! tick with the agent's view and everything the host reports before the
//! tick callback.
//!
//! ```json
//! {
//!   "role": "fighter",
//!   "ticks": [
//!     { "view": { "home": { "x": 0, "y": 0 }, "range": 1000, "vitality": 100, "max_vitality": 100 },
//!       "signals": [1113063429],
//!       "sightings": [{ "type": "hostile", "id": 3, "kind": "bug", "position": { "x": 40, "y": 0 }, "vitality": 50 }] }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use colored::Colorize;
use formica_agents::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::config::Config;

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub agent_seed: Option<u64>,
    pub ticks: Vec<ScriptedTick>,
}

/// Host events for one tick, delivered in field order before `on_tick`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScriptedTick {
    pub view: AgentView,
    /// Received wire words.
    pub signals: Vec<u32>,
    pub sightings: Vec<Sighting>,
    pub attacks: Vec<Hostile>,
    pub arrived: Option<Sighting>,
    pub idle: bool,
}

/// One answer from the agent.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub tick: usize,
    pub event: &'static str,
    pub decision: Decision,
}

/// Drive `agent` through `script`. Callback answers are kept only when
/// they ask for something; every tick answer is kept.
pub fn replay(agent: &mut Colonist, script: &Script) -> Vec<Step> {
    let mut steps = Vec::new();
    for (tick, scripted) in script.ticks.iter().enumerate() {
        let view = &scripted.view;
        let mut record = |event: &'static str, decision: Decision, always: bool| {
            if always || !decision.is_idle() {
                steps.push(Step {
                    tick,
                    event,
                    decision,
                });
            }
        };

        for word in &scripted.signals {
            record("signal", agent.on_signal_received(view, *word), false);
        }
        for sighting in &scripted.sightings {
            record("observed", agent.on_observed(view, sighting), false);
        }
        for attacker in &scripted.attacks {
            record("attacked", agent.on_attacked(view, attacker), false);
        }
        if let Some(sighting) = &scripted.arrived {
            record("arrived", agent.on_destination_reached(view, sighting), false);
        }
        if scripted.idle {
            record("idle", agent.on_idle(view), false);
        }
        record("tick", agent.on_tick(view), true);
    }
    steps
}

pub fn load_script(path: &Path) -> Result<Script> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse script: {}", path.display()))
}

pub fn run(script_path: &str, role: Option<&str>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let script = load_script(Path::new(script_path))?;

    let role = match role {
        Some(name) => name.parse::<Role>()?,
        None => script.role.unwrap_or(config.replay.role),
    };
    let seed = script.agent_seed.unwrap_or(config.replay.agent_seed);
    let mut agent = Colonist::with_id(AgentId::from_seed(seed), role, config.agent);
    info!(%role, ticks = script.ticks.len(), agent = %agent.id(), "replaying script");
    let steps = replay(&mut agent, &script);

    if json {
        for step in &steps {
            println!("{}", serde_json::to_string(step).context("Failed to serialize decision")?);
        }
        return Ok(());
    }

    println!(
        "{} {} through {} ticks",
        "→".blue(),
        format!("Replaying {role}").white().bold(),
        script.ticks.len().to_string().cyan()
    );
    println!("{}", "═".repeat(40).dimmed());
    for step in &steps {
        println!(
            "  {:>4} {:<9} {}",
            step.tick.to_string().dimmed(),
            step.event.blue(),
            describe(&step.decision)
        );
    }

    let emissions = steps.iter().filter(|s| s.decision.emission.is_some()).count();
    println!();
    println!("  Marks emitted:      {}", emissions.to_string().cyan());
    println!("  Signals in memory:  {}", agent.cache().signal_count().to_string().cyan());
    for signal in agent.cache().all_signals() {
        println!("    {}", signal.to_string().dimmed());
    }
    println!("  Entities in memory: {}", agent.cache().entity_count().to_string().cyan());
    if let Some(objective) = agent.objective() {
        println!(
            "  Objective:          ({}, {}) age {}",
            objective.coordinate.x, objective.coordinate.y, objective.age
        );
    }
    Ok(())
}

/// One-line human summary of a decision.
pub fn describe(decision: &Decision) -> String {
    let mut parts = Vec::new();
    match &decision.movement {
        Some(Movement::Forward) => parts.push("forward".to_string()),
        Some(Movement::Heading(h)) => parts.push(format!("turn {}° go {}", h.bearing, h.distance)),
        Some(Movement::Home) => parts.push("home".to_string()),
        Some(Movement::ToEntity { id }) => parts.push(format!("approach {id}")),
        Some(Movement::Attack { id }) => parts.push(format!("attack {id}")),
        None => {}
    }
    for interaction in &decision.interactions {
        match interaction {
            Interaction::PickUp { id } => parts.push(format!("pick up {id}")),
            Interaction::Drop => parts.push("drop".to_string()),
        }
    }
    if let Some(emission) = &decision.emission {
        parts.push(format!(
            "emit {} r={} [{:#010x}]",
            emission.signal, emission.range, emission.word
        ));
    }
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}
