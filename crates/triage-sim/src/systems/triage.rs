//! Triage System
//!
//! Drives the engine's hook table once per tick: zone ticks first, then every
//! caregiver in id order at whichever call site applies to it.

use std::collections::{BTreeSet, HashMap};

use bevy_ecs::prelude::*;
use triage_engine::{TriageEngine, TriageHooks, TriageHost};
use triage_types::{Action, ActivityKind, CallSite, DecisionKind, PawnId};

use crate::config::TimingConfig;
use crate::host::WorldIndex;
use crate::logger::DecisionLogger;
use crate::SimClock;

/// The engine, as an ECS resource
#[derive(Resource, Debug)]
pub struct Triage(pub TriageEngine);

/// Results of this tick's triage pass, consumed by the job systems
#[derive(Resource, Debug, Default)]
pub struct Dispatches {
    jobs: HashMap<PawnId, Action>,
    /// Idle agents the engine had nothing for; the host picks for them
    passed: BTreeSet<PawnId>,
}

impl Dispatches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, agent: PawnId, action: Action) {
        self.jobs.insert(agent, action);
    }

    pub fn job_for(&self, agent: PawnId) -> Option<Action> {
        self.jobs.get(&agent).copied()
    }

    pub fn passed(&self, agent: PawnId) -> bool {
        self.passed.contains(&agent)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn clear(&mut self) {
        self.jobs.clear();
        self.passed.clear();
    }
}

pub fn run_triage(
    clock: Res<SimClock>,
    timing: Res<TimingConfig>,
    mut triage: ResMut<Triage>,
    mut index: ResMut<WorldIndex>,
    mut logger: ResMut<DecisionLogger>,
    mut dispatches: ResMut<Dispatches>,
) {
    let engine = &mut triage.0;
    let index: &mut WorldIndex = &mut index;
    dispatches.clear();

    let zones = index.zones();
    let stale: Vec<_> = engine.zones().filter(|z| !zones.contains(z)).collect();
    for zone in stale {
        engine.on_zone_removed(zone);
    }
    for zone in &zones {
        if engine.pool(*zone).is_none() {
            engine.on_zone_activated(&*index, *zone);
        } else {
            engine.on_zone_tick(&*index, *zone);
        }
    }

    let rare_tick = clock.tick % timing.rare_tick_interval == 0;

    for agent_id in index.agent_ids() {
        let Ok(agent) = index.agent(agent_id) else {
            continue;
        };

        let (call_site, action) = match agent.activity_kind() {
            kind if kind.is_resting() => {
                if engine.on_agent_will_check_wake(&*index, agent_id) {
                    index.end_activity(agent_id);
                    if let Err(e) = logger.record(
                        clock.tick,
                        agent.zone,
                        agent_id,
                        &agent.name,
                        CallSite::WakeCheck,
                        DecisionKind::Wake,
                    ) {
                        tracing::warn!(error = %e, "failed to log wake");
                    }
                }
                continue;
            }
            ActivityKind::Idle => {
                let action = engine.on_agent_will_choose_activity(&mut *index, agent_id);
                if action.is_none() {
                    dispatches.passed.insert(agent_id);
                }
                (CallSite::BusyCheck, action)
            }
            _ if rare_tick => (CallSite::RareTick, engine.on_agent_rare_tick(&mut *index, agent_id)),
            _ => continue,
        };

        let Some(action) = action else {
            continue;
        };
        if let Err(e) = logger.record(
            clock.tick,
            agent.zone,
            agent_id,
            &agent.name,
            call_site,
            DecisionKind::Dispatch { action },
        ) {
            tracing::warn!(error = %e, "failed to log decision");
        }
        dispatches.push(agent_id, action);
    }
}
