//! Reference host for the triage engine.
//!
//! A small bevy_ecs colony: pawns get hurt, get hungry and pick their own
//! routines, while the engine's hooks decide who drops everything to treat
//! whom. The mechanics are stand-ins; the point is to drive every call site
//! end to end and log what the engine decides.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use triage_engine::TriageEngine;

pub mod components;
pub mod config;
pub mod error;
pub mod host;
pub mod logger;
pub mod setup;
pub mod systems;

pub use config::SimConfig;
pub use error::SimError;
pub use host::WorldIndex;
pub use logger::DecisionLogger;
pub use setup::{spawn_scenario, SpawnSummary};

use components::{Body, Pawn};
use systems::{
    apply_dispatches, decay_satiety, index_world, pick_routines, progress_jobs, random_injuries,
    run_triage, update_bodies, Dispatches, Triage,
};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);

/// Current simulation tick
#[derive(Resource, Debug, Default)]
pub struct SimClock {
    pub tick: u64,
}

/// Builds a world with every resource the schedule needs and the scenario
/// spawned.
pub fn build_world(config: &SimConfig, seed: u64, logger: DecisionLogger) -> (World, SpawnSummary) {
    let mut world = World::new();
    let mut rng = SmallRng::seed_from_u64(seed);
    let summary = spawn_scenario(&mut world, &config.scenario, &mut rng);

    world.insert_resource(SimRng(rng));
    world.insert_resource(SimClock::default());
    world.insert_resource(config.timing.clone());
    world.insert_resource(WorldIndex::new());
    world.insert_resource(Dispatches::new());
    world.insert_resource(Triage(TriageEngine::new(config.policy.clone())));
    world.insert_resource(logger);

    (world, summary)
}

/// One tick, in order: bodies change, finished work settles, the world is
/// indexed, the engine decides, and the host acts on its answers.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            decay_satiety,
            update_bodies,
            random_injuries,
            progress_jobs,
            index_world,
            run_triage,
            apply_dispatches,
            pick_routines,
        )
            .chain(),
    );
    schedule
}

/// Runs the schedule for `ticks` ticks, starting after the current one.
pub fn run_ticks(world: &mut World, schedule: &mut Schedule, ticks: u64) {
    for _ in 0..ticks {
        world.resource_mut::<SimClock>().tick += 1;
        schedule.run(world);
    }
}

/// Living and dead pawns, and how many still need tending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Census {
    pub alive: usize,
    pub dead: usize,
    pub untended: usize,
}

pub fn census(world: &mut World) -> Census {
    let mut census = Census::default();
    let mut bodies = world.query::<(&Pawn, &Body)>();
    for (_, body) in bodies.iter(world) {
        if body.dead {
            census.dead += 1;
        } else {
            census.alive += 1;
            if body.needs_tending() && !body.hostile {
                census.untended += 1;
            }
        }
    }
    census
}
