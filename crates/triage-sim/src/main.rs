//! Priority triage reference simulation
//!
//! Runs a seeded colony for a number of ticks and writes every engine
//! decision to a JSONL log.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use triage_sim::{build_schedule, build_world, census, run_ticks, DecisionLogger, SimConfig, SimError};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "triage_sim")]
#[command(about = "Reference host for the priority triage engine")]
struct Args {
    /// Random seed for reproducibility (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate (overrides the config file)
    #[arg(long)]
    ticks: Option<u64>,

    /// TOML config; defaults apply when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Decision log path
    #[arg(long, default_value = "output/decisions.jsonl")]
    log: PathBuf,

    /// Print the default config as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();

    if args.print_default_config {
        println!("{}", SimConfig::default().to_toml()?);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    let seed = args.seed.unwrap_or(config.simulation.seed);
    let ticks = args.ticks.unwrap_or(config.simulation.default_ticks);

    if let Some(parent) = args.log.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let logger = DecisionLogger::new(&args.log)?;

    info!(seed, ticks, log = %args.log.display(), "starting triage simulation");

    let (mut world, summary) = build_world(&config, seed, logger);
    info!(
        caregivers = summary.caregivers,
        patients = summary.patients,
        animals = summary.animals,
        hostiles = summary.hostiles,
        beds = summary.beds,
        "scenario spawned"
    );

    let mut schedule = build_schedule();
    let report_every = (ticks / 10).max(1);
    let mut done = 0;
    while done < ticks {
        let step = report_every.min(ticks - done);
        run_ticks(&mut world, &mut schedule, step);
        done += step;

        let census = census(&mut world);
        let decisions = world.resource::<DecisionLogger>().record_count();
        info!(
            tick = done,
            alive = census.alive,
            dead = census.dead,
            untended = census.untended,
            decisions,
            "progress"
        );
    }

    world.resource_mut::<DecisionLogger>().flush()?;
    report(&args.log, &mut world);
    Ok(())
}

fn report(log: &Path, world: &mut bevy_ecs::world::World) {
    let census = census(world);
    let decisions = world.resource::<DecisionLogger>().record_count();
    info!(
        alive = census.alive,
        dead = census.dead,
        untended = census.untended,
        decisions,
        log = %log.display(),
        "simulation complete"
    );
}
