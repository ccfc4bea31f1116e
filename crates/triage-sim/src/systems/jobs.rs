//! Job Systems
//!
//! Turns dispatched actions into activities, lets idle pawns pick their own
//! routine, and carries jobs to completion with deliberately simple rules.

use bevy_ecs::prelude::*;
use rand::Rng;
use triage_engine::{ReservationTarget, TriageHost};
use triage_types::{
    Action, ActivityKind, HealthState, HungerLevel, PawnId, Posture, TendJob, ThingId,
};

use crate::components::{Bed, Body, Doing, FoodStock, MedicineStock, Pawn, Satiety, Thing};
use crate::config::TimingConfig;
use crate::host::WorldIndex;
use crate::systems::triage::Dispatches;
use crate::{SimClock, SimRng};

/// Routines a pawn picks for itself, with weights
const ROUTINES: &[(ActivityKind, f32)] = &[
    (ActivityKind::Working, 0.6),
    (ActivityKind::Resting, 0.15),
    (ActivityKind::Sleeping, 0.15),
    (ActivityKind::Other, 0.1),
];

/// Applies engine interrupts and dispatched jobs to pawns.
pub fn apply_dispatches(
    clock: Res<SimClock>,
    timing: Res<TimingConfig>,
    mut index: ResMut<WorldIndex>,
    dispatches: Res<Dispatches>,
    mut pawns: Query<(&Pawn, &mut Doing)>,
) {
    let ended = index.take_ended();
    for (pawn, mut doing) in pawns.iter_mut() {
        if ended.contains(&pawn.0) {
            *doing = Doing::idle();
        }
        if let Some(action) = dispatches.job_for(pawn.0) {
            *doing = Doing::job(action, clock.tick + timing.duration_of(&action));
        }
    }
}

/// Host default selection for idle pawns the engine passed on.
pub fn pick_routines(
    clock: Res<SimClock>,
    timing: Res<TimingConfig>,
    mut rng: ResMut<SimRng>,
    index: Res<WorldIndex>,
    dispatches: Res<Dispatches>,
    mut pawns: Query<(&Pawn, &Body, &mut Doing, Option<&Satiety>)>,
) {
    let mut idle: Vec<_> = pawns
        .iter_mut()
        .filter(|(pawn, body, doing, _)| {
            doing.is_idle() && dispatches.passed(pawn.0) && body.health() == HealthState::Mobile
        })
        .collect();
    idle.sort_by_key(|(pawn, ..)| pawn.0);

    for (pawn, _, mut doing, satiety) in idle {
        let hungry = satiety.is_some_and(|s| s.level() > HungerLevel::Fed);
        if hungry {
            if let Some(food) = index.find_food_for(pawn.0) {
                let action = Action::Eat { food };
                *doing = Doing::job(action, clock.tick + timing.duration_of(&action));
                continue;
            }
        }

        let kind = weighted_routine(&mut rng.0);
        let length = rng.0.gen_range(timing.routine_min_ticks..=timing.routine_max_ticks);
        *doing = Doing::routine(kind, clock.tick + length);
    }
}

fn weighted_routine(rng: &mut impl Rng) -> ActivityKind {
    let total: f32 = ROUTINES.iter().map(|(_, w)| w).sum();
    let r = rng.gen::<f32>() * total;
    let mut cumulative = 0.0;
    for (kind, weight) in ROUTINES {
        cumulative += weight;
        if r < cumulative {
            return *kind;
        }
    }
    ActivityKind::Working
}

/// Finishes activities whose time is up.
#[allow(clippy::too_many_arguments)]
pub fn progress_jobs(
    clock: Res<SimClock>,
    timing: Res<TimingConfig>,
    mut index: ResMut<WorldIndex>,
    mut workers: Query<(&Pawn, &mut Doing, Option<&mut Satiety>)>,
    mut bodies: Query<(&Pawn, &mut Body)>,
    mut beds: Query<(&Thing, &mut Bed)>,
    mut food: Query<(&Thing, &mut FoodStock)>,
    mut medicine: Query<(&Thing, &mut MedicineStock)>,
) {
    let mut due: Vec<_> = workers
        .iter_mut()
        .filter(|(_, doing, _)| !doing.is_idle() && clock.tick >= doing.until)
        .collect();
    due.sort_by_key(|(pawn, ..)| pawn.0);

    for (pawn, mut doing, satiety) in due {
        let agent = pawn.0;
        let job = doing.job;
        match job {
            None | Some(Action::None) => {
                *doing = Doing::idle();
            }
            Some(Action::Eat { food: source }) => {
                if take_portion(&mut food, source) {
                    if let Some(mut satiety) = satiety {
                        satiety.0 = 1.0;
                    }
                }
                index.release_all(agent);
                *doing = Doing::idle();
            }
            Some(Action::Rescue {
                patient,
                bed,
                follow_up,
            }) => {
                if put_in_bed(&mut bodies, &mut beds, patient, bed) {
                    tracing::debug!(%agent, %patient, %bed, "patient carried to bed");
                }
                index.release(ReservationTarget::Thing(bed));
                let tend = Action::Tend(follow_up);
                *doing = Doing::job(tend, clock.tick + timing.duration_of(&tend));
            }
            Some(Action::Tend(job)) => {
                let potency = job
                    .medicine
                    .and_then(|m| take_dose(&mut medicine, m))
                    .unwrap_or(0.0);
                tend_wounds(&mut bodies, job, potency);
                index.release_all(agent);
                *doing = Doing::idle();
            }
        }
    }
}

fn take_portion(food: &mut Query<(&Thing, &mut FoodStock)>, source: ThingId) -> bool {
    food.iter_mut()
        .find(|(thing, _)| thing.0 == source)
        .is_some_and(|(_, mut stock)| {
            if stock.portions == 0 {
                return false;
            }
            stock.portions -= 1;
            true
        })
}

fn take_dose(medicine: &mut Query<(&Thing, &mut MedicineStock)>, source: ThingId) -> Option<f32> {
    let (_, mut stock) = medicine.iter_mut().find(|(thing, _)| thing.0 == source)?;
    if stock.count == 0 {
        return None;
    }
    stock.count -= 1;
    Some(stock.potency)
}

fn put_in_bed(
    bodies: &mut Query<(&Pawn, &mut Body)>,
    beds: &mut Query<(&Thing, &mut Bed)>,
    patient: PawnId,
    bed: ThingId,
) -> bool {
    let Some((_, mut slot)) = beds.iter_mut().find(|(thing, _)| thing.0 == bed) else {
        return false;
    };
    if slot.occupant.is_some_and(|o| o != patient) {
        return false;
    }
    let Some((_, mut body)) = bodies.iter_mut().find(|(pawn, _)| pawn.0 == patient) else {
        return false;
    };
    if body.dead {
        return false;
    }
    slot.occupant = Some(patient);
    body.posture = Posture::LyingInBed;
    true
}

fn tend_wounds(bodies: &mut Query<(&Pawn, &mut Body)>, job: TendJob, potency: f32) {
    let Some((_, mut body)) = bodies.iter_mut().find(|(pawn, _)| pawn.0 == job.patient) else {
        return;
    };
    if body.dead {
        return;
    }
    for wound in body.wounds.iter_mut().filter(|w| !w.tended) {
        wound.tended = true;
        wound.severity *= 1.0 - potency.clamp(0.0, 1.0);
    }
}
