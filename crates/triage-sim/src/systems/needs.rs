//! Needs System
//!
//! Hunger, bleeding, healing, death and fresh injuries.

use bevy_ecs::prelude::*;
use rand::Rng;
use triage_types::{HealthState, Posture};

use crate::components::{Bed, Body, Doing, Pawn, Satiety, Wound, LETHAL_SEVERITY};
use crate::config::TimingConfig;
use crate::host::WorldIndex;
use crate::SimRng;

/// Wounds a pawn can pick up; the last is ordinary sickness
const INJURIES: &[&str] = &["Cut", "Bruise", "Burn", "Scratch", "Bite", "Crush", "Flu"];

pub fn decay_satiety(timing: Res<TimingConfig>, mut query: Query<&mut Satiety>) {
    for mut satiety in query.iter_mut() {
        satiety.0 = (satiety.0 - timing.hunger_per_tick).max(0.0);
    }
}

/// Advances wounds, then settles posture, beds and interrupted jobs.
pub fn update_bodies(
    timing: Res<TimingConfig>,
    mut index: ResMut<WorldIndex>,
    mut pawns: Query<(&Pawn, &mut Body, Option<&mut Doing>)>,
    mut beds: Query<&mut Bed>,
) {
    for (pawn, mut body, doing) in pawns.iter_mut() {
        if body.dead {
            continue;
        }

        for wound in body.wounds.iter_mut() {
            if wound.tended {
                wound.severity -= timing.heal_per_tick;
            } else {
                wound.severity += timing.bleed_per_tick;
            }
        }
        body.wounds.retain(|w| w.severity > 0.0);

        if body.severity() >= LETHAL_SEVERITY {
            body.dead = true;
            tracing::info!(pawn = %pawn.0, "pawn died");
        }

        let in_bed = body.posture == Posture::LyingInBed;
        match body.health() {
            HealthState::Mobile if !body.is_injured() && in_bed => {
                free_bed(&mut beds, pawn.0);
                body.posture = Posture::Standing;
                tracing::debug!(pawn = %pawn.0, "patient discharged");
            }
            HealthState::Mobile if body.posture == Posture::LyingOnGround => {
                body.posture = Posture::Standing;
            }
            HealthState::Downed | HealthState::Dead if !in_bed => {
                body.posture = Posture::LyingOnGround;
            }
            _ => {}
        }

        if body.health() != HealthState::Mobile {
            if let Some(mut doing) = doing {
                if !doing.is_idle() {
                    index.release_all(pawn.0);
                    *doing = Doing::idle();
                }
            }
        }
    }
}

fn free_bed(beds: &mut Query<&mut Bed>, pawn: triage_types::PawnId) {
    for mut bed in beds.iter_mut() {
        if bed.occupant == Some(pawn) {
            bed.occupant = None;
        }
    }
}

/// Rolls fresh wounds for living, peaceful pawns in id order.
pub fn random_injuries(
    timing: Res<TimingConfig>,
    mut rng: ResMut<SimRng>,
    mut pawns: Query<(&Pawn, &mut Body)>,
) {
    if timing.injury_chance <= 0.0 {
        return;
    }
    let mut living: Vec<_> = pawns
        .iter_mut()
        .filter(|(_, body)| !body.dead && !body.hostile && !body.synthetic)
        .collect();
    living.sort_by_key(|(pawn, _)| pawn.0);

    for (pawn, mut body) in living {
        if rng.0.gen::<f32>() >= timing.injury_chance {
            continue;
        }
        let name = INJURIES[rng.0.gen_range(0..INJURIES.len())];
        let severity = rng.0.gen_range(0.1..0.7);
        tracing::debug!(pawn = %pawn.0, wound = name, severity, "pawn injured");
        body.wounds.push(Wound::new(name, severity));
    }
}
