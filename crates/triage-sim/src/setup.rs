//! World Setup
//!
//! Spawns each zone's pawns and fixtures from a [`ScenarioConfig`] and a
//! seeded RNG.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;
use triage_types::{PawnId, Posture, ThingId, ZoneId};

use crate::components::{
    Bed, Body, Caregiver, Doing, FoodStock, InZone, MedicineStock, Pawn, PawnName, Position,
    Satiety, Status, Thing, Wound,
};
use crate::config::ScenarioConfig;

const FIRST_NAMES: &[&str] = &[
    "Mira", "Oren", "Tamsin", "Ilya", "Bex", "Corra", "Dag", "Ysolde", "Fenn", "Hale", "Juno",
    "Kestrel", "Lark", "Nim", "Pell", "Rook",
];

const WOUNDS: &[&str] = &["Gunshot", "Stab", "Cut", "Burn", "Crush", "Bite"];

/// Counts of what was spawned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnSummary {
    pub caregivers: usize,
    pub patients: usize,
    pub animals: usize,
    pub hostiles: usize,
    pub beds: usize,
}

struct Ids {
    next_pawn: u64,
    next_thing: u64,
}

impl Ids {
    fn pawn(&mut self) -> PawnId {
        let id = PawnId(self.next_pawn);
        self.next_pawn += 1;
        id
    }

    fn thing(&mut self) -> ThingId {
        let id = ThingId(self.next_thing);
        self.next_thing += 1;
        id
    }
}

/// Spawn every zone in the scenario
pub fn spawn_scenario(world: &mut World, config: &ScenarioConfig, rng: &mut SmallRng) -> SpawnSummary {
    let mut ids = Ids {
        next_pawn: 1,
        next_thing: 1_000,
    };
    let mut summary = SpawnSummary::default();

    for z in 0..config.zones {
        let zone = ZoneId(z);
        let place = |rng: &mut SmallRng| {
            Position::new(
                rng.gen_range(0.0..config.zone_size),
                rng.gen_range(0.0..config.zone_size),
            )
        };

        let mut free_beds = Vec::new();
        for _ in 0..config.beds_per_zone {
            let pos = place(rng);
            let entity = world
                .spawn((Thing(ids.thing()), InZone(zone), pos, Bed::default()))
                .id();
            free_beds.push(entity);
            summary.beds += 1;
        }
        if config.food_portions_per_zone > 0 {
            let pos = place(rng);
            world.spawn((
                Thing(ids.thing()),
                InZone(zone),
                pos,
                FoodStock {
                    portions: config.food_portions_per_zone,
                },
            ));
        }
        if config.medicine_per_zone > 0 {
            let pos = place(rng);
            world.spawn((
                Thing(ids.thing()),
                InZone(zone),
                pos,
                MedicineStock {
                    potency: rng.gen_range(0.3..0.8),
                    count: config.medicine_per_zone,
                },
            ));
        }

        for _ in 0..config.caregivers_per_zone {
            let id = ids.pawn();
            let pos = place(rng);
            // Most colonists doctor at priority 1; a few only at 2.
            let priority = if rng.gen::<f32>() < 0.75 { 1 } else { 2 };
            world.spawn((
                Pawn(id),
                PawnName(pick_name(rng)),
                InZone(zone),
                pos,
                Body::colonist(),
                Status::default(),
                Caregiver::colonist(priority),
                Doing::idle(),
                Satiety(rng.gen_range(0.4..1.0)),
            ));
            summary.caregivers += 1;
        }

        for _ in 0..config.mechs_per_zone {
            let id = ids.pawn();
            let pos = place(rng);
            world.spawn((
                Pawn(id),
                PawnName(format!("Mech-{}", id.0)),
                InZone(zone),
                pos,
                Body::mech(),
                Status::default(),
                Caregiver::mech("Mech_Tunneler"),
                Doing::idle(),
            ));
            summary.caregivers += 1;
        }

        for _ in 0..config.patients_per_zone {
            let id = ids.pawn();
            let pos = place(rng);
            let wound = WOUNDS[rng.gen_range(0..WOUNDS.len())];
            let mut body = Body::colonist().with_wound(Wound::new(wound, rng.gen_range(0.2..0.9)));
            if body.severity() >= crate::components::DOWNED_SEVERITY {
                body.posture = Posture::LyingOnGround;
            }
            // Some of the wounded already lie in a bed.
            if body.posture == Posture::Standing {
                if let Some(bed) = free_beds.pop() {
                    body.posture = Posture::LyingInBed;
                    if let Some(mut slot) = world.get_mut::<Bed>(bed) {
                        slot.occupant = Some(id);
                    }
                }
            }
            world.spawn((
                Pawn(id),
                PawnName(pick_name(rng)),
                InZone(zone),
                pos,
                body,
                Status::default(),
            ));
            summary.patients += 1;
        }

        for _ in 0..config.animals_per_zone {
            let id = ids.pawn();
            let pos = place(rng);
            let mut body = Body::animal().with_wound(Wound::new("Bite", rng.gen_range(0.2..0.5)));
            body.posture = Posture::LyingOnGround;
            world.spawn((
                Pawn(id),
                PawnName(format!("Muffalo-{}", id.0)),
                InZone(zone),
                pos,
                body,
            ));
            summary.animals += 1;
        }

        for _ in 0..config.hostiles_per_zone {
            let id = ids.pawn();
            let pos = place(rng);
            world.spawn((
                Pawn(id),
                PawnName(format!("Raider-{}", id.0)),
                InZone(zone),
                pos,
                Body::raider(),
            ));
            summary.hostiles += 1;
        }
    }

    summary
}

fn pick_name(rng: &mut SmallRng) -> String {
    FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())].to_string()
}
