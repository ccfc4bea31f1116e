//! Index System
//!
//! Rebuilds the [`WorldIndex`] snapshot from components.

use bevy_ecs::prelude::*;
use triage_types::{AgentState, HealthState, HungerLevel, PatientState};

use crate::components::{
    Bed, Body, Caregiver, Doing, FoodStock, InZone, MedicineStock, Pawn, PawnName, Position,
    Satiety, Status, Thing,
};
use crate::host::WorldIndex;

pub fn index_world(
    mut index: ResMut<WorldIndex>,
    pawns: Query<(
        &Pawn,
        &PawnName,
        &InZone,
        &Position,
        &Body,
        Option<&Status>,
        Option<&Caregiver>,
        Option<&Doing>,
        Option<&Satiety>,
    )>,
    beds: Query<(&Thing, &InZone, &Position, &Bed)>,
    food: Query<(&Thing, &InZone, &Position, &FoodStock)>,
    medicine: Query<(&Thing, &InZone, &MedicineStock)>,
) {
    index.clear();

    for (pawn, name, zone, pos, body, status, caregiver, doing, satiety) in pawns.iter() {
        index.add_pawn(patient_state(pawn, zone, body), zone.0, *pos);

        if let Some(caregiver) = caregiver {
            let status = status.copied().unwrap_or_default();
            let mut agent = AgentState::new(pawn.0, name.0.clone()).in_zone(zone.0);
            agent.kind = caregiver.kind;
            agent.kind_def = caregiver.kind_def.clone();
            agent.player_controlled = body.colony && !body.hostile;
            agent.caregiving_priority = caregiver.priority;
            agent.self_tend = caregiver.self_tend;
            agent.health = body.health();
            agent.restrained = status.restrained;
            agent.drafted = status.drafted;
            agent.in_mental_state = status.in_mental_state;
            agent.on_duty = status.on_duty;
            agent.queued_player_directive = status.queued_player_directive;
            agent.hunger = satiety.map_or(HungerLevel::Fed, Satiety::level);
            agent.injured = body.is_injured();
            agent.activity = doing.map(|d| d.activity);
            index.add_agent(agent);
        }
    }

    for (thing, zone, pos, bed) in beds.iter() {
        if bed.occupant.is_none() {
            index.add_bed(thing.0, zone.0, *pos);
        }
    }
    for (thing, zone, pos, stock) in food.iter() {
        if stock.portions > 0 {
            index.add_food(thing.0, zone.0, *pos);
        }
    }
    for (thing, zone, stock) in medicine.iter() {
        if stock.count > 0 {
            index.add_medicine(thing.0, zone.0, stock.potency);
        }
    }
}

fn patient_state(pawn: &Pawn, zone: &InZone, body: &Body) -> PatientState {
    let incapacitated = body.health() == HealthState::Downed;
    let mut patient = PatientState::new(pawn.0)
        .in_zone(zone.0)
        .with_posture(body.posture);
    patient.humanlike = body.humanlike;
    patient.dead = body.dead;
    patient.synthetic = body.synthetic;
    patient.conditions = body.conditions();
    patient.should_be_tended = !body.dead && body.needs_tending();
    patient.receives_player_care = body.colony;
    patient.incapacitated = incapacitated;
    patient.wants_rescue = body.colony && body.humanlike && incapacitated;
    patient.hostile_state = body.hostile;
    patient
}
