//! World Index
//!
//! Snapshot of the ECS world, rebuilt every tick, that the triage engine
//! reads through [`TriageHost`]. Reservations live here too and outlast the
//! rebuild; they are released when the job holding them finishes.

use std::collections::{BTreeMap, HashMap};

use bevy_ecs::prelude::*;
use triage_engine::{HostError, ReservationTarget, TriageHost};
use triage_types::{AgentState, PatientState, PawnId, ThingId, ZoneId};

use crate::components::Position;

#[derive(Debug, Clone, Copy)]
struct Placed {
    zone: ZoneId,
    pos: Position,
}

#[derive(Resource, Debug, Default)]
pub struct WorldIndex {
    agents: BTreeMap<PawnId, AgentState>,
    patients: BTreeMap<PawnId, PatientState>,
    placement: HashMap<PawnId, Placed>,
    hostiles: Vec<Placed>,
    /// Unoccupied beds
    beds: Vec<(ThingId, Placed)>,
    /// Food sources with portions left
    food: Vec<(ThingId, Placed)>,
    medicine: Vec<(ThingId, ZoneId, f32)>,
    reservations: HashMap<ReservationTarget, PawnId>,
    /// Agents whose activity the engine ended this tick
    ended: Vec<PawnId>,
}

impl WorldIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all snapshot data (called before rebuilding). Reservations stay.
    pub fn clear(&mut self) {
        self.agents.clear();
        self.patients.clear();
        self.placement.clear();
        self.hostiles.clear();
        self.beds.clear();
        self.food.clear();
        self.medicine.clear();
    }

    pub fn add_pawn(&mut self, patient: PatientState, zone: ZoneId, pos: Position) {
        if patient.hostile_state && !patient.dead {
            self.hostiles.push(Placed { zone, pos });
        }
        self.placement.insert(patient.id, Placed { zone, pos });
        self.patients.insert(patient.id, patient);
    }

    pub fn add_agent(&mut self, agent: AgentState) {
        self.agents.insert(agent.id, agent);
    }

    pub fn add_bed(&mut self, id: ThingId, zone: ZoneId, pos: Position) {
        self.beds.push((id, Placed { zone, pos }));
    }

    pub fn add_food(&mut self, id: ThingId, zone: ZoneId, pos: Position) {
        self.food.push((id, Placed { zone, pos }));
    }

    pub fn add_medicine(&mut self, id: ThingId, zone: ZoneId, potency: f32) {
        self.medicine.push((id, zone, potency));
    }

    /// Agents in id order
    pub fn agent_ids(&self) -> Vec<PawnId> {
        self.agents.keys().copied().collect()
    }

    /// Zones with at least one pawn, in id order
    pub fn zones(&self) -> Vec<ZoneId> {
        let mut zones: Vec<ZoneId> = self.placement.values().map(|p| p.zone).collect();
        zones.sort();
        zones.dedup();
        zones
    }

    pub fn reserved_by(&self, target: ReservationTarget) -> Option<PawnId> {
        self.reservations.get(&target).copied()
    }

    /// Releases everything the agent holds.
    pub fn release_all(&mut self, agent: PawnId) {
        self.reservations.retain(|_, holder| *holder != agent);
    }

    pub fn release(&mut self, target: ReservationTarget) {
        self.reservations.remove(&target);
    }

    pub fn take_ended(&mut self) -> Vec<PawnId> {
        std::mem::take(&mut self.ended)
    }

    fn zone_of(&self, pawn: PawnId) -> Option<Placed> {
        self.placement.get(&pawn).copied()
    }

    fn held_by_other(&self, target: ReservationTarget, agent: PawnId) -> bool {
        self.reservations
            .get(&target)
            .is_some_and(|holder| *holder != agent)
    }
}

impl TriageHost for WorldIndex {
    fn agent(&self, id: PawnId) -> Result<AgentState, HostError> {
        self.agents.get(&id).cloned().ok_or(HostError::UnknownPawn(id))
    }

    fn patient(&self, id: PawnId) -> Result<PatientState, HostError> {
        self.patients.get(&id).cloned().ok_or(HostError::UnknownPawn(id))
    }

    fn zone_patients(&self, zone: ZoneId) -> Vec<PawnId> {
        self.patients
            .values()
            .filter(|p| p.zone == Some(zone) && !p.conditions.is_empty())
            .map(|p| p.id)
            .collect()
    }

    fn can_reserve_and_reach(&self, agent: PawnId, patient: PawnId) -> bool {
        let (Some(a), Some(p)) = (self.zone_of(agent), self.zone_of(patient)) else {
            return false;
        };
        a.zone == p.zone && !self.held_by_other(ReservationTarget::Pawn(patient), agent)
    }

    fn reserve(&mut self, agent: PawnId, target: ReservationTarget) -> Result<(), HostError> {
        if self.held_by_other(target, agent) {
            return Err(HostError::ReservationRejected {
                agent,
                target: target.to_string(),
            });
        }
        self.reservations.insert(target, agent);
        Ok(())
    }

    fn unreserve(&mut self, agent: PawnId, target: ReservationTarget) {
        if self.reserved_by(target) == Some(agent) {
            self.reservations.remove(&target);
        }
    }

    fn find_bed_for(&self, agent: PawnId, patient: PawnId) -> Option<ThingId> {
        let near = self.zone_of(patient)?;
        self.beds
            .iter()
            .filter(|(id, bed)| {
                bed.zone == near.zone && !self.held_by_other(ReservationTarget::Thing(*id), agent)
            })
            .min_by(|(a_id, a), (b_id, b)| {
                a.pos
                    .distance(&near.pos)
                    .total_cmp(&b.pos.distance(&near.pos))
                    .then(a_id.cmp(b_id))
            })
            .map(|(id, _)| *id)
    }

    fn best_medicine_for(&self, agent: PawnId, _patient: PawnId) -> Option<ThingId> {
        let zone = self.zone_of(agent)?.zone;
        self.medicine
            .iter()
            .filter(|(_, z, _)| *z == zone)
            .max_by(|(a_id, _, a), (b_id, _, b)| a.total_cmp(b).then(b_id.cmp(a_id)))
            .map(|(id, _, _)| *id)
    }

    fn find_food_for(&self, agent: PawnId) -> Option<ThingId> {
        let here = self.zone_of(agent)?;
        self.food
            .iter()
            .filter(|(_, food)| food.zone == here.zone)
            .min_by(|(a_id, a), (b_id, b)| {
                a.pos
                    .distance(&here.pos)
                    .total_cmp(&b.pos.distance(&here.pos))
                    .then(a_id.cmp(b_id))
            })
            .map(|(id, _)| *id)
    }

    fn hostile_threat_near(&self, patient: PawnId, radius: f32) -> bool {
        let Some(at) = self.zone_of(patient) else {
            return false;
        };
        self.hostiles
            .iter()
            .any(|h| h.zone == at.zone && h.pos.distance(&at.pos) <= radius)
    }

    fn end_activity(&mut self, agent: PawnId) {
        self.ended.push(agent);
        if let Some(state) = self.agents.get_mut(&agent) {
            state.activity = None;
        }
    }
}
