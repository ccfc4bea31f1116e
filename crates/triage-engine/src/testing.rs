//! In-memory host used by the unit tests.

use std::collections::{BTreeMap, HashMap, HashSet};

use triage_types::{AgentState, PatientState, PawnId, ThingId, ZoneId};

use crate::error::HostError;
use crate::host::{ReservationTarget, TriageHost};

#[derive(Debug, Clone, Default)]
pub struct MockHost {
    pub agents: BTreeMap<PawnId, AgentState>,
    pub patients: Vec<PatientState>,
    /// Pawns whose lookups fail as if mid-destruction
    pub broken: HashSet<PawnId>,
    /// (agent, patient) pairs that cannot reach each other
    pub unreachable: HashSet<(PawnId, PawnId)>,
    pub beds: Vec<ThingId>,
    pub medicine: Option<ThingId>,
    pub food: Option<ThingId>,
    pub threatened: HashSet<PawnId>,
    /// Targets the reservation system refuses outright
    pub reject_reservations: HashSet<ReservationTarget>,
    pub reservations: HashMap<ReservationTarget, PawnId>,
    pub ended: Vec<PawnId>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent(mut self, agent: AgentState) -> Self {
        self.agents.insert(agent.id, agent);
        self
    }

    pub fn with_patient(mut self, patient: PatientState) -> Self {
        self.patients.push(patient);
        self
    }

    pub fn with_bed(mut self, bed: u64) -> Self {
        self.beds.push(ThingId(bed));
        self
    }

    pub fn patient_mut(&mut self, id: PawnId) -> Option<&mut PatientState> {
        self.patients.iter_mut().find(|p| p.id == id)
    }
}

impl TriageHost for MockHost {
    fn agent(&self, id: PawnId) -> Result<AgentState, HostError> {
        if self.broken.contains(&id) {
            return Err(HostError::Despawned(id));
        }
        self.agents.get(&id).cloned().ok_or(HostError::UnknownPawn(id))
    }

    fn patient(&self, id: PawnId) -> Result<PatientState, HostError> {
        if self.broken.contains(&id) {
            return Err(HostError::Despawned(id));
        }
        self.patients
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(HostError::UnknownPawn(id))
    }

    fn zone_patients(&self, zone: ZoneId) -> Vec<PawnId> {
        self.patients
            .iter()
            .filter(|p| p.zone == Some(zone) && !p.conditions.is_empty())
            .map(|p| p.id)
            .collect()
    }

    fn can_reserve_and_reach(&self, agent: PawnId, patient: PawnId) -> bool {
        if self.unreachable.contains(&(agent, patient)) {
            return false;
        }
        match self.reservations.get(&ReservationTarget::Pawn(patient)) {
            Some(holder) => *holder == agent,
            None => true,
        }
    }

    fn reserve(&mut self, agent: PawnId, target: ReservationTarget) -> Result<(), HostError> {
        if self.reject_reservations.contains(&target) {
            return Err(HostError::ReservationRejected {
                agent,
                target: target.to_string(),
            });
        }
        self.reservations.insert(target, agent);
        Ok(())
    }

    fn unreserve(&mut self, agent: PawnId, target: ReservationTarget) {
        if self.reservations.get(&target) == Some(&agent) {
            self.reservations.remove(&target);
        }
    }

    fn find_bed_for(&self, _agent: PawnId, _patient: PawnId) -> Option<ThingId> {
        self.beds
            .iter()
            .copied()
            .find(|bed| !self.reservations.contains_key(&ReservationTarget::Thing(*bed)))
    }

    fn best_medicine_for(&self, _agent: PawnId, _patient: PawnId) -> Option<ThingId> {
        self.medicine
    }

    fn find_food_for(&self, _agent: PawnId) -> Option<ThingId> {
        self.food
    }

    fn hostile_threat_near(&self, patient: PawnId, _radius: f32) -> bool {
        self.threatened.contains(&patient)
    }

    fn end_activity(&mut self, agent: PawnId) {
        self.ended.push(agent);
        if let Some(state) = self.agents.get_mut(&agent) {
            state.activity = None;
        }
    }
}
