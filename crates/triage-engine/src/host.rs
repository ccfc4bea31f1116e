//! Host Contract
//!
//! Everything the engine needs to know about, or ask of, the host world.
//! Queries take `&self`; requests that change host state (reserving,
//! ending an activity) take `&mut self`.

use std::fmt;

use triage_types::{AgentState, PatientState, PawnId, ThingId, ZoneId};

use crate::error::HostError;

/// Something an agent can hold exclusively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationTarget {
    Pawn(PawnId),
    Thing(ThingId),
}

impl fmt::Display for ReservationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationTarget::Pawn(id) => write!(f, "{}", id),
            ReservationTarget::Thing(id) => write!(f, "{}", id),
        }
    }
}

/// The host simulation, as seen by the triage engine.
pub trait TriageHost {
    /// Current snapshot of an agent. Fails if the agent is gone or mid-destruction.
    fn agent(&self, id: PawnId) -> Result<AgentState, HostError>;

    /// Current snapshot of a patient. Fails if the pawn is gone or mid-destruction.
    fn patient(&self, id: PawnId) -> Result<PatientState, HostError>;

    /// Spawned pawns in the zone with at least one condition, in discovery order.
    fn zone_patients(&self, zone: ZoneId) -> Vec<PawnId>;

    /// Whether the agent could reserve the patient and path to it right now.
    fn can_reserve_and_reach(&self, agent: PawnId, patient: PawnId) -> bool;

    /// Reserve a target for the agent. Released by the host's own job machinery.
    fn reserve(&mut self, agent: PawnId, target: ReservationTarget) -> Result<(), HostError>;

    /// Give back a reservation the agent holds. Used when a decision is
    /// abandoned after part of its targets were reserved; a no-op if the
    /// agent does not hold the target.
    fn unreserve(&mut self, agent: PawnId, target: ReservationTarget);

    /// A bed the agent could carry the patient to, if any.
    fn find_bed_for(&self, agent: PawnId, patient: PawnId) -> Option<ThingId>;

    /// The best medicine the agent could bring to this patient, if any.
    fn best_medicine_for(&self, agent: PawnId, patient: PawnId) -> Option<ThingId>;

    /// A food source the agent could eat from, if any.
    fn find_food_for(&self, agent: PawnId) -> Option<ThingId>;

    /// Whether a hostile is within `radius` of the patient.
    fn hostile_threat_near(&self, patient: PawnId, radius: f32) -> bool;

    /// End the agent's current activity (a forced interrupt).
    fn end_activity(&mut self, agent: PawnId);
}
