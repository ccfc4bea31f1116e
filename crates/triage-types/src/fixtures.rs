//! Sample data fixtures for testing.
//!
//! Ready-made agents and patients for other crates' tests. Enable the
//! `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // triage-types = { path = "../triage-types", features = ["test-fixtures"] }
//!
//! use triage_types::fixtures;
//!
//! let doctor = fixtures::idle_doctor(1, fixtures::HOME);
//! let patient = fixtures::bedded_patient(2, fixtures::HOME, "Gunshot");
//! ```

use crate::{
    ActivityKind, AgentState, Condition, CurrentActivity, PatientState, PawnId, Posture, ZoneId,
};

/// The zone most fixtures live in
pub const HOME: ZoneId = ZoneId(0);

/// An eligible, idle, fed caregiver with doctoring priority 1.
pub fn idle_doctor(id: u64, zone: ZoneId) -> AgentState {
    AgentState::new(PawnId(id), format!("doctor_{id}"))
        .in_zone(zone)
        .with_activity(CurrentActivity::new(ActivityKind::Idle))
}

/// A humanlike patient lying in bed with one tendable condition.
pub fn bedded_patient(id: u64, zone: ZoneId, condition: &str) -> PatientState {
    PatientState::new(PawnId(id))
        .in_zone(zone)
        .with_condition(Condition::tendable(condition))
        .with_posture(Posture::LyingInBed)
}

/// A humanlike patient downed on the ground, asking to be rescued.
pub fn downed_patient(id: u64, zone: ZoneId, condition: &str) -> PatientState {
    let mut patient = PatientState::new(PawnId(id))
        .in_zone(zone)
        .with_condition(Condition::tendable(condition))
        .with_posture(Posture::LyingOnGround);
    patient.incapacitated = true;
    patient.wants_rescue = true;
    patient
}

/// A wounded animal lying down outside any bed.
pub fn downed_animal(id: u64, zone: ZoneId, condition: &str) -> PatientState {
    let mut patient = downed_patient(id, zone, condition);
    patient.humanlike = false;
    patient.wants_rescue = false;
    patient
}
