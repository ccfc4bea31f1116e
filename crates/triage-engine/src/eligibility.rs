//! Eligibility Rules
//!
//! Pure predicates over host snapshots: who may give care, who needs it, and
//! who can be moved to a bed. None of these panic; a host fault while reading
//! a pawn is reported as an ineligibility reason instead.

use triage_types::{AgentState, HealthState, PatientState, PawnId, PawnKind};

use crate::config::PolicyConfig;
use crate::error::HostError;
use crate::host::TriageHost;

/// Why an agent cannot act as a caregiver right now
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Ineligible {
    #[error("not under player control")]
    NotPlayerControlled,
    #[error("{0} pawns never give care")]
    ExcludedKind(String),
    #[error("caregiving disabled")]
    CaregivingDisabled,
    #[error("caregiving priority {priority} is above threshold {threshold}")]
    PriorityAboveThreshold { priority: u8, threshold: u8 },
    #[error("not mobile")]
    NotMobile,
    #[error("restrained")]
    Restrained,
    #[error("drafted")]
    Drafted,
    #[error("in a mental state")]
    MentalState,
    #[error("host fault: {0}")]
    HostFault(#[from] HostError),
}

/// Checks whether an agent may act as a caregiver.
pub fn check_caregiver(agent: &AgentState, policy: &PolicyConfig) -> Result<(), Ineligible> {
    if !agent.player_controlled {
        return Err(Ineligible::NotPlayerControlled);
    }
    if agent.kind == PawnKind::Animal {
        return Err(Ineligible::ExcludedKind("animal".to_string()));
    }
    if policy.is_excluded_kind(&agent.kind_def) {
        return Err(Ineligible::ExcludedKind(agent.kind_def.clone()));
    }

    let threshold = policy.caregiving_priority_threshold;
    if agent.caregiving_priority == 0 {
        return Err(Ineligible::CaregivingDisabled);
    }
    if agent.caregiving_priority > threshold {
        return Err(Ineligible::PriorityAboveThreshold {
            priority: agent.caregiving_priority,
            threshold,
        });
    }

    if agent.health != HealthState::Mobile {
        return Err(Ineligible::NotMobile);
    }
    if agent.restrained {
        return Err(Ineligible::Restrained);
    }
    if agent.drafted {
        return Err(Ineligible::Drafted);
    }
    if agent.in_mental_state {
        return Err(Ineligible::MentalState);
    }
    Ok(())
}

pub fn is_eligible_caregiver(agent: &AgentState, policy: &PolicyConfig) -> bool {
    check_caregiver(agent, policy).is_ok()
}

/// Reads an agent from the host and checks it in one step.
///
/// A failed lookup becomes [`Ineligible::HostFault`]; the reason is logged
/// only when verbose diagnostics are on.
pub fn load_caregiver<H: TriageHost + ?Sized>(
    host: &H,
    id: PawnId,
    policy: &PolicyConfig,
) -> Result<AgentState, Ineligible> {
    let agent = host.agent(id).map_err(|err| {
        diag!(policy, agent = %id, error = %err, "caregiver lookup failed");
        Ineligible::from(err)
    })?;
    check_caregiver(&agent, policy)?;
    Ok(agent)
}

pub fn has_treatable_condition(patient: &PatientState) -> bool {
    if patient.dead || patient.synthetic {
        return false;
    }
    patient.conditions.iter().any(|c| c.tendable_now)
}

/// Whether the patient needs care now rather than whenever convenient.
pub fn is_emergency(patient: &PatientState, policy: &PolicyConfig) -> bool {
    if policy.include_sickness {
        return patient.should_be_tended;
    }
    let has_emergency = patient
        .conditions
        .iter()
        .any(|c| c.tendable_now && policy.is_emergency_condition(&c.def_name));
    has_emergency && patient.receives_player_care
}

/// Whether the patient can be treated where it is.
///
/// Pass `None` for the caregiver when no particular caregiver is in mind.
pub fn good_posture_for_tend(patient: &PatientState, caregiver: Option<PawnId>) -> bool {
    if caregiver == Some(patient.id) {
        return true;
    }
    if patient.humanlike {
        return patient.in_bed();
    }
    patient.posture.is_prone()
}

/// Whether the patient is a valid rescue target.
pub fn can_be_rescued<H: TriageHost + ?Sized>(
    patient: &PatientState,
    policy: &PolicyConfig,
    host: &H,
) -> bool {
    if !patient.wants_rescue || !patient.receives_player_care || !patient.incapacitated {
        return false;
    }
    if policy.rescue_requires_no_threat && host.hostile_threat_near(patient.id, policy.threat_radius)
    {
        return false;
    }
    true
}
