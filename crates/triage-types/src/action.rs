//! Action Types
//!
//! The decision the engine returns to the host. Actions carry targets and
//! reservation intent only; the host executes movement and treatment.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{PawnId, ThingId};

/// Which host callback asked for the decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallSite {
    /// The host is about to pick the agent's next voluntary activity
    BusyCheck,
    /// Coarse periodic per-agent tick
    RareTick,
    /// The agent is resting and the host asks whether it should get up
    WakeCheck,
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallSite::BusyCheck => write!(f, "busy_check"),
            CallSite::RareTick => write!(f, "rare_tick"),
            CallSite::WakeCheck => write!(f, "wake_check"),
        }
    }
}

/// Treat a patient where it lies or in its bed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TendJob {
    pub patient: PawnId,
    /// Best available medicine; treatment may proceed without any
    pub medicine: Option<ThingId>,
    /// Treat on location because the patient cannot be moved to a bed
    pub in_place: bool,
}

/// A synthesized decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Keep doing whatever the agent is doing
    #[default]
    None,
    /// Eat before going on a triage run
    Eat { food: ThingId },
    /// Carry the patient to a bed, then run the queued tend
    Rescue {
        patient: PawnId,
        bed: ThingId,
        follow_up: TendJob,
    },
    Tend(TendJob),
}

impl Action {
    pub fn is_none(&self) -> bool {
        matches!(self, Action::None)
    }

    /// The patient this action dispatches the agent to, if any
    pub fn patient(&self) -> Option<PawnId> {
        match self {
            Action::Rescue { patient, .. } => Some(*patient),
            Action::Tend(job) => Some(job.patient),
            Action::None | Action::Eat { .. } => None,
        }
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Action::None => "none",
            Action::Eat { .. } => "eat",
            Action::Rescue { .. } => "rescue",
            Action::Tend(_) => "tend",
        }
    }
}
