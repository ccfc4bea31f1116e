//! Patient Types
//!
//! Read-only snapshot of anything bearing medical conditions.

use serde::{Deserialize, Serialize};

use crate::ids::{PawnId, ZoneId};

/// Physical posture, ordered from upright to most prone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Posture {
    #[default]
    Standing,
    /// Being carried by another pawn
    Carried,
    LyingOnGround,
    LyingInBed,
}

impl Posture {
    pub fn is_prone(self) -> bool {
        matches!(self, Posture::LyingOnGround | Posture::LyingInBed)
    }

    pub fn in_bed(self) -> bool {
        self == Posture::LyingInBed
    }
}

/// A single medical affliction. Owned and mutated by the host only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Category name, matched against the emergency set
    pub def_name: String,
    /// Can be treated right now
    pub tendable_now: bool,
}

impl Condition {
    pub fn new(def_name: impl Into<String>, tendable_now: bool) -> Self {
        Self {
            def_name: def_name.into(),
            tendable_now,
        }
    }

    pub fn tendable(def_name: impl Into<String>) -> Self {
        Self::new(def_name, true)
    }
}

/// Snapshot of a patient, as read from the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientState {
    pub id: PawnId,
    pub zone: Option<ZoneId>,
    pub humanlike: bool,
    pub dead: bool,
    /// Non-biological; never needs tending
    pub synthetic: bool,
    pub conditions: Vec<Condition>,
    pub posture: Posture,
    /// Host's general "should be tended now by the player" signal
    pub should_be_tended: bool,
    /// The caregiving faction is responsible for this patient's care
    pub receives_player_care: bool,
    pub wants_rescue: bool,
    pub incapacitated: bool,
    /// Aggressive mental state; unsafe to approach
    pub hostile_state: bool,
}

impl PatientState {
    pub fn new(id: PawnId) -> Self {
        Self {
            id,
            zone: None,
            humanlike: true,
            dead: false,
            synthetic: false,
            conditions: Vec::new(),
            posture: Posture::Standing,
            should_be_tended: false,
            receives_player_care: true,
            wants_rescue: false,
            incapacitated: false,
            hostile_state: false,
        }
    }

    pub fn in_zone(mut self, zone: ZoneId) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_posture(mut self, posture: Posture) -> Self {
        self.posture = posture;
        self
    }

    pub fn in_bed(&self) -> bool {
        self.posture.in_bed()
    }

    pub fn is_carried(&self) -> bool {
        self.posture == Posture::Carried
    }
}
