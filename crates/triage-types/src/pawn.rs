//! Agent Types
//!
//! Read-only snapshot of an agent as the host reports it at a callback point.

use serde::{Deserialize, Serialize};

use crate::ids::{PawnId, ZoneId};

/// Broad body plan of a pawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PawnKind {
    #[default]
    Humanlike,
    Mechanoid,
    Animal,
}

/// Coarse health/mobility state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    #[default]
    Mobile,
    Downed,
    Dead,
}

/// Abstracted hunger level, ordered from fed to starving
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HungerLevel {
    #[default]
    Fed,
    Hungry,
    UrgentlyHungry,
    Starving,
}

impl HungerLevel {
    /// Hungry enough that the caregiver should eat before a triage run
    pub fn is_urgent(self) -> bool {
        self >= HungerLevel::UrgentlyHungry
    }
}

/// What an agent is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityKind {
    #[default]
    Idle,
    Sleeping,
    Resting,
    Eating,
    Tending,
    Rescuing,
    OfferingHelp,
    Firefighting,
    Fighting,
    Working,
    /// Lying in bed as the subject of a surgery bill
    AwaitingSurgery { emergency: bool },
    Other,
}

impl ActivityKind {
    /// Activities that are already part of a caregiving run
    pub fn is_caregiving(self) -> bool {
        matches!(
            self,
            ActivityKind::Tending
                | ActivityKind::Rescuing
                | ActivityKind::OfferingHelp
                | ActivityKind::Firefighting
        )
    }

    /// Activities the wake check applies to
    pub fn is_resting(self) -> bool {
        matches!(self, ActivityKind::Sleeping | ActivityKind::Resting)
    }
}

/// The activity an agent is executing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentActivity {
    pub kind: ActivityKind,
    /// Ordered directly by the player; never silently overridden
    pub player_forced: bool,
    /// Whether the host allows ending this activity early
    pub interruptible: bool,
}

impl CurrentActivity {
    pub fn new(kind: ActivityKind) -> Self {
        Self {
            kind,
            player_forced: false,
            interruptible: true,
        }
    }

    pub fn forced(mut self) -> Self {
        self.player_forced = true;
        self
    }

    pub fn uninterruptible(mut self) -> Self {
        self.interruptible = false;
        self
    }
}

/// Snapshot of an agent, as read from the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub id: PawnId,
    pub name: String,
    /// Zone the agent is spawned in, if any
    pub zone: Option<ZoneId>,
    pub kind: PawnKind,
    /// Host definition name (e.g. "Colonist", "Dryad_Basic")
    pub kind_def: String,
    /// Colonist or colony mech under player control
    pub player_controlled: bool,
    /// Doctoring work priority: 1 is most willing, 0 disables
    pub caregiving_priority: u8,
    /// The player allows this agent to treat itself
    pub self_tend: bool,
    pub health: HealthState,
    pub restrained: bool,
    /// Drafted by the player
    pub drafted: bool,
    /// In a compulsory behavioural override (mental break)
    pub in_mental_state: bool,
    /// Executing an assigned group duty, e.g. travelling with a caravan
    pub on_duty: bool,
    /// The player has queued an explicit order for later
    pub queued_player_directive: bool,
    pub hunger: HungerLevel,
    /// Carries at least one condition of its own
    pub injured: bool,
    pub activity: Option<CurrentActivity>,
}

impl AgentState {
    pub fn new(id: PawnId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            zone: None,
            kind: PawnKind::Humanlike,
            kind_def: "Colonist".to_string(),
            player_controlled: true,
            caregiving_priority: 1,
            self_tend: false,
            health: HealthState::Mobile,
            restrained: false,
            drafted: false,
            in_mental_state: false,
            on_duty: false,
            queued_player_directive: false,
            hunger: HungerLevel::Fed,
            injured: false,
            activity: None,
        }
    }

    pub fn in_zone(mut self, zone: ZoneId) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn with_activity(mut self, activity: CurrentActivity) -> Self {
        self.activity = Some(activity);
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.caregiving_priority = priority;
        self
    }

    pub fn with_hunger(mut self, hunger: HungerLevel) -> Self {
        self.hunger = hunger;
        self
    }

    /// Kind of the current activity, `Idle` when the host reports none
    pub fn activity_kind(&self) -> ActivityKind {
        self.activity.map(|a| a.kind).unwrap_or(ActivityKind::Idle)
    }

    pub fn is_resting(&self) -> bool {
        self.activity_kind().is_resting()
    }
}
