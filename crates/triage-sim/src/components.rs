//! ECS Components
//!
//! Pawns, their bodies and routines, and the fixtures they use.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use triage_types::{
    Action, ActivityKind, Condition, CurrentActivity, HealthState, HungerLevel, PawnId, PawnKind,
    Posture, ThingId, ZoneId,
};

/// Total wound severity at which a pawn can no longer stand
pub const DOWNED_SEVERITY: f32 = 0.6;
/// Total wound severity at which a pawn dies
pub const LETHAL_SEVERITY: f32 = 1.5;

/// Identifies an entity as a pawn
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pawn(pub PawnId);

#[derive(Component, Debug, Clone)]
pub struct PawnName(pub String);

/// Zone an entity belongs to
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InZone(pub ZoneId);

#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Work settings for a pawn the colony can order around
#[derive(Component, Debug, Clone)]
pub struct Caregiver {
    pub kind: PawnKind,
    pub kind_def: String,
    /// 0 disables caregiving, 1 is the most eager
    pub priority: u8,
    pub self_tend: bool,
}

impl Caregiver {
    pub fn colonist(priority: u8) -> Self {
        Self {
            kind: PawnKind::Humanlike,
            kind_def: "Colonist".to_string(),
            priority,
            self_tend: false,
        }
    }

    pub fn mech(kind_def: impl Into<String>) -> Self {
        Self {
            kind: PawnKind::Mechanoid,
            kind_def: kind_def.into(),
            priority: 1,
            self_tend: false,
        }
    }
}

/// Player-side constraints on a pawn
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Status {
    pub drafted: bool,
    pub restrained: bool,
    pub in_mental_state: bool,
    pub on_duty: bool,
    pub queued_player_directive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wound {
    pub def_name: String,
    pub severity: f32,
    pub tended: bool,
}

impl Wound {
    pub fn new(def_name: impl Into<String>, severity: f32) -> Self {
        Self {
            def_name: def_name.into(),
            severity,
            tended: false,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Body {
    pub humanlike: bool,
    /// Mechanoids and the like; wounds never need tending
    pub synthetic: bool,
    /// Belongs to the player's colony
    pub colony: bool,
    pub hostile: bool,
    pub dead: bool,
    pub posture: Posture,
    pub wounds: Vec<Wound>,
}

impl Body {
    pub fn colonist() -> Self {
        Self {
            humanlike: true,
            synthetic: false,
            colony: true,
            hostile: false,
            dead: false,
            posture: Posture::Standing,
            wounds: Vec::new(),
        }
    }

    pub fn animal() -> Self {
        Self {
            humanlike: false,
            ..Self::colonist()
        }
    }

    pub fn mech() -> Self {
        Self {
            synthetic: true,
            humanlike: false,
            ..Self::colonist()
        }
    }

    pub fn raider() -> Self {
        Self {
            colony: false,
            hostile: true,
            ..Self::colonist()
        }
    }

    pub fn with_wound(mut self, wound: Wound) -> Self {
        self.wounds.push(wound);
        self
    }

    pub fn severity(&self) -> f32 {
        self.wounds.iter().map(|w| w.severity).sum()
    }

    pub fn health(&self) -> HealthState {
        if self.dead {
            HealthState::Dead
        } else if self.severity() >= DOWNED_SEVERITY {
            HealthState::Downed
        } else {
            HealthState::Mobile
        }
    }

    pub fn is_injured(&self) -> bool {
        !self.wounds.is_empty()
    }

    pub fn needs_tending(&self) -> bool {
        self.wounds.iter().any(|w| !w.tended)
    }

    pub fn conditions(&self) -> Vec<Condition> {
        self.wounds
            .iter()
            .map(|w| Condition::new(w.def_name.clone(), !w.tended))
            .collect()
    }
}

/// Hunger meter; 1.0 is full
#[derive(Component, Debug, Clone, Copy)]
pub struct Satiety(pub f32);

impl Satiety {
    pub fn level(&self) -> HungerLevel {
        if self.0 > 0.3 {
            HungerLevel::Fed
        } else if self.0 > 0.15 {
            HungerLevel::Hungry
        } else if self.0 > 0.0 {
            HungerLevel::UrgentlyHungry
        } else {
            HungerLevel::Starving
        }
    }
}

impl Default for Satiety {
    fn default() -> Self {
        Self(1.0)
    }
}

/// What a pawn is doing right now
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Doing {
    pub activity: CurrentActivity,
    /// Triage job being executed, if any
    pub job: Option<Action>,
    /// Tick at which the activity finishes
    pub until: u64,
}

impl Doing {
    pub fn idle() -> Self {
        Self {
            activity: CurrentActivity::new(ActivityKind::Idle),
            job: None,
            until: 0,
        }
    }

    pub fn routine(kind: ActivityKind, until: u64) -> Self {
        Self {
            activity: CurrentActivity::new(kind),
            job: None,
            until,
        }
    }

    pub fn job(action: Action, until: u64) -> Self {
        let kind = match action {
            Action::None => ActivityKind::Idle,
            Action::Eat { .. } => ActivityKind::Eating,
            Action::Rescue { .. } => ActivityKind::Rescuing,
            Action::Tend(_) => ActivityKind::Tending,
        };
        Self {
            activity: CurrentActivity::new(kind),
            job: Some(action),
            until,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.activity.kind == ActivityKind::Idle
    }
}

impl Default for Doing {
    fn default() -> Self {
        Self::idle()
    }
}

/// Identifies an entity as a non-pawn thing
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Thing(pub ThingId);

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Bed {
    pub occupant: Option<PawnId>,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct FoodStock {
    pub portions: u32,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct MedicineStock {
    /// Fraction of a wound's severity removed by one dose
    pub potency: f32,
    pub count: u32,
}
