//! Priority triage: decides which caregivers drop what they are doing to
//! treat which patients.
//!
//! The engine sits inside a host simulation it does not control. The host
//! owns movement, pathing, combat and all world state; the engine reads that
//! state at a handful of callback points and answers with at most one
//! [`Action`] per agent.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐  zone tick / busy check / rare tick / wake   ┌──────────────┐
//! │   host   │ ───────────────────────────────────────────▶ │ TriageEngine │
//! │ (world)  │ ◀─────────────────────────────────────────── │  pools+policy│
//! └──────────┘        Action / wake verdict                 └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`]: `PolicyConfig`, loaded from TOML and passed in explicitly
//! - [`host`]: the contract a host implements so the engine can read it
//! - [`eligibility`]: caregiver and patient predicates
//! - [`pool`]: per-zone candidate cache with refresh cadence
//! - [`synthesizer`]: the override hierarchy that turns a candidate into an action
//! - [`hooks`]: the trigger call sites, as a hook table the host drives

/// Emit a debug diagnostic only when the policy asks for verbose output.
macro_rules! diag {
    ($policy:expr, $($arg:tt)+) => {
        if $policy.verbose_diagnostics {
            tracing::debug!($($arg)+);
        }
    };
}

pub mod config;
pub mod eligibility;
pub mod error;
pub mod hooks;
pub mod host;
pub mod pool;
pub mod synthesizer;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{default_config_toml, ConfigError, HungerCheck, PolicyConfig};
pub use eligibility::{
    can_be_rescued, check_caregiver, good_posture_for_tend, has_treatable_condition,
    is_eligible_caregiver, is_emergency, load_caregiver, Ineligible,
};
pub use error::HostError;
pub use hooks::{TriageEngine, TriageHooks};
pub use host::{ReservationTarget, TriageHost};
pub use pool::{CandidatePool, PoolState};
pub use synthesizer::{make_decision, select_patient, should_wake, Skip};

pub use triage_types::{Action, CallSite, TendJob};
