//! Shared data types for the priority triage engine.
//!
//! This crate contains pure data structures with no decision logic: the
//! snapshots a host hands to the engine, and the actions the engine hands
//! back. It is a dependency for all other crates in the workspace.

pub mod action;
pub mod ids;
pub mod patient;
pub mod pawn;
pub mod record;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

// Re-export id types
pub use ids::{PawnId, ThingId, ZoneId};

// Re-export agent types
pub use pawn::{ActivityKind, AgentState, CurrentActivity, HealthState, HungerLevel, PawnKind};

// Re-export patient types
pub use patient::{Condition, PatientState, Posture};

// Re-export action types
pub use action::{Action, CallSite, TendJob};

// Re-export record types
pub use record::{DecisionKind, DecisionRecord};
