//! Decision Records
//!
//! One line of the append-only decision log written by a host.

use serde::{Deserialize, Serialize};

use crate::action::{Action, CallSite};
use crate::ids::{PawnId, ZoneId};

/// What the engine decided at one callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum DecisionKind {
    /// An action was handed to the host
    Dispatch { action: Action },
    /// A resting agent was told to get up
    Wake,
}

/// A logged decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub record_id: String,
    pub tick: u64,
    pub zone: Option<ZoneId>,
    pub agent: PawnId,
    pub agent_name: String,
    pub call_site: CallSite,
    #[serde(flatten)]
    pub kind: DecisionKind,
}

impl DecisionRecord {
    /// Serialize to a single JSONL line (no trailing newline)
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from a single JSONL line
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
