//! Host fault taxonomy.

use triage_types::PawnId;

/// A host query or request that could not be honoured.
///
/// None of these are fatal: the engine turns every one of them into
/// "no decision this cycle".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("unknown pawn {0}")]
    UnknownPawn(PawnId),
    #[error("pawn {0} is being destroyed")]
    Despawned(PawnId),
    #[error("reservation of {target} by {agent} was rejected")]
    ReservationRejected { agent: PawnId, target: String },
}
