use crate::betting::ActionError;
use crate::config::ConfigError;
use crate::hand::HandError;
use crate::participant::ParticipantId;
use crate::table::Street;

/// Table-level failures.
///
/// `InvalidAction` is recoverable: the caller re-prompts or folds the seat.
/// `InsufficientRoster` ends the session. `DeckExhausted` is a logic error
/// that fixed table sizes rule out; it is still reported instead of panicking.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid action: {0}")]
    InvalidAction(#[from] ActionError),
    #[error("not enough players to continue: {remaining} remaining, {required} required")]
    InsufficientRoster { remaining: usize, required: usize },
    #[error("deck exhausted")]
    DeckExhausted,
    #[error("betting is still open: {pending} participant(s) to act")]
    BettingOpen { pending: usize },
    #[error("hand cannot be settled during {0:?}")]
    NotSettleable(Street),
    #[error("a hand is already in progress")]
    HandInProgress,
    #[error("no hand in progress")]
    NoHandInProgress,
    #[error("{id} still holds {stack} chips and cannot rebuy")]
    RebuyNotAllowed { id: ParticipantId, stack: u64 },
    #[error("bad deal: {0}")]
    Deal(#[from] HandError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Errors after which the session cannot continue.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::InsufficientRoster { .. }
                | EngineError::DeckExhausted
                | EngineError::Deal(_)
                | EngineError::Config(_)
        )
    }
}
