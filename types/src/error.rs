use thiserror::Error;
use uuid::Uuid;

use crate::clock::Period;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Match is completed and can no longer be edited")]
    MatchCompleted,

    #[error("Cannot {action} during the {period}")]
    InvalidTransition { action: String, period: Period },

    #[error("Clock is stopped for half time, use the half-time control to resume")]
    ClockStoppedForHalfTime,

    #[error("Event not found: {0}")]
    EventNotFound(Uuid),

    #[error("No events to undo")]
    NothingToUndo,

    #[error("Invalid substitution: {0}")]
    InvalidSubstitution(String),

    #[error("Player is not in the match squad: {0}")]
    UnknownPlayer(Uuid),

    #[error("Player has already been sent off: {0}")]
    PlayerSentOff(Uuid),

    #[error("Invalid match setup: {0}")]
    InvalidSetup(String),
}
