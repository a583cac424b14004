use std::fmt::Display;

use uuid::Uuid;

use crate::event::EventKind;

/// Everything the manager can do to a live match.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchAction {
    StartClock,
    StopClock,
    AppendEvent(EventKind),
    RemoveLastEvent,
    RemoveEvent(Uuid),
    TriggerHalfTime,
    EndMatch,
}

impl MatchAction {
    /// Actions worth persisting straight away instead of waiting for the next
    /// autosave window.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            MatchAction::RemoveLastEvent
                | MatchAction::RemoveEvent(_)
                | MatchAction::TriggerHalfTime
                | MatchAction::EndMatch
        )
    }
}

impl Display for MatchAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let string = match self {
            MatchAction::StartClock => "Start clock".to_string(),
            MatchAction::StopClock => "Stop clock".to_string(),
            MatchAction::AppendEvent(kind) => format!("Record {kind}"),
            MatchAction::RemoveLastEvent => "Undo last event".to_string(),
            MatchAction::RemoveEvent(id) => format!("Remove event {id}"),
            MatchAction::TriggerHalfTime => "Half time".to_string(),
            MatchAction::EndMatch => "End match".to_string(),
        };
        write!(f, "{}", string)
    }
}
