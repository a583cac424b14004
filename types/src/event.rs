use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stats::Score;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    OpenPlay,
    Corner,
    FreeKick,
    Penalty,
}

impl Display for GoalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalType::OpenPlay => write!(f, "open play"),
            GoalType::Corner => write!(f, "corner"),
            GoalType::FreeKick => write!(f, "free kick"),
            GoalType::Penalty => write!(f, "penalty"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Yellow,
    Red,
    SecondYellow,
}

impl CardType {
    /// A second yellow removes the player exactly like a straight red.
    pub fn is_sending_off(self) -> bool {
        matches!(self, CardType::Red | CardType::SecondYellow)
    }
}

impl Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardType::Yellow => write!(f, "Yellow"),
            CardType::Red => write!(f, "Red"),
            CardType::SecondYellow => write!(f, "Second yellow"),
        }
    }
}

/// `Saved` and `Missed` are the same non-scoring outcome; both are kept so
/// that either spelling round-trips through storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyOutcome {
    Scored,
    Saved,
    Missed,
}

impl PenaltyOutcome {
    pub fn is_scored(self) -> bool {
        matches!(self, PenaltyOutcome::Scored)
    }
}

impl Display for PenaltyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PenaltyOutcome::Scored => write!(f, "scored"),
            PenaltyOutcome::Saved => write!(f, "saved"),
            PenaltyOutcome::Missed => write!(f, "missed"),
        }
    }
}

/// What happened, without the id and match time the ledger assigns on append.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    GoalFor {
        player_id: Option<Uuid>,
        assist_player_id: Option<Uuid>,
        goal_type: GoalType,
    },
    GoalAgainst {
        goal_type: GoalType,
    },
    Card {
        player_id: Uuid,
        card_type: CardType,
    },
    Substitution {
        player_off_id: Uuid,
        player_on_id: Uuid,
    },
    Penalty {
        is_for_team: bool,
        outcome: PenaltyOutcome,
        player_id: Option<Uuid>,
    },
}

impl EventKind {
    /// Contribution of this event to the running score.
    pub fn score_delta(&self) -> Score {
        match *self {
            EventKind::GoalFor { .. } => Score::new(1, 0),
            EventKind::GoalAgainst { .. } => Score::new(0, 1),
            EventKind::Penalty {
                is_for_team: true,
                outcome,
                ..
            } if outcome.is_scored() => Score::new(1, 0),
            EventKind::Penalty {
                is_for_team: false,
                outcome,
                ..
            } if outcome.is_scored() => Score::new(0, 1),
            _ => Score::default(),
        }
    }

    /// Every squad player the event refers to.
    pub fn player_ids(&self) -> Vec<Uuid> {
        match *self {
            EventKind::GoalFor {
                player_id,
                assist_player_id,
                ..
            } => player_id.into_iter().chain(assist_player_id).collect(),
            EventKind::GoalAgainst { .. } => vec![],
            EventKind::Card { player_id, .. } => vec![player_id],
            EventKind::Substitution {
                player_off_id,
                player_on_id,
            } => vec![player_off_id, player_on_id],
            EventKind::Penalty { player_id, .. } => player_id.into_iter().collect(),
        }
    }

    /// The player this event removes from the pitch without a replacement.
    pub fn sent_off_player(&self) -> Option<Uuid> {
        match *self {
            EventKind::Card {
                player_id,
                card_type,
            } if card_type.is_sending_off() => Some(player_id),
            _ => None,
        }
    }

    pub fn substitution(&self) -> Option<(Uuid, Uuid)> {
        match *self {
            EventKind::Substitution {
                player_off_id,
                player_on_id,
            } => Some((player_off_id, player_on_id)),
            _ => None,
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let string = match self {
            EventKind::GoalFor { goal_type, .. } => format!("Goal ({goal_type})"),
            EventKind::GoalAgainst { goal_type } => format!("Goal conceded ({goal_type})"),
            EventKind::Card { card_type, .. } => format!("{card_type} card"),
            EventKind::Substitution { .. } => "Substitution".to_string(),
            EventKind::Penalty {
                is_for_team,
                outcome,
                ..
            } => {
                let side = if *is_for_team { "for" } else { "against" };
                format!("Penalty {side}: {outcome}")
            }
        };
        write!(f, "{}", string)
    }
}

/// An immutable fact in the match ledger. `timestamp` is raw elapsed match
/// time in seconds, never half relative.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub id: Uuid,
    pub timestamp: u32,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl MatchEvent {
    pub fn new(kind: EventKind, timestamp: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            kind,
        }
    }
}

impl Display for MatchEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}s] {}", self.timestamp, self.kind)
    }
}
