pub mod action;
pub mod clock;
pub mod error;
pub mod event;
pub mod match_state;
pub mod player;
pub mod roster;
pub mod season;
pub mod stats;
pub mod team;

pub use action::MatchAction;
pub use clock::{Clock, Period};
pub use error::MatchError;
pub use event::{CardType, EventKind, GoalType, MatchEvent, PenaltyOutcome};
pub use match_state::{reduce, Location, Match, MatchFormat, MatchSetup};
pub use player::Player;
pub use roster::{Lineup, RosterProjection};
pub use season::{PlayerSeason, SeasonStats};
pub use stats::{MatchStats, PlayerLine, Score};
pub use team::{MatchResult, Team};
