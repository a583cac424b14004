use async_trait::async_trait;
use types::{Match, Team};
use uuid::Uuid;

use crate::DatabaseError;

/// Persistence gateway consumed by the match core. Saves are whole-snapshot
/// upserts, so the last write wins.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn load_match(&mut self, id: Uuid) -> Result<Option<Match>, DatabaseError>;
    async fn save_match(&mut self, game: &Match) -> Result<(), DatabaseError>;
    async fn load_team(&mut self, id: Uuid) -> Result<Option<Team>, DatabaseError>;
    async fn save_team(&mut self, team: &Team) -> Result<(), DatabaseError>;
    async fn list_teams(&mut self) -> Result<Vec<Team>, DatabaseError>;
    /// Every stored match for a team, oldest fixture first.
    async fn list_matches(&mut self, team_id: Uuid) -> Result<Vec<Match>, DatabaseError>;

    fn new_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}
