pub mod config;
pub mod error;
pub mod models;
pub mod stores;

pub use config::DatabaseConfig;
pub use error::DatabaseError;
pub use models::{MatchRecord, TeamRecord};
pub use stores::{InMemoryStore, MatchStore, SqliteStore};

// NoopStore for when persistence is not needed
pub struct NoopStore;

#[async_trait::async_trait]
impl stores::MatchStore for NoopStore {
    async fn load_match(
        &mut self,
        _id: uuid::Uuid,
    ) -> Result<Option<types::Match>, error::DatabaseError> {
        Ok(None)
    }

    async fn save_match(&mut self, _game: &types::Match) -> Result<(), error::DatabaseError> {
        Ok(())
    }

    async fn load_team(
        &mut self,
        _id: uuid::Uuid,
    ) -> Result<Option<types::Team>, error::DatabaseError> {
        Ok(None)
    }

    async fn save_team(&mut self, _team: &types::Team) -> Result<(), error::DatabaseError> {
        Ok(())
    }

    async fn list_teams(&mut self) -> Result<Vec<types::Team>, error::DatabaseError> {
        Ok(vec![])
    }

    async fn list_matches(
        &mut self,
        _team_id: uuid::Uuid,
    ) -> Result<Vec<types::Match>, error::DatabaseError> {
        Ok(vec![])
    }
}
