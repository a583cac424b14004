use super::MatchStore;
use crate::models::{MatchRecord, TeamRecord};
use crate::DatabaseError;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use types::{Match, Team};
use uuid::Uuid;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn column<T>(row: &SqliteRow, name: &str) -> Result<T, DatabaseError>
where
    T: for<'r> sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| DatabaseError::Query(e.to_string()))
}

fn match_from_row(row: &SqliteRow) -> Result<Match, DatabaseError> {
    let id: String = column(row, "id")?;
    let team_id: String = column(row, "team_id")?;
    let record = MatchRecord {
        id: Uuid::parse_str(&id)?,
        team_id: Uuid::parse_str(&team_id)?,
        match_date: column(row, "match_date")?,
        is_completed: column(row, "is_completed")?,
        snapshot: column(row, "snapshot")?,
        updated_at: column(row, "updated_at")?,
    };
    record.into_match()
}

fn team_from_row(row: &SqliteRow) -> Result<Team, DatabaseError> {
    let id: String = column(row, "id")?;
    let record = TeamRecord {
        id: Uuid::parse_str(&id)?,
        name: column(row, "name")?,
        snapshot: column(row, "snapshot")?,
        updated_at: column(row, "updated_at")?,
    };
    record.into_team()
}

#[async_trait::async_trait]
impl MatchStore for SqliteStore {
    async fn load_match(&mut self, id: Uuid) -> Result<Option<Match>, DatabaseError> {
        let row = sqlx::query(
            "SELECT id, team_id, match_date, is_completed, snapshot, updated_at FROM matches WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;

        row.as_ref().map(match_from_row).transpose()
    }

    async fn save_match(&mut self, game: &Match) -> Result<(), DatabaseError> {
        let record = MatchRecord::from_match(game)?;
        sqlx::query(
            "INSERT INTO matches (id, team_id, match_date, is_completed, snapshot, updated_at) VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                team_id = excluded.team_id,
                match_date = excluded.match_date,
                is_completed = excluded.is_completed,
                snapshot = excluded.snapshot,
                updated_at = excluded.updated_at",
        )
        .bind(record.id.to_string())
        .bind(record.team_id.to_string())
        .bind(&record.match_date)
        .bind(record.is_completed)
        .bind(&record.snapshot)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;

        tracing::debug!(
            "Saved match {} ({} events)",
            record.id,
            game.events().len()
        );
        Ok(())
    }

    async fn load_team(&mut self, id: Uuid) -> Result<Option<Team>, DatabaseError> {
        let row = sqlx::query("SELECT id, name, snapshot, updated_at FROM teams WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        row.as_ref().map(team_from_row).transpose()
    }

    async fn save_team(&mut self, team: &Team) -> Result<(), DatabaseError> {
        let record = TeamRecord::from_team(team)?;
        sqlx::query(
            "INSERT INTO teams (id, name, snapshot, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                snapshot = excluded.snapshot,
                updated_at = excluded.updated_at",
        )
        .bind(record.id.to_string())
        .bind(&record.name)
        .bind(&record.snapshot)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;

        tracing::debug!("Saved team {} ({})", record.name, record.id);
        Ok(())
    }

    async fn list_teams(&mut self) -> Result<Vec<Team>, DatabaseError> {
        let rows = sqlx::query("SELECT id, name, snapshot, updated_at FROM teams ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        rows.iter().map(team_from_row).collect()
    }

    async fn list_matches(&mut self, team_id: Uuid) -> Result<Vec<Match>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT id, team_id, match_date, is_completed, snapshot, updated_at FROM matches
             WHERE team_id = ? ORDER BY match_date, updated_at",
        )
        .bind(team_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;

        rows.iter().map(match_from_row).collect()
    }
}
