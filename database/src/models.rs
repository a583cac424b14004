use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use types::{Match, Team};
use uuid::Uuid;

use crate::DatabaseError;

/// One row of the `matches` table: a few indexed columns plus the full
/// snapshot as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    pub team_id: Uuid,
    pub match_date: String,
    pub is_completed: bool,
    pub snapshot: String,
    pub updated_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn from_match(game: &Match) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: game.id,
            team_id: game.team_id,
            match_date: game.date.to_string(),
            is_completed: game.is_completed(),
            snapshot: serde_json::to_string(game)?,
            updated_at: Utc::now(),
        })
    }

    pub fn into_match(self) -> Result<Match, DatabaseError> {
        Ok(serde_json::from_str(&self.snapshot)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: Uuid,
    pub name: String,
    pub snapshot: String,
    pub updated_at: DateTime<Utc>,
}

impl TeamRecord {
    pub fn from_team(team: &Team) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: team.id,
            name: team.name.clone(),
            snapshot: serde_json::to_string(team)?,
            updated_at: Utc::now(),
        })
    }

    pub fn into_team(self) -> Result<Team, DatabaseError> {
        Ok(serde_json::from_str(&self.snapshot)?)
    }
}
