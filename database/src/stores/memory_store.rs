use super::MatchStore;
use crate::DatabaseError;
use std::collections::HashMap;
use types::{Match, Team};
use uuid::Uuid;

/// Keeps snapshots in process memory. Used for ephemeral sessions and tests;
/// counts saves so callers can observe the autosave cadence.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    matches: HashMap<Uuid, Match>,
    teams: HashMap<Uuid, Team>,
    match_saves: usize,
    team_saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn match_saves(&self) -> usize {
        self.match_saves
    }

    pub fn team_saves(&self) -> usize {
        self.team_saves
    }
}

#[async_trait::async_trait]
impl MatchStore for InMemoryStore {
    async fn load_match(&mut self, id: Uuid) -> Result<Option<Match>, DatabaseError> {
        Ok(self.matches.get(&id).cloned())
    }

    async fn save_match(&mut self, game: &Match) -> Result<(), DatabaseError> {
        self.matches.insert(game.id, game.clone());
        self.match_saves += 1;
        Ok(())
    }

    async fn load_team(&mut self, id: Uuid) -> Result<Option<Team>, DatabaseError> {
        Ok(self.teams.get(&id).cloned())
    }

    async fn save_team(&mut self, team: &Team) -> Result<(), DatabaseError> {
        self.teams.insert(team.id, team.clone());
        self.team_saves += 1;
        Ok(())
    }

    async fn list_teams(&mut self) -> Result<Vec<Team>, DatabaseError> {
        let mut teams: Vec<Team> = self.teams.values().cloned().collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teams)
    }

    async fn list_matches(&mut self, team_id: Uuid) -> Result<Vec<Match>, DatabaseError> {
        let mut matches: Vec<Match> = self
            .matches
            .values()
            .filter(|m| m.team_id == team_id)
            .cloned()
            .collect();
        matches.sort_by_key(|m| m.date);
        Ok(matches)
    }
}
