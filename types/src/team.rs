use std::{collections::BTreeSet, fmt::Display};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::player::Player;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

impl Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::Win => write!(f, "Win"),
            MatchResult::Draw => write!(f, "Draw"),
            MatchResult::Loss => write!(f, "Loss"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub players: Vec<Player>,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    /// Matches already counted in the tally above.
    #[serde(default)]
    pub tallied_matches: BTreeSet<Uuid>,
}

impl Team {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            players: Vec::new(),
            wins: 0,
            draws: 0,
            losses: 0,
            tallied_matches: BTreeSet::new(),
        }
    }

    pub fn add_player(&mut self, name: String, squad_number: Option<u8>) -> Uuid {
        let player = Player::new(name, squad_number);
        let id = player.id;
        self.players.push(player);
        id
    }

    pub fn get_player(&self, id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_by_number(&self, squad_number: u8) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.squad_number == Some(squad_number))
    }

    /// Name for display, falling back to the raw id for players no longer on
    /// the roster.
    pub fn player_name(&self, id: Uuid) -> String {
        self.get_player(id)
            .map_or_else(|| id.to_string(), |player| player.to_string())
    }

    /// Counts a finished match once; returns false if it was already counted.
    pub fn record_result(&mut self, match_id: Uuid, result: MatchResult) -> bool {
        if !self.tallied_matches.insert(match_id) {
            log::debug!("{} already tallied match {match_id}", self.name);
            return false;
        }
        match result {
            MatchResult::Win => self.wins += 1,
            MatchResult::Draw => self.draws += 1,
            MatchResult::Loss => self.losses += 1,
        }
        log::info!(
            "{} record now W{} D{} L{}",
            self.name,
            self.wins,
            self.draws,
            self.losses
        );
        true
    }

    pub fn has_tallied(&self, match_id: Uuid) -> bool {
        self.tallied_matches.contains(&match_id)
    }

    pub fn matches_played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}
