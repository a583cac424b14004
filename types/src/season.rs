use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{match_state::Match, stats, team::MatchResult};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSeason {
    pub appearances: u32,
    pub starts: u32,
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub seconds_played: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub clean_sheets: u32,
    pub players: BTreeMap<Uuid, PlayerSeason>,
}

impl SeasonStats {
    /// Folds every completed match; matches still in progress are skipped.
    pub fn from_matches<'a>(matches: impl IntoIterator<Item = &'a Match>) -> Self {
        let mut season = SeasonStats::default();
        for game in matches.into_iter().filter(|m| m.is_completed()) {
            season.add_match(game);
        }
        season
    }

    fn add_match(&mut self, game: &Match) {
        let full_time = game.total_match_time();
        let sheet = stats::MatchStats::compute(game.lineup(), game.events(), full_time);
        let intervals = stats::pitch_intervals(game.lineup(), game.events(), full_time);

        self.played += 1;
        match game.result() {
            MatchResult::Win => self.wins += 1,
            MatchResult::Draw => self.draws += 1,
            MatchResult::Loss => self.losses += 1,
        }
        let score = game.score();
        self.goals_for += score.for_team;
        self.goals_against += score.against;
        if score.against == 0 {
            self.clean_sheets += 1;
        }

        for player_id in intervals.keys() {
            self.players.entry(*player_id).or_default().appearances += 1;
        }
        for player_id in &game.lineup().starting_lineup {
            self.players.entry(*player_id).or_default().starts += 1;
        }
        for (player_id, line) in sheet.players {
            let season = self.players.entry(player_id).or_default();
            season.goals += line.goals;
            season.assists += line.assists;
            season.yellow_cards += line.yellow_cards;
            season.red_cards += u32::from(line.sent_off);
            season.seconds_played += line.seconds_played;
        }
    }

    pub fn points(&self) -> u32 {
        self.wins * 3 + self.draws
    }
}
