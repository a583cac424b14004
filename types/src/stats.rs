//! Projections folded from the event ledger: score, pitch time and the
//! per-match stat sheet. Everything here is recomputed from the full list of
//! events, so undo and delete never need separate invalidation.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::{CardType, EventKind, GoalType, MatchEvent};
use crate::roster::Lineup;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub for_team: u32,
    pub against: u32,
}

impl Score {
    pub fn new(for_team: u32, against: u32) -> Self {
        Self { for_team, against }
    }

    pub fn from_events(events: &[MatchEvent]) -> Self {
        events
            .iter()
            .fold(Score::default(), |score, ev| score.plus(ev.kind.score_delta()))
    }

    pub fn plus(self, delta: Score) -> Self {
        Self {
            for_team: self.for_team + delta.for_team,
            against: self.against + delta.against,
        }
    }

    /// Reverses a contribution, never dropping below zero.
    pub fn minus(self, delta: Score) -> Self {
        Self {
            for_team: self.for_team.saturating_sub(delta.for_team),
            against: self.against.saturating_sub(delta.against),
        }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.for_team, self.against)
    }
}

/// Half-open stretch `[start, end)` of match time spent on the pitch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

/// Rebuilds every player's stints on the pitch up to `end`.
///
/// Starters open at 0, substitutions close the outgoing player and open the
/// incoming one, and a sending-off closes the player without a replacement.
/// Events are replayed in timestamp order; ties keep ledger order.
pub fn pitch_intervals(
    lineup: &Lineup,
    events: &[MatchEvent],
    end: u32,
) -> HashMap<Uuid, Vec<Interval>> {
    let mut ordered: Vec<&MatchEvent> = events.iter().collect();
    ordered.sort_by_key(|ev| ev.timestamp);

    let mut open: HashMap<Uuid, u32> = lineup.starting_lineup.iter().map(|&id| (id, 0)).collect();
    let mut intervals: HashMap<Uuid, Vec<Interval>> = HashMap::new();

    let mut close = |open: &mut HashMap<Uuid, u32>, player_id: Uuid, at: u32| {
        if let Some(start) = open.remove(&player_id) {
            intervals
                .entry(player_id)
                .or_default()
                .push(Interval { start, end: at });
        }
    };

    for ev in ordered {
        match ev.kind {
            EventKind::Substitution {
                player_off_id,
                player_on_id,
            } => {
                close(&mut open, player_off_id, ev.timestamp);
                open.entry(player_on_id).or_insert(ev.timestamp);
            }
            EventKind::Card {
                player_id,
                card_type,
            } if card_type.is_sending_off() => {
                close(&mut open, player_id, ev.timestamp);
            }
            _ => {}
        }
    }
    // still on at the whistle
    for (player_id, start) in open {
        intervals.entry(player_id).or_default().push(Interval {
            start,
            end: end.max(start),
        });
    }

    intervals
}

/// Seconds on the pitch for every squad player, zero for unused substitutes.
pub fn seconds_played(lineup: &Lineup, events: &[MatchEvent], end: u32) -> HashMap<Uuid, u32> {
    let mut played: HashMap<Uuid, u32> = lineup.squad().map(|id| (id, 0)).collect();
    for (player_id, stints) in pitch_intervals(lineup, events, end) {
        *played.entry(player_id).or_default() += stints.iter().map(Interval::duration).sum::<u32>();
    }
    played
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLine {
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub sent_off: bool,
    pub seconds_played: u32,
}

impl PlayerLine {
    pub fn minutes_played(&self) -> u32 {
        self.seconds_played / 60
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub score: Score,
    pub goals_for_by_type: BTreeMap<GoalType, u32>,
    pub goals_against_by_type: BTreeMap<GoalType, u32>,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub penalties_scored: u32,
    pub penalties_missed: u32,
    pub players: BTreeMap<Uuid, PlayerLine>,
}

impl MatchStats {
    pub fn compute(lineup: &Lineup, events: &[MatchEvent], end: u32) -> Self {
        let mut stats = MatchStats {
            score: Score::from_events(events),
            ..Default::default()
        };
        for (player_id, seconds) in seconds_played(lineup, events, end) {
            stats.players.entry(player_id).or_default().seconds_played = seconds;
        }

        for ev in events {
            match ev.kind {
                EventKind::GoalFor {
                    player_id,
                    assist_player_id,
                    goal_type,
                } => {
                    *stats.goals_for_by_type.entry(goal_type).or_default() += 1;
                    if let Some(scorer) = player_id {
                        stats.players.entry(scorer).or_default().goals += 1;
                    }
                    if let Some(assister) = assist_player_id {
                        stats.players.entry(assister).or_default().assists += 1;
                    }
                }
                EventKind::GoalAgainst { goal_type } => {
                    *stats.goals_against_by_type.entry(goal_type).or_default() += 1;
                }
                EventKind::Card {
                    player_id,
                    card_type,
                } => {
                    let line = stats.players.entry(player_id).or_default();
                    if card_type == CardType::Yellow {
                        stats.yellow_cards += 1;
                        line.yellow_cards += 1;
                    } else {
                        stats.red_cards += 1;
                        line.sent_off = true;
                    }
                }
                EventKind::Substitution { .. } => {}
                EventKind::Penalty {
                    is_for_team,
                    outcome,
                    player_id,
                } => {
                    match (is_for_team, outcome.is_scored()) {
                        (true, true) => {
                            stats.penalties_scored += 1;
                            *stats.goals_for_by_type.entry(GoalType::Penalty).or_default() += 1;
                            if let Some(taker) = player_id {
                                stats.players.entry(taker).or_default().goals += 1;
                            }
                        }
                        (true, false) => stats.penalties_missed += 1,
                        (false, true) => {
                            *stats
                                .goals_against_by_type
                                .entry(GoalType::Penalty)
                                .or_default() += 1;
                        }
                        (false, false) => {}
                    }
                }
            }
        }
        log::debug!("Computed match stats over {} events: {}", events.len(), stats.score);
        stats
    }
}
