use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    action::MatchAction,
    clock::{self, Clock, Period},
    error::MatchError,
    event::{EventKind, MatchEvent},
    roster::{self, Lineup, RosterProjection},
    stats::{MatchStats, Score},
    team::MatchResult,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Home,
    Away,
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Home => write!(f, "home"),
            Location::Away => write!(f, "away"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    #[serde(rename = "5v5")]
    FiveASide,
    #[serde(rename = "7v7")]
    SevenASide,
    #[serde(rename = "9v9")]
    NineASide,
    #[serde(rename = "11v11")]
    ElevenASide,
}

impl MatchFormat {
    pub fn formation_size(self) -> usize {
        match self {
            MatchFormat::FiveASide => 5,
            MatchFormat::SevenASide => 7,
            MatchFormat::NineASide => 9,
            MatchFormat::ElevenASide => 11,
        }
    }
}

impl Display for MatchFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self.formation_size();
        write!(f, "{size}v{size}")
    }
}

impl FromStr for MatchFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "5v5" | "5" => Ok(MatchFormat::FiveASide),
            "7v7" | "7" => Ok(MatchFormat::SevenASide),
            "9v9" | "9" => Ok(MatchFormat::NineASide),
            "11v11" | "11" => Ok(MatchFormat::ElevenASide),
            _ => Err(format!("Unable to convert string to match format: {s}")),
        }
    }
}

/// Choices made on the setup screen before kickoff.
#[derive(Clone, Debug)]
pub struct MatchSetup {
    pub team_id: Uuid,
    pub opposition: String,
    pub location: Location,
    pub format: MatchFormat,
    pub planned_duration: u32,
    pub date: NaiveDate,
    pub starting_lineup: Vec<Uuid>,
    pub substitutes: Vec<Uuid>,
}

/// Longest planned duration accepted at setup, in minutes.
pub const MAX_PLANNED_DURATION: u32 = 240;

impl MatchSetup {
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.planned_duration == 0 || self.planned_duration > MAX_PLANNED_DURATION {
            return Err(MatchError::InvalidSetup(format!(
                "planned duration must be between 1 and {MAX_PLANNED_DURATION} minutes, got {}",
                self.planned_duration
            )));
        }
        if self.starting_lineup.is_empty() {
            return Err(MatchError::InvalidSetup("starting lineup is empty".to_string()));
        }
        Ok(())
    }
}

/// Root aggregate for one fixture.
///
/// The ledger, cached score and clock are only changed through
/// [`Match::apply`]; everything else shown on the match screen is projected
/// from them on demand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub team_id: Uuid,
    pub opposition: String,
    pub location: Location,
    pub format: MatchFormat,
    /// Minutes.
    pub planned_duration: u32,
    pub date: NaiveDate,
    #[serde(flatten)]
    lineup: Lineup,
    events: Vec<MatchEvent>,
    score_for: u32,
    score_against: u32,
    clock: Clock,
    period: Period,
    first_half_added_time: u32,
    second_half_added_time: u32,
    is_completed: bool,
}

impl Match {
    pub fn new(setup: MatchSetup) -> Self {
        Self::with_id(Uuid::new_v4(), setup)
    }

    /// Builds a match under an id minted by the persistence gateway.
    pub fn with_id(id: Uuid, setup: MatchSetup) -> Self {
        let lineup = Lineup::new(setup.starting_lineup, setup.substitutes);
        if lineup.starting_lineup.len() != setup.format.formation_size() {
            log::warn!(
                "Starting lineup has {} players for a {} match",
                lineup.starting_lineup.len(),
                setup.format
            );
        }
        Self {
            id,
            team_id: setup.team_id,
            opposition: setup.opposition,
            location: setup.location,
            format: setup.format,
            planned_duration: setup.planned_duration,
            date: setup.date,
            lineup,
            events: Vec::new(),
            score_for: 0,
            score_against: 0,
            clock: Clock::default(),
            period: Period::FirstHalf,
            first_half_added_time: 0,
            second_half_added_time: 0,
            is_completed: false,
        }
    }

    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn score(&self) -> Score {
        Score::new(self.score_for, self.score_against)
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn is_half_time(&self) -> bool {
        self.period == Period::HalfTime
    }

    /// True once the second half has been started.
    pub fn half_time_triggered(&self) -> bool {
        self.period == Period::SecondHalf
    }

    pub fn first_half_added_time(&self) -> u32 {
        self.first_half_added_time
    }

    pub fn second_half_added_time(&self) -> u32 {
        self.second_half_added_time
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn half_length(&self) -> u32 {
        clock::half_length(self.planned_duration)
    }

    pub fn elapsed(&self, now: DateTime<Utc>) -> u32 {
        self.clock.elapsed(now)
    }

    /// Accumulated match time while the clock is stopped; the full-time figure
    /// once the match is completed.
    pub fn total_match_time(&self) -> u32 {
        self.clock.base_seconds
    }

    pub fn clock_display(&self, now: DateTime<Utc>) -> String {
        clock::display_time(
            self.elapsed(now),
            self.period,
            self.half_length(),
            self.first_half_added_time,
        )
    }

    /// Timeline label such as `23'` or `45+2'` for an event in this match.
    pub fn event_minute(&self, event: &MatchEvent) -> String {
        let half_length = self.half_length();
        let in_first_half = match self.period {
            Period::FirstHalf | Period::HalfTime => true,
            Period::SecondHalf => {
                event.timestamp <= half_length.saturating_add(self.first_half_added_time)
            }
        };
        clock::minute_label(
            event.timestamp,
            in_first_half,
            half_length,
            self.first_half_added_time,
        )
    }

    pub fn roster(&self) -> RosterProjection {
        roster::project_roster(&self.lineup, &self.events)
    }

    pub fn sent_off(&self) -> Vec<Uuid> {
        roster::sent_off(&self.events)
    }

    pub fn stats(&self, now: DateTime<Utc>) -> MatchStats {
        MatchStats::compute(&self.lineup, &self.events, self.elapsed(now))
    }

    pub fn result(&self) -> MatchResult {
        match self.score_for.cmp(&self.score_against) {
            std::cmp::Ordering::Greater => MatchResult::Win,
            std::cmp::Ordering::Equal => MatchResult::Draw,
            std::cmp::Ordering::Less => MatchResult::Loss,
        }
    }

    /// Applies one action in place, returning the ledger entry it appended or
    /// removed, if any. Rejected actions leave the match untouched.
    pub fn apply(
        &mut self,
        action: &MatchAction,
        now: DateTime<Utc>,
    ) -> Result<Option<MatchEvent>, MatchError> {
        if self.is_completed {
            return Err(MatchError::MatchCompleted);
        }
        let touched = match action {
            MatchAction::StartClock => {
                self.ensure_not_half_time()?;
                self.clock.start(now);
                None
            }
            MatchAction::StopClock => {
                self.ensure_not_half_time()?;
                self.clock.stop(now);
                None
            }
            MatchAction::AppendEvent(kind) => Some(self.append_event(*kind, now)?),
            MatchAction::RemoveLastEvent => {
                let event = self.events.pop().ok_or(MatchError::NothingToUndo)?;
                self.reverse_score(&event);
                Some(event)
            }
            MatchAction::RemoveEvent(id) => {
                let idx = self
                    .events
                    .iter()
                    .position(|ev| ev.id == *id)
                    .ok_or(MatchError::EventNotFound(*id))?;
                self.ensure_removable(idx)?;
                let event = self.events.remove(idx);
                self.reverse_score(&event);
                Some(event)
            }
            MatchAction::TriggerHalfTime => {
                self.trigger_half_time(now)?;
                None
            }
            MatchAction::EndMatch => {
                self.end(now);
                None
            }
        };
        log::info!(
            "{action} at {} ({}), score {}",
            self.clock_display(now),
            self.period,
            self.score()
        );
        Ok(touched)
    }

    fn ensure_not_half_time(&self) -> Result<(), MatchError> {
        if self.is_half_time() {
            return Err(MatchError::ClockStoppedForHalfTime);
        }
        Ok(())
    }

    fn append_event(
        &mut self,
        kind: EventKind,
        now: DateTime<Utc>,
    ) -> Result<MatchEvent, MatchError> {
        self.validate_event(&kind)?;
        // never step back behind the last entry, even if the wall clock did
        let last_timestamp = self.events.last().map_or(0, |ev| ev.timestamp);
        let timestamp = self.elapsed(now).max(last_timestamp);
        let event = MatchEvent::new(kind, timestamp);

        let delta = kind.score_delta();
        self.score_for += delta.for_team;
        self.score_against += delta.against;
        self.events.push(event);
        Ok(event)
    }

    fn validate_event(&self, kind: &EventKind) -> Result<(), MatchError> {
        if let Some(unknown) = kind
            .player_ids()
            .into_iter()
            .find(|&id| !self.lineup.contains(id))
        {
            return Err(MatchError::UnknownPlayer(unknown));
        }

        if let EventKind::Card { player_id, .. } = *kind {
            if self.sent_off().contains(&player_id) {
                return Err(MatchError::PlayerSentOff(player_id));
            }
        }

        if let Some((player_off_id, player_on_id)) = kind.substitution() {
            if player_off_id == player_on_id {
                return Err(MatchError::InvalidSubstitution(
                    "player cannot replace themselves".to_string(),
                ));
            }
            let roster = self.roster();
            if !roster.on_pitch.contains(&player_off_id) {
                return Err(MatchError::InvalidSubstitution(format!(
                    "{player_off_id} is not on the pitch"
                )));
            }
            if !roster.available_substitutes.contains(&player_on_id) {
                return Err(MatchError::InvalidSubstitution(format!(
                    "{player_on_id} is not available to come on"
                )));
            }
            let sent_off = self.sent_off();
            if let Some(dismissed) = [player_off_id, player_on_id]
                .into_iter()
                .find(|id| sent_off.contains(id))
            {
                return Err(MatchError::InvalidSubstitution(format!(
                    "{dismissed} has been sent off"
                )));
            }
        }
        Ok(())
    }

    /// Replays the ledger without entry `idx` and rejects the removal if any
    /// later entry would no longer be valid, e.g. a substitution of a player
    /// who only came on through the removed one.
    fn ensure_removable(&self, idx: usize) -> Result<(), MatchError> {
        let mut replay = Match {
            events: Vec::with_capacity(self.events.len()),
            ..self.clone()
        };
        for (pos, event) in self.events.iter().enumerate() {
            if pos == idx {
                continue;
            }
            replay.validate_event(&event.kind).map_err(|err| {
                MatchError::InvalidSubstitution(format!(
                    "removing {} would invalidate a later event: {err}",
                    self.events[idx].id
                ))
            })?;
            replay.events.push(*event);
        }
        Ok(())
    }

    fn reverse_score(&mut self, event: &MatchEvent) {
        let score = self.score().minus(event.kind.score_delta());
        self.score_for = score.for_team;
        self.score_against = score.against;
    }

    fn trigger_half_time(&mut self, now: DateTime<Utc>) -> Result<(), MatchError> {
        match self.period {
            Period::FirstHalf => {
                self.clock.stop(now);
                self.first_half_added_time =
                    self.clock.base_seconds.saturating_sub(self.half_length());
                self.period = Period::HalfTime;
            }
            Period::HalfTime => {
                self.period = Period::SecondHalf;
                self.clock.start(now);
            }
            Period::SecondHalf => {
                return Err(MatchError::InvalidTransition {
                    action: "call half time".to_string(),
                    period: self.period,
                });
            }
        }
        Ok(())
    }

    fn end(&mut self, now: DateTime<Utc>) {
        self.clock.stop(now);
        let elapsed = self.clock.base_seconds;
        let half_length = self.half_length();
        match self.period {
            Period::FirstHalf => {
                self.first_half_added_time = elapsed.saturating_sub(half_length);
            }
            Period::HalfTime => {}
            Period::SecondHalf => {
                self.second_half_added_time = elapsed
                    .saturating_sub(self.first_half_added_time)
                    .saturating_sub(half_length.saturating_mul(2));
            }
        }
        self.is_completed = true;
    }
}

/// Pure form of [`Match::apply`]: consumes a state and yields the next one.
pub fn reduce(
    mut state: Match,
    action: &MatchAction,
    now: DateTime<Utc>,
) -> Result<Match, MatchError> {
    state.apply(action, now)?;
    Ok(state)
}

impl Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vs {} ({}, {}) {}",
            self.date,
            self.opposition,
            self.location,
            self.format,
            self.score()
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::event::{CardType, GoalType, PenaltyOutcome};

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 7, 10, 0, 0).unwrap()
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        kickoff() + Duration::seconds(seconds)
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("9v9".parse::<MatchFormat>(), Ok(MatchFormat::NineASide));
        assert_eq!("11".parse::<MatchFormat>(), Ok(MatchFormat::ElevenASide));
        assert!("6v6".parse::<MatchFormat>().is_err());
        assert_eq!(MatchFormat::SevenASide.to_string().parse(), Ok(MatchFormat::SevenASide));
    }

    fn new_match(starting: Vec<Uuid>, bench: Vec<Uuid>) -> Match {
        Match::new(MatchSetup {
            team_id: Uuid::new_v4(),
            opposition: "Harbour Rovers".to_string(),
            location: Location::Home,
            format: MatchFormat::FiveASide,
            planned_duration: 90,
            date: NaiveDate::from_ymd_opt(2024, 9, 7).unwrap(),
            starting_lineup: starting,
            substitutes: bench,
        })
    }

    fn goal_for(player_id: Option<Uuid>) -> EventKind {
        EventKind::GoalFor {
            player_id,
            assist_player_id: None,
            goal_type: GoalType::OpenPlay,
        }
    }

    #[test]
    fn test_append_stamps_elapsed_time() {
        let scorer = Uuid::new_v4();
        let mut game = new_match(vec![scorer], vec![]);
        game.apply(&MatchAction::StartClock, at(0)).unwrap();

        let event = game
            .apply(&MatchAction::AppendEvent(goal_for(Some(scorer))), at(754))
            .unwrap()
            .unwrap();

        assert_eq!(event.timestamp, 754);
        assert_eq!(game.score(), Score::new(1, 0));
        assert_eq!(game.event_minute(&event), "13'");
    }

    #[test]
    fn test_delete_penalty_restores_score() {
        let x = Uuid::new_v4();
        let mut game = new_match(vec![x], vec![]);
        game.apply(&MatchAction::StartClock, at(0)).unwrap();
        game.apply(&MatchAction::AppendEvent(goal_for(Some(x))), at(100))
            .unwrap();
        let penalty = game
            .apply(
                &MatchAction::AppendEvent(EventKind::Penalty {
                    is_for_team: true,
                    outcome: PenaltyOutcome::Scored,
                    player_id: None,
                }),
                at(200),
            )
            .unwrap()
            .unwrap();
        assert_eq!(game.score().for_team, 2);

        game.apply(&MatchAction::RemoveEvent(penalty.id), at(210))
            .unwrap();

        assert_eq!(game.score().for_team, 1);
        assert_eq!(game.events().len(), 1);
    }

    #[test]
    fn test_undo_last_reverses_goal_against() {
        let mut game = new_match(vec![Uuid::new_v4()], vec![]);
        let conceded = EventKind::GoalAgainst {
            goal_type: GoalType::Corner,
        };
        game.apply(&MatchAction::AppendEvent(conceded), at(0)).unwrap();
        assert_eq!(game.score(), Score::new(0, 1));

        game.apply(&MatchAction::RemoveLastEvent, at(5)).unwrap();
        assert_eq!(game.score(), Score::default());
        assert_eq!(
            game.apply(&MatchAction::RemoveLastEvent, at(6)),
            Err(MatchError::NothingToUndo)
        );
    }

    #[test]
    fn test_remove_unknown_event() {
        let mut game = new_match(vec![Uuid::new_v4()], vec![]);
        let missing = Uuid::new_v4();
        assert_eq!(
            game.apply(&MatchAction::RemoveEvent(missing), at(0)),
            Err(MatchError::EventNotFound(missing))
        );
    }

    #[test]
    fn test_half_time_banks_added_time() {
        let mut game = new_match(vec![Uuid::new_v4()], vec![]);
        game.apply(&MatchAction::StartClock, at(0)).unwrap();
        assert_eq!(game.clock_display(at(2750)), "45'+0:50");

        game.apply(&MatchAction::TriggerHalfTime, at(2750)).unwrap();
        assert!(game.is_half_time());
        assert!(!game.clock().is_running());
        assert_eq!(game.first_half_added_time(), 50);
        // clock frozen through the interval
        assert_eq!(game.elapsed(at(3600)), 2750);

        game.apply(&MatchAction::TriggerHalfTime, at(3650)).unwrap();
        assert!(game.half_time_triggered());
        assert_eq!(game.elapsed(at(3650 + 60)), 2810);
        assert_eq!(game.clock_display(at(3650 + 60)), "46:00");
    }

    #[test]
    fn test_half_time_twice_in_second_half_is_rejected() {
        let mut game = new_match(vec![Uuid::new_v4()], vec![]);
        game.apply(&MatchAction::TriggerHalfTime, at(0)).unwrap();
        game.apply(&MatchAction::TriggerHalfTime, at(1)).unwrap();
        assert!(matches!(
            game.apply(&MatchAction::TriggerHalfTime, at(2)),
            Err(MatchError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_clock_controls_rejected_during_half_time() {
        let mut game = new_match(vec![Uuid::new_v4()], vec![]);
        game.apply(&MatchAction::StartClock, at(0)).unwrap();
        game.apply(&MatchAction::TriggerHalfTime, at(600)).unwrap();
        assert_eq!(
            game.apply(&MatchAction::StartClock, at(700)),
            Err(MatchError::ClockStoppedForHalfTime)
        );
    }

    #[test]
    fn test_end_match_banks_second_half_added_time_and_locks() {
        let mut game = new_match(vec![Uuid::new_v4()], vec![]);
        game.apply(&MatchAction::StartClock, at(0)).unwrap();
        game.apply(&MatchAction::TriggerHalfTime, at(2760)).unwrap();
        game.apply(&MatchAction::TriggerHalfTime, at(3600)).unwrap();
        // 2760 + 2820 = 5580 elapsed: 5580 - 60 - 5400 = 120s added
        game.apply(&MatchAction::EndMatch, at(3600 + 2820)).unwrap();

        assert!(game.is_completed());
        assert_eq!(game.total_match_time(), 5580);
        assert_eq!(game.second_half_added_time(), 120);
        assert_eq!(
            game.apply(&MatchAction::AppendEvent(goal_for(None)), at(7000)),
            Err(MatchError::MatchCompleted)
        );
        assert_eq!(
            game.apply(&MatchAction::RemoveLastEvent, at(7000)),
            Err(MatchError::MatchCompleted)
        );
    }

    #[test]
    fn test_substitution_validation() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut game = new_match(vec![a, b], vec![c]);
        let sub = |off, on| {
            MatchAction::AppendEvent(EventKind::Substitution {
                player_off_id: off,
                player_on_id: on,
            })
        };

        assert!(matches!(
            game.apply(&sub(c, a), at(0)),
            Err(MatchError::InvalidSubstitution(_))
        ));
        assert!(matches!(
            game.apply(&sub(a, b), at(0)),
            Err(MatchError::InvalidSubstitution(_))
        ));
        let outsider = Uuid::new_v4();
        assert_eq!(
            game.apply(&sub(a, outsider), at(0)),
            Err(MatchError::UnknownPlayer(outsider))
        );

        game.apply(&sub(a, c), at(600)).unwrap();
        let roster = game.roster();
        assert_eq!(roster.on_pitch, vec![b, c]);
        assert_eq!(roster.available_substitutes, vec![a]);
    }

    #[test]
    fn test_sent_off_player_cannot_be_substituted() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut game = new_match(vec![a, b], vec![c]);
        game.apply(
            &MatchAction::AppendEvent(EventKind::Card {
                player_id: a,
                card_type: CardType::Red,
            }),
            at(0),
        )
        .unwrap();
        assert_eq!(game.sent_off(), vec![a]);
        assert!(matches!(
            game.apply(
                &MatchAction::AppendEvent(EventKind::Substitution {
                    player_off_id: a,
                    player_on_id: c,
                }),
                at(10),
            ),
            Err(MatchError::InvalidSubstitution(_))
        ));
    }

    #[test]
    fn test_no_cards_after_a_sending_off() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut game = new_match(vec![a, b], vec![]);
        let card = |card_type| {
            MatchAction::AppendEvent(EventKind::Card {
                player_id: a,
                card_type,
            })
        };
        game.apply(&card(CardType::Yellow), at(100)).unwrap();
        game.apply(&card(CardType::SecondYellow), at(200)).unwrap();

        assert_eq!(
            game.apply(&card(CardType::Red), at(300)),
            Err(MatchError::PlayerSentOff(a))
        );
        assert_eq!(
            game.apply(&card(CardType::Yellow), at(300)),
            Err(MatchError::PlayerSentOff(a))
        );
        assert_eq!(game.stats(at(400)).red_cards, 1);
    }

    #[test]
    fn test_removing_a_sub_that_a_later_sub_relies_on() {
        let (a, b, c, d) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut game = new_match(vec![a, b], vec![c, d]);
        let sub = |off, on| {
            MatchAction::AppendEvent(EventKind::Substitution {
                player_off_id: off,
                player_on_id: on,
            })
        };
        game.apply(&MatchAction::StartClock, at(0)).unwrap();
        let first = game.apply(&sub(a, c), at(300)).unwrap().unwrap();
        let second = game.apply(&sub(c, d), at(600)).unwrap().unwrap();
        let before = game.clone();

        assert!(matches!(
            game.apply(&MatchAction::RemoveEvent(first.id), at(700)),
            Err(MatchError::InvalidSubstitution(_))
        ));
        assert_eq!(game, before);
        assert_eq!(game.roster().on_pitch.len(), 2);

        // the later one first, then the earlier one is free to go
        game.apply(&MatchAction::RemoveEvent(second.id), at(700))
            .unwrap();
        game.apply(&MatchAction::RemoveEvent(first.id), at(700))
            .unwrap();
        assert_eq!(game.roster().on_pitch, vec![a, b]);
    }

    #[test]
    fn test_setup_rejects_unreasonable_durations() {
        let mut setup = MatchSetup {
            team_id: Uuid::new_v4(),
            opposition: "Harbour Rovers".to_string(),
            location: Location::Away,
            format: MatchFormat::FiveASide,
            planned_duration: 100_000_000,
            date: NaiveDate::from_ymd_opt(2024, 9, 7).unwrap(),
            starting_lineup: vec![Uuid::new_v4()],
            substitutes: vec![],
        };
        assert!(matches!(setup.validate(), Err(MatchError::InvalidSetup(_))));

        // building one anyway must not overflow
        let mut game = Match::new(setup.clone());
        game.apply(&MatchAction::StartClock, at(0)).unwrap();
        assert_eq!(game.clock_display(at(65)), "01:05");

        setup.planned_duration = 0;
        assert!(setup.validate().is_err());
        setup.planned_duration = 60;
        assert_eq!(setup.validate(), Ok(()));
    }

    #[test]
    fn test_reduce_leaves_input_untouched_on_error() {
        let game = new_match(vec![Uuid::new_v4()], vec![]);
        let ended = reduce(game.clone(), &MatchAction::EndMatch, at(0)).unwrap();
        assert!(ended.is_completed());
        assert!(!game.is_completed());
        assert!(reduce(ended, &MatchAction::StartClock, at(1)).is_err());
    }

    #[test]
    fn test_result_from_score() {
        let mut game = new_match(vec![Uuid::new_v4()], vec![]);
        assert_eq!(game.result(), MatchResult::Draw);
        game.apply(
            &MatchAction::AppendEvent(EventKind::GoalAgainst {
                goal_type: GoalType::FreeKick,
            }),
            at(0),
        )
        .unwrap();
        assert_eq!(game.result(), MatchResult::Loss);
    }

    #[test]
    fn test_snapshot_round_trip_keeps_running_clock() {
        let scorer = Uuid::new_v4();
        let mut game = new_match(vec![scorer], vec![]);
        game.apply(&MatchAction::StartClock, at(0)).unwrap();
        game.apply(&MatchAction::AppendEvent(goal_for(Some(scorer))), at(30))
            .unwrap();

        let json = serde_json::to_string(&game).expect("Failed to serialize");
        let restored: Match = serde_json::from_str(&json).expect("Failed to deserialize");

        assert_eq!(restored, game);
        assert_eq!(restored.elapsed(at(500)), 500);
        assert!(json.contains("\"starting_lineup\""));
        assert!(json.contains("\"5v5\""));
    }
}
