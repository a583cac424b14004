use chrono::{DateTime, Duration, Utc};
use database::{DatabaseError, MatchStore};
use types::{
    Match, MatchAction, MatchError, MatchEvent, MatchResult, MatchSetup, SeasonStats, Team,
};
use uuid::Uuid;

use crate::TrackerError;

/// Decides when a live match is written back to the store.
#[derive(Clone, Debug)]
pub struct Autosave {
    interval: Duration,
    last_saved: Option<DateTime<Utc>>,
}

impl Autosave {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_saved: None,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_saved {
            None => true,
            Some(last) => now - last >= self.interval,
        }
    }

    pub fn should_save(&self, action: &MatchAction, now: DateTime<Utc>) -> bool {
        action.is_structural() || self.is_due(now)
    }

    pub fn mark_saved(&mut self, now: DateTime<Utc>) {
        self.last_saved = Some(now);
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }
}

/// One match being tracked live, together with its team and the store both
/// are persisted to.
pub struct MatchSession<'a> {
    store: &'a mut dyn MatchStore,
    game: Match,
    team: Team,
    autosave: Autosave,
    /// The team holds a tally the store has not seen yet.
    team_dirty: bool,
}

impl<'a> MatchSession<'a> {
    /// Creates a match from the setup screen and saves it before kickoff.
    pub async fn create(
        store: &'a mut dyn MatchStore,
        setup: MatchSetup,
        autosave_interval: Duration,
        now: DateTime<Utc>,
    ) -> Result<MatchSession<'a>, TrackerError> {
        let team = store
            .load_team(setup.team_id)
            .await?
            .ok_or(DatabaseError::TeamNotFound(setup.team_id))?;
        if let Some(&stranger) = setup
            .starting_lineup
            .iter()
            .chain(setup.substitutes.iter())
            .find(|&&id| team.get_player(id).is_none())
        {
            return Err(MatchError::UnknownPlayer(stranger).into());
        }
        setup.validate()?;

        let game = Match::with_id(store.new_id(), setup);
        log::info!("New match for {}: {game}", team.name);
        let mut session = Self {
            store,
            game,
            team,
            autosave: Autosave::new(autosave_interval),
            team_dirty: false,
        };
        session.save(now).await?;
        Ok(session)
    }

    /// Reopens a saved match, e.g. after the app was closed mid-game.
    ///
    /// A completed match whose result never reached the team's stored tally
    /// is tallied again here and saved with the next save.
    pub async fn open(
        store: &'a mut dyn MatchStore,
        match_id: Uuid,
        autosave_interval: Duration,
    ) -> Result<MatchSession<'a>, TrackerError> {
        let game = store
            .load_match(match_id)
            .await?
            .ok_or(DatabaseError::MatchNotFound(match_id))?;
        let team = store
            .load_team(game.team_id)
            .await?
            .ok_or(DatabaseError::TeamNotFound(game.team_id))?;
        log::info!("Resumed {game}");
        let mut session = Self {
            store,
            game,
            team,
            autosave: Autosave::new(autosave_interval),
            team_dirty: false,
        };
        if session.game.is_completed() {
            session.tally_result();
        }
        Ok(session)
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn autosave(&self) -> &Autosave {
        &self.autosave
    }

    /// Applies one action and persists it when the autosave policy allows.
    ///
    /// A failed save is logged and returned, but the action stays applied; the
    /// next successful save picks it up.
    pub async fn dispatch(
        &mut self,
        action: MatchAction,
        now: DateTime<Utc>,
    ) -> Result<Option<MatchEvent>, TrackerError> {
        if action == MatchAction::EndMatch {
            self.end_match(now).await?;
            return Ok(None);
        }
        let touched = self.game.apply(&action, now).map_err(|err| {
            log::warn!("Rejected {action}: {err}");
            err
        })?;
        if self.autosave.should_save(&action, now) {
            self.save(now).await?;
        } else {
            log::debug!(
                "Skipping save for {action}, last saved {:?}",
                self.autosave.last_saved()
            );
        }
        Ok(touched)
    }

    /// Blows the final whistle, tallies the result against the team and saves
    /// both. If either save fails the tally is kept and retried by every later
    /// save, including [`MatchSession::flush`].
    pub async fn end_match(&mut self, now: DateTime<Utc>) -> Result<MatchResult, TrackerError> {
        self.game.apply(&MatchAction::EndMatch, now).map_err(|err| {
            log::warn!("Rejected end of match: {err}");
            err
        })?;
        let result = self.tally_result();
        self.save(now).await?;
        log::info!(
            "Full time: {} {} {}",
            self.team.name,
            self.game.score(),
            self.game.opposition
        );
        Ok(result)
    }

    /// Saves immediately regardless of the autosave window.
    pub async fn flush(&mut self, now: DateTime<Utc>) -> Result<(), TrackerError> {
        self.save(now).await
    }

    pub fn has_unsaved_tally(&self) -> bool {
        self.team_dirty
    }

    fn tally_result(&mut self) -> MatchResult {
        let result = self.game.result();
        if self.team.record_result(self.game.id, result) {
            self.team_dirty = true;
        }
        result
    }

    async fn save(&mut self, now: DateTime<Utc>) -> Result<(), TrackerError> {
        if let Err(err) = self.store.save_match(&self.game).await {
            log::error!("Failed to save match {}: {err}", self.game.id);
            return Err(err.into());
        }
        self.autosave.mark_saved(now);
        if self.team_dirty {
            if let Err(err) = self.store.save_team(&self.team).await {
                log::error!("Failed to save team {}: {err}", self.team.name);
                return Err(err.into());
            }
            self.team_dirty = false;
        }
        Ok(())
    }
}

/// Totals for every completed match the team has on record.
pub async fn season_stats(
    store: &mut dyn MatchStore,
    team_id: Uuid,
) -> Result<(Team, SeasonStats), TrackerError> {
    let team = store
        .load_team(team_id)
        .await?
        .ok_or(DatabaseError::TeamNotFound(team_id))?;
    let matches = store.list_matches(team_id).await?;
    let season = SeasonStats::from_matches(&matches);
    log::debug!(
        "{} completed of {} matches for {}",
        season.played,
        matches.len(),
        team.name
    );
    Ok((team, season))
}
