use itertools::Itertools;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::MatchEvent;

/// Who was picked for the match. Order is preserved for display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub starting_lineup: Vec<Uuid>,
    pub substitutes: Vec<Uuid>,
}

impl Lineup {
    /// Builds a lineup with duplicates dropped; a player listed as both a
    /// starter and a substitute counts as a starter.
    pub fn new(starting_lineup: Vec<Uuid>, substitutes: Vec<Uuid>) -> Self {
        let starting_lineup: Vec<Uuid> = starting_lineup.into_iter().unique().collect();
        let substitutes = substitutes
            .into_iter()
            .unique()
            .filter(|id| !starting_lineup.contains(id))
            .collect();
        Self {
            starting_lineup,
            substitutes,
        }
    }

    /// `starting_lineup ∪ substitutes`, starters first.
    pub fn squad(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.starting_lineup
            .iter()
            .chain(self.substitutes.iter())
            .copied()
            .unique()
    }

    pub fn contains(&self, player_id: Uuid) -> bool {
        self.starting_lineup.contains(&player_id) || self.substitutes.contains(&player_id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterProjection {
    pub on_pitch: Vec<Uuid>,
    pub available_substitutes: Vec<Uuid>,
}

/// Folds substitutions, in ledger order, over the starting lineup.
///
/// Sending-offs do not change the projection; see [`sent_off`].
pub fn project_roster(lineup: &Lineup, events: &[MatchEvent]) -> RosterProjection {
    let mut on_pitch = lineup.starting_lineup.clone();
    for (player_off_id, player_on_id) in events.iter().filter_map(|ev| ev.kind.substitution()) {
        on_pitch.retain(|&id| id != player_off_id);
        if !on_pitch.contains(&player_on_id) {
            on_pitch.push(player_on_id);
        }
    }
    let available_substitutes = lineup
        .squad()
        .filter(|id| !on_pitch.contains(id))
        .collect();

    RosterProjection {
        on_pitch,
        available_substitutes,
    }
}

/// Players dismissed by a red or second yellow card, in ledger order.
pub fn sent_off(events: &[MatchEvent]) -> Vec<Uuid> {
    events
        .iter()
        .filter_map(|ev| ev.kind.sent_off_player())
        .unique()
        .collect()
}
