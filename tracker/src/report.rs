use chrono::{DateTime, Utc};
use itertools::Itertools;
use types::{EventKind, Match, MatchEvent, SeasonStats, Team};
use uuid::Uuid;

/// Header line for the match screen: score, clock and period.
pub fn status_line(game: &Match, team: &Team, now: DateTime<Utc>) -> String {
    let score = game.score();
    let clock_state = if game.is_completed() {
        "full time".to_string()
    } else if game.clock().is_running() {
        format!("{}", game.period())
    } else {
        format!("{}, clock stopped", game.period())
    };
    format!(
        "{} {} - {} {}  [{}] ({clock_state})",
        team.name,
        score.for_team,
        score.against,
        game.opposition,
        game.clock_display(now),
    )
}

/// One timeline row, e.g. `23'  Goal: #9 Sam Smith (assist #4 Jo Bloggs), open play`.
pub fn describe_event(game: &Match, team: &Team, event: &MatchEvent) -> String {
    let name = |id: Uuid| team.player_name(id);
    let description = match event.kind {
        EventKind::GoalFor {
            player_id,
            assist_player_id,
            goal_type,
        } => {
            let scorer = player_id.map(name).unwrap_or_else(|| "unknown scorer".to_string());
            match assist_player_id {
                Some(assist) => format!("Goal: {scorer} (assist {}), {goal_type}", name(assist)),
                None => format!("Goal: {scorer}, {goal_type}"),
            }
        }
        EventKind::GoalAgainst { goal_type } => {
            format!("Conceded to {}, {goal_type}", game.opposition)
        }
        EventKind::Card {
            player_id,
            card_type,
        } => format!("{card_type} card: {}", name(player_id)),
        EventKind::Substitution {
            player_off_id,
            player_on_id,
        } => format!("Sub: {} on for {}", name(player_on_id), name(player_off_id)),
        EventKind::Penalty {
            is_for_team,
            outcome,
            player_id,
        } => {
            let side = if is_for_team { "our" } else { "their" };
            match player_id {
                Some(taker) => format!("Penalty ({side}) {outcome}: {}", name(taker)),
                None => format!("Penalty ({side}) {outcome}"),
            }
        }
    };
    let short_id = event.id.to_string().chars().take(8).collect::<String>();
    format!("{:>6}  {description}  [{short_id}]", game.event_minute(event))
}

pub fn timeline(game: &Match, team: &Team) -> String {
    if game.events().is_empty() {
        return "No events yet".to_string();
    }
    game.events()
        .iter()
        .map(|event| describe_event(game, team, event))
        .join("\n")
}

/// Who is on, who is on the bench and who has been sent off.
pub fn roster(game: &Match, team: &Team) -> String {
    let roster = game.roster();
    let sent_off = game.sent_off();
    let names = |ids: &[Uuid]| {
        ids.iter()
            .filter(|id| !sent_off.contains(*id))
            .map(|&id| team.player_name(id))
            .join(", ")
    };
    let mut lines = vec![
        format!("On pitch: {}", names(roster.on_pitch.as_slice())),
        format!("Bench: {}", names(roster.available_substitutes.as_slice())),
    ];
    if !sent_off.is_empty() {
        lines.push(format!(
            "Sent off: {}",
            sent_off.iter().map(|&id| team.player_name(id)).join(", ")
        ));
    }
    lines.join("\n")
}

pub fn match_stats(game: &Match, team: &Team, now: DateTime<Utc>) -> String {
    let stats = game.stats(now);
    let mut lines = vec![format!("Score: {}", stats.score)];
    if !stats.goals_for_by_type.is_empty() {
        lines.push(format!(
            "Goals for: {}",
            stats
                .goals_for_by_type
                .iter()
                .map(|(goal_type, count)| format!("{count} {goal_type}"))
                .join(", ")
        ));
    }
    if !stats.goals_against_by_type.is_empty() {
        lines.push(format!(
            "Goals against: {}",
            stats
                .goals_against_by_type
                .iter()
                .map(|(goal_type, count)| format!("{count} {goal_type}"))
                .join(", ")
        ));
    }
    lines.push(format!(
        "Cards: {} yellow, {} red. Penalties: {} scored, {} not scored",
        stats.yellow_cards, stats.red_cards, stats.penalties_scored, stats.penalties_missed
    ));
    for (player_id, line) in stats
        .players
        .iter()
        .sorted_by_key(|(_, line)| std::cmp::Reverse(line.seconds_played))
    {
        lines.push(format!(
            "  {:<24} {:>3}' G{} A{}{}{}",
            team.player_name(*player_id),
            line.minutes_played(),
            line.goals,
            line.assists,
            if line.yellow_cards > 0 { " YC" } else { "" },
            if line.sent_off { " RC" } else { "" },
        ));
    }
    lines.join("\n")
}

pub fn season(team: &Team, season: &SeasonStats) -> String {
    let mut lines = vec![
        format!(
            "{}: P{} W{} D{} L{}  GF{} GA{}  {} clean sheets, {} pts",
            team.name,
            season.played,
            season.wins,
            season.draws,
            season.losses,
            season.goals_for,
            season.goals_against,
            season.clean_sheets,
            season.points()
        ),
    ];
    for (player_id, line) in season
        .players
        .iter()
        .sorted_by_key(|(_, line)| std::cmp::Reverse((line.goals, line.seconds_played)))
    {
        lines.push(format!(
            "  {:<24} apps {:>2} ({} starts) {:>4}' G{} A{} YC{} RC{}",
            team.player_name(*player_id),
            line.appearances,
            line.starts,
            line.seconds_played / 60,
            line.goals,
            line.assists,
            line.yellow_cards,
            line.red_cards,
        ));
    }
    lines.join("\n")
}
