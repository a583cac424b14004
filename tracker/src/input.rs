use std::sync::OnceLock;

use regex::{Captures, Regex};
use types::{CardType, EventKind, GoalType, Match, MatchAction, PenaltyOutcome, Team};
use uuid::Uuid;

/// A line typed at the match screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Action(MatchAction),
    Status,
    Timeline,
    Stats,
    Help,
    Quit,
}

pub const HELP: &str = "\
start | stop                              run or pause the clock
ht                                        half time (again to kick off the second half)
goal [<n>] [assist <n>] [corner|free-kick|penalty]
against [corner|free-kick|penalty]
card <n> yellow|red|second-yellow
sub <off> <on>
pen for|against scored|saved|missed [<n>]
undo | delete <event-id-prefix>
end | status | timeline | stats | help | quit";

/// What the parser needs to turn squad numbers and id prefixes into ids.
struct Lookup<'a> {
    team: &'a Team,
    game: &'a Match,
}

type Callback = for<'a, 'b, 'c> fn(&'a Captures<'b>, &'c Lookup) -> Result<Command, String>;

const PATTERNS: [(&str, Callback); 16] = [
    (r"^start$", |_, _| Ok(Command::Action(MatchAction::StartClock))),
    (r"^stop$", |_, _| Ok(Command::Action(MatchAction::StopClock))),
    (r"^(?:ht|half ?time)$", |_, _| {
        Ok(Command::Action(MatchAction::TriggerHalfTime))
    }),
    (r"^undo$", |_, _| Ok(Command::Action(MatchAction::RemoveLastEvent))),
    (r"^end$", |_, _| Ok(Command::Action(MatchAction::EndMatch))),
    (r"^status$", |_, _| Ok(Command::Status)),
    (r"^timeline$", |_, _| Ok(Command::Timeline)),
    (r"^stats$", |_, _| Ok(Command::Stats)),
    (r"^(?:help|\?)$", |_, _| Ok(Command::Help)),
    (r"^(?:quit|exit|q)$", |_, _| Ok(Command::Quit)),
    (
        r"^goal(?: (?<scorer>\d+))?(?: assist (?<assist>\d+))?(?: (?<kind>\S+))?$",
        goal_from_captures,
    ),
    (r"^against(?: (?<kind>\S+))?$", against_from_captures),
    (r"^card (?<player>\d+) (?<card>\S+)$", card_from_captures),
    (r"^sub (?<off>\d+) (?<on>\d+)$", sub_from_captures),
    (
        r"^pen (?<side>for|against) (?<outcome>\S+)(?: (?<taker>\d+))?$",
        penalty_from_captures,
    ),
    (r"^delete (?<prefix>[0-9a-f-]+)$", delete_from_captures),
];

/// Every command pattern, compiled on first use.
fn parsers() -> &'static [(Regex, Callback)] {
    static PARSERS: OnceLock<Vec<(Regex, Callback)>> = OnceLock::new();
    PARSERS.get_or_init(|| {
        PATTERNS
            .iter()
            .map(|&(pattern, callback)| {
                (
                    Regex::new(pattern).expect("Valid command regex"),
                    callback,
                )
            })
            .collect()
    })
}

pub fn parse_command(input: &str, team: &Team, game: &Match) -> Result<Command, String> {
    let input = input.trim().to_lowercase();
    let input = input.as_str();
    let lookup = Lookup { team, game };

    for (re, callback) in parsers() {
        if let Some(result) = command_from_regex(input, &lookup, re, *callback) {
            return result;
        }
    }

    Err(format!("Unrecognised command: {input:?} (try \"help\")"))
}

fn command_from_regex(
    input: &str,
    lookup: &Lookup,
    re: &Regex,
    callback: Callback,
) -> Option<Result<Command, String>> {
    let caps = re.captures(input)?;
    log::debug!("Captured: {caps:?}");
    Some(callback(&caps, lookup))
}

fn goal_from_captures(caps: &Captures, lookup: &Lookup) -> Result<Command, String> {
    let player_id = optional_player(caps, "scorer", lookup)?;
    let assist_player_id = optional_player(caps, "assist", lookup)?;
    if assist_player_id.is_some() && assist_player_id == player_id {
        return Err("A player cannot assist their own goal".to_string());
    }
    let goal_type = optional_goal_type(caps)?;
    Ok(Command::Action(MatchAction::AppendEvent(EventKind::GoalFor {
        player_id,
        assist_player_id,
        goal_type,
    })))
}

fn against_from_captures(caps: &Captures, _lookup: &Lookup) -> Result<Command, String> {
    let goal_type = optional_goal_type(caps)?;
    Ok(Command::Action(MatchAction::AppendEvent(
        EventKind::GoalAgainst { goal_type },
    )))
}

fn card_from_captures(caps: &Captures, lookup: &Lookup) -> Result<Command, String> {
    let player_id = required_player(caps, "player", lookup)?;
    let card_type = match group(caps, "card") {
        "yellow" | "y" => CardType::Yellow,
        "red" | "r" => CardType::Red,
        "second-yellow" | "2y" => CardType::SecondYellow,
        other => return Err(format!("Unable to convert string to card: {other}")),
    };
    Ok(Command::Action(MatchAction::AppendEvent(EventKind::Card {
        player_id,
        card_type,
    })))
}

fn sub_from_captures(caps: &Captures, lookup: &Lookup) -> Result<Command, String> {
    let player_off_id = required_player(caps, "off", lookup)?;
    let player_on_id = required_player(caps, "on", lookup)?;
    Ok(Command::Action(MatchAction::AppendEvent(
        EventKind::Substitution {
            player_off_id,
            player_on_id,
        },
    )))
}

fn penalty_from_captures(caps: &Captures, lookup: &Lookup) -> Result<Command, String> {
    let is_for_team = group(caps, "side") == "for";
    let outcome = match group(caps, "outcome") {
        "scored" => PenaltyOutcome::Scored,
        "saved" => PenaltyOutcome::Saved,
        "missed" => PenaltyOutcome::Missed,
        other => return Err(format!("Unable to convert string to penalty outcome: {other}")),
    };
    let player_id = optional_player(caps, "taker", lookup)?;
    if !is_for_team && player_id.is_some() {
        return Err("Only our own penalty takers can be named".to_string());
    }
    Ok(Command::Action(MatchAction::AppendEvent(EventKind::Penalty {
        is_for_team,
        outcome,
        player_id,
    })))
}

fn delete_from_captures(caps: &Captures, lookup: &Lookup) -> Result<Command, String> {
    let prefix = group(caps, "prefix");
    let candidates: Vec<Uuid> = lookup
        .game
        .events()
        .iter()
        .map(|ev| ev.id)
        .filter(|id| id.to_string().starts_with(prefix))
        .collect();
    match candidates.as_slice() {
        [id] => Ok(Command::Action(MatchAction::RemoveEvent(*id))),
        [] => Err(format!("No event id starts with {prefix}")),
        _ => Err(format!(
            "{} events start with {prefix}, type more of the id",
            candidates.len()
        )),
    }
}

fn group<'h>(caps: &Captures<'h>, name: &str) -> &'h str {
    caps.name(name).map(|m| m.as_str()).unwrap_or("")
}

fn optional_goal_type(caps: &Captures) -> Result<GoalType, String> {
    match caps.name("kind").map(|m| m.as_str()) {
        None | Some("open-play") => Ok(GoalType::OpenPlay),
        Some("corner") => Ok(GoalType::Corner),
        Some("free-kick") => Ok(GoalType::FreeKick),
        Some("penalty") => Ok(GoalType::Penalty),
        Some(other) => Err(format!("Unable to convert string to goal type: {other}")),
    }
}

fn optional_player(caps: &Captures, name: &str, lookup: &Lookup) -> Result<Option<Uuid>, String> {
    caps.name(name)
        .map(|m| player_from_number(m.as_str(), lookup))
        .map_or(Ok(None), |r| r.map(Some))
}

fn required_player(caps: &Captures, name: &str, lookup: &Lookup) -> Result<Uuid, String> {
    player_from_number(group(caps, name), lookup)
}

fn player_from_number(number: &str, lookup: &Lookup) -> Result<Uuid, String> {
    let squad_number: u8 = number
        .parse()
        .map_err(|_| format!("Unable to convert string to squad number: {number}"))?;
    lookup
        .team
        .player_by_number(squad_number)
        .map(|player| player.id)
        .ok_or_else(|| format!("Nobody in {} wears #{squad_number}", lookup.team.name))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use types::{Location, MatchFormat, MatchSetup};

    use super::*;

    fn fixture() -> (Team, Match) {
        let mut team = Team::new("Riverside U11".to_string());
        for number in 1..=8 {
            team.add_player(format!("Player {number}"), Some(number));
        }
        let ids: Vec<Uuid> = team.players.iter().map(|p| p.id).collect();
        let game = Match::new(MatchSetup {
            team_id: team.id,
            opposition: "Harbour Rovers".to_string(),
            location: Location::Home,
            format: MatchFormat::SevenASide,
            planned_duration: 50,
            date: NaiveDate::from_ymd_opt(2024, 9, 7).unwrap(),
            starting_lineup: ids[..7].to_vec(),
            substitutes: ids[7..].to_vec(),
        });
        (team, game)
    }

    fn id_of(team: &Team, number: u8) -> Uuid {
        team.player_by_number(number).unwrap().id
    }

    #[test]
    fn test_clock_commands() {
        let (team, game) = fixture();
        assert_eq!(
            parse_command("start", &team, &game),
            Ok(Command::Action(MatchAction::StartClock))
        );
        assert_eq!(
            parse_command("  STOP \n", &team, &game),
            Ok(Command::Action(MatchAction::StopClock))
        );
        assert_eq!(
            parse_command("half time", &team, &game),
            Ok(Command::Action(MatchAction::TriggerHalfTime))
        );
        assert_eq!(parse_command("q", &team, &game), Ok(Command::Quit));
    }

    #[test]
    fn test_goal_with_assist_and_type() {
        let (team, game) = fixture();
        let command = parse_command("goal 9 assist 3 free-kick", &team, &game);
        assert!(command.is_err(), "nobody wears 9");

        let command = parse_command("goal 4 assist 3 free-kick", &team, &game).unwrap();
        assert_eq!(
            command,
            Command::Action(MatchAction::AppendEvent(EventKind::GoalFor {
                player_id: Some(id_of(&team, 4)),
                assist_player_id: Some(id_of(&team, 3)),
                goal_type: GoalType::FreeKick,
            }))
        );
    }

    #[test]
    fn test_goal_without_scorer() {
        let (team, game) = fixture();
        assert_eq!(
            parse_command("goal", &team, &game),
            Ok(Command::Action(MatchAction::AppendEvent(EventKind::GoalFor {
                player_id: None,
                assist_player_id: None,
                goal_type: GoalType::OpenPlay,
            })))
        );
        assert!(parse_command("goal 2 assist 2", &team, &game).is_err());
        assert!(parse_command("goal 2 header", &team, &game).is_err());
    }

    #[test]
    fn test_against_card_and_sub() {
        let (team, game) = fixture();
        assert_eq!(
            parse_command("against corner", &team, &game),
            Ok(Command::Action(MatchAction::AppendEvent(
                EventKind::GoalAgainst {
                    goal_type: GoalType::Corner
                }
            )))
        );
        assert_eq!(
            parse_command("card 5 second-yellow", &team, &game),
            Ok(Command::Action(MatchAction::AppendEvent(EventKind::Card {
                player_id: id_of(&team, 5),
                card_type: CardType::SecondYellow,
            })))
        );
        assert_eq!(
            parse_command("sub 2 8", &team, &game),
            Ok(Command::Action(MatchAction::AppendEvent(
                EventKind::Substitution {
                    player_off_id: id_of(&team, 2),
                    player_on_id: id_of(&team, 8),
                }
            )))
        );
        assert!(parse_command("card 5 green", &team, &game).is_err());
    }

    #[test]
    fn test_penalties() {
        let (team, game) = fixture();
        assert_eq!(
            parse_command("pen for scored 7", &team, &game),
            Ok(Command::Action(MatchAction::AppendEvent(EventKind::Penalty {
                is_for_team: true,
                outcome: PenaltyOutcome::Scored,
                player_id: Some(id_of(&team, 7)),
            })))
        );
        assert_eq!(
            parse_command("pen against saved", &team, &game),
            Ok(Command::Action(MatchAction::AppendEvent(EventKind::Penalty {
                is_for_team: false,
                outcome: PenaltyOutcome::Saved,
                player_id: None,
            })))
        );
        assert!(parse_command("pen against missed 7", &team, &game).is_err());
    }

    #[test]
    fn test_delete_by_prefix() {
        let (team, mut game) = fixture();
        let now = chrono::Utc::now();
        let event = game
            .apply(
                &MatchAction::AppendEvent(EventKind::GoalAgainst {
                    goal_type: GoalType::OpenPlay,
                }),
                now,
            )
            .unwrap()
            .unwrap();
        let prefix = &event.id.to_string()[..8];

        assert_eq!(
            parse_command(&format!("delete {prefix}"), &team, &game),
            Ok(Command::Action(MatchAction::RemoveEvent(event.id)))
        );
        assert!(parse_command("delete", &team, &game).is_err());
    }

    #[test]
    fn test_every_pattern_compiles() {
        assert_eq!(parsers().len(), PATTERNS.len());
    }

    #[test]
    fn test_unknown_command() {
        let (team, game) = fixture();
        let err = parse_command("celebrate", &team, &game).unwrap_err();
        assert!(err.contains("help"));
    }
}
