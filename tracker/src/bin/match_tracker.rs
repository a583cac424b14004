use std::io::Write;
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use database::{DatabaseConfig, MatchStore, SqliteStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use types::{Location, MatchFormat, MatchSetup, Team};
use uuid::Uuid;

use tracker::{report, Command, MatchSession, TrackerConfig, TrackerError};

#[derive(Parser, Debug)]
struct Params {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides DATABASE_URL and the config file
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Subcommands,
}

#[derive(Subcommand, Debug)]
enum Subcommands {
    /// Create a team and print its id
    AddTeam {
        #[arg(short, long)]
        name: String,
    },
    AddPlayer {
        #[arg(short, long)]
        team: Uuid,
        #[arg(short, long)]
        name: String,
        #[arg(short = 'N', long)]
        number: Option<u8>,
    },
    Teams,
    /// Set up a match from squad numbers and start tracking it
    NewMatch {
        #[arg(short, long)]
        team: Uuid,
        #[arg(short, long)]
        opposition: String,
        #[arg(long)]
        away: bool,
        #[arg(short, long)]
        format: Option<MatchFormat>,
        /// Minutes
        #[arg(short, long)]
        duration: Option<u32>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(short, long, value_delimiter = ',')]
        start: Vec<u8>,
        #[arg(short, long, value_delimiter = ',')]
        bench: Vec<u8>,
    },
    /// Resume tracking a saved match
    Track {
        #[arg(short, long)]
        id: Uuid,
    },
    Matches {
        #[arg(short, long)]
        team: Uuid,
    },
    Summary {
        #[arg(short, long)]
        id: Uuid,
    },
    Season {
        #[arg(short, long)]
        team: Uuid,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Params::parse();
    log::info!("args: {args:?}");
    if let Err(err) = run(args).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(args: Params) -> Result<(), TrackerError> {
    let config = TrackerConfig::load_or_default(args.config.as_deref())?;
    let db_config =
        DatabaseConfig::from_cli_or_env_or_yaml(args.database_url, config.database_url.clone());
    if db_config.is_in_memory() {
        log::warn!("Using an in-memory database, nothing will survive this process");
    }
    let pool = db_config.create_pool().await?;
    let mut store = SqliteStore::new(pool);
    store.run_migrations().await?;

    match args.command {
        Subcommands::AddTeam { name } => {
            let team = Team::new(name);
            store.save_team(&team).await?;
            println!("{}", team.id);
        }
        Subcommands::AddPlayer {
            team,
            name,
            number,
        } => {
            let mut team = load_team(&mut store, team).await?;
            if let Some(number) = number {
                if let Some(existing) = team.player_by_number(number) {
                    return Err(TrackerError::Input(format!("#{number} is already {existing}")));
                }
            }
            let player_id = team.add_player(name, number);
            store.save_team(&team).await?;
            println!("{player_id}");
        }
        Subcommands::Teams => {
            for team in store.list_teams().await? {
                println!(
                    "{}  {} ({} players, W{} D{} L{})",
                    team.id,
                    team.name,
                    team.players.len(),
                    team.wins,
                    team.draws,
                    team.losses
                );
            }
        }
        Subcommands::NewMatch {
            team,
            opposition,
            away,
            format,
            duration,
            date,
            start,
            bench,
        } => {
            let team = load_team(&mut store, team).await?;
            let setup = MatchSetup {
                team_id: team.id,
                opposition,
                location: if away { Location::Away } else { Location::Home },
                format: format.unwrap_or(config.default_format),
                planned_duration: duration.unwrap_or(config.default_planned_duration),
                date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
                starting_lineup: squad_ids(&team, &start)?,
                substitutes: squad_ids(&team, &bench)?,
            };
            let session =
                MatchSession::create(&mut store, setup, config.autosave_interval(), Utc::now())
                    .await?;
            println!("Match {}", session.game().id);
            track(session).await?;
        }
        Subcommands::Track { id } => {
            let session = MatchSession::open(&mut store, id, config.autosave_interval()).await?;
            track(session).await?;
        }
        Subcommands::Matches { team } => {
            for game in store.list_matches(team).await? {
                let state = if game.is_completed() { "FT" } else { "live" };
                println!("{}  {game}  {} {state}", game.id, game.score());
            }
        }
        Subcommands::Summary { id } => {
            let session = MatchSession::open(&mut store, id, config.autosave_interval()).await?;
            let now = Utc::now();
            println!("{}", report::status_line(session.game(), session.team(), now));
            println!("{}", report::timeline(session.game(), session.team()));
            println!("{}", report::match_stats(session.game(), session.team(), now));
        }
        Subcommands::Season { team } => {
            let (team, season) = tracker::season_stats(&mut store, team).await?;
            println!("{}", report::season(&team, &season));
        }
    }
    Ok(())
}

async fn load_team(store: &mut SqliteStore, team_id: Uuid) -> Result<Team, TrackerError> {
    store
        .load_team(team_id)
        .await?
        .ok_or_else(|| TrackerError::Input(format!("No team with id {team_id}")))
}

fn squad_ids(team: &Team, numbers: &[u8]) -> Result<Vec<Uuid>, TrackerError> {
    numbers
        .iter()
        .map(|&number| {
            team.player_by_number(number)
                .map(|player| player.id)
                .ok_or_else(|| TrackerError::Input(format!("Nobody in {} wears #{number}", team.name)))
        })
        .collect()
}

/// Reads commands from stdin until the manager quits or stdin closes.
async fn track(mut session: MatchSession<'_>) -> Result<(), TrackerError> {
    println!("{}", report::status_line(session.game(), session.team(), Utc::now()));
    println!("{}", report::roster(session.game(), session.team()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} >> ", session.game().clock_display(Utc::now()));
        let _ = std::io::stdout().flush();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        let command = match tracker::parse_command(&line, session.team(), session.game()) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        let now = Utc::now();
        match command {
            Command::Action(action) => match session.dispatch(action, now).await {
                Ok(Some(event)) => {
                    println!("{}", report::describe_event(session.game(), session.team(), &event))
                }
                Ok(None) => {
                    println!("{}", report::status_line(session.game(), session.team(), now))
                }
                Err(err) => println!("{err}"),
            },
            Command::Status => {
                println!("{}", report::status_line(session.game(), session.team(), now));
                println!("{}", report::roster(session.game(), session.team()));
            }
            Command::Timeline => println!("{}", report::timeline(session.game(), session.team())),
            Command::Stats => {
                println!("{}", report::match_stats(session.game(), session.team(), now))
            }
            Command::Help => println!("{}", tracker::input::HELP),
            Command::Quit => break,
        }
        if session.game().is_completed() {
            println!("{}", report::match_stats(session.game(), session.team(), now));
            break;
        }
    }
    session.flush(Utc::now()).await
}
