pub mod config;
pub mod error;
pub mod input;
pub mod report;
pub mod session;

pub use config::TrackerConfig;
pub use error::TrackerError;
pub use input::{parse_command, Command};
pub use session::{season_stats, Autosave, MatchSession};
