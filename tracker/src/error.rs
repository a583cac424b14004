use database::DatabaseError;
use thiserror::Error;
use types::MatchError;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("{0}")]
    Match(#[from] MatchError),

    #[error("Storage error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Input(String),
}
