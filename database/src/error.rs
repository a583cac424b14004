use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Query execution error: {0}")]
    Query(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Match not found: {0}")]
    MatchNotFound(Uuid),

    #[error("Team not found: {0}")]
    TeamNotFound(Uuid),

    #[error("UUID parsing error: {0}")]
    UuidParsing(#[from] uuid::Error),
}
