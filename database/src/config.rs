use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::DatabaseError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

impl DatabaseConfig {
    pub fn from_cli_or_env_or_yaml(cli_arg: Option<String>, yaml_config: Option<String>) -> Self {
        let url = if let Some(arg) = cli_arg {
            arg
        } else if let Ok(env) = std::env::var("DATABASE_URL") {
            env
        } else if let Some(yaml) = yaml_config {
            yaml
        } else {
            DEFAULT_DATABASE_URL.to_string()
        };

        Self { url, pool_size: 4 }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }

    pub async fn create_pool(&self) -> Result<SqlitePool, DatabaseError> {
        let options = SqliteConnectOptions::from_str(&self.url)
            .map_err(|e| DatabaseError::Connection(e.to_string()))?
            .create_if_missing(true);
        let mut pool_options = SqlitePoolOptions::new().max_connections(self.pool_size);
        if self.is_in_memory() {
            // every connection to an in-memory database gets its own empty
            // copy, so keep exactly one alive for the life of the pool
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        tracing::info!("Opening database {}", self.url);
        pool_options
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))
    }
}
