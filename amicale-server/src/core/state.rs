//! Server state
//!
//! [`ServerState`] holds the shared resources every handler needs: the
//! configuration and the SQLite pool. Cloning is cheap (the pool is an
//! internal Arc), so axum clones it per request.

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
}

impl ServerState {
    /// Open the database, run migrations and assemble the state.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self {
            config: config.clone(),
            pool: db.pool,
        })
    }

    /// Build a state around an existing pool (tests).
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }
}
