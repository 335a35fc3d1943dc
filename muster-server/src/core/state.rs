use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::registration::RegistrationEngine;

/// Shared server state handed to every handler
///
/// Holds the configuration, the SQLite pool and the registration engine.
/// Cloning is cheap; the pool is reference-counted internally.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Registration engine (sole writer of capacity counters and waitlists)
    pub engine: RegistrationEngine,
}

impl ServerState {
    /// Assemble state around an already-opened pool (used by tests)
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let engine = RegistrationEngine::new(pool.clone());
        Self {
            config,
            pool,
            engine,
        }
    }

    /// Initialise the database and build the state
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be opened or migrated; there is
    /// nothing useful the server can do without its store.
    pub async fn initialize(config: &Config) -> Self {
        let db = DbService::new(&config.database_path)
            .await
            .expect("Failed to initialize database");
        Self::new(config.clone(), db.pool)
    }
}
