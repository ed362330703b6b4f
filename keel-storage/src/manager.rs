//! Named database engine registry with explicit lifecycle.
//!
//! `DbManager` is an explicitly constructed value passed to the code that
//! needs it; there is no process-wide singleton. Engines are registered
//! under names (`default` plus optional alternates for read/write
//! splitting) and closed together on shutdown.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction,
    EntityTrait, Select, Statement, TransactionTrait,
};
use tracing::{debug, info, warn};

use keel_api_types::{PagedResponse, PageParams};

use crate::error::StorageError;
use crate::paginate;

/// Name of the default engine.
pub const DEFAULT_ENGINE: &str = "default";

/// Connection pool settings for one engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub sqlx_logging: bool,
}

impl EngineConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            sqlx_logging: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Registry of named sea-orm engines.
#[derive(Debug, Default)]
pub struct DbManager {
    engines: RwLock<HashMap<String, DatabaseConnection>>,
}

impl DbManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect and register the default engine.
    pub async fn setup(&self, config: EngineConfig) -> Result<(), StorageError> {
        self.setup_named(DEFAULT_ENGINE, config).await
    }

    /// Connect and register an engine under `name`. Registering the same
    /// name twice keeps the existing engine and logs a warning.
    pub async fn setup_named(&self, name: &str, config: EngineConfig) -> Result<(), StorageError> {
        if self.read_engines().contains_key(name) {
            warn!(engine = name, "database engine already configured, skipping duplicate setup");
            return Ok(());
        }

        let mut options = ConnectOptions::new(&config.url);
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .sqlx_logging(config.sqlx_logging)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let connection = Database::connect(options).await?;

        let mut engines = self.write_engines();
        if engines.contains_key(name) {
            // Lost a setup race; the new pool is dropped and closes lazily.
            warn!(engine = name, "database engine already configured, skipping duplicate setup");
            return Ok(());
        }
        engines.insert(name.to_string(), connection);
        info!(engine = name, "database engine initialized");
        Ok(())
    }

    /// A handle to a registered engine. Handles are cheap clones of the
    /// underlying pool.
    pub fn get(&self, name: &str) -> Result<DatabaseConnection, StorageError> {
        self.read_engines()
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::unknown_engine(name))
    }

    /// A handle to the default engine.
    pub fn default_engine(&self) -> Result<DatabaseConnection, StorageError> {
        self.get(DEFAULT_ENGINE)
    }

    /// Open a transaction on a named engine. The transaction rolls back on
    /// drop unless committed, so early returns and cancellation cannot leak
    /// uncommitted work.
    pub async fn begin(&self, name: &str) -> Result<DatabaseTransaction, StorageError> {
        Ok(self.get(name)?.begin().await?)
    }

    /// Create the table backing `entity` on a named engine if it is missing.
    /// The DDL is derived from the entity definition, see
    /// [`crate::schema::create_table`].
    pub async fn create_table<E>(&self, name: &str, entity: E) -> Result<(), StorageError>
    where
        E: EntityTrait,
    {
        let connection = self.get(name)?;
        Ok(crate::schema::create_table(&connection, entity).await?)
    }

    /// Check that a registered engine answers a trivial query.
    pub async fn verify(&self, name: &str) -> Result<(), StorageError> {
        let connection = self.get(name)?;
        let backend = connection.get_database_backend();
        connection
            .query_one(Statement::from_string(backend, "SELECT 1"))
            .await?;
        info!(engine = name, "database connection verified");
        Ok(())
    }

    /// Paginate a select against the default engine. For caller-managed
    /// connections or transactions use [`paginate::paginate`] directly.
    pub async fn paginate<E>(
        &self,
        select: Select<E>,
        params: &PageParams,
    ) -> Result<PagedResponse<E::Model>, StorageError>
    where
        E: EntityTrait,
    {
        let connection = self.default_engine()?;
        Ok(paginate::paginate(&connection, select, params).await?)
    }

    /// Close every registered engine and clear the registry.
    pub async fn shutdown(&self) -> Result<(), StorageError> {
        let drained: Vec<(String, DatabaseConnection)> =
            self.write_engines().drain().collect();
        for (name, connection) in drained {
            connection.close().await?;
            debug!(engine = %name, "database engine closed");
        }
        Ok(())
    }

    fn read_engines(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, DatabaseConnection>> {
        self.engines.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_engines(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<String, DatabaseConnection>> {
        self.engines.write().unwrap_or_else(|e| e.into_inner())
    }
}
