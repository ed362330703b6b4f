//! Repository base bound to a named engine.

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, Select, TransactionTrait};

use keel_api_types::{PagedResponse, PageParams};

use crate::error::StorageError;
use crate::manager::{DbManager, DEFAULT_ENGINE};
use crate::paginate;

/// Base for SQL repositories. The engine handle is resolved once at
/// construction, so a repository stays pinned to its engine (e.g. a read
/// replica) for its whole lifetime.
#[derive(Debug, Clone)]
pub struct SqlRepository {
    engine_name: String,
    connection: DatabaseConnection,
}

impl SqlRepository {
    /// Bind to the default engine.
    pub fn new(manager: &DbManager) -> Result<Self, StorageError> {
        Self::named(manager, DEFAULT_ENGINE)
    }

    /// Bind to a named engine.
    pub fn named(manager: &DbManager, name: &str) -> Result<Self, StorageError> {
        Ok(Self {
            engine_name: name.to_string(),
            connection: manager.get(name)?,
        })
    }

    pub fn engine_name(&self) -> &str {
        &self.engine_name
    }

    /// The bound engine handle.
    pub fn conn(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Open a transaction on the bound engine. Rolls back on drop unless
    /// committed.
    pub async fn begin(&self) -> Result<DatabaseTransaction, DbErr> {
        self.connection.begin().await
    }

    /// Paginate a select against the bound engine.
    pub async fn paginate<E>(
        &self,
        select: Select<E>,
        params: &PageParams,
    ) -> Result<PagedResponse<E::Model>, DbErr>
    where
        E: EntityTrait,
    {
        paginate::paginate(&self.connection, select, params).await
    }
}
