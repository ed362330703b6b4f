//! Storage error types.

use sea_orm::DbErr;
use thiserror::Error;

/// Errors raised by the storage layer. Data-access failures are carried
/// unmodified so callers can translate or propagate them.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),

    #[error("database engine '{name}' is not initialized; call setup_named(\"{name}\", ..) first")]
    UnknownEngine { name: String },
}

impl StorageError {
    pub fn unknown_engine(name: impl Into<String>) -> Self {
        StorageError::UnknownEngine { name: name.into() }
    }
}
