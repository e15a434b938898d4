//! Persistence gateway implementations.
//!
//! The domain services depend on the [`CartStore`](crate::domain::carts::store::CartStore)
//! and [`ProductStore`](crate::domain::products::store::ProductStore) traits;
//! this module provides the production Postgres implementation and an
//! in-memory fake for tests.

mod memory;
mod postgres;

use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors surfaced by a persistence gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A storage-level uniqueness constraint rejected the write.
    #[error("conflicting write")]
    Conflict,

    /// A referenced row is absent (foreign key violation).
    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    /// A check constraint rejected the write.
    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::Conflict,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
