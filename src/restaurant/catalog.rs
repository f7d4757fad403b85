//! Read and write access seams over the relational store.
//!
//! Handlers only see [`Catalog`] (menu reads) and [`Ledger`] (booking
//! writes); the SQLite implementation lives in `crate::store`.

use async_trait::async_trait;
use thiserror::Error;

use crate::restaurant::models::{Booking, MenuItem, NewBooking};

/// Store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested identifier does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Rejected before reaching the database.
    #[error("Invalid {field}: {message}")]
    Invalid { field: &'static str, message: String },

    /// Connection loss, constraint violation, or any other database failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read-only access to menu items.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Every stored item, ordered by id.
    async fn list_all(&self) -> StoreResult<Vec<MenuItem>>;

    /// The item with `id`, or [`StoreError::NotFound`].
    async fn get_by_id(&self, id: i64) -> StoreResult<MenuItem>;
}

/// Write access to bookings.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Persist an already-validated booking and return it with its id.
    async fn create(&self, booking: NewBooking) -> StoreResult<Booking>;
}
