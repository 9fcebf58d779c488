//! Database operations for the QuickBite `SQLite` store.
//!
//! Six addressable collections, keyed by id:
//!
//! - `category` - menu categories with their enabled flags
//! - `menu_item` - the catalog (price, options, includes, popular flag)
//! - `menu_settings` - the settings singleton (row `'default'`)
//! - `customer` - checkout contacts, keyed by unique email
//! - `food_order` / `order_line` - the order ledger; line price and quantity
//!   are immutable once written
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p quickbite-cli -- migrate
//! ```
//! The server never runs them automatically.

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use quickbite_core::{InvalidTransition, ValidationError};

pub mod catalog;
pub mod orders;

pub use catalog::CatalogRepository;
pub use orders::OrderRepository;

/// Embedded migrations for the QuickBite database.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Illegal order status change.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
}

/// Error from store operations that also validate caller input.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The caller's input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backing store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(err))
    }
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// Foreign keys are enforced and the database file is created on first use.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Parse a stored decimal string, treating failure as corruption.
pub(crate) fn parse_stored_decimal(raw: &str, column: &str) -> Result<Decimal, RepositoryError> {
    raw.parse().map_err(|_| {
        RepositoryError::DataCorruption(format!("invalid decimal in {column}: {raw:?}"))
    })
}

/// Parse a stored JSON label array, treating failure as corruption.
pub(crate) fn parse_stored_labels(raw: &str, column: &str) -> Result<Vec<String>, RepositoryError> {
    serde_json::from_str(raw).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid label array in {column}: {e}"))
    })
}
