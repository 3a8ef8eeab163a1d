//! Mixtape Storage
//!
//! `SQLite` persistence layer for the Mixtape media-library backend.
//!
//! # Architecture
//!
//! - **Vertical slicing**: each feature owns its own queries and logic
//!   (`users`, `songs`, `albums`, `playlists`, `collaboration`).
//! - **No ambient connection**: every function takes the pool (or a
//!   transaction) explicitly; callers inject it at construction.
//! - **State machine in the store**: the collaboration slice owns the
//!   pending/accepted/rejected transitions, including the transactional
//!   membership grant on accept.
//!
//! # Example
//!
//! ```rust,no_run
//! use mixtape_storage::{create_pool, run_migrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://mixtape.db").await?;
//! run_migrations(&pool).await?;
//!
//! let users = mixtape_storage::users::get_all(&pool).await?;
//! # Ok(())
//! # }
//! ```

// Vertical slices
pub mod albums;
pub mod collaboration;
pub mod playlists;
pub mod songs;
pub mod users;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Called once at application start to bring the schema up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://mixtape.db`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
