//! Shelf Storage
//!
//! `SQLite` metadata store for the Shelf audio library.
//!
//! The schema is a single `songs` table mapping a row id to the uploaded
//! filename and the public path of its blob. Queries live in the `songs`
//! slice; [`SqliteMetadataStore`] adapts them to the
//! [`shelf_core::MetadataStore`] trait.
//!
//! # Example
//!
//! ```rust,no_run
//! use shelf_core::{MetadataStore, NewTrack};
//! use shelf_storage::SqliteMetadataStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteMetadataStore::connect("sqlite://music.db").await?;
//!
//! let track = store.insert(NewTrack::new("song1.mp3", "1700000000000-ab.mp3")).await?;
//! let tracks = store.select_all().await?;
//! assert_eq!(tracks[0].id, track.id);
//!
//! store.close().await;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

pub mod songs;

pub use context::SqliteMetadataStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before the pool is handed to a store.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://music.db`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating SQLite pool for {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}
