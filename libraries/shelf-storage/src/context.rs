use crate::{create_pool, error::StorageError, run_migrations, songs};
use async_trait::async_trait;
use shelf_core::{error::Result, storage::MetadataStore, types::*};
use sqlx::SqlitePool;

/// Metadata store backed by a `SQLite` pool
pub struct SqliteMetadataStore {
    pool: SqlitePool,
}

impl SqliteMetadataStore {
    /// Wrap a pool whose migrations have already run
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database at `database_url` and migrate it
    pub async fn connect(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl MetadataStore for SqliteMetadataStore {
    async fn insert(&self, track: NewTrack) -> Result<Track> {
        songs::create(&self.pool, track).await
    }

    async fn select_all(&self) -> Result<Vec<Track>> {
        songs::get_all(&self.pool).await
    }

    async fn select_by_id(&self, id: TrackId) -> Result<Option<Track>> {
        songs::get_by_id(&self.pool, id).await
    }

    async fn delete_by_id(&self, id: TrackId) -> Result<u64> {
        songs::delete_by_id(&self.pool, id).await
    }

    async fn delete_all(&self) -> Result<u64> {
        songs::delete_all(&self.pool).await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
