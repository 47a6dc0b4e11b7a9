//! Store traits consumed by the library service
//!
//! The library keeps two independent stores: blobs on disk and one metadata
//! row per track. Neither trait offers transactions across both; callers
//! decide how to react when one side fails.

use crate::error::Result;
use crate::types::{NewTrack, Track, TrackId};
use async_trait::async_trait;

/// Flat namespace of audio payloads
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `bytes` under `name`, replacing any existing blob
    async fn write(&self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Remove the blob called `name`
    async fn unlink(&self, name: &str) -> Result<()>;

    /// Names of every blob currently present
    async fn list_names(&self) -> Result<Vec<String>>;
}

/// Track metadata table
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Insert a row and return it with its assigned id
    async fn insert(&self, track: NewTrack) -> Result<Track>;

    /// All rows in insertion order
    async fn select_all(&self) -> Result<Vec<Track>>;

    /// Row by id
    async fn select_by_id(&self, id: TrackId) -> Result<Option<Track>>;

    /// Delete one row, returning the number of rows affected
    async fn delete_by_id(&self, id: TrackId) -> Result<u64>;

    /// Delete every row, returning the number of rows affected
    async fn delete_all(&self) -> Result<u64>;

    /// Release connections held by the store
    async fn close(&self) {}
}
