//! Library service - keeps the blob directory and the songs table in step
//!
//! The two stores share no transaction. Uploads write the blob first and
//! the row second; deletes remove blobs first (best effort) and rows second.
//! A failed blob unlink never fails a delete: it is logged and the row is
//! removed anyway, which can leave a file on disk with no row.

use crate::error::{Result, ServerError};
use bytes::Bytes;
use futures_util::future::join_all;
use shelf_core::{
    storage::{BlobStore, MetadataStore},
    NewTrack, Track, TrackId,
};
use std::path::Path;
use std::sync::Arc;

/// Longest extension kept from an uploaded filename
const MAX_EXTENSION_LEN: usize = 16;

/// A file received from a client
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_filename: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(original_filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            original_filename: original_filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Result of deleting a single song
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub rows_affected: u64,
    /// False when the blob could not be unlinked (already gone, permissions, ...)
    pub blob_removed: bool,
}

/// Result of deleting every song
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeOutcome {
    pub files_removed: usize,
    pub files_failed: usize,
    pub rows_affected: u64,
}

pub struct LibraryService {
    blobs: Arc<dyn BlobStore>,
    metadata: Arc<dyn MetadataStore>,
}

impl LibraryService {
    pub fn new(blobs: Arc<dyn BlobStore>, metadata: Arc<dyn MetadataStore>) -> Self {
        Self { blobs, metadata }
    }

    /// Store an uploaded file and record it
    ///
    /// If the row insert fails the freshly written blob is unlinked again
    /// before the error is returned.
    pub async fn upload(&self, file: Option<UploadedFile>) -> Result<Track> {
        let file = file.ok_or(ServerError::NoFileProvided)?;
        let stored_name = generate_stored_name(&file.original_filename);

        self.blobs
            .write(&stored_name, &file.bytes)
            .await
            .map_err(|source| ServerError::StorageWriteFailed {
                name: stored_name.clone(),
                source,
            })?;

        let new_track = NewTrack::new(file.original_filename, &stored_name);
        let track = match self.metadata.insert(new_track).await {
            Ok(track) => track,
            Err(err) => {
                if let Err(source) = self.blobs.unlink(&stored_name).await {
                    log_unlink_failure(stored_name, source);
                }
                return Err(ServerError::MetadataWriteFailed(err));
            }
        };

        tracing::info!(
            "Stored song {} ({:?}, {} bytes) at {}",
            track.id,
            track.title,
            file.bytes.len(),
            track.file_path
        );

        Ok(track)
    }

    /// Every song in insertion order
    pub async fn list(&self) -> Result<Vec<Track>> {
        self.metadata
            .select_all()
            .await
            .map_err(ServerError::MetadataReadFailed)
    }

    /// Delete one song, unlinking its blob on a best-effort basis
    pub async fn delete_one(&self, id: TrackId) -> Result<DeleteOutcome> {
        let track = self
            .metadata
            .select_by_id(id)
            .await
            .map_err(ServerError::MetadataReadFailed)?
            .ok_or_else(|| ServerError::track_not_found(id))?;

        let stored_name = track.stored_name();
        let blob_removed = match self.blobs.unlink(stored_name).await {
            Ok(()) => true,
            Err(source) => {
                log_unlink_failure(stored_name.to_string(), source);
                false
            }
        };

        let rows_affected = self
            .metadata
            .delete_by_id(id)
            .await
            .map_err(ServerError::MetadataDeleteFailed)?;

        tracing::info!("Song {} deleted. Rows affected: {}", id, rows_affected);

        Ok(DeleteOutcome {
            rows_affected,
            blob_removed,
        })
    }

    /// Delete every blob in the uploads directory, then every row
    ///
    /// Files are found by listing the directory, not by walking the rows,
    /// so stray files are removed as well.
    pub async fn delete_all(&self) -> Result<PurgeOutcome> {
        let names = self
            .blobs
            .list_names()
            .await
            .map_err(ServerError::StorageReadFailed)?;

        let results = join_all(names.iter().map(|name| self.blobs.unlink(name))).await;

        let mut outcome = PurgeOutcome::default();
        for (name, result) in names.into_iter().zip(results) {
            match result {
                Ok(()) => outcome.files_removed += 1,
                Err(source) => {
                    outcome.files_failed += 1;
                    log_unlink_failure(name, source);
                }
            }
        }

        outcome.rows_affected = self
            .metadata
            .delete_all()
            .await
            .map_err(ServerError::MetadataDeleteFailed)?;

        tracing::info!(
            "All songs deleted. Rows affected: {}, files removed: {}, files failed: {}",
            outcome.rows_affected,
            outcome.files_removed,
            outcome.files_failed
        );

        Ok(outcome)
    }

    /// Release the metadata store's connections
    pub async fn close(&self) {
        self.metadata.close().await;
    }
}

fn log_unlink_failure(name: String, source: shelf_core::ShelfError) {
    let err = ServerError::StorageUnlinkFailed { name, source };
    tracing::warn!("{}", err);
}

/// On-disk name for a new upload: `<unix millis>-<uuid><.ext>`
///
/// The extension is copied from the original filename when it is short
/// and alphanumeric, otherwise dropped.
pub fn generate_stored_name(original_filename: &str) -> String {
    let extension = Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();

    format!(
        "{}-{}{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple(),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_name_keeps_extension() {
        let name = generate_stored_name("song1.mp3");
        assert!(name.ends_with(".mp3"), "{}", name);

        let (millis, rest) = name.split_once('-').unwrap();
        assert!(millis.parse::<i64>().unwrap() > 0);
        assert_eq!(rest.len(), 32 + ".mp3".len());
    }

    #[test]
    fn test_stored_name_drops_odd_extensions() {
        for original in ["README", ".bashrc", "weird.mp3\\..\\x", "a.ext with space", "x."] {
            let name = generate_stored_name(original);
            assert!(!name.contains('.'), "{:?} -> {}", original, name);
        }
    }

    #[test]
    fn test_stored_names_are_unique() {
        let a = generate_stored_name("same.mp3");
        let b = generate_stored_name("same.mp3");
        assert_ne!(a, b);
    }
}
