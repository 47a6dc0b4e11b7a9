//! Track type: one uploaded audio file and its public path

use super::ids::TrackId;
use serde::{Deserialize, Serialize};

/// URL prefix under which stored blobs are served
pub const PUBLIC_PREFIX: &str = "/uploads";

/// A track as stored in the metadata table
///
/// Serializes as `{ "id", "title", "file_path" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Row id assigned by the metadata store
    pub id: TrackId,
    /// Original uploaded filename, unsanitized
    pub title: String,
    /// Public path of the blob, `/uploads/<stored name>`
    pub file_path: String,
}

impl Track {
    /// Create a track from its stored columns
    pub fn new(id: TrackId, title: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            file_path: file_path.into(),
        }
    }

    /// On-disk name of the blob (last segment of `file_path`)
    pub fn stored_name(&self) -> &str {
        stored_name_of(&self.file_path)
    }
}

/// Data for inserting a new track row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrack {
    /// Original uploaded filename
    pub title: String,
    /// Public path of the stored blob
    pub file_path: String,
}

impl NewTrack {
    /// Build the row for a blob stored under `stored_name`
    pub fn new(title: impl Into<String>, stored_name: &str) -> Self {
        Self {
            title: title.into(),
            file_path: public_path(stored_name),
        }
    }
}

/// Public path for a stored blob name
pub fn public_path(stored_name: &str) -> String {
    format!("{}/{}", PUBLIC_PREFIX, stored_name)
}

/// Inverse of [`public_path`]; tolerant of rows written with other prefixes
pub fn stored_name_of(file_path: &str) -> &str {
    file_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_path)
}
