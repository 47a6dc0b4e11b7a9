//! Shelf Core
//!
//! Domain types, store traits and error handling shared by the Shelf
//! audio library crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `NewTrack`
//! - **Store Traits**: `BlobStore` (audio payloads on disk) and
//!   `MetadataStore` (one row per track)
//! - **Error Handling**: Unified `ShelfError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use shelf_core::types::{NewTrack, Track, TrackId};
//!
//! let new_track = NewTrack::new("song1.mp3", "1718000000000-abc.mp3");
//! assert_eq!(new_track.file_path, "/uploads/1718000000000-abc.mp3");
//!
//! let track = Track::new(TrackId::new(1), new_track.title, new_track.file_path);
//! assert_eq!(track.stored_name(), "1718000000000-abc.mp3");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

pub use error::{Result, ShelfError};
pub use storage::{BlobStore, MetadataStore};
pub use types::{NewTrack, Track, TrackId, PUBLIC_PREFIX};
