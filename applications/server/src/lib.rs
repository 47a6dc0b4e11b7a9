//! Shelf Server Library
//!
//! Self-hosted audio library: uploads land in a directory on disk, one row
//! per upload lands in SQLite, and a small HTTP API lists, serves and
//! deletes them.
//!
//! This library exposes the core components for the binary and for tests.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{FileStorage, LibraryService, UploadedFile};
pub use state::AppState;
