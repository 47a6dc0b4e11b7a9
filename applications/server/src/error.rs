/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shelf_core::{ShelfError, TrackId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("No file received")]
    NoFileProvided,

    #[error("Song not found: {0}")]
    NotFound(String),

    #[error("Failed to write blob {name}: {source}")]
    StorageWriteFailed { name: String, source: ShelfError },

    #[error("Failed to read uploads directory: {0}")]
    StorageReadFailed(ShelfError),

    /// Never returned to clients; deletes log it and carry on
    #[error("Failed to unlink blob {name}: {source}")]
    StorageUnlinkFailed { name: String, source: ShelfError },

    #[error("Failed to save song: {0}")]
    MetadataWriteFailed(ShelfError),

    #[error("Failed to read songs: {0}")]
    MetadataReadFailed(ShelfError),

    #[error("Failed to delete songs: {0}")]
    MetadataDeleteFailed(ShelfError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(id.to_string())
    }

    pub fn track_not_found(id: TrackId) -> Self {
        Self::not_found(id)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::NoFileProvided | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let error_message = match self {
            ServerError::NoFileProvided => "No file received".to_string(),
            ServerError::NotFound(_) => "Song not found".to_string(),
            ServerError::BadRequest(msg) | ServerError::PayloadTooLarge(msg) => msg,
            ServerError::StorageWriteFailed { .. }
            | ServerError::StorageReadFailed(_)
            | ServerError::StorageUnlinkFailed { .. } => "Storage error".to_string(),
            ServerError::MetadataWriteFailed(_)
            | ServerError::MetadataReadFailed(_)
            | ServerError::MetadataDeleteFailed(_) => "Database error".to_string(),
            ServerError::Config(_) => "Configuration error".to_string(),
            ServerError::Io(_) => "IO error".to_string(),
            ServerError::Internal(_) => "Internal server error".to_string(),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
