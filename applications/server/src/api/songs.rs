/// Songs API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shelf_core::{Track, TrackId};

/// GET /songs
pub async fn list_songs(State(app_state): State<AppState>) -> Result<Json<Vec<Track>>> {
    let tracks = app_state.library.list().await?;
    Ok(Json(tracks))
}

/// DELETE /songs/:id
///
/// Ids that are not integers can never match a row, so they are reported
/// as not found rather than as a bad request.
pub async fn delete_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<(StatusCode, &'static str)> {
    let track_id: TrackId = id.parse().map_err(|_| ServerError::not_found(&id))?;

    app_state.library.delete_one(track_id).await?;

    Ok((StatusCode::OK, "Song deleted."))
}

/// DELETE /songs/all
pub async fn delete_all_songs(
    State(app_state): State<AppState>,
) -> Result<(StatusCode, &'static str)> {
    app_state.library.delete_all().await?;

    Ok((StatusCode::OK, "All songs deleted."))
}
