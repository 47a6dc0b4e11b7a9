/// API route modules
pub mod health;
pub mod songs;
pub mod upload;

use crate::{config::ServerConfig, state::AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full HTTP surface
///
/// `/uploads` serves blobs straight from the uploads directory; everything
/// unmatched falls through to the web directory when one is configured.
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/health", get(health::health))
        .route(
            "/upload",
            post(upload::upload_song).layer(DefaultBodyLimit::max(config.upload.max_bytes)),
        )
        .route("/songs", get(songs::list_songs))
        // Static segment wins over `:id`, so "all" never reaches delete_song
        .route("/songs/all", delete(songs::delete_all_songs))
        .route("/songs/:id", delete(songs::delete_song))
        .nest_service("/uploads", ServeDir::new(&config.storage.uploads_dir));

    let router = match &config.storage.web_dir {
        Some(web_dir) => router.fallback_service(ServeDir::new(web_dir)),
        None => router,
    };

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
