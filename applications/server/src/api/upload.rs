/// Upload API route
use crate::{
    error::{Result, ServerError},
    services::UploadedFile,
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use shelf_core::Track;

/// Multipart field the web player sends the file in
pub const UPLOAD_FIELD: &str = "song";

/// POST /upload
/// Store one audio file sent as multipart/form-data
pub async fn upload_song(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<Track>> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(rejection.body_text())
        } else {
            ServerError::BadRequest(rejection.body_text())
        }
    })?;

    let file = read_uploaded_file(&headers, body).await?;
    let track = app_state.library.upload(file).await?;

    Ok(Json(track))
}

/// Pull the uploaded file out of a multipart body
///
/// Prefers the `song` field; otherwise takes the first field that carries
/// a filename. Requests that are not multipart carry no file at all.
async fn read_uploaded_file(headers: &HeaderMap, body: Bytes) -> Result<Option<UploadedFile>> {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
    else {
        return Ok(None);
    };

    if !content_type.starts_with("multipart/form-data") {
        return Ok(None);
    }

    let boundary = multer::parse_boundary(content_type)
        .map_err(|e| ServerError::BadRequest(format!("Invalid multipart boundary: {}", e)))?;

    // Convert Bytes to a stream for multer
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut fallback: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {}", e)))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let is_song_field = field.name() == Some(UPLOAD_FIELD);

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Failed to read file: {}", e)))?;
        let file = UploadedFile::new(filename, bytes);

        if is_song_field {
            return Ok(Some(file));
        }
        fallback.get_or_insert(file);
    }

    Ok(fallback)
}
