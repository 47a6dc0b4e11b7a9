/// Common test utilities and fixtures
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use shelf_server::{
    api, config::ServerConfig, services::FileStorage, state::AppState, LibraryService,
};
use shelf_storage::SqliteMetadataStore;
use std::{path::PathBuf, sync::Arc};
use tempfile::TempDir;

pub const BOUNDARY: &str = "shelf-test-boundary";

/// Router backed by a real SQLite file and uploads directory in a temp dir
pub struct TestApp {
    pub router: Router,
    pub library: Arc<LibraryService>,
    pub uploads_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(adjust: impl FnOnce(&mut ServerConfig)) -> Self {
        let temp_dir = TempDir::new().unwrap();

        let mut config = ServerConfig::default();
        config.storage.uploads_dir = temp_dir.path().join("uploads");
        config.storage.database_url =
            format!("sqlite://{}", temp_dir.path().join("music.db").display());
        adjust(&mut config);

        let file_storage = FileStorage::new(config.storage.uploads_dir.clone());
        file_storage.initialize().await.unwrap();

        let metadata = SqliteMetadataStore::connect(&config.storage.database_url)
            .await
            .unwrap();

        let library = Arc::new(LibraryService::new(
            Arc::new(file_storage),
            Arc::new(metadata),
        ));
        let router = api::create_router(AppState::new(Arc::clone(&library)), &config);

        Self {
            router,
            library,
            uploads_dir: config.storage.uploads_dir,
            _temp_dir: temp_dir,
        }
    }

    /// Files currently in the uploads directory, sorted
    pub fn uploaded_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.uploads_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }
}

/// Encode one file part as multipart/form-data
pub fn multipart_body(field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// POST /upload request carrying `data` as `filename` in the `song` field
pub fn upload_request(filename: &str, data: &[u8]) -> Request<Body> {
    Request::builder()
        .uri("/upload")
        .method("POST")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body("song", filename, data)))
        .unwrap()
}

/// Some deterministic "audio" bytes
pub fn fake_audio(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
