/// File storage service tests
/// Tests blob writes, unlinks, directory listing and name validation
use shelf_core::{BlobStore, ShelfError};
use shelf_server::services::FileStorage;
use tempfile::TempDir;

async fn storage_in(temp_dir: &TempDir) -> FileStorage {
    let storage = FileStorage::new(temp_dir.path().join("uploads"));
    storage.initialize().await.unwrap();
    storage
}

/// Test initialization creates the uploads directory
#[tokio::test]
async fn test_file_storage_initialization() {
    let temp_dir = TempDir::new().unwrap();
    let uploads = temp_dir.path().join("nested").join("uploads");

    let storage = FileStorage::new(uploads.clone());
    storage.initialize().await.unwrap();
    // Idempotent
    storage.initialize().await.unwrap();

    assert!(uploads.is_dir(), "Uploads directory should be created");
    assert!(storage.list_names().await.unwrap().is_empty());
}

/// Test writing a blob stores the exact bytes under the given name
#[tokio::test]
async fn test_write_blob() {
    let temp_dir = TempDir::new().unwrap();
    let storage = storage_in(&temp_dir).await;

    let data = b"fake audio data for testing";
    storage.write("1700000000000-abc.mp3", data).await.unwrap();

    let path = temp_dir.path().join("uploads").join("1700000000000-abc.mp3");
    assert_eq!(std::fs::read(&path).unwrap(), data);
}

/// Test writing an empty payload still creates the blob
#[tokio::test]
async fn test_write_empty_blob() {
    let temp_dir = TempDir::new().unwrap();
    let storage = storage_in(&temp_dir).await;

    storage.write("empty.wav", b"").await.unwrap();

    assert_eq!(storage.list_names().await.unwrap(), vec!["empty.wav"]);
}

/// Test unlinking removes the file and a second unlink reports it missing
#[tokio::test]
async fn test_unlink_blob() {
    let temp_dir = TempDir::new().unwrap();
    let storage = storage_in(&temp_dir).await;

    storage.write("a.mp3", b"a").await.unwrap();
    storage.unlink("a.mp3").await.unwrap();
    assert!(storage.list_names().await.unwrap().is_empty());

    let err = storage.unlink("a.mp3").await.unwrap_err();
    assert!(err.is_missing_file(), "unexpected error: {}", err);
}

/// Test listing skips subdirectories
#[tokio::test]
async fn test_list_names_only_files() {
    let temp_dir = TempDir::new().unwrap();
    let storage = storage_in(&temp_dir).await;

    storage.write("b.ogg", b"b").await.unwrap();
    storage.write("a.flac", b"a").await.unwrap();
    std::fs::create_dir(storage.base_path().join("subdir")).unwrap();

    assert_eq!(storage.list_names().await.unwrap(), vec!["a.flac", "b.ogg"]);
}

/// Test listing a missing directory is an error
#[tokio::test]
async fn test_list_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path().join("never-created"));

    assert!(storage.list_names().await.is_err());
}

/// Test path traversal is rejected for every operation
#[tokio::test]
async fn test_path_traversal_prevention() {
    let temp_dir = TempDir::new().unwrap();
    let storage = storage_in(&temp_dir).await;

    // A file next to the uploads directory that must survive
    let outside = temp_dir.path().join("music.db");
    std::fs::write(&outside, b"db").unwrap();

    let err = storage.unlink("../music.db").await.unwrap_err();
    assert!(matches!(err, ShelfError::InvalidInput(_)));
    assert!(outside.exists());

    let err = storage.write("../escape.mp3", b"x").await.unwrap_err();
    assert!(matches!(err, ShelfError::InvalidInput(_)));
    assert!(!temp_dir.path().join("escape.mp3").exists());
}
