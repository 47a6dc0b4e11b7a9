/// File storage service - keeps uploaded audio blobs in one directory
use async_trait::async_trait;
use shelf_core::{storage::BlobStore, ShelfError};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Create the uploads directory if it is missing
    pub async fn initialize(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.base_path).await
    }

    /// Resolve a blob name to its path inside the uploads directory
    ///
    /// Names must be a single path component; anything that could point
    /// outside the directory is rejected.
    pub fn path_for(&self, name: &str) -> shelf_core::Result<PathBuf> {
        validate_name(name)?;
        Ok(self.base_path.join(name))
    }
}

fn validate_name(name: &str) -> shelf_core::Result<()> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(ShelfError::invalid_input(format!(
            "Invalid blob name: {:?}",
            name
        )));
    }

    if name.contains(['/', '\\', '\0']) {
        return Err(ShelfError::invalid_input(format!(
            "Blob name must not contain path separators: {:?}",
            name
        )));
    }

    Ok(())
}

#[async_trait]
impl BlobStore for FileStorage {
    async fn write(&self, name: &str, bytes: &[u8]) -> shelf_core::Result<()> {
        let path = self.path_for(name)?;
        fs::write(&path, bytes).await?;
        Ok(())
    }

    async fn unlink(&self, name: &str) -> shelf_core::Result<()> {
        let path = self.path_for(name)?;
        fs::remove_file(&path).await?;
        Ok(())
    }

    /// Regular files only, sorted by name; subdirectories are skipped
    async fn list_names(&self) -> shelf_core::Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.base_path).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::warn!("Skipping non UTF-8 file name {:?}", raw),
            }
        }

        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_list() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("uploads"));
        storage.initialize().await.unwrap();

        storage.write("b.mp3", b"second").await.unwrap();
        storage.write("a.mp3", b"first").await.unwrap();

        assert_eq!(storage.list_names().await.unwrap(), vec!["a.mp3", "b.mp3"]);
        assert_eq!(
            std::fs::read(storage.path_for("a.mp3").unwrap()).unwrap(),
            b"first"
        );
    }

    #[test]
    fn test_rejects_traversal_names() {
        let storage = FileStorage::new(PathBuf::from("/srv/uploads"));

        for name in ["", ".", "..", "../music.db", "a/b.mp3", "..\\x", "nul\0.mp3"] {
            assert!(
                matches!(storage.path_for(name), Err(ShelfError::InvalidInput(_))),
                "{:?} should be rejected",
                name
            );
        }

        assert_eq!(
            storage.path_for("..hidden.mp3").unwrap(),
            PathBuf::from("/srv/uploads/..hidden.mp3")
        );
    }
}
