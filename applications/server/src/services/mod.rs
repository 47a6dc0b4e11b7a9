/// Server services
pub mod file_storage;
pub mod library;

pub use file_storage::FileStorage;
pub use library::{DeleteOutcome, LibraryService, PurgeOutcome, UploadedFile};
