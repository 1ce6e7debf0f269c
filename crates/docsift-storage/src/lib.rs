//! Docsift Storage Library
//!
//! Ephemeral upload storage. Each upload is written once as `<uuid><ext>`
//! inside a single directory and removed again when its request ends.

pub mod local;
pub mod traits;
pub mod upload;

// Re-export commonly used types
pub use local::LocalUploadStore;
pub use traits::{StorageError, StorageResult, UploadStorage};
pub use upload::{LiveUploads, UploadedFile};
