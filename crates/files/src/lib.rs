//! BECC media storage
//!
//! Images uploaded through the dashboard (pillar galleries, project media, team photos,
//! partner logos) are stored here, addressed by the SHA-256 digest of their content. Records
//! never embed image bytes: they carry a [`MediaRef`] and the public site serves the bytes
//! from `/media/<hash>`.
//!
//! ## Storage layout
//!
//! ```text
//! <media_dir>/
//! └── sha256/
//!     └── ab/
//!         └── cd/
//!             └── abcd3f9e…
//! ```
//!
//! - Identical uploads are stored once; storing the same bytes twice returns the same reference
//! - Stored files are never modified
//! - Only content detected as an image is accepted
//!
//! ## Example Usage
//!
//! ```no_run
//! use becc_files::MediaStore;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), becc_files::FilesError> {
//! let store = MediaStore::open(Path::new("site_data/media"))?;
//! let bytes = std::fs::read("logo.png")?;
//! let stored = store.store(&bytes, "logo.png")?;
//! println!("{}", stored.media_ref.url());
//! # Ok(())
//! # }
//! ```

mod media;

pub use becc_types::MediaRef;
pub use media::{MediaMetadata, MediaStore, StoredMedia};

/// Name of the directory holding SHA-256 addressed content.
pub const HASH_FOLDER_NAME: &str = "sha256";

/// Errors that can occur during media operations
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// Root directory does not exist or is not a directory
    #[error("Invalid root directory: {0}")]
    InvalidRootDirectory(String),

    /// A media reference that is not a SHA-256 hex digest
    #[error("Invalid media reference: {0}")]
    InvalidReference(String),

    /// Uploaded content is not a recognised image format
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// No content stored under the given reference
    #[error("Media not found: {0}")]
    NotFound(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for media operations.
pub type FilesResult<T> = Result<T, FilesError>;
