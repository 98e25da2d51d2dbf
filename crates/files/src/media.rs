//! Content-addressed media store implementation
//!
//! [`MediaStore`] is bound to one media directory. It is cheap to construct and holds no
//! open handles, so the server keeps one per process and shares it between requests.
//!
//! # Content Addressing
//!
//! Files are stored using their SHA-256 hash as the identifier. This provides:
//!
//! - **Deduplication**: re-uploading an image yields the existing reference
//! - **Integrity**: content can be verified against its hash
//! - **Deterministic paths**: same content always produces the same path
//!
//! A [`MediaRef`] can only hold 64 lowercase hex characters, so a reference taken from a URL
//! cannot escape the media directory.

use crate::{FilesError, FilesResult, MediaRef, HASH_FOLDER_NAME};
use becc_types::NonEmptyText;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Metadata for a stored media file
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct MediaMetadata {
    /// Reference to the stored content (hex SHA-256 digest)
    pub media_ref: MediaRef,

    /// Path relative to the media directory where the file is stored
    pub relative_path: String,

    /// Size of the file in bytes
    pub size_bytes: u64,

    /// Detected MIME type
    pub media_type: String,

    /// Filename supplied with the upload
    pub original_filename: NonEmptyText,

    /// Whether the content was already present before this call
    pub deduplicated: bool,

    /// UTC timestamp of this store call
    pub stored_at: DateTime<Utc>,
}

/// Stored bytes together with their detected content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

/// Content-addressed store rooted at one media directory.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root_directory: PathBuf,
}

impl MediaStore {
    /// Opens the store at `root_directory`, creating the directory if it is missing.
    ///
    /// # Errors
    ///
    /// Returns `FilesError` if:
    /// - the path exists but is not a directory
    /// - the directory cannot be created or canonicalised
    pub fn open(root_directory: &Path) -> FilesResult<Self> {
        if root_directory.exists() && !root_directory.is_dir() {
            return Err(FilesError::InvalidRootDirectory(format!(
                "Path is not a directory: {}",
                root_directory.display()
            )));
        }

        fs::create_dir_all(root_directory).map_err(|e| {
            FilesError::InvalidRootDirectory(format!(
                "Cannot create media directory {}: {}",
                root_directory.display(),
                e
            ))
        })?;

        let root_directory = root_directory.canonicalize().map_err(|e| {
            FilesError::InvalidRootDirectory(format!(
                "Cannot canonicalize path {}: {}",
                root_directory.display(),
                e
            ))
        })?;

        Ok(Self { root_directory })
    }

    /// Stores uploaded image bytes and returns their metadata.
    ///
    /// Storing content that is already present is not an error: the existing file is kept
    /// and its reference returned with `deduplicated` set.
    ///
    /// # Arguments
    ///
    /// * `bytes` - the uploaded content
    /// * `filename` - the client-supplied filename, kept for display only
    ///
    /// # Errors
    ///
    /// Returns `FilesError` if:
    /// - the content is empty or not a recognised image format
    /// - the storage directory or file cannot be written (I/O)
    pub fn store(&self, bytes: &[u8], filename: &str) -> FilesResult<MediaMetadata> {
        let media_type = match infer::get(bytes) {
            Some(kind) if kind.matcher_type() == infer::MatcherType::Image => {
                kind.mime_type().to_owned()
            }
            Some(kind) => {
                return Err(FilesError::UnsupportedMediaType(kind.mime_type().to_owned()))
            }
            None => {
                return Err(FilesError::UnsupportedMediaType(
                    "unrecognised content".into(),
                ))
            }
        };

        let media_ref = hash_of(bytes)?;
        let storage_path = self.compute_storage_path(&media_ref);
        let deduplicated = storage_path.exists();

        if !deduplicated {
            if let Some(parent) = storage_path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    FilesError::Io(std::io::Error::new(
                        e.kind(),
                        format!(
                            "Failed to create storage directory {}: {}",
                            parent.display(),
                            e
                        ),
                    ))
                })?;
            }

            let dir = storage_path.parent().unwrap_or(&self.root_directory);
            NamedTempFile::new_in(dir)
                .and_then(|mut tmp| {
                    tmp.write_all(bytes)?;
                    tmp.persist(&storage_path).map_err(|e| e.error)
                })
                .map_err(|e| {
                    FilesError::Io(std::io::Error::new(
                        e.kind(),
                        format!("Failed to write file to {}: {}", storage_path.display(), e),
                    ))
                })?;
            tracing::info!(media = %media_ref, size = bytes.len(), "stored media");
        }

        let original_filename = NonEmptyText::new(
            Path::new(filename)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(""),
        )
        .or_else(|_| NonEmptyText::new("upload"))
        .map_err(|e| FilesError::InvalidReference(e.to_string()))?;

        Ok(MediaMetadata {
            relative_path: relative_path(&media_ref),
            media_ref,
            size_bytes: bytes.len() as u64,
            media_type,
            original_filename,
            deduplicated,
            stored_at: Utc::now(),
        })
    }

    /// Reads stored content by reference.
    ///
    /// # Errors
    ///
    /// Returns `FilesError` if:
    /// - nothing is stored under `media_ref`
    /// - the file cannot be read (I/O)
    pub fn read(&self, media_ref: &MediaRef) -> FilesResult<StoredMedia> {
        let storage_path = self.compute_storage_path(media_ref);

        if !storage_path.is_file() {
            return Err(FilesError::NotFound(media_ref.to_string()));
        }

        let bytes = fs::read(&storage_path).map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read file from {}: {}", storage_path.display(), e),
            ))
        })?;

        let media_type = infer::get(&bytes)
            .map(|kind| kind.mime_type())
            .unwrap_or("application/octet-stream")
            .to_owned();

        Ok(StoredMedia { bytes, media_type })
    }

    /// Returns true if content is stored under `media_ref`.
    pub fn contains(&self, media_ref: &MediaRef) -> bool {
        self.compute_storage_path(media_ref).is_file()
    }

    /// Parses an untrusted reference, e.g. a URL path segment.
    pub fn parse_ref(input: &str) -> FilesResult<MediaRef> {
        MediaRef::parse(input).map_err(|e| FilesError::InvalidReference(e.to_string()))
    }

    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    /// `<root>/sha256/<shard1>/<shard2>/<hash>`
    fn compute_storage_path(&self, media_ref: &MediaRef) -> PathBuf {
        self.root_directory.join(relative_path(media_ref))
    }
}

/// `sha256/<shard1>/<shard2>/<hash>`
fn relative_path(media_ref: &MediaRef) -> String {
    let hash = media_ref.as_str();
    format!("{}/{}/{}/{}", HASH_FOLDER_NAME, &hash[0..2], &hash[2..4], hash)
}

fn hash_of(bytes: &[u8]) -> FilesResult<MediaRef> {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hex::encode(hasher.finalize());
    MediaRef::parse(&digest).map_err(|e| FilesError::InvalidReference(e.to_string()))
}
