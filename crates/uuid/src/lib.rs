//! Record identifiers and sharded-path utilities.
//!
//! Every site record (pillar, project, event, ...) is stored under a directory derived from
//! its identifier. To keep path derivation deterministic, identifiers use a *canonical*
//! representation: **32 lowercase hexadecimal characters** (no hyphens).
//!
//! This crate provides:
//! - [`RecordId`], a wrapper that *guarantees* the canonical format once constructed.
//! - The sharding rule used to place a record on disk.
//!
//! ## Canonical form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `550e8400e29b41d4a716446655440000`
//!
//! Identifiers arriving from outside (URL path segments, form fields, CLI arguments) must
//! already be canonical; use [`RecordId::parse`] to validate them.
//!
//! ## Sharded directory layout
//! For a canonical id `u`, a record lives under:
//! `collection_dir/<u[0..2]>/<u[2..4]>/<u>/`
//!
//! Example:
//! `site_data/projects/55/0e/550e8400e29b41d4a716446655440000/`

mod record_id;

pub use record_id::{RecordId, Uuid};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
