//! # List Field
//!
//! Transport codec for list-valued form fields.
//!
//! Dashboard forms edit ordered lists (pillar activities, project impact statements,
//! organisation core values, gallery entries) through a client-side list builder. The builder
//! writes the whole list into one hidden input as a JSON array; this crate turns that string
//! back into typed items and validates it before the owning record is saved.
//!
//! The crate is split into three layers:
//! - [`encode`], [`decode`] and [`normalize`]: pure functions over `Vec<T>`
//! - [`ListField`]: the persisted list value owned by a record
//! - [`ListFieldDef`]: per-field configuration (field name, hidden input name, label)
//!
//! ## Transport format
//!
//! ```text
//! ["Tree planting","Waste management"]
//! [{"title":"Cooperation","description":"Working together"}]
//! ```
//!
//! An empty list is always encoded as `[]`. When decoding, an empty or whitespace-only input
//! is accepted as an empty list since absent data is not malformed data.
//!
//! Decoding never panics and never aborts the enclosing request: failures come back as a
//! [`ListFieldError`] tagged with the originating form field so the caller can show the
//! message next to that input.

mod codec;
mod field;
mod item;

pub use codec::{decode, encode, normalize};
pub use field::{ListField, ListFieldDef};
pub use item::ListItem;

/// Errors produced while encoding or decoding a list field.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListFieldError {
    /// The transport string is not a list (invalid JSON, or a JSON value that is not an array).
    #[error("{message}")]
    Decode { field: String, message: String },

    /// An element of the list does not have the expected shape.
    ///
    /// `path` locates the failing element and sub-field, for example `[1].title`.
    #[error("{message} (at {path})")]
    Shape {
        field: String,
        path: String,
        message: String,
    },

    /// The items could not be serialised.
    ///
    /// Only reachable for item types whose `Serialize` implementation can fail.
    #[error("failed to encode list: {message}")]
    Encode { field: String, message: String },
}

impl ListFieldError {
    /// Name of the form field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ListFieldError::Decode { field, .. }
            | ListFieldError::Shape { field, .. }
            | ListFieldError::Encode { field, .. } => field,
        }
    }
}

/// Type alias for Results that can fail with a [`ListFieldError`].
pub type ListFieldResult<T> = Result<T, ListFieldError>;
