//! Item shapes accepted by the codec.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// An element that can live in a [`ListField`](crate::ListField).
///
/// Implemented for `String` here; record-shaped items (core values, gallery entries) implement
/// it next to their definition. Items are opaque to the codec apart from the two questions
/// below, which drive normalisation and size limits.
pub trait ListItem: Serialize + DeserializeOwned {
    /// Returns true if the item carries no text worth keeping.
    ///
    /// Blank items are dropped by [`normalize`](crate::normalize).
    fn is_blank(&self) -> bool;

    /// Length in characters of the longest text sub-field of this item.
    fn max_text_chars(&self) -> usize;
}

impl ListItem for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }

    fn max_text_chars(&self) -> usize {
        self.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_strings_are_blank() {
        assert!(String::new().is_blank());
        assert!("   ".to_string().is_blank());
        assert!("\t\n".to_string().is_blank());
        assert!(!" a ".to_string().is_blank());
    }

    #[test]
    fn max_text_chars_counts_characters_not_bytes() {
        assert_eq!("école".to_string().max_text_chars(), 5);
    }
}
