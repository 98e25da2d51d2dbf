//! Item types carried inside list fields.

use becc_types::MediaRef;
use list_field::ListItem;
use serde::{Deserialize, Serialize};

/// One organisation core value, e.g. `Cooperation`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreValue {
    pub title: String,
    pub description: String,
}

impl ListItem for CoreValue {
    fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.description.trim().is_empty()
    }

    fn max_text_chars(&self) -> usize {
        self.title
            .chars()
            .count()
            .max(self.description.chars().count())
    }
}

/// One entry of a pillar gallery or a project's media list.
///
/// Built client-side as `{"mediaRef": "...", "caption": "...", "title": "...", "order": 1}`;
/// `caption` must be present, the other members may be omitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MediaItem {
    #[serde(default)]
    pub media_ref: Option<MediaRef>,
    pub caption: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub order: Option<i64>,
}

impl MediaItem {
    /// Public URL of the image, if one is attached.
    pub fn url(&self) -> Option<String> {
        self.media_ref.as_ref().map(MediaRef::url)
    }
}

impl ListItem for MediaItem {
    fn is_blank(&self) -> bool {
        self.media_ref.is_none() && self.caption.trim().is_empty() && self.title.trim().is_empty()
    }

    fn max_text_chars(&self) -> usize {
        self.caption.chars().count().max(self.title.chars().count())
    }
}
