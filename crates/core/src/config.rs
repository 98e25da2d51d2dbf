//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. The intent is to avoid reading process-wide environment variables
//! during request handling, which can lead to inconsistent behaviour in multi-threaded runtimes
//! and test harnesses.

use crate::constants::{
    DEFAULT_MAX_LIST_ITEMS, DEFAULT_MAX_LIST_ITEM_CHARS, DEFAULT_SITE_DATA_DIR, MEDIA_DIR_NAME,
    ORGANISATION_FILENAME,
};
use crate::{SiteError, SiteResult};
use std::path::{Path, PathBuf};

/// Bounds applied to every submitted list field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListLimits {
    pub max_items: usize,
    pub max_item_chars: usize,
}

impl Default for ListLimits {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_LIST_ITEMS,
            max_item_chars: DEFAULT_MAX_LIST_ITEM_CHARS,
        }
    }
}

impl ListLimits {
    pub fn new(max_items: usize, max_item_chars: usize) -> SiteResult<Self> {
        if max_items == 0 || max_item_chars == 0 {
            return Err(SiteError::InvalidInput(
                "list limits must be greater than zero".into(),
            ));
        }
        Ok(Self {
            max_items,
            max_item_chars,
        })
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    site_data_dir: PathBuf,
    media_dir: PathBuf,
    list_limits: ListLimits,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `site_data_dir` must already exist; collection directories beneath it are created on
    /// first write.
    pub fn new(
        site_data_dir: PathBuf,
        media_dir: PathBuf,
        list_limits: ListLimits,
    ) -> SiteResult<Self> {
        if !site_data_dir.is_dir() {
            return Err(SiteError::InvalidInput(format!(
                "site data directory does not exist: {}",
                site_data_dir.display()
            )));
        }

        Ok(Self {
            site_data_dir,
            media_dir,
            list_limits,
        })
    }

    pub fn site_data_dir(&self) -> &Path {
        &self.site_data_dir
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    pub fn list_limits(&self) -> ListLimits {
        self.list_limits
    }

    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.site_data_dir.join(collection)
    }

    pub fn organisation_file(&self) -> PathBuf {
        self.site_data_dir.join(ORGANISATION_FILENAME)
    }
}

/// Resolve the site data directory, defaulting to `site_data` relative to the working directory.
pub fn site_data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SITE_DATA_DIR))
}

/// Resolve the media directory from an optional override.
///
/// Falls back to `<site_data_dir>/media` when `value` is `None` or blank.
pub fn media_dir_from_env_value(site_data_dir: &Path, value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| site_data_dir.join(MEDIA_DIR_NAME))
}

/// Parse list limits from optional string values.
///
/// Missing or blank values take the defaults.
pub fn list_limits_from_env_values(
    max_items: Option<String>,
    max_item_chars: Option<String>,
) -> SiteResult<ListLimits> {
    let max_items = parse_positive("BECC_MAX_LIST_ITEMS", max_items, DEFAULT_MAX_LIST_ITEMS)?;
    let max_item_chars = parse_positive(
        "BECC_MAX_LIST_ITEM_CHARS",
        max_item_chars,
        DEFAULT_MAX_LIST_ITEM_CHARS,
    )?;
    ListLimits::new(max_items, max_item_chars)
}

fn parse_positive(name: &str, value: Option<String>, default: usize) -> SiteResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    match value {
        None => Ok(default),
        Some(v) => v
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                SiteError::InvalidInput(format!("{name} must be a positive integer, got '{v}'"))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn new_requires_existing_site_data_dir() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let err = CoreConfig::new(missing.clone(), missing.join("media"), ListLimits::default())
            .expect_err("missing dir should be rejected");
        assert!(matches!(err, SiteError::InvalidInput(_)));

        let cfg = CoreConfig::new(
            temp.path().to_path_buf(),
            temp.path().join("media"),
            ListLimits::default(),
        )
        .unwrap();
        assert_eq!(cfg.collection_dir("pillars"), temp.path().join("pillars"));
        assert_eq!(
            cfg.organisation_file(),
            temp.path().join("organisation.yaml")
        );
    }

    #[test]
    fn list_limits_default_when_unset() {
        let limits = list_limits_from_env_values(None, Some("  ".into())).unwrap();
        assert_eq!(limits, ListLimits::default());
        assert_eq!(limits.max_items, 100);
        assert_eq!(limits.max_item_chars, 2000);
    }

    #[test]
    fn list_limits_parse_overrides() {
        let limits = list_limits_from_env_values(Some("5".into()), Some(" 40 ".into())).unwrap();
        assert_eq!(limits, ListLimits::new(5, 40).unwrap());
    }

    #[test]
    fn list_limits_reject_zero_and_garbage() {
        for bad in ["0", "-1", "lots"] {
            let err = list_limits_from_env_values(Some(bad.into()), None)
                .expect_err("invalid limit should be rejected");
            match err {
                SiteError::InvalidInput(msg) => assert!(msg.contains("BECC_MAX_LIST_ITEMS")),
                other => panic!("expected InvalidInput, got {other:?}"),
            }
        }
    }

    #[test]
    fn media_dir_defaults_under_site_data() {
        let base = Path::new("/srv/site_data");
        assert_eq!(
            media_dir_from_env_value(base, None),
            PathBuf::from("/srv/site_data/media")
        );
        assert_eq!(
            media_dir_from_env_value(base, Some("/var/media".into())),
            PathBuf::from("/var/media")
        );
    }

    #[test]
    fn site_data_dir_defaults_when_blank() {
        assert_eq!(site_data_dir_from_env_value(None), PathBuf::from("site_data"));
        assert_eq!(site_data_dir_from_env_value(Some(" ".into())), PathBuf::from("site_data"));
        assert_eq!(
            site_data_dir_from_env_value(Some("/srv/becc".into())),
            PathBuf::from("/srv/becc")
        );
    }
}
