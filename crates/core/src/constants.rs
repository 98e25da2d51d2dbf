//! Constants used throughout the BECC core crate.
//!
//! This module contains path, filename and field-size constants to ensure
//! consistency across the codebase and make maintenance easier.

/// Default directory for site data when no explicit directory is configured.
pub const DEFAULT_SITE_DATA_DIR: &str = "site_data";

/// Media directory name under the site data directory, unless overridden.
pub const MEDIA_DIR_NAME: &str = "media";

/// Filename of a single record inside its sharded directory.
pub const RECORD_FILENAME: &str = "record.yaml";

/// Filename of the singleton organisation profile.
pub const ORGANISATION_FILENAME: &str = "organisation.yaml";

/// Collection directory names.
pub const PILLARS_COLLECTION: &str = "pillars";
pub const PROJECTS_COLLECTION: &str = "projects";
pub const EVENTS_COLLECTION: &str = "events";
pub const PARTNERS_COLLECTION: &str = "partners";
pub const TEAM_COLLECTION: &str = "team";
pub const BLOG_COLLECTION: &str = "blog";
pub const GALLERY_COLLECTION: &str = "gallery";
pub const VOLUNTEERS_COLLECTION: &str = "volunteers";
pub const DONATIONS_COLLECTION: &str = "donations";
pub const MESSAGES_COLLECTION: &str = "messages";

/// Default cap on the number of items in one list field.
pub const DEFAULT_MAX_LIST_ITEMS: usize = 100;

/// Default cap on the characters in one text sub-field of a list item.
pub const DEFAULT_MAX_LIST_ITEM_CHARS: usize = 2000;

/// Single-line text such as titles, names and locations.
pub const SHORT_TEXT_MAX_CHARS: usize = 255;

/// Multi-line text such as descriptions, bios and blog content.
pub const LONG_TEXT_MAX_CHARS: usize = 20_000;

pub const NAME_MAX_CHARS: usize = 100;
pub const PHONE_MAX_CHARS: usize = 30;
pub const ICON_MAX_CHARS: usize = 100;
pub const CATEGORY_MAX_CHARS: usize = 100;
pub const TRANSACTION_ID_MAX_CHARS: usize = 100;

/// Image shown when a project has no image of its own.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.jpg";

/// Category shown for a project whose pillar cannot be found.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Background classes assigned to home page pillars in rotation.
pub const HOME_GRADIENTS: [&str; 4] = [
    "bg-gradient-to-br from-green-400 to-green-700",
    "bg-gradient-to-br from-yellow-400 to-yellow-600",
    "bg-gradient-to-br from-sky-400 to-sky-600",
    "bg-gradient-to-br from-emerald-400 to-green-700",
];

/// Number of activities and gallery items a pillar shows on the home page.
pub const HOME_PILLAR_ACTIVITIES: usize = 3;
pub const HOME_PILLAR_GALLERY: usize = 2;

/// Number of projects featured on the home page.
pub const HOME_PROJECTS: usize = 3;

/// Number of gallery items a pillar shows on the pillars page.
pub const PILLARS_PAGE_GALLERY: usize = 4;
