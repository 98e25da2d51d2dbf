//! Site records and their dashboard forms.
//!
//! Every collection record implements [`Record`] (storage) and [`EntityForm`] (seeding an edit
//! form and binding a submission). The organisation profile is a singleton and is handled by
//! [`OrganisationInfo`] directly.

mod blog;
mod donation;
mod event;
mod gallery;
mod items;
mod message;
mod organisation;
mod partner;
mod pillar;
mod project;
mod team;
mod volunteer;

pub use blog::BlogPost;
pub use donation::{Donation, DonationMethod};
pub use event::Event;
pub use gallery::GalleryPhoto;
pub use items::{CoreValue, MediaItem};
pub use message::ContactMessage;
pub use organisation::{OrganisationInfo, CORE_VALUES};
pub use partner::{Partner, PartnerType};
pub use pillar::{Pillar, ACTIVITIES, PILLAR_GALLERY};
pub use project::{Project, ProjectStatus, IMPACT, PROJECT_MEDIA};
pub use team::TeamMember;
pub use volunteer::VolunteerApplication;

use crate::config::ListLimits;
use crate::forms::{FormData, FormErrors, FormRejection};
use crate::service::SiteService;
use crate::store::Record;
use crate::SiteResult;
use becc_types::MediaRef;
use becc_uuid::RecordId;
use chrono::NaiveDate;

/// Form behaviour of a collection record.
pub trait EntityForm: Record {
    /// Transport names of the record's list fields (`activities_json`).
    const LIST_FIELDS: &'static [&'static str] = &[];

    /// Initial values of the edit form, list fields encoded as transport strings.
    fn seed(&self) -> SiteResult<FormData>;

    /// Initial values of the create form.
    fn blank() -> FormData {
        Self::LIST_FIELDS.iter().map(|name| (*name, "[]")).collect()
    }

    /// Build a record from a submission.
    ///
    /// `existing` is the record under edit; its id and creation timestamp are kept.
    fn bind(
        data: &FormData,
        limits: ListLimits,
        existing: Option<&Self>,
    ) -> Result<Self, FormRejection>;

    /// Checks against other records (referenced ids exist, unique slugs).
    fn check_relations(&self, _site: &SiteService) -> SiteResult<FormErrors> {
        Ok(FormErrors::default())
    }

    /// Runs before the record is deleted.
    fn cascade_delete(&self, _site: &SiteService) -> SiteResult<()> {
        Ok(())
    }
}

fn keep_id<R: Record>(existing: Option<&R>) -> RecordId {
    existing.map(|r| r.id().clone()).unwrap_or_default()
}

fn media_value(media: Option<&MediaRef>) -> String {
    media.map(|m| m.to_string()).unwrap_or_default()
}

fn id_value(id: Option<&RecordId>) -> String {
    id.map(|i| i.to_string()).unwrap_or_default()
}

fn date_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn checkbox_value(checked: bool) -> &'static str {
    if checked {
        "on"
    } else {
        ""
    }
}

fn missing_choice(errors: &mut FormErrors, field: &str) {
    errors.add(
        field,
        "Select a valid choice. That choice is not one of the available choices.",
    );
}
