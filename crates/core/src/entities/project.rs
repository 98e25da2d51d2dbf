use super::{date_value, keep_id, media_value, missing_choice, EntityForm, MediaItem};
use crate::config::ListLimits;
use crate::constants::{LONG_TEXT_MAX_CHARS, PROJECTS_COLLECTION, SHORT_TEXT_MAX_CHARS};
use crate::entities::{gallery, Pillar};
use crate::forms::{Choice, FormBinder, FormData, FormErrors, FormRejection};
use crate::service::SiteService;
use crate::store::Record;
use crate::SiteResult;
use becc_types::{MediaRef, NonEmptyText};
use becc_uuid::RecordId;
use chrono::{DateTime, NaiveDate, Utc};
use list_field::{ListField, ListFieldDef};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const IMPACT: ListFieldDef<String> = ListFieldDef::new("impact", "impact_json", "Impact");

pub const PROJECT_MEDIA: ListFieldDef<MediaItem> =
    ListFieldDef::new("media", "media_json", "Media");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Completed,
    Upcoming,
}

impl Choice for ProjectStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::Completed, Self::Upcoming];

    fn value(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Upcoming => "upcoming",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Upcoming => "Upcoming",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    pub title: NonEmptyText,
    /// Owning pillar; deleting the pillar deletes the project.
    pub pillar: RecordId,
    /// A short summary for list views.
    #[serde(default)]
    pub short_description: String,
    pub description: NonEmptyText,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub location: NonEmptyText,
    #[serde(default)]
    pub image: Option<MediaRef>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub impact: ListField<String>,
    #[serde(default)]
    pub media: ListField<MediaItem>,
    pub created_at: DateTime<Utc>,
}

impl Record for Project {
    const COLLECTION: &'static str = PROJECTS_COLLECTION;
    const SINGULAR: &'static str = "Project";

    fn id(&self) -> &RecordId {
        &self.id
    }

    /// Newest start date first.
    fn cmp_for_listing(&self, other: &Self) -> Ordering {
        other
            .start_date
            .cmp(&self.start_date)
            .then_with(|| self.title.cmp(&other.title))
    }
}

impl EntityForm for Project {
    const LIST_FIELDS: &'static [&'static str] = &["impact_json", "media_json"];

    fn seed(&self) -> SiteResult<FormData> {
        Ok(FormData::new()
            .with("title", self.title.as_str())
            .with("pillar", self.pillar.to_string())
            .with("short_description", self.short_description.as_str())
            .with("description", self.description.as_str())
            .with("start_date", date_value(Some(self.start_date)))
            .with("end_date", date_value(self.end_date))
            .with("location", self.location.as_str())
            .with("image", media_value(self.image.as_ref()))
            .with("status", self.status.value())
            .with(IMPACT.transport_name(), IMPACT.seed(&self.impact)?)
            .with(PROJECT_MEDIA.transport_name(), PROJECT_MEDIA.seed(&self.media)?))
    }

    fn bind(
        data: &FormData,
        limits: ListLimits,
        existing: Option<&Self>,
    ) -> Result<Self, FormRejection> {
        let mut form = FormBinder::new(data, limits);
        let title = form.required_text("title", SHORT_TEXT_MAX_CHARS);
        let pillar = form.reference("pillar");
        let short_description = form.optional_text("short_description", LONG_TEXT_MAX_CHARS);
        let description = form.required_text("description", LONG_TEXT_MAX_CHARS);
        let start_date = form.date("start_date");
        let end_date = form.optional_date("end_date");
        let location = form.required_text("location", SHORT_TEXT_MAX_CHARS);
        let image = form.optional_media("image");
        let status = form.choice::<ProjectStatus>("status");
        let impact = form.list_field(&IMPACT);
        let media = form.list_field(&PROJECT_MEDIA);

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                form.add_error("end_date", "End date cannot be before the start date.");
            }
        }

        match (
            title,
            pillar,
            description,
            start_date,
            location,
            status,
            impact,
            media,
        ) {
            (
                Some(title),
                Some(pillar),
                Some(description),
                Some(start_date),
                Some(location),
                Some(status),
                Some(impact),
                Some(media),
            ) if form.is_clean() => Ok(Self {
                id: keep_id(existing),
                title,
                pillar,
                short_description,
                description,
                start_date,
                end_date,
                location,
                image,
                status,
                impact,
                media,
                created_at: existing.map(|p| p.created_at).unwrap_or_else(Utc::now),
            }),
            _ => Err(form.into_rejection()),
        }
    }

    fn check_relations(&self, site: &SiteService) -> SiteResult<FormErrors> {
        let mut errors = FormErrors::default();
        if !site.exists::<Pillar>(&self.pillar) {
            missing_choice(&mut errors, "pillar");
        }
        Ok(errors)
    }

    fn cascade_delete(&self, site: &SiteService) -> SiteResult<()> {
        gallery::detach_photos(site, |photo| {
            let linked = photo.related_project.as_ref() == Some(&self.id);
            if linked {
                photo.related_project = None;
            }
            linked
        })
    }
}

impl Project {
    pub fn status_display(&self) -> &'static str {
        self.status.label()
    }
}
