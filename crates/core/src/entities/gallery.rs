use super::{id_value, keep_id, missing_choice, EntityForm};
use crate::config::ListLimits;
use crate::constants::{GALLERY_COLLECTION, LONG_TEXT_MAX_CHARS, SHORT_TEXT_MAX_CHARS};
use crate::entities::{Event, Pillar, Project};
use crate::forms::{FormBinder, FormData, FormErrors, FormRejection};
use crate::service::SiteService;
use crate::store::Record;
use crate::SiteResult;
use becc_types::{MediaRef, NonEmptyText};
use becc_uuid::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A photo in the public gallery, optionally linked to an event, project or pillar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalleryPhoto {
    pub id: RecordId,
    pub title: NonEmptyText,
    #[serde(default)]
    pub description: String,
    pub image: MediaRef,
    #[serde(default)]
    pub related_event: Option<RecordId>,
    #[serde(default)]
    pub related_project: Option<RecordId>,
    #[serde(default)]
    pub related_pillar: Option<RecordId>,
    pub uploaded_at: DateTime<Utc>,
}

impl Record for GalleryPhoto {
    const COLLECTION: &'static str = GALLERY_COLLECTION;
    const SINGULAR: &'static str = "Photo";

    fn id(&self) -> &RecordId {
        &self.id
    }

    /// Newest upload first.
    fn cmp_for_listing(&self, other: &Self) -> Ordering {
        other
            .uploaded_at
            .cmp(&self.uploaded_at)
            .then_with(|| self.title.cmp(&other.title))
    }
}

impl EntityForm for GalleryPhoto {
    fn seed(&self) -> SiteResult<FormData> {
        Ok(FormData::new()
            .with("title", self.title.as_str())
            .with("description", self.description.as_str())
            .with("image", self.image.to_string())
            .with("related_event", id_value(self.related_event.as_ref()))
            .with("related_project", id_value(self.related_project.as_ref()))
            .with("related_pillar", id_value(self.related_pillar.as_ref())))
    }

    fn bind(
        data: &FormData,
        limits: ListLimits,
        existing: Option<&Self>,
    ) -> Result<Self, FormRejection> {
        let mut form = FormBinder::new(data, limits);
        let title = form.required_text("title", SHORT_TEXT_MAX_CHARS);
        let description = form.optional_text("description", LONG_TEXT_MAX_CHARS);
        let image = form.media("image");
        let related_event = form.optional_reference("related_event");
        let related_project = form.optional_reference("related_project");
        let related_pillar = form.optional_reference("related_pillar");

        match (title, image) {
            (Some(title), Some(image)) if form.is_clean() => Ok(Self {
                id: keep_id(existing),
                title,
                description,
                image,
                related_event,
                related_project,
                related_pillar,
                uploaded_at: existing.map(|p| p.uploaded_at).unwrap_or_else(Utc::now),
            }),
            _ => Err(form.into_rejection()),
        }
    }

    fn check_relations(&self, site: &SiteService) -> SiteResult<FormErrors> {
        let mut errors = FormErrors::default();
        if let Some(id) = &self.related_event {
            if !site.exists::<Event>(id) {
                missing_choice(&mut errors, "related_event");
            }
        }
        if let Some(id) = &self.related_project {
            if !site.exists::<Project>(id) {
                missing_choice(&mut errors, "related_project");
            }
        }
        if let Some(id) = &self.related_pillar {
            if !site.exists::<Pillar>(id) {
                missing_choice(&mut errors, "related_pillar");
            }
        }
        Ok(errors)
    }
}

/// Rewrites every photo for which `detach` reports a change.
pub(super) fn detach_photos(
    site: &SiteService,
    detach: impl Fn(&mut GalleryPhoto) -> bool,
) -> SiteResult<()> {
    let store = site.store::<GalleryPhoto>();
    for mut photo in store.list()? {
        if detach(&mut photo) {
            store.update(&photo)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_is_required() {
        let data = FormData::new().with("title", "Planting day");
        let rejection = GalleryPhoto::bind(&data, ListLimits::default(), None).unwrap_err();
        assert!(rejection.errors.contains("image"));
    }

    #[test]
    fn related_ids_must_be_canonical() {
        let data = FormData::new()
            .with("title", "Planting day")
            .with("image", "ab".repeat(32))
            .with("related_event", "42");
        let rejection = GalleryPhoto::bind(&data, ListLimits::default(), None).unwrap_err();
        assert!(rejection.errors.contains("related_event"));
    }
}
