use super::{keep_id, media_value, EntityForm, MediaItem};
use crate::config::ListLimits;
use crate::constants::{ICON_MAX_CHARS, LONG_TEXT_MAX_CHARS, PILLARS_COLLECTION, SHORT_TEXT_MAX_CHARS};
use crate::entities::{gallery, Project};
use crate::forms::{FormBinder, FormData, FormRejection};
use crate::service::SiteService;
use crate::store::Record;
use crate::SiteResult;
use becc_types::{MediaRef, NonEmptyText};
use becc_uuid::RecordId;
use list_field::{ListField, ListFieldDef};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const ACTIVITIES: ListFieldDef<String> =
    ListFieldDef::new("activities", "activities_json", "Activities");

pub const PILLAR_GALLERY: ListFieldDef<MediaItem> =
    ListFieldDef::new("gallery", "gallery_json", "Gallery");

/// A thematic area of the organisation's work (water, agriculture, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    pub id: RecordId,
    pub title: NonEmptyText,
    pub description: NonEmptyText,
    /// Optional shorter version for the home page.
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub image: Option<MediaRef>,
    #[serde(default)]
    pub activities: ListField<String>,
    #[serde(default)]
    pub gallery: ListField<MediaItem>,
}

impl Pillar {
    /// The short description, falling back to the full one.
    pub fn summary(&self) -> &str {
        if self.short_description.trim().is_empty() {
            self.description.as_str()
        } else {
            &self.short_description
        }
    }
}

impl Record for Pillar {
    const COLLECTION: &'static str = PILLARS_COLLECTION;
    const SINGULAR: &'static str = "Pillar";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn cmp_for_listing(&self, other: &Self) -> Ordering {
        self.title.cmp(&other.title)
    }
}

impl EntityForm for Pillar {
    const LIST_FIELDS: &'static [&'static str] = &["activities_json", "gallery_json"];

    fn seed(&self) -> SiteResult<FormData> {
        Ok(FormData::new()
            .with("title", self.title.as_str())
            .with("description", self.description.as_str())
            .with("short_description", self.short_description.as_str())
            .with("icon", self.icon.as_str())
            .with("image", media_value(self.image.as_ref()))
            .with(ACTIVITIES.transport_name(), ACTIVITIES.seed(&self.activities)?)
            .with(PILLAR_GALLERY.transport_name(), PILLAR_GALLERY.seed(&self.gallery)?))
    }

    fn bind(
        data: &FormData,
        limits: ListLimits,
        existing: Option<&Self>,
    ) -> Result<Self, FormRejection> {
        let mut form = FormBinder::new(data, limits);
        let title = form.required_text("title", SHORT_TEXT_MAX_CHARS);
        let description = form.required_text("description", LONG_TEXT_MAX_CHARS);
        let short_description = form.optional_text("short_description", LONG_TEXT_MAX_CHARS);
        let icon = form.optional_text("icon", ICON_MAX_CHARS);
        let image = form.optional_media("image");
        let activities = form.list_field(&ACTIVITIES);
        let gallery = form.list_field(&PILLAR_GALLERY);

        match (title, description, activities, gallery) {
            (Some(title), Some(description), Some(activities), Some(gallery))
                if form.is_clean() =>
            {
                Ok(Self {
                    id: keep_id(existing),
                    title,
                    description,
                    short_description,
                    icon,
                    image,
                    activities,
                    gallery,
                })
            }
            _ => Err(form.into_rejection()),
        }
    }

    /// Projects belong to exactly one pillar and go with it; gallery photos are detached.
    fn cascade_delete(&self, site: &SiteService) -> SiteResult<()> {
        for project in site.list::<Project>()? {
            if project.pillar == self.id {
                site.delete::<Project>(&project.id)?;
            }
        }
        gallery::detach_photos(site, |photo| {
            let linked = photo.related_pillar.as_ref() == Some(&self.id);
            if linked {
                photo.related_pillar = None;
            }
            linked
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::REQUIRED_MESSAGE;

    fn submission() -> FormData {
        FormData::new()
            .with("title", "Water & Sanitation")
            .with("description", "Protecting springs and harvesting rain.")
            .with(
                "activities_json",
                r#"["Tree planting","","  ","Waste management"]"#,
            )
    }

    #[test]
    fn bind_normalizes_activities() {
        let pillar = Pillar::bind(&submission(), ListLimits::default(), None).unwrap();
        assert_eq!(
            pillar.activities.items(),
            ["Tree planting", "Waste management"]
        );
        assert!(pillar.gallery.is_empty());
        assert_eq!(pillar.summary(), "Protecting springs and harvesting rain.");
    }

    #[test]
    fn seed_then_bind_round_trips() {
        let pillar = Pillar::bind(&submission(), ListLimits::default(), None).unwrap();
        let seeded = pillar.seed().unwrap();
        assert_eq!(
            seeded.get("activities_json"),
            Some(r#"["Tree planting","Waste management"]"#)
        );
        assert_eq!(seeded.get("gallery_json"), Some("[]"));

        let rebound = Pillar::bind(&seeded, ListLimits::default(), Some(&pillar)).unwrap();
        assert_eq!(rebound, pillar);
    }

    #[test]
    fn blank_form_seeds_empty_lists() {
        let blank = Pillar::blank();
        assert_eq!(blank.get("activities_json"), Some("[]"));
        assert_eq!(blank.get("gallery_json"), Some("[]"));
        assert_eq!(blank.len(), 2);
    }

    #[test]
    fn malformed_activities_reject_whole_submission_and_keep_values() {
        let data = submission()
            .with("activities_json", "{not valid list}")
            .with("description", "");
        let rejection = Pillar::bind(&data, ListLimits::default(), None).unwrap_err();

        assert!(rejection.errors.contains("activities_json"));
        assert_eq!(
            rejection.errors.get("description").unwrap()[0],
            REQUIRED_MESSAGE
        );
        assert_eq!(rejection.values.get("title"), Some("Water & Sanitation"));
    }

    #[test]
    fn short_description_takes_precedence_in_summary() {
        let data = submission().with("short_description", "Water for all");
        let pillar = Pillar::bind(&data, ListLimits::default(), None).unwrap();
        assert_eq!(pillar.summary(), "Water for all");
    }
}
