use super::{checkbox_value, date_value, keep_id, media_value, EntityForm};
use crate::config::ListLimits;
use crate::constants::{EVENTS_COLLECTION, LONG_TEXT_MAX_CHARS, SHORT_TEXT_MAX_CHARS};
use crate::entities::gallery;
use crate::forms::{FormBinder, FormData, FormRejection};
use crate::service::SiteService;
use crate::store::Record;
use crate::SiteResult;
use becc_types::{MediaRef, NonEmptyText, WebUrl};
use becc_uuid::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: RecordId,
    pub title: NonEmptyText,
    pub description: NonEmptyText,
    pub date: NaiveDate,
    pub location: NonEmptyText,
    #[serde(default)]
    pub organizer: String,
    #[serde(default)]
    pub registration_link: Option<WebUrl>,
    #[serde(default)]
    pub image: Option<MediaRef>,
    pub is_upcoming: bool,
}

impl Record for Event {
    const COLLECTION: &'static str = EVENTS_COLLECTION;
    const SINGULAR: &'static str = "Event";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn cmp_for_listing(&self, other: &Self) -> Ordering {
        other
            .date
            .cmp(&self.date)
            .then_with(|| self.title.cmp(&other.title))
    }
}

impl EntityForm for Event {
    fn seed(&self) -> SiteResult<FormData> {
        Ok(FormData::new()
            .with("title", self.title.as_str())
            .with("description", self.description.as_str())
            .with("date", date_value(Some(self.date)))
            .with("location", self.location.as_str())
            .with("organizer", self.organizer.as_str())
            .with(
                "registration_link",
                self.registration_link
                    .as_ref()
                    .map(|u| u.to_string())
                    .unwrap_or_default(),
            )
            .with("image", media_value(self.image.as_ref()))
            .with("is_upcoming", checkbox_value(self.is_upcoming)))
    }

    fn bind(
        data: &FormData,
        limits: ListLimits,
        existing: Option<&Self>,
    ) -> Result<Self, FormRejection> {
        let mut form = FormBinder::new(data, limits);
        let title = form.required_text("title", SHORT_TEXT_MAX_CHARS);
        let description = form.required_text("description", LONG_TEXT_MAX_CHARS);
        let date = form.date("date");
        let location = form.required_text("location", SHORT_TEXT_MAX_CHARS);
        let organizer = form.optional_text("organizer", SHORT_TEXT_MAX_CHARS);
        let registration_link = form.optional_url("registration_link");
        let image = form.optional_media("image");
        let is_upcoming = form.checkbox("is_upcoming");

        match (title, description, date, location) {
            (Some(title), Some(description), Some(date), Some(location)) if form.is_clean() => {
                Ok(Self {
                    id: keep_id(existing),
                    title,
                    description,
                    date,
                    location,
                    organizer,
                    registration_link,
                    image,
                    is_upcoming,
                })
            }
            _ => Err(form.into_rejection()),
        }
    }

    fn cascade_delete(&self, site: &SiteService) -> SiteResult<()> {
        gallery::detach_photos(site, |photo| {
            let linked = photo.related_event.as_ref() == Some(&self.id);
            if linked {
                photo.related_event = None;
            }
            linked
        })
    }
}
