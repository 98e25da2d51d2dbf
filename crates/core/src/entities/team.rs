use super::{keep_id, media_value, EntityForm};
use crate::config::ListLimits;
use crate::constants::{
    LONG_TEXT_MAX_CHARS, PHONE_MAX_CHARS, SHORT_TEXT_MAX_CHARS, TEAM_COLLECTION,
};
use crate::entities::BlogPost;
use crate::forms::{FormBinder, FormData, FormRejection};
use crate::service::SiteService;
use crate::store::Record;
use crate::SiteResult;
use becc_types::{EmailAddress, MediaRef, NonEmptyText};
use becc_uuid::RecordId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: RecordId,
    pub name: NonEmptyText,
    pub position: NonEmptyText,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub photo: Option<MediaRef>,
    #[serde(default)]
    pub contact_email: Option<EmailAddress>,
    #[serde(default)]
    pub phone: String,
}

impl Record for TeamMember {
    const COLLECTION: &'static str = TEAM_COLLECTION;
    const SINGULAR: &'static str = "Team member";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn cmp_for_listing(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl EntityForm for TeamMember {
    fn seed(&self) -> SiteResult<FormData> {
        Ok(FormData::new()
            .with("name", self.name.as_str())
            .with("position", self.position.as_str())
            .with("bio", self.bio.as_str())
            .with("photo", media_value(self.photo.as_ref()))
            .with(
                "contact_email",
                self.contact_email
                    .as_ref()
                    .map(|e| e.to_string())
                    .unwrap_or_default(),
            )
            .with("phone", self.phone.as_str()))
    }

    fn bind(
        data: &FormData,
        limits: ListLimits,
        existing: Option<&Self>,
    ) -> Result<Self, FormRejection> {
        let mut form = FormBinder::new(data, limits);
        let name = form.required_text("name", SHORT_TEXT_MAX_CHARS);
        let position = form.required_text("position", SHORT_TEXT_MAX_CHARS);
        let bio = form.optional_text("bio", LONG_TEXT_MAX_CHARS);
        let photo = form.optional_media("photo");
        let contact_email = form.optional_email("contact_email");
        let phone = form.optional_text("phone", PHONE_MAX_CHARS);

        match (name, position) {
            (Some(name), Some(position)) if form.is_clean() => Ok(Self {
                id: keep_id(existing),
                name,
                position,
                bio,
                photo,
                contact_email,
                phone,
            }),
            _ => Err(form.into_rejection()),
        }
    }

    /// Blog posts outlive their author.
    fn cascade_delete(&self, site: &SiteService) -> SiteResult<()> {
        let store = site.store::<BlogPost>();
        for mut post in store.list()? {
            if post.author.as_ref() == Some(&self.id) {
                post.author = None;
                store.update(&post)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_is_length_limited() {
        let data = FormData::new()
            .with("name", "Amina")
            .with("position", "Coordinator")
            .with("phone", "0".repeat(31));
        let rejection = TeamMember::bind(&data, ListLimits::default(), None).unwrap_err();
        assert!(rejection.errors.get("phone").unwrap()[0].contains("at most 30 characters"));
    }
}
