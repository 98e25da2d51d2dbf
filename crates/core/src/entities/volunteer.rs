use super::{checkbox_value, keep_id, EntityForm};
use crate::config::ListLimits;
use crate::constants::{LONG_TEXT_MAX_CHARS, PHONE_MAX_CHARS, SHORT_TEXT_MAX_CHARS, VOLUNTEERS_COLLECTION};
use crate::forms::{FormBinder, FormData, FormRejection};
use crate::store::Record;
use crate::SiteResult;
use becc_types::{EmailAddress, NonEmptyText};
use becc_uuid::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolunteerApplication {
    pub id: RecordId,
    pub name: NonEmptyText,
    pub email: EmailAddress,
    pub phone: NonEmptyText,
    pub message: NonEmptyText,
    #[serde(default)]
    pub approved: bool,
    pub submitted_at: DateTime<Utc>,
}

impl Record for VolunteerApplication {
    const COLLECTION: &'static str = VOLUNTEERS_COLLECTION;
    const SINGULAR: &'static str = "Volunteer application";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn cmp_for_listing(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| other.submitted_at.cmp(&self.submitted_at))
    }
}

impl EntityForm for VolunteerApplication {
    fn seed(&self) -> SiteResult<FormData> {
        Ok(FormData::new()
            .with("name", self.name.as_str())
            .with("email", self.email.as_str())
            .with("phone", self.phone.as_str())
            .with("message", self.message.as_str())
            .with("approved", checkbox_value(self.approved)))
    }

    fn bind(
        data: &FormData,
        limits: ListLimits,
        existing: Option<&Self>,
    ) -> Result<Self, FormRejection> {
        let mut form = FormBinder::new(data, limits);
        let name = form.required_text("name", SHORT_TEXT_MAX_CHARS);
        let email = form.email("email");
        let phone = form.required_text("phone", PHONE_MAX_CHARS);
        let message = form.required_text("message", LONG_TEXT_MAX_CHARS);
        let approved = form.checkbox("approved");

        match (name, email, phone, message) {
            (Some(name), Some(email), Some(phone), Some(message)) if form.is_clean() => {
                Ok(Self {
                    id: keep_id(existing),
                    name,
                    email,
                    phone,
                    message,
                    approved,
                    submitted_at: existing.map(|v| v.submitted_at).unwrap_or_else(Utc::now),
                })
            }
            _ => Err(form.into_rejection()),
        }
    }
}
