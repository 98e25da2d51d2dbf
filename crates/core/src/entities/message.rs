use super::{keep_id, EntityForm};
use crate::config::ListLimits;
use crate::constants::{LONG_TEXT_MAX_CHARS, MESSAGES_COLLECTION, NAME_MAX_CHARS, SHORT_TEXT_MAX_CHARS};
use crate::forms::{FormBinder, FormData, FormRejection};
use crate::store::Record;
use crate::SiteResult;
use becc_types::{EmailAddress, NonEmptyText};
use becc_uuid::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A message sent through the public contact form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: RecordId,
    pub name: NonEmptyText,
    pub email: EmailAddress,
    #[serde(default)]
    pub subject: String,
    pub message: NonEmptyText,
    pub created_at: DateTime<Utc>,
}

impl Record for ContactMessage {
    const COLLECTION: &'static str = MESSAGES_COLLECTION;
    const SINGULAR: &'static str = "Message";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn cmp_for_listing(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| other.created_at.cmp(&self.created_at))
    }
}

impl EntityForm for ContactMessage {
    fn seed(&self) -> SiteResult<FormData> {
        Ok(FormData::new()
            .with("name", self.name.as_str())
            .with("email", self.email.as_str())
            .with("subject", self.subject.as_str())
            .with("message", self.message.as_str()))
    }

    fn bind(
        data: &FormData,
        limits: ListLimits,
        existing: Option<&Self>,
    ) -> Result<Self, FormRejection> {
        let mut form = FormBinder::new(data, limits);
        let name = form.required_text("name", NAME_MAX_CHARS);
        let email = form.email("email");
        let subject = form.optional_text("subject", SHORT_TEXT_MAX_CHARS);
        let message = form.required_text("message", LONG_TEXT_MAX_CHARS);

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) if form.is_clean() => Ok(Self {
                id: keep_id(existing),
                name,
                email,
                subject,
                message,
                created_at: existing.map(|m| m.created_at).unwrap_or_else(Utc::now),
            }),
            _ => Err(form.into_rejection()),
        }
    }
}
