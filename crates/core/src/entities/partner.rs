use super::{keep_id, media_value, EntityForm};
use crate::config::ListLimits;
use crate::constants::{LONG_TEXT_MAX_CHARS, PARTNERS_COLLECTION, SHORT_TEXT_MAX_CHARS};
use crate::forms::{Choice, FormBinder, FormData, FormRejection};
use crate::store::Record;
use crate::SiteResult;
use becc_types::{MediaRef, NonEmptyText, WebUrl};
use becc_uuid::RecordId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerType {
    Ngo,
    Government,
    Academic,
    Private,
    Community,
}

impl Choice for PartnerType {
    const ALL: &'static [Self] = &[
        Self::Ngo,
        Self::Government,
        Self::Academic,
        Self::Private,
        Self::Community,
    ];

    fn value(self) -> &'static str {
        match self {
            Self::Ngo => "ngo",
            Self::Government => "government",
            Self::Academic => "academic",
            Self::Private => "private",
            Self::Community => "community",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Ngo => "NGO",
            Self::Government => "Government",
            Self::Academic => "Academic Institution",
            Self::Private => "Private Sector",
            Self::Community => "Community Group",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: RecordId,
    pub name: NonEmptyText,
    pub partner_type: PartnerType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: Option<MediaRef>,
    #[serde(default)]
    pub website: Option<WebUrl>,
}

impl Record for Partner {
    const COLLECTION: &'static str = PARTNERS_COLLECTION;
    const SINGULAR: &'static str = "Partner";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn cmp_for_listing(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl EntityForm for Partner {
    fn seed(&self) -> SiteResult<FormData> {
        Ok(FormData::new()
            .with("name", self.name.as_str())
            .with("partner_type", self.partner_type.value())
            .with("description", self.description.as_str())
            .with("logo", media_value(self.logo.as_ref()))
            .with(
                "website",
                self.website
                    .as_ref()
                    .map(|u| u.to_string())
                    .unwrap_or_default(),
            ))
    }

    fn bind(
        data: &FormData,
        limits: ListLimits,
        existing: Option<&Self>,
    ) -> Result<Self, FormRejection> {
        let mut form = FormBinder::new(data, limits);
        let name = form.required_text("name", SHORT_TEXT_MAX_CHARS);
        let partner_type = form.choice::<PartnerType>("partner_type");
        let description = form.optional_text("description", LONG_TEXT_MAX_CHARS);
        let logo = form.optional_media("logo");
        let website = form.optional_url("website");

        match (name, partner_type) {
            (Some(name), Some(partner_type)) if form.is_clean() => Ok(Self {
                id: keep_id(existing),
                name,
                partner_type,
                description,
                logo,
                website,
            }),
            _ => Err(form.into_rejection()),
        }
    }
}
