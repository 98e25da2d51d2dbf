use super::{media_value, CoreValue};
use crate::config::ListLimits;
use crate::constants::{LONG_TEXT_MAX_CHARS, PHONE_MAX_CHARS, SHORT_TEXT_MAX_CHARS};
use crate::forms::{FormBinder, FormData, FormRejection};
use crate::SiteResult;
use becc_types::{EmailAddress, MediaRef, NonEmptyText, WebUrl};
use list_field::{ListField, ListFieldDef};
use serde::{Deserialize, Serialize};

pub const CORE_VALUES: ListFieldDef<CoreValue> =
    ListFieldDef::new("core_values", "core_values_json", "Core values");

const SOCIAL_FIELDS: [&str; 5] = ["facebook", "instagram", "x", "tiktok", "youtube"];

/// The organisation profile shown on every public page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrganisationInfo {
    pub name: NonEmptyText,
    pub vision: NonEmptyText,
    pub mission: NonEmptyText,
    pub goal: NonEmptyText,
    pub motto: NonEmptyText,
    pub slogan: NonEmptyText,
    pub about: NonEmptyText,
    #[serde(default)]
    pub logo: Option<MediaRef>,
    pub contact_email: EmailAddress,
    pub phone: NonEmptyText,
    pub address: NonEmptyText,
    #[serde(default)]
    pub facebook: Option<WebUrl>,
    #[serde(default)]
    pub instagram: Option<WebUrl>,
    #[serde(default)]
    pub x: Option<WebUrl>,
    #[serde(default)]
    pub tiktok: Option<WebUrl>,
    #[serde(default)]
    pub youtube: Option<WebUrl>,
    #[serde(default)]
    pub core_values: ListField<CoreValue>,
}

impl OrganisationInfo {
    pub fn seed(&self) -> SiteResult<FormData> {
        let mut data = FormData::new()
            .with("name", self.name.as_str())
            .with("vision", self.vision.as_str())
            .with("mission", self.mission.as_str())
            .with("goal", self.goal.as_str())
            .with("motto", self.motto.as_str())
            .with("slogan", self.slogan.as_str())
            .with("about", self.about.as_str())
            .with("logo", media_value(self.logo.as_ref()))
            .with("contact_email", self.contact_email.as_str())
            .with("phone", self.phone.as_str())
            .with("address", self.address.as_str())
            .with(CORE_VALUES.transport_name(), CORE_VALUES.seed(&self.core_values)?);
        for (name, url) in SOCIAL_FIELDS.iter().zip(self.socials()) {
            data.insert(*name, url.map(|u| u.to_string()).unwrap_or_default());
        }
        Ok(data)
    }

    pub fn blank() -> FormData {
        FormData::new().with(CORE_VALUES.transport_name(), "[]")
    }

    pub fn bind(data: &FormData, limits: ListLimits) -> Result<Self, FormRejection> {
        let mut form = FormBinder::new(data, limits);
        let name = form.required_text("name", SHORT_TEXT_MAX_CHARS);
        let vision = form.required_text("vision", LONG_TEXT_MAX_CHARS);
        let mission = form.required_text("mission", LONG_TEXT_MAX_CHARS);
        let goal = form.required_text("goal", LONG_TEXT_MAX_CHARS);
        let motto = form.required_text("motto", SHORT_TEXT_MAX_CHARS);
        let slogan = form.required_text("slogan", SHORT_TEXT_MAX_CHARS);
        let about = form.required_text("about", LONG_TEXT_MAX_CHARS);
        let logo = form.optional_media("logo");
        let contact_email = form.email("contact_email");
        let phone = form.required_text("phone", PHONE_MAX_CHARS);
        let address = form.required_text("address", LONG_TEXT_MAX_CHARS);
        let [facebook, instagram, x, tiktok, youtube] =
            SOCIAL_FIELDS.map(|field| form.optional_url(field));
        let core_values = form.list_field(&CORE_VALUES);

        match (
            name,
            vision,
            mission,
            goal,
            motto,
            slogan,
            about,
            contact_email,
            phone,
            address,
            core_values,
        ) {
            (
                Some(name),
                Some(vision),
                Some(mission),
                Some(goal),
                Some(motto),
                Some(slogan),
                Some(about),
                Some(contact_email),
                Some(phone),
                Some(address),
                Some(core_values),
            ) if form.is_clean() => Ok(Self {
                name,
                vision,
                mission,
                goal,
                motto,
                slogan,
                about,
                logo,
                contact_email,
                phone,
                address,
                facebook,
                instagram,
                x,
                tiktok,
                youtube,
                core_values,
            }),
            _ => Err(form.into_rejection()),
        }
    }

    fn socials(&self) -> [Option<&WebUrl>; 5] {
        [
            self.facebook.as_ref(),
            self.instagram.as_ref(),
            self.x.as_ref(),
            self.tiktok.as_ref(),
            self.youtube.as_ref(),
        ]
    }
}
