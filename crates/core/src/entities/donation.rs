use super::{keep_id, EntityForm};
use crate::config::ListLimits;
use crate::constants::{DONATIONS_COLLECTION, SHORT_TEXT_MAX_CHARS, TRANSACTION_ID_MAX_CHARS};
use crate::forms::{format_minor_units, Choice, FormBinder, FormData, FormRejection};
use crate::store::Record;
use crate::SiteResult;
use becc_types::NonEmptyText;
use becc_uuid::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationMethod {
    Mpesa,
    Paypal,
    Bank,
}

impl Choice for DonationMethod {
    const ALL: &'static [Self] = &[Self::Mpesa, Self::Paypal, Self::Bank];

    fn value(self) -> &'static str {
        match self {
            Self::Mpesa => "mpesa",
            Self::Paypal => "paypal",
            Self::Bank => "bank",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Mpesa => "M-Pesa",
            Self::Paypal => "PayPal",
            Self::Bank => "Bank Transfer",
        }
    }
}

/// A recorded donation. Amounts are kept in minor units (cents).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: RecordId,
    pub donor_name: NonEmptyText,
    pub amount_minor: i64,
    pub method: DonationMethod,
    #[serde(default)]
    pub transaction_id: String,
    pub date: DateTime<Utc>,
}

impl Record for Donation {
    const COLLECTION: &'static str = DONATIONS_COLLECTION;
    const SINGULAR: &'static str = "Donation";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn cmp_for_listing(&self, other: &Self) -> Ordering {
        self.donor_name
            .cmp(&other.donor_name)
            .then_with(|| other.date.cmp(&self.date))
    }
}

impl EntityForm for Donation {
    fn seed(&self) -> SiteResult<FormData> {
        Ok(FormData::new()
            .with("donor_name", self.donor_name.as_str())
            .with("amount", format_minor_units(self.amount_minor))
            .with("method", self.method.value())
            .with("transaction_id", self.transaction_id.as_str()))
    }

    fn bind(
        data: &FormData,
        limits: ListLimits,
        existing: Option<&Self>,
    ) -> Result<Self, FormRejection> {
        let mut form = FormBinder::new(data, limits);
        let donor_name = form.required_text("donor_name", SHORT_TEXT_MAX_CHARS);
        let amount_minor = form.money("amount");
        let method = form.choice::<DonationMethod>("method");
        let transaction_id = form.optional_text("transaction_id", TRANSACTION_ID_MAX_CHARS);

        match (donor_name, amount_minor, method) {
            (Some(donor_name), Some(amount_minor), Some(method)) if form.is_clean() => Ok(Self {
                id: keep_id(existing),
                donor_name,
                amount_minor,
                method,
                transaction_id,
                date: existing.map(|d| d.date).unwrap_or_else(Utc::now),
            }),
            _ => Err(form.into_rejection()),
        }
    }
}
