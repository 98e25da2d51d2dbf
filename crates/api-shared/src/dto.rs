//! Request and response bodies shared by the HTTP API and its clients.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Generic error body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// Success body of a dashboard write, e.g. `"Pillar added successfully!"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FlashRes {
    pub message: String,
    /// Id of the created, updated or deleted record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Initial values of a create or edit form.
///
/// List fields appear under their transport names (`activities_json`) as JSON array strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormValuesRes {
    pub values: BTreeMap<String, String>,
}

/// A rejected submission: messages per field and the submitted values for re-rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormRejectionRes {
    pub message: String,
    pub errors: BTreeMap<String, Vec<String>>,
    pub values: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MediaUploadRes {
    /// SHA-256 hex digest; use as the value of an image field or a list item's `mediaRef`.
    pub media_ref: String,
    pub url: String,
    pub media_type: String,
    pub size_bytes: u64,
    pub deduplicated: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStatsRes {
    pub projects_count: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub events_count: usize,
    pub partners_count: usize,
    pub volunteers_count: usize,
    pub total_donations: String,
}
