//! Dashboard endpoints. Every route requires the `x-api-key` header.
//!
//! Each collection gets the same six routes under `/dashboard/<collection>`: list, blank form,
//! create, seeded edit form, update and delete. Forms are submitted urlencoded; list fields
//! travel as JSON array strings under their transport names (`activities_json`).

use crate::error::{ApiError, ApiResult};
use crate::{media, AppState};
use api_shared::auth::validate_api_key;
use api_shared::{DashboardStatsRes, FlashRes, FormValuesRes, API_KEY_HEADER};
use axum::{
    extract::{Path as AxumPath, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Json, Response},
    routing::{get, post},
    Form, Router,
};
use becc_core::entities::{
    BlogPost, ContactMessage, Donation, EntityForm, Event, GalleryPhoto, Partner, Pillar, Project,
    TeamMember, VolunteerApplication,
};
use becc_core::{FormData, Record, RecordId, SiteError};
use std::collections::BTreeMap;

pub(crate) fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(stats))
        .route(
            "/dashboard/organisation",
            get(organisation_form).post(save_organisation),
        )
        .route("/dashboard/media", post(media::upload_media))
        .merge(collection::<Pillar>())
        .merge(collection::<Project>())
        .merge(collection::<Event>())
        .merge(collection::<Partner>())
        .merge(collection::<TeamMember>())
        .merge(collection::<BlogPost>())
        .merge(collection::<GalleryPhoto>())
        .merge(collection::<VolunteerApplication>())
        .merge(collection::<Donation>())
        .merge(collection::<ContactMessage>())
        .route_layer(middleware::from_fn_with_state(state, require_api_key))
}

async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if let Err(e) = validate_api_key(provided, &state.api_key) {
        tracing::warn!(path = %request.uri().path(), "dashboard request rejected: {}", e);
        return Err(e.into());
    }
    Ok(next.run(request).await)
}

fn collection<R>() -> Router<AppState>
where
    R: EntityForm + Send + Sync + 'static,
{
    let base = format!("/dashboard/{}", R::COLLECTION);
    Router::new()
        .route(&base, get(list_records::<R>).post(create_record::<R>))
        .route(&format!("{base}/new"), get(new_form::<R>))
        .route(&format!("{base}/:id/edit"), get(edit_form::<R>))
        .route(&format!("{base}/:id"), post(update_record::<R>))
        .route(&format!("{base}/:id/delete"), post(delete_record::<R>))
}

/// A malformed id cannot name a stored record.
fn record_id<R: Record>(raw: &str) -> ApiResult<RecordId> {
    RecordId::parse(raw).map_err(|_| {
        ApiError::Site(SiteError::NotFound {
            collection: R::COLLECTION,
            id: raw.to_owned(),
        })
    })
}

fn form_values(data: FormData) -> FormValuesRes {
    FormValuesRes {
        values: data
            .iter()
            .map(|(name, value)| (name.to_owned(), value.to_owned()))
            .collect(),
    }
}

fn flash<R: Record>(action: &str, record: &R) -> Json<FlashRes> {
    Json(FlashRes {
        message: format!("{} {} successfully!", R::SINGULAR, action),
        id: Some(record.id().to_string()),
    })
}

async fn list_records<R>(State(state): State<AppState>) -> ApiResult<Json<Vec<R>>>
where
    R: EntityForm + Send + Sync + 'static,
{
    Ok(Json(state.site.list::<R>()?))
}

async fn new_form<R>(State(state): State<AppState>) -> Json<FormValuesRes>
where
    R: EntityForm + Send + Sync + 'static,
{
    Json(form_values(state.site.blank_form::<R>()))
}

async fn create_record<R>(
    State(state): State<AppState>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> ApiResult<(StatusCode, Json<FlashRes>)>
where
    R: EntityForm + Send + Sync + 'static,
{
    let record = state.site.create::<R>(&FormData::from(fields))?;
    Ok((StatusCode::CREATED, flash("added", &record)))
}

async fn edit_form<R>(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<Json<FormValuesRes>>
where
    R: EntityForm + Send + Sync + 'static,
{
    let id = record_id::<R>(&id)?;
    Ok(Json(form_values(state.site.edit_form::<R>(&id)?)))
}

async fn update_record<R>(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> ApiResult<Json<FlashRes>>
where
    R: EntityForm + Send + Sync + 'static,
{
    let id = record_id::<R>(&id)?;
    let record = state.site.update::<R>(&id, &FormData::from(fields))?;
    Ok(flash("updated", &record))
}

async fn delete_record<R>(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<Json<FlashRes>>
where
    R: EntityForm + Send + Sync + 'static,
{
    let id = record_id::<R>(&id)?;
    let record = state.site.delete::<R>(&id)?;
    Ok(flash("deleted", &record))
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard counts", body = DashboardStatsRes),
        (status = 401, description = "Missing or invalid API key", body = api_shared::ErrorRes),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub(crate) async fn stats(State(state): State<AppState>) -> ApiResult<Json<DashboardStatsRes>> {
    let stats = state.site.dashboard_stats()?;
    Ok(Json(DashboardStatsRes {
        projects_count: stats.projects_count,
        active_projects: stats.active_projects,
        completed_projects: stats.completed_projects,
        events_count: stats.events_count,
        partners_count: stats.partners_count,
        volunteers_count: stats.volunteers_count,
        total_donations: stats.total_donations,
    }))
}

#[utoipa::path(
    get,
    path = "/dashboard/organisation",
    responses(
        (status = 200, description = "Organisation form values", body = FormValuesRes),
        (status = 401, description = "Missing or invalid API key", body = api_shared::ErrorRes),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub(crate) async fn organisation_form(
    State(state): State<AppState>,
) -> ApiResult<Json<FormValuesRes>> {
    Ok(Json(form_values(state.site.organisation_form()?)))
}

#[utoipa::path(
    post,
    path = "/dashboard/organisation",
    responses(
        (status = 200, description = "Organisation profile saved", body = FlashRes),
        (status = 401, description = "Missing or invalid API key", body = api_shared::ErrorRes),
        (status = 422, description = "Invalid submission", body = api_shared::FormRejectionRes),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub(crate) async fn save_organisation(
    State(state): State<AppState>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> ApiResult<Json<FlashRes>> {
    state.site.save_organisation(&FormData::from(fields))?;
    Ok(Json(FlashRes {
        message: "Organisation info updated successfully!".into(),
        id: None,
    }))
}
