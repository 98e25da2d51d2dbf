//! Public site endpoints. No authentication.

use crate::error::ApiResult;
use crate::AppState;
use api_shared::{FlashRes, HealthRes, HealthService};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Form, Router,
};
use becc_core::pages::{
    AboutPage, GalleryPage, HomePage, PageContext, PillarsPage, ProjectsPage,
};
use becc_core::{FormData, Record};
use std::collections::BTreeMap;

pub(crate) const CONTACT_THANKS: &str =
    "Thank you for your message! We will get back to you soon.";
pub(crate) const VOLUNTEER_THANKS: &str =
    "Thank you for volunteering! We will be in touch once your application is reviewed.";

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/", get(home))
        .route("/pillars", get(pillars))
        .route("/projects", get(projects))
        .route("/about", get(about))
        .route("/gallery", get(gallery))
        .route("/contact", post(contact))
        .route("/volunteer", post(volunteer))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
pub(crate) async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Home page context: pillars and the latest projects"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub(crate) async fn home(State(state): State<AppState>) -> ApiResult<Json<PageContext<HomePage>>> {
    Ok(Json(state.site.home_page()?))
}

#[utoipa::path(
    get,
    path = "/pillars",
    responses(
        (status = 200, description = "All pillars with activities and gallery"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub(crate) async fn pillars(
    State(state): State<AppState>,
) -> ApiResult<Json<PageContext<PillarsPage>>> {
    Ok(Json(state.site.pillars_page()?))
}

#[utoipa::path(
    get,
    path = "/projects",
    responses(
        (status = 200, description = "All projects with category, impact and status"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub(crate) async fn projects(
    State(state): State<AppState>,
) -> ApiResult<Json<PageContext<ProjectsPage>>> {
    Ok(Json(state.site.projects_page()?))
}

#[utoipa::path(
    get,
    path = "/about",
    responses(
        (status = 200, description = "Organisation profile and core values"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub(crate) async fn about(State(state): State<AppState>) -> ApiResult<Json<PageContext<AboutPage>>> {
    Ok(Json(state.site.about_page()?))
}

#[utoipa::path(
    get,
    path = "/gallery",
    responses(
        (status = 200, description = "Gallery photos, newest first"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub(crate) async fn gallery(
    State(state): State<AppState>,
) -> ApiResult<Json<PageContext<GalleryPage>>> {
    Ok(Json(state.site.gallery_page()?))
}

#[utoipa::path(
    post,
    path = "/contact",
    responses(
        (status = 201, description = "Message received", body = FlashRes),
        (status = 422, description = "Invalid submission", body = api_shared::FormRejectionRes),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub(crate) async fn contact(
    State(state): State<AppState>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> ApiResult<(StatusCode, Json<FlashRes>)> {
    let message = state.site.submit_contact(&FormData::from(fields))?;
    Ok((
        StatusCode::CREATED,
        Json(FlashRes {
            message: CONTACT_THANKS.into(),
            id: Some(message.id().to_string()),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/volunteer",
    responses(
        (status = 201, description = "Application received", body = FlashRes),
        (status = 422, description = "Invalid submission", body = api_shared::FormRejectionRes),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub(crate) async fn volunteer(
    State(state): State<AppState>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> ApiResult<(StatusCode, Json<FlashRes>)> {
    let application = state.site.submit_volunteer(&FormData::from(fields))?;
    Ok((
        StatusCode::CREATED,
        Json(FlashRes {
            message: VOLUNTEER_THANKS.into(),
            id: Some(application.id().to_string()),
        }),
    ))
}
