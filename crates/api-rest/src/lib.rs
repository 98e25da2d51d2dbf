//! # API REST
//!
//! REST API implementation for the BECC site.
//!
//! Handles:
//! - Public page contexts and public submissions (contact, volunteer)
//! - The API-key protected dashboard (record CRUD, organisation profile, media upload)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (form decoding, JSON serialization, CORS)
//!
//! Uses `api-shared` for response bodies and the API key check, and `becc-core` for all
//! record logic.

#![warn(rust_2018_idioms)]

mod dashboard;
pub mod error;
mod media;
mod public;

use axum::Router;
use becc_core::SiteService;
use becc_files::MediaStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::{ApiError, ApiResult};

/// Application state for the REST API server
///
/// Everything here is resolved once at startup; handlers never read the environment.
#[derive(Clone)]
pub struct AppState {
    pub site: SiteService,
    pub media: Arc<MediaStore>,
    /// Dashboard API key. Empty disables the dashboard.
    pub api_key: Arc<str>,
}

impl AppState {
    pub fn new(site: SiteService, media: MediaStore, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            site,
            media: Arc::new(media),
            api_key: api_key.into(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        public::health,
        public::home,
        public::pillars,
        public::projects,
        public::about,
        public::gallery,
        public::contact,
        public::volunteer,
        media::serve_media,
        media::upload_media,
        dashboard::stats,
        dashboard::organisation_form,
        dashboard::save_organisation,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorRes,
        api_shared::FlashRes,
        api_shared::FormValuesRes,
        api_shared::FormRejectionRes,
        api_shared::MediaUploadRes,
        api_shared::DashboardStatsRes,
    ))
)]
struct ApiDoc;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(public::routes())
        .merge(media::routes())
        .merge(dashboard::routes(state.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
