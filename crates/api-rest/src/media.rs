//! Media upload and serving.

use crate::error::ApiResult;
use crate::AppState;
use api_shared::MediaUploadRes;
use axum::{
    body::Bytes,
    extract::{Path as AxumPath, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use becc_files::MediaStore;
use serde::Deserialize;

pub(crate) fn routes() -> Router<AppState> {
    Router::new().route("/media/:hash", get(serve_media))
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadParams {
    filename: Option<String>,
}

#[utoipa::path(
    get,
    path = "/media/{hash}",
    params(("hash" = String, Path, description = "SHA-256 hex digest of the content")),
    responses(
        (status = 200, description = "Stored image bytes with their detected content type"),
        (status = 404, description = "Not found", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn serve_media(
    State(state): State<AppState>,
    AxumPath(hash): AxumPath<String>,
) -> ApiResult<impl IntoResponse> {
    let media_ref = MediaStore::parse_ref(&hash)?;
    let stored = state.media.read(&media_ref)?;
    Ok((
        [
            (header::CONTENT_TYPE, stored.media_type),
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable".to_owned()),
        ],
        stored.bytes,
    ))
}

#[utoipa::path(
    post,
    path = "/dashboard/media",
    params(("filename" = Option<String>, Query, description = "Original filename, for display")),
    responses(
        (status = 201, description = "Stored; use `media_ref` in image fields", body = MediaUploadRes),
        (status = 401, description = "Missing or invalid API key", body = api_shared::ErrorRes),
        (status = 415, description = "Content is not an image", body = api_shared::ErrorRes),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub(crate) async fn upload_media(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<MediaUploadRes>)> {
    let filename = params.filename.unwrap_or_default();
    let metadata = state.media.store(&body, &filename)?;
    let status = if metadata.deduplicated {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((
        status,
        Json(MediaUploadRes {
            url: metadata.media_ref.url(),
            media_ref: metadata.media_ref.to_string(),
            media_type: metadata.media_type,
            size_bytes: metadata.size_bytes,
            deduplicated: metadata.deduplicated,
        }),
    ))
}
