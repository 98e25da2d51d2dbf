//! Mapping of library errors onto HTTP responses.

use api_shared::auth::AuthError;
use api_shared::{ErrorRes, FormRejectionRes};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use becc_core::{FormRejection, SiteError};
use becc_files::FilesError;

/// Message returned with every rejected submission.
pub const REJECTION_MESSAGE: &str = "Please correct the errors below.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Site(#[from] SiteError),
    #[error(transparent)]
    Files(#[from] FilesError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub type ApiResult<T> = Result<T, ApiError>;

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorRes {
            error: message.into(),
        }),
    )
        .into_response()
}

fn rejection_body(rejection: FormRejection) -> Response {
    let values = rejection
        .values
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(FormRejectionRes {
            message: REJECTION_MESSAGE.into(),
            errors: rejection.errors.into_map(),
            values,
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Site(SiteError::NotFound { collection, id }) => {
                tracing::debug!(collection, %id, "record not found");
                error_body(StatusCode::NOT_FOUND, "Not found")
            }
            ApiError::Site(SiteError::InvalidInput(message)) => {
                error_body(StatusCode::BAD_REQUEST, message)
            }
            ApiError::Site(SiteError::Validation(rejection)) => rejection_body(rejection),
            ApiError::Files(FilesError::UnsupportedMediaType(media_type)) => error_body(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("Unsupported media type: {media_type}"),
            ),
            ApiError::Files(FilesError::InvalidReference(_) | FilesError::NotFound(_)) => {
                error_body(StatusCode::NOT_FOUND, "Not found")
            }
            ApiError::Auth(AuthError::Disabled) => {
                error_body(StatusCode::FORBIDDEN, AuthError::Disabled.to_string())
            }
            ApiError::Auth(e) => error_body(StatusCode::UNAUTHORIZED, e.to_string()),
            other => {
                tracing::error!("Request failed: {:?}", other);
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        }
    }
}
