//! Unified error handling for the panel.
//!
//! Errors render as the JSON envelope the API speaks everywhere:
//! `{"success": false, ...}` with either a `message` or an `error` string,
//! plus an `errors` map for validation failures. Upstream product API
//! rejections keep their original status code and body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::AuthError;
use crate::store_api::StoreApiError;

/// Application-level error type for the panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Product API call failed.
    #[error("Store API error: {0}")]
    StoreApi(#[from] StoreApiError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(
            self,
            Self::Auth(AuthError::Repository(_) | AuthError::PasswordHash)
                | Self::StoreApi(StoreApiError::Http(_) | StoreApiError::Parse(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Panel request error"
            );
        }

        let (status, body) = match self {
            Self::Auth(AuthError::Validation(errors)) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": "Validation failed",
                    "errors": errors,
                }),
            ),
            Self::Auth(AuthError::InvalidCredentials) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": "Unable to log in with provided credentials.",
                }),
            ),
            Self::Auth(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"success": false, "error": "Internal server error"}),
            ),
            Self::StoreApi(e) => {
                let status = match &e {
                    StoreApiError::NotFound => StatusCode::NOT_FOUND,
                    StoreApiError::Status { status, .. } => *status,
                    StoreApiError::Http(_) | StoreApiError::Parse(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, json!({"success": false, "error": e.to_string()}))
            }
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({"success": false, "error": message}),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Set the Sentry user context from an authenticated user.
pub fn set_sentry_user(user: &crate::models::User) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user.id.to_string()),
            username: Some(user.username.as_str().to_owned()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}
