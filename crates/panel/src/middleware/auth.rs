//! Authentication middleware and extractors for the panel.
//!
//! Provides extractors for requiring token authentication in route handlers.
//! Tokens arrive either in the `Authorization` header (API calls made from
//! page scripts) or in the session cookie (full-page navigations).

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use storekeeper_core::AuthToken;

use crate::models::User;
use crate::services::AuthService;
use crate::state::AppState;

/// Cookie that carries the token for HTML page loads.
pub const SESSION_COOKIE: &str = "sk_token";

/// Extractor that requires an authenticated user.
///
/// If no valid token is presented, returns a redirect to the login page for
/// HTML requests, or 401 Unauthorized for API requests.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub User);

/// Error returned when authentication is required but no valid token was
/// presented.
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl AuthRejection {
    fn for_path(path: &str) -> Self {
        if path.starts_with("/api/") {
            Self::Unauthorized
        } else {
            Self::RedirectToLogin
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "success": false,
                    "error": "Authentication credentials were not provided.",
                })),
            )
                .into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = header_token(parts)
            .or_else(|| cookie_token(parts))
            .ok_or_else(|| AuthRejection::for_path(parts.uri.path()))?;

        let auth = AuthService::new(state.pool());
        let user = match auth.authenticate(&key).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = %e, "token lookup failed");
                None
            }
        };

        let user = user.ok_or_else(|| AuthRejection::for_path(parts.uri.path()))?;
        crate::error::set_sentry_user(&user);

        Ok(Self(user))
    }
}

/// Extract the token key from the `Authorization` header.
///
/// Accepts both `Token <key>` and `Bearer <key>` schemes.
fn header_token(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    header
        .strip_prefix("Token ")
        .or_else(|| header.strip_prefix("Bearer "))
        .map(|key| key.trim().to_owned())
}

/// Extract the token key from the session cookie.
fn cookie_token(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(header::COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_owned())
    })
}

/// Build the `Set-Cookie` value that starts an HTML session.
#[must_use]
pub fn session_cookie(token: &AuthToken) -> String {
    format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        token.as_str()
    )
}

/// Build the `Set-Cookie` value that ends an HTML session.
#[must_use]
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
