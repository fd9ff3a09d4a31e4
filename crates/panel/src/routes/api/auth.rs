//! Authentication API routes.
//!
//! JSON endpoints for registration, token login/logout, the current user's
//! profile, and username availability.

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use storekeeper_core::AuthToken;

use crate::error::AppError;
use crate::middleware::auth::{RequireAuth, clear_session_cookie, session_cookie};
use crate::models::UserView;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Username availability query.
#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    #[serde(default)]
    pub username: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Register a new user.
///
/// POST /api/auth/register
///
/// Returns 201 with the new user and their token. Validation failures come
/// back as 400 with a per-field error map.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth
        .register(&request.username, &request.email, &request.password)
        .await
    {
        Ok((user, token)) => {
            let mut response = (
                StatusCode::CREATED,
                Json(json!({
                    "success": true,
                    "message": "User registered successfully",
                    "user": UserView::from(&user),
                    "token": token.as_str(),
                })),
            )
                .into_response();
            start_session(&mut response, &token);
            response
        }
        Err(AuthError::Validation(errors)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "Registration failed",
                "errors": errors,
            })),
        )
            .into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Login with username and password.
///
/// POST /api/auth/login
///
/// Returns the user and their token, reusing the stored token when one
/// exists. Bad credentials come back as 400 without revealing which field
/// was wrong.
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.login(&request.username, &request.password).await {
        Ok((user, token)) => {
            let mut response = Json(json!({
                "success": true,
                "message": "Authentication successful",
                "user": UserView::from(&user),
                "token": token.as_str(),
            }))
            .into_response();
            start_session(&mut response, &token);
            response
        }
        Err(AuthError::InvalidCredentials) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "Authentication failed",
                "errors": {
                    "non_field_errors": ["Unable to log in with provided credentials."],
                },
            })),
        )
            .into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Delete the current user's token.
///
/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, RequireAuth(user): RequireAuth) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.logout(user.id).await {
        Ok(true) => {
            crate::error::clear_sentry_user();
            let mut response = Json(json!({
                "success": true,
                "message": "Session closed successfully",
            }))
            .into_response();
            end_session(&mut response);
            response
        }
        // The token vanished between authentication and deletion
        Ok(false) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "Failed to close session",
                "error": "User has no auth token.",
            })),
        )
            .into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Return the current user's profile.
///
/// GET /api/auth/profile
pub async fn profile(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "user": UserView::from(&user),
    }))
}

/// Check whether a username is free to register.
///
/// GET /api/auth/check-username?username=...
///
/// # Errors
///
/// Returns `AppError` if the lookup fails.
pub async fn check_username(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<Response, AppError> {
    if query.username.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "A username must be provided",
            })),
        )
            .into_response());
    }

    let auth = AuthService::new(state.pool());
    let available = auth.is_username_available(&query.username).await?;

    Ok(Json(json!({
        "success": true,
        "available": available,
        "message": if available {
            "Username is available"
        } else {
            "Username is not available"
        },
    }))
    .into_response())
}

// ============================================================================
// Session Cookie Helpers
// ============================================================================

/// Attach the session cookie so full-page navigations authenticate too.
fn start_session(response: &mut Response, token: &AuthToken) {
    if let Ok(value) = header::HeaderValue::from_str(&session_cookie(token)) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
}

/// Expire the session cookie.
fn end_session(response: &mut Response) {
    if let Ok(value) = header::HeaderValue::from_str(&clear_session_cookie()) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::Value;
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::config::{PanelConfig, StoreApiConfig};

    use super::*;

    async fn test_state() -> AppState {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::MIGRATOR.run(&pool).await.unwrap();

        let config = PanelConfig {
            database_url: secrecy::SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            store_api: StoreApiConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                timeout_secs: 1,
            },
            sentry_dsn: None,
            sentry_environment: None,
        };
        AppState::new(config, pool).unwrap()
    }

    async fn response_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn register_request(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "correct horse battery".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_returns_created_with_token_and_cookie() {
        let state = test_state().await;

        let response = register(State(state), Json(register_request("frida"))).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("sk_token="));
        assert!(cookie.contains("HttpOnly"));

        let body = response_json(response).await;
        assert_eq!(body["success"], Value::Bool(true));
        assert_eq!(body["message"], "User registered successfully");
        assert_eq!(body["user"]["username"], "frida");
        assert_eq!(body["token"].as_str().unwrap().len(), 40);
    }

    #[tokio::test]
    async fn test_register_duplicate_username_reports_field_error() {
        let state = test_state().await;

        let first = register(State(state.clone()), Json(register_request("diego"))).await;
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = register(State(state), Json(register_request("diego"))).await;
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);

        let body = response_json(second).await;
        assert_eq!(body["success"], Value::Bool(false));
        assert_eq!(body["message"], "Registration failed");
        assert_eq!(
            body["errors"]["username"][0],
            "A user with that username already exists."
        );
    }

    #[tokio::test]
    async fn test_login_reuses_registration_token() {
        let state = test_state().await;

        let registered = register(State(state.clone()), Json(register_request("ana"))).await;
        let registered_token = response_json(registered).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = login(
            State(state),
            Json(LoginRequest {
                username: "ana".to_string(),
                password: "correct horse battery".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["message"], "Authentication successful");
        assert_eq!(body["token"], Value::String(registered_token));
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password_without_naming_the_field() {
        let state = test_state().await;
        register(State(state.clone()), Json(register_request("ana"))).await;

        let response = login(
            State(state),
            Json(LoginRequest {
                username: "ana".to_string(),
                password: "not the password".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["message"], "Authentication failed");
        assert_eq!(
            body["errors"]["non_field_errors"][0],
            "Unable to log in with provided credentials."
        );
    }

    #[tokio::test]
    async fn test_logout_expires_cookie_and_is_single_use() {
        let state = test_state().await;
        let auth = AuthService::new(state.pool());
        let (user, _token) = auth
            .register("ana", "ana@example.com", "correct horse battery")
            .await
            .unwrap();

        let response = logout(State(state.clone()), RequireAuth(user.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.contains("Max-Age=0"));
        let body = response_json(response).await;
        assert_eq!(body["message"], "Session closed successfully");

        // The token is already gone
        let again = logout(State(state), RequireAuth(user)).await;
        assert_eq!(again.status(), StatusCode::BAD_REQUEST);
        let body = response_json(again).await;
        assert_eq!(body["message"], "Failed to close session");
        assert_eq!(body["error"], "User has no auth token.");
    }

    #[tokio::test]
    async fn test_profile_returns_current_user() {
        let state = test_state().await;
        let auth = AuthService::new(state.pool());
        let (user, _token) = auth
            .register("ana", "ana@example.com", "correct horse battery")
            .await
            .unwrap();

        let response = profile(RequireAuth(user)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["success"], Value::Bool(true));
        assert_eq!(body["user"]["username"], "ana");
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn test_check_username_requires_a_value() {
        let state = test_state().await;

        let response = check_username(
            State(state),
            Query(UsernameQuery {
                username: String::new(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["message"], "A username must be provided");
    }

    #[tokio::test]
    async fn test_check_username_reports_availability() {
        let state = test_state().await;
        register(State(state.clone()), Json(register_request("taken"))).await;

        let free = check_username(
            State(state.clone()),
            Query(UsernameQuery {
                username: "free".to_string(),
            }),
        )
        .await
        .unwrap();
        let body = response_json(free).await;
        assert_eq!(body["available"], Value::Bool(true));
        assert_eq!(body["message"], "Username is available");

        let taken = check_username(
            State(state),
            Query(UsernameQuery {
                username: "taken".to_string(),
            }),
        )
        .await
        .unwrap();
        let body = response_json(taken).await;
        assert_eq!(body["available"], Value::Bool(false));
        assert_eq!(body["message"], "Username is not available");
    }
}
