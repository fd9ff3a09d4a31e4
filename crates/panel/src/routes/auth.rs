//! Authentication page handlers.
//!
//! These pages are static shells: the login and signup forms submit to the
//! JSON API from page scripts, which store the issued token client side.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate;

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate;

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate
}

/// Display the signup page.
pub async fn signup_page() -> impl IntoResponse {
    SignupTemplate
}
