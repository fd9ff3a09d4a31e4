//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;

/// Home page template.
///
/// The page renders the same shell for everyone; the auth script swaps the
/// call-to-action block depending on whether a stored token is still valid.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate;

/// Display the home page.
pub async fn home() -> impl IntoResponse {
    HomeTemplate
}
