//! HTTP route handlers for the panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//!
//! # Auth pages
//! GET  /auth/login              - Login page
//! GET  /auth/signup             - Signup page
//!
//! # Product pages (require auth)
//! GET  /products                - Product listing
//! GET  /products/new            - Create product form
//! POST /products/new            - Submit new product
//! GET  /products/{id}/edit      - Edit product form
//! POST /products/{id}/edit      - Submit product update
//!
//! # JSON API
//! POST /api/auth/register       - Register user, returns token
//! POST /api/auth/login          - Login, returns token
//! POST /api/auth/logout         - Delete token (requires auth)
//! GET  /api/auth/profile        - Current user (requires auth)
//! GET  /api/auth/check-username - Username availability
//! POST /api/products/delete     - Delete product (requires auth)
//! ```

pub mod api;
pub mod auth;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth page routes router.
pub fn auth_page_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page))
        .route("/signup", get(auth::signup_page))
}

/// Create the product page routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/new", get(products::new_form).post(products::submit_new))
        .route(
            "/{id}/edit",
            get(products::edit_form).post(products::submit_edit),
        )
}

/// Create the auth API routes router.
pub fn api_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login))
        .route("/logout", post(api::auth::logout))
        .route("/profile", get(api::auth::profile))
        .route("/check-username", get(api::auth::check_username))
}

/// Create the product API routes router.
pub fn api_product_routes() -> Router<AppState> {
    Router::new().route("/delete", post(api::products::delete))
}

/// Create all routes for the panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Auth pages
        .nest("/auth", auth_page_routes())
        // Product pages
        .nest("/products", product_routes())
        // JSON API
        .nest("/api/auth", api_auth_routes())
        .nest("/api/products", api_product_routes())
}
