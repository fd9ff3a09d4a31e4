//! Business logic services for the panel.
//!
//! # Services
//!
//! - `auth` - User registration, token login/logout, request authentication

pub mod auth;

pub use auth::{AuthError, AuthService};
