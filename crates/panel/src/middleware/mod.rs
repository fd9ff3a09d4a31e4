//! HTTP middleware stack for the panel.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//!
//! Authentication is an extractor rather than a layer: handlers that need a
//! user take [`auth::RequireAuth`] and the token is resolved per request.

pub mod auth;
