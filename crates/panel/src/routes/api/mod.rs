//! JSON API route handlers.
//!
//! Every endpoint answers with the `{"success": bool, ...}` envelope the
//! page scripts expect.

pub mod auth;
pub mod products;
