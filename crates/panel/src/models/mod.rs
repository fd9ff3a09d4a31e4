//! Domain models for the panel.

pub mod user;

pub use user::{User, UserView};
