//! Storekeeper panel library.
//!
//! This crate provides the panel functionality as a library, allowing it to
//! be tested and reused (the CLI links against it for migrations and user
//! management).
//!
//! The panel is a thin server-rendered front over an external product API:
//! users and auth tokens live in a local `SQLite` database, while products
//! and categories are fetched fresh from the API on every request and never
//! stored.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store_api;
