//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! sk-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `PANEL_DATABASE_URL` - `SQLite` connection string for the panel
//!   (falls back to `DATABASE_URL`, then `sqlite://storekeeper.db`)
//!
//! Migration files live in `crates/panel/migrations/` and are embedded into
//! the panel crate at compile time, so this command works from any
//! directory.

use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration execution error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the panel database migrations.
///
/// Creates the database file when it does not exist yet.
///
/// # Errors
///
/// Returns `MigrationError` if the database cannot be reached or a
/// migration fails.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url();

    tracing::info!("Connecting to the panel database...");
    let pool = storekeeper_panel::db::create_pool(&database_url).await?;

    tracing::info!("Running panel migrations...");
    storekeeper_panel::db::MIGRATOR.run(&pool).await?;

    tracing::info!("Panel migrations complete!");
    Ok(())
}
