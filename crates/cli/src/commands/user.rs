//! Panel user management commands.
//!
//! # Usage
//!
//! ```bash
//! sk-cli user create -u ana -e ana@example.com -p "correct horse battery"
//! ```
//!
//! The same validation rules apply as when registering through the panel:
//! usernames are limited to letters, digits and `@/./+/-/_`, and passwords
//! must be at least 8 characters and not entirely numeric.

use thiserror::Error;

use storekeeper_panel::services::{AuthError, AuthService};

/// Errors that can occur during user management.
#[derive(Debug, Error)]
pub enum UserError {
    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration execution error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The submitted fields were rejected.
    #[error("Invalid user details")]
    Invalid,

    /// Registration failed for another reason.
    #[error("Registration error: {0}")]
    Auth(AuthError),
}

/// Create a new panel user.
///
/// Runs pending migrations first, so the command works against a fresh
/// database file.
///
/// # Errors
///
/// Returns `UserError::Invalid` when a field fails validation; the
/// individual messages are logged per field.
pub async fn create(username: &str, email: &str, password: &str) -> Result<(), UserError> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url();

    tracing::info!("Connecting to the panel database...");
    let pool = storekeeper_panel::db::create_pool(&database_url).await?;
    storekeeper_panel::db::MIGRATOR.run(&pool).await?;

    let auth = AuthService::new(&pool);
    match auth.register(username, email, password).await {
        Ok((user, _token)) => {
            tracing::info!(
                "User created successfully! ID: {}, Username: {}",
                user.id,
                user.username
            );
            tracing::info!("They can now log in through the panel with their password.");
            Ok(())
        }
        Err(AuthError::Validation(errors)) => {
            for (field, messages) in errors.iter() {
                for message in messages {
                    tracing::error!("  {field}: {message}");
                }
            }
            Err(UserError::Invalid)
        }
        Err(e) => Err(UserError::Auth(e)),
    }
}
