//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::forms::FieldErrors;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more submitted fields failed validation.
    ///
    /// Every failing field is reported, not just the first.
    #[error("validation failed")]
    Validation(FieldErrors),

    /// Invalid credentials (wrong password or unknown username).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
