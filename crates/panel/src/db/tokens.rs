//! Bearer token repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;

use storekeeper_core::{AuthToken, UserId};

use super::RepositoryError;

/// Repository for bearer token database operations.
pub struct TokenRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TokenRepository<'a> {
    /// Create a new token repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the active token for a user, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored key is invalid.
    pub async fn get_for_user(&self, user_id: UserId) -> Result<Option<AuthToken>, RepositoryError> {
        let key = sqlx::query_scalar::<_, String>(
            "SELECT key FROM auth_tokens WHERE user_id = ?1",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        key.map(|k| {
            AuthToken::parse(&k).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid token in database: {e}"))
            })
        })
        .transpose()
    }

    /// Get the user's token, creating a fresh one if none exists.
    ///
    /// A concurrent insert for the same user loses the unique race and
    /// falls back to reading the winner's token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<AuthToken, RepositoryError> {
        if let Some(existing) = self.get_for_user(user_id).await? {
            return Ok(existing);
        }

        let token = AuthToken::generate();
        let inserted = sqlx::query(
            "INSERT INTO auth_tokens (key, user_id, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(token.as_str())
        .bind(user_id)
        .bind(Utc::now())
        .execute(self.pool)
        .await;

        match inserted {
            Ok(_) => Ok(token),
            Err(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation() => self
                .get_for_user(user_id)
                .await?
                .ok_or(RepositoryError::NotFound),
            Err(e) => Err(RepositoryError::Database(e)),
        }
    }

    /// Delete the user's token. Returns whether a token existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_for_user(&self, user_id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE user_id = ?1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
