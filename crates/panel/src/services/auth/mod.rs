//! Authentication service.
//!
//! Provides username/password registration and token-based login. Each user
//! holds at most one token: login reuses the existing token, logout deletes
//! it, and the next login mints a fresh one.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use storekeeper_core::{AuthToken, Email, EmailError, UserId, Username, UsernameError};

use crate::db::{RepositoryError, TokenRepository, UserRepository};
use crate::forms::FieldErrors;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

const DUPLICATE_USERNAME_MESSAGE: &str = "A user with that username already exists.";

/// Authentication service.
///
/// Handles user registration, token login/logout, and per-request token
/// authentication.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: TokenRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens: TokenRepository::new(pool),
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a new user and issue their token.
    ///
    /// Every field is checked before returning, so a bad username and a weak
    /// password are reported together.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` with per-field messages if any input
    /// is invalid or the username is taken.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, AuthToken), AuthError> {
        let mut errors = FieldErrors::new();

        let parsed_username = match Username::parse(username) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                errors.add("username", username_message(&e));
                None
            }
        };

        // Only consult the database when the username itself is well formed
        if let Some(ref parsed) = parsed_username
            && self.users.username_exists(parsed.as_str()).await?
        {
            errors.add("username", DUPLICATE_USERNAME_MESSAGE);
        }

        let parsed_email = match Email::parse(email) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                errors.add("email", email_message(&e));
                None
            }
        };

        validate_password(password, &mut errors);

        match (parsed_username, parsed_email) {
            (Some(username), Some(email)) if errors.is_empty() => {
                let password_hash = hash_password(password)?;
                let user = self
                    .users
                    .create(&username, &email, &password_hash)
                    .await
                    .map_err(|e| match e {
                        // Lost a race with a concurrent registration
                        RepositoryError::Conflict(_) => {
                            let mut errors = FieldErrors::new();
                            errors.add("username", DUPLICATE_USERNAME_MESSAGE);
                            AuthError::Validation(errors)
                        }
                        other => AuthError::Repository(other),
                    })?;
                let token = self.tokens.get_or_create(user.id).await?;
                Ok((user, token))
            }
            _ => Err(AuthError::Validation(errors)),
        }
    }

    // =========================================================================
    // Login / Logout
    // =========================================================================

    /// Login with username and password, reusing the stored token if one
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or
    /// the password is wrong.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, AuthToken), AuthError> {
        let (user, password_hash) = self
            .users
            .get_password_hash(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = self.tokens.get_or_create(user.id).await?;
        self.users.record_login(user.id).await?;

        Ok((user, token))
    }

    /// Delete the user's token, ending their session everywhere.
    ///
    /// Returns `true` if a token existed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn logout(&self, user_id: UserId) -> Result<bool, AuthError> {
        let deleted = self.tokens.delete_for_user(user_id).await?;
        Ok(deleted)
    }

    // =========================================================================
    // Request Authentication
    // =========================================================================

    /// Resolve a presented token key to its user.
    ///
    /// Malformed keys are treated as unknown rather than errors, so a
    /// tampered header cannot distinguish itself from a revoked token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn authenticate(&self, key: &str) -> Result<Option<User>, AuthError> {
        let Ok(token) = AuthToken::parse(key) else {
            return Ok(None);
        };

        let user = self.users.get_by_token(token.as_str()).await?;
        Ok(user)
    }

    /// Check whether a username is free to register.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn is_username_available(&self, username: &str) -> Result<bool, AuthError> {
        let exists = self.users.username_exists(username).await?;
        Ok(!exists)
    }
}

// =============================================================================
// Validation Messages
// =============================================================================

fn username_message(error: &UsernameError) -> String {
    match error {
        UsernameError::Empty => "This field is required.".to_owned(),
        UsernameError::TooLong { max } => {
            format!("Username must be at most {max} characters.")
        }
        UsernameError::InvalidCharacters => {
            "Enter a valid username. This value may contain only letters, numbers, \
             and @/./+/-/_ characters."
                .to_owned()
        }
    }
}

fn email_message(error: &EmailError) -> String {
    match error {
        EmailError::Empty => "This field is required.".to_owned(),
        _ => "Enter a valid email address.".to_owned(),
    }
}

/// Apply the password rules, reporting every broken rule.
fn validate_password(password: &str, errors: &mut FieldErrors) {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add(
            "password",
            format!(
                "This password is too short. It must contain at least \
                 {MIN_PASSWORD_LENGTH} characters."
            ),
        );
    }
    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        errors.add("password", "This password is entirely numeric.");
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn test_pool() -> SqlitePool {
        // A single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_register_issues_token() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        let (user, token) = auth
            .register("casey", "casey@example.com", "correct horse battery")
            .await
            .unwrap();

        assert_eq!(user.username.as_str(), "casey");
        assert_eq!(token.as_str().len(), 40);
        assert!(user.last_login.is_none());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        auth.register("casey", "casey@example.com", "correct horse battery")
            .await
            .unwrap();
        let err = auth
            .register("casey", "other@example.com", "another password 99")
            .await
            .unwrap_err();

        let AuthError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors.field("username"),
            ["A user with that username already exists.".to_owned()]
        );
    }

    #[tokio::test]
    async fn test_register_reports_every_invalid_field() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        let err = auth
            .register("bad name!", "not-an-email", "1234")
            .await
            .unwrap_err();

        let AuthError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.field("username").len(), 1);
        assert_eq!(errors.field("email").len(), 1);
        // Short and entirely numeric are both reported
        assert_eq!(errors.field("password").len(), 2);
    }

    #[tokio::test]
    async fn test_login_reuses_registration_token() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        let (_, registered) = auth
            .register("casey", "casey@example.com", "correct horse battery")
            .await
            .unwrap();
        let (user, logged_in) = auth
            .login("casey", "correct horse battery")
            .await
            .unwrap();

        assert_eq!(registered.as_str(), logged_in.as_str());

        // record_login ran after the row was read, so re-fetch to observe it
        let refreshed = auth.authenticate(logged_in.as_str()).await.unwrap().unwrap();
        assert_eq!(refreshed.id, user.id);
        assert!(refreshed.last_login.is_some());
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        auth.register("casey", "casey@example.com", "correct horse battery")
            .await
            .unwrap();
        let err = auth.login("casey", "wrong password here").await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_rejects_unknown_username() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        let err = auth.login("nobody", "whatever password").await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_logout_rotates_token_on_next_login() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        let (user, first) = auth
            .register("casey", "casey@example.com", "correct horse battery")
            .await
            .unwrap();

        assert!(auth.logout(user.id).await.unwrap());
        // Second logout finds nothing to delete
        assert!(!auth.logout(user.id).await.unwrap());

        let (_, second) = auth
            .login("casey", "correct horse battery")
            .await
            .unwrap();
        assert_ne!(first.as_str(), second.as_str());
    }

    #[tokio::test]
    async fn test_authenticate_resolves_valid_token_only() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        let (user, token) = auth
            .register("casey", "casey@example.com", "correct horse battery")
            .await
            .unwrap();

        let resolved = auth.authenticate(token.as_str()).await.unwrap().unwrap();
        assert_eq!(resolved.id, user.id);

        // Well-formed but unknown key
        let unknown = "0".repeat(40);
        assert!(auth.authenticate(&unknown).await.unwrap().is_none());

        // Malformed key never reaches the database
        assert!(auth.authenticate("not-a-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_username_availability() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        assert!(auth.is_username_available("casey").await.unwrap());
        auth.register("casey", "casey@example.com", "correct horse battery")
            .await
            .unwrap();
        assert!(!auth.is_username_available("casey").await.unwrap());
    }

    #[test]
    fn test_password_rules_collect_all_failures() {
        let mut errors = FieldErrors::new();
        validate_password("1234", &mut errors);
        assert_eq!(errors.field("password").len(), 2);

        let mut errors = FieldErrors::new();
        validate_password("123456789", &mut errors);
        assert_eq!(
            errors.field("password"),
            ["This password is entirely numeric.".to_owned()]
        );

        let mut errors = FieldErrors::new();
        validate_password("long enough pass", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();

        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
