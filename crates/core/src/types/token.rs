//! Opaque bearer token for API authentication.

use core::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`AuthToken`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum AuthTokenError {
    /// The input is not exactly [`AuthToken::LENGTH`] characters.
    #[error("token must be exactly {expected} characters")]
    InvalidLength {
        /// Required length.
        expected: usize,
    },
    /// The input contains characters outside lowercase hex.
    #[error("token must be lowercase hexadecimal")]
    InvalidCharacters,
}

/// An opaque bearer token.
///
/// Tokens are 40 lowercase hex characters encoding 20 random bytes. Each
/// user holds at most one active token; it is handed out at registration,
/// reused at login, and deleted at logout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Length of a token in hex characters.
    pub const LENGTH: usize = 40;

    /// Generate a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; Self::LENGTH / 2];
        rand::rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Parse an `AuthToken` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 40 lowercase hex
    /// characters.
    pub fn parse(s: &str) -> Result<Self, AuthTokenError> {
        if s.len() != Self::LENGTH {
            return Err(AuthTokenError::InvalidLength {
                expected: Self::LENGTH,
            });
        }

        let hex_lower = |c: char| c.is_ascii_digit() || ('a'..='f').contains(&c);
        if !s.chars().all(hex_lower) {
            return Err(AuthTokenError::InvalidCharacters);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `AuthToken` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AuthToken {
    type Err = AuthTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
