//! Panel user domain types.
//!
//! These types represent validated domain objects for panel accounts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use storekeeper_core::{Email, UserId, Username};

/// A panel account (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, unique across the panel.
    pub username: Username,
    /// Contact email address.
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
    /// When the user last logged in, if ever.
    pub last_login: Option<DateTime<Utc>>,
}

/// The JSON shape of a user in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub date_joined: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            date_joined: user.created_at,
        }
    }
}
