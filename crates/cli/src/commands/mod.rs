//! CLI command implementations.

pub mod migrate;
pub mod user;

use secrecy::SecretString;

const DEFAULT_DATABASE_URL: &str = "sqlite://storekeeper.db";

/// Resolve the panel database URL the same way the panel itself does:
/// `PANEL_DATABASE_URL`, then `DATABASE_URL`, then the local-file default.
pub(crate) fn database_url() -> SecretString {
    if let Ok(value) = std::env::var("PANEL_DATABASE_URL") {
        return SecretString::from(value);
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return SecretString::from(value);
    }
    SecretString::from(DEFAULT_DATABASE_URL)
}
