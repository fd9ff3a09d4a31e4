//! External product API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`
//! - The API is the source of truth - NO local sync, every read re-fetches
//! - No retries: a failed call is translated into a user-facing message by
//!   the route that issued it
//!
//! # Example
//!
//! ```rust,ignore
//! use storekeeper_panel::store_api::StoreApiClient;
//!
//! let client = StoreApiClient::new(&config.store_api)?;
//! let products = client.list_products().await?;
//! ```

mod client;
pub mod types;

pub use client::StoreApiClient;
pub use types::{Category, NewProduct, Product};

use thiserror::Error;

/// Errors that can occur when calling the external product API.
///
/// Display strings double as user-facing messages, so they are written in
/// response language rather than log language.
#[derive(Debug, Error)]
pub enum StoreApiError {
    /// Connection failure, timeout, or other transport error.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status (other than 404).
    #[error("API error ({status}): {body}")]
    Status {
        /// Upstream HTTP status.
        status: reqwest::StatusCode,
        /// Upstream response body, verbatim.
        body: String,
    },

    /// The API answered 404 for the requested product.
    #[error("Product not found in the external API")]
    NotFound,

    /// The response body was not the expected JSON.
    #[error("Invalid API response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_carries_status_and_body() {
        let err = StoreApiError::Status {
            status: reqwest::StatusCode::BAD_REQUEST,
            body: r#"{"message":"price must be positive"}"#.to_owned(),
        };

        let message = err.to_string();
        assert!(message.contains("400"));
        assert!(message.contains("price must be positive"));
    }

    #[test]
    fn test_not_found_message_is_distinct() {
        assert_eq!(
            StoreApiError::NotFound.to_string(),
            "Product not found in the external API"
        );
    }
}
