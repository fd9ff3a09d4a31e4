//! HTTP client implementation for the external product API.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use storekeeper_core::ProductId;

use super::StoreApiError;
use super::types::{Category, NewProduct, Product};
use crate::config::StoreApiConfig;

// =============================================================================
// StoreApiClient
// =============================================================================

/// Client for the external product API.
///
/// Cheap to clone; all calls share one `reqwest` client with the configured
/// per-call timeout.
#[derive(Debug, Clone)]
pub struct StoreApiClient {
    inner: Arc<StoreApiClientInner>,
}

#[derive(Debug)]
struct StoreApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl StoreApiClient {
    /// Create a new client for the configured API.
    ///
    /// # Errors
    ///
    /// Returns `StoreApiError::Http` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &StoreApiConfig) -> Result<Self, StoreApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            inner: Arc::new(StoreApiClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Fetch all products.
    ///
    /// # Errors
    ///
    /// Returns `StoreApiError` if the call fails or the response is not a
    /// product list.
    pub async fn list_products(&self) -> Result<Vec<Product>, StoreApiError> {
        debug!("fetching product list");
        let response = self
            .inner
            .client
            .get(self.endpoint("/products"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreApiError::NotFound` if the API answers 404.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, StoreApiError> {
        debug!(product_id = %id, "fetching product");
        let response = self
            .inner
            .client
            .get(self.endpoint(&format!("/products/{id}")))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Fetch all categories.
    ///
    /// # Errors
    ///
    /// Returns `StoreApiError` if the call fails or the response is not a
    /// category list.
    pub async fn list_categories(&self) -> Result<Vec<Category>, StoreApiError> {
        debug!("fetching category list");
        let response = self
            .inner
            .client
            .get(self.endpoint("/categories"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `StoreApiError::Status` with the upstream status and body if
    /// the API rejects the payload.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, StoreApiError> {
        debug!(title = %product.title, "creating product");
        let response = self
            .inner
            .client
            .post(self.endpoint("/products"))
            .json(product)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Update an existing product.
    ///
    /// # Errors
    ///
    /// Returns `StoreApiError::NotFound` if the API answers 404, or
    /// `StoreApiError::Status` for other rejections.
    pub async fn update_product(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Product, StoreApiError> {
        debug!(product_id = %id, title = %product.title, "updating product");
        let response = self
            .inner
            .client
            .put(self.endpoint(&format!("/products/{id}")))
            .json(product)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `StoreApiError::NotFound` if the API answers 404.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), StoreApiError> {
        debug!(product_id = %id, "deleting product");
        let response = self
            .inner
            .client
            .delete(self.endpoint(&format!("/products/{id}")))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StoreApiError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %truncate(&body),
                "product API rejected delete"
            );
            return Err(StoreApiError::Status { status, body });
        }

        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Check the status and decode the body, reading text first so failed
    /// calls keep their diagnostics.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreApiError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StoreApiError::NotFound);
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %truncate(&body),
                "product API returned non-success status"
            );
            return Err(StoreApiError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %truncate(&body),
                "failed to parse product API response"
            );
            StoreApiError::Parse(e)
        })
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(500).collect()
}
