//! Product API routes.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use storekeeper_core::ProductId;

use crate::error::AppError;
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

/// Delete request body.
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: Option<i64>,
}

/// Delete a product from the external API.
///
/// POST /api/products/delete
///
/// A missing product answers 404 with its own message; other upstream
/// rejections keep their status code.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a malformed body or missing id, and
/// `AppError::StoreApi` when the upstream call fails.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    body: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<impl IntoResponse + std::fmt::Debug, AppError> {
    let Json(request) =
        body.map_err(|_| AppError::BadRequest("Invalid request body".to_owned()))?;
    let id = request
        .id
        .ok_or_else(|| AppError::BadRequest("Product id is required".to_owned()))?;

    state.store_api().delete_product(ProductId::new(id)).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Product deleted successfully!",
    })))
}
