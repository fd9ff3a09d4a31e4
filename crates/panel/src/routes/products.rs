//! Product page route handlers.
//!
//! Create and edit share one flow parameterized by an optional product id.
//! Edits re-fetch the product before anything else on both the GET and the
//! POST, so a record that has vanished upstream can never be half-updated.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use storekeeper_core::{CategoryId, ProductId};

use crate::filters;
use crate::forms::{FieldErrors, ProductFormData, category_choices};
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;
use crate::store_api::{Category, Product};

// =============================================================================
// Query Types
// =============================================================================

/// Flash banner parameters carried across a post-submit redirect.
#[derive(Debug, Deserialize)]
pub struct FlashQuery {
    /// Title of a product that was just created.
    pub created: Option<String>,
    /// Title of a product that was just updated.
    pub updated: Option<String>,
    /// Error message from an aborted operation.
    pub error: Option<String>,
}

impl FlashQuery {
    /// Success banner text, if the previous request created or updated a
    /// product.
    fn notice(&self) -> Option<String> {
        self.created
            .as_deref()
            .map(|title| format!("Product \"{title}\" added successfully!"))
            .or_else(|| {
                self.updated
                    .as_deref()
                    .map(|title| format!("Product \"{title}\" updated successfully!"))
            })
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    /// Whether the upstream fetch succeeded.
    pub success: bool,
    /// Upstream failure message for the degraded view.
    pub error_message: Option<String>,
    /// Success banner from a redirect.
    pub notice: Option<String>,
    /// Error banner from a redirect.
    pub flash_error: Option<String>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub total: usize,
}

/// Category option for the form dropdown.
pub struct CategoryChoice {
    pub id: CategoryId,
    pub name: String,
    pub selected: bool,
}

/// Product create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub is_edit: bool,
    pub product_id: Option<ProductId>,
    pub form: ProductFormData,
    pub choices: Vec<CategoryChoice>,
    pub errors: FieldErrors,
    /// Upstream rejection shown after a failed create or update.
    pub api_error: Option<String>,
}

// =============================================================================
// Listing
// =============================================================================

/// Display the product listing page.
///
/// Products and categories both come from the external API on every load.
/// If either fetch fails the page renders degraded, with the failure message
/// in place of the catalog.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<FlashQuery>,
) -> Response {
    let notice = query.notice();
    let flash_error = query.error.clone();

    let products = match state.store_api().list_products().await {
        Ok(products) => products,
        Err(e) => return degraded_index(&e.to_string(), notice, flash_error),
    };
    let categories = match state.store_api().list_categories().await {
        Ok(categories) => categories,
        Err(e) => return degraded_index(&e.to_string(), notice, flash_error),
    };

    ProductsIndexTemplate {
        success: true,
        error_message: None,
        notice,
        flash_error,
        total: products.len(),
        products,
        categories,
    }
    .into_response()
}

fn degraded_index(error: &str, notice: Option<String>, flash_error: Option<String>) -> Response {
    tracing::error!(error, "product list fetch failed");

    let template = ProductsIndexTemplate {
        success: false,
        error_message: Some(format!("Could not reach the product API: {error}")),
        notice,
        flash_error,
        products: Vec::new(),
        categories: Vec::new(),
        total: 0,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, template).into_response()
}

// =============================================================================
// Create / Edit
// =============================================================================

/// Display the empty create form.
pub async fn new_form(State(state): State<AppState>, RequireAuth(_user): RequireAuth) -> Response {
    manage_form(&state, None).await
}

/// Display the edit form pre-populated from the live record.
pub async fn edit_form(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<ProductId>,
) -> Response {
    manage_form(&state, Some(id)).await
}

/// Handle a create submission.
pub async fn submit_new(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<ProductFormData>,
) -> Response {
    manage_submit(&state, None, form).await
}

/// Handle an update submission.
pub async fn submit_edit(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductFormData>,
) -> Response {
    manage_submit(&state, Some(id), form).await
}

/// Render the form page, fetching the existing record first when editing.
async fn manage_form(state: &AppState, product_id: Option<ProductId>) -> Response {
    let form = if let Some(id) = product_id {
        match state.store_api().get_product(id).await {
            Ok(product) => form_from_product(&product),
            Err(e) => return fetch_failed_redirect(&e.to_string()).into_response(),
        }
    } else {
        ProductFormData::default()
    };

    let choices = category_choices(state.store_api().list_categories().await);
    render_form(product_id, form, &choices, FieldErrors::new(), None).into_response()
}

/// Validate a submission and pass it through to the external API.
///
/// Failed validation and upstream rejections re-render the form with the
/// submitted values intact; only success redirects back to the listing.
async fn manage_submit(
    state: &AppState,
    product_id: Option<ProductId>,
    form: ProductFormData,
) -> Response {
    // An edit whose record cannot be fetched is aborted before validation,
    // so the update call can never run against a vanished product
    if let Some(id) = product_id
        && let Err(e) = state.store_api().get_product(id).await
    {
        return fetch_failed_redirect(&e.to_string()).into_response();
    }

    let choices = category_choices(state.store_api().list_categories().await);

    let payload = match form.validate(&choices) {
        Ok(payload) => payload,
        Err(errors) => {
            return render_form(product_id, form, &choices, errors, None).into_response();
        }
    };

    let result = match product_id {
        Some(id) => state.store_api().update_product(id, &payload).await,
        None => state.store_api().create_product(&payload).await,
    };

    match result {
        Ok(_) => {
            let param = if product_id.is_some() {
                "updated"
            } else {
                "created"
            };
            Redirect::to(&format!(
                "/products?{param}={}",
                urlencoding::encode(&payload.title)
            ))
            .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "product API rejected submission");
            render_form(product_id, form, &choices, FieldErrors::new(), Some(e.to_string()))
                .into_response()
        }
    }
}

fn render_form(
    product_id: Option<ProductId>,
    form: ProductFormData,
    choices: &[Category],
    errors: FieldErrors,
    api_error: Option<String>,
) -> ProductFormTemplate {
    let selected = form.category.trim().to_owned();
    ProductFormTemplate {
        is_edit: product_id.is_some(),
        product_id,
        choices: choices
            .iter()
            .map(|category| CategoryChoice {
                id: category.id,
                name: category.name.clone(),
                selected: selected == category.id.to_string(),
            })
            .collect(),
        form,
        errors,
        api_error,
    }
}

/// Pre-populate form fields from the live record.
///
/// Only the first image slot is filled, matching the form's single required
/// image.
fn form_from_product(product: &Product) -> ProductFormData {
    ProductFormData {
        title: product.title.clone(),
        price: product.price.to_string(),
        description: product.description.clone(),
        category: product
            .category
            .as_ref()
            .map(|category| category.id.to_string())
            .unwrap_or_default(),
        image1: product.images.first().cloned().unwrap_or_default(),
        image2: String::new(),
        image3: String::new(),
    }
}

fn fetch_failed_redirect(error: &str) -> Redirect {
    let message = format!("Could not fetch the product. {error}");
    Redirect::to(&format!(
        "/products?error={}",
        urlencoding::encode(&message)
    ))
}
