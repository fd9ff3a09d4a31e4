//! Product form validation.
//!
//! The category dropdown is built from the live category list when the API
//! answers, and from a fixed fallback set when it does not, so the form stays
//! usable during upstream outages.

use serde::Deserialize;
use tracing::warn;

use storekeeper_core::{CategoryId, Price, PriceError};

use super::FieldErrors;
use crate::store_api::{Category, NewProduct, StoreApiError};

/// Maximum number of categories offered in the form dropdown.
pub const MAX_FORM_CATEGORIES: usize = 10;

const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 100;
const DESCRIPTION_MIN: usize = 10;
const DESCRIPTION_MAX: usize = 500;

/// Raw product form fields, as submitted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFormData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image1: String,
    #[serde(default)]
    pub image2: String,
    #[serde(default)]
    pub image3: String,
}

impl ProductFormData {
    /// Validate every field and assemble the API payload.
    ///
    /// All failures are collected, so a submission with a short title and a
    /// short description reports both at once.
    ///
    /// # Errors
    ///
    /// Returns the accumulated per-field messages when any field is invalid.
    pub fn validate(&self, choices: &[Category]) -> Result<NewProduct, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = self.title.trim();
        let title_len = title.chars().count();
        if title_len < TITLE_MIN {
            errors.add(
                "title",
                format!("Title must be at least {TITLE_MIN} characters."),
            );
        } else if title_len > TITLE_MAX {
            errors.add(
                "title",
                format!("Title must be at most {TITLE_MAX} characters."),
            );
        }

        let description = self.description.trim();
        let description_len = description.chars().count();
        if description_len < DESCRIPTION_MIN {
            errors.add(
                "description",
                format!("Description must be at least {DESCRIPTION_MIN} characters."),
            );
        } else if description_len > DESCRIPTION_MAX {
            errors.add(
                "description",
                format!("Description must be at most {DESCRIPTION_MAX} characters."),
            );
        }

        let price = match Price::parse(&self.price) {
            Ok(price) => Some(price),
            Err(e) => {
                errors.add("price", price_message(&e));
                None
            }
        };

        let category = self.validated_category(choices, &mut errors);
        let images = self.validated_images(&mut errors);

        match (price, category) {
            (Some(price), Some(category_id)) if errors.is_empty() => Ok(NewProduct {
                title: title.to_owned(),
                price: price.to_f64(),
                description: description.to_owned(),
                category_id,
                images,
            }),
            _ => Err(errors),
        }
    }

    fn validated_category(
        &self,
        choices: &[Category],
        errors: &mut FieldErrors,
    ) -> Option<CategoryId> {
        let raw = self.category.trim();
        if raw.is_empty() {
            errors.add("category", "Select a category.");
            return None;
        }

        let selected = raw
            .parse::<i64>()
            .ok()
            .map(CategoryId::new)
            .filter(|id| choices.iter().any(|c| c.id == *id));

        if selected.is_none() {
            errors.add(
                "category",
                format!("Select a valid choice. {raw} is not one of the available choices."),
            );
        }
        selected
    }

    /// Collect the valid image URLs in slot order. The first slot is
    /// required; the rest are checked only when filled in.
    fn validated_images(&self, errors: &mut FieldErrors) -> Vec<String> {
        let mut images = Vec::new();

        let primary = self.image1.trim();
        if primary.is_empty() {
            errors.add("image1", "Primary image URL is required.");
        } else if is_valid_image_url(primary) {
            images.push(primary.to_owned());
        } else {
            errors.add("image1", "Image 1 must be a valid http(s) URL.");
        }

        for (field, value, label) in [
            ("image2", self.image2.trim(), "Image 2"),
            ("image3", self.image3.trim(), "Image 3"),
        ] {
            if value.is_empty() {
                continue;
            }
            if is_valid_image_url(value) {
                images.push(value.to_owned());
            } else {
                errors.add(field, format!("{label} must be a valid http(s) URL."));
            }
        }

        images
    }
}

fn is_valid_image_url(s: &str) -> bool {
    url::Url::parse(s).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

fn price_message(error: &PriceError) -> String {
    match error {
        PriceError::Invalid => "Price must be a number.".to_owned(),
        PriceError::NotPositive => "Price must be greater than 0.".to_owned(),
        PriceError::TooLarge { max } => format!("Price must be at most {max}."),
    }
}

/// Resolve the dropdown choices from a category fetch result.
///
/// On success the list is capped at [`MAX_FORM_CATEGORIES`]; on failure a
/// fixed fallback set keeps the form usable.
pub fn category_choices(fetched: Result<Vec<Category>, StoreApiError>) -> Vec<Category> {
    match fetched {
        Ok(mut categories) => {
            categories.truncate(MAX_FORM_CATEGORIES);
            categories
        }
        Err(e) => {
            warn!(error = %e, "could not fetch categories, using fallback set");
            fallback_categories()
        }
    }
}

/// Fixed category set used when the live list is unavailable.
pub fn fallback_categories() -> Vec<Category> {
    [
        (1, "Clothes"),
        (2, "Electronics"),
        (3, "Furniture"),
        (4, "Shoes"),
        (5, "Miscellaneous"),
    ]
    .into_iter()
    .map(|(id, name)| Category {
        id: CategoryId::new(id),
        name: name.to_owned(),
        image: None,
    })
    .collect()
}
