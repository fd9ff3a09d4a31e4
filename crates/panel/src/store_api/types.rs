//! Wire types for the external product API.
//!
//! Field names follow the API's JSON exactly; nothing here is persisted.

use serde::{Deserialize, Serialize};

use storekeeper_core::{CategoryId, ProductId};

/// A product as returned by the external API.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    /// Some catalog entries arrive without a category.
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// A product category as returned by the external API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Payload for creating or updating a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category_id: CategoryId,
    pub images: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_api_shape() {
        let json = r#"{
            "id": 42,
            "title": "Classic Red Hoodie",
            "price": 35.5,
            "description": "A warm hoodie",
            "images": ["https://placehold.co/600x400"],
            "creationAt": "2026-01-01T00:00:00.000Z",
            "updatedAt": "2026-01-01T00:00:00.000Z",
            "category": {
                "id": 1,
                "name": "Clothes",
                "image": "https://placehold.co/100x100"
            }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(42));
        assert_eq!(product.title, "Classic Red Hoodie");
        assert!((product.price - 35.5).abs() < f64::EPSILON);
        assert_eq!(product.category.unwrap().name, "Clothes");
        assert_eq!(product.images.len(), 1);
    }

    #[test]
    fn test_product_tolerates_missing_optionals() {
        let json = r#"{"id": 7, "title": "Bare", "price": 1.0}"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.category.is_none());
        assert!(product.images.is_empty());
        assert_eq!(product.description, "");
    }

    #[test]
    fn test_new_product_serializes_camel_case() {
        let payload = NewProduct {
            title: "Desk Lamp".to_owned(),
            price: 24.99,
            description: "Adjustable arm, warm light".to_owned(),
            category_id: CategoryId::new(3),
            images: vec!["https://placehold.co/600x400".to_owned()],
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Desk Lamp",
                "price": 24.99,
                "description": "Adjustable arm, warm light",
                "categoryId": 3,
                "images": ["https://placehold.co/600x400"]
            })
        );
    }
}
