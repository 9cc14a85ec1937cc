//! Product catalog records.
//!
//! The catalog endpoint answers with `{ "products": [ ... ] }`. Fields the
//! browser doesn't show are ignored; missing ones fall back to defaults.

use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com/products/";

/// Placeholder for labels without a value.
pub const EMPTY_LABEL: &str = "...";

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Product {
    pub title: String,
    pub price: f64,
    pub brand: Option<String>,
    pub category: String,
    pub rating: f64,
    pub description: String,
    #[serde(alias = "imageUrls")]
    pub images: Vec<String>,
}

impl Product {
    pub fn price_label(&self) -> String {
        format!("{:.2}", self.price)
    }

    pub fn rating_label(&self) -> String {
        format!("{:.2}", self.rating)
    }

    pub fn brand_label(&self) -> &str {
        non_empty(self.brand.as_deref())
    }

    pub fn category_label(&self) -> &str {
        non_empty(Some(self.category.as_str()))
    }
}

fn non_empty(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => EMPTY_LABEL,
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }
}

pub fn parse_catalog(json: &str) -> Result<Catalog> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const SAMPLE: &str = r#"{
        "products": [
            {
                "id": 1,
                "title": "Essence Mascara Lash Princess",
                "price": 9.99,
                "brand": "Essence",
                "category": "beauty",
                "rating": 4.94,
                "description": "A popular mascara.",
                "images": ["https://cdn.example.com/1/1.png", "https://cdn.example.com/1/2.png"],
                "thumbnail": "https://cdn.example.com/1/thumb.png"
            },
            {
                "title": "Apple",
                "price": 1.5,
                "category": "groceries",
                "rating": 4,
                "description": "",
                "images": []
            }
        ],
        "total": 194,
        "skip": 0,
        "limit": 30
    }"#;

    #[test]
    fn parses_products() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);
        let first = catalog.get(0).unwrap();
        assert_eq!(first.title, "Essence Mascara Lash Princess");
        assert_eq!(first.images.len(), 2);
        assert_eq!(first.brand_label(), "Essence");
    }

    #[test]
    fn missing_brand_gets_placeholder() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        let apple = catalog.get(1).unwrap();
        assert_eq!(apple.brand, None);
        assert_eq!(apple.brand_label(), EMPTY_LABEL);
        assert_eq!(apple.price_label(), "1.50");
        assert_eq!(apple.rating_label(), "4.00");
    }

    #[test]
    fn missing_products_is_empty() {
        assert!(parse_catalog("{}").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse_catalog("{\"products\": ["), Err(Error::Catalog(_))));
    }
}
