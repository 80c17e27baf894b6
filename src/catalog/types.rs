//! Core catalog types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Product identifier, always compared as text.
///
/// The catalog document may carry ids as JSON strings or numbers; both
/// deserialize to their textual form so `3` and `"3"` name the same product.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create an identifier from any text.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Coerce a loose JSON value into an identifier.
    ///
    /// Strings and numbers are accepted; anything else yields `None`.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self(s.clone())),
            serde_json::Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom("product id must be a string or a number"))
    }
}

/// A single catalog entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// Category the filter matches against.
    pub category: String,
    /// Long description, shown collapsed on the card.
    pub description: String,
    /// Image reference.
    pub image: String,
}

/// Wire shape of the catalog resource.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Every product in the catalog.
    pub products: Vec<Product>,
}

/// Immutable product list loaded once per session.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wrap a product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products whose category equals `category`, in catalog order.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }

    /// All products.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no product.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl From<CatalogDocument> for Catalog {
    fn from(doc: CatalogDocument) -> Self {
        Self::new(doc.products)
    }
}

#[cfg(test)]
pub(crate) fn sample_products() -> Vec<Product> {
    let make = |id: &str, name: &str, brand: &str, category: &str| Product {
        id: ProductId::new(id),
        name: name.to_string(),
        brand: brand.to_string(),
        category: category.to_string(),
        description: format!("{name} by {brand}."),
        image: format!("https://img.test/{id}.jpg"),
    };
    vec![
        make("1", "Foaming Cleanser", "CeraVe", "cleanser"),
        make("2", "Daily Lotion", "CeraVe", "moisturizer"),
        make("3", "Hydro Boost", "Neutrogena", "moisturizer"),
        make("4", "Clay Mask", "Aztec", "skincare"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_accepts_numbers_and_strings() {
        let doc: CatalogDocument = serde_json::from_str(
            r#"{"products":[
                {"id":3,"name":"A","brand":"B","category":"c","description":"d","image":"i"},
                {"id":"7","name":"E","brand":"F","category":"c","description":"d","image":"i"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(doc.products[0].id, ProductId::new("3"));
        assert_eq!(doc.products[1].id.as_str(), "7");
    }

    #[test]
    fn test_id_rejects_objects() {
        let result: Result<ProductId, _> = serde_json::from_str(r#"{"id":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = Catalog::new(sample_products());

        let moisturizers = catalog.by_category("moisturizer");
        assert_eq!(moisturizers.len(), 2);
        assert!(moisturizers.iter().all(|p| p.category == "moisturizer"));
        assert!(catalog.by_category("fragrance").is_empty());
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = Catalog::new(sample_products());
        assert_eq!(
            catalog.categories(),
            vec!["cleanser", "moisturizer", "skincare"]
        );
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::new(sample_products());
        assert_eq!(
            catalog.get(&ProductId::new("3")).map(|p| p.name.as_str()),
            Some("Hydro Boost")
        );
        assert!(catalog.get(&ProductId::new("99")).is_none());
    }
}
