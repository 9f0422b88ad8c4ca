//! Catalog seeding: promotions and products, from JSON or the built-in seed.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use storefront_products::{Product, ProductKind};
use storefront_promotions::{PromotionSpec, SharedPromotion};
use storefront_store::Store;

use crate::config::Config;

/// One product as written in a catalog file.
///
/// The variant is flattened in, e.g. `"kind": "limited", "maximum": 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: i64,
    #[serde(flatten)]
    pub kind: ProductKind,
    /// Name of a promotion declared in the same catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
}

impl ProductEntry {
    pub fn new(name: &str, price: f64, quantity: i64, kind: ProductKind) -> Self {
        Self {
            name: name.to_string(),
            price,
            quantity,
            kind,
            promotion: None,
        }
    }

    pub fn with_promotion(mut self, promotion: &str) -> Self {
        self.promotion = Some(promotion.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub promotions: Vec<PromotionSpec>,
    pub products: Vec<ProductEntry>,
}

impl Catalog {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("malformed catalog")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    /// Load the configured catalog, falling back to the built-in seed.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        match &config.catalog_path {
            Some(path) => Self::load(path),
            None => Ok(Self::seed()),
        }
    }

    /// Built-in demo catalog.
    pub fn seed() -> Self {
        use ProductKind::*;

        Self {
            promotions: vec![
                PromotionSpec::SecondHalfPrice {
                    name: "Second Half price!".to_string(),
                },
                PromotionSpec::ThirdOneFree {
                    name: "Third One Free!".to_string(),
                },
                PromotionSpec::PercentDiscount {
                    name: "30% off!".to_string(),
                    percent: 30.0,
                },
            ],
            products: vec![
                ProductEntry::new("MacBook Air M2", 1450.0, 100, Stocked)
                    .with_promotion("Second Half price!"),
                ProductEntry::new("Bose QuietComfort Earbuds", 250.0, 500, Stocked)
                    .with_promotion("Third One Free!"),
                ProductEntry::new("Google Pixel 7", 500.0, 250, Stocked).with_promotion("30% off!"),
                ProductEntry::new("Windows License", 125.0, 0, NonStocked),
                ProductEntry::new("Shipping", 10.0, 250, Limited { maximum: 1 }),
            ],
        }
    }

    /// Build the store, sharing each promotion among the products naming it.
    pub fn build(&self) -> anyhow::Result<Store> {
        let mut promotions: HashMap<&str, SharedPromotion> = HashMap::new();
        for spec in &self.promotions {
            let promotion = spec
                .build()
                .with_context(|| format!("invalid promotion {:?}", spec.name()))?;
            if promotions.insert(spec.name(), promotion).is_some() {
                bail!("duplicate promotion {:?}", spec.name());
            }
        }

        let mut store = Store::default();
        for entry in &self.products {
            let mut product =
                Product::with_kind(entry.name.as_str(), entry.price, entry.quantity, entry.kind)
                    .with_context(|| format!("invalid product {:?}", entry.name))?;

            if let Some(name) = &entry.promotion {
                let Some(promotion) = promotions.get(name.as_str()) else {
                    bail!("product {:?} refers to unknown promotion {name:?}", entry.name);
                };
                product.set_promotion(Some(SharedPromotion::clone(promotion)));
            }
            store.add_product(product.into_shared());
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::DomainError;
    use storefront_products::Purchasable;

    #[test]
    fn seed_builds_full_catalog() {
        let store = Catalog::seed().build().unwrap();
        assert_eq!(store.len(), 5);
        assert_eq!(store.total_quantity(), 100 + 500 + 250 + 250);

        let rendered: Vec<String> = store
            .all_products()
            .iter()
            .map(|p| p.borrow().render())
            .collect();
        assert_eq!(
            rendered[0],
            "MacBook Air M2, Price: $1450, Quantity: 100 (Promotion: Second Half price!)"
        );
        assert_eq!(rendered[3], "Windows License, Price: $125 (Available)");
        assert_eq!(rendered[4], "Shipping, Price: $10, Quantity: 250, Max per order: 1");
    }

    #[test]
    fn promotions_are_shared_between_products() {
        let catalog = Catalog::from_json(
            r#"{
                "promotions": [{ "kind": "third_one_free", "name": "3x2" }],
                "products": [
                    { "name": "A", "price": 10, "kind": "stocked", "promotion": "3x2" },
                    { "name": "B", "price": 20, "kind": "stocked", "promotion": "3x2" }
                ]
            }"#,
        )
        .unwrap();
        let store = catalog.build().unwrap();

        let a = store.all_products()[0].borrow();
        let b = store.all_products()[1].borrow();
        assert!(std::rc::Rc::ptr_eq(a.promotion().unwrap(), b.promotion().unwrap()));
    }

    #[test]
    fn entry_kinds_map_to_product_variants() {
        let catalog = Catalog::from_json(
            r#"{
                "products": [
                    { "name": "Plain", "price": 1, "quantity": 1, "kind": "stocked" },
                    { "name": "Digital", "price": 1, "kind": "non_stocked" },
                    { "name": "Capped", "price": 1, "quantity": 9, "kind": "limited", "maximum": 2 }
                ]
            }"#,
        )
        .unwrap();
        let store = catalog.build().unwrap();
        let kinds: Vec<ProductKind> = store
            .all_products()
            .iter()
            .map(|p| p.borrow().kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                ProductKind::Stocked,
                ProductKind::NonStocked,
                ProductKind::Limited { maximum: 2 },
            ]
        );
    }

    #[test]
    fn unknown_promotion_is_rejected() {
        let catalog = Catalog::from_json(
            r#"{ "products": [{ "name": "A", "price": 1, "kind": "stocked", "promotion": "x" }] }"#,
        )
        .unwrap();
        let err = catalog.build().unwrap_err();
        assert!(err.to_string().contains("unknown promotion"));
    }

    #[test]
    fn invalid_product_reports_domain_error() {
        let catalog = Catalog::from_json(
            r#"{ "products": [{ "name": "A", "price": 0, "quantity": 1, "kind": "stocked" }] }"#,
        )
        .unwrap();
        let err = catalog.build().unwrap_err();
        assert_eq!(err.to_string(), r#"invalid product "A""#);
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::validation("price must be greater than 0"))
        );
    }

    #[test]
    fn limited_entry_without_maximum_is_malformed() {
        let err = Catalog::from_json(
            r#"{ "products": [{ "name": "A", "price": 1, "quantity": 1, "kind": "limited" }] }"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "malformed catalog");
    }

    #[test]
    fn entry_without_kind_is_malformed() {
        let json = r#"{ "products": [{ "name": "A", "price": 1 }] }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert_eq!(err.to_string(), "malformed catalog");
    }

    #[test]
    fn limited_entry_with_zero_maximum_is_rejected() {
        let catalog = Catalog::from_json(
            r#"{ "products": [{ "name": "A", "price": 1, "kind": "limited", "maximum": 0 }] }"#,
        )
        .unwrap();
        let err = catalog.build().unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::validation("maximum must be at least 1"))
        );
    }

    #[test]
    fn entries_round_trip_with_flattened_kind() {
        let entry = ProductEntry::new("Shipping", 10.0, 250, ProductKind::Limited { maximum: 1 });
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "limited");
        assert_eq!(json["maximum"], 1);
        assert_eq!(serde_json::from_value::<ProductEntry>(json).unwrap(), entry);
    }

    #[test]
    fn duplicate_promotion_names_are_rejected() {
        let catalog = Catalog::from_json(
            r#"{
                "promotions": [
                    { "kind": "second_half_price", "name": "dup" },
                    { "kind": "third_one_free", "name": "dup" }
                ],
                "products": []
            }"#,
        )
        .unwrap();
        assert!(catalog.build().is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Catalog::load(Path::new("/nonexistent/storefront/catalog.json")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read catalog"));
    }

    #[test]
    fn unconfigured_catalog_falls_back_to_seed() {
        let catalog = Catalog::from_config(&Config::default()).unwrap();
        assert_eq!(catalog, Catalog::seed());
    }
}
