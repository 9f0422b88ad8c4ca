use std::rc::Rc;

use storefront_core::DomainResult;
use storefront_products::{ProductRef, Purchasable};

/// Order line: a product and the requested quantity.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product: ProductRef,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(product: &ProductRef, quantity: i64) -> Self {
        Self {
            product: Rc::clone(product),
            quantity,
        }
    }
}

/// Aggregate root: Store.
///
/// Owns an ordered catalog of shared product handles. Names are not required
/// to be unique; membership is by handle identity.
#[derive(Debug, Clone, Default)]
pub struct Store {
    products: Vec<ProductRef>,
}

impl Store {
    pub fn new(products: Vec<ProductRef>) -> Self {
        Self { products }
    }

    pub fn add_product(&mut self, product: ProductRef) {
        self.products.push(product);
    }

    /// Remove every catalog entry sharing this handle. Returns whether anything was removed.
    pub fn remove_product(&mut self, product: &ProductRef) -> bool {
        let before = self.products.len();
        self.products.retain(|p| !Rc::ptr_eq(p, product));
        self.products.len() != before
    }

    /// The whole catalog in insertion order, active or not.
    pub fn all_products(&self) -> &[ProductRef] {
        &self.products
    }

    /// Catalog entries that are currently purchasable.
    pub fn active_products(&self) -> Vec<ProductRef> {
        self.products
            .iter()
            .filter(|p| p.borrow().is_active())
            .cloned()
            .collect()
    }

    /// Sum of stock across the catalog; non-stocked products count as 0.
    ///
    /// Saturates at `u64::MAX`: each product may hold up to `i64::MAX` units.
    pub fn total_quantity(&self) -> u64 {
        self.products
            .iter()
            .fold(0u64, |total, p| total.saturating_add(p.borrow().quantity()))
    }

    /// Buy every line in sequence and return the accumulated total.
    ///
    /// The first failing line aborts the order with its error. Lines processed
    /// before it are not rolled back.
    pub fn order(&self, lines: &[OrderLine]) -> DomainResult<f64> {
        let mut total = 0.0;
        for line in lines {
            total += line.product.borrow_mut().buy(line.quantity)?;
        }
        Ok(total)
    }

    /// New store holding this catalog followed by `other`'s (no deduplication).
    pub fn combine(&self, other: &Store) -> Store {
        Store::new(
            self.products
                .iter()
                .chain(other.products.iter())
                .cloned()
                .collect(),
        )
    }

    pub fn contains(&self, product: &ProductRef) -> bool {
        self.products.iter().any(|p| Rc::ptr_eq(p, product))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
