use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, Price, ProductId, Quantity};
use storefront_promotions::SharedPromotion;

/// Shared handle to a catalog product.
///
/// The store and its callers hold the same handle, so a purchase made through
/// one is visible through every other (single-threaded shared mutable state).
pub type ProductRef = Rc<RefCell<Product>>;

/// Purchase rules variant, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    /// Physical stock, debited on every purchase.
    Stocked,
    /// Digital good or service; never runs out and never tracks a quantity.
    NonStocked,
    /// Physical stock with a cap on how many units one order line may take.
    Limited { maximum: u64 },
}

/// Capability shared by every product variant.
pub trait Purchasable {
    /// Purchase `quantity` units and return the amount to charge.
    fn buy(&mut self, quantity: i64) -> DomainResult<f64>;

    /// Whether the product is still eligible for purchase.
    fn is_active(&self) -> bool;

    /// Human-readable one-line summary.
    fn render(&self) -> String;
}

/// Catalog entry: identity, price, stock and an optional promotion.
///
/// Not `Clone`: every product is a distinct entity with its own id. Share it
/// through a [`ProductRef`] instead.
#[derive(Debug)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Price,
    quantity: u64,
    kind: ProductKind,
    active: bool,
    promotion: Option<SharedPromotion>,
}

impl Product {
    /// Stock-tracked product.
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> DomainResult<Self> {
        Self::with_kind(name, price, quantity, ProductKind::Stocked)
    }

    /// Product without stock tracking (its quantity is always 0).
    pub fn non_stocked(name: impl Into<String>, price: f64) -> DomainResult<Self> {
        Self::with_kind(name, price, 0, ProductKind::NonStocked)
    }

    /// Stock-tracked product that sells at most `maximum` units per order line.
    pub fn limited(
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        maximum: i64,
    ) -> DomainResult<Self> {
        // Negative caps fall through to the zero check below.
        let maximum = u64::try_from(maximum).unwrap_or(0);
        Self::with_kind(name, price, quantity, ProductKind::Limited { maximum })
    }

    /// Construct any variant. Validation order: name, price, quantity, maximum.
    pub fn with_kind(
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        kind: ProductKind,
    ) -> DomainResult<Self> {
        let (name, price) = validate(name.into(), price)?;
        let quantity = Quantity::new(quantity)?;
        match kind {
            ProductKind::NonStocked if !quantity.is_zero() => {
                return Err(DomainError::validation("non-stocked products do not track quantity"));
            }
            ProductKind::Limited { maximum: 0 } => {
                return Err(DomainError::validation("maximum must be at least 1"));
            }
            _ => {}
        }
        Ok(Self::build(name, price, quantity.get(), kind))
    }

    fn build(name: String, price: Price, quantity: u64, kind: ProductKind) -> Self {
        Self {
            id: ProductId::new(),
            name,
            price,
            quantity,
            kind,
            active: true,
            promotion: None,
        }
    }

    /// Wrap into a shared handle suitable for a store catalog.
    pub fn into_shared(self) -> ProductRef {
        Rc::new(RefCell::new(self))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    /// Per-order cap, for limited products only.
    pub fn maximum(&self) -> Option<u64> {
        match self.kind {
            ProductKind::Limited { maximum } => Some(maximum),
            _ => None,
        }
    }

    pub fn is_stock_tracked(&self) -> bool {
        !matches!(self.kind, ProductKind::NonStocked)
    }

    pub fn promotion(&self) -> Option<&SharedPromotion> {
        self.promotion.as_ref()
    }

    pub fn set_price(&mut self, value: f64) -> DomainResult<()> {
        self.price = Price::new(value)?;
        Ok(())
    }

    pub fn set_quantity(&mut self, value: i64) -> DomainResult<()> {
        let quantity = Quantity::new(value)?;
        if !self.is_stock_tracked() && !quantity.is_zero() {
            return Err(DomainError::validation("non-stocked products do not track quantity"));
        }
        self.quantity = quantity.get();
        Ok(())
    }

    /// Replace the current promotion, or clear it with `None`.
    pub fn set_promotion(&mut self, promotion: Option<SharedPromotion>) {
        self.promotion = promotion;
    }

    /// Take the product out of sale. Restocking does not undo this.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Order by price. Prices are always finite, so this is total.
    pub fn compare_price(&self, other: &Product) -> Ordering {
        self.price.value().total_cmp(&other.price.value())
    }

    pub fn is_pricier_than(&self, other: &Product) -> bool {
        self.compare_price(other) == Ordering::Greater
    }

    pub fn is_cheaper_than(&self, other: &Product) -> bool {
        self.compare_price(other) == Ordering::Less
    }

    /// Debit stock and price the purchase, applying the promotion if any.
    fn debit(&mut self, requested: u64) -> DomainResult<f64> {
        let available = self.quantity;
        let remaining = available
            .checked_sub(requested)
            .ok_or_else(|| DomainError::insufficient_stock(requested, available))?;

        self.quantity = remaining;
        if remaining == 0 {
            self.deactivate();
        }

        Ok(match &self.promotion {
            Some(promotion) => promotion.apply(self.price.value(), requested),
            None => self.price.times(requested),
        })
    }

    fn promotion_suffix(&self) -> String {
        match &self.promotion {
            Some(promotion) => format!(" (Promotion: {})", promotion.name()),
            None => String::new(),
        }
    }
}

fn validate(name: String, price: f64) -> DomainResult<(String, Price)> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty or whitespace only"));
    }
    Ok((name, Price::new(price)?))
}

impl Purchasable for Product {
    fn buy(&mut self, quantity: i64) -> DomainResult<f64> {
        let requested = Quantity::new(quantity)?.get();
        match self.kind {
            ProductKind::Stocked => self.debit(requested),
            // Promotions are not applied to non-stocked goods.
            ProductKind::NonStocked => Ok(self.price.times(requested)),
            ProductKind::Limited { maximum } => {
                if requested > maximum {
                    return Err(DomainError::purchase_limit_exceeded(
                        self.name.clone(),
                        requested,
                        maximum,
                    ));
                }
                self.debit(requested)
            }
        }
    }

    fn is_active(&self) -> bool {
        self.active && (!self.is_stock_tracked() || self.quantity > 0)
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}, Price: ${}", self.name, self.price)?;
        match self.kind {
            ProductKind::Stocked => write!(f, ", Quantity: {}", self.quantity)?,
            ProductKind::NonStocked => write!(f, " (Available)")?,
            ProductKind::Limited { maximum } => {
                write!(f, ", Quantity: {}, Max per order: {}", self.quantity, maximum)?
            }
        }
        f.write_str(&self.promotion_suffix())
    }
}
