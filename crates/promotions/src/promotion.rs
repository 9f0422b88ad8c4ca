use std::rc::Rc;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult};

/// Pricing strategy substituting the default `unit_price * quantity` total.
///
/// Implementations must be deterministic and side-effect free, and must return
/// `0.0` for a quantity of zero.
pub trait Promotion: core::fmt::Debug {
    /// Display name, shown next to the product it is attached to.
    fn name(&self) -> &str;

    /// Total price of `quantity` units at `unit_price` under this promotion.
    fn apply(&self, unit_price: f64, quantity: u64) -> f64;
}

/// Promotions are stateless, so products hold a shared immutable reference.
pub type SharedPromotion = Rc<dyn Promotion>;

/// Fixed percentage off every unit.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentDiscount {
    name: String,
    percent: f64,
}

impl PercentDiscount {
    pub fn new(name: impl Into<String>, percent: f64) -> DomainResult<Self> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(DomainError::validation("percent must be between 0 and 100"));
        }
        Ok(Self {
            name: name.into(),
            percent,
        })
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }
}

impl Promotion for PercentDiscount {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, unit_price: f64, quantity: u64) -> f64 {
        // Multiply before dividing so whole percentages of whole prices stay exact.
        unit_price * quantity as f64 * (100.0 - self.percent) / 100.0
    }
}

/// Every second unit at half price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondHalfPrice {
    name: String,
}

impl SecondHalfPrice {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Promotion for SecondHalfPrice {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, unit_price: f64, quantity: u64) -> f64 {
        let full = quantity.div_ceil(2);
        let half = quantity / 2;
        full as f64 * unit_price + half as f64 * unit_price * 0.5
    }
}

/// Buy two, get the third free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThirdOneFree {
    name: String,
}

impl ThirdOneFree {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Promotion for ThirdOneFree {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, unit_price: f64, quantity: u64) -> f64 {
        let groups = quantity / 3;
        let remainder = quantity % 3;
        (groups * 2 + remainder) as f64 * unit_price
    }
}

/// Serializable description of a promotion, used for catalog seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromotionSpec {
    PercentDiscount { name: String, percent: f64 },
    SecondHalfPrice { name: String },
    ThirdOneFree { name: String },
}

impl PromotionSpec {
    pub fn name(&self) -> &str {
        match self {
            PromotionSpec::PercentDiscount { name, .. }
            | PromotionSpec::SecondHalfPrice { name }
            | PromotionSpec::ThirdOneFree { name } => name,
        }
    }

    /// Build the shared strategy described by this spec.
    pub fn build(&self) -> DomainResult<SharedPromotion> {
        let promotion: SharedPromotion = match self {
            PromotionSpec::PercentDiscount { name, percent } => {
                Rc::new(PercentDiscount::new(name.clone(), *percent)?)
            }
            PromotionSpec::SecondHalfPrice { name } => Rc::new(SecondHalfPrice::new(name.clone())),
            PromotionSpec::ThirdOneFree { name } => Rc::new(ThirdOneFree::new(name.clone())),
        };
        Ok(promotion)
    }
}
