//! Promotion strategies applied at checkout.
//!
//! A promotion is a stateless pricing rule: given a unit price and a quantity it
//! returns the discounted total. Promotions carry no stock awareness and may be
//! shared by any number of products.

pub mod promotion;

pub use promotion::{
    PercentDiscount, Promotion, PromotionSpec, SecondHalfPrice, SharedPromotion, ThirdOneFree,
};
