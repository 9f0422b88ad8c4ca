//! Products domain module.
//!
//! This crate contains the catalog entry model and its purchase rules,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod product;

pub use product::{Product, ProductKind, ProductRef, Purchasable};
