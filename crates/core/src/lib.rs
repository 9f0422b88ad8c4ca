//! `storefront-core` — shared building blocks for the storefront domain crates.
//!
//! This crate contains **pure domain** primitives (no IO, no logging).

pub mod entity;
pub mod error;
pub mod id;
pub mod values;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use values::{Price, Quantity};
