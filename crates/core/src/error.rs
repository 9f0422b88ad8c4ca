//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every failure is raised synchronously at the point of violation and never
/// leaves a mutation partially applied.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid construction or mutation argument (empty name, non-positive
    /// price, negative quantity, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Requested purchase quantity exceeds the available stock.
    #[error("Not enough stock. Only {available} units available")]
    InsufficientStock { requested: u64, available: u64 },

    /// Requested quantity exceeds a limited product's per-order maximum.
    #[error("{name} can only be purchased {maximum} times per order")]
    PurchaseLimitExceeded {
        name: String,
        requested: u64,
        maximum: u64,
    },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn insufficient_stock(requested: u64, available: u64) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }

    pub fn purchase_limit_exceeded(name: impl Into<String>, requested: u64, maximum: u64) -> Self {
        Self::PurchaseLimitExceeded {
            name: name.into(),
            requested,
            maximum,
        }
    }
}
