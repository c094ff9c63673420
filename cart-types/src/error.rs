//! Cart error types
//!
//! The only operation that can fail is `add_item`, and only on malformed
//! candidate input: validation runs before conflict evaluation and a
//! rejected add leaves the cart untouched. Everything else is a total
//! function over well-formed state.

use thiserror::Error;

/// Validation errors for candidate items
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("item name is required")]
    MissingName,

    #[error("invalid price format: {0:?}")]
    InvalidPrice(String),

    #[error("price must be non-negative, got {0}")]
    NegativePrice(f64),

    #[error("price exceeds maximum allowed, got {0}")]
    PriceTooLarge(f64),

    #[error("quantity exceeds maximum allowed, got {0}")]
    QuantityTooLarge(i32),
}

/// Result type for cart operations
pub type CartResult<T> = Result<T, CartError>;
