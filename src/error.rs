//! Error types for order book operations.
//!
//! Only contract violations are errors. An unknown order identifier on
//! cancel or update is a normal outcome and is reported as `false`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderBookError {
    /// Non-positive price or quantity passed to a mutating operation
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// SSZ encoding failed while computing the book digest
    #[error("failed to encode book state: {0}")]
    Encoding(String),
}

/// Result type for order book operations
pub type OrderBookResult<T> = Result<T, OrderBookError>;
