//! Order types for the level book.
//!
//! ## Fixed-Point Representation
//!
//! Prices are stored as u64 scaled by 10^8 (see [`crate::types::price::SCALE`]).
//! Quantities are whole lots and are not scaled.

use std::fmt;

/// Order identifier, assigned by the book starting at 1.
pub type OrderId = u64;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Represented as u8 when hashed into the book digest:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Convert to u8 for encoding
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A resting limit order.
///
/// Orders are immutable once stored. A price change destroys the order and
/// inserts a fresh one under the same identifier.
///
/// ## Example
///
/// ```
/// use level_book::types::{Order, Side};
///
/// // Buy 100 lots at 99.50
/// let order = Order::new(1, Side::Buy, 9_950_000_000, 100, 0);
/// assert_eq!(order.side, Side::Buy);
/// assert_eq!(order.quantity, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Unique order identifier (assigned by the book)
    pub id: OrderId,

    /// Buy or Sell
    pub side: Side,

    /// Price in fixed-point (scaled by 10^8)
    pub price: u64,

    /// Quantity in lots, fixed at creation
    pub quantity: u64,

    /// Creation time in nanoseconds since the Unix epoch
    pub created_at: u64,
}

impl Order {
    /// Create a new order
    ///
    /// # Arguments
    ///
    /// * `id` - Unique order identifier
    /// * `side` - Buy or Sell
    /// * `price` - Price in fixed-point (scaled by 10^8)
    /// * `quantity` - Quantity in lots
    /// * `created_at` - Creation timestamp (ns)
    pub fn new(id: OrderId, side: Side, price: u64, quantity: u64, created_at: u64) -> Self {
        Self {
            id,
            side,
            price,
            quantity,
            created_at,
        }
    }

    /// Rebuild this order at a new price with a refreshed timestamp.
    ///
    /// Identifier, side and quantity carry over unchanged.
    pub fn repriced(&self, price: u64, created_at: u64) -> Self {
        Self {
            id: self.id,
            side: self.side,
            price,
            quantity: self.quantity,
            created_at,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
