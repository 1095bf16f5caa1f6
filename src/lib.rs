//! # Level Book
//!
//! In-memory limit order book with dual price/identifier indexing.
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (Order, PriceLevel, DepthSnapshot)
//! - **OrderBook**: Per-side price level stores plus an order id index
//!
//! ## Design Principles
//!
//! 1. **Exact price keys**: Prices are fixed-point u64 (10^8 scaling)
//! 2. **O(1) cancel**: Every order's bucket position is indexed by id
//! 3. **No matching**: Orders rest until cancelled or repriced
//! 4. **Single writer**: No internal locking; callers serialize access
//!
//! ## Example
//!
//! ```
//! use level_book::{OrderBook, Side};
//! use level_book::types::price::to_fixed;
//!
//! let mut book = OrderBook::new();
//! book.create_order(Side::Buy, to_fixed("99.50").unwrap(), 100).unwrap();
//! book.create_order(Side::Buy, to_fixed("99.50").unwrap(), 50).unwrap();
//!
//! let depth = book.depth_snapshot(1);
//! assert_eq!(depth.bids[0].total_quantity, 150);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, PriceLevel
pub mod types;

/// Order book: price level stores, location index, facade
pub mod orderbook;

/// Construction settings
pub mod config;

/// Error types
pub mod error;

/// Order creation timestamps
pub mod clock;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::BookConfig;
pub use error::{OrderBookError, OrderBookResult};
pub use orderbook::{render_book, OrderBook};
pub use types::{DepthSnapshot, Order, OrderId, PriceLevel, Side};
