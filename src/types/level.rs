//! Aggregated price level view.
//!
//! ## SSZ Serialization
//!
//! `PriceLevel` derives `SimpleSerialize` from ssz_rs so the book digest
//! is a deterministic function of the aggregated book.

use ssz_rs::prelude::*;

/// Total resting quantity at one exact price on one side.
///
/// Computed on demand by depth queries; never stored in the book.
/// `PriceLevel::default()` is the zero level reported for an empty side.
///
/// ## SSZ Layout
///
/// Fixed-size container: 16 bytes (price + total_quantity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, SimpleSerialize)]
pub struct PriceLevel {
    /// Price in fixed-point (scaled by 10^8)
    pub price: u64,

    /// Sum of quantities of all orders at this price
    pub total_quantity: u64,
}

impl PriceLevel {
    /// Create a new level view
    pub fn new(price: u64, total_quantity: u64) -> Self {
        Self {
            price,
            total_quantity,
        }
    }
}

/// Best-first aggregated levels for both sides of the book.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepthSnapshot {
    /// Bid levels, highest price first
    pub bids: Vec<PriceLevel>,
    /// Ask levels, lowest price first
    pub asks: Vec<PriceLevel>,
}
