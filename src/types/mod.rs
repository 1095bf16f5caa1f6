//! Core data types for the level book
//!
//! ## Types
//!
//! - [`Order`]: A resting limit order
//! - [`Side`]: Buy or Sell
//! - [`PriceLevel`]: Aggregated quantity at one price
//! - [`DepthSnapshot`]: Best-first levels for both sides
//!
//! ## Fixed-Point Prices
//!
//! All prices are stored as `u64` scaled by 10^8.
//! Example: 99.50 is stored as 9_950_000_000u64

mod level;
mod order;
pub mod price;

pub use level::{DepthSnapshot, PriceLevel};
pub use order::{Order, OrderId, Side};
