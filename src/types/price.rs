//! Fixed-point price utilities.
//!
//! ## Overview
//!
//! Prices are stored as u64 scaled by 10^8 and used directly as the ordered
//! map keys of each book side. Two prices are the same level exactly when
//! their fixed-point values are equal; there is no tolerance.
//!
//! Parsing and rendering go through `rust_decimal` so that `"99.50"` always
//! maps to the same key regardless of how it was written.
//!
//! ## Examples
//!
//! ```
//! use level_book::types::price::{to_fixed, from_fixed};
//!
//! let price = to_fixed("99.50").unwrap();
//! assert_eq!(price, 9_950_000_000);
//! assert_eq!(from_fixed(price), "99.50000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::error::{OrderBookError, OrderBookResult};

/// Scaling factor for fixed-point prices: 10^8
pub const SCALE: u64 = 100_000_000;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to a fixed-point price
///
/// Returns `None` if the string does not parse, is negative, or does not
/// fit in a u64 after scaling. Digits past the 8th decimal place are rounded.
///
/// ```
/// use level_book::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("100.75"), Some(10_075_000_000));
/// assert_eq!(to_fixed("-1"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to a fixed-point price
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert a fixed-point price to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Parse a strictly positive price, for callers taking user input.
///
/// ```
/// use level_book::types::price::parse_price;
///
/// assert_eq!(parse_price("98.75").unwrap(), 9_875_000_000);
/// assert!(parse_price("0").is_err());
/// assert!(parse_price("abc").is_err());
/// ```
pub fn parse_price(s: &str) -> OrderBookResult<u64> {
    match to_fixed(s) {
        Some(0) | None => Err(OrderBookError::InvalidArgument(format!(
            "price must be a positive decimal, got {s:?}"
        ))),
        Some(price) => Ok(price),
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Render a fixed-point price with all 8 decimal places
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

/// Render a fixed-point price rounded to `dp` decimal places
pub fn format_fixed(value: u64, dp: u32) -> String {
    let rounded = fixed_to_decimal(value).round_dp(dp);
    format!("{:.*}", dp as usize, rounded)
}

// ============================================================================
// Unit Tests
// ============================================================================
