//! Per-side price level storage.
//!
//! ## Design
//!
//! A `PriceLevelStore` maps each price to the bucket of orders resting at
//! exactly that price. The map is a `BTreeMap` whose key type fixes the
//! iteration order, so the first entry is always the best price:
//!
//! - **Bids**: keyed by `Reverse(price)`, iterated high to low
//! - **Asks**: keyed by `price`, iterated low to high
//!
//! ## Removal
//!
//! Buckets are plain vectors with a running quantity total, so a level's
//! aggregate is read in O(1). Inserts that would overflow that total are
//! rejected. Removing an order swaps the bucket's last element into the
//! vacated slot and shrinks the bucket by one, so removal never shifts the
//! rest of the bucket. The moved order's identifier is
//! reported back so the caller can repair its recorded index.
//!
//! Arrival order inside a bucket is not preserved once any order at that
//! price has been removed.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt::Debug;

use tracing::trace;

use crate::error::{OrderBookError, OrderBookResult};
use crate::types::{Order, OrderId, PriceLevel};

/// Map key for one side of the book.
///
/// The `Ord` implementation of the key decides which price is "best".
pub trait LevelKey: Ord + Copy + Debug {
    fn from_price(price: u64) -> Self;
    fn price(self) -> u64;
}

/// Ascending prices (ask side)
impl LevelKey for u64 {
    #[inline]
    fn from_price(price: u64) -> Self {
        price
    }

    #[inline]
    fn price(self) -> u64 {
        self
    }
}

/// Descending prices (bid side)
impl LevelKey for Reverse<u64> {
    #[inline]
    fn from_price(price: u64) -> Self {
        Reverse(price)
    }

    #[inline]
    fn price(self) -> u64 {
        self.0
    }
}

/// Bid side store, best (highest) price first
pub type BidStore = PriceLevelStore<Reverse<u64>>;

/// Ask side store, best (lowest) price first
pub type AskStore = PriceLevelStore<u64>;

/// Result of removing an order from its bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// The order that was taken out
    pub order: Order,

    /// Order moved into the vacated slot, if any.
    /// Its index is now the index that was passed to `remove_at`.
    pub relocated: Option<OrderId>,
}

/// Orders resting at one price plus their running quantity total.
#[derive(Debug, Clone, Default)]
struct Bucket {
    orders: Vec<Order>,
    total_quantity: u64,
}

/// Ordered mapping from price to the orders resting at that price.
#[derive(Debug, Clone)]
pub struct PriceLevelStore<K: LevelKey> {
    levels: BTreeMap<K, Bucket>,
    order_count: usize,
}

impl<K: LevelKey> Default for PriceLevelStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: LevelKey> PriceLevelStore<K> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
            order_count: 0,
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Whether `quantity` more at `price` keeps the level total within u64
    pub fn can_accept(&self, price: u64, quantity: u64) -> bool {
        self.aggregate(price).checked_add(quantity).is_some()
    }

    /// Append an order to the bucket for its price.
    ///
    /// Creates the bucket if this is the first order at that price.
    ///
    /// # Returns
    ///
    /// The order's position within its bucket
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the level total would overflow u64. The store
    /// is left unchanged.
    pub fn insert(&mut self, order: Order) -> OrderBookResult<usize> {
        let price = order.price;
        let total = self
            .aggregate(price)
            .checked_add(order.quantity)
            .ok_or_else(|| {
                OrderBookError::InvalidArgument(format!(
                    "quantity {} overflows the level total at price {price}",
                    order.quantity
                ))
            })?;

        let bucket = self.levels.entry(K::from_price(price)).or_insert_with(|| {
            trace!(price, "opening price level");
            Bucket::default()
        });
        bucket.orders.push(order);
        bucket.total_quantity = total;
        self.order_count += 1;

        Ok(bucket.orders.len() - 1)
    }

    /// Remove the order at `index` in the bucket for `price`.
    ///
    /// Uses swap-with-last: the bucket's last order fills the gap. An
    /// emptied bucket is dropped from the map.
    ///
    /// # Returns
    ///
    /// `None` if there is no bucket at `price` or `index` is out of range.
    pub fn remove_at(&mut self, price: u64, index: usize) -> Option<Removal> {
        let key = K::from_price(price);
        let bucket = self.levels.get_mut(&key)?;
        if index >= bucket.orders.len() {
            return None;
        }

        let order = bucket.orders.swap_remove(index);
        bucket.total_quantity -= order.quantity;
        let relocated = bucket.orders.get(index).map(|moved| moved.id);

        if bucket.orders.is_empty() {
            self.levels.remove(&key);
            trace!(price, "closing empty price level");
        }
        self.order_count -= 1;

        Some(Removal { order, relocated })
    }

    /// Drop every level
    pub fn clear(&mut self) {
        self.levels.clear();
        self.order_count = 0;
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Order at a given bucket position
    #[inline]
    pub fn get(&self, price: u64, index: usize) -> Option<&Order> {
        self.levels.get(&K::from_price(price))?.orders.get(index)
    }

    /// All orders currently at `price` (empty if no level exists)
    pub fn orders_at(&self, price: u64) -> &[Order] {
        self.levels
            .get(&K::from_price(price))
            .map(|bucket| bucket.orders.as_slice())
            .unwrap_or(&[])
    }

    /// Sum of quantities resting at `price`, 0 if no level exists
    #[inline]
    pub fn aggregate(&self, price: u64) -> u64 {
        self.levels
            .get(&K::from_price(price))
            .map_or(0, |bucket| bucket.total_quantity)
    }

    /// Best price on this side
    #[inline]
    pub fn best_price(&self) -> Option<u64> {
        self.levels.keys().next().map(|key| key.price())
    }

    /// Aggregated best level
    pub fn best_level(&self) -> Option<PriceLevel> {
        self.levels.iter().next().map(level_view)
    }

    /// Aggregated levels, best first
    pub fn levels(&self) -> impl Iterator<Item = PriceLevel> + '_ {
        self.levels.iter().map(level_view)
    }

    /// Up to `k` aggregated levels, best first
    pub fn top_k(&self, k: usize) -> Vec<PriceLevel> {
        self.levels().take(k).collect()
    }

    /// Number of distinct price levels
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Number of orders across all levels
    #[inline]
    pub fn order_count(&self) -> usize {
        self.order_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

fn level_view<K: LevelKey>((key, bucket): (&K, &Bucket)) -> PriceLevel {
    PriceLevel::new(key.price(), bucket.total_quantity)
}

// ============================================================================
// Unit Tests
// ============================================================================
