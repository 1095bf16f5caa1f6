//! Limit order book facade.
//!
//! ## Architecture
//!
//! The book composes three structures:
//!
//! - **Bid store**: `BTreeMap<Reverse<price>, Vec<Order>>`, best = highest
//! - **Ask store**: `BTreeMap<price, Vec<Order>>`, best = lowest
//! - **Location index**: `HashMap<OrderId, Location>` for O(1) cancel
//!
//! Every mutation updates the relevant store and then the index before
//! returning, so the two never disagree between calls.
//!
//! ## Order Lifecycle
//!
//! ```text
//! create_order --> Active --cancel_order--> (gone)
//!                    |
//!                    +--update_order(new price)--> Active (same id, new price)
//! ```
//!
//! No matching takes place. Crossed books (best bid >= best ask) are
//! stored as-is.
//!
//! ## Example
//!
//! ```
//! use level_book::OrderBook;
//! use level_book::types::Side;
//! use level_book::types::price::to_fixed;
//!
//! let mut book = OrderBook::new();
//! let bid = to_fixed("99.50").unwrap();
//! let ask = to_fixed("100.50").unwrap();
//!
//! let id = book.create_order(Side::Buy, bid, 100).unwrap();
//! book.create_order(Side::Sell, ask, 75).unwrap();
//!
//! assert_eq!(book.best_bid_ask(), (bid, ask));
//! assert!(book.cancel_order(id));
//! assert_eq!(book.best_bid_ask(), (0, ask));
//! ```

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::clock::MonotonicClock;
use crate::config::BookConfig;
use crate::error::{OrderBookError, OrderBookResult};
use crate::orderbook::location::{Location, LocationIndex};
use crate::orderbook::store::{AskStore, BidStore};
use crate::types::{DepthSnapshot, Order, OrderId, PriceLevel, Side};

/// In-memory limit order book.
///
/// Single-threaded: callers needing shared access must serialize calls
/// themselves (one owning thread, or a mutex around the book).
#[derive(Debug)]
pub struct OrderBook {
    /// Buy orders, highest price first
    bids: BidStore,

    /// Sell orders, lowest price first
    asks: AskStore,

    /// Order id -> bucket position
    locations: LocationIndex,

    /// Next identifier to hand out. Never reused.
    next_order_id: OrderId,

    /// Source of creation timestamps
    clock: MonotonicClock,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create an empty book with default settings
    pub fn new() -> Self {
        Self::with_config(BookConfig::default())
    }

    /// Create a book with index space for `order_capacity` orders
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self::with_config(BookConfig::default().with_order_capacity(order_capacity))
    }

    pub fn with_config(config: BookConfig) -> Self {
        Self {
            bids: BidStore::new(),
            asks: AskStore::new(),
            locations: LocationIndex::with_capacity(config.order_capacity),
            next_order_id: 1,
            clock: MonotonicClock::new(),
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Rest a new order on the book.
    ///
    /// # Arguments
    ///
    /// * `side` - Buy or Sell
    /// * `price` - Price in fixed-point (scaled by 10^8), must be non-zero
    /// * `quantity` - Quantity in lots, must be non-zero
    ///
    /// # Returns
    ///
    /// The new order's identifier. Identifiers start at 1 and strictly
    /// increase over the book's lifetime.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `price` or `quantity` is zero, or if resting
    /// `quantity` would overflow the total at that price level. A rejected
    /// order does not consume an identifier.
    pub fn create_order(
        &mut self,
        side: Side,
        price: u64,
        quantity: u64,
    ) -> OrderBookResult<OrderId> {
        if price == 0 || quantity == 0 {
            warn!(%side, price, quantity, "rejecting order with non-positive price or quantity");
            return Err(OrderBookError::InvalidArgument(format!(
                "price and quantity must be positive (price={price}, quantity={quantity})"
            )));
        }
        self.ensure_level_room(side, price, quantity)?;

        let id = self.next_order_id;
        self.next_order_id += 1;

        let created_at = self.clock.now();
        self.rest(Order::new(id, side, price, quantity, created_at))?;

        debug!(order_id = id, %side, price, quantity, "order created");
        Ok(id)
    }

    /// Remove an order from the book.
    ///
    /// # Returns
    ///
    /// `false` if no order with this id is resting (not an error).
    pub fn cancel_order(&mut self, order_id: OrderId) -> bool {
        match self.unlink(order_id) {
            Some(order) => {
                debug!(order_id, side = %order.side, price = order.price, "order cancelled");
                true
            }
            None => {
                debug!(order_id, "cancel ignored for unknown order");
                false
            }
        }
    }

    /// Move an order to a new price.
    ///
    /// The order is removed and re-inserted under the same id with the same
    /// side and quantity and a fresh timestamp. It joins the back of the
    /// new level. Updating to the current price is a no-op.
    ///
    /// # Returns
    ///
    /// `false` if no order with this id is resting.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `new_price` is zero, or if the order's quantity
    /// would overflow the total at the new level. The order stays where it
    /// was.
    pub fn update_order(&mut self, order_id: OrderId, new_price: u64) -> OrderBookResult<bool> {
        if new_price == 0 {
            warn!(order_id, "rejecting update to non-positive price");
            return Err(OrderBookError::InvalidArgument(
                "new price must be positive".to_string(),
            ));
        }

        let Some(location) = self.locations.get(order_id) else {
            return Ok(false);
        };
        if location.price == new_price {
            return Ok(true);
        }
        if let Some(quantity) = self.order_at(location).map(|order| order.quantity) {
            self.ensure_level_room(location.side, new_price, quantity)?;
        }

        let previous = self.unlink(order_id);
        debug_assert!(
            previous.is_some(),
            "indexed order {order_id} missing from its price level"
        );
        let Some(previous) = previous else {
            return Ok(false);
        };

        let created_at = self.clock.now();
        self.rest(previous.repriced(new_price, created_at))?;

        debug!(
            order_id,
            side = %previous.side,
            old_price = previous.price,
            new_price,
            "order repriced"
        );
        Ok(true)
    }

    /// Remove every resting order.
    ///
    /// The id counter is kept, so ids issued afterwards are still fresh.
    pub fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
        self.locations.clear();
        debug!("book cleared");
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Best bid and best ask, with 0 for an empty side
    pub fn best_bid_ask(&self) -> (u64, u64) {
        (
            self.best_bid().unwrap_or_default(),
            self.best_ask().unwrap_or_default(),
        )
    }

    /// Aggregated quantity at the best bid and best ask, 0 for an empty side
    pub fn best_bid_ask_quantities(&self) -> (u64, u64) {
        let bid = self.bids.best_level().unwrap_or_default();
        let ask = self.asks.best_level().unwrap_or_default();
        (bid.total_quantity, ask.total_quantity)
    }

    /// Up to `depth` aggregated levels per side, best first
    pub fn depth_snapshot(&self, depth: usize) -> DepthSnapshot {
        DepthSnapshot {
            bids: self.bids.top_k(depth),
            asks: self.asks.top_k(depth),
        }
    }

    /// Number of resting orders
    #[inline]
    pub fn order_count(&self) -> u64 {
        self.locations.len() as u64
    }

    #[inline]
    pub fn order_exists(&self, order_id: OrderId) -> bool {
        self.locations.contains(order_id)
    }

    /// Borrow a resting order by id
    pub fn get_order(&self, order_id: OrderId) -> Option<&Order> {
        let location = self.locations.get(order_id)?;
        self.order_at(location)
    }

    /// Highest resting buy price
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best_price()
    }

    /// Lowest resting sell price
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best_price()
    }

    /// Best ask minus best bid.
    ///
    /// `None` if either side is empty or the book is crossed.
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.level_count()
    }

    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.level_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Id the next created order will receive
    #[inline]
    pub fn peek_next_order_id(&self) -> OrderId {
        self.next_order_id
    }

    // ========================================================================
    // Integrity and Digest
    // ========================================================================

    /// Check every indexed order against its bucket.
    ///
    /// True when each location points at the order carrying that id and the
    /// index holds exactly as many entries as the stores hold orders.
    pub fn locations_consistent(&self) -> bool {
        let stored = self.bids.order_count() + self.asks.order_count();
        stored == self.locations.len()
            && self
                .locations
                .iter()
                .all(|(id, location)| self.location_matches(id, location))
    }

    /// SHA-256 digest of the aggregated book.
    ///
    /// Each side is hashed as a side tag, a level count, and the SSZ
    /// encoding of every `PriceLevel` best-first. Timestamps and bucket
    /// order do not contribute, so replaying the same calls yields the
    /// same digest.
    pub fn state_root(&self) -> OrderBookResult<[u8; 32]> {
        let mut hasher = Sha256::new();
        hash_side(&mut hasher, Side::Buy, self.bids.levels())?;
        hash_side(&mut hasher, Side::Sell, self.asks.levels())?;
        Ok(hasher.finalize().into())
    }

    /// Hex form of [`state_root`](Self::state_root)
    pub fn state_root_hex(&self) -> OrderBookResult<String> {
        self.state_root().map(hex::encode)
    }

    // ========================================================================
    // Internal
    // ========================================================================

    /// Reject a quantity that would overflow the level total at `price`
    fn ensure_level_room(&self, side: Side, price: u64, quantity: u64) -> OrderBookResult<()> {
        let fits = match side {
            Side::Buy => self.bids.can_accept(price, quantity),
            Side::Sell => self.asks.can_accept(price, quantity),
        };
        if fits {
            return Ok(());
        }

        warn!(%side, price, quantity, "rejecting quantity that overflows the level total");
        Err(OrderBookError::InvalidArgument(format!(
            "quantity {quantity} overflows the level total at price {price}"
        )))
    }

    /// Insert into the side's store and record the location
    fn rest(&mut self, order: Order) -> OrderBookResult<()> {
        let (id, side, price) = (order.id, order.side, order.price);
        let index = match side {
            Side::Buy => self.bids.insert(order)?,
            Side::Sell => self.asks.insert(order)?,
        };
        let location = Location { price, index, side };
        self.locations.insert(id, location);

        debug_assert!(self.location_matches(id, location));
        Ok(())
    }

    /// Take an order out of its bucket and the index.
    ///
    /// Repairs the index entry of whichever order was swapped into the
    /// vacated slot.
    fn unlink(&mut self, order_id: OrderId) -> Option<Order> {
        let location = self.locations.remove(order_id)?;
        let removal = match location.side {
            Side::Buy => self.bids.remove_at(location.price, location.index),
            Side::Sell => self.asks.remove_at(location.price, location.index),
        };
        debug_assert!(
            removal.is_some(),
            "order {order_id} indexed at {location:?} but absent from store"
        );
        let removal = removal?;
        debug_assert_eq!(removal.order.id, order_id);

        if let Some(moved) = removal.relocated {
            let repaired = self.locations.set_index(moved, location.index);
            debug_assert!(repaired, "relocated order {moved} is not indexed");
            debug_assert!(self
                .locations
                .get(moved)
                .is_some_and(|loc| self.location_matches(moved, loc)));
        }

        Some(removal.order)
    }

    fn order_at(&self, location: Location) -> Option<&Order> {
        match location.side {
            Side::Buy => self.bids.get(location.price, location.index),
            Side::Sell => self.asks.get(location.price, location.index),
        }
    }

    fn location_matches(&self, id: OrderId, location: Location) -> bool {
        self.order_at(location)
            .is_some_and(|order| order.id == id && order.side == location.side)
    }
}

fn hash_side(
    hasher: &mut Sha256,
    side: Side,
    levels: impl Iterator<Item = PriceLevel>,
) -> OrderBookResult<()> {
    let levels: Vec<PriceLevel> = levels.collect();
    hasher.update([side.to_u8()]);
    hasher.update((levels.len() as u64).to_le_bytes());
    for level in &levels {
        let bytes = ssz_rs::serialize(level)
            .map_err(|e| OrderBookError::Encoding(format!("{e:?}")))?;
        hasher.update(&bytes);
    }
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const P99_00: u64 = 9_900_000_000;
    const P99_25: u64 = 9_925_000_000;
    const P99_50: u64 = 9_950_000_000;
    const P100_50: u64 = 10_050_000_000;
    const P100_75: u64 = 10_075_000_000;

    #[test]
    fn test_book_new() {
        let book = OrderBook::new();

        assert!(book.is_empty());
        assert_eq!(book.order_count(), 0);
        assert_eq!(book.best_bid_ask(), (0, 0));
        assert_eq!(book.best_bid_ask_quantities(), (0, 0));
        assert_eq!(book.peek_next_order_id(), 1);
        assert!(book.locations_consistent());
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut book = OrderBook::with_capacity(16);

        let a = book.create_order(Side::Buy, P99_50, 100).unwrap();
        let b = book.create_order(Side::Sell, P100_50, 100).unwrap();
        assert!(book.cancel_order(b));
        let c = book.create_order(Side::Sell, P100_50, 100).unwrap();

        assert_eq!((a, b, c), (1, 2, 3));
    }

    #[test]
    fn test_create_rejects_zero_price_or_quantity() {
        let mut book = OrderBook::new();

        assert!(matches!(
            book.create_order(Side::Buy, 0, 100),
            Err(OrderBookError::InvalidArgument(_))
        ));
        assert!(matches!(
            book.create_order(Side::Sell, P100_50, 0),
            Err(OrderBookError::InvalidArgument(_))
        ));
        assert_eq!(book.order_count(), 0);
        assert_eq!(book.peek_next_order_id(), 1);
    }

    #[test]
    fn test_create_records_order() {
        let mut book = OrderBook::new();
        let id = book.create_order(Side::Sell, P100_75, 250).unwrap();

        let order = book.get_order(id).unwrap();
        assert_eq!(order.id, id);
        assert_eq!(order.side, Side::Sell);
        assert_eq!(order.price, P100_75);
        assert_eq!(order.quantity, 250);
        assert!(order.created_at > 0);
    }

    #[test]
    fn test_cancel_unknown_returns_false() {
        let mut book = OrderBook::new();
        book.create_order(Side::Buy, P99_50, 100).unwrap();

        assert!(!book.cancel_order(42));
        assert_eq!(book.order_count(), 1);
    }

    #[test]
    fn test_cancel_twice() {
        let mut book = OrderBook::new();
        let id = book.create_order(Side::Buy, P99_50, 100).unwrap();

        assert!(book.cancel_order(id));
        assert!(!book.cancel_order(id));
        assert!(!book.order_exists(id));
        assert!(book.is_empty());
    }

    #[test]
    fn test_cancel_repairs_relocated_index() {
        let mut book = OrderBook::new();
        let first = book.create_order(Side::Buy, P99_50, 10).unwrap();
        let second = book.create_order(Side::Buy, P99_50, 20).unwrap();
        let third = book.create_order(Side::Buy, P99_50, 30).unwrap();

        assert!(book.cancel_order(first));

        // third was swapped into slot 0
        assert!(book.locations_consistent());
        assert_eq!(book.get_order(third).map(|o| o.quantity), Some(30));
        assert_eq!(book.get_order(second).map(|o| o.quantity), Some(20));
        assert!(book.cancel_order(third));
        assert!(book.locations_consistent());
        assert_eq!(book.best_bid_ask_quantities(), (20, 0));
    }

    #[test]
    fn test_update_same_price_is_noop() {
        let mut book = OrderBook::new();
        let id = book.create_order(Side::Sell, P100_50, 100).unwrap();
        let before = book.get_order(id).cloned().unwrap();

        assert_eq!(book.update_order(id, P100_50), Ok(true));

        assert_eq!(book.get_order(id), Some(&before));
        assert_eq!(book.order_count(), 1);
    }

    #[test]
    fn test_update_moves_price_level() {
        let mut book = OrderBook::new();
        let id = book.create_order(Side::Buy, P99_25, 200).unwrap();
        book.create_order(Side::Buy, P99_50, 100).unwrap();

        assert_eq!(book.update_order(id, P99_00), Ok(true));

        let order = book.get_order(id).unwrap();
        assert_eq!(order.price, P99_00);
        assert_eq!(order.quantity, 200);
        assert_eq!(order.side, Side::Buy);
        assert_eq!(book.order_count(), 2);
        assert_eq!(
            book.depth_snapshot(5).bids,
            vec![PriceLevel::new(P99_50, 100), PriceLevel::new(P99_00, 200)]
        );
        assert!(book.locations_consistent());
    }

    #[test]
    fn test_update_does_not_allocate_id() {
        let mut book = OrderBook::new();
        let id = book.create_order(Side::Sell, P100_50, 10).unwrap();

        book.update_order(id, P100_75).unwrap();

        assert_eq!(book.peek_next_order_id(), 2);
        assert!(book.order_exists(id));
    }

    #[test]
    fn test_update_unknown_and_invalid() {
        let mut book = OrderBook::new();
        let id = book.create_order(Side::Sell, P100_50, 10).unwrap();

        assert_eq!(book.update_order(99, P100_75), Ok(false));
        assert!(matches!(
            book.update_order(id, 0),
            Err(OrderBookError::InvalidArgument(_))
        ));
        // invalid price is rejected before the id is looked up
        assert!(book.update_order(99, 0).is_err());
        assert_eq!(book.get_order(id).map(|o| o.price), Some(P100_50));
    }

    #[test]
    fn test_update_refreshes_timestamp() {
        let mut book = OrderBook::new();
        let id = book.create_order(Side::Buy, P99_50, 10).unwrap();
        let created = book.get_order(id).unwrap().created_at;

        book.update_order(id, P99_25).unwrap();

        assert!(book.get_order(id).unwrap().created_at >= created);
    }

    #[test]
    fn test_level_total_overflow_is_rejected() {
        let mut book = OrderBook::new();
        book.create_order(Side::Buy, P99_50, u64::MAX).unwrap();

        assert!(matches!(
            book.create_order(Side::Buy, P99_50, 2),
            Err(OrderBookError::InvalidArgument(_))
        ));
        assert_eq!(book.order_count(), 1);
        assert_eq!(book.peek_next_order_id(), 2);
        assert_eq!(
            book.depth_snapshot(1).bids,
            vec![PriceLevel::new(P99_50, u64::MAX)]
        );
        assert_eq!(book.best_bid_ask_quantities(), (u64::MAX, 0));
        assert!(book.state_root().is_ok());

        // same quantity fits on the other side and at other prices
        assert_eq!(book.create_order(Side::Sell, P99_50, 2), Ok(2));
        assert_eq!(book.create_order(Side::Buy, P99_25, 2), Ok(3));
    }

    #[test]
    fn test_update_into_full_level_is_rejected() {
        let mut book = OrderBook::new();
        book.create_order(Side::Sell, P100_50, u64::MAX - 1).unwrap();
        let id = book.create_order(Side::Sell, P100_75, 2).unwrap();

        assert!(matches!(
            book.update_order(id, P100_50),
            Err(OrderBookError::InvalidArgument(_))
        ));

        let order = book.get_order(id).unwrap();
        assert_eq!(order.price, P100_75);
        assert_eq!(book.order_count(), 2);
        assert_eq!(book.best_bid_ask_quantities(), (0, u64::MAX - 1));
        assert!(book.locations_consistent());
    }

    #[test]
    fn test_spread() {
        let mut book = OrderBook::new();
        assert!(book.spread().is_none());

        book.create_order(Side::Buy, P99_50, 10).unwrap();
        assert!(book.spread().is_none());

        book.create_order(Side::Sell, P100_50, 10).unwrap();
        assert_eq!(book.spread(), Some(P100_50 - P99_50));

        // crossed books are stored but have no spread
        book.create_order(Side::Buy, P100_75, 10).unwrap();
        assert!(book.spread().is_none());
    }

    #[test]
    fn test_level_counts() {
        let mut book = OrderBook::new();
        book.create_order(Side::Buy, P99_50, 10).unwrap();
        book.create_order(Side::Buy, P99_50, 10).unwrap();
        book.create_order(Side::Buy, P99_25, 10).unwrap();
        book.create_order(Side::Sell, P100_50, 10).unwrap();

        assert_eq!(book.bid_levels(), 2);
        assert_eq!(book.ask_levels(), 1);
    }

    #[test]
    fn test_clear_keeps_id_counter() {
        let mut book = OrderBook::new();
        book.create_order(Side::Buy, P99_50, 10).unwrap();
        book.create_order(Side::Sell, P100_50, 10).unwrap();

        book.clear();

        assert!(book.is_empty());
        assert_eq!(book.best_bid_ask(), (0, 0));
        assert_eq!(book.create_order(Side::Buy, P99_50, 10), Ok(3));
    }

    #[test]
    fn test_state_root_ignores_bucket_order_and_time() {
        let mut a = OrderBook::new();
        a.create_order(Side::Buy, P99_50, 10).unwrap();
        a.create_order(Side::Buy, P99_50, 20).unwrap();
        a.create_order(Side::Sell, P100_50, 5).unwrap();

        let mut b = OrderBook::new();
        b.create_order(Side::Sell, P100_50, 5).unwrap();
        b.create_order(Side::Buy, P99_50, 20).unwrap();
        b.create_order(Side::Buy, P99_50, 10).unwrap();

        assert_eq!(a.state_root().unwrap(), b.state_root().unwrap());
    }

    #[test]
    fn test_state_root_distinguishes_sides() {
        let mut a = OrderBook::new();
        a.create_order(Side::Buy, P99_50, 10).unwrap();

        let mut b = OrderBook::new();
        b.create_order(Side::Sell, P99_50, 10).unwrap();

        assert_ne!(a.state_root().unwrap(), b.state_root().unwrap());
        assert_eq!(a.state_root_hex().unwrap().len(), 64);
    }
}
