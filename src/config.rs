//! Book construction settings.

/// Default number of orders the location index is sized for.
pub const DEFAULT_ORDER_CAPACITY: usize = 1024;

/// Settings applied when an [`OrderBook`](crate::OrderBook) is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookConfig {
    /// Orders to pre-allocate index space for
    pub order_capacity: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            order_capacity: DEFAULT_ORDER_CAPACITY,
        }
    }
}

impl BookConfig {
    pub fn with_order_capacity(mut self, order_capacity: usize) -> Self {
        self.order_capacity = order_capacity;
        self
    }
}
