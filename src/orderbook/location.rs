//! Order identifier to bucket position index.
//!
//! Every resting order has exactly one `Location`. The book keeps it in
//! step with the stores: for each indexed id, the order at
//! `(location.side, location.price, location.index)` carries that id.

use std::collections::HashMap;

use crate::types::{OrderId, Side};

/// Position of an order inside its side's price bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Price of the bucket (fixed-point)
    pub price: u64,
    /// Position within the bucket
    pub index: usize,
    /// Book side holding the bucket
    pub side: Side,
}

/// O(1) lookup from order id to its current location.
#[derive(Debug, Clone, Default)]
pub struct LocationIndex {
    entries: HashMap<OrderId, Location>,
}

impl LocationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Record (or overwrite) the location of an order
    #[inline]
    pub fn insert(&mut self, id: OrderId, location: Location) {
        self.entries.insert(id, location);
    }

    #[inline]
    pub fn get(&self, id: OrderId) -> Option<Location> {
        self.entries.get(&id).copied()
    }

    #[inline]
    pub fn contains(&self, id: OrderId) -> bool {
        self.entries.contains_key(&id)
    }

    #[inline]
    pub fn remove(&mut self, id: OrderId) -> Option<Location> {
        self.entries.remove(&id)
    }

    /// Point an existing entry at a new bucket position.
    ///
    /// Returns `false` if `id` is not indexed.
    pub fn set_index(&mut self, id: OrderId, index: usize) -> bool {
        match self.entries.get_mut(&id) {
            Some(location) => {
                location.index = index;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (OrderId, Location)> + '_ {
        self.entries.iter().map(|(id, location)| (*id, *location))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(price: u64, index: usize) -> Location {
        Location {
            price,
            index,
            side: Side::Buy,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut index = LocationIndex::new();
        index.insert(1, at(100, 0));

        assert!(index.contains(1));
        assert_eq!(index.get(1), Some(at(100, 0)));
        assert!(index.get(2).is_none());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_set_index() {
        let mut index = LocationIndex::new();
        index.insert(1, at(100, 4));

        assert!(index.set_index(1, 2));
        assert_eq!(index.get(1).map(|l| l.index), Some(2));
        assert!(!index.set_index(9, 0));
    }

    #[test]
    fn test_remove() {
        let mut index = LocationIndex::with_capacity(8);
        index.insert(1, at(100, 0));

        assert_eq!(index.remove(1), Some(at(100, 0)));
        assert!(index.remove(1).is_none());
        assert!(index.is_empty());
    }
}
