//! Order book module.
//!
//! ## Architecture
//!
//! - **Price level stores**: Orders grouped by price using BTreeMap, one per side
//! - **Location index**: Order id to bucket position for O(1) cancel
//! - **Book facade**: Owns both and keeps them consistent
//!
//! ## Components
//!
//! - [`PriceLevelStore`]: Ordered price -> bucket map for one side
//! - [`LocationIndex`]: Order id -> [`Location`]
//! - [`OrderBook`]: Public create/cancel/update/query surface
//! - [`BookView`]: Text rendering of a depth snapshot
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Create order | O(log L) |
//! | Cancel order by ID | O(log L) |
//! | Update price | O(log L) |
//! | Best bid/ask | O(1) amortized |
//! | Depth snapshot (k levels) | O(k * bucket size) |
//!
//! L = number of price levels on the affected side.

pub mod book;
pub mod location;
pub mod render;
pub mod store;

pub use book::OrderBook;
pub use location::{Location, LocationIndex};
pub use render::{render_book, BookView};
pub use store::{AskStore, BidStore, LevelKey, PriceLevelStore, Removal};
