//! Human-readable book rendering.
//!
//! ```text
//! ======================================================================
//!                       ORDER BOOK SNAPSHOT
//! ======================================================================
//!
//!                     ASKS (Sell Orders)
//! Price              Quantity
//! ----------------------------------------------------------------------
//!          100.75                250
//!          100.50                175
//! ...
//! ```
//!
//! Asks are printed worst to best so the two best prices meet at the
//! spread line.

use std::fmt;

use crate::orderbook::OrderBook;
use crate::types::price::{fixed_to_decimal, format_fixed};
use crate::types::PriceLevel;

const RULE_WIDTH: usize = 70;

/// Display adapter over a book, limited to `depth` levels per side.
pub struct BookView<'a> {
    book: &'a OrderBook,
    depth: usize,
}

impl<'a> BookView<'a> {
    pub fn new(book: &'a OrderBook, depth: usize) -> Self {
        Self { book, depth }
    }
}

impl fmt::Display for BookView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);
        let snapshot = self.book.depth_snapshot(self.depth);

        writeln!(f)?;
        writeln!(f, "{heavy}")?;
        writeln!(f, "                      ORDER BOOK SNAPSHOT")?;
        writeln!(f, "{heavy}")?;

        writeln!(f)?;
        writeln!(f, "                    ASKS (Sell Orders)")?;
        write_header(f, &light)?;
        for level in snapshot.asks.iter().rev() {
            write_level(f, level)?;
        }

        // 0 when either side is empty, negative when crossed
        let spread = match (self.book.best_bid(), self.book.best_ask()) {
            (Some(bid), Some(ask)) => fixed_to_decimal(ask) - fixed_to_decimal(bid),
            _ => fixed_to_decimal(0),
        };
        writeln!(f)?;
        writeln!(f, "{light}")?;
        writeln!(f, "SPREAD: {:.4}", spread)?;
        writeln!(f, "{light}")?;

        writeln!(f)?;
        writeln!(f, "                    BIDS (Buy Orders)")?;
        write_header(f, &light)?;
        for level in &snapshot.bids {
            write_level(f, level)?;
        }

        writeln!(f)?;
        writeln!(f, "{heavy}")?;
        writeln!(f, "Total Orders in Book: {}", self.book.order_count())?;
        writeln!(f, "{heavy}\n")
    }
}

fn write_header(f: &mut fmt::Formatter<'_>, rule: &str) -> fmt::Result {
    writeln!(f, "Price              Quantity")?;
    writeln!(f, "{rule}")
}

fn write_level(f: &mut fmt::Formatter<'_>, level: &PriceLevel) -> fmt::Result {
    writeln!(
        f,
        "{:>15}    {:>15}",
        format_fixed(level.price, 2),
        level.total_quantity
    )
}

/// Render up to `depth` levels per side as a text table
pub fn render_book(book: &OrderBook, depth: usize) -> String {
    BookView::new(book, depth).to_string()
}
