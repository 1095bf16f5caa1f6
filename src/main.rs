//! Level Book - demonstration driver
//!
//! Rests a handful of orders, then cancels one and reprices another,
//! printing the book after each step.
//!
//! ```bash
//! cargo run -- --depth 5
//! RUST_LOG=level_book=debug cargo run
//! ```

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use level_book::types::price::{format_fixed, parse_price};
use level_book::{render_book, OrderBook, Side};

#[derive(Parser, Debug)]
#[command(name = "level-book", about = "Limit order book demonstration")]
struct Cli {
    /// Price levels to show per side
    #[arg(long, default_value_t = 5)]
    depth: usize,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(depth = cli.depth, "starting demonstration");

    let mut book = OrderBook::new();

    println!("=== Limit Order Book Demo ===\n");

    println!("Creating buy orders...");
    let mut buys = Vec::new();
    for (price, quantity) in [("99.50", 100), ("99.50", 50), ("99.25", 200), ("99.00", 150)] {
        let id = book.create_order(Side::Buy, parse_price(price)?, quantity)?;
        println!("Buy order: ID = {id} @ ${price} x {quantity}");
        buys.push(id);
    }

    println!("\nCreating sell orders...");
    for (price, quantity) in [("100.50", 100), ("100.50", 75), ("100.75", 250), ("101.00", 120)] {
        let id = book.create_order(Side::Sell, parse_price(price)?, quantity)?;
        println!("Sell order: ID = {id} @ ${price} x {quantity}");
    }

    print!("{}", render_book(&book, cli.depth));

    let (bid, ask) = book.best_bid_ask();
    println!("Best Bid: ${}", format_fixed(bid, 2));
    println!("Best Ask: ${}\n", format_fixed(ask, 2));

    let cancel_id = buys[1];
    println!("--- Cancelling order {cancel_id} ---");
    if book.cancel_order(cancel_id) {
        println!("Order cancelled successfully\n");
    }
    print!("{}", render_book(&book, cli.depth));

    let update_id = buys[2];
    println!("--- Updating order {update_id} to $98.75 ---");
    if book.update_order(update_id, parse_price("98.75")?)? {
        println!("Order updated successfully\n");
    }
    print!("{}", render_book(&book, cli.depth));

    println!("--- Depth Snapshot (Top 3) ---");
    let snapshot = book.depth_snapshot(3);
    println!("Bids:");
    for level in &snapshot.bids {
        println!("  ${} x {}", format_fixed(level.price, 2), level.total_quantity);
    }
    println!("Asks:");
    for level in &snapshot.asks {
        println!("  ${} x {}", format_fixed(level.price, 2), level.total_quantity);
    }

    println!("\nTotal orders: {}", book.order_count());
    info!(state_root = %book.state_root_hex()?, "demonstration complete");

    Ok(())
}
