//! Benchmarks for the level book.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench -- cancel
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::time::Duration;

use level_book::{OrderBook, Side};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// HELPER FUNCTIONS - Deterministic book population
// ============================================================================

/// 100.00 in fixed-point
const MID_PRICE: u64 = 10_000_000_000;

/// 0.01 in fixed-point
const TICK: u64 = 1_000_000;

/// Rest `count` orders on each side across `levels` price levels.
fn populated_book(count: usize, levels: u64, seed: u64) -> OrderBook {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut book = OrderBook::with_capacity(count * 2);

    for _ in 0..count {
        let offset = rng.gen_range(1..=levels) * TICK;
        let quantity = rng.gen_range(1..=1_000);
        book.create_order(Side::Buy, MID_PRICE - offset, quantity).unwrap();
        book.create_order(Side::Sell, MID_PRICE + offset, quantity).unwrap();
    }

    book
}

// ============================================================================
// BENCHMARK: Mutations
// ============================================================================

fn bench_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutations");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("create_into_10k_book", |b| {
        b.iter_batched(
            || populated_book(5_000, 100, 1),
            |mut book| black_box(book.create_order(Side::Buy, MID_PRICE - 50 * TICK, 10)),
            BatchSize::LargeInput,
        );
    });

    group.bench_function("cancel_from_10k_book", |b| {
        b.iter_batched(
            || populated_book(5_000, 100, 2),
            |mut book| black_box(book.cancel_order(4_321)),
            BatchSize::LargeInput,
        );
    });

    group.bench_function("update_in_10k_book", |b| {
        b.iter_batched(
            || populated_book(5_000, 100, 3),
            |mut book| black_box(book.update_order(4_321, MID_PRICE - 7 * TICK)),
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Queries
// ============================================================================

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    for levels in [10u64, 100, 1_000] {
        let book = populated_book(10_000, levels, 4);

        group.bench_with_input(BenchmarkId::new("depth_10", levels), &book, |b, book| {
            b.iter(|| black_box(book.depth_snapshot(10)));
        });

        group.bench_with_input(BenchmarkId::new("best_quantities", levels), &book, |b, book| {
            b.iter(|| black_box(book.best_bid_ask_quantities()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_mutations, bench_queries);
criterion_main!(benches);
