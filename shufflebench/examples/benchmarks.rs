//! ShuffleBench Example Benchmarks
//!
//! This example demonstrates ShuffleBench features and serves as a template for
//! creating your own benchmark suite.
//!
//! Run with:
//!   cargo run --release --example benchmarks                       # Run all suites
//!   cargo run --release --example benchmarks -- --help             # Show all options
//!   cargo run --release --example benchmarks -- list               # List benchmarks
//!   cargo run --release --example benchmarks -- --seed 42          # Replay a schedule
//!   cargo run --release --example benchmarks -- --format csv -o r.csv

use shufflebench::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::hint::black_box;

// ============================================================================
// Vector growth
// ============================================================================

fn push_reserved(state: &mut State) {
    let mut v = Vec::with_capacity(state.iterations());
    for _ in state {
        v.push(black_box(1u32));
    }
    black_box(v);
}

fn push_growing(state: &mut State) {
    let mut v = Vec::new();
    for _ in state {
        v.push(black_box(1u32));
    }
    black_box(v);
}

// ============================================================================
// Map inserts
// ============================================================================

fn hash_map_insert(state: &mut State) {
    let mut map = HashMap::new();
    for (i, _) in state.iter().enumerate() {
        map.insert(i, i);
    }
    black_box(map);
}

fn btree_map_insert(state: &mut State) {
    let mut map = BTreeMap::new();
    for (i, _) in state.iter().enumerate() {
        map.insert(i, i);
    }
    black_box(map);
}

// ============================================================================
// Manual timing: setup excluded with a scope
// ============================================================================

fn sort_unstable(state: &mut State) {
    let mut data: Vec<u64> = (0..state.iterations() as u64).rev().collect();
    let _timer = state.scope();
    data.sort_unstable();
    black_box(&data);
}

fn sort_stable(state: &mut State) {
    let mut data: Vec<u64> = (0..state.iterations() as u64).rev().collect();
    let _timer = state.scope();
    data.sort();
    black_box(&data);
}

fn main() -> anyhow::Result<()> {
    let mut registry = Registry::new();

    registry.set_current_suite("vector push");
    registry.register_benchmark("reserved", push_reserved).baseline(true);
    registry.register_benchmark("growing", push_growing);

    registry.set_current_suite("map insert");
    registry.register_benchmark("HashMap", hash_map_insert);
    registry.register_benchmark("BTreeMap", btree_map_insert);

    registry.set_current_suite("sort");
    registry
        .register_benchmark("sort_unstable", sort_unstable)
        .iterations([1_000, 10_000, 100_000])
        .samples(3);
    registry
        .register_benchmark("sort", sort_stable)
        .iterations([1_000, 10_000, 100_000])
        .samples(3)
        .baseline(true);

    shufflebench::run(registry)
}
