//! Benchmark Executor
//!
//! Runs the registry through the scheduler and turns the filled timed runs
//! into a [`Report`](shufflebench_report::Report).
//!
//! ## Pipeline Overview
//!
//! ```text
//! Registry (suites → benchmarks)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Seeded random interleaving of every timed run
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Per-dimension mean over samples
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  metadata   │  Seed, version, platform, timestamp
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Executor driving the runner with a progress bar
//! - [`report`] - Aggregation of timed runs into problem-space records
//! - [`metadata`] - Report metadata collection

mod execution;
mod metadata;
mod report;

// Re-export public API
pub use execution::{ExecutionConfig, Executor};
pub use metadata::build_report_meta;
pub use report::{aggregate_benchmark, build_report};
