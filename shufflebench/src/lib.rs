#![warn(missing_docs)]
//! # ShuffleBench
//!
//! Micro-benchmark harness for Rust that runs every timed sample of every
//! benchmark in one seeded random interleaving.
//!
//! - **Randomized Scheduling**: Samples of all benchmarks are shuffled together, so
//!   drift in clock frequency, temperature or caches is spread evenly instead of
//!   penalizing whoever runs last
//! - **Reproducible Runs**: The seed is reported with every run and can be passed back
//!   to replay the exact same order
//! - **Problem Spaces**: Each benchmark is measured at several iteration counts,
//!   with several samples per count averaged into one figure
//! - **Baseline Comparison**: Every suite has a baseline; results are shown as ratios
//!   against it at each problem size and overall
//! - **Counted Iterations**: `for _ in state { .. }` times exactly the requested
//!   iterations and nothing around them
//! - **Several Outputs**: Detailed and concise text tables, CSV, JSON
//!
//! ## Quick Start
//!
//! ```ignore
//! use shufflebench::prelude::*;
//! use std::hint::black_box;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut registry = Registry::new();
//!     registry.set_current_suite("sum");
//!     registry
//!         .register_benchmark("iterator", |state: &mut State| {
//!             let data: Vec<u64> = (0..1000).collect();
//!             for _ in state {
//!                 black_box(data.iter().sum::<u64>());
//!             }
//!         })
//!         .baseline(true);
//!     shufflebench::run(registry)
//! }
//! ```
//!
//! ## Manual Timing
//!
//! ```ignore
//! registry.register_benchmark("sort", |state: &mut State| {
//!     let mut data = make_input(state.iterations());
//!     let _timer = state.scope();
//!     data.sort();
//! });
//! ```

// Re-export core types
pub use shufflebench_core::{
    Benchmark, BenchmarkProc, Clock, DEFAULT_ITERATIONS, DEFAULT_SAMPLES, Error, FakeClock,
    Instant, Iterations, MinStdRand, Progress, Registry, RunSummary, Runner, Scope, State, Suite,
    SuiteId, SystemClock,
};

// Re-export report types
pub use shufflebench_report::{
    BenchmarkReport, OutputFormat, ProblemSpace, ProblemSpaceEntry, Report, ReportMeta,
    SuiteReport, generate_concise_report, generate_csv_report, generate_detailed_report,
    generate_json_report,
};

// Re-export the harness
pub use shufflebench_cli::{
    BenchConfig, Cli, ExecutionConfig, Executor, RunArgs, build_report, run_with_cli,
    run_with_runner,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Executor, Registry, Report, Runner, State};
}

/// Run the ShuffleBench CLI harness over `registry`.
///
/// Call this from your benchmark binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     shufflebench::run(build_registry())
/// }
/// ```
pub use shufflebench_cli::run;
