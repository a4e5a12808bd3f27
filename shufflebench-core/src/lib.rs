#![warn(missing_docs)]
//! ShuffleBench Core - Scheduling Runtime
//!
//! This crate provides the execution environment for benchmarks:
//! - `Registry` of suites and benchmarks, built explicitly by the caller
//! - `State` with the counted-iteration protocol and manual timing scopes
//! - `Runner` that interleaves every timed run in seeded random order
//! - `Clock` abstraction with a monotonic system clock and a deterministic fake

mod error;
mod measure;
mod registry;
mod rng;
mod runner;
mod state;

pub use error::{Error, Result};
pub use measure::{Clock, FakeClock, Instant, SystemClock};
pub use registry::{Benchmark, BenchmarkProc, Registry, Suite, SuiteId};
pub use rng::MinStdRand;
pub use runner::{DEFAULT_ITERATIONS, DEFAULT_SAMPLES, Progress, RunSummary, Runner};
pub use state::{Iterations, Scope, State};
