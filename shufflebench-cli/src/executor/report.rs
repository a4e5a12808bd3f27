//! Report Building
//!
//! Collapses every benchmark's timed runs into one record per problem size.
//!
//! ## Pipeline
//!
//! ```text
//! Benchmark.states (execution order)
//!              │
//!              ▼
//!   ┌─────────────────────┐
//!   │  Group by dimension │  One bucket per configured iteration count
//!   └──────────┬──────────┘
//!              │
//!              ▼
//!   ┌─────────────────────┐
//!   │   Mean over samples │  total_time_ns = sum / samples
//!   └──────────┬──────────┘
//!              │
//!              ▼
//!   ┌─────────────────────┐
//!   │       Report        │  Ready for text/CSV/JSON output
//!   └─────────────────────┘
//! ```
//!
//! An unmeasured run or a bucket whose sample count differs from the
//! configured one means the scheduler or a benchmark body broke its
//! contract. Both abort with a panic rather than produce a skewed mean.

use shufflebench_core::{Benchmark, Registry};
use shufflebench_report::{BenchmarkReport, ProblemSpace, Report, ReportMeta, SuiteReport};

/// Build a complete Report from a registry after a run
///
/// Empty suites are left out.
pub fn build_report(registry: &Registry, meta: ReportMeta) -> Report {
    let suites = registry
        .suites()
        .iter()
        .filter(|suite| !suite.is_empty())
        .map(|suite| SuiteReport {
            name: suite.name().map(str::to_string),
            benchmarks: suite.benchmarks().iter().map(aggregate_benchmark).collect(),
        })
        .collect();

    Report { meta, suites }
}

/// Average one benchmark's samples per problem size
///
/// # Panics
/// Panics if a timed run was never measured, or if a problem size did not
/// receive exactly the configured number of samples.
pub fn aggregate_benchmark(bench: &Benchmark) -> BenchmarkReport {
    let mut data: Vec<ProblemSpace> = bench
        .dimensions()
        .iter()
        .map(|&dimension| ProblemSpace {
            dimension,
            samples: 0,
            total_time_ns: 0,
        })
        .collect();

    for state in bench.states() {
        let Some(duration) = state.duration_ns() else {
            panic!(
                "benchmark `{}` left a run of {} iterations unmeasured; \
                 the body must exhaust its counted iterations or time a scope",
                bench.name(),
                state.iterations()
            );
        };

        for d in data.iter_mut().filter(|d| d.dimension == state.iterations()) {
            d.total_time_ns += duration;
            d.samples += 1;
        }
    }

    for d in &mut data {
        assert_eq!(
            d.samples,
            bench.sample_count(),
            "benchmark `{}` has {} samples at dimension {}, expected {}",
            bench.name(),
            d.samples,
            d.dimension,
            bench.sample_count()
        );
        d.total_time_ns /= d.samples as u64;
    }

    BenchmarkReport {
        name: bench.name().to_string(),
        is_baseline: bench.is_baseline(),
        data,
    }
}
