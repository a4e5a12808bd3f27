//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete benchmark report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// Suites in declaration order (empty suites omitted)
    pub suites: Vec<SuiteReport>,
}

/// Report metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Harness version
    pub version: String,
    /// UTC time of report generation
    pub timestamp: DateTime<Utc>,
    /// Scheduling seed; rerun with it to replay the same order
    pub seed: u64,
    /// Operating system
    pub os: String,
    /// CPU architecture
    pub arch: String,
}

/// Benchmarks of one suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite name, `None` for the unnamed suite
    pub name: Option<String>,
    /// Benchmarks in registration order
    pub benchmarks: Vec<BenchmarkReport>,
}

/// Aggregated results of one benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Display name
    pub name: String,
    /// Whether this benchmark is the suite baseline
    pub is_baseline: bool,
    /// One record per problem size, in configuration order
    pub data: Vec<ProblemSpace>,
}

/// Aggregate of all samples of one benchmark at one problem size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSpace {
    /// Iteration count
    pub dimension: usize,
    /// Number of samples averaged
    pub samples: usize,
    /// Mean duration of one sample in nanoseconds (not the sum)
    pub total_time_ns: u64,
}

/// One benchmark's entry at a given problem size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemSpaceEntry<'a> {
    /// Benchmark display name
    pub name: &'a str,
    /// Whether the benchmark is the suite baseline
    pub is_baseline: bool,
    /// Mean duration of one sample in nanoseconds
    pub total_time_ns: u64,
}

impl SuiteReport {
    /// First benchmark marked as baseline
    pub fn baseline(&self) -> Option<&BenchmarkReport> {
        self.benchmarks.iter().find(|b| b.is_baseline)
    }

    /// Regroup results by problem size across all benchmarks
    ///
    /// Keys ascend numerically; within a key, benchmarks keep registration
    /// order.
    pub fn problem_space_view(&self) -> BTreeMap<usize, Vec<ProblemSpaceEntry<'_>>> {
        let mut view: BTreeMap<usize, Vec<ProblemSpaceEntry<'_>>> = BTreeMap::new();
        for bench in &self.benchmarks {
            for d in &bench.data {
                view.entry(d.dimension).or_default().push(ProblemSpaceEntry {
                    name: &bench.name,
                    is_baseline: bench.is_baseline,
                    total_time_ns: d.total_time_ns,
                });
            }
        }
        view
    }
}

impl BenchmarkReport {
    /// Sum of mean durations and of iteration counts over all problem sizes
    pub fn totals(&self) -> (u64, u64) {
        self.data.iter().fold((0, 0), |(time, iters), d| {
            (time + d.total_time_ns, iters + d.dimension as u64)
        })
    }

    /// Overall nanoseconds per operation, zero if nothing was measured
    pub fn ns_per_op(&self) -> u64 {
        let (time, iters) = self.totals();
        time.checked_div(iters).unwrap_or(0)
    }
}

impl ProblemSpace {
    /// Nanoseconds per operation at this problem size
    pub fn ns_per_op(&self) -> u64 {
        ns_per_op(self.total_time_ns, self.dimension)
    }
}

/// Integer nanoseconds per operation, zero for a zero dimension
pub(crate) fn ns_per_op(total_time_ns: u64, dimension: usize) -> u64 {
    total_time_ns.checked_div(dimension as u64).unwrap_or(0)
}

/// Operations per second for `iterations` taking `total_time_ns`
pub(crate) fn ops_per_sec(iterations: u64, total_time_ns: u64) -> f64 {
    iterations as f64 * (1_000_000_000.0 / total_time_ns as f64)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_problem_space_view_groups_by_dimension() {
        let suite = SuiteReport {
            name: None,
            benchmarks: vec![
                bench("a", true, &[(512, 5), (8, 1)]),
                bench("b", false, &[(8, 2), (64, 3)]),
            ],
        };

        let view = suite.problem_space_view();
        let keys: Vec<_> = view.keys().copied().collect();
        assert_eq!(keys, [8, 64, 512]);

        let at_8: Vec<_> = view[&8].iter().map(|e| (e.name, e.total_time_ns)).collect();
        assert_eq!(at_8, [("a", 1), ("b", 2)]);
        assert_eq!(view[&64].len(), 1);
        assert!(view[&512][0].is_baseline);
    }

    #[test]
    fn test_totals_and_ns_per_op() {
        let report = math_report();
        let b = &report.suites[0].benchmarks[1];
        assert_eq!(b.totals(), (144_000, 72));
        assert_eq!(b.ns_per_op(), 2_000);
        assert_eq!(b.data[0].ns_per_op(), 2_000);
    }

    #[test]
    fn test_empty_benchmark_ns_per_op_is_zero() {
        let empty = bench("none", false, &[]);
        assert_eq!(empty.ns_per_op(), 0);
        assert_eq!(ns_per_op(10, 0), 0);
    }

    #[test]
    fn test_ops_per_sec() {
        assert_eq!(ops_per_sec(8, 8_000), 1_000_000.0);
        assert!(ops_per_sec(8, 0).is_infinite());
    }

    #[test]
    fn test_suite_baseline() {
        let report = math_report();
        assert_eq!(report.suites[0].baseline().map(|b| b.name.as_str()), Some("A"));
    }
}
