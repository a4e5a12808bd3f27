//! Benchmark Execution
//!
//! Drives the core [`Runner`] over a registry and builds the report.
//!
//! ## Data Flow
//!
//! ```text
//! Registry
//!    │
//!    ▼
//! ┌──────────────────┐
//! │     Runner       │  Validate → shuffle runs → interleave execution
//! └────────┬─────────┘
//!          │ (progress bar ticks after every invocation)
//!          ▼
//! ┌──────────────────┐
//! │   build_report   │  Mean per (benchmark, dimension)
//! └────────┬─────────┘
//!          ▼
//!       Report
//! ```

use super::metadata::build_report_meta;
use super::report::build_report;
use indicatif::{ProgressBar, ProgressStyle};
use shufflebench_core::{Registry, Result, Runner};
use shufflebench_report::Report;

/// Configuration for benchmark execution
#[derive(Debug, Clone, Default)]
pub struct ExecutionConfig {
    /// Draw a progress bar on stderr while running
    pub show_progress: bool,
}

/// Runs every registered benchmark and produces a report
pub struct Executor {
    runner: Runner,
    config: ExecutionConfig,
}

impl Executor {
    /// Create an executor around a configured runner
    pub fn new(runner: Runner, config: ExecutionConfig) -> Self {
        Self { runner, config }
    }

    /// The underlying runner
    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    /// Mutable access to the runner, e.g. to change defaults between runs
    pub fn runner_mut(&mut self) -> &mut Runner {
        &mut self.runner
    }

    /// Execute all benchmarks and build the baseline-relative report
    ///
    /// Fails only when the registry configuration is rejected before any
    /// benchmark runs. A given `seed` reproduces the exact schedule.
    pub fn run_all(&self, registry: &mut Registry, seed: Option<u64>) -> Result<Report> {
        let pb = if self.config.show_progress {
            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let summary = self
            .runner
            .run_benchmarks_with(registry, seed, |progress| {
                pb.set_length(progress.total as u64);
                pb.set_position(progress.completed as u64);
                pb.set_message(progress.benchmark.to_string());
            })?;
        pb.finish_and_clear();

        tracing::debug!(
            seed = summary.seed,
            invocations = summary.invocations,
            "building report"
        );
        Ok(build_report(registry, build_report_meta(summary.seed)))
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(Runner::new(), ExecutionConfig::default())
    }
}
