//! Randomized Scheduler
//!
//! The runner turns a [`Registry`] into timed runs and executes them in a
//! seeded random interleaving, so slow drift in the machine (thermal
//! throttling, frequency scaling, cache warm-up) spreads evenly over every
//! benchmark instead of biasing whichever happens to run first or last.
//!
//! ## Phases
//!
//! 1. **Validate**: every suite and benchmark configuration is checked
//!    before anything is touched.
//! 2. **Initialize**: each suite gets a baseline, each benchmark gets its
//!    effective problem sizes and sample count, and one [`State`] per
//!    (problem size, sample) is inserted at a random position of the
//!    benchmark's run list.
//! 3. **Execute**: a benchmark with runs left is picked uniformly at random,
//!    its next run is executed, and it leaves the pool once exhausted.
//!
//! Everything happens on the calling thread, one invocation at a time.

use crate::error::{Error, Result};
use crate::measure::{Clock, SystemClock};
use crate::registry::{Benchmark, Registry, Suite};
use crate::rng::MinStdRand;
use crate::state::State;
use std::collections::HashSet;
use std::sync::Arc;

/// Problem sizes used when neither the benchmark nor the runner sets any
pub const DEFAULT_ITERATIONS: [usize; 5] = [8, 64, 512, 4096, 8196];

/// Sample count used when neither the benchmark nor the runner sets one
pub const DEFAULT_SAMPLES: usize = 1;

/// Progress notification emitted after every invocation
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// Suite of the benchmark just run
    pub suite: Option<&'a str>,
    /// Benchmark just run
    pub benchmark: &'a str,
    /// Iteration count of the run
    pub dimension: usize,
    /// Invocations finished so far
    pub completed: usize,
    /// Invocations in the whole run
    pub total: usize,
}

/// Outcome of a scheduling pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Seed that produced this order; pass it back to replay the run
    pub seed: u64,
    /// Number of benchmark invocations performed
    pub invocations: usize,
}

/// Executes every registered benchmark in seeded random order
pub struct Runner {
    default_iterations: Vec<usize>,
    default_samples: usize,
    clock: Arc<dyn Clock>,
}

impl Runner {
    /// Create a runner with built-in defaults and the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Create a runner timing through `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            default_iterations: DEFAULT_ITERATIONS.to_vec(),
            default_samples: DEFAULT_SAMPLES,
            clock,
        }
    }

    /// Problem sizes for benchmarks that do not set their own
    pub fn set_default_iterations(&mut self, iterations: impl IntoIterator<Item = usize>) {
        self.default_iterations = iterations.into_iter().collect();
    }

    /// Sample count for benchmarks that do not set their own
    pub fn set_default_samples(&mut self, samples: usize) {
        self.default_samples = samples;
    }

    /// Current default problem sizes
    pub fn default_iterations(&self) -> &[usize] {
        &self.default_iterations
    }

    /// Current default sample count
    pub fn default_samples(&self) -> usize {
        self.default_samples
    }

    /// Run every benchmark in `registry`
    ///
    /// With `seed = None` a seed is drawn from entropy; the seed used is
    /// returned either way.
    pub fn run_benchmarks(
        &self,
        registry: &mut Registry,
        seed: Option<u64>,
    ) -> Result<RunSummary> {
        self.run_benchmarks_with(registry, seed, |_| {})
    }

    /// Run every benchmark, reporting each finished invocation
    pub fn run_benchmarks_with<F>(
        &self,
        registry: &mut Registry,
        seed: Option<u64>,
        mut on_progress: F,
    ) -> Result<RunSummary>
    where
        F: FnMut(&Progress<'_>),
    {
        self.validate(registry)?;

        let seed = seed.unwrap_or_else(MinStdRand::entropy_seed);
        let mut rng = MinStdRand::new(seed);
        tracing::info!(seed, benchmarks = registry.len(), "starting benchmark run");

        let suites = registry.suites_mut();
        resolve_baselines(suites);
        let total = self.initialize(suites, &mut rng)?;

        // (suite, benchmark) pairs with runs left
        let mut pending: Vec<(usize, usize)> = suites
            .iter()
            .enumerate()
            .flat_map(|(s, suite)| {
                suite
                    .benchmarks
                    .iter()
                    .enumerate()
                    .filter(|(_, bench)| !bench.states.is_empty())
                    .map(move |(b, _)| (s, b))
            })
            .collect();

        let mut completed = 0;
        while !pending.is_empty() {
            let pick = rng.below(pending.len());
            let (s, b) = pending[pick];

            let bench = &mut suites[s].benchmarks[b];
            let index = bench.cursor;
            let dimension = bench.states[index].iterations();
            tracing::trace!(benchmark = bench.name(), dimension, "invoke");
            (bench.proc)(&mut bench.states[index]);
            bench.cursor += 1;
            completed += 1;
            let exhausted = bench.cursor == bench.states.len();

            let suite = &suites[s];
            on_progress(&Progress {
                suite: suite.name(),
                benchmark: suite.benchmarks[b].name(),
                dimension,
                completed,
                total,
            });

            if exhausted {
                pending.remove(pick);
            }
        }

        tracing::debug!(invocations = completed, "benchmark run finished");
        Ok(RunSummary {
            seed,
            invocations: completed,
        })
    }

    fn effective_iterations<'a>(&'a self, bench: &'a Benchmark) -> &'a [usize] {
        if bench.iterations.is_empty() {
            &self.default_iterations
        } else {
            &bench.iterations
        }
    }

    fn effective_samples(&self, bench: &Benchmark) -> usize {
        bench.samples.unwrap_or(self.default_samples)
    }

    /// Reject configurations that would make the report meaningless
    fn validate(&self, registry: &Registry) -> Result<()> {
        for suite in registry.suites() {
            let mut baselines = suite.benchmarks().iter().filter(|b| b.is_marked_baseline());
            if let (Some(first), Some(second)) = (baselines.next(), baselines.next()) {
                return Err(Error::MultipleBaselines {
                    suite: suite.display_name(),
                    first: first.name().to_string(),
                    second: second.name().to_string(),
                });
            }

            for bench in suite.benchmarks() {
                let iterations = self.effective_iterations(bench);
                if iterations.is_empty() {
                    return Err(Error::EmptyIterations {
                        benchmark: bench.name().to_string(),
                    });
                }
                if iterations.contains(&0) {
                    return Err(Error::InvalidIterations {
                        benchmark: bench.name().to_string(),
                    });
                }
                let mut seen = HashSet::with_capacity(iterations.len());
                if let Some(&dimension) = iterations.iter().find(|d| !seen.insert(**d)) {
                    return Err(Error::DuplicateIterations {
                        benchmark: bench.name().to_string(),
                        dimension,
                    });
                }
                if self.effective_samples(bench) == 0 {
                    return Err(Error::ZeroSamples {
                        benchmark: bench.name().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Build every benchmark's shuffled run list; returns the total count
    fn initialize(&self, suites: &mut [Suite], rng: &mut MinStdRand) -> Result<usize> {
        let mut total = 0;
        for bench in suites.iter_mut().flat_map(|s| s.benchmarks.iter_mut()) {
            let dimensions = self.effective_iterations(bench).to_vec();
            let samples = self.effective_samples(bench);

            let mut states = Vec::with_capacity(dimensions.len() * samples);
            for &dimension in &dimensions {
                for _ in 0..samples {
                    let index = rng.below(states.len() + 1);
                    states.insert(index, State::new(dimension, Arc::clone(&self.clock))?);
                }
            }

            tracing::debug!(
                benchmark = bench.name(),
                ?dimensions,
                samples,
                "planned timed runs"
            );
            total += states.len();
            bench.dimensions = dimensions;
            bench.sample_count = samples;
            bench.states = states;
            bench.cursor = 0;
        }
        Ok(total)
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick each suite's baseline for this run without touching the user's marks
fn resolve_baselines(suites: &mut [Suite]) {
    for suite in suites.iter_mut() {
        let baseline = suite.baseline_index();
        if baseline.is_some() && !suite.benchmarks.iter().any(|b| b.baseline) {
            tracing::debug!(
                suite = %suite.display_name(),
                benchmark = suite.benchmarks[0].name(),
                "no explicit baseline, using first registered"
            );
        }
        for (index, bench) in suite.benchmarks.iter_mut().enumerate() {
            bench.resolved_baseline = Some(index) == baseline;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::FakeClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn fake_runner() -> (Runner, Arc<FakeClock>) {
        let clock = Arc::new(FakeClock::new());
        (Runner::with_clock(clock.clone()), clock)
    }

    fn per_iteration(clock: &Arc<FakeClock>, ns: u64) -> impl FnMut(&mut State) + use<> {
        let clock = clock.clone();
        move |state: &mut State| {
            for _ in state {
                clock.advance(ns);
            }
        }
    }

    #[test]
    fn test_every_state_measured() {
        let (runner, clock) = fake_runner();
        let mut registry = Registry::new();
        registry.register_benchmark("a", per_iteration(&clock, 3));
        registry
            .register_benchmark("b", per_iteration(&clock, 5))
            .iterations([1, 2, 3])
            .samples(4);

        let summary = runner.run_benchmarks(&mut registry, Some(7)).unwrap();

        assert_eq!(summary.seed, 7);
        assert_eq!(summary.invocations, DEFAULT_ITERATIONS.len() + 3 * 4);
        for (_, bench) in registry.benchmarks() {
            assert!(bench.states().iter().all(State::is_measured));
        }
    }

    #[test]
    fn test_states_cover_cross_product() {
        let (runner, clock) = fake_runner();
        let mut registry = Registry::new();
        registry
            .register_benchmark("a", per_iteration(&clock, 1))
            .iterations([8, 64, 512])
            .samples(3);

        runner.run_benchmarks(&mut registry, Some(1)).unwrap();

        let (_, bench) = registry.benchmarks().next().unwrap();
        assert_eq!(bench.states().len(), 9);
        for dimension in [8, 64, 512] {
            let count = bench
                .states()
                .iter()
                .filter(|s| s.iterations() == dimension)
                .count();
            assert_eq!(count, 3);
        }
    }

    #[test]
    fn test_first_registered_becomes_baseline() {
        let (runner, clock) = fake_runner();
        let mut registry = Registry::new();
        registry.set_current_suite("s");
        registry.register_benchmark("first", per_iteration(&clock, 1)).iterations([1]);
        registry.register_benchmark("second", per_iteration(&clock, 1)).iterations([1]);

        runner.run_benchmarks(&mut registry, Some(3)).unwrap();

        let baselines: Vec<_> = registry
            .benchmarks()
            .filter(|(_, b)| b.is_baseline())
            .map(|(_, b)| b.name())
            .collect();
        assert_eq!(baselines, ["first"]);
    }

    #[test]
    fn test_explicit_baseline_wins_over_order() {
        let (runner, clock) = fake_runner();
        let mut registry = Registry::new();
        registry.register_benchmark("early", per_iteration(&clock, 1)).iterations([1]);
        registry
            .register_benchmark("late", per_iteration(&clock, 1))
            .iterations([1])
            .baseline(true);

        runner.run_benchmarks(&mut registry, Some(3)).unwrap();

        let early = registry.benchmarks().find(|(_, b)| b.name() == "early").unwrap().1;
        let late = registry.benchmarks().find(|(_, b)| b.name() == "late").unwrap().1;
        assert!(!early.is_baseline());
        assert!(late.is_baseline());
    }

    #[test]
    fn test_implicit_baseline_not_persisted_across_runs() {
        let (runner, clock) = fake_runner();
        let mut registry = Registry::new();
        registry.set_current_suite("s");
        registry.register_benchmark("first", per_iteration(&clock, 1)).iterations([1]);

        runner.run_benchmarks(&mut registry, Some(3)).unwrap();
        let (_, first) = registry.benchmarks().next().unwrap();
        assert!(first.is_baseline());
        assert!(!first.is_marked_baseline());

        registry
            .register_benchmark("second", per_iteration(&clock, 1))
            .iterations([1])
            .baseline(true);
        runner.run_benchmarks(&mut registry, Some(3)).unwrap();

        let baselines: Vec<_> = registry
            .benchmarks()
            .filter(|(_, b)| b.is_baseline())
            .map(|(_, b)| b.name())
            .collect();
        assert_eq!(baselines, ["second"]);
    }

    #[test]
    fn test_multiple_baselines_rejected() {
        let (runner, clock) = fake_runner();
        let mut registry = Registry::new();
        registry.set_current_suite("dup");
        registry.register_benchmark("x", per_iteration(&clock, 1)).baseline(true);
        registry.register_benchmark("y", per_iteration(&clock, 1)).baseline(true);

        let err = runner.run_benchmarks(&mut registry, Some(1)).unwrap_err();
        assert_eq!(
            err,
            Error::MultipleBaselines {
                suite: "\"dup\"".to_string(),
                first: "x".to_string(),
                second: "y".to_string(),
            }
        );
        // Nothing ran
        assert_eq!(clock.now().as_nanos(), 0);
    }

    #[test]
    fn test_invalid_configurations_rejected() {
        let (runner, clock) = fake_runner();

        let mut registry = Registry::new();
        registry.register_benchmark("zero", per_iteration(&clock, 1)).iterations([8, 0]);
        assert!(matches!(
            runner.run_benchmarks(&mut registry, Some(1)),
            Err(Error::InvalidIterations { .. })
        ));

        let mut registry = Registry::new();
        registry.register_benchmark("dup", per_iteration(&clock, 1)).iterations([8, 8]);
        assert!(matches!(
            runner.run_benchmarks(&mut registry, Some(1)),
            Err(Error::DuplicateIterations { dimension: 8, .. })
        ));

        let mut registry = Registry::new();
        registry.register_benchmark("nosamples", per_iteration(&clock, 1)).samples(0);
        assert!(matches!(
            runner.run_benchmarks(&mut registry, Some(1)),
            Err(Error::ZeroSamples { .. })
        ));

        let (mut runner, _) = fake_runner();
        runner.set_default_iterations([]);
        let mut registry = Registry::new();
        registry.register_benchmark("empty", per_iteration(&clock, 1));
        assert!(matches!(
            runner.run_benchmarks(&mut registry, Some(1)),
            Err(Error::EmptyIterations { .. })
        ));
    }

    #[test]
    fn test_runner_defaults_apply_only_when_unset() {
        let (mut runner, clock) = fake_runner();
        runner.set_default_iterations([2, 4]);
        runner.set_default_samples(3);

        let mut registry = Registry::new();
        registry.register_benchmark("defaulted", per_iteration(&clock, 1));
        registry
            .register_benchmark("explicit", per_iteration(&clock, 1))
            .iterations([16])
            .samples(1);

        runner.run_benchmarks(&mut registry, Some(11)).unwrap();

        let mut benches = registry.benchmarks().map(|(_, b)| b);
        let defaulted = benches.next().unwrap();
        assert_eq!(defaulted.dimensions(), &[2, 4]);
        assert_eq!(defaulted.sample_count(), 3);
        assert_eq!(defaulted.states().len(), 6);

        let explicit = benches.next().unwrap();
        assert_eq!(explicit.dimensions(), &[16]);
        assert_eq!(explicit.sample_count(), 1);
    }

    #[test]
    fn test_same_seed_same_order() {
        fn record_order(seed: u64) -> Vec<(String, usize)> {
            let (runner, clock) = fake_runner();
            let order = Rc::new(RefCell::new(Vec::new()));
            let mut registry = Registry::new();
            for name in ["a", "b", "c"] {
                let order = order.clone();
                let clock = clock.clone();
                registry
                    .register_benchmark(name, move |state: &mut State| {
                        order.borrow_mut().push((name.to_string(), state.iterations()));
                        for _ in state {
                            clock.advance(1);
                        }
                    })
                    .iterations([1, 2, 3])
                    .samples(2);
            }
            runner.run_benchmarks(&mut registry, Some(seed)).unwrap();
            order.take()
        }

        let first = record_order(42);
        assert_eq!(first.len(), 18);
        assert_eq!(first, record_order(42));
        assert_ne!(first, record_order(43));
    }

    #[test]
    fn test_progress_reports_every_invocation() {
        let (runner, clock) = fake_runner();
        let mut registry = Registry::new();
        registry.set_current_suite("p");
        registry
            .register_benchmark("a", per_iteration(&clock, 1))
            .iterations([1, 2])
            .samples(2);

        let mut seen = Vec::new();
        runner
            .run_benchmarks_with(&mut registry, Some(5), |p| {
                assert_eq!(p.suite, Some("p"));
                assert_eq!(p.benchmark, "a");
                assert_eq!(p.total, 4);
                seen.push(p.completed);
            })
            .unwrap();
        assert_eq!(seen, [1, 2, 3, 4]);
    }

    #[test]
    fn test_rerun_replaces_states() {
        let (runner, clock) = fake_runner();
        let mut registry = Registry::new();
        registry.register_benchmark("a", per_iteration(&clock, 1)).iterations([4]);

        runner.run_benchmarks(&mut registry, Some(1)).unwrap();
        runner.run_benchmarks(&mut registry, Some(1)).unwrap();

        let (_, bench) = registry.benchmarks().next().unwrap();
        assert_eq!(bench.states().len(), 1);
        assert_eq!(bench.states()[0].duration_ns(), Some(4));
    }

    #[test]
    fn test_empty_registry_runs_nothing() {
        let (runner, _) = fake_runner();
        let mut registry = Registry::new();
        let summary = runner.run_benchmarks(&mut registry, Some(1)).unwrap();
        assert_eq!(summary.invocations, 0);
    }
}
