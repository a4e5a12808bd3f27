//! Benchmark Registry
//!
//! Catalog of suites, each an ordered list of benchmarks. The registry is an
//! ordinary value: build it during start-up, hand it to the [`Runner`], and
//! it only ever grows.
//!
//! Registration order matters. It picks the default baseline of a suite and
//! it is the row order of every report.
//!
//! [`Runner`]: crate::Runner

use crate::state::State;

/// Body of a benchmark, invoked once per timed run
pub type BenchmarkProc = Box<dyn FnMut(&mut State)>;

/// Handle to a suite returned by [`Registry::set_current_suite`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuiteId(usize);

impl SuiteId {
    /// Position of the suite in declaration order
    pub fn index(self) -> usize {
        self.0
    }
}

/// Catalog of all suites and their benchmarks
#[derive(Debug, Default)]
pub struct Registry {
    suites: Vec<Suite>,
    current: Option<usize>,
}

impl Registry {
    /// Create an empty registry; registrations land in the unnamed suite
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `name` the suite subsequent registrations land in
    ///
    /// Declaring a name that already exists switches back to that suite.
    pub fn set_current_suite(&mut self, name: impl Into<String>) -> SuiteId {
        let name = name.into();
        let index = self.find_or_insert(Some(name));
        self.current = Some(index);
        SuiteId(index)
    }

    /// Switch back to the unnamed suite
    pub fn set_default_suite(&mut self) -> SuiteId {
        let index = self.find_or_insert(None);
        self.current = Some(index);
        SuiteId(index)
    }

    /// Register a benchmark under the current suite
    ///
    /// Returns the new benchmark so configuration can be chained:
    ///
    /// ```ignore
    /// registry
    ///     .register_benchmark("vec_push", |s| for _ in s { v.push(1) })
    ///     .iterations([64, 512])
    ///     .samples(3);
    /// ```
    pub fn register_benchmark<F>(&mut self, name: impl Into<String>, proc: F) -> &mut Benchmark
    where
        F: FnMut(&mut State) + 'static,
    {
        let index = match self.current {
            Some(index) => index,
            None => {
                let index = self.find_or_insert(None);
                self.current = Some(index);
                index
            }
        };

        let suite = &mut self.suites[index];
        suite.benchmarks.push(Benchmark::new(name.into(), Box::new(proc)));
        let last = suite.benchmarks.len() - 1;
        &mut suite.benchmarks[last]
    }

    /// All suites in declaration order, including empty ones
    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    pub(crate) fn suites_mut(&mut self) -> &mut [Suite] {
        &mut self.suites
    }

    /// Look up a suite by handle
    pub fn suite(&self, id: SuiteId) -> Option<&Suite> {
        self.suites.get(id.0)
    }

    /// Iterate every benchmark with the suite it belongs to
    pub fn benchmarks(&self) -> impl Iterator<Item = (&Suite, &Benchmark)> {
        self.suites
            .iter()
            .flat_map(|suite| suite.benchmarks.iter().map(move |bench| (suite, bench)))
    }

    /// Total number of registered benchmarks
    pub fn len(&self) -> usize {
        self.suites.iter().map(|s| s.benchmarks.len()).sum()
    }

    /// Whether no benchmark has been registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find_or_insert(&mut self, name: Option<String>) -> usize {
        if let Some(index) = self.suites.iter().position(|s| s.name == name) {
            return index;
        }
        self.suites.push(Suite {
            name,
            benchmarks: Vec::new(),
        });
        self.suites.len() - 1
    }
}

/// Named group of benchmarks reported together
#[derive(Debug)]
pub struct Suite {
    name: Option<String>,
    pub(crate) benchmarks: Vec<Benchmark>,
}

impl Suite {
    /// Suite name, `None` for the unnamed suite
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name for log and error messages
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => format!("\"{}\"", name),
            None => "<default>".to_string(),
        }
    }

    /// Benchmarks in registration order
    pub fn benchmarks(&self) -> &[Benchmark] {
        &self.benchmarks
    }

    /// Benchmark that serves as baseline: the one marked, else the first
    pub fn baseline(&self) -> Option<&Benchmark> {
        self.baseline_index().map(|index| &self.benchmarks[index])
    }

    /// Position of the baseline, `None` only for an empty suite
    pub fn baseline_index(&self) -> Option<usize> {
        if self.benchmarks.is_empty() {
            return None;
        }
        Some(self.benchmarks.iter().position(|b| b.baseline).unwrap_or(0))
    }

    /// Whether the suite holds no benchmarks
    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}

/// A registered, configurable timed procedure
///
/// Holds both the user's configuration and the timed runs of the latest
/// scheduling pass.
pub struct Benchmark {
    name: String,
    pub(crate) proc: BenchmarkProc,
    pub(crate) baseline: bool,
    pub(crate) iterations: Vec<usize>,
    pub(crate) samples: Option<usize>,

    // Resolved by the runner
    pub(crate) resolved_baseline: bool,
    pub(crate) dimensions: Vec<usize>,
    pub(crate) sample_count: usize,
    pub(crate) states: Vec<State>,
    pub(crate) cursor: usize,
}

impl Benchmark {
    fn new(name: String, proc: BenchmarkProc) -> Self {
        Self {
            name,
            proc,
            baseline: false,
            iterations: Vec::new(),
            resolved_baseline: false,
            samples: None,
            dimensions: Vec::new(),
            sample_count: 0,
            states: Vec::new(),
            cursor: 0,
        }
    }

    /// Problem sizes to measure; overrides the runner default
    pub fn iterations(&mut self, iterations: impl IntoIterator<Item = usize>) -> &mut Self {
        self.iterations = iterations.into_iter().collect();
        self
    }

    /// Timed runs per problem size; overrides the runner default
    pub fn samples(&mut self, samples: usize) -> &mut Self {
        self.samples = Some(samples);
        self
    }

    /// Display name used in reports
    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.name = label.into();
        self
    }

    /// Mark (or unmark) this benchmark as its suite's baseline
    pub fn baseline(&mut self, baseline: bool) -> &mut Self {
        self.baseline = baseline;
        self
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the latest run used this benchmark as its suite's baseline
    ///
    /// Covers the implicit choice of the first benchmark in a suite without
    /// an explicit mark. `false` before the first run.
    pub fn is_baseline(&self) -> bool {
        self.resolved_baseline
    }

    /// Whether this benchmark was explicitly marked with [`baseline`](Benchmark::baseline)
    pub fn is_marked_baseline(&self) -> bool {
        self.baseline
    }

    /// Iteration counts set on this benchmark (empty = runner default)
    pub fn configured_iterations(&self) -> &[usize] {
        &self.iterations
    }

    /// Sample count set on this benchmark (`None` = runner default)
    pub fn configured_samples(&self) -> Option<usize> {
        self.samples
    }

    /// Problem sizes measured by the latest run, in configuration order
    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    /// Sample count used by the latest run
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Timed runs of the latest run, in execution order
    pub fn states(&self) -> &[State] {
        &self.states
    }
}

impl std::fmt::Debug for Benchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Benchmark")
            .field("name", &self.name)
            .field("baseline", &self.baseline)
            .field("resolved_baseline", &self.resolved_baseline)
            .field("iterations", &self.iterations)
            .field("samples", &self.samples)
            .field("states", &self.states.len())
            .finish_non_exhaustive()
    }
}
