//! Setup and validation errors
//!
//! Everything here is detected before a single benchmark runs. Failures
//! during the run itself are contract violations and are asserted instead.

use thiserror::Error;

/// Result alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing timed runs or validating a registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A timed run needs at least one iteration
    #[error("timed run needs a positive iteration count")]
    ZeroIterations,

    /// The effective iteration list of a benchmark is empty
    #[error("benchmark `{benchmark}` has no iteration counts")]
    EmptyIterations {
        /// Benchmark name
        benchmark: String,
    },

    /// An iteration list contains a zero
    #[error("benchmark `{benchmark}` has a zero iteration count")]
    InvalidIterations {
        /// Benchmark name
        benchmark: String,
    },

    /// An iteration list names the same problem size twice
    #[error("benchmark `{benchmark}` lists iteration count {dimension} more than once")]
    DuplicateIterations {
        /// Benchmark name
        benchmark: String,
        /// Repeated iteration count
        dimension: usize,
    },

    /// The effective sample count of a benchmark is zero
    #[error("benchmark `{benchmark}` has a sample count of zero")]
    ZeroSamples {
        /// Benchmark name
        benchmark: String,
    },

    /// More than one benchmark in a suite is marked as baseline
    #[error("suite {suite} marks both `{first}` and `{second}` as baseline")]
    MultipleBaselines {
        /// Suite name, quoted, or `<default>` for the unnamed suite
        suite: String,
        /// First benchmark marked as baseline
        first: String,
        /// Next benchmark marked as baseline
        second: String,
    },
}
