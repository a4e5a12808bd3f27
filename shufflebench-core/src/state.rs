//! Timed Runs
//!
//! A [`State`] is one timed execution of a benchmark body at a fixed
//! iteration count. The body measures its payload through one of two
//! protocols:
//!
//! - **Counted iterations**: `for _ in state.iter() { payload() }`. Creating
//!   the [`Iterations`] guard starts the timer, and the `next()` call that
//!   finds no tokens left stops it, so the timed window covers exactly the
//!   N payload invocations and nothing the body does before or after.
//! - **Manual scope**: `let _t = state.scope();` starts the timer and stops it
//!   when the [`Scope`] guard is dropped, on any exit path.

use crate::error::{Error, Result};
use crate::measure::{Clock, Instant};
use std::iter::FusedIterator;
use std::sync::Arc;

/// One timed execution of a benchmark at a fixed iteration count
pub struct State {
    iterations: usize,
    clock: Arc<dyn Clock>,
    start: Option<Instant>,
    duration_ns: Option<u64>,
}

impl State {
    /// Create a timed run of `iterations` payload invocations
    pub fn new(iterations: usize, clock: Arc<dyn Clock>) -> Result<Self> {
        if iterations == 0 {
            return Err(Error::ZeroIterations);
        }

        Ok(Self {
            iterations,
            clock,
            start: None,
            duration_ns: None,
        })
    }

    /// Number of payload invocations this run covers
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Measured duration, `None` until the run has been timed
    #[inline]
    pub fn duration_ns(&self) -> Option<u64> {
        self.duration_ns
    }

    /// Whether a duration has been recorded
    #[inline]
    pub fn is_measured(&self) -> bool {
        self.duration_ns.is_some()
    }

    /// Start (or restart) the timer
    #[inline]
    pub fn start_timer(&mut self) {
        self.start = Some(self.clock.now());
    }

    /// Stop the timer and record the elapsed time
    #[inline]
    pub fn stop_timer(&mut self) {
        let now = self.clock.now();
        debug_assert!(self.start.is_some(), "stop_timer called before start_timer");
        if let Some(start) = self.start.take() {
            self.duration_ns = Some(now.duration_since(start));
        }
    }

    /// Adjust the recorded duration by a signed amount
    ///
    /// Lets a body subtract a fixed overhead it knows about. The result
    /// saturates at zero.
    pub fn add_custom_duration(&mut self, nanos: i64) {
        debug_assert!(
            self.duration_ns.is_some(),
            "add_custom_duration called on an unmeasured run"
        );
        if let Some(duration) = self.duration_ns.as_mut() {
            *duration = duration.saturating_add_signed(nanos);
        }
    }

    /// Begin the counted-iteration protocol
    ///
    /// The returned guard yields exactly [`iterations`](State::iterations)
    /// tokens. Re-entering the protocol on an already measured run is a
    /// benchmark bug: it asserts in debug builds and yields nothing in
    /// release builds, leaving the first measurement untouched.
    #[inline]
    pub fn iter(&mut self) -> Iterations<'_> {
        debug_assert!(
            self.duration_ns.is_none(),
            "counted iterations re-entered after the run was measured"
        );
        if self.duration_ns.is_some() {
            return Iterations {
                state: self,
                remaining: 0,
                finished: true,
            };
        }

        let remaining = self.iterations;
        self.start_timer();
        Iterations {
            state: self,
            remaining,
            finished: false,
        }
    }

    /// Acquire the timer for a manually delimited region
    #[inline]
    pub fn scope(&mut self) -> Scope<'_> {
        self.start_timer();
        Scope { state: self }
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("iterations", &self.iterations)
            .field("start", &self.start)
            .field("duration_ns", &self.duration_ns)
            .finish_non_exhaustive()
    }
}

impl<'a> IntoIterator for &'a mut State {
    type Item = ();
    type IntoIter = Iterations<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ─── Counted iterations ──────────────────────────────────────────────────────

/// Guard driving the counted-iteration protocol of a [`State`]
///
/// Timing ends when the last token has been consumed and the iterator is
/// polled once more, which is exactly where a `for` loop stops. Dropping the
/// guard early leaves the run unmeasured.
pub struct Iterations<'a> {
    state: &'a mut State,
    remaining: usize,
    finished: bool,
}

impl Iterations<'_> {
    /// Tokens not yet consumed
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    #[inline]
    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        if self.remaining == 0 {
            self.state.stop_timer();
        } else {
            self.state.start = None;
            tracing::warn!(
                iterations = self.state.iterations,
                remaining = self.remaining,
                "counted iterations abandoned early; run left unmeasured"
            );
        }
    }
}

impl Iterator for Iterations<'_> {
    type Item = ();

    #[inline]
    fn next(&mut self) -> Option<()> {
        if self.remaining == 0 {
            self.finish();
            return None;
        }
        self.remaining -= 1;
        Some(())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iterations<'_> {}

impl FusedIterator for Iterations<'_> {}

impl Drop for Iterations<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}

// ─── Manual scope ────────────────────────────────────────────────────────────

/// Timer held for the lifetime of the guard
pub struct Scope<'a> {
    state: &'a mut State,
}

impl Scope<'_> {
    /// Iteration count of the run being timed
    pub fn iterations(&self) -> usize {
        self.state.iterations
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.state.stop_timer();
    }
}
