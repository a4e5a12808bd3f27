//! Clock Abstraction
//!
//! Timed runs never read the system time directly. They ask a [`Clock`] for
//! the current [`Instant`], so tests can substitute [`FakeClock`] and get
//! exactly reproducible durations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

// ─── Instant ─────────────────────────────────────────────────────────────────

/// Nanosecond timestamp produced by a [`Clock`]
///
/// Only differences between two instants from the same clock are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Instant {
    nanos: u64,
}

impl Instant {
    /// Build an instant from a raw nanosecond reading
    #[inline(always)]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Raw nanosecond reading
    #[inline(always)]
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Nanoseconds elapsed since `earlier`, zero if `earlier` is later
    #[inline(always)]
    pub fn duration_since(&self, earlier: Instant) -> u64 {
        self.nanos.saturating_sub(earlier.nanos)
    }
}

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Monotonic timestamp source consumed by timed runs
pub trait Clock: Send + Sync {
    /// Current timestamp
    fn now(&self) -> Instant;
}

/// Monotonic wall clock backed by [`std::time::Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

impl SystemClock {
    /// Create a clock whose readings start at zero now
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[inline(always)]
    fn now(&self) -> Instant {
        let elapsed = self.origin.elapsed().as_nanos();
        Instant::from_nanos(u64::try_from(elapsed).unwrap_or(u64::MAX))
    }
}

/// Deterministic clock that only moves when told to
///
/// Share it with benchmark closures through an `Arc` and call
/// [`advance`](FakeClock::advance) to simulate work.
#[derive(Debug, Default)]
pub struct FakeClock {
    now: AtomicU64,
}

impl FakeClock {
    /// Create a fake clock reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `nanos`
    pub fn advance(&self, nanos: u64) {
        self.now.fetch_add(nanos, Ordering::Relaxed);
    }

    /// Move the clock forward by a [`Duration`]
    pub fn sleep(&self, duration: Duration) {
        self.advance(u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX));
    }

    /// Jump to an absolute reading
    pub fn set(&self, nanos: u64) {
        self.now.store(nanos, Ordering::Relaxed);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        Instant::from_nanos(self.now.load(Ordering::Relaxed))
    }
}
