//! Scheduling RNG
//!
//! Park–Miller "minimal standard" linear congruential generator. Not
//! cryptographic; the only property the scheduler relies on is that the same
//! seed replays the same order.

const MULTIPLIER: u64 = 48_271;
const MODULUS: u64 = 2_147_483_647; // 2^31 - 1

/// Seeded LCG driving every scheduling decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinStdRand {
    state: u64,
}

impl MinStdRand {
    /// Seed the generator; seeds congruent to zero are mapped to one
    pub fn new(seed: u64) -> Self {
        let state = seed % MODULUS;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Draw a seed from the thread-local entropy source
    pub fn entropy_seed() -> u64 {
        use rand::Rng;
        u64::from(rand::thread_rng().r#gen::<u32>())
    }

    /// Next raw value in `1..2^31 - 1`
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state * MULTIPLIER % MODULUS;
        self.state as u32
    }

    /// Index in `0..bound`
    ///
    /// # Panics
    /// Panics if `bound` is zero.
    #[inline]
    pub fn below(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "cannot draw an index below zero");
        self.next_u32() as usize % bound
    }
}
