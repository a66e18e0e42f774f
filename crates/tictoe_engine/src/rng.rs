//! Seedable random source for tie-breaks and coin tosses.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

use crate::players::Seat;

/// Deterministic RNG: the same seed yields the same game.
///
/// Wraps ChaCha8 and implements [`RngCore`], so it can be passed anywhere
/// the engine accepts a `rand::Rng`.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Creates an RNG from a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates an RNG seeded from the operating system.
    #[must_use]
    #[instrument]
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().next_u64();
        debug!(seed, "Seeded RNG from entropy");
        Self::new(seed)
    }

    /// Seed this RNG was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Flips a fair coin between the two seats.
    pub fn toss(&mut self) -> Seat {
        if self.inner.gen_bool(0.5) {
            Seat::First
        } else {
            Seat::Second
        }
    }
}

impl RngCore for GameRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
