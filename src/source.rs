//! Sources of random bits for the sampler.
//!
//! The sampler consumes randomness 63 bits at a time.  Any `rand` generator can supply those
//! bits.  For callers that do not want to carry a generator around, [global] hands out a single
//! process-wide source that is seeded once from the wall clock and is safe to share across
//! threads.

use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/////////////////////////////////////////// RandomSource ///////////////////////////////////////////

/// A source of uniformly random 63-bit integers.
pub trait RandomSource {
    /// Draw 63 random bits.  The top bit of the returned value is always clear.
    fn next_u63(&mut self) -> u64;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_u63(&mut self) -> u64 {
        self.next_u64() >> 1
    }
}

//////////////////////////////////////////// SharedSource //////////////////////////////////////////

/// A random source that may be shared between threads.
///
/// Each call to [SharedSource::with] holds the lock for its whole duration, so the draws of one
/// generation are never interleaved with those of another.
#[derive(Debug)]
pub struct SharedSource {
    rng: Mutex<StdRng>,
}

impl SharedSource {
    /// Create a shared source seeded from the current wall-clock time.
    pub fn time_seeded() -> Self {
        Self::with_seed(time_seed())
    }

    /// Create a shared source that produces a reproducible stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use randtext::{RandomSource, SharedSource};
    ///
    /// let a = SharedSource::with_seed(42);
    /// let b = SharedSource::with_seed(42);
    /// assert_eq!(a.with(|rng| rng.next_u63()), b.with(|rng| rng.next_u63()));
    /// ```
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Run `f` with exclusive access to the underlying generator.
    pub fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        // A panic mid-draw cannot leave StdRng in an invalid state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *rng)
    }
}

/// The process-wide random source.
///
/// Initialized from the wall clock on first use and never reseeded.
pub fn global() -> &'static SharedSource {
    static GLOBAL: OnceLock<SharedSource> = OnceLock::new();
    GLOBAL.get_or_init(SharedSource::time_seeded)
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
