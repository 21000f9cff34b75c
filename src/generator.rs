use std::time::SystemTime;
#[cfg(feature = "rand")]
use std::{
    cell::RefCell,
    collections::hash_map::RandomState,
    hash::{BuildHasher as _, Hasher as _},
};

#[cfg(feature = "rand")]
use rand::{rngs::SmallRng, RngCore, SeedableRng as _};

use crate::{Randomness, Ulid};

/// A source of the current time.
///
/// # Example
///
/// ```
/// use burst_ulid::Clock;
///
/// struct Frozen(u64);
///
/// impl Clock for Frozen {
///     fn now_millis(&self) -> u64 {
///         self.0
///     }
/// }
///
/// assert_eq!(Frozen(1_000).now_millis(), 1_000);
/// ```
pub trait Clock {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// The system wall clock.
///
/// Times before the Unix epoch are reported as zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |since_epoch| u64::try_from(since_epoch.as_millis()).unwrap_or(u64::MAX))
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

/// A source of the 80 random bits of a ULID.
///
/// Implementations holding generator state must not be shared between threads
/// without synchronization. The provided sources keep their state per thread.
pub trait EntropySource {
    /// Draws fresh randomness.
    fn randomness(&mut self) -> Randomness;
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn randomness(&mut self) -> Randomness {
        (**self).randomness()
    }
}

#[cfg(feature = "rand")]
thread_local! {
    static FAST_RNG: RefCell<SmallRng> = RefCell::new(SmallRng::seed_from_u64(time_seed()));
}

/// Seed from the nanosecond clock hashed with `RandomState`, whose keys come
/// from OS randomness, so threads starting at the same instant still diverge.
#[cfg(feature = "rand")]
fn time_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |since_epoch| since_epoch.as_nanos());

    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u128(nanos);
    hasher.finish()
}

/// Fast, non-cryptographic entropy.
///
/// Uses a small pseudo-random generator per thread, seeded on first use from
/// the clock mixed with OS-random hash keys. Suitable when uniqueness matters
/// but unpredictability does not.
#[cfg(feature = "rand")]
#[derive(Debug, Default, Clone, Copy)]
pub struct FastEntropy;

#[cfg(feature = "rand")]
impl EntropySource for FastEntropy {
    fn randomness(&mut self) -> Randomness {
        FAST_RNG.with(|rng| Randomness::from_rng(&mut *rng.borrow_mut()))
    }
}

/// Cryptographically secure entropy.
///
/// Draws from the thread-local CSPRNG of the `rand` crate, which is seeded and
/// periodically reseeded from the operating system. Slower than [`FastEntropy`].
#[cfg(feature = "rand")]
#[derive(Debug, Default, Clone, Copy)]
pub struct CryptoEntropy;

#[cfg(feature = "rand")]
impl EntropySource for CryptoEntropy {
    fn randomness(&mut self) -> Randomness {
        Randomness::from_rng(&mut rand::thread_rng())
    }
}

/// Entropy drawn from a caller-owned generator.
///
/// Gives the caller control over seeding, e.g. for reproducible output or for
/// one generator per worker.
///
/// # Example
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use burst_ulid::{EntropySource, RngEntropy};
///
/// let mut a = RngEntropy(StdRng::seed_from_u64(42));
/// let mut b = RngEntropy(StdRng::seed_from_u64(42));
///
/// assert_eq!(a.randomness(), b.randomness());
/// ```
#[cfg(feature = "rand")]
#[derive(Debug, Clone)]
pub struct RngEntropy<R>(pub R);

#[cfg(feature = "rand")]
impl<R: RngCore> EntropySource for RngEntropy<R> {
    fn randomness(&mut self) -> Randomness {
        Randomness::from_rng(&mut self.0)
    }
}

/// Generates ULIDs from an injected clock and entropy source.
///
/// # Example
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use burst_ulid::{Generator, RngEntropy, SystemClock};
///
/// let mut generator = Generator::new(SystemClock, RngEntropy(StdRng::seed_from_u64(1)));
///
/// let u1 = generator.generate_at(1_000);
/// let u2 = generator.generate_at(2_000);
///
/// assert!(u1 < u2);
/// ```
#[derive(Debug, Clone)]
pub struct Generator<C, E> {
    clock: C,
    entropy: E,
}

impl<C: Clock, E: EntropySource> Generator<C, E> {
    /// Creates a generator from a clock and an entropy source.
    #[must_use]
    pub const fn new(clock: C, entropy: E) -> Self {
        Self { clock, entropy }
    }

    /// Generates a ULID for the current time of the clock.
    #[must_use]
    pub fn generate(&mut self) -> Ulid {
        let timestamp = self.clock.now_millis();
        self.generate_at(timestamp)
    }

    /// Generates a ULID for the given timestamp. Only the lower 48 bits are used.
    #[must_use]
    pub fn generate_at(&mut self, timestamp: u64) -> Ulid {
        Ulid::from_timestamp_and_randomness(timestamp, self.entropy.randomness())
    }

    /// Returns the clock and entropy source.
    #[must_use]
    pub fn into_parts(self) -> (C, E) {
        (self.clock, self.entropy)
    }
}

#[cfg(feature = "rand")]
impl Generator<SystemClock, FastEntropy> {
    /// A generator using the system clock and [`FastEntropy`].
    #[must_use]
    pub const fn fast() -> Self {
        Self::new(SystemClock, FastEntropy)
    }
}

#[cfg(feature = "rand")]
impl Generator<SystemClock, CryptoEntropy> {
    /// A generator using the system clock and [`CryptoEntropy`].
    #[must_use]
    pub const fn crypto() -> Self {
        Self::new(SystemClock, CryptoEntropy)
    }
}
