use std::fmt;

#[cfg(feature = "rand")]
use rand::RngCore;

use crate::{util, Error, RANDOM_MASK};

/// The 80-bit random component of a ULID.
///
/// Stored as a 64-bit low part and a 16-bit high part. A `Randomness` can be
/// detached from one ULID and combined with another timestamp using
/// [`Ulid::from_timestamp_and_randomness()`](crate::Ulid::from_timestamp_and_randomness).
///
/// # Example
///
/// ```
/// use burst_ulid::{Randomness, Ulid};
///
/// let r = Randomness::from_parts(0xDEAD_BEEF, 0x42);
/// let u = Ulid::from_timestamp_and_randomness(1_000, r);
///
/// assert_eq!(u.randomness(), r);
/// assert_eq!(u.timestamp(), 1_000);
/// ```
#[derive(Default, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Randomness {
    low: u64,
    high: u16,
}

impl Randomness {
    /// Number of bytes produced by [`Randomness::to_bytes()`].
    pub const BYTES: usize = 10;

    /// Creates a `Randomness` from its lower 64 bits and upper 16 bits.
    #[must_use]
    pub const fn from_parts(low: u64, high: u16) -> Self {
        Self { low, high }
    }

    /// Returns the lower 64 bits.
    #[must_use]
    pub const fn low(self) -> u64 {
        self.low
    }

    /// Returns the upper 16 bits.
    #[must_use]
    pub const fn high(self) -> u16 {
        self.high
    }

    /// Creates a `Randomness` from the lower 80 bits of `n`. Higher bits are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use burst_ulid::Randomness;
    ///
    /// let r = Randomness::from_u128(u128::MAX);
    ///
    /// assert_eq!(r.to_u128(), (1 << 80) - 1);
    /// ```
    #[must_use]
    pub const fn from_u128(n: u128) -> Self {
        let n = n & RANDOM_MASK;
        Self {
            low: n as u64,
            high: (n >> 64) as u16,
        }
    }

    /// Returns the 80 bits as an integer.
    #[must_use]
    pub const fn to_u128(self) -> u128 {
        ((self.high as u128) << 64) | self.low as u128
    }

    /// Returns the randomness as 10 bytes: the low part followed by the high
    /// part, both little-endian.
    #[must_use]
    pub fn to_bytes(self) -> [u8; Self::BYTES] {
        let mut bytes = [0; Self::BYTES];
        bytes[..8].copy_from_slice(&self.low.to_le_bytes());
        bytes[8..].copy_from_slice(&self.high.to_le_bytes());
        bytes
    }

    /// Creates a `Randomness` from the first 10 bytes of `bytes`, laid out as
    /// by [`Randomness::to_bytes()`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if fewer than 10 bytes are given.
    ///
    /// # Example
    ///
    /// ```
    /// use burst_ulid::{Error, Randomness};
    ///
    /// let r = Randomness::from_parts(7, 9);
    ///
    /// assert_eq!(Randomness::from_bytes(&r.to_bytes()), Ok(r));
    /// assert_eq!(Randomness::from_bytes(&[0; 9]), Err(Error::InvalidLength));
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: &[u8; Self::BYTES] = util::leading_array(bytes)?;
        Ok(Self::from_le_array(bytes))
    }

    /// Writes the 10 bytes of [`Randomness::to_bytes()`] to the start of `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if `buffer` is shorter than 10 bytes.
    pub fn write_bytes(self, buffer: &mut [u8]) -> Result<(), Error> {
        let target = buffer.get_mut(..Self::BYTES).ok_or(Error::InvalidLength)?;
        target.copy_from_slice(&self.to_bytes());
        Ok(())
    }

    /// Variant of [`Randomness::write_bytes()`] reporting success as a `bool`.
    #[must_use]
    pub fn try_write_bytes(self, buffer: &mut [u8]) -> bool {
        self.write_bytes(buffer).is_ok()
    }

    /// Draws 80 bits from the given generator.
    ///
    /// # Example
    ///
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use burst_ulid::Randomness;
    ///
    /// let mut a = StdRng::seed_from_u64(7);
    /// let mut b = StdRng::seed_from_u64(7);
    ///
    /// assert_eq!(Randomness::from_rng(&mut a), Randomness::from_rng(&mut b));
    /// ```
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn from_rng<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0; Self::BYTES];
        rng.fill_bytes(&mut bytes);
        Self::from_le_array(&bytes)
    }

    fn from_le_array(bytes: &[u8; Self::BYTES]) -> Self {
        let [l0, l1, l2, l3, l4, l5, l6, l7, h0, h1] = *bytes;
        Self {
            low: u64::from_le_bytes([l0, l1, l2, l3, l4, l5, l6, l7]),
            high: u16::from_le_bytes([h0, h1]),
        }
    }
}

impl fmt::Debug for Randomness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Randomness(\"{:020X}\")", self.to_u128())
    }
}

impl From<Randomness> for u128 {
    fn from(randomness: Randomness) -> Self {
        randomness.to_u128()
    }
}

impl From<Randomness> for [u8; Randomness::BYTES] {
    fn from(randomness: Randomness) -> Self {
        randomness.to_bytes()
    }
}

impl TryFrom<&[u8]> for Randomness {
    type Error = Error;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}
