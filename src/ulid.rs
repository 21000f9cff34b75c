use std::{
    fmt,
    str::FromStr,
    time::{Duration, SystemTime},
};

#[cfg(feature = "rand")]
use rand::RngCore;

#[cfg(feature = "rand")]
use crate::generator::{Clock as _, CryptoEntropy, EntropySource as _, FastEntropy, SystemClock};
use crate::{base32, network, util, Error, Randomness, RANDOM_BITS, TIMESTAMP_MASK};

/// A Universally Unique Lexicographically Sortable Identifier.
///
/// 48 bits of milliseconds since the Unix epoch followed by 80 bits of randomness.
/// ULIDs compare as 128-bit unsigned integers, which is the same order as
/// their 26-character text form.
///
/// The all-zero value ([`Ulid::NIL`]) is valid and is the default.
///
/// # Example
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use burst_ulid::Ulid;
///
// cspell:disable-next-line
/// let u: Ulid = "01JB05JV6H9ZA2YQ6X3K1DAGVA".parse()?;
///
/// assert_eq!(u.timestamp(), 1_729_803_939_025);
// cspell:disable-next-line
/// assert_eq!(u.to_string(), "01JB05JV6H9ZA2YQ6X3K1DAGVA");
/// # Ok(()) }
/// ```
#[derive(Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Ulid(u128);

impl Ulid {
    /// The all-zero ULID.
    ///
    /// # Example
    ///
    /// ```
    /// use burst_ulid::Ulid;
    ///
    /// assert_eq!(Ulid::NIL.to_string(), "00000000000000000000000000");
    /// assert_eq!(Ulid::default(), Ulid::NIL);
    /// ```
    pub const NIL: Self = Self(0);

    /// The largest ULID.
    ///
    /// # Example
    ///
    /// ```
    /// use burst_ulid::Ulid;
    ///
    /// assert_eq!(Ulid::MAX.to_string(), "7ZZZZZZZZZZZZZZZZZZZZZZZZZ");
    /// ```
    pub const MAX: Self = Self(u128::MAX);

    /// Generates a new ULID for the current time with fast, non-cryptographic randomness.
    ///
    /// Successive calls are not guaranteed to be ordered within the same millisecond.
    ///
    /// # Example
    ///
    /// ```
    /// use burst_ulid::Ulid;
    ///
    /// let u1 = Ulid::new();
    /// let u2 = Ulid::new();
    ///
    /// assert_ne!(u1, u2);
    /// assert!(u1.timestamp() <= u2.timestamp());
    /// ```
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn new() -> Self {
        Self::new_at(SystemClock.now_millis())
    }

    /// Generates a new ULID for the given timestamp with fast, non-cryptographic randomness.
    ///
    /// Only the lower 48 bits of the timestamp are used.
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn new_at(timestamp: u64) -> Self {
        Self::from_timestamp_and_randomness(timestamp, FastEntropy.randomness())
    }

    /// Generates a new ULID for the current time, drawing randomness from `rng`.
    ///
    /// # Example
    ///
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use burst_ulid::Ulid;
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let u = Ulid::with_rng(&mut rng);
    ///
    /// assert!(u.timestamp() > 1_704_067_200_000); // 1st January 2024
    /// ```
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn with_rng<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::with_rng_at(SystemClock.now_millis(), rng)
    }

    /// Generates a new ULID for the given timestamp, drawing randomness from `rng`.
    ///
    /// # Example
    ///
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use burst_ulid::Ulid;
    ///
    /// let u1 = Ulid::with_rng_at(1_000, &mut StdRng::seed_from_u64(7));
    /// let u2 = Ulid::with_rng_at(1_000, &mut StdRng::seed_from_u64(7));
    ///
    /// assert_eq!(u1, u2);
    /// ```
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn with_rng_at<R: RngCore + ?Sized>(timestamp: u64, rng: &mut R) -> Self {
        Self::from_timestamp_and_randomness(timestamp, Randomness::from_rng(rng))
    }

    /// Generates a new ULID for the current time with cryptographically secure randomness.
    ///
    /// Use this when identifiers must not be guessable.
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn new_crypto() -> Self {
        Self::new_crypto_at(SystemClock.now_millis())
    }

    /// Generates a new ULID for the given timestamp with cryptographically secure randomness.
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn new_crypto_at(timestamp: u64) -> Self {
        Self::from_timestamp_and_randomness(timestamp, CryptoEntropy.randomness())
    }

    /// Combines a timestamp and randomness into a ULID.
    ///
    /// Only the lower 48 bits of the timestamp are used; higher bits are discarded.
    ///
    /// # Example
    ///
    /// ```
    /// use burst_ulid::{Randomness, Ulid};
    ///
    /// let r = Randomness::from_parts(1, 0);
    ///
    /// assert_eq!(Ulid::from_timestamp_and_randomness(2, r).to_u128(), (2 << 80) | 1);
    /// assert_eq!(Ulid::from_timestamp_and_randomness(1 << 48, r).timestamp(), 0);
    /// ```
    #[must_use]
    pub const fn from_timestamp_and_randomness(timestamp: u64, randomness: Randomness) -> Self {
        let shifted = ((timestamp as u128) << RANDOM_BITS) & TIMESTAMP_MASK;
        Self(shifted | randomness.to_u128())
    }

    /// Returns the timestamp in milliseconds since the Unix epoch (48 bits).
    #[must_use]
    pub const fn timestamp(self) -> u64 {
        (self.0 >> RANDOM_BITS) as u64
    }

    /// Returns the 80-bit random part.
    #[must_use]
    pub const fn randomness(self) -> Randomness {
        Randomness::from_u128(self.0)
    }

    /// Returns `true` for the all-zero ULID.
    #[must_use]
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }

    /// Returns the timestamp as a `SystemTime`.
    ///
    /// # Panics
    ///
    /// May panic if the timestamp cannot be represented as a [`SystemTime`] on
    /// this platform. See [`Ulid::try_datetime()`] for a non-panicking variant.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::SystemTime;
    /// use burst_ulid::Ulid;
    ///
    /// assert_eq!(Ulid::NIL.datetime(), SystemTime::UNIX_EPOCH);
    /// ```
    #[must_use]
    pub fn datetime(self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_millis(self.timestamp())
    }

    /// Returns the timestamp as a [`SystemTime`], or `None` if it is not representable.
    #[must_use]
    pub fn try_datetime(self) -> Option<SystemTime> {
        SystemTime::UNIX_EPOCH.checked_add(Duration::from_millis(self.timestamp()))
    }

    /// Converts a ULID into a `u128`, ordered like the ULID itself.
    #[must_use]
    pub const fn to_u128(self) -> u128 {
        self.0
    }

    /// Creates a ULID from a `u128`.
    ///
    /// # Example
    ///
    /// ```
    /// use burst_ulid::Ulid;
    ///
    /// let n = 2091207293934528941058695985186693122_u128;
    ///
    // cspell:disable-next-line
    /// assert_eq!(Ulid::from_u128(n).to_string(), "01JB07NQ643XZXVHZDY0JNYR02");
    /// ```
    #[must_use]
    pub const fn from_u128(n: u128) -> Self {
        Self(n)
    }

    /// Returns the two 64-bit words of the memory layout.
    ///
    /// The first word holds the timestamp and the upper 16 randomness bits, the
    /// second word the lower 64 randomness bits.
    ///
    /// # Example
    ///
    /// ```
    /// use burst_ulid::{Randomness, Ulid};
    ///
    /// let u = Ulid::from_timestamp_and_randomness(1, Randomness::from_parts(3, 2));
    ///
    /// assert_eq!(u.to_words(), ((1 << 16) | 2, 3));
    /// ```
    #[must_use]
    pub const fn to_words(self) -> (u64, u64) {
        ((self.0 >> 64) as u64, self.0 as u64)
    }

    /// Creates a ULID from the two 64-bit words of the memory layout.
    ///
    /// See [`Ulid::to_words()`] for the meaning of each word.
    #[must_use]
    pub const fn from_words(first: u64, second: u64) -> Self {
        Self(((first as u128) << 64) | second as u128)
    }

    /// Returns the 16 bytes of the native memory layout.
    ///
    /// This is the GUID-compatible layout: both words in host byte order.
    #[must_use]
    pub const fn to_raw_bytes(self) -> [u8; 16] {
        let (first, second) = self.to_words();
        let (first, second) = (first.to_ne_bytes(), second.to_ne_bytes());

        let mut bytes = [0; 16];
        let mut i = 0;
        while i < 8 {
            bytes[i] = first[i];
            bytes[i + 8] = second[i];
            i += 1;
        }
        bytes
    }

    /// Creates a ULID from 16 bytes in native memory layout.
    ///
    /// # Example
    ///
    /// ```
    /// use burst_ulid::Ulid;
    ///
    /// let bytes = [7, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
    ///
    /// assert_eq!(Ulid::from_raw_bytes(bytes).to_raw_bytes(), bytes);
    /// ```
    #[must_use]
    pub const fn from_raw_bytes(bytes: [u8; 16]) -> Self {
        let mut first = [0; 8];
        let mut second = [0; 8];
        let mut i = 0;
        while i < 8 {
            first[i] = bytes[i];
            second[i] = bytes[i + 8];
            i += 1;
        }
        Self::from_words(u64::from_ne_bytes(first), u64::from_ne_bytes(second))
    }

    /// Creates a ULID from the first 16 bytes of `bytes` in native memory layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if fewer than 16 bytes are given.
    pub fn from_raw_slice(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self::from_raw_bytes(*util::leading_array(bytes)?))
    }

    /// Variant of [`Ulid::from_raw_slice()`] returning `None` on failure.
    #[must_use]
    pub fn try_from_raw_slice(bytes: &[u8]) -> Option<Self> {
        Self::from_raw_slice(bytes).ok()
    }

    /// Writes the native memory layout to the start of `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if `buffer` is shorter than 16 bytes.
    pub fn write_raw_bytes(self, buffer: &mut [u8]) -> Result<(), Error> {
        write_prefix(buffer, &self.to_raw_bytes())
    }

    /// Variant of [`Ulid::write_raw_bytes()`] reporting success as a `bool`.
    #[must_use]
    pub fn try_write_raw_bytes(self, buffer: &mut [u8]) -> bool {
        self.write_raw_bytes(buffer).is_ok()
    }

    /// Returns the 16 bytes of the network format.
    ///
    /// The network format is the interchange layout of this crate. It is not the
    /// big-endian byte order of [`Ulid::to_u128()`]. See [`native_to_network()`](crate::native_to_network).
    #[must_use]
    pub const fn to_network_bytes(self) -> [u8; 16] {
        network::native_to_network(self.to_raw_bytes())
    }

    /// Creates a ULID from 16 bytes in network format.
    ///
    /// # Example
    ///
    /// ```
    /// use burst_ulid::Ulid;
    ///
    /// let u = Ulid::from_u128(0x0123_4567_89AB_CDEF_0011_2233_4455_6677);
    ///
    /// assert_eq!(Ulid::from_network_bytes(u.to_network_bytes()), u);
    /// ```
    #[must_use]
    pub const fn from_network_bytes(bytes: [u8; 16]) -> Self {
        Self::from_raw_bytes(network::network_to_native(bytes))
    }

    /// Creates a ULID from the first 16 bytes of `bytes` in network format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if fewer than 16 bytes are given.
    pub fn from_network_slice(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self::from_network_bytes(*util::leading_array(bytes)?))
    }

    /// Variant of [`Ulid::from_network_slice()`] returning `None` on failure.
    #[must_use]
    pub fn try_from_network_slice(bytes: &[u8]) -> Option<Self> {
        Self::from_network_slice(bytes).ok()
    }

    /// Writes the network format to the start of `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if `buffer` is shorter than 16 bytes.
    pub fn write_network_bytes(self, buffer: &mut [u8]) -> Result<(), Error> {
        write_prefix(buffer, &self.to_network_bytes())
    }

    /// Variant of [`Ulid::write_network_bytes()`] reporting success as a `bool`.
    #[must_use]
    pub fn try_write_network_bytes(self, buffer: &mut [u8]) -> bool {
        self.write_network_bytes(buffer).is_ok()
    }

    /// Returns the native memory layout as four 32-bit lanes.
    #[must_use]
    pub fn to_u32_quad(self) -> [u32; 4] {
        let bytes = self.to_raw_bytes();
        let mut lanes = [0; 4];
        for (lane, chunk) in lanes.iter_mut().zip(bytes.chunks_exact(4)) {
            *lane = u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        lanes
    }

    /// Creates a ULID from four 32-bit lanes of the native memory layout.
    #[must_use]
    pub fn from_u32_quad(lanes: [u32; 4]) -> Self {
        let mut bytes = [0; 16];
        for (chunk, lane) in bytes.chunks_exact_mut(4).zip(lanes) {
            chunk.copy_from_slice(&lane.to_ne_bytes());
        }
        Self::from_raw_bytes(bytes)
    }

    /// Encodes the ULID into `buffer` and returns it as a string slice.
    ///
    /// Does not allocate.
    ///
    /// # Example
    ///
    /// ```
    /// use burst_ulid::Ulid;
    ///
    /// let mut buffer = [0; 26];
    ///
    /// assert_eq!(Ulid::from_u128(31).encode_into(&mut buffer), "0000000000000000000000000Z");
    /// ```
    pub fn encode_into(self, buffer: &mut [u8; 26]) -> &str {
        base32::encode(self.0, buffer)
    }

    /// Return the string representation and never panics.
    ///
    /// While the blanket implementation of [`std::string::ToString`] for `std::fmt::Display` may
    /// panic, this method returns `None` if the string cannot be allocated.
    #[must_use]
    pub fn try_to_string(self) -> Option<String> {
        util::try_to_string(self.0)
    }

    /// Parses the 26-character text form from ASCII bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the input is not exactly 26 symbols
    /// of the upper-case Base32 alphabet, or if the first symbol is above `'7'`.
    ///
    /// # Example
    ///
    /// ```
    /// use burst_ulid::{Error, Ulid};
    ///
    /// assert_eq!(Ulid::parse_bytes(b"0000000000000000000000000Z"), Ok(Ulid::from_u128(31)));
    /// assert_eq!(Ulid::parse_bytes(b"000000000000000000000000OO"), Err(Error::InvalidFormat));
    /// ```
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self(base32::decode(util::text_array(bytes)?)?))
    }

    /// Variant of [`Ulid::parse_bytes()`] returning `None` on failure.
    #[must_use]
    pub fn try_parse_bytes(bytes: &[u8]) -> Option<Self> {
        Self::parse_bytes(bytes).ok()
    }

    /// Parses the 26-character text form, returning `None` on failure.
    ///
    /// Use [`str::parse()`] to learn why parsing failed.
    ///
    /// # Example
    ///
    /// ```
    /// use burst_ulid::Ulid;
    ///
    /// assert_eq!(Ulid::try_parse("00000000000000000000000000"), Some(Ulid::NIL));
    /// assert_eq!(Ulid::try_parse("0000000000000000000000000"), None);
    /// ```
    #[must_use]
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::try_parse_bytes(s.as_bytes())
    }

    /// Converts a ULID into a [`uuid::Uuid`] sharing the same memory layout.
    ///
    /// No bytes are reordered: the GUID fields are read little-endian from the
    /// native layout, as a GUID stored in memory would be.
    #[cfg(feature = "uuid")]
    #[must_use]
    pub fn to_uuid(self) -> uuid::Uuid {
        uuid::Uuid::from_bytes_le(self.to_raw_bytes())
    }

    /// Creates a ULID from a [`uuid::Uuid`] sharing the same memory layout.
    ///
    /// The inverse of [`Ulid::to_uuid()`].
    #[cfg(feature = "uuid")]
    #[must_use]
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self::from_raw_bytes(uuid.to_bytes_le())
    }
}

fn write_prefix(buffer: &mut [u8], bytes: &[u8; 16]) -> Result<(), Error> {
    let target = buffer.get_mut(..bytes.len()).ok_or(Error::InvalidLength)?;
    target.copy_from_slice(bytes);
    Ok(())
}

impl fmt::Debug for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        util::debug_ulid(self.0, f)
    }
}

impl fmt::Display for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = [0; 26];
        f.write_str(self.encode_into(&mut buffer))
    }
}

impl FromStr for Ulid {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_bytes(s.as_bytes())
    }
}

impl From<Ulid> for u128 {
    fn from(ulid: Ulid) -> Self {
        ulid.to_u128()
    }
}

impl From<u128> for Ulid {
    fn from(n: u128) -> Self {
        Self::from_u128(n)
    }
}

impl From<(u64, u64)> for Ulid {
    fn from((first, second): (u64, u64)) -> Self {
        Self::from_words(first, second)
    }
}

impl From<Ulid> for (u64, u64) {
    fn from(ulid: Ulid) -> Self {
        ulid.to_words()
    }
}

impl From<[u32; 4]> for Ulid {
    fn from(lanes: [u32; 4]) -> Self {
        Self::from_u32_quad(lanes)
    }
}

impl From<Ulid> for [u32; 4] {
    fn from(ulid: Ulid) -> Self {
        ulid.to_u32_quad()
    }
}

impl From<[u8; 16]> for Ulid {
    fn from(bytes: [u8; 16]) -> Self {
        Self::from_raw_bytes(bytes)
    }
}

impl From<Ulid> for [u8; 16] {
    fn from(ulid: Ulid) -> Self {
        ulid.to_raw_bytes()
    }
}

impl TryFrom<&[u8]> for Ulid {
    type Error = Error;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_raw_slice(bytes)
    }
}

impl TryFrom<&str> for Ulid {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(feature = "uuid")]
impl From<uuid::Uuid> for Ulid {
    fn from(uuid: uuid::Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

#[cfg(feature = "uuid")]
impl From<Ulid> for uuid::Uuid {
    fn from(ulid: Ulid) -> Self {
        ulid.to_uuid()
    }
}
