//! # Compact ULIDs with GUID and Network Layouts
//!
//! This crate implements ULIDs (Universally Unique Lexicographically Sortable Identifiers):
//! 128-bit values made of a 48-bit millisecond timestamp and 80 bits of randomness.
//! A [`Ulid`] is a plain `Copy` value. Comparing two ULIDs as integers gives the same
//! result as comparing their 26-character text forms.
//!
//! ## Generating ULIDs
//!
//! Three randomness policies are available with the `rand` feature (enabled by default):
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use burst_ulid::Ulid;
//!
//! // Fast, non-cryptographic randomness
//! let fast = Ulid::new();
//!
//! // Randomness from a generator owned by the caller
//! let mut rng = StdRng::seed_from_u64(42);
//! let seeded = Ulid::with_rng(&mut rng);
//!
//! // Cryptographically secure randomness
//! let secret = Ulid::new_crypto();
//! ```
//!
//! Each policy also takes an explicit timestamp (`new_at`, `with_rng_at`, `new_crypto_at`).
//! For full control over both clock and entropy, see [`Generator`].
//!
//! No global ordering is maintained between calls: two ULIDs generated within the
//! same millisecond are ordered by their random parts.
//!
//! ## Text form
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use burst_ulid::Ulid;
//!
// cspell:disable-next-line
//! let u: Ulid = "01JB5C84ZBM8QVBE5QRZW6HY89".parse()?;
//!
// cspell:disable-next-line
//! assert_eq!(u.to_string(), "01JB5C84ZBM8QVBE5QRZW6HY89");
//! assert_eq!(Ulid::try_parse("not a ulid"), None);
//! # Ok(()) }
//! ```
//!
//! Parsing is strict: only the 26 upper-case symbols of the canonical alphabet are accepted.
//! Use [`canonicalize()`] to clean up human-typed input first.
//!
//! ## Binary forms
//!
//! - [`Ulid::to_raw_bytes()`]: the native memory layout, identical to the GUID layout.
//! - [`Ulid::to_network_bytes()`]: the network format used for interchange.
//!
//! ```
//! use burst_ulid::Ulid;
//!
//! let u = Ulid::from_u128(0x0192_C059_6CD1_4FD4_2F5C_DD1C_C2D5_436A);
//!
//! assert_eq!(Ulid::from_network_bytes(u.to_network_bytes()), u);
//! assert_eq!(Ulid::from_raw_bytes(u.to_raw_bytes()), u);
//! ```
//!
//! ## Feature Flags
//!
//! - **`rand`**: Generation through the `rand` crate, enabled by default.
//! - **`serde`**: Serialization as the text form via `Serde`, optional.
//! - **`uuid`**: Conversions from and to `uuid::Uuid`, optional.
//!

mod base32;
mod error;
mod generator;
mod network;
mod randomness;
#[cfg(feature = "serde")]
mod serde;
mod ulid;
mod util;

use std::borrow::Cow;

pub use error::Error;
pub use generator::{Clock, EntropySource, Generator, SystemClock};
#[cfg(feature = "rand")]
pub use generator::{CryptoEntropy, FastEntropy, RngEntropy};
pub use network::{native_to_network, network_to_native};
pub use randomness::Randomness;
pub use ulid::Ulid;

const RANDOM_BITS: u32 = 80;
const RANDOM_MASK: u128 = (1 << RANDOM_BITS) - 1;

const TIMESTAMP_BITS: u32 = 48;
const TIMESTAMP_MASK: u128 = ((1 << TIMESTAMP_BITS) - 1) << RANDOM_BITS;

/// Canonicalizes a human-typed ULID string.
///
/// Letters are converted to upper case, `I` and `L` become `1`, and `O` becomes `0`.
/// The result parses with [`str::parse()`].
///
/// If the input is already canonical, it is returned borrowed without allocating.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if the input is not 26 characters long, contains
/// `U` or a non-alphanumeric character, or starts with a symbol above `'7'`.
///
/// # Example
///
/// ```
// cspell:disable-next-line
/// let s = "olixjazthsfjzt7wd6j8ir92vn";
///
// cspell:disable-next-line
/// assert_eq!(burst_ulid::canonicalize(s), Ok("011XJAZTHSFJZT7WD6J81R92VN".into()));
/// ```
pub fn canonicalize(ulid: &str) -> Result<Cow<str>, Error> {
    let mut buffer = *util::text_array(ulid.as_bytes())?;
    let cleaned = base32::canonicalize(&mut buffer)?;

    if cleaned == ulid {
        Ok(ulid.into())
    } else {
        Ok(cleaned.to_string().into())
    }
}

/// Checks whether a string is a well-formed ULID in canonical text form.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] exactly when parsing the string would fail.
///
/// # Example
///
/// ```
/// use burst_ulid::{validate, Error};
///
/// assert!(validate("00000000000000000000000000").is_ok());
/// assert!(validate("7ZZZZZZZZZZZZZZZZZZZZZZZZZ").is_ok());
///
/// assert_eq!(validate("80000000000000000000000000"), Err(Error::InvalidFormat));
/// assert_eq!(validate("7zzzzzzzzzzzzzzzzzzzzzzzzz"), Err(Error::InvalidFormat));
/// assert_eq!(validate("0000000000000000000000000"), Err(Error::InvalidFormat));
/// ```
pub fn validate(ulid: &str) -> Result<(), Error> {
    base32::decode(util::text_array(ulid.as_bytes())?).map(|_| ())
}
