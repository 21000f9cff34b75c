use std::fmt;

/// Errors that can occur when creating ULIDs out of foreign data.
///
/// Both kinds signal malformed input supplied by the caller. Retrying with the
/// same input always fails the same way.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Error {
    /// The text does not decode: wrong length, or a character outside the Base32 alphabet.
    InvalidFormat,
    /// A binary buffer is shorter than required.
    InvalidLength,
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match *self {
            Self::InvalidFormat => "invalid ULID format",
            Self::InvalidLength => "buffer is too short",
        };
        write!(f, "{message}")
    }
}
