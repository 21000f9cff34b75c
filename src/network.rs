//! Byte-order conversion between the native memory layout and the network format.
//!
//! The native layout stores a ULID as two 64-bit words in host byte order:
//! the word at offset 0 carries the timestamp and the upper 16 randomness bits,
//! the word at offset 8 carries the lower 64 randomness bits.
//!
//! The network format is this crate's own interchange layout, derived from the
//! GUID layout. It is not the big-endian byte order of the 128-bit value used by
//! most other ULID implementations. Starting from little-endian memory bytes
//! `b0..b15` it is
//!
//! ```text
//! b5 b4 b3 b2 b1 b0 b15 b14 b13 b12 b11 b10 b9 b8 b7 b6
//! ```
//!
//! The reordering is its own inverse. On big-endian hosts the memory bytes are
//! already in network order and no reordering happens.

/// Source index for each position of the network format.
const NETWORK_ORDER: [usize; 16] = [5, 4, 3, 2, 1, 0, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6];

const fn reorder(bytes: [u8; 16]) -> [u8; 16] {
    let mut out = [0; 16];
    let mut i = 0;
    while i < 16 {
        out[i] = bytes[NETWORK_ORDER[i]];
        i += 1;
    }
    out
}

const fn convert(bytes: [u8; 16]) -> [u8; 16] {
    if cfg!(target_endian = "little") {
        reorder(bytes)
    } else {
        bytes
    }
}

/// Converts 16 bytes in native memory layout into the network format.
///
/// # Example
///
/// ```
/// let native = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
/// let network = burst_ulid::native_to_network(native);
///
/// assert_eq!(burst_ulid::network_to_native(network), native);
/// ```
#[must_use]
pub const fn native_to_network(bytes: [u8; 16]) -> [u8; 16] {
    convert(bytes)
}

/// Converts 16 bytes in network format into the native memory layout.
#[must_use]
pub const fn network_to_native(bytes: [u8; 16]) -> [u8; 16] {
    convert(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQUENTIAL: [u8; 16] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];

    #[test]
    fn test_reorder_is_involution() {
        assert_eq!(reorder(reorder(SEQUENTIAL)), SEQUENTIAL);

        for (i, &source) in NETWORK_ORDER.iter().enumerate() {
            assert_eq!(NETWORK_ORDER[source], i);
        }
    }

    #[test]
    #[cfg(target_endian = "little")]
    fn test_little_endian_network_bytes() {
        let network = native_to_network(SEQUENTIAL);

        assert_eq!(
            network,
            [0x06, 0x05, 0x04, 0x03, 0x02, 0x01, 0x10, 0x0F, 0x0E, 0x0D, 0x0C, 0x0B, 0x0A, 0x09, 0x08, 0x07]
        );
        assert_eq!(network_to_native(network), SEQUENTIAL);
    }

    #[test]
    #[cfg(target_endian = "little")]
    fn test_network_bytes_are_not_big_endian_value() {
        let n = u128::from_be_bytes(SEQUENTIAL);
        let network = crate::Ulid::from_u128(n).to_network_bytes();

        assert_ne!(network, n.to_be_bytes());
        assert_eq!(
            network,
            [0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F, 0x10, 0x01, 0x02]
        );
    }

    #[test]
    #[cfg(target_endian = "big")]
    fn test_big_endian_is_identity() {
        assert_eq!(native_to_network(SEQUENTIAL), SEQUENTIAL);
        assert_eq!(network_to_native(SEQUENTIAL), SEQUENTIAL);
    }
}
