use std::str::from_utf8_unchecked;

use crate::Error;

pub const ENCODED_LEN: usize = 26;

// cspell:disable-next-line
const ALPHABET: [u8; 32] = *b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const INVALID: i8 = -1;

// Indexed by byte value up to and including `'z'`. Only the canonical
// upper-case symbols are mapped; lower case, `I`, `L`, `O` and `U` are not.
#[rustfmt::skip]
const DECODE: [i8; b'z' as usize + 1] = [
    /* 0x00 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0x10 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0x20 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0x30 */   0,  1,  2,  3,  4,  5,  6,  7,  8,  9, -1, -1, -1, -1, -1, -1,
    /* 0x40 */  -1, 10, 11, 12, 13, 14, 15, 16, 17, -1, 18, 19, -1, 20, 21, -1,
    /* 0x50 */  22, 23, 24, 25, 26, -1, 27, 28, 29, 30, 31, -1, -1, -1, -1, -1,
    /* 0x60 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0x70 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
];

/// Encodes 128 bits as 26 groups of 5 bits, most significant group first.
///
/// The value is treated as 130 bits with the two extra high bits zero, so the
/// first symbol is always in `'0'..='7'`.
pub fn encode(mut n: u128, buffer: &mut [u8; ENCODED_LEN]) -> &str {
    for byte in buffer.iter_mut().rev() {
        *byte = ALPHABET[(n & 0x1F) as usize];
        n >>= 5;
    }

    // Safety: every byte comes from `ALPHABET`, which is ASCII
    unsafe { from_utf8_unchecked(buffer) }
}

fn symbol(c: u8) -> Result<u128, Error> {
    if c > b'z' {
        return Err(Error::InvalidFormat);
    }
    match DECODE[usize::from(c)] {
        INVALID => Err(Error::InvalidFormat),
        n => u128::try_from(n).or(Err(Error::InvalidFormat)),
    }
}

pub fn decode(ascii_bytes: &[u8; ENCODED_LEN]) -> Result<u128, Error> {
    let mut n = symbol(ascii_bytes[0])?;

    // A first symbol above '7' would need more than 128 bits.
    if n > 7 {
        return Err(Error::InvalidFormat);
    }

    for &byte in &ascii_bytes[1..] {
        n = (n << 5) | symbol(byte)?;
    }

    Ok(n)
}

pub fn canonicalize(buffer: &mut [u8; ENCODED_LEN]) -> Result<&str, Error> {
    for byte in buffer.iter_mut() {
        *byte = normalize_char(*byte)?;
    }

    if buffer[0] > b'7' {
        return Err(Error::InvalidFormat);
    }

    // Safety: `normalize_char` only yields ASCII alphanumerics
    Ok(unsafe { from_utf8_unchecked(buffer) })
}

const fn normalize_char(c: u8) -> Result<u8, Error> {
    match c {
        b'i' | b'I' | b'l' | b'L' => Ok(b'1'),
        b'o' | b'O' => Ok(b'0'),
        b'u' | b'U' => Err(Error::InvalidFormat),
        other if other.is_ascii_alphanumeric() => Ok(other.to_ascii_uppercase()),
        _ => Err(Error::InvalidFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_matches_decode_table() {
        for (index, &c) in ALPHABET.iter().enumerate() {
            assert_eq!(symbol(c), Ok(index as u128));
        }

        let mapped = (0..=b'z').filter(|&c| symbol(c).is_ok()).count();
        assert_eq!(mapped, ALPHABET.len());
    }

    #[test]
    fn test_lower_case_is_rejected() {
        for c in b'a'..=b'z' {
            assert_eq!(symbol(c), Err(Error::InvalidFormat));
        }
    }

    #[test]
    fn test_bytes_above_z_are_rejected() {
        for c in b'{'..=u8::MAX {
            assert_eq!(symbol(c), Err(Error::InvalidFormat));
        }
    }

    #[test]
    fn test_encode_extremes() {
        let mut buffer = [0; ENCODED_LEN];
        assert_eq!(encode(0, &mut buffer), "00000000000000000000000000");
        assert_eq!(encode(u128::MAX, &mut buffer), "7ZZZZZZZZZZZZZZZZZZZZZZZZZ");
        assert_eq!(encode(31, &mut buffer), "0000000000000000000000000Z");
    }

    #[test]
    fn test_decode_overflowing_first_symbol() {
        assert_eq!(decode(b"7ZZZZZZZZZZZZZZZZZZZZZZZZZ"), Ok(u128::MAX));
        assert_eq!(decode(b"80000000000000000000000000"), Err(Error::InvalidFormat));
    }

    #[test]
    fn test_canonicalize_first_symbol() {
        let mut buffer = *b"o0000000000000000000000000";
        assert_eq!(canonicalize(&mut buffer), Ok("00000000000000000000000000"));

        let mut buffer = *b"80000000000000000000000000";
        assert_eq!(canonicalize(&mut buffer), Err(Error::InvalidFormat));
    }
}
