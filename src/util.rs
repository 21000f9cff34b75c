use std::fmt::{self, Formatter};

use crate::{base32, Error, RANDOM_BITS, RANDOM_MASK};

/// Borrows text input as exactly 26 bytes.
pub fn text_array(bytes: &[u8]) -> Result<&[u8; base32::ENCODED_LEN], Error> {
    bytes.try_into().or(Err(Error::InvalidFormat))
}

/// Borrows the first `N` bytes of a binary buffer. Trailing bytes are ignored.
pub fn leading_array<const N: usize>(bytes: &[u8]) -> Result<&[u8; N], Error> {
    bytes
        .get(..N)
        .and_then(|prefix| prefix.try_into().ok())
        .ok_or(Error::InvalidLength)
}

pub fn try_to_string(ulid: u128) -> Option<String> {
    let mut s = String::new();
    s.try_reserve_exact(base32::ENCODED_LEN).ok()?;

    let mut buffer = [0; base32::ENCODED_LEN];
    s.push_str(base32::encode(ulid, &mut buffer));

    Some(s)
}

pub fn debug_ulid(ulid: u128, f: &mut Formatter<'_>) -> fmt::Result {
    struct Timestamp(u64);
    impl fmt::Debug for Timestamp {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "\"{}\"", timestamp_to_string(self.0))
        }
    }

    struct Randomness(u128);
    impl fmt::Debug for Randomness {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "\"{:020X}\"", self.0)
        }
    }

    let mut buffer = [0; base32::ENCODED_LEN];

    f.debug_struct("Ulid")
        .field("string", &base32::encode(ulid, &mut buffer))
        .field("timestamp", &Timestamp((ulid >> RANDOM_BITS) as u64))
        .field("randomness", &Randomness(ulid & RANDOM_MASK))
        .finish()
}

/// Renders milliseconds since the Unix epoch as an ISO-8601 UTC timestamp.
fn timestamp_to_string(millis: u64) -> String {
    let (secs, millis) = (millis / 1000, millis % 1000);
    let (days, secs_of_day) = (secs / 86_400, secs % 86_400);
    let (hour, minute, second) = (secs_of_day / 3600, secs_of_day / 60 % 60, secs_of_day % 60);

    // Civil date from a day count, with eras of 400 years starting on 0000-03-01.
    let shifted = days + 719_468;
    let era = shifted / 146_097;
    let day_of_era = shifted % 146_097;
    let year_of_era = (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_index = (5 * day_of_year + 2) / 153;

    let day = day_of_year - (153 * month_index + 2) / 5 + 1;
    let month = if month_index < 10 { month_index + 3 } else { month_index - 9 };
    let year = era * 400 + year_of_era + u64::from(month <= 2);

    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{millis:03}Z")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_string() {
        assert_eq!(timestamp_to_string(0), "1970-01-01T00:00:00.000Z");
        assert_eq!(timestamp_to_string((1 << 48) - 1), "10889-08-02T05:31:50.655Z");
        assert_eq!(timestamp_to_string(327_403_382_400_000), "12345-01-01T00:00:00.000Z");

        assert_eq!(timestamp_to_string(951_782_400_000), "2000-02-29T00:00:00.000Z");
        assert_eq!(timestamp_to_string(1_709_164_800_000), "2024-02-29T00:00:00.000Z");
        assert_eq!(timestamp_to_string(1_740_787_199_999), "2025-02-28T23:59:59.999Z");
        assert_eq!(timestamp_to_string(1_740_787_200_000), "2025-03-01T00:00:00.000Z");
        assert_eq!(timestamp_to_string(1_735_689_599_999), "2024-12-31T23:59:59.999Z");
    }

    #[test]
    fn test_leading_array() {
        let bytes = [1, 2, 3, 4];

        assert_eq!(leading_array::<3>(&bytes), Ok(&[1, 2, 3]));
        assert_eq!(leading_array::<4>(&bytes), Ok(&[1, 2, 3, 4]));
        assert_eq!(leading_array::<5>(&bytes), Err(Error::InvalidLength));
    }

    #[test]
    fn test_text_array() {
        assert!(text_array(&[b'0'; 26]).is_ok());
        assert_eq!(text_array(&[b'0'; 25]), Err(Error::InvalidFormat));
        assert_eq!(text_array(&[b'0'; 27]), Err(Error::InvalidFormat));
        assert_eq!(text_array(b""), Err(Error::InvalidFormat));
    }
}
