//! Fixed-capacity decimal digit buffer shared by every scheme.

use std::fmt;

use crate::error::IdError;

/// Largest identifier any scheme produces (the 32-digit civil-registry number).
pub const MAX_DIGITS: usize = 32;

/// An ordered sequence of decimal digits with inline storage.
///
/// Every element is in `0..=9`. The buffer is `Copy`, so generators and
/// validators never share or allocate digit storage.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigitBuffer {
    digits: [u8; MAX_DIGITS],
    len: usize,
}

impl DigitBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            digits: [0; MAX_DIGITS],
            len: 0,
        }
    }

    /// Builds a buffer from digit values.
    ///
    /// Returns `None` if any value is above 9 or the slice exceeds [`MAX_DIGITS`].
    #[must_use]
    pub fn from_digits(digits: &[u8]) -> Option<Self> {
        if digits.len() > MAX_DIGITS || digits.iter().any(|d| *d > 9) {
            return None;
        }
        let mut buf = Self::new();
        buf.digits[..digits.len()].copy_from_slice(digits);
        buf.len = digits.len();
        Some(buf)
    }

    /// Parses a string made only of ASCII digits.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        let mut buf = Self::new();
        for (position, character) in s.chars().enumerate() {
            let Some(d) = character.to_digit(10) else {
                return Err(IdError::InvalidCharacter {
                    character,
                    position,
                });
            };
            if buf.is_full() {
                return Err(too_long(s.chars().filter(char::is_ascii_digit).count()));
            }
            buf.push(d as u8);
        }
        Ok(buf)
    }

    /// Appends one digit.
    ///
    /// # Panics
    ///
    /// Panics if the digit is above 9 or the buffer is full. Generators only
    /// push within their scheme's fixed length.
    pub fn push(&mut self, digit: u8) {
        assert!(digit <= 9, "digit out of range: {digit}");
        assert!(!self.is_full(), "digit buffer full");
        self.digits[self.len] = digit;
        self.len += 1;
    }

    /// Appends every digit of a slice.
    pub fn extend_from_slice(&mut self, digits: &[u8]) {
        for d in digits {
            self.push(*d);
        }
    }

    /// Appends `value` in decimal, left-padded with zeros to `width` digits.
    ///
    /// Only the lowest `width` decimal places of `value` are kept.
    pub fn push_number(&mut self, value: u64, width: usize) {
        let mut divisor = 10u64.pow(width.saturating_sub(1) as u32);
        for _ in 0..width {
            self.push(((value / divisor) % 10) as u8);
            divisor /= 10;
        }
    }

    /// Returns the digits as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.digits[..self.len]
    }

    /// Number of digits held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer holds no digits.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if no further digit fits.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == MAX_DIGITS
    }

    /// Splits into the leading `base_len` digits and the remainder.
    #[must_use]
    pub fn split(&self, base_len: usize) -> (&[u8], &[u8]) {
        self.as_slice().split_at(base_len.min(self.len))
    }

    /// Returns true if there are at least two digits and all are equal.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        match self.as_slice().split_first() {
            Some((first, rest)) => !rest.is_empty() && rest.iter().all(|d| d == first),
            None => false,
        }
    }
}

impl Default for DigitBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DigitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.as_slice() {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for DigitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DigitBuffer(\"{self}\")")
    }
}

impl std::str::FromStr for DigitBuffer {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<[u8]> for DigitBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

fn too_long(actual: usize) -> IdError {
    IdError::TooManyDigits {
        actual,
        max: MAX_DIGITS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_roundtrip() {
        let buf = DigitBuffer::parse("0123456789").unwrap();
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.to_string(), "0123456789");
    }

    #[test]
    fn test_parse_rejects_non_digit() {
        let err = DigitBuffer::parse("12a4").unwrap_err();
        assert_eq!(
            err,
            IdError::InvalidCharacter {
                character: 'a',
                position: 2
            }
        );
        assert_eq!(DigitBuffer::parse("").unwrap_err(), IdError::Empty);
    }

    #[test]
    fn test_from_digits_bounds() {
        assert!(DigitBuffer::from_digits(&[1, 2, 10]).is_none());
        assert!(DigitBuffer::from_digits(&[0; MAX_DIGITS + 1]).is_none());
        assert_eq!(DigitBuffer::from_digits(&[0; MAX_DIGITS]).unwrap().len(), 32);
    }

    #[test]
    fn test_push_number_pads() {
        let mut buf = DigitBuffer::new();
        buf.push_number(7, 3);
        buf.push_number(2024, 4);
        buf.push_number(123456, 2);
        assert_eq!(buf.to_string(), "007202456");
    }

    #[test]
    fn test_uniform_detection() {
        assert!(DigitBuffer::parse("11111111111").unwrap().is_uniform());
        assert!(!DigitBuffer::parse("11111111112").unwrap().is_uniform());
        assert!(!DigitBuffer::parse("7").unwrap().is_uniform());
        assert!(!DigitBuffer::new().is_uniform());
    }

    #[test]
    fn test_split() {
        let buf = DigitBuffer::parse("52998224725").unwrap();
        let (base, check) = buf.split(9);
        assert_eq!(base, &[5, 2, 9, 9, 8, 2, 2, 4, 7]);
        assert_eq!(check, &[2, 5]);
    }
}
