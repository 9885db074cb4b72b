//! Masking (digits to display string) and unmasking (display string to digits).

use crate::digits::{DigitBuffer, MAX_DIGITS};
use crate::error::IdError;
use crate::kind::{DocumentKind, MaskSegment};

/// Formats raw digits with the kind's mask.
///
/// Fails with [`IdError::LengthMismatch`] if the digit count is not one the
/// kind accepts.
pub fn mask(kind: DocumentKind, digits: &DigitBuffer) -> Result<String, IdError> {
    let pattern = kind
        .scheme()
        .mask_pattern(digits.len())
        .ok_or_else(|| IdError::LengthMismatch {
            kind,
            expected: kind.expected_lengths(),
            actual: digits.len(),
        })?;
    Ok(apply_mask(pattern, digits.as_slice()))
}

/// Unmasks `input` for `kind` and re-masks it.
pub fn mask_str(kind: DocumentKind, input: &str) -> Result<String, IdError> {
    let digits = unmask_for(kind, input)?;
    mask(kind, &digits)
}

/// Writes `digits` grouped by `pattern`.
///
/// Digits beyond the pattern are appended unseparated; a short input stops
/// at the last full or partial group without a trailing separator.
#[must_use]
pub fn apply_mask(pattern: &[MaskSegment], digits: &[u8]) -> String {
    let mut out = String::with_capacity(digits.len() + pattern.len());
    let mut rest = digits;
    for segment in pattern {
        if rest.is_empty() {
            break;
        }
        let (group, tail) = rest.split_at(segment.len.min(rest.len()));
        out.extend(group.iter().map(|d| char::from(b'0' + d)));
        rest = tail;
        if !rest.is_empty() {
            out.push_str(segment.separator);
        }
    }
    out.extend(rest.iter().map(|d| char::from(b'0' + d)));
    out
}

/// Strips every non-digit character.
///
/// Fails only if nothing is left or more than [`MAX_DIGITS`] digits remain.
pub fn unmask(input: &str) -> Result<DigitBuffer, IdError> {
    let mut digits = DigitBuffer::new();
    let mut count = 0;
    for d in input.chars().filter_map(|c| c.to_digit(10)) {
        count += 1;
        if count <= MAX_DIGITS {
            digits.push(d as u8);
        }
    }
    match count {
        0 => Err(IdError::Empty),
        n if n > MAX_DIGITS => Err(IdError::TooManyDigits {
            actual: n,
            max: MAX_DIGITS,
        }),
        _ => Ok(digits),
    }
}

/// Unmasks and checks the digit count against `kind`.
pub fn unmask_for(kind: DocumentKind, input: &str) -> Result<DigitBuffer, IdError> {
    let digits = unmask(input)?;
    ensure_length(kind, &digits)?;
    Ok(digits)
}

/// Strict unmasking used by validation.
///
/// Only digits, the kind's own separators, and whitespace may appear; any
/// other character is reported with its position. The digit count is not
/// checked here.
pub fn parse_display(kind: DocumentKind, input: &str) -> Result<DigitBuffer, IdError> {
    let separators = kind.scheme().separators();
    let mut digits = DigitBuffer::new();
    let mut count = 0;

    for (position, character) in input.chars().enumerate() {
        if let Some(d) = character.to_digit(10) {
            count += 1;
            if count <= MAX_DIGITS {
                digits.push(d as u8);
            }
        } else if !(character.is_whitespace() || separators.contains(&character)) {
            return Err(IdError::InvalidCharacter {
                character,
                position,
            });
        }
    }

    match count {
        0 => Err(IdError::Empty),
        n if n > MAX_DIGITS => Err(IdError::TooManyDigits {
            actual: n,
            max: MAX_DIGITS,
        }),
        _ => Ok(digits),
    }
}

pub(crate) fn ensure_length(kind: DocumentKind, digits: &DigitBuffer) -> Result<(), IdError> {
    if kind.scheme().accepts_length(digits.len()) {
        Ok(())
    } else {
        Err(IdError::InvalidLength {
            kind,
            expected: kind.expected_lengths(),
            actual: digits.len(),
        })
    }
}
