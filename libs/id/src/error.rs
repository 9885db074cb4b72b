//! Error types for identifier parsing, masking, and validation.

use thiserror::Error;

use crate::kind::DocumentKind;

/// Errors that can occur when parsing, formatting, or validating identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input contained no digits at all.
    #[error("identifier cannot be empty")]
    Empty,

    /// The input has the wrong number of digits for its scheme.
    #[error("invalid {kind} length: expected {expected} digits, got {actual}")]
    InvalidLength {
        kind: DocumentKind,
        expected: String,
        actual: usize,
    },

    /// More digits than any scheme can hold.
    #[error("too many digits: {actual} exceeds the maximum of {max}")]
    TooManyDigits { actual: usize, max: usize },

    /// A digit buffer handed to `mask` does not match the scheme length.
    ///
    /// This is a caller bug rather than bad user data.
    #[error("cannot mask {kind}: expected {expected} digits, got {actual}")]
    LengthMismatch {
        kind: DocumentKind,
        expected: String,
        actual: usize,
    },

    /// A character that is neither a digit nor a mask separator.
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    /// An unrecognized brand, region, or document kind.
    #[error("unknown {category}: '{value}'")]
    UnknownVariant {
        category: &'static str,
        value: String,
    },

    /// A requested quantity outside `1..=max`.
    #[error("quantity {requested} out of range: must be between 1 and {max}")]
    QuantityOutOfRange { requested: usize, max: usize },

    /// Every digit is the same (known non-issuable value).
    #[error("{kind} cannot consist of a single repeated digit")]
    RepeatedDigits { kind: DocumentKind },

    /// The embedded check digits disagree with the recomputed ones.
    #[error("{kind} check digits do not match: expected {expected}, got {actual}")]
    ChecksumMismatch {
        kind: DocumentKind,
        expected: String,
        actual: String,
    },
}

impl IdError {
    /// Shorthand for an [`IdError::UnknownVariant`].
    pub fn unknown(category: &'static str, value: impl Into<String>) -> Self {
        IdError::UnknownVariant {
            category,
            value: value.into(),
        }
    }

    /// Returns true if this error indicates a digit-count problem.
    pub fn is_length_error(&self) -> bool {
        matches!(
            self,
            IdError::Empty
                | IdError::InvalidLength { .. }
                | IdError::LengthMismatch { .. }
                | IdError::TooManyDigits { .. }
        )
    }

    /// Returns true if the input was well-formed but arithmetically invalid.
    pub fn is_checksum_error(&self) -> bool {
        matches!(
            self,
            IdError::ChecksumMismatch { .. } | IdError::RepeatedDigits { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(IdError::Empty.is_length_error());
        assert!(IdError::RepeatedDigits {
            kind: DocumentKind::PersonalTaxId
        }
        .is_checksum_error());
        assert!(!IdError::unknown("brand", "foo").is_length_error());
    }

    #[test]
    fn test_error_messages() {
        let err = IdError::InvalidLength {
            kind: DocumentKind::CorporateTaxId,
            expected: "14".to_string(),
            actual: 13,
        };
        assert_eq!(
            err.to_string(),
            "invalid CNPJ length: expected 14 digits, got 13"
        );
        assert_eq!(
            IdError::unknown("card brand", "foo").to_string(),
            "unknown card brand: 'foo'"
        );
    }
}
