//! Checksum validation.

use crate::error::IdError;
use crate::format::{ensure_length, parse_display};
use crate::identifier::Identifier;
use crate::kind::DocumentKind;

/// Validates `input` and explains any rejection.
///
/// Steps, in order: strict unmasking, length check, repeated-digit guard
/// (skipped for cards and certificates), then recomputing the check digits
/// from the base and comparing them with the embedded ones.
pub fn check(kind: DocumentKind, input: &str) -> Result<Identifier, IdError> {
    let digits = parse_display(kind, input)?;
    ensure_length(kind, &digits)?;

    let scheme = kind.scheme();
    if scheme.rejects_repeated_digits() && digits.is_uniform() {
        return Err(IdError::RepeatedDigits { kind });
    }

    let (base, embedded) = digits.split(scheme.base_length(digits.len()));
    let expected = scheme.compute_check(base);
    if expected.as_slice() != embedded {
        return Err(IdError::ChecksumMismatch {
            kind,
            expected: expected.to_string(),
            actual: embedded.iter().map(|d| char::from(b'0' + d)).collect(),
        });
    }

    Ok(Identifier::from_parts(kind, digits))
}

/// Returns true if `input` is a valid identifier of `kind`, masked or raw.
#[must_use]
pub fn validate(kind: DocumentKind, input: &str) -> bool {
    check(kind, input).is_ok()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(DocumentKind::PersonalTaxId, "529.982.247-25")]
    #[case(DocumentKind::PersonalTaxId, "52998224725")]
    #[case(DocumentKind::CorporateTaxId, "11.222.333/0001-81")]
    #[case(DocumentKind::DriverLicenseNumber, "100000000 91")]
    #[case(DocumentKind::PaymentCard, "4111-1111-1111-1111")]
    #[case(DocumentKind::PaymentCard, "3782 822463 10005")]
    fn test_valid(#[case] kind: DocumentKind, #[case] input: &str) {
        assert!(validate(kind, input), "{kind} {input}");
    }

    #[rstest]
    #[case(DocumentKind::PersonalTaxId, "529.982.247-26")]
    #[case(DocumentKind::CorporateTaxId, "11.222.333/0001-82")]
    #[case(DocumentKind::PaymentCard, "4000000000000001")]
    fn test_checksum_mismatch(#[case] kind: DocumentKind, #[case] input: &str) {
        let err = check(kind, input).unwrap_err();
        assert!(err.is_checksum_error(), "{err}");
    }

    #[test]
    fn test_mismatch_reports_digits() {
        let err = check(DocumentKind::PersonalTaxId, "52998224726").unwrap_err();
        assert_eq!(
            err,
            IdError::ChecksumMismatch {
                kind: DocumentKind::PersonalTaxId,
                expected: "25".to_string(),
                actual: "26".to_string(),
            }
        );
    }

    #[test]
    fn test_repeated_digits_rejected_before_checksum() {
        // 11111111111 satisfies the CNH arithmetic
        assert_eq!(
            check(DocumentKind::DriverLicenseNumber, "11111111111").unwrap_err(),
            IdError::RepeatedDigits {
                kind: DocumentKind::DriverLicenseNumber
            }
        );
        assert!(!validate(DocumentKind::PersonalTaxId, "00000000000"));
        assert!(!validate(DocumentKind::CorporateTaxId, "00000000000000"));
    }

    #[test]
    fn test_foreign_characters_rejected() {
        let err = check(DocumentKind::PersonalTaxId, "529.982.247-2a").unwrap_err();
        assert!(matches!(err, IdError::InvalidCharacter { character: 'a', .. }));
    }

    #[test]
    fn test_wrong_length() {
        let err = check(DocumentKind::PaymentCard, "4111 1111 1111").unwrap_err();
        assert!(matches!(err, IdError::InvalidLength { actual: 12, .. }));
    }
}
