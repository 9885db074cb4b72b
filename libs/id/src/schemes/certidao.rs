//! Civil-registry certificate registration number (certidão).
//!
//! 30 structured base digits followed by 2 check digits:
//!
//! | Field | Digits |
//! |---|---|
//! | registry office | 6 |
//! | state code (01-27) | 2 |
//! | year | 4 |
//! | book type | 1 |
//! | book number | 5 |
//! | page | 3 |
//! | term number | 5 |
//! | act type (1-9) | 1 |
//! | sequence | 3 |

use rand::Rng;
use serde::Serialize;

use crate::checksum::{certidao_pair, CERTIDAO_BASE_LENGTH, CERTIDAO_WEIGHTS_1, CERTIDAO_WEIGHTS_2};
use crate::digits::DigitBuffer;
use crate::kind::{DocumentKind, MaskSegment, Scheme};

use super::append_check;

/// Total certificate length.
pub const CERTIDAO_LENGTH: usize = CERTIDAO_BASE_LENGTH + 2;

/// How many years before the reference year a generated record may date from.
pub const YEAR_SPAN: i32 = 30;

const MASK: &[MaskSegment] = &[
    MaskSegment::new(6, " "),
    MaskSegment::new(2, " "),
    MaskSegment::new(4, " "),
    MaskSegment::new(1, " "),
    MaskSegment::new(5, " "),
    MaskSegment::new(3, " "),
    MaskSegment::new(5, " "),
    MaskSegment::new(6, ""),
];

const WEIGHTS: &[&[u8]] = &[&CERTIDAO_WEIGHTS_1, &CERTIDAO_WEIGHTS_2];

/// `XXXXXX XX XXXX X XXXXX XXX XXXXX XXXXXX`
#[derive(Debug, Clone, Copy, Default)]
pub struct CertidaoScheme;

impl Scheme for CertidaoScheme {
    fn kind(&self) -> DocumentKind {
        DocumentKind::CivilRegistryCertificate
    }

    fn total_lengths(&self) -> &'static [usize] {
        &[CERTIDAO_LENGTH]
    }

    fn check_length(&self) -> usize {
        2
    }

    fn weight_tables(&self) -> &'static [&'static [u8]] {
        WEIGHTS
    }

    fn compute_check(&self, base: &[u8]) -> DigitBuffer {
        let mut check = DigitBuffer::new();
        check.extend_from_slice(&certidao_pair(base));
        check
    }

    fn mask_pattern(&self, total_length: usize) -> Option<&'static [MaskSegment]> {
        (total_length == CERTIDAO_LENGTH).then_some(MASK)
    }

    fn rejects_repeated_digits(&self) -> bool {
        false
    }

    fn separators(&self) -> &'static [char] {
        &[' ', '.', '-']
    }
}

/// Generates a raw certificate number with each field randomized
/// independently. The year falls within [`YEAR_SPAN`] years of
/// `reference_year`.
pub fn generate<R: Rng + ?Sized>(reference_year: i32, rng: &mut R) -> DigitBuffer {
    let year = rng.random_range(reference_year - YEAR_SPAN..=reference_year);

    let mut digits = DigitBuffer::new();
    digits.push_number(rng.random_range(0..1_000_000), 6);
    digits.push_number(rng.random_range(1..=27), 2);
    digits.push_number(u64::from(year.clamp(0, 9999).unsigned_abs()), 4);
    digits.push_number(rng.random_range(1..=7), 1);
    digits.push_number(rng.random_range(1..100_000), 5);
    digits.push_number(rng.random_range(1..1_000), 3);
    digits.push_number(rng.random_range(1..100_000), 5);
    digits.push_number(rng.random_range(1..=9), 1);
    digits.push_number(rng.random_range(0..1_000), 3);
    append_check(&mut digits, &CertidaoScheme);
    digits
}

/// The structured fields of a certificate number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CertidaoFields {
    pub registry_office: u32,
    pub state_code: u8,
    pub year: u16,
    pub book_type: u8,
    pub book_number: u32,
    pub page: u16,
    pub term_number: u32,
    pub act_type: u8,
    pub sequence: u16,
}

impl CertidaoFields {
    /// Splits a certificate number into its fields.
    ///
    /// Returns `None` unless `digits` holds at least the 30 base digits.
    #[must_use]
    pub fn from_digits(digits: &DigitBuffer) -> Option<Self> {
        let d = digits.as_slice();
        if d.len() < CERTIDAO_BASE_LENGTH {
            return None;
        }
        let mut cursor = 0;
        let mut take = |width: usize| -> u32 {
            let value = d[cursor..cursor + width]
                .iter()
                .fold(0u32, |acc, digit| acc * 10 + u32::from(*digit));
            cursor += width;
            value
        };

        Some(Self {
            registry_office: take(6),
            state_code: take(2) as u8,
            year: take(4) as u16,
            book_type: take(1) as u8,
            book_number: take(5),
            page: take(3) as u16,
            term_number: take(5),
            act_type: take(1) as u8,
            sequence: take(3) as u16,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_generate_field_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let digits = generate(2026, &mut rng);
            assert_eq!(digits.len(), CERTIDAO_LENGTH);
            let fields = CertidaoFields::from_digits(&digits).unwrap();
            assert!((1..=27).contains(&fields.state_code));
            assert!((1996..=2026).contains(&fields.year));
            assert!((1..=9).contains(&fields.act_type));
            assert!((1..=7).contains(&fields.book_type));
        }
    }

    #[test]
    fn test_fields_from_known_digits() {
        let digits = DigitBuffer::parse("10453901201512345000120210000123").unwrap();
        let fields = CertidaoFields::from_digits(&digits).unwrap();
        assert_eq!(fields.registry_office, 104539);
        assert_eq!(fields.state_code, 1);
        assert_eq!(fields.year, 2015);
        assert_eq!(fields.book_type, 1);
        assert_eq!(fields.book_number, 23450);
        assert_eq!(fields.page, 1);
        assert_eq!(fields.term_number, 20210);
        assert_eq!(fields.act_type, 0);
        assert_eq!(fields.sequence, 1);
    }

    #[test]
    fn test_fields_need_base_digits() {
        let digits = DigitBuffer::parse("123").unwrap();
        assert!(CertidaoFields::from_digits(&digits).is_none());
    }
}
