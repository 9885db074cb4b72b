//! Driver's license number (CNH): 9 random digits and 2 check digits.
//!
//! Generation does not filter all-identical outputs; only validation rejects
//! them.

use rand::Rng;

use crate::checksum::{cnh_pair, CNH_WEIGHTS_1, CNH_WEIGHTS_2};
use crate::digits::DigitBuffer;
use crate::kind::{DocumentKind, MaskSegment, Scheme};

use super::{append_check, push_random_digits};

/// Total CNH length.
pub const CNH_LENGTH: usize = 11;

const MASK: &[MaskSegment] = &[
    MaskSegment::new(3, " "),
    MaskSegment::new(3, " "),
    MaskSegment::new(3, " "),
    MaskSegment::new(2, ""),
];

const WEIGHTS: &[&[u8]] = &[&CNH_WEIGHTS_1, &CNH_WEIGHTS_2];

/// `XXX XXX XXX XX`
#[derive(Debug, Clone, Copy, Default)]
pub struct CnhScheme;

impl Scheme for CnhScheme {
    fn kind(&self) -> DocumentKind {
        DocumentKind::DriverLicenseNumber
    }

    fn total_lengths(&self) -> &'static [usize] {
        &[CNH_LENGTH]
    }

    fn check_length(&self) -> usize {
        2
    }

    fn weight_tables(&self) -> &'static [&'static [u8]] {
        WEIGHTS
    }

    fn compute_check(&self, base: &[u8]) -> DigitBuffer {
        let mut check = DigitBuffer::new();
        check.extend_from_slice(&cnh_pair(base));
        check
    }

    fn mask_pattern(&self, total_length: usize) -> Option<&'static [MaskSegment]> {
        (total_length == CNH_LENGTH).then_some(MASK)
    }

    fn separators(&self) -> &'static [char] {
        &[' ']
    }
}

/// Generates a raw CNH.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> DigitBuffer {
    let mut digits = DigitBuffer::new();
    push_random_digits(&mut digits, 9, rng);
    append_check(&mut digits, &CnhScheme);
    digits
}
