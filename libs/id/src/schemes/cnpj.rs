//! Corporate tax ID (CNPJ): 8 random digits, the head-office branch `0001`,
//! and 2 mod-11 check digits.

use rand::Rng;

use crate::checksum::{mod11_pair, CNPJ_WEIGHTS_1, CNPJ_WEIGHTS_2};
use crate::digits::DigitBuffer;
use crate::kind::{DocumentKind, MaskSegment, Scheme};

use super::{append_check, push_random_digits};

/// Total CNPJ length.
pub const CNPJ_LENGTH: usize = 14;

/// Branch suffix marking the head office.
pub const HEAD_OFFICE_BRANCH: [u8; 4] = [0, 0, 0, 1];

const MASK: &[MaskSegment] = &[
    MaskSegment::new(2, "."),
    MaskSegment::new(3, "."),
    MaskSegment::new(3, "/"),
    MaskSegment::new(4, "-"),
    MaskSegment::new(2, ""),
];

const WEIGHTS: &[&[u8]] = &[&CNPJ_WEIGHTS_1, &CNPJ_WEIGHTS_2];

/// `XX.XXX.XXX/XXXX-XX`
#[derive(Debug, Clone, Copy, Default)]
pub struct CnpjScheme;

impl Scheme for CnpjScheme {
    fn kind(&self) -> DocumentKind {
        DocumentKind::CorporateTaxId
    }

    fn total_lengths(&self) -> &'static [usize] {
        &[CNPJ_LENGTH]
    }

    fn check_length(&self) -> usize {
        2
    }

    fn weight_tables(&self) -> &'static [&'static [u8]] {
        WEIGHTS
    }

    fn compute_check(&self, base: &[u8]) -> DigitBuffer {
        let mut check = DigitBuffer::new();
        check.extend_from_slice(&mod11_pair(base, &CNPJ_WEIGHTS_1, &CNPJ_WEIGHTS_2));
        check
    }

    fn mask_pattern(&self, total_length: usize) -> Option<&'static [MaskSegment]> {
        (total_length == CNPJ_LENGTH).then_some(MASK)
    }

    fn separators(&self) -> &'static [char] {
        &['.', '/', '-']
    }
}

/// Generates a raw head-office CNPJ.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> DigitBuffer {
    let mut digits = DigitBuffer::new();
    push_random_digits(&mut digits, 8, rng);
    digits.extend_from_slice(&HEAD_OFFICE_BRANCH);
    append_check(&mut digits, &CnpjScheme);
    digits
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_generate_has_branch_suffix() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let digits = generate(&mut rng);
            assert_eq!(digits.len(), CNPJ_LENGTH);
            assert_eq!(&digits.as_slice()[8..12], &HEAD_OFFICE_BRANCH);
        }
    }

    #[test]
    fn test_known_check_digits() {
        let base = DigitBuffer::parse("112223330001").unwrap();
        assert_eq!(CnpjScheme.compute_check(base.as_slice()).to_string(), "81");
    }
}
