//! Personal tax ID (CPF): 9 base digits, 2 mod-11 check digits.
//!
//! The ninth base digit encodes the fiscal region that issued the number.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::checksum::{mod11_pair, CPF_WEIGHTS_1, CPF_WEIGHTS_2};
use crate::digits::DigitBuffer;
use crate::error::IdError;
use crate::kind::{DocumentKind, MaskSegment, Scheme};

use super::{append_check, push_random_digits};

/// Total CPF length.
pub const CPF_LENGTH: usize = 11;

const MASK: &[MaskSegment] = &[
    MaskSegment::new(3, "."),
    MaskSegment::new(3, "."),
    MaskSegment::new(3, "-"),
    MaskSegment::new(2, ""),
];

const WEIGHTS: &[&[u8]] = &[&CPF_WEIGHTS_1, &CPF_WEIGHTS_2];

/// `XXX.XXX.XXX-XX`
#[derive(Debug, Clone, Copy, Default)]
pub struct CpfScheme;

impl Scheme for CpfScheme {
    fn kind(&self) -> DocumentKind {
        DocumentKind::PersonalTaxId
    }

    fn total_lengths(&self) -> &'static [usize] {
        &[CPF_LENGTH]
    }

    fn check_length(&self) -> usize {
        2
    }

    fn weight_tables(&self) -> &'static [&'static [u8]] {
        WEIGHTS
    }

    fn compute_check(&self, base: &[u8]) -> DigitBuffer {
        let mut check = DigitBuffer::new();
        check.extend_from_slice(&mod11_pair(base, &CPF_WEIGHTS_1, &CPF_WEIGHTS_2));
        check
    }

    fn mask_pattern(&self, total_length: usize) -> Option<&'static [MaskSegment]> {
        (total_length == CPF_LENGTH).then_some(MASK)
    }

    fn separators(&self) -> &'static [char] {
        &['.', '-']
    }
}

/// Generates a raw CPF.
///
/// With a region, the ninth digit comes from the fiscal-region table;
/// otherwise it is random.
pub fn generate<R: Rng + ?Sized>(region: Option<Region>, rng: &mut R) -> DigitBuffer {
    let mut digits = DigitBuffer::new();
    push_random_digits(&mut digits, 8, rng);
    match region {
        Some(region) => digits.push(region.fiscal_digit()),
        None => push_random_digits(&mut digits, 1, rng),
    }
    append_check(&mut digits, &CpfScheme);
    digits
}

/// Brazilian federative units, keyed by their two-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Ac,
    Al,
    Ap,
    Am,
    Ba,
    Ce,
    Df,
    Es,
    Go,
    Ma,
    Mt,
    Ms,
    Mg,
    Pa,
    Pb,
    Pr,
    Pe,
    Pi,
    Rj,
    Rn,
    Rs,
    Ro,
    Rr,
    Sc,
    Sp,
    Se,
    To,
}

impl Region {
    /// All 27 units.
    pub const ALL: [Region; 27] = [
        Region::Ac,
        Region::Al,
        Region::Ap,
        Region::Am,
        Region::Ba,
        Region::Ce,
        Region::Df,
        Region::Es,
        Region::Go,
        Region::Ma,
        Region::Mt,
        Region::Ms,
        Region::Mg,
        Region::Pa,
        Region::Pb,
        Region::Pr,
        Region::Pe,
        Region::Pi,
        Region::Rj,
        Region::Rn,
        Region::Rs,
        Region::Ro,
        Region::Rr,
        Region::Sc,
        Region::Sp,
        Region::Se,
        Region::To,
    ];

    /// Two-letter code, e.g. `"SP"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Region::Ac => "AC",
            Region::Al => "AL",
            Region::Ap => "AP",
            Region::Am => "AM",
            Region::Ba => "BA",
            Region::Ce => "CE",
            Region::Df => "DF",
            Region::Es => "ES",
            Region::Go => "GO",
            Region::Ma => "MA",
            Region::Mt => "MT",
            Region::Ms => "MS",
            Region::Mg => "MG",
            Region::Pa => "PA",
            Region::Pb => "PB",
            Region::Pr => "PR",
            Region::Pe => "PE",
            Region::Pi => "PI",
            Region::Rj => "RJ",
            Region::Rn => "RN",
            Region::Rs => "RS",
            Region::Ro => "RO",
            Region::Rr => "RR",
            Region::Sc => "SC",
            Region::Sp => "SP",
            Region::Se => "SE",
            Region::To => "TO",
        }
    }

    /// The CPF ninth digit assigned to this unit's fiscal region.
    #[must_use]
    pub const fn fiscal_digit(self) -> u8 {
        match self {
            Region::Rs => 0,
            Region::Df | Region::Go | Region::Ms | Region::Mt | Region::To => 1,
            Region::Ac | Region::Am | Region::Ap | Region::Pa | Region::Ro | Region::Rr => 2,
            Region::Ce | Region::Ma | Region::Pi => 3,
            Region::Al | Region::Pb | Region::Pe | Region::Rn => 4,
            Region::Ba | Region::Se => 5,
            Region::Mg => 6,
            Region::Es | Region::Rj => 7,
            Region::Sp => 8,
            Region::Pr | Region::Sc => 9,
        }
    }
}

/// Units whose fiscal region uses `digit`, in table order.
#[must_use]
pub fn regions_for_digit(digit: u8) -> Vec<Region> {
    Region::ALL
        .iter()
        .copied()
        .filter(|r| r.fiscal_digit() == digit)
        .collect()
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| IdError::unknown("region", s))
    }
}
