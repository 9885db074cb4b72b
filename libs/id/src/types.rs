//! Typed document definitions, one per document kind.
//!
//! Each type holds only checksum-valid values: parsing runs full validation
//! and the generators never return a value the validator would reject.

use rand::Rng;

use crate::define_document;
use crate::digits::DigitBuffer;
use crate::identifier::Identifier;
use crate::kind::{DocumentKind, Scheme};
use crate::schemes::card::{self, detect_brand, CardBrand};
use crate::schemes::certidao::{self, CertidaoFields};
use crate::schemes::cpf::{self, regions_for_digit, Region};
use crate::schemes::{append_check, cnh, cnpj};

define_document!(Cpf, DocumentKind::PersonalTaxId);
define_document!(Cnpj, DocumentKind::CorporateTaxId);
define_document!(Cnh, DocumentKind::DriverLicenseNumber);
define_document!(Certidao, DocumentKind::CivilRegistryCertificate);
define_document!(CardNumber, DocumentKind::PaymentCard);

/// Draws allowed before [`draw_valid`] stops asking the generator.
const MAX_DRAWS: usize = 8;

/// Draws until the output passes the repeated-digit guard.
///
/// After [`MAX_DRAWS`] uniform draws the first base digit is bumped and the
/// check digits recomputed, so a constant RNG still terminates.
fn draw_valid<R, F>(kind: DocumentKind, rng: &mut R, mut draw: F) -> Identifier
where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> DigitBuffer,
{
    let scheme = kind.scheme();
    if !scheme.rejects_repeated_digits() {
        return Identifier::from_parts(kind, draw(rng));
    }

    let mut digits = draw(rng);
    for _ in 1..MAX_DRAWS {
        if !digits.is_uniform() {
            return Identifier::from_parts(kind, digits);
        }
        digits = draw(rng);
    }
    if digits.is_uniform() {
        digits = bump_first_digit(&digits, scheme);
    }
    Identifier::from_parts(kind, digits)
}

/// Replaces the first base digit with its successor and recomputes the checks.
fn bump_first_digit(digits: &DigitBuffer, scheme: &dyn Scheme) -> DigitBuffer {
    let (base, _) = digits.split(scheme.base_length(digits.len()));
    let mut bumped = DigitBuffer::new();
    if let Some((first, rest)) = base.split_first() {
        bumped.push((first + 1) % 10);
        bumped.extend_from_slice(rest);
    }
    append_check(&mut bumped, scheme);
    bumped
}

impl Cpf {
    /// Generates a CPF, optionally tied to a fiscal region.
    pub fn generate<R: Rng + ?Sized>(region: Option<Region>, rng: &mut R) -> Self {
        Self(draw_valid(Self::KIND, rng, |rng| cpf::generate(region, rng)))
    }

    /// The units sharing the fiscal region encoded in the ninth digit.
    #[must_use]
    pub fn fiscal_regions(&self) -> Vec<Region> {
        regions_for_digit(self.0.base()[8])
    }
}

impl Cnpj {
    /// Generates a head-office CNPJ.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(draw_valid(Self::KIND, rng, cnpj::generate))
    }

    /// Returns true if the branch digits are `0001`.
    #[must_use]
    pub fn is_head_office(&self) -> bool {
        self.0.base()[8..12] == cnpj::HEAD_OFFICE_BRANCH
    }
}

impl Cnh {
    /// Generates a CNH.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(draw_valid(Self::KIND, rng, cnh::generate))
    }
}

impl Certidao {
    /// Generates a certificate number dated within the years before `reference_year`.
    pub fn generate<R: Rng + ?Sized>(reference_year: i32, rng: &mut R) -> Self {
        Self(draw_valid(Self::KIND, rng, |rng| {
            certidao::generate(reference_year, rng)
        }))
    }

    /// The structured fields of the base digits.
    #[must_use]
    pub fn fields(&self) -> Option<CertidaoFields> {
        CertidaoFields::from_digits(self.0.digits())
    }
}

impl CardNumber {
    /// Generates a card number of `brand`.
    pub fn generate<R: Rng + ?Sized>(brand: CardBrand, rng: &mut R) -> Self {
        Self(draw_valid(Self::KIND, rng, |rng| card::generate(brand, rng)))
    }

    /// The brand whose prefix table matches this number, if any.
    #[must_use]
    pub fn brand(&self) -> Option<CardBrand> {
        detect_brand(self.0.digits().as_slice())
    }
}
