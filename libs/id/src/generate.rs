//! Single-identifier generation.

use chrono::Datelike;
use rand::Rng;
use serde::Serialize;

use crate::error::IdError;
use crate::identifier::Identifier;
use crate::kind::DocumentKind;
use crate::schemes::card::{self, CardBrand, CardDetails, Expiry};
use crate::schemes::cpf::{self, Region};
use crate::schemes::{certidao, cnh, cnpj};

/// Per-call generation options.
///
/// Options that do not apply to the requested kind are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Render [`Generated::display`] masked.
    pub masked: bool,
    /// Fiscal region for personal tax IDs.
    pub region: Option<Region>,
    /// Card brand; [`CardBrand::default`] when unset.
    pub brand: Option<CardBrand>,
    pub include_expiry: bool,
    pub include_cvv: bool,
    /// Year that certificate and expiry dates are relative to. Defaults to
    /// the current UTC year.
    pub reference_year: Option<i32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            masked: false,
            region: None,
            brand: None,
            include_expiry: true,
            include_cvv: true,
            reference_year: None,
        }
    }
}

impl GenerationOptions {
    #[must_use]
    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Sets the region from its two-letter code.
    pub fn with_region_code(self, code: &str) -> Result<Self, IdError> {
        Ok(self.with_region(code.parse()?))
    }

    #[must_use]
    pub fn with_brand(mut self, brand: CardBrand) -> Self {
        self.brand = Some(brand);
        self
    }

    /// Sets the brand from its name.
    pub fn with_brand_name(self, name: &str) -> Result<Self, IdError> {
        Ok(self.with_brand(name.parse()?))
    }

    #[must_use]
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// The reference year in effect.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.reference_year
            .unwrap_or_else(|| chrono::Utc::now().year())
    }
}

/// One generated identifier with its display string and card extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generated {
    #[serde(flatten)]
    pub identifier: Identifier,
    /// Masked or raw, following [`GenerationOptions::masked`].
    pub display: String,
    #[serde(flatten)]
    pub card: Option<CardDetails>,
}

/// Generates one identifier of `kind`.
pub fn generate<R: Rng + ?Sized>(
    kind: DocumentKind,
    options: &GenerationOptions,
    rng: &mut R,
) -> Generated {
    let mut card_details = None;
    let digits = match kind {
        DocumentKind::PersonalTaxId => cpf::generate(options.region, rng),
        DocumentKind::CorporateTaxId => cnpj::generate(rng),
        DocumentKind::DriverLicenseNumber => cnh::generate(rng),
        DocumentKind::CivilRegistryCertificate => certidao::generate(options.year(), rng),
        DocumentKind::PaymentCard => {
            let brand = options.brand.unwrap_or_default();
            let digits = card::generate(brand, rng);
            let expiry = options
                .include_expiry
                .then(|| Expiry::generate(options.year(), rng));
            let cvv = options
                .include_cvv
                .then(|| card::generate_cvv(brand.spec().cvv_length, rng));
            card_details = Some(CardDetails { brand, expiry, cvv });
            digits
        }
    };

    let identifier = Identifier::from_parts(kind, digits);
    tracing::trace!(kind = kind.code(), value = %identifier.raw(), "generated identifier");

    Generated {
        display: identifier.render(options.masked),
        identifier,
        card: card_details,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::validate::validate;

    #[test]
    fn test_generate_every_kind_validates() {
        let mut rng = StdRng::seed_from_u64(2024);
        let options = GenerationOptions::default().masked(true);
        for kind in DocumentKind::all() {
            let generated = generate(*kind, &options, &mut rng);
            assert_eq!(generated.identifier.kind(), *kind);
            assert_eq!(generated.display, generated.identifier.masked());
            assert!(validate(*kind, &generated.display), "{kind} {}", generated.display);
        }
    }

    #[test]
    fn test_card_extras_follow_options() {
        let mut rng = StdRng::seed_from_u64(8);
        let options = GenerationOptions {
            include_cvv: false,
            ..GenerationOptions::default()
        }
        .with_brand(CardBrand::Amex)
        .with_reference_year(2026);

        let generated = generate(DocumentKind::PaymentCard, &options, &mut rng);
        let card = generated.card.unwrap();
        assert_eq!(card.brand, CardBrand::Amex);
        assert!(card.cvv.is_none());
        let expiry = card.expiry.unwrap();
        assert!((2027..=2031).contains(&expiry.year()));
        assert_eq!(generated.identifier.digits().len(), 15);
    }

    #[test]
    fn test_non_card_has_no_extras() {
        let mut rng = StdRng::seed_from_u64(8);
        let generated = generate(
            DocumentKind::CorporateTaxId,
            &GenerationOptions::default(),
            &mut rng,
        );
        assert!(generated.card.is_none());
        assert_eq!(generated.display, generated.identifier.raw());
    }

    #[test]
    fn test_option_builders_reject_unknown_names() {
        assert!(GenerationOptions::default().with_region_code("ZZ").is_err());
        assert!(GenerationOptions::default().with_brand_name("unionpay").is_err());
        let options = GenerationOptions::default()
            .with_region_code("sp")
            .unwrap()
            .with_brand_name("elo")
            .unwrap();
        assert_eq!(options.region, Some(Region::Sp));
        assert_eq!(options.brand, Some(CardBrand::Elo));
    }

    #[test]
    fn test_generated_json_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        let options = GenerationOptions::default()
            .with_brand(CardBrand::Visa)
            .with_reference_year(2026);
        let generated = generate(DocumentKind::PaymentCard, &options, &mut rng);
        let json = serde_json::to_value(&generated).unwrap();
        assert_eq!(json["kind"], "card");
        assert_eq!(json["brand"], "visa");
        assert_eq!(json["display"], json["value"]);
        assert_eq!(json["cvv"].as_str().unwrap().len(), 3);
        assert_eq!(json["expiry"].as_str().unwrap().len(), 5);
    }
}
