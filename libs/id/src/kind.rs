//! Document kinds and the scheme interface they dispatch through.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::digits::DigitBuffer;
use crate::error::IdError;
use crate::schemes::{CardScheme, CertidaoScheme, CnhScheme, CnpjScheme, CpfScheme};

/// The closed set of supported document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Brazilian individual taxpayer number (CPF).
    #[serde(rename = "cpf")]
    PersonalTaxId,
    /// Brazilian company taxpayer number (CNPJ).
    #[serde(rename = "cnpj")]
    CorporateTaxId,
    /// Brazilian driver's license number (CNH).
    #[serde(rename = "cnh")]
    DriverLicenseNumber,
    /// Civil-registry certificate registration number (certidão).
    #[serde(rename = "certidao")]
    CivilRegistryCertificate,
    /// Payment card number.
    #[serde(rename = "card")]
    PaymentCard,
}

impl DocumentKind {
    /// Every kind, in declaration order.
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::PersonalTaxId,
        DocumentKind::CorporateTaxId,
        DocumentKind::DriverLicenseNumber,
        DocumentKind::CivilRegistryCertificate,
        DocumentKind::PaymentCard,
    ];

    /// Returns every kind.
    #[must_use]
    pub fn all() -> &'static [DocumentKind] {
        &Self::ALL
    }

    /// Stable lowercase code, used for parsing and serialization.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            DocumentKind::PersonalTaxId => "cpf",
            DocumentKind::CorporateTaxId => "cnpj",
            DocumentKind::DriverLicenseNumber => "cnh",
            DocumentKind::CivilRegistryCertificate => "certidao",
            DocumentKind::PaymentCard => "card",
        }
    }

    /// Short display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            DocumentKind::PersonalTaxId => "CPF",
            DocumentKind::CorporateTaxId => "CNPJ",
            DocumentKind::DriverLicenseNumber => "CNH",
            DocumentKind::CivilRegistryCertificate => "Certidão",
            DocumentKind::PaymentCard => "Card",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            DocumentKind::PersonalTaxId => "Personal tax ID",
            DocumentKind::CorporateTaxId => "Corporate tax ID",
            DocumentKind::DriverLicenseNumber => "Driver's license number",
            DocumentKind::CivilRegistryCertificate => "Civil-registry certificate",
            DocumentKind::PaymentCard => "Payment card number",
        }
    }

    /// The scheme implementing this kind's rules.
    #[must_use]
    pub fn scheme(self) -> &'static dyn Scheme {
        match self {
            DocumentKind::PersonalTaxId => &CpfScheme,
            DocumentKind::CorporateTaxId => &CnpjScheme,
            DocumentKind::DriverLicenseNumber => &CnhScheme,
            DocumentKind::CivilRegistryCertificate => &CertidaoScheme,
            DocumentKind::PaymentCard => &CardScheme,
        }
    }

    /// Accepted total digit counts (base plus check digits).
    #[must_use]
    pub fn total_lengths(self) -> &'static [usize] {
        self.scheme().total_lengths()
    }

    /// Accepted lengths rendered for messages, e.g. `"11"` or `"14, 15, 16, 19"`.
    #[must_use]
    pub fn expected_lengths(self) -> String {
        self.total_lengths()
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DocumentKind {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "cpf" | "personaltaxid" => Ok(DocumentKind::PersonalTaxId),
            "cnpj" | "corporatetaxid" => Ok(DocumentKind::CorporateTaxId),
            "cnh" | "driverlicense" | "driverlicensenumber" => {
                Ok(DocumentKind::DriverLicenseNumber)
            }
            "certidao" | "certidão" | "certificate" | "civilregistrycertificate" => {
                Ok(DocumentKind::CivilRegistryCertificate)
            }
            "card" | "creditcard" | "paymentcard" => Ok(DocumentKind::PaymentCard),
            _ => Err(IdError::unknown("document kind", s)),
        }
    }
}

/// One group of a mask: `len` digits followed by `separator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskSegment {
    /// Number of digits in the group.
    pub len: usize,
    /// Text written after the group (empty for the final group).
    pub separator: &'static str,
}

impl MaskSegment {
    /// Creates a segment.
    #[must_use]
    pub const fn new(len: usize, separator: &'static str) -> Self {
        Self { len, separator }
    }
}

/// Structural and arithmetic rules for one document kind.
///
/// Implementations are stateless unit structs; every method depends only on
/// compile-time tables.
pub trait Scheme: Send + Sync {
    /// The kind this scheme describes.
    fn kind(&self) -> DocumentKind;

    /// Accepted total digit counts, ascending.
    fn total_lengths(&self) -> &'static [usize];

    /// Number of trailing check digits.
    fn check_length(&self) -> usize;

    /// Positional weight tables used by the checksum, if it has any.
    fn weight_tables(&self) -> &'static [&'static [u8]];

    /// Computes the check digits for `base`.
    ///
    /// # Panics
    ///
    /// Schemes with a fixed base length panic when `base` has any other
    /// length. Callers validate the length first, as [`check`](crate::check) does.
    fn compute_check(&self, base: &[u8]) -> DigitBuffer;

    /// Mask groups for a number of `total_length` digits.
    fn mask_pattern(&self, total_length: usize) -> Option<&'static [MaskSegment]>;

    /// Whether all-identical digit strings are rejected outright.
    fn rejects_repeated_digits(&self) -> bool {
        true
    }

    /// Number of base digits in a number of `total_length` digits.
    fn base_length(&self, total_length: usize) -> usize {
        total_length.saturating_sub(self.check_length())
    }

    /// Returns true if `len` is an accepted total length.
    fn accepts_length(&self, len: usize) -> bool {
        self.total_lengths().contains(&len)
    }

    /// Characters that may appear between digit groups in display input.
    fn separators(&self) -> &'static [char];
}
