//! Payment card numbers: brand prefix, random fill, one Luhn check digit.
//!
//! Expiry and CVV are generated independently of the number and carry no
//! checksum.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};

use crate::checksum::luhn_digit;
use crate::digits::DigitBuffer;
use crate::error::IdError;
use crate::kind::{DocumentKind, MaskSegment, Scheme};

use super::push_random_digits;

/// Card lengths accepted by at least one brand.
pub const CARD_LENGTHS: [usize; 4] = [14, 15, 16, 19];

const MASK_14: &[MaskSegment] = &[
    MaskSegment::new(4, " "),
    MaskSegment::new(6, " "),
    MaskSegment::new(4, ""),
];

const MASK_15: &[MaskSegment] = &[
    MaskSegment::new(4, " "),
    MaskSegment::new(6, " "),
    MaskSegment::new(5, ""),
];

const MASK_16: &[MaskSegment] = &[
    MaskSegment::new(4, " "),
    MaskSegment::new(4, " "),
    MaskSegment::new(4, " "),
    MaskSegment::new(4, ""),
];

const MASK_19: &[MaskSegment] = &[
    MaskSegment::new(4, " "),
    MaskSegment::new(4, " "),
    MaskSegment::new(4, " "),
    MaskSegment::new(4, " "),
    MaskSegment::new(3, ""),
];

/// Groups of four, except `XXXX XXXXXX XXXX` (14) and `XXXX XXXXXX XXXXX` (15).
#[derive(Debug, Clone, Copy, Default)]
pub struct CardScheme;

impl Scheme for CardScheme {
    fn kind(&self) -> DocumentKind {
        DocumentKind::PaymentCard
    }

    fn total_lengths(&self) -> &'static [usize] {
        &CARD_LENGTHS
    }

    fn check_length(&self) -> usize {
        1
    }

    fn weight_tables(&self) -> &'static [&'static [u8]] {
        &[]
    }

    fn compute_check(&self, base: &[u8]) -> DigitBuffer {
        let mut check = DigitBuffer::new();
        check.push(luhn_digit(base));
        check
    }

    fn mask_pattern(&self, total_length: usize) -> Option<&'static [MaskSegment]> {
        match total_length {
            14 => Some(MASK_14),
            15 => Some(MASK_15),
            16 => Some(MASK_16),
            19 => Some(MASK_19),
            _ => None,
        }
    }

    // Real card numbers can repeat a digit throughout.
    fn rejects_repeated_digits(&self) -> bool {
        false
    }

    fn separators(&self) -> &'static [char] {
        &[' ', '-']
    }
}

/// A leading digit pattern identifying a brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// An exact digit string.
    Literal(&'static str),
    /// Any number in `min..=max`, written with the width of `max`.
    Range(u32, u32),
}

impl Prefix {
    /// Number of digits this prefix occupies.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Prefix::Literal(s) => s.len(),
            Prefix::Range(_, max) => decimal_width(*max),
        }
    }

    /// Returns true if `digits` starts with this prefix.
    #[must_use]
    pub fn matches(&self, digits: &[u8]) -> bool {
        let width = self.width();
        if digits.len() < width {
            return false;
        }
        let head = &digits[..width];
        match self {
            Prefix::Literal(s) => s.bytes().zip(head).all(|(b, d)| b - b'0' == *d),
            Prefix::Range(min, max) => {
                let value = head
                    .iter()
                    .fold(0u32, |acc, d| acc * 10 + u32::from(*d));
                (*min..=*max).contains(&value)
            }
        }
    }

    fn push_to<R: Rng + ?Sized>(&self, digits: &mut DigitBuffer, rng: &mut R) {
        match self {
            Prefix::Literal(s) => {
                for b in s.bytes() {
                    digits.push(b - b'0');
                }
            }
            Prefix::Range(min, max) => {
                let value = rng.random_range(*min..=*max);
                digits.push_number(u64::from(value), decimal_width(*max));
            }
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::Literal(s) => f.write_str(s),
            Prefix::Range(min, max) => write!(f, "{min}-{max}"),
        }
    }
}

fn decimal_width(mut value: u32) -> usize {
    let mut width = 1;
    while value >= 10 {
        value /= 10;
        width += 1;
    }
    width
}

/// Supported card brands.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    #[default]
    Visa,
    Mastercard,
    Amex,
    Diners,
    Discover,
    Jcb,
    Elo,
    Hipercard,
    Aura,
}

/// Static rules for one brand.
#[derive(Debug, Clone, Copy)]
pub struct BrandSpec {
    pub brand: CardBrand,
    pub name: &'static str,
    pub prefixes: &'static [Prefix],
    pub lengths: &'static [usize],
    pub cvv_length: usize,
}

/// The brand table.
pub const BRANDS: &[BrandSpec] = &[
    BrandSpec {
        brand: CardBrand::Visa,
        name: "Visa",
        prefixes: &[Prefix::Literal("4")],
        lengths: &[16],
        cvv_length: 3,
    },
    BrandSpec {
        brand: CardBrand::Mastercard,
        name: "Mastercard",
        prefixes: &[Prefix::Range(51, 55), Prefix::Range(2221, 2720)],
        lengths: &[16],
        cvv_length: 3,
    },
    BrandSpec {
        brand: CardBrand::Amex,
        name: "American Express",
        prefixes: &[Prefix::Literal("34"), Prefix::Literal("37")],
        lengths: &[15],
        cvv_length: 4,
    },
    BrandSpec {
        brand: CardBrand::Diners,
        name: "Diners Club",
        prefixes: &[
            Prefix::Range(300, 305),
            Prefix::Literal("36"),
            Prefix::Literal("38"),
        ],
        lengths: &[14],
        cvv_length: 3,
    },
    BrandSpec {
        brand: CardBrand::Discover,
        name: "Discover",
        prefixes: &[
            Prefix::Literal("6011"),
            Prefix::Range(644, 649),
            Prefix::Literal("65"),
        ],
        lengths: &[16, 19],
        cvv_length: 3,
    },
    BrandSpec {
        brand: CardBrand::Jcb,
        name: "JCB",
        prefixes: &[Prefix::Range(3528, 3589)],
        lengths: &[16],
        cvv_length: 3,
    },
    BrandSpec {
        brand: CardBrand::Elo,
        name: "Elo",
        prefixes: &[
            Prefix::Literal("401178"),
            Prefix::Literal("401179"),
            Prefix::Literal("431274"),
            Prefix::Literal("438935"),
            Prefix::Literal("451416"),
            Prefix::Literal("457393"),
            Prefix::Literal("504175"),
            Prefix::Range(506699, 506778),
            Prefix::Range(509000, 509999),
            Prefix::Literal("627780"),
            Prefix::Literal("636297"),
            Prefix::Literal("636368"),
            Prefix::Range(650031, 650033),
            Prefix::Range(650035, 650051),
            Prefix::Range(650405, 650439),
            Prefix::Range(650485, 650538),
            Prefix::Range(650541, 650598),
            Prefix::Range(650700, 650718),
            Prefix::Range(650720, 650727),
            Prefix::Range(650901, 650920),
            Prefix::Range(651652, 651679),
            Prefix::Range(655000, 655019),
            Prefix::Range(655021, 655058),
        ],
        lengths: &[16],
        cvv_length: 3,
    },
    BrandSpec {
        brand: CardBrand::Hipercard,
        name: "Hipercard",
        prefixes: &[Prefix::Literal("606282"), Prefix::Literal("3841")],
        lengths: &[16, 19],
        cvv_length: 3,
    },
    BrandSpec {
        brand: CardBrand::Aura,
        name: "Aura",
        prefixes: &[Prefix::Literal("50")],
        lengths: &[16],
        cvv_length: 3,
    },
];

impl CardBrand {
    /// Every brand, in table order.
    pub fn all() -> impl Iterator<Item = CardBrand> {
        BRANDS.iter().map(|spec| spec.brand)
    }

    /// This brand's table entry.
    #[must_use]
    pub fn spec(self) -> &'static BrandSpec {
        // BRANDS lists every variant in declaration order.
        &BRANDS[self as usize]
    }

    /// Lowercase code used for parsing and serialization.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            CardBrand::Visa => "visa",
            CardBrand::Mastercard => "mastercard",
            CardBrand::Amex => "amex",
            CardBrand::Diners => "diners",
            CardBrand::Discover => "discover",
            CardBrand::Jcb => "jcb",
            CardBrand::Elo => "elo",
            CardBrand::Hipercard => "hipercard",
            CardBrand::Aura => "aura",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

impl FromStr for CardBrand {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        let brand = match normalized.as_str() {
            "visa" => CardBrand::Visa,
            "mastercard" | "master" | "mc" => CardBrand::Mastercard,
            "amex" | "americanexpress" => CardBrand::Amex,
            "diners" | "dinersclub" => CardBrand::Diners,
            "discover" => CardBrand::Discover,
            "jcb" => CardBrand::Jcb,
            "elo" => CardBrand::Elo,
            "hipercard" | "hiper" => CardBrand::Hipercard,
            "aura" => CardBrand::Aura,
            _ => return Err(IdError::unknown("card brand", s)),
        };
        Ok(brand)
    }
}

/// Identifies the brand of a complete card number.
///
/// Among brands allowing this length, the longest matching prefix wins;
/// ties go to the earlier table entry.
#[must_use]
pub fn detect_brand(digits: &[u8]) -> Option<CardBrand> {
    let mut best: Option<(usize, CardBrand)> = None;
    for spec in BRANDS {
        if !spec.lengths.contains(&digits.len()) {
            continue;
        }
        for prefix in spec.prefixes {
            let width = prefix.width();
            if prefix.matches(digits) && best.is_none_or(|(w, _)| width > w) {
                best = Some((width, spec.brand));
            }
        }
    }
    best.map(|(_, brand)| brand)
}

/// Generates a raw card number for `brand`.
pub fn generate<R: Rng + ?Sized>(brand: CardBrand, rng: &mut R) -> DigitBuffer {
    let spec = brand.spec();
    let length = spec.lengths[rng.random_range(0..spec.lengths.len())];
    let prefix = spec.prefixes[rng.random_range(0..spec.prefixes.len())];

    let mut digits = DigitBuffer::new();
    prefix.push_to(&mut digits, rng);
    let fill = (length - 1).saturating_sub(digits.len());
    push_random_digits(&mut digits, fill, rng);
    let check = luhn_digit(digits.as_slice());
    digits.push(check);
    digits
}

/// Generates a CVV of `len` random digits.
pub fn generate_cvv<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    let mut digits = DigitBuffer::new();
    push_random_digits(&mut digits, len, rng);
    digits.to_string()
}

/// Card expiry, rendered `MM/YY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Expiry {
    month: u8,
    year: i32,
}

impl Expiry {
    /// Creates an expiry, or `None` if the month is not 1-12.
    #[must_use]
    pub fn new(month: u8, year: i32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { month, year })
    }

    /// Random month, year 1 to 5 years after `reference_year`.
    pub fn generate<R: Rng + ?Sized>(reference_year: i32, rng: &mut R) -> Self {
        Self {
            month: rng.random_range(1..=12),
            year: reference_year + rng.random_range(1..=5),
        }
    }

    /// Month, 1-12.
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Four-digit year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year.rem_euclid(100))
    }
}

impl Serialize for Expiry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Brand, expiry, and CVV accompanying a generated card number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardDetails {
    pub brand: CardBrand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<Expiry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvv: Option<String>,
}
