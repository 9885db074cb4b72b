//! # docforge-id
//!
//! Check-digit identifier generation, masking, and validation for Brazilian
//! documents and payment cards.
//!
//! ## Design Principles
//!
//! - Every document kind is described by one stateless [`Scheme`]
//! - Checksums are pure functions over digit slices; each scheme keeps its own
//!   reduction rule
//! - Randomness is always passed in, so seeded generators give repeatable output
//! - Masking is presentation only: `unmask(mask(x)) == x`
//!
//! ## Document Kinds
//!
//! | Kind | Digits | Mask |
//! |---|---|---|
//! | CPF | 11 | `XXX.XXX.XXX-XX` |
//! | CNPJ | 14 | `XX.XXX.XXX/XXXX-XX` |
//! | CNH | 11 | `XXX XXX XXX XX` |
//! | Certidão | 32 | `XXXXXX XX XXXX X XXXXX XXX XXXXX XXXXXX` |
//! | Card | 14, 15, 16, 19 | groups of four (14 and 15 digit cards use 4-6-4 and 4-6-5) |
//!
//! ## Example
//!
//! ```
//! use docforge_id::{generate, validate, DocumentKind, GenerationOptions};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let options = GenerationOptions::default().masked(true);
//! let cpf = generate(DocumentKind::PersonalTaxId, &options, &mut rng);
//! assert!(validate(DocumentKind::PersonalTaxId, &cpf.display));
//! ```

mod batch;
pub mod checksum;
mod digits;
mod error;
mod format;
mod generate;
mod identifier;
mod kind;
mod macros;
pub mod schemes;
mod types;
mod validate;

pub use batch::{clamp_quantity, ensure_quantity, generate_many, MAX_BATCH};
pub use digits::{DigitBuffer, MAX_DIGITS};
pub use error::IdError;
pub use format::{apply_mask, mask, mask_str, parse_display, unmask, unmask_for};
pub use generate::{generate, Generated, GenerationOptions};
pub use identifier::Identifier;
pub use kind::{DocumentKind, MaskSegment, Scheme};
pub use schemes::card::{detect_brand, BrandSpec, CardBrand, CardDetails, Expiry, Prefix, BRANDS};
pub use schemes::certidao::CertidaoFields;
pub use schemes::cpf::{regions_for_digit, Region};
pub use types::*;
pub use validate::{check, validate};
