//! Per-kind scheme rules and generators.
//!
//! Each submodule pairs a stateless [`Scheme`](crate::Scheme) implementation
//! with the generator that produces raw digits for that kind.

pub mod card;
pub mod certidao;
pub mod cnh;
pub mod cnpj;
pub mod cpf;

pub use card::CardScheme;
pub use certidao::CertidaoScheme;
pub use cnh::CnhScheme;
pub use cnpj::CnpjScheme;
pub use cpf::CpfScheme;

use rand::Rng;

use crate::digits::DigitBuffer;

/// Appends `count` uniformly random digits.
pub(crate) fn push_random_digits<R: Rng + ?Sized>(buf: &mut DigitBuffer, count: usize, rng: &mut R) {
    for _ in 0..count {
        buf.push(rng.random_range(0..10));
    }
}

/// Appends the scheme's check digits to a complete base.
pub(crate) fn append_check(buf: &mut DigitBuffer, scheme: &dyn crate::Scheme) {
    let check = scheme.compute_check(buf.as_slice());
    buf.extend_from_slice(check.as_slice());
}
