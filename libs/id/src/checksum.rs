//! Check-digit algorithms.
//!
//! Four families, each a pure function from base digits to check digits:
//!
//! - [`mod11_pair`]: weighted mod-11 used by CPF and CNPJ (remainder `< 2` collapses to 0)
//! - [`cnh_pair`]: the CNH variant (remainder `<= 1` collapses, second round reuses the first check)
//! - [`certidao_pair`]: civil-registry double mod-11 over cyclic weights (no collapse)
//! - [`luhn_digit`]: mod-10 Luhn used by payment cards
//!
//! The mod-11 families look alike but follow different published rules, so
//! each keeps its own reduction step.

/// CPF first-round weights (10 down to 2).
pub const CPF_WEIGHTS_1: [u8; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];

/// CPF second-round weights (11 down to 2).
pub const CPF_WEIGHTS_2: [u8; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

/// CNPJ first-round weights.
pub const CNPJ_WEIGHTS_1: [u8; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// CNPJ second-round weights.
pub const CNPJ_WEIGHTS_2: [u8; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// CNH first-round weights (2 up to 10).
pub const CNH_WEIGHTS_1: [u8; 9] = [2, 3, 4, 5, 6, 7, 8, 9, 10];

/// CNH second-round weights (3 up to 11).
pub const CNH_WEIGHTS_2: [u8; 9] = [3, 4, 5, 6, 7, 8, 9, 10, 11];

/// Number of base digits in a civil-registry certificate.
pub const CERTIDAO_BASE_LENGTH: usize = 30;

/// Certificate first-round weights: 0..=9 three times.
pub const CERTIDAO_WEIGHTS_1: [u8; CERTIDAO_BASE_LENGTH] = cyclic_weights(0);

/// Certificate second-round weights: 1..=9, 0 repeating, over base plus first check.
pub const CERTIDAO_WEIGHTS_2: [u8; CERTIDAO_BASE_LENGTH + 1] = cyclic_weights(1);

const fn cyclic_weights<const N: usize>(offset: usize) -> [u8; N] {
    let mut weights = [0u8; N];
    let mut i = 0;
    while i < N {
        weights[i] = ((i + offset) % 10) as u8;
        i += 1;
    }
    weights
}

/// Computes two weighted mod-11 check digits.
///
/// The second round runs over `base` followed by the first check digit, so
/// `second_weights` must be one element longer than `first_weights`.
///
/// # Panics
///
/// Panics if `base` is not as long as `first_weights`, or if `second_weights`
/// is not one element longer than `base`.
#[must_use]
pub fn mod11_pair(base: &[u8], first_weights: &[u8], second_weights: &[u8]) -> [u8; 2] {
    assert_eq!(
        base.len(),
        first_weights.len(),
        "base length must match first-round weights"
    );
    assert_eq!(
        base.len() + 1,
        second_weights.len(),
        "second-round weights must cover the first check digit"
    );

    let first = mod11_digit(weighted_sum(base, first_weights));
    let second = mod11_digit(
        weighted_sum(base, second_weights)
            + u32::from(first) * u32::from(second_weights[base.len()]),
    );
    [first, second]
}

fn mod11_digit(sum: u32) -> u8 {
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        (11 - remainder) as u8
    }
}

/// Computes the two CNH (driver's license) check digits over nine base digits.
///
/// First round: weights 2..=10. Second round: weights 3..=11 over the same
/// base digits, plus twice the first check digit.
///
/// # Panics
///
/// Panics if `base` is not nine digits long.
#[must_use]
pub fn cnh_pair(base: &[u8]) -> [u8; 2] {
    assert_eq!(base.len(), CNH_WEIGHTS_1.len(), "CNH base must be nine digits");

    let sum1 = weighted_sum(base, &CNH_WEIGHTS_1);
    let dv1 = sum1 % 11;
    let check1 = if dv1 <= 1 { 0 } else { 11 - dv1 };

    let sum2 = weighted_sum(base, &CNH_WEIGHTS_2) + check1 * 2;
    let dv2 = sum2 % 11;
    let check2 = if dv2 <= 1 { 0 } else { 11 - dv2 };

    [check1 as u8, check2 as u8]
}

/// Computes the two civil-registry certificate check digits over 30 base digits.
///
/// The first digit uses [`CERTIDAO_WEIGHTS_1`]; the second runs over the base
/// plus the first check digit against [`CERTIDAO_WEIGHTS_2`]. Remainders are
/// used as-is, except 10, which maps to 1.
///
/// # Panics
///
/// Panics if `base` is not [`CERTIDAO_BASE_LENGTH`] digits long.
#[must_use]
pub fn certidao_pair(base: &[u8]) -> [u8; 2] {
    assert_eq!(base.len(), CERTIDAO_BASE_LENGTH, "certificate base must be 30 digits");

    let first = certidao_digit(weighted_sum(base, &CERTIDAO_WEIGHTS_1));
    let second = certidao_digit(
        weighted_sum(base, &CERTIDAO_WEIGHTS_2)
            + u32::from(first) * u32::from(CERTIDAO_WEIGHTS_2[CERTIDAO_BASE_LENGTH]),
    );
    [first, second]
}

fn certidao_digit(sum: u32) -> u8 {
    match sum % 11 {
        10 => 1,
        remainder => remainder as u8,
    }
}

fn weighted_sum(digits: &[u8], weights: &[u8]) -> u32 {
    digits
        .iter()
        .zip(weights)
        .map(|(d, w)| u32::from(*d) * u32::from(*w))
        .sum()
}

/// Computes the Luhn check digit to append to `base`.
///
/// Walking right to left, the digit adjacent to the check position is
/// doubled first, then every second digit after it.
#[must_use]
pub fn luhn_digit(base: &[u8]) -> u8 {
    let sum = luhn_sum(base.iter().rev(), true);
    ((10 - (sum % 10)) % 10) as u8
}

/// Returns true if a complete number (check digit last) passes Luhn.
#[must_use]
pub fn luhn_valid(number: &[u8]) -> bool {
    !number.is_empty() && luhn_sum(number.iter().rev(), false) % 10 == 0
}

fn luhn_sum<'a>(rev_digits: impl Iterator<Item = &'a u8>, double_first: bool) -> u32 {
    let mut double = double_first;
    let mut sum = 0u32;
    for &d in rev_digits {
        let value = if double {
            let doubled = u32::from(d) * 2;
            if doubled > 9 {
                doubled - 9
            } else {
                doubled
            }
        } else {
            u32::from(d)
        };
        sum += value;
        double = !double;
    }
    sum
}
