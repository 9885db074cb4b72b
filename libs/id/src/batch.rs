//! Repeated generation with a capped batch size.

use rand::Rng;

use crate::error::IdError;
use crate::generate::{generate, Generated, GenerationOptions};
use crate::kind::DocumentKind;

/// Largest batch [`generate_many`] will produce.
pub const MAX_BATCH: usize = 50;

/// Clamps a requested quantity into `1..=MAX_BATCH`.
#[must_use]
pub fn clamp_quantity(requested: usize) -> usize {
    requested.clamp(1, MAX_BATCH)
}

/// Rejects a quantity outside `1..=MAX_BATCH` instead of clamping it.
pub fn ensure_quantity(requested: usize) -> Result<usize, IdError> {
    if (1..=MAX_BATCH).contains(&requested) {
        Ok(requested)
    } else {
        Err(IdError::QuantityOutOfRange {
            requested,
            max: MAX_BATCH,
        })
    }
}

/// Generates `quantity` identifiers, clamped into `1..=MAX_BATCH`, in
/// generation order.
pub fn generate_many<R: Rng + ?Sized>(
    kind: DocumentKind,
    options: &GenerationOptions,
    quantity: usize,
    rng: &mut R,
) -> Vec<Generated> {
    let count = clamp_quantity(quantity);
    if count != quantity {
        tracing::debug!(requested = quantity, count, "clamped batch quantity");
    }

    let batch: Vec<Generated> = (0..count).map(|_| generate(kind, options, rng)).collect();
    tracing::debug!(kind = kind.code(), count = batch.len(), "generated batch");
    batch
}
