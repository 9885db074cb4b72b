//! A digit buffer tagged with its document kind.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::digits::DigitBuffer;
use crate::error::IdError;
use crate::format::{apply_mask, ensure_length, unmask};
use crate::kind::DocumentKind;

/// A raw identifier whose length is known to fit its kind.
///
/// Construction through [`Identifier::parse`] checks length only; use
/// [`crate::check`] for full checksum validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier {
    kind: DocumentKind,
    digits: DigitBuffer,
}

impl Identifier {
    /// Pairs a kind with digits the caller has already length-checked.
    pub(crate) fn from_parts(kind: DocumentKind, digits: DigitBuffer) -> Self {
        debug_assert!(kind.scheme().accepts_length(digits.len()));
        Self { kind, digits }
    }

    /// Unmasks `input` and checks its length against `kind`.
    pub fn parse(kind: DocumentKind, input: &str) -> Result<Self, IdError> {
        let digits = unmask(input)?;
        ensure_length(kind, &digits)?;
        Ok(Self { kind, digits })
    }

    #[must_use]
    pub const fn kind(&self) -> DocumentKind {
        self.kind
    }

    #[must_use]
    pub const fn digits(&self) -> &DigitBuffer {
        &self.digits
    }

    /// Digits only, e.g. `52998224725`.
    #[must_use]
    pub fn raw(&self) -> String {
        self.digits.to_string()
    }

    /// Display form, e.g. `529.982.247-25`.
    #[must_use]
    pub fn masked(&self) -> String {
        match self.kind.scheme().mask_pattern(self.digits.len()) {
            Some(pattern) => apply_mask(pattern, self.digits.as_slice()),
            None => self.raw(),
        }
    }

    /// [`masked`](Self::masked) or [`raw`](Self::raw).
    #[must_use]
    pub fn render(&self, masked: bool) -> String {
        if masked {
            self.masked()
        } else {
            self.raw()
        }
    }

    /// Digits before the check digits.
    #[must_use]
    pub fn base(&self) -> &[u8] {
        let base_len = self.kind.scheme().base_length(self.digits.len());
        self.digits.split(base_len).0
    }

    /// Trailing check digits.
    #[must_use]
    pub fn check_digits(&self) -> &[u8] {
        let base_len = self.kind.scheme().base_length(self.digits.len());
        self.digits.split(base_len).1
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Identifier", 3)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("value", &self.raw())?;
        state.serialize_field("formatted", &self.masked())?;
        state.end()
    }
}
