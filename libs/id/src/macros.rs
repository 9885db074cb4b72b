//! Macros for defining typed document newtypes.

/// Macro to define a validated document type for one [`DocumentKind`](crate::DocumentKind).
///
/// This generates a newtype wrapper around [`Identifier`](crate::Identifier) with:
/// - A `KIND` constant
/// - `parse()` that accepts masked or raw input and runs full validation
/// - `raw()` / `masked()` accessors
/// - `Display` (masked) and `FromStr` implementations
/// - `Serialize` (raw digits) and validating `Deserialize` implementations
///
/// # Example
///
/// ```ignore
/// define_document!(Cpf, DocumentKind::PersonalTaxId);
///
/// let cpf: Cpf = "529.982.247-25".parse()?;
/// assert_eq!(cpf.raw(), "52998224725");
/// ```
#[macro_export]
macro_rules! define_document {
    ($name:ident, $kind:expr) => {
        /// A checksum-valid document of this kind.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name($crate::Identifier);

        impl $name {
            /// The document kind this type holds.
            pub const KIND: $crate::DocumentKind = $kind;

            /// Parses and validates masked or raw input.
            pub fn parse(s: &str) -> Result<Self, $crate::IdError> {
                $crate::check(Self::KIND, s).map(Self)
            }

            /// Wraps an identifier after re-validating it.
            pub fn from_identifier(identifier: $crate::Identifier) -> Result<Self, $crate::IdError> {
                if identifier.kind() != Self::KIND {
                    return Err($crate::IdError::unknown(
                        "document kind",
                        identifier.kind().code(),
                    ));
                }
                Self::parse(&identifier.raw())
            }

            /// Returns the underlying identifier.
            #[must_use]
            pub const fn identifier(&self) -> &$crate::Identifier {
                &self.0
            }

            /// Digits only.
            #[must_use]
            pub fn raw(&self) -> String {
                self.0.raw()
            }

            /// Display form.
            #[must_use]
            pub fn masked(&self) -> String {
                self.0.masked()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.raw())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&s).map_err(serde::de::Error::custom)
            }
        }

        impl AsRef<$crate::Identifier> for $name {
            fn as_ref(&self) -> &$crate::Identifier {
                &self.0
            }
        }

        impl From<$name> for $crate::Identifier {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}
