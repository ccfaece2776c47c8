//! Enumerated generator arguments.
//!
//! Every enum implements [`Enumerable`], which gives case-insensitive parsing
//! that fails with [`GenerationError::NonEnumerable`] and lets the randomness
//! core pick a variant when the caller leaves the argument unset.

use std::fmt;
use std::str::FromStr;

use crate::error::GenerationError;

/// An argument enumeration with a fixed, ordered set of variants.
pub trait Enumerable: Copy + PartialEq + 'static {
    /// Name used in error messages.
    const NAME: &'static str;

    /// All variants, in declaration order.
    const VARIANTS: &'static [Self];

    /// Canonical token of the variant.
    fn as_str(&self) -> &'static str;

    /// Parse a token, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::NonEnumerable`] naming the enum when the
    /// token matches no variant.
    fn parse_token(value: &str) -> Result<Self, GenerationError> {
        let needle = value.trim();
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| GenerationError::NonEnumerable {
                enum_name: Self::NAME,
                value: value.to_string(),
                expected: Self::VARIANTS
                    .iter()
                    .map(Self::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

macro_rules! enumerable {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl Enumerable for $name {
            const NAME: &'static str = $label;
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = GenerationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_token(s)
            }
        }
    };
}

enumerable! {
    /// Gender used by gendered identifier layouts and names.
    Gender, "Gender" {
        /// Male.
        Male => "male",
        /// Female.
        Female => "female",
    }
}

enumerable! {
    /// Payment card issuing network.
    CardType, "CardType" {
        /// Visa, 16 digits.
        Visa => "visa",
        /// MasterCard, 16 digits.
        MasterCard => "master_card",
        /// American Express, 15 digits.
        AmericanExpress => "american_express",
    }
}

impl CardType {
    /// Human readable network name.
    #[must_use]
    pub const fn network_name(self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::MasterCard => "MasterCard",
            Self::AmericanExpress => "American Express",
        }
    }
}

enumerable! {
    /// ISBN flavour.
    IsbnFormat, "IsbnFormat" {
        /// Ten characters, mod 11 check.
        Isbn10 => "isbn-10",
        /// Thirteen digits, GS1 check.
        Isbn13 => "isbn-13",
    }
}

enumerable! {
    /// EAN barcode length.
    EanFormat, "EanFormat" {
        /// Eight digits.
        Ean8 => "ean-8",
        /// Thirteen digits.
        Ean13 => "ean-13",
    }
}

enumerable! {
    /// Port number ranges.
    PortRange, "PortRange" {
        /// 1..=65535.
        All => "all",
        /// 1..=1023.
        WellKnown => "well_known",
        /// 1024..=49151.
        Registered => "registered",
        /// 49152..=65535.
        Ephemeral => "ephemeral",
    }
}

enumerable! {
    /// Timestamp rendering.
    TimestampFormat, "TimestampFormat" {
        /// Seconds since the Unix epoch.
        Posix => "posix",
        /// `YYYY-MM-DDTHH:MM:SS`.
        Rfc3339 => "rfc_3339",
        /// `YYYY-MM-DDTHH:MM:SS.ffffff`.
        Iso8601 => "iso_8601",
    }
}

impl PortRange {
    /// Inclusive bounds of the range.
    #[must_use]
    pub const fn bounds(self) -> (u16, u16) {
        match self {
            Self::All => (1, 65535),
            Self::WellKnown => (1, 1023),
            Self::Registered => (1024, 49151),
            Self::Ephemeral => (49152, 65535),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("FEMALE".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(" isbn-10 ".parse::<IsbnFormat>().unwrap(), IsbnFormat::Isbn10);
    }

    #[test]
    fn test_parse_names_the_enum() {
        let err = "discover".parse::<CardType>().unwrap_err();
        match err {
            GenerationError::NonEnumerable {
                enum_name,
                value,
                expected,
            } => {
                assert_eq!(enum_name, "CardType");
                assert_eq!(value, "discover");
                assert_eq!(expected, "visa, master_card, american_express");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_port_range_bounds() {
        assert_eq!(PortRange::WellKnown.bounds(), (1, 1023));
        assert_eq!(PortRange::Ephemeral.bounds(), (49152, 65535));
        assert_eq!(PortRange::VARIANTS.len(), 4);
    }
}
