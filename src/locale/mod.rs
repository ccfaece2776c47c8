//! Locales and locale-bound datasets.
//!
//! - [`Locale`]: the supported locale identifiers
//! - [`DatasetLoader`]: read-only access to `<locale>/<name>.json` datasets
//! - [`DataProvider`]: a dataset bound to a locale, with recursive overrides
//!   and a scoped locale override that always restores the original state

mod dataset;
mod provider;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

pub use dataset::{DatasetLoader, FileDatasetLoader, InMemoryDatasetLoader};
pub use provider::{DataProvider, LocaleOverride, merge_json};

/// Locale identifier selecting which dataset a generator draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
    /// Czech.
    Cs,
    /// Danish.
    Da,
    /// German.
    De,
    /// Austrian German.
    DeAt,
    /// Swiss German.
    DeCh,
    /// Greek.
    El,
    /// English.
    #[default]
    En,
    /// Australian English.
    EnAu,
    /// Canadian English.
    EnCa,
    /// British English.
    EnGb,
    /// Spanish.
    Es,
    /// Mexican Spanish.
    EsMx,
    /// Estonian.
    Et,
    /// Farsi.
    Fa,
    /// Finnish.
    Fi,
    /// French.
    Fr,
    /// Hungarian.
    Hu,
    /// Croatian.
    Hr,
    /// Icelandic.
    Is,
    /// Italian.
    It,
    /// Japanese.
    Ja,
    /// Kazakh.
    Kk,
    /// Korean.
    Ko,
    /// Dutch.
    Nl,
    /// Belgian Dutch.
    NlBe,
    /// Norwegian.
    No,
    /// Polish.
    Pl,
    /// Portuguese.
    Pt,
    /// Brazilian Portuguese.
    PtBr,
    /// Russian.
    Ru,
    /// Slovak.
    Sk,
    /// Swedish.
    Sv,
    /// Turkish.
    Tr,
    /// Ukrainian.
    Uk,
    /// Chinese.
    Zh,
}

impl Locale {
    /// All supported locales.
    pub const ALL: [Self; 35] = [
        Self::Cs,
        Self::Da,
        Self::De,
        Self::DeAt,
        Self::DeCh,
        Self::El,
        Self::En,
        Self::EnAu,
        Self::EnCa,
        Self::EnGb,
        Self::Es,
        Self::EsMx,
        Self::Et,
        Self::Fa,
        Self::Fi,
        Self::Fr,
        Self::Hu,
        Self::Hr,
        Self::Is,
        Self::It,
        Self::Ja,
        Self::Kk,
        Self::Ko,
        Self::Nl,
        Self::NlBe,
        Self::No,
        Self::Pl,
        Self::Pt,
        Self::PtBr,
        Self::Ru,
        Self::Sk,
        Self::Sv,
        Self::Tr,
        Self::Uk,
        Self::Zh,
    ];

    /// Locale code, e.g. `pt-br`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Cs => "cs",
            Self::Da => "da",
            Self::De => "de",
            Self::DeAt => "de-at",
            Self::DeCh => "de-ch",
            Self::El => "el",
            Self::En => "en",
            Self::EnAu => "en-au",
            Self::EnCa => "en-ca",
            Self::EnGb => "en-gb",
            Self::Es => "es",
            Self::EsMx => "es-mx",
            Self::Et => "et",
            Self::Fa => "fa",
            Self::Fi => "fi",
            Self::Fr => "fr",
            Self::Hu => "hu",
            Self::Hr => "hr",
            Self::Is => "is",
            Self::It => "it",
            Self::Ja => "ja",
            Self::Kk => "kk",
            Self::Ko => "ko",
            Self::Nl => "nl",
            Self::NlBe => "nl-be",
            Self::No => "no",
            Self::Pl => "pl",
            Self::Pt => "pt",
            Self::PtBr => "pt-br",
            Self::Ru => "ru",
            Self::Sk => "sk",
            Self::Sv => "sv",
            Self::Tr => "tr",
            Self::Uk => "uk",
            Self::Zh => "zh",
        }
    }
}

/// Validate a locale string.
///
/// # Errors
///
/// Returns [`GenerationError::UnsupportedLocale`] for unrecognized strings.
pub fn validate_locale(value: &str) -> Result<Locale, GenerationError> {
    value.parse()
}

impl FromStr for Locale {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        if normalized == "default" {
            return Ok(Self::default());
        }
        Self::ALL
            .into_iter()
            .find(|locale| locale.code() == normalized)
            .ok_or_else(|| GenerationError::UnsupportedLocale(s.to_string()))
    }
}

impl TryFrom<String> for Locale {
    type Error = GenerationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.code().to_string()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
