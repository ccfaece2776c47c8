//! Personal data backed by the `person` locale dataset.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::{Enumerable, Gender};
use crate::error::{GenResult, GenerationError};
use crate::locale::{DataProvider, DatasetLoader, Locale};
use crate::random::{DIGITS, RandomSource};
use crate::service::datetime;

const ASCII_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const PASSWORD_CHARS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

const CALLING_CODES: [&str; 12] = [
    "+1", "+7", "+31", "+33", "+34", "+39", "+44", "+45", "+48", "+49", "+55", "+86",
];

const EMAIL_DOMAINS: [&str; 8] = [
    "example.com",
    "example.org",
    "mail.test",
    "inbox.test",
    "post.test",
    "gmail.test",
    "yahoo.test",
    "outlook.test",
];

const USERNAME_WORDS: [&str; 16] = [
    "amber", "bishop", "cobalt", "delta", "ember", "falcon", "granite", "harbor", "indigo",
    "juniper", "kestrel", "lumen", "marble", "nimbus", "orchid", "quartz",
];

const BLOOD_GROUPS: [&str; 8] = ["O+", "A+", "B+", "AB+", "O-", "A-", "B-", "AB-"];

/// Person generator bound to the `person` dataset of a locale.
#[derive(Clone)]
pub struct Person {
    provider: DataProvider,
}

impl Person {
    /// Dataset name.
    pub const DATASET: &'static str = "person";

    /// Load the `person` dataset for `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnsupportedLocale`] if the locale has no
    /// `person` dataset.
    pub fn new(locale: Locale, loader: Arc<dyn DatasetLoader>) -> GenResult<Self> {
        Ok(Self {
            provider: DataProvider::new(Self::DATASET, locale, loader)?,
        })
    }

    /// Current locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.provider.locale()
    }

    /// Underlying provider.
    #[must_use]
    pub const fn provider(&self) -> &DataProvider {
        &self.provider
    }

    /// Underlying provider, for dataset and locale overrides.
    pub const fn provider_mut(&mut self) -> &mut DataProvider {
        &mut self.provider
    }

    /// Strings of the list at `keys`.
    fn list(&self, keys: &[&str]) -> GenResult<Vec<&str>> {
        self.provider
            .extract(keys)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .ok_or_else(|| {
                GenerationError::Dataset(format!(
                    "'{}' missing from {}/{}",
                    keys.join("."),
                    self.locale(),
                    Self::DATASET
                ))
            })
    }

    /// A list that is either flat or split by gender.
    fn gendered_list(&self, key: &str, gender: Gender) -> GenResult<Vec<&str>> {
        match self.provider.extract(&[key]) {
            Some(Value::Object(_)) => self.list(&[key, gender.as_str()]),
            _ => self.list(&[key]),
        }
    }

    fn pick(rng: &mut RandomSource, items: &[&str]) -> GenResult<String> {
        rng.choice(items).map(|item| (*item).to_string())
    }

    /// Random first name.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Dataset`] if the dataset has no names, or
    /// [`GenerationError::EmptyChoice`] if the list is empty.
    pub fn name(&self, rng: &mut RandomSource, gender: Option<Gender>) -> GenResult<String> {
        let gender = rng.variant_or_random(gender);
        Self::pick(rng, &self.list(&["names", gender.as_str()])?)
    }

    /// Random surname; gendered where the locale distinguishes them.
    ///
    /// # Errors
    ///
    /// See [`name`](Self::name).
    pub fn surname(&self, rng: &mut RandomSource, gender: Option<Gender>) -> GenResult<String> {
        let gender = rng.variant_or_random(gender);
        Self::pick(rng, &self.gendered_list("surnames", gender)?)
    }

    /// First name and surname of the same gender, surname first when
    /// `reverse` is set.
    ///
    /// # Errors
    ///
    /// See [`name`](Self::name).
    pub fn full_name(
        &self,
        rng: &mut RandomSource,
        gender: Option<Gender>,
        reverse: bool,
    ) -> GenResult<String> {
        let gender = Some(rng.variant_or_random(gender));
        let name = self.name(rng, gender)?;
        let surname = self.surname(rng, gender)?;
        Ok(if reverse {
            format!("{surname} {name}")
        } else {
            format!("{name} {surname}")
        })
    }

    /// Localized gender label.
    ///
    /// # Errors
    ///
    /// See [`name`](Self::name).
    pub fn gender(&self, rng: &mut RandomSource) -> GenResult<String> {
        Self::pick(rng, &self.list(&["gender"])?)
    }

    /// Random occupation.
    ///
    /// # Errors
    ///
    /// See [`name`](Self::name).
    pub fn occupation(&self, rng: &mut RandomSource) -> GenResult<String> {
        Self::pick(rng, &self.list(&["occupation"])?)
    }

    /// Random nationality; gendered where the locale distinguishes them.
    ///
    /// # Errors
    ///
    /// See [`name`](Self::name).
    pub fn nationality(&self, rng: &mut RandomSource, gender: Option<Gender>) -> GenResult<String> {
        let gender = rng.variant_or_random(gender);
        Self::pick(rng, &self.gendered_list("nationality", gender)?)
    }

    /// Random birth date with a year in `[min_year, max_year]`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] for an empty range.
    pub fn birthdate(
        rng: &mut RandomSource,
        min_year: i32,
        max_year: i32,
    ) -> GenResult<NaiveDate> {
        datetime::date(rng, min_year, max_year)
    }

    /// Height in metres with two decimals, e.g. `1.85`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] if `minimum > maximum`.
    pub fn height(rng: &mut RandomSource, minimum: f64, maximum: f64) -> GenResult<String> {
        if minimum > maximum {
            return Err(GenerationError::InvalidArgument(format!(
                "height range {minimum} > {maximum}"
            )));
        }
        Ok(format!("{:.2}", rng.uniform15(minimum, maximum)))
    }

    /// Weight in kilograms.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] if `minimum > maximum`.
    pub fn weight(rng: &mut RandomSource, minimum: i64, maximum: i64) -> GenResult<i64> {
        rng.integer(minimum, maximum)
    }

    /// Random ABO/Rh blood group.
    ///
    /// # Errors
    ///
    /// Propagates [`GenerationError::EmptyChoice`].
    pub fn blood_type(rng: &mut RandomSource) -> GenResult<String> {
        Self::pick(rng, &BLOOD_GROUPS)
    }

    /// Password of `length` letters, digits and punctuation.
    pub fn password(rng: &mut RandomSource, length: usize) -> String {
        rng.string_from(PASSWORD_CHARS, length)
    }

    /// Username from a mask: `C` capitalized word, `U` upper-case word,
    /// `l` lower-case word, `d` a year between 1800 and 2100. Other
    /// characters are kept. Without a mask one of `C.l`, `C_l`, `U-l` and
    /// similar is picked.
    ///
    /// # Errors
    ///
    /// Propagates [`GenerationError::EmptyChoice`].
    pub fn username(rng: &mut RandomSource, mask: Option<&str>) -> GenResult<String> {
        const MASKS: [&str; 6] = ["C.l", "C_l", "C-l", "U.l", "U_l", "U-l"];
        let mask = match mask {
            Some(mask) => mask,
            None => *rng.choice(&MASKS)?,
        };

        let mut username = String::new();
        for c in mask.chars() {
            match c {
                'C' | 'U' | 'l' => {
                    let word = *rng.choice(&USERNAME_WORDS)?;
                    match c {
                        'C' => {
                            let mut chars = word.chars();
                            if let Some(first) = chars.next() {
                                username.extend(first.to_uppercase());
                                username.push_str(chars.as_str());
                            }
                        }
                        'U' => username.push_str(&word.to_uppercase()),
                        _ => username.push_str(word),
                    }
                }
                'd' => username.push_str(&rng.range(1800..=2100_u32).to_string()),
                other => username.push(other),
            }
        }
        Ok(username)
    }

    /// E-mail address at one of `domains` (built-in test domains when empty).
    ///
    /// # Errors
    ///
    /// Propagates [`GenerationError::EmptyChoice`].
    pub fn email(rng: &mut RandomSource, domains: &[&str]) -> GenResult<String> {
        let domains = if domains.is_empty() {
            &EMAIL_DOMAINS[..]
        } else {
            domains
        };
        let domain = *rng.choice(domains)?;
        let name = Self::username(rng, Some("l"))?;
        Ok(format!("{name}@{domain}"))
    }

    /// Phone number from a mask, `placeholder` standing for digits. Without a
    /// mask a calling code plus `-###-###-####` is used.
    ///
    /// # Errors
    ///
    /// Propagates [`GenerationError::EmptyChoice`].
    pub fn telephone(
        rng: &mut RandomSource,
        mask: Option<&str>,
        placeholder: char,
    ) -> GenResult<String> {
        let mask = match mask {
            Some(mask) => mask.to_string(),
            None => format!("{}-###-###-####", rng.choice(&CALLING_CODES)?),
        };
        Ok(mask
            .chars()
            .map(|c| {
                if c == placeholder {
                    char::from(b'0' + rng.digit())
                } else {
                    c
                }
            })
            .collect())
    }

    /// Identifier from a mask: `@` is a letter of either case, `#` a digit.
    pub fn identifier(rng: &mut RandomSource, mask: &str) -> String {
        mask.chars()
            .map(|c| match c {
                '@' => rng.string_from(ASCII_LETTERS, 1),
                '#' => rng.string_from(DIGITS, 1),
                other => other.to_string(),
            })
            .collect()
    }
}
