//! Barcodes, book numbers and device identifiers.

use crate::domain::{EanFormat, IsbnFormat};
use crate::error::GenResult;
use crate::locale::Locale;
use crate::random::RandomSource;
use crate::service::checksum::{
    digits_of, digits_to_string, gs1_check_digit, isbn10_check_char, issn_check_char,
    luhn_check_digit, luhn_is_valid, parse_digits,
};

/// Catalog name of the IMEI.
pub const IMEI: &str = "code.imei";
/// Catalog name of the EAN.
pub const EAN: &str = "code.ean";
/// Catalog name of the ISBN.
pub const ISBN: &str = "code.isbn";
/// Catalog name of the ISSN.
pub const ISSN: &str = "code.issn";

/// Type allocation codes of common handsets.
const IMEI_TACS: [&str; 12] = [
    "01124500", "01161200", "01326300", "35209900", "35226005", "35332510", "35421803",
    "35460402", "35692005", "35847804", "35988403", "86891403",
];

/// Prefix of every generated ISBN-13.
const ISBN13_PREFIX: &str = "978";

/// Default ISSN mask, check character excluded.
pub const ISSN_MASK: &str = "####-###";

/// ISBN registration group of a locale.
#[must_use]
pub const fn isbn_group(locale: Locale) -> &'static str {
    match locale {
        Locale::Cs | Locale::Sk => "80",
        Locale::Da => "87",
        Locale::De | Locale::DeAt | Locale::DeCh => "3",
        Locale::El => "618",
        Locale::En | Locale::EnAu | Locale::EnCa | Locale::EnGb => "1",
        Locale::Es => "84",
        Locale::EsMx => "607",
        Locale::Et => "9949",
        Locale::Fa => "600",
        Locale::Fi => "951",
        Locale::Fr => "2",
        Locale::Hu => "963",
        Locale::Hr => "953",
        Locale::Is => "9935",
        Locale::It => "88",
        Locale::Ja => "4",
        Locale::Kk => "601",
        Locale::Ko => "89",
        Locale::Nl | Locale::NlBe => "90",
        Locale::No => "82",
        Locale::Pl => "83",
        Locale::Pt => "972",
        Locale::PtBr => "85",
        Locale::Ru => "5",
        Locale::Sv => "91",
        Locale::Tr => "605",
        Locale::Uk => "966",
        Locale::Zh => "7",
    }
}

/// Random IMEI: a known TAC, a 6-digit serial and a Luhn check digit.
///
/// # Errors
///
/// Propagates [`GenerationError::EmptyChoice`](crate::error::GenerationError::EmptyChoice).
pub fn imei(rng: &mut RandomSource) -> GenResult<String> {
    let mut digits = digits_of(rng.choice(&IMEI_TACS)?);
    digits.extend(rng.digits(6));
    digits.push(luhn_check_digit(&digits));
    Ok(digits_to_string(&digits))
}

/// Whether `value` is 15 digits passing Luhn.
#[must_use]
pub fn is_valid_imei(value: &str) -> bool {
    parse_digits(value).is_some_and(|digits| digits.len() == 15 && luhn_is_valid(&digits))
}

/// Random EAN-8 or EAN-13 (random when `format` is unset).
pub fn ean(rng: &mut RandomSource, format: Option<EanFormat>) -> String {
    let len = match rng.variant_or_random(format) {
        EanFormat::Ean8 => 7,
        EanFormat::Ean13 => 12,
    };
    let mut digits = rng.digits(len);
    digits.push(luhn_check_digit(&digits));
    digits_to_string(&digits)
}

/// Whether `value` is an 8 or 13 digit EAN passing Luhn.
#[must_use]
pub fn is_valid_ean(value: &str) -> bool {
    parse_digits(value)
        .is_some_and(|digits| (digits.len() == 8 || digits.len() == 13) && luhn_is_valid(&digits))
}

/// Random ISBN in the locale's registration group, hyphenated as
/// group-publisher-title-check (ISBN-13 adds the `978` prefix).
pub fn isbn(rng: &mut RandomSource, format: Option<IsbnFormat>, locale: Locale) -> String {
    let format = rng.variant_or_random(format);
    let group = isbn_group(locale);
    let publisher_len = 9 - group.len() - 3;
    let publisher = digits_to_string(&rng.digits(publisher_len));
    let title = digits_to_string(&rng.digits(3));
    let body = format!("{group}{publisher}{title}");

    match format {
        IsbnFormat::Isbn10 => {
            let check = isbn10_check_char(&digits_of(&body));
            format!("{group}-{publisher}-{title}-{check}")
        }
        IsbnFormat::Isbn13 => {
            let check = gs1_check_digit(&digits_of(&format!("{ISBN13_PREFIX}{body}")));
            format!("{ISBN13_PREFIX}-{group}-{publisher}-{title}-{check}")
        }
    }
}

/// Whether `value` is an ISBN-10 or ISBN-13 with a matching check
/// character. Hyphens are ignored.
#[must_use]
pub fn is_valid_isbn(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| *c != '-').collect();
    match compact.len() {
        10 => {
            let (body, check) = compact.split_at(9);
            parse_digits(body).is_some_and(|body| check.starts_with(isbn10_check_char(&body)))
        }
        13 => parse_digits(&compact).is_some_and(|digits| {
            digits
                .split_last()
                .is_some_and(|(check, body)| gs1_check_digit(body) == *check)
        }),
        _ => false,
    }
}

/// Random ISSN from a `#` mask (default `####-###`) plus check character.
pub fn issn(rng: &mut RandomSource, mask: &str) -> String {
    let body = rng.custom_code(mask);
    let check = issn_check_char(&digits_of(&body));
    format!("{body}{check}")
}

/// Whether `value` is `NNNN-NNNC` with a matching check character.
#[must_use]
pub fn is_valid_issn(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| *c != '-').collect();
    if compact.len() != 8 {
        return false;
    }
    let (body, check) = compact.split_at(7);
    parse_digits(body).is_some_and(|body| check.starts_with(issn_check_char(&body)))
}

/// Random PIN from a `#` mask.
pub fn pin(rng: &mut RandomSource, mask: &str) -> String {
    rng.custom_code(mask)
}
