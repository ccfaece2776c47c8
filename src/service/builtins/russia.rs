//! Russia (ru).

use crate::domain::Gender;
use crate::error::GenResult;
use crate::random::RandomSource;
use crate::service::checksum::{
    INN_FIRST_WEIGHTS, INN_SECOND_WEIGHTS, digits_to_string, inn_check_digit, ogrn_check_digit,
    parse_digits, snils_check_number,
};
use crate::service::datetime;

/// Catalog name of the insurance account number.
pub const SNILS: &str = "russia.snils";
/// Catalog name of the taxpayer number.
pub const INN: &str = "russia.inn";
/// Catalog name of the primary state registration number.
pub const OGRN: &str = "russia.ogrn";

/// Patronymics as (male, female) pairs derived from common male names.
const PATRONYMICS: [(&str, &str); 8] = [
    ("Александрович", "Александровна"),
    ("Иванович", "Ивановна"),
    ("Петрович", "Петровна"),
    ("Сергеевич", "Сергеевна"),
    ("Андреевич", "Андреевна"),
    ("Дмитриевич", "Дмитриевна"),
    ("Никитич", "Никитична"),
    ("Ильич", "Ильинична"),
];

/// Random SNILS: 9 digits and a two-digit check number.
pub fn snils(rng: &mut RandomSource) -> String {
    let digits = rng.digits(9);
    format!("{}{:02}", digits_to_string(&digits), snils_check_number(&digits))
}

/// Whether `value` is an 11-digit SNILS with a matching check number.
#[must_use]
pub fn is_valid_snils(value: &str) -> bool {
    match parse_digits(value) {
        Some(digits) if digits.len() == 11 => {
            snils_check_number(&digits[..9]) == digits[9] * 10 + digits[10]
        }
        _ => false,
    }
}

/// Random INN: 9 digits and two sequential check digits.
pub fn inn(rng: &mut RandomSource) -> String {
    let mut digits = rng.digits(9);
    digits.push(inn_check_digit(&digits, &INN_FIRST_WEIGHTS));
    digits.push(inn_check_digit(&digits, &INN_SECOND_WEIGHTS));
    digits_to_string(&digits)
}

/// Whether `value` is an 11-digit INN whose check digits both match.
#[must_use]
pub fn is_valid_inn(value: &str) -> bool {
    match parse_digits(value) {
        Some(digits) if digits.len() == 11 => {
            inn_check_digit(&digits[..9], &INN_FIRST_WEIGHTS) == digits[9]
                && inn_check_digit(&digits[..10], &INN_SECOND_WEIGHTS) == digits[10]
        }
        _ => false,
    }
}

/// Random OGRN: 12 digits and a check digit.
pub fn ogrn(rng: &mut RandomSource) -> String {
    let mut digits = rng.digits(12);
    digits.push(ogrn_check_digit(&digits));
    digits_to_string(&digits)
}

/// Whether `value` is a 13-digit OGRN with a matching check digit.
#[must_use]
pub fn is_valid_ogrn(value: &str) -> bool {
    match parse_digits(value) {
        Some(digits) if digits.len() == 13 => ogrn_check_digit(&digits[..12]) == digits[12],
        _ => false,
    }
}

/// Random bank identification code: `04`, a region and 5 digits.
pub fn bic(rng: &mut RandomSource) -> String {
    let region = rng.range(1..=99_u32);
    format!("04{region:02}{}", digits_to_string(&rng.digits(5)))
}

/// Random tax registration reason code.
pub fn kpp(rng: &mut RandomSource) -> String {
    format!(
        "{:04}{:02}{:03}",
        rng.range(1..=9999_u32),
        rng.range(1..=99_u32),
        rng.range(1..=999_u32)
    )
}

/// Random passport series such as `02 15`: region and two-digit year of
/// issue (the current year when unset).
pub fn passport_series(rng: &mut RandomSource, year: Option<i32>) -> String {
    let year = year.unwrap_or_else(datetime::current_year).rem_euclid(100);
    let region = rng.range(1..=99_u32);
    format!("{region:02} {year:02}")
}

/// Random six-digit passport number.
pub fn passport_number(rng: &mut RandomSource) -> u32 {
    rng.range(100_000..=999_999_u32)
}

/// Passport series and number, e.g. `57 16 805199`.
pub fn series_and_number(rng: &mut RandomSource) -> String {
    let series = passport_series(rng, None);
    format!("{series} {}", passport_number(rng))
}

/// Random patronymic with the ending of `gender` (random when unset),
/// e.g. `Сергеевна`.
///
/// # Errors
///
/// Propagates [`GenerationError::EmptyChoice`](crate::error::GenerationError::EmptyChoice).
pub fn patronymic(rng: &mut RandomSource, gender: Option<Gender>) -> GenResult<String> {
    let gender = rng.variant_or_random(gender);
    let (male, female) = rng.choice(&PATRONYMICS)?;
    Ok(match gender {
        Gender::Male => (*male).to_string(),
        Gender::Female => (*female).to_string(),
    })
}
