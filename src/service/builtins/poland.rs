//! Poland (pl).

use chrono::{Datelike, NaiveDate};

use crate::domain::Gender;
use crate::error::{GenResult, GenerationError};
use crate::random::RandomSource;
use crate::service::checksum::{
    digits_to_string, nip_check_digit, parse_digits, pesel_check_digit, regon_check_digit,
};
use crate::service::datetime;

/// Catalog name of the tax identification number.
pub const NIP: &str = "poland.nip";
/// Catalog name of the business registry number.
pub const REGON: &str = "poland.regon";
/// Catalog name of the national identification number.
pub const PESEL: &str = "poland.pesel";

/// Random 10-digit NIP.
pub fn nip(rng: &mut RandomSource) -> String {
    let mut digits = rng.digits(9);
    digits.push(nip_check_digit(&digits));
    digits_to_string(&digits)
}

/// Whether `value` is a 10-digit NIP with a matching check digit.
#[must_use]
pub fn is_valid_nip(value: &str) -> bool {
    match parse_digits(value) {
        Some(digits) if digits.len() == 10 => nip_check_digit(&digits[..9]) == digits[9],
        _ => false,
    }
}

/// Random 9-digit REGON.
pub fn regon(rng: &mut RandomSource) -> String {
    let mut digits = rng.digits(8);
    digits.push(regon_check_digit(&digits));
    digits_to_string(&digits)
}

/// Whether `value` is a 9-digit REGON with a matching check digit.
#[must_use]
pub fn is_valid_regon(value: &str) -> bool {
    match parse_digits(value) {
        Some(digits) if digits.len() == 9 => regon_check_digit(&digits[..8]) == digits[8],
        _ => false,
    }
}

/// Month field of a PESEL: the century is encoded as an offset.
fn pesel_month(year: i32, month: u32) -> Option<u32> {
    let offset = match year {
        1800..=1899 => 80,
        1900..=1999 => 0,
        2000..=2099 => 20,
        2100..=2199 => 40,
        2200..=2299 => 60,
        _ => return None,
    };
    Some(month + offset)
}

/// Random 11-digit PESEL.
///
/// The birth date defaults to a random date from 1940 to 2020 and the
/// gender to a random one. The tenth digit is even for women and odd for
/// men.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidArgument`] if the birth year is outside
/// 1800 to 2299.
pub fn pesel(
    rng: &mut RandomSource,
    birth_date: Option<NaiveDate>,
    gender: Option<Gender>,
) -> GenResult<String> {
    let birth_date = match birth_date {
        Some(date) => date,
        None => datetime::date(rng, 1940, 2020)?,
    };
    let gender = rng.variant_or_random(gender);

    let year = birth_date.year();
    let month = pesel_month(year, birth_date.month()).ok_or_else(|| {
        GenerationError::InvalidArgument(format!(
            "PESEL birth year must be within 1800..=2299, got {year}"
        ))
    })?;

    let head = format!(
        "{:02}{month:02}{:02}{:03}",
        year.rem_euclid(100),
        birth_date.day(),
        rng.range(0..=999_u32)
    );
    let mut digits = parse_digits(&head)
        .ok_or_else(|| GenerationError::InvalidArgument(format!("birth date {birth_date}")))?;

    let parity: &[u8] = match gender {
        Gender::Female => &[0, 2, 4, 6, 8],
        Gender::Male => &[1, 3, 5, 7, 9],
    };
    digits.push(*rng.choice(parity)?);
    digits.push(pesel_check_digit(&digits));
    Ok(digits_to_string(&digits))
}

/// Whether `value` is an 11-digit PESEL with a valid encoded month and a
/// matching check digit.
#[must_use]
pub fn is_valid_pesel(value: &str) -> bool {
    let Some(digits) = parse_digits(value) else {
        return false;
    };
    if digits.len() != 11 {
        return false;
    }
    let month = u32::from(digits[2]) * 10 + u32::from(digits[3]);
    (1..=12).contains(&(month % 20)) && pesel_check_digit(&digits[..10]) == digits[10]
}

/// Gender encoded in a PESEL, if the value is long enough.
#[must_use]
pub fn pesel_gender(value: &str) -> Option<Gender> {
    let digit = value.chars().nth(9)?.to_digit(10)?;
    Some(if digit % 2 == 0 {
        Gender::Female
    } else {
        Gender::Male
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nip_and_regon() {
        let mut rng = RandomSource::seeded(12);
        for _ in 0..500 {
            let value = nip(&mut rng);
            assert_eq!(value.len(), 10);
            assert!(is_valid_nip(&value));

            let value = regon(&mut rng);
            assert_eq!(value.len(), 9);
            assert!(is_valid_regon(&value));
        }
        assert!(is_valid_nip("1234563218"));
        assert!(is_valid_regon("123456785"));
    }

    #[test]
    fn test_pesel_gender_parity() {
        let mut rng = RandomSource::seeded(77);
        for gender in [Gender::Female, Gender::Male] {
            for _ in 0..300 {
                let value = pesel(&mut rng, None, Some(gender)).unwrap();
                assert!(is_valid_pesel(&value), "{value}");
                assert_eq!(pesel_gender(&value), Some(gender));
            }
        }
    }

    #[test]
    fn test_pesel_century_offsets() {
        let mut rng = RandomSource::seeded(4);
        let cases = [(1850, "81"), (1944, "01"), (2005, "21"), (2150, "41"), (2250, "61")];
        for (year, month) in cases {
            let date = NaiveDate::from_ymd_opt(year, 1, 15).unwrap();
            let value = pesel(&mut rng, Some(date), Some(Gender::Male)).unwrap();
            assert_eq!(&value[2..4], month, "year {year}");
            assert_eq!(&value[4..6], "15");
        }
    }

    #[test]
    fn test_pesel_known_value() {
        assert!(is_valid_pesel("44051401359"));
        assert!(!is_valid_pesel("44051401358"));
    }

    #[test]
    fn test_pesel_out_of_range_year() {
        let mut rng = RandomSource::seeded(4);
        let date = NaiveDate::from_ymd_opt(1799, 12, 31).unwrap();
        assert!(
            pesel(&mut rng, Some(date), None)
                .unwrap_err()
                .is_invalid_argument()
        );
    }
}
