//! Italy (it).

use chrono::Datelike;

use crate::domain::Gender;
use crate::error::{GenResult, GenerationError};
use crate::random::{ASCII_UPPERCASE, RandomSource};
use crate::service::checksum::fiscal_code_check_char;
use crate::service::datetime;

/// Catalog name of the fiscal code.
pub const FISCAL_CODE: &str = "italy.fiscal_code";

/// Month letters, January to December.
const MONTH_CODES: &[u8; 12] = b"ABCDEHLMPRST";

/// Random fiscal code, e.g. `RSSMRA85T10A562S`.
///
/// Surname and name codes are random letters, the birth date is drawn from
/// 1930 to 2010 and the place code is a cadastral-style letter and three
/// digits. Women have 40 added to the day of birth.
///
/// # Errors
///
/// Propagates date drawing errors, and returns
/// [`GenerationError::InvalidArgument`] if the code body holds characters
/// outside `A-Z0-9`.
pub fn fiscal_code(rng: &mut RandomSource, gender: Option<Gender>) -> GenResult<String> {
    let gender = rng.variant_or_random(gender);
    let surname = rng.string_from(ASCII_UPPERCASE, 3);
    let name = rng.string_from(ASCII_UPPERCASE, 3);
    let birth_date = datetime::date(rng, 1930, 2010)?;

    let month = char::from(MONTH_CODES[birth_date.month0() as usize]);
    let day = match gender {
        Gender::Female => birth_date.day() + 40,
        Gender::Male => birth_date.day(),
    };
    let place = rng.custom_code("@###");

    let code = format!(
        "{surname}{name}{:02}{month}{day:02}{place}",
        birth_date.year().rem_euclid(100)
    );
    let check = fiscal_code_check_char(&code).ok_or_else(|| {
        GenerationError::InvalidArgument(format!("no check letter for fiscal code '{code}'"))
    })?;
    Ok(format!("{code}{check}"))
}

/// Whether `value` is a 16-character fiscal code with a matching check
/// letter.
#[must_use]
pub fn is_valid_fiscal_code(value: &str) -> bool {
    if value.len() != 16 || !value.is_ascii() {
        return false;
    }
    let (code, check) = value.split_at(15);
    let month_ok = code
        .as_bytes()
        .get(8)
        .is_some_and(|month| MONTH_CODES.contains(month));
    month_ok && fiscal_code_check_char(code).is_some_and(|c| check.starts_with(c))
}

/// Gender encoded in the day field of a fiscal code.
#[must_use]
pub fn fiscal_code_gender(value: &str) -> Option<Gender> {
    let day: u32 = value.get(9..11)?.parse().ok()?;
    Some(if day > 40 { Gender::Female } else { Gender::Male })
}
