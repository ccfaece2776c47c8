//! Denmark (da).

use chrono::NaiveDate;

use crate::error::{GenResult, GenerationError};
use crate::random::RandomSource;
use crate::service::checksum::{cpr_check_digit, digits_to_string, parse_digits};
use crate::service::datetime;

/// Catalog name of the CPR number.
pub const CPR: &str = "denmark.cpr";

/// Random CPR number (`ddmmyy` + serial + check digit).
///
/// The birth date is drawn from 1900 to 2099.
///
/// # Errors
///
/// Returns [`GenerationError::ChecksumUnsatisfiable`] if no serial with a
/// representable check digit was drawn within `max_attempts`.
pub fn cpr(rng: &mut RandomSource, max_attempts: u32) -> GenResult<String> {
    let birth_date = datetime::date(rng, 1900, 2099)?;
    cpr_for_date(rng, birth_date, max_attempts)
}

/// CPR number for a fixed birth date. Only the serial is redrawn.
///
/// # Errors
///
/// See [`cpr`].
pub fn cpr_for_date(
    rng: &mut RandomSource,
    birth_date: NaiveDate,
    max_attempts: u32,
) -> GenResult<String> {
    let prefix = birth_date.format("%d%m%y").to_string();
    let mut digits = parse_digits(&prefix)
        .ok_or_else(|| GenerationError::InvalidArgument(format!("birth date {birth_date}")))?;

    for _ in 0..max_attempts {
        digits.truncate(6);
        digits.extend(rng.digits(3));
        if let Some(check) = cpr_check_digit(&digits) {
            digits.push(check);
            return Ok(digits_to_string(&digits));
        }
    }

    Err(GenerationError::ChecksumUnsatisfiable {
        kind: CPR,
        attempts: max_attempts,
    })
}

/// Whether `value` is a 10-digit CPR number with a matching check digit.
#[must_use]
pub fn is_valid_cpr(value: &str) -> bool {
    match parse_digits(value) {
        Some(digits) if digits.len() == 10 => cpr_check_digit(&digits[..9]) == Some(digits[9]),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::checksum::{CPR_WEIGHTS, weighted_sum};

    #[test]
    fn test_cpr_is_valid_and_never_hits_remainder_one() {
        let mut rng = RandomSource::seeded(2024);
        for _ in 0..1000 {
            let value = cpr(&mut rng, 100).unwrap();
            assert_eq!(value.len(), 10);
            assert!(is_valid_cpr(&value));

            let digits = parse_digits(&value).unwrap();
            assert_ne!(weighted_sum(&digits[..9], &CPR_WEIGHTS) % 11, 1);
        }
    }

    #[test]
    fn test_cpr_keeps_birth_date() {
        let mut rng = RandomSource::seeded(5);
        let birth_date = NaiveDate::from_ymd_opt(1942, 5, 4).unwrap();
        let value = cpr_for_date(&mut rng, birth_date, 100).unwrap();
        assert!(value.starts_with("040542"));
    }

    #[test]
    fn test_cpr_zero_attempts_is_unsatisfiable() {
        let mut rng = RandomSource::seeded(5);
        let birth_date = NaiveDate::from_ymd_opt(1942, 5, 4).unwrap();
        assert_eq!(
            cpr_for_date(&mut rng, birth_date, 0),
            Err(GenerationError::ChecksumUnsatisfiable {
                kind: CPR,
                attempts: 0
            })
        );
    }

    #[test]
    fn test_is_valid_cpr_rejects_bad_input() {
        assert!(is_valid_cpr("0405420694"));
        assert!(!is_valid_cpr("0405420695"));
        assert!(!is_valid_cpr("040542069"));
        assert!(!is_valid_cpr("04054206X4"));
    }
}
