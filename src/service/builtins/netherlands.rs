//! Netherlands (nl).

use crate::random::RandomSource;
use crate::service::checksum::{bsn_check_digit, digits_to_string, parse_digits};

/// Catalog name of the citizen service number.
pub const BSN: &str = "netherlands.bsn";

/// Random Burgerservicenummer: 8 digits and a check digit.
pub fn bsn(rng: &mut RandomSource) -> String {
    let mut digits = rng.digits(8);
    digits.push(bsn_check_digit(&digits));
    digits_to_string(&digits)
}

/// Whether `value` is 9 digits with a matching check digit.
#[must_use]
pub fn is_valid_bsn(value: &str) -> bool {
    match parse_digits(value) {
        Some(digits) if digits.len() == 9 => bsn_check_digit(&digits[..8]) == digits[8],
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bsn() {
        let mut rng = RandomSource::seeded(31);
        for _ in 0..500 {
            let value = bsn(&mut rng);
            assert_eq!(value.len(), 9);
            assert!(is_valid_bsn(&value));
        }
        assert!(is_valid_bsn("111222333"));
        assert!(!is_valid_bsn("111222334"));
    }
}
