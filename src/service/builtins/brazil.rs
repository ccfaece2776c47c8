//! Brazil (pt-br).

use crate::random::RandomSource;
use crate::service::checksum::{
    CNPJ_FIRST_WEIGHTS, CNPJ_SECOND_WEIGHTS, cnpj_check_digit, cpf_check_digit, digits_of,
    digits_to_string,
};

/// Catalog name of the individual taxpayer number.
pub const CPF: &str = "brazil.cpf";
/// Catalog name of the company registry number.
pub const CNPJ: &str = "brazil.cnpj";

/// Branch suffix of a head office CNPJ.
const CNPJ_HEAD_OFFICE: [u8; 4] = [0, 0, 0, 1];

/// Apply a `#` mask to digits, left to right.
fn apply_mask(mask: &str, digits: &[u8]) -> String {
    let mut digits = digits.iter();
    mask.chars()
        .map(|c| match c {
            '#' => digits.next().map_or('0', |digit| char::from(b'0' + digit)),
            other => other,
        })
        .collect()
}

/// Random CPF: 9 digits and two sequential check digits, masked as
/// `###.###.###-##` unless `with_mask` is false.
pub fn cpf(rng: &mut RandomSource, with_mask: bool) -> String {
    let mut digits = rng.digits(9);
    digits.push(cpf_check_digit(&digits, 10));
    digits.push(cpf_check_digit(&digits, 11));

    if with_mask {
        apply_mask("###.###.###-##", &digits)
    } else {
        digits_to_string(&digits)
    }
}

/// Whether `value` holds 11 digits whose check digits both match.
/// Mask characters are ignored.
#[must_use]
pub fn is_valid_cpf(value: &str) -> bool {
    let digits = digits_of(value);
    digits.len() == 11
        && cpf_check_digit(&digits[..9], 10) == digits[9]
        && cpf_check_digit(&digits[..10], 11) == digits[10]
}

/// Random head office CNPJ: 8 digits, `0001` and two sequential check
/// digits, masked as `##.###.###/####-##` unless `with_mask` is false.
pub fn cnpj(rng: &mut RandomSource, with_mask: bool) -> String {
    let mut digits = rng.digits(8);
    digits.extend(CNPJ_HEAD_OFFICE);
    digits.push(cnpj_check_digit(&digits, &CNPJ_FIRST_WEIGHTS));
    digits.push(cnpj_check_digit(&digits, &CNPJ_SECOND_WEIGHTS));

    if with_mask {
        apply_mask("##.###.###/####-##", &digits)
    } else {
        digits_to_string(&digits)
    }
}

/// Whether `value` holds 14 digits whose check digits both match.
#[must_use]
pub fn is_valid_cnpj(value: &str) -> bool {
    let digits = digits_of(value);
    digits.len() == 14
        && cnpj_check_digit(&digits[..12], &CNPJ_FIRST_WEIGHTS) == digits[12]
        && cnpj_check_digit(&digits[..13], &CNPJ_SECOND_WEIGHTS) == digits[13]
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_cpf_mask_and_checks() {
        let mut rng = RandomSource::seeded(55);
        let re = Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").unwrap();
        for _ in 0..500 {
            let value = cpf(&mut rng, true);
            assert!(re.is_match(&value), "{value}");
            assert!(is_valid_cpf(&value));
        }
    }

    #[test]
    fn test_cpf_digits_validate_sequentially() {
        let mut rng = RandomSource::seeded(56);
        for _ in 0..500 {
            let digits = digits_of(&cpf(&mut rng, false));
            assert_eq!(digits.len(), 11);
            // The 10th digit depends on the first 9 only
            assert_eq!(cpf_check_digit(&digits[..9], 10), digits[9]);
            assert_eq!(cpf_check_digit(&digits[..10], 11), digits[10]);
        }
    }

    #[test]
    fn test_cnpj_mask_and_checks() {
        let mut rng = RandomSource::seeded(57);
        let re = Regex::new(r"^\d{2}\.\d{3}\.\d{3}/0001-\d{2}$").unwrap();
        for _ in 0..500 {
            let value = cnpj(&mut rng, true);
            assert!(re.is_match(&value), "{value}");
            assert!(is_valid_cnpj(&value));
            assert!(is_valid_cnpj(&cnpj(&mut rng, false)));
        }
    }

    #[test]
    fn test_known_values() {
        assert!(is_valid_cpf("111.444.777-35"));
        assert!(!is_valid_cpf("111.444.777-36"));
        assert!(is_valid_cnpj("11.222.333/0001-81"));
        assert!(!is_valid_cnpj("11.222.333/0001-80"));
    }
}
