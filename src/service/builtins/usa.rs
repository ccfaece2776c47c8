//! United States (en).

use crate::error::{GenResult, GenerationError};
use crate::random::{ASCII_UPPERCASE, RandomSource};

/// Catalog name of the social security number.
pub const SSN: &str = "usa.ssn";

/// Catalog name of the tracking number.
pub const TRACKING_NUMBER: &str = "usa.tracking_number";

/// Supported tracking number services.
pub const TRACKING_SERVICES: [&str; 3] = ["usps", "fedex", "ups"];

/// Random SSN formatted as `AAA-GG-SSSS`.
///
/// Area 666 becomes 667 and group 00 becomes 01.
pub fn ssn(rng: &mut RandomSource) -> String {
    let mut area = rng.range(1..=899_u32);
    let mut group = rng.range(1..=99_u32);
    let serial = rng.range(1..=9999_u32);

    if area == 666 {
        area = 667;
    }
    if group == 0 {
        group = 1;
    }
    format!("{area:03}-{group:02}-{serial:04}")
}

/// Whether `value` is a structurally valid SSN.
#[must_use]
pub fn is_valid_ssn(value: &str) -> bool {
    let parts: Vec<&str> = value.split('-').collect();
    let [area, group, serial] = parts.as_slice() else {
        return false;
    };
    if area.len() != 3 || group.len() != 2 || serial.len() != 4 {
        return false;
    }
    match (
        area.parse::<u32>(),
        group.parse::<u32>(),
        serial.parse::<u32>(),
    ) {
        (Ok(area), Ok(group), Ok(serial)) => {
            (1..900).contains(&area) && area != 666 && group != 0 && serial != 0
        }
        _ => false,
    }
}

/// Random tracking number for a postal service (`usps`, `fedex` or `ups`,
/// case-insensitive).
///
/// # Errors
///
/// Returns [`GenerationError::UnsupportedOption`] for any other service.
pub fn tracking_number(rng: &mut RandomSource, service: &str) -> GenResult<String> {
    match service.to_ascii_lowercase().as_str() {
        "usps" => Ok(format!(
            "{} {} {} {} {}",
            rng.range(1000..=9999_u32),
            rng.range(1000..=9999_u32),
            rng.range(1000..=9999_u32),
            rng.range(1000..=9999_u32),
            rng.range(10..=99_u32)
        )),
        "fedex" => Ok(format!(
            "{} {} {}",
            rng.range(1000..=9999_u32),
            rng.range(1000..=9999_u32),
            rng.range(1000..=9999_u32)
        )),
        "ups" => {
            let first = rng.range(100..=999_u32);
            let letter = rng.string_from(ASCII_UPPERCASE, 1);
            Ok(format!(
                "1Z {first} {letter}{} {} {} {}",
                rng.range(10..=99_u32),
                rng.range(1000..=9999_u32),
                rng.range(1000..=9999_u32),
                rng.range(1..=9_u32)
            ))
        }
        _ => Err(GenerationError::UnsupportedOption {
            option: service.to_string(),
            expected: TRACKING_SERVICES.join(", "),
        }),
    }
}

/// Whether `value` has the shape of a USPS, FedEx or UPS tracking number.
#[must_use]
pub fn is_valid_tracking_number(value: &str) -> bool {
    fn all_digits(part: &str, len: usize) -> bool {
        part.len() == len && part.chars().all(|c| c.is_ascii_digit())
    }

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["1Z", first, letter_digits, third, fourth, last] => {
            let mut chars = letter_digits.chars();
            all_digits(first, 3)
                && chars.next().is_some_and(|c| c.is_ascii_uppercase())
                && all_digits(chars.as_str(), 2)
                && all_digits(third, 4)
                && all_digits(fourth, 4)
                && all_digits(last, 1)
        }
        [a, b, c, d, e] => [a, b, c, d].iter().all(|part| all_digits(part, 4)) && all_digits(e, 2),
        [a, b, c] => [a, b, c].iter().all(|part| all_digits(part, 4)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_ssn_structure() {
        let mut rng = RandomSource::seeded(1);
        let re = Regex::new(r"^\d{3}-\d{2}-\d{4}$").unwrap();
        for _ in 0..2000 {
            let value = ssn(&mut rng);
            assert!(re.is_match(&value), "{value}");
            assert!(!value.starts_with("666"));
            assert_ne!(&value[4..6], "00");
            assert!(is_valid_ssn(&value));
        }
    }

    #[test]
    fn test_is_valid_ssn() {
        assert!(is_valid_ssn("569-66-5801"));
        assert!(!is_valid_ssn("666-12-3456"));
        assert!(!is_valid_ssn("123-00-3456"));
        assert!(!is_valid_ssn("900-12-3456"));
        assert!(!is_valid_ssn("123-45-678"));
    }

    #[test]
    fn test_tracking_number_services() {
        let mut rng = RandomSource::seeded(8);
        let usps = Regex::new(r"^\d{4} \d{4} \d{4} \d{4} \d{2}$").unwrap();
        let fedex = Regex::new(r"^\d{4} \d{4} \d{4}$").unwrap();
        let ups = Regex::new(r"^1Z \d{3} [A-Z]\d{2} \d{4} \d{4} \d$").unwrap();

        assert!(usps.is_match(&tracking_number(&mut rng, "usps").unwrap()));
        assert!(fedex.is_match(&tracking_number(&mut rng, "FedEx").unwrap()));
        assert!(ups.is_match(&tracking_number(&mut rng, "UPS").unwrap()));

        for service in TRACKING_SERVICES {
            let value = tracking_number(&mut rng, service).unwrap();
            assert!(is_valid_tracking_number(&value), "{value}");
        }
        assert!(!is_valid_tracking_number("1Z 123 a12 1234 1234 1"));
    }

    #[test]
    fn test_tracking_number_unknown_service() {
        let mut rng = RandomSource::seeded(8);
        let err = tracking_number(&mut rng, "dhl").unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedOption { ref option, .. } if option == "dhl"));
    }
}
