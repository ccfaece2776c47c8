//! Check digit arithmetic.
//!
//! Pure functions over decimal digit slices (`0..=9` per element). Every
//! identifier generator computes its check digits here, and every catalog
//! validator recomputes them here, so the two can never disagree.

/// Weights of the Denmark CPR check digit.
pub const CPR_WEIGHTS: [u32; 9] = [4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Weights of the Poland NIP check digit.
pub const NIP_WEIGHTS: [u32; 9] = [6, 5, 7, 2, 3, 4, 5, 6, 7];

/// Weights of the Poland REGON check digit.
pub const REGON_WEIGHTS: [u32; 8] = [8, 9, 2, 3, 4, 5, 6, 7];

/// Weights of the Poland PESEL check digit.
pub const PESEL_WEIGHTS: [u32; 10] = [1, 3, 7, 9, 1, 3, 7, 9, 1, 3];

/// Weights of the first CNPJ check digit.
pub const CNPJ_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Weights of the second CNPJ check digit.
pub const CNPJ_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Coefficients of the first INN check digit.
pub const INN_FIRST_WEIGHTS: [u32; 9] = [2, 4, 10, 3, 5, 9, 4, 6, 8];

/// Coefficients of the second INN check digit.
pub const INN_SECOND_WEIGHTS: [u32; 10] = [7, 2, 4, 10, 3, 5, 9, 4, 6, 8];

/// Values of characters at odd (1-based) positions of an Italian fiscal code,
/// indexed by digit value or letter offset.
const FISCAL_CODE_ODD_VALUES: [u32; 26] = [
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21, 2, 4, 18, 20, 11, 3, 6, 8, 12, 14, 16, 10, 22, 25, 24, 23,
];

/// Sum of `digit * weight` over the shorter of the two slices.
#[must_use]
pub fn weighted_sum(digits: &[u8], weights: &[u32]) -> u32 {
    digits
        .iter()
        .zip(weights)
        .map(|(digit, weight)| u32::from(*digit) * weight)
        .sum()
}

/// Sum with weights descending from `start` by one per position.
fn descending_sum(digits: &[u8], start: u32) -> u32 {
    digits
        .iter()
        .zip((0..=start).rev())
        .map(|(digit, weight)| u32::from(*digit) * weight)
        .sum()
}

/// Complement of the sum modulo 10.
const fn mod10_complement(sum: u32) -> u8 {
    ((10 - sum % 10) % 10) as u8
}

/// Luhn check digit of `body`.
///
/// Digits at odd distance from the check position are doubled, with 9
/// subtracted from doubled values above 9.
#[must_use]
pub fn luhn_check_digit(body: &[u8]) -> u8 {
    let sum: u32 = body
        .iter()
        .rev()
        .enumerate()
        .map(|(index, digit)| {
            let value = u32::from(*digit);
            if index % 2 == 0 {
                let doubled = value * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                value
            }
        })
        .sum();
    mod10_complement(sum)
}

/// Whether the last digit of `number` is its Luhn check digit.
#[must_use]
pub fn luhn_is_valid(number: &[u8]) -> bool {
    number
        .split_last()
        .is_some_and(|(check, body)| !body.is_empty() && luhn_check_digit(body) == *check)
}

/// GS1 mod-10 check digit (EAN, ISBN-13): weights 3 and 1 alternating
/// from the right of the body.
#[must_use]
pub fn gs1_check_digit(body: &[u8]) -> u8 {
    let sum: u32 = body
        .iter()
        .rev()
        .enumerate()
        .map(|(index, digit)| u32::from(*digit) * if index % 2 == 0 { 3 } else { 1 })
        .sum();
    mod10_complement(sum)
}

/// `(11 - sum mod 11) mod 11` with 10 written as `X`.
fn mod11_check_char(sum: u32) -> char {
    match (11 - sum % 11) % 11 {
        10 => 'X',
        value => char::from_digit(value, 10).unwrap_or('0'),
    }
}

/// ISBN-10 check character over the 9-digit body (weights 10 down to 2).
#[must_use]
pub fn isbn10_check_char(body: &[u8]) -> char {
    mod11_check_char(descending_sum(body, 10))
}

/// ISSN check character over the 7-digit body (weights 8 down to 2).
#[must_use]
pub fn issn_check_char(body: &[u8]) -> char {
    mod11_check_char(descending_sum(body, 8))
}

/// Denmark CPR check digit over ddmmyy + serial.
///
/// Returns `None` when the raw check is 10, which no single digit can
/// represent; the serial must then be redrawn.
#[must_use]
pub fn cpr_check_digit(body: &[u8]) -> Option<u8> {
    match 11 - weighted_sum(body, &CPR_WEIGHTS) % 11 {
        11 => Some(0),
        10 => None,
        value => u8::try_from(value).ok(),
    }
}

/// Netherlands BSN check digit (weights 9 down to 2).
#[must_use]
pub fn bsn_check_digit(body: &[u8]) -> u8 {
    (descending_sum(body, 9) % 11 % 10) as u8
}

/// `sum mod 11`, with 10 remapped to 0.
const fn mod11_or_zero(sum: u32) -> u8 {
    match sum % 11 {
        10 => 0,
        value => value as u8,
    }
}

/// Poland NIP check digit.
#[must_use]
pub fn nip_check_digit(body: &[u8]) -> u8 {
    mod11_or_zero(weighted_sum(body, &NIP_WEIGHTS))
}

/// Poland REGON check digit.
#[must_use]
pub fn regon_check_digit(body: &[u8]) -> u8 {
    mod11_or_zero(weighted_sum(body, &REGON_WEIGHTS))
}

/// Poland PESEL check digit over the first ten digits.
#[must_use]
pub fn pesel_check_digit(body: &[u8]) -> u8 {
    mod10_complement(weighted_sum(body, &PESEL_WEIGHTS))
}

/// Remainder rule shared by CPF and CNPJ: `r = total mod 11`, 0 when
/// `r < 2`, otherwise `11 - r`.
const fn brazil_remainder(total: u32) -> u8 {
    match total % 11 {
        0 | 1 => 0,
        remainder => (11 - remainder) as u8,
    }
}

/// CPF check digit with weights descending from `start_weight`.
///
/// The first digit uses 10 over 9 digits, the second 11 over 10 digits.
#[must_use]
pub fn cpf_check_digit(digits: &[u8], start_weight: u32) -> u8 {
    brazil_remainder(descending_sum(digits, start_weight))
}

/// CNPJ check digit with an explicit weight vector.
#[must_use]
pub fn cnpj_check_digit(digits: &[u8], weights: &[u32]) -> u8 {
    brazil_remainder(weighted_sum(digits, weights))
}

/// Italian fiscal code check letter over the first 15 characters.
///
/// Returns `None` if the code contains anything but ASCII digits and
/// upper-case letters.
#[must_use]
pub fn fiscal_code_check_char(code: &str) -> Option<char> {
    let mut sum = 0_u32;
    for (index, c) in code.chars().enumerate() {
        let value = match c {
            '0'..='9' => c.to_digit(10)?,
            'A'..='Z' => u32::from(c) - u32::from('A'),
            _ => return None,
        };
        sum += if index % 2 == 0 {
            *FISCAL_CODE_ODD_VALUES.get(value as usize)?
        } else {
            value
        };
    }
    char::from_u32(u32::from('A') + sum % 26)
}

/// Russia SNILS two-digit check number (weights 9 down to 1).
///
/// Sums below 100 are the check itself, 100 and 101 give 0, larger sums
/// are reduced modulo 101 with a remainder of 100 written as 0.
#[must_use]
pub fn snils_check_number(body: &[u8]) -> u8 {
    let sum = descending_sum(body, 9);
    let check = match sum {
        0..=99 => sum,
        100 | 101 => 0,
        _ => sum % 101 % 100,
    };
    check as u8
}

/// Russia INN check digit: `(weighted sum mod 11) mod 10`.
#[must_use]
pub fn inn_check_digit(digits: &[u8], weights: &[u32]) -> u8 {
    (weighted_sum(digits, weights) % 11 % 10) as u8
}

/// Russia OGRN check digit: the body read as one integer, `mod 11 mod 10`.
#[must_use]
pub fn ogrn_check_digit(body: &[u8]) -> u8 {
    let remainder = body
        .iter()
        .fold(0_u64, |acc, digit| (acc * 10 + u64::from(*digit)) % 11);
    (remainder % 10) as u8
}

/// Parse a string made only of ASCII digits.
#[must_use]
pub fn parse_digits(value: &str) -> Option<Vec<u8>> {
    value
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect()
}

/// The ASCII digits of `value`, separators dropped.
#[must_use]
pub fn digits_of(value: &str) -> Vec<u8> {
    value
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| d as u8))
        .collect()
}

/// Render digits as a string.
#[must_use]
pub fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|digit| char::from(b'0' + digit)).collect()
}
