//! Payment data: card numbers and related values.

use serde::Serialize;

use crate::domain::{CardType, Enumerable, Gender};
use crate::error::{GenResult, GenerationError};
use crate::random::RandomSource;
use crate::service::checksum::{digits_of, digits_to_string, luhn_check_digit, luhn_is_valid};
use crate::service::person::Person;

/// Catalog name of the card number.
pub const CREDIT_CARD: &str = "payment.credit_card";

const BASE58: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const HEX_LOWER: &[u8] = b"0123456789abcdef";

/// Total length of a card number of the network.
const fn card_length(card_type: CardType) -> usize {
    match card_type {
        CardType::Visa | CardType::MasterCard => 16,
        CardType::AmericanExpress => 15,
    }
}

/// Issuer prefix: `4` for Visa, `51`-`55` or `2221`-`2720` for MasterCard,
/// `34` or `37` for American Express.
fn card_prefix(rng: &mut RandomSource, card_type: CardType) -> String {
    match card_type {
        CardType::Visa => "4".to_string(),
        CardType::MasterCard => {
            if rng.probability() < 0.5 {
                rng.range(51..=55_u32).to_string()
            } else {
                rng.range(2221..=2720_u32).to_string()
            }
        }
        CardType::AmericanExpress => {
            let prefix = if rng.probability() < 0.5 { "34" } else { "37" };
            prefix.to_string()
        }
    }
}

/// Network a card number belongs to, judged by prefix and length.
#[must_use]
pub fn card_network(digits: &[u8]) -> Option<CardType> {
    let prefix = |len: usize| -> u32 {
        digits
            .iter()
            .take(len)
            .fold(0, |acc, digit| acc * 10 + u32::from(*digit))
    };
    match digits.len() {
        16 if prefix(1) == 4 => Some(CardType::Visa),
        16 if (51..=55).contains(&prefix(2)) || (2221..=2720).contains(&prefix(4)) => {
            Some(CardType::MasterCard)
        }
        15 if matches!(prefix(2), 34 | 37) => Some(CardType::AmericanExpress),
        _ => None,
    }
}

/// Random card number with a Luhn check digit.
///
/// Visa and MasterCard numbers are grouped `#### #### #### ####`, American
/// Express `#### ###### #####`. The network is random when unset.
pub fn credit_card_number(rng: &mut RandomSource, card_type: Option<CardType>) -> String {
    let card_type = rng.variant_or_random(card_type);
    let length = card_length(card_type);

    let mut digits = digits_of(&card_prefix(rng, card_type));
    let remaining = length - 1 - digits.len();
    digits.extend(rng.digits(remaining));
    digits.push(luhn_check_digit(&digits));

    let number = digits_to_string(&digits);
    let groups: &[usize] = match card_type {
        CardType::AmericanExpress => &[4, 6, 5],
        CardType::Visa | CardType::MasterCard => &[4, 4, 4, 4],
    };
    let mut parts = Vec::with_capacity(groups.len());
    let mut start = 0;
    for len in groups {
        parts.push(&number[start..start + len]);
        start += len;
    }
    parts.join(" ")
}

/// Whether `value` is a grouped or plain card number of a known network
/// that passes Luhn.
#[must_use]
pub fn is_valid_credit_card(value: &str) -> bool {
    if !value.chars().all(|c| c.is_ascii_digit() || c == ' ') {
        return false;
    }
    let digits = digits_of(value);
    card_network(&digits).is_some() && luhn_is_valid(&digits)
}

/// Random network name, e.g. `MasterCard`.
pub fn credit_card_network(rng: &mut RandomSource) -> &'static str {
    rng.choose_variant::<CardType>().network_name()
}

/// Random expiration date `MM/YY` with a year in `[minimum, maximum]`.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidArgument`] if the years are not within
/// 0 to 99 or `minimum > maximum`.
pub fn credit_card_expiration_date(
    rng: &mut RandomSource,
    minimum: u32,
    maximum: u32,
) -> GenResult<String> {
    if maximum > 99 {
        return Err(GenerationError::InvalidArgument(format!(
            "expiration year must be two digits, got {maximum}"
        )));
    }
    let month = rng.range(1..=12_u32);
    let year = rng.integer(i64::from(minimum), i64::from(maximum))?;
    Ok(format!("{month:02}/{year:02}"))
}

/// Random three-digit CVV.
pub fn cvv(rng: &mut RandomSource) -> String {
    digits_to_string(&rng.digits(3))
}

/// Random four-digit CID.
pub fn cid(rng: &mut RandomSource) -> String {
    digits_to_string(&rng.digits(4))
}

/// Bitcoin-looking address: `1` and 33 base58 characters. Not a valid
/// address.
pub fn bitcoin_address(rng: &mut RandomSource) -> String {
    format!("1{}", rng.string_from(BASE58, 33))
}

/// Ethereum-looking address: `0x` and 40 lower-case hex digits. Not a
/// valid address.
pub fn ethereum_address(rng: &mut RandomSource) -> String {
    format!("0x{}", rng.string_from(HEX_LOWER, 40))
}

/// Card owner record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardOwner {
    /// Owner's full name.
    pub full_name: String,
    /// Owner's gender token.
    pub gender: &'static str,
    /// Birth date, `YYYY-MM-DD`.
    pub birthday: String,
    /// Card number.
    pub credit_card: String,
    /// Expiration date, `MM/YY`.
    pub expiration_date: String,
    /// Card verification value.
    pub cvv: String,
}

/// Random card owner with a full name from `person`.
///
/// # Errors
///
/// Propagates dataset errors from `person`.
pub fn credit_card_owner(
    rng: &mut RandomSource,
    person: &Person,
    gender: Option<Gender>,
) -> GenResult<CardOwner> {
    let gender = rng.variant_or_random(gender);
    Ok(CardOwner {
        full_name: person.full_name(rng, Some(gender), false)?,
        gender: gender.as_str(),
        birthday: Person::birthdate(rng, 1980, 2023)?.to_string(),
        credit_card: credit_card_number(rng, None),
        expiration_date: credit_card_expiration_date(rng, 16, 25)?,
        cvv: cvv(rng),
    })
}
