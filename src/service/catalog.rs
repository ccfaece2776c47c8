//! Identifier catalog.
//!
//! Every checksummed or structured identifier is one [`IdentifierSpec`] row
//! in [`CATALOG`]. Dispatch goes through the table, so adding a kind means
//! adding a row, and tests can iterate over every kind at once.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::domain::{CardType, EanFormat, Gender, IsbnFormat};
use crate::error::{GenResult, GenerationError};
use crate::locale::Locale;
use crate::random::RandomSource;
use crate::service::builtins::{brazil, denmark, italy, netherlands, poland, russia, usa};
use crate::service::{code, payment};

/// Default retry cap of rejection-sampled identifiers.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Optional parameters of identifier generation. Each generator reads only
/// the fields it understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierOptions {
    /// Gender for gendered layouts (PESEL, fiscal code).
    pub gender: Option<Gender>,
    /// Birth date for date-bearing layouts (PESEL).
    pub birth_date: Option<NaiveDate>,
    /// Card network.
    pub card_type: Option<CardType>,
    /// ISBN flavour.
    pub isbn_format: Option<IsbnFormat>,
    /// EAN length.
    pub ean_format: Option<EanFormat>,
    /// Locale, used for the ISBN registration group.
    pub locale: Locale,
    /// Emit separators for masked layouts (CPF, CNPJ).
    pub with_mask: bool,
    /// Postal service of tracking numbers.
    pub service: Option<String>,
    /// Retry cap of rejection-sampled identifiers.
    pub max_attempts: u32,
}

impl Default for IdentifierOptions {
    fn default() -> Self {
        Self {
            gender: None,
            birth_date: None,
            card_type: None,
            isbn_format: None,
            ean_format: None,
            locale: Locale::default(),
            with_mask: true,
            service: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Identifier kinds, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// Payment card number.
    CreditCard,
    /// Mobile equipment identity.
    Imei,
    /// European article number.
    Ean,
    /// International standard book number.
    Isbn,
    /// International standard serial number.
    Issn,
    /// Denmark CPR.
    DenmarkCpr,
    /// United States SSN.
    UsaSsn,
    /// United States tracking number.
    UsaTrackingNumber,
    /// Netherlands BSN.
    NetherlandsBsn,
    /// Poland NIP.
    PolandNip,
    /// Poland REGON.
    PolandRegon,
    /// Poland PESEL.
    PolandPesel,
    /// Brazil CPF.
    BrazilCpf,
    /// Brazil CNPJ.
    BrazilCnpj,
    /// Italy fiscal code.
    ItalyFiscalCode,
    /// Russia SNILS.
    RussiaSnils,
    /// Russia INN.
    RussiaInn,
    /// Russia OGRN.
    RussiaOgrn,
}

impl IdentifierKind {
    /// Catalog row of this kind.
    #[must_use]
    pub fn spec(self) -> &'static IdentifierSpec {
        &CATALOG[self as usize]
    }

    /// Dotted catalog name, e.g. `brazil.cpf`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IdentifierKind {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        CATALOG
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(needle))
            .map(|spec| spec.kind)
            .ok_or_else(|| GenerationError::UnsupportedOption {
                option: s.to_string(),
                expected: CATALOG
                    .iter()
                    .map(|spec| spec.name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Draws, checksums and formats one identifier.
pub type GenerateFn = fn(&mut RandomSource, &IdentifierOptions) -> GenResult<String>;

/// Recomputes the rule of an identifier over an emitted value.
pub type ValidateFn = fn(&str) -> bool;

/// One catalog row.
pub struct IdentifierSpec {
    /// Kind tag.
    pub kind: IdentifierKind,
    /// Dotted name.
    pub name: &'static str,
    /// Field layout.
    pub layout: &'static str,
    /// Checksum rule.
    pub checksum: &'static str,
    /// Options the generator reads.
    pub options: &'static [&'static str],
    /// Generator.
    pub generate: GenerateFn,
    /// Validator.
    pub validate: ValidateFn,
}

impl fmt::Debug for IdentifierSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifierSpec")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn credit_card(rng: &mut RandomSource, options: &IdentifierOptions) -> GenResult<String> {
    Ok(payment::credit_card_number(rng, options.card_type))
}

fn imei(rng: &mut RandomSource, _: &IdentifierOptions) -> GenResult<String> {
    code::imei(rng)
}

fn ean(rng: &mut RandomSource, options: &IdentifierOptions) -> GenResult<String> {
    Ok(code::ean(rng, options.ean_format))
}

fn isbn(rng: &mut RandomSource, options: &IdentifierOptions) -> GenResult<String> {
    Ok(code::isbn(rng, options.isbn_format, options.locale))
}

fn issn(rng: &mut RandomSource, _: &IdentifierOptions) -> GenResult<String> {
    Ok(code::issn(rng, code::ISSN_MASK))
}

fn cpr(rng: &mut RandomSource, options: &IdentifierOptions) -> GenResult<String> {
    denmark::cpr(rng, options.max_attempts)
}

fn ssn(rng: &mut RandomSource, _: &IdentifierOptions) -> GenResult<String> {
    Ok(usa::ssn(rng))
}

fn tracking_number(rng: &mut RandomSource, options: &IdentifierOptions) -> GenResult<String> {
    usa::tracking_number(rng, options.service.as_deref().unwrap_or("usps"))
}

fn bsn(rng: &mut RandomSource, _: &IdentifierOptions) -> GenResult<String> {
    Ok(netherlands::bsn(rng))
}

fn nip(rng: &mut RandomSource, _: &IdentifierOptions) -> GenResult<String> {
    Ok(poland::nip(rng))
}

fn regon(rng: &mut RandomSource, _: &IdentifierOptions) -> GenResult<String> {
    Ok(poland::regon(rng))
}

fn pesel(rng: &mut RandomSource, options: &IdentifierOptions) -> GenResult<String> {
    poland::pesel(rng, options.birth_date, options.gender)
}

fn cpf(rng: &mut RandomSource, options: &IdentifierOptions) -> GenResult<String> {
    Ok(brazil::cpf(rng, options.with_mask))
}

fn cnpj(rng: &mut RandomSource, options: &IdentifierOptions) -> GenResult<String> {
    Ok(brazil::cnpj(rng, options.with_mask))
}

fn fiscal_code(rng: &mut RandomSource, options: &IdentifierOptions) -> GenResult<String> {
    italy::fiscal_code(rng, options.gender)
}

fn snils(rng: &mut RandomSource, _: &IdentifierOptions) -> GenResult<String> {
    Ok(russia::snils(rng))
}

fn inn(rng: &mut RandomSource, _: &IdentifierOptions) -> GenResult<String> {
    Ok(russia::inn(rng))
}

fn ogrn(rng: &mut RandomSource, _: &IdentifierOptions) -> GenResult<String> {
    Ok(russia::ogrn(rng))
}

/// The identifier catalog, indexed by [`IdentifierKind`].
pub static CATALOG: [IdentifierSpec; 18] = [
    IdentifierSpec {
        kind: IdentifierKind::CreditCard,
        name: payment::CREDIT_CARD,
        layout: "network prefix + random digits + check; 16 digits as 4-4-4-4, Amex 15 as 4-6-5",
        checksum: "Luhn",
        options: &["card_type"],
        generate: credit_card,
        validate: payment::is_valid_credit_card,
    },
    IdentifierSpec {
        kind: IdentifierKind::Imei,
        name: code::IMEI,
        layout: "8-digit TAC + 6-digit serial + check",
        checksum: "Luhn",
        options: &[],
        generate: imei,
        validate: code::is_valid_imei,
    },
    IdentifierSpec {
        kind: IdentifierKind::Ean,
        name: code::EAN,
        layout: "7 (EAN-8) or 12 (EAN-13) digits + check",
        checksum: "Luhn mod 10",
        options: &["format"],
        generate: ean,
        validate: code::is_valid_ean,
    },
    IdentifierSpec {
        kind: IdentifierKind::Isbn,
        name: code::ISBN,
        layout: "[978-]group-publisher-title-check",
        checksum: "ISBN-10: weights 10..2 mod 11, 10 as X; ISBN-13: GS1 mod 10",
        options: &["format", "locale"],
        generate: isbn,
        validate: code::is_valid_isbn,
    },
    IdentifierSpec {
        kind: IdentifierKind::Issn,
        name: code::ISSN,
        layout: "####-### + check",
        checksum: "weights 8..2 mod 11, 10 as X",
        options: &[],
        generate: issn,
        validate: code::is_valid_issn,
    },
    IdentifierSpec {
        kind: IdentifierKind::DenmarkCpr,
        name: denmark::CPR,
        layout: "ddmmyy + 3-digit serial + check",
        checksum: "weights (4,3,2,7,6,5,4,3,2), 11 - sum mod 11, 11 as 0, 10 redraws the serial",
        options: &[],
        generate: cpr,
        validate: denmark::is_valid_cpr,
    },
    IdentifierSpec {
        kind: IdentifierKind::UsaSsn,
        name: usa::SSN,
        layout: "AAA-GG-SSSS, area 001-899 except 666, group 01-99",
        checksum: "none",
        options: &[],
        generate: ssn,
        validate: usa::is_valid_ssn,
    },
    IdentifierSpec {
        kind: IdentifierKind::UsaTrackingNumber,
        name: usa::TRACKING_NUMBER,
        layout: "usps, fedex or ups digit groups",
        checksum: "none",
        options: &["service"],
        generate: tracking_number,
        validate: usa::is_valid_tracking_number,
    },
    IdentifierSpec {
        kind: IdentifierKind::NetherlandsBsn,
        name: netherlands::BSN,
        layout: "8 digits + check",
        checksum: "weights 9..2, sum mod 11 mod 10",
        options: &[],
        generate: bsn,
        validate: netherlands::is_valid_bsn,
    },
    IdentifierSpec {
        kind: IdentifierKind::PolandNip,
        name: poland::NIP,
        layout: "9 digits + check",
        checksum: "weights (6,5,7,2,3,4,5,6,7), sum mod 11, 10 as 0",
        options: &[],
        generate: nip,
        validate: poland::is_valid_nip,
    },
    IdentifierSpec {
        kind: IdentifierKind::PolandRegon,
        name: poland::REGON,
        layout: "8 digits + check",
        checksum: "weights (8,9,2,3,4,5,6,7), sum mod 11, 10 as 0",
        options: &[],
        generate: regon,
        validate: poland::is_valid_regon,
    },
    IdentifierSpec {
        kind: IdentifierKind::PolandPesel,
        name: poland::PESEL,
        layout: "yymmdd with century month offset + 3 digits + gender digit + check",
        checksum: "weights (1,3,7,9,1,3,7,9,1,3), 10 - sum mod 10",
        options: &["gender", "birth_date"],
        generate: pesel,
        validate: poland::is_valid_pesel,
    },
    IdentifierSpec {
        kind: IdentifierKind::BrazilCpf,
        name: brazil::CPF,
        layout: "###.###.###-##",
        checksum: "two sequential mod 11 digits, weights from 10 then 11",
        options: &["mask"],
        generate: cpf,
        validate: brazil::is_valid_cpf,
    },
    IdentifierSpec {
        kind: IdentifierKind::BrazilCnpj,
        name: brazil::CNPJ,
        layout: "##.###.###/0001-##",
        checksum: "two sequential mod 11 digits, CNPJ weight vectors",
        options: &["mask"],
        generate: cnpj,
        validate: brazil::is_valid_cnpj,
    },
    IdentifierSpec {
        kind: IdentifierKind::ItalyFiscalCode,
        name: italy::FISCAL_CODE,
        layout: "surname(3) name(3) yy month-letter dd(+40 female) place(4) check",
        checksum: "odd positions remapped, even positions direct, sum mod 26 as a letter",
        options: &["gender"],
        generate: fiscal_code,
        validate: italy::is_valid_fiscal_code,
    },
    IdentifierSpec {
        kind: IdentifierKind::RussiaSnils,
        name: russia::SNILS,
        layout: "9 digits + 2-digit check",
        checksum: "weights 9..1; < 100 as is, 100 and 101 as 00, else mod 101",
        options: &[],
        generate: snils,
        validate: russia::is_valid_snils,
    },
    IdentifierSpec {
        kind: IdentifierKind::RussiaInn,
        name: russia::INN,
        layout: "9 digits + 2 sequential checks",
        checksum: "weighted sum mod 11 mod 10, two coefficient vectors",
        options: &[],
        generate: inn,
        validate: russia::is_valid_inn,
    },
    IdentifierSpec {
        kind: IdentifierKind::RussiaOgrn,
        name: russia::OGRN,
        layout: "12 digits + check",
        checksum: "body as integer mod 11 mod 10",
        options: &[],
        generate: ogrn,
        validate: russia::is_valid_ogrn,
    },
];

/// Generate one identifier of `kind`.
///
/// # Errors
///
/// Propagates the generator's error.
pub fn generate(
    kind: IdentifierKind,
    rng: &mut RandomSource,
    options: &IdentifierOptions,
) -> GenResult<String> {
    (kind.spec().generate)(rng, options)
}

/// Whether `value` passes the rule of `kind`.
#[must_use]
pub fn validate(kind: IdentifierKind, value: &str) -> bool {
    (kind.spec().validate)(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_indexed_by_kind() {
        for (index, spec) in CATALOG.iter().enumerate() {
            assert_eq!(spec.kind as usize, index, "{}", spec.name);
            assert_eq!(spec.kind.spec().name, spec.name);
        }
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(
            "brazil.cpf".parse::<IdentifierKind>().unwrap(),
            IdentifierKind::BrazilCpf
        );
        assert_eq!(
            " Denmark.CPR ".parse::<IdentifierKind>().unwrap(),
            IdentifierKind::DenmarkCpr
        );
        assert!(matches!(
            "mars.passport".parse::<IdentifierKind>(),
            Err(GenerationError::UnsupportedOption { .. })
        ));
    }

    #[test]
    fn test_every_kind_validates_its_output() {
        let mut rng = RandomSource::seeded(2718);
        let options = IdentifierOptions::default();
        for spec in &CATALOG {
            for _ in 0..200 {
                let value = generate(spec.kind, &mut rng, &options).unwrap();
                assert!(validate(spec.kind, &value), "{}: {value}", spec.name);
            }
        }
    }

    #[test]
    fn test_options_reach_generators() {
        let mut rng = RandomSource::seeded(1);
        let options = IdentifierOptions {
            with_mask: false,
            card_type: Some(CardType::AmericanExpress),
            service: Some("fedex".to_string()),
            ..IdentifierOptions::default()
        };
        assert_eq!(
            generate(IdentifierKind::BrazilCpf, &mut rng, &options)
                .unwrap()
                .len(),
            11
        );
        assert_eq!(
            generate(IdentifierKind::CreditCard, &mut rng, &options)
                .unwrap()
                .len(),
            17
        );
        assert_eq!(
            generate(IdentifierKind::UsaTrackingNumber, &mut rng, &options)
                .unwrap()
                .len(),
            14
        );
    }

    #[test]
    fn test_same_seed_same_catalog_output() {
        let options = IdentifierOptions::default();
        let run = |seed| {
            let mut rng = RandomSource::seeded(seed);
            CATALOG
                .iter()
                .map(|spec| generate(spec.kind, &mut rng, &options).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }
}
