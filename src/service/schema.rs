//! Named fields and schemas.
//!
//! A [`FieldRegistry`] maps dotted names (`provider.method`) to handlers. A
//! [`Schema`] resolves a list of [`FieldSpec`]s against the registry once and
//! then evaluates them into JSON records, drawing everything from the
//! [`Session`] it is given.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value, json};

use crate::domain::{PortRange, TimestampFormat};
use crate::error::{GenResult, GenerationError};
use crate::locale::{DatasetLoader, Locale};
use crate::random::RandomSource;
use crate::service::builtins::{netherlands, russia};
use crate::service::catalog::{self, CATALOG, IdentifierOptions};
use crate::service::person::Person;
use crate::service::{code, datetime, finance, internet, payment};

/// State shared by every field evaluated in one generation session.
pub struct Session {
    rng: RandomSource,
    options: IdentifierOptions,
    loader: Arc<dyn DatasetLoader>,
    person: Option<Person>,
}

impl Session {
    /// Create a session. The `person` dataset is loaded on first use.
    #[must_use]
    pub fn new(
        seed: Option<u64>,
        locale: Locale,
        loader: Arc<dyn DatasetLoader>,
        max_attempts: u32,
    ) -> Self {
        Self {
            rng: RandomSource::new(seed),
            options: IdentifierOptions {
                locale,
                max_attempts,
                ..IdentifierOptions::default()
            },
            loader,
            person: None,
        }
    }

    /// Session locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.options.locale
    }

    /// Randomness of the session.
    pub const fn rng(&mut self) -> &mut RandomSource {
        &mut self.rng
    }

    /// Identifier options derived from the session.
    #[must_use]
    pub const fn options(&self) -> &IdentifierOptions {
        &self.options
    }

    /// Randomness together with the locale's [`Person`].
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnsupportedLocale`] if the locale has no
    /// `person` dataset.
    pub fn person_parts(&mut self) -> GenResult<(&mut RandomSource, &Person)> {
        let person = match self.person.take() {
            Some(person) => person,
            None => Person::new(self.options.locale, Arc::clone(&self.loader))?,
        };
        let person = self.person.insert(person);
        Ok((&mut self.rng, person))
    }
}

/// Field handler.
pub type FieldHandler = Arc<dyn Fn(&mut Session) -> GenResult<Value> + Send + Sync>;

/// Replace `value` with `null` with the given probability.
pub fn maybe(rng: &mut RandomSource, value: Value, probability: f64) -> Value {
    if probability > 0.0 && rng.probability() < probability {
        Value::Null
    } else {
        value
    }
}

/// Normalize the `:`, `/` and space delimiters to `.`.
fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ':' | '/' | ' ' => '.',
            other => other,
        })
        .collect()
}

/// Registry of named field handlers.
#[derive(Clone, Default)]
pub struct FieldRegistry {
    handlers: BTreeMap<String, FieldHandler>,
}

impl fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("fields", &self.handlers.len())
            .finish()
    }
}

impl FieldRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a handler.
    pub fn register<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&mut Session) -> GenResult<Value> + Send + Sync + 'static,
    {
        self.handlers.insert(normalize(name), Arc::new(handler));
    }

    /// Remove a handler. Returns whether it existed.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.handlers.remove(&normalize(name)).is_some()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no field is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Resolve a field name.
    ///
    /// Exact names win; otherwise a name matching the end of exactly one
    /// registered name (`cpf` for `brazil.cpf`) is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnsupportedOption`] for unknown or
    /// ambiguous names.
    pub fn lookup(&self, name: &str) -> GenResult<&FieldHandler> {
        let normalized = normalize(name);
        if let Some(handler) = self.handlers.get(&normalized) {
            return Ok(handler);
        }

        let suffix = format!(".{normalized}");
        let matches: Vec<(&String, &FieldHandler)> = self
            .handlers
            .iter()
            .filter(|(key, _)| key.ends_with(&suffix))
            .collect();
        match matches.as_slice() {
            [(_, handler)] => Ok(*handler),
            [] => Err(GenerationError::UnsupportedOption {
                option: name.to_string(),
                expected: "a registered field name".to_string(),
            }),
            many => Err(GenerationError::UnsupportedOption {
                option: name.to_string(),
                expected: many
                    .iter()
                    .map(|(key, _)| key.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    /// Evaluate one field.
    ///
    /// # Errors
    ///
    /// Returns lookup errors and the handler's errors.
    pub fn perform(&self, name: &str, session: &mut Session) -> GenResult<Value> {
        self.lookup(name)?(session)
    }

    /// Evaluate one field `iterations` times.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] if `iterations` is zero,
    /// plus the errors of [`perform`](Self::perform).
    pub fn perform_many(
        &self,
        name: &str,
        session: &mut Session,
        iterations: usize,
    ) -> GenResult<Vec<Value>> {
        if iterations == 0 {
            return Err(GenerationError::InvalidArgument(
                "iterations must be at least 1".to_string(),
            ));
        }
        let handler = self.lookup(name)?;
        (0..iterations).map(|_| handler(session)).collect()
    }

    /// Registry with every built-in field.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register_catalog();
        registry.register_codes();
        registry.register_payment();
        registry.register_internet();
        registry.register_finance();
        registry.register_datetime();
        registry.register_person();
        registry
    }

    fn register_catalog(&mut self) {
        for spec in &CATALOG {
            let kind = spec.kind;
            self.register(spec.name, move |session| {
                let value = catalog::generate(kind, &mut session.rng, &session.options)?;
                Ok(Value::String(value))
            });
        }
        self.register("netherlands.burgerservicenummer", |session| {
            Ok(json!(netherlands::bsn(&mut session.rng)))
        });
    }

    fn register_codes(&mut self) {
        self.register("code.pin", |session| {
            Ok(json!(code::pin(&mut session.rng, "####")))
        });
        self.register("russia.bic", |session| Ok(json!(russia::bic(&mut session.rng))));
        self.register("russia.kpp", |session| Ok(json!(russia::kpp(&mut session.rng))));
        self.register("russia.passport_series", |session| {
            Ok(json!(russia::passport_series(&mut session.rng, None)))
        });
        self.register("russia.passport_number", |session| {
            Ok(json!(russia::passport_number(&mut session.rng)))
        });
        self.register("russia.series_and_number", |session| {
            Ok(json!(russia::series_and_number(&mut session.rng)))
        });
        self.register("russia.patronymic", |session| {
            let gender = session.options.gender;
            Ok(json!(russia::patronymic(&mut session.rng, gender)?))
        });
    }

    fn register_payment(&mut self) {
        self.register("payment.cvv", |session| Ok(json!(payment::cvv(&mut session.rng))));
        self.register("payment.cid", |session| Ok(json!(payment::cid(&mut session.rng))));
        self.register("payment.credit_card_network", |session| {
            Ok(json!(payment::credit_card_network(&mut session.rng)))
        });
        self.register("payment.credit_card_expiration_date", |session| {
            Ok(json!(payment::credit_card_expiration_date(
                &mut session.rng,
                16,
                25
            )?))
        });
        self.register("payment.bitcoin_address", |session| {
            Ok(json!(payment::bitcoin_address(&mut session.rng)))
        });
        self.register("payment.ethereum_address", |session| {
            Ok(json!(payment::ethereum_address(&mut session.rng)))
        });
        self.register("payment.credit_card_owner", |session| {
            let (rng, person) = session.person_parts()?;
            let owner = payment::credit_card_owner(rng, person, None)?;
            Ok(serde_json::to_value(owner)?)
        });
    }

    fn register_internet(&mut self) {
        self.register("internet.ip_v4", |session| {
            Ok(json!(internet::ip_v4(&mut session.rng).to_string()))
        });
        self.register("internet.ip_v6", |session| {
            Ok(json!(internet::ip_v6(&mut session.rng).to_string()))
        });
        self.register("internet.ip_v4_with_port", |session| {
            Ok(json!(internet::ip_v4_with_port(
                &mut session.rng,
                PortRange::All
            )))
        });
        self.register("internet.mac_address", |session| {
            Ok(json!(internet::mac_address(&mut session.rng)))
        });
        self.register("internet.port", |session| {
            Ok(json!(internet::port(&mut session.rng, PortRange::All)))
        });
        self.register("internet.http_method", |session| {
            Ok(json!(internet::http_method(&mut session.rng)?))
        });
        self.register("internet.http_status_code", |session| {
            Ok(json!(internet::http_status_code(&mut session.rng)?))
        });
    }

    fn register_finance(&mut self) {
        self.register("finance.price", |session| {
            Ok(json!(finance::price(&mut session.rng, 500.0, 1500.0)?))
        });
        self.register("finance.price_in_btc", |session| {
            Ok(json!(finance::price_in_btc(&mut session.rng, 0.0, 2.0)?))
        });
    }

    fn register_datetime(&mut self) {
        self.register("datetime.year", |session| {
            Ok(json!(datetime::year(
                &mut session.rng,
                1990,
                datetime::current_year()
            )?))
        });
        self.register("datetime.date", |session| {
            let value = datetime::date(&mut session.rng, 2000, datetime::current_year())?;
            Ok(json!(value.to_string()))
        });
        self.register("datetime.time", |session| {
            Ok(json!(datetime::time(&mut session.rng).to_string()))
        });
        self.register("datetime.datetime", |session| {
            let year = datetime::current_year();
            let value = datetime::datetime(&mut session.rng, year, year)?;
            Ok(json!(value.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()))
        });
        self.register("datetime.week_date", |session| {
            Ok(json!(datetime::week_date(
                &mut session.rng,
                2017,
                datetime::current_year()
            )?))
        });
        self.register("datetime.day_of_month", |session| {
            Ok(json!(datetime::day_of_month(&mut session.rng)))
        });
        self.register("datetime.timestamp", |session| {
            let year = datetime::current_year();
            Ok(json!(datetime::timestamp(
                &mut session.rng,
                TimestampFormat::Posix,
                year,
                year
            )?))
        });
    }

    fn register_person(&mut self) {
        self.register("person.name", |session| {
            let (rng, person) = session.person_parts()?;
            Ok(json!(person.name(rng, None)?))
        });
        self.register("person.surname", |session| {
            let (rng, person) = session.person_parts()?;
            Ok(json!(person.surname(rng, None)?))
        });
        self.register("person.full_name", |session| {
            let (rng, person) = session.person_parts()?;
            Ok(json!(person.full_name(rng, None, false)?))
        });
        self.register("person.gender", |session| {
            let (rng, person) = session.person_parts()?;
            Ok(json!(person.gender(rng)?))
        });
        self.register("person.occupation", |session| {
            let (rng, person) = session.person_parts()?;
            Ok(json!(person.occupation(rng)?))
        });
        self.register("person.nationality", |session| {
            let (rng, person) = session.person_parts()?;
            Ok(json!(person.nationality(rng, None)?))
        });
        self.register("person.birthdate", |session| {
            Ok(json!(Person::birthdate(&mut session.rng, 1980, 2023)?.to_string()))
        });
        self.register("person.height", |session| {
            Ok(json!(Person::height(&mut session.rng, 1.5, 2.0)?))
        });
        self.register("person.weight", |session| {
            Ok(json!(Person::weight(&mut session.rng, 38, 90)?))
        });
        self.register("person.blood_type", |session| {
            Ok(json!(Person::blood_type(&mut session.rng)?))
        });
        self.register("person.password", |session| {
            Ok(json!(Person::password(&mut session.rng, 8)))
        });
        self.register("person.username", |session| {
            Ok(json!(Person::username(&mut session.rng, None)?))
        });
        self.register("person.email", |session| {
            Ok(json!(Person::email(&mut session.rng, &[])?))
        });
        self.register("person.telephone", |session| {
            Ok(json!(Person::telephone(&mut session.rng, None, '#')?))
        });
        self.register("person.identifier", |session| {
            Ok(json!(Person::identifier(&mut session.rng, "##-##/##")))
        });
    }
}

/// One output column of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Key in the output record.
    pub name: String,
    /// Registered field name.
    pub field: String,
    /// Probability of emitting `null` instead of the value.
    pub null_probability: f64,
}

impl FieldSpec {
    /// Field that is never null.
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            null_probability: 0.0,
        }
    }

    /// Builder for [`null_probability`](Self::null_probability).
    #[must_use]
    pub const fn maybe_null(mut self, probability: f64) -> Self {
        self.null_probability = probability;
        self
    }
}

/// A resolved list of fields.
pub struct Schema {
    fields: Vec<(FieldSpec, FieldHandler)>,
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(|(spec, _)| spec))
            .finish()
    }
}

impl Schema {
    /// Resolve every field against the registry.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] for an empty field list or
    /// a null probability outside `[0, 1]`, and lookup errors for unknown
    /// field names.
    pub fn new(registry: &FieldRegistry, fields: Vec<FieldSpec>) -> GenResult<Self> {
        if fields.is_empty() {
            return Err(GenerationError::InvalidArgument(
                "schema must have at least one field".to_string(),
            ));
        }

        let fields = fields
            .into_iter()
            .map(|spec| {
                if !(0.0..=1.0).contains(&spec.null_probability) {
                    return Err(GenerationError::InvalidArgument(format!(
                        "null probability of '{}' must be within [0, 1]",
                        spec.name
                    )));
                }
                let handler = Arc::clone(registry.lookup(&spec.field)?);
                Ok((spec, handler))
            })
            .collect::<GenResult<Vec<_>>>()?;

        Ok(Self { fields })
    }

    /// Evaluate the schema `iterations` times.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] if `iterations` is zero,
    /// and propagates field errors.
    pub fn create(
        &self,
        session: &mut Session,
        iterations: usize,
    ) -> GenResult<Vec<Map<String, Value>>> {
        if iterations == 0 {
            return Err(GenerationError::InvalidArgument(
                "iterations must be at least 1".to_string(),
            ));
        }
        (0..iterations).map(|_| self.record(session)).collect()
    }

    fn record(&self, session: &mut Session) -> GenResult<Map<String, Value>> {
        let mut record = Map::with_capacity(self.fields.len());
        for (spec, handler) in &self.fields {
            let value = handler(session)?;
            let value = maybe(&mut session.rng, value, spec.null_probability);
            record.insert(spec.name.clone(), value);
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::InMemoryDatasetLoader;
    use crate::service::builtins::brazil;

    fn loader() -> Arc<dyn DatasetLoader> {
        Arc::new(InMemoryDatasetLoader::new().with_dataset(
            Locale::En,
            Person::DATASET,
            json!({
                "names": {"male": ["John"], "female": ["Mary"]},
                "surnames": ["Smith"]
            }),
        ))
    }

    fn session(seed: u64) -> Session {
        Session::new(Some(seed), Locale::En, loader(), 100)
    }

    #[test]
    fn test_lookup_normalizes_delimiters() {
        let registry = FieldRegistry::builtin();
        for name in ["brazil.cpf", "brazil:cpf", "brazil/cpf", "brazil cpf", "cpf"] {
            assert!(registry.lookup(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_lookup_unknown_and_ambiguous() {
        let mut registry = FieldRegistry::builtin();
        assert!(matches!(
            registry.lookup("warp_drive"),
            Err(GenerationError::UnsupportedOption { .. })
        ));

        registry.register("custom.cpf", |_| Ok(json!("x")));
        assert!(matches!(
            registry.lookup("cpf"),
            Err(GenerationError::UnsupportedOption { .. })
        ));
        assert!(registry.lookup("custom.cpf").is_ok());
    }

    #[test]
    fn test_register_and_unregister() {
        let mut registry = FieldRegistry::new();
        registry.register("custom.answer", |_| Ok(json!(42)));
        let mut session = session(1);
        assert_eq!(registry.perform("answer", &mut session).unwrap(), json!(42));
        assert!(registry.unregister("custom:answer"));
        assert!(!registry.unregister("custom.answer"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_perform_many() {
        let registry = FieldRegistry::builtin();
        let mut session = session(2);
        let values = registry.perform_many("brazil.cpf", &mut session, 5).unwrap();
        assert_eq!(values.len(), 5);
        assert!(values.iter().all(|v| brazil::is_valid_cpf(v.as_str().unwrap())));
        assert!(
            registry
                .perform_many("brazil.cpf", &mut session, 0)
                .unwrap_err()
                .is_invalid_argument()
        );
    }

    #[test]
    fn test_schema_debug_lists_fields() {
        let registry = FieldRegistry::builtin();
        let schema = Schema::new(&registry, vec![FieldSpec::new("tax_id", "cpf")]).unwrap();
        let debug = format!("{schema:?}");
        assert!(debug.contains("tax_id"), "{debug}");
        assert!(debug.contains("cpf"), "{debug}");
    }

    #[test]
    fn test_schema_create() {
        let registry = FieldRegistry::builtin();
        let schema = Schema::new(
            &registry,
            vec![
                FieldSpec::new("owner", "person.full_name"),
                FieldSpec::new("tax_id", "cpf"),
                FieldSpec::new("phone", "telephone").maybe_null(1.0),
            ],
        )
        .unwrap();

        let records = schema.create(&mut session(3), 4).unwrap();
        assert_eq!(records.len(), 4);
        for record in &records {
            let owner = record["owner"].as_str().unwrap();
            assert!(owner == "John Smith" || owner == "Mary Smith", "{owner}");
            assert!(brazil::is_valid_cpf(record["tax_id"].as_str().unwrap()));
            assert_eq!(record["phone"], Value::Null);
        }
    }

    #[test]
    fn test_schema_is_deterministic() {
        let registry = FieldRegistry::builtin();
        let fields = vec![
            FieldSpec::new("card", "payment.credit_card"),
            FieldSpec::new("ip", "internet.ip_v4").maybe_null(0.5),
        ];
        let schema = Schema::new(&registry, fields).unwrap();
        assert_eq!(
            schema.create(&mut session(9), 10).unwrap(),
            schema.create(&mut session(9), 10).unwrap()
        );
    }

    #[test]
    fn test_schema_rejects_bad_input() {
        let registry = FieldRegistry::builtin();
        assert!(Schema::new(&registry, vec![]).is_err());
        assert!(
            Schema::new(&registry, vec![FieldSpec::new("a", "cpf").maybe_null(1.5)])
                .unwrap_err()
                .is_invalid_argument()
        );

        let schema = Schema::new(&registry, vec![FieldSpec::new("a", "cpf")]).unwrap();
        assert!(
            schema
                .create(&mut session(1), 0)
                .unwrap_err()
                .is_invalid_argument()
        );
    }

    #[test]
    fn test_person_fields_need_dataset() {
        let registry = FieldRegistry::builtin();
        let mut session = Session::new(Some(1), Locale::Ja, loader(), 100);
        assert!(matches!(
            registry.perform("person.name", &mut session),
            Err(GenerationError::UnsupportedLocale(_))
        ));
        assert!(registry.perform("russia.inn", &mut session).is_ok());
    }

    #[test]
    fn test_patronymic_field() {
        let registry = FieldRegistry::builtin();
        let mut session = session(3);
        let value = registry.perform("patronymic", &mut session).unwrap();
        let value = value.as_str().unwrap();
        assert!(value.ends_with("ич") || value.ends_with("на"), "{value}");
    }

    #[test]
    fn test_maybe() {
        let mut rng = RandomSource::seeded(1);
        assert_eq!(maybe(&mut rng, json!(1), 0.0), json!(1));
        assert_eq!(maybe(&mut rng, json!(1), 1.0), Value::Null);
    }
}
