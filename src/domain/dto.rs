//! Data Transfer Objects for API requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{CardType, EanFormat, Gender, IsbnFormat};
use crate::error::GenResult;
use crate::locale::Locale;
use crate::service::catalog::{IdentifierKind, IdentifierOptions, IdentifierSpec};
use crate::service::schema::FieldSpec;

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code (0 = success, non-zero = error).
    pub code: i32,

    /// Human-readable message.
    pub message: String,

    /// Response data (null on error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a success response.
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

const fn default_count() -> u32 {
    1
}

/// Query string of `GET /v1/identifier/{name}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentifierQuery {
    /// Number of values (default: 1).
    #[serde(default = "default_count")]
    pub count: u32,

    /// Seed for a reproducible response.
    pub seed: Option<u64>,

    /// Gender token.
    pub gender: Option<String>,

    /// Card network token.
    pub card_type: Option<String>,

    /// ISBN or EAN format token, depending on the identifier.
    pub format: Option<String>,

    /// Locale code.
    pub locale: Option<String>,

    /// Birth date, `YYYY-MM-DD`.
    pub birth_date: Option<NaiveDate>,

    /// Emit separators for masked layouts (default: true).
    pub mask: Option<bool>,

    /// Postal service of tracking numbers.
    pub service: Option<String>,
}

impl IdentifierQuery {
    /// Validate the request.
    pub fn validate(&self, max_count: u32) -> Result<(), String> {
        if self.count == 0 {
            return Err("count must be at least 1".to_string());
        }
        if self.count > max_count {
            return Err(format!("count cannot exceed {max_count}"));
        }
        Ok(())
    }

    /// Parse the textual options for `kind`.
    ///
    /// `format` is read as an [`IsbnFormat`] for ISBNs and as an
    /// [`EanFormat`] for EANs, and ignored otherwise.
    ///
    /// # Errors
    ///
    /// Returns the parse error of the first malformed option.
    pub fn to_options(
        &self,
        kind: IdentifierKind,
        default_locale: Locale,
        max_attempts: u32,
    ) -> GenResult<IdentifierOptions> {
        let format = self.format.as_deref();
        Ok(IdentifierOptions {
            gender: self.gender.as_deref().map(str::parse::<Gender>).transpose()?,
            birth_date: self.birth_date,
            card_type: self
                .card_type
                .as_deref()
                .map(str::parse::<CardType>)
                .transpose()?,
            isbn_format: match kind {
                IdentifierKind::Isbn => format.map(str::parse::<IsbnFormat>).transpose()?,
                _ => None,
            },
            ean_format: match kind {
                IdentifierKind::Ean => format.map(str::parse::<EanFormat>).transpose()?,
                _ => None,
            },
            locale: self
                .locale
                .as_deref()
                .map(str::parse::<Locale>)
                .transpose()?
                .unwrap_or(default_locale),
            with_mask: self.mask.unwrap_or(true),
            service: self.service.clone(),
            max_attempts,
        })
    }
}

/// Generated identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifierResponse {
    /// Catalog name.
    pub name: String,

    /// Seed the values were drawn with, if any.
    pub seed: Option<u64>,

    /// Generated values.
    pub values: Vec<String>,
}

/// One catalog row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Catalog name.
    pub name: String,

    /// Field layout.
    pub layout: String,

    /// Checksum algorithm.
    pub checksum: String,

    /// Accepted query options.
    pub options: Vec<String>,
}

impl From<&IdentifierSpec> for CatalogEntry {
    fn from(spec: &IdentifierSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            layout: spec.layout.to_string(),
            checksum: spec.checksum.to_string(),
            options: spec.options.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Identifier catalog and the schema field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    /// Checksummed identifiers.
    pub identifiers: Vec<CatalogEntry>,

    /// Every field usable in a schema.
    pub fields: Vec<String>,
}

/// One field of a schema request.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaFieldRequest {
    /// Output key.
    pub name: String,

    /// Field name, e.g. `person.full_name` or `cpf`.
    pub field: String,

    /// Probability of `null` (default: 0).
    #[serde(default)]
    pub null_probability: f64,
}

impl From<SchemaFieldRequest> for FieldSpec {
    fn from(req: SchemaFieldRequest) -> Self {
        Self::new(req.name, req.field).maybe_null(req.null_probability)
    }
}

/// Body of `POST /v1/schema`.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaRequest {
    /// Seed for a reproducible response.
    pub seed: Option<u64>,

    /// Locale code.
    pub locale: Option<String>,

    /// Number of records (default: 1).
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Record fields.
    pub fields: Vec<SchemaFieldRequest>,
}

const fn default_iterations() -> u32 {
    1
}

impl SchemaRequest {
    /// Validate the request.
    pub fn validate(&self, max_count: u32) -> Result<(), String> {
        if self.fields.is_empty() {
            return Err("fields cannot be empty".to_string());
        }
        if self.fields.iter().any(|f| f.name.is_empty()) {
            return Err("field name is required".to_string());
        }
        if self.iterations > max_count {
            return Err(format!("iterations cannot exceed {max_count}"));
        }
        Ok(())
    }
}

/// Generated records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaResponse {
    /// Seed the records were drawn with, if any.
    pub seed: Option<u64>,

    /// Generated records.
    pub records: Vec<Map<String, Value>>,
}
