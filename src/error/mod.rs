//! Error handling module.
//!
//! [`GenerationError`] is the error taxonomy of the generators themselves.
//! [`AppError`] wraps it for the HTTP layer with status code mapping and the
//! standardized API error envelope.

pub mod codes;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub use codes::ErrorCode;

/// Errors raised by the randomness core and the data generators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Numeric argument or bound outside its accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Value that is not a member of the named enumeration.
    #[error("Unsupported value '{value}' for {enum_name}, expected one of: {expected}")]
    NonEnumerable {
        /// Name of the enumeration.
        enum_name: &'static str,
        /// Rejected input.
        value: String,
        /// Comma separated list of accepted values.
        expected: String,
    },

    /// Named option that the generator does not support.
    #[error("Unsupported option '{option}', expected one of: {expected}")]
    UnsupportedOption {
        /// Rejected option.
        option: String,
        /// Description of the accepted options.
        expected: String,
    },

    /// Locale without a backing dataset.
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Retry cap reached before a representable checksum was drawn.
    #[error("No valid checksum for {kind} after {attempts} attempts")]
    ChecksumUnsatisfiable {
        /// Identifier kind.
        kind: &'static str,
        /// Number of attempts made.
        attempts: u32,
    },

    /// Selection from an empty collection.
    #[error("Cannot choose from an empty collection")]
    EmptyChoice,

    /// Dataset could not be read or parsed.
    #[error("Dataset error: {0}")]
    Dataset(String),
}

impl GenerationError {
    /// Whether the error is caused by an argument the caller passed.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::NonEnumerable { .. } | Self::UnsupportedOption { .. }
        )
    }

    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument(_) => ErrorCode::INVALID_ARGUMENT,
            Self::NonEnumerable { .. } => ErrorCode::NON_ENUMERABLE,
            Self::UnsupportedOption { .. } => ErrorCode::UNSUPPORTED_OPTION,
            Self::UnsupportedLocale(_) => ErrorCode::UNSUPPORTED_LOCALE,
            Self::ChecksumUnsatisfiable { .. } => ErrorCode::CHECKSUM_UNSATISFIABLE,
            Self::EmptyChoice => ErrorCode::EMPTY_CHOICE,
            Self::Dataset(_) => ErrorCode::DATASET_ERROR,
        }
    }
}

impl From<std::io::Error> for GenerationError {
    fn from(err: std::io::Error) -> Self {
        Self::Dataset(err.to_string())
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Dataset(err.to_string())
    }
}

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Generator rejected the request or failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Generation(err) => err.error_code(),
            Self::BadRequest(_) => ErrorCode::BAD_REQUEST,
            Self::NotFound(_) => ErrorCode::NOT_FOUND,
            Self::Internal(_) => ErrorCode::INTERNAL_ERROR,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Generation(
                GenerationError::ChecksumUnsatisfiable { .. } | GenerationError::Dataset(_),
            )
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Generation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().as_i32();
        let message = self.to_string();

        tracing::error!(
            error_code = code,
            status = %status,
            message = %message,
            "Request failed"
        );

        let body = Json(json!({
            "code": code,
            "message": message,
            "data": null
        }));

        (status, body).into_response()
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias using `GenerationError`.
pub type GenResult<T> = std::result::Result<T, GenerationError>;
