//! Domain models for the data generator.
//!
//! This module contains the enumerated generator arguments and the API
//! contracts.

pub mod dto;
pub mod enums;

pub use dto::{
    ApiResponse, CatalogEntry, CatalogResponse, IdentifierQuery, IdentifierResponse,
    SchemaFieldRequest, SchemaRequest, SchemaResponse,
};
pub use enums::{
    CardType, EanFormat, Enumerable, Gender, IsbnFormat, PortRange, TimestampFormat,
};
