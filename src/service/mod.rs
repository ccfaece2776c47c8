//! Service layer module.
//!
//! Generators for locale data and checksum-bearing identifiers, the
//! identifier catalog and the schema engine built on top of them.

pub mod builtins;
pub mod catalog;
pub mod checksum;
pub mod code;
pub mod datetime;
pub mod finance;
pub mod internet;
pub mod payment;
pub mod person;
pub mod schema;

pub use catalog::{CATALOG, IdentifierKind, IdentifierOptions, IdentifierSpec};
pub use person::Person;
pub use schema::{FieldRegistry, FieldSpec, Schema, Session};
