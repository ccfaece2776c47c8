//! HTTP request handlers.

pub mod health;
pub mod identifier;
pub mod schema;
