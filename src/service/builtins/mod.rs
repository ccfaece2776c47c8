//! Country specific identifiers.
//!
//! One module per country. Generators are free functions over a
//! [`crate::random::RandomSource`]; each checksummed kind has a matching
//! `is_valid_*` function that recomputes its rule.

pub mod brazil;
pub mod denmark;
pub mod italy;
pub mod netherlands;
pub mod poland;
pub mod russia;
pub mod usa;
