//! Prices.

use crate::error::{GenResult, GenerationError};
use crate::random::RandomSource;

fn checked_range(minimum: f64, maximum: f64) -> GenResult<()> {
    if !minimum.is_finite() || !maximum.is_finite() || minimum > maximum {
        return Err(GenerationError::InvalidArgument(format!(
            "price range {minimum}..{maximum}"
        )));
    }
    Ok(())
}

/// Random price with two decimals.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidArgument`] for an inverted or
/// non-finite range.
pub fn price(rng: &mut RandomSource, minimum: f64, maximum: f64) -> GenResult<f64> {
    checked_range(minimum, maximum)?;
    Ok(rng.uniform(minimum, maximum, 2))
}

/// Random price in BTC with eight decimals.
///
/// # Errors
///
/// See [`price`].
pub fn price_in_btc(rng: &mut RandomSource, minimum: f64, maximum: f64) -> GenResult<f64> {
    checked_range(minimum, maximum)?;
    Ok(rng.uniform(minimum, maximum, 8))
}
