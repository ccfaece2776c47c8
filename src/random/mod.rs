//! Deterministic randomness core.
//!
//! [`RandomSource`] is the only source of non-determinism in the crate. It is
//! constructed explicitly and passed by `&mut` to every generator of a session,
//! so two sessions never share state unless the caller decides they should.
//!
//! The stream is produced by ChaCha8, which yields identical output on every
//! platform for the same seed and call sequence.

use rand::distr::uniform::{SampleRange, SampleUniform};
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::Enumerable;
use crate::error::{GenResult, GenerationError};

/// Upper-case ASCII letters used by masked codes.
pub const ASCII_UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Decimal digits.
pub const DIGITS: &[u8] = b"0123456789";

/// Default precision of [`RandomSource::uniform15`].
pub const DEFAULT_PRECISION: u32 = 15;

/// Seedable pseudo-random source shared by the generators of one session.
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: Option<u64>,
    rng: ChaCha8Rng,
}

impl RandomSource {
    /// Create a source. `None` means a non-reproducible, entropy-derived state.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed,
            rng: Self::fresh_state(seed),
        }
    }

    /// Create a source seeded with an explicit value.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Create a non-reproducible source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(None)
    }

    /// Reset the internal state.
    ///
    /// With an explicit seed every subsequent draw is a pure function of it;
    /// with `None` the state is re-derived from entropy. Prior state is fully
    /// discarded in both cases.
    pub fn seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
        self.rng = Self::fresh_state(seed);
    }

    /// The explicit seed, if the source was seeded with one.
    #[must_use]
    pub const fn current_seed(&self) -> Option<u64> {
        self.seed
    }

    fn fresh_state(seed: Option<u64>) -> ChaCha8Rng {
        match seed {
            Some(value) => ChaCha8Rng::seed_from_u64(value),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    /// Uniform float in `[0, 1)`.
    pub fn probability(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform float between `low` and `high`, rounded to `precision` decimal
    /// digits after the draw.
    ///
    /// Whether `high` itself can be returned depends on the rounding.
    pub fn uniform(&mut self, low: f64, high: f64, precision: u32) -> f64 {
        let value = low + (high - low) * self.probability();
        round_to(value, precision)
    }

    /// [`uniform`](Self::uniform) with the default precision of 15 digits.
    pub fn uniform15(&mut self, low: f64, high: f64) -> f64 {
        self.uniform(low, high, DEFAULT_PRECISION)
    }

    /// Inclusive integer draw.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] if `low > high`.
    pub fn integer(&mut self, low: i64, high: i64) -> GenResult<i64> {
        if low > high {
            return Err(GenerationError::InvalidArgument(format!(
                "empty range: {low} > {high}"
            )));
        }
        Ok(self.rng.random_range(low..=high))
    }

    /// `n` inclusive integer draws.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] if `n` is zero or the
    /// range is empty.
    pub fn randints(&mut self, n: usize, low: i64, high: i64) -> GenResult<Vec<i64>> {
        if n == 0 {
            return Err(GenerationError::InvalidArgument(
                "number of elements must be greater than zero".to_string(),
            ));
        }
        (0..n).map(|_| self.integer(low, high)).collect()
    }

    /// Draw from a constant, non-empty range.
    ///
    /// Internal counterpart of [`integer`](Self::integer) for bounds fixed by
    /// an identifier layout.
    pub(crate) fn range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    /// A single decimal digit.
    pub fn digit(&mut self) -> u8 {
        self.rng.random_range(0..=9)
    }

    /// `n` independent decimal digits.
    pub fn digits(&mut self, n: usize) -> Vec<u8> {
        (0..n).map(|_| self.digit()).collect()
    }

    /// Uniform element of `items`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EmptyChoice`] if `items` is empty.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> GenResult<&'a T> {
        items.choose(&mut self.rng).ok_or(GenerationError::EmptyChoice)
    }

    /// `k` elements drawn with replacement.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EmptyChoice`] if `items` is empty and `k > 0`.
    pub fn choices<'a, T>(&mut self, items: &'a [T], k: usize) -> GenResult<Vec<&'a T>> {
        (0..k).map(|_| self.choice(items)).collect()
    }

    /// `k` elements drawn without replacement. No index is returned twice.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] if `k` exceeds the length
    /// of `items`.
    pub fn sample<'a, T>(&mut self, items: &'a [T], k: usize) -> GenResult<Vec<&'a T>> {
        if k > items.len() {
            return Err(GenerationError::InvalidArgument(format!(
                "sample larger than population: {k} > {}",
                items.len()
            )));
        }
        Ok(rand::seq::index::sample(&mut self.rng, items.len(), k)
            .iter()
            .filter_map(|index| items.get(index))
            .collect())
    }

    /// Key drawn with probability proportional to its weight.
    ///
    /// Draws `r` uniformly in `[0, total)` and walks the pairs in slice order,
    /// subtracting each weight until `r <= 0`. Keys with zero weight are
    /// skipped, so a single positively weighted key is always returned.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EmptyChoice`] for an empty slice and
    /// [`GenerationError::InvalidArgument`] for negative or non-finite weights
    /// or an all-zero total.
    pub fn weighted_choice<'a, K>(&mut self, choices: &'a [(K, f64)]) -> GenResult<&'a K> {
        if choices.is_empty() {
            return Err(GenerationError::EmptyChoice);
        }
        if choices
            .iter()
            .any(|(_, weight)| !weight.is_finite() || *weight < 0.0)
        {
            return Err(GenerationError::InvalidArgument(
                "weights must be finite and non-negative".to_string(),
            ));
        }

        let total: f64 = choices.iter().map(|(_, weight)| weight).sum();
        if !total.is_finite() {
            return Err(GenerationError::InvalidArgument(
                "total weight overflows f64".to_string(),
            ));
        }
        if total <= 0.0 {
            return Err(GenerationError::InvalidArgument(
                "total weight must be positive".to_string(),
            ));
        }

        let mut remainder = self.uniform15(0.0, total);
        let mut last = None;
        for (key, weight) in choices.iter().filter(|(_, weight)| *weight > 0.0) {
            remainder -= weight;
            last = Some(key);
            if remainder <= 0.0 {
                return Ok(key);
            }
        }

        // Rounding can leave a sliver above zero after the last key.
        last.ok_or(GenerationError::EmptyChoice)
    }

    /// Replace every `char_placeholder` with a random upper-case letter and
    /// every `digit_placeholder` with a random digit. Other characters pass
    /// through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] if both placeholders are
    /// the same character.
    pub fn masked_code(
        &mut self,
        mask: &str,
        char_placeholder: char,
        digit_placeholder: char,
    ) -> GenResult<String> {
        if char_placeholder == digit_placeholder {
            return Err(GenerationError::InvalidArgument(format!(
                "placeholders must differ, both are '{char_placeholder}'"
            )));
        }

        Ok(mask
            .chars()
            .map(|c| {
                if c == char_placeholder {
                    self.pick_ascii(ASCII_UPPERCASE)
                } else if c == digit_placeholder {
                    self.pick_ascii(DIGITS)
                } else {
                    c
                }
            })
            .collect())
    }

    /// [`masked_code`](Self::masked_code) with `@` for letters and `#` for digits.
    pub fn custom_code(&mut self, mask: &str) -> String {
        mask.chars()
            .map(|c| match c {
                '@' => self.pick_ascii(ASCII_UPPERCASE),
                '#' => self.pick_ascii(DIGITS),
                other => other,
            })
            .collect()
    }

    /// String of `len` independent picks from an ASCII alphabet.
    pub fn string_from(&mut self, alphabet: &[u8], len: usize) -> String {
        (0..len).map(|_| self.pick_ascii(alphabet)).collect()
    }

    fn pick_ascii(&mut self, alphabet: &[u8]) -> char {
        alphabet
            .choose(&mut self.rng)
            .map_or('?', |byte| char::from(*byte))
    }

    /// `n` independent random bytes.
    pub fn bytes(&mut self, n: usize) -> Vec<u8> {
        let mut buf = vec![0_u8; n];
        self.rng.fill_bytes(&mut buf);
        buf
    }

    /// Uniform pick over all variants of an enumeration.
    pub fn choose_variant<E: Enumerable>(&mut self) -> E {
        let index = self.rng.random_range(0..E::VARIANTS.len());
        E::VARIANTS[index]
    }

    /// The given variant, or a random one when unset.
    pub fn variant_or_random<E: Enumerable>(&mut self, value: Option<E>) -> E {
        value.unwrap_or_else(|| self.choose_variant())
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Round to `precision` decimal digits.
#[must_use]
pub fn round_to(value: f64, precision: u32) -> f64 {
    let Ok(exponent) = i32::try_from(precision) else {
        return value;
    };
    let factor = 10_f64.powi(exponent);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomSource::seeded(42);
        let mut b = RandomSource::seeded(42);

        for _ in 0..50 {
            assert_eq!(a.integer(0, 1_000_000).unwrap(), b.integer(0, 1_000_000).unwrap());
            assert_eq!(a.uniform15(-5.0, 5.0).to_bits(), b.uniform15(-5.0, 5.0).to_bits());
            assert_eq!(a.custom_code("@@##"), b.custom_code("@@##"));
        }
    }

    #[test]
    fn test_reseed_discards_prior_state() {
        let mut rng = RandomSource::seeded(7);
        let first: Vec<u8> = rng.bytes(16);
        rng.integer(0, 10).unwrap();
        rng.seed(Some(7));
        assert_eq!(rng.bytes(16), first);
        assert_eq!(rng.current_seed(), Some(7));

        rng.seed(None);
        assert_eq!(rng.current_seed(), None);
    }

    #[test]
    fn test_uniform_precision_and_bounds() {
        let mut rng = RandomSource::seeded(1);
        for _ in 0..200 {
            let value = rng.uniform(10.0, 20.0, 2);
            assert!((10.0..=20.0).contains(&value));
            assert_eq!(round_to(value, 2).to_bits(), value.to_bits());
        }
    }

    #[test]
    fn test_integer_is_inclusive() {
        let mut rng = RandomSource::seeded(3);
        let draws: Vec<i64> = (0..500).map(|_| rng.integer(1, 3).unwrap()).collect();
        assert!(draws.contains(&1));
        assert!(draws.contains(&3));
        assert!(draws.iter().all(|d| (1..=3).contains(d)));
        assert!(rng.integer(5, 4).is_err());
    }

    #[test]
    fn test_randints_rejects_zero_length() {
        let mut rng = RandomSource::seeded(3);
        assert_eq!(rng.randints(4, 1, 100).unwrap().len(), 4);
        assert!(matches!(
            rng.randints(0, 1, 100),
            Err(GenerationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_choice_on_empty_slice() {
        let mut rng = RandomSource::seeded(3);
        let empty: [u8; 0] = [];
        assert_eq!(rng.choice(&empty), Err(GenerationError::EmptyChoice));
        assert_eq!(rng.choices(&empty, 0).unwrap().len(), 0);
        assert_eq!(rng.choices(&[1, 2, 3], 10).unwrap().len(), 10);
    }

    #[test]
    fn test_sample_never_repeats_an_index() {
        let mut rng = RandomSource::seeded(11);
        let items: Vec<u32> = (0..20).collect();
        for _ in 0..50 {
            let mut picked: Vec<u32> = rng.sample(&items, 20).unwrap().into_iter().copied().collect();
            picked.sort_unstable();
            assert_eq!(picked, items);
        }
        assert!(rng.sample(&items, 21).is_err());
    }

    #[test]
    fn test_weighted_choice_single_positive_key() {
        let mut rng = RandomSource::seeded(5);
        let choices = [("zero", 0.0), ("only", 2.5), ("none", 0.0)];
        for _ in 0..500 {
            assert_eq!(*rng.weighted_choice(&choices).unwrap(), "only");
        }
    }

    #[test]
    fn test_weighted_choice_errors() {
        let mut rng = RandomSource::seeded(5);
        let empty: [(&str, f64); 0] = [];
        assert_eq!(rng.weighted_choice(&empty), Err(GenerationError::EmptyChoice));
        assert!(rng.weighted_choice(&[("a", -1.0)]).is_err());
        assert!(rng.weighted_choice(&[("a", 0.0)]).is_err());
    }

    #[test]
    fn test_weighted_choice_rejects_overflowing_total() {
        let mut rng = RandomSource::seeded(6);
        let choices = [("a", f64::MAX), ("b", f64::MAX)];
        assert!(matches!(
            rng.weighted_choice(&choices),
            Err(GenerationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_weighted_choice_follows_weights() {
        let mut rng = RandomSource::seeded(9);
        let choices = [("rare", 1.0), ("common", 9.0)];
        let common = (0..2000)
            .filter(|_| *rng.weighted_choice(&choices).unwrap() == "common")
            .count();
        assert!(common > 1600, "common picked {common} times");
    }

    #[test]
    fn test_masked_code_is_reproducible() {
        let mut a = RandomSource::seeded(2024);
        let mut b = RandomSource::seeded(2024);
        let first = a.masked_code("###-AA", '@', '#').unwrap();
        let second = b.masked_code("###-AA", '@', '#').unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
        assert!(first[..3].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(&first[3..], "-AA");
    }

    #[test]
    fn test_masked_code_letters_and_placeholder_clash() {
        let mut rng = RandomSource::seeded(8);
        let code = rng.masked_code("@@ / @@", '@', '#').unwrap();
        assert!(code[..2].chars().all(|c| c.is_ascii_uppercase()));
        assert_eq!(&code[2..5], " / ");
        assert!(rng.masked_code("##", '#', '#').is_err());
    }

    #[test]
    fn test_bytes_length() {
        let mut rng = RandomSource::seeded(8);
        assert_eq!(rng.bytes(0).len(), 0);
        assert_eq!(rng.bytes(33).len(), 33);
    }

    #[test]
    fn test_variant_or_random() {
        let mut rng = RandomSource::seeded(8);
        assert_eq!(rng.variant_or_random(Some(Gender::Female)), Gender::Female);
        let picks: Vec<Gender> = (0..100).map(|_| rng.variant_or_random::<Gender>(None)).collect();
        assert!(picks.contains(&Gender::Male));
        assert!(picks.contains(&Gender::Female));
    }
}
