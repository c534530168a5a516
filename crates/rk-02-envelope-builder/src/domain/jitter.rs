//! # Jitter Primitives
//!
//! Every plausible-looking value in a signature comes from one of two draws:
//!
//! | Form | Result |
//! |------|--------|
//! | `around(center)` | uniform in `[center * 0.7, center * 1.3]` |
//! | `between(min, max)` | uniform in `[min, max]` |
//!
//! For a negative center the first interval is reversed; the draw still
//! lands between the two endpoints.

use crate::domain::profile::{IntRange, ValueRange};
use rk_01_session_state::RandomSource;

/// Multiplicative spread used by [`Jitter::around`].
pub const DEFAULT_SPREAD: f64 = 0.3;

/// Bounded random draws over a shared random source.
pub struct Jitter<'a> {
    random: &'a dyn RandomSource,
}

impl<'a> Jitter<'a> {
    pub fn new(random: &'a dyn RandomSource) -> Self {
        Self { random }
    }

    /// Uniform sample within ±30% of `center`.
    pub fn around(&self, center: f64) -> f64 {
        self.around_with_spread(center, DEFAULT_SPREAD)
    }

    /// Uniform sample in `[center * (1 - spread), center * (1 + spread)]`.
    pub fn around_with_spread(&self, center: f64, spread: f64) -> f64 {
        self.between(center * (1.0 - spread), center * (1.0 + spread))
    }

    /// Uniform sample in `[min, max]`.
    pub fn between(&self, min: f64, max: f64) -> f64 {
        let value = self.random.next_f64() * (max - min) + min;
        // float rounding can land one ulp outside the endpoints
        value.max(min.min(max)).min(min.max(max))
    }

    pub fn in_range(&self, range: ValueRange) -> f64 {
        self.between(range.min, range.max)
    }

    /// Uniform integer in the half-open `range`.
    pub fn integer(&self, range: IntRange) -> i64 {
        self.random.next_range(range.low, range.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rk_01_session_state::SeededRandomSource;

    struct Extremes(f64);

    impl RandomSource for Extremes {
        fn next_f64(&self) -> f64 {
            self.0
        }

        fn next_range(&self, low: i64, _high: i64) -> i64 {
            low
        }

        fn fill_bytes(&self, dest: &mut [u8]) {
            dest.fill(0);
        }
    }

    #[test]
    fn test_between_endpoints() {
        let low = Extremes(0.0);
        assert_eq!(Jitter::new(&low).between(-0.2, 0.19), -0.2);

        let high = Extremes(1.0 - f64::EPSILON);
        let value = Jitter::new(&high).between(-0.2, 0.19);
        assert!(value <= 0.19);
        assert!(value > 0.18);
    }

    #[test]
    fn test_degenerate_range_is_constant() {
        let random = SeededRandomSource::new(3);
        let jitter = Jitter::new(&random);
        for _ in 0..100 {
            assert_eq!(jitter.between(0.0729667818829, 0.0729667818829), 0.0729667818829);
        }
    }

    #[test]
    fn test_around_zero_is_zero() {
        let random = SeededRandomSource::new(9);
        assert_eq!(Jitter::new(&random).around(0.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_around_stays_within_spread(center in -1.0e6f64..1.0e6, seed in any::<u64>()) {
            let random = SeededRandomSource::new(seed);
            let value = Jitter::new(&random).around(center);
            let shrunk = center * (1.0 - DEFAULT_SPREAD);
            let grown = center * (1.0 + DEFAULT_SPREAD);
            let (lo, hi) = (shrunk.min(grown), shrunk.max(grown));
            prop_assert!(value >= lo && value <= hi, "{} not in [{}, {}]", value, lo, hi);
        }

        #[test]
        fn prop_around_negative_centers(center in -5.0e3f64..-1.0e-3, seed in any::<u64>()) {
            let random = SeededRandomSource::new(seed);
            let value = Jitter::new(&random).around(center);
            prop_assert!(value >= center * (1.0 + DEFAULT_SPREAD));
            prop_assert!(value <= center * (1.0 - DEFAULT_SPREAD));
        }

        #[test]
        fn prop_between_stays_within_bounds(a in -1.0e6f64..1.0e6, width in 0.0f64..1.0e6, seed in any::<u64>()) {
            let random = SeededRandomSource::new(seed);
            let value = Jitter::new(&random).between(a, a + width);
            prop_assert!(value >= a && value <= a + width);
        }

        #[test]
        fn prop_integer_is_half_open(low in -10_000i64..10_000, width in 1i64..10_000, seed in any::<u64>()) {
            let random = SeededRandomSource::new(seed);
            let value = Jitter::new(&random).integer(IntRange::new(low, low + width));
            prop_assert!(value >= low && value < low + width);
        }
    }
}
