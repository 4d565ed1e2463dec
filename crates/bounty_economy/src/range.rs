//! # Reward Ranges
//!
//! **Closed real intervals sampled into integer quantities.**
//!
//! Rule authors write fractional quantities ("2.5 experience", "0.7 to 5.3
//! coins") but rewards are granted in whole units. The sampler rounds
//! stochastically so that the average of many draws converges to the mean
//! of the interval, without a float ever reaching the reward system.
//!
//! ## Accepted Notations
//!
//! | Text | Range |
//! |---|---|
//! | `5` | `[5, 5]` |
//! | `2.5` | `[2.5, 2.5]` |
//! | `1-5` | `[1, 5]` |
//! | `-3 - -1` | `[-3, -1]` |
//! | `[1, 5]` | `[1, 5]` |

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, EconomyResult};

/// An immutable closed interval `[min, max]` with `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RangeRepr", into = "[f64; 2]")]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    /// The constant zero range.
    pub const ZERO: Self = Self { min: 0.0, max: 0.0 };

    /// Creates a range from two bounds in any order.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a range, rejecting NaN and infinite bounds.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::NonFiniteBound`] for a non-finite bound.
    pub fn try_new(a: f64, b: f64) -> EconomyResult<Self> {
        for bound in [a, b] {
            if !bound.is_finite() {
                return Err(EconomyError::NonFiniteBound(bound));
            }
        }
        Ok(Self::new(a, b))
    }

    /// Creates a degenerate range holding a single value.
    #[inline]
    #[must_use]
    pub const fn constant(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Lower bound.
    #[inline]
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[inline]
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Midpoint of the interval, the expected value of every sampler.
    #[inline]
    #[must_use]
    pub fn mean(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Returns true if `min == max`.
    #[inline]
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_constant(&self) -> bool {
        self.min == self.max
    }

    /// Returns true if `value` lies inside the interval.
    #[inline]
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Scales both bounds by `factor`.
    ///
    /// Negative factors are not rejected here; the bounds are re-ordered so
    /// the result is always a well-formed interval.
    #[must_use]
    pub fn multiply(&self, factor: f64) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }

    /// Compares bounds within `epsilon`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.min - other.min).abs() <= epsilon && (self.max - other.max).abs() <= epsilon
    }

    /// Draws an integer whose expectation is [`Range::mean`].
    ///
    /// A constant range is rounded stochastically. A genuine interval draws
    /// uniformly from its integer core `[ceil(min), floor(max)]` and then
    /// steps one unit outwards with a probability taken from the fractional
    /// tail on that side. An interval with no integer inside falls back to a
    /// uniform real draw rounded stochastically.
    pub fn sample_int<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        if self.is_constant() {
            return round_stochastic(self.min, rng);
        }

        let low = self.min.ceil();
        let high = self.max.floor();
        if low > high {
            let value = rng.gen_range(self.min..self.max);
            return round_stochastic(value, rng);
        }

        let mut value = rng.gen_range(low as i64..=high as i64);

        // A tail of width w shifts the mean by w / 2.
        let below = (low - self.min) / 2.0;
        let above = (self.max - high) / 2.0;
        if below > 0.0 && rng.gen::<f64>() < below {
            value -= 1;
        }
        if above > 0.0 && rng.gen::<f64>() < above {
            value += 1;
        }
        value
    }
}

/// Rounds `value` to a neighbouring integer, away from zero with probability
/// equal to its fractional part.
///
/// The expectation of the result is exactly `value`.
pub fn round_stochastic<R: Rng + ?Sized>(value: f64, rng: &mut R) -> i64 {
    let whole = value.trunc();
    let fraction = (value - whole).abs();
    let mut result = whole as i64;
    if fraction > 0.0 && rng.gen::<f64>() < fraction {
        result += value.signum() as i64;
    }
    result
}

impl Default for Range {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Range {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.min + rhs.min, self.max + rhs.max)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_constant() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{} - {}", self.min, self.max)
        }
    }
}

impl From<f64> for Range {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl From<Range> for [f64; 2] {
    fn from(range: Range) -> Self {
        [range.min, range.max]
    }
}

impl FromStr for Range {
    type Err = EconomyError;

    fn from_str(text: &str) -> EconomyResult<Self> {
        let invalid = |reason: &'static str| EconomyError::InvalidRange {
            text: text.to_string(),
            reason,
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty"));
        }

        if let Some(inner) = trimmed.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            let mut parts = inner.split(',');
            let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(invalid("expected [min, max]"));
            };
            return Self::try_new(parse_bound(a, &invalid)?, parse_bound(b, &invalid)?);
        }

        if let Ok(value) = trimmed.parse::<f64>() {
            return Self::try_new(value, value);
        }

        // The separator is the first '-' that follows a complete number.
        let separator = trimmed.char_indices().skip(1).find_map(|(at, ch)| {
            let before = trimmed[..at].trim_end();
            let ends_number = before.ends_with(|c: char| c.is_ascii_digit() || c == '.');
            (ch == '-' && ends_number).then_some(at)
        });
        let Some(at) = separator else {
            return Err(invalid("expected a number or min-max"));
        };
        let low = parse_bound(&trimmed[..at], &invalid)?;
        let high = parse_bound(&trimmed[at + 1..], &invalid)?;
        Self::try_new(low, high)
    }
}

fn parse_bound(
    text: &str,
    invalid: &impl Fn(&'static str) -> EconomyError,
) -> EconomyResult<f64> {
    text.trim().parse().map_err(|_| invalid("bound is not a number"))
}

/// Every shape a range may take in a configuration file.
#[derive(Deserialize)]
#[serde(untagged)]
enum RangeRepr {
    Number(f64),
    Pair([f64; 2]),
    Table { min: f64, max: f64 },
    Text(String),
}

impl TryFrom<RangeRepr> for Range {
    type Error = EconomyError;

    fn try_from(repr: RangeRepr) -> EconomyResult<Self> {
        match repr {
            RangeRepr::Number(value) => Self::try_new(value, value),
            RangeRepr::Pair([a, b]) | RangeRepr::Table { min: a, max: b } => Self::try_new(a, b),
            RangeRepr::Text(text) => text.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DRAWS: u32 = 100_000;

    fn average(range: Range, seed: u64) -> f64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let total: i64 = (0..DRAWS).map(|_| range.sample_int(&mut rng)).sum();
        total as f64 / f64::from(DRAWS)
    }

    #[test]
    fn test_interval_expectation() {
        let mean = average(Range::new(0.7, 5.3), 1);
        assert!((mean - 3.0).abs() < 0.05, "mean was {mean}");
    }

    #[test]
    fn test_constant_expectation() {
        let mean = average(Range::constant(2.5), 2);
        assert!((mean - 2.5).abs() < 0.02, "mean was {mean}");
    }

    #[test]
    fn test_negative_constant_expectation() {
        let mean = average(Range::constant(-1.25), 3);
        assert!((mean + 1.25).abs() < 0.02, "mean was {mean}");
    }

    #[test]
    fn test_asymmetric_interval_expectation() {
        let range = Range::new(0.5, 3.0);
        assert!((range.mean() - 1.75).abs() < f64::EPSILON);
        let mean = average(range, 4);
        assert!((mean - range.mean()).abs() < 0.03, "mean was {mean}");
    }

    #[test]
    fn test_sub_unit_interval_expectation() {
        let mean = average(Range::new(0.2, 0.7), 5);
        assert!((mean - 0.45).abs() < 0.02, "mean was {mean}");
    }

    #[test]
    fn test_draws_stay_within_rounded_bounds() {
        let range = Range::new(0.7, 5.3);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        for _ in 0..10_000 {
            let value = range.sample_int(&mut rng);
            assert!((0..=6).contains(&value), "drew {value}");
        }
    }

    #[test]
    fn test_integer_constant_is_exact() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1_000 {
            assert_eq!(Range::constant(4.0).sample_int(&mut rng), 4);
        }
    }

    #[test]
    fn test_multiply() {
        assert_eq!(Range::new(1.0, 2.0).multiply(3.0), Range::new(3.0, 6.0));
        let r = Range::new(1.5, 4.0);
        assert!(r.multiply(0.5).multiply(4.0).approx_eq(&r.multiply(2.0), 1e-12));
        assert_eq!(Range::new(1.0, 2.0).multiply(-1.0), Range::new(-2.0, -1.0));
    }

    #[test]
    fn test_new_orders_bounds() {
        let range = Range::new(5.0, 1.0);
        assert_eq!((range.min(), range.max()), (1.0, 5.0));
        assert!(range.contains(3.0));
        assert!(!range.contains(5.5));
    }

    #[test]
    fn test_parse_notations() {
        assert_eq!("5".parse::<Range>(), Ok(Range::constant(5.0)));
        assert_eq!(" 2.5 ".parse::<Range>(), Ok(Range::constant(2.5)));
        assert_eq!("1-5".parse::<Range>(), Ok(Range::new(1.0, 5.0)));
        assert_eq!("-3 - -1".parse::<Range>(), Ok(Range::new(-3.0, -1.0)));
        assert_eq!("[1, 5]".parse::<Range>(), Ok(Range::new(1.0, 5.0)));
        assert!("abc".parse::<Range>().is_err());
        assert!("".parse::<Range>().is_err());
        assert!("[1, 2, 3]".parse::<Range>().is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(
            Range::try_new(1.0, f64::INFINITY),
            Err(EconomyError::NonFiniteBound(f64::INFINITY))
        );
        assert!(Range::try_new(f64::NAN, 1.0).is_err());
        assert!("inf".parse::<Range>().is_err());
    }

    #[test]
    fn test_deserialize_shapes() {
        #[derive(Deserialize)]
        struct Body {
            a: Range,
            b: Range,
            c: Range,
            d: Range,
        }

        let body: Body = toml::from_str(
            r#"
            a = 3
            b = [1.0, 2.0]
            c = { min = 4, max = 8 }
            d = "2-6"
            "#,
        )
        .unwrap();

        assert_eq!(body.a, Range::constant(3.0));
        assert_eq!(body.b, Range::new(1.0, 2.0));
        assert_eq!(body.c, Range::new(4.0, 8.0));
        assert_eq!(body.d, Range::new(2.0, 6.0));
    }

    #[test]
    fn test_add_and_display() {
        let sum = Range::new(1.0, 2.0) + Range::constant(0.5);
        assert_eq!(sum, Range::new(1.5, 2.5));
        assert_eq!(Range::constant(3.0).to_string(), "3");
        assert_eq!(Range::new(1.0, 2.5).to_string(), "1 - 2.5");
    }
}
