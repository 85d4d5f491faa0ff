//! Uniform random number utility.
//!
//! The generator and the random layout never touch a global RNG. They draw
//! from a [`UnitSource`], which is either a real `rand` RNG wrapped in
//! [`RngSource`] or a [`SequenceSource`] replaying fixed values.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{GraphResult, GraphWorldError};

/// A source of uniformly distributed doubles in `[0, 1)`.
pub trait UnitSource {
    /// Draw the next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<S: UnitSource + ?Sized> UnitSource for &mut S {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Adapts any `rand` RNG into a [`UnitSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngSource<StdRng> {
    /// Deterministic source seeded from a `u64`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> UnitSource for RngSource<R> {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed cycle of unit values.
///
/// Values are clamped into `[0, 1)` on construction. An empty sequence
/// always yields `0.0`.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, ONE_MINUS_EPSILON) })
            .collect();
        Self { values, cursor: 0 }
    }

    /// Number of values drawn so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

const ONE_MINUS_EPSILON: f64 = 1.0 - f64::EPSILON / 2.0;

impl UnitSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Draw a double in the half-open range `[min, max)`.
///
/// Returns `min` when the range is empty (`min == max`).
#[inline]
pub fn random_in_range(source: &mut impl UnitSource, min: f64, max: f64) -> f64 {
    let unit = source.next_unit();
    let span = max - min;
    // Bounds near `f64::MAX` overflow the span; interpolate instead.
    let value = if span.is_finite() {
        min + unit * span
    } else {
        min * (1.0 - unit) + max * unit
    };
    // Rounding in the multiply can land exactly on `max`.
    if value >= max && max > min { min } else { value }
}

/// Check that `[min, max)` is a usable sampling range.
///
/// Both bounds must be finite and `min <= max`.
pub fn validate_range(axis: &str, min: f64, max: f64) -> GraphResult<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(GraphWorldError::InvalidConfig(format!(
            "{axis} bounds must be finite, got [{min}, {max})"
        )));
    }
    if min > max {
        return Err(GraphWorldError::InvalidConfig(format!(
            "{axis}_min {min} is greater than {axis}_max {max}"
        )));
    }
    Ok(())
}
