//! Running moments (mean, variance, skewness, kurtosis, min, max)
//!
//! Computes streaming statistics up to the fourth central moment in a single
//! pass, generalizing Welford's numerically stable update. Supports merging
//! for distributed computation via Pébay's pairwise combination formulas.

use crate::math;
use crate::traits::{MergeError, Sketch};

/// Running moment accumulator
///
/// Tracks the count, the mean and the sums of centered powers `M2`, `M3`,
/// `M4` (not divided by `n`). Variance, skewness and excess kurtosis are
/// derived from these on query, so pushing a value costs O(1) and never
/// revisits history.
///
/// Statistics that need more observations than are available evaluate to
/// NaN: `mean()` on an empty accumulator, `variance()` and the higher
/// moments with fewer than two values.
///
/// # Example
///
/// ```
/// use runstats::statistics::MomentAccumulator;
///
/// let mut stats = MomentAccumulator::new();
///
/// for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     stats.push(value);
/// }
///
/// assert!((stats.mean() - 5.0).abs() < 1e-12);
/// assert!((stats.variance() - 32.0 / 7.0).abs() < 1e-12);
/// assert_eq!(stats.min(), Some(2.0));
/// assert_eq!(stats.max(), Some(9.0));
/// ```
///
/// # Distributed Usage
///
/// ```
/// use runstats::statistics::MomentAccumulator;
///
/// let left: MomentAccumulator = [1.0, 2.0, 3.0].into_iter().collect();
/// let right: MomentAccumulator = [4.0, 5.0, 6.0].into_iter().collect();
///
/// let combined = left.combine(&right);
/// assert_eq!(combined.len(), 6);
/// assert!((combined.mean() - 3.5).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MomentAccumulator {
    /// Number of values seen
    count: u64,
    /// Running mean
    m1: f64,
    /// Sum of squared deviations from the mean
    m2: f64,
    /// Sum of cubed deviations from the mean
    m3: f64,
    /// Sum of fourth-power deviations from the mean
    m4: f64,
    min: f64,
    max: f64,
}

impl Default for MomentAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl MomentAccumulator {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            m1: 0.0,
            m2: 0.0,
            m3: 0.0,
            m4: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Add a value
    ///
    /// NaN values are ignored to prevent poisoning the statistics.
    pub fn push(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }

        let n1 = self.count as f64;
        self.count += 1;
        let n = self.count as f64;

        let delta = value - self.m1;
        let delta_n = delta / n;
        let delta_n2 = delta_n * delta_n;
        let term1 = delta * delta_n * n1;

        // Each moment reads the previous values of the lower ones
        self.m4 += term1 * delta_n2 * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n2 * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;
        self.m1 += delta_n;

        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Add every value of a slice, in order
    pub fn push_slice(&mut self, values: &[f64]) {
        for &v in values {
            self.push(v);
        }
    }

    /// Combine two accumulators into a new one
    ///
    /// The result is statistically equivalent to an accumulator that saw
    /// both input sequences. Neither input is modified. Combining with an
    /// empty accumulator returns a copy of the other operand.
    pub fn combine(&self, other: &Self) -> Self {
        if other.count == 0 {
            return self.clone();
        }
        if self.count == 0 {
            return other.clone();
        }

        let na = self.count as f64;
        let nb = other.count as f64;
        let count = self.count + other.count;
        let n = count as f64;

        let delta = other.m1 - self.m1;
        let delta2 = delta * delta;
        let delta3 = delta * delta2;
        let delta4 = delta2 * delta2;

        let m1 = (na * self.m1 + nb * other.m1) / n;

        let m2 = self.m2 + other.m2 + delta2 * na * nb / n;

        let m3 = self.m3
            + other.m3
            + delta3 * na * nb * (na - nb) / (n * n)
            + 3.0 * delta * (na * other.m2 - nb * self.m2) / n;

        let m4 = self.m4
            + other.m4
            + delta4 * na * nb * (na * na - na * nb + nb * nb) / (n * n * n)
            + 6.0 * delta2 * (na * na * other.m2 + nb * nb * self.m2) / (n * n)
            + 4.0 * delta * (na * other.m3 - nb * self.m3) / n;

        Self {
            count,
            m1,
            m2,
            m3,
            m4,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Reset to the empty state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Get the number of values
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the mean, NaN when empty
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.m1
        }
    }

    /// Get the sample variance (Bessel's correction), NaN for fewer than two values
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            f64::NAN
        } else {
            self.m2 / (self.count as f64 - 1.0)
        }
    }

    /// Get the population variance, NaN when empty
    pub fn population_variance(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Get the sample standard deviation
    pub fn std_dev(&self) -> f64 {
        math::sqrt(self.variance())
    }

    /// Get the sample skewness `sqrt(n) * M3 / M2^1.5`
    pub fn skewness(&self) -> f64 {
        if self.count < 2 {
            return f64::NAN;
        }
        math::sqrt(self.count as f64) * self.m3 / (self.m2 * math::sqrt(self.m2))
    }

    /// Get the excess kurtosis `n * M4 / M2^2 - 3`
    pub fn kurtosis(&self) -> f64 {
        if self.count < 2 {
            return f64::NAN;
        }
        self.count as f64 * self.m4 / (self.m2 * self.m2) - 3.0
    }

    /// Get the minimum value
    pub fn min(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.min)
        }
    }

    /// Get the maximum value
    pub fn max(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.max)
        }
    }

    /// Get the range (max - min)
    pub fn range(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.max - self.min)
        }
    }

    /// Get the sum of all values
    pub fn sum(&self) -> f64 {
        self.m1 * self.count as f64
    }

    /// Sum of squared deviations from the mean
    pub fn m2(&self) -> f64 {
        self.m2
    }
}

impl Sketch for MomentAccumulator {
    type Item = f64;

    fn update(&mut self, item: &Self::Item) {
        self.push(*item);
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        *self = self.combine(other);
        Ok(())
    }

    fn clear(&mut self) {
        self.reset();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl Extend<f64> for MomentAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for v in iter {
            self.push(v);
        }
    }
}

impl FromIterator<f64> for MomentAccumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}
