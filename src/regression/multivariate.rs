//! Running covariance, correlation and regression across `d` variables
//!
//! Generalizes [`PairRegression`](super::PairRegression) to every pair of
//! dimensions at once: one [`MomentAccumulator`] per dimension plus a
//! symmetric `d × d` co-moment matrix. Each observation costs O(d²), after
//! which any pairwise statistic is available without rescanning.

use super::Matrix;
use crate::statistics::MomentAccumulator;
use crate::traits::{ConfigError, MergeError, Sketch};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// Helper macro for format! in both std and no_std
macro_rules! fmt {
    ($($arg:tt)*) => {{
        #[cfg(feature = "std")]
        { format!($($arg)*) }
        #[cfg(not(feature = "std"))]
        { alloc::format!($($arg)*) }
    }};
}

/// Multivariate running statistics
///
/// The co-moment matrix `S` is only ever written through its upper
/// triangle and mirrored, so `S[(i, j)]` and `S[(j, i)]` are bitwise equal
/// and so are the derived covariances and correlations. Slopes and
/// intercepts are not symmetric: entry `(i, j)` regresses dimension `j`
/// on dimension `i`.
///
/// # Example
///
/// ```
/// use runstats::regression::MultivariateAccumulator;
///
/// let mut acc = MultivariateAccumulator::new(3).unwrap();
/// for x in -5..=10 {
///     let x = x as f64;
///     let y = 2.0 * x + 5.0;
///     acc.push(&[x, y, -3.2 * y - 3.0]).unwrap();
/// }
///
/// let slopes = acc.slopes();
/// assert!((slopes[(0, 1)] - 2.0).abs() < 1e-9);
/// assert!((slopes[(0, 2)] + 6.4).abs() < 1e-9);
/// assert!((acc.correlations()[(0, 2)] + 1.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MultivariateAccumulator {
    /// Per-dimension moments
    dims: Vec<MomentAccumulator>,
    /// Co-moment matrix (not divided by n)
    s: Matrix,
    count: u64,
}

impl MultivariateAccumulator {
    /// Create an accumulator over `dimension` variables
    ///
    /// Fails if `dimension` is zero.
    pub fn new(dimension: usize) -> Result<Self, ConfigError> {
        if dimension == 0 {
            tracing::debug!(dimension, "rejected zero dimension");
            return Err(ConfigError::InvalidDimension { dimension });
        }
        Ok(Self {
            dims: (0..dimension).map(|_| MomentAccumulator::new()).collect(),
            s: Matrix::zeros(dimension),
            count: 0,
        })
    }

    /// Number of variables
    pub fn dimension(&self) -> usize {
        self.dims.len()
    }

    fn check_point(&self, point: &[f64]) -> Result<(), ConfigError> {
        if point.len() == self.dimension() {
            Ok(())
        } else {
            Err(ConfigError::LengthMismatch {
                expected: self.dimension(),
                found: point.len(),
            })
        }
    }

    /// Add one observation
    ///
    /// Fails without changing state if `point.len()` differs from the
    /// dimension. A point containing NaN is ignored as a whole.
    pub fn push(&mut self, point: &[f64]) -> Result<(), ConfigError> {
        self.check_point(point)?;
        self.push_unchecked(point);
        Ok(())
    }

    /// Add several observations, in order
    ///
    /// Every row is validated before any is applied.
    pub fn push_rows<R: AsRef<[f64]>>(&mut self, rows: &[R]) -> Result<(), ConfigError> {
        for row in rows {
            self.check_point(row.as_ref())?;
        }
        for row in rows {
            self.push_unchecked(row.as_ref());
        }
        Ok(())
    }

    fn push_unchecked(&mut self, point: &[f64]) {
        if point.iter().any(|v| v.is_nan()) {
            return;
        }

        // Co-moments read the pre-push means
        if self.count > 0 {
            let d = self.dimension();
            let n = self.count as f64;
            let w = n / (n + 1.0);
            for i in 0..d {
                let di = self.dims[i].mean() - point[i];
                for j in i..d {
                    let dj = self.dims[j].mean() - point[j];
                    let v = self.s[(i, j)] + di * dj * w;
                    self.s[(i, j)] = v;
                    self.s[(j, i)] = v;
                }
            }
        }

        for (stats, &v) in self.dims.iter_mut().zip(point) {
            stats.push(v);
        }
        self.count += 1;
    }

    /// Combine two accumulators into a new one
    ///
    /// Fails if the dimensions differ. Neither input is modified; combining
    /// with an empty accumulator returns a copy of the other operand.
    pub fn combine(&self, other: &Self) -> Result<Self, MergeError> {
        if self.dimension() != other.dimension() {
            tracing::debug!(
                expected = self.dimension(),
                found = other.dimension(),
                "rejected merge across dimensions"
            );
            return Err(MergeError::IncompatibleConfig {
                expected: fmt!("dimension={}", self.dimension()),
                found: fmt!("dimension={}", other.dimension()),
            });
        }
        if other.count == 0 {
            return Ok(self.clone());
        }
        if self.count == 0 {
            return Ok(other.clone());
        }

        let count = self.count + other.count;
        let weight = self.count as f64 * other.count as f64 / count as f64;
        let delta: Vec<f64> = self
            .dims
            .iter()
            .zip(&other.dims)
            .map(|(a, b)| b.mean() - a.mean())
            .collect();

        let s = Matrix::symmetric_from_fn(self.dimension(), |i, j| {
            self.s[(i, j)] + other.s[(i, j)] + weight * delta[i] * delta[j]
        });

        Ok(Self {
            dims: self
                .dims
                .iter()
                .zip(&other.dims)
                .map(|(a, b)| a.combine(b))
                .collect(),
            s,
            count,
        })
    }

    /// Reset to the empty state, keeping the dimension
    pub fn reset(&mut self) {
        for stats in &mut self.dims {
            stats.reset();
        }
        self.s = Matrix::zeros(self.dimension());
        self.count = 0;
    }

    /// Reset to the empty state with a new dimension
    pub fn reset_with_dimension(&mut self, dimension: usize) -> Result<(), ConfigError> {
        *self = Self::new(dimension)?;
        Ok(())
    }

    /// Number of observations seen
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Moments of dimension `i`
    pub fn dimension_stats(&self, i: usize) -> Option<&MomentAccumulator> {
        self.dims.get(i)
    }

    /// Raw co-moment matrix
    pub fn co_moments(&self) -> &Matrix {
        &self.s
    }

    /// Regression slopes: entry `(i, j)` is the slope of `j` on `i`
    pub fn slopes(&self) -> Matrix {
        let n1 = self.count as f64 - 1.0;
        Matrix::from_fn(self.dimension(), |i, j| {
            self.s[(i, j)] / (self.dims[i].variance() * n1)
        })
    }

    /// Regression intercepts: entry `(i, j)` is `mean_j - slope(i, j) * mean_i`
    pub fn intercepts(&self) -> Matrix {
        let slopes = self.slopes();
        Matrix::from_fn(self.dimension(), |i, j| {
            self.dims[j].mean() - slopes[(i, j)] * self.dims[i].mean()
        })
    }

    /// Pearson correlation matrix
    pub fn correlations(&self) -> Matrix {
        let n1 = self.count as f64 - 1.0;
        Matrix::symmetric_from_fn(self.dimension(), |i, j| {
            let t = self.dims[i].std_dev() * self.dims[j].std_dev();
            self.s[(i, j)] / (n1 * t)
        })
    }

    /// Sample covariance matrix, all NaN for fewer than two observations
    pub fn covariances(&self) -> Matrix {
        let n1 = self.count as f64 - 1.0;
        Matrix::symmetric_from_fn(self.dimension(), |i, j| {
            if self.count < 2 {
                f64::NAN
            } else {
                self.s[(i, j)] / n1
            }
        })
    }

    fn project(&self, f: impl Fn(&MomentAccumulator) -> f64) -> Vec<f64> {
        self.dims.iter().map(f).collect()
    }

    /// Per-dimension means
    pub fn means(&self) -> Vec<f64> {
        self.project(MomentAccumulator::mean)
    }

    /// Per-dimension sample variances
    pub fn variances(&self) -> Vec<f64> {
        self.project(MomentAccumulator::variance)
    }

    /// Per-dimension sample standard deviations
    pub fn std_devs(&self) -> Vec<f64> {
        self.project(MomentAccumulator::std_dev)
    }

    /// Per-dimension skewness
    pub fn skewnesses(&self) -> Vec<f64> {
        self.project(MomentAccumulator::skewness)
    }

    /// Per-dimension excess kurtosis
    pub fn kurtoses(&self) -> Vec<f64> {
        self.project(MomentAccumulator::kurtosis)
    }

    /// Per-dimension minimums, `None` when empty
    pub fn mins(&self) -> Option<Vec<f64>> {
        self.dims.iter().map(MomentAccumulator::min).collect()
    }

    /// Per-dimension maximums, `None` when empty
    pub fn maxes(&self) -> Option<Vec<f64>> {
        self.dims.iter().map(MomentAccumulator::max).collect()
    }
}

impl Sketch for MultivariateAccumulator {
    type Item = [f64];

    /// Add one observation; a point of the wrong length is dropped
    fn update(&mut self, item: &[f64]) {
        if let Err(err) = self.push(item) {
            tracing::warn!(%err, "dropping malformed observation");
        }
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        *self = self.combine(other)?;
        Ok(())
    }

    fn clear(&mut self) {
        self.reset();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + self.dims.capacity() * core::mem::size_of::<MomentAccumulator>()
            + self.s.as_slice().len() * core::mem::size_of::<f64>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}
