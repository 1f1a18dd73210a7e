//! Running simple linear regression between two variables

use crate::statistics::MomentAccumulator;
use crate::traits::{ConfigError, MergeError, Sketch};

/// Running least-squares regression of `y` on `x`
///
/// Keeps one [`MomentAccumulator`] per variable plus the co-moment
/// `S_xy = Σ (x_i - mean_x)(y_i - mean_y)`, updated with the same
/// incremental discipline as `M2`. Slope, intercept, correlation and
/// covariance are derived on query and are NaN until two pairs have been
/// seen.
///
/// # Example
///
/// ```
/// use runstats::regression::PairRegression;
///
/// let mut reg = PairRegression::new();
/// for x in 0..10 {
///     let x = x as f64;
///     reg.push(x, 3.0 * x - 1.0);
/// }
///
/// assert!((reg.slope() - 3.0).abs() < 1e-12);
/// assert!((reg.intercept() + 1.0).abs() < 1e-12);
/// assert!((reg.correlation() - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PairRegression {
    x: MomentAccumulator,
    y: MomentAccumulator,
    /// Co-moment of x and y (not divided by n)
    s_xy: f64,
    count: u64,
}

impl Default for PairRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl PairRegression {
    /// Create a new empty regression
    pub fn new() -> Self {
        Self {
            x: MomentAccumulator::new(),
            y: MomentAccumulator::new(),
            s_xy: 0.0,
            count: 0,
        }
    }

    /// Add an `(x, y)` observation
    ///
    /// A pair with a NaN in either coordinate is ignored as a whole.
    pub fn push(&mut self, x: f64, y: f64) {
        if x.is_nan() || y.is_nan() {
            return;
        }

        // Must read the means before either marginal is updated
        if self.count > 0 {
            let n = self.count as f64;
            self.s_xy += (self.x.mean() - x) * (self.y.mean() - y) * n / (n + 1.0);
        }

        self.x.push(x);
        self.y.push(y);
        self.count += 1;
    }

    /// Add `(xs[i], ys[i])` for every `i`
    ///
    /// Fails without pushing anything if the slices differ in length.
    pub fn push_slices(&mut self, xs: &[f64], ys: &[f64]) -> Result<(), ConfigError> {
        if xs.len() != ys.len() {
            tracing::debug!(x_len = xs.len(), y_len = ys.len(), "rejected unpaired slices");
            return Err(ConfigError::LengthMismatch {
                expected: xs.len(),
                found: ys.len(),
            });
        }
        for (&x, &y) in xs.iter().zip(ys) {
            self.push(x, y);
        }
        Ok(())
    }

    /// Combine two regressions into a new one
    ///
    /// Neither input is modified. Combining with an empty regression returns
    /// a copy of the other operand.
    pub fn combine(&self, other: &Self) -> Self {
        if other.count == 0 {
            return self.clone();
        }
        if self.count == 0 {
            return other.clone();
        }

        let count = self.count + other.count;
        let delta_x = other.x.mean() - self.x.mean();
        let delta_y = other.y.mean() - self.y.mean();
        let s_xy = self.s_xy
            + other.s_xy
            + (self.count as f64 * other.count as f64) * delta_x * delta_y / count as f64;

        Self {
            x: self.x.combine(&other.x),
            y: self.y.combine(&other.y),
            s_xy,
            count,
        }
    }

    /// Reset to the empty state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Number of pairs seen
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Statistics of the independent variable
    pub fn x_stats(&self) -> &MomentAccumulator {
        &self.x
    }

    /// Statistics of the dependent variable
    pub fn y_stats(&self) -> &MomentAccumulator {
        &self.y
    }

    /// Raw co-moment `S_xy`
    pub fn co_moment(&self) -> f64 {
        self.s_xy
    }

    /// Least-squares slope `S_xy / S_xx`
    pub fn slope(&self) -> f64 {
        let s_xx = self.x.variance() * (self.count as f64 - 1.0);
        self.s_xy / s_xx
    }

    /// Least-squares intercept `mean_y - slope * mean_x`
    pub fn intercept(&self) -> f64 {
        self.y.mean() - self.slope() * self.x.mean()
    }

    /// Pearson correlation coefficient
    pub fn correlation(&self) -> f64 {
        let t = self.x.std_dev() * self.y.std_dev();
        self.s_xy / ((self.count as f64 - 1.0) * t)
    }

    /// Sample covariance `S_xy / (n - 1)`, NaN for fewer than two pairs
    pub fn covariance(&self) -> f64 {
        if self.count < 2 {
            f64::NAN
        } else {
            self.s_xy / (self.count as f64 - 1.0)
        }
    }
}

impl Sketch for PairRegression {
    type Item = (f64, f64);

    fn update(&mut self, item: &Self::Item) {
        self.push(item.0, item.1);
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

impl Extend<(f64, f64)> for PairRegression {
    fn extend<I: IntoIterator<Item = (f64, f64)>>(&mut self, iter: I) {
        for (x, y) in iter {
            self.push(x, y);
        }
    }
}
