//! Several independent P² estimators fed from one stream

use super::PercentileEstimator;
use crate::traits::{ConfigError, MergeError, Sketch};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// One [`PercentileEstimator`] per requested quantile
///
/// Every pushed value goes to every estimator. Quantiles keep the order
/// they were given in.
///
/// # Example
///
/// ```
/// use runstats::quantiles::PercentileSet;
///
/// let mut set = PercentileSet::new(&[0.25, 0.5, 0.75]).unwrap();
/// set.extend((0..1000).map(|i| i as f64));
///
/// let values = set.values();
/// assert_eq!(values.len(), 3);
/// assert!(values[0] < values[1] && values[1] < values[2]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PercentileSet {
    estimators: Vec<PercentileEstimator>,
    count: u64,
}

impl PercentileSet {
    /// Create a set tracking each of `quantiles`
    ///
    /// Fails if any quantile lies outside `[0, 1]`.
    pub fn new(quantiles: &[f64]) -> Result<Self, ConfigError> {
        let estimators = quantiles
            .iter()
            .map(|&q| PercentileEstimator::new(q))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            estimators,
            count: 0,
        })
    }

    /// Add a value to every estimator
    pub fn push(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        for est in &mut self.estimators {
            est.push(value);
        }
        self.count += 1;
    }

    /// Add every value of a slice, in order
    pub fn push_slice(&mut self, values: &[f64]) {
        for &v in values {
            self.push(v);
        }
    }

    /// Tracked quantiles, in construction order
    pub fn quantiles(&self) -> Vec<f64> {
        self.estimators.iter().map(|e| e.quantile()).collect()
    }

    /// Current estimates, in construction order
    ///
    /// Empty estimators report NaN.
    pub fn values(&self) -> Vec<f64> {
        self.estimators
            .iter()
            .map(|e| e.value().unwrap_or(f64::NAN))
            .collect()
    }

    /// Estimator for the `i`-th requested quantile
    pub fn get(&self, i: usize) -> Option<&PercentileEstimator> {
        self.estimators.get(i)
    }

    /// Iterate over the estimators
    pub fn iter(&self) -> impl Iterator<Item = &PercentileEstimator> {
        self.estimators.iter()
    }

    /// Number of values seen
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Reset every estimator, keeping the quantiles
    pub fn reset(&mut self) {
        for est in &mut self.estimators {
            est.reset();
        }
        self.count = 0;
    }

    /// Reset with a new list of quantiles
    ///
    /// On error the set is left unchanged.
    pub fn reset_with_quantiles(&mut self, quantiles: &[f64]) -> Result<(), ConfigError> {
        *self = Self::new(quantiles)?;
        Ok(())
    }
}

impl Sketch for PercentileSet {
    type Item = f64;

    fn update(&mut self, item: &f64) {
        self.push(*item);
    }

    fn merge(&mut self, _other: &Self) -> Result<(), MergeError> {
        Err(MergeError::NotMergeable {
            sketch: "PercentileSet",
        })
    }

    fn clear(&mut self) {
        self.reset();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + self.estimators.capacity() * core::mem::size_of::<PercentileEstimator>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl Extend<f64> for PercentileSet {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for v in iter {
            self.push(v);
        }
    }
}
