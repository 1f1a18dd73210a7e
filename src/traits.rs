//! Core traits and error types shared by all estimators
//!
//! Every estimator implements the base [`Sketch`] trait. Construction and
//! batch-push failures are reported as [`ConfigError`], merge failures as
//! [`MergeError`].

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Error during estimator merge operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Estimators have incompatible configurations
    IncompatibleConfig {
        expected: String,
        found: String,
    },
    /// The estimator's state cannot be combined at all
    NotMergeable {
        sketch: &'static str,
    },
}

impl core::fmt::Display for MergeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MergeError::IncompatibleConfig { expected, found } => {
                write!(f, "incompatible config: expected {}, found {}", expected, found)
            }
            MergeError::NotMergeable { sketch } => {
                write!(f, "{} does not support merging", sketch)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MergeError {}

/// Error raised when an estimator is configured or fed with invalid input
///
/// The call that returns this error leaves the estimator unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Quantile outside `[0, 1]` (or NaN)
    InvalidQuantile { quantile: f64 },
    /// Dimension count must be positive
    InvalidDimension { dimension: usize },
    /// Input length does not match what the estimator expects
    LengthMismatch { expected: usize, found: usize },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidQuantile { quantile } => {
                write!(f, "quantile must be within [0, 1], got {}", quantile)
            }
            ConfigError::InvalidDimension { dimension } => {
                write!(f, "dimension must be positive, got {}", dimension)
            }
            ConfigError::LengthMismatch { expected, found } => {
                write!(f, "length mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Validate a target quantile, logging the rejection
#[cfg(feature = "quantiles")]
pub(crate) fn check_quantile(quantile: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&quantile) {
        Ok(quantile)
    } else {
        tracing::debug!(quantile, "rejected quantile outside [0, 1]");
        Err(ConfigError::InvalidQuantile { quantile })
    }
}

/// Core trait for all streaming estimators
pub trait Sketch: Clone + Debug {
    /// The type of observation this estimator consumes
    type Item: ?Sized;

    /// Add an observation
    fn update(&mut self, item: &Self::Item);

    /// Merge another estimator into this one
    ///
    /// Returns an error if the estimators are incompatible
    fn merge(&mut self, other: &Self) -> Result<(), MergeError>;

    /// Reset to the just-constructed state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of observations processed
    fn count(&self) -> u64;

    /// Check if no observation has been processed
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "quantiles")]
    #[test]
    fn test_check_quantile() {
        assert_eq!(check_quantile(0.0), Ok(0.0));
        assert_eq!(check_quantile(1.0), Ok(1.0));
        assert_eq!(check_quantile(0.5), Ok(0.5));
        assert!(check_quantile(-0.01).is_err());
        assert!(check_quantile(1.01).is_err());
        assert!(check_quantile(f64::NAN).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::LengthMismatch {
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "length mismatch: expected 3, found 2");

        let err = MergeError::NotMergeable {
            sketch: "PercentileEstimator",
        };
        assert_eq!(err.to_string(), "PercentileEstimator does not support merging");
    }
}
