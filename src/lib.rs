//! # Runstats
//!
//! Single-pass running statistics for Rust.
//!
//! Runstats provides numerically stable streaming estimators that consume an
//! unbounded sequence of values in constant memory and can be queried at any
//! time.
//!
//! ## Features
//!
//! - **Moments**: mean, variance, skewness, excess kurtosis, min and max
//! - **Regression**: running least-squares slope, intercept and correlation
//! - **Covariance Matrices**: every pairwise statistic across `d` variables
//! - **Percentiles**: constant-memory P² quantile estimation
//! - **Mergeability**: moment and regression accumulators combine exactly
//!
//! ## Quick Start
//!
//! ```rust
//! use runstats::prelude::*;
//!
//! let mut stats = MomentAccumulator::new();
//! let mut median = PercentileEstimator::new(0.5).unwrap();
//!
//! for latency in [12.0, 15.5, 11.2, 40.1, 13.3, 12.8] {
//!     stats.push(latency);
//!     median.push(latency);
//! }
//! println!("mean={} sd={} median={:?}", stats.mean(), stats.std_dev(), median.value());
//! ```
//!
//! ## Distributed Computing
//!
//! Moment and regression accumulators can be fed disjoint partitions of a
//! dataset and combined afterwards; the result matches a single accumulator
//! fed the whole dataset, up to rounding:
//!
//! ```rust
//! use runstats::statistics::MomentAccumulator;
//! use runstats::traits::Sketch;
//!
//! let mut worker1 = MomentAccumulator::new();
//! let mut worker2 = MomentAccumulator::new();
//!
//! // Each worker processes its partition
//! worker1.push_slice(&[1.0, 2.0, 3.0]);
//! worker2.push_slice(&[4.0, 5.0]);
//!
//! // Merge results
//! let total = worker1.combine(&worker2);
//! assert_eq!(total.len(), 5);
//!
//! worker1.merge(&worker2).unwrap();
//! assert_eq!(worker1, total);
//! ```
//!
//! The estimators are plain single-threaded values; give each thread its own
//! and combine them instead of sharing one.
//!
//! ## Feature Flags
//!
//! Algorithm families (pick what you need):
//! - `statistics` (default): running moments
//! - `regression` (default): pairwise and multivariate regression, implies `statistics`
//! - `quantiles` (default): P² percentiles
//! - `full`: Enable all algorithm families
//!
//! Platform features:
//! - `std` (default): Standard library support; without it the crate is
//!   `no_std` + `alloc` and uses `libm`

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Core traits always available
pub mod traits;

mod math;

#[cfg(feature = "statistics")]
#[cfg_attr(docsrs, doc(cfg(feature = "statistics")))]
pub mod statistics;

#[cfg(feature = "regression")]
#[cfg_attr(docsrs, doc(cfg(feature = "regression")))]
pub mod regression;

#[cfg(feature = "quantiles")]
#[cfg_attr(docsrs, doc(cfg(feature = "quantiles")))]
pub mod quantiles;

pub mod prelude {
    pub use crate::traits::*;

    #[cfg(feature = "statistics")]
    pub use crate::statistics::MomentAccumulator;

    #[cfg(feature = "regression")]
    pub use crate::regression::{Matrix, MultivariateAccumulator, PairRegression};

    #[cfg(feature = "quantiles")]
    pub use crate::quantiles::{PercentileEstimator, PercentileSet};
}

#[cfg(feature = "statistics")]
pub use statistics::MomentAccumulator;

#[cfg(feature = "regression")]
pub use regression::{MultivariateAccumulator, PairRegression};

#[cfg(feature = "quantiles")]
pub use quantiles::{PercentileEstimator, PercentileSet};
