//! Quantile estimation algorithms
//!
//! This module provides constant-memory estimators for quantiles
//! (percentiles) of a data stream.
//!
//! # Algorithms
//!
//! - [`PercentileEstimator`]: P² estimate of a single quantile
//! - [`PercentileSet`]: several P² estimators sharing one input stream
//!
//! # Example
//!
//! ```
//! use runstats::quantiles::PercentileEstimator;
//!
//! let mut median = PercentileEstimator::new(0.5).unwrap();
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0] {
//!     median.push(value);
//! }
//!
//! println!("Median: {:?}", median.value());
//! ```

mod p_square;
mod set;

pub use p_square::PercentileEstimator;
pub use set::PercentileSet;
