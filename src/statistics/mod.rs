//! Single-variable running statistics
//!
//! This module provides algorithms for computing moments over streams
//! in a single pass with constant memory.
//!
//! # Example
//!
//! ```
//! use runstats::statistics::MomentAccumulator;
//!
//! let mut stats = MomentAccumulator::new();
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     stats.push(value);
//! }
//!
//! println!("Mean: {}", stats.mean());
//! println!("Stddev: {}", stats.std_dev());
//! println!("Skewness: {}", stats.skewness());
//! println!("Kurtosis: {}", stats.kurtosis());
//! ```

mod moments;

pub use moments::MomentAccumulator;
