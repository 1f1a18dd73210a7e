//! Running regression, covariance and correlation
//!
//! # Algorithms
//!
//! - [`PairRegression`]: least-squares line and correlation between two variables
//! - [`MultivariateAccumulator`]: every pairwise statistic across `d` variables
//!
//! Both track co-moments alongside per-variable [`MomentAccumulator`]s and
//! can be combined after independent accumulation.
//!
//! [`MomentAccumulator`]: crate::statistics::MomentAccumulator
//!
//! # Example
//!
//! ```
//! use runstats::regression::PairRegression;
//!
//! let mut left = PairRegression::new();
//! let mut right = PairRegression::new();
//!
//! left.extend([(1.0, 2.0), (2.0, 4.1)]);
//! right.extend([(3.0, 5.9), (4.0, 8.0)]);
//!
//! let reg = left.combine(&right);
//! println!("y = {} * x + {}", reg.slope(), reg.intercept());
//! ```

mod matrix;
mod multivariate;
mod pair;

pub use matrix::Matrix;
pub use multivariate::MultivariateAccumulator;
pub use pair::PairRegression;
