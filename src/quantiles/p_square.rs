//! P² single-quantile estimator
//!
//! Implementation of Jain & Chlamtac's P² algorithm: five markers whose
//! heights approximate the minimum, the φ/2, φ and (1+φ)/2 quantiles and the
//! maximum. Interior markers are nudged towards their ideal positions with
//! a piecewise-parabolic fit, so memory and update cost are both O(1).
//!
//! P² state is not mergeable: two marker sets describe different streams
//! and cannot be combined without the underlying data.

use crate::math;
use crate::traits::{check_quantile, ConfigError, MergeError, Sketch};

const MARKERS: usize = 5;

/// Running estimate of one quantile
///
/// Before five observations have been seen the estimate is the
/// nearest-rank quantile of the values received so far. From the fifth
/// observation on it is the height of the middle marker.
///
/// # Example
///
/// ```
/// use runstats::quantiles::PercentileEstimator;
///
/// let mut p90 = PercentileEstimator::new(0.9).unwrap();
/// for i in 0..10_000 {
///     p90.push((i % 100) as f64);
/// }
///
/// let estimate = p90.value().unwrap();
/// assert!((estimate - 89.0).abs() < 2.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PercentileEstimator {
    /// Target quantile φ in [0, 1]
    quantile: f64,
    /// Marker heights, non-decreasing once five values are seen
    heights: [f64; MARKERS],
    /// Actual marker positions (1-based ranks)
    positions: [u64; MARKERS],
    /// Ideal, possibly fractional, marker positions
    desired: [f64; MARKERS],
    /// Per-observation increments of `desired`
    increments: [f64; MARKERS],
    count: u64,
}

impl PercentileEstimator {
    /// Create an estimator for quantile `quantile` (0.5 is the median)
    ///
    /// Fails if `quantile` is outside `[0, 1]`.
    pub fn new(quantile: f64) -> Result<Self, ConfigError> {
        let p = check_quantile(quantile)?;
        Ok(Self {
            quantile: p,
            heights: [0.0; MARKERS],
            positions: [1, 2, 3, 4, 5],
            desired: [1.0, 1.0 + 2.0 * p, 1.0 + 4.0 * p, 3.0 + 2.0 * p, 5.0],
            increments: [0.0, p / 2.0, p, (1.0 + p) / 2.0, 1.0],
            count: 0,
        })
    }

    /// Target quantile
    pub fn quantile(&self) -> f64 {
        self.quantile
    }

    /// Add a value
    ///
    /// NaN values are ignored.
    pub fn push(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }

        if self.count < MARKERS as u64 {
            self.heights[self.count as usize] = value;
            self.count += 1;
            if self.count == MARKERS as u64 {
                self.heights.sort_unstable_by(f64::total_cmp);
                tracing::trace!(quantile = self.quantile, "p-square markers seeded");
            }
            return;
        }
        self.count += 1;

        let k = self.cell(value);
        for position in &mut self.positions[k..] {
            *position += 1;
        }
        for (desired, increment) in self.desired.iter_mut().zip(&self.increments) {
            *desired += increment;
        }
        for i in 1..MARKERS - 1 {
            self.adjust(i);
        }
    }

    /// Add every value of a slice, in order
    pub fn push_slice(&mut self, values: &[f64]) {
        for &v in values {
            self.push(v);
        }
    }

    /// Locate the cell containing `value`, widening the extremes if needed
    ///
    /// Returns the index of the first marker whose position must shift.
    fn cell(&mut self, value: f64) -> usize {
        let h = &mut self.heights;
        if value < h[0] {
            h[0] = value;
            1
        } else if value >= h[MARKERS - 1] {
            h[MARKERS - 1] = value;
            MARKERS - 1
        } else {
            (1..MARKERS - 1).find(|&i| value < h[i]).unwrap_or(MARKERS - 1)
        }
    }

    /// Move interior marker `i` one step towards its ideal position if it
    /// has drifted by at least one and would not collide with a neighbour
    fn adjust(&mut self, i: usize) {
        let n = self.positions[i] as f64;
        let d = self.desired[i] - n;
        let dp = self.positions[i + 1] as f64 - n;
        let dm = self.positions[i - 1] as f64 - n;

        if !((d >= 1.0 && dp > 1.0) || (d <= -1.0 && dm < -1.0)) {
            return;
        }

        let h = &mut self.heights;
        let sign = if d > 0.0 { 1.0 } else { -1.0 };
        let hp = (h[i + 1] - h[i]) / dp;
        let hm = (h[i - 1] - h[i]) / dm;

        let parabolic = h[i] + sign / (dp - dm) * ((sign - dm) * hp + (dp - sign) * hm);
        h[i] = if h[i - 1] < parabolic && parabolic < h[i + 1] {
            parabolic
        } else if sign > 0.0 {
            h[i] + hp
        } else {
            h[i] - hm
        };

        if sign > 0.0 {
            self.positions[i] += 1;
        } else {
            self.positions[i] -= 1;
        }
    }

    /// Current estimate of the target quantile, `None` when empty
    pub fn value(&self) -> Option<f64> {
        match self.count {
            0 => None,
            c if c < MARKERS as u64 => {
                let c = c as usize;
                let mut seeds = self.heights;
                seeds[..c].sort_unstable_by(f64::total_cmp);
                let rank = math::floor(self.quantile * (c - 1) as f64 + 0.5) as usize;
                Some(seeds[rank])
            }
            _ => Some(self.heights[2]),
        }
    }

    /// Marker heights
    ///
    /// Only the first `len()` entries are meaningful before five values
    /// have been seen; they are unsorted until then.
    pub fn markers(&self) -> &[f64; MARKERS] {
        &self.heights
    }

    /// Actual marker positions
    pub fn positions(&self) -> &[u64; MARKERS] {
        &self.positions
    }

    /// Ideal marker positions
    pub fn desired_positions(&self) -> &[f64; MARKERS] {
        &self.desired
    }

    /// Number of values seen
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Reset to the just-constructed state, keeping the target quantile
    pub fn reset(&mut self) {
        let p = self.quantile;
        self.heights = [0.0; MARKERS];
        self.positions = [1, 2, 3, 4, 5];
        self.desired = [1.0, 1.0 + 2.0 * p, 1.0 + 4.0 * p, 3.0 + 2.0 * p, 5.0];
        self.count = 0;
    }
}

impl Sketch for PercentileEstimator {
    type Item = f64;

    fn update(&mut self, item: &f64) {
        self.push(*item);
    }

    fn merge(&mut self, _other: &Self) -> Result<(), MergeError> {
        Err(MergeError::NotMergeable {
            sketch: "PercentileEstimator",
        })
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

impl Extend<f64> for PercentileEstimator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for v in iter {
            self.push(v);
        }
    }
}
