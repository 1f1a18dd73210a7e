//! Correctness and invariant tests for runstats
//!
//! These tests verify critical invariants, merge semantics, and edge cases
//! across all estimator families. They complement the unit tests in each
//! module by focusing on properties that must always hold.
//!
//! Run with: cargo test --test correctness --features full

// Require all features
#[cfg(not(all(feature = "statistics", feature = "regression", feature = "quantiles")))]
compile_error!(
    "Correctness tests require all features. Run: cargo test --test correctness --features full"
);

use runstats::quantiles::{PercentileEstimator, PercentileSet};
use runstats::regression::{MultivariateAccumulator, PairRegression};
use runstats::statistics::MomentAccumulator;
use runstats::traits::{MergeError, Sketch};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

fn data() -> Vec<f64> {
    (0..200)
        .map(|i| {
            let t = i as f64;
            (t * 0.37).sin() * 20.0 + (t * 0.011).exp() - 3.0
        })
        .collect()
}

// ============================================================================
// Moment Accumulator
// ============================================================================

mod moments {
    use super::*;

    fn assert_equivalent(a: &MomentAccumulator, b: &MomentAccumulator) {
        assert_eq!(a.len(), b.len());
        assert!(close(a.mean(), b.mean()), "mean: {} vs {}", a.mean(), b.mean());
        assert!(
            close(a.variance(), b.variance()),
            "variance: {} vs {}",
            a.variance(),
            b.variance()
        );
        assert!(
            close(a.skewness(), b.skewness()),
            "skewness: {} vs {}",
            a.skewness(),
            b.skewness()
        );
        assert!(
            close(a.kurtosis(), b.kurtosis()),
            "kurtosis: {} vs {}",
            a.kurtosis(),
            b.kurtosis()
        );
        assert_eq!(a.min(), b.min());
        assert_eq!(a.max(), b.max());
    }

    #[test]
    fn combine_is_partition_invariant() {
        let values = data();
        let whole: MomentAccumulator = values.iter().copied().collect();

        for split in [1, 2, 50, 117, 199] {
            let left: MomentAccumulator = values[..split].iter().copied().collect();
            let right: MomentAccumulator = values[split..].iter().copied().collect();
            assert_equivalent(&left.combine(&right), &whole);
        }
    }

    #[test]
    fn combine_is_commutative() {
        let values = data();
        let a: MomentAccumulator = values[..80].iter().copied().collect();
        let b: MomentAccumulator = values[80..].iter().copied().collect();

        assert_equivalent(&a.combine(&b), &b.combine(&a));
    }

    #[test]
    fn combine_is_associative() {
        let values = data();
        let a: MomentAccumulator = values[..30].iter().copied().collect();
        let b: MomentAccumulator = values[30..110].iter().copied().collect();
        let c: MomentAccumulator = values[110..].iter().copied().collect();

        assert_equivalent(&a.combine(&b).combine(&c), &a.combine(&b.combine(&c)));
    }

    #[test]
    fn reduction_tree_matches_sequential() {
        let values = data();
        let whole: MomentAccumulator = values.iter().copied().collect();

        let mut level: Vec<MomentAccumulator> = values
            .chunks(7)
            .map(|chunk| chunk.iter().copied().collect())
            .collect();
        while level.len() > 1 {
            level = level
                .chunks(2)
                .map(|pair| match pair {
                    [a, b] => a.combine(b),
                    [a] => a.clone(),
                    _ => unreachable!(),
                })
                .collect();
        }

        assert_equivalent(&level[0], &whole);
    }

    #[test]
    fn combine_leaves_inputs_untouched() {
        let a: MomentAccumulator = [1.0, 2.0].into_iter().collect();
        let b: MomentAccumulator = [3.0, 9.0].into_iter().collect();
        let (a0, b0) = (a.clone(), b.clone());

        let _ = a.combine(&b);
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let populated: MomentAccumulator = [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().collect();

        let mut empty = MomentAccumulator::new();
        empty.merge(&populated).unwrap();
        assert_eq!(empty, populated);

        let mut p = populated.clone();
        p.merge(&MomentAccumulator::new()).unwrap();
        assert_eq!(p, populated);
    }

    #[test]
    fn merge_empty_into_empty() {
        let mut a = MomentAccumulator::new();
        a.merge(&MomentAccumulator::new()).unwrap();

        assert!(a.is_empty());
        assert!(a.mean().is_nan());
        assert_eq!(a.min(), None);
    }

    #[test]
    fn clear_resets_completely() {
        let mut stats: MomentAccumulator = data().into_iter().collect();
        stats.clear();

        assert_eq!(stats, MomentAccumulator::new());
        assert_eq!(Sketch::count(&stats), 0);
        assert!(stats.mean().is_nan());
        assert!(stats.variance().is_nan());
        assert_eq!(stats.max(), None);
    }
}

// ============================================================================
// Regression
// ============================================================================

mod regression {
    use super::*;

    /// x = -5..=10, y = 2x + 5, z = -3.2y - 3
    fn scenario() -> Vec<[f64; 3]> {
        (-5..=10)
            .map(|x| {
                let x = x as f64;
                let y = 2.0 * x + 5.0;
                [x, y, -3.2 * y - 3.0]
            })
            .collect()
    }

    #[test]
    fn linear_scenario_across_estimators() {
        let rows = scenario();

        let mut xs = MomentAccumulator::new();
        let mut ys = MomentAccumulator::new();
        let mut zs = MomentAccumulator::new();
        let mut xy = PairRegression::new();
        let mut xz = PairRegression::new();
        let mut all = MultivariateAccumulator::new(3).unwrap();

        for r in &rows {
            xs.push(r[0]);
            ys.push(r[1]);
            zs.push(r[2]);
            xy.push(r[0], r[1]);
            xz.push(r[0], r[2]);
            all.push(r).unwrap();
        }

        assert!(close(xy.slope(), 2.0));
        assert!(close(xy.intercept(), 5.0));
        assert!(close(xy.correlation(), 1.0));
        assert!(close(xz.slope(), -6.4));
        assert!(close(xz.intercept(), -19.0));
        assert!(close(xz.correlation(), -1.0));

        let slopes = all.slopes();
        let intercepts = all.intercepts();
        let corr = all.correlations();
        assert!(close(slopes[(0, 1)], xy.slope()));
        assert!(close(intercepts[(0, 1)], xy.intercept()));
        assert!(close(corr[(0, 1)], xy.correlation()));
        assert!(close(slopes[(0, 2)], xz.slope()));
        assert!(close(intercepts[(0, 2)], xz.intercept()));
        assert!(close(corr[(0, 2)], xz.correlation()));

        let means = all.means();
        assert!(close(means[0], xs.mean()));
        assert!(close(means[1], ys.mean()));
        assert!(close(means[2], zs.mean()));
        assert!(close(all.variances()[2], zs.variance()));
    }

    #[test]
    fn pair_combine_is_partition_invariant() {
        let values = data();
        let pairs: Vec<(f64, f64)> = values.windows(2).map(|w| (w[0], w[1])).collect();

        let mut whole = PairRegression::new();
        whole.extend(pairs.iter().copied());

        for split in [1, 40, 150] {
            let mut left = PairRegression::new();
            let mut right = PairRegression::new();
            left.extend(pairs[..split].iter().copied());
            right.extend(pairs[split..].iter().copied());

            let c = left.combine(&right);
            assert_eq!(c.len(), whole.len());
            assert!(close(c.slope(), whole.slope()));
            assert!(close(c.intercept(), whole.intercept()));
            assert!(close(c.correlation(), whole.correlation()));
        }
    }

    #[test]
    fn multivariate_combine_is_partition_invariant() {
        let values = data();
        let rows: Vec<[f64; 3]> = values.windows(3).map(|w| [w[0], w[1], w[2]]).collect();

        let mut whole = MultivariateAccumulator::new(3).unwrap();
        whole.push_rows(&rows).unwrap();

        let mut parts = Vec::new();
        for chunk in rows.chunks(45) {
            let mut acc = MultivariateAccumulator::new(3).unwrap();
            acc.push_rows(chunk).unwrap();
            parts.push(acc);
        }
        let mut merged = MultivariateAccumulator::new(3).unwrap();
        for part in &parts {
            merged.merge(part).unwrap();
        }

        assert_eq!(merged.len(), whole.len());
        let (mc, wc) = (merged.covariances(), whole.covariances());
        let (ms, ws) = (merged.slopes(), whole.slopes());
        for i in 0..3 {
            for j in 0..3 {
                assert!(close(mc[(i, j)], wc[(i, j)]));
                assert!(close(ms[(i, j)], ws[(i, j)]));
            }
        }
        assert!(merged.correlations().is_symmetric());
    }

    #[test]
    fn multivariate_merge_rejects_dimension_mismatch() {
        let mut a = MultivariateAccumulator::new(2).unwrap();
        let b = MultivariateAccumulator::new(4).unwrap();
        a.push(&[1.0, 2.0]).unwrap();

        let err = a.merge(&b).unwrap_err();
        assert_eq!(
            err,
            MergeError::IncompatibleConfig {
                expected: "dimension=2".to_string(),
                found: "dimension=4".to_string(),
            }
        );
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn clear_resets_completely() {
        let mut reg = PairRegression::new();
        reg.extend([(1.0, 2.0), (3.0, 1.0), (4.0, 4.0)]);
        reg.clear();
        assert_eq!(reg, PairRegression::new());
        assert!(reg.slope().is_nan());

        let mut acc = MultivariateAccumulator::new(3).unwrap();
        acc.push_rows(&scenario()).unwrap();
        acc.clear();
        assert_eq!(acc, MultivariateAccumulator::new(3).unwrap());
        assert!(acc.covariances().as_slice().iter().all(|v| v.is_nan()));
    }
}

// ============================================================================
// Percentiles
// ============================================================================

mod percentiles {
    use super::*;

    #[test]
    fn markers_stay_ordered() {
        let mut est = PercentileEstimator::new(0.8).unwrap();
        for (i, v) in data().into_iter().enumerate() {
            est.push(v);
            if i >= 4 {
                let h = est.markers();
                assert!(h.windows(2).all(|w| w[0] <= w[1]), "step {}: {:?}", i, h);
            }
        }
    }

    #[test]
    fn estimates_are_ordered_by_quantile() {
        let mut set = PercentileSet::new(&[0.1, 0.5, 0.9]).unwrap();
        set.extend((0..5000).map(|i| ((i * 7919) % 5000) as f64));

        let v = set.values();
        assert!(v[0] < v[1] && v[1] < v[2], "{:?}", v);
        assert!((v[1] - 2500.0).abs() < 100.0);
    }

    #[test]
    fn merge_returns_error() {
        let mut a = PercentileSet::new(&[0.5]).unwrap();
        let b = PercentileSet::new(&[0.5]).unwrap();
        assert!(a.merge(&b).is_err());
    }

    #[test]
    fn clear_resets_completely() {
        let mut est = PercentileEstimator::new(0.5).unwrap();
        est.extend(data());
        est.clear();

        assert_eq!(est, PercentileEstimator::new(0.5).unwrap());
        assert_eq!(est.value(), None);
    }
}
