use rayon::prelude::*;
use std::ops::Range;

use super::topk::rank_of_best;
use crate::error::{EvalError, EvalResult};

#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyReport {
    pub k: usize,
    pub hits: usize,
    pub total: usize,
    /// `None` when there are no groups.
    pub accuracy: Option<f64>,
}

impl AccuracyReport {
    pub fn new(k: usize, hits: usize, total: usize) -> Self {
        let accuracy = (total > 0).then(|| hits as f64 / total as f64);
        Self {
            k,
            hits,
            total,
            accuracy,
        }
    }
}

/// Top-K accuracy for every `k` in `1..=k_max` over the same groups.
///
/// Ranks are computed once per group, then bucketed, so the cost does not grow
/// with `k_max` beyond the final prefix sum.
pub fn accuracy_curve<T, P>(
    groups: &[Range<usize>],
    k_max: usize,
    y_true: &[T],
    y_pred: &[P],
) -> EvalResult<Vec<AccuracyReport>>
where
    T: PartialOrd + Sync,
    P: PartialOrd + Sync,
{
    if k_max == 0 {
        return Err(EvalError::InvalidArgument(
            "k_max must be positive".to_string(),
        ));
    }

    let ranks: Vec<usize> = groups
        .par_iter()
        .map(|g| rank_of_best(y_true, y_pred, g.clone()))
        .collect();

    // hits_at[r] = number of groups whose true-best item has rank r
    let mut hits_at = vec![0usize; k_max];
    for r in ranks {
        if r < k_max {
            hits_at[r] += 1;
        }
    }

    let total = groups.len();
    let mut hits = 0usize;
    let reports = hits_at
        .iter()
        .enumerate()
        .map(|(r, &n)| {
            hits += n;
            AccuracyReport::new(r + 1, hits, total)
        })
        .collect();
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::TopKGroupAccuracy;
    use crate::slicing::group_slices;

    #[test]
    fn matches_single_k_metric() {
        let groups = group_slices([0, 0, 0, 0, 1, 1, 1, 1, 1, 2, 2]);
        let y_true = [0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 1];
        let y_pred = [0, 1, 2, 3, 4, 4, 4, 4, 4, 1, 0];

        let curve = accuracy_curve(&groups, 6, &y_true, &y_pred).unwrap();
        assert_eq!(curve.len(), 6);
        for report in &curve {
            let acc = TopKGroupAccuracy::new(report.k, groups.clone()).unwrap();
            let (hits, total) = acc.count(&y_true, &y_pred);
            assert_eq!((report.hits, report.total), (hits, total), "k={}", report.k);
        }
        let hits: Vec<usize> = curve.iter().map(|r| r.hits).collect();
        assert_eq!(hits, vec![0, 1, 2, 2, 3, 3]);
        assert_eq!(curve[2].accuracy, Some(2.0 / 3.0));
    }

    #[test]
    fn hits_are_monotone() {
        let groups = vec![0..3, 3..6, 6..9];
        let y_true = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let y_pred = [0.1, 0.5, 0.9, 0.3, 0.2, 0.1, 0.0, 0.0, 0.0];
        let curve = accuracy_curve(&groups, 4, &y_true, &y_pred).unwrap();
        assert!(curve.windows(2).all(|w| w[0].hits <= w[1].hits));
        assert_eq!(curve.last().unwrap().hits, 3);
    }

    #[test]
    fn nan_predictions_rank_last_for_the_true_best_item() {
        let groups = vec![0..3, 3..5];
        let y_true = [1.0, 0.0, 0.0, 0.0, 1.0];
        let y_pred = [f64::NAN, 1.0, 2.0, 0.3, 0.9];
        let curve = accuracy_curve(&groups, 3, &y_true, &y_pred).unwrap();
        let hits: Vec<usize> = curve.iter().map(|r| r.hits).collect();
        // the NaN group only becomes a hit once k exceeds its two other items
        assert_eq!(hits, vec![1, 1, 2]);
    }

    #[test]
    fn no_groups_has_no_accuracy() {
        let empty: [f64; 0] = [];
        let curve = accuracy_curve(&[], 2, &empty, &empty).unwrap();
        assert_eq!(
            curve,
            vec![AccuracyReport::new(1, 0, 0), AccuracyReport::new(2, 0, 0)]
        );
        assert!(curve.iter().all(|r| r.accuracy.is_none()));
    }

    #[test]
    fn zero_k_max_is_rejected() {
        let y = [0.0];
        assert!(accuracy_curve(&[0..1], 0, &y, &y).is_err());
    }
}
