use rayon::prelude::*;
use std::cmp::Ordering;
use std::ops::Range;

use crate::error::{EvalError, EvalResult};

/// Top-K accuracy over fixed groups of a ranked prediction.
///
/// A group is a hit when its true-best item (first maximum of `y_true`) is
/// within the top `k` of the group's `y_pred` ordering. Items scored equal to
/// the true-best one rank ahead of it.
#[derive(Debug, Clone)]
pub struct TopKGroupAccuracy {
    k: usize,
    groups: Vec<Range<usize>>,
}

impl TopKGroupAccuracy {
    pub fn new(k: usize, groups: Vec<Range<usize>>) -> EvalResult<Self> {
        if k == 0 {
            return Err(EvalError::InvalidArgument("k must be positive".to_string()));
        }
        Ok(Self { k, groups })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn groups(&self) -> &[Range<usize>] {
        &self.groups
    }

    /// `(hits, total)` where `total` is the number of groups.
    ///
    /// Panics if a group reaches past the end of `y_true` or `y_pred`.
    pub fn count<T, P>(&self, y_true: &[T], y_pred: &[P]) -> (usize, usize)
    where
        T: PartialOrd + Sync,
        P: PartialOrd + Sync,
    {
        let hits = self
            .groups
            .par_iter()
            .filter(|g| rank_of_best(y_true, y_pred, (*g).clone()) < self.k)
            .count();
        (hits, self.groups.len())
    }

    /// `hits / total`; fails with [`EvalError::NoGroups`] when there are no groups.
    pub fn accuracy<T, P>(&self, y_true: &[T], y_pred: &[P]) -> EvalResult<f64>
    where
        T: PartialOrd + Sync,
        P: PartialOrd + Sync,
    {
        let (hits, total) = self.count(y_true, y_pred);
        if total == 0 {
            return Err(EvalError::NoGroups);
        }
        Ok(hits as f64 / total as f64)
    }
}

/// First index in `group` holding the largest `y_true`.
pub(crate) fn best_index<T: PartialOrd>(y_true: &[T], group: Range<usize>) -> Option<usize> {
    let mut best: Option<usize> = None;
    for i in group {
        match best {
            Some(b) if y_true[i] > y_true[b] => best = Some(i),
            Some(_) => {}
            None => best = Some(i),
        }
    }
    best
}

/// How many other items of `group` are not predicted strictly below the
/// true-best item. Incomparable scores (NaN) count against it. An empty group
/// gets `usize::MAX` so it can never be a hit.
pub(crate) fn rank_of_best<T, P>(y_true: &[T], y_pred: &[P], group: Range<usize>) -> usize
where
    T: PartialOrd,
    P: PartialOrd,
{
    let Some(best) = best_index(y_true, group.clone()) else {
        return usize::MAX;
    };
    let score = &y_pred[best];
    group
        .filter(|&j| j != best && y_pred[j].partial_cmp(score) != Some(Ordering::Less))
        .count()
}
