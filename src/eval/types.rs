use std::ops::Range;

use crate::error::{EvalError, EvalResult};
use crate::slicing::group_slices;

/// Grouped predictions as stored in an evaluation `.npz`.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalInputs {
    pub group_ids: Vec<i64>,
    pub y_true: Vec<f64>,
    pub y_pred: Vec<f64>,
}

impl EvalInputs {
    #[inline]
    pub fn len(&self) -> usize {
        self.group_ids.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.group_ids.is_empty()
    }

    pub fn validate(&self) -> EvalResult<()> {
        let n = self.group_ids.len();
        for (what, actual) in [("y_true", self.y_true.len()), ("y_pred", self.y_pred.len())] {
            if actual != n {
                return Err(EvalError::LengthMismatch {
                    what,
                    expected: n,
                    actual,
                });
            }
        }
        Ok(())
    }

    pub fn groups(&self) -> Vec<Range<usize>> {
        group_slices(&self.group_ids)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortedSeqs {
    pub seqs: Vec<Vec<i64>>,
}

impl SortedSeqs {
    /// Index and first offending position of any sequence that is not
    /// strictly increasing.
    pub fn first_unsorted(&self) -> Option<(usize, usize)> {
        self.seqs.iter().enumerate().find_map(|(i, xs)| {
            xs.windows(2)
                .position(|w| w[0] >= w[1])
                .map(|pos| (i, pos + 1))
        })
    }
}
