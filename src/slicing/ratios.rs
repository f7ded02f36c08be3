use std::ops::Range;

use crate::error::{EvalError, EvalResult};

/// Split `[0, n)` into `ratios.len()` contiguous ranges sized by `ratios`.
///
/// Inner boundary `i` is `ceil(n * (r_1 + .. + r_i) / sum(r))`, the last one is
/// `n`. A range whose exact share `n * r_i / sum(r)` is below one index may
/// come out empty, whatever its position.
pub fn split_n_by_ratios(n: usize, ratios: &[u64]) -> EvalResult<Vec<Range<usize>>> {
    if ratios.is_empty() {
        return Err(EvalError::InvalidArgument(
            "ratios must not be empty".to_string(),
        ));
    }
    if let Some(pos) = ratios.iter().position(|&r| r == 0) {
        return Err(EvalError::InvalidArgument(format!(
            "ratio at position {pos} must be positive"
        )));
    }

    let total: u128 = ratios.iter().map(|&r| r as u128).sum();
    let n_wide = n as u128;

    let mut out = Vec::with_capacity(ratios.len());
    let mut cum: u128 = 0;
    let mut start = 0usize;
    for (i, &r) in ratios.iter().enumerate() {
        cum += r as u128;
        let end = if i + 1 == ratios.len() {
            n
        } else {
            let scaled = n_wide.checked_mul(cum).ok_or_else(|| {
                EvalError::InvalidArgument(format!("n={n} times ratio sum overflows"))
            })?;
            // cum <= total, so the quotient never exceeds n
            scaled.div_ceil(total) as usize
        };
        out.push(start..end);
        start = end;
    }
    Ok(out)
}
