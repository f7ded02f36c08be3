use itertools::Itertools;
use std::ops::Range;

/// Split `[0, n)` into maximal runs of equal group ids.
///
/// Ids are compared with `==` only, so they need not be sorted or numeric;
/// an id that reappears after a different one starts a new range.
pub fn group_slices<I>(group_ids: I) -> Vec<Range<usize>>
where
    I: IntoIterator,
    I::Item: PartialEq,
{
    let mut out = Vec::new();
    let mut start = 0usize;
    for (len, _) in group_ids.into_iter().dedup_with_count() {
        out.push(start..start + len);
        start += len;
    }
    out
}
