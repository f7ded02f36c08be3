/// First index `>= start` whose element is `>= target`, or `arr.len()`.
///
/// Probes `start+1, start+2, start+4, ..` until it overshoots, then binary
/// searches the last window, so a cursor that moves `d` slots pays `O(log d)`.
#[inline]
pub fn gallop_to<T: Ord>(arr: &[T], target: &T, start: usize) -> usize {
    if start >= arr.len() {
        return arr.len();
    }
    if arr[start] >= *target {
        return start;
    }

    // invariant: arr[lo] < target
    let mut lo = start;
    let mut step = 1usize;
    while lo + step < arr.len() && arr[lo + step] < *target {
        lo += step;
        step <<= 1;
    }
    let hi = (lo + step + 1).min(arr.len());
    lo + 1 + arr[lo + 1..hi].partition_point(|x| x < target)
}
