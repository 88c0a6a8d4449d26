//! Pairwise overlap and per-range validity.
//!
//! Validity is a property of the whole ordered sequence, so this pass always
//! runs over every range after all of them have been (re)computed.

use crate::range::{OverlapInfo, RangeConfig};

/// Annotate every range with its `OverlapInfo`.
///
/// - `overlaps_with_next`: `down(i) < up(i+1)`; `false` on the last range.
/// - `overlaps_with_prev`: `up(i) > down(i-1)`; `false` on the first range.
/// - `is_valid`: every neighbor that exists overlaps, and the last range's
///   floor reaches `min_current_target` (A).
///
/// Resistances and currents are never touched.
pub fn validate_overlaps(ranges: &mut [RangeConfig], min_current_target: f64) {
    let len = ranges.len();
    for i in 0..len {
        let is_first = i == 0;
        let is_last = i + 1 == len;

        let overlaps_with_next =
            !is_last && ranges[i].down_threshold < ranges[i + 1].up_threshold;
        let overlaps_with_prev =
            !is_first && ranges[i].up_threshold > ranges[i - 1].down_threshold;

        let next_ok = is_last || overlaps_with_next;
        let prev_ok = is_first || overlaps_with_prev;
        let floor_ok = !is_last || ranges[i].down_threshold <= min_current_target;

        ranges[i].overlap_info = OverlapInfo {
            overlaps_with_next,
            overlaps_with_prev,
            is_valid: next_ok && prev_ok && floor_ok,
        };
    }
}

/// Indices of ranges whose `is_valid` flag is false.
pub fn invalid_indices(ranges: &[RangeConfig]) -> Vec<usize> {
    ranges
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.overlap_info.is_valid)
        .map(|(i, _)| i)
        .collect()
}
