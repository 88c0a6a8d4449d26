//! Greedy resistor selection over the catalog.
//!
//! Range 0 gets the largest catalog value that still reaches the requested
//! maximum current. Every following range scans upward from the previous
//! pick and takes the largest resistor whose ceiling still clears the
//! previous range's floor. The scan stops at the first candidate that does
//! not overlap: the overlap condition is assumed to hold for a contiguous run
//! of ascending candidates and then fail for good. That is true for the
//! physical model in `range`, and `scan_largest_valid` is tested against a
//! predicate where it is not.
//!
//! When no larger candidate overlaps, the next unused larger value is taken
//! rather than repeating the previous pick, so the sequence stays unique and
//! ascending. The previous value is repeated only once the catalog is used up.

use crate::catalog::Catalog;
use crate::global::GlobalConfig;
use crate::range::{RangePosition, compute_range};

/// Pick one resistance per range, ordered from highest to lowest current.
///
/// Always returns `global.num_ranges` values and never fails; a poor fit
/// shows up later as invalid overlap flags.
pub fn select_resistances(
    global: &GlobalConfig,
    catalog: &Catalog,
    tolerance_percent: f64,
) -> Vec<f64> {
    let n = global.num_ranges();
    let values = catalog.resistances();
    if n == 0 || values.is_empty() {
        return Vec::new();
    }

    let adc = global.adc();
    let range_at = |ohms: f64, position: RangePosition| {
        compute_range(
            ohms,
            tolerance_percent,
            adc,
            global.bus_voltage,
            global.hysteresis_factor,
            position,
        )
    };

    let ideal_r0 = adc.full_scale_voltage() / global.max_current_target;
    let mut idx = first_range_index(catalog, ideal_r0);
    tracing::debug!(ideal_r0, ohms = values[idx], "range 0 selected");

    let mut used = vec![false; values.len()];
    used[idx] = true;
    let mut selected = Vec::with_capacity(n);
    selected.push(values[idx]);
    let mut prev = range_at(values[idx], RangePosition::of(0, n));

    for i in 1..n {
        let position = RangePosition::of(i, n);
        let floor = prev.down_threshold;
        let best = scan_largest_valid(values, idx, &used, |ohms| {
            let up = range_at(ohms, position).up_threshold;
            tracing::trace!(range = i, ohms, up, floor, "candidate");
            up > floor
        });

        idx = match best {
            Some(j) => j,
            None => match (idx + 1..values.len()).find(|&j| !used[j]) {
                Some(j) => {
                    tracing::warn!(
                        range = i,
                        ohms = values[j],
                        "no overlapping candidate; using next larger value"
                    );
                    j
                }
                None => {
                    tracing::warn!(
                        range = i,
                        ohms = values[idx],
                        "catalog exhausted; repeating previous value"
                    );
                    idx
                }
            },
        };

        used[idx] = true;
        selected.push(values[idx]);
        prev = range_at(values[idx], position);
        tracing::debug!(range = i, ohms = values[idx], "range selected");
    }

    selected
}

/// Largest catalog entry at or below `ideal`, starting from the nearest one.
/// Falls back to the smallest entry when every value exceeds `ideal`.
fn first_range_index(catalog: &Catalog, ideal: f64) -> usize {
    let values = catalog.resistances();
    let mut idx = catalog.nearest_index(ideal);
    while idx > 0 && values[idx] > ideal {
        idx -= 1;
    }
    idx
}

/// Forward scan from `start` (exclusive) over unused entries.
///
/// Returns the index of the last accepted entry before the first rejection.
/// Used entries are skipped and neither accept nor stop the scan.
pub(crate) fn scan_largest_valid(
    values: &[f64],
    start: usize,
    used: &[bool],
    mut accepts: impl FnMut(f64) -> bool,
) -> Option<usize> {
    let mut best = None;
    for (j, &ohms) in values.iter().enumerate().skip(start + 1) {
        if used.get(j).copied().unwrap_or(false) {
            continue;
        }
        if accepts(ohms) {
            best = Some(j);
        } else {
            break;
        }
    }
    best
}
