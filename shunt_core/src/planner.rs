//! Planner: owns the inputs of a plan and regenerates the whole range
//! sequence on every change.
//!
//! `compute_plan` is the single unit of work: compute every range, then
//! validate every range. The `Planner` only ever swaps in a finished
//! sequence, so callers never observe a half-updated plan.

use crate::catalog::{Catalog, DEFAULT_TOLERANCE_PERCENT};
use crate::error::{BuildError, Result, ShuntError};
use crate::global::GlobalConfig;
use crate::overlap::{invalid_indices, validate_overlaps};
use crate::range::{RangeConfig, RangePosition, compute_range};
use crate::search::select_resistances;

/// Compute and validate a full range sequence.
///
/// `resistances` and `tolerances` are paired by index; the shorter of the two
/// bounds the output length (callers pass equal lengths).
pub fn compute_plan(
    global: &GlobalConfig,
    resistances: &[f64],
    tolerances: &[f64],
) -> Vec<RangeConfig> {
    let len = resistances.len().min(tolerances.len());
    let adc = global.adc();
    let mut ranges: Vec<RangeConfig> = resistances
        .iter()
        .zip(tolerances)
        .enumerate()
        .map(|(i, (&ohms, &tol))| {
            compute_range(
                ohms,
                tol,
                adc,
                global.bus_voltage,
                global.hysteresis_factor,
                RangePosition::of(i, len),
            )
        })
        .collect();
    validate_overlaps(&mut ranges, global.min_current_target_amps());
    ranges
}

/// Whole-plan verdict for display and exit codes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    pub all_valid: bool,
    /// Range 0 reaches `max_current_target`.
    pub covers_max_current: bool,
    /// Last range floor is at or below `min_current_target`.
    pub covers_min_current: bool,
    /// Ceiling of range 0 (A).
    pub span_max_current: f64,
    /// Floor of the last range (A).
    pub span_min_current: f64,
    pub invalid_ranges: Vec<usize>,
}

impl PlanSummary {
    pub fn of(global: &GlobalConfig, ranges: &[RangeConfig]) -> Self {
        let span_max_current = ranges.first().map_or(0.0, |r| r.up_threshold);
        let span_min_current = ranges.last().map_or(0.0, |r| r.down_threshold);
        let invalid_ranges = invalid_indices(ranges);
        Self {
            all_valid: !ranges.is_empty() && invalid_ranges.is_empty(),
            covers_max_current: ranges
                .first()
                .is_some_and(|r| r.theoretical_max_current >= global.max_current_target),
            covers_min_current: ranges
                .last()
                .is_some_and(|r| r.down_threshold <= global.min_current_target_amps()),
            span_max_current,
            span_min_current,
            invalid_ranges,
        }
    }

    /// Every range valid and both ends of the requested span covered.
    pub fn is_complete(&self) -> bool {
        self.all_valid && self.covers_max_current && self.covers_min_current
    }
}

/// One manual change to a range; unset fields are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeEdit {
    pub index: usize,
    pub resistance: Option<f64>,
    pub tolerance: Option<f64>,
}

impl RangeEdit {
    pub fn resistance(index: usize, ohms: f64) -> Self {
        Self {
            index,
            resistance: Some(ohms),
            tolerance: None,
        }
    }

    pub fn tolerance(index: usize, percent: f64) -> Self {
        Self {
            index,
            resistance: None,
            tolerance: Some(percent),
        }
    }
}

/// Stateful driver for interactive editing.
#[derive(Debug, Clone)]
pub struct Planner {
    global: GlobalConfig,
    catalog: Catalog,
    default_tolerance: f64,
    resistances: Vec<f64>,
    tolerances: Vec<f64>,
    ranges: Vec<RangeConfig>,
}

impl Planner {
    pub fn builder() -> PlannerBuilder {
        PlannerBuilder::default()
    }

    pub fn global(&self) -> &GlobalConfig {
        &self.global
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ranges(&self) -> &[RangeConfig] {
        &self.ranges
    }

    pub fn resistances(&self) -> &[f64] {
        &self.resistances
    }

    pub fn tolerances(&self) -> &[f64] {
        &self.tolerances
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary::of(&self.global, &self.ranges)
    }

    /// Rerun the catalog search, discarding manual resistance edits.
    /// Tolerances reset to the default grade.
    pub fn auto_select(&mut self) {
        self.resistances = select_resistances(&self.global, &self.catalog, self.default_tolerance);
        self.tolerances = vec![self.default_tolerance; self.resistances.len()];
        self.recompute();
    }

    /// Replace the global parameters and recompute.
    ///
    /// Existing resistances are kept when the number of ranges is unchanged;
    /// otherwise the search runs again.
    pub fn set_global(&mut self, global: GlobalConfig) -> Result<()> {
        global.validate()?;
        let reselect = global.num_ranges != self.global.num_ranges;
        self.global = global;
        if reselect {
            self.auto_select();
        } else {
            self.recompute();
        }
        Ok(())
    }

    /// Manually set one range's resistance. Other ranges keep their
    /// resistors; the whole sequence is recomputed and revalidated.
    pub fn set_resistance(&mut self, index: usize, ohms: f64) -> Result<()> {
        self.apply_edits(&[RangeEdit::resistance(index, ohms)])
    }

    /// Manually set one range's tolerance grade (%).
    pub fn set_tolerance(&mut self, index: usize, percent: f64) -> Result<()> {
        self.apply_edits(&[RangeEdit::tolerance(index, percent)])
    }

    /// Apply several manual edits as one change.
    ///
    /// An edited resistance may not equal any other range's resistance after
    /// all edits are applied, so two ranges can trade values in one call.
    /// On error nothing changes.
    pub fn apply_edits(&mut self, edits: &[RangeEdit]) -> Result<()> {
        let mut resistances = self.resistances.clone();
        let mut tolerances = self.tolerances.clone();
        for edit in edits {
            self.check_index(edit.index)?;
            if let Some(ohms) = edit.resistance {
                if !(ohms.is_finite() && ohms > 0.0) {
                    return Err(ShuntError::InvalidResistance(ohms).into());
                }
                resistances[edit.index] = ohms;
            }
            if let Some(percent) = edit.tolerance {
                if !(percent.is_finite() && percent >= 0.0) {
                    return Err(ShuntError::InvalidTolerance(percent).into());
                }
                if !self.catalog.is_standard_tolerance(percent) {
                    tracing::debug!(range = edit.index, percent, "non-standard tolerance grade");
                }
                tolerances[edit.index] = percent;
            }
        }
        for edit in edits {
            let Some(ohms) = edit.resistance else {
                continue;
            };
            if let Some(used_by) = resistances
                .iter()
                .enumerate()
                .position(|(j, &r)| j != edit.index && r == ohms)
            {
                return Err(ShuntError::DuplicateResistance { ohms, used_by }.into());
            }
        }
        self.resistances = resistances;
        self.tolerances = tolerances;
        tracing::debug!(edits = edits.len(), "manual edits applied");
        self.recompute();
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.resistances.len();
        if index >= len {
            return Err(ShuntError::InvalidIndex { index, len }.into());
        }
        Ok(())
    }

    fn recompute(&mut self) {
        self.ranges = compute_plan(&self.global, &self.resistances, &self.tolerances);
        let summary = self.summary();
        tracing::debug!(
            ranges = self.ranges.len(),
            all_valid = summary.all_valid,
            invalid = ?summary.invalid_ranges,
            "plan recomputed"
        );
    }
}

/// Builder for `Planner`. Global parameters are required; the catalog
/// defaults to the reference list.
#[derive(Debug, Default)]
pub struct PlannerBuilder {
    global: Option<GlobalConfig>,
    catalog: Option<Catalog>,
    default_tolerance: Option<f64>,
    resistances: Option<Vec<f64>>,
    tolerances: Option<Vec<f64>>,
}

impl PlannerBuilder {
    pub fn with_global(mut self, global: GlobalConfig) -> Self {
        self.global = Some(global);
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Tolerance assigned to automatically selected resistors (%).
    pub fn with_default_tolerance(mut self, percent: f64) -> Self {
        self.default_tolerance = Some(percent);
        self
    }

    /// Start from a known resistor set instead of running the search.
    pub fn with_resistances(mut self, resistances: Vec<f64>) -> Self {
        self.resistances = Some(resistances);
        self
    }

    /// Per-range tolerances to pair with `with_resistances`.
    pub fn with_tolerances(mut self, tolerances: Vec<f64>) -> Self {
        self.tolerances = Some(tolerances);
        self
    }

    pub fn build(self) -> Result<Planner> {
        let global = self.global.ok_or(BuildError::MissingGlobal)?;
        global.validate()?;
        let catalog = self.catalog.unwrap_or_default();
        let default_tolerance = self.default_tolerance.unwrap_or(DEFAULT_TOLERANCE_PERCENT);
        if !(default_tolerance.is_finite() && default_tolerance >= 0.0) {
            return Err(BuildError::InvalidConfig("default tolerance must be >= 0").into());
        }

        let mut planner = Planner {
            global,
            catalog,
            default_tolerance,
            resistances: Vec::new(),
            tolerances: Vec::new(),
            ranges: Vec::new(),
        };

        match self.resistances {
            None => planner.auto_select(),
            Some(resistances) => {
                if resistances.len() != global.num_ranges() {
                    return Err(BuildError::InvalidConfig(
                        "resistance count must equal num_ranges",
                    )
                    .into());
                }
                let tolerances = self
                    .tolerances
                    .unwrap_or_else(|| vec![default_tolerance; resistances.len()]);
                if tolerances.len() != resistances.len() {
                    return Err(BuildError::InvalidConfig(
                        "tolerance count must equal num_ranges",
                    )
                    .into());
                }
                if let Some(&bad) = resistances.iter().find(|r| !(r.is_finite() && **r > 0.0)) {
                    return Err(ShuntError::InvalidResistance(bad).into());
                }
                if let Some(&bad) = tolerances.iter().find(|t| !(t.is_finite() && **t >= 0.0)) {
                    return Err(ShuntError::InvalidTolerance(bad).into());
                }
                planner.resistances = resistances;
                planner.tolerances = tolerances;
                planner.recompute();
            }
        }
        Ok(planner)
    }
}
