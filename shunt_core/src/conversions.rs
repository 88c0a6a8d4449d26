//! Bridges from `shunt_config` types to `shunt_core` types.

use crate::catalog::{Catalog, ESeries, STANDARD_TOLERANCES};
use crate::error::{BuildError, Result};
use crate::global::GlobalConfig;
use crate::planner::{Planner, RangeEdit};
use shunt_config::SeriesKind;

// ── GlobalConfig ─────────────────────────────────────────────────────────────

impl From<&shunt_config::GlobalCfg> for GlobalConfig {
    fn from(c: &shunt_config::GlobalCfg) -> Self {
        Self {
            num_ranges: c.num_ranges,
            adc_bits: c.adc_bits,
            adc_resolution_volt_per_lsb: c.adc_resolution_v_per_lsb,
            bus_voltage: c.bus_voltage,
            max_current_target: c.max_current_a,
            min_current_target_nanoamp: c.min_current_na,
            hysteresis_factor: c.hysteresis,
        }
    }
}

// ── RangeEdit ────────────────────────────────────────────────────────────────

impl From<&shunt_config::OverrideCfg> for RangeEdit {
    fn from(c: &shunt_config::OverrideCfg) -> Self {
        Self {
            index: c.range,
            resistance: c.resistance_ohm,
            tolerance: c.tolerance_pct,
        }
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

/// E-series for a configured kind; `None` for the built-in reference list.
pub fn series_for(kind: SeriesKind) -> Option<ESeries> {
    match kind {
        SeriesKind::Reference => None,
        SeriesKind::E3 => Some(ESeries::E3),
        SeriesKind::E6 => Some(ESeries::E6),
        SeriesKind::E12 => Some(ESeries::E12),
        SeriesKind::E24 => Some(ESeries::E24),
    }
}

/// Build the catalog described by `[catalog]`.
///
/// `csv_values` are resistances already loaded from `catalog.csv`; when
/// present they replace the configured series.
pub fn catalog_from_cfg(
    c: &shunt_config::CatalogCfg,
    csv_values: Option<Vec<f64>>,
) -> std::result::Result<Catalog, BuildError> {
    if let Some(values) = csv_values {
        return Catalog::new(values, STANDARD_TOLERANCES.to_vec());
    }
    match series_for(c.series) {
        None => Ok(Catalog::reference()),
        Some(series) => Catalog::from_series(series, c.min_ohm, c.max_ohm),
    }
}

// ── Planner ──────────────────────────────────────────────────────────────────

/// Planner for a whole config file: search, then the `[[overrides]]` batch.
pub fn planner_from_config(cfg: &shunt_config::Config, catalog: Catalog) -> Result<Planner> {
    let mut planner = Planner::builder()
        .with_global((&cfg.global).into())
        .with_catalog(catalog)
        .with_default_tolerance(cfg.catalog.default_tolerance_pct)
        .build()?;
    if !cfg.overrides.is_empty() {
        let edits: Vec<RangeEdit> = cfg.overrides.iter().map(RangeEdit::from).collect();
        planner.apply_edits(&edits)?;
    }
    Ok(planner)
}
