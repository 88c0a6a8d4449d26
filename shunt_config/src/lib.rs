#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and catalog CSV parsing for the range planner.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The catalog CSV loader enforces its header and rejects values that can
//!   never be a sense resistor (zero, negative, non-finite, duplicated).
use serde::Deserialize;

/// Bounds shared by `validate()` and its error messages.
pub const MAX_RANGES: u8 = 8;
pub const ADC_BITS_MIN: u8 = 8;
pub const ADC_BITS_MAX: u8 = 24;
pub const BUS_VOLTAGE_MIN: f64 = 0.1;
pub const BUS_VOLTAGE_MAX: f64 = 36.0;
pub const MAX_CURRENT_MIN_A: f64 = 0.001;
pub const MAX_CURRENT_MAX_A: f64 = 100.0;
pub const MIN_CURRENT_MIN_NA: f64 = 1.0;
pub const MIN_CURRENT_MAX_NA: f64 = 1000.0;

/// Catalog CSV schema.
///
/// Expected header:
/// resistance_ohm
///
/// Example:
/// resistance_ohm
/// 0.05
/// 0.5
/// 5.0
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct CatalogRow {
    pub resistance_ohm: f64,
}

/// Instrument-wide parameters; one computation pass reads these as a unit.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GlobalCfg {
    pub num_ranges: u8,
    pub adc_bits: u8,
    /// Volts per ADC count.
    #[serde(alias = "adc_resolution")]
    pub adc_resolution_v_per_lsb: f64,
    pub bus_voltage: f64,
    /// Highest current range 0 must be able to measure (A).
    pub max_current_a: f64,
    /// Lowest current the last range must reach (nA).
    pub min_current_na: f64,
    /// Fraction of a range's full scale kept clear at each hand-off boundary.
    #[serde(alias = "hysteresis_factor")]
    pub hysteresis: f64,
}

impl Default for GlobalCfg {
    fn default() -> Self {
        Self {
            num_ranges: 3,
            adc_bits: 16,
            adc_resolution_v_per_lsb: 2.5e-6,
            bus_voltage: 3.3,
            max_current_a: 1.0,
            min_current_na: 1000.0,
            hysteresis: 0.01,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    /// Built-in E3 decade list from 10 mΩ to 10 MΩ.
    #[default]
    Reference,
    E3,
    E6,
    E12,
    E24,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatalogCfg {
    pub series: SeriesKind,
    /// Lower bound for generated series (Ω). Ignored for `reference`.
    pub min_ohm: f64,
    /// Upper bound for generated series (Ω). Ignored for `reference`.
    pub max_ohm: f64,
    /// Optional CSV of custom resistances; replaces `series` when present.
    pub csv: Option<String>,
    /// Tolerance assigned to every automatically selected resistor (%).
    pub default_tolerance_pct: f64,
}

impl Default for CatalogCfg {
    fn default() -> Self {
        Self {
            series: SeriesKind::Reference,
            min_ohm: 0.01,
            max_ohm: 10e6,
            csv: None,
            default_tolerance_pct: 1.0,
        }
    }
}

/// Manual per-range edit applied after the automatic selection.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct OverrideCfg {
    pub range: usize,
    pub resistance_ohm: Option<f64>,
    pub tolerance_pct: Option<f64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalCfg,
    #[serde(default)]
    pub catalog: CatalogCfg,
    #[serde(default)]
    pub overrides: Vec<OverrideCfg>,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Build a catalog value list from CSV rows.
///
/// Rows may come in any order; duplicates and values that are not strictly
/// positive and finite are rejected with the offending CSV line number.
pub fn catalog_from_rows(rows: &[CatalogRow]) -> eyre::Result<Vec<f64>> {
    if rows.is_empty() {
        eyre::bail!("catalog CSV contains no resistances");
    }
    let mut out: Vec<f64> = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let r = row.resistance_ohm;
        if !(r.is_finite() && r > 0.0) {
            eyre::bail!(
                "catalog resistance on line {} must be finite and > 0, got {}",
                idx + 2,
                r
            );
        }
        if let Some(prev) = out.iter().position(|&v| v == r) {
            eyre::bail!(
                "catalog has duplicate resistance {} on lines {} and {}",
                r,
                prev + 2,
                idx + 2
            );
        }
        out.push(r);
    }
    out.sort_by(f64::total_cmp);
    Ok(out)
}

pub fn load_catalog_csv(path: &std::path::Path) -> eyre::Result<Vec<f64>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open catalog CSV {:?}: {}", path, e))?;

    // Enforce exact header
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let expected = ["resistance_ohm"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "catalog CSV must have header 'resistance_ohm', got: {}",
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<CatalogRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }

    catalog_from_rows(&rows)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        let g = &self.global;

        // Global
        if g.num_ranges == 0 || g.num_ranges > MAX_RANGES {
            eyre::bail!("global.num_ranges must be in [1, {MAX_RANGES}]");
        }
        if !(ADC_BITS_MIN..=ADC_BITS_MAX).contains(&g.adc_bits) {
            eyre::bail!("global.adc_bits must be in [{ADC_BITS_MIN}, {ADC_BITS_MAX}]");
        }
        if !(g.adc_resolution_v_per_lsb.is_finite() && g.adc_resolution_v_per_lsb > 0.0) {
            eyre::bail!("global.adc_resolution_v_per_lsb must be > 0");
        }
        if !(BUS_VOLTAGE_MIN..=BUS_VOLTAGE_MAX).contains(&g.bus_voltage) {
            eyre::bail!("global.bus_voltage must be in [{BUS_VOLTAGE_MIN}, {BUS_VOLTAGE_MAX}] V");
        }
        if !(MAX_CURRENT_MIN_A..=MAX_CURRENT_MAX_A).contains(&g.max_current_a) {
            eyre::bail!(
                "global.max_current_a must be in [{MAX_CURRENT_MIN_A}, {MAX_CURRENT_MAX_A}] A"
            );
        }
        if !(MIN_CURRENT_MIN_NA..=MIN_CURRENT_MAX_NA).contains(&g.min_current_na) {
            eyre::bail!(
                "global.min_current_na must be in [{MIN_CURRENT_MIN_NA}, {MIN_CURRENT_MAX_NA}] nA"
            );
        }
        if !(g.hysteresis > 0.0 && g.hysteresis < 1.0) {
            eyre::bail!("global.hysteresis must be in (0.0, 1.0)");
        }

        // Catalog
        let c = &self.catalog;
        if c.csv.is_none() && c.series != SeriesKind::Reference {
            if !(c.min_ohm.is_finite() && c.min_ohm > 0.0) {
                eyre::bail!("catalog.min_ohm must be > 0");
            }
            if !(c.max_ohm.is_finite() && c.max_ohm >= c.min_ohm) {
                eyre::bail!("catalog.max_ohm must be at least catalog.min_ohm");
            }
        }
        if !(c.default_tolerance_pct.is_finite() && c.default_tolerance_pct >= 0.0) {
            eyre::bail!("catalog.default_tolerance_pct must be >= 0");
        }

        // Overrides
        let mut seen = Vec::with_capacity(self.overrides.len());
        for o in &self.overrides {
            if o.range >= usize::from(g.num_ranges) {
                eyre::bail!(
                    "overrides.range {} is out of bounds for {} ranges",
                    o.range,
                    g.num_ranges
                );
            }
            if seen.contains(&o.range) {
                eyre::bail!("overrides.range {} is listed more than once", o.range);
            }
            seen.push(o.range);
            if o.resistance_ohm.is_none() && o.tolerance_pct.is_none() {
                eyre::bail!(
                    "overrides.range {} must set resistance_ohm or tolerance_pct",
                    o.range
                );
            }
            if let Some(r) = o.resistance_ohm
                && !(r.is_finite() && r > 0.0)
            {
                eyre::bail!("overrides.resistance_ohm must be > 0 (range {})", o.range);
            }
            if let Some(t) = o.tolerance_pct
                && !(t.is_finite() && t >= 0.0)
            {
                eyre::bail!("overrides.tolerance_pct must be >= 0 (range {})", o.range);
            }
        }

        // Logging: rotation is checked where the appender is built

        Ok(())
    }
}
