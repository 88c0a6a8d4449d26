//! JSON export and re-import of a plan.
//!
//! Schema (camelCase, raw `f64` values, no unit suffixes):
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "timestamp": "2024-03-01T12:30:00.000Z",
//!   "globalConfig": { "numRanges": 3, "adcBits": 16, ... },
//!   "ranges": [ { "resistance": 0.1, ..., "overlapInfo": { "isValid": true, ... } } ]
//! }
//! ```
//!
//! Import re-derives every range from its resistance, tolerance and the
//! global parameters and rejects documents whose stored values disagree.

use serde::{Deserialize, Serialize};
use shunt_traits::Clock;

use crate::catalog::Catalog;
use crate::error::ShuntError;
use crate::global::GlobalConfig;
use crate::planner::{Planner, compute_plan};
use crate::range::RangeConfig;
use crate::util::approx_eq_rel;

pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// Relative tolerance when comparing stored and recomputed fields.
pub const IMPORT_REL_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: String,
    /// RFC 3339 / ISO-8601, UTC.
    pub timestamp: String,
    pub global_config: GlobalConfig,
    pub ranges: Vec<RangeConfig>,
}

impl ExportDocument {
    pub fn from_planner(planner: &Planner, clock: &impl Clock) -> Self {
        Self {
            version: EXPORT_FORMAT_VERSION.to_string(),
            timestamp: clock.iso8601(),
            global_config: *planner.global(),
            ranges: planner.ranges().to_vec(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ShuntError> {
        serde_json::to_string_pretty(self).map_err(|e| ShuntError::Export(e.to_string()))
    }

    /// Parse and verify a document.
    pub fn from_json(s: &str) -> Result<Self, ShuntError> {
        let doc: Self = serde_json::from_str(s).map_err(|e| ShuntError::Import(e.to_string()))?;
        doc.verify()?;
        Ok(doc)
    }

    /// Check version, timestamp, global bounds, range count and that every
    /// stored range matches a fresh computation.
    pub fn verify(&self) -> Result<(), ShuntError> {
        if self.version != EXPORT_FORMAT_VERSION {
            return Err(ShuntError::Import(format!(
                "unsupported format version {:?} (expected {EXPORT_FORMAT_VERSION:?})",
                self.version
            )));
        }
        chrono::DateTime::parse_from_rfc3339(&self.timestamp)
            .map_err(|e| ShuntError::Import(format!("timestamp {:?}: {e}", self.timestamp)))?;
        self.global_config
            .validate()
            .map_err(|e| ShuntError::Import(e.to_string()))?;
        let expected = self.global_config.num_ranges();
        if self.ranges.len() != expected {
            return Err(ShuntError::Import(format!(
                "document has {} ranges but numRanges is {expected}",
                self.ranges.len()
            )));
        }

        let resistances: Vec<f64> = self.ranges.iter().map(|r| r.resistance).collect();
        let tolerances: Vec<f64> = self
            .ranges
            .iter()
            .map(|r| r.resistance_tolerance_percent)
            .collect();
        let recomputed = compute_plan(&self.global_config, &resistances, &tolerances);
        for (i, (stored, fresh)) in self.ranges.iter().zip(&recomputed).enumerate() {
            if let Some(field) = first_mismatch(stored, fresh) {
                return Err(ShuntError::Import(format!(
                    "range {i} field {field} does not match its resistance and global parameters"
                )));
            }
        }
        Ok(())
    }

    /// Rebuild a live planner from the document's resistors and tolerances.
    pub fn into_planner(self, catalog: Catalog) -> crate::error::Result<Planner> {
        let resistances = self.ranges.iter().map(|r| r.resistance).collect();
        let tolerances = self
            .ranges
            .iter()
            .map(|r| r.resistance_tolerance_percent)
            .collect();
        Planner::builder()
            .with_global(self.global_config)
            .with_catalog(catalog)
            .with_resistances(resistances)
            .with_tolerances(tolerances)
            .build()
    }
}

fn first_mismatch(stored: &RangeConfig, fresh: &RangeConfig) -> Option<&'static str> {
    let fields: [(&'static str, f64, f64); 9] = [
        (
            "theoreticalMaxCurrent",
            stored.theoretical_max_current,
            fresh.theoretical_max_current,
        ),
        (
            "theoreticalMinCurrent",
            stored.theoretical_min_current,
            fresh.theoretical_min_current,
        ),
        (
            "currentResolution",
            stored.current_resolution,
            fresh.current_resolution,
        ),
        ("upThreshold", stored.up_threshold, fresh.up_threshold),
        ("downThreshold", stored.down_threshold, fresh.down_threshold),
        (
            "minLoadResistance",
            stored.min_load_resistance,
            fresh.min_load_resistance,
        ),
        (
            "maxLoadResistance",
            stored.max_load_resistance,
            fresh.max_load_resistance,
        ),
        (
            "maxTheoreticalErrorPercent",
            stored.max_theoretical_error_percent,
            fresh.max_theoretical_error_percent,
        ),
        (
            "maxPowerDissipation",
            stored.max_power_dissipation,
            fresh.max_power_dissipation,
        ),
    ];
    for (name, a, b) in fields {
        if !approx_eq_rel(a, b, IMPORT_REL_TOLERANCE) {
            return Some(name);
        }
    }
    if stored.overlap_info != fresh.overlap_info {
        return Some("overlapInfo");
    }
    None
}
