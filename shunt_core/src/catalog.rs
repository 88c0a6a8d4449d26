//! Candidate sense resistors and tolerance grades.
//!
//! The reference list is the E3 series (1.0, 2.2, 4.7) over ten decades,
//! 10 mΩ to 10 MΩ. Other E-series lists can be generated between two bounds,
//! or a custom list supplied; every catalog is kept in ascending order with
//! no duplicates, which the search engine relies on.

use crate::error::BuildError;

/// Reference resistances (Ω), ascending.
pub const REFERENCE_RESISTANCES: [f64; 28] = [
    0.01, 0.022, 0.047, //
    0.1, 0.22, 0.47, //
    1.0, 2.2, 4.7, //
    10.0, 22.0, 47.0, //
    100.0, 220.0, 470.0, //
    1e3, 2.2e3, 4.7e3, //
    10e3, 22e3, 47e3, //
    100e3, 220e3, 470e3, //
    1e6, 2.2e6, 4.7e6, //
    10e6,
];

/// Standard tolerance grades (%), ascending.
pub const STANDARD_TOLERANCES: [f64; 8] = [0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0];

/// Tolerance assumed for automatically selected resistors.
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 1.0;

// Two-digit mantissas (value = m * 10^e). Each series extends the previous.
const E3_MANTISSAS: &[u32] = &[10, 22, 47];
const E6_EXTRA: &[u32] = &[15, 33, 68];
const E12_EXTRA: &[u32] = &[12, 18, 27, 39, 56, 82];
const E24_EXTRA: &[u32] = &[11, 13, 16, 20, 24, 30, 36, 43, 51, 62, 75, 91];

// Exponent sweep for generated series: 10 µΩ .. 91 GΩ.
const EXP_MIN: i32 = -6;
const EXP_MAX: i32 = 9;

/// IEC 60063 preferred-number series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ESeries {
    E3,
    E6,
    E12,
    E24,
}

impl ESeries {
    fn mantissas(self) -> Vec<u32> {
        let mut out = E3_MANTISSAS.to_vec();
        if matches!(self, Self::E6 | Self::E12 | Self::E24) {
            out.extend_from_slice(E6_EXTRA);
        }
        if matches!(self, Self::E12 | Self::E24) {
            out.extend_from_slice(E12_EXTRA);
        }
        if self == Self::E24 {
            out.extend_from_slice(E24_EXTRA);
        }
        out.sort_unstable();
        out
    }

    /// All series values within `[min_ohm, max_ohm]`, ascending.
    ///
    /// Values are built as integer mantissa times/divided by an exact power of
    /// ten so they match the equivalent decimal literals bit for bit.
    pub fn values_between(self, min_ohm: f64, max_ohm: f64) -> Vec<f64> {
        // Bounds typed as decimals (0.01, 4.7e3) must include themselves.
        let lo = min_ohm * (1.0 - 1e-9);
        let hi = max_ohm * (1.0 + 1e-9);
        let mantissas = self.mantissas();
        let mut out = Vec::new();
        for e in EXP_MIN..=EXP_MAX {
            for &m in &mantissas {
                let m = f64::from(m);
                let v = if e >= 0 {
                    m * 10f64.powi(e)
                } else {
                    m / 10f64.powi(-e)
                };
                if v >= lo && v <= hi {
                    out.push(v);
                }
            }
        }
        out
    }
}

/// Ordered set of candidate resistances plus the tolerance grades offered
/// for them.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    resistances: Vec<f64>,
    tolerances: Vec<f64>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::reference()
    }
}

impl Catalog {
    /// The built-in reference catalog.
    pub fn reference() -> Self {
        Self {
            resistances: REFERENCE_RESISTANCES.to_vec(),
            tolerances: STANDARD_TOLERANCES.to_vec(),
        }
    }

    /// Build a catalog from arbitrary values; input order does not matter.
    pub fn new(mut resistances: Vec<f64>, mut tolerances: Vec<f64>) -> Result<Self, BuildError> {
        if resistances.is_empty() {
            return Err(BuildError::EmptyCatalog);
        }
        if resistances.iter().any(|r| !(r.is_finite() && *r > 0.0)) {
            return Err(BuildError::InvalidCatalog(
                "resistances must be finite and > 0",
            ));
        }
        if tolerances.iter().any(|t| !(t.is_finite() && *t >= 0.0)) {
            return Err(BuildError::InvalidCatalog(
                "tolerances must be finite and >= 0",
            ));
        }
        resistances.sort_by(f64::total_cmp);
        if resistances.windows(2).any(|w| w[0] == w[1]) {
            return Err(BuildError::InvalidCatalog("duplicate resistance"));
        }
        tolerances.sort_by(f64::total_cmp);
        tolerances.dedup();
        Ok(Self {
            resistances,
            tolerances,
        })
    }

    /// Generated E-series catalog with the standard tolerance grades.
    pub fn from_series(series: ESeries, min_ohm: f64, max_ohm: f64) -> Result<Self, BuildError> {
        if !(min_ohm.is_finite() && min_ohm > 0.0 && max_ohm.is_finite() && max_ohm >= min_ohm) {
            return Err(BuildError::InvalidCatalog("series bounds must satisfy 0 < min <= max"));
        }
        Self::new(
            series.values_between(min_ohm, max_ohm),
            STANDARD_TOLERANCES.to_vec(),
        )
    }

    pub fn resistances(&self) -> &[f64] {
        &self.resistances
    }

    pub fn tolerances(&self) -> &[f64] {
        &self.tolerances
    }

    pub fn len(&self) -> usize {
        self.resistances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resistances.is_empty()
    }

    pub fn smallest(&self) -> f64 {
        self.resistances[0]
    }

    pub fn largest(&self) -> f64 {
        self.resistances[self.resistances.len() - 1]
    }

    /// Index of the entry closest in absolute value to `target`.
    /// Ties resolve to the smaller entry.
    pub fn nearest_index(&self, target: f64) -> usize {
        let mut best = 0;
        let mut best_diff = f64::INFINITY;
        for (i, &r) in self.resistances.iter().enumerate() {
            let diff = (r - target).abs();
            if diff < best_diff {
                best = i;
                best_diff = diff;
            }
        }
        best
    }

    /// Exact lookup of a catalog value.
    pub fn index_of(&self, ohms: f64) -> Option<usize> {
        self.resistances
            .binary_search_by(|probe| probe.total_cmp(&ohms))
            .ok()
    }

    pub fn contains(&self, ohms: f64) -> bool {
        self.index_of(ohms).is_some()
    }

    pub fn is_standard_tolerance(&self, percent: f64) -> bool {
        self.tolerances.contains(&percent)
    }
}
