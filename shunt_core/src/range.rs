//! Electrical characteristics of a single measurement range.
//!
//! A range is one sense resistor in front of the ADC. Everything here is a
//! pure function of the resistor, its tolerance, the ADC and the bus voltage,
//! plus where the range sits in the ordered sequence (the outermost ranges do
//! not give up headroom to hysteresis on their open side).

use serde::{Deserialize, Serialize};

use crate::util::positive_or_zero;

/// ADC quantization parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdcParams {
    pub bits: u8,
    /// Volts per LSB.
    pub resolution: f64,
}

impl AdcParams {
    pub fn new(bits: u8, resolution: f64) -> Self {
        Self { bits, resolution }
    }

    /// Largest voltage the ADC digitizes: `resolution * 2^bits`.
    #[inline]
    pub fn full_scale_voltage(&self) -> f64 {
        self.resolution * 2f64.powi(i32::from(self.bits))
    }
}

/// Position of a range in the ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangePosition {
    /// Highest-current range; nothing above to hand off to.
    pub is_first: bool,
    /// Lowest-current range; nothing below to hand off to.
    pub is_last: bool,
}

impl RangePosition {
    /// Position of `index` in a sequence of `len` ranges.
    pub fn of(index: usize, len: usize) -> Self {
        Self {
            is_first: index == 0,
            is_last: index + 1 == len,
        }
    }
}

/// Overlap annotations written by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapInfo {
    /// `false` for the last range.
    pub overlaps_with_next: bool,
    /// `false` for the first range.
    pub overlaps_with_prev: bool,
    pub is_valid: bool,
}

/// One range with every derived quantity. Currents in A, resistances in Ω.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeConfig {
    pub resistance: f64,
    pub resistance_tolerance_percent: f64,
    pub theoretical_max_current: f64,
    pub theoretical_min_current: f64,
    /// One LSB expressed as current.
    pub current_resolution: f64,
    /// Current above which the planner hands off to the next wider range.
    pub up_threshold: f64,
    /// Current below which the planner hands off to the next narrower range.
    pub down_threshold: f64,
    pub min_load_resistance: f64,
    pub max_load_resistance: f64,
    pub max_theoretical_error_percent: f64,
    /// Worst-case power in the sense resistor at full scale (W).
    pub max_power_dissipation: f64,
    pub overlap_info: OverlapInfo,
}

/// Derive a full `RangeConfig` for one resistor.
///
/// Overlap flags are left at their defaults; only the validator sets them.
/// Degenerate load-resistance, error and power fields clamp to zero.
pub fn compute_range(
    resistance: f64,
    tolerance_percent: f64,
    adc: AdcParams,
    bus_voltage: f64,
    hysteresis_factor: f64,
    position: RangePosition,
) -> RangeConfig {
    let full_scale = adc.full_scale_voltage();
    let max_current = full_scale / resistance;
    let min_current = adc.resolution / resistance;

    let up = if position.is_first {
        max_current
    } else {
        max_current * (1.0 - hysteresis_factor)
    };
    let down = if position.is_last {
        min_current
    } else {
        max_current * hysteresis_factor
    };

    let min_load = if up > 0.0 {
        positive_or_zero((bus_voltage - up * resistance) / up)
    } else {
        0.0
    };
    let max_load = if down > 0.0 {
        positive_or_zero((bus_voltage - down * resistance) / down)
    } else {
        0.0
    };

    let error_percent = if min_load > 0.0 {
        positive_or_zero(resistance * (1.0 + tolerance_percent / 100.0) / min_load * 100.0)
    } else {
        0.0
    };

    RangeConfig {
        resistance,
        resistance_tolerance_percent: tolerance_percent,
        theoretical_max_current: max_current,
        theoretical_min_current: min_current,
        current_resolution: min_current,
        up_threshold: up,
        down_threshold: down,
        min_load_resistance: min_load,
        max_load_resistance: max_load,
        max_theoretical_error_percent: error_percent,
        max_power_dissipation: positive_or_zero(max_current * max_current * resistance),
        overlap_info: OverlapInfo::default(),
    }
}
