//! Instrument-wide parameters for one computation pass.

use serde::{Deserialize, Serialize};
use shunt_config::{
    ADC_BITS_MAX, ADC_BITS_MIN, BUS_VOLTAGE_MAX, BUS_VOLTAGE_MIN, MAX_CURRENT_MAX_A,
    MAX_CURRENT_MIN_A, MAX_RANGES, MIN_CURRENT_MAX_NA, MIN_CURRENT_MIN_NA,
};

use crate::error::BuildError;
use crate::range::AdcParams;

/// Nanoamps per amp.
pub const NA_PER_A: f64 = 1e9;

/// Global parameters; field names follow the export schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalConfig {
    pub num_ranges: u8,
    pub adc_bits: u8,
    pub adc_resolution_volt_per_lsb: f64,
    pub bus_voltage: f64,
    /// Amps.
    pub max_current_target: f64,
    pub min_current_target_nanoamp: f64,
    pub hysteresis_factor: f64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            num_ranges: 3,
            adc_bits: 16,
            adc_resolution_volt_per_lsb: 2.5e-6,
            bus_voltage: 3.3,
            max_current_target: 1.0,
            min_current_target_nanoamp: 1000.0,
            hysteresis_factor: 0.01,
        }
    }
}

impl GlobalConfig {
    pub fn adc(&self) -> AdcParams {
        AdcParams::new(self.adc_bits, self.adc_resolution_volt_per_lsb)
    }

    pub fn full_scale_voltage(&self) -> f64 {
        self.adc().full_scale_voltage()
    }

    pub fn min_current_target_amps(&self) -> f64 {
        self.min_current_target_nanoamp / NA_PER_A
    }

    pub fn num_ranges(&self) -> usize {
        usize::from(self.num_ranges)
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if self.num_ranges == 0 || self.num_ranges > MAX_RANGES {
            return Err(BuildError::InvalidConfig("num_ranges must be in [1, 8]"));
        }
        if !(ADC_BITS_MIN..=ADC_BITS_MAX).contains(&self.adc_bits) {
            return Err(BuildError::InvalidConfig("adc_bits must be in [8, 24]"));
        }
        if !(self.adc_resolution_volt_per_lsb.is_finite() && self.adc_resolution_volt_per_lsb > 0.0)
        {
            return Err(BuildError::InvalidConfig("adc resolution must be > 0"));
        }
        if !(BUS_VOLTAGE_MIN..=BUS_VOLTAGE_MAX).contains(&self.bus_voltage) {
            return Err(BuildError::InvalidConfig("bus_voltage must be in [0.1, 36] V"));
        }
        if !(MAX_CURRENT_MIN_A..=MAX_CURRENT_MAX_A).contains(&self.max_current_target) {
            return Err(BuildError::InvalidConfig(
                "max_current_target must be in [0.001, 100] A",
            ));
        }
        if !(MIN_CURRENT_MIN_NA..=MIN_CURRENT_MAX_NA).contains(&self.min_current_target_nanoamp) {
            return Err(BuildError::InvalidConfig(
                "min_current_target must be in [1, 1000] nA",
            ));
        }
        if !(self.hysteresis_factor > 0.0 && self.hysteresis_factor < 1.0) {
            return Err(BuildError::InvalidConfig(
                "hysteresis_factor must be in (0.0, 1.0)",
            ));
        }
        Ok(())
    }
}
