//! Runtime configuration for the altimeter screen
//!
//! All values have compile-time defaults; embedders override individual
//! fields with the `with_*` builders before handing the config to the
//! [`DisplayManager`](crate::display_manager::DisplayManager).

use crate::altitude::SEA_LEVEL_PRESSURE_HPA;
use crate::sensors::SamplingRate;

/// Lower bound of the simulated pressure slider (hPa)
pub const SIMULATED_MIN_HPA: f32 = 800.0;

/// Upper bound of the simulated pressure slider (hPa)
pub const SIMULATED_MAX_HPA: f32 = 1100.0;

/// Default keyboard / button step for the simulated pressure (hPa)
pub const SLIDER_STEP_HPA: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Reference pressure used as `p0` in the altitude formula
    pub sea_level_hpa: f32,
    /// Rate requested from the pressure sensor while the screen is visible
    pub sampling_rate: SamplingRate,
    pub simulated_min_hpa: f32,
    pub simulated_max_hpa: f32,
    pub slider_step_hpa: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sea_level_hpa: SEA_LEVEL_PRESSURE_HPA,
            sampling_rate: SamplingRate::Game,
            simulated_min_hpa: SIMULATED_MIN_HPA,
            simulated_max_hpa: SIMULATED_MAX_HPA,
            slider_step_hpa: SLIDER_STEP_HPA,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sea_level_hpa(mut self, hpa: f32) -> Self {
        self.sea_level_hpa = hpa;
        self
    }

    pub fn with_sampling_rate(mut self, rate: SamplingRate) -> Self {
        self.sampling_rate = rate;
        self
    }

    /// Sets the simulated pressure range. The bounds are swapped if given in
    /// the wrong order.
    pub fn with_simulated_range(mut self, min_hpa: f32, max_hpa: f32) -> Self {
        if min_hpa <= max_hpa {
            self.simulated_min_hpa = min_hpa;
            self.simulated_max_hpa = max_hpa;
        } else {
            self.simulated_min_hpa = max_hpa;
            self.simulated_max_hpa = min_hpa;
        }
        self
    }

    pub fn with_slider_step_hpa(mut self, step: f32) -> Self {
        self.slider_step_hpa = step;
        self
    }

    /// Clamp a pressure into the simulated range
    pub fn clamp_simulated(&self, hpa: f32) -> f32 {
        hpa.clamp(self.simulated_min_hpa, self.simulated_max_hpa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sea_level_hpa, 1013.25);
        assert_eq!(config.sampling_rate, SamplingRate::Game);
        assert_eq!(config.simulated_min_hpa, 800.0);
        assert_eq!(config.simulated_max_hpa, 1100.0);
    }

    #[test]
    fn test_simulated_range_is_ordered() {
        let config = Config::new().with_simulated_range(1050.0, 950.0);
        assert_eq!(config.simulated_min_hpa, 950.0);
        assert_eq!(config.simulated_max_hpa, 1050.0);
        assert_eq!(config.clamp_simulated(900.0), 950.0);
        assert_eq!(config.clamp_simulated(1200.0), 1050.0);
        assert_eq!(config.clamp_simulated(1000.0), 1000.0);
    }
}
