//! Screen state for the altimeter
//!
//! [`ScreenState`] holds the three scalars the screen renders from: the last
//! measured pressure, the simulation toggle and the simulated pressure. The
//! sensor bridge only ever writes the measured value, and only while the
//! toggle is off; the toggle and the simulated value change only through
//! user interaction.

use log::info;

use crate::altitude;
use crate::config::Config;

/// Which pressure currently drives the displayed altitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureSource {
    Sensor,
    Simulated,
}

impl PressureSource {
    pub fn label(&self) -> &'static str {
        match self {
            PressureSource::Sensor => "SENSOR",
            PressureSource::Simulated => "SIMULATED",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenState {
    measured_hpa: f32,
    simulating: bool,
    simulated_hpa: f32,
    sea_level_hpa: f32,
    simulated_min_hpa: f32,
    simulated_max_hpa: f32,
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::with_config(&Config::default())
    }
}

impl ScreenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both pressures start at the configured sea-level pressure, clamped
    /// into the simulated range for the simulated one.
    pub fn with_config(config: &Config) -> Self {
        Self {
            measured_hpa: config.sea_level_hpa,
            simulating: false,
            simulated_hpa: config.clamp_simulated(config.sea_level_hpa),
            sea_level_hpa: config.sea_level_hpa,
            simulated_min_hpa: config.simulated_min_hpa,
            simulated_max_hpa: config.simulated_max_hpa,
        }
    }

    pub fn measured_hpa(&self) -> f32 {
        self.measured_hpa
    }

    pub fn simulated_hpa(&self) -> f32 {
        self.simulated_hpa
    }

    pub fn sea_level_hpa(&self) -> f32 {
        self.sea_level_hpa
    }

    pub fn simulated_range(&self) -> (f32, f32) {
        (self.simulated_min_hpa, self.simulated_max_hpa)
    }

    pub fn is_simulating(&self) -> bool {
        self.simulating
    }

    /// Returns `true` if the toggle changed
    pub fn set_simulating(&mut self, simulating: bool) -> bool {
        if self.simulating == simulating {
            return false;
        }
        self.simulating = simulating;
        info!("Pressure source: {}", self.source().label());
        true
    }

    pub fn toggle_simulation(&mut self) {
        self.set_simulating(!self.simulating);
    }

    /// Set the simulated pressure, clamped into the simulated range.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_simulated_hpa(&mut self, hpa: f32) -> bool {
        if hpa.is_nan() {
            return false;
        }
        let clamped = hpa.clamp(self.simulated_min_hpa, self.simulated_max_hpa);
        if clamped == self.simulated_hpa {
            return false;
        }
        self.simulated_hpa = clamped;
        true
    }

    /// Nudge the simulated pressure by `delta_hpa`, clamped into range
    pub fn step_simulated_hpa(&mut self, delta_hpa: f32) -> bool {
        self.set_simulated_hpa(self.simulated_hpa + delta_hpa)
    }

    /// Store a sensor reading.
    ///
    /// Ignored while simulating. Returns `true` if the measured value changed.
    pub fn record_measurement(&mut self, hpa: f32) -> bool {
        if self.simulating || hpa == self.measured_hpa {
            return false;
        }
        self.measured_hpa = hpa;
        true
    }

    pub fn source(&self) -> PressureSource {
        if self.simulating {
            PressureSource::Simulated
        } else {
            PressureSource::Sensor
        }
    }

    /// The pressure that drives the displayed altitude
    pub fn displayed_hpa(&self) -> f32 {
        match self.source() {
            PressureSource::Sensor => self.measured_hpa,
            PressureSource::Simulated => self.simulated_hpa,
        }
    }

    pub fn altitude_m(&self) -> f32 {
        altitude::altitude_m(self.displayed_hpa(), self.sea_level_hpa)
    }

    pub fn background_fraction(&self) -> f32 {
        altitude::background_fraction(self.altitude_m())
    }
}
