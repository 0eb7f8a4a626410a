//! Pressure sensor abstractions
//!
//! A [`PressureSensor`] yields [`PressureReading`]s in hPa. Drivers for real
//! hardware live behind cargo features; the simulator supplies its own mock.

#[cfg(feature = "sensor-bme280")]
mod bme280;

#[cfg(feature = "sensor-bme280")]
pub use self::bme280::Bme280Sensor;

use thiserror_no_std::Error;

/// Pascals per hectopascal
pub const PASCALS_PER_HPA: f32 = 100.0;

/// A single barometric pressure sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureReading {
    pub hpa: f32,
}

impl PressureReading {
    /// Non-finite values are rejected; anything else is passed through as-is.
    pub fn new(hpa: f32) -> Result<Self, SensorError> {
        if !hpa.is_finite() {
            return Err(SensorError::OutOfRange { value: hpa });
        }
        Ok(Self { hpa })
    }

    pub fn from_pascals(pa: f32) -> Result<Self, SensorError> {
        Self::new(pa / PASCALS_PER_HPA)
    }
}

/// Requested delivery rate for sensor readings.
///
/// The named rates follow the usual sensor-framework tiers; `Game` is what
/// the altimeter screen asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SamplingRate {
    Fastest = 0,
    #[default]
    Game = 1,
    Ui = 2,
    Normal = 3,
}

impl SamplingRate {
    /// Delay between consecutive readings
    pub const fn interval_ms(&self) -> u32 {
        match self {
            SamplingRate::Fastest => 0,
            SamplingRate::Game => 20,
            SamplingRate::Ui => 66,
            SamplingRate::Normal => 200,
        }
    }

    /// Unknown values fall back to `Game`
    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            0 => SamplingRate::Fastest,
            2 => SamplingRate::Ui,
            3 => SamplingRate::Normal,
            _ => SamplingRate::Game,
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SensorError {
    #[error("{sensor}: sensor not present")]
    NotPresent { sensor: &'static str },

    #[error("{sensor}: initialization failed ({details})")]
    InitializationFailed {
        sensor: &'static str,
        details: &'static str,
    },

    #[error("{sensor}: {operation} failed ({details})")]
    ReadFailed {
        sensor: &'static str,
        operation: &'static str,
        details: &'static str,
    },

    #[error("reading out of range: {value}")]
    OutOfRange { value: f32 },
}

/// Trait for sensors that produce barometric pressure readings.
pub trait PressureSensor {
    /// Name used in log output
    fn name(&self) -> &'static str;

    /// Take one reading.
    fn read(&mut self) -> impl Future<Output = Result<PressureReading, SensorError>>;
}
