use ::bme280::i2c::AsyncBME280;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use log::{error, info};

use super::{PressureReading, PressureSensor, SensorError};

const SENSOR_NAME: &str = "BME280";

/// Bosch BME280 on the primary I2C address (0x76).
///
/// The chip is probed lazily on the first read. If the probe fails the
/// sensor reports [`SensorError::NotPresent`] from then on.
pub struct Bme280Sensor<I, D> {
    sensor: AsyncBME280<I>,
    delay: D,
    state: InitState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum InitState {
    Pending,
    Ready,
    Absent,
}

impl<I: I2c, D: DelayNs> Bme280Sensor<I, D> {
    pub fn new(i2c: I, delay: D) -> Self {
        Self {
            sensor: AsyncBME280::new_primary(i2c),
            delay,
            state: InitState::Pending,
        }
    }

    async fn initialize(&mut self) -> Result<(), SensorError> {
        match self.sensor.init(&mut self.delay).await {
            Ok(()) => {
                info!("{SENSOR_NAME}: initialized");
                self.state = InitState::Ready;
                Ok(())
            }
            Err(e) => {
                error!("{SENSOR_NAME} init failed: {:?}", e);
                self.state = InitState::Absent;
                Err(SensorError::NotPresent {
                    sensor: SENSOR_NAME,
                })
            }
        }
    }
}

impl<I: I2c, D: DelayNs> PressureSensor for Bme280Sensor<I, D> {
    fn name(&self) -> &'static str {
        SENSOR_NAME
    }

    async fn read(&mut self) -> Result<PressureReading, SensorError> {
        match self.state {
            InitState::Absent => {
                return Err(SensorError::NotPresent {
                    sensor: SENSOR_NAME,
                });
            }
            InitState::Pending => self.initialize().await?,
            InitState::Ready => {}
        }

        let measurements = self.sensor.measure(&mut self.delay).await.map_err(|e| {
            error!("{SENSOR_NAME} measurement failed: {:?}", e);
            SensorError::ReadFailed {
                sensor: SENSOR_NAME,
                operation: "measure pressure",
                details: "I2C communication error or sensor not responding",
            }
        })?;

        PressureReading::from_pascals(measurements.pressure)
    }
}
