//! Hardware bring-up for the altimeter board (M5Stack CoreS3)
//!
//! Power rails and the IO expander must be configured before the display,
//! touch controller or barometer respond, so everything on the shared I2C
//! bus is initialized here in order.

use altimeter_core::async_i2c_bus::{I2cBus, SharedI2c};
use axp2101_embedded::AsyncAxp2101;
use aw9523_embedded::r#async::Aw9523Async;
use embassy_sync::mutex::Mutex;
use esp_hal::Async;
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use log::{error, info};
use static_cell::StaticCell;
use thiserror_no_std::Error;

/// AW9523 address on the system I2C bus
const GPIO_EXPANDER_ADDR: u8 = 0x58;

pub type SystemI2c = I2c<'static, Async>;
pub type SharedBus = SharedI2c<'static, SystemI2c>;

#[derive(Debug, Error)]
pub enum HardwareError {
    #[error("I2C configuration rejected")]
    I2cConfig,

    #[error("power management: {0}")]
    PowerManagement(&'static str),

    #[error("GPIO expander: {0}")]
    GpioExpander(&'static str),
}

/// Peripherals that stay alive for the lifetime of the firmware
pub struct I2cHardware {
    pub power_mgmt: AsyncAxp2101<SharedBus>,
    pub gpio_expander: Aw9523Async<embedded_hal::i2c::SevenBitAddress, SharedBus>,
}

/// Handles for the drivers that run after bring-up
pub struct I2cDevices {
    pub touch: SharedBus,
    pub barometer: SharedBus,
}

/// Create the system I2C peripheral (400 kHz)
pub fn create_i2c_bus(
    i2c0: esp_hal::peripherals::I2C0<'static>,
    sda: esp_hal::peripherals::GPIO12<'static>,
    scl: esp_hal::peripherals::GPIO11<'static>,
) -> Result<SystemI2c, HardwareError> {
    let i2c = I2c::new(i2c0, I2cConfig::default().with_frequency(Rate::from_khz(400)))
        .map_err(|e| {
            error!("I2C config error: {:?}", e);
            HardwareError::I2cConfig
        })?;

    Ok(i2c.with_sda(sda).with_scl(scl).into_async())
}

/// Share the I2C bus and initialize the power controller and IO expander.
pub async fn init_i2c_hardware(
    i2c0: SystemI2c,
) -> Result<(I2cHardware, I2cDevices), HardwareError> {
    static I2C0_BUS: StaticCell<I2cBus<SystemI2c>> = StaticCell::new();
    let bus = I2C0_BUS.init(Mutex::new(i2c0));

    info!("Configuring power management");
    let mut power_mgmt = AsyncAxp2101::new(SharedI2c::new(bus));
    init_power(&mut power_mgmt).await?;
    info!("Power management ready");

    info!("Configuring GPIO expander");
    let mut gpio_expander = Aw9523Async::new(SharedI2c::new(bus), GPIO_EXPANDER_ADDR);
    init_gpio_expander(&mut gpio_expander).await?;
    info!("GPIO expander ready (P1_2 configured for touch interrupt)");

    let hardware = I2cHardware {
        power_mgmt,
        gpio_expander,
    };
    let devices = I2cDevices {
        touch: SharedI2c::new(bus),
        barometer: SharedI2c::new(bus),
    };

    Ok((hardware, devices))
}

async fn init_power(chip: &mut AsyncAxp2101<SharedBus>) -> Result<(), HardwareError> {
    // A failed init is not fatal: the PMIC keeps its OTP defaults.
    if let Err(e) = chip.init().await {
        error!("Power init failed: {:?}", e);
    }

    chip.set_charging_led_mode(axp2101_embedded::ChargeLedMode::On)
        .await
        .map_err(|e| {
            error!("AXP2101 charge LED setup failed: {:?}", e);
            HardwareError::PowerManagement("charge LED mode")
        })?;

    chip.enable_aldo1().await.map_err(rail_error)?;
    chip.enable_aldo2().await.map_err(rail_error)?;
    chip.enable_aldo3().await.map_err(rail_error)?;
    chip.enable_aldo4().await.map_err(rail_error)?;
    chip.enable_bldo1().await.map_err(rail_error)?;
    chip.enable_bldo2().await.map_err(rail_error)?;
    chip.enable_dldo1().await.map_err(rail_error)?;

    // ALDO4 feeds the display panel at 3.3 V
    chip.set_aldo4_voltage(3300).await.map_err(|e| {
        error!("AXP2101 ALDO4 voltage failed: {:?}", e);
        HardwareError::PowerManagement("display rail voltage")
    })?;

    Ok(())
}

fn rail_error<E: core::fmt::Debug>(e: E) -> HardwareError {
    error!("AXP2101 rail setup failed: {:?}", e);
    HardwareError::PowerManagement("enable LDO rails")
}

async fn init_gpio_expander(
    expander: &mut Aw9523Async<embedded_hal::i2c::SevenBitAddress, SharedBus>,
) -> Result<(), HardwareError> {
    expander.init().await.map_err(|e| {
        error!("AW9523 init failed: {:?}", e);
        HardwareError::GpioExpander("init")
    })?;

    // P1_2 (pin 10) is wired to the FT6336U interrupt line
    expander
        .pin_mode(10, aw9523_embedded::PinMode::Input)
        .await
        .map_err(|e| {
            error!("AW9523 pin mode failed: {:?}", e);
            HardwareError::GpioExpander("touch interrupt pin mode")
        })?;

    expander
        .enable_interrupt(10, true)
        .await
        .map_err(|e| {
            error!("AW9523 interrupt enable failed: {:?}", e);
            HardwareError::GpioExpander("touch interrupt enable")
        })?;

    Ok(())
}
