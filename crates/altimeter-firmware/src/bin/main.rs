#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_time::{Delay, Duration, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::timer::timg::TimerGroup;
use log::{debug, error, info, warn};

// Display-LCD panel specific imports
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use mipidsi::interface::SpiInterface;
use mipidsi::{Builder as MipidsiBuilder, models::ILI9342CRgb565};

use altimeter_core::config::Config;
use altimeter_core::display_manager::DisplayManager;
use altimeter_core::sensor_bridge::PRESSURE_BRIDGE;
use altimeter_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, TouchTracker};
use altimeter_firmware::hardware::{create_i2c_bus, init_i2c_hardware};
use altimeter_firmware::touch::Ft6336u;

/// UI loop period (~60 FPS touch polling)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[cfg(feature = "sensor-bme280")]
#[embassy_executor::task]
async fn pressure_task(
    mut sensor: altimeter_core::sensors::Bme280Sensor<
        altimeter_firmware::hardware::SharedBus,
        Delay,
    >,
) {
    altimeter_core::sensor_bridge::run_sensor_loop(&mut sensor, &PRESSURE_BRIDGE, &mut Delay)
        .await;
    warn!("Pressure task stopped");
}

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_log!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 73744);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Embassy initialized");

    // Power rails and IO expander come first; nothing else answers without them
    let i2c = create_i2c_bus(peripherals.I2C0, peripherals.GPIO12, peripherals.GPIO11)
        .expect("Failed to configure I2C");
    let (_hardware, devices) = init_i2c_hardware(i2c)
        .await
        .expect("Failed to initialize power management and GPIO expander");

    // Configure and initialize the display

    // 1. Configure SPI bus
    let spi_bus = Spi::new(peripherals.SPI2, SpiConfig::default())
        .expect("Failed to configure SPI")
        .with_sck(peripherals.GPIO36)
        .with_mosi(peripherals.GPIO37);

    // 2. Chip select is driven manually
    let cs = Output::new(peripherals.GPIO35, Level::High, OutputConfig::default());

    // 3. Wrap the SPI bus as a SPI device (required by embedded-hal traits)
    let spi_device =
        ExclusiveDevice::new_no_delay(spi_bus, cs).expect("Failed to create SPI device");

    // 4. Set up DC (Data/Command) pin
    let dc = Output::new(peripherals.GPIO34, Level::Low, OutputConfig::default());

    // 5. Create a buffer for SPI batching (larger = faster, uses more RAM)
    let mut spi_buffer = [0u8; 64];

    // 6. Create display interface
    let di = SpiInterface::new(spi_device, dc, &mut spi_buffer);

    // 7. Build and initialize the display driver
    let display = MipidsiBuilder::new(ILI9342CRgb565, di)
        .display_size(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX)
        .init(&mut Delay)
        .expect("Failed to initialize display");

    info!("Display initialized");

    #[cfg(feature = "sensor-bme280")]
    {
        let sensor = altimeter_core::sensors::Bme280Sensor::new(devices.barometer, Delay);
        if let Err(e) = spawner.spawn(pressure_task(sensor)) {
            error!("Failed to spawn pressure task: {:?}", e);
        }
    }
    #[cfg(not(feature = "sensor-bme280"))]
    {
        let _ = spawner;
        warn!("Built without a pressure sensor driver; showing sea-level default");
    }

    let mut touch = Ft6336u::new(devices.touch);
    match touch.chip_id().await {
        Ok(id) => info!("Touch controller ready (chip ID {:#04x})", id),
        Err(e) => warn!("Touch controller not responding: {:?}", e),
    }

    let mut manager = DisplayManager::new(display, &PRESSURE_BRIDGE, Config::default());
    manager.resume();

    let mut tracker = TouchTracker::new();

    loop {
        match touch.read_touch().await {
            Ok(sample) => {
                if let Some(event) = tracker.update(sample) {
                    manager.handle_touch(event);
                }
            }
            Err(e) => debug!("Touch read failed: {:?}", e),
        }

        manager.poll_sensor();

        if let Err(e) = manager.render() {
            error!("Display render error: {:?}", e);
        }

        Timer::after(FRAME_INTERVAL).await;
    }
}
