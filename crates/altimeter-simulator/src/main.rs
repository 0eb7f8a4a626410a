//! Desktop simulator for the baro-altimeter screen.
//!
//! Renders the altimeter page in an SDL2 window via
//! `embedded-graphics-simulator`. A mock barometer thread feeds the shared
//! sensor bridge so the screen can be exercised without hardware.
//!
//! # Key bindings
//!
//! | Key             | Action                                   |
//! |-----------------|------------------------------------------|
//! | S               | Toggle simulated pressure                |
//! | Up / Down       | Simulated pressure ±1 hPa                |
//! | PageUp / PageDn | Simulated pressure ±10 hPa               |
//! | P               | Hide/show the screen (pause the sensor)  |
//! | Q / Esc         | Quit                                     |
//!
//! Mouse press, drag and release are forwarded as touch events.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info};

use altimeter_core::config::Config;
use altimeter_core::display_manager::{DisplayManager, DisplayRequest};
use altimeter_core::sensor_bridge::{PRESSURE_BRIDGE, SensorBridge};
use altimeter_core::sensors::PressureReading;
use altimeter_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, TouchPoint, TouchTracker};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// How often the mock barometer checks for a listener while unregistered.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Large keyboard step for the simulated pressure (hPa).
const COARSE_STEP_HPA: f32 = 10.0;

// ---------------------------------------------------------------------------
// Mock barometer
// ---------------------------------------------------------------------------

/// Synthetic barometer drifting around standard sea-level pressure, as if
/// carried up and down a few hundred metres.
struct MockBarometer {
    elapsed_secs: f64,
}

impl MockBarometer {
    fn new() -> Self {
        Self { elapsed_secs: 0.0 }
    }

    fn next_reading(&mut self, dt_secs: f64) -> Option<PressureReading> {
        self.elapsed_secs += dt_secs;
        let t = self.elapsed_secs;

        // Climbs to ~30 hPa below sea level and back every two minutes, with a small wobble
        let hpa = 1013.25 - 30.0 * (t / 40.0).sin().abs() + 2.0 * (t / 7.0).cos() - 2.0;

        PressureReading::new(hpa as f32).ok()
    }
}

/// Deliver mock readings into `bridge` at its registered rate until
/// `running` is cleared.
fn spawn_mock_barometer(
    bridge: &'static SensorBridge,
    running: &'static AtomicBool,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut barometer = MockBarometer::new();
        let mut last = Instant::now();

        while running.load(Ordering::Relaxed) {
            if !bridge.is_registered() {
                thread::sleep(IDLE_POLL_INTERVAL);
                last = Instant::now();
                continue;
            }

            let now = Instant::now();
            if let Some(reading) = barometer.next_reading((now - last).as_secs_f64()) {
                bridge.deliver(reading);
            }
            last = now;

            let interval = u64::from(bridge.rate().interval_ms()).max(1);
            thread::sleep(Duration::from_millis(interval));
        }
    })
}

static RUNNING: AtomicBool = AtomicBool::new(true);

// ---------------------------------------------------------------------------
// Input mapping
// ---------------------------------------------------------------------------

/// Map an SDL keycode to a display request.
fn keycode_to_request(keycode: Keycode, step_hpa: f32) -> Option<DisplayRequest> {
    match keycode {
        Keycode::S => Some(DisplayRequest::ToggleSimulation),
        Keycode::Up => Some(DisplayRequest::StepSimulatedPressure(step_hpa)),
        Keycode::Down => Some(DisplayRequest::StepSimulatedPressure(-step_hpa)),
        Keycode::PageUp => Some(DisplayRequest::StepSimulatedPressure(COARSE_STEP_HPA)),
        Keycode::PageDown => Some(DisplayRequest::StepSimulatedPressure(-COARSE_STEP_HPA)),
        Keycode::P => Some(DisplayRequest::ToggleVisibility),
        _ => None,
    }
}

fn to_touch_point(point: Point) -> TouchPoint {
    TouchPoint::new(
        point.x.clamp(0, DISPLAY_WIDTH_PX as i32 - 1) as u16,
        point.y.clamp(0, DISPLAY_HEIGHT_PX as i32 - 1) as u16,
    )
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting baro-altimeter simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: S=Simulate  Up/Down=±1 hPa  PgUp/PgDn=±10 hPa  P=Pause  Q=Quit");

    let config = Config::default();

    let display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Altimeter Simulator", &output_settings);

    let barometer = spawn_mock_barometer(&PRESSURE_BRIDGE, &RUNNING);

    let mut manager = DisplayManager::new(display, &PRESSURE_BRIDGE, config);
    manager.resume();

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    if let Err(e) = manager.render() {
        error!("Draw error: {:?}", e);
    }
    window.update(manager.display());

    let mut touch = TouchTracker::new();
    let mut mouse_down = false;

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            let sample = match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                    if let Some(request) = keycode_to_request(keycode, config.slider_step_hpa) {
                        manager.process_request(request);
                    }
                    continue;
                }

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    mouse_down = true;
                    Some(to_touch_point(point))
                }
                SimulatorEvent::MouseMove { point } if mouse_down => Some(to_touch_point(point)),
                SimulatorEvent::MouseButtonUp { .. } => {
                    mouse_down = false;
                    None
                }

                _ => continue,
            };

            if let Some(event) = touch.update(sample) {
                manager.handle_touch(event);
            }
        }

        // --- Sensor -------------------------------------------------------
        manager.poll_sensor();

        // --- Render -------------------------------------------------------
        if let Err(e) = manager.render() {
            error!("Draw error: {:?}", e);
        }
        window.update(manager.display());

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    manager.pause();
    RUNNING.store(false, Ordering::Relaxed);
    if barometer.join().is_err() {
        error!("Mock barometer thread panicked");
    }

    info!("Simulator exiting");
}
