//! Display manager for the altimeter screen
//!
//! Top-level screen controller. It owns the draw target and the
//! [`AltimeterPage`], and ties the screen's visibility to the sensor bridge:
//! a visible screen keeps the pressure listener registered, a hidden one
//! unregisters it.
//!
//! The embedding loop (simulator or firmware) drives it once per frame:
//!
//! ```ignore
//! manager.resume();
//! loop {
//!     if let Some(event) = touch_tracker.update(poll_touch()) {
//!         manager.handle_touch(event);
//!     }
//!     manager.poll_sensor();
//!     manager.render()?;
//! }
//! ```

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, info};

use crate::config::Config;
use crate::pages::AltimeterPage;
use crate::pages::page::Page;
use crate::sensor_bridge::SensorBridge;
use crate::ui::core::{Action, PageEvent, TouchEvent};
use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

/// Input for the display manager from outside the touch path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayRequest {
    /// Show the screen and register the pressure listener
    Resume,
    /// Hide the screen and unregister the pressure listener
    Pause,
    /// Flip between visible and hidden
    ToggleVisibility,
    /// Handle a touch event on the page
    HandleTouch(TouchEvent),
    /// Apply an action as if a widget had produced it
    Apply(Action),
    /// Flip the simulation switch
    ToggleSimulation,
    /// Move the simulated pressure by this many hPa
    StepSimulatedPressure(f32),
    /// Force a redraw of the page
    Redraw,
}

pub struct DisplayManager<'b, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    display: D,
    page: AltimeterPage,
    bridge: &'b SensorBridge,
    config: Config,
    visible: bool,
}

impl<'b, D> DisplayManager<'b, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Create a hidden screen; call [`resume`](Self::resume) to show it.
    pub fn new(display: D, bridge: &'b SensorBridge, config: Config) -> Self {
        let bounds = Rectangle::new(
            Point::zero(),
            Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
        );

        Self {
            display,
            page: AltimeterPage::new(bounds, &config),
            bridge,
            config,
            visible: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn page(&self) -> &AltimeterPage {
        &self.page
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Screen became visible: start listening for pressure readings.
    pub fn resume(&mut self) {
        if self.visible {
            return;
        }
        self.visible = true;
        self.bridge.register(self.config.sampling_rate);
        Page::on_activate(&mut self.page);
        info!("{} screen resumed", Page::title(&self.page));
    }

    /// Screen was hidden: stop listening for pressure readings.
    pub fn pause(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        self.bridge.unregister();
        Page::on_deactivate(&mut self.page);
        info!("{} screen paused", Page::title(&self.page));
    }

    pub fn toggle_visibility(&mut self) {
        if self.visible {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Route a touch event to the page and apply any resulting action.
    ///
    /// Touches are ignored while the screen is hidden.
    pub fn handle_touch(&mut self, event: TouchEvent) -> bool {
        if !self.visible {
            return false;
        }
        debug!("Touch: {:?}", event);
        match Page::handle_touch(&mut self.page, event) {
            Some(action) => self.apply_action(action),
            None => false,
        }
    }

    /// Returns `true` if the screen state changed
    pub fn apply_action(&mut self, action: Action) -> bool {
        if !self.visible {
            debug!("Ignoring {:?} while paused", action);
            return false;
        }
        Page::apply_action(&mut self.page, action)
    }

    pub fn toggle_simulation(&mut self) -> bool {
        let on = !self.page.state().is_simulating();
        self.apply_action(Action::SetSimulation(on))
    }

    /// Nudge the simulated pressure; only meaningful while simulating.
    pub fn step_simulated_pressure(&mut self, delta_hpa: f32) -> bool {
        if !self.page.state().is_simulating() {
            return false;
        }
        let target = self.page.state().simulated_hpa() + delta_hpa;
        self.apply_action(Action::SetSimulatedPressure(target))
    }

    /// Forward the latest reading from the sensor bridge, if any.
    ///
    /// Returns `true` if the page changed.
    pub fn poll_sensor(&mut self) -> bool {
        match self.bridge.take_latest() {
            Some(reading) => Page::on_event(&mut self.page, &PageEvent::SensorUpdate(reading)),
            None => false,
        }
    }

    /// Redraw the page if anything changed since the last frame.
    ///
    /// Returns `true` if a frame was drawn.
    pub fn render(&mut self) -> Result<bool, D::Error> {
        if !Page::is_dirty(&self.page) {
            return Ok(false);
        }
        Page::draw_page(&mut self.page, &mut self.display)?;
        Page::mark_clean(&mut self.page);
        Ok(true)
    }

    /// Dispatch a request. Returns `true` if the page needs a redraw.
    pub fn process_request(&mut self, request: DisplayRequest) -> bool {
        debug!("Processing request: {:?}", request);
        match request {
            DisplayRequest::Resume => self.resume(),
            DisplayRequest::Pause => self.pause(),
            DisplayRequest::ToggleVisibility => self.toggle_visibility(),
            DisplayRequest::HandleTouch(event) => {
                self.handle_touch(event);
            }
            DisplayRequest::Apply(action) => {
                self.apply_action(action);
            }
            DisplayRequest::ToggleSimulation => {
                self.toggle_simulation();
            }
            DisplayRequest::StepSimulatedPressure(delta) => {
                self.step_simulated_pressure(delta);
            }
            DisplayRequest::Redraw => Page::mark_dirty(&mut self.page),
        }
        Page::is_dirty(&self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{PressureReading, SamplingRate};
    use crate::ui::core::TouchPoint;
    use crate::ui::styling::WHITE;
    use embedded_graphics::mock_display::MockDisplay;

    fn manager(bridge: &SensorBridge) -> DisplayManager<'_, MockDisplay<Rgb565>> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        DisplayManager::new(display, bridge, Config::default())
    }

    fn reading(hpa: f32) -> PressureReading {
        PressureReading::new(hpa).unwrap()
    }

    #[test]
    fn test_resume_and_pause_drive_registration() {
        let bridge = SensorBridge::new();
        let mut manager = manager(&bridge);
        assert!(!manager.is_visible());
        assert!(!bridge.is_registered());

        manager.resume();
        assert!(manager.is_visible());
        assert!(bridge.is_registered());
        assert_eq!(bridge.rate(), SamplingRate::Game);

        manager.pause();
        assert!(!bridge.is_registered());
        assert!(manager.page().is_paused());

        manager.toggle_visibility();
        assert!(bridge.is_registered());
    }

    #[test]
    fn test_sensor_readings_reach_the_page() {
        let bridge = SensorBridge::new();
        let mut manager = manager(&bridge);
        manager.resume();

        assert!(!manager.poll_sensor());
        bridge.deliver(reading(900.0));
        assert!(manager.poll_sensor());
        assert_eq!(manager.page().state().measured_hpa(), 900.0);
    }

    #[test]
    fn test_readings_while_paused_are_dropped() {
        let bridge = SensorBridge::new();
        let mut manager = manager(&bridge);
        manager.resume();
        manager.pause();

        assert!(!bridge.deliver(reading(900.0)));
        manager.resume();
        assert!(!manager.poll_sensor());
        assert_eq!(manager.page().state().measured_hpa(), 1013.25);
    }

    #[test]
    fn test_render_only_when_dirty() {
        let bridge = SensorBridge::new();
        let mut manager = manager(&bridge);
        manager.resume();

        assert_eq!(manager.render(), Ok(true));
        assert_eq!(manager.display().get_pixel(Point::new(2, 2)), Some(WHITE));
        assert_eq!(manager.render(), Ok(false));

        bridge.deliver(reading(1013.25));
        manager.poll_sensor();
        assert_eq!(manager.render(), Ok(false));

        assert!(manager.process_request(DisplayRequest::Redraw));
        assert_eq!(manager.render(), Ok(true));
    }

    #[test]
    fn test_touch_toggles_simulation() {
        let bridge = SensorBridge::new();
        let mut manager = manager(&bridge);
        let switch = TouchPoint::new(280, 146);

        // Hidden screens ignore touches
        assert!(!manager.handle_touch(TouchEvent::Press(switch)));

        manager.resume();
        assert!(manager.handle_touch(TouchEvent::Press(switch)));
        assert!(manager.page().state().is_simulating());
    }

    #[test]
    fn test_keyboard_style_requests() {
        let bridge = SensorBridge::new();
        let mut manager = manager(&bridge);
        manager.process_request(DisplayRequest::Resume);

        // Stepping does nothing until simulation is on
        assert!(!manager.step_simulated_pressure(-10.0));

        manager.process_request(DisplayRequest::ToggleSimulation);
        manager.process_request(DisplayRequest::StepSimulatedPressure(-13.25));
        assert_eq!(manager.page().state().simulated_hpa(), 1000.0);

        manager.process_request(DisplayRequest::StepSimulatedPressure(500.0));
        assert_eq!(manager.page().state().simulated_hpa(), 1100.0);

        manager.process_request(DisplayRequest::Apply(Action::SetSimulation(false)));
        assert!(!manager.page().state().is_simulating());
    }
}
