//! Altimeter page
//!
//! Single screen showing the pressure altitude. Layout:
//!
//! ```text
//! Altimeter
//!
//!            Altitude: 988.6 m
//!          Pressure: 900.00 hPa
//! Source: SIMULATED
//!
//! Simulate pressure                 (==O)
//!
//! ----------------O-------------------------   (only while simulating)
//! 800 hPa                          1100 hPa
//! ```
//!
//! The background is a grey level derived from the altitude, from white at
//! the reference pressure to black at 10 km. Text flips to white once the
//! background passes mid-grey.

use core::fmt::Write;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Alignment;
use log::debug;

use crate::app_state::ScreenState;
use crate::config::Config;
use crate::pages::constants::{
    ALTITUDE_Y_PX, PAGE_MARGIN_PX, PRESSURE_Y_PX, RANGE_LABEL_INSET_PX, RANGE_LABEL_Y_PX,
    SLIDER_HEIGHT_PX, SLIDER_Y_PX, STATUS_Y_PX, SWITCH_HEIGHT_PX, SWITCH_LABEL_Y_PX,
    SWITCH_WIDTH_PX, SWITCH_X_PX, SWITCH_Y_PX, TEXT_ROW_HEIGHT_PX, TITLE_ROW_HEIGHT_PX,
    TITLE_Y_PX,
};
use crate::pages::page::Page;
use crate::ui::core::{Action, Drawable, PageEvent, PageId, TouchEvent, TouchResult, Touchable};
use crate::ui::styling::{ColorPalette, Padding, Style, greyscale};
use crate::ui::{Slider, Switch, TextComponent, TextSize};

type Line = heapless::String<64>;

pub struct AltimeterPage {
    bounds: Rectangle,
    state: ScreenState,
    paused: bool,
    background: Rgb565,
    title: TextComponent,
    altitude_text: TextComponent,
    pressure_text: TextComponent,
    status_text: TextComponent,
    switch_label: TextComponent,
    switch: Switch,
    slider: Slider,
    min_label: TextComponent,
    max_label: TextComponent,
    dirty: bool,
}

impl AltimeterPage {
    pub fn new(bounds: Rectangle, config: &Config) -> Self {
        let state = ScreenState::with_config(config);
        let (min_hpa, max_hpa) = state.simulated_range();

        let left = bounds.top_left.x + PAGE_MARGIN_PX;
        let content_width = bounds.size.width.saturating_sub(2 * PAGE_MARGIN_PX as u32);
        let row = |y: i32, height: u32| {
            Rectangle::new(
                Point::new(left, bounds.top_left.y + y),
                Size::new(content_width, height),
            )
        };

        let mut min_text = Line::new();
        write!(min_text, "{min_hpa:.0} hPa").ok();
        let mut max_text = Line::new();
        write!(max_text, "{max_hpa:.0} hPa").ok();

        let title = TextComponent::new(
            row(TITLE_Y_PX, TITLE_ROW_HEIGHT_PX),
            "Altimeter",
            TextSize::Large,
        );
        let altitude_text =
            TextComponent::new(row(ALTITUDE_Y_PX, TITLE_ROW_HEIGHT_PX), "", TextSize::Large)
                .with_alignment(Alignment::Center);
        let pressure_text =
            TextComponent::new(row(PRESSURE_Y_PX, TEXT_ROW_HEIGHT_PX), "", TextSize::Medium)
                .with_alignment(Alignment::Center);
        let status_text =
            TextComponent::new(row(STATUS_Y_PX, TEXT_ROW_HEIGHT_PX), "", TextSize::Small);
        let switch_label = TextComponent::new(
            row(SWITCH_LABEL_Y_PX, TEXT_ROW_HEIGHT_PX),
            "Simulate pressure",
            TextSize::Medium,
        );
        let switch = Switch::new(
            Rectangle::new(
                Point::new(
                    bounds.top_left.x + SWITCH_X_PX,
                    bounds.top_left.y + SWITCH_Y_PX,
                ),
                Size::new(SWITCH_WIDTH_PX, SWITCH_HEIGHT_PX),
            ),
            state.is_simulating(),
        );
        let slider = Slider::new(
            row(SLIDER_Y_PX, SLIDER_HEIGHT_PX),
            min_hpa,
            max_hpa,
            state.simulated_hpa(),
        );
        let range_style = Style::new().with_padding(Padding::symmetric(0, RANGE_LABEL_INSET_PX));
        let min_label = TextComponent::new(
            row(RANGE_LABEL_Y_PX, TEXT_ROW_HEIGHT_PX),
            &min_text,
            TextSize::Small,
        )
        .with_style(range_style);
        let max_label = TextComponent::new(
            row(RANGE_LABEL_Y_PX, TEXT_ROW_HEIGHT_PX),
            &max_text,
            TextSize::Small,
        )
        .with_style(range_style)
        .with_alignment(Alignment::Right);

        let mut page = Self {
            bounds,
            state,
            paused: true,
            background: greyscale(0.0),
            title,
            altitude_text,
            pressure_text,
            status_text,
            switch_label,
            switch,
            slider,
            min_label,
            max_label,
            dirty: true,
        };
        page.refresh();
        page
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn background(&self) -> Rgb565 {
        self.background
    }

    /// Whether the slider is shown and accepts touches
    pub fn slider_visible(&self) -> bool {
        self.state.is_simulating()
    }

    pub fn altitude_text(&self) -> &str {
        self.altitude_text.text()
    }

    pub fn pressure_text(&self) -> &str {
        self.pressure_text.text()
    }

    pub fn status_text(&self) -> &str {
        self.status_text.text()
    }

    /// Re-derive every widget from the screen state.
    fn refresh(&mut self) {
        let fraction = self.state.background_fraction();
        let background = greyscale(fraction);
        if background != self.background {
            self.background = background;
            self.dirty = true;
        }

        let palette = ColorPalette::for_background(fraction);
        for text in self.texts_mut() {
            text.set_foreground(palette.text_primary);
        }
        self.status_text.set_foreground(palette.text_secondary);
        self.min_label.set_foreground(palette.text_secondary);
        self.max_label.set_foreground(palette.text_secondary);
        self.switch.set_palette(palette);
        self.slider.set_palette(palette);

        self.switch.set_on(self.state.is_simulating());
        self.slider.set_value(self.state.simulated_hpa());

        let mut line = Line::new();
        write!(line, "Altitude: {:.1} m", self.state.altitude_m()).ok();
        self.altitude_text.set_text(&line);

        line.clear();
        write!(line, "Pressure: {:.2} hPa", self.state.displayed_hpa()).ok();
        self.pressure_text.set_text(&line);

        line.clear();
        write!(line, "Source: {}", self.state.source().label()).ok();
        if self.paused {
            line.push_str("  PAUSED").ok();
        }
        self.status_text.set_text(&line);
    }

    fn texts_mut(&mut self) -> [&mut TextComponent; 4] {
        [
            &mut self.title,
            &mut self.altitude_text,
            &mut self.pressure_text,
            &mut self.switch_label,
        ]
    }

    fn children_dirty(&self) -> bool {
        self.title.is_dirty()
            || self.altitude_text.is_dirty()
            || self.pressure_text.is_dirty()
            || self.status_text.is_dirty()
            || self.switch_label.is_dirty()
            || self.switch.is_dirty()
            || self.slider.is_dirty()
            || self.min_label.is_dirty()
            || self.max_label.is_dirty()
    }
}

impl Page for AltimeterPage {
    fn id(&self) -> PageId {
        PageId::Altimeter
    }

    fn title(&self) -> &str {
        self.title.text()
    }

    fn on_activate(&mut self) {
        self.paused = false;
        self.refresh();
        self.dirty = true;
    }

    fn on_deactivate(&mut self) {
        self.paused = true;
        self.slider.cancel_drag();
        self.refresh();
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        if let TouchResult::Action(action) = self.switch.handle_touch(event) {
            return Some(action);
        }

        if !self.slider_visible() {
            return None;
        }

        match self.slider.handle_touch(event) {
            TouchResult::Action(action) => Some(action),
            TouchResult::Handled | TouchResult::NotHandled => None,
        }
    }

    fn apply_action(&mut self, action: Action) -> bool {
        let changed = match action {
            Action::SetSimulation(on) => {
                if !on {
                    self.slider.cancel_drag();
                }
                self.state.set_simulating(on)
            }
            Action::SetSimulatedPressure(hpa) => self.state.set_simulated_hpa(hpa),
        };
        if changed {
            debug!("Applied {:?}", action);
            self.refresh();
        }
        changed
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        match event {
            PageEvent::SensorUpdate(reading) => {
                let changed = self.state.record_measurement(reading.hpa);
                if changed {
                    self.refresh();
                }
                changed
            }
        }
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        Drawable::draw(self, display)
    }

    fn bounds(&self) -> Rectangle {
        Drawable::bounds(self)
    }

    fn is_dirty(&self) -> bool {
        Drawable::is_dirty(self)
    }

    fn mark_clean(&mut self) {
        Drawable::mark_clean(self)
    }

    fn mark_dirty(&mut self) {
        Drawable::mark_dirty(self)
    }
}

impl Drawable for AltimeterPage {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.background))
            .draw(display)?;

        self.title.draw(display)?;
        self.altitude_text.draw(display)?;
        self.pressure_text.draw(display)?;
        self.status_text.draw(display)?;
        self.switch_label.draw(display)?;
        self.switch.draw(display)?;

        if self.slider_visible() {
            self.slider.draw(display)?;
            self.min_label.draw(display)?;
            self.max_label.draw(display)?;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.children_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        for text in self.texts_mut() {
            text.mark_clean();
        }
        self.status_text.mark_clean();
        self.min_label.mark_clean();
        self.max_label.mark_clean();
        self.switch.mark_clean();
        self.slider.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
