//! Two-position toggle switch

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle};

use crate::ui::core::{Action, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};
use crate::ui::styling::ColorPalette;

/// Gap between the knob and the track edge
const KNOB_INSET: u32 = 3;

/// Pill-shaped on/off switch.
///
/// A press inside the switch requests the opposite position through
/// [`Action::SetSimulation`]; the switch itself only changes when the owner
/// calls [`Switch::set_on`] after applying the action.
pub struct Switch {
    bounds: Rectangle,
    on: bool,
    palette: ColorPalette,
    dirty: bool,
}

impl Switch {
    pub fn new(bounds: Rectangle, on: bool) -> Self {
        Self {
            bounds,
            on,
            palette: ColorPalette::default(),
            dirty: true,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn set_on(&mut self, on: bool) {
        if self.on != on {
            self.on = on;
            self.dirty = true;
        }
    }

    pub fn set_palette(&mut self, palette: ColorPalette) {
        if self.palette != palette {
            self.palette = palette;
            self.dirty = true;
        }
    }

    fn knob(&self) -> Circle {
        let diameter = self.bounds.size.height.saturating_sub(2 * KNOB_INSET);
        let y = self.bounds.top_left.y + KNOB_INSET as i32;
        let x = if self.on {
            self.bounds.top_left.x + self.bounds.size.width as i32
                - KNOB_INSET as i32
                - diameter as i32
        } else {
            self.bounds.top_left.x + KNOB_INSET as i32
        };
        Circle::new(Point::new(x, y), diameter)
    }
}

impl Drawable for Switch {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let track_color = if self.on {
            self.palette.primary
        } else {
            self.palette.surface
        };
        let radius = self.bounds.size.height / 2;
        let track_style = PrimitiveStyleBuilder::new()
            .fill_color(track_color)
            .stroke_color(self.palette.border)
            .stroke_width(1)
            .build();

        RoundedRectangle::with_equal_corners(self.bounds, Size::new(radius, radius))
            .into_styled(track_style)
            .draw(display)?;

        let knob_style = PrimitiveStyleBuilder::new()
            .fill_color(self.palette.knob)
            .stroke_color(self.palette.border)
            .stroke_width(1)
            .build();
        self.knob().into_styled(knob_style).draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl Touchable for Switch {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press(point) if self.contains_point(point) => {
                TouchResult::Action(Action::SetSimulation(!self.on))
            }
            _ => TouchResult::NotHandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    fn switch() -> Switch {
        Switch::new(Rectangle::new(Point::new(4, 4), Size::new(40, 20)), false)
    }

    #[test]
    fn test_press_requests_opposite_position() {
        let mut switch = switch();
        let inside = TouchPoint::new(10, 10);
        assert_eq!(
            switch.handle_touch(TouchEvent::Press(inside)),
            TouchResult::Action(Action::SetSimulation(true))
        );
        // Not applied until the owner confirms
        assert!(!switch.is_on());

        switch.set_on(true);
        assert_eq!(
            switch.handle_touch(TouchEvent::Press(inside)),
            TouchResult::Action(Action::SetSimulation(false))
        );
    }

    #[test]
    fn test_ignores_touches_outside_and_non_press() {
        let mut switch = switch();
        assert_eq!(
            switch.handle_touch(TouchEvent::Press(TouchPoint::new(60, 10))),
            TouchResult::NotHandled
        );
        assert_eq!(
            switch.handle_touch(TouchEvent::Drag(TouchPoint::new(10, 10))),
            TouchResult::NotHandled
        );
        assert_eq!(
            switch.handle_touch(TouchEvent::Release(TouchPoint::new(10, 10))),
            TouchResult::NotHandled
        );
    }

    #[test]
    fn test_knob_moves_with_state() {
        let mut switch = switch();
        let off_x = switch.knob().top_left.x;
        switch.mark_clean();
        switch.set_on(true);
        assert!(switch.is_dirty());
        assert!(switch.knob().top_left.x > off_x);
        assert!(switch.bounds().contains(switch.knob().center()));
    }

    #[test]
    fn test_draws_accent_when_on() {
        let mut switch = switch();
        switch.set_on(true);
        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);
        switch.draw(&mut display).unwrap();
        // Track interior, left of the knob
        assert_eq!(display.get_pixel(Point::new(14, 14)), Some(ColorPalette::default().primary));
    }
}
