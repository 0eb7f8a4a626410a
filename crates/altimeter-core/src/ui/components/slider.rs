//! Horizontal value slider

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle,
};

use crate::ui::core::{Action, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};
use crate::ui::styling::ColorPalette;

const TRACK_HEIGHT: u32 = 6;
const THUMB_DIAMETER: u32 = 18;

/// Continuous slider over `[min, max]`.
///
/// Touch handling follows the finger: a press inside the slider starts a
/// drag, every drag position (even outside the bounds) maps to a value via
/// [`Slider::value_at`], and a release ends the drag. Each position is
/// reported as [`Action::SetSimulatedPressure`]; the owner feeds the applied
/// value back with [`Slider::set_value`].
pub struct Slider {
    bounds: Rectangle,
    min: f32,
    max: f32,
    value: f32,
    dragging: bool,
    palette: ColorPalette,
    dirty: bool,
}

impl Slider {
    pub fn new(bounds: Rectangle, min: f32, max: f32, value: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            bounds,
            min,
            max,
            value: value.clamp(min, max),
            dragging: false,
            palette: ColorPalette::default(),
            dirty: true,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_value(&mut self, value: f32) {
        let value = value.clamp(self.min, self.max);
        if value != self.value {
            self.value = value;
            self.dirty = true;
        }
    }

    /// Abandon a drag in progress, e.g. when the slider is hidden
    pub fn cancel_drag(&mut self) {
        self.dragging = false;
    }

    pub fn set_palette(&mut self, palette: ColorPalette) {
        if self.palette != palette {
            self.palette = palette;
            self.dirty = true;
        }
    }

    /// Horizontal travel of the thumb centre: `(left, width)`
    fn travel(&self) -> (i32, i32) {
        let inset = (THUMB_DIAMETER / 2) as i32;
        let left = self.bounds.top_left.x + inset;
        let width = (self.bounds.size.width as i32 - 2 * inset - 1).max(1);
        (left, width)
    }

    /// Value under the horizontal position `x`, clamped to the range
    pub fn value_at(&self, x: i32) -> f32 {
        let (left, width) = self.travel();
        let fraction = ((x - left) as f32 / width as f32).clamp(0.0, 1.0);
        self.min + fraction * (self.max - self.min)
    }

    fn thumb_x(&self) -> i32 {
        let (left, width) = self.travel();
        let span = self.max - self.min;
        let fraction = if span > 0.0 {
            (self.value - self.min) / span
        } else {
            0.0
        };
        left + libm::roundf(fraction * width as f32) as i32
    }

    fn track(&self) -> Rectangle {
        let (left, width) = self.travel();
        let y = self.bounds.center().y - (TRACK_HEIGHT / 2) as i32;
        Rectangle::new(Point::new(left, y), Size::new(width as u32 + 1, TRACK_HEIGHT))
    }
}

impl Drawable for Slider {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let track = self.track();
        let corner = Size::new(TRACK_HEIGHT / 2, TRACK_HEIGHT / 2);
        let thumb_x = self.thumb_x();

        RoundedRectangle::with_equal_corners(track, corner)
            .into_styled(PrimitiveStyle::with_fill(self.palette.surface))
            .draw(display)?;

        let filled_width = (thumb_x - track.top_left.x).max(0) as u32;
        if filled_width > 0 {
            let filled = Rectangle::new(track.top_left, Size::new(filled_width, TRACK_HEIGHT));
            RoundedRectangle::with_equal_corners(filled, corner)
                .into_styled(PrimitiveStyle::with_fill(self.palette.primary))
                .draw(display)?;
        }

        let thumb_style = PrimitiveStyleBuilder::new()
            .fill_color(self.palette.knob)
            .stroke_color(self.palette.border)
            .stroke_width(1)
            .build();
        Circle::with_center(Point::new(thumb_x, self.bounds.center().y), THUMB_DIAMETER)
            .into_styled(thumb_style)
            .draw(display)?;

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

impl Touchable for Slider {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press(point) if self.contains_point(point) => {
                self.dragging = true;
                TouchResult::Action(Action::SetSimulatedPressure(self.value_at(point.x as i32)))
            }
            TouchEvent::Drag(point) if self.dragging => {
                TouchResult::Action(Action::SetSimulatedPressure(self.value_at(point.x as i32)))
            }
            TouchEvent::Release(_) if self.dragging => {
                self.dragging = false;
                TouchResult::Handled
            }
            _ => TouchResult::NotHandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    /// Travel runs from x=9 to x=9+100
    fn slider() -> Slider {
        Slider::new(
            Rectangle::new(Point::new(0, 0), Size::new(119, 24)),
            800.0,
            1100.0,
            1013.25,
        )
    }

    fn pressure(result: TouchResult) -> f32 {
        match result {
            TouchResult::Action(Action::SetSimulatedPressure(hpa)) => hpa,
            other => panic!("expected pressure action, got {other:?}"),
        }
    }

    #[test]
    fn test_value_at_maps_and_clamps() {
        let slider = slider();
        assert_eq!(slider.value_at(9), 800.0);
        assert_eq!(slider.value_at(109), 1100.0);
        assert_eq!(slider.value_at(59), 950.0);
        assert_eq!(slider.value_at(-50), 800.0);
        assert_eq!(slider.value_at(500), 1100.0);
    }

    #[test]
    fn test_set_value_clamps() {
        let mut slider = slider();
        slider.set_value(500.0);
        assert_eq!(slider.value(), 800.0);
        slider.set_value(2000.0);
        assert_eq!(slider.value(), 1100.0);
    }

    #[test]
    fn test_drag_sequence() {
        let mut slider = slider();
        assert_eq!(pressure(slider.handle_touch(TouchEvent::Press(TouchPoint::new(59, 12)))), 950.0);
        assert!(slider.is_dragging());

        // Dragging past the end keeps reporting, clamped
        assert_eq!(pressure(slider.handle_touch(TouchEvent::Drag(TouchPoint::new(300, 80)))), 1100.0);

        assert_eq!(
            slider.handle_touch(TouchEvent::Release(TouchPoint::new(300, 80))),
            TouchResult::Handled
        );
        assert!(!slider.is_dragging());
        assert_eq!(
            slider.handle_touch(TouchEvent::Drag(TouchPoint::new(59, 12))),
            TouchResult::NotHandled
        );
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut slider = slider();
        assert_eq!(
            slider.handle_touch(TouchEvent::Press(TouchPoint::new(59, 40))),
            TouchResult::NotHandled
        );
        assert!(!slider.is_dragging());
    }

    #[test]
    fn test_draws_within_bounds() {
        let slider = Slider::new(
            Rectangle::new(Point::new(0, 0), Size::new(64, 24)),
            800.0,
            1100.0,
            800.0,
        );
        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);
        slider.draw(&mut display).unwrap();
        assert_eq!(
            display.affected_area(),
            display.affected_area().intersection(&slider.bounds())
        );
    }
}
