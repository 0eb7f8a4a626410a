//! Text component for displaying text with styling

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_6X10, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text as EgText, TextStyleBuilder};

use crate::ui::core::Drawable;
use crate::ui::styling::Style;

/// Text size variants
///
/// - `Small`: 5x8 font
/// - `Medium`: 6x10 font (default)
/// - `Large`: 10x20 font
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &FONT_5X8,
            TextSize::Medium => &FONT_6X10,
            TextSize::Large => &FONT_10X20,
        }
    }
}

/// Single line of styled text, up to 64 characters.
///
/// The text is laid out from the top of its bounds, so a component's
/// bounds fully cover what it draws.
///
/// ```ignore
/// let text = TextComponent::new(
///     Rectangle::new(Point::new(12, 60), Size::new(296, 24)),
///     "988.6 m",
///     TextSize::Large,
/// )
/// .with_alignment(Alignment::Center);
/// ```
pub struct TextComponent {
    bounds: Rectangle,
    text: heapless::String<64>,
    size: TextSize,
    alignment: Alignment,
    style: Style,
    dirty: bool,
}

impl TextComponent {
    pub fn new(bounds: Rectangle, text: &str, size: TextSize) -> Self {
        let mut text_string = heapless::String::new();
        text_string.push_str(text).ok();

        Self {
            bounds,
            text: text_string,
            size,
            alignment: Alignment::Left,
            style: Style::default(),
            dirty: true,
        }
    }

    /// Set the text alignment (Left, Center, or Right).
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Update the displayed text. Marks the component dirty if it changed.
    /// Text longer than the buffer is truncated.
    pub fn set_text(&mut self, text: &str) {
        if self.text.as_str() == text {
            return;
        }
        self.text.clear();
        for c in text.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
        self.dirty = true;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn foreground(&self) -> Rgb565 {
        self.style.foreground_color
    }

    pub fn set_foreground(&mut self, color: Rgb565) {
        if self.style.foreground_color != color {
            self.style.foreground_color = color;
            self.dirty = true;
        }
    }

    fn text_position(&self) -> Point {
        let top = self.bounds.top_left.y + self.style.padding.top as i32;
        match self.alignment {
            Alignment::Left => Point::new(
                self.bounds.top_left.x + self.style.padding.left as i32,
                top,
            ),
            Alignment::Center => Point::new(self.bounds.center().x, top),
            Alignment::Right => Point::new(
                self.bounds.top_left.x + self.bounds.size.width as i32
                    - self.style.padding.right as i32
                    - 1,
                top,
            ),
        }
    }
}

impl Drawable for TextComponent {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let character_style = MonoTextStyle::new(self.size.font(), self.foreground());
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(Baseline::Top)
            .build();

        EgText::with_text_style(&self.text, self.text_position(), character_style, text_style)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::styling::{BLACK, Padding, WHITE};

    fn text() -> TextComponent {
        TextComponent::new(
            Rectangle::new(Point::new(0, 0), Size::new(100, 12)),
            "1013.25 hPa",
            TextSize::Medium,
        )
    }

    #[test]
    fn test_set_text_marks_dirty_only_on_change() {
        let mut component = text();
        component.mark_clean();
        component.set_text("1013.25 hPa");
        assert!(!component.is_dirty());
        component.set_text("900.00 hPa");
        assert!(component.is_dirty());
        assert_eq!(component.text(), "900.00 hPa");
    }

    #[test]
    fn test_set_foreground_marks_dirty() {
        let mut component = text();
        component.mark_clean();
        component.set_foreground(BLACK);
        assert!(!component.is_dirty());
        component.set_foreground(WHITE);
        assert!(component.is_dirty());
        assert_eq!(component.foreground(), WHITE);
    }

    #[test]
    fn test_padding_offsets_text_position() {
        let bounds = Rectangle::new(Point::new(10, 20), Size::new(100, 12));
        let style = Style::new().with_padding(Padding::symmetric(2, 9));

        let left = TextComponent::new(bounds, "800 hPa", TextSize::Small).with_style(style);
        assert_eq!(left.text_position(), Point::new(19, 22));

        let right = TextComponent::new(bounds, "1100 hPa", TextSize::Small)
            .with_style(style)
            .with_alignment(Alignment::Right);
        assert_eq!(right.text_position(), Point::new(100, 22));
    }

    #[test]
    fn test_long_text_is_truncated() {
        let mut component = text();
        let long = [b'x'; 80];
        component.set_text(core::str::from_utf8(&long).unwrap());
        assert_eq!(component.text().len(), 64);
    }
}
