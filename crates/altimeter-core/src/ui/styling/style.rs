//! Style configuration for UI elements

use embedded_graphics::pixelcolor::Rgb565;

use super::colors::BLACK;
use super::layout::Padding;

/// Visual style configuration for a UI element
///
/// ```ignore
/// let label_style = Style::new().with_padding(Padding::symmetric(0, 9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Foreground/text color
    pub foreground_color: Rgb565,

    /// Internal padding around content
    pub padding: Padding,
}

impl Default for Style {
    /// Black text: the screen starts at sea level on a white background.
    fn default() -> Self {
        Self {
            foreground_color: BLACK,
            padding: Padding::default(),
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }
}
