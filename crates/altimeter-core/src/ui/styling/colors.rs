//! Color definitions and palette management
//!
//! All colors are RGB565:
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

// ============================================================================
// Base Colors
// ============================================================================

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);

/// Light gray - for secondary text on dark backgrounds
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

/// Medium gray - for switch tracks in the off position
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Dark gray - for secondary text on light backgrounds
pub const DARK_GRAY: Rgb565 = Rgb565::new(10, 20, 10);

/// Accent for active controls - bright teal-green
pub const ACCENT: Rgb565 = Rgb565::new(95 >> 3, 185 >> 2, 141 >> 3);

/// Background fraction above which text switches to white
pub const CONTRAST_THRESHOLD: f32 = 0.5;

// ============================================================================
// Altitude Greyscale
// ============================================================================

/// Linear grey ramp: 0 is white, 1 is black. Out-of-range input is clamped.
pub fn greyscale(fraction: f32) -> Rgb565 {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let level = 1.0 - fraction;
    let r = libm::roundf(level * 31.0) as u8;
    let g = libm::roundf(level * 63.0) as u8;
    Rgb565::new(r, g, r)
}

/// Text color that stays legible on `greyscale(fraction)`
pub fn contrast_foreground(fraction: f32) -> Rgb565 {
    if fraction > CONTRAST_THRESHOLD {
        WHITE
    } else {
        BLACK
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Colors for text and controls drawn over the altitude background.
///
/// The background itself is not part of the palette: it follows the
/// altitude, and [`ColorPalette::for_background`] picks the text colors
/// to match it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPalette {
    /// Accent for active controls (switch on, slider fill)
    pub primary: Rgb565,

    /// Inactive control surfaces (switch off, slider track)
    pub surface: Rgb565,

    /// Knobs and thumbs
    pub knob: Rgb565,

    /// Primary text color - high contrast
    pub text_primary: Rgb565,

    /// Secondary text color - lower contrast for labels
    pub text_secondary: Rgb565,

    /// Outline color for controls
    pub border: Rgb565,
}

impl Default for ColorPalette {
    /// Returns the light palette, matching the sea-level background
    fn default() -> Self {
        Self::light()
    }
}

impl ColorPalette {
    /// Dark text for light backgrounds
    pub fn light() -> Self {
        Self {
            primary: ACCENT,
            surface: GRAY,
            knob: WHITE,
            text_primary: BLACK,
            text_secondary: DARK_GRAY,
            border: DARK_GRAY,
        }
    }

    /// Light text for dark backgrounds
    pub fn dark() -> Self {
        Self {
            primary: ACCENT,
            surface: GRAY,
            knob: WHITE,
            text_primary: WHITE,
            text_secondary: LIGHT_GRAY,
            border: LIGHT_GRAY,
        }
    }

    /// Palette that reads well on `greyscale(fraction)`
    pub fn for_background(fraction: f32) -> Self {
        if contrast_foreground(fraction) == WHITE {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;

    #[test]
    fn test_greyscale_endpoints() {
        assert_eq!(greyscale(0.0), WHITE);
        assert_eq!(greyscale(1.0), BLACK);
        assert_eq!(greyscale(-3.0), WHITE);
        assert_eq!(greyscale(7.0), BLACK);
        assert_eq!(greyscale(f32::NAN), WHITE);
    }

    #[test]
    fn test_greyscale_darkens_monotonically() {
        let mut previous = greyscale(0.0);
        for step in 1..=20 {
            let color = greyscale(step as f32 / 20.0);
            assert!(color.g() <= previous.g());
            assert!(color.r() <= previous.r());
            assert_eq!(color.r(), color.b());
            previous = color;
        }
    }

    #[test]
    fn test_contrast_foreground_flips_past_mid_grey() {
        assert_eq!(contrast_foreground(0.0), BLACK);
        assert_eq!(contrast_foreground(0.5), BLACK);
        assert_eq!(contrast_foreground(0.51), WHITE);
        assert_eq!(ColorPalette::for_background(0.9).text_primary, WHITE);
        assert_eq!(ColorPalette::for_background(0.1).text_primary, BLACK);
    }
}
