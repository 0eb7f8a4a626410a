//! Styling system for UI elements
//!
//! - [`colors`] - Color constants, palettes and the altitude greyscale
//! - [`layout`] - Padding
//! - [`style`] - Style configuration for individual elements

pub mod colors;
pub mod layout;
pub mod style;

pub use colors::{
    ACCENT, BLACK, ColorPalette, DARK_GRAY, GRAY, LIGHT_GRAY, WHITE, contrast_foreground,
    greyscale,
};
pub use layout::Padding;
pub use style::Style;
