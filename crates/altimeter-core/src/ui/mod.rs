//! Altimeter UI system
//!
//! - Core traits for drawable and touchable elements
//! - Touch sampling that turns raw controller polls into press/drag/release
//! - Styled components (text, switch, slider)
//! - Greyscale styling helpers for the altitude background

pub mod components;
pub mod core;
pub mod input;
pub mod styling;

/// Display width in pixels (ILI9342C, landscape)
pub const DISPLAY_WIDTH_PX: u16 = 320;

/// Display height in pixels
pub const DISPLAY_HEIGHT_PX: u16 = 240;

pub use components::{Slider, Switch, TextComponent, TextSize};
pub use self::core::{
    Action, Drawable, PageEvent, PageId, TouchEvent, TouchPoint, TouchResult, Touchable,
};
pub use input::TouchTracker;
pub use styling::{ColorPalette, Padding, Style};
