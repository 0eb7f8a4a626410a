//! UI components library

pub mod slider;
pub mod switch;
pub mod text;

pub use slider::Slider;
pub use switch::Switch;
pub use text::{TextComponent, TextSize};
