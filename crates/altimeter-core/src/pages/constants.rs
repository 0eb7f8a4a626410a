//! Layout constants for the altimeter page (320x240, landscape)

/// Left/right margin for page content in pixels
pub const PAGE_MARGIN_PX: i32 = 12;

/// Title row top edge in pixels
pub const TITLE_Y_PX: i32 = 8;

/// Title row height in pixels (large font)
pub const TITLE_ROW_HEIGHT_PX: u32 = 24;

/// Altitude readout top edge in pixels
pub const ALTITUDE_Y_PX: i32 = 48;

/// Pressure readout top edge in pixels
pub const PRESSURE_Y_PX: i32 = 82;

/// Source/status line top edge in pixels
pub const STATUS_Y_PX: i32 = 104;

/// Standard text row height for small/medium font in pixels
pub const TEXT_ROW_HEIGHT_PX: u32 = 16;

/// Simulation switch track
pub const SWITCH_X_PX: i32 = 252;
pub const SWITCH_Y_PX: i32 = 132;
pub const SWITCH_WIDTH_PX: u32 = 56;
pub const SWITCH_HEIGHT_PX: u32 = 28;

/// Switch label top edge, vertically centred on the switch
pub const SWITCH_LABEL_Y_PX: i32 = 141;

/// Pressure slider touch area
pub const SLIDER_Y_PX: i32 = 176;
pub const SLIDER_HEIGHT_PX: u32 = 28;

/// Slider range labels top edge in pixels
pub const RANGE_LABEL_Y_PX: i32 = 210;

/// Horizontal inset of the range labels, lining them up with the slider
/// track ends
pub const RANGE_LABEL_INSET_PX: u32 = 9;
