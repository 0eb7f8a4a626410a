//! ESP32-S3 firmware-specific modules for baro-altimeter
//!
//! Hardware code that cannot compile on desktop targets: ESP32 peripheral
//! bring-up for the power controller and IO expander, and the FT6336U touch
//! controller driver.

#![no_std]

pub mod hardware;
pub mod touch;
