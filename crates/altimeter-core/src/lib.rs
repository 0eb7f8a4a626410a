//! Hardware-independent core library for baro-altimeter
//!
//! This crate contains all platform-agnostic logic for the barometric
//! altimeter screen: the pressure-to-altitude formula, the screen state, the
//! sensor bridge that feeds readings into it, UI rendering, and the top-level
//! screen controller.
//!
//! It is `#![no_std]` so it compiles on both embedded targets (ESP32-S3) and
//! desktop hosts (for the simulator and tests).

#![no_std]

pub mod altitude;
pub mod app_state;
pub mod async_i2c_bus;
pub mod config;
pub mod display_manager;
pub mod pages;
pub mod sensor_bridge;
pub mod sensors;
pub mod ui;
