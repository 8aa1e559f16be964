//! Thermion Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the display link
//! driver is built on. Chip-specific code (the ESP32 firmware crate, mock
//! pins in tests) implements them, which keeps the protocol logic
//! board-agnostic and host-testable.
//!
//! # Traits
//!
//! - [`gpio::TriStatePin`] - a pin that can drive low or float

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;

// Re-export key traits at crate root for convenience
pub use gpio::TriStatePin;
