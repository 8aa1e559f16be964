//! Board-agnostic core logic for the Thermion outdoor display
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Display frame data model (segment frames, 16-bit display frames)
//! - Symbol table and value-to-segment encoder
//! - Display session state machine (boot / valid / error / disconnected)
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod display;
pub mod session;
