//! Serial link drivers
//!
//! This crate drives the 3-wire open-drain link to the remote display
//! panel:
//!
//! - Open-drain line discipline over tri-state pins
//! - Frame transmitter (bit-banged clock/data/latch protocol)

#![no_std]
#![deny(unsafe_code)]

pub mod line;
pub mod shift;

pub use line::OpenDrainLine;
pub use shift::FrameTransmitter;
