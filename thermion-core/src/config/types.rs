//! Configuration type definitions
//!
//! These types parameterize the serial link timing and the display
//! session policy. Defaults match the deployed panel.

use crate::display::StatusToken;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Serial link bit timing
///
/// All delays are in microseconds. The link is slow on purpose: the
/// receiving register sits a few meters away on an unshielded cable and
/// the lines are only pulled high passively, so edges need time to
/// settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkTiming {
    /// Half a clock period (µs); 5 gives roughly 100 kHz
    pub half_period_us: u32,
    /// Data line settle time before the clock edge (µs)
    pub data_setup_us: u32,
    /// Settle time after asserting latch low before clocking (µs)
    pub latch_settle_us: u32,
    /// Latch released (high) phase of the commit pulse (µs)
    pub latch_release_us: u32,
    /// Latch driven (low) phase of the commit pulse (µs)
    pub latch_drive_us: u32,
    /// True when a logical 1 is a released (high) data line
    pub bit_active_high: bool,
}

impl Default for LinkTiming {
    fn default() -> Self {
        Self {
            half_period_us: 5,
            data_setup_us: 1,
            latch_settle_us: 4,
            latch_release_us: 2,
            latch_drive_us: 8,
            bit_active_high: true,
        }
    }
}

/// Display session policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionConfig {
    /// Ticks between scheduled source fetches
    pub poll_interval_ticks: u32,
    /// Consecutive fetch failures before entering the error state
    pub failure_threshold: u8,
    /// Ticks the last good reading is held after entering the error
    /// state, before the error animation takes over
    pub error_grace_ticks: u32,
    /// Ticks each disconnect glyph is shown before alternating
    pub disconnect_cadence_ticks: u32,
    /// The two glyphs alternated while the link is down
    pub disconnect_tokens: [StatusToken; 2],
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            // 600 ticks at a 500 ms tick is a five-minute poll cycle
            poll_interval_ticks: 600,
            failure_threshold: 3,
            error_grace_ticks: 2,
            disconnect_cadence_ticks: 2,
            disconnect_tokens: [StatusToken::Error, StatusToken::Blank],
        }
    }
}
