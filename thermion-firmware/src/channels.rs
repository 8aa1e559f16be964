//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

/// Channel capacity for link events
const LINK_CHANNEL_SIZE: usize = 4;

/// Channel capacity for fetch results
const FETCH_CHANNEL_SIZE: usize = 2;

/// Channel capacity for override requests
const OVERRIDE_CHANNEL_SIZE: usize = 2;

/// Network link state changes (from the Wi-Fi task)
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum LinkEvent {
    Up,
    Down,
}

/// Link state changes from the Wi-Fi task to the display controller
pub static LINK_EVENTS: Channel<CriticalSectionRawMutex, LinkEvent, LINK_CHANNEL_SIZE> =
    Channel::new();

/// Signal that the controller wants a source fetch started now
pub static FETCH_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Fetch outcomes from the network task
/// Value is the parsed temperature in whole °C, or None on any failure
pub static FETCH_RESULTS: Channel<CriticalSectionRawMutex, Option<i16>, FETCH_CHANNEL_SIZE> =
    Channel::new();

/// Manual override readings accepted by the HTTP endpoint
pub static OVERRIDES: Channel<CriticalSectionRawMutex, i16, OVERRIDE_CHANNEL_SIZE> =
    Channel::new();
