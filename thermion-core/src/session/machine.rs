//! Session state machine definition
//!
//! What the panel shows is a function of the current state and an event.

use super::events::SessionEvent;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Link is up but no reading has been accepted yet; the panel runs
    /// the startup animation
    Booting,
    /// Showing the latest accepted reading
    ConnectedValid,
    /// Too many consecutive fetch failures; the last reading is held
    /// briefly, then the error animation runs
    ConnectedError,
    /// Network link is down; the panel alternates two fallback glyphs
    Disconnected,
}

impl SessionState {
    /// Check if the link is up in this state
    pub fn is_connected(&self) -> bool {
        !matches!(self, SessionState::Disconnected)
    }

    /// Check if a reading is currently on the panel
    pub fn is_showing_reading(&self) -> bool {
        matches!(self, SessionState::ConnectedValid)
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: SessionEvent) -> Self {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            // Link loss dominates everything
            (_, LinkDown) => Disconnected,

            // Reconnect restarts the boot sequence
            (Disconnected, LinkUp) => Booting,

            // An accepted reading always ends boot or error display
            (Booting, ReadingAccepted) => ConnectedValid,
            (ConnectedError, ReadingAccepted) => ConnectedValid,

            // Sustained failure
            (Booting, FailuresExceeded) => ConnectedError,
            (ConnectedValid, FailuresExceeded) => ConnectedError,

            // Default: stay in current state
            _ => self,
        }
    }
}
