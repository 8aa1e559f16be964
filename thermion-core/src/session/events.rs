//! Events that trigger session state transitions

/// Events that can trigger session state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    // Link events
    /// Network link established (or re-established)
    LinkUp,
    /// Network link lost
    LinkDown,

    // Fetch outcome events
    /// A plausible reading was accepted (from the source or an override)
    ReadingAccepted,
    /// The consecutive fetch-failure count reached the threshold
    FailuresExceeded,
}

impl SessionEvent {
    /// Check if this event comes from the link layer
    pub fn is_link_event(&self) -> bool {
        matches!(self, SessionEvent::LinkUp | SessionEvent::LinkDown)
    }
}
