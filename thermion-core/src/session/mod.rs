//! Display session control
//!
//! [`DisplaySession`] owns the session state machine plus the counters
//! around it: the poll schedule, the consecutive-failure count, the
//! animation index and the per-state tick counters. The firmware calls
//! [`DisplaySession::tick`] at a fixed cadence and transmits whatever
//! value comes back.

pub mod events;
pub mod machine;

pub use events::SessionEvent;
pub use machine::SessionState;

use crate::config::SessionConfig;
use crate::display::DisplayValue;

/// Lowest reading accepted from the source (°C)
///
/// Anything below is treated as a sensor or parse fault, not weather.
pub const PLAUSIBLE_MIN: i16 = -60;

/// Highest reading accepted from the source (°C)
pub const PLAUSIBLE_MAX: i16 = 99;

/// Errors from the override path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverrideError {
    /// Requested value cannot be shown on a two-digit panel
    OutOfRange,
}

/// What one tick decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionOutput {
    /// Value to encode and transmit this tick
    pub value: DisplayValue,
    /// True when a source fetch should be started now
    pub fetch_due: bool,
}

/// Session controller
///
/// All inputs arrive through explicit methods (link changes, fetch
/// results, overrides); [`Self::tick`] is the only place time advances.
#[derive(Debug)]
pub struct DisplaySession {
    config: SessionConfig,
    state: SessionState,
    last_reading: Option<i8>,
    consecutive_failures: u8,
    anim_index: u8,
    error_ticks: u32,
    disconnect_ticks: u32,
    ticks_since_poll: u32,
    force_fetch: bool,
}

impl DisplaySession {
    /// Create a session in the boot state with an immediate fetch due
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: SessionState::Booting,
            last_reading: None,
            consecutive_failures: 0,
            anim_index: 0,
            error_ticks: 0,
            disconnect_ticks: 0,
            ticks_since_poll: 0,
            force_fetch: true,
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Latest accepted reading, if any
    pub fn last_reading(&self) -> Option<i8> {
        self.last_reading
    }

    /// Network link came up
    pub fn link_up(&mut self) {
        self.apply(SessionEvent::LinkUp);
    }

    /// Network link went down
    pub fn link_down(&mut self) {
        self.apply(SessionEvent::LinkDown);
    }

    /// Record the outcome of a source fetch
    ///
    /// `None` means the fetch failed outright (connect, HTTP or parse
    /// error). A reading outside the plausible range counts as a failure
    /// too; an implausible value on the panel is worse than the error
    /// animation.
    pub fn record_fetch(&mut self, reading: Option<i16>) {
        // A result racing a link-down event is stale; drop it.
        if !self.state.is_connected() {
            return;
        }

        match reading {
            Some(v) if (PLAUSIBLE_MIN..=PLAUSIBLE_MAX).contains(&v) => {
                self.accept_reading(v as i8);
            }
            _ => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                if self.consecutive_failures >= self.config.failure_threshold {
                    self.apply(SessionEvent::FailuresExceeded);
                }
            }
        }
    }

    /// Apply a manual override reading
    ///
    /// Takes the same path as an accepted fetch: it clears the failure
    /// count and moves the session to the valid state.
    pub fn apply_override(&mut self, value: i16) -> Result<(), OverrideError> {
        let min = crate::display::READING_MIN as i16;
        let max = crate::display::READING_MAX as i16;
        if !(min..=max).contains(&value) {
            return Err(OverrideError::OutOfRange);
        }
        self.accept_reading(value as i8);
        Ok(())
    }

    /// Advance one tick and decide what to show
    pub fn tick(&mut self) -> SessionOutput {
        let fetch_due = if self.state.is_connected() {
            if self.force_fetch || self.ticks_since_poll >= self.config.poll_interval_ticks {
                self.force_fetch = false;
                self.ticks_since_poll = 0;
                true
            } else {
                self.ticks_since_poll += 1;
                false
            }
        } else {
            false
        };

        let value = match self.state {
            SessionState::Booting => self.advance_animation(),
            SessionState::ConnectedValid => match self.last_reading {
                Some(v) => DisplayValue::Reading(v),
                // Unreachable by construction; blank is the safe output.
                None => DisplayValue::Token(crate::display::StatusToken::Blank),
            },
            SessionState::ConnectedError => {
                let held = self.error_ticks < self.config.error_grace_ticks;
                self.error_ticks = self.error_ticks.saturating_add(1);
                match self.last_reading {
                    Some(v) if held => DisplayValue::Reading(v),
                    _ => self.advance_animation(),
                }
            }
            SessionState::Disconnected => {
                let cadence = self.config.disconnect_cadence_ticks.max(1);
                let index = ((self.disconnect_ticks / cadence) % 2) as usize;
                self.disconnect_ticks = self.disconnect_ticks.wrapping_add(1);
                DisplayValue::Token(self.config.disconnect_tokens[index])
            }
        };

        SessionOutput { value, fetch_due }
    }

    fn accept_reading(&mut self, value: i8) {
        self.last_reading = Some(value);
        self.consecutive_failures = 0;
        self.apply(SessionEvent::ReadingAccepted);
    }

    fn advance_animation(&mut self) -> DisplayValue {
        let value = DisplayValue::Animation(self.anim_index);
        // Wrap at the block length; a plain u8 wrap at 256 would skip
        // frames since 256 is not a multiple of the block length.
        self.anim_index = (self.anim_index + 1) % crate::display::ANIM_LEN as u8;
        value
    }

    fn apply(&mut self, event: SessionEvent) {
        let next = self.state.transition(event);
        if next == self.state {
            return;
        }

        match next {
            SessionState::Booting => {
                // Reconnect: restart the animation and fetch right away.
                self.anim_index = 0;
                self.consecutive_failures = 0;
                self.ticks_since_poll = 0;
                self.force_fetch = true;
            }
            SessionState::ConnectedError => {
                self.error_ticks = 0;
            }
            SessionState::Disconnected => {
                self.disconnect_ticks = 0;
            }
            SessionState::ConnectedValid => {}
        }

        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::StatusToken;

    fn test_config() -> SessionConfig {
        SessionConfig {
            poll_interval_ticks: 10,
            failure_threshold: 3,
            error_grace_ticks: 2,
            disconnect_cadence_ticks: 2,
            disconnect_tokens: [StatusToken::Error, StatusToken::Blank],
        }
    }

    #[test]
    fn test_first_tick_requests_fetch_and_animates() {
        let mut session = DisplaySession::new(test_config());
        let out = session.tick();
        assert!(out.fetch_due);
        assert_eq!(out.value, DisplayValue::Animation(0));

        // Animation keeps advancing while waiting for the first reading.
        assert_eq!(session.tick().value, DisplayValue::Animation(1));
    }

    #[test]
    fn test_boot_animation_keeps_phase_over_long_runs() {
        use crate::display::ANIM_LEN;

        // The index must cycle with the exact block period even past the
        // u8 range, so tick n always shows frame n mod ANIM_LEN.
        let mut session = DisplaySession::new(test_config());
        for n in 0u32..600 {
            let out = session.tick();
            assert_eq!(out.value, DisplayValue::Animation((n % ANIM_LEN as u32) as u8));
        }
    }

    #[test]
    fn test_accepted_reading_shows_on_panel() {
        let mut session = DisplaySession::new(test_config());
        session.tick();
        session.record_fetch(Some(24));

        assert_eq!(session.state(), SessionState::ConnectedValid);
        assert_eq!(session.tick().value, DisplayValue::Reading(24));
    }

    #[test]
    fn test_poll_interval_schedules_fetches() {
        let mut session = DisplaySession::new(test_config());
        assert!(session.tick().fetch_due);
        session.record_fetch(Some(5));

        for _ in 0..10 {
            assert!(!session.tick().fetch_due);
        }
        assert!(session.tick().fetch_due);
    }

    #[test]
    fn test_failures_below_threshold_keep_last_reading() {
        let mut session = DisplaySession::new(test_config());
        session.tick();
        session.record_fetch(Some(7));

        session.record_fetch(None);
        session.record_fetch(None);

        assert_eq!(session.state(), SessionState::ConnectedValid);
        assert_eq!(session.tick().value, DisplayValue::Reading(7));
    }

    #[test]
    fn test_threshold_failures_enter_error_state() {
        let mut session = DisplaySession::new(test_config());
        session.tick();
        session.record_fetch(Some(7));

        for _ in 0..3 {
            session.record_fetch(None);
        }
        assert_eq!(session.state(), SessionState::ConnectedError);
    }

    #[test]
    fn test_valid_fetch_resets_failure_count() {
        let mut session = DisplaySession::new(test_config());
        session.tick();
        session.record_fetch(None);
        session.record_fetch(None);
        session.record_fetch(Some(12));

        // The count restarts; two more failures must not trip the
        // threshold.
        session.record_fetch(None);
        session.record_fetch(None);
        assert_eq!(session.state(), SessionState::ConnectedValid);
    }

    #[test]
    fn test_implausible_reading_counts_as_failure() {
        let mut session = DisplaySession::new(test_config());
        session.tick();
        session.record_fetch(Some(10));

        session.record_fetch(Some(-61));
        session.record_fetch(Some(100));
        session.record_fetch(Some(850)); // classic sensor fault value
        assert_eq!(session.state(), SessionState::ConnectedError);
        assert_eq!(session.last_reading(), Some(10));
    }

    #[test]
    fn test_error_state_holds_reading_through_grace_period() {
        let mut session = DisplaySession::new(test_config());
        session.tick();
        session.record_fetch(Some(18));
        for _ in 0..3 {
            session.record_fetch(None);
        }

        // Two grace ticks of the held reading, then the animation.
        assert_eq!(session.tick().value, DisplayValue::Reading(18));
        assert_eq!(session.tick().value, DisplayValue::Reading(18));
        assert!(matches!(session.tick().value, DisplayValue::Animation(_)));
    }

    #[test]
    fn test_error_state_without_reading_animates_immediately() {
        let mut session = DisplaySession::new(test_config());
        session.tick();
        for _ in 0..3 {
            session.record_fetch(None);
        }

        assert_eq!(session.state(), SessionState::ConnectedError);
        assert!(matches!(session.tick().value, DisplayValue::Animation(_)));
    }

    #[test]
    fn test_recovery_from_error_state() {
        let mut session = DisplaySession::new(test_config());
        session.tick();
        for _ in 0..3 {
            session.record_fetch(None);
        }
        session.record_fetch(Some(-4));

        assert_eq!(session.state(), SessionState::ConnectedValid);
        assert_eq!(session.tick().value, DisplayValue::Reading(-4));
    }

    #[test]
    fn test_disconnect_alternates_fallback_glyphs() {
        let mut session = DisplaySession::new(test_config());
        session.tick();
        session.record_fetch(Some(3));
        session.link_down();

        assert_eq!(session.state(), SessionState::Disconnected);
        let expected = [
            StatusToken::Error,
            StatusToken::Error,
            StatusToken::Blank,
            StatusToken::Blank,
            StatusToken::Error,
        ];
        for token in expected {
            let out = session.tick();
            assert_eq!(out.value, DisplayValue::Token(token));
            assert!(!out.fetch_due, "no fetches while disconnected");
        }
    }

    #[test]
    fn test_reconnect_forces_immediate_fetch() {
        let mut session = DisplaySession::new(test_config());
        session.tick();
        session.record_fetch(Some(3));
        session.link_down();
        session.tick();

        session.link_up();
        assert_eq!(session.state(), SessionState::Booting);

        let out = session.tick();
        assert!(out.fetch_due);
        assert_eq!(out.value, DisplayValue::Animation(0));
    }

    #[test]
    fn test_stale_fetch_result_after_link_down_is_dropped() {
        let mut session = DisplaySession::new(test_config());
        session.tick();
        session.link_down();

        session.record_fetch(Some(21));
        assert_eq!(session.state(), SessionState::Disconnected);
        assert_eq!(session.last_reading(), None);
    }

    #[test]
    fn test_override_accepted_and_shown() {
        let mut session = DisplaySession::new(test_config());
        session.tick();

        session.apply_override(-42).unwrap();
        assert_eq!(session.state(), SessionState::ConnectedValid);
        assert_eq!(session.tick().value, DisplayValue::Reading(-42));
    }

    #[test]
    fn test_override_out_of_range_rejected() {
        let mut session = DisplaySession::new(test_config());
        assert_eq!(session.apply_override(100), Err(OverrideError::OutOfRange));
        assert_eq!(session.apply_override(-100), Err(OverrideError::OutOfRange));
        assert_eq!(session.state(), SessionState::Booting);
    }

    #[test]
    fn test_override_clears_pending_failures() {
        let mut session = DisplaySession::new(test_config());
        session.tick();
        session.record_fetch(None);
        session.record_fetch(None);

        session.apply_override(0).unwrap();
        session.record_fetch(None);
        session.record_fetch(None);
        assert_eq!(session.state(), SessionState::ConnectedValid);
    }
}
