//! Open-drain line discipline
//!
//! The link wires have no push-pull driver on the bus: each end either
//! drives the wire low or releases it and lets the pull-up resistor
//! bring it high. [`OpenDrainLine`] wraps a [`TriStatePin`] and exposes
//! exactly those two operations, so a driver cannot accidentally drive
//! the wire high against the other end.

use thermion_hal::TriStatePin;

/// One open-drain wire of the link
pub struct OpenDrainLine<P> {
    pin: P,
}

impl<P: TriStatePin> OpenDrainLine<P> {
    /// Wrap a pin, releasing the wire so the bus idles high
    pub fn new(mut pin: P) -> Self {
        pin.set_floating();
        Self { pin }
    }

    /// Actively drive the wire low
    pub fn drive_low(&mut self) {
        self.pin.set_output_low();
    }

    /// Release the wire; the pull-up takes it high
    pub fn release(&mut self) {
        self.pin.set_floating();
    }

    /// Set the logical wire level (true = released/high)
    pub fn set_level(&mut self, high: bool) {
        if high {
            self.release();
        } else {
            self.drive_low();
        }
    }

    /// Read the wire level
    ///
    /// Meaningful while released; another device may be holding the
    /// wire low.
    pub fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock tri-state pin for testing
    struct MockPin {
        driven_low: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self { driven_low: true }
        }
    }

    impl TriStatePin for MockPin {
        fn set_output_low(&mut self) {
            self.driven_low = true;
        }

        fn set_floating(&mut self) {
            self.driven_low = false;
        }

        fn is_high(&self) -> bool {
            // Nobody else on the bus in tests; released means pulled high.
            !self.driven_low
        }
    }

    #[test]
    fn test_line_idles_released() {
        let line = OpenDrainLine::new(MockPin::new());
        assert!(line.is_high());
    }

    #[test]
    fn test_drive_and_release() {
        let mut line = OpenDrainLine::new(MockPin::new());

        line.drive_low();
        assert!(!line.is_high());

        line.release();
        assert!(line.is_high());
    }

    #[test]
    fn test_set_level() {
        let mut line = OpenDrainLine::new(MockPin::new());

        line.set_level(false);
        assert!(!line.is_high());

        line.set_level(true);
        assert!(line.is_high());
    }
}
