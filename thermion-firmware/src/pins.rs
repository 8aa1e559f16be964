//! GPIO adapters for the link wires
//!
//! The link wires are open-drain with external pull-ups, so each pin is
//! either an output driven low or a floating input. `Flex` lets us switch
//! direction at runtime.

use esp_hal::gpio::{Flex, Pull};
use thermion_hal::TriStatePin;

/// One link wire on an ESP32 GPIO
pub struct LinkPin(Flex<'static>);

impl LinkPin {
    /// Wrap a flexible pin, starting in the floating state
    pub fn new(mut pin: Flex<'static>) -> Self {
        // Pull-ups are on the board; the internal one stays off.
        pin.set_as_input(Pull::None);
        Self(pin)
    }
}

impl TriStatePin for LinkPin {
    fn set_output_low(&mut self) {
        self.0.set_low();
        self.0.set_as_output();
    }

    fn set_floating(&mut self) {
        self.0.set_as_input(Pull::None);
    }

    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
