//! GPIO pin abstractions
//!
//! The display link emulates open-drain signaling on ordinary push-pull
//! pins: a line is either actively driven low or reconfigured as a
//! high-impedance input so an external pull-up supplies the high level.
//! `embedded-hal` has no trait for that mode switch, so we define one.

/// Pin that can switch between a driven-low output and a floating input
///
/// Implementations reconfigure the pin mode on the fly; both operations
/// take effect immediately and cannot fail on the hardware classes this
/// firmware targets.
pub trait TriStatePin {
    /// Configure the pin as a push-pull output driving the low level
    fn set_output_low(&mut self);

    /// Configure the pin as a high-impedance input (released)
    fn set_floating(&mut self);

    /// Read the electrical level currently on the line
    ///
    /// Valid in both modes; in output mode this reads back the driven
    /// level, in input mode the level the pull-up (or another driver)
    /// has settled the line to.
    fn is_high(&self) -> bool;

    /// Check if the line currently reads low
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
