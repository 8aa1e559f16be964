//! Frame transmitter
//!
//! Bit-bangs one 16-bit display frame over the clock/data/latch wires.
//! The remote register shifts the data line in on the rising (released)
//! clock edge and commits the shifted bits to the segment outputs on
//! the latch pulse, so a frame is all-or-nothing: the panel never shows
//! a half-shifted state.
//!
//! Transmission is deliberately blocking. At ~100 kHz a full frame takes
//! well under a millisecond, and yielding mid-frame would let another
//! task stretch the bit timing past what the cable tolerates.

use embedded_hal::delay::DelayNs;
use thermion_core::config::LinkTiming;
use thermion_core::display::DisplayFrame;
use thermion_hal::TriStatePin;

use crate::line::OpenDrainLine;

/// Driver for the 3-wire link to the display register
pub struct FrameTransmitter<P, D> {
    clock: OpenDrainLine<P>,
    data: OpenDrainLine<P>,
    latch: OpenDrainLine<P>,
    delay: D,
    timing: LinkTiming,
}

impl<P: TriStatePin, D: DelayNs> FrameTransmitter<P, D> {
    /// Create a transmitter; all three wires start released
    pub fn new(clock: P, data: P, latch: P, delay: D, timing: LinkTiming) -> Self {
        let mut tx = Self {
            clock: OpenDrainLine::new(clock),
            data: OpenDrainLine::new(data),
            latch: OpenDrainLine::new(latch),
            delay,
            timing,
        };
        // Clock idles low between frames; the rising edge is the strobe.
        tx.clock.drive_low();
        tx
    }

    /// Shift out one frame and latch it
    pub fn transmit(&mut self, frame: &DisplayFrame) {
        // Hold latch low while shifting so the outputs keep showing the
        // previous frame.
        self.latch.drive_low();
        self.delay.delay_us(self.timing.latch_settle_us);

        for bit in frame.bits() {
            self.data.set_level(bit == self.timing.bit_active_high);
            self.delay.delay_us(self.timing.data_setup_us);

            self.clock.release();
            self.delay.delay_us(self.timing.half_period_us);
            self.clock.drive_low();
            self.delay.delay_us(self.timing.half_period_us);
        }

        // Commit pulse: a short released phase, then a longer driven-low
        // phase, then release for the idle state.
        self.latch.release();
        self.delay.delay_us(self.timing.latch_release_us);
        self.latch.drive_low();
        self.delay.delay_us(self.timing.latch_drive_us);
        self.latch.release();

        // Leave the data wire free for the bus.
        self.data.release();
    }
}
