//! Segment and display frame types
//!
//! Frame layout on the wire, most-shifted-first:
//! - 7 bits: digit position 1 segment frame
//! - 7 bits: digit position 2 segment frame
//! - 1 bit: sign lamp
//! - 1 bit: unit indicator (°C lamp)

/// Segments per digit position
pub const SEGMENTS_PER_DIGIT: usize = 7;

/// Total logical bits in one display frame
pub const FRAME_BITS: usize = 16;

/// One 7-segment glyph as ordered logical bits
///
/// The bit order follows the board wiring of the shift register inputs,
/// not the conventional a-g segment order; see the symbol tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentFrame(pub [bool; SEGMENTS_PER_DIGIT]);

impl SegmentFrame {
    /// All segments off
    pub const OFF: SegmentFrame = SegmentFrame([false; SEGMENTS_PER_DIGIT]);

    /// Iterate the segment bits in wire order
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Number of lit segments
    pub fn lit_segments(&self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }
}

/// The full 16-bit payload of one display update
///
/// A frame is transmitted atomically; it has no identity beyond "the
/// next frame to shift out".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayFrame {
    /// Left digit (tens position)
    pub position1: SegmentFrame,
    /// Right digit (units position)
    pub position2: SegmentFrame,
    /// Sign lamp (minus indicator beside the digits)
    pub sign: bool,
    /// Unit indicator lamp, lit only for genuine numeric readings
    pub unit: bool,
}

impl DisplayFrame {
    /// A frame with everything off
    pub const BLANK: DisplayFrame = DisplayFrame {
        position1: SegmentFrame::OFF,
        position2: SegmentFrame::OFF,
        sign: false,
        unit: false,
    };

    /// Iterate all 16 logical bits in the fixed wire order
    ///
    /// Order is position 1 segments, position 2 segments, sign, unit.
    /// The receiving shift register is sequential and position-dependent,
    /// so this order must never change.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.position1
            .bits()
            .chain(self.position2.bits())
            .chain(core::iter::once(self.sign))
            .chain(core::iter::once(self.unit))
    }
}
