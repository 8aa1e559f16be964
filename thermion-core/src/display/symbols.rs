//! Symbol lookup tables
//!
//! Two parallel tables, one per digit position. The two positions are
//! wired to the shift register inputs in different segment orders
//! (position 1 is D,E,F,A,B,G,C; position 2 is E,F,A,D,G,B,C), so the
//! same glyph has a different bit pattern in each table.
//!
//! Table layout: digits 0-9, then blank, minus glyph and error glyph,
//! then a contiguous block of animation frames (one lit segment chasing
//! around the perimeter A->B->C->D->E->F).

use super::frame::{SegmentFrame, SEGMENTS_PER_DIGIT};

/// Index of the blank (all segments off) symbol
pub const BLANK: usize = 10;

/// Index of the dedicated minus-sign glyph (middle segment only)
pub const MINUS: usize = 11;

/// Index of the error glyph ("E")
pub const ERROR_GLYPH: usize = 12;

/// First index of the animation block
pub const ANIM_BASE: usize = 13;

/// Number of frames in the animation block
pub const ANIM_LEN: usize = 6;

/// Total symbols per digit position
pub const SYMBOL_COUNT: usize = ANIM_BASE + ANIM_LEN;

const fn seg(bits: [u8; SEGMENTS_PER_DIGIT]) -> SegmentFrame {
    let mut out = [false; SEGMENTS_PER_DIGIT];
    let mut i = 0;
    while i < SEGMENTS_PER_DIGIT {
        out[i] = bits[i] != 0;
        i += 1;
    }
    SegmentFrame(out)
}

// Position 1 wire order: D, E, F, A, B, G, C
const POSITION1: [SegmentFrame; SYMBOL_COUNT] = [
    seg([1, 1, 1, 1, 1, 0, 1]), // 0
    seg([0, 0, 0, 0, 1, 0, 1]), // 1
    seg([1, 1, 0, 1, 1, 1, 0]), // 2
    seg([1, 0, 0, 1, 1, 1, 1]), // 3
    seg([0, 0, 1, 0, 1, 1, 1]), // 4
    seg([1, 0, 1, 1, 0, 1, 1]), // 5
    seg([1, 1, 1, 1, 0, 1, 1]), // 6
    seg([0, 0, 0, 1, 1, 0, 1]), // 7
    seg([1, 1, 1, 1, 1, 1, 1]), // 8
    seg([1, 0, 1, 1, 1, 1, 1]), // 9
    seg([0, 0, 0, 0, 0, 0, 0]), // blank
    seg([0, 0, 0, 0, 0, 1, 0]), // minus
    seg([1, 1, 1, 1, 0, 1, 0]), // E
    seg([0, 0, 0, 1, 0, 0, 0]), // anim A
    seg([0, 0, 0, 0, 1, 0, 0]), // anim B
    seg([0, 0, 0, 0, 0, 0, 1]), // anim C
    seg([1, 0, 0, 0, 0, 0, 0]), // anim D
    seg([0, 1, 0, 0, 0, 0, 0]), // anim E
    seg([0, 0, 1, 0, 0, 0, 0]), // anim F
];

// Position 2 wire order: E, F, A, D, G, B, C
const POSITION2: [SegmentFrame; SYMBOL_COUNT] = [
    seg([1, 1, 1, 1, 0, 1, 1]), // 0
    seg([0, 0, 0, 0, 0, 1, 1]), // 1
    seg([1, 0, 1, 1, 1, 1, 0]), // 2
    seg([0, 0, 1, 1, 1, 1, 1]), // 3
    seg([0, 1, 0, 0, 1, 1, 1]), // 4
    seg([0, 1, 1, 1, 1, 0, 1]), // 5
    seg([1, 1, 1, 1, 1, 0, 1]), // 6
    seg([0, 0, 1, 0, 0, 1, 1]), // 7
    seg([1, 1, 1, 1, 1, 1, 1]), // 8
    seg([0, 1, 1, 1, 1, 1, 1]), // 9
    seg([0, 0, 0, 0, 0, 0, 0]), // blank
    seg([0, 0, 0, 0, 1, 0, 0]), // minus
    seg([1, 1, 1, 1, 1, 0, 0]), // E
    seg([0, 0, 1, 0, 0, 0, 0]), // anim A
    seg([0, 0, 0, 0, 0, 1, 0]), // anim B
    seg([0, 0, 0, 0, 0, 0, 1]), // anim C
    seg([0, 0, 0, 1, 0, 0, 0]), // anim D
    seg([1, 0, 0, 0, 0, 0, 0]), // anim E
    seg([0, 1, 0, 0, 0, 0, 0]), // anim F
];

/// Immutable per-position glyph lookup
///
/// Built once at startup and shared read-only; nothing mutates it after
/// construction.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    position1: [SegmentFrame; SYMBOL_COUNT],
    position2: [SegmentFrame; SYMBOL_COUNT],
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Create the symbol table
    pub const fn new() -> Self {
        Self {
            position1: POSITION1,
            position2: POSITION2,
        }
    }

    /// Glyph for digit position 1 (tens)
    pub fn position1(&self, index: usize) -> SegmentFrame {
        self.position1[index]
    }

    /// Glyph for digit position 2 (units)
    pub fn position2(&self, index: usize) -> SegmentFrame {
        self.position2[index]
    }

    /// Reverse lookup in the position 1 table
    pub fn find_position1(&self, frame: SegmentFrame) -> Option<usize> {
        self.position1.iter().position(|&f| f == frame)
    }

    /// Reverse lookup in the position 2 table
    pub fn find_position2(&self, frame: SegmentFrame) -> Option<usize> {
        self.position2.iter().position(|&f| f == frame)
    }
}
