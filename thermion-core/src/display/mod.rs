//! Display frame model and symbol encoding
//!
//! The remote panel is a pair of 7-segment digits behind a 16-bit
//! shift/storage register. One display update is one [`DisplayFrame`]:
//! seven segment bits per digit position, a sign lamp bit and a unit
//! indicator bit, always in that wire order.

pub mod encode;
pub mod frame;
pub mod symbols;

pub use encode::{encode, DisplayValue, EncodeError, StatusToken, READING_MAX, READING_MIN};
pub use frame::{DisplayFrame, SegmentFrame, FRAME_BITS, SEGMENTS_PER_DIGIT};
pub use symbols::{SymbolTable, ANIM_LEN};
