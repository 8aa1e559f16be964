//! Value-to-frame encoder
//!
//! Everything the panel can show is one [`DisplayValue`]; a single entry
//! point maps it to the [`DisplayFrame`] the transmitter expects.

use super::frame::DisplayFrame;
use super::symbols::{SymbolTable, ANIM_BASE, ANIM_LEN, BLANK, ERROR_GLYPH, MINUS};

/// Smallest encodable reading
pub const READING_MIN: i8 = -99;

/// Largest encodable reading
pub const READING_MAX: i8 = 99;

/// Fixed status glyphs the panel can show instead of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusToken {
    /// All segments off
    Blank,
    /// Minus glyph on both positions
    Minus,
    /// Error glyph ("E") on both positions
    Error,
}

impl StatusToken {
    fn index(self) -> usize {
        match self {
            StatusToken::Blank => BLANK,
            StatusToken::Minus => MINUS,
            StatusToken::Error => ERROR_GLYPH,
        }
    }
}

/// What the panel should currently show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayValue {
    /// A numeric reading in [-99, 99]
    Reading(i8),
    /// A fixed status glyph
    Token(StatusToken),
    /// One frame of the rotating animation; the index wraps modulo the
    /// animation block length
    Animation(u8),
}

/// Encoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Reading outside [-99, 99]; a caller contract violation, never
    /// clamped and never transmitted
    ReadingOutOfRange,
}

/// Encode a display value into the 16-bit frame
///
/// Numeric rules:
/// - leading zero is suppressed (position 1 blank) for 0..=9
/// - negative single-digit values put the minus glyph in position 1
///   instead of asserting the sign lamp (the lamp sits beside position 1
///   and the panel needs position 1 occupied)
/// - other negative values assert the sign lamp and show the tens digit
/// - the unit lamp is lit for readings only, never for tokens
pub fn encode(table: &SymbolTable, value: DisplayValue) -> Result<DisplayFrame, EncodeError> {
    match value {
        DisplayValue::Reading(v) => {
            if !(READING_MIN..=READING_MAX).contains(&v) {
                return Err(EncodeError::ReadingOutOfRange);
            }

            let magnitude = (v as i16).unsigned_abs() as usize;
            let tens = magnitude / 10;
            let units = magnitude % 10;
            let negative = v < 0;

            let (pos1_index, sign) = if tens == 0 {
                if negative {
                    // Single-digit negative: minus rendered as a glyph,
                    // sign lamp stays off.
                    (MINUS, false)
                } else {
                    (BLANK, false)
                }
            } else {
                (tens, negative)
            };

            Ok(DisplayFrame {
                position1: table.position1(pos1_index),
                position2: table.position2(units),
                sign,
                unit: true,
            })
        }
        DisplayValue::Token(token) => {
            let index = token.index();
            Ok(DisplayFrame {
                position1: table.position1(index),
                position2: table.position2(index),
                sign: false,
                unit: false,
            })
        }
        DisplayValue::Animation(i) => {
            let index = ANIM_BASE + (i as usize % ANIM_LEN);
            Ok(DisplayFrame {
                position1: table.position1(index),
                position2: table.position2(index),
                sign: false,
                unit: false,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Recover the reading from an encoded frame via reverse table lookup.
    fn decode(table: &SymbolTable, frame: &DisplayFrame) -> Option<i8> {
        let units = table.find_position2(frame.position2)?;
        if units > 9 {
            return None;
        }
        let pos1 = table.find_position1(frame.position1)?;

        let magnitude = match pos1 {
            BLANK => units as i16,
            MINUS => return Some(-(units as i8)),
            tens if tens <= 9 => (tens * 10 + units) as i16,
            _ => return None,
        };

        if frame.sign {
            Some(-magnitude as i8)
        } else {
            Some(magnitude as i8)
        }
    }

    #[test]
    fn test_positive_two_digit() {
        let table = SymbolTable::new();
        let frame = encode(&table, DisplayValue::Reading(24)).unwrap();

        assert_eq!(frame.position1, table.position1(2));
        assert_eq!(frame.position2, table.position2(4));
        assert!(!frame.sign);
        assert!(frame.unit);
    }

    #[test]
    fn test_leading_zero_suppressed() {
        let table = SymbolTable::new();
        let frame = encode(&table, DisplayValue::Reading(0)).unwrap();

        assert_eq!(frame.position1, table.position1(BLANK));
        assert_eq!(frame.position2, table.position2(0));
        assert!(!frame.sign);
        assert!(frame.unit);
    }

    #[test]
    fn test_single_digit_negative_uses_minus_glyph() {
        let table = SymbolTable::new();

        let frame = encode(&table, DisplayValue::Reading(-3)).unwrap();
        assert_eq!(frame.position1, table.position1(MINUS));
        assert_eq!(frame.position2, table.position2(3));
        assert!(!frame.sign, "sign lamp must stay off for -9..=-1");

        let frame = encode(&table, DisplayValue::Reading(-5)).unwrap();
        assert_eq!(frame.position1, table.position1(MINUS));
        assert_eq!(frame.position2, table.position2(5));
        assert!(!frame.sign);
    }

    #[test]
    fn test_two_digit_negative_uses_sign_lamp() {
        let table = SymbolTable::new();

        let frame = encode(&table, DisplayValue::Reading(-42)).unwrap();
        assert_eq!(frame.position1, table.position1(4));
        assert_eq!(frame.position2, table.position2(2));
        assert!(frame.sign);

        let frame = encode(&table, DisplayValue::Reading(-15)).unwrap();
        assert_eq!(frame.position1, table.position1(1));
        assert_eq!(frame.position2, table.position2(5));
        assert!(frame.sign);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let table = SymbolTable::new();
        assert_eq!(
            encode(&table, DisplayValue::Reading(100)),
            Err(EncodeError::ReadingOutOfRange)
        );
        assert_eq!(
            encode(&table, DisplayValue::Reading(-100)),
            Err(EncodeError::ReadingOutOfRange)
        );
        assert_eq!(
            encode(&table, DisplayValue::Reading(i8::MIN)),
            Err(EncodeError::ReadingOutOfRange)
        );
    }

    #[test]
    fn test_tokens_suppress_unit_lamp() {
        let table = SymbolTable::new();
        for token in [StatusToken::Blank, StatusToken::Minus, StatusToken::Error] {
            let frame = encode(&table, DisplayValue::Token(token)).unwrap();
            assert!(!frame.unit);
            assert!(!frame.sign);
        }
    }

    #[test]
    fn test_animation_cycles_with_block_period() {
        let table = SymbolTable::new();
        let first = encode(&table, DisplayValue::Animation(0)).unwrap();
        let wrapped = encode(&table, DisplayValue::Animation(ANIM_LEN as u8)).unwrap();
        assert_eq!(first, wrapped);

        // Within one period every frame differs from the first.
        for i in 1..ANIM_LEN as u8 {
            let frame = encode(&table, DisplayValue::Animation(i)).unwrap();
            assert_ne!(frame, first);
            assert!(!frame.unit);
        }
    }

    proptest! {
        #[test]
        fn prop_reading_roundtrip(v in -99i8..=99) {
            let table = SymbolTable::new();
            let frame = encode(&table, DisplayValue::Reading(v)).unwrap();
            prop_assert!(frame.unit);
            prop_assert_eq!(decode(&table, &frame), Some(v));
        }

        #[test]
        fn prop_out_of_range_never_encodes(v in prop_oneof![-128i16..-99, 100i16..=127]) {
            let table = SymbolTable::new();
            prop_assert_eq!(
                encode(&table, DisplayValue::Reading(v as i8)),
                Err(EncodeError::ReadingOutOfRange)
            );
        }
    }
}
