//! Weight class, PANOSE weight and style flags.

use crate::style::WEIGHT_TOKENS;

pub const DEFAULT_WEIGHT: u16 = 400;

/// `usWeightClass` for a weight name; unknown names map to 400.
pub fn weight_value(name: &str) -> u16 {
    WEIGHT_TOKENS
        .iter()
        .position(|token| *token == name)
        .map_or(DEFAULT_WEIGHT, |idx| (idx as u16 + 1) * 100)
}

/// Round a weight class to the nearest hundred within 100..=900.
pub fn round_weight_class(weight: u16) -> u16 {
    (((weight as u32 + 50) / 100 * 100) as u16).clamp(100, 900)
}

/// PANOSE `bWeight`: weights up to 100 are 1, up to 200 are 2, and so on
/// through up to 800 being 8; anything heavier is 9.
pub fn panose_weight(weight: u16) -> u8 {
    match weight {
        0..=100 => 1,
        101..=200 => 2,
        201..=300 => 3,
        301..=400 => 4,
        401..=500 => 5,
        501..=600 => 6,
        601..=700 => 7,
        701..=800 => 8,
        _ => 9,
    }
}

/// The OS/2 `fsSelection` style bits. REGULAR and BOLD never both hold, and
/// ITALIC always clears REGULAR.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleFlags {
    pub regular: bool,
    pub bold: bool,
    pub italic: bool,
}

impl StyleFlags {
    pub fn derive(weight: u16, italic: bool) -> Self {
        let bold = weight >= 700;
        Self { regular: !bold && !italic, bold, italic }
    }
}
