//! Korean script membership.

/// Hangul blocks kept in the subset, inclusive.
///
/// - Hangul Syllables (U+AC00-U+D7AF)
/// - Hangul Jamo (U+1100-U+11FF)
/// - Hangul Compatibility Jamo (U+3130-U+318F)
pub const HANGUL_RANGES: &[(u32, u32)] = &[(0xAC00, 0xD7AF), (0x1100, 0x11FF), (0x3130, 0x318F)];

/// CJK punctuation used in Korean text: ideographic space, comma, full stop
/// and the corner brackets.
pub const CJK_PUNCTUATION: &[u32] = &[0x3000, 0x3001, 0x3002, 0x300C, 0x300D, 0x300E, 0x300F];

pub fn is_korean(codepoint: u32) -> bool {
    HANGUL_RANGES.iter().any(|&(start, end)| (start..=end).contains(&codepoint))
        || CJK_PUNCTUATION.contains(&codepoint)
}
