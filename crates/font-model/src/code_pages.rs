//! OS/2 code page capability mask.

use std::ops::BitOr;

use write_fonts::tables::os2::Os2;

/// `ulCodePageRange1` (low 32 bits) and `ulCodePageRange2` (high 32 bits).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CodePageRanges(pub u64);

impl CodePageRanges {
    pub const LATIN_1: Self = Self(1 << 0);
    pub const KOREAN_WANSUNG: Self = Self(1 << 19);
    pub const KOREAN_JOHAB: Self = Self(1 << 21);

    pub const fn from_parts(range1: u32, range2: u32) -> Self {
        Self(range1 as u64 | (range2 as u64) << 32)
    }

    pub const fn range1(self) -> u32 {
        self.0 as u32
    }

    pub const fn range2(self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of both masks. Bits are never cleared.
    pub const fn merge(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn from_os2(os2: &Os2) -> Self {
        Self::from_parts(
            os2.ul_code_page_range_1.unwrap_or(0),
            os2.ul_code_page_range_2.unwrap_or(0),
        )
    }

    /// Store the mask, which requires an OS/2 table of version 1 or later.
    pub fn store(self, os2: &mut Os2) {
        os2.ul_code_page_range_1 = Some(self.range1());
        os2.ul_code_page_range_2 = Some(self.range2());
    }
}

impl BitOr for CodePageRanges {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.merge(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [CodePageRanges; 4] = [
        CodePageRanges(0),
        CodePageRanges(1),
        CodePageRanges(1 << 19 | 1 << 40),
        CodePageRanges(u64::MAX),
    ];

    #[test]
    fn test_parts_split() {
        let ranges = CodePageRanges::from_parts(0x0028_0001, 0x8000_0000);
        assert_eq!(ranges.range1(), 0x0028_0001);
        assert_eq!(ranges.range2(), 0x8000_0000);
    }

    #[test]
    fn test_merge_is_commutative_and_associative() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert_eq!(a.merge(b), b.merge(a));
                for c in SAMPLES {
                    assert_eq!(a.merge(b).merge(c), a.merge(b.merge(c)));
                }
            }
        }
    }

    #[test]
    fn test_merge_is_superset() {
        for a in SAMPLES {
            for b in SAMPLES {
                let merged = a | b;
                assert!(merged.contains(a));
                assert!(merged.contains(b));
            }
        }
    }

    #[test]
    fn test_korean_bits() {
        let all = CodePageRanges::LATIN_1 | CodePageRanges::KOREAN_WANSUNG | CodePageRanges::KOREAN_JOHAB;
        assert_eq!(all.range1(), 0x0028_0001);
    }
}
