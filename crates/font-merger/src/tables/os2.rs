//! OS/2 table merging
//!
//! Only the capability fields are combined; everything else is the base's.

use boncode_font_model::CodePageRanges;
use write_fonts::tables::os2::Os2;

/// OR the donor's Unicode and code page ranges into the base.
pub fn merge_os2(base: &mut Os2, donor: &Os2) {
    base.ul_unicode_range_1 |= donor.ul_unicode_range_1;
    base.ul_unicode_range_2 |= donor.ul_unicode_range_2;
    base.ul_unicode_range_3 |= donor.ul_unicode_range_3;
    base.ul_unicode_range_4 |= donor.ul_unicode_range_4;

    let merged = CodePageRanges::from_os2(base).merge(CodePageRanges::from_os2(donor));
    if base.ul_code_page_range_1.is_some() || merged != CodePageRanges::default() {
        merged.store(base);
    }
}
