//! cmap table merging

use boncode_font_model::{CharacterMap, GlyphId, format_codepoint};
use log::debug;

/// Donor code points the base does not map, with their donor glyph ids.
///
/// The base wins every collision; colliding donor entries are counted and
/// otherwise ignored.
#[derive(Debug, Default)]
pub struct CmapUnion {
    pub imports: Vec<(u32, GlyphId)>,
    pub collisions: usize,
}

pub fn union_cmap(base: &CharacterMap, donor: &CharacterMap) -> CmapUnion {
    let mut union = CmapUnion::default();
    for (cp, gid) in donor.iter() {
        if base.contains(cp) {
            debug!("{} kept from base, donor {gid} discarded", format_codepoint(cp));
            union.collisions += 1;
        } else {
            union.imports.push((cp, gid));
        }
    }
    union
}
