//! Donor glyph import
//!
//! Per-glyph hinting instructions are stripped from donor glyphs. They may
//! reference `fpgm` functions or `cvt` values that only the donor defines,
//! and only the base font's programs are kept.

use std::collections::{BTreeMap, BTreeSet};

use boncode_font_model::{Font, GlyphId, Outline};

use crate::{MergeError, Result};

/// Append `donor_glyphs` to `base`, returning the old to new id mapping.
///
/// The set must be closed over composite references; a component outside
/// it is dropped from its composite.
pub fn import_glyphs(
    base: &mut Font,
    donor: &Font,
    donor_glyphs: &BTreeSet<GlyphId>,
    strip_hinting: bool,
) -> Result<BTreeMap<GlyphId, GlyphId>> {
    let total = base.num_glyphs() + donor_glyphs.len();
    if total > u16::MAX as usize {
        return Err(MergeError::TooManyGlyphs(total));
    }

    let start = base.num_glyphs();
    let remap: BTreeMap<GlyphId, GlyphId> = donor_glyphs
        .iter()
        .enumerate()
        .map(|(i, gid)| (*gid, GlyphId::new((start + i) as u16)))
        .collect();

    for gid in donor_glyphs {
        let mut glyph = donor.glyph(*gid).cloned().unwrap_or_default();
        if strip_hinting {
            glyph.strip_instructions();
        }
        if let Outline::Composite { components } = &mut glyph.outline {
            components.retain_mut(|c| match remap.get(&c.glyph) {
                Some(new) => {
                    c.glyph = *new;
                    true
                }
                None => false,
            });
        }
        base.glyphs.push(glyph);
    }

    Ok(remap)
}
