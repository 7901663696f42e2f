//! Glyph order consolidation
//!
//! Decides which glyphs survive a merge and the id each one ends up with.

use boncode_font_model::{Font, GlyphId, Outline};
use indexmap::IndexSet;

/// The surviving glyphs in their new order; a glyph's new id is its index.
#[derive(Debug, Clone, Default)]
pub struct GlyphOrder(IndexSet<GlyphId>);

impl GlyphOrder {
    /// Keep glyph 0, the first `pinned` glyphs and everything reachable from
    /// the character map, in ascending original order.
    pub fn compute(font: &Font, pinned: usize) -> Self {
        let pinned = pinned.min(font.num_glyphs());
        let mut keep = font.glyph_closure(font.cmap.glyph_ids());
        keep.extend((0..pinned).map(|gid| GlyphId::new(gid as u16)));
        if font.num_glyphs() > 0 {
            keep.insert(GlyphId::NOTDEF);
        }
        keep.retain(|gid| gid.as_usize() < font.num_glyphs());
        Self(keep.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn new_id(&self, old: GlyphId) -> Option<GlyphId> {
        self.0.get_index_of(&old).map(|idx| GlyphId::new(idx as u16))
    }

    /// Drop every glyph not in the order and renumber the rest, keeping
    /// character map entries and composite references pointed at the same
    /// glyphs.
    pub fn apply(&self, font: &mut Font) {
        let mut old_glyphs = std::mem::take(&mut font.glyphs);
        font.glyphs = self
            .0
            .iter()
            .map(|gid| std::mem::take(&mut old_glyphs[gid.as_usize()]))
            .collect();

        for glyph in &mut font.glyphs {
            if let Outline::Composite { components } = &mut glyph.outline {
                components.retain_mut(|c| match self.new_id(c.glyph) {
                    Some(new) => {
                        c.glyph = new;
                        true
                    }
                    None => false,
                });
            }
        }
        font.cmap.remap(|gid| self.new_id(gid));
    }
}
