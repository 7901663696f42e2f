//! Main Merger implementation

use boncode_font_model::{Font, Tag};
use log::info;

use crate::{
    Result,
    glyph_order::GlyphOrder,
    options::Options,
    tables::{cmap::union_cmap, glyf::import_glyphs, os2::merge_os2},
};

/// Unions a donor glyph set into a base font.
#[derive(Debug, Default)]
pub struct Merger {
    options: Options,
}

/// What a merge did, for build reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    pub collisions: usize,
    pub imported_codepoints: usize,
    pub imported_glyphs: usize,
    pub removed_glyphs: usize,
    pub dropped_tables: Vec<Tag>,
}

#[derive(Debug, Clone)]
pub struct Merged {
    pub font: Font,
    pub report: MergeReport,
}

impl Merger {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Merge `donor` into `base`.
    ///
    /// Base mappings win every collision and base glyphs keep their ids, so
    /// layout tables carried over from the base stay valid.
    pub fn merge(&self, mut base: Font, donor: &Font) -> Result<Merged> {
        let mut report = MergeReport::default();
        let base_glyphs = base.num_glyphs();

        if base.units_per_em() != donor.units_per_em() {
            info!(
                "unitsPerEm differs (base {}, donor {}); donor outlines are used as given",
                base.units_per_em(),
                donor.units_per_em()
            );
        }

        let union = union_cmap(&base.cmap, &donor.cmap);
        report.collisions = union.collisions;
        report.imported_codepoints = union.imports.len();

        let needed = donor.glyph_closure(union.imports.iter().map(|(_, gid)| *gid));
        let remap = import_glyphs(&mut base, donor, &needed, self.options.strip_donor_hinting)?;
        report.imported_glyphs = remap.len();
        for (cp, gid) in union.imports {
            if let Some(new) = remap.get(&gid) {
                base.cmap.insert(cp, *new);
            }
        }

        if let (Some(base_os2), Some(donor_os2)) = (base.os2.as_mut(), donor.os2.as_ref()) {
            merge_os2(base_os2, donor_os2);
        }

        for tag in &self.options.drop_tables {
            if base.remove_table(*tag) {
                info!("Dropping {tag} table");
                report.dropped_tables.push(*tag);
            }
        }

        let before = base.num_glyphs();
        let order = GlyphOrder::compute(&base, base_glyphs);
        order.apply(&mut base);
        report.removed_glyphs = before - base.num_glyphs();

        info!(
            "Merged {} code points ({} glyphs), {} collisions resolved in favor of base",
            report.imported_codepoints, report.imported_glyphs, report.collisions
        );

        Ok(Merged { font: base, report })
    }
}
