//! The [`Font`] aggregate and its binary codec.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
};

use font_types::{FWord, Tag, UfWord, Version16Dot16};
use kurbo::Rect;
use log::warn;
use read_fonts::{FontRef, ReadError, TableProvider, types::GlyphId16};
use write_fonts::{
    FontBuilder,
    from_obj::ToOwnedTable,
    tables::{
        glyf::GlyfLocaBuilder,
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        loca::LocaFormat,
        maxp::Maxp,
        meta::Meta,
        os2::Os2,
        post::Post,
    },
};

use crate::{
    CharacterMap, CodePageRanges, FontError, Glyph, NameTable, Result,
    glyph::{self, Outline},
    types::GlyphId,
};

/// Tables whose content lives in typed fields of [`Font`]; they are rebuilt
/// on encode and never copied from [`Font::tables`].
const MODELED_TABLES: [Tag; 10] = [
    Tag::new(b"glyf"),
    Tag::new(b"loca"),
    Tag::new(b"cmap"),
    Tag::new(b"name"),
    Tag::new(b"head"),
    Tag::new(b"hhea"),
    Tag::new(b"hmtx"),
    Tag::new(b"maxp"),
    Tag::new(b"post"),
    Tag::new(b"OS/2"),
];

/// Modeled when it parses; otherwise kept verbatim in [`Font::tables`].
const META: Tag = Tag::new(b"meta");

/// A TrueType font held as mutable typed tables.
///
/// Everything the build rewrites is modeled; every other table rides along
/// verbatim in `tables`.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub glyphs: Vec<Glyph>,
    pub cmap: CharacterMap,
    pub names: NameTable,
    pub head: Head,
    pub hhea: Hhea,
    pub maxp: Maxp,
    pub post: Option<Post>,
    pub os2: Option<Os2>,
    pub meta: Option<Meta>,
    pub tables: BTreeMap<Tag, Vec<u8>>,
}

impl Font {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let font = FontRef::new(data)?;

        let cmap = font.cmap().map_err(|_| FontError::MissingTable("cmap"))?;
        let name = font.name().map_err(|_| FontError::MissingTable("name"))?;
        let head = font.head().map_err(|_| FontError::MissingTable("head"))?;
        let hhea = font.hhea().map_err(|_| FontError::MissingTable("hhea"))?;
        let maxp = font.maxp().map_err(|_| FontError::MissingTable("maxp"))?;
        let hmtx = font.hmtx().map_err(|_| FontError::MissingTable("hmtx"))?;
        let glyf = font.glyf().map_err(|_| FontError::MissingTable("glyf"))?;
        let loca = font.loca(None).map_err(|_| FontError::MissingTable("loca"))?;
        let post = font.post().ok();

        let glyphs = (0..maxp.num_glyphs())
            .map(|gid| -> Result<Glyph> {
                let read_gid = read_fonts::types::GlyphId::new(gid as u32);
                let outline = loca.get_glyf(read_gid, &glyf)?;
                let name = post
                    .as_ref()
                    .and_then(|p| p.glyph_name(GlyphId16::new(gid)))
                    .map(str::to_string);
                let advance = hmtx.advance(read_gid).unwrap_or(0);
                Ok(Glyph::from_read(outline, name, advance))
            })
            .collect::<Result<Vec<_>>>()?;

        let meta = match font.meta() {
            Ok(meta) => Some(meta.to_owned_table()),
            Err(ReadError::TableIsMissing(_)) => None,
            Err(e) => {
                warn!("meta table does not parse ({e}), keeping it verbatim");
                None
            }
        };

        let tables = font
            .table_directory
            .table_records()
            .iter()
            .map(|record| record.tag())
            .filter(|tag| !MODELED_TABLES.contains(tag))
            .filter(|tag| *tag != META || meta.is_none())
            .filter_map(|tag| Some((tag, font.table_data(tag)?.as_bytes().to_vec())))
            .collect();

        Ok(Self {
            glyphs,
            cmap: CharacterMap::from_read(&cmap),
            names: NameTable::from_read(&name),
            head: head.to_owned_table(),
            hhea: hhea.to_owned_table(),
            maxp: maxp.to_owned_table(),
            post: post.map(|p| p.to_owned_table()),
            os2: font.os2().ok().map(|t| t.to_owned_table()),
            meta,
            tables,
        })
    }

    /// Encode the font. Glyph-derived fields of `head`, `hhea`, `maxp` and
    /// `hmtx` are recomputed from the glyph store.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut glyf_builder = GlyfLocaBuilder::new();
        for gid in 0..self.glyphs.len() {
            let glyph = glyph::to_write(&self.glyphs, GlyphId::new(gid as u16));
            glyf_builder
                .add_glyph(&glyph)
                .map_err(|source| FontError::InvalidGlyph { gid: gid as u16, source })?;
        }
        let (glyf, loca, loca_format) = glyf_builder.build();

        let metrics = self.metrics();

        let mut head = self.head.clone();
        head.index_to_loc_format = match loca_format {
            LocaFormat::Short => 0,
            LocaFormat::Long => 1,
        };
        if let Some(rect) = metrics.font_bounds {
            let bbox = glyph::bbox_of(rect);
            (head.x_min, head.y_min, head.x_max, head.y_max) =
                (bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max);
        }

        let mut hhea = self.hhea.clone();
        hhea.number_of_h_metrics = self.glyphs.len() as u16;
        hhea.advance_width_max = UfWord::new(metrics.advance_width_max);
        hhea.min_left_side_bearing = FWord::new(metrics.min_lsb);
        hhea.min_right_side_bearing = FWord::new(metrics.min_rsb);
        hhea.x_max_extent = FWord::new(metrics.x_max_extent);

        let hmtx = Hmtx {
            h_metrics: self
                .glyphs
                .iter()
                .zip(&metrics.lsbs)
                .map(|(g, lsb)| LongMetric { advance: g.advance, side_bearing: *lsb })
                .collect(),
            left_side_bearings: Vec::new(),
        };

        let mut maxp = self.maxp.clone();
        maxp.num_glyphs = self.glyphs.len() as u16;
        if maxp.max_points.is_some() {
            maxp.max_points = Some(metrics.max_points);
            maxp.max_contours = Some(metrics.max_contours);
            maxp.max_composite_points = Some(metrics.max_composite_points);
            maxp.max_composite_contours = Some(metrics.max_composite_contours);
            maxp.max_component_elements = Some(metrics.max_component_elements);
            maxp.max_component_depth = Some(metrics.max_component_depth);
        }

        let mut builder = FontBuilder::new();
        builder.add_table(&head)?;
        builder.add_table(&hhea)?;
        builder.add_table(&hmtx)?;
        builder.add_table(&maxp)?;
        builder.add_table(&self.cmap.to_write())?;
        builder.add_table(&self.names.to_write())?;
        builder.add_table(&glyf)?;
        builder.add_table(&loca)?;
        if let Some(post) = &self.post {
            // Glyph ids are renumbered freely, so names are not carried.
            let post = Post {
                version: Version16Dot16::VERSION_3_0,
                num_glyphs: None,
                glyph_name_index: None,
                string_data: None,
                ..post.clone()
            };
            builder.add_table(&post)?;
        }
        if let Some(os2) = &self.os2 {
            builder.add_table(os2)?;
        }
        if let Some(meta) = &self.meta {
            builder.add_table(meta)?;
        }
        for (tag, data) in &self.tables {
            if *tag == META && self.meta.is_some() {
                continue;
            }
            builder.add_raw(*tag, data.clone());
        }

        Ok(builder.build())
    }

    pub fn num_glyphs(&self) -> usize {
        self.glyphs.len()
    }

    pub fn glyph(&self, gid: GlyphId) -> Option<&Glyph> {
        self.glyphs.get(gid.as_usize())
    }

    pub fn glyph_for_char(&self, codepoint: u32) -> Option<&Glyph> {
        self.glyph(self.cmap.get(codepoint)?)
    }

    /// Whether glyph 0 can be taken as `.notdef`: it must exist, and if it
    /// carries a name that name must be `.notdef`.
    pub fn has_notdef(&self) -> bool {
        self.glyphs.first().is_some_and(|g| g.name.as_deref().is_none_or(|n| n == ".notdef"))
    }

    pub fn units_per_em(&self) -> u16 {
        self.head.units_per_em
    }

    pub fn has_table(&self, tag: Tag) -> bool {
        self.tables.contains_key(&tag)
    }

    pub fn remove_table(&mut self, tag: Tag) -> bool {
        self.tables.remove(&tag).is_some()
    }

    pub fn code_pages(&self) -> CodePageRanges {
        self.os2.as_ref().map(CodePageRanges::from_os2).unwrap_or_default()
    }

    /// `roots` plus every glyph they reach through composite references.
    pub fn glyph_closure(&self, roots: impl IntoIterator<Item = GlyphId>) -> BTreeSet<GlyphId> {
        let mut seen = BTreeSet::new();
        let mut stack: Vec<GlyphId> = roots.into_iter().collect();
        while let Some(gid) = stack.pop() {
            if !seen.insert(gid) {
                continue;
            }
            if let Some(glyph) = self.glyph(gid) {
                stack.extend(glyph.outline.component_ids().filter(|c| !seen.contains(c)));
            }
        }
        seen
    }

    /// Contours of `gid` with composites resolved.
    pub fn flattened(&self, gid: GlyphId) -> Vec<glyph::Contour> {
        glyph::flatten(&self.glyphs, gid)
    }

    fn metrics(&self) -> GlyphMetrics {
        let mut m = GlyphMetrics { lsbs: Vec::with_capacity(self.glyphs.len()), ..Default::default() };
        let mut any_outline = false;

        for (gid, glyph) in self.glyphs.iter().enumerate() {
            m.advance_width_max = m.advance_width_max.max(glyph.advance);
            let contours = glyph::flatten(&self.glyphs, GlyphId::new(gid as u16));
            let Some(rect) = glyph::bounds(&contours) else {
                m.lsbs.push(0);
                continue;
            };
            let bbox = glyph::bbox_of(rect);
            m.lsbs.push(bbox.x_min);
            let rsb = glyph.advance as i32 - bbox.x_max as i32;
            if any_outline {
                m.min_lsb = m.min_lsb.min(bbox.x_min);
                m.min_rsb = m.min_rsb.min(rsb.clamp(i16::MIN as i32, i16::MAX as i32) as i16);
                m.x_max_extent = m.x_max_extent.max(bbox.x_max);
            } else {
                m.min_lsb = bbox.x_min;
                m.min_rsb = rsb.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
                m.x_max_extent = bbox.x_max;
            }
            any_outline = true;
            m.font_bounds = Some(m.font_bounds.map_or(rect, |r: Rect| r.union(rect)));

            let points: usize = contours.iter().map(|c| c.points().len()).sum();
            match &glyph.outline {
                Outline::Simple { .. } => {
                    m.max_points = m.max_points.max(points as u16);
                    m.max_contours = m.max_contours.max(contours.len() as u16);
                }
                Outline::Composite { components } => {
                    m.max_composite_points = m.max_composite_points.max(points as u16);
                    m.max_composite_contours = m.max_composite_contours.max(contours.len() as u16);
                    m.max_component_elements = m.max_component_elements.max(components.len() as u16);
                    m.max_component_depth =
                        m.max_component_depth.max(glyph::component_depth(&self.glyphs, GlyphId::new(gid as u16)));
                }
                Outline::Empty => {}
            }
        }
        m
    }
}

#[derive(Default)]
struct GlyphMetrics {
    lsbs: Vec<i16>,
    font_bounds: Option<Rect>,
    advance_width_max: u16,
    min_lsb: i16,
    min_rsb: i16,
    x_max_extent: i16,
    max_points: u16,
    max_contours: u16,
    max_composite_points: u16,
    max_composite_contours: u16,
    max_component_elements: u16,
    max_component_depth: u16,
}

/// Read and decode a font file.
pub fn read_font(path: impl AsRef<Path>) -> Result<Font> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FontError::NotFound(path.to_path_buf()));
    }
    let data = fs::read(path).map_err(|source| FontError::Io { path: path.to_path_buf(), source })?;
    Font::from_bytes(&data)
}

/// Encode and write a font file, creating parent directories as needed.
pub fn write_font(path: impl AsRef<Path>, font: &Font) -> Result<()> {
    let path = path.as_ref();
    let data = font.to_bytes()?;
    let io_err = |source| FontError::Io { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, data).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_closure_follows_components() {
        let font = fixtures::korean_font();
        let composite = font.cmap.get(fixtures::COMPOSITE_CHAR).unwrap();
        let closure = font.glyph_closure([composite]);
        assert!(closure.len() > 1);
        assert!(closure.contains(&composite));
    }

    #[test]
    fn test_has_notdef() {
        let mut font = fixtures::latin_font();
        assert!(font.has_notdef());
        font.glyphs[0].name = Some("space".into());
        assert!(!font.has_notdef());
        font.glyphs.clear();
        assert!(!font.has_notdef());
    }

    #[test]
    fn test_metrics_cover_outlines() {
        let font = fixtures::latin_font();
        let metrics = font.metrics();
        assert_eq!(metrics.lsbs.len(), font.num_glyphs());
        assert_eq!(metrics.advance_width_max, 600);
        assert!(metrics.font_bounds.is_some());
    }
}
