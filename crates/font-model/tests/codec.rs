//! Encode/decode tests against real `read-fonts` parsing.

use boncode_font_model::{
    Component, Contour, Font, FontError, Glyph, GlyphId, LanguageTags, Meta, Outline, OutlinePoint,
    Tag, fixtures,
    meta::{DataMapRecord, Metadata, SLNG},
    name, read_font, write_font,
};
use read_fonts::{FontRef, TableProvider};

#[test]
fn test_written_font_parses_with_read_fonts() {
    let font = fixtures::korean_font();
    let bytes = font.to_bytes().expect("encode");

    let font_ref = FontRef::new(&bytes).expect("parse");
    assert_eq!(font_ref.maxp().unwrap().num_glyphs(), font.num_glyphs() as u16);
    let cmap = font_ref.cmap().unwrap();
    assert_eq!(cmap.map_codepoint(0xAC00u32).map(|g| g.to_u32()), Some(1));
    assert_eq!(cmap.map_codepoint(0x3002u32).map(|g| g.to_u32()), Some(2));
    assert_eq!(font_ref.hhea().unwrap().number_of_h_metrics(), font.num_glyphs() as u16);
}

#[test]
fn test_decode_preserves_model() {
    let font = fixtures::korean_font();
    let decoded = Font::from_bytes(&font.to_bytes().unwrap()).unwrap();

    assert_eq!(decoded.cmap, font.cmap);
    assert_eq!(decoded.names.get(name::FAMILY), Some("Korean Fixed"));
    assert_eq!(decoded.glyphs[1].advance, 1000);
    assert!(matches!(decoded.glyphs[5].outline, Outline::Composite { ref components } if components.len() == 2));
    assert!(decoded.has_table(Tag::new(b"GSUB")));
    assert_eq!(decoded.code_pages(), font.code_pages());
}

#[test]
fn test_head_bbox_recomputed() {
    let font = fixtures::latin_font();
    let decoded = Font::from_bytes(&font.to_bytes().unwrap()).unwrap();
    assert_eq!((decoded.head.x_min, decoded.head.x_max), (50, 550));
    assert_eq!(decoded.head.y_max, 700);
}

#[test]
fn test_meta_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/out.ttf");

    let mut font = fixtures::latin_font();
    font.meta = Some(Meta::from_tags(&["Latn"], &["Kore"]));
    write_font(&path, &font).unwrap();

    let read = read_font(&path).unwrap();
    let meta = read.meta.as_ref().expect("meta table");
    assert_eq!(meta.default_tags(), ["Latn"]);
    assert_eq!(meta.supported_tags(), ["Kore"]);
    assert!(!read.has_table(Tag::new(b"meta")));
}

#[test]
fn test_meta_keeps_unknown_maps() {
    let mut meta = Meta::from_tags(&["Latn"], &["Latn"]);
    meta.data_maps.push(DataMapRecord::new(Tag::new(b"appl"), Metadata::Other(vec![7, 7, 7])));
    let mut font = fixtures::latin_font();
    font.meta = Some(meta);

    let mut decoded = Font::from_bytes(&font.to_bytes().unwrap()).unwrap();
    let meta = decoded.meta.as_mut().expect("meta table");
    meta.set_script_tags(SLNG, &["Kore"]);
    let appl = meta.data_maps.iter().find(|r| r.tag == Tag::new(b"appl")).expect("appl map");
    assert_eq!(*appl.data, Metadata::Other(vec![7, 7, 7]));

    let again = Font::from_bytes(&decoded.to_bytes().unwrap()).unwrap();
    let meta = again.meta.expect("meta table");
    assert_eq!(meta.data_maps.len(), 3);
    assert_eq!(meta.supported_tags(), ["Kore"]);
}

#[test]
fn test_invalid_glyph_is_reported() {
    let mut font = fixtures::latin_font();
    let contour = Contour(vec![
        OutlinePoint::new(0.0, 0.0, true),
        OutlinePoint::new(100.0, 0.0, true),
        OutlinePoint::new(100.0, 100.0, true),
    ]);
    font.glyphs[1].outline = Outline::Simple { contours: vec![contour], instructions: vec![0; 70_000] };

    let err = font.to_bytes().unwrap_err();
    assert!(matches!(err, FontError::InvalidGlyph { gid: 1, .. }));
}

#[test]
fn test_composite_of_empty_glyph_survives() {
    let mut font = fixtures::latin_font();
    let space = font.glyphs.len() as u16;
    font.glyphs.push(Glyph::empty("blank", 300));
    font.glyphs.push(Glyph::new(
        "blanks",
        Outline::Composite { components: vec![Component::offset(GlyphId::new(space), 10, 0)] },
        600,
    ));

    let decoded = Font::from_bytes(&font.to_bytes().unwrap()).unwrap();
    let outline = &decoded.glyphs[space as usize + 1].outline;
    assert!(matches!(outline, Outline::Composite { components } if components.len() == 1));
}

#[test]
fn test_nested_composite_depth_in_maxp() {
    let mut font = fixtures::latin_font();
    let first = font.glyphs.len() as u16;
    font.glyphs.push(Glyph::new(
        "A.single",
        Outline::Composite { components: vec![Component::offset(GlyphId::new(1), 0, 0)] },
        600,
    ));
    font.glyphs.push(Glyph::new(
        "A.double",
        Outline::Composite { components: vec![Component::offset(GlyphId::new(first), 0, 0)] },
        600,
    ));

    let bytes = font.to_bytes().unwrap();
    let font_ref = FontRef::new(&bytes).unwrap();
    assert_eq!(font_ref.maxp().unwrap().max_component_depth(), Some(2));
}

#[test]
fn test_missing_file() {
    let err = read_font("/definitely/not/here.ttf").unwrap_err();
    assert!(matches!(err, FontError::NotFound(_)));
}

#[test]
fn test_garbage_is_unreadable() {
    let err = Font::from_bytes(b"not a font").unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn test_missing_cmap_is_reported() {
    let font = fixtures::latin_font();
    let bytes = font.to_bytes().unwrap();
    let font_ref = FontRef::new(&bytes).unwrap();

    let mut builder = write_fonts::FontBuilder::new();
    for record in font_ref.table_directory.table_records() {
        let tag = record.tag();
        if tag != Tag::new(b"cmap") {
            builder.add_raw(tag, font_ref.table_data(tag).unwrap());
        }
    }
    let err = Font::from_bytes(&builder.build()).unwrap_err();
    assert!(matches!(err, FontError::MissingTable("cmap")));
}

#[test]
fn test_glyph_lookup() {
    let font = fixtures::latin_font();
    assert_eq!(font.glyph_for_char(0x41).unwrap().name.as_deref(), Some("A"));
    assert!(font.glyph(GlyphId::new(99)).is_none());
}
