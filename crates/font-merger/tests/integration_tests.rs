//! End-to-end merges of the synthetic Latin and Korean fixtures.

use boncode_font_merger::{Merger, Options, merge_fonts};
use boncode_font_model::{
    CodePageRanges, Font, GlyphId, Outline, Tag, fixtures, glyph::flatten,
};
use read_fonts::{FontRef, TableProvider};

fn korean_subset() -> Font {
    let mut font = fixtures::korean_font();
    // The extractor would have removed this.
    font.cmap.retain(|cp| cp != 0x41);
    font
}

#[test]
fn test_merge_keeps_base_and_adds_korean() {
    let latin = fixtures::latin_font();
    let merged = Merger::default().merge(latin.clone(), &korean_subset()).unwrap();
    let font = &merged.font;

    // Base glyphs keep their ids.
    assert_eq!(font.cmap.get(0x41), Some(GlyphId::new(1)));
    assert_eq!(font.glyph(GlyphId::new(1)), latin.glyph(GlyphId::new(1)));

    let hangul = font.glyph_for_char(0xAC00).unwrap();
    assert_eq!(hangul.advance, fixtures::KOREAN_ADVANCE);
    assert_eq!(merged.report.imported_codepoints, 4);
    // 가, the shared punctuation glyph, the composite and its component.
    assert_eq!(merged.report.imported_glyphs, 4);
    assert_eq!(font.num_glyphs(), 7);
}

#[test]
fn test_base_wins_collisions() {
    let latin = fixtures::latin_font();
    let merged = Merger::default().merge(latin.clone(), &fixtures::korean_font()).unwrap();

    let a = merged.font.glyph_for_char(0x41).unwrap();
    assert_eq!(a.advance, fixtures::LATIN_ADVANCE);
    assert_eq!(a, latin.glyph_for_char(0x41).unwrap());
    assert_eq!(merged.report.collisions, 1);
    // The donor's own `A` was never imported.
    assert_eq!(merged.report.imported_glyphs, 4);
}

#[test]
fn test_aliases_share_imported_glyph() {
    let merged = merge_fonts(fixtures::latin_font(), &korean_subset()).unwrap();
    assert_eq!(merged.cmap.get(0x3001), merged.cmap.get(0x3002));
}

#[test]
fn test_composite_references_follow_import() {
    let donor = korean_subset();
    let merged = merge_fonts(fixtures::latin_font(), &donor).unwrap();

    let gid = merged.cmap.get(fixtures::COMPOSITE_CHAR).unwrap();
    let Outline::Composite { components } = &merged.glyph(gid).unwrap().outline else {
        panic!("expected composite");
    };
    let component = components[0].glyph;
    assert_eq!(merged.glyph(component).unwrap().name.as_deref(), Some("dot"));

    let donor_gid = donor.cmap.get(fixtures::COMPOSITE_CHAR).unwrap();
    assert_eq!(flatten(&merged.glyphs, gid), flatten(&donor.glyphs, donor_gid));
}

#[test]
fn test_capabilities_are_unioned() {
    let latin = fixtures::latin_font();
    let donor = korean_subset();
    let merged = merge_fonts(latin.clone(), &donor).unwrap();

    let pages = merged.code_pages();
    assert!(pages.contains(latin.code_pages()));
    assert!(pages.contains(CodePageRanges::KOREAN_WANSUNG));
}

#[test]
fn test_donor_hinting_stripped() {
    let mut donor = korean_subset();
    if let Outline::Simple { instructions, .. } = &mut donor.glyphs[1].outline {
        *instructions = vec![0xB0, 0x01];
    }
    let merged = merge_fonts(fixtures::latin_font(), &donor).unwrap();
    let Outline::Simple { instructions, .. } = &merged.glyph_for_char(0xAC00).unwrap().outline
    else {
        panic!("expected simple glyph");
    };
    assert!(instructions.is_empty());

    let kept = Merger::new(Options::new().strip_donor_hinting(false))
        .merge(fixtures::latin_font(), &donor)
        .unwrap();
    assert!(matches!(
        &kept.font.glyph_for_char(0xAC00).unwrap().outline,
        Outline::Simple { instructions, .. } if instructions.len() == 2
    ));
}

#[test]
fn test_glyph_count_dependent_tables_dropped() {
    let mut latin = fixtures::latin_font();
    latin.tables.insert(Tag::new(b"hdmx"), vec![0; 8]);

    let merged = Merger::default().merge(latin, &korean_subset()).unwrap();
    assert_eq!(merged.report.dropped_tables, vec![Tag::new(b"hdmx")]);
    assert!(!merged.font.has_table(Tag::new(b"hdmx")));
    assert!(merged.font.has_table(Tag::new(b"GSUB")));
}

#[test]
fn test_merged_font_encodes() {
    let merged = merge_fonts(fixtures::latin_font(), &korean_subset()).unwrap();
    let bytes = merged.to_bytes().unwrap();
    let font_ref = FontRef::new(&bytes).unwrap();

    let cmap = font_ref.cmap().unwrap();
    assert!(cmap.map_codepoint(0x41u32).is_some());
    assert!(cmap.map_codepoint(0xAC00u32).is_some());
    let hmtx = font_ref.hmtx().unwrap();
    let gid = cmap.map_codepoint(0xAC00u32).unwrap();
    assert_eq!(hmtx.advance(gid), Some(fixtures::KOREAN_ADVANCE));
}
