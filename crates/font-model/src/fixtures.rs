//! Small synthetic fonts assembled in memory for tests.

use std::collections::BTreeMap;

use font_types::{FWord, Fixed, LongDateTime, Tag, UfWord, Version16Dot16};
use write_fonts::tables::{
    head::{Flags, Head, MacStyle},
    hhea::Hhea,
    maxp::Maxp,
    os2::{Os2, SelectionFlags},
    post::Post,
};

use crate::{
    CharacterMap, Contour, Font, Glyph, GlyphId, NameRecord, NameTable, Outline, OutlinePoint,
    glyph::Component,
};

pub const LATIN_ADVANCE: u16 = 600;
pub const KOREAN_ADVANCE: u16 = 1000;

/// Mapped to a composite glyph in [`korean_font`].
pub const COMPOSITE_CHAR: u32 = 0xAC01;

/// A closed rectangular contour.
pub fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Contour {
    Contour(vec![
        OutlinePoint::new(x0, y0, true),
        OutlinePoint::new(x1, y0, true),
        OutlinePoint::new(x1, y1, true),
        OutlinePoint::new(x0, y1, true),
    ])
}

/// `.notdef`, `A` and `B`, all 600 units wide, with family "Latin Mono".
pub fn latin_font() -> Font {
    let glyphs = vec![
        Glyph::simple(".notdef", vec![square(50.0, 0.0, 550.0, 700.0)], LATIN_ADVANCE),
        Glyph::simple("A", vec![square(50.0, 0.0, 550.0, 700.0)], LATIN_ADVANCE),
        Glyph::simple("B", vec![square(60.0, 0.0, 540.0, 700.0)], LATIN_ADVANCE),
    ];
    let cmap = [(0x41, GlyphId::new(1)), (0x42, GlyphId::new(2))].into_iter().collect();
    build("Latin Mono", "Regular", glyphs, cmap, 1 << 0)
}

/// A donor with Hangul, CJK punctuation, a Latin `A`, a composite Hangul
/// syllable and an alias (U+3001 and U+3002 share a glyph).
pub fn korean_font() -> Font {
    let glyphs = vec![
        Glyph::simple(".notdef", vec![square(100.0, 0.0, 900.0, 800.0)], KOREAN_ADVANCE),
        Glyph::simple("uniAC00", vec![square(100.0, -100.0, 900.0, 800.0)], KOREAN_ADVANCE),
        Glyph::simple("uni3001", vec![square(100.0, 0.0, 300.0, 200.0)], KOREAN_ADVANCE),
        Glyph::simple("A", vec![square(0.0, 0.0, 500.0, 700.0)], 500),
        Glyph::simple("dot", vec![square(0.0, 0.0, 100.0, 100.0)], 0),
        Glyph::new(
            "uniAC01",
            Outline::Composite {
                components: vec![
                    Component::offset(GlyphId::new(4), 100, 0),
                    Component::offset(GlyphId::new(4), 700, 600),
                ],
            },
            KOREAN_ADVANCE,
        ),
    ];
    let cmap = [
        (0xAC00, GlyphId::new(1)),
        (0x3001, GlyphId::new(2)),
        (0x3002, GlyphId::new(2)),
        (0x41, GlyphId::new(3)),
        (COMPOSITE_CHAR, GlyphId::new(5)),
    ]
    .into_iter()
    .collect();
    build("Korean Fixed", "Regular", glyphs, cmap, 1 << 19)
}

fn build(family: &str, style: &str, glyphs: Vec<Glyph>, cmap: CharacterMap, code_pages: u32) -> Font {
    let num_glyphs = glyphs.len() as u16;
    let mut records = Vec::new();
    for (platform_id, encoding_id, language_id) in [(1, 0, 0), (3, 1, 0x409)] {
        for (name_id, value) in [
            (1, family.to_string()),
            (2, style.to_string()),
            (4, format!("{family} {style}")),
            (6, format!("{}-{style}", family.replace(' ', ""))),
        ] {
            records.push(NameRecord {
                platform_id,
                encoding_id,
                language_id,
                name_id,
                value,
            });
        }
    }

    Font {
        glyphs,
        cmap,
        names: NameTable::new(records),
        head: Head {
            font_revision: Fixed::from_f64(1.0),
            checksum_adjustment: 0,
            magic_number: 0x5F0F3CF5,
            flags: Flags::empty(),
            units_per_em: 1000,
            created: LongDateTime::new(0),
            modified: LongDateTime::new(0),
            x_min: 0,
            y_min: 0,
            x_max: 0,
            y_max: 0,
            mac_style: MacStyle::empty(),
            lowest_rec_ppem: 8,
            font_direction_hint: 2,
            index_to_loc_format: 0,
        },
        hhea: Hhea {
            ascender: FWord::new(800),
            descender: FWord::new(-200),
            line_gap: FWord::new(0),
            advance_width_max: UfWord::new(0),
            min_left_side_bearing: FWord::new(0),
            min_right_side_bearing: FWord::new(0),
            x_max_extent: FWord::new(0),
            caret_slope_rise: 1,
            caret_slope_run: 0,
            caret_offset: 0,
            number_of_h_metrics: num_glyphs,
        },
        maxp: Maxp {
            num_glyphs,
            max_points: Some(0),
            max_contours: Some(0),
            max_composite_points: Some(0),
            max_composite_contours: Some(0),
            max_zones: Some(1),
            max_twilight_points: Some(0),
            max_storage: Some(0),
            max_function_defs: Some(0),
            max_instruction_defs: Some(0),
            max_stack_elements: Some(0),
            max_size_of_instructions: Some(0),
            max_component_elements: Some(0),
            max_component_depth: Some(0),
        },
        post: Some(Post {
            version: Version16Dot16::VERSION_3_0,
            italic_angle: Fixed::from_f64(0.0),
            underline_position: FWord::new(-100),
            underline_thickness: FWord::new(50),
            is_fixed_pitch: 0,
            min_mem_type42: 0,
            max_mem_type42: 0,
            min_mem_type1: 0,
            max_mem_type1: 0,
            num_glyphs: None,
            glyph_name_index: None,
            string_data: None,
        }),
        os2: Some(os2(code_pages)),
        meta: None,
        tables: BTreeMap::from([(Tag::new(b"GSUB"), vec![0, 1, 0, 0, 0, 10, 0, 12, 0, 14])]),
    }
}

fn os2(code_pages: u32) -> Os2 {
    Os2 {
        x_avg_char_width: 600,
        us_weight_class: 400,
        us_width_class: 5,
        fs_type: 0,
        y_subscript_x_size: 650,
        y_subscript_y_size: 600,
        y_subscript_x_offset: 0,
        y_subscript_y_offset: 75,
        y_superscript_x_size: 650,
        y_superscript_y_size: 600,
        y_superscript_x_offset: 0,
        y_superscript_y_offset: 350,
        y_strikeout_size: 50,
        y_strikeout_position: 300,
        s_family_class: 0,
        panose_10: [2, 11, 5, 3, 0, 0, 0, 0, 0, 0],
        ul_unicode_range_1: 1,
        ul_unicode_range_2: 0,
        ul_unicode_range_3: 0,
        ul_unicode_range_4: 0,
        ach_vend_id: Tag::new(b"NONE"),
        fs_selection: SelectionFlags::REGULAR,
        us_first_char_index: 0x20,
        us_last_char_index: 0xFFFF,
        s_typo_ascender: 800,
        s_typo_descender: -200,
        s_typo_line_gap: 0,
        us_win_ascent: 900,
        us_win_descent: 200,
        ul_code_page_range_1: Some(code_pages),
        ul_code_page_range_2: Some(0),
        sx_height: Some(500),
        s_cap_height: Some(700),
        us_default_char: Some(0),
        us_break_char: Some(0x20),
        us_max_context: Some(0),
        us_lower_optical_point_size: None,
        us_upper_optical_point_size: None,
    }
}
