//! Options for font merging

use boncode_font_model::Tag;

/// Tables indexed by glyph id that the merger does not rebuild. Carrying them
/// over from the base would leave them describing the wrong glyph count.
pub const GLYPH_COUNT_DEPENDENT_TABLES: [Tag; 6] = [
    Tag::new(b"vhea"),
    Tag::new(b"vmtx"),
    Tag::new(b"VORG"),
    Tag::new(b"hdmx"),
    Tag::new(b"LTSH"),
    Tag::new(b"DSIG"),
];

#[derive(Debug, Clone)]
pub struct Options {
    /// Tables to drop from the merged font
    pub drop_tables: Vec<Tag>,

    /// Remove per-glyph instructions from imported donor glyphs
    pub strip_donor_hinting: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { drop_tables: GLYPH_COUNT_DEPENDENT_TABLES.to_vec(), strip_donor_hinting: true }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table to drop. Tags shorter than four bytes are space padded;
    /// anything that is not a valid tag is ignored.
    pub fn drop_table(mut self, table: impl AsRef<str>) -> Self {
        if let Some(tag) = parse_tag(table.as_ref()) {
            if !self.drop_tables.contains(&tag) {
                self.drop_tables.push(tag);
            }
        }
        self
    }

    pub fn strip_donor_hinting(mut self, strip: bool) -> Self {
        self.strip_donor_hinting = strip;
        self
    }

    pub fn should_drop(&self, tag: Tag) -> bool {
        self.drop_tables.contains(&tag)
    }
}

fn parse_tag(s: &str) -> Option<Tag> {
    if s.is_empty() || s.len() > 4 {
        return None;
    }
    let mut bytes = [b' '; 4];
    bytes[..s.len()].copy_from_slice(s.as_bytes());
    Tag::new_checked(&bytes).ok()
}
