//! Character map decoding and format 12 encoding.

use std::collections::{BTreeMap, BTreeSet};

use read_fonts::tables::cmap::{Cmap as ReadCmap, CmapSubtable, PlatformId};
use write_fonts::tables::cmap::{
    Cmap, Cmap12, CmapSubtable as WriteCmapSubtable, EncodingRecord,
    PlatformId as WritePlatformId, SequentialMapGroup,
};

use crate::types::GlyphId;

/// Unicode code point to glyph mapping. Several code points may share a glyph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterMap(BTreeMap<u32, GlyphId>);

impl CharacterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, codepoint: u32) -> Option<GlyphId> {
        self.0.get(&codepoint).copied()
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.0.contains_key(&codepoint)
    }

    pub fn insert(&mut self, codepoint: u32, gid: GlyphId) -> Option<GlyphId> {
        self.0.insert(codepoint, gid)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, GlyphId)> + '_ {
        self.0.iter().map(|(cp, gid)| (*cp, *gid))
    }

    /// Keep only the code points accepted by `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(u32) -> bool) {
        self.0.retain(|cp, _| keep(*cp));
    }

    /// Rewrite every glyph id, dropping entries the mapper rejects.
    pub fn remap(&mut self, mut map: impl FnMut(GlyphId) -> Option<GlyphId>) {
        self.0 = self.0.iter().filter_map(|(cp, gid)| Some((*cp, map(*gid)?))).collect();
    }

    /// The distinct glyphs reachable from any code point.
    pub fn glyph_ids(&self) -> BTreeSet<GlyphId> {
        self.0.values().copied().collect()
    }

    pub(crate) fn from_read(cmap: &ReadCmap) -> Self {
        let mut map = Self::new();
        if let Some(subtable) = find_best_subtable(cmap) {
            for (cp, gid) in iter_cmap_subtable(&subtable) {
                map.0.entry(cp).or_insert(gid);
            }
        }
        map
    }

    /// Build a cmap with a single format 12 subtable shared by the Unicode
    /// and Windows full-repertoire encodings.
    pub(crate) fn to_write(&self) -> Cmap {
        let mappings: Vec<(u32, u32)> = self.iter().map(|(cp, gid)| (cp, gid.to_u32())).collect();
        let cmap12 = Cmap12 { language: 0, groups: build_sequential_groups(&mappings) };
        Cmap::new(vec![
            EncodingRecord::new(
                WritePlatformId::Unicode,
                4,
                WriteCmapSubtable::Format12(cmap12.clone()),
            ),
            EncodingRecord::new(WritePlatformId::Windows, 10, WriteCmapSubtable::Format12(cmap12)),
        ])
    }
}

impl FromIterator<(u32, GlyphId)> for CharacterMap {
    fn from_iter<T: IntoIterator<Item = (u32, GlyphId)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Groups consecutive code points that map to consecutive glyph ids.
fn build_sequential_groups(mappings: &[(u32, u32)]) -> Vec<SequentialMapGroup> {
    let mut groups = Vec::new();
    let mut iter = mappings.iter().copied();
    let Some((mut start_cp, mut start_gid)) = iter.next() else {
        return groups;
    };
    let (mut prev_cp, mut prev_gid) = (start_cp, start_gid);

    for (cp, gid) in iter {
        if cp == prev_cp + 1 && gid == prev_gid + 1 {
            prev_cp = cp;
            prev_gid = gid;
            continue;
        }
        groups.push(SequentialMapGroup::new(start_cp, prev_cp, start_gid));
        (start_cp, start_gid) = (cp, gid);
        (prev_cp, prev_gid) = (cp, gid);
    }
    groups.push(SequentialMapGroup::new(start_cp, prev_cp, start_gid));
    groups
}

/// Prefer a full-repertoire format 12 subtable, then a BMP format 4, then anything.
fn find_best_subtable<'a>(cmap: &ReadCmap<'a>) -> Option<CmapSubtable<'a>> {
    let records = cmap.encoding_records();
    let is_unicode = |platform: PlatformId, encoding: u16, windows_encoding: u16| {
        platform == PlatformId::Unicode
            || (platform == PlatformId::Windows && encoding == windows_encoding)
    };

    let find = |windows_encoding: u16, want: fn(&CmapSubtable) -> bool| {
        records.iter().find_map(|record| {
            if !is_unicode(record.platform_id(), record.encoding_id(), windows_encoding) {
                return None;
            }
            record.subtable(cmap.offset_data()).ok().filter(|s| want(s))
        })
    };

    find(10, |s| matches!(s, CmapSubtable::Format12(_)))
        .or_else(|| find(1, |s| matches!(s, CmapSubtable::Format4(_))))
        .or_else(|| records.iter().find_map(|r| r.subtable(cmap.offset_data()).ok()))
}

fn iter_cmap_subtable(subtable: &CmapSubtable) -> Vec<(u32, GlyphId)> {
    let mut mappings = Vec::new();

    match subtable {
        CmapSubtable::Format4(f4) => {
            for (cp, gid) in f4.iter() {
                if gid.to_u32() != 0 {
                    mappings.push((cp, GlyphId::new(gid.to_u32() as u16)));
                }
            }
        }
        CmapSubtable::Format12(f12) => {
            for group in f12.groups() {
                let mut gid = group.start_glyph_id();
                for cp in group.start_char_code()..=group.end_char_code() {
                    if gid != 0 && gid <= u16::MAX as u32 {
                        mappings.push((cp, GlyphId::new(gid as u16)));
                    }
                    gid += 1;
                }
            }
        }
        CmapSubtable::Format6(f6) => {
            let first = f6.first_code() as u32;
            for (i, gid) in f6.glyph_id_array().iter().enumerate() {
                let gid = gid.get();
                if gid != 0 {
                    mappings.push((first + i as u32, GlyphId::new(gid)));
                }
            }
        }
        _ => {}
    }

    mappings
}
