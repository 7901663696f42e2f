//! Language tag maps of the `meta` table.
//!
//! The table itself is the owned `write-fonts` [`Meta`]; [`LanguageTags`]
//! reads and replaces its `dlng`/`slng` records and leaves every other map
//! as it was.

use font_types::Tag;
pub use write_fonts::tables::meta::{DLNG, DataMapRecord, Meta, Metadata, SLNG, ScriptLangTag};

pub trait LanguageTags {
    /// A `meta` table holding only design and supported script tags.
    fn from_tags(default: &[&str], supported: &[&str]) -> Self
    where
        Self: Sized;

    /// Tags of the `dlng` or `slng` map; empty when the map is absent.
    fn script_tags(&self, tag: Tag) -> Vec<&str>;

    /// Replace (or add) the `dlng` or `slng` map.
    fn set_script_tags(&mut self, tag: Tag, tags: &[&str]);

    fn default_tags(&self) -> Vec<&str> {
        self.script_tags(DLNG)
    }

    fn supported_tags(&self) -> Vec<&str> {
        self.script_tags(SLNG)
    }
}

impl LanguageTags for Meta {
    fn from_tags(default: &[&str], supported: &[&str]) -> Self {
        let mut meta = Meta::default();
        meta.set_script_tags(DLNG, default);
        meta.set_script_tags(SLNG, supported);
        meta
    }

    fn script_tags(&self, tag: Tag) -> Vec<&str> {
        self.data_maps
            .iter()
            .filter(|record| record.tag == tag)
            .flat_map(|record| match &*record.data {
                Metadata::ScriptLangTags(tags) => tags.iter().map(ScriptLangTag::as_str).collect(),
                Metadata::Other(_) => Vec::new(),
            })
            .collect()
    }

    fn set_script_tags(&mut self, tag: Tag, tags: &[&str]) {
        let tags = tags.iter().filter_map(|t| ScriptLangTag::new(t.to_string()).ok()).collect();
        let record = DataMapRecord::new(tag, Metadata::ScriptLangTags(tags));
        // The new map takes the place of the first old one.
        let at = self.data_maps.iter().position(|r| r.tag == tag);
        self.data_maps.retain(|r| r.tag != tag);
        let index = at.unwrap_or(self.data_maps.len());
        self.data_maps.insert(index, record);
    }
}
