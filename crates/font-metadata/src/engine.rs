//! Rewrites naming, weight, style and capability metadata of a merged font.

use boncode_font_model::{
    CodePageRanges, Font, LanguageTags, MacStyle, SelectionFlags,
    meta::{DLNG, SLNG},
    name::{self, FIRST_FONT_SPECIFIC, NameTable},
};
use log::{debug, info};
use write_fonts::tables::head::Flags;

use crate::{
    FontVersion,
    labels::{LabelContext, LabelMapping, reconcile_label},
    monospace::MonospaceSettings,
    style::{canonical_family, canonical_style, is_italic, strip_weight_tokens, weight_token},
    weight::{StyleFlags, panose_weight, round_weight_class, weight_value},
};

pub const COPYRIGHT: &str = "Copyright (c) 2025 Bon-Code-Fonts Project";
pub const TRADEMARK: &str = "Bon-Code-Fonts";
pub const MANUFACTURER: &str = "Bon-Code-Fonts Project";
pub const DESIGNER: &str = "Bon-Code-Fonts Team";

/// Code pages every hybrid font advertises.
pub const REQUIRED_CODE_PAGES: CodePageRanges = CodePageRanges(
    CodePageRanges::LATIN_1.0 | CodePageRanges::KOREAN_WANSUNG.0 | CodePageRanges::KOREAN_JOHAB.0,
);

/// head.flags bits 0-3: baseline at y=0, lsb at x=0, instructions depend on
/// point size, integer ppem.
const HEAD_FLAGS: u16 = 0x000F;

#[derive(Debug, Clone)]
pub struct MetadataRequest {
    pub family_name: String,
    pub style_name: String,
    pub version: FontVersion,
    pub postscript_prefix: String,
    /// `usWeightClass`; the font's own value rounded to 100 when absent.
    pub weight_class: Option<u16>,
    pub label_mapping: Option<LabelMapping>,
    pub monospace: MonospaceSettings,
}

impl MetadataRequest {
    pub fn new(
        family_name: impl Into<String>,
        style_name: impl Into<String>,
        version: FontVersion,
        postscript_prefix: impl Into<String>,
    ) -> Self {
        Self {
            family_name: family_name.into(),
            style_name: style_name.into(),
            version,
            postscript_prefix: postscript_prefix.into(),
            weight_class: None,
            label_mapping: None,
            monospace: MonospaceSettings::DEFAULT,
        }
    }

    pub fn with_weight_class(mut self, weight: u16) -> Self {
        self.weight_class = Some(weight);
        self
    }

    pub fn with_label_mapping(mut self, mapping: Option<LabelMapping>) -> Self {
        self.label_mapping = mapping;
        self
    }

    pub fn with_monospace(mut self, monospace: MonospaceSettings) -> Self {
        self.monospace = monospace;
        self
    }

    /// `<prefix>-<style>` with whitespace removed and anything outside
    /// `[A-Za-z0-9-]` dropped.
    pub fn postscript_name(&self) -> String {
        format!("{}-{}", self.postscript_prefix, self.style_name)
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect()
    }
}

/// Apply every reconciliation step. Tables other than name, OS/2, head,
/// post and meta are left alone, and applying the same request twice gives
/// the same font.
pub fn reconcile(mut font: Font, request: &MetadataRequest) -> Font {
    let style = request.style_name.as_str();
    rewrite_names(&mut font.names, request);
    rewrite_labels(&mut font.names, style, request.label_mapping.as_ref());

    let weight = match (request.weight_class, font.os2.as_ref()) {
        (Some(weight), _) => weight,
        (None, Some(os2)) => round_weight_class(os2.us_weight_class),
        (None, None) => weight_value(weight_token(style)),
    };
    apply_weight_style(&mut font, weight, is_italic(style));

    if let Some(os2) = font.os2.as_mut() {
        os2.fs_selection = (os2.fs_selection | SelectionFlags::USE_TYPO_METRICS) & !SelectionFlags::WWS;
        let pages = CodePageRanges::from_os2(os2) | REQUIRED_CODE_PAGES;
        pages.store(os2);
    }
    request.monospace.apply(&mut font);

    font.head.font_revision = request.version.revision();
    font.head.flags = Flags::from_bits_truncate(font.head.flags.bits() | HEAD_FLAGS);

    let mut meta = font.meta.take().unwrap_or_default();
    meta.set_script_tags(DLNG, &["Latn"]);
    meta.set_script_tags(SLNG, &["Kore"]);
    font.meta = Some(meta);

    info!(
        "Updated font metadata: {} {} (weight {weight})",
        request.family_name, request.style_name
    );
    font
}

/// Set `usWeightClass`, PANOSE weight, the fsSelection style bits and
/// `head.macStyle` for `weight` and `italic`.
pub fn apply_weight_style(font: &mut Font, weight: u16, italic: bool) {
    let flags = StyleFlags::derive(weight, italic);

    if let Some(os2) = font.os2.as_mut() {
        os2.us_weight_class = weight;
        os2.panose_10[2] = panose_weight(weight);

        let mut selection = os2.fs_selection
            & !(SelectionFlags::REGULAR | SelectionFlags::BOLD | SelectionFlags::ITALIC);
        if flags.regular {
            selection = selection | SelectionFlags::REGULAR;
        }
        if flags.bold {
            selection = selection | SelectionFlags::BOLD;
        }
        if flags.italic {
            selection = selection | SelectionFlags::ITALIC;
        }
        os2.fs_selection = selection;
    }

    let mut mac_style = font.head.mac_style & !(MacStyle::BOLD | MacStyle::ITALIC);
    if flags.bold {
        mac_style = mac_style | MacStyle::BOLD;
    }
    if flags.italic {
        mac_style = mac_style | MacStyle::ITALIC;
    }
    font.head.mac_style = mac_style;
}

fn rewrite_names(names: &mut NameTable, request: &MetadataRequest) {
    let style = request.style_name.as_str();
    let base_family = strip_weight_tokens(&request.family_name);
    let family = canonical_family(&request.family_name, style);
    let version = &request.version;

    names.set_all(name::FAMILY, &family);
    let fields = [
        (name::COPYRIGHT, COPYRIGHT.to_string()),
        (name::SUBFAMILY, canonical_style(style).to_string()),
        (name::UNIQUE_ID, format!("{base_family} {style} {}", version.tag)),
        (name::FULL_NAME, format!("{base_family} {style}")),
        (name::VERSION, version.version_string()),
        (name::POSTSCRIPT_NAME, request.postscript_name()),
        (name::TRADEMARK, TRADEMARK.to_string()),
        (name::MANUFACTURER, MANUFACTURER.to_string()),
        (name::DESIGNER, DESIGNER.to_string()),
        (name::TYPOGRAPHIC_FAMILY, request.family_name.clone()),
        (name::TYPOGRAPHIC_SUBFAMILY, style.to_string()),
    ];
    for (name_id, value) in &fields {
        names.upsert_alongside(name::FAMILY, *name_id, value);
    }
}

fn rewrite_labels(names: &mut NameTable, style: &str, mapping: Option<&LabelMapping>) {
    let ctx = LabelContext::new(style, mapping);
    names.map_records(|name_id, label| {
        if name_id < FIRST_FONT_SPECIFIC {
            return None;
        }
        let new = reconcile_label(label, &ctx)?;
        debug!("STAT label {name_id}: {label:?} -> {new:?}");
        Some(new)
    });
}

#[cfg(test)]
mod tests {
    use boncode_font_model::fixtures;

    use super::*;

    fn request(style: &str) -> MetadataRequest {
        let version = FontVersion::parse(Some("1.002")).unwrap();
        MetadataRequest::new("Bon JetBrains Mono", style, version, "BonJetBrainsMono")
    }

    #[test]
    fn test_postscript_name_has_no_whitespace() {
        assert_eq!(request("SemiBold Italic").postscript_name(), "BonJetBrainsMono-SemiBoldItalic");
    }

    #[test]
    fn test_postscript_name_drops_punctuation() {
        let version = FontVersion::parse(Some("1.002")).unwrap();
        let request = MetadataRequest::new("Bon Code (Beta)", "Regular", version, "BonCode(Beta)+");
        assert_eq!(request.postscript_name(), "BonCodeBeta-Regular");
    }

    #[test]
    fn test_macstyle_mirrors_flags() {
        let mut font = fixtures::latin_font();
        apply_weight_style(&mut font, 700, true);
        assert_eq!(font.head.mac_style, MacStyle::BOLD | MacStyle::ITALIC);
        apply_weight_style(&mut font, 400, false);
        assert_eq!(font.head.mac_style, MacStyle::empty());
    }

    #[test]
    fn test_names_written_for_every_family_triple() {
        let font = reconcile(fixtures::latin_font(), &request("Bold"));
        for id in [name::COPYRIGHT, name::DESIGNER, name::TYPOGRAPHIC_SUBFAMILY] {
            let count = font.names.records.iter().filter(|r| r.name_id == id).count();
            assert_eq!(count, 2, "name id {id}");
        }
    }
}
