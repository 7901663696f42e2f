//! Build configuration, loaded from `config/base-config.json`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use boncode_font_metadata::LabelMapping;
use boncode_korean_extractor::{GlyphTransform, KoreanExtractor, WidthPolicy};
use serde::Deserialize;

use crate::error::BuildError;

/// Default configuration file, relative to the project root.
pub const DEFAULT_CONFIG_PATH: &str = "config/base-config.json";

pub const DEFAULT_MONO_WIDTH: u16 = 1200;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Prefix of output family names and file names ("Bon").
    #[serde(default = "default_family_prefix")]
    pub family_prefix: String,
    pub korean: KoreanSourceConfig,
    pub fonts: BTreeMap<String, FamilyConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KoreanSourceConfig {
    pub source_path: PathBuf,
    pub file_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyConfig {
    pub display_name: String,
    /// File stem of the static Latin sources, when it differs from the key.
    #[serde(default)]
    pub family_name: Option<String>,
    pub source_path: PathBuf,
    #[serde(default)]
    pub is_variable: bool,
    #[serde(default)]
    pub variable_font_files: Option<VariableFontFiles>,
    #[serde(default)]
    pub has_italic: bool,
    #[serde(default = "default_mono_width")]
    pub mono_width: u16,
    pub weights: BTreeMap<String, WeightConfig>,
    #[serde(default)]
    pub korean_adjustments: KoreanAdjustments,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableFontFiles {
    pub regular: String,
    #[serde(default)]
    pub italic: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightConfig {
    #[serde(default)]
    pub available: bool,
    /// Latin weight whose outlines this weight is built from.
    #[serde(default)]
    pub latin_source: Option<String>,
    /// Korean weight whose outlines this weight is built from.
    #[serde(default)]
    pub korean_source: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KoreanAdjustments {
    pub scale_to_match_height: bool,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
    pub offset_x: f64,
    pub offset_y: f64,
    pub force_mono_width: bool,
    pub use_native_width: bool,
    pub target_width: Option<u16>,
    pub center_in_cell: bool,
}

fn default_family_prefix() -> String {
    "Bon".to_string()
}

fn default_mono_width() -> u16 {
    DEFAULT_MONO_WIDTH
}

impl BuildConfig {
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                BuildError::MissingInput(path.to_path_buf())
            } else {
                BuildError::Io { path: path.to_path_buf(), source }
            }
        })?;
        Self::from_json(&text)
            .map_err(|e| BuildError::Configuration(format!("{}: {e}", path.display())))
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn family(&self, key: &str) -> Result<&FamilyConfig, BuildError> {
        self.fonts
            .get(key)
            .ok_or_else(|| BuildError::Configuration(format!("unknown font family '{key}'")))
    }

    /// Path of the Korean source for `weight`, e.g. `SarasaFixedK-BoldItalic.ttf`.
    pub fn korean_source(&self, weight: &str, italic: bool) -> PathBuf {
        let style = style_file_name(weight, italic);
        self.korean.source_path.join(format!("{}-{style}.ttf", self.korean.file_prefix))
    }
}

impl FamilyConfig {
    /// Weights built from another Latin weight, whose STAT labels may still
    /// name the source weight.
    pub fn label_mapping(&self) -> Option<LabelMapping> {
        LabelMapping::from_pairs(self.weights.iter().filter_map(|(weight, config)| {
            config.latin_source.as_ref().map(|source| (weight.clone(), source.clone()))
        }))
    }

    pub fn latin_weight<'a>(&'a self, weight: &'a str) -> &'a str {
        self.weights.get(weight).and_then(|w| w.latin_source.as_deref()).unwrap_or(weight)
    }

    pub fn korean_weight<'a>(&'a self, weight: &'a str) -> &'a str {
        self.weights.get(weight).and_then(|w| w.korean_source.as_deref()).unwrap_or(weight)
    }

    /// Static Latin source for `weight`, e.g. `JetBrainsMonoNL-BoldItalic.ttf`.
    pub fn static_source(&self, key: &str, weight: &str, italic: bool) -> PathBuf {
        let stem = self.family_name.as_deref().unwrap_or(key);
        let style = style_file_name(weight, italic);
        self.source_path.join(format!("{stem}-{style}.ttf"))
    }

    /// Variable Latin source; the italic file when there is one.
    pub fn variable_source(&self, italic: bool) -> Option<PathBuf> {
        let files = self.variable_font_files.as_ref()?;
        let name = match (&files.italic, italic) {
            (Some(italic_file), true) => italic_file,
            _ => &files.regular,
        };
        Some(self.source_path.join(name))
    }

    pub fn korean_extractor(&self) -> KoreanExtractor {
        let adjust = &self.korean_adjustments;
        let scale_x = adjust.scale_x();
        let mut extractor = KoreanExtractor::new()
            .with_width_policy(WidthPolicy::select(
                adjust.force_mono_width.then_some(self.mono_width),
                adjust.use_native_width,
                adjust.target_width.filter(|w| *w > 0),
                scale_x,
            ))
            .center_in_cell(adjust.center_in_cell);
        if adjust.scale_to_match_height {
            extractor = extractor.with_transform(GlyphTransform {
                scale_x,
                scale_y: adjust.scale_y(),
                offset_x: adjust.offset_x,
                offset_y: adjust.offset_y,
            });
        }
        extractor
    }
}

impl KoreanAdjustments {
    /// Horizontal scale; missing or zero means 1.
    pub fn scale_x(&self) -> f64 {
        self.scale_x.filter(|s| *s != 0.0).unwrap_or(1.0)
    }

    pub fn scale_y(&self) -> f64 {
        self.scale_y.filter(|s| *s != 0.0).unwrap_or(1.0)
    }
}

/// Style part of file names: `Bold`, `BoldItalic`, and `Italic` for an
/// italic Regular.
pub fn style_file_name(weight: &str, italic: bool) -> String {
    match (weight, italic) {
        ("Regular", true) => "Italic".to_string(),
        (_, true) => format!("{weight}Italic"),
        (_, false) => weight.to_string(),
    }
}

/// Style name written into the font: `Bold Italic`, or `Italic` for an
/// italic Regular.
pub fn style_name(weight: &str, italic: bool) -> String {
    match (weight, italic) {
        ("Regular", true) => "Italic".to_string(),
        (_, true) => format!("{weight} Italic"),
        (_, false) => weight.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "korean": { "sourcePath": "sources/SarasaFixedK", "filePrefix": "SarasaFixedK" },
        "fonts": {
            "JetBrainsMono": {
                "displayName": "JetBrains Mono",
                "familyName": "JetBrainsMonoNL",
                "sourcePath": "sources/JetBrainsMono",
                "hasItalic": true,
                "weights": {
                    "Regular": { "available": true },
                    "Bold": { "available": true, "latinSource": "SemiBold", "koreanSource": "Regular" }
                },
                "koreanAdjustments": { "scaleToMatchHeight": true, "scaleX": 1.2, "forceMonoWidth": true }
            },
            "GoogleSansCodeVariable": {
                "displayName": "Google Sans Code",
                "sourcePath": "sources/GoogleSansCode",
                "isVariable": true,
                "variableFontFiles": { "regular": "GoogleSansCode[wght].ttf" },
                "monoWidth": 1100,
                "weights": { "Light": { "available": true } }
            }
        }
    }"#;

    fn config() -> BuildConfig {
        BuildConfig::from_json(CONFIG).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert_eq!(config.family_prefix, "Bon");
        let jb = config.family("JetBrainsMono").unwrap();
        assert_eq!(jb.mono_width, DEFAULT_MONO_WIDTH);
        assert!(!jb.is_variable);
        assert_eq!(jb.korean_adjustments.scale_y(), 1.0);
        assert!(config.family("Nope").is_err());
    }

    #[test]
    fn test_source_paths() {
        let config = config();
        let jb = config.family("JetBrainsMono").unwrap();
        assert_eq!(jb.latin_weight("Bold"), "SemiBold");
        assert_eq!(jb.korean_weight("Bold"), "Regular");
        assert_eq!(
            jb.static_source("JetBrainsMono", "Regular", true),
            Path::new("sources/JetBrainsMono/JetBrainsMonoNL-Italic.ttf")
        );
        assert_eq!(
            config.korean_source("Bold", true),
            Path::new("sources/SarasaFixedK/SarasaFixedK-BoldItalic.ttf")
        );

        let google = config.family("GoogleSansCodeVariable").unwrap();
        // No italic file: the regular one is used.
        assert_eq!(
            google.variable_source(true),
            Some(PathBuf::from("sources/GoogleSansCode/GoogleSansCode[wght].ttf"))
        );
    }

    #[test]
    fn test_label_mapping() {
        let config = config();
        let mapping = config.family("JetBrainsMono").unwrap().label_mapping().unwrap();
        assert_eq!(mapping.sources.get("Bold").map(String::as_str), Some("SemiBold"));
        assert!(config.family("GoogleSansCodeVariable").unwrap().label_mapping().is_none());
    }

    #[test]
    fn test_style_names() {
        assert_eq!(style_file_name("Regular", true), "Italic");
        assert_eq!(style_file_name("Bold", true), "BoldItalic");
        assert_eq!(style_file_name("Light", false), "Light");
        assert_eq!(style_name("Regular", true), "Italic");
        assert_eq!(style_name("SemiBold", true), "SemiBold Italic");
    }

    #[test]
    fn test_malformed_json_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ \"fonts\": 3 }").unwrap();
        assert!(matches!(BuildConfig::load(&path), Err(BuildError::Configuration(_))));
        assert!(matches!(
            BuildConfig::load(&dir.path().join("absent.json")),
            Err(BuildError::MissingInput(_))
        ));
    }
}
