//! Expansion of the configuration into independent build targets.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use boncode_font_metadata::style::WEIGHT_TOKENS;

use crate::{
    config::{BuildConfig, FamilyConfig, style_file_name, style_name},
    error::BuildError,
};

/// One output font: a family in one weight, upright or italic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target {
    pub family: String,
    pub weight: String,
    pub italic: bool,
}

impl Target {
    pub fn new(family: impl Into<String>, weight: impl Into<String>, italic: bool) -> Self {
        Self { family: family.into(), weight: weight.into(), italic }
    }

    pub fn style_name(&self) -> String {
        style_name(&self.weight, self.italic)
    }

    pub fn style_file_name(&self) -> String {
        style_file_name(&self.weight, self.italic)
    }

    /// `{out}/{Family}/{prefix}-{Family}-{Style}.ttf`
    pub fn output_path(&self, out_dir: &Path, prefix: &str) -> PathBuf {
        out_dir
            .join(&self.family)
            .join(format!("{prefix}-{}-{}.ttf", self.family, self.style_file_name()))
    }

    /// Stem of intermediate files, e.g. `JetBrainsMono-SemiBold-Italic`.
    pub fn intermediate_stem(&self, weight: &str) -> String {
        if self.italic {
            format!("{}-{weight}-Italic", self.family)
        } else {
            format!("{}-{weight}", self.family)
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.style_name())
    }
}

/// Every available (weight, italic) combination of the selected families,
/// or of all families when `families` is empty.
///
/// Problems in the configuration are reported here, before any work starts.
pub fn plan_targets(config: &BuildConfig, families: &[String]) -> Result<Vec<Target>, BuildError> {
    let selected: Vec<(&String, &FamilyConfig)> = if families.is_empty() {
        config.fonts.iter().collect()
    } else {
        families
            .iter()
            .map(|key| config.family(key).map(|family| (key, family)))
            .collect::<Result<_, _>>()?
    };

    let mut targets = Vec::new();
    for (key, family) in selected {
        validate_family(key, family)?;
        let mut weights: Vec<&String> =
            family.weights.iter().filter(|(_, w)| w.available).map(|(name, _)| name).collect();
        weights.sort_by_key(|w| WEIGHT_TOKENS.iter().position(|t| *t == w.as_str()));

        for weight in weights {
            targets.push(Target::new(key.as_str(), weight.as_str(), false));
            if family.has_italic {
                targets.push(Target::new(key.as_str(), weight.as_str(), true));
            }
        }
    }

    if targets.is_empty() {
        return Err(BuildError::Configuration("no available weights to build".to_string()));
    }
    Ok(targets)
}

fn validate_family(key: &str, family: &FamilyConfig) -> Result<(), BuildError> {
    if family.is_variable && family.variable_font_files.is_none() {
        return Err(BuildError::Configuration(format!(
            "font {key} is variable but has no variableFontFiles"
        )));
    }
    for (weight, config) in &family.weights {
        let names = [Some(weight), config.latin_source.as_ref(), config.korean_source.as_ref()];
        for name in names.into_iter().flatten() {
            if !WEIGHT_TOKENS.contains(&name.as_str()) {
                return Err(BuildError::Configuration(format!(
                    "font {key}: unknown weight name '{name}'"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(extra: &str) -> BuildConfig {
        let json = format!(
            r#"{{
                "korean": {{ "sourcePath": "k", "filePrefix": "K" }},
                "fonts": {{
                    "Mono": {{
                        "displayName": "Mono",
                        "sourcePath": "m",
                        "hasItalic": true,
                        "weights": {{
                            "Bold": {{ "available": true }},
                            "Regular": {{ "available": true }},
                            "Thin": {{ "available": false }}
                        }}
                    }}{extra}
                }}
            }}"#
        );
        BuildConfig::from_json(&json).unwrap()
    }

    #[test]
    fn test_plan_all() {
        let targets = plan_targets(&config(""), &[]).unwrap();
        assert_eq!(
            targets,
            vec![
                Target::new("Mono", "Regular", false),
                Target::new("Mono", "Regular", true),
                Target::new("Mono", "Bold", false),
                Target::new("Mono", "Bold", true),
            ]
        );
    }

    #[test]
    fn test_unknown_family_is_configuration_error() {
        let err = plan_targets(&config(""), &["Sans".to_string()]).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_variable_without_files_rejected() {
        let extra = r#", "Var": { "displayName": "Var", "sourcePath": "v", "isVariable": true,
            "weights": { "Regular": { "available": true } } }"#;
        let err = plan_targets(&config(extra), &["Var".to_string()]).unwrap_err();
        assert!(err.is_configuration());
        // The other family still plans.
        assert_eq!(plan_targets(&config(extra), &["Mono".to_string()]).unwrap().len(), 4);
    }

    #[test]
    fn test_unknown_weight_rejected() {
        let extra = r#", "Odd": { "displayName": "Odd", "sourcePath": "o",
            "weights": { "Regular": { "available": true, "latinSource": "Heavy" } } }"#;
        assert!(plan_targets(&config(extra), &[]).unwrap_err().is_configuration());
    }

    #[test]
    fn test_output_path() {
        let target = Target::new("JetBrainsMono", "Regular", true);
        assert_eq!(
            target.output_path(Path::new("out"), "Bon"),
            Path::new("out/JetBrainsMono/Bon-JetBrainsMono-Italic.ttf")
        );
        assert_eq!(target.to_string(), "JetBrainsMono Italic");
        assert_eq!(target.intermediate_stem("SemiBold"), "JetBrainsMono-SemiBold-Italic");
    }
}
