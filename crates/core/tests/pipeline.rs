//! End-to-end builds over synthetic sources in a scratch project.

use std::{fs, io, path::Path};

use boncode_core::{BuildConfig, BuildError, PipelineContext, Target, build, build_target};
use boncode_font_instancer::{Instancer, InstancerError};
use boncode_font_model::{SelectionFlags, Tag, fixtures, name, read_font, write_font};
use tempfile::TempDir;

const CONFIG: &str = r#"{
    "familyPrefix": "Bon",
    "korean": { "sourcePath": "sources/Korean", "filePrefix": "Korean" },
    "fonts": {
        "Mono": {
            "displayName": "Test Mono",
            "sourcePath": "sources/Mono",
            "monoWidth": 1200,
            "weights": {
                "Regular": { "available": true },
                "Bold": { "available": true, "latinSource": "Regular" }
            },
            "koreanAdjustments": { "forceMonoWidth": true, "centerInCell": true }
        },
        "Var": {
            "displayName": "Test Var",
            "sourcePath": "sources/Var",
            "isVariable": true,
            "variableFontFiles": { "regular": "Var[wght].ttf" },
            "weights": { "Medium": { "available": true, "koreanSource": "Regular" } }
        }
    }
}"#;

struct MissingFontTools;

impl Instancer for MissingFontTools {
    fn instantiate(&self, _: &Path, _: u16, _: &Path) -> Result<(), InstancerError> {
        Err(InstancerError::Spawn {
            program: "fonttools".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not installed"),
        })
    }
}

fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_font(root.join("sources/Mono/Mono-Regular.ttf"), &fixtures::latin_font()).unwrap();
    write_font(root.join("sources/Korean/Korean-Regular.ttf"), &fixtures::korean_font()).unwrap();
    write_font(root.join("sources/Korean/Korean-Bold.ttf"), &fixtures::korean_font()).unwrap();

    let mut variable = fixtures::latin_font();
    variable.tables.insert(Tag::new(b"fvar"), vec![0; 16]);
    variable.tables.insert(Tag::new(b"gvar"), vec![0; 16]);
    write_font(root.join("sources/Var/Var[wght].ttf"), &variable).unwrap();
    dir
}

fn context(root: &Path) -> PipelineContext {
    let config = BuildConfig::from_json(CONFIG).unwrap();
    PipelineContext::new(
        config,
        root.to_path_buf(),
        root.join(".build"),
        root.join("out"),
        Some("1.002".to_string()),
    )
    .unwrap()
    .with_instancer(MissingFontTools)
}

#[test]
fn test_static_family_builds_hybrid() {
    let dir = project();
    let ctx = context(dir.path());

    let report = build(&ctx, &["Mono".to_string()]).unwrap();
    assert_eq!(report.batch().succeeded, 2);
    assert!(report.batch().ok_or_bail("build").is_ok());

    let regular = read_font(dir.path().join("out/Mono/Bon-Mono-Regular.ttf")).unwrap();
    let latin_a = fixtures::latin_font().glyph_for_char(0x41).cloned().unwrap();
    assert_eq!(regular.glyph_for_char(0x41).unwrap().advance, latin_a.advance);
    assert_eq!(regular.glyph_for_char(0xAC00).unwrap().advance, 1200);
    assert_eq!(regular.names.get(name::FAMILY), Some("Bon Test Mono"));
    assert_eq!(regular.names.get(name::POSTSCRIPT_NAME), Some("BonTestMono-Regular"));
    assert!(regular.meta.is_some());
    assert_eq!(regular.os2.as_ref().unwrap().x_avg_char_width, 1200);

    let bold = read_font(dir.path().join("out/Mono/Bon-Mono-Bold.ttf")).unwrap();
    let os2 = bold.os2.as_ref().unwrap();
    assert_eq!(os2.us_weight_class, 700);
    assert!(os2.fs_selection.contains(SelectionFlags::BOLD));
    assert_eq!(bold.names.get(name::SUBFAMILY), Some("Bold"));

    // Intermediates are kept for inspection.
    assert!(dir.path().join(".build/korean/Mono-Bold.ttf").is_file());
}

#[test]
fn test_missing_source_fails_only_its_target() {
    let dir = project();
    fs::remove_file(dir.path().join("sources/Korean/Korean-Bold.ttf")).unwrap();
    let ctx = context(dir.path());

    let report = build(&ctx, &["Mono".to_string()]).unwrap();
    let batch = report.batch();
    assert_eq!((batch.succeeded, batch.failed), (1, 1));
    assert!(batch.ok_or_bail("build").is_err());

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures[0].0, &Target::new("Mono", "Bold", false));
    assert!(matches!(failures[0].1, BuildError::MissingInput(_)));

    assert!(dir.path().join("out/Mono/Bon-Mono-Regular.ttf").is_file());
    assert!(!dir.path().join("out/Mono/Bon-Mono-Bold.ttf").exists());
}

#[test]
fn test_variable_fallback_is_degraded() {
    let dir = project();
    let ctx = context(dir.path());

    let report = build_target(&ctx, &Target::new("Var", "Medium", false)).unwrap();
    let degraded = report.degraded.as_ref().unwrap();
    assert_eq!(degraded.requested_weight, 500);

    let font = read_font(&report.output).unwrap();
    assert!(!font.has_table(Tag::new(b"fvar")));
    assert!(!font.has_table(Tag::new(b"gvar")));
    assert_eq!(font.os2.as_ref().unwrap().us_weight_class, 500);
    assert_eq!(font.names.get(name::FAMILY), Some("Bon Test Var Medium"));
}

#[test]
fn test_configuration_error_before_any_work() {
    let dir = project();
    let ctx = context(dir.path());

    let err = build(&ctx, &["Nope".to_string()]).unwrap_err();
    assert!(err.is_configuration());
    assert!(!dir.path().join("out").exists());
    assert!(!dir.path().join(".build").exists());
}
