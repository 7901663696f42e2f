use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use boncode_font_instancer::{
    Error, FontToolsInstancer, Instancer, VARIATION_TABLES, extract_instance,
};
use boncode_font_model::{Font, SelectionFlags, Tag, fixtures, name, read_font, write_font};
use tempfile::TempDir;

/// Writes a fixed font instead of running a tool, recording its calls.
struct FakeInstancer {
    output: Option<Font>,
    calls: Mutex<Vec<(PathBuf, u16)>>,
}

impl FakeInstancer {
    fn succeeding(font: Font) -> Self {
        Self { output: Some(font), calls: Mutex::new(Vec::new()) }
    }

    fn failing() -> Self {
        Self { output: None, calls: Mutex::new(Vec::new()) }
    }
}

impl Instancer for FakeInstancer {
    fn instantiate(&self, source: &Path, weight: u16, output: &Path) -> Result<(), Error> {
        self.calls.lock().unwrap().push((source.to_path_buf(), weight));
        match &self.output {
            Some(font) => Ok(write_font(output, font)?),
            None => Err(Error::Spawn {
                program: "fonttools".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
            }),
        }
    }
}

/// `fvar` with a single wght axis 100..900, default 400.
fn fvar() -> Vec<u8> {
    let mut data = Vec::new();
    for word in [1u16, 0, 16, 2, 1, 20, 0, 8] {
        data.extend_from_slice(&word.to_be_bytes());
    }
    data.extend_from_slice(b"wght");
    for value in [100i32, 400, 900] {
        data.extend_from_slice(&(value << 16).to_be_bytes());
    }
    data.extend_from_slice(&0u16.to_be_bytes());
    data.extend_from_slice(&256u16.to_be_bytes());
    data
}

fn variable_source(dir: &TempDir) -> PathBuf {
    let mut font = fixtures::latin_font();
    font.tables.insert(Tag::new(b"fvar"), fvar());
    for tag in [b"gvar", b"HVAR", b"MVAR", b"avar"] {
        font.tables.insert(Tag::new(tag), vec![0; 8]);
    }
    let path = dir.path().join("Latin[wght].ttf");
    write_font(&path, &font).unwrap();
    path
}

#[test]
fn test_primary_path_renames_instance() {
    let dir = tempfile::tempdir().unwrap();
    let source = variable_source(&dir);
    let instancer = FakeInstancer::succeeding(fixtures::latin_font());

    let instance = extract_instance(&instancer, &source, "Bold", false).unwrap();
    assert!(!instance.is_degraded());
    assert_eq!(instancer.calls.lock().unwrap().as_slice(), &[(source.clone(), 700)]);

    let font = &instance.font;
    assert_eq!(font.names.get(name::SUBFAMILY), Some("Bold"));
    assert_eq!(font.names.get(name::POSTSCRIPT_NAME), Some("LatinMono-Bold"));
    let os2 = font.os2.as_ref().unwrap();
    assert_eq!(os2.us_weight_class, 700);
    assert!(os2.fs_selection.contains(SelectionFlags::BOLD));
}

#[test]
fn test_fallback_is_degraded_and_static() {
    let dir = tempfile::tempdir().unwrap();
    let source = variable_source(&dir);
    assert!(read_font(&source).unwrap().has_table(Tag::new(b"fvar")));

    let instance = extract_instance(&FakeInstancer::failing(), &source, "Light", true).unwrap();
    let degraded = instance.degraded.as_ref().unwrap();
    assert_eq!(degraded.requested_weight, 300);
    assert_eq!(degraded.default_weight, Some(400.0));
    assert!(degraded.reason.contains("not installed"));

    for tag in VARIATION_TABLES {
        assert!(!instance.font.has_table(tag), "{tag} should be stripped");
    }
    assert!(instance.font.has_table(Tag::new(b"GSUB")));
    assert_eq!(instance.font.names.get(name::SUBFAMILY), Some("Light Italic"));
    let os2 = instance.font.os2.as_ref().unwrap();
    assert_eq!(os2.us_weight_class, 300);
    assert!(os2.fs_selection.contains(SelectionFlags::ITALIC));
    assert!(!os2.fs_selection.contains(SelectionFlags::REGULAR));
}

#[test]
fn test_missing_source_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let instancer = FakeInstancer::succeeding(fixtures::latin_font());
    let err = extract_instance(&instancer, &dir.path().join("absent.ttf"), "Bold", false)
        .unwrap_err();
    assert!(matches!(err, Error::MissingSource(_)));
    assert!(instancer.calls.lock().unwrap().is_empty());
}

#[test]
fn test_failure_with_unreadable_source_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("broken.ttf");
    std::fs::write(&source, b"not a font").unwrap();

    let err = extract_instance(&FakeInstancer::failing(), &source, "Bold", false).unwrap_err();
    assert!(matches!(err, Error::Font(ref e) if e.is_malformed()));
}

#[test]
fn test_fonttools_missing_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let source = variable_source(&dir);
    let instancer = FontToolsInstancer::new("boncode-no-such-fonttools");

    let instance = extract_instance(&instancer, &source, "Regular", false).unwrap();
    assert!(instance.is_degraded());
}
