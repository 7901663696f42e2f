use std::{fs, path::Path};

use boncode_font_metadata::weight_value;
use boncode_font_model::{Font, FontError, Tag, read_font};
use log::{info, warn};
use skrifa::MetadataProvider;

use crate::{Error, Instancer, Result, naming::apply_instance_naming};

/// Tables that only make sense in a variable font.
pub const VARIATION_TABLES: [Tag; 7] = [
    Tag::new(b"fvar"),
    Tag::new(b"avar"),
    Tag::new(b"gvar"),
    Tag::new(b"HVAR"),
    Tag::new(b"VVAR"),
    Tag::new(b"MVAR"),
    Tag::new(b"cvar"),
];

const WGHT: Tag = Tag::new(b"wght");

/// The fallback was used: outlines are the source's default instance, not
/// the requested weight.
#[derive(Debug, Clone, PartialEq)]
pub struct DegradedInstance {
    /// Default `wght` of the source, which the outlines reflect.
    pub default_weight: Option<f32>,
    pub requested_weight: u16,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Instance {
    pub font: Font,
    pub degraded: Option<DegradedInstance>,
}

impl Instance {
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

/// Extract the `weight_name` instance of the variable font at `source`.
///
/// When the instancer fails the source is read as-is and stripped of its
/// variation tables. A missing source, or a failing instancer together with
/// an unreadable source, is an error.
pub fn extract_instance(
    instancer: &dyn Instancer,
    source: &Path,
    weight_name: &str,
    italic: bool,
) -> Result<Instance> {
    if !source.is_file() {
        return Err(Error::MissingSource(source.to_path_buf()));
    }
    let weight = weight_value(weight_name);
    info!("Extracting weight {weight_name} ({weight}) from {}", source.display());

    let reason = match instantiate_to_font(instancer, source, weight) {
        Ok(mut font) => {
            apply_instance_naming(&mut font, weight_name, weight, italic);
            return Ok(Instance { font, degraded: None });
        }
        Err(e) => e.to_string(),
    };

    warn!("Instancing {} failed ({reason}); using the default instance", source.display());
    let (mut font, default_weight) = read_default_instance(source)?;
    apply_instance_naming(&mut font, weight_name, weight, italic);
    if let Some(default) = default_weight {
        warn!("Outlines reflect wght={default}, not the requested {weight}");
    }

    Ok(Instance {
        font,
        degraded: Some(DegradedInstance { default_weight, requested_weight: weight, reason }),
    })
}

fn instantiate_to_font(instancer: &dyn Instancer, source: &Path, weight: u16) -> Result<Font> {
    let scratch = tempfile::tempdir().map_err(Error::Scratch)?;
    let output = scratch.path().join("instance.ttf");
    instancer.instantiate(source, weight, &output)?;
    Ok(read_font(&output)?)
}

/// The source as a static font, with the default `wght` it was drawn at.
pub fn read_default_instance(source: &Path) -> Result<(Font, Option<f32>)> {
    let data = fs::read(source)
        .map_err(|source_err| FontError::Io { path: source.to_path_buf(), source: source_err })?;
    let default_weight = default_wght(&data);

    let mut font = Font::from_bytes(&data)?;
    for tag in VARIATION_TABLES {
        font.remove_table(tag);
    }
    Ok((font, default_weight))
}

fn default_wght(data: &[u8]) -> Option<f32> {
    let font = skrifa::FontRef::new(data).ok()?;
    let axes = font.axes();
    axes.iter().find(|axis| axis.tag() == WGHT).map(|axis| axis.default_value())
}
