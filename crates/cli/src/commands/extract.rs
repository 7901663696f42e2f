use std::path::PathBuf;

use anyhow::{Context, Result};
use boncode_core::{
    BuildConfig, DEFAULT_CONFIG_PATH,
    io::{load_font, write_font_atomic},
};
use boncode_korean_extractor::{GlyphTransform, KoreanExtractor, WidthPolicy};

#[derive(Debug, Clone, clap::Args)]
pub struct ExtractArgs {
    #[arg(long)]
    pub source: PathBuf,
    #[arg(long)]
    pub output: PathBuf,
    /// Use the Korean adjustments of this configured family instead of the
    /// flags below.
    #[arg(long)]
    pub family: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// Give every Korean glyph this advance width.
    #[arg(long)]
    pub mono_width: Option<u16>,
    #[arg(long, default_value_t = 1.0)]
    pub scale_x: f64,
    #[arg(long, default_value_t = 1.0)]
    pub scale_y: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub offset_x: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub offset_y: f64,
    #[arg(long)]
    pub center: bool,
}

impl ExtractArgs {
    fn extractor(&self) -> Result<KoreanExtractor> {
        if let Some(family) = &self.family {
            let config = BuildConfig::load(&self.config)
                .with_context(|| format!("Failed to load {}", self.config.display()))?;
            return Ok(config.family(family)?.korean_extractor());
        }

        let transform = GlyphTransform {
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
        };
        Ok(KoreanExtractor::new()
            .with_transform(transform)
            .with_width_policy(WidthPolicy::select(self.mono_width, false, None, self.scale_x))
            .center_in_cell(self.center))
    }
}

pub fn extract_korean(args: ExtractArgs) -> Result<()> {
    let extractor = args.extractor()?;
    let donor = load_font(&args.source)?;

    let extraction = extractor.extract(donor);
    let report = &extraction.report;
    for warning in &report.warnings {
        log::warn!("{warning}");
    }
    write_font_atomic(&args.output, &extraction.font)?;

    println!(
        "Korean subset: {} ({} code points kept, {} removed, {} glyphs normalized)",
        args.output.display(),
        report.retained_codepoints,
        report.removed_codepoints,
        report.normalized_glyphs
    );
    Ok(())
}
