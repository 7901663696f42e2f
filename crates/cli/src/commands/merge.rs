use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use boncode_core::io::{load_font, write_font_atomic};
use boncode_font_merger::Merger;
use boncode_korean_extractor::is_korean;
use boncode_font_metadata::{
    FontVersion, MetadataRequest, reconcile, style::weight_token, weight_value,
};

#[derive(Debug, Clone, clap::Args)]
pub struct MergeArgs {
    #[arg(long)]
    pub latin: PathBuf,
    /// Korean subset, as written by `extract-korean`.
    #[arg(long)]
    pub korean: PathBuf,
    #[arg(short, long)]
    pub output: PathBuf,
    #[arg(long)]
    pub family_name: String,
    #[arg(long, default_value = "Regular")]
    pub style_name: String,
    #[arg(short, long)]
    pub version: Option<String>,
}

impl MergeArgs {
    fn request(&self) -> Result<MetadataRequest> {
        let version = FontVersion::parse(self.version.as_deref())?;
        let prefix: String = self.family_name.split_whitespace().collect();
        Ok(MetadataRequest::new(&self.family_name, &self.style_name, version, prefix)
            .with_weight_class(weight_value(weight_token(&self.style_name))))
    }
}

pub fn merge(args: MergeArgs) -> Result<()> {
    let request = args.request()?;
    let latin = load_font(&args.latin)?;
    let mut korean = load_font(&args.korean)?;

    let before = korean.cmap.len();
    korean.cmap.retain(is_korean);
    let removed = before - korean.cmap.len();
    if removed > 0 {
        info!("Dropped {removed} non-Korean code points from {}", args.korean.display());
    }

    let merged = Merger::default()
        .merge(latin, &korean)
        .with_context(|| format!("Failed to merge {}", args.korean.display()))?;
    let font = reconcile(merged.font, &request);
    write_font_atomic(&args.output, &font)?;

    let report = &merged.report;
    println!(
        "Merged font: {} ({} code points imported, {} collisions kept from {})",
        args.output.display(),
        report.imported_codepoints,
        report.collisions,
        args.latin.display()
    );
    Ok(())
}
