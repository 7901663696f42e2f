use std::path::PathBuf;

use anyhow::{Context, Result};
use boncode_core::{BuildConfig, DEFAULT_CONFIG_PATH, PipelineContext};
use boncode_font_instancer::FontToolsInstancer;
use log::error;

#[derive(Debug, Clone, clap::Args)]
pub struct BuildArgs {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// Directory that configured source paths are relative to.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    #[arg(long, default_value = ".build")]
    pub build_dir: PathBuf,
    #[arg(long, default_value = "out")]
    pub out_dir: PathBuf,
    /// Family key to build; repeat for several. Builds all when omitted.
    #[arg(short, long)]
    pub family: Vec<String>,
    #[arg(short, long)]
    pub version: Option<String>,
    /// Program used for variable font instancing.
    #[arg(long, default_value = "fonttools")]
    pub fonttools: String,
}

pub fn build(args: BuildArgs) -> Result<()> {
    let config = BuildConfig::load(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    let ctx = PipelineContext::new(config, args.root, args.build_dir, args.out_dir, args.version)?
        .with_instancer(FontToolsInstancer::new(args.fonttools));

    let report = boncode_core::build(&ctx, &args.family)?;
    for (target, err) in report.failures() {
        error!("{target}: {err}");
    }
    report.batch().ok_or_bail("Build")
}
