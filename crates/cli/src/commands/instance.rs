use std::path::PathBuf;

use anyhow::{Context, Result};
use boncode_core::io::write_font_atomic;
use boncode_font_instancer::{FontToolsInstancer, extract_instance};
use log::warn;

#[derive(Debug, Clone, clap::Args)]
pub struct InstanceArgs {
    #[arg(long)]
    pub input: PathBuf,
    #[arg(short, long)]
    pub output: PathBuf,
    /// Weight name, e.g. `SemiBold`.
    #[arg(short, long)]
    pub weight: String,
    #[arg(long)]
    pub italic: bool,
    #[arg(long, default_value = "fonttools")]
    pub fonttools: String,
}

pub fn instance(args: InstanceArgs) -> Result<()> {
    let instancer = FontToolsInstancer::new(args.fonttools);
    let instance = extract_instance(&instancer, &args.input, &args.weight, args.italic)
        .with_context(|| format!("Failed to instantiate {}", args.input.display()))?;

    if let Some(degraded) = &instance.degraded {
        warn!(
            "Degraded instance: default wght {:?} kept instead of {} ({})",
            degraded.default_weight, degraded.requested_weight, degraded.reason
        );
    }
    write_font_atomic(&args.output, &instance.font)?;

    println!("Instance created: {} -> {}", args.input.display(), args.output.display());
    Ok(())
}
