//! Build pipeline for Bon Code hybrid fonts.
//!
//! Each target runs instance extraction (for variable Latin sources) and
//! Korean extraction, then the merge, metadata reconciliation and an atomic
//! write. Targets share only the context and run in parallel.

use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use boncode_font_instancer::{DegradedInstance, FontToolsInstancer, Instancer, extract_instance};
use boncode_font_merger::{MergeReport, Merger};
use boncode_font_metadata::{
    FontVersion, MetadataRequest, MonospaceSettings, reconcile, weight_value,
};
use boncode_font_model::Font;
use boncode_korean_extractor::ExtractionReport;
use log::{info, warn};

use crate::{
    config::{BuildConfig, FamilyConfig},
    error::BuildError,
    io::{load_font, write_font_atomic},
    parallel::{BatchResult, collect_parallel},
    targets::{Target, plan_targets},
};

const RULE: &str =
    "═══════════════════════════════════════════════════════════════════════════════";

pub struct PipelineContext {
    pub config: BuildConfig,
    /// Relative source paths in the configuration resolve against this.
    pub root: PathBuf,
    pub build_dir: PathBuf,
    pub out_dir: PathBuf,
    pub version: FontVersion,
    pub instancer: Box<dyn Instancer>,
}

impl PipelineContext {
    pub fn new(
        config: BuildConfig,
        root: PathBuf,
        build_dir: PathBuf,
        out_dir: PathBuf,
        version: Option<String>,
    ) -> Result<Self, BuildError> {
        let version = FontVersion::parse(version.as_deref())
            .map_err(|e| BuildError::Configuration(e.to_string()))?;
        Ok(Self {
            config,
            root,
            build_dir,
            out_dir,
            version,
            instancer: Box::new(FontToolsInstancer::default()),
        })
    }

    pub fn with_instancer(mut self, instancer: impl Instancer + 'static) -> Self {
        self.instancer = Box::new(instancer);
        self
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    pub fn output_path(&self, target: &Target) -> PathBuf {
        target.output_path(&self.out_dir, &self.config.family_prefix)
    }

    fn intermediate(&self, kind: &str, stem: &str) -> PathBuf {
        self.build_dir.join(kind).join(format!("{stem}.ttf"))
    }
}

/// What happened to one successful target.
#[derive(Debug, Clone)]
pub struct TargetReport {
    pub target: Target,
    pub output: PathBuf,
    pub latin_source: PathBuf,
    pub korean_source: PathBuf,
    pub degraded: Option<DegradedInstance>,
    pub extraction: ExtractionReport,
    pub merge: MergeReport,
    pub elapsed: Duration,
}

#[derive(Debug, Default)]
pub struct BuildReport {
    pub results: Vec<(Target, Result<TargetReport, BuildError>)>,
}

impl BuildReport {
    pub fn batch(&self) -> BatchResult {
        let mut batch = BatchResult::default();
        for (_, result) in &self.results {
            match result {
                Ok(report) => {
                    batch.succeeded += 1;
                    if report.degraded.is_some() {
                        batch.degraded += 1;
                    }
                }
                Err(_) => batch.failed += 1,
            }
        }
        batch
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Target, &BuildError)> {
        self.results.iter().filter_map(|(t, r)| r.as_ref().err().map(|e| (t, e)))
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &TargetReport> {
        self.results.iter().filter_map(|(_, r)| r.as_ref().ok())
    }
}

/// The Latin half of a target: a static source, or an instance of the
/// variable source at the borrowed Latin weight.
pub fn latin_font(
    ctx: &PipelineContext,
    target: &Target,
    family: &FamilyConfig,
) -> Result<(Font, PathBuf, Option<DegradedInstance>), BuildError> {
    let weight = family.latin_weight(&target.weight);

    if !family.is_variable {
        let path = ctx.resolve(&family.static_source(&target.family, weight, target.italic));
        info!("{target}: using static Latin {}", path.display());
        return Ok((load_font(&path)?, path, None));
    }

    let source = family.variable_source(target.italic).ok_or_else(|| {
        BuildError::Configuration(format!("font {} has no variableFontFiles", target.family))
    })?;
    let path = ctx.resolve(&source);
    let instance = extract_instance(ctx.instancer.as_ref(), &path, weight, target.italic)
        .map_err(|e| BuildError::instancer(&path, e))?;
    if let Some(degraded) = &instance.degraded {
        warn!(
            "{target}: degraded instance of {} (default wght {:?}, requested {}): {}",
            path.display(),
            degraded.default_weight,
            degraded.requested_weight,
            degraded.reason
        );
    }

    let cache = ctx.intermediate("variable-instances", &target.intermediate_stem(weight));
    write_font_atomic(&cache, &instance.font)?;
    Ok((instance.font, path, instance.degraded))
}

/// The Korean half of a target, extracted and normalized for the family.
pub fn korean_font(
    ctx: &PipelineContext,
    target: &Target,
    family: &FamilyConfig,
) -> Result<(Font, PathBuf, ExtractionReport), BuildError> {
    let weight = family.korean_weight(&target.weight);
    let path = ctx.resolve(&ctx.config.korean_source(weight, target.italic));
    info!("{target}: using Korean {weight} from {}", path.display());

    let donor = load_font(&path)?;
    let extraction = family.korean_extractor().extract(donor);
    for warning in &extraction.report.warnings {
        warn!("{target}: {warning}");
    }

    let cache = ctx.intermediate("korean", &target.intermediate_stem(&target.weight));
    write_font_atomic(&cache, &extraction.font)?;
    Ok((extraction.font, path, extraction.report))
}

pub fn metadata_request(
    ctx: &PipelineContext,
    target: &Target,
    family: &FamilyConfig,
) -> MetadataRequest {
    let prefix = &ctx.config.family_prefix;
    let family_name = format!("{prefix} {}", family.display_name);
    let postscript_prefix: String = format!("{prefix}{}", family.display_name)
        .split_whitespace()
        .collect();

    MetadataRequest::new(family_name, target.style_name(), ctx.version.clone(), postscript_prefix)
        .with_weight_class(weight_value(&target.weight))
        .with_label_mapping(family.label_mapping())
        .with_monospace(MonospaceSettings::with_width(
            i16::try_from(family.mono_width).unwrap_or(i16::MAX),
        ))
}

/// Build one target from its sources to its output file.
pub fn build_target(ctx: &PipelineContext, target: &Target) -> Result<TargetReport, BuildError> {
    let start = Instant::now();
    let family = ctx.config.family(&target.family)?;

    let (latin, latin_source, degraded) = latin_font(ctx, target, family)?;
    let (korean, korean_source, extraction) = korean_font(ctx, target, family)?;

    let merged = Merger::default().merge(latin, &korean)?;
    let font = reconcile(merged.font, &metadata_request(ctx, target, family));

    let output = ctx.output_path(target);
    write_font_atomic(&output, &font)?;
    info!("{target}: wrote {}", output.display());

    Ok(TargetReport {
        target: target.clone(),
        output,
        latin_source,
        korean_source,
        degraded,
        extraction,
        merge: merged.report,
        elapsed: start.elapsed(),
    })
}

/// Build every target in parallel, keeping each target's outcome.
pub fn build_targets(ctx: &PipelineContext, targets: &[Target]) -> BuildReport {
    let results = collect_parallel(targets, |target| build_target(ctx, target));
    BuildReport { results: targets.iter().cloned().zip(results).collect() }
}

/// Plan and build the selected families (all of them when `families` is
/// empty). Configuration problems fail before any target starts.
pub fn build(ctx: &PipelineContext, families: &[String]) -> Result<BuildReport, BuildError> {
    let targets = plan_targets(&ctx.config, families)?;
    let start = Instant::now();

    println!("{RULE}");
    println!("Bon Code Fonts Build Pipeline");
    println!("{RULE}");
    println!("  Targets: {}", targets.len());
    println!("  Version: {}", ctx.version.tag);

    let report = build_targets(ctx, &targets);

    for (target, result) in &report.results {
        match result {
            Ok(r) if r.degraded.is_some() => {
                println!("  ! {target} (degraded instance, {:.2}s)", r.elapsed.as_secs_f64())
            }
            Ok(r) => println!("  ✓ {target} ({:.2}s)", r.elapsed.as_secs_f64()),
            Err(e) => println!("  ✗ {target}: {e}"),
        }
    }

    let batch = report.batch();
    println!("\n{RULE}");
    println!("✨ Build finished in {:.2}s", start.elapsed().as_secs_f64());
    println!("   Output: {}", ctx.out_dir.display());
    println!(
        "   Fonts: {} built, {} failed, {} degraded",
        batch.succeeded, batch.failed, batch.degraded
    );
    println!("{RULE}");

    Ok(report)
}
