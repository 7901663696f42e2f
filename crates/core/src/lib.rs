//! Bon Code core - configuration, target planning and the build pipeline.

pub mod clean;
pub mod config;
pub mod error;
pub mod io;
pub mod parallel;
pub mod pipeline;
pub mod targets;

pub use config::{BuildConfig, DEFAULT_CONFIG_PATH, FamilyConfig, style_file_name, style_name};
pub use error::BuildError;
pub use parallel::BatchResult;
pub use pipeline::{BuildReport, PipelineContext, TargetReport, build, build_target, build_targets};
pub use targets::{Target, plan_targets};

pub use boncode_font_metadata::FontVersion;
