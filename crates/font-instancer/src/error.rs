use std::{io, path::PathBuf, process::ExitStatus, result};

use boncode_font_model::FontError;

/// Error types for font-instancer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("variable font source not found: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed { program: String, status: ExitStatus, stderr: String },

    #[error("failed to create scratch directory: {0}")]
    Scratch(#[source] io::Error),

    #[error(transparent)]
    Font(#[from] FontError),
}

impl Error {
    /// Whether this came from the external tool, and so can fall back.
    pub fn is_subprocess(&self) -> bool {
        matches!(self, Self::Spawn { .. } | Self::Failed { .. })
    }
}

pub type InstancerError = Error;

pub type Result<T> = result::Result<T, Error>;
