use std::{io, path::PathBuf};

use boncode_font_instancer::InstancerError;
use boncode_font_merger::MergeError;
use boncode_font_model::FontError;
use thiserror::Error;

/// Why a target (or the whole invocation) failed.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("input not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("malformed font {}: {source}", path.display())]
    MalformedFont {
        path: PathBuf,
        #[source]
        source: FontError,
    },

    /// The external instancer failed. The pipeline falls back instead of
    /// reporting this on its own.
    #[error(transparent)]
    Subprocess(InstancerError),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Merge(#[from] MergeError),
}

impl BuildError {
    /// Classify a codec error for the font at `path`.
    pub fn font(path: impl Into<PathBuf>, err: FontError) -> Self {
        let path = path.into();
        match err {
            FontError::NotFound(path) => Self::MissingInput(path),
            FontError::Io { path, source } => Self::Io { path, source },
            source => Self::MalformedFont { path, source },
        }
    }

    /// Classify an instancer error for the variable font at `source`.
    pub fn instancer(source: impl Into<PathBuf>, err: InstancerError) -> Self {
        match err {
            InstancerError::MissingSource(path) => Self::MissingInput(path),
            InstancerError::Font(e) => Self::font(source, e),
            InstancerError::Scratch(e) => Self::Io { path: std::env::temp_dir(), source: e },
            other => Self::Subprocess(other),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
