use std::{io, path::PathBuf, result};

use read_fonts::ReadError;
use thiserror::Error;
use write_fonts::{BuilderError, error};

#[derive(Error, Debug)]
pub enum FontError {
    #[error("unreadable font: {0}")]
    Unreadable(#[from] ReadError),

    #[error("required table '{0}' not found")]
    MissingTable(&'static str),

    #[error("unwritable font: {0}")]
    Unwritable(#[from] BuilderError),

    #[error("glyph {gid} failed validation: {source}")]
    InvalidGlyph { gid: u16, source: error::Error },

    #[error("failed to compile table: {0}")]
    Compile(#[from] error::Error),

    #[error("font file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl FontError {
    /// True when the font bytes or structure are unusable, as opposed to a
    /// filesystem problem.
    pub fn is_malformed(&self) -> bool {
        matches!(self, FontError::Unreadable(_) | FontError::MissingTable(_))
    }
}

pub type Result<T> = result::Result<T, FontError>;
