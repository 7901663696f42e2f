//! Font file I/O for the pipeline.

use std::{
    fs::create_dir_all,
    io::Write,
    path::{Path, PathBuf},
};

use boncode_font_model::{Font, read_font};
use tempfile::NamedTempFile;

use crate::error::BuildError;

pub fn load_font(path: &Path) -> Result<Font, BuildError> {
    read_font(path).map_err(|e| BuildError::font(path, e))
}

/// Encode `font` and write it next to `path`, then rename it into place.
///
/// A failed or interrupted write leaves either the previous file or nothing
/// at `path`, never a partial font.
pub fn write_font_atomic(path: &Path, font: &Font) -> Result<(), BuildError> {
    let data = font.to_bytes().map_err(|e| BuildError::font(path, e))?;
    let parent = parent_dir(path);
    create_dir_all(&parent).map_err(|source| BuildError::Io { path: parent.clone(), source })?;

    let io_err = |source| BuildError::Io { path: path.to_path_buf(), source };
    let mut tmp = NamedTempFile::new_in(&parent).map_err(io_err)?;
    tmp.write_all(&data).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
