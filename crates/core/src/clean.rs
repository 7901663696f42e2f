use std::{fs::remove_dir_all, path::Path};

use anyhow::{Context, Result};

/// Remove the intermediate and output directories. Returns how many existed.
pub fn clean(build_dir: &Path, out_dir: &Path) -> Result<usize> {
    let mut removed = 0;

    for dir in [build_dir, out_dir] {
        if dir.exists() {
            remove_dir_all(dir).with_context(|| format!("Failed to remove {}", dir.display()))?;
            println!("Removed {}", dir.display());
            removed += 1;
        } else {
            println!("Skipped {} (not found)", dir.display());
        }
    }

    println!("Cleaned {removed} directories");
    Ok(removed)
}
