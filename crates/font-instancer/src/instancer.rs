use std::{path::Path, process::Command};

use log::debug;

use crate::{Error, Result};

/// Produces a static instance of a variable font at one `wght` value.
pub trait Instancer: Sync {
    fn instantiate(&self, source: &Path, weight: u16, output: &Path) -> Result<()>;
}

/// Runs `fonttools varLib.instancer SRC wght=N --output OUT`.
#[derive(Debug, Clone)]
pub struct FontToolsInstancer {
    program: String,
}

impl Default for FontToolsInstancer {
    fn default() -> Self {
        Self::new("fonttools")
    }
}

impl FontToolsInstancer {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Instancer for FontToolsInstancer {
    fn instantiate(&self, source: &Path, weight: u16, output: &Path) -> Result<()> {
        debug!("{} varLib.instancer {} wght={weight}", self.program, source.display());
        let result = Command::new(&self.program)
            .arg("varLib.instancer")
            .arg(source)
            .arg(format!("wght={weight}"))
            .arg("--output")
            .arg(output)
            .output()
            .map_err(|source| Error::Spawn { program: self.program.clone(), source })?;

        if !result.status.success() {
            return Err(Error::Failed {
                program: self.program.clone(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
