//! Parallel target processing utilities.

use anyhow::{Result, bail};
use rayon::prelude::*;

/// Result of a parallel batch operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
    /// Succeeded, but from a fallback path.
    pub degraded: usize,
}

impl BatchResult {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    pub fn ok_or_bail(&self, operation: &str) -> Result<()> {
        if self.failed > 0 {
            bail!("{operation} failed: {} succeeded, {} failed", self.succeeded, self.failed);
        }
        Ok(())
    }
}

/// Run `op` on every item in parallel and keep every result.
///
/// A failing item never stops its siblings.
pub fn collect_parallel<T, R, E, F>(items: &[T], op: F) -> Vec<Result<R, E>>
where
    T: Sync,
    R: Send,
    E: Send,
    F: Fn(&T) -> Result<R, E> + Sync + Send,
{
    items.par_iter().map(op).collect()
}
