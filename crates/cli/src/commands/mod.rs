//! CLI command implementations.

mod build;
mod extract;
mod instance;
mod merge;

pub use build::{BuildArgs, build};
pub use extract::{ExtractArgs, extract_korean};
pub use instance::{InstanceArgs, instance};
pub use merge::{MergeArgs, merge};
