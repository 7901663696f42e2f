//! Static weight instances from variable fonts.
//!
//! The heavy lifting is done by an external [`Instancer`] (by default
//! `fonttools varLib.instancer`). When it is missing or fails,
//! [`extract_instance`] falls back to the source's default instance with its
//! variation tables removed and marks the result as a [`DegradedInstance`].

mod error;
mod extract;
mod instancer;
mod naming;

pub use error::{Error, InstancerError, Result};
pub use extract::{
    DegradedInstance, Instance, VARIATION_TABLES, extract_instance, read_default_instance,
};
pub use instancer::{FontToolsInstancer, Instancer};
pub use naming::{apply_instance_naming, instance_style};
