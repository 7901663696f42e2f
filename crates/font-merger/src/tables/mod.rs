//! Table-specific merge implementations

pub mod cmap;
pub mod glyf;
pub mod os2;
