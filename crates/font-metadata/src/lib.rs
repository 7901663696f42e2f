//! Font metadata reconciliation (naming, weight, style flags, capabilities,
//! versioning).
//!
//! [`reconcile`] takes a merged font and a [`MetadataRequest`] and returns a
//! font whose name, OS/2, head, post and meta tables agree with each other
//! and with the requested family and style.

mod engine;
pub mod labels;
mod monospace;
pub mod style;
mod version;
pub mod weight;

pub use engine::{
    COPYRIGHT, DESIGNER, MANUFACTURER, MetadataRequest, REQUIRED_CODE_PAGES, TRADEMARK,
    apply_weight_style, reconcile,
};
pub use labels::LabelMapping;
pub use monospace::{MonospaceSettings, VENDOR_ID};
pub use style::{canonical_family, canonical_style};
pub use version::FontVersion;
pub use weight::{StyleFlags, panose_weight, weight_value};
