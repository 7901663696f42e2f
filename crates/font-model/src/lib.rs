//! In-memory font model shared by the Bon Code build steps.
//!
//! A [`Font`] decodes the tables the build rewrites (outlines, metrics,
//! character map, names, OS/2, `meta`) into owned values and carries every
//! other table verbatim. [`read_font`] and [`write_font`] wrap the
//! `read-fonts`/`write-fonts` codec.

mod cmap;
mod code_pages;
mod error;
mod font;
pub mod glyph;
pub mod meta;
pub mod name;
mod types;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use cmap::CharacterMap;
pub use code_pages::CodePageRanges;
pub use error::{FontError, Result};
pub use font::{Font, read_font, write_font};
pub use glyph::{Component, Contour, Glyph, Outline, OutlinePoint};
pub use meta::{LanguageTags, Meta};
pub use name::{NameRecord, NameTable};
pub use types::{GlyphId, format_codepoint};

// Re-exported so downstream crates name the same table types.
pub use font_types::Tag;
pub use write_fonts::tables::{head::MacStyle, os2::SelectionFlags};
