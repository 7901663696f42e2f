//! Domain-specific newtypes for type safety

use std::fmt::{self, Display, Formatter};

/// A glyph index into [`Font::glyphs`](crate::Font::glyphs)
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphId(pub u16);

impl GlyphId {
    pub const NOTDEF: Self = Self(0);

    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub const fn to_u16(self) -> u16 {
        self.0
    }

    pub const fn to_u32(self) -> u32 {
        self.0 as u32
    }

    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u16> for GlyphId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl From<GlyphId> for u16 {
    fn from(id: GlyphId) -> Self {
        id.0
    }
}

impl Display for GlyphId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "GID{}", self.0)
    }
}

/// Format a code point the way Unicode charts do (`U+AC00`).
pub fn format_codepoint(cp: u32) -> String {
    format!("U+{cp:04X}")
}
