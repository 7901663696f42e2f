mod error;
mod glyph_order;
mod merger;
mod options;
mod tables;

pub use error::{MergeError, Result};
pub use glyph_order::GlyphOrder;
pub use merger::{MergeReport, Merged, Merger};
pub use options::{GLYPH_COUNT_DEPENDENT_TABLES, Options};

use boncode_font_model::Font;

/// Merge a donor font into a base font using default options.
///
/// This is a convenience wrapper around [`Merger`] for the common case.
///
/// # Example
///
/// ```no_run
/// use boncode_font_merger::merge_fonts;
/// use boncode_font_model::read_font;
///
/// let latin = read_font("JetBrainsMono-Regular.ttf").unwrap();
/// let korean = read_font("korean-subset.ttf").unwrap();
/// let merged = merge_fonts(latin, &korean).unwrap();
/// ```
pub fn merge_fonts(base: Font, donor: &Font) -> Result<Font> {
    Merger::default().merge(base, donor).map(|merged| merged.font)
}
