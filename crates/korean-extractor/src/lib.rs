//! Korean subset extraction for hybrid fonts.
//!
//! Filters a donor font's character map down to Hangul and the CJK
//! punctuation Korean text needs, then rescales and re-widths the retained
//! glyphs so they sit in the target family's monospace cell.
//!
//! # Example
//!
//! ```no_run
//! use boncode_korean_extractor::{GlyphTransform, KoreanExtractor, WidthPolicy};
//!
//! # fn demo(donor: boncode_font_model::Font) {
//! let extraction = KoreanExtractor::new()
//!     .with_transform(GlyphTransform { scale_x: 1.2, ..GlyphTransform::IDENTITY })
//!     .with_width_policy(WidthPolicy::Mono(1200))
//!     .center_in_cell(true)
//!     .extract(donor);
//! println!("{} warnings", extraction.report.warnings.len());
//! # }
//! ```

mod extractor;
mod normalize;
mod script;

pub use extractor::{Extraction, ExtractionReport, KoreanExtractor};
pub use normalize::{GlyphTransform, WidthPolicy};
pub use script::{CJK_PUNCTUATION, HANGUL_RANGES, is_korean};
