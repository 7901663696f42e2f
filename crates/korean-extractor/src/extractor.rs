use boncode_font_model::{Font, GlyphId, Outline};
use kurbo::Affine;
use log::{debug, info, warn};

use crate::{
    normalize::{GlyphTransform, WidthPolicy, scale_advance},
    script::is_korean,
};

/// Extracts the Korean subset of a donor font and fits it to the target
/// family's cell.
///
/// Configure with the builder methods, then call [`extract`](Self::extract).
#[derive(Debug, Clone)]
pub struct KoreanExtractor {
    transform: Option<GlyphTransform>,
    width: WidthPolicy,
    center_in_cell: bool,
}

impl Default for KoreanExtractor {
    fn default() -> Self {
        Self { transform: None, width: WidthPolicy::Scaled(1.0), center_in_cell: false }
    }
}

/// What an extraction kept and anything worth flagging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionReport {
    pub removed_codepoints: usize,
    pub retained_codepoints: usize,
    pub normalized_glyphs: usize,
    pub centered_glyphs: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub font: Font,
    pub report: ExtractionReport,
}

impl KoreanExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a geometry transform to every retained glyph.
    pub fn with_transform(mut self, transform: GlyphTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_width_policy(mut self, width: WidthPolicy) -> Self {
        self.width = width;
        self
    }

    /// Shift glyphs horizontally to keep them centered when their width changes.
    pub fn center_in_cell(mut self, center: bool) -> Self {
        self.center_in_cell = center;
        self
    }

    pub fn extract(&self, mut font: Font) -> Extraction {
        let mut report = ExtractionReport::default();

        let before = font.cmap.len();
        font.cmap.retain(is_korean);
        report.retained_codepoints = font.cmap.len();
        report.removed_codepoints = before - font.cmap.len();
        info!(
            "Kept {} Korean code points, removed {}",
            report.retained_codepoints, report.removed_codepoints
        );

        // Flatten everything against the untouched source first, so a
        // component shared by several glyphs is transformed exactly once.
        let targets = font.cmap.glyph_ids();
        let flattened: Vec<(GlyphId, Vec<_>)> =
            targets.iter().map(|&gid| (gid, font.flattened(gid))).collect();

        let affine = self.transform.map(|t| t.affine()).unwrap_or(Affine::IDENTITY);
        let geometry_scale = self.transform.map_or(1.0, |t| t.scale_x);

        for (gid, contours) in flattened {
            let Some(glyph) = font.glyphs.get_mut(gid.as_usize()) else {
                continue;
            };
            let advance = glyph.advance;
            let scaled_width = scale_advance(advance, geometry_scale);
            let final_width = self.width.resolve(advance, geometry_scale);

            let mut placement = affine;
            let delta = final_width as f64 - scaled_width as f64;
            if self.center_in_cell && delta.abs() > 1.0 {
                placement = Affine::translate((delta / 2.0, 0.0)) * placement;
                report.centered_glyphs += 1;
            }

            if !contours.is_empty() {
                let contours = contours.iter().map(|c| c.transformed(placement)).collect();
                glyph.outline = Outline::Simple { contours, instructions: Vec::new() };
            } else {
                glyph.strip_instructions();
            }
            glyph.advance = final_width;
            report.normalized_glyphs += 1;
            debug!("{gid}: advance {advance} -> {final_width}");
        }

        if !font.has_notdef() {
            let message = "source font has no identifiable .notdef glyph".to_string();
            warn!("{message}");
            report.warnings.push(message);
        }

        Extraction { font, report }
    }
}
