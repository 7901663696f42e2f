//! Geometry and advance width normalization parameters.

use kurbo::Affine;

/// Per-axis scale followed by an offset, in font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl GlyphTransform {
    pub const IDENTITY: Self = Self { scale_x: 1.0, scale_y: 1.0, offset_x: 0.0, offset_y: 0.0 };

    pub fn affine(&self) -> Affine {
        Affine::new([self.scale_x, 0.0, 0.0, self.scale_y, self.offset_x, self.offset_y])
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for GlyphTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// How the final advance width of a Korean glyph is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidthPolicy {
    /// Every glyph gets the family's monospace width.
    Mono(u16),
    /// The glyph's own advance after geometry scaling.
    Native,
    /// A single configured width.
    Target(u16),
    /// The glyph's own advance multiplied by a factor.
    Scaled(f64),
}

impl WidthPolicy {
    /// Pick the first applicable policy: forced mono width, then native
    /// width, then an explicit target, then scaling by `scale_x`.
    pub fn select(
        mono_width: Option<u16>,
        use_native_width: bool,
        target_width: Option<u16>,
        scale_x: f64,
    ) -> Self {
        match (mono_width, use_native_width, target_width) {
            (Some(width), _, _) => WidthPolicy::Mono(width),
            (None, true, _) => WidthPolicy::Native,
            (None, false, Some(width)) => WidthPolicy::Target(width),
            (None, false, None) => WidthPolicy::Scaled(scale_x),
        }
    }

    /// The final width for a glyph whose source advance is `advance` and
    /// whose geometry was scaled horizontally by `geometry_scale`.
    pub fn resolve(&self, advance: u16, geometry_scale: f64) -> u16 {
        match *self {
            WidthPolicy::Mono(width) | WidthPolicy::Target(width) => width,
            WidthPolicy::Native => scale_advance(advance, geometry_scale),
            WidthPolicy::Scaled(factor) => scale_advance(advance, factor),
        }
    }
}

pub(crate) fn scale_advance(advance: u16, factor: f64) -> u16 {
    (advance as f64 * factor).round().clamp(0.0, u16::MAX as f64) as u16
}
