use boncode_font_model::{Font, Tag};

/// Vendor id stamped into OS/2.
pub const VENDOR_ID: Tag = Tag::new(b"BCFT");

/// Monospace metadata settings.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceSettings {
    /// Average character width; `None` keeps the font's value.
    pub width: Option<i16>,
    /// PANOSE proportion value (9 = monospace).
    pub panose_proportion: u8,
}

impl Default for MonospaceSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl MonospaceSettings {
    pub const DEFAULT: Self = Self { width: None, panose_proportion: 9 };

    pub fn with_width(width: i16) -> Self {
        Self { width: Some(width), ..Self::DEFAULT }
    }

    /// Set `post.isFixedPitch`, the PANOSE proportion and the vendor id.
    pub fn apply(&self, font: &mut Font) {
        if let Some(post) = font.post.as_mut() {
            post.is_fixed_pitch = 1;
        }
        if let Some(os2) = font.os2.as_mut() {
            os2.panose_10[3] = self.panose_proportion;
            os2.ach_vend_id = VENDOR_ID;
            if let Some(width) = self.width {
                os2.x_avg_char_width = width;
            }
        }
    }
}
