use std::result;

use boncode_font_model::FontError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error(transparent)]
    Font(#[from] FontError),

    #[error("merged font would need {0} glyphs, more than the 65535 a font can address")]
    TooManyGlyphs(usize),
}

pub type Result<T> = result::Result<T, MergeError>;
