use boncode_font_metadata::apply_weight_style;
use boncode_font_model::{Font, SelectionFlags, name};

/// Style name of an instance: the weight name, plus " Italic".
pub fn instance_style(weight_name: &str, italic: bool) -> String {
    if italic { format!("{weight_name} Italic") } else { weight_name.to_string() }
}

/// Rename an instance for `weight_name` and set its weight class and style
/// flags.
///
/// Only records the font already carries are rewritten (2, 4, 6 and 17).
pub fn apply_instance_naming(font: &mut Font, weight_name: &str, weight: u16, italic: bool) {
    let style = instance_style(weight_name, italic);
    let family = font
        .names
        .get(name::FAMILY)
        .or_else(|| font.names.get(name::TYPOGRAPHIC_FAMILY))
        .unwrap_or("Unknown")
        .to_string();

    font.names.set_all(name::SUBFAMILY, &style);
    font.names.set_all(name::FULL_NAME, &format!("{family} {style}"));
    let postscript: String = format!("{family}-{style}").split_whitespace().collect();
    font.names.set_all(name::POSTSCRIPT_NAME, &postscript);
    font.names.set_all(name::TYPOGRAPHIC_SUBFAMILY, &style);

    // Variable fonts carry generic selection bits that do not fit a single
    // instance.
    if let Some(os2) = font.os2.as_mut() {
        os2.fs_selection = SelectionFlags::USE_TYPO_METRICS;
    }
    apply_weight_style(font, weight, italic);
}
