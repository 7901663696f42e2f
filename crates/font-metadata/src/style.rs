//! Style and family name canonicalization.
//!
//! Operating systems only group four styles under one family name: Regular,
//! Bold, Italic and Bold Italic. Every other weight has to live in the family
//! name instead.

/// Weight tokens, ordered from light to heavy.
pub const WEIGHT_TOKENS: [&str; 9] = [
    "Thin",
    "ExtraLight",
    "Light",
    "Regular",
    "Medium",
    "SemiBold",
    "Bold",
    "ExtraBold",
    "Black",
];

pub const CANONICAL_STYLES: [&str; 4] = ["Regular", "Bold", "Italic", "Bold Italic"];

pub fn is_italic(style: &str) -> bool {
    style.contains("Italic")
}

/// Collapse a requested style to one of the four canonical styles.
pub fn canonical_style(style: &str) -> &'static str {
    match (is_italic(style), style) {
        (true, "Bold Italic") => "Bold Italic",
        (true, _) => "Italic",
        (false, "Bold") => "Bold",
        (false, _) => "Regular",
    }
}

pub fn is_canonical(style: &str) -> bool {
    CANONICAL_STYLES.contains(&style)
}

/// The weight part of a style name: "SemiBold Italic" is "SemiBold", a bare
/// "Italic" is "Regular".
pub fn weight_token(style: &str) -> &str {
    style.split_whitespace().find(|w| *w != "Italic").unwrap_or("Regular")
}

/// The shortened form of a weight token used inside legacy family names.
pub fn legacy_weight_token(token: &str) -> String {
    match token.strip_prefix("Extra") {
        Some(rest) => format!("X{rest}"),
        None => token.to_string(),
    }
}

fn is_weight_word(word: &str) -> bool {
    WEIGHT_TOKENS.iter().any(|t| *t == word || legacy_weight_token(t) == word)
}

/// Remove trailing weight tokens, in full or legacy form, from a family name.
pub fn strip_weight_tokens(family: &str) -> String {
    let mut words: Vec<&str> = family.split_whitespace().collect();
    while words.len() > 1 && words.last().is_some_and(|w| is_weight_word(w)) {
        words.pop();
    }
    words.join(" ")
}

/// The legacy family name (name id 1) for `family` requested in `style`.
///
/// Canonical styles get the bare family. Intermediate weights keep their
/// weight in the family, since the style field can no longer carry it;
/// `Extra` weights are shortened to `X` there.
pub fn canonical_family(family: &str, style: &str) -> String {
    let base = strip_weight_tokens(family);
    if is_canonical(style) {
        base
    } else {
        format!("{base} {}", legacy_weight_token(weight_token(style)))
    }
}
