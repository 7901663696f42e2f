//! STAT axis-value label rules.
//!
//! Labels (name ids 256 and up) are rewritten by an ordered table of pure
//! rules; the first rule that returns `Some` wins. Every rule's output is
//! claimed by the same rule (or by none) on a second run, so reapplying the
//! table changes nothing. Labels no rule recognizes are left untouched.

use std::collections::BTreeMap;

use crate::style::{canonical_style, is_canonical, is_italic, weight_token};

/// Weights whose Latin outlines are borrowed from another weight, keyed by
/// the requested weight (e.g. "Bold" built from the "SemiBold" source).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMapping {
    pub sources: BTreeMap<String, String>,
}

impl LabelMapping {
    /// A mapping from `(weight, latin_source)` pairs; `None` when there are none.
    pub fn from_pairs<I, W, S>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (W, S)>,
        W: Into<String>,
        S: Into<String>,
    {
        let sources: BTreeMap<String, String> =
            pairs.into_iter().map(|(w, s)| (w.into(), s.into())).collect();
        (!sources.is_empty()).then_some(Self { sources })
    }
}

/// What the label rules know about the target.
#[derive(Debug, Clone, Copy)]
pub struct LabelContext<'a> {
    pub style: &'a str,
    pub mapping: Option<&'a LabelMapping>,
}

impl<'a> LabelContext<'a> {
    pub fn new(style: &'a str, mapping: Option<&'a LabelMapping>) -> Self {
        Self { style, mapping }
    }

    fn canonical(&self) -> &'static str {
        canonical_style(self.style)
    }

    fn weight(&self) -> &'a str {
        weight_token(self.style)
    }
}

pub type LabelRule = fn(&str, &LabelContext) -> Option<String>;

/// Rules in priority order.
pub const RULES: [(&str, LabelRule); 4] = [
    ("source-weight relabel", relabel_source_weight),
    ("bold synonym clear", clear_bold_synonym),
    ("italic clear", clear_italic),
    ("weight synonym", substitute_weight_synonym),
];

/// A label naming the borrowed source weight, plain or italic, becomes the
/// requested weight token. The token itself is claimed too, so a relabelled
/// "Bold" is not cleared as a bold synonym on the next run.
fn relabel_source_weight(label: &str, ctx: &LabelContext) -> Option<String> {
    let weight = ctx.weight();
    let source = ctx.mapping?.sources.get(weight)?;
    if source == weight {
        return None;
    }
    let base = label.strip_suffix(" Italic").unwrap_or(label);
    (base == source || label == weight).then(|| weight.to_string())
}

fn clear_bold_synonym(label: &str, ctx: &LabelContext) -> Option<String> {
    let bold = matches!(ctx.canonical(), "Bold" | "Bold Italic");
    (bold && matches!(label, "Bold" | "SemiBold" | "Semibold")).then(String::new)
}

fn clear_italic(label: &str, ctx: &LabelContext) -> Option<String> {
    (ctx.mapping.is_some() && is_italic(ctx.canonical()) && label == "Italic").then(String::new)
}

fn substitute_weight_synonym(label: &str, ctx: &LabelContext) -> Option<String> {
    if is_canonical(ctx.style) {
        return None;
    }
    // No non-canonical style has a Bold weight token, so Semibold has no
    // target here.
    let target = match label {
        "Medium" => "Regular",
        "Thin" => "Light",
        _ => return None,
    };
    let canonical_weight = weight_token(ctx.canonical());
    (target == ctx.weight() || target == canonical_weight).then(|| target.to_string())
}

/// The new value of one label under the first matching rule. `None` means
/// the label stays as it is.
pub fn reconcile_label(label: &str, ctx: &LabelContext) -> Option<String> {
    RULES
        .iter()
        .find_map(|(_, rule)| rule(label, ctx))
        .filter(|new| new != label)
}
