//! Glyph outlines and their conversion to and from `glyf` records.
//!
//! Points are held as `f64` so that geometry transforms can be chained
//! without accumulating rounding error; they are rounded once on encode.

use font_types::{F2Dot14, GlyphId16};
use kurbo::{Affine, Point, Rect};
use log::{debug, warn};
use read_fonts::tables::glyf::{Anchor as ReadAnchor, CurvePoint, Glyph as ReadGlyph};
use write_fonts::tables::glyf::{
    Anchor, Bbox, Component as WriteComponent, ComponentFlags, CompositeGlyph,
    Glyph as WriteGlyph, SimpleGlyph, Transform,
};

use crate::types::GlyphId;

/// Composite nesting deeper than this is treated as a cycle.
const MAX_COMPONENT_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlinePoint {
    pub x: f64,
    pub y: f64,
    pub on_curve: bool,
}

impl OutlinePoint {
    pub const fn new(x: f64, y: f64, on_curve: bool) -> Self {
        Self { x, y, on_curve }
    }

    fn apply(self, affine: Affine) -> Self {
        let p = affine * Point::new(self.x, self.y);
        Self { x: p.x, y: p.y, on_curve: self.on_curve }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour(pub Vec<OutlinePoint>);

impl Contour {
    pub fn points(&self) -> &[OutlinePoint] {
        &self.0
    }

    pub fn transformed(&self, affine: Affine) -> Self {
        Self(self.0.iter().map(|p| p.apply(affine)).collect())
    }
}

impl From<Vec<OutlinePoint>> for Contour {
    fn from(points: Vec<OutlinePoint>) -> Self {
        Self(points)
    }
}

/// A reference from a composite glyph to another glyph in the same font.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub glyph: GlyphId,
    pub anchor: Anchor,
    pub transform: Transform,
    pub flags: ComponentFlags,
}

impl Component {
    /// A plain offset reference with an identity transform.
    pub fn offset(glyph: GlyphId, dx: i16, dy: i16) -> Self {
        Self {
            glyph,
            anchor: Anchor::Offset { x: dx, y: dy },
            transform: Transform {
                xx: F2Dot14::from_f32(1.0),
                yx: F2Dot14::from_f32(0.0),
                xy: F2Dot14::from_f32(0.0),
                yy: F2Dot14::from_f32(1.0),
            },
            flags: ComponentFlags::default(),
        }
    }

    /// The placement of the referenced glyph as an affine map.
    ///
    /// Point-matched anchors carry no offset here; [`flatten`] aligns them
    /// against the points of the composite.
    pub fn affine(&self) -> Affine {
        let (dx, dy) = match self.anchor {
            Anchor::Offset { x, y } => (x as f64, y as f64),
            Anchor::Point { .. } => (0.0, 0.0),
        };
        let t = &self.transform;
        Affine::new([
            t.xx.to_f32() as f64,
            t.yx.to_f32() as f64,
            t.xy.to_f32() as f64,
            t.yy.to_f32() as f64,
            dx,
            dy,
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Outline {
    #[default]
    Empty,
    Simple {
        contours: Vec<Contour>,
        instructions: Vec<u8>,
    },
    Composite {
        components: Vec<Component>,
    },
}

impl Outline {
    pub fn is_empty(&self) -> bool {
        match self {
            Outline::Empty => true,
            Outline::Simple { contours, .. } => contours.is_empty(),
            Outline::Composite { components } => components.is_empty(),
        }
    }

    /// Glyph ids referenced directly by this outline.
    pub fn component_ids(&self) -> impl Iterator<Item = GlyphId> + '_ {
        let components: &[Component] = match self {
            Outline::Composite { components } => components,
            _ => &[],
        };
        components.iter().map(|c| c.glyph)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Glyph {
    pub name: Option<String>,
    pub outline: Outline,
    pub advance: u16,
}

impl Glyph {
    pub fn new(name: impl Into<String>, outline: Outline, advance: u16) -> Self {
        Self { name: Some(name.into()), outline, advance }
    }

    pub fn simple(name: impl Into<String>, contours: Vec<Contour>, advance: u16) -> Self {
        Self::new(name, Outline::Simple { contours, instructions: Vec::new() }, advance)
    }

    pub fn empty(name: impl Into<String>, advance: u16) -> Self {
        Self::new(name, Outline::Empty, advance)
    }

    pub fn strip_instructions(&mut self) {
        if let Outline::Simple { instructions, .. } = &mut self.outline {
            instructions.clear();
        }
    }

    pub(crate) fn from_read(glyph: Option<ReadGlyph>, name: Option<String>, advance: u16) -> Self {
        let outline = match glyph {
            None => Outline::Empty,
            Some(ReadGlyph::Simple(simple)) => {
                let mut contours = Vec::new();
                let mut points = simple.points();
                let mut next = 0usize;
                for end in simple.end_pts_of_contours() {
                    let end = end.get() as usize;
                    let mut contour = Vec::new();
                    while next <= end {
                        if let Some(pt) = points.next() {
                            contour.push(OutlinePoint::new(pt.x as f64, pt.y as f64, pt.on_curve));
                        }
                        next += 1;
                    }
                    contours.push(Contour(contour));
                }
                Outline::Simple { contours, instructions: simple.instructions().to_vec() }
            }
            Some(ReadGlyph::Composite(composite)) => {
                let components = composite
                    .components()
                    .map(|comp| Component {
                        glyph: GlyphId::new(comp.glyph.to_u16()),
                        anchor: match comp.anchor {
                            ReadAnchor::Offset { x, y } => Anchor::Offset { x, y },
                            ReadAnchor::Point { base, component } => {
                                Anchor::Point { base, component }
                            }
                        },
                        transform: Transform {
                            xx: comp.transform.xx,
                            yx: comp.transform.yx,
                            xy: comp.transform.xy,
                            yy: comp.transform.yy,
                        },
                        flags: comp.flags.into(),
                    })
                    .collect();
                Outline::Composite { components }
            }
        };
        Self { name, outline, advance }
    }
}

/// Resolve a glyph to plain contours, expanding composites recursively.
///
/// Missing or cyclic component references contribute nothing.
pub fn flatten(store: &[Glyph], gid: GlyphId) -> Vec<Contour> {
    let mut out = Vec::new();
    flatten_into(store, gid, Affine::IDENTITY, 0, &mut out);
    out
}

fn flatten_into(store: &[Glyph], gid: GlyphId, affine: Affine, depth: usize, out: &mut Vec<Contour>) {
    if depth > MAX_COMPONENT_DEPTH {
        debug!("component nesting too deep at {gid}");
        return;
    }
    let Some(glyph) = store.get(gid.as_usize()) else {
        return;
    };
    match &glyph.outline {
        Outline::Empty => {}
        Outline::Simple { contours, .. } => {
            out.extend(contours.iter().map(|c| c.transformed(affine)));
        }
        Outline::Composite { components } => {
            let start = out.len();
            for component in components {
                let mut child = Vec::new();
                flatten_into(store, component.glyph, affine * component.affine(), depth + 1, &mut child);
                if let Anchor::Point { base, component: own } = component.anchor {
                    match (nth_point(&out[start..], base), nth_point(&child, own)) {
                        (Some(target), Some(point)) => {
                            let shift = Affine::translate((target.x - point.x, target.y - point.y));
                            child = child.iter().map(|c| c.transformed(shift)).collect();
                        }
                        _ => warn!(
                            "point anchor {base}/{own} of {gid} does not resolve, component {} placed at origin",
                            component.glyph
                        ),
                    }
                }
                out.extend(child);
            }
        }
    }
}

fn nth_point(contours: &[Contour], index: u16) -> Option<OutlinePoint> {
    contours.iter().flat_map(|c| c.0.iter()).nth(index as usize).copied()
}

/// Levels of composite nesting below `gid`: 0 for simple and empty glyphs,
/// 1 for a composite of simple glyphs.
pub fn component_depth(store: &[Glyph], gid: GlyphId) -> u16 {
    depth_of(store, gid, 0)
}

fn depth_of(store: &[Glyph], gid: GlyphId, depth: usize) -> u16 {
    if depth > MAX_COMPONENT_DEPTH {
        return 0;
    }
    match store.get(gid.as_usize()).map(|g| &g.outline) {
        Some(Outline::Composite { components }) => {
            1 + components.iter().map(|c| depth_of(store, c.glyph, depth + 1)).max().unwrap_or(0)
        }
        _ => 0,
    }
}

/// Bounding box of the given contours, or `None` when there are no points.
pub fn bounds(contours: &[Contour]) -> Option<Rect> {
    let mut points = contours.iter().flat_map(|c| c.0.iter());
    let first = points.next()?;
    let mut rect = Rect::new(first.x, first.y, first.x, first.y);
    for p in points {
        rect = rect.union_pt(Point::new(p.x, p.y));
    }
    Some(rect)
}

pub(crate) fn to_font_units(v: f64) -> i16 {
    v.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

pub(crate) fn bbox_of(rect: Rect) -> Bbox {
    Bbox {
        x_min: to_font_units(rect.x0),
        y_min: to_font_units(rect.y0),
        x_max: to_font_units(rect.x1),
        y_max: to_font_units(rect.y1),
    }
}

/// Encode one glyph of `store` as a `glyf` record.
pub(crate) fn to_write(store: &[Glyph], gid: GlyphId) -> WriteGlyph {
    let Some(glyph) = store.get(gid.as_usize()) else {
        return WriteGlyph::Empty;
    };
    match &glyph.outline {
        Outline::Empty => WriteGlyph::Empty,
        Outline::Simple { contours, instructions } => {
            let contours: Vec<_> = contours
                .iter()
                .filter(|c| !c.0.is_empty())
                .map(|c| {
                    c.0.iter()
                        .map(|p| CurvePoint {
                            x: to_font_units(p.x),
                            y: to_font_units(p.y),
                            on_curve: p.on_curve,
                        })
                        .collect::<Vec<_>>()
                        .into()
                })
                .collect();
            if contours.is_empty() {
                return WriteGlyph::Empty;
            }
            let Some(rect) = bounds(&flatten(store, gid)) else {
                return WriteGlyph::Empty;
            };
            let bbox = bbox_of(rect);
            WriteGlyph::Simple(SimpleGlyph { bbox, contours, instructions: instructions.clone() })
        }
        Outline::Composite { components } => {
            let bbox = match bounds(&flatten(store, gid)) {
                Some(rect) => bbox_of(rect),
                None => {
                    warn!("composite glyph {gid} has no points, writing an empty bounding box");
                    Bbox::default()
                }
            };
            let mut parts = components.iter().map(|c| {
                WriteComponent::new(
                    GlyphId16::new(c.glyph.to_u16()),
                    c.anchor.clone(),
                    c.transform.clone(),
                    c.flags.clone(),
                )
            });
            let Some(first) = parts.next() else {
                return WriteGlyph::Empty;
            };
            let mut composite = CompositeGlyph::new(first, bbox);
            for part in parts {
                composite.add_component(part, bbox);
            }
            WriteGlyph::Composite(composite)
        }
    }
}
