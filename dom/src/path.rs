use crate::prelude::*;
use crate::parser::path_data;
use lyon_geom::{Angle, ArcFlags, CubicBezierSegment, Point, QuadraticBezierSegment, SvgArc};

/// A path segment in absolute local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Vector),
    LineTo(Vector),
    CubicTo(Vector, Vector, Vector),
    QuadTo(Vector, Vector),
    Close,
}

#[inline]
fn reflect_on(control: Option<Vector>, current: Vector) -> Vector {
    match control {
        Some(c) => current * 2.0 - c,
        None => current
    }
}

/// Parses path data into absolute segments. `H`/`V` become lines, smooth
/// curves get their reflected control point and arcs are split into cubics.
pub fn parse_path_data(d: &str) -> Result<Vec<Segment>, ParseError> {
    let mut segments = Vec::new();
    let mut start = Vector::default();
    let mut last = Vector::default();
    let mut last_quadratic_control_point = None;
    let mut last_cubic_control_point = None;

    for cmd in path_data(d)? {
        let origin = if cmd.is_absolute() { Vector::default() } else { last };
        let a = &cmd.args;
        let p = |i: usize| origin + vec(a[i], a[i + 1]);

        let (mut quadratic, mut cubic) = (None, None);
        match cmd.command.to_ascii_uppercase() {
            'M' => {
                last = p(0);
                start = last;
                segments.push(Segment::MoveTo(last));
            }
            'L' => {
                last = p(0);
                segments.push(Segment::LineTo(last));
            }
            'H' => {
                last = vec(origin.x + a[0], last.y);
                segments.push(Segment::LineTo(last));
            }
            'V' => {
                last = vec(last.x, origin.y + a[0]);
                segments.push(Segment::LineTo(last));
            }
            'C' => {
                let (c1, c2) = (p(0), p(2));
                last = p(4);
                segments.push(Segment::CubicTo(c1, c2, last));
                cubic = Some(c2);
            }
            'S' => {
                let c1 = reflect_on(last_cubic_control_point, last);
                let c2 = p(0);
                last = p(2);
                segments.push(Segment::CubicTo(c1, c2, last));
                cubic = Some(c2);
            }
            'Q' => {
                let c = p(0);
                last = p(2);
                segments.push(Segment::QuadTo(c, last));
                quadratic = Some(c);
            }
            'T' => {
                let c = reflect_on(last_quadratic_control_point, last);
                last = p(0);
                segments.push(Segment::QuadTo(c, last));
                quadratic = Some(c);
            }
            'A' => {
                let to = p(5);
                let arc = ArcTo {
                    radius: vec(a[0], a[1]),
                    x_axis_rotation: a[2],
                    large_arc: a[3] != 0.0,
                    sweep: a[4] != 0.0,
                };
                arc.to_cubics(last, to, &mut segments);
                last = to;
            }
            _ => {
                segments.push(Segment::Close);
                last = start;
            }
        }
        last_quadratic_control_point = quadratic;
        last_cubic_control_point = cubic;
    }
    Ok(segments)
}

struct ArcTo {
    radius: Vector,
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
}

fn point(v: Vector) -> Point<f64> {
    lyon_geom::point(v.x, v.y)
}

fn from_point(p: Point<f64>) -> Vector {
    vec(p.x, p.y)
}

impl ArcTo {
    /// One cubic per quarter turn at most, ending exactly at `to`.
    fn to_cubics(&self, from: Vector, to: Vector, out: &mut Vec<Segment>) {
        if from == to {
            return;
        }
        let arc = SvgArc {
            from: point(from),
            to: point(to),
            radii: lyon_geom::vector(self.radius.x.abs(), self.radius.y.abs()),
            x_rotation: Angle::degrees(self.x_axis_rotation),
            flags: ArcFlags { large_arc: self.large_arc, sweep: self.sweep },
        };
        if arc.is_straight_line() || !(arc.radii.x.is_finite() && arc.radii.y.is_finite()) {
            out.push(Segment::LineTo(to));
            return;
        }
        let first = out.len();
        arc.to_arc().for_each_cubic_bezier(&mut |c: &CubicBezierSegment<f64>| {
            out.push(Segment::CubicTo(from_point(c.ctrl1), from_point(c.ctrl2), from_point(c.to)));
        });
        let added = out.len() > first;
        match out.last_mut() {
            Some(Segment::CubicTo(_, _, end)) if added => *end = to,
            _ => out.push(Segment::LineTo(to)),
        }
    }
}

/// Tight bounds of the segments: curve extrema, not control points.
pub fn segment_bounds(segments: &[Segment]) -> BoundingBox {
    let mut bounds = BoundingBox::Empty;
    let mut current = Vector::default();
    let mut start = current;
    for segment in segments {
        match *segment {
            Segment::MoveTo(p) => {
                bounds = bounds.include(p);
                current = p;
                start = p;
            }
            Segment::LineTo(p) => {
                bounds = bounds.include(p);
                current = p;
            }
            Segment::CubicTo(c1, c2, p) => {
                let curve = CubicBezierSegment { from: point(current), ctrl1: point(c1), ctrl2: point(c2), to: point(p) };
                let b = curve.bounding_box();
                bounds = bounds.include(from_point(b.min)).include(from_point(b.max));
                current = p;
            }
            Segment::QuadTo(c, p) => {
                let curve = QuadraticBezierSegment { from: point(current), ctrl: point(c), to: point(p) };
                let b = curve.bounding_box();
                bounds = bounds.include(from_point(b.min)).include(from_point(b.max));
                current = p;
            }
            Segment::Close => current = start,
        }
    }
    bounds
}

#[derive(Debug, Clone)]
pub struct TagPath {
    pub id: Option<String>,
    pub attrs: Attrs,
    pub segments: Vec<Segment>,
    pub source: Vec<Attribute>,
}
impl TagPath {
    /// Bounds in the path's own coordinate system.
    pub fn bounds(&self) -> BoundingBox {
        segment_bounds(&self.segments)
    }
    /// The path data as written.
    pub fn data(&self) -> Option<&str> {
        self.source.iter().find(|a| a.name == "d").map(|a| a.value.as_str())
    }
}
impl Tag for TagPath {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
impl ParseNode for TagPath {
    fn parse_node(node: &Node, _ctx: &mut ParseContext) -> Result<TagPath, ParseError> {
        let segments = match node.attribute("d") {
            Some(d) => parse_path_data(d)?,
            None => Vec::new(),
        };
        let attrs = Attrs::parse(node)?;
        let id = node.attribute("id").map(|s| s.into());
        Ok(TagPath { id, attrs, segments, source: source_attrs(node) })
    }
}
