use std::fmt;
use std::ops::{Add, Sub, Mul, Neg};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

#[inline]
pub fn vec(x: f64, y: f64) -> Vector {
    Vector { x, y }
}

impl Vector {
    pub fn min(self, o: Vector) -> Vector {
        vec(self.x.min(o.x), self.y.min(o.y))
    }
    pub fn max(self, o: Vector) -> Vector {
        vec(self.x.max(o.x), self.y.max(o.y))
    }
}
impl Add for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector {
        vec(self.x + rhs.x, self.y + rhs.y)
    }
}
impl Sub for Vector {
    type Output = Vector;
    fn sub(self, rhs: Vector) -> Vector {
        vec(self.x - rhs.x, self.y - rhs.y)
    }
}
impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Vector {
        vec(self.x * rhs, self.y * rhs)
    }
}
impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        vec(-self.x, -self.y)
    }
}

/// 2x3 affine matrix, coefficients in `matrix(a, b, c, d, e, f)` order:
///
/// ```text
/// ⎛ a c e ⎞
/// ⎝ b d f ⎠
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}

// exact values for quarter turns, so that rotate(90) maps boxes onto integers
fn sin_cos_deg(deg: f64) -> (f64, f64) {
    let quarter = deg / 90.;
    if quarter.fract() == 0.0 {
        match (quarter as i64).rem_euclid(4) {
            0 => (0., 1.),
            1 => (1., 0.),
            2 => (0., -1.),
            _ => (-1., 0.),
        }
    } else {
        deg.to_radians().sin_cos()
    }
}

impl Transform {
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Transform {
        Transform { a, b, c, d, e, f }
    }
    pub const fn identity() -> Transform {
        Transform::new(1., 0., 0., 1., 0., 0.)
    }
    pub fn translate(tx: f64, ty: f64) -> Transform {
        Transform::new(1., 0., 0., 1., tx, ty)
    }
    pub fn scale(sx: f64, sy: f64) -> Transform {
        Transform::new(sx, 0., 0., sy, 0., 0.)
    }
    pub fn rotate(deg: f64) -> Transform {
        let (sin, cos) = sin_cos_deg(deg);
        Transform::new(cos, sin, -sin, cos, 0., 0.)
    }
    /// `translate(cx, cy) rotate(deg) translate(-cx, -cy)`
    pub fn rotate_about(deg: f64, cx: f64, cy: f64) -> Transform {
        Transform::translate(cx, cy)
            .compose(&Transform::rotate(deg))
            .compose(&Transform::translate(-cx, -cy))
    }
    pub fn skew_x(deg: f64) -> Transform {
        Transform::new(1., 0., deg.to_radians().tan(), 1., 0., 0.)
    }
    pub fn skew_y(deg: f64) -> Transform {
        Transform::new(1., deg.to_radians().tan(), 0., 1., 0., 0.)
    }

    /// `self` is the outer (ancestor) transform, `inner` is applied to points first.
    pub fn compose(&self, inner: &Transform) -> Transform {
        let (p, q) = (self, inner);
        Transform {
            a: p.a * q.a + p.c * q.b,
            b: p.b * q.a + p.d * q.b,
            c: p.a * q.c + p.c * q.d,
            d: p.b * q.c + p.d * q.d,
            e: p.a * q.e + p.c * q.f + p.e,
            f: p.b * q.e + p.d * q.f + p.f,
        }
    }

    pub fn apply(&self, p: Vector) -> Vector {
        vec(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    pub fn inverse(&self) -> Option<Transform> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Some(Transform {
            a, b, c, d,
            e: -(a * self.e + c * self.f),
            f: -(b * self.e + d * self.f),
        })
    }

    pub fn is_identity(&self) -> bool {
        *self == Transform::identity()
    }

    /// true if the transform only moves points
    pub fn is_translation(&self) -> bool {
        self.a == 1.0 && self.b == 0.0 && self.c == 0.0 && self.d == 1.0
    }
    pub fn translation(&self) -> Vector {
        vec(self.e, self.f)
    }
}

impl Mul for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Transform {
        self.compose(&rhs)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "matrix({},{},{},{},{},{})", self.a, self.b, self.c, self.d, self.e, self.f)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}
impl Rect {
    pub fn from_points(a: Vector, b: Vector) -> Rect {
        let (min, max) = (a.min(b), a.max(b));
        Rect { min_x: min.x, min_y: min.y, max_x: max.x, max_y: max.y }
    }
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect::from_points(vec(x, y), vec(x + width, y + height))
    }
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
    pub fn origin(&self) -> Vector {
        vec(self.min_x, self.min_y)
    }
    pub fn corners(&self) -> [Vector; 4] {
        [
            vec(self.min_x, self.min_y),
            vec(self.max_x, self.min_y),
            vec(self.max_x, self.max_y),
            vec(self.min_x, self.max_y),
        ]
    }
    pub fn union(&self, o: &Rect) -> Rect {
        Rect {
            min_x: self.min_x.min(o.min_x),
            min_y: self.min_y.min(o.min_y),
            max_x: self.max_x.max(o.max_x),
            max_y: self.max_y.max(o.max_y),
        }
    }
    pub fn pad(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            min_x: self.min_x - dx,
            min_y: self.min_y - dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }
}

/// Axis aligned bounds. `Empty` is the identity of `union`, distinct from a
/// zero-area box at some point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BoundingBox {
    Empty,
    Bounds(Rect),
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox::Empty
    }
}

impl BoundingBox {
    pub fn from_rect(r: Rect) -> BoundingBox {
        BoundingBox::Bounds(r)
    }
    pub fn from_point(p: Vector) -> BoundingBox {
        BoundingBox::Bounds(Rect::from_points(p, p))
    }
    pub fn from_points(points: impl IntoIterator<Item=Vector>) -> BoundingBox {
        points.into_iter().fold(BoundingBox::Empty, |b, p| b.include(p))
    }
    pub fn is_empty(&self) -> bool {
        matches!(self, BoundingBox::Empty)
    }
    pub fn rect(&self) -> Option<Rect> {
        match *self {
            BoundingBox::Empty => None,
            BoundingBox::Bounds(r) => Some(r),
        }
    }
    pub fn include(self, p: Vector) -> BoundingBox {
        self.union(BoundingBox::from_point(p))
    }
    pub fn union(self, other: BoundingBox) -> BoundingBox {
        match (self, other) {
            (BoundingBox::Empty, b) | (b, BoundingBox::Empty) => b,
            (BoundingBox::Bounds(a), BoundingBox::Bounds(b)) => BoundingBox::Bounds(a.union(&b)),
        }
    }
    /// Maps all four corners, rotation and skew can change which corner is extremal.
    pub fn map(self, t: &Transform) -> BoundingBox {
        match self {
            BoundingBox::Empty => BoundingBox::Empty,
            BoundingBox::Bounds(r) => BoundingBox::from_points(r.corners().iter().map(|&p| t.apply(p))),
        }
    }
    pub fn translated(self, dx: f64, dy: f64) -> BoundingBox {
        self.map(&Transform::translate(dx, dy))
    }
}

impl std::iter::FromIterator<BoundingBox> for BoundingBox {
    fn from_iter<I: IntoIterator<Item=BoundingBox>>(iter: I) -> Self {
        iter.into_iter().fold(BoundingBox::Empty, BoundingBox::union)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            BoundingBox::Empty => write!(f, "(empty)"),
            BoundingBox::Bounds(r) => write!(f, "({:.2},{:.2})-({:.2},{:.2})", r.min_x, r.min_y, r.max_x, r.max_y),
        }
    }
}

#[cfg(test)]
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}
