//! Bezier paths.

use super::geometry::{Point, PointArray};
use std::f64::consts::FRAC_PI_2;

/// One drawing command of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic bezier: two control points, then the end point
    CurveTo(Point, Point, Point),
}

impl PathElement {
    /// Apply `f` to every point carried by this element.
    pub fn map(self, f: &impl Fn(Point) -> Point) -> Self {
        match self {
            PathElement::MoveTo(p) => PathElement::MoveTo(f(p)),
            PathElement::LineTo(p) => PathElement::LineTo(f(p)),
            PathElement::CurveTo(c1, c2, end) => PathElement::CurveTo(f(c1), f(c2), f(end)),
        }
    }
}

/// Sequence of path elements, optionally closed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub elements: Vec<PathElement>,
    pub closed: bool,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Point) {
        self.elements.push(PathElement::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Point) {
        self.elements.push(PathElement::LineTo(p));
    }

    pub fn curve_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.elements.push(PathElement::CurveTo(c1, c2, end));
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Polyline through `points`, starting with a move.
    pub fn from_points(points: &PointArray, closed: bool) -> Self {
        let mut path = Path {
            elements: Vec::with_capacity(points.len()),
            closed,
        };
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                path.move_to(*p);
            } else {
                path.line_to(*p);
            }
        }
        path
    }

    /// Append every element of `other`, keeping this path's close flag.
    pub fn append(&mut self, other: &Path) {
        self.elements.extend_from_slice(&other.elements);
    }

    /// Copy of this path with `f` applied to every point.
    ///
    /// Bezier curves are affine invariant, so mapping control points through
    /// an affine transform yields the transformed curve exactly.
    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Self {
        Path {
            elements: self.elements.iter().map(|e| e.map(&f)).collect(),
            closed: self.closed,
        }
    }

    /// Elliptical arc approximated by cubic beziers, one per quarter turn.
    ///
    /// Angles are in radians, counter-clockwise in a y-up frame; `sweep` may
    /// be negative. The path starts with a move to the arc's first point.
    pub fn elliptical_arc(center: Point, rx: f64, ry: f64, start: f64, sweep: f64) -> Self {
        let at = |angle: f64| Point::new(center.x + rx * angle.cos(), center.y + ry * angle.sin());

        let mut path = Path::new();
        path.move_to(at(start));
        if sweep == 0.0 || !sweep.is_finite() {
            return path;
        }

        let segments = (sweep.abs() / FRAC_PI_2).ceil().clamp(1.0, 16.0) as usize;
        let step = sweep / segments as f64;
        let k = 4.0 / 3.0 * (step / 4.0).tan();

        let mut a = start;
        for _ in 0..segments {
            let b = a + step;
            let (sin_a, cos_a) = a.sin_cos();
            let (sin_b, cos_b) = b.sin_cos();
            let c1 = Point::new(
                center.x + rx * (cos_a - k * sin_a),
                center.y + ry * (sin_a + k * cos_a),
            );
            let c2 = Point::new(
                center.x + rx * (cos_b + k * sin_b),
                center.y + ry * (sin_b - k * cos_b),
            );
            path.curve_to(c1, c2, at(b));
            a = b;
        }
        path
    }
}
