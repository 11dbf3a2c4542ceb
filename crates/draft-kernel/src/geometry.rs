//! Core value types: points, segments, infinite lines and simple polygons.
//!
//! Everything here is `Copy` or cheaply `Clone`, created per call and owned
//! by the caller. The kernel never keeps references to these between calls.

use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{KernelError, Result};

/// Tolerance shared by the 2D math (determinants, zero-length tests).
pub const EPSILON: f64 = 1e-10;

/// A 2D point in the construction plane.
///
/// Also used as a plain vector (differences of points, directions).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector at `radians` from the +X axis.
    #[inline]
    pub fn from_angle(radians: f64) -> Self {
        Self::new(radians.cos(), radians.sin())
    }

    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    #[inline]
    pub fn distance_squared(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product. Positive when `other` is
    /// counter-clockwise from `self`.
    #[inline]
    pub fn cross(&self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    /// Left-hand perpendicular `(-y, x)`.
    #[inline]
    pub fn perp(&self) -> Point {
        Point::new(-self.y, self.x)
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    #[inline]
    pub fn normalized(&self) -> Option<Point> {
        let len = self.length();
        if len < EPSILON {
            None
        } else {
            Some(Point::new(self.x / len, self.y / len))
        }
    }

    #[inline]
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    #[inline]
    pub fn midpoint(&self, other: Point) -> Point {
        self.lerp(other, 0.5)
    }

    /// Angle of the vector from the +X axis, in `(-π, π]`.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Rotate (as a vector) by the given sine/cosine pair.
    #[inline]
    pub fn rotated(&self, sin_a: f64, cos_a: f64) -> Point {
        Point::new(self.x * cos_a - self.y * sin_a, self.x * sin_a + self.y * cos_a)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// An ordered pair of points.
///
/// Zero-length segments are valid input; every operation handles them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[inline]
    pub const fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    /// `end - start`.
    #[inline]
    pub fn delta(&self) -> Point {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Unit direction from start to end, `None` when zero-length.
    #[inline]
    pub fn direction(&self) -> Option<Point> {
        self.delta().normalized()
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start.distance_squared(self.end) < EPSILON * EPSILON
    }

    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        self.start.lerp(self.end, t)
    }

    #[inline]
    pub fn reversed(&self) -> Segment {
        Segment::new(self.end, self.start)
    }

    /// Same segment translated by `offset`.
    #[inline]
    pub fn translated(&self, offset: Point) -> Segment {
        Segment::new(self.start + offset, self.end + offset)
    }
}

/// An infinite line carried by two points.
///
/// The points give direction only, not extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
}

impl Line {
    #[inline]
    pub const fn through(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    #[inline]
    pub fn direction(&self) -> Option<Point> {
        (self.p2 - self.p1).normalized()
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.p1.distance_squared(self.p2) < EPSILON * EPSILON
    }
}

impl From<Segment> for Line {
    fn from(segment: Segment) -> Self {
        Line::through(segment.start, segment.end)
    }
}

/// A simple (non-self-intersecting) polygon, closed by implicit wraparound.
///
/// Vertices are listed once: a trailing copy of the first vertex is dropped
/// on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Validate and normalize a vertex list.
    pub fn new(mut vertices: Vec<Point>) -> Result<Self> {
        if vertices.iter().any(|p| !p.is_finite()) {
            return Err(KernelError::NonFinite { what: "polygon vertex" });
        }
        if vertices.len() > 1 {
            let first = vertices[0];
            if vertices.last().is_some_and(|last| last.approx_eq(first, EPSILON)) {
                vertices.pop();
            }
        }
        if vertices.len() < 3 {
            return Err(KernelError::TooFewVertices(vertices.len()));
        }
        Ok(Self { vertices })
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Edges in order, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// `(min_x, min_y, max_x, max_y)`.
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        points_bounding_box(&self.vertices)
    }

    /// Shoelace area: positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        signed_area_of_points(&self.vertices)
    }

    /// Area centroid, falling back to the vertex average for zero-area input.
    pub fn centroid(&self) -> Point {
        let area = self.signed_area();
        let n = self.vertices.len();
        if area.abs() < EPSILON {
            let sum = self.vertices.iter().fold(Point::default(), |acc, p| acc + *p);
            return sum * (1.0 / n as f64);
        }

        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let w = a.cross(b);
            cx += (a.x + b.x) * w;
            cy += (a.y + b.y) * w;
        }
        Point::new(cx / (6.0 * area), cy / (6.0 * area))
    }
}

/// Bounding box of a point list as `(min_x, min_y, max_x, max_y)`.
///
/// Callers guarantee a non-empty list.
pub fn points_bounding_box(points: &[Point]) -> (f64, f64, f64, f64) {
    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    (min_x, min_y, max_x, max_y)
}

/// Signed area of a point sequence using the shoelace formula.
pub fn signed_area_of_points(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}

/// The drawing plane a 2D kernel result is placed on.
///
/// The elevation is carried through for the scene collaborator and never
/// takes part in the 2D math.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConstructionPlane {
    pub elevation: f64,
}

impl ConstructionPlane {
    pub const fn at_elevation(elevation: f64) -> Self {
        Self { elevation }
    }

    /// Place a plane point in 3D as `[x, y, elevation]`.
    #[inline]
    pub fn lift(&self, p: Point) -> [f64; 3] {
        [p.x, p.y, self.elevation]
    }

    /// Drop the elevation of a 3D world point.
    #[inline]
    pub fn project(&self, world: [f64; 3]) -> Point {
        Point::new(world[0], world[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(p2), 5.0);
    }

    #[test]
    fn cross_sign_follows_winding() {
        let x = Point::new(1.0, 0.0);
        let y = Point::new(0.0, 1.0);
        assert!(x.cross(y) > 0.0);
        assert!(y.cross(x) < 0.0);
    }

    #[test]
    fn zero_vector_has_no_direction() {
        assert!(Point::new(0.0, 0.0).normalized().is_none());
        assert!(Segment::from_coords(1.0, 1.0, 1.0, 1.0).direction().is_none());
    }

    #[test]
    fn segment_length_and_midpoint() {
        let seg = Segment::from_coords(0.0, 0.0, 3.0, 4.0);
        assert_eq!(seg.length(), 5.0);
        assert_eq!(seg.midpoint(), Point::new(1.5, 2.0));
    }

    #[test]
    fn polygon_drops_closing_vertex() {
        let poly = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
            Point::new(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(poly.vertices().len(), 3);
    }

    #[test]
    fn polygon_needs_three_vertices() {
        let err = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]).unwrap_err();
        assert_eq!(err, KernelError::TooFewVertices(2));
    }

    #[test]
    fn polygon_bbox_and_centroid() {
        let poly = square();
        assert_eq!(poly.bounding_box(), (0.0, 0.0, 10.0, 10.0));
        let c = poly.centroid();
        assert_relative_eq!(c.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn signed_area_ccw_positive() {
        let area = square().signed_area();
        assert_relative_eq!(area, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn signed_area_cw_negative() {
        let poly = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ])
        .unwrap();
        assert_relative_eq!(poly.signed_area(), -100.0, epsilon = 1e-10);
    }

    #[test]
    fn polygon_edges_wrap_around() {
        let edges: Vec<_> = square().edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3], Segment::from_coords(0.0, 10.0, 0.0, 0.0));
    }

    #[test]
    fn plane_keeps_elevation_out_of_2d() {
        let plane = ConstructionPlane::at_elevation(2.5);
        let world = plane.lift(Point::new(1.0, 2.0));
        assert_eq!(world, [1.0, 2.0, 2.5]);
        assert_eq!(plane.project(world), Point::new(1.0, 2.0));
    }
}
