//! Bounds: the region that clips and contains generated geometry.
//!
//! One tagged union over the three shape kinds the clipper and tiler accept.
//! All constructors validate, so code holding a `Bounds` can rely on a
//! positive radius, an ordered rectangle and a polygon with ≥3 vertices.

use crate::arc::{Arc, adaptive_segment_count, sample_arc};
use crate::clip::point_in_polygon;
use crate::error::{KernelError, Result, require_positive};
use crate::geometry::{Point, Polygon};

/// Axis-aligned rectangle with `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Rect {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        if ![min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite()) {
            return Err(KernelError::NonFinite { what: "rectangle corner" });
        }
        if min_x > max_x || min_y > max_y {
            return Err(KernelError::InvertedRect { min_x, min_y, max_x, max_y });
        }
        Ok(Self { min_x, min_y, max_x, max_y })
    }

    /// Rectangle spanning two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Result<Self> {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }
    #[inline]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    #[inline]
    pub fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }

    /// Corners counter-clockwise from `(min_x, min_y)`.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    /// Inclusive containment.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Circle with a strictly positive radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Result<Self> {
        if !center.is_finite() {
            return Err(KernelError::NonFinite { what: "circle center" });
        }
        let radius = require_positive("radius", radius)?;
        Ok(Self { center, radius })
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.distance_squared(self.center) <= self.radius * self.radius
    }
}

/// Clipping / containment region.
#[derive(Debug, Clone, PartialEq)]
pub enum Bounds {
    Rect(Rect),
    Circle(Circle),
    Polygon(Polygon),
}

impl Bounds {
    pub fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        Rect::new(min_x, min_y, max_x, max_y).map(Bounds::Rect)
    }

    pub fn circle(center: Point, radius: f64) -> Result<Self> {
        Circle::new(center, radius).map(Bounds::Circle)
    }

    pub fn polygon(vertices: Vec<Point>) -> Result<Self> {
        Polygon::new(vertices).map(Bounds::Polygon)
    }

    /// Short name used in logs and CLI output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Bounds::Rect(_) => "rect",
            Bounds::Circle(_) => "circle",
            Bounds::Polygon(_) => "polygon",
        }
    }

    /// Point containment, using the same tests the clipper relies on.
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Bounds::Rect(rect) => rect.contains(p),
            Bounds::Circle(circle) => circle.contains(p),
            Bounds::Polygon(polygon) => point_in_polygon(p, polygon.vertices()),
        }
    }

    /// Axis-aligned bounding box.
    pub fn bounding_box(&self) -> Rect {
        match self {
            Bounds::Rect(rect) => *rect,
            Bounds::Circle(circle) => {
                let c = circle.center;
                let r = circle.radius;
                Rect { min_x: c.x - r, min_y: c.y - r, max_x: c.x + r, max_y: c.y + r }
            }
            Bounds::Polygon(polygon) => {
                let (min_x, min_y, max_x, max_y) = polygon.bounding_box();
                Rect { min_x, min_y, max_x, max_y }
            }
        }
    }

    /// Pivot for rotated tiling: rectangle/circle center or polygon area centroid.
    pub fn centroid(&self) -> Point {
        match self {
            Bounds::Rect(rect) => rect.center(),
            Bounds::Circle(circle) => circle.center,
            Bounds::Polygon(polygon) => polygon.centroid(),
        }
    }

    /// Points that, together with the circle radius, bound every location
    /// inside the region. Used to size tiling coverage.
    pub(crate) fn hull_points(&self) -> Vec<Point> {
        match self {
            Bounds::Rect(rect) => rect.corners().to_vec(),
            Bounds::Circle(circle) => vec![circle.center],
            Bounds::Polygon(polygon) => polygon.vertices().to_vec(),
        }
    }

    /// Extra reach beyond [`Bounds::hull_points`] (the radius for circles).
    pub(crate) fn hull_padding(&self) -> f64 {
        match self {
            Bounds::Circle(circle) => circle.radius,
            _ => 0.0,
        }
    }

    /// Closed outline as a vertex ring; circles are sampled adaptively.
    pub fn outline(&self) -> Vec<Point> {
        match self {
            Bounds::Rect(rect) => rect.corners().to_vec(),
            Bounds::Circle(circle) => {
                let arc = Arc::full_circle(circle.center, circle.radius);
                let mut points = sample_arc(&arc, adaptive_segment_count(arc.sweep_angle()));
                // The last sample repeats the first on a full turn.
                points.pop();
                points
            }
            Bounds::Polygon(polygon) => polygon.vertices().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_rejects_inverted_corners() {
        assert!(matches!(
            Bounds::rect(10.0, 0.0, 0.0, 10.0),
            Err(KernelError::InvertedRect { .. })
        ));
    }

    #[test]
    fn rect_from_corners_orders_them() {
        let rect = Rect::from_corners(Point::new(10.0, 2.0), Point::new(0.0, 8.0)).unwrap();
        assert_eq!((rect.min_x(), rect.min_y(), rect.max_x(), rect.max_y()), (0.0, 2.0, 10.0, 8.0));
    }

    #[test]
    fn circle_rejects_zero_radius() {
        assert!(Bounds::circle(Point::new(0.0, 0.0), 0.0).is_err());
    }

    #[test]
    fn polygon_rejects_two_vertices() {
        let err = Bounds::polygon(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).unwrap_err();
        assert_eq!(err, KernelError::TooFewVertices(2));
    }

    #[test]
    fn containment_per_kind() {
        let rect = Bounds::rect(0.0, 0.0, 10.0, 10.0).unwrap();
        assert!(rect.contains(Point::new(10.0, 5.0)));
        assert!(!rect.contains(Point::new(10.1, 5.0)));

        let circle = Bounds::circle(Point::new(0.0, 0.0), 5.0).unwrap();
        assert!(circle.contains(Point::new(3.0, 4.0)));
        assert!(!circle.contains(Point::new(4.0, 4.0)));

        let triangle = Bounds::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ])
        .unwrap();
        assert!(triangle.contains(Point::new(2.0, 2.0)));
        assert!(!triangle.contains(Point::new(8.0, 8.0)));
    }

    #[test]
    fn circle_bounding_box() {
        let circle = Bounds::circle(Point::new(5.0, 5.0), 2.0).unwrap();
        let bbox = circle.bounding_box();
        assert_eq!((bbox.min_x(), bbox.max_y()), (3.0, 7.0));
    }

    #[test]
    fn circle_outline_stays_on_radius() {
        let circle = Bounds::circle(Point::new(1.0, 1.0), 3.0).unwrap();
        let ring = circle.outline();
        assert!(ring.len() >= 8);
        for p in ring {
            assert!((p.distance(Point::new(1.0, 1.0)) - 3.0).abs() < 1e-9);
        }
    }
}
