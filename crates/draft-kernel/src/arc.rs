//! Three-point circle fitting and arc bookkeeping.
//!
//! ## Curvature convention
//!
//! Every arc-producing path (polyline arcs, dimension arcs, circle fits) goes
//! through [`arc_control_point`] and [`fit_arc`]: the arc bulges toward the
//! side of the chord where the cursor lies, measured with the left normal of
//! `start → end`. Near-collinear input degrades to the chord midpoint and
//! then to "no arc", never to a flipped arc.

use std::f64::consts::TAU;

use lyon_geom::{Angle, point, vector};

use crate::error::{KernelError, Result, require_positive};
use crate::geometry::{EPSILON, Point};

/// Sampling density for [`adaptive_segment_count`].
pub const ARC_SEGMENTS_PER_RADIAN: f64 = 12.0;

/// Floor for [`adaptive_segment_count`], so short arcs still look round.
pub const MIN_ARC_SEGMENTS: usize = 8;

/// A circular arc. `sweep_angle` is signed (positive = counter-clockwise)
/// and `|sweep_angle| <= 2π`; `radius > 0` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    center: Point,
    radius: f64,
    start_angle: f64,
    sweep_angle: f64,
}

impl Arc {
    pub fn new(center: Point, radius: f64, start_angle: f64, sweep_angle: f64) -> Result<Self> {
        if !center.is_finite() || !start_angle.is_finite() || !sweep_angle.is_finite() {
            return Err(KernelError::NonFinite { what: "arc" });
        }
        let radius = require_positive("radius", radius)?;
        Ok(Self {
            center,
            radius,
            start_angle,
            sweep_angle: sweep_angle.clamp(-TAU, TAU),
        })
    }

    /// Full counter-clockwise turn starting at angle 0.
    ///
    /// Callers pass an already validated radius.
    pub(crate) fn full_circle(center: Point, radius: f64) -> Self {
        Self { center, radius, start_angle: 0.0, sweep_angle: TAU }
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
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    #[inline]
    pub fn sweep_angle(&self) -> f64 {
        self.sweep_angle
    }

    #[inline]
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.sweep_angle >= 0.0
    }

    /// Point at parameter `t` in `[0, 1]` along the sweep.
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        self.center + Point::from_angle(self.start_angle + self.sweep_angle * t) * self.radius
    }

    #[inline]
    pub fn start_point(&self) -> Point {
        self.point_at(0.0)
    }

    #[inline]
    pub fn end_point(&self) -> Point {
        self.point_at(1.0)
    }

    /// Arc length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.radius * self.sweep_angle.abs()
    }
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative input.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Center of the circle through three points, `None` when collinear.
///
/// Computed relative to `p1` to keep precision for large coordinates. The
/// collinearity test compares the cross product against `|b||c|`, so it
/// holds at any drawing scale.
pub fn circumcenter(p1: Point, p2: Point, p3: Point) -> Option<Point> {
    let b = p2 - p1;
    let c = p3 - p1;
    let d = 2.0 * b.cross(c);

    if d.abs() <= 2.0 * EPSILON * b.length() * c.length() {
        return None;
    }

    let b_sq = b.dot(b);
    let c_sq = c.dot(c);
    let ux = (c.y * b_sq - b.y * c_sq) / d;
    let uy = (b.x * c_sq - c.x * b_sq) / d;
    Some(p1 + Point::new(ux, uy))
}

/// Center and radius of the circle through three points.
pub fn circumcircle(p1: Point, p2: Point, p3: Point) -> Option<(Point, f64)> {
    let center = circumcenter(p1, p2, p3)?;
    Some((center, center.distance(p1)))
}

/// Control point that shapes an arc from `start` to `end` toward `cursor`.
///
/// The chord midpoint is pushed along the chord's left normal by the cursor's
/// signed perpendicular distance. When that distance is (nearly) zero the
/// plain midpoint comes back, and [`fit_arc`] will then report "no arc".
pub fn arc_control_point(start: Point, end: Point, cursor: Point) -> Point {
    let mid = start.midpoint(end);
    let Some(dir) = (end - start).normalized() else {
        return mid;
    };

    let normal = dir.perp();
    let offset = (cursor - start).dot(normal);
    if offset.abs() < EPSILON {
        return mid;
    }
    mid + normal * offset
}

/// Signed sweep from `start` to `end` that passes through `control`.
///
/// Measuring both counter-clockwise deltas from `start`: if the control point
/// comes first, the arc runs counter-clockwise and the end angle is unwrapped
/// forward; otherwise it runs clockwise.
pub fn sweep_through(center: Point, start: Point, control: Point, end: Point) -> f64 {
    let a_start = (start - center).angle();
    let to_control = normalize_angle((control - center).angle() - a_start);
    let to_end = normalize_angle((end - center).angle() - a_start);

    if to_control <= to_end { to_end } else { to_end - TAU }
}

/// Arc from `start` to `end` passing through `through`.
///
/// `None` when the three points are collinear (including coincident
/// endpoints). Callers treat that as "no arc possible".
pub fn fit_arc(start: Point, end: Point, through: Point) -> Option<Arc> {
    let center = circumcenter(start, through, end)?;
    let radius = center.distance(start);
    if radius < EPSILON {
        return None;
    }

    let sweep = sweep_through(center, start, through, end);
    Some(Arc {
        center,
        radius,
        start_angle: (start - center).angle(),
        sweep_angle: sweep,
    })
}

/// Arc from `start` to `end` curved toward a free cursor position.
pub fn fit_arc_toward(start: Point, end: Point, cursor: Point) -> Option<Arc> {
    fit_arc(start, end, arc_control_point(start, end, cursor))
}

/// Segment count that keeps smoothness independent of radius.
#[inline]
pub fn adaptive_segment_count(sweep_angle: f64) -> usize {
    let scaled = (sweep_angle.abs() * ARC_SEGMENTS_PER_RADIAN).ceil() as usize;
    scaled.max(MIN_ARC_SEGMENTS)
}

/// `segments + 1` evenly spaced points from the start to the end of the arc.
pub fn sample_arc(arc: &Arc, segments: usize) -> Vec<Point> {
    let n = segments.max(1);
    (0..=n).map(|i| arc.point_at(i as f64 / n as f64)).collect()
}

/// Flatten to within `tolerance` of the true curve.
///
/// The first point is the arc start; the last is the arc end.
pub fn flatten_arc(arc: &Arc, tolerance: f64) -> Result<Vec<Point>> {
    let tolerance = require_positive("flattening tolerance", tolerance)?;

    let curve = lyon_geom::Arc {
        center: point(arc.center.x, arc.center.y),
        radii: vector(arc.radius, arc.radius),
        start_angle: Angle::radians(arc.start_angle),
        sweep_angle: Angle::radians(arc.sweep_angle),
        x_rotation: Angle::radians(0.0),
    };

    let mut points = vec![arc.start_point()];
    curve.for_each_flattened(tolerance, &mut |segment| {
        points.push(Point::new(segment.to.x, segment.to.y));
    });
    Ok(points)
}
