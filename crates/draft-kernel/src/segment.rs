//! Point / segment / line primitives.
//!
//! These run on every pointer move, so they stay allocation-free and never
//! divide by a near-zero denominator: parallel lines and zero-length segments
//! come back as `None`, not as NaN.

use crate::geometry::{EPSILON, Line, Point, Segment};

/// An intersection between two parametrized carriers.
///
/// `t` is the parameter along the first segment (`p1 → p2`), `u` along the
/// second (`p3 → p4`). Both are in `[0, 1]` when the point lies within the
/// finite segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub point: Point,
    pub t: f64,
    pub u: f64,
}

/// Closest point on segment `ab` to `p`, with the clamped parameter `t`.
///
/// A zero-length segment projects everything onto `a` with `t = 0`.
#[inline]
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> (Point, f64) {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq < EPSILON * EPSILON {
        return (a, 0.0);
    }

    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t, t)
}

/// Euclidean distance from `p` to the finite segment `ab`.
#[inline]
pub fn distance_point_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (closest, _) = closest_point_on_segment(p, a, b);
    p.distance(closest)
}

/// Solve the 2×2 system for the infinite lines `p1p2` and `p3p4`.
///
/// Returns unbounded parameters, or `None` for parallel/near-parallel lines
/// (and for degenerate carriers, whose determinant is zero too). The
/// parallel test is on the sine of the angle between the carriers, so it
/// does not depend on drawing units.
#[inline]
pub fn line_intersection_params(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Crossing> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let denom = d1.cross(d2);

    if denom.abs() <= EPSILON * d1.length() * d2.length() {
        return None;
    }

    let offset = p3 - p1;
    let t = offset.cross(d2) / denom;
    let u = offset.cross(d1) / denom;
    Some(Crossing { point: p1 + d1 * t, t, u })
}

/// Intersection of two infinite lines.
#[inline]
pub fn line_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    line_intersection_params(p1, p2, p3, p4).map(|c| c.point)
}

/// Intersection of two finite segments, with both parameters.
///
/// Parameters within `EPSILON` of the ends count as touching, so segments
/// meeting exactly at an endpoint intersect.
#[inline]
pub fn segment_intersection_params(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Crossing> {
    let crossing = line_intersection_params(p1, p2, p3, p4)?;
    let within = |v: f64| (-EPSILON..=1.0 + EPSILON).contains(&v);

    if within(crossing.t) && within(crossing.u) {
        let t = crossing.t.clamp(0.0, 1.0);
        let u = crossing.u.clamp(0.0, 1.0);
        Some(Crossing { point: p1.lerp(p2, t), t, u })
    } else {
        None
    }
}

/// Intersection point of two finite segments.
#[inline]
pub fn segment_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    segment_intersection_params(p1, p2, p3, p4).map(|c| c.point)
}

/// Where a ray from `origin` along `direction` meets an infinite line.
///
/// Hits behind the origin do not count.
pub fn ray_line_intersection(origin: Point, direction: Point, line: &Line) -> Option<Point> {
    let crossing = line_intersection_params(origin, origin + direction, line.p1, line.p2)?;
    if crossing.t < -EPSILON {
        return None;
    }
    Some(crossing.point)
}

/// Convenience over [`segment_intersection`] for `Segment` values.
#[inline]
pub fn segments_cross(a: &Segment, b: &Segment) -> Option<Point> {
    segment_intersection(a.start, a.end, b.start, b.end)
}
