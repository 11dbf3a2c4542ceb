//! Line clipping against rectangles, circles and simple polygons.
//!
//! This is the hot path of tiling: every candidate hatch line goes through
//! here, and most of them get clipped to nothing. "Nothing visible" is a
//! normal `None` / empty result.

use crate::bounds::{Bounds, Circle, Rect};
use crate::geometry::{EPSILON, Point, Polygon, Segment};
use crate::segment::segment_intersection_params;

/// Hits closer than this along the clipped line are the same hit
/// (a line through a polygon vertex touches two edges).
const HIT_MERGE_T: f64 = 1e-9;

// ============================================================================
// POINT IN POLYGON (Ray Casting Algorithm)
// ============================================================================

/// Test if a point is inside a polygon using ray casting.
///
/// Casts a ray to the right and counts edge crossings.
/// Odd crossings = inside, even = outside.
#[inline]
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);

        // Does the horizontal ray from p cross edge (j, i)?
        if ((yi > p.y) != (yj > p.y)) && (p.x < (xj - xi) * (p.y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }

        j = i;
    }

    inside
}

// ============================================================================
// LINE-POLYGON INTERSECTIONS
// ============================================================================

/// A boundary crossing at parameter `t` along the clipped segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub point: Point,
    pub t: f64,
}

/// Every crossing between `segment` and the polygon boundary, sorted by
/// parameter along the segment, with vertex double-hits merged.
pub fn line_polygon_intersections(segment: &Segment, polygon: &[Point]) -> Vec<Hit> {
    let n = polygon.len();
    if n < 3 {
        return Vec::new();
    }

    let mut hits = Vec::with_capacity(n / 2);
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        if let Some(crossing) = segment_intersection_params(segment.start, segment.end, a, b) {
            hits.push(Hit { point: crossing.point, t: crossing.t });
        }
    }

    hits.sort_by(|a, b| a.t.total_cmp(&b.t));
    hits.dedup_by(|later, earlier| (later.t - earlier.t).abs() < HIT_MERGE_T);
    hits
}

// ============================================================================
// RECTANGLE (Cohen–Sutherland)
// ============================================================================

const LEFT: u8 = 0b0001;
const RIGHT: u8 = 0b0010;
const BOTTOM: u8 = 0b0100;
const TOP: u8 = 0b1000;

/// Each endpoint needs at most two replacements; one more pass classifies.
const MAX_CS_PASSES: usize = 5;

#[inline]
fn outcode(p: Point, rect: &Rect) -> u8 {
    let mut code = 0;
    if p.x < rect.min_x() {
        code |= LEFT;
    } else if p.x > rect.max_x() {
        code |= RIGHT;
    }
    if p.y < rect.min_y() {
        code |= BOTTOM;
    } else if p.y > rect.max_y() {
        code |= TOP;
    }
    code
}

/// Cohen–Sutherland clipping. A segment fully inside comes back unchanged.
pub fn clip_to_rect(segment: &Segment, rect: &Rect) -> Option<Segment> {
    let mut p0 = segment.start;
    let mut p1 = segment.end;
    let mut code0 = outcode(p0, rect);
    let mut code1 = outcode(p1, rect);

    for _ in 0..MAX_CS_PASSES {
        if code0 | code1 == 0 {
            return Some(Segment::new(p0, p1));
        }
        if code0 & code1 != 0 {
            return None;
        }

        // At least one endpoint is outside; move it onto the violated edge.
        // The other endpoint is on the inner side of that edge, so the
        // divisors below are non-zero.
        let out = if code0 != 0 { code0 } else { code1 };
        let d = p1 - p0;
        let moved = if out & TOP != 0 {
            Point::new(p0.x + d.x * (rect.max_y() - p0.y) / d.y, rect.max_y())
        } else if out & BOTTOM != 0 {
            Point::new(p0.x + d.x * (rect.min_y() - p0.y) / d.y, rect.min_y())
        } else if out & RIGHT != 0 {
            Point::new(rect.max_x(), p0.y + d.y * (rect.max_x() - p0.x) / d.x)
        } else {
            Point::new(rect.min_x(), p0.y + d.y * (rect.min_x() - p0.x) / d.x)
        };

        if out == code0 {
            p0 = moved;
            code0 = outcode(p0, rect);
        } else {
            p1 = moved;
            code1 = outcode(p1, rect);
        }
    }

    None
}

// ============================================================================
// CIRCLE (quadratic)
// ============================================================================

/// Portion of the segment between parameters `t0 <= t1`, reusing the exact
/// endpoints when a parameter sits on them.
#[inline]
fn sub_segment(segment: &Segment, t0: f64, t1: f64) -> Segment {
    let at = |t: f64| {
        if t <= 0.0 {
            segment.start
        } else if t >= 1.0 {
            segment.end
        } else {
            segment.point_at(t)
        }
    };
    Segment::new(at(t0), at(t1))
}

/// Solve `|P(t) - center|² = r²` and keep the part of `[t1, t2]` inside `[0, 1]`.
///
/// A tangent line yields a zero-length segment at the touching point.
pub fn clip_to_circle(segment: &Segment, circle: &Circle) -> Option<Segment> {
    let d = segment.delta();
    let f = segment.start - circle.center();
    let r = circle.radius();

    let a = d.dot(d);
    let c = f.dot(f) - r * r;
    if a < EPSILON * EPSILON {
        return (c <= 0.0).then_some(*segment);
    }

    let b = 2.0 * f.dot(d);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    if root < EPSILON {
        let t = -b / (2.0 * a);
        if !(0.0..=1.0).contains(&t) {
            return None;
        }
        let p = segment.point_at(t);
        return Some(Segment::new(p, p));
    }

    let t1 = (-b - root) / (2.0 * a);
    let t2 = (-b + root) / (2.0 * a);
    let lo = t1.max(0.0);
    let hi = t2.min(1.0);
    if lo > hi {
        return None;
    }
    Some(sub_segment(segment, lo, hi))
}

// ============================================================================
// POLYGON
// ============================================================================

/// Clip to a simple polygon, returning a single visible piece.
///
/// - both endpoints inside: the original segment;
/// - both outside: the span between the first two boundary hits, if any;
/// - one inside: from that endpoint to the nearest hit, keeping the
///   original direction.
///
/// For concave polygons that cut the line into several pieces, see
/// [`clip_spans`].
pub fn clip_to_polygon(segment: &Segment, polygon: &Polygon) -> Option<Segment> {
    let ring = polygon.vertices();
    let start_inside = point_in_polygon(segment.start, ring);
    let end_inside = point_in_polygon(segment.end, ring);

    if start_inside && end_inside {
        return Some(*segment);
    }

    let hits = line_polygon_intersections(segment, ring);

    match (start_inside, end_inside) {
        (false, false) => match hits.as_slice() {
            [first, second, ..] => Some(Segment::new(first.point, second.point)),
            _ => None,
        },
        (true, _) => match hits.first() {
            Some(hit) => Some(Segment::new(segment.start, hit.point)),
            // Numerically no crossing found: the whole line is visible.
            None => Some(*segment),
        },
        (false, true) => match hits.last() {
            Some(hit) => Some(Segment::new(hit.point, segment.end)),
            None => Some(*segment),
        },
    }
}

/// Every visible piece of `segment` inside a polygon, in order along it.
///
/// Entry/exit points are paired by testing each span's midpoint, so
/// concave outlines yield one piece per visible run.
fn polygon_spans(segment: &Segment, polygon: &Polygon) -> Vec<Segment> {
    // Fast bounding box rejection
    let (min_x, min_y, max_x, max_y) = polygon.bounding_box();
    let (s, e) = (segment.start, segment.end);
    if s.x.max(e.x) < min_x || s.x.min(e.x) > max_x || s.y.max(e.y) < min_y || s.y.min(e.y) > max_y {
        return Vec::new();
    }

    let ring = polygon.vertices();
    let start_inside = point_in_polygon(s, ring);
    let end_inside = point_in_polygon(e, ring);
    let hits = line_polygon_intersections(segment, ring);

    if hits.is_empty() {
        return if start_inside && end_inside { vec![*segment] } else { Vec::new() };
    }

    let mut stops: Vec<Point> = Vec::with_capacity(hits.len() + 2);
    if start_inside {
        stops.push(s);
    }
    stops.extend(hits.iter().map(|h| h.point));
    if end_inside {
        stops.push(e);
    }

    stops
        .windows(2)
        .filter_map(|pair| {
            let span = Segment::new(pair[0], pair[1]);
            (!span.is_degenerate() && point_in_polygon(span.midpoint(), ring)).then_some(span)
        })
        .collect()
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Clip a segment to any bounds kind.
///
/// Returns `None` when no visible part remains.
pub fn clip(segment: &Segment, bounds: &Bounds) -> Option<Segment> {
    match bounds {
        Bounds::Rect(rect) => clip_to_rect(segment, rect),
        Bounds::Circle(circle) => clip_to_circle(segment, circle),
        Bounds::Polygon(polygon) => clip_to_polygon(segment, polygon),
    }
}

/// Like [`clip`], but returns every visible piece.
///
/// Rectangles and circles are convex, so they yield at most one piece;
/// concave polygons can yield several.
pub fn clip_spans(segment: &Segment, bounds: &Bounds) -> Vec<Segment> {
    match bounds {
        Bounds::Polygon(polygon) => polygon_spans(segment, polygon),
        _ => clip(segment, bounds).into_iter().collect(),
    }
}

/// Clip many segments, flattening the visible pieces.
pub fn clip_all(segments: &[Segment], bounds: &Bounds) -> Vec<Segment> {
    segments.iter().flat_map(|s| clip_spans(s, bounds)).collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn rect10() -> Bounds {
        Bounds::rect(0.0, 0.0, 10.0, 10.0).unwrap()
    }

    fn square() -> Vec<Point> {
        vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)]
    }

    /// U-shaped outline with a notch from the top between x=3 and x=7.
    fn notched() -> Bounds {
        Bounds::polygon(vec![
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(10.0, 10.0),
            p(7.0, 10.0),
            p(7.0, 3.0),
            p(3.0, 3.0),
            p(3.0, 10.0),
            p(0.0, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn point_inside_square() {
        let sq = square();
        assert!(point_in_polygon(p(5.0, 5.0), &sq));
        assert!(!point_in_polygon(p(15.0, 5.0), &sq));
        assert!(!point_in_polygon(p(-1.0, 5.0), &sq));
    }

    #[test]
    fn rect_line_entirely_inside_is_unchanged() {
        let line = Segment::from_coords(2.0, 3.0, 8.0, 7.0);
        assert_eq!(clip(&line, &rect10()), Some(line));
    }

    #[test]
    fn rect_line_entirely_outside() {
        let line = Segment::from_coords(20.0, 20.0, 30.0, 30.0);
        assert_eq!(clip(&line, &rect10()), None);
    }

    #[test]
    fn rect_line_crossing_both_sides() {
        let line = Segment::from_coords(-5.0, 5.0, 15.0, 5.0);
        let clipped = clip(&line, &rect10()).unwrap();
        assert_eq!(clipped, Segment::from_coords(0.0, 5.0, 10.0, 5.0));
    }

    #[test]
    fn rect_diagonal_through_corners() {
        let line = Segment::from_coords(-5.0, -5.0, 15.0, 15.0);
        let clipped = clip(&line, &rect10()).unwrap();
        assert_relative_eq!(clipped.start.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(clipped.end.y, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn rect_outside_but_not_trivially_rejected() {
        // Outcodes LEFT and TOP share no bit, yet the line misses the corner.
        let line = Segment::from_coords(-5.0, 8.0, 2.0, 20.0);
        assert_eq!(clip(&line, &rect10()), None);
    }

    #[test]
    fn rect_zero_length_segment() {
        let inside = Segment::from_coords(4.0, 4.0, 4.0, 4.0);
        assert_eq!(clip(&inside, &rect10()), Some(inside));
        let outside = Segment::from_coords(-4.0, 4.0, -4.0, 4.0);
        assert_eq!(clip(&outside, &rect10()), None);
    }

    #[test]
    fn circle_chord() {
        let circle = Bounds::circle(p(0.0, 0.0), 5.0).unwrap();
        let clipped = clip(&Segment::from_coords(-10.0, 0.0, 10.0, 0.0), &circle).unwrap();
        assert_relative_eq!(clipped.start.x, -5.0, epsilon = 1e-12);
        assert_relative_eq!(clipped.end.x, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn circle_tangent_gives_point_segment() {
        let circle = Bounds::circle(p(0.0, 0.0), 5.0).unwrap();
        let clipped = clip(&Segment::from_coords(-10.0, 5.0, 10.0, 5.0), &circle).unwrap();
        assert!(clipped.is_degenerate());
        assert_relative_eq!(clipped.start.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(clipped.start.y, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn circle_miss_and_contained() {
        let circle = Bounds::circle(p(0.0, 0.0), 5.0).unwrap();
        assert_eq!(clip(&Segment::from_coords(-10.0, 6.0, 10.0, 6.0), &circle), None);
        let inner = Segment::from_coords(-1.0, 1.0, 2.0, -1.0);
        assert_eq!(clip(&inner, &circle), Some(inner));
    }

    #[test]
    fn circle_segment_ending_inside() {
        let circle = Bounds::circle(p(0.0, 0.0), 5.0).unwrap();
        let clipped = clip(&Segment::from_coords(-10.0, 0.0, 1.0, 0.0), &circle).unwrap();
        assert_relative_eq!(clipped.start.x, -5.0, epsilon = 1e-12);
        assert_eq!(clipped.end, p(1.0, 0.0));
    }

    #[test]
    fn circle_segment_short_of_the_circle() {
        let circle = Bounds::circle(p(0.0, 0.0), 5.0).unwrap();
        assert_eq!(clip(&Segment::from_coords(-20.0, 0.0, -10.0, 0.0), &circle), None);
    }

    #[test]
    fn polygon_both_inside() {
        let tri = Bounds::polygon(vec![p(0.0, 0.0), p(10.0, 0.0), p(0.0, 10.0)]).unwrap();
        let line = Segment::from_coords(1.0, 1.0, 3.0, 2.0);
        assert_eq!(clip(&line, &tri), Some(line));
    }

    #[test]
    fn polygon_crossing_from_outside() {
        let tri = Bounds::polygon(vec![p(0.0, 0.0), p(10.0, 0.0), p(0.0, 10.0)]).unwrap();
        let clipped = clip(&Segment::from_coords(-5.0, 2.0, 15.0, 2.0), &tri).unwrap();
        assert_relative_eq!(clipped.start.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(clipped.end.x, 8.0, epsilon = 1e-12);
    }

    #[test]
    fn polygon_one_end_inside_keeps_direction() {
        let sq = Bounds::polygon(square()).unwrap();
        let out_in = clip(&Segment::from_coords(-5.0, 5.0, 5.0, 5.0), &sq).unwrap();
        assert_relative_eq!(out_in.start.x, 0.0, epsilon = 1e-12);
        assert_eq!(out_in.end, p(5.0, 5.0));

        let in_out = clip(&Segment::from_coords(5.0, 5.0, 15.0, 5.0), &sq).unwrap();
        assert_eq!(in_out.start, p(5.0, 5.0));
        assert_relative_eq!(in_out.end.x, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn polygon_miss() {
        let sq = Bounds::polygon(square()).unwrap();
        assert_eq!(clip(&Segment::from_coords(15.0, 5.0, 20.0, 5.0), &sq), None);
    }

    #[test]
    fn polygon_through_vertex_merges_hits() {
        let diamond = Bounds::polygon(vec![p(5.0, 0.0), p(10.0, 5.0), p(5.0, 10.0), p(0.0, 5.0)]).unwrap();
        let clipped = clip(&Segment::from_coords(-5.0, 5.0, 15.0, 5.0), &diamond).unwrap();
        assert_relative_eq!(clipped.start.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(clipped.end.x, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn concave_polygon_first_span_from_clip() {
        let line = Segment::from_coords(-1.0, 5.0, 11.0, 5.0);
        let clipped = clip(&line, &notched()).unwrap();
        assert_relative_eq!(clipped.start.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(clipped.end.x, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn concave_polygon_all_spans() {
        let line = Segment::from_coords(-1.0, 5.0, 11.0, 5.0);
        let spans = clip_spans(&line, &notched());
        assert_eq!(spans.len(), 2);
        assert_relative_eq!(spans[0].end.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(spans[1].start.x, 7.0, epsilon = 1e-12);
        assert_relative_eq!(spans[1].end.x, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn spans_below_the_notch_are_one_piece() {
        let line = Segment::from_coords(-1.0, 1.0, 11.0, 1.0);
        assert_eq!(clip_spans(&line, &notched()).len(), 1);
    }

    #[test]
    fn clip_all_drops_invisible_lines() {
        let lines = [
            Segment::from_coords(-1.0, 5.0, 11.0, 5.0),
            Segment::from_coords(-1.0, 50.0, 11.0, 50.0),
        ];
        assert_eq!(clip_all(&lines, &rect10()).len(), 1);
    }
}
