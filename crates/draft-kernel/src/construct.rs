//! Trim, extend and parallel-offset.
//!
//! Each operation is one pure call: the tool that owns the interaction
//! (see [`crate::tools`]) gathers the picks and hands them over. A `None`
//! result is a classification ("lines do not cross"), never an error.

use crate::bounds::Bounds;
use crate::clip::clip_spans;
use crate::geometry::{EPSILON, Line, Point, Segment};
use crate::segment::{distance_point_to_segment, ray_line_intersection, segment_intersection};

/// Trim pieces shorter than this are dropped.
pub const MIN_PIECE_LENGTH: f64 = 1e-6;

/// How far a segment grows when no boundary is picked.
pub const DEFAULT_EXTEND_LENGTH: f64 = 10.0;

/// Outcome of cutting a target segment at a cutting edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimResult {
    /// Where the cutting edge crosses the target.
    pub intersection: Point,
    /// Up to two pieces, ordered from the target's start.
    pub pieces: Vec<Segment>,
}

impl TrimResult {
    /// Classic trim: drop the piece the user picked, keep the rest.
    ///
    /// When the cut lands on an endpoint there is only one piece and the
    /// result is empty (the whole target is removed).
    pub fn keep_away_from(&self, pick: Point) -> Vec<Segment> {
        let nearest = self
            .pieces
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = distance_point_to_segment(pick, a.start, a.end);
                let db = distance_point_to_segment(pick, b.start, b.end);
                da.total_cmp(&db)
            })
            .map(|(i, _)| i);

        self.pieces
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != nearest)
            .map(|(_, s)| *s)
            .collect()
    }
}

/// Split `target` where `cutter` crosses it.
///
/// `None` when the two finite segments do not meet.
pub fn trim(target: &Segment, cutter: &Segment) -> Option<TrimResult> {
    let intersection = segment_intersection(target.start, target.end, cutter.start, cutter.end)?;
    let pieces = [Segment::new(target.start, intersection), Segment::new(intersection, target.end)]
        .into_iter()
        .filter(|piece| piece.length() >= MIN_PIECE_LENGTH)
        .collect();
    Some(TrimResult { intersection, pieces })
}

/// Which end of a segment an operation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentEnd {
    Start,
    End,
}

impl SegmentEnd {
    /// The end nearer to `pick`; ties go to the end.
    pub fn nearest(segment: &Segment, pick: Point) -> Self {
        if pick.distance_squared(segment.start) < pick.distance_squared(segment.end) {
            SegmentEnd::Start
        } else {
            SegmentEnd::End
        }
    }
}

/// The chosen end and the outward direction at it.
fn outward(segment: &Segment, end: SegmentEnd) -> Option<(Point, Point)> {
    let dir = segment.direction()?;
    Some(match end {
        SegmentEnd::Start => (segment.start, -dir),
        SegmentEnd::End => (segment.end, dir),
    })
}

fn moved(segment: &Segment, end: SegmentEnd, to: Point) -> Segment {
    match end {
        SegmentEnd::Start => Segment::new(to, segment.end),
        SegmentEnd::End => Segment::new(segment.start, to),
    }
}

/// Grow one end of `segment` along its direction.
///
/// With a boundary the end moves to where the outward ray meets it (`None`
/// when parallel or behind); without one it moves by
/// [`DEFAULT_EXTEND_LENGTH`]. Zero-length segments have no direction.
pub fn extend(segment: &Segment, end: SegmentEnd, boundary: Option<&Line>) -> Option<Segment> {
    match boundary {
        Some(line) => {
            let (origin, dir) = outward(segment, end)?;
            let hit = ray_line_intersection(origin, dir, line)?;
            Some(moved(segment, end, hit))
        }
        None => extend_by(segment, end, DEFAULT_EXTEND_LENGTH),
    }
}

/// Grow one end of `segment` by a fixed `length`.
pub fn extend_by(segment: &Segment, end: SegmentEnd, length: f64) -> Option<Segment> {
    let (origin, dir) = outward(segment, end)?;
    Some(moved(segment, end, origin + dir * length))
}

/// Grow one end until the outward ray leaves `bounds`.
///
/// An end already inside stops at the exit of its span; an end outside
/// stops at the first boundary crossing ahead of it.
pub fn extend_to_bounds(segment: &Segment, end: SegmentEnd, bounds: &Bounds) -> Option<Segment> {
    let (origin, dir) = outward(segment, end)?;
    let bbox = bounds.bounding_box();
    let reach = origin.distance(bbox.center()) + bbox.diagonal();
    let ray = Segment::new(origin, origin + dir * reach);

    let first = *clip_spans(&ray, bounds).first()?;
    let tolerance = EPSILON.max(reach * 1e-12);
    let target = if first.start.approx_eq(origin, tolerance) { first.end } else { first.start };
    if target.distance(origin) < MIN_PIECE_LENGTH {
        return None;
    }
    Some(moved(segment, end, target))
}

/// Copy of `reference` shifted `distance` toward `side_point`.
///
/// A side point exactly on the carrier counts as the positive (left) side.
pub fn parallel_offset(reference: &Segment, side_point: Point, distance: f64) -> Option<Segment> {
    let normal = reference.direction()?.perp();
    let sign = if (side_point - reference.start).dot(normal) < 0.0 { -1.0 } else { 1.0 };
    Some(reference.translated(normal * (sign * distance)))
}

/// Copy of `reference` passing through `point`.
pub fn parallel_through(reference: &Segment, point: Point) -> Option<Segment> {
    let normal = reference.direction()?.perp();
    Some(reference.translated(normal * (point - reference.start).dot(normal)))
}

// ============================================================================
// TESTS
// ============================================================================
