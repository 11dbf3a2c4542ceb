//! Drawable shapes built from picks: rectangles, circles, polylines.
//!
//! Picked (mouse) input that collapses to nothing comes back as `None`;
//! typed sizes are validated and reject with a [`KernelError`].
//!
//! [`KernelError`]: crate::error::KernelError

use crate::arc::{Arc, adaptive_segment_count, circumcircle, fit_arc_toward, sample_arc};
use crate::bounds::{Circle, Rect};
use crate::error::{KernelError, Result, require_positive};
use crate::geometry::{EPSILON, Point, Segment};

/// Axis-aligned rectangle outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    rect: Rect,
}

impl Rectangle {
    /// Rectangle dragged between two opposite corners; `None` if it has no area.
    pub fn from_corners(a: Point, b: Point) -> Option<Self> {
        let rect = Rect::from_corners(a, b).ok()?;
        if rect.width() < EPSILON || rect.height() < EPSILON {
            return None;
        }
        Some(Self { rect })
    }

    /// Rectangle with a typed size, anchored at its lower-left corner.
    pub fn from_size(origin: Point, width: f64, height: f64) -> Result<Self> {
        let width = require_positive("width", width)?;
        let height = require_positive("height", height)?;
        let rect = Rect::new(origin.x, origin.y, origin.x + width, origin.y + height)?;
        Ok(Self { rect })
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn corners(&self) -> [Point; 4] {
        self.rect.corners()
    }

    /// The four sides, counter-clockwise from the lower-left corner.
    pub fn edges(&self) -> [Segment; 4] {
        let [a, b, c, d] = self.corners();
        [Segment::new(a, b), Segment::new(b, c), Segment::new(c, d), Segment::new(d, a)]
    }
}

/// Circle from its center and a point on the rim; `None` if they coincide.
pub fn circle_from_rim(center: Point, rim: Point) -> Option<Circle> {
    Circle::new(center, center.distance(rim)).ok()
}

/// Circle from a typed radius.
pub fn circle_from_radius(center: Point, radius: f64) -> Result<Circle> {
    Circle::new(center, radius)
}

/// Circle through three points; `None` when they are collinear.
pub fn circle_through(p1: Point, p2: Point, p3: Point) -> Option<Circle> {
    let (center, radius) = circumcircle(p1, p2, p3)?;
    Circle::new(center, radius).ok()
}

/// One piece of a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolylineSegment {
    Straight(Segment),
    Arc(Arc),
}

impl PolylineSegment {
    pub fn start(&self) -> Point {
        match self {
            PolylineSegment::Straight(s) => s.start,
            PolylineSegment::Arc(arc) => arc.start_point(),
        }
    }

    pub fn end(&self) -> Point {
        match self {
            PolylineSegment::Straight(s) => s.end,
            PolylineSegment::Arc(arc) => arc.end_point(),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            PolylineSegment::Straight(s) => s.length(),
            PolylineSegment::Arc(arc) => arc.length(),
        }
    }

    /// Points from start to end; arcs are sampled adaptively.
    pub fn flatten(&self) -> Vec<Point> {
        match self {
            PolylineSegment::Straight(s) => vec![s.start, s.end],
            PolylineSegment::Arc(arc) => sample_arc(arc, adaptive_segment_count(arc.sweep_angle())),
        }
    }
}

/// A chain of straight and arc pieces sharing endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    start: Point,
    segments: Vec<PolylineSegment>,
    closed: bool,
}

impl Polyline {
    pub fn new(start: Point) -> Self {
        Self { start, segments: Vec::new(), closed: false }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    /// Where the next piece attaches.
    pub fn current_end(&self) -> Point {
        self.segments.last().map_or(self.start, PolylineSegment::end)
    }

    pub fn segments(&self) -> &[PolylineSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Append a straight piece. Returns `false` (and appends nothing) when
    /// `p` repeats the current end.
    pub fn line_to(&mut self, p: Point) -> bool {
        let piece = Segment::new(self.current_end(), p);
        if piece.is_degenerate() {
            return false;
        }
        self.segments.push(PolylineSegment::Straight(piece));
        true
    }

    /// Append an arc to `end` bent toward `cursor`. Returns `false` when no
    /// arc fits (cursor on the chord, or `end` repeating the current end).
    pub fn arc_toward(&mut self, end: Point, cursor: Point) -> bool {
        match fit_arc_toward(self.current_end(), end, cursor) {
            Some(arc) => {
                self.segments.push(PolylineSegment::Arc(arc));
                true
            }
            None => false,
        }
    }

    /// Join the end back to the start with a straight piece if needed.
    ///
    /// Fails with [`KernelError::TooFewVertices`] for fewer than two pieces.
    pub fn close(&mut self) -> Result<()> {
        if self.segments.len() < 2 {
            return Err(KernelError::TooFewVertices(self.segments.len() + 1));
        }
        let start = self.start;
        if !self.current_end().approx_eq(start, EPSILON) {
            self.line_to(start);
        }
        self.closed = true;
        Ok(())
    }

    pub fn length(&self) -> f64 {
        self.segments.iter().map(PolylineSegment::length).sum()
    }

    /// Vertex chain with arcs sampled; shared endpoints appear once.
    pub fn flatten(&self) -> Vec<Point> {
        let mut points = vec![self.start];
        for piece in &self.segments {
            points.extend(piece.flatten().into_iter().skip(1));
        }
        points
    }

    /// The flattened chain as straight segments.
    pub fn to_segments(&self) -> Vec<Segment> {
        self.flatten().windows(2).map(|w| Segment::new(w[0], w[1])).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
